use super::Rule;
use crate::style::{
	diagnostics::{Diagnostic, RuleId},
	lines::{LineModel, LineRole},
	token::Position,
};

/// Continuation lines take two extra tabs over their statement; one extra tab reads as a new
/// nested statement.
pub(crate) struct ContinuationIndent;
impl Rule for ContinuationIndent {
	fn id(&self) -> RuleId {
		RuleId::ContinuationIndent
	}

	fn evaluate(&self, model: &LineModel) -> Vec<Diagnostic> {
		let mut diagnostics = Vec::new();

		for line in &model.lines {
			let Some(LineRole::Continuation { statement_line }) =
				line.role(|role| matches!(role, LineRole::Continuation { .. }))
			else {
				continue;
			};
			let Some(statement) = model.line(statement_line) else {
				continue;
			};

			if !line.indent.is_pure_tabs() || !statement.indent.is_pure_tabs() {
				continue;
			}
			if line.indent.tabs == statement.indent.tabs + 1 {
				diagnostics
					.push(Diagnostic::new(self.id(), Position::new(line.number, line.indent.tabs + 1)));
			}
		}

		diagnostics
	}
}
