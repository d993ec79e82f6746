use super::Rule;
use crate::style::{
	diagnostics::{Diagnostic, RuleId},
	lines::LineModel,
	token::{LineEnding, Position},
};

pub(crate) struct IndentWithTabs;
impl Rule for IndentWithTabs {
	fn id(&self) -> RuleId {
		RuleId::IndentWithTabs
	}

	fn evaluate(&self, model: &LineModel) -> Vec<Diagnostic> {
		model
			.lines
			.iter()
			.filter(|line| !line.starts_in_literal && !line.is_blank())
			.filter_map(|line| {
				line.indent
					.first_space_column
					.map(|column| Diagnostic::new(self.id(), Position::new(line.number, column)))
			})
			.collect()
	}
}

pub(crate) struct NoTrailingWhitespace;
impl Rule for NoTrailingWhitespace {
	fn id(&self) -> RuleId {
		RuleId::NoTrailingWhitespace
	}

	fn evaluate(&self, model: &LineModel) -> Vec<Diagnostic> {
		let mut diagnostics = Vec::new();

		for line in &model.lines {
			let trimmed = line.trimmed_len();

			if trimmed == line.char_len() || line.ends_in_literal {
				continue;
			}

			let position = Position::new(line.number, trimmed + 1);

			if model.in_literal(position) {
				continue;
			}

			diagnostics.push(Diagnostic::new(self.id(), position));
		}

		diagnostics
	}
}

pub(crate) struct WindowsLineEnding;
impl Rule for WindowsLineEnding {
	fn id(&self) -> RuleId {
		RuleId::WindowsLineEnding
	}

	fn evaluate(&self, model: &LineModel) -> Vec<Diagnostic> {
		model
			.lines
			.iter()
			.filter(|line| line.ending.is_some_and(|ending| ending != LineEnding::CrLf))
			.map(|line| Diagnostic::new(self.id(), Position::new(line.number, line.char_len() + 1)))
			.collect()
	}
}
