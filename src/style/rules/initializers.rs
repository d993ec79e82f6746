use super::Rule;
use crate::style::{
	constructs::{Brace, BraceKind},
	diagnostics::{Diagnostic, RuleId},
	lines::LineModel,
	token::Position,
};

pub(crate) struct InitializerListOwnLines;
impl InitializerListOwnLines {
	fn check(model: &LineModel, brace: &Brace, close: usize) -> Vec<Position> {
		let tokens = &model.tokens;
		let open_line = tokens[brace.open].start.line;
		let close_line = tokens[close].start.line;
		let mut positions = Vec::new();

		if open_line == close_line {
			return positions;
		}
		if close > brace.open + 1 && tokens[brace.open + 1].start.line == open_line {
			positions.push(tokens[brace.open + 1].start);
		}

		let last_member = close - 1;

		if last_member > brace.open && tokens[last_member].end.line == close_line {
			positions.push(tokens[close].start);
		}

		positions
	}
}
impl Rule for InitializerListOwnLines {
	fn id(&self) -> RuleId {
		RuleId::InitializerListOwnLines
	}

	fn evaluate(&self, model: &LineModel) -> Vec<Diagnostic> {
		model
			.constructs
			.braces
			.iter()
			.filter(|brace| brace.kind == BraceKind::Initializer)
			.filter_map(|brace| brace.close.map(|close| Self::check(model, brace, close)))
			.flatten()
			.map(|position| Diagnostic::new(self.id(), position))
			.collect()
	}
}
