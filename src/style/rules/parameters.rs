use super::Rule;
use crate::style::{
	diagnostics::{Diagnostic, RuleId},
	lines::LineModel,
};

pub(crate) struct ParametersOwnLines;
impl Rule for ParametersOwnLines {
	fn id(&self) -> RuleId {
		RuleId::ParametersOwnLines
	}

	fn evaluate(&self, model: &LineModel) -> Vec<Diagnostic> {
		let tokens = &model.tokens;
		let constructs = &model.constructs;
		let mut diagnostics = Vec::new();

		for list in constructs.parameter_lists.iter().filter(|list| list.layout.is_multiline()) {
			for pair in list.parameters.windows(2) {
				let (previous, parameter) = (pair[0], pair[1]);
				let start = tokens[parameter.first].start;

				if start.line != tokens[previous.last].end.line {
					continue;
				}

				let mut diagnostic = Diagnostic::new(self.id(), start);

				if let Some(name) = constructs.parameter_name(tokens, parameter) {
					diagnostic = diagnostic.with_arg(name);
				}

				diagnostics.push(diagnostic);
			}
		}

		diagnostics
	}
}

pub(crate) struct ClosingParameterParenOwnLine;
impl Rule for ClosingParameterParenOwnLine {
	fn id(&self) -> RuleId {
		RuleId::ClosingParameterParenOwnLine
	}

	fn evaluate(&self, model: &LineModel) -> Vec<Diagnostic> {
		let tokens = &model.tokens;

		model
			.constructs
			.parameter_lists
			.iter()
			.filter(|list| list.layout.is_multiline())
			.filter(|list| {
				list.parameters.last().is_some_and(|last| {
					tokens[last.last].end.line == tokens[list.close].start.line
				})
			})
			.map(|list| Diagnostic::new(self.id(), tokens[list.close].start))
			.collect()
	}
}

pub(crate) struct BaseConstructorCallSameLine;
impl Rule for BaseConstructorCallSameLine {
	fn id(&self) -> RuleId {
		RuleId::BaseConstructorCallSameLine
	}

	fn evaluate(&self, model: &LineModel) -> Vec<Diagnostic> {
		let tokens = &model.tokens;

		model
			.constructs
			.parameter_lists
			.iter()
			.filter(|list| list.layout.is_multiline())
			.filter_map(|list| {
				list.initializer_colon
					.filter(|&colon| tokens[colon].start.line != tokens[list.close].start.line)
			})
			.map(|colon| Diagnostic::new(self.id(), tokens[colon].start))
			.collect()
	}
}
