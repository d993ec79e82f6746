mod attributes;
mod braces;
mod continuation;
mod initializers;
mod length;
mod parameters;
mod whitespace;

pub(crate) use length::{MAX_LINE_WIDTH, TAB_WIDTH, WIDTH_MEASURE};

use super::{
	diagnostics::{Diagnostic, DiagnosticEmitter, RuleId},
	lines::LineModel,
};

/// One independent style rule. Rules only read the model and never see each other's output.
pub(crate) trait Rule: Send + Sync {
	fn id(&self) -> RuleId;

	fn evaluate(&self, model: &LineModel) -> Vec<Diagnostic>;
}

/// Every rule, in emission order for exact position ties.
pub(crate) static RULES: [&dyn Rule; 11] = [
	&whitespace::IndentWithTabs,
	&continuation::ContinuationIndent,
	&whitespace::NoTrailingWhitespace,
	&length::LineLengthLimit,
	&whitespace::WindowsLineEnding,
	&braces::BracesOwnLine,
	&parameters::ParametersOwnLines,
	&parameters::ClosingParameterParenOwnLine,
	&parameters::BaseConstructorCallSameLine,
	&attributes::AttributesOwnLines,
	&initializers::InitializerListOwnLines,
];

pub(crate) fn evaluate_all(model: &LineModel) -> Vec<Diagnostic> {
	let mut emitter = DiagnosticEmitter::default();

	for rule in RULES {
		emitter.extend(rule.evaluate(model));
	}

	emitter.finish()
}

#[cfg(test)]
fn evaluate(rule: &dyn Rule, text: &str) -> Vec<(usize, usize)> {
	let model = LineModel::build(super::lexer::tokenize(text)).expect("token stream should be valid");

	rule.evaluate(&model)
		.into_iter()
		.inspect(|diagnostic| assert_eq!(diagnostic.rule, rule.id()))
		.map(|diagnostic| (diagnostic.line, diagnostic.column))
		.collect()
}
