use std::fmt::{self, Display, Formatter};

use super::token::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum RuleId {
	IndentWithTabs,
	ContinuationIndent,
	NoTrailingWhitespace,
	LineLengthLimit,
	WindowsLineEnding,
	BracesOwnLine,
	ParametersOwnLines,
	ClosingParameterParenOwnLine,
	BaseConstructorCallSameLine,
	AttributesOwnLines,
	InitializerListOwnLines,
}
impl RuleId {
	pub(crate) const ALL: [Self; 11] = [
		Self::IndentWithTabs,
		Self::ContinuationIndent,
		Self::NoTrailingWhitespace,
		Self::LineLengthLimit,
		Self::WindowsLineEnding,
		Self::BracesOwnLine,
		Self::ParametersOwnLines,
		Self::ClosingParameterParenOwnLine,
		Self::BaseConstructorCallSameLine,
		Self::AttributesOwnLines,
		Self::InitializerListOwnLines,
	];

	pub(crate) fn code(self) -> &'static str {
		match self {
			Self::IndentWithTabs => "CS-STYLE-INDENT-001",
			Self::ContinuationIndent => "CS-STYLE-INDENT-002",
			Self::NoTrailingWhitespace => "CS-STYLE-SPACE-001",
			Self::LineLengthLimit => "CS-STYLE-LINE-001",
			Self::WindowsLineEnding => "CS-STYLE-LINE-002",
			Self::BracesOwnLine => "CS-STYLE-BRACE-001",
			Self::ParametersOwnLines => "CS-STYLE-PARAM-001",
			Self::ClosingParameterParenOwnLine => "CS-STYLE-PARAM-002",
			Self::BaseConstructorCallSameLine => "CS-STYLE-CTOR-001",
			Self::AttributesOwnLines => "CS-STYLE-ATTR-001",
			Self::InitializerListOwnLines => "CS-STYLE-INIT-001",
		}
	}

	pub(crate) fn name(self) -> &'static str {
		match self {
			Self::IndentWithTabs => "indent-with-tabs",
			Self::ContinuationIndent => "continuation-indent",
			Self::NoTrailingWhitespace => "no-trailing-whitespace",
			Self::LineLengthLimit => "line-length-limit",
			Self::WindowsLineEnding => "windows-line-ending",
			Self::BracesOwnLine => "braces-own-line",
			Self::ParametersOwnLines => "parameters-own-lines",
			Self::ClosingParameterParenOwnLine => "closing-parameter-paren-own-line",
			Self::BaseConstructorCallSameLine => "base-constructor-call-same-line",
			Self::AttributesOwnLines => "attributes-own-lines",
			Self::InitializerListOwnLines => "initializer-list-own-lines",
		}
	}

	/// Message template; `{0}`, `{1}`, ... are replaced by the diagnostic arguments.
	fn template(self) -> &'static str {
		match self {
			Self::IndentWithTabs => "Indent lines with tabs only.",
			Self::ContinuationIndent => "Indent continuation lines two tabs past the statement.",
			Self::NoTrailingWhitespace => "Remove trailing whitespace.",
			Self::LineLengthLimit => "Keep lines within {0} characters.",
			Self::WindowsLineEnding => "Use CRLF line endings.",
			Self::BracesOwnLine => "Place braces on their own lines.",
			Self::ParametersOwnLines => "Place parameter '{0}' on its own line.",
			Self::ClosingParameterParenOwnLine =>
				"Place the closing parenthesis of a wrapped parameter list on its own line.",
			Self::BaseConstructorCallSameLine =>
				"Keep the constructor initializer on the line of the closing parenthesis.",
			Self::AttributesOwnLines => "Place each wrapped attribute argument on its own line.",
			Self::InitializerListOwnLines =>
				"Keep initializer braces off lines that hold initializer members.",
		}
	}
}
impl Display for RuleId {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.code())
	}
}

/// One finding, anchored at the single character that triggers the rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Diagnostic {
	pub(crate) rule: RuleId,
	pub(crate) line: usize,
	pub(crate) column: usize,
	pub(crate) args: Vec<String>,
}
impl Diagnostic {
	pub(crate) fn new(rule: RuleId, position: Position) -> Self {
		Self { rule, line: position.line, column: position.column, args: Vec::new() }
	}

	pub(crate) fn with_arg(mut self, arg: impl Into<String>) -> Self {
		self.args.push(arg.into());

		self
	}

	pub(crate) fn position(&self) -> Position {
		Position::new(self.line, self.column)
	}

	pub(crate) fn message(&self) -> String {
		let mut message = self.rule.template().to_owned();

		for (idx, arg) in self.args.iter().enumerate() {
			message = message.replace(&format!("{{{idx}}}"), arg);
		}

		message
	}
}

/// Collects diagnostics from every rule and hands them back ordered by position.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticEmitter {
	diagnostics: Vec<Diagnostic>,
}
impl DiagnosticEmitter {
	pub(crate) fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
		self.diagnostics.extend(diagnostics);
	}

	/// Sorts by (line, column); the sort is stable so exact ties keep emission order.
	pub(crate) fn finish(mut self) -> Vec<Diagnostic> {
		self.diagnostics.sort_by_key(Diagnostic::position);

		self.diagnostics
	}
}
