//! Physical-line view over a token stream.
//!
//! Lines are rebuilt by replaying every trivia piece and token text in order, so the model is
//! an exact partition of the source. Each line carries its indentation composition, its
//! terminator, literal membership and the layout roles the construct pass assigns to it.

use std::mem;

use super::{
	constructs::{BraceKind, Constructs, StatementContext},
	error::{Error, Result},
	token::{LineEnding, Position, Token, TokenKind},
};

/// Leading-whitespace composition of one line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Indentation {
	pub(crate) tabs: usize,
	pub(crate) spaces: usize,
	/// A tab follows a space or a space follows a tab somewhere in the leading run.
	pub(crate) interleaved: bool,
	pub(crate) first_space_column: Option<usize>,
}
impl Indentation {
	fn measure(text: &str) -> Self {
		let mut indent = Self::default();
		let mut previous = None;

		for (idx, ch) in text.chars().enumerate() {
			match ch {
				'\t' => indent.tabs += 1,
				' ' => {
					indent.spaces += 1;

					indent.first_space_column.get_or_insert(idx + 1);
				},
				_ => break,
			}

			if previous.is_some_and(|previous| previous != ch) {
				indent.interleaved = true;
			}

			previous = Some(ch);
		}

		indent
	}

	pub(crate) fn is_pure_tabs(&self) -> bool {
		!self.interleaved && self.spaces == 0
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LineRole {
	StatementStart,
	Continuation { statement_line: usize },
	ParameterListStart,
	ParameterListContinuation,
	ParameterListClose,
	AttributeArguments,
	InitializerOpen,
	InitializerMember,
	InitializerClose,
	BraceLine,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Line {
	pub(crate) number: usize,
	/// Byte offset of the line's first character in the source.
	pub(crate) offset: usize,
	/// Line content without its terminator.
	pub(crate) text: String,
	pub(crate) ending: Option<LineEnding>,
	pub(crate) indent: Indentation,
	pub(crate) starts_in_literal: bool,
	pub(crate) ends_in_literal: bool,
	/// Indices of the tokens that start on this line.
	pub(crate) tokens: Vec<usize>,
	pub(crate) roles: Vec<LineRole>,
}
impl Line {
	pub(crate) fn char_len(&self) -> usize {
		self.text.chars().count()
	}

	pub(crate) fn trimmed_len(&self) -> usize {
		self.text.trim_end_matches([' ', '\t']).chars().count()
	}

	pub(crate) fn is_blank(&self) -> bool {
		self.text.chars().all(|ch| ch == ' ' || ch == '\t')
	}

	pub(crate) fn first_token(&self) -> Option<usize> {
		self.tokens.first().copied()
	}

	pub(crate) fn role(&self, pick: impl Fn(&LineRole) -> bool) -> Option<LineRole> {
		self.roles.iter().copied().find(|role| pick(role))
	}

	fn add_role(&mut self, role: LineRole) {
		if !self.roles.contains(&role) {
			self.roles.push(role);
		}
	}
}

/// Immutable per-source analysis shared by every rule.
#[derive(Debug)]
pub(crate) struct LineModel {
	pub(crate) tokens: Vec<Token>,
	pub(crate) lines: Vec<Line>,
	pub(crate) constructs: Constructs,
}
impl LineModel {
	pub(crate) fn build(tokens: Vec<Token>) -> Result<Self> {
		let mut builder = LineBuilder::new();

		match tokens.last() {
			Some(last) if last.is_eof() => {},
			Some(last) => return Err(Error::invalid_stream(last.end, "missing end-of-file token")),
			None => return Err(Error::invalid_stream(Position::START, "empty token stream")),
		}

		for (idx, token) in tokens.iter().enumerate() {
			if token.is_eof() && idx + 1 != tokens.len() {
				return Err(Error::invalid_stream(token.start, "end-of-file token before the end"));
			}

			for trivia in &token.leading {
				builder.expect(trivia.start)?;
				builder.feed(&trivia.text, false);
			}

			builder.expect(token.start)?;

			if !token.is_eof() {
				if token.text.is_empty() {
					return Err(Error::invalid_stream(token.start, "empty token text"));
				}

				builder.tokens.push(idx);
			}

			builder.feed(&token.text, matches!(token.kind, TokenKind::String | TokenKind::Char));
			builder.expect(token.end)?;

			for trivia in &token.trailing {
				builder.expect(trivia.start)?;
				builder.feed(&trivia.text, false);
			}
		}

		let mut lines = builder.finish();
		let constructs = Constructs::analyze(&tokens);

		assign_roles(&tokens, &constructs, &mut lines);

		Ok(Self { tokens, lines, constructs })
	}

	pub(crate) fn line(&self, number: usize) -> Option<&Line> {
		number.checked_sub(1).and_then(|idx| self.lines.get(idx))
	}

	/// Line holding the start of `token`.
	pub(crate) fn line_of(&self, token: usize) -> &Line {
		&self.lines[self.tokens[token].start.line - 1]
	}

	/// True when `token` shares its line with another token, comments excluded.
	pub(crate) fn shares_line(&self, token: usize) -> bool {
		self.line_of(token).tokens.len() > 1
	}

	/// True when `position` falls inside a string or char literal.
	pub(crate) fn in_literal(&self, position: Position) -> bool {
		let after = self.tokens.partition_point(|token| token.start <= position);

		after.checked_sub(1).map(|idx| &self.tokens[idx]).is_some_and(|token| {
			matches!(token.kind, TokenKind::String | TokenKind::Char) && position < token.end
		})
	}
}

struct LineBuilder {
	lines: Vec<Line>,
	cursor: Position,
	offset: usize,
	line_offset: usize,
	text: String,
	tokens: Vec<usize>,
	starts_in_literal: bool,
}
impl LineBuilder {
	fn new() -> Self {
		Self {
			lines: Vec::new(),
			cursor: Position::START,
			offset: 0,
			line_offset: 0,
			text: String::new(),
			tokens: Vec::new(),
			starts_in_literal: false,
		}
	}

	fn expect(&self, position: Position) -> Result<()> {
		if position == self.cursor {
			return Ok(());
		}

		Err(Error::invalid_stream(position, format!("expected the next piece at {}", self.cursor)))
	}

	fn feed(&mut self, text: &str, in_literal: bool) {
		let mut chars = text.chars().peekable();

		while let Some(ch) = chars.next() {
			let ending = match ch {
				'\r' if chars.peek() == Some(&'\n') => {
					chars.next();

					Some(LineEnding::CrLf)
				},
				'\r' => Some(LineEnding::Cr),
				'\n' => Some(LineEnding::Lf),
				_ => None,
			};

			match ending {
				Some(ending) => {
					self.offset += ending.as_str().len();

					self.end_line(Some(ending), in_literal);
				},
				None => {
					self.cursor.column += 1;
					self.offset += ch.len_utf8();

					self.text.push(ch);
				},
			}
		}
	}

	fn end_line(&mut self, ending: Option<LineEnding>, ends_in_literal: bool) {
		let text = mem::take(&mut self.text);

		self.lines.push(Line {
			number: self.lines.len() + 1,
			offset: self.line_offset,
			indent: Indentation::measure(&text),
			text,
			ending,
			starts_in_literal: self.starts_in_literal,
			ends_in_literal,
			tokens: mem::take(&mut self.tokens),
			roles: Vec::new(),
		});

		self.cursor = Position::new(self.lines.len() + 1, 1);
		self.line_offset = self.offset;
		self.starts_in_literal = ends_in_literal;
	}

	fn finish(mut self) -> Vec<Line> {
		self.end_line(None, false);

		self.lines
	}
}

fn assign_roles(tokens: &[Token], constructs: &Constructs, lines: &mut [Line]) {
	let firsts = lines
		.iter()
		.filter(|line| !line.starts_in_literal)
		.filter_map(|line| line.first_token().map(|token| (line.number, token)))
		.collect::<Vec<_>>();

	let mut add = |line: usize, role: LineRole| {
		if let Some(line) = line.checked_sub(1).and_then(|idx| lines.get_mut(idx)) {
			line.add_role(role);
		}
	};

	for list in &constructs.parameter_lists {
		if !list.layout.is_multiline() {
			continue;
		}

		add(tokens[list.open].start.line, LineRole::ParameterListStart);

		for parameter in &list.parameters {
			add(tokens[parameter.first].start.line, LineRole::ParameterListContinuation);
		}

		add(tokens[list.close].start.line, LineRole::ParameterListClose);
	}
	for attribute in &constructs.attribute_arguments {
		if !attribute.layout.is_multiline() {
			continue;
		}

		for argument in &attribute.arguments {
			add(tokens[argument.first].start.line, LineRole::AttributeArguments);
		}
	}
	for brace in &constructs.braces {
		let Some(close) = brace.close else {
			add(tokens[brace.open].start.line, LineRole::BraceLine);

			continue;
		};

		if brace.kind != BraceKind::Initializer {
			add(tokens[brace.open].start.line, LineRole::BraceLine);
			add(tokens[close].start.line, LineRole::BraceLine);

			continue;
		}

		add(tokens[brace.open].start.line, LineRole::InitializerOpen);

		for member in brace.open + 1..close {
			if constructs.enclosing[member] == Some(brace.open) {
				add(tokens[member].start.line, LineRole::InitializerMember);
			}
		}

		add(tokens[close].start.line, LineRole::InitializerClose);
	}

	for (number, first) in firsts {
		match constructs.statement_context(tokens, first) {
			StatementContext::Start => add(number, LineRole::StatementStart),
			StatementContext::Continuation(start) =>
				add(number, LineRole::Continuation { statement_line: tokens[start].start.line }),
			StatementContext::NotApplicable => {},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::style::lexer;

	fn model(text: &str) -> LineModel {
		LineModel::build(lexer::tokenize(text)).expect("token stream should be valid")
	}

	#[test]
	fn partitions_source_into_lines() {
		let text = "int a;\r\n\tint b; \n\r\nint c;";
		let model = model(text);

		assert_eq!(model.lines.len(), 4);
		assert_eq!(model.lines[0].ending, Some(LineEnding::CrLf));
		assert_eq!(model.lines[1].ending, Some(LineEnding::Lf));
		assert_eq!(model.lines[1].offset, 8);
		assert_eq!(model.lines[3].ending, None);
		assert_eq!(
			model
				.lines
				.iter()
				.flat_map(|line| [line.text.as_str(), line.ending.map_or("", LineEnding::as_str)])
				.collect::<String>(),
			text
		);
	}

	#[test]
	fn empty_source_has_one_empty_line() {
		let model = model("");

		assert_eq!(model.lines.len(), 1);
		assert!(model.lines[0].is_blank());
		assert_eq!(model.lines[0].ending, None);
	}

	#[test]
	fn measures_indentation() {
		let model = model("\t  \tfoo();\n    bar();\n  \tbaz();\n\t\tqux();");

		assert_eq!(
			model.lines[0].indent,
			Indentation { tabs: 2, spaces: 2, interleaved: true, first_space_column: Some(2) }
		);
		assert!(!model.lines[1].indent.interleaved);
		assert!(!model.lines[1].indent.is_pure_tabs());
		assert_eq!(model.lines[1].indent.first_space_column, Some(1));
		assert!(model.lines[2].indent.interleaved);
		assert_eq!(
			model.lines[3].indent,
			Indentation { tabs: 2, spaces: 0, interleaved: false, first_space_column: None }
		);
		assert!(model.lines[3].indent.is_pure_tabs());
	}

	#[test]
	fn tracks_multiline_literals() {
		let model = model("var s = @\"a\r\n  b\";\r\nint c;");

		assert!(model.lines[0].ends_in_literal);
		assert!(model.lines[1].starts_in_literal);
		assert!(!model.lines[1].ends_in_literal);
		assert!(!model.lines[2].starts_in_literal);
	}

	#[test]
	fn rejects_token_streams_with_gaps() {
		let mut tokens = lexer::tokenize("int a;");

		tokens[1].start = Position::new(1, 6);

		let err = LineModel::build(tokens).expect_err("gap should be rejected");

		assert!(matches!(err, Error::InvalidTokenStream { position, .. } if position == Position::new(1, 6)));
	}

	#[test]
	fn rejects_streams_without_end_of_file() {
		let mut tokens = lexer::tokenize("int a;");

		tokens.pop();

		assert!(matches!(LineModel::build(tokens), Err(Error::InvalidTokenStream { .. })));
		assert!(matches!(LineModel::build(Vec::new()), Err(Error::InvalidTokenStream { .. })));
	}

	#[test]
	fn assigns_continuation_roles() {
		let model = model("void M()\r\n{\r\n\tint foo =\r\n\t\t1;\r\n}");

		assert!(model.lines[2].roles.contains(&LineRole::StatementStart));
		assert!(model.lines[3].roles.contains(&LineRole::Continuation { statement_line: 3 }));
		assert!(model.lines[1].roles.contains(&LineRole::BraceLine));
	}

	#[test]
	fn assigns_list_roles() {
		let model = model("void M(\r\n\tint a,\r\n\tint b\r\n)\r\n{\r\n}");

		assert!(model.lines[0].roles.contains(&LineRole::ParameterListStart));
		assert!(model.lines[2].roles.contains(&LineRole::ParameterListContinuation));
		assert!(model.lines[3].roles.contains(&LineRole::ParameterListClose));
	}
}
