use std::fmt::{self, Display, Formatter};

/// A 1-based line/column location. Columns count characters, a tab is one column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Position {
	pub(crate) line: usize,
	pub(crate) column: usize,
}
impl Position {
	pub(crate) const START: Self = Self { line: 1, column: 1 };

	pub(crate) fn new(line: usize, column: usize) -> Self {
		Self { line, column }
	}
}
impl Display for Position {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum TokenKind {
	Identifier,
	Keyword,
	Number,
	String,
	Char,
	Punctuation,
	EndOfFile,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum LineEnding {
	CrLf,
	Lf,
	Cr,
}
impl LineEnding {
	pub(crate) fn as_str(self) -> &'static str {
		match self {
			Self::CrLf => "\r\n",
			Self::Lf => "\n",
			Self::Cr => "\r",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum TriviaKind {
	Whitespace,
	EndOfLine(LineEnding),
	LineComment,
	BlockComment,
	Directive,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Trivia {
	pub(crate) kind: TriviaKind,
	pub(crate) text: String,
	pub(crate) start: Position,
}

/// One lexical token with the trivia the tokenizer attached to it.
///
/// `end` is exclusive: the position of the first character after the token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Token {
	pub(crate) kind: TokenKind,
	pub(crate) text: String,
	pub(crate) start: Position,
	pub(crate) end: Position,
	pub(crate) leading: Vec<Trivia>,
	pub(crate) trailing: Vec<Trivia>,
}
impl Token {
	pub(crate) fn is_punct(&self, text: &str) -> bool {
		self.kind == TokenKind::Punctuation && self.text == text
	}

	pub(crate) fn is_keyword(&self, text: &str) -> bool {
		self.kind == TokenKind::Keyword && self.text == text
	}

	pub(crate) fn is_ident(&self, text: &str) -> bool {
		self.kind == TokenKind::Identifier && self.text == text
	}

	pub(crate) fn is_open(&self) -> bool {
		self.kind == TokenKind::Punctuation && matches!(self.text.as_str(), "(" | "[" | "{")
	}

	pub(crate) fn is_close(&self) -> bool {
		self.kind == TokenKind::Punctuation && matches!(self.text.as_str(), ")" | "]" | "}")
	}

	pub(crate) fn is_eof(&self) -> bool {
		self.kind == TokenKind::EndOfFile
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn positions_order_by_line_then_column() {
		let mut positions = vec![Position::new(2, 1), Position::new(1, 9), Position::new(1, 2)];

		positions.sort();

		assert_eq!(positions, vec![Position::new(1, 2), Position::new(1, 9), Position::new(2, 1)]);
		assert_eq!(Position::new(3, 4).to_string(), "3:4");
	}

	#[test]
	fn token_predicates_check_kind_and_text() {
		let token = Token {
			kind: TokenKind::Punctuation,
			text: "{".to_owned(),
			start: Position::START,
			end: Position::new(1, 2),
			leading: Vec::new(),
			trailing: Vec::new(),
		};

		assert!(token.is_punct("{"));
		assert!(token.is_open());
		assert!(!token.is_close());
		assert!(!token.is_keyword("{"));
	}
}
