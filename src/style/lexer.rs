//! Tokenizer for C#-like source text.
//!
//! Produces the token stream the line model consumes. Trailing trivia of a token runs up to
//! and including the first line terminator; every other piece of trivia leads the next token.
//! The scanner is total: unterminated literals and comments run to the end of input.

use super::token::{LineEnding, Position, Token, TokenKind, Trivia, TriviaKind};

const KEYWORDS: [&str; 77] = [
	"abstract",
	"as",
	"base",
	"bool",
	"break",
	"byte",
	"case",
	"catch",
	"char",
	"checked",
	"class",
	"const",
	"continue",
	"decimal",
	"default",
	"delegate",
	"do",
	"double",
	"else",
	"enum",
	"event",
	"explicit",
	"extern",
	"false",
	"finally",
	"fixed",
	"float",
	"for",
	"foreach",
	"goto",
	"if",
	"implicit",
	"in",
	"int",
	"interface",
	"internal",
	"is",
	"lock",
	"long",
	"namespace",
	"new",
	"null",
	"object",
	"operator",
	"out",
	"override",
	"params",
	"private",
	"protected",
	"public",
	"readonly",
	"ref",
	"return",
	"sbyte",
	"sealed",
	"short",
	"sizeof",
	"stackalloc",
	"static",
	"string",
	"struct",
	"switch",
	"this",
	"throw",
	"true",
	"try",
	"typeof",
	"uint",
	"ulong",
	"unchecked",
	"unsafe",
	"ushort",
	"using",
	"virtual",
	"void",
	"volatile",
	"while",
];
// `>>` is intentionally absent so generic closers stay separate tokens.
const MULTI_CHAR_PUNCTUATION: [&str; 25] = [
	"??=", "<<=", "=>", "==", "!=", "<=", ">=", "&&", "||", "++", "--", "+=", "-=", "*=", "/=",
	"%=", "&=", "|=", "^=", "??", "?.", "::", "->", "<<", "..",
];

/// Tokenize `text` into a complete stream ending with an end-of-file token.
pub(crate) fn tokenize(text: &str) -> Vec<Token> {
	let mut lexer = Lexer::new(text);

	lexer.run();

	lexer.tokens
}

pub(crate) fn is_keyword(text: &str) -> bool {
	KEYWORDS.contains(&text)
}

struct Lexer {
	chars: Vec<char>,
	idx: usize,
	pos: Position,
	at_line_start: bool,
	tokens: Vec<Token>,
}
impl Lexer {
	fn new(text: &str) -> Self {
		Self {
			chars: text.chars().collect(),
			idx: 0,
			pos: Position::START,
			at_line_start: true,
			tokens: Vec::new(),
		}
	}

	fn run(&mut self) {
		loop {
			let leading = self.leading_trivia();

			if self.is_done() {
				self.tokens.push(Token {
					kind: TokenKind::EndOfFile,
					text: String::new(),
					start: self.pos,
					end: self.pos,
					leading,
					trailing: Vec::new(),
				});

				break;
			}

			let start = self.pos;
			let from = self.idx;
			let kind = self.scan_token();
			let text = self.chars[from..self.idx].iter().collect::<String>();
			let end = self.pos;

			self.at_line_start = false;

			let trailing = self.trailing_trivia();

			self.tokens.push(Token { kind, text, start, end, leading, trailing });
		}
	}

	fn is_done(&self) -> bool {
		self.idx >= self.chars.len()
	}

	fn peek(&self, ahead: usize) -> Option<char> {
		self.chars.get(self.idx + ahead).copied()
	}

	fn bump(&mut self) -> Option<char> {
		let ch = self.peek(0)?;

		self.idx += 1;

		match ch {
			'\n' => self.pos = Position::new(self.pos.line + 1, 1),
			// A `\r` that starts a CRLF pair moves nothing; the `\n` does.
			'\r' if self.peek(0) == Some('\n') => {},
			'\r' => self.pos = Position::new(self.pos.line + 1, 1),
			_ => self.pos.column += 1,
		}

		Some(ch)
	}

	fn bump_while(&mut self, predicate: impl Fn(char) -> bool) {
		while self.peek(0).is_some_and(&predicate) {
			self.bump();
		}
	}

	fn leading_trivia(&mut self) -> Vec<Trivia> {
		let mut trivia = Vec::new();

		while let Some(piece) = self.scan_trivia(true) {
			let ends_line = matches!(piece.kind, TriviaKind::EndOfLine(_));

			trivia.push(piece);

			if ends_line {
				self.at_line_start = true;
			}
		}

		trivia
	}

	fn trailing_trivia(&mut self) -> Vec<Trivia> {
		let mut trivia = Vec::new();

		while let Some(piece) = self.scan_trivia(false) {
			let ends_line = matches!(piece.kind, TriviaKind::EndOfLine(_));

			trivia.push(piece);

			if ends_line {
				self.at_line_start = true;

				break;
			}
		}

		trivia
	}

	fn scan_trivia(&mut self, allow_directive: bool) -> Option<Trivia> {
		let start = self.pos;
		let from = self.idx;
		let ch = self.peek(0)?;
		let kind = match ch {
			' ' | '\t' | '\u{000B}' | '\u{000C}' | '\u{00A0}' | '\u{FEFF}' => {
				self.bump_while(|c| matches!(c, ' ' | '\t' | '\u{000B}' | '\u{000C}' | '\u{00A0}'));

				if self.idx == from {
					self.bump();
				}

				TriviaKind::Whitespace
			},
			'\r' if self.peek(1) == Some('\n') => {
				self.bump();
				self.bump();

				TriviaKind::EndOfLine(LineEnding::CrLf)
			},
			'\r' => {
				self.bump();

				TriviaKind::EndOfLine(LineEnding::Cr)
			},
			'\n' => {
				self.bump();

				TriviaKind::EndOfLine(LineEnding::Lf)
			},
			'/' if self.peek(1) == Some('/') => {
				self.bump_while(|c| c != '\r' && c != '\n');
				self.at_line_start = false;

				TriviaKind::LineComment
			},
			'/' if self.peek(1) == Some('*') => {
				self.bump();
				self.bump();

				while !self.is_done() && !(self.peek(0) == Some('*') && self.peek(1) == Some('/')) {
					self.bump();
				}

				self.bump();
				self.bump();
				self.at_line_start = false;

				TriviaKind::BlockComment
			},
			'#' if allow_directive && self.at_line_start => {
				self.bump_while(|c| c != '\r' && c != '\n');
				self.at_line_start = false;

				TriviaKind::Directive
			},
			_ => return None,
		};
		let text = self.chars[from..self.idx].iter().collect();

		Some(Trivia { kind, text, start })
	}

	fn scan_token(&mut self) -> TokenKind {
		let ch = self.peek(0).unwrap_or('\0');
		let next = self.peek(1);

		match ch {
			'"' | '$' if self.starts_string() => {
				self.consume_string();

				TokenKind::String
			},
			'@' if matches!(next, Some('"' | '$')) && self.starts_string() => {
				self.consume_string();

				TokenKind::String
			},
			'@' if next.is_some_and(is_identifier_start) => {
				self.bump();
				self.bump_while(is_identifier_part);

				TokenKind::Identifier
			},
			'\'' => {
				self.consume_char_literal();

				TokenKind::Char
			},
			c if is_identifier_start(c) => {
				let from = self.idx;

				self.bump_while(is_identifier_part);

				let word = self.chars[from..self.idx].iter().collect::<String>();

				if is_keyword(&word) { TokenKind::Keyword } else { TokenKind::Identifier }
			},
			c if c.is_ascii_digit() => {
				self.consume_number();

				TokenKind::Number
			},
			'.' if next.is_some_and(|c| c.is_ascii_digit()) => {
				self.consume_number();

				TokenKind::Number
			},
			_ => {
				self.consume_punctuation();

				TokenKind::Punctuation
			},
		}
	}

	fn starts_string(&self) -> bool {
		let mut ahead = 0;

		while matches!(self.peek(ahead), Some('$' | '@')) {
			ahead += 1;
		}

		self.peek(ahead) == Some('"')
	}

	fn consume_string(&mut self) {
		let mut dollars = 0_usize;
		let mut verbatim = false;

		while let Some(prefix @ ('$' | '@')) = self.peek(0) {
			if prefix == '$' {
				dollars += 1;
			} else {
				verbatim = true;
			}

			self.bump();
		}

		let mut quotes = 0_usize;

		while self.peek(quotes) == Some('"') {
			quotes += 1;
		}

		if quotes >= 3 && !verbatim {
			self.consume_raw_string(quotes);
		} else {
			self.bump();
			self.consume_quoted_body(verbatim, dollars > 0);
		}
	}

	fn consume_raw_string(&mut self, quotes: usize) {
		for _ in 0..quotes {
			self.bump();
		}

		while !self.is_done() {
			let mut run = 0_usize;

			while self.peek(run) == Some('"') {
				run += 1;
			}

			if run >= quotes {
				for _ in 0..run {
					self.bump();
				}

				return;
			}

			self.bump();
		}
	}

	fn consume_quoted_body(&mut self, verbatim: bool, interpolated: bool) {
		while let Some(ch) = self.peek(0) {
			match ch {
				'"' if verbatim && self.peek(1) == Some('"') => {
					self.bump();
					self.bump();
				},
				'"' => {
					self.bump();

					return;
				},
				'\\' if !verbatim => {
					self.bump();

					if self.peek(0).is_some_and(|c| c != '\r' && c != '\n') {
						self.bump();
					}
				},
				'\r' | '\n' if !verbatim => return,
				'{' if interpolated && self.peek(1) == Some('{') => {
					self.bump();
					self.bump();
				},
				'{' if interpolated => self.consume_interpolation_hole(),
				_ => {
					self.bump();
				},
			}
		}
	}

	fn consume_interpolation_hole(&mut self) {
		let mut depth = 0_usize;

		while let Some(ch) = self.peek(0) {
			match ch {
				'{' => {
					depth += 1;

					self.bump();
				},
				'}' => {
					self.bump();

					depth = depth.saturating_sub(1);

					if depth == 0 {
						return;
					}
				},
				'"' | '$' | '@' if self.starts_string() => self.consume_string(),
				'\'' => self.consume_char_literal(),
				_ => {
					self.bump();
				},
			}
		}
	}

	fn consume_char_literal(&mut self) {
		self.bump();

		while let Some(ch) = self.peek(0) {
			match ch {
				'\\' => {
					self.bump();

					if self.peek(0).is_some_and(|c| c != '\r' && c != '\n') {
						self.bump();
					}
				},
				'\'' => {
					self.bump();

					return;
				},
				'\r' | '\n' => return,
				_ => {
					self.bump();
				},
			}
		}
	}

	fn consume_number(&mut self) {
		let hex = self.peek(0) == Some('0') && matches!(self.peek(1), Some('x' | 'X'));

		while let Some(ch) = self.peek(0) {
			if ch.is_ascii_alphanumeric() || ch == '_' {
				let exponent = !hex && matches!(ch, 'e' | 'E');

				self.bump();

				if exponent
					&& matches!(self.peek(0), Some('+' | '-'))
					&& self.peek(1).is_some_and(|c| c.is_ascii_digit())
				{
					self.bump();
				}
			} else if ch == '.' && self.peek(1).is_some_and(|c| c.is_ascii_digit()) {
				self.bump();
			} else {
				break;
			}
		}
	}

	fn consume_punctuation(&mut self) {
		for candidate in MULTI_CHAR_PUNCTUATION {
			let matches = candidate.chars().enumerate().all(|(offset, c)| self.peek(offset) == Some(c));

			if matches {
				for _ in 0..candidate.chars().count() {
					self.bump();
				}

				return;
			}
		}

		self.bump();
	}
}

fn is_identifier_start(ch: char) -> bool {
	ch == '_' || ch.is_alphabetic()
}

fn is_identifier_part(ch: char) -> bool {
	ch == '_' || ch.is_alphanumeric()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn kinds_and_texts(text: &str) -> Vec<(TokenKind, String)> {
		tokenize(text).into_iter().map(|token| (token.kind, token.text)).collect()
	}

	#[test]
	fn splits_identifiers_keywords_and_punctuation() {
		let tokens = kinds_and_texts("public int Foo( int a ) => a;");

		assert_eq!(tokens[0], (TokenKind::Keyword, "public".to_owned()));
		assert_eq!(tokens[2], (TokenKind::Identifier, "Foo".to_owned()));
		assert_eq!(tokens[7], (TokenKind::Punctuation, "=>".to_owned()));
		assert_eq!(tokens.last().map(|(kind, _)| *kind), Some(TokenKind::EndOfFile));
	}

	#[test]
	fn keeps_generic_closers_separate() {
		let texts = kinds_and_texts("List<List<int>> x;")
			.into_iter()
			.map(|(_, text)| text)
			.collect::<Vec<_>>();

		assert_eq!(texts, vec!["List", "<", "List", "<", "int", ">", ">", "x", ";", ""]);
	}

	#[test]
	fn attaches_trailing_trivia_up_to_the_line_break() {
		let tokens = tokenize("a; // note\r\n\tb;");
		let semicolon = &tokens[1];

		assert_eq!(semicolon.trailing.len(), 3);
		assert_eq!(semicolon.trailing[1].kind, TriviaKind::LineComment);
		assert_eq!(semicolon.trailing[2].kind, TriviaKind::EndOfLine(LineEnding::CrLf));
		assert_eq!(tokens[2].leading[0].kind, TriviaKind::Whitespace);
		assert_eq!(tokens[2].start, Position::new(2, 2));
	}

	#[test]
	fn scans_verbatim_and_interpolated_strings_as_single_tokens() {
		let tokens = tokenize("var s = @\"a\r\n\"\"b\"\"\"; var t = $\"{x} {{ {\"}\"}\";");
		let verbatim = &tokens[3];
		let interpolated = &tokens[8];

		assert_eq!(verbatim.kind, TokenKind::String);
		assert_eq!(verbatim.start, Position::new(1, 9));
		assert_eq!(verbatim.end, Position::new(2, 7));
		assert_eq!(interpolated.kind, TokenKind::String);
		assert_eq!(interpolated.text, "$\"{x} {{ {\"}\"}\"");
	}

	#[test]
	fn scans_raw_string_literals() {
		let tokens = tokenize("var s = \"\"\"\r\n  say \"hi\"\r\n  \"\"\";");

		assert_eq!(tokens[3].kind, TokenKind::String);
		assert_eq!(tokens[4].text, ";");
	}

	#[test]
	fn char_escape_never_swallows_a_line_break() {
		let tokens = tokenize("char c = '\\\r\nint d;");
		let literal = &tokens[3];

		assert_eq!(literal.kind, TokenKind::Char);
		assert_eq!(literal.text, "'\\");
		assert_eq!(literal.end, Position::new(1, 12));
		assert_eq!(literal.trailing[0].kind, TriviaKind::EndOfLine(LineEnding::CrLf));
		assert_eq!(tokens[4].start, Position::new(2, 1));
	}

	#[test]
	fn treats_directives_at_line_start_as_trivia() {
		let tokens = tokenize("#region Fields\r\nint a;\r\n#endregion\r\n");

		assert_eq!(tokens[0].leading[0].kind, TriviaKind::Directive);
		assert_eq!(tokens[0].text, "int");
		assert_eq!(tokens.last().map(|token| token.leading[0].kind), Some(TriviaKind::Directive));
	}

	#[test]
	fn tracks_lone_carriage_returns_as_line_breaks() {
		let tokens = tokenize("a;\rb;\nc;");

		assert_eq!(tokens[2].start, Position::new(2, 1));
		assert_eq!(tokens[4].start, Position::new(3, 1));
		assert_eq!(tokens[1].trailing[0].kind, TriviaKind::EndOfLine(LineEnding::Cr));
	}

	#[test]
	fn unterminated_block_comment_runs_to_end_of_input() {
		let tokens = tokenize("a /* open\r\nstill open");

		assert_eq!(tokens.len(), 2);
		assert_eq!(tokens[0].trailing[1].kind, TriviaKind::BlockComment);
	}

	#[test]
	fn numbers_absorb_suffixes_and_exponents() {
		let texts = kinds_and_texts("x = 1.5e+3f + 0xFFu + .5m;")
			.into_iter()
			.filter(|(kind, _)| *kind == TokenKind::Number)
			.map(|(_, text)| text)
			.collect::<Vec<_>>();

		assert_eq!(texts, vec!["1.5e+3f", "0xFFu", ".5m"]);
	}
}
