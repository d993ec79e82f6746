//! Lexical classification of the multi-line constructs the layout rules reason about.
//!
//! Everything here is derived from token kinds, texts and positions: bracket pairs, declaration
//! parameter lists, constructor initializers, attribute sections and what each `{` opens.
//! Wrapped/inline detection lives here once so every list rule shares the same answer.

use std::collections::HashSet;

use super::token::{Token, TokenKind};

const TYPE_KEYWORDS: [&str; 16] = [
	"bool", "byte", "char", "decimal", "double", "float", "int", "long", "object", "sbyte",
	"short", "string", "uint", "ulong", "ushort", "void",
];
const HEAD_KEYWORDS: [&str; 20] = [
	"public",
	"private",
	"protected",
	"internal",
	"static",
	"virtual",
	"override",
	"abstract",
	"sealed",
	"extern",
	"unsafe",
	"readonly",
	"volatile",
	"operator",
	"implicit",
	"explicit",
	"class",
	"struct",
	"interface",
	"delegate",
];
// Contextual words that look like identifiers but never name a type or a declared member.
const NON_DECLARATION_WORDS: [&str; 29] = [
	"add",
	"and",
	"ascending",
	"async",
	"await",
	"by",
	"descending",
	"equals",
	"from",
	"get",
	"group",
	"init",
	"into",
	"join",
	"let",
	"nameof",
	"not",
	"on",
	"or",
	"orderby",
	"remove",
	"select",
	"set",
	"value",
	"var",
	"when",
	"where",
	"with",
	"yield",
];
const CONTROL_KEYWORDS: [&str; 9] =
	["if", "while", "for", "foreach", "using", "lock", "fixed", "catch", "switch"];
const ACCESSOR_WORDS: [&str; 5] = ["get", "set", "init", "add", "remove"];
const ACCESSOR_MODIFIERS: [&str; 4] = ["private", "protected", "internal", "readonly"];

/// How a delimited list sits across physical lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Layout {
	/// Opener and closer share one line.
	Inline,
	/// The opener is the last token on its line.
	Wrapped,
	/// Multi-line, with the first element still on the opener's line.
	Hanging,
}
impl Layout {
	fn classify(tokens: &[Token], open: usize, close: usize) -> Self {
		let open_line = tokens[open].start.line;

		if tokens[close].start.line == open_line {
			Self::Inline
		} else if tokens[open + 1].start.line > open_line {
			Self::Wrapped
		} else {
			Self::Hanging
		}
	}

	pub(crate) fn is_multiline(self) -> bool {
		self != Self::Inline
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BraceKind {
	Block,
	AnonymousBlock,
	LambdaBody,
	AccessorList,
	AccessorBody,
	/// Object, collection, array, anonymous-object, `with` and switch-expression bodies.
	Initializer,
}
impl BraceKind {
	fn holds_statements(self) -> bool {
		self != Self::Initializer
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Brace {
	pub(crate) open: usize,
	pub(crate) close: Option<usize>,
	pub(crate) kind: BraceKind,
}

/// Token index range of one comma-separated element, inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Element {
	pub(crate) first: usize,
	pub(crate) last: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ParameterList {
	pub(crate) open: usize,
	pub(crate) close: usize,
	pub(crate) parameters: Vec<Element>,
	pub(crate) layout: Layout,
	/// The `:` of a trailing `: base(...)` / `: this(...)` call.
	pub(crate) initializer_colon: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AttributeArguments {
	pub(crate) open: usize,
	pub(crate) close: usize,
	pub(crate) arguments: Vec<Element>,
	pub(crate) layout: Layout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Head {
	Strong,
	Nullable,
	Weak,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Follow {
	Body,
	Semicolon,
	Initializer(usize),
	BaseList,
}

#[derive(Debug, Default)]
pub(crate) struct Constructs {
	pub(crate) partner: Vec<Option<usize>>,
	pub(crate) enclosing: Vec<Option<usize>>,
	pub(crate) braces: Vec<Brace>,
	pub(crate) parameter_lists: Vec<ParameterList>,
	pub(crate) attribute_arguments: Vec<AttributeArguments>,
	brace_kinds: Vec<Option<BraceKind>>,
	parameter_opens: HashSet<usize>,
	attribute_closers: HashSet<usize>,
}
impl Constructs {
	pub(crate) fn analyze(tokens: &[Token]) -> Self {
		let (partner, enclosing) = match_brackets(tokens);
		let mut constructs = Self {
			partner,
			enclosing,
			brace_kinds: vec![None; tokens.len()],
			..Self::default()
		};

		constructs.find_parameter_lists(tokens);
		constructs.classify_braces(tokens);
		constructs.find_attributes(tokens);

		constructs
	}

	pub(crate) fn brace_kind(&self, idx: usize) -> Option<BraceKind> {
		self.brace_kinds.get(idx).copied().flatten()
	}

	pub(crate) fn is_parameter_list_open(&self, idx: usize) -> bool {
		self.parameter_opens.contains(&idx)
	}

	pub(crate) fn is_attribute_closer(&self, idx: usize) -> bool {
		self.attribute_closers.contains(&idx)
	}

	/// Identifier a parameter declares: the last top-level identifier before any default value.
	pub(crate) fn parameter_name<'a>(&self, tokens: &'a [Token], element: Element) -> Option<&'a str> {
		let mut name = None;
		let mut idx = element.first;

		while idx <= element.last {
			let token = &tokens[idx];

			if token.is_punct("=") {
				break;
			}
			if token.kind == TokenKind::Identifier {
				name = Some(token.text.as_str());
			}

			idx = self.skip_group(idx) + 1;
		}

		name
	}

	/// Whether the line starting with `first` begins a statement, continues one (returning the
	/// statement's first token), or sits in a list context where neither applies.
	pub(crate) fn statement_context(&self, tokens: &[Token], first: usize) -> StatementContext {
		let token = &tokens[first];

		if token.is_punct("{") || token.is_close() {
			return StatementContext::NotApplicable;
		}
		if let Some(container) = self.enclosing[first]
			&& !self.brace_kind(container).is_some_and(BraceKind::holds_statements)
		{
			return StatementContext::NotApplicable;
		}
		if token.is_ident("where")
			|| self.is_initializer_colon(tokens, first)
			|| self.in_type_header(tokens, first)
		{
			return StatementContext::NotApplicable;
		}

		match first.checked_sub(1) {
			None => StatementContext::Start,
			Some(prev) if self.is_boundary(tokens, prev) => StatementContext::Start,
			Some(_) => StatementContext::Continuation(self.statement_start(tokens, first)),
		}
	}

	fn skip_group(&self, idx: usize) -> usize {
		match self.partner[idx] {
			Some(close) if close > idx => close,
			_ => idx,
		}
	}

	fn find_parameter_lists(&mut self, tokens: &[Token]) {
		for (open, token) in tokens.iter().enumerate() {
			if !token.is_punct("(") {
				continue;
			}

			let Some(close) = self.partner[open] else {
				continue;
			};
			let Some(head) = self.declaration_head(tokens, open) else {
				continue;
			};
			let Some(follow) = self.follow(tokens, close) else {
				continue;
			};
			let declares = match (head, follow) {
				(Head::Strong, _) => true,
				(Head::Nullable, Follow::Body | Follow::Semicolon) => true,
				(Head::Weak, Follow::Body | Follow::Initializer(_)) => true,
				_ => false,
			};

			if !declares {
				continue;
			}

			let initializer_colon = match follow {
				Follow::Initializer(colon) => Some(colon),
				_ => None,
			};

			self.parameter_opens.insert(open);
			self.parameter_lists.push(ParameterList {
				open,
				close,
				parameters: self.split_elements(tokens, open, close),
				layout: Layout::classify(tokens, open, close),
				initializer_colon,
			});
		}
	}

	fn declaration_head(&self, tokens: &[Token], open: usize) -> Option<Head> {
		let mut name = open.checked_sub(1)?;

		if tokens[name].is_punct(">") {
			name = self.generic_open(tokens, name)?.checked_sub(1)?;
		}

		let name_token = &tokens[name];
		let before = name.checked_sub(1).map(|idx| (idx, &tokens[idx]));

		if before.is_some_and(|(_, token)| token.is_keyword("operator")) {
			return Some(Head::Strong);
		}
		if name_token.kind != TokenKind::Identifier
			|| NON_DECLARATION_WORDS.contains(&name_token.text.as_str())
		{
			return None;
		}

		let Some((before_idx, before)) = before else {
			return Some(Head::Weak);
		};

		match before.kind {
			TokenKind::Identifier if !NON_DECLARATION_WORDS.contains(&before.text.as_str()) =>
				Some(Head::Strong),
			TokenKind::Keyword
				if TYPE_KEYWORDS.contains(&before.text.as_str())
					|| HEAD_KEYWORDS.contains(&before.text.as_str()) =>
				Some(Head::Strong),
			TokenKind::Punctuation => match before.text.as_str() {
				">" => self
					.generic_open(tokens, before_idx)
					.and_then(|lt| lt.checked_sub(1))
					.filter(|&type_name| is_type_atom(&tokens[type_name]))
					.map(|_| Head::Strong),
				"]" if self.is_rank_specifier(tokens, before_idx) => Some(Head::Strong),
				"*" => self
					.before_type(tokens, before_idx)
					.is_none_or(|idx| opens_declaration(&tokens[idx]))
					.then_some(Head::Strong),
				")" => self.partner[before_idx]
					.filter(|&open| is_tuple_type(tokens, open, before_idx))
					.filter(|&open| {
						open.checked_sub(1).is_none_or(|idx| opens_declaration(&tokens[idx]))
					})
					.map(|_| Head::Strong),
				"?" => before_idx
					.checked_sub(1)
					.filter(|&idx| is_type_atom(&tokens[idx]))
					.map(|_| Head::Nullable),
				";" | "{" | "}" | "]" => Some(Head::Weak),
				_ => None,
			},
			_ => None,
		}
	}

	fn follow(&self, tokens: &[Token], close: usize) -> Option<Follow> {
		let next = significant(tokens, close + 1)?;
		let token = &tokens[next];

		if token.is_punct("{") || token.is_punct("=>") || token.is_ident("where") {
			return Some(Follow::Body);
		}
		if token.is_punct(";") {
			return Some(Follow::Semicolon);
		}
		if token.is_punct(":") {
			let calls_chain = significant(tokens, next + 1)
				.is_some_and(|idx| tokens[idx].is_keyword("base") || tokens[idx].is_keyword("this"));

			return Some(if calls_chain { Follow::Initializer(next) } else { Follow::BaseList });
		}

		None
	}

	/// `[]` or `[,]` directly after a type, as in `int[] Values()`.
	fn is_rank_specifier(&self, tokens: &[Token], close: usize) -> bool {
		let Some(open) = self.partner[close] else {
			return false;
		};

		tokens[open + 1..close].iter().all(|token| token.is_punct(","))
			&& open.checked_sub(1).is_some_and(|idx| {
				is_type_atom(&tokens[idx]) || tokens[idx].is_punct(">") || tokens[idx].is_punct("]")
			})
	}

	/// Walks back from a `>` to its matching `<` across a type argument list.
	fn generic_open(&self, tokens: &[Token], gt: usize) -> Option<usize> {
		let mut depth = 0_usize;
		let mut idx = gt;

		loop {
			let token = &tokens[idx];

			if token.is_punct(">") {
				depth += 1;
			} else if token.is_punct("<") {
				depth -= 1;

				if depth == 0 {
					return idx.checked_sub(1).filter(|&name| is_type_atom(&tokens[name])).map(|_| idx);
				}
			} else if token.is_punct(")") || token.is_punct("]") {
				idx = self.partner[idx]?;
			} else if !(is_type_atom(token) || token.is_punct(",")) {
				return None;
			}

			idx = idx.checked_sub(1)?;
		}
	}

	/// Index of the first token before the type expression ending at `end`.
	fn before_type(&self, tokens: &[Token], end: usize) -> Option<usize> {
		let mut idx = end;

		loop {
			let token = &tokens[idx];
			let start = if token.is_punct(">") {
				self.generic_open(tokens, idx)
			} else if token.is_punct("]") {
				self.partner[idx]
			} else if is_type_atom(token) {
				Some(idx)
			} else {
				return Some(idx);
			};
			let Some(start) = start else {
				return Some(idx);
			};

			idx = start.checked_sub(1)?;
		}
	}

	fn split_elements(&self, tokens: &[Token], open: usize, close: usize) -> Vec<Element> {
		let mut elements = Vec::new();
		let mut first = None;
		let mut angle = 0_usize;
		let mut idx = open + 1;

		while idx < close {
			let token = &tokens[idx];

			if token.is_punct(",") && angle == 0 {
				if let Some(start) = first.take() {
					elements.push(Element { first: start, last: idx - 1 });
				}

				idx += 1;

				continue;
			}
			if first.is_none() {
				first = Some(idx);
			}
			if token.is_punct("<") && is_type_atom(&tokens[idx - 1]) {
				angle += 1;
			} else if token.is_punct(">") && angle > 0 {
				angle -= 1;
			}

			idx = self.skip_group(idx).min(close) + 1;
		}

		if let Some(start) = first {
			elements.push(Element { first: start, last: close - 1 });
		}

		elements
	}

	fn classify_braces(&mut self, tokens: &[Token]) {
		for (open, token) in tokens.iter().enumerate() {
			if !token.is_punct("{") {
				continue;
			}

			let kind = self.classify_brace(tokens, open);

			self.brace_kinds[open] = Some(kind);

			if let Some(close) = self.partner[open] {
				self.brace_kinds[close] = Some(kind);
			}

			self.braces.push(Brace { open, close: self.partner[open], kind });
		}
	}

	fn classify_brace(&self, tokens: &[Token], open: usize) -> BraceKind {
		let Some(prev) = open.checked_sub(1) else {
			return BraceKind::Block;
		};
		let before = &tokens[prev];
		let container = self.enclosing[open].and_then(|idx| self.brace_kind(idx));

		if before.is_punct("=>") || self.is_anonymous_method(tokens, prev) {
			return BraceKind::LambdaBody;
		}
		if before.kind == TokenKind::Identifier
			&& ACCESSOR_WORDS.contains(&before.text.as_str())
			&& container == Some(BraceKind::AccessorList)
		{
			return BraceKind::AccessorBody;
		}
		if self.opens_accessor_list(tokens, open) {
			return BraceKind::AccessorList;
		}
		if before.is_keyword("new")
			|| before.is_keyword("stackalloc")
			|| before.is_keyword("switch")
			|| before.is_punct("=")
			|| before.is_ident("with")
		{
			return BraceKind::Initializer;
		}
		if (before.is_punct(",") || before.is_punct("{")) && container == Some(BraceKind::Initializer) {
			return BraceKind::Initializer;
		}
		if before.is_punct(")") {
			let creates = self.partner[prev]
				.filter(|&paren| !self.is_parameter_list_open(paren))
				.and_then(|paren| paren.checked_sub(1))
				.is_some_and(|idx| self.creates_object(tokens, idx));

			return if creates { BraceKind::Initializer } else { BraceKind::Block };
		}
		if (is_type_atom(before) || before.is_punct(">") || before.is_punct("]"))
			&& self.before_type(tokens, prev).is_some_and(|idx| is_creation_keyword(&tokens[idx]))
		{
			return BraceKind::Initializer;
		}
		if (before.is_punct(";") || before.is_punct("{") || before.is_punct("}"))
			&& container.is_some_and(BraceKind::holds_statements)
		{
			return BraceKind::AnonymousBlock;
		}

		BraceKind::Block
	}

	/// `delegate` or `delegate( ... )` directly before a body brace.
	fn is_anonymous_method(&self, tokens: &[Token], prev: usize) -> bool {
		let head = if tokens[prev].is_punct(")") {
			self.partner[prev].and_then(|paren| paren.checked_sub(1))
		} else {
			Some(prev)
		};

		head.is_some_and(|idx| tokens[idx].is_keyword("delegate"))
	}

	/// `idx` is the token before a `(`: true for `new T(...)` and target-typed `new(...)`.
	fn creates_object(&self, tokens: &[Token], idx: usize) -> bool {
		let token = &tokens[idx];

		if token.is_keyword("new") {
			return !self.is_constraint(tokens, idx);
		}
		if is_type_atom(token) || token.is_punct(">") || token.is_punct("]") {
			return self.before_type(tokens, idx).is_some_and(|before| is_creation_keyword(&tokens[before]));
		}

		false
	}

	/// True for the `new` of a `where T : new()` constraint.
	fn is_constraint(&self, tokens: &[Token], new_idx: usize) -> bool {
		let mut idx = new_idx;

		while let Some(prev) = idx.checked_sub(1) {
			let token = &tokens[prev];

			if token.is_ident("where") {
				return true;
			}
			if token.is_punct(";")
				|| token.is_punct("{")
				|| token.is_punct("}")
				|| token.is_punct("(")
				|| token.is_punct("=")
				|| token.is_punct("=>")
				|| token.is_keyword("return")
			{
				return false;
			}

			idx = if token.is_close() { self.partner[prev].unwrap_or(prev) } else { prev };
		}

		false
	}

	fn opens_accessor_list(&self, tokens: &[Token], open: usize) -> bool {
		let names_member = open.checked_sub(1).is_some_and(|prev| {
			let before = &tokens[prev];

			before.kind == TokenKind::Identifier || before.is_punct("]") || before.is_punct(">")
		});

		if !names_member {
			return false;
		}

		let mut idx = open + 1;

		while let Some(token) = tokens.get(idx) {
			if token.is_punct("[") {
				idx = self.skip_group(idx) + 1;
			} else if token.kind == TokenKind::Keyword
				&& ACCESSOR_MODIFIERS.contains(&token.text.as_str())
			{
				idx += 1;
			} else {
				break;
			}
		}

		let Some(word) = tokens.get(idx) else {
			return false;
		};

		word.kind == TokenKind::Identifier
			&& ACCESSOR_WORDS.contains(&word.text.as_str())
			&& tokens.get(idx + 1).is_some_and(|next| {
				next.is_punct(";") || next.is_punct("{") || next.is_punct("=>")
			})
	}

	fn find_attributes(&mut self, tokens: &[Token]) {
		for (open, token) in tokens.iter().enumerate() {
			if !token.is_punct("[") {
				continue;
			}

			let Some(close) = self.partner[open] else {
				continue;
			};

			if !self.starts_attribute_section(tokens, open) {
				continue;
			}

			self.attribute_closers.insert(close);

			for idx in open + 1..close {
				let is_argument_list = tokens[idx].is_punct("(")
					&& self.enclosing[idx] == Some(open)
					&& tokens[idx - 1].kind == TokenKind::Identifier;

				if !is_argument_list {
					continue;
				}

				let Some(paren_close) = self.partner[idx] else {
					continue;
				};

				self.attribute_arguments.push(AttributeArguments {
					open: idx,
					close: paren_close,
					arguments: self.split_elements(tokens, idx, paren_close),
					layout: Layout::classify(tokens, idx, paren_close),
				});
			}
		}
	}

	fn starts_attribute_section(&self, tokens: &[Token], open: usize) -> bool {
		let Some(prev) = open.checked_sub(1) else {
			return true;
		};
		let before = &tokens[prev];

		match before.text.as_str() {
			_ if before.kind != TokenKind::Punctuation => false,
			";" | "}" => true,
			"{" => self.brace_kind(prev) != Some(BraceKind::Initializer),
			"]" => self.is_attribute_closer(prev),
			"(" | "," =>
				self.enclosing[open].is_some_and(|container| self.is_parameter_list_open(container)),
			_ => false,
		}
	}

	fn is_initializer_colon(&self, tokens: &[Token], idx: usize) -> bool {
		tokens[idx].is_punct(":")
			&& tokens
				.get(idx + 1)
				.is_some_and(|next| next.is_keyword("base") || next.is_keyword("this"))
	}

	/// True inside the header of a class, struct, interface, enum or record declaration, such as
	/// a base list wrapped onto its own line.
	fn in_type_header(&self, tokens: &[Token], idx: usize) -> bool {
		(self.statement_start(tokens, idx)..idx).any(|at| {
			let token = &tokens[at];

			(token.kind == TokenKind::Keyword
				&& matches!(token.text.as_str(), "class" | "struct" | "interface" | "enum"))
				|| (token.is_ident("record")
					&& tokens.get(at + 1).is_some_and(|next| {
						next.kind == TokenKind::Identifier
							|| next.is_keyword("struct")
							|| next.is_keyword("class")
					}))
		})
	}

	/// True when the token at `idx` ends a statement or a statement header.
	fn is_boundary(&self, tokens: &[Token], idx: usize) -> bool {
		let token = &tokens[idx];

		match token.text.as_str() {
			";" | "{" if token.kind == TokenKind::Punctuation => true,
			"}" if token.kind == TokenKind::Punctuation =>
				self.brace_kind(idx) != Some(BraceKind::Initializer),
			"]" if token.kind == TokenKind::Punctuation => self.is_attribute_closer(idx),
			")" if token.kind == TokenKind::Punctuation => self.partner[idx]
				.and_then(|open| open.checked_sub(1))
				.is_some_and(|head| {
					let head = &tokens[head];

					(head.kind == TokenKind::Keyword && CONTROL_KEYWORDS.contains(&head.text.as_str()))
						|| head.is_ident("when")
				}),
			":" if token.kind == TokenKind::Punctuation => self.is_label_colon(tokens, idx),
			"else" | "do" | "try" | "finally" => token.kind == TokenKind::Keyword,
			_ => false,
		}
	}

	fn is_label_colon(&self, tokens: &[Token], colon: usize) -> bool {
		let mut idx = colon;

		while let Some(prev) = idx.checked_sub(1) {
			let token = &tokens[prev];

			if token.is_keyword("case") || token.is_keyword("default") {
				return true;
			}
			if token.is_punct(";")
				|| token.is_punct("{")
				|| token.is_punct("}")
				|| token.is_punct("?")
				|| token.is_punct("=")
			{
				return false;
			}

			idx = if token.is_close() { self.partner[prev].unwrap_or(prev) } else { prev };
		}

		false
	}

	fn statement_start(&self, tokens: &[Token], first: usize) -> usize {
		let mut idx = first;

		while let Some(prev) = idx.checked_sub(1) {
			let token = &tokens[prev];

			if self.is_boundary(tokens, prev) || token.is_open() {
				break;
			}

			idx = if token.is_close() { self.partner[prev].unwrap_or(prev) } else { prev };
		}

		idx
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StatementContext {
	Start,
	/// Continues the statement whose first token is at this index.
	Continuation(usize),
	NotApplicable,
}

fn match_brackets(tokens: &[Token]) -> (Vec<Option<usize>>, Vec<Option<usize>>) {
	let mut partner = vec![None; tokens.len()];
	let mut enclosing = vec![None; tokens.len()];
	let mut stack: Vec<usize> = Vec::new();

	for (idx, token) in tokens.iter().enumerate() {
		if token.is_close() {
			let opener = match token.text.as_str() {
				")" => "(",
				"]" => "[",
				_ => "{",
			};

			if let Some(depth) = stack.iter().rposition(|&open| tokens[open].text == opener) {
				let open = stack[depth];

				stack.truncate(depth);

				partner[open] = Some(idx);
				partner[idx] = Some(open);
			}

			enclosing[idx] = stack.last().copied();

			continue;
		}

		enclosing[idx] = stack.last().copied();

		if token.is_open() {
			stack.push(idx);
		}
	}

	(partner, enclosing)
}

fn significant(tokens: &[Token], idx: usize) -> Option<usize> {
	tokens.get(idx).filter(|token| !token.is_eof()).map(|_| idx)
}

fn is_type_atom(token: &Token) -> bool {
	match token.kind {
		TokenKind::Identifier => !NON_DECLARATION_WORDS.contains(&token.text.as_str()),
		TokenKind::Keyword => TYPE_KEYWORDS.contains(&token.text.as_str()),
		TokenKind::Punctuation => matches!(token.text.as_str(), "." | "::" | "?" | "*"),
		_ => false,
	}
}

/// True when a member declaration may begin right after `token`.
fn opens_declaration(token: &Token) -> bool {
	match token.kind {
		TokenKind::Keyword => HEAD_KEYWORDS.contains(&token.text.as_str()),
		TokenKind::Punctuation => matches!(token.text.as_str(), ";" | "{" | "}" | "]"),
		_ => false,
	}
}

/// `(int, string)` or `(int Count, List<int> Items)` between `open` and `close`.
fn is_tuple_type(tokens: &[Token], open: usize, close: usize) -> bool {
	let inner = &tokens[open + 1..close];

	inner.iter().any(|token| token.is_punct(","))
		&& inner.iter().all(|token| {
			is_type_atom(token)
				|| (token.kind == TokenKind::Punctuation
					&& matches!(token.text.as_str(), "," | "<" | ">" | "[" | "]" | "(" | ")"))
		})
}

fn is_creation_keyword(token: &Token) -> bool {
	token.is_keyword("new") || token.is_keyword("stackalloc")
}
