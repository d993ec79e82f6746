use super::Rule;
use crate::style::{
	constructs::{Brace, BraceKind},
	diagnostics::{Diagnostic, RuleId},
	lines::LineModel,
};

// Tokens that may directly follow a lambda body's closing brace on its line.
const LAMBDA_CLOSE_FOLLOWERS: [&str; 6] = [")", ",", "]", ";", ".", "?."];

pub(crate) struct BracesOwnLine;
impl BracesOwnLine {
	/// Single-line accessor lists and accessor bodies, and `{}` pairs, are exempt as a whole.
	fn is_exempt_pair(model: &LineModel, brace: &Brace, close: usize) -> bool {
		let tokens = &model.tokens;
		let one_line = tokens[brace.open].start.line == tokens[close].start.line;

		one_line
			&& (matches!(brace.kind, BraceKind::AccessorList | BraceKind::AccessorBody)
				|| close == brace.open + 1)
	}

	fn is_exempt_lambda_close(model: &LineModel, brace: &Brace, close: usize) -> bool {
		let line = model.line_of(close);

		brace.kind == BraceKind::LambdaBody
			&& line.first_token() == Some(close)
			&& model.tokens.get(close + 1).is_some_and(|next| {
				LAMBDA_CLOSE_FOLLOWERS.iter().any(|text| next.is_punct(text))
			})
	}

	/// Braces inside a single-line accessor list or body are covered by that pair's exemption.
	fn inside_exempt_pair(model: &LineModel, exempt: &[(usize, usize)], idx: usize) -> bool {
		let line = model.tokens[idx].start.line;

		exempt.iter().any(|&(open, close)| {
			open <= idx && idx <= close && model.tokens[open].start.line == line
		})
	}
}
impl Rule for BracesOwnLine {
	fn id(&self) -> RuleId {
		RuleId::BracesOwnLine
	}

	fn evaluate(&self, model: &LineModel) -> Vec<Diagnostic> {
		let checked = model
			.constructs
			.braces
			.iter()
			.filter(|brace| brace.kind != BraceKind::Initializer)
			.collect::<Vec<_>>();
		let exempt = checked
			.iter()
			.filter_map(|brace| {
				brace
					.close
					.filter(|&close| Self::is_exempt_pair(model, brace, close))
					.map(|close| (brace.open, close))
			})
			.collect::<Vec<_>>();
		let mut diagnostics = Vec::new();

		for brace in checked {
			if !Self::inside_exempt_pair(model, &exempt, brace.open)
				&& model.shares_line(brace.open)
			{
				diagnostics.push(Diagnostic::new(self.id(), model.tokens[brace.open].start));
			}

			let Some(close) = brace.close else {
				continue;
			};

			if !Self::inside_exempt_pair(model, &exempt, close)
				&& model.shares_line(close)
				&& !Self::is_exempt_lambda_close(model, brace, close)
			{
				diagnostics.push(Diagnostic::new(self.id(), model.tokens[close].start));
			}
		}

		diagnostics
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::style::rules;

	fn in_method(body: &str) -> String {
		format!("class C\r\n{{\r\n\tvoid M()\r\n\t{{{body}\r\n\t}}\r\n}}")
	}

	fn in_class(body: &str) -> String {
		format!("class C\r\n{{{body}\r\n}}")
	}

	#[test]
	fn braces_sharing_lines_are_reported_at_the_brace() {
		let text = in_method("\r\n\t\t\t\tif( foo ) {\r\n\t\t\t\t} else {\r\n\t\t\t\t}");

		assert_eq!(rules::evaluate(&BracesOwnLine, &text), vec![(5, 15), (6, 5), (6, 12)]);
	}

	#[test]
	fn trailing_comment_after_brace_is_allowed() {
		let text = in_method("\r\n\t\t\t\tif( foo )\r\n\t\t\t\t{\r\n\t\t\t\t}  // end if");

		assert_eq!(rules::evaluate(&BracesOwnLine, &text), vec![]);
	}

	#[test]
	fn lambda_closing_brace_may_precede_call_punctuation() {
		for tail in ["} );", "}, bar );", "} ).ToList();"] {
			let text = in_method(&format!(
				"\r\n\t\t\t\tFoo( foo =>\r\n\t\t\t\t{{\r\n\t\t\t\t\tfoo.i = 2;\r\n\t\t\t\t{tail}"
			));

			assert_eq!(rules::evaluate(&BracesOwnLine, &text), vec![], "tail {tail}");
		}
	}

	#[test]
	fn anonymous_method_closing_brace_may_precede_call_punctuation() {
		let text = in_method(
			"\r\n\t\tFoo( delegate\r\n\t\t{\r\n\t\t} );\r\n\t\tBar( delegate( int x )\r\n\t\t{\r\n\t\t\tx++;\r\n\t\t}, 1 );",
		);

		assert_eq!(rules::evaluate(&BracesOwnLine, &text), vec![]);
	}

	#[test]
	fn two_line_property_reports_both_braces() {
		let text = in_class("\r\n\t\t\t\tpublic string Foo {\r\n\t\t\t\t\tget; set; }");

		assert_eq!(rules::evaluate(&BracesOwnLine, &text), vec![(3, 23), (4, 16)]);
	}

	#[test]
	fn single_line_properties_and_accessors_are_allowed() {
		let text = in_class(
			"\r\n\tpublic string Foo { get; set; }\r\n\tpublic string Bar { get; set; } = \"\";\r\n\tpublic string Baz\r\n\t{\r\n\t\tget { return baz; }\r\n\t\t[Obsolete] set { baz = value; }\r\n\t}",
		);

		assert_eq!(rules::evaluate(&BracesOwnLine, &text), vec![]);
	}

	#[test]
	fn empty_pairs_anonymous_blocks_and_initializers_are_allowed() {
		let text = in_method(
			"\r\n\t\t{\r\n\t\t\tint i = 0;\r\n\t\t}\r\n\t\tvar e = new Exception() { Source = \"a\" };\r\n\t\tFoo( () => {} );",
		);

		assert_eq!(rules::evaluate(&BracesOwnLine, "namespace Foo {}"), vec![]);
		assert_eq!(rules::evaluate(&BracesOwnLine, &text), vec![]);
	}
}
