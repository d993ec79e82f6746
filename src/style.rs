mod constructs;
mod diagnostics;
mod error;
mod fixes;
mod lexer;
mod lines;
mod rules;
mod shared;
mod token;

pub(crate) use shared::{RunSummary, Violation};

use std::{
	fs,
	path::{Path, PathBuf},
};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::{config::Config, prelude::*};
use diagnostics::{Diagnostic, RuleId};
use fixes::FixOutcome;
use lines::LineModel;
use rules::{MAX_LINE_WIDTH, TAB_WIDTH, WIDTH_MEASURE};
use shared::FileContext;
use token::Token;

const FILE_BATCH_SIZE: usize = 64;

/// Result of running every rule over one file.
#[derive(Debug)]
pub(crate) struct Analysis {
	model: LineModel,
	diagnostics: Vec<Diagnostic>,
}
impl Analysis {
	pub(crate) fn diagnostics(&self) -> &[Diagnostic] {
		&self.diagnostics
	}

	pub(crate) fn is_fixable(&self, diagnostic: &Diagnostic) -> bool {
		matches!(fixes::fix_for(diagnostic, &self.model), FixOutcome::Fixed(_))
	}
}

/// Builds the line model for one token stream and evaluates every rule over it.
pub(crate) fn analyze(tokens: Vec<Token>) -> error::Result<Analysis> {
	let model = LineModel::build(tokens)?;
	let diagnostics = rules::evaluate_all(&model);

	Ok(Analysis { model, diagnostics })
}

pub(crate) fn analyze_text(text: &str) -> error::Result<Analysis> {
	analyze(lexer::tokenize(text))
}

pub(crate) fn run_check(requested_files: &[PathBuf], config: &Config) -> Result<RunSummary> {
	let files = shared::resolve_files(requested_files, config)?;

	check_files(&files, config)
}

pub(crate) fn run_fix(requested_files: &[PathBuf], config: &Config) -> Result<RunSummary> {
	let files = shared::resolve_files(requested_files, config)?;
	let mut total_applied = 0_usize;

	for batch in files.chunks(FILE_BATCH_SIZE) {
		let batch_results = batch
			.par_iter()
			.map(|file| -> Result<usize> {
				let Some(ctx) = shared::read_file_context(file, config)? else {
					return Ok(0);
				};

				fix_file(&ctx)
			})
			.collect::<Vec<_>>();

		for result in batch_results {
			total_applied += result?;
		}
	}

	let checked = check_files(&files, config)?;

	Ok(RunSummary { applied_fix_count: total_applied, ..checked })
}

pub(crate) fn print_coverage() {
	for rule in RuleId::ALL {
		let fix = if fixes::is_fixable(rule) { "fixable" } else { "report-only" };

		println!("{}\t{}\t{fix}", rule.code(), rule.name());
	}

	println!(
		"\nLine width limit: {MAX_LINE_WIDTH} columns ({WIDTH_MEASURE:?} width, tab stop {TAB_WIDTH})."
	);
}

fn check_files(files: &[PathBuf], config: &Config) -> Result<RunSummary> {
	let mut violations: Vec<Violation> = Vec::new();

	for batch in files.chunks(FILE_BATCH_SIZE) {
		let batch_results = batch
			.par_iter()
			.map(|file| -> Result<Vec<Violation>> {
				let Some(ctx) = shared::read_file_context(file, config)? else {
					return Ok(Vec::new());
				};

				collect_violations(&ctx.path, &ctx.text)
			})
			.collect::<Vec<_>>();

		for result in batch_results {
			violations.extend(result?);
		}
	}

	// Stable, so each file keeps the emitter's (line, column) order.
	violations.sort_by(|a, b| a.file.cmp(&b.file));

	let unfixable_count = violations.iter().filter(|v| !v.fixable).count();

	Ok(RunSummary {
		file_count: files.len(),
		violation_count: violations.len(),
		unfixable_count,
		applied_fix_count: 0,
		violations,
	})
}

fn collect_violations(path: &Path, text: &str) -> Result<Vec<Violation>> {
	let analysis = analyze_text(text)?;

	tracing::debug!(
		file = %path.display(),
		diagnostics = analysis.diagnostics().len(),
		"Analyzed file."
	);

	Ok(analysis
		.diagnostics()
		.iter()
		.map(|diagnostic| Violation::new(path, diagnostic, analysis.is_fixable(diagnostic)))
		.collect())
}

fn fix_file(ctx: &FileContext) -> Result<usize> {
	let fixed = fixes::fix_text(&ctx.text)?;

	if fixed.text == ctx.text {
		return Ok(0);
	}

	fs::write(&ctx.path, ctx.contents(&fixed.text))
		.map_err(|err| eyre::eyre!("Failed to write {}: {err}.", ctx.path.display()))?;

	tracing::info!(file = %ctx.path.display(), applied = fixed.applied, "Applied fixes.");

	Ok(fixed.applied)
}

#[cfg(test)]
mod tests {
	use super::*;

	/// A snippet placed inside a wrapper class or method, mirroring how the rules see real files.
	struct Code {
		text: String,
		first_line: usize,
	}
	impl Code {
		fn in_class(code: &str) -> Self {
			Self::wrap("class Wrapper\r\n{\r\n", &code.replace('\n', "\r\n"), "\r\n}")
		}

		fn in_method(code: &str) -> Self {
			Self::in_method_verbatim(&code.replace('\n', "\r\n"))
		}

		fn in_method_verbatim(code: &str) -> Self {
			Self::wrap(
				"class Wrapper\r\n{\r\n\tvoid Method()\r\n\t{\r\n",
				code,
				"\r\n\t}\r\n}",
			)
		}

		fn wrap(head: &str, code: &str, tail: &str) -> Self {
			Self { text: format!("{head}{code}{tail}"), first_line: head.matches("\r\n").count() + 1 }
		}

		/// Diagnostics as (rule, line relative to the snippet, column).
		fn diagnose(&self) -> Vec<(RuleId, usize, usize)> {
			analyze_text(&self.text)
				.expect("analysis should succeed")
				.diagnostics()
				.iter()
				.map(|d| (d.rule, d.line - self.first_line, d.column))
				.collect()
		}
	}

	#[test]
	fn empty_source_is_clean() {
		assert!(analyze_text("").expect("analysis should succeed").diagnostics().is_empty());
	}

	#[test]
	fn space_and_mixed_indentation() {
		assert_eq!(Code::in_method("    foo();").diagnose(), vec![(RuleId::IndentWithTabs, 0, 1)]);
		assert_eq!(Code::in_method("\t    foo();").diagnose(), vec![(RuleId::IndentWithTabs, 0, 2)]);
	}

	#[test]
	fn trailing_whitespace_is_reported_and_fixed() {
		let analysis = analyze_text("namespace Foo {}  ").expect("analysis should succeed");
		let found =
			analysis.diagnostics().iter().map(|d| (d.rule, d.line, d.column)).collect::<Vec<_>>();

		assert_eq!(found, vec![(RuleId::NoTrailingWhitespace, 1, 17)]);
		assert!(analysis.is_fixable(&analysis.diagnostics()[0]));
		assert_eq!(fixes::fix_text("namespace Foo {}  ").expect("fix should succeed").text, "namespace Foo {}");
	}

	#[test]
	fn long_lines_with_spaces_and_tabs() {
		let spaces = Code::in_method(&format!("{}int foo;", " ".repeat(116)));
		let tabs = Code::in_method(&format!("{}int foo;", "\t".repeat(29)));

		assert_eq!(spaces.diagnose(), vec![
			(RuleId::IndentWithTabs, 0, 1),
			(RuleId::LineLengthLimit, 0, 121)
		]);
		assert_eq!(tabs.diagnose(), vec![(RuleId::LineLengthLimit, 0, 34)]);
	}

	#[test]
	fn continuation_with_single_indent() {
		let code = Code::in_method("\n\t\t\t\tint foo =\n\t\t\t\t\t1;");

		assert_eq!(code.diagnose(), vec![(RuleId::ContinuationIndent, 2, 6)]);
	}

	#[test]
	fn multiple_using_statements() {
		let code = Code::in_method(
			"\n\t\t\t\tusing( var x = Foo() )\n\t\t\t\tusing( var y = Bar() )\n\t\t\t\t{\n\t\t\t\t\tConsole.WriteLine( x, y );\n\t\t\t\t}",
		);

		assert_eq!(code.diagnose(), vec![]);
	}

	#[test]
	fn braces_not_alone() {
		let code = Code::in_method("\n\t\t\t\tif( foo ) {\n\t\t\t\t} else {\n\t\t\t\t}");

		assert_eq!(code.diagnose(), vec![
			(RuleId::BracesOwnLine, 1, 15),
			(RuleId::BracesOwnLine, 2, 5),
			(RuleId::BracesOwnLine, 2, 12),
		]);
	}

	#[test]
	fn brace_exceptions_are_clean() {
		for code in [
			"\n\t\t\t\tif( foo )\n\t\t\t\t{\n\t\t\t\t}  // end if",
			"\n\t\t\t\tFoo( foo =>\n\t\t\t\t{\n\t\t\t\t\tfoo.i = 2;\n\t\t\t\t} );",
			"\n\t\t\t\tFoo( foo =>\n\t\t\t\t{\n\t\t\t\t\tfoo.i = 2;\n\t\t\t\t}, bar );",
			"\n\t\t\t\tFoo( foo =>\n\t\t\t\t{\n\t\t\t\t\tfoo.i = 2;\n\t\t\t\t} ).ToList();",
			"\n\t\t\t\t{\n\t\t\t\t\tint i = 0;\n\t\t\t\t}",
		] {
			assert_eq!(Code::in_method(code).diagnose(), vec![], "{code:?}");
		}
	}

	#[test]
	fn property_layouts() {
		let two_line = Code::in_class("\n\t\t\t\tpublic string Foo {\n\t\t\t\t\tget; set; }");

		assert_eq!(two_line.diagnose(), vec![
			(RuleId::BracesOwnLine, 1, 23),
			(RuleId::BracesOwnLine, 2, 16)
		]);

		for code in [
			"public string Foo { get; set; }",
			"\n\t\t\t\tpublic string Foo\n\t\t\t\t{\n\t\t\t\t\tget { return foo; }\n\t\t\t\t\tset { foo = value; }\n\t\t\t\t}\n\n\t\t\t\tpublic string Bar { get; set; }",
			"\n\t\t\t\t[Attribute]\n\t\t\t\tpublic string Foo\n\t\t\t\t{\n\t\t\t\t\tget { return foo; }\n\t\t\t\t\tset { foo = value; }\n\t\t\t\t}\n\n\t\t\t\t[Attribute]\n\t\t\t\tpublic string Bar { get; set; }",
			"public string Foo { get; set; } = \"\";",
		] {
			assert_eq!(Code::in_class(code).diagnose(), vec![], "{code:?}");
		}
	}

	#[test]
	fn inline_parameter_lists_are_exempt() {
		let code = Code::in_class("\n\t\t\t\tpublic string Foo( string a, string b )\n\t\t\t\t{\n\t\t\t\t}");

		assert_eq!(code.diagnose(), vec![]);
	}

	#[test]
	fn wrapped_parameter_lists() {
		let own_lines = Code::in_class(
			"\n\t\t\t\tpublic string Foo(\n\t\t\t\t\tstring a,\n\t\t\t\t\tstring b\n\t\t\t\t)\n\t\t\t\t{\n\t\t\t\t}",
		);
		let shared_paren = Code::in_class(
			"\n\t\t\t\tpublic string Foo(\n\t\t\t\t\tstring a,\n\t\t\t\t\tstring b )\n\t\t\t\t{\n\t\t\t\t}",
		);

		assert_eq!(own_lines.diagnose(), vec![]);
		assert_eq!(shared_paren.diagnose(), vec![(RuleId::ClosingParameterParenOwnLine, 3, 15)]);
	}

	#[test]
	fn multiplied_call_results_are_argument_lists() {
		let code = Code::in_method("\t\tvar x = a * Foo(\n\t\t\t\tb, c\n\t\t);");

		assert_eq!(code.diagnose(), vec![]);
	}

	#[test]
	fn base_list_on_its_own_line() {
		let analysis = analyze_text("class A\r\n\t: B\r\n{\r\n}").expect("analysis should succeed");

		assert!(analysis.diagnostics().is_empty());
	}

	#[test]
	fn char_escape_at_line_end_does_not_abort_analysis() {
		let text = "class C\r\n{\r\n\tchar c = '\\\r\n\tint d;\r\n}";

		assert!(analyze_text(text).is_ok());
		assert_eq!(fixes::fix_text(text).expect("fix should succeed").text, text);
	}

	#[test]
	fn unix_newlines() {
		let code = Code::in_method_verbatim("int a = 0;\nint b = 0;");

		assert_eq!(code.diagnose(), vec![(RuleId::WindowsLineEnding, 0, 11)]);
	}

	#[test]
	fn base_constructor_calls() {
		let other_line =
			Code::in_class("\n\t\t\t\tpublic Test(\n\t\t\t\t\tint i\n\t\t\t\t)\n\t\t\t\t\t: base( i )\n\t\t\t\t{\n\n\t\t\t\t}");

		assert_eq!(other_line.diagnose(), vec![(RuleId::BaseConstructorCallSameLine, 4, 6)]);

		for code in [
			"\n\t\t\t\tpublic Test(\n\t\t\t\t\tint i\n\t\t\t\t) : base( i )\n\t\t\t\t{\n\n\t\t\t\t}",
			"\n\t\t\t\tpublic Test( int i )\n\t\t\t\t\t: base( i )\n\t\t\t\t{\n\n\t\t\t\t}",
		] {
			assert_eq!(Code::in_class(code).diagnose(), vec![], "{code:?}");
		}
	}

	#[test]
	fn attribute_argument_lists() {
		let ctor = "\n\t\t\t\tpublic Test( int i )\n\t\t\t\t{\n\n\t\t\t\t}";
		let later = Code::in_class(&format!(
			"\n\t\t\t\t[PrincipalPermission( Role = \"Administrators\",\n\t\t\t\t\tAction = SecurityAction.Demand, Name = \"Something\" )]{ctor}"
		));
		let crowded = Code::in_class(&format!(
			"\n\t\t\t\t[PrincipalPermission( Role = \"Administrators\", Action = SecurityAction.Demand,\n\t\t\t\t\tName = \"Something\" )]{ctor}"
		));

		assert_eq!(later.diagnose(), vec![(RuleId::AttributesOwnLines, 2, 38)]);
		assert_eq!(crowded.diagnose(), vec![(RuleId::AttributesOwnLines, 2, 6)]);

		for attribute in [
			"\n\t\t\t\t[Obsolete( Message = \"This constructor is obsolete.\", IsError = true )]",
			"\n\t\t\t\t[Obsolete(\n\t\t\t\t\tMessage = \"This constructor is obsolete.\",\n\t\t\t\t\tIsError = true )]",
			"\n\t\t\t\t[Obsolete( Message = \"This constructor is obsolete.\",\n\t\t\t\t\tIsError = true )]",
		] {
			assert_eq!(Code::in_class(&format!("{attribute}{ctor}")).diagnose(), vec![], "{attribute:?}");
		}
	}

	#[test]
	fn initializer_braces() {
		let shared_close = Code::in_method(
			"\n\t\t\t\tvar ex = new Exception() {\n\t\t\t\t\t\tSource = \"Test\", HelpLink = \"Test\" }",
		);

		assert_eq!(shared_close.diagnose(), vec![(RuleId::InitializerListOwnLines, 2, 42)]);

		for code in [
			"\n\t\t\t\tvar ex = new Exception()\n\t\t\t\t{\n\t\t\t\t\tSource = \"Test\",\n\t\t\t\t\tHelpLink = \"Test\"\n\t\t\t\t}",
			"\n\t\t\t\tvar ex = new Exception() { Source = \"Test\", HelpLink = \"Test\" }",
		] {
			assert_eq!(Code::in_method(code).diagnose(), vec![], "{code:?}");
		}
	}

	#[test]
	fn analysis_is_deterministic() {
		let code = Code::in_method("\n\t\t\t\tif( foo ) {  \n\t\t\t\t\tint a =\n\t\t\t\t\t\t1;\n    }");
		let first = code.diagnose();

		assert!(!first.is_empty());
		assert_eq!(code.diagnose(), first);
	}

	#[test]
	fn invalid_token_streams_are_rejected() {
		let mut tokens = lexer::tokenize("int a;\r\nint b;");

		tokens.swap(1, 2);

		assert!(matches!(analyze(tokens), Err(error::Error::InvalidTokenStream { .. })));
	}
}
