use std::{
	fs,
	path::{Path, PathBuf},
	process::Command,
};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::diagnostics::Diagnostic;
use crate::{config::Config, prelude::*};

const BOM: char = '\u{feff}';
// Generated-code markers only count within the file header.
const GENERATED_HEADER_LINES: usize = 20;

static GENERATED_RE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"(?i)<auto-generated|<autogenerated|\bgenerated by a tool\b")
		.expect("Expected operation to succeed.")
});

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Violation {
	pub(crate) file: PathBuf,
	pub(crate) line: usize,
	pub(crate) column: usize,
	pub(crate) rule: &'static str,
	pub(crate) name: &'static str,
	pub(crate) message: String,
	pub(crate) args: Vec<String>,
	pub(crate) fixable: bool,
}
impl Violation {
	pub(crate) fn new(file: &Path, diagnostic: &Diagnostic, fixable: bool) -> Self {
		Self {
			file: file.to_path_buf(),
			line: diagnostic.line,
			column: diagnostic.column,
			rule: diagnostic.rule.code(),
			name: diagnostic.rule.name(),
			message: diagnostic.message(),
			args: diagnostic.args.clone(),
			fixable,
		}
	}

	pub(crate) fn format(&self) -> String {
		format!(
			"{}:{}:{}: [{}] {}{}",
			self.file.display(),
			self.line,
			self.column,
			self.rule,
			self.message,
			if self.fixable { " (fixable)" } else { "" }
		)
	}
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RunSummary {
	pub(crate) file_count: usize,
	pub(crate) violation_count: usize,
	pub(crate) unfixable_count: usize,
	pub(crate) applied_fix_count: usize,
	pub(crate) violations: Vec<Violation>,
}

/// One source file as read from disk, with any byte-order mark split off.
#[derive(Debug, Clone)]
pub(crate) struct FileContext {
	pub(crate) path: PathBuf,
	pub(crate) text: String,
	pub(crate) has_bom: bool,
}
impl FileContext {
	pub(crate) fn from_text(path: &Path, text: String) -> Self {
		match text.strip_prefix(BOM) {
			Some(stripped) =>
				Self { path: path.to_path_buf(), text: stripped.to_owned(), has_bom: true },
			None => Self { path: path.to_path_buf(), text, has_bom: false },
		}
	}

	/// File contents for `text`, restoring the byte-order mark the file was read with.
	pub(crate) fn contents(&self, text: &str) -> String {
		if self.has_bom { format!("{BOM}{text}") } else { text.to_owned() }
	}

	pub(crate) fn is_generated(&self) -> bool {
		self.text.lines().take(GENERATED_HEADER_LINES).any(|line| GENERATED_RE.is_match(line))
	}
}

pub(crate) fn resolve_files(requested_files: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
	if !requested_files.is_empty() {
		let mut files = Vec::new();

		for file in requested_files {
			if config.accepts(file) {
				files.push(file.clone());
			} else {
				tracing::debug!(file = %file.display(), "Skipping file outside the configured set.");
			}
		}

		return Ok(files);
	}

	let files = git_ls_files(config)?
		.into_iter()
		.filter(|file| config.accepts(file))
		.collect::<Vec<_>>();

	tracing::debug!(count = files.len(), "Resolved git-tracked files.");

	Ok(files)
}

pub(crate) fn read_file_context(path: &Path, config: &Config) -> Result<Option<FileContext>> {
	let text = match fs::read_to_string(path) {
		Ok(text) => text,
		Err(err) => {
			tracing::warn!(file = %path.display(), "Skipping unreadable file: {err}.");

			return Ok(None);
		},
	};
	let ctx = FileContext::from_text(path, text);

	if config.skip_generated && ctx.is_generated() {
		tracing::info!(file = %path.display(), "Skipping generated file.");

		return Ok(None);
	}

	Ok(Some(ctx))
}

fn git_ls_files(config: &Config) -> Result<Vec<PathBuf>> {
	let patterns = config.extensions.iter().map(|ext| format!("*.{ext}")).collect::<Vec<_>>();
	let output = Command::new("git")
		.arg("ls-files")
		.args(&patterns)
		.output()
		.map_err(|err| eyre::eyre!("Failed to run git ls-files: {err}."))?;

	if !output.status.success() {
		return Err(eyre::eyre!("git ls-files failed with status {}.", output.status));
	}

	let stdout = String::from_utf8(output.stdout)?;
	let mut files = Vec::new();

	for line in stdout.lines() {
		if !line.is_empty() {
			files.push(PathBuf::from(line));
		}
	}

	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::style::{diagnostics::RuleId, token::Position};

	#[test]
	fn violation_format_carries_position_and_fixability() {
		let diagnostic = Diagnostic::new(RuleId::NoTrailingWhitespace, Position::new(3, 17));
		let violation = Violation::new(Path::new("src/A.cs"), &diagnostic, true);

		assert_eq!(
			violation.format(),
			"src/A.cs:3:17: [CS-STYLE-SPACE-001] Remove trailing whitespace. (fixable)"
		);
		assert!(violation.args.is_empty());
	}

	#[test]
	fn violation_keeps_message_arguments() {
		let diagnostic =
			Diagnostic::new(RuleId::ParametersOwnLines, Position::new(4, 16)).with_arg("b");
		let violation = Violation::new(Path::new("src/A.cs"), &diagnostic, false);

		assert_eq!(violation.args, vec!["b"]);
		assert_eq!(violation.message, "Place parameter 'b' on its own line.");
	}

	#[test]
	fn byte_order_mark_is_split_off_and_restored() {
		let ctx = FileContext::from_text(Path::new("A.cs"), "\u{feff}class A {}".to_owned());

		assert!(ctx.has_bom);
		assert_eq!(ctx.text, "class A {}");
		assert_eq!(ctx.contents("class B {}"), "\u{feff}class B {}");
	}

	#[test]
	fn generated_headers_are_detected() {
		let generated = FileContext::from_text(
			Path::new("A.g.cs"),
			"// <auto-generated>\r\n//     This code was generated by a tool.\r\n// </auto-generated>\r\nclass A {}"
				.to_owned(),
		);
		let handwritten = FileContext::from_text(Path::new("A.cs"), "class A {}".to_owned());

		assert!(generated.is_generated());
		assert!(!handwritten.is_generated());
	}
}
