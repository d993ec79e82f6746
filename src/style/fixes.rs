use super::{
	diagnostics::{Diagnostic, RuleId},
	error::{Error, Result},
	lexer,
	lines::{Line, LineModel},
	rules,
	token::{LineEnding, Position},
};

pub(crate) const MAX_FIX_PASSES: usize = 8;

type Strategy = fn(&Diagnostic, &LineModel) -> Option<Vec<Edit>>;

static STRATEGIES: [(RuleId, Strategy); 2] = [
	(RuleId::NoTrailingWhitespace, trim_trailing_whitespace),
	(RuleId::WindowsLineEnding, rewrite_line_ending),
];

/// A byte-range replacement produced for one diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Edit {
	pub(crate) start: usize,
	pub(crate) end: usize,
	pub(crate) replacement: String,
	pub(crate) rule: RuleId,
	/// Line of the diagnostic the edit resolves.
	pub(crate) line: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum FixOutcome {
	Fixed(Vec<Edit>),
	NoFixAvailable,
}

#[derive(Debug)]
pub(crate) struct FixedText {
	pub(crate) text: String,
	pub(crate) applied: usize,
}

pub(crate) fn is_fixable(rule: RuleId) -> bool {
	STRATEGIES.iter().any(|(id, _)| *id == rule)
}

/// Edits that resolve `diagnostic`, or [`FixOutcome::NoFixAvailable`] when its rule has no
/// strategy or the strategy declines this occurrence.
pub(crate) fn fix_for(diagnostic: &Diagnostic, model: &LineModel) -> FixOutcome {
	STRATEGIES
		.iter()
		.find(|(rule, _)| *rule == diagnostic.rule)
		.and_then(|(_, strategy)| strategy(diagnostic, model))
		.map_or(FixOutcome::NoFixAvailable, FixOutcome::Fixed)
}

/// Applies the non-overlapping subset of `edits` back to front and returns the edits applied.
pub(crate) fn apply_edits(text: &mut String, edits: Vec<Edit>) -> Result<Vec<Edit>> {
	let merged = merge_edits(edits);

	for edit in merged.iter().rev() {
		if edit.end > text.len()
			|| edit.start > edit.end
			|| !text.is_char_boundary(edit.start)
			|| !text.is_char_boundary(edit.end)
		{
			return Err(Error::InvalidEdit { start: edit.start, end: edit.end, len: text.len() });
		}

		text.replace_range(edit.start..edit.end, &edit.replacement);
	}

	Ok(merged)
}

/// Runs analyze/fix passes until nothing fixable remains or [`MAX_FIX_PASSES`] is reached.
pub(crate) fn fix_text(text: &str) -> Result<FixedText> {
	let mut text = text.to_owned();
	let mut model = LineModel::build(lexer::tokenize(&text))?;
	let mut applied = 0_usize;

	for pass in 1..=MAX_FIX_PASSES {
		let edits = rules::evaluate_all(&model)
			.iter()
			.filter_map(|diagnostic| match fix_for(diagnostic, &model) {
				FixOutcome::Fixed(edits) => Some(edits),
				FixOutcome::NoFixAvailable => None,
			})
			.flatten()
			.collect::<Vec<_>>();

		if edits.is_empty() {
			break;
		}

		let merged = apply_edits(&mut text, edits)?;

		applied += merged.len();
		model = LineModel::build(lexer::tokenize(&text))?;

		verify(&model, &merged)?;

		tracing::debug!(pass, edits = merged.len(), "Applied fix pass.");
	}

	Ok(FixedText { text, applied })
}

/// Orders edits by position and drops any that overlap an earlier accepted edit.
fn merge_edits(mut edits: Vec<Edit>) -> Vec<Edit> {
	edits.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)).then(a.rule.cmp(&b.rule)));

	let mut merged: Vec<Edit> = Vec::new();
	let mut last_end = 0_usize;

	for edit in edits {
		if edit.start < last_end {
			continue;
		}

		last_end = edit.end;

		merged.push(edit);
	}

	merged
}

fn verify(model: &LineModel, applied: &[Edit]) -> Result<()> {
	let remaining = rules::evaluate_all(model);

	for edit in applied {
		let still_fires = remaining
			.iter()
			.any(|diagnostic| diagnostic.rule == edit.rule && diagnostic.line == edit.line);

		if still_fires {
			return Err(Error::FixNotIdempotent { rule: edit.rule, line: edit.line });
		}
	}

	Ok(())
}

fn edit_on(line: &Line, diagnostic: &Diagnostic, range: (usize, usize), replacement: &str) -> Edit {
	Edit {
		start: line.offset + range.0,
		end: line.offset + range.1,
		replacement: replacement.to_owned(),
		rule: diagnostic.rule,
		line: line.number,
	}
}

fn trim_trailing_whitespace(diagnostic: &Diagnostic, model: &LineModel) -> Option<Vec<Edit>> {
	let line = model.line(diagnostic.line)?;
	let kept = line.text.trim_end_matches([' ', '\t']).len();

	if kept == line.text.len() || diagnostic.column != line.trimmed_len() + 1 {
		return None;
	}

	Some(vec![edit_on(line, diagnostic, (kept, line.text.len()), "")])
}

fn rewrite_line_ending(diagnostic: &Diagnostic, model: &LineModel) -> Option<Vec<Edit>> {
	let line = model.line(diagnostic.line)?;
	let ending = line.ending.filter(|ending| *ending != LineEnding::CrLf)?;

	if line.ends_in_literal || model.in_literal(Position::new(line.number, line.char_len() + 1)) {
		return None;
	}

	let start = line.text.len();

	Some(vec![edit_on(
		line,
		diagnostic,
		(start, start + ending.as_str().len()),
		LineEnding::CrLf.as_str(),
	)])
}
