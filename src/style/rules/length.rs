use super::Rule;
use crate::style::{
	diagnostics::{Diagnostic, RuleId},
	lines::LineModel,
	token::Position,
};

pub(crate) const TAB_WIDTH: usize = 4;
pub(crate) const MAX_LINE_WIDTH: usize = 120;
pub(crate) const WIDTH_MEASURE: WidthMeasure = WidthMeasure::Rendered;

/// How a line's width is counted against [`MAX_LINE_WIDTH`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WidthMeasure {
	/// Tabs advance to the next multiple of [`TAB_WIDTH`].
	Rendered,
	/// Every character is one column.
	Raw,
}
impl WidthMeasure {
	fn advance(self, width: usize, ch: char) -> usize {
		match (self, ch) {
			(Self::Rendered, '\t') => (width / TAB_WIDTH + 1) * TAB_WIDTH,
			_ => width + 1,
		}
	}

	/// 1-based column of the first character whose end-width exceeds the limit.
	pub(crate) fn first_overflow(self, text: &str) -> Option<usize> {
		let mut width = 0;

		for (idx, ch) in text.chars().enumerate() {
			width = self.advance(width, ch);

			if width > MAX_LINE_WIDTH {
				return Some(idx + 1);
			}
		}

		None
	}
}

pub(crate) struct LineLengthLimit;
impl Rule for LineLengthLimit {
	fn id(&self) -> RuleId {
		RuleId::LineLengthLimit
	}

	fn evaluate(&self, model: &LineModel) -> Vec<Diagnostic> {
		model
			.lines
			.iter()
			.filter_map(|line| {
				WIDTH_MEASURE.first_overflow(&line.text).map(|column| {
					Diagnostic::new(self.id(), Position::new(line.number, column))
						.with_arg(MAX_LINE_WIDTH.to_string())
				})
			})
			.collect()
	}
}
