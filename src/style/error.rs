use thiserror::Error;

use super::{diagnostics::RuleId, token::Position};

pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;

/// Contract violations surfaced by the engine.
///
/// None of these are user findings: a malformed token stream is an upstream defect, and a fix
/// that does not clear its own diagnostic is a defect of that fix strategy.
#[derive(Debug, Error)]
pub(crate) enum Error {
	#[error("Invalid token stream at {position}: {reason}.")]
	InvalidTokenStream { position: Position, reason: String },
	#[error("Fix for {rule} at line {line} is not idempotent; the rule still fires after the edit.")]
	FixNotIdempotent { rule: RuleId, line: usize },
	#[error("Invalid edit range {start}..{end} for text length {len}.")]
	InvalidEdit { start: usize, end: usize, len: usize },
}
impl Error {
	pub(crate) fn invalid_stream(position: Position, reason: impl Into<String>) -> Self {
		Self::InvalidTokenStream { position, reason: reason.into() }
	}
}
