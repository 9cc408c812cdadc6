//! Fit scoring: a judged 1-99 comparison of a target record to the base.
//!
//! The judge is treated as an untrusted text source. A reply must be a bare
//! integer in range; anything else is a [`ScoreParseError`]. One malformed
//! reply is retried, a second is surfaced.

use serde::{Deserialize, Serialize};

use creatorfit_judge::{CompletionRequest, Judge};

use crate::error::{AnalysisError, ScoreParseError};
use crate::metrics::AveragesRecord;
use crate::prompts;

pub const MIN_FIT_SCORE: u8 = 1;
pub const MAX_FIT_SCORE: u8 = 99;

const SCORE_MAX_TOKENS: u32 = 3;
const SCORE_ATTEMPTS: u32 = 2;

/// A judged fit score and the sentence explaining it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitScore {
    pub score: u8,
    pub rationale: String,
}

/// Parses a scoring reply: trimmed, a bare integer in `1..=99`.
///
/// # Errors
///
/// Returns [`ScoreParseError`] for non-numeric or out-of-range replies.
pub fn parse_fit_score(reply: &str) -> Result<u8, ScoreParseError> {
    let trimmed = reply.trim();
    let reject = |reason: &str| ScoreParseError {
        reply: reply.to_owned(),
        reason: reason.to_owned(),
    };

    if trimmed.is_empty() {
        return Err(reject("empty reply"));
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(reject("not a bare integer"));
    }

    let value: u32 = trimmed
        .parse()
        .map_err(|_| reject("integer too large"))?;
    u8::try_from(value)
        .ok()
        .filter(|v| (MIN_FIT_SCORE..=MAX_FIT_SCORE).contains(v))
        .ok_or_else(|| reject("outside 1-99"))
}

/// Asks the judge how `target` compares to `base`.
///
/// # Errors
///
/// - [`AnalysisError::Judge`] if the judgment call fails.
/// - [`AnalysisError::ScoreParse`] if both attempts return unusable replies.
pub async fn fit_score<J: Judge>(
    judge: &J,
    model: &str,
    base: &AveragesRecord,
    target: &AveragesRecord,
) -> Result<u8, AnalysisError> {
    let prompt = prompts::fit_score(base, target);
    let mut attempt = 1;

    loop {
        let request = CompletionRequest::new(model, prompt.clone())
            .max_tokens(SCORE_MAX_TOKENS)
            .temperature(0.0);
        let reply = judge.complete(request).await?;

        match parse_fit_score(&reply) {
            Ok(score) => return Ok(score),
            Err(e) if attempt < SCORE_ATTEMPTS => {
                tracing::warn!(attempt, error = %e, "unusable fit score reply; asking again");
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// One-sentence justification for `score`, grounded in `narrative`.
///
/// # Errors
///
/// Returns [`AnalysisError::Judge`] if the judgment call fails.
pub async fn score_rationale<J: Judge>(
    judge: &J,
    model: &str,
    base: &AveragesRecord,
    target: &AveragesRecord,
    score: u8,
    narrative: &str,
) -> Result<String, AnalysisError> {
    let prompt = prompts::score_rationale(base, target, score, narrative);
    let reply = judge.complete(CompletionRequest::new(model, prompt)).await?;
    Ok(reply.trim().to_owned())
}
