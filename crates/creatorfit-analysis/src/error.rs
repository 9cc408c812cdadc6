use thiserror::Error;

use creatorfit_judge::JudgeError;
use creatorfit_linkedin::FetchError;

/// A judge reply that is not a usable fit score.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unusable fit score reply {reply:?}: {reason}")]
pub struct ScoreParseError {
    pub reply: String,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid analysis request: {0}")]
    InvalidRequest(String),

    #[error("creator data fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("judgment service failed: {0}")]
    Judge(#[from] JudgeError),

    #[error(transparent)]
    ScoreParse(#[from] ScoreParseError),
}
