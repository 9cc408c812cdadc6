//! Topic classification of posts by the judgment service.
//!
//! Each post gets one independent yes/no question. Calls fan out over a
//! bounded pool and fan back in before any totals are touched, so the
//! accumulator has a single writer.

use std::time::Duration;

use futures::{stream, StreamExt};
use serde::{Deserialize, Serialize};

use creatorfit_core::Post;
use creatorfit_judge::{CompletionRequest, Judge, JudgeError};

use crate::metrics::{averages_from_totals, AveragesRecord, EngagementTotals};
use crate::prompts;

/// Settings for one classification batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifyOptions {
    pub model: String,
    /// Upper bound on in-flight judge calls. Values below 1 are treated as 1.
    pub max_concurrency: usize,
    /// Deadline for each individual judge call, including any retries the
    /// judge makes internally.
    pub timeout: Duration,
}

/// A post whose classification call failed or timed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationFailure {
    /// Position of the post in the fetched list.
    pub index: usize,
    pub error: String,
}

/// Classifier result for one label.
///
/// Every input post lands in exactly one of `posts`, `dropped` or
/// `failures`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicMatch {
    pub label: String,
    /// Kept posts, in input order.
    pub posts: Vec<Post>,
    pub dropped: usize,
    pub failures: Vec<ClassificationFailure>,
    pub totals: EngagementTotals,
    pub record: AveragesRecord,
}

impl TopicMatch {
    #[must_use]
    pub fn matched(&self) -> usize {
        self.posts.len()
    }
}

/// `true` when a judge reply counts as a match.
#[must_use]
pub fn is_affirmative(reply: &str) -> bool {
    reply.trim().to_lowercase().contains("yes")
}

/// Classifies every post against `label` and aggregates the kept subset.
///
/// Per-post failures never abort the batch; they are logged and returned
/// in [`TopicMatch::failures`].
pub async fn matching_posts<J: Judge>(
    judge: &J,
    posts: &[Post],
    label: &str,
    options: &ClassifyOptions,
) -> TopicMatch {
    let mut verdicts = stream::iter(0..posts.len())
        .map(|index| async move {
            (index, classify_one(judge, &posts[index], label, options).await)
        })
        .buffer_unordered(options.max_concurrency.max(1))
        .collect::<Vec<_>>()
        .await;
    verdicts.sort_unstable_by_key(|(index, _)| *index);

    let mut kept = Vec::new();
    let mut dropped = 0_usize;
    let mut failures = Vec::new();
    let mut totals = EngagementTotals::default();

    for (index, verdict) in verdicts {
        match verdict {
            Ok(true) => {
                let post = &posts[index];
                totals.add(post);
                kept.push(post.clone());
            }
            Ok(false) => dropped += 1,
            Err(e) => {
                tracing::warn!(label, index, error = %e, "post classification failed; excluded");
                failures.push(ClassificationFailure {
                    index,
                    error: e.to_string(),
                });
            }
        }
    }

    let record = AveragesRecord::from_averages(averages_from_totals(&totals, kept.len()));

    tracing::info!(
        label,
        total = posts.len(),
        matched = kept.len(),
        dropped,
        failed = failures.len(),
        "classification complete"
    );

    TopicMatch {
        label: label.to_owned(),
        posts: kept,
        dropped,
        failures,
        totals,
        record,
    }
}

async fn classify_one<J: Judge>(
    judge: &J,
    post: &Post,
    label: &str,
    options: &ClassifyOptions,
) -> Result<bool, JudgeError> {
    let request = CompletionRequest::new(
        &options.model,
        prompts::classify_post(label, &post.text),
    );
    let reply = tokio::time::timeout(options.timeout, judge.complete(request))
        .await
        .map_err(|_| JudgeError::Timeout {
            secs: options.timeout.as_secs(),
        })??;
    Ok(is_affirmative(&reply))
}
