//! Analysis orchestration.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use creatorfit_core::retry::max_total_backoff_ms;
use creatorfit_core::AppConfig;
use creatorfit_judge::Judge;
use creatorfit_linkedin::CreatorSource;

use crate::classifier::{matching_posts, ClassifyOptions, TopicMatch};
use crate::error::AnalysisError;
use crate::metrics::{activity_period_days, base_averages, post_frequency, AveragesRecord};
use crate::narrative::{compare_statistics, executive_report};
use crate::report::{dashboard_charts, AnalysisReport, CreatorSummary, TargetAnalysis};
use crate::scorer::{fit_score, score_rationale, FitScore};

/// The four user inputs of one analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub linkedin_url: String,
    pub topic: String,
    pub brand: String,
    pub creator_name: String,
}

impl AnalysisRequest {
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidRequest`] naming the first blank field.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let fields = [
            ("linkedin_url", &self.linkedin_url),
            ("topic", &self.topic),
            ("brand", &self.brand),
            ("creator_name", &self.creator_name),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(AnalysisError::InvalidRequest(format!("{name} must not be blank")));
            }
        }
        Ok(())
    }
}

/// Models and limits for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub classify: ClassifyOptions,
    pub scoring_model: String,
    pub narrative_model: String,
}

impl AnalysisOptions {
    /// The classification deadline covers every attempt the judge client's
    /// retry policy can make plus the worst-case back-off between them.
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            classify: ClassifyOptions {
                model: config.classify_model.clone(),
                max_concurrency: config.classify_max_concurrency,
                timeout: classification_deadline(config),
            },
            scoring_model: config.scoring_model.clone(),
            narrative_model: config.narrative_model.clone(),
        }
    }
}

fn classification_deadline(config: &AppConfig) -> Duration {
    let attempts = u64::from(config.max_retries).saturating_add(1);
    let requests = Duration::from_secs(config.request_timeout_secs.saturating_mul(attempts));
    let backoff = max_total_backoff_ms(config.max_retries, config.retry_backoff_base_ms);
    requests.saturating_add(Duration::from_millis(backoff))
}

/// Runs a full creator fit analysis.
///
/// 1. Fetch posts, then the profile.
/// 2. Classify posts for the brand, then the topic.
/// 3. Compute base averages and the three records.
/// 4. Compare brand and topic records against the base. The topic
///    comparison uses the base averages as its baseline, never the topic
///    record itself.
/// 5. Score topic then brand, then write a rationale for each.
/// 6. Write the executive report and assemble charts.
///
/// Per-post classification failures are carried in the report. Any other
/// failure aborts the run.
///
/// # Errors
///
/// - [`AnalysisError::InvalidRequest`] for blank inputs.
/// - [`AnalysisError::Fetch`] if posts or profile cannot be fetched.
/// - [`AnalysisError::Judge`] if a non-classification judge call fails.
/// - [`AnalysisError::ScoreParse`] if a fit score stays unusable after retry.
pub async fn run_analysis<S, J>(
    source: &S,
    judge: &J,
    options: &AnalysisOptions,
    request: &AnalysisRequest,
) -> Result<AnalysisReport, AnalysisError>
where
    S: CreatorSource,
    J: Judge,
{
    request.validate()?;
    let url = request.linkedin_url.trim();

    let posts = source.fetch_posts(url).await?;
    let profile = source.fetch_profile(url).await?;
    tracing::info!(linkedin_url = url, posts = posts.len(), "creator data fetched");

    let brand_match = matching_posts(judge, &posts, &request.brand, &options.classify).await;
    let topic_match = matching_posts(judge, &posts, &request.topic, &options.classify).await;

    let base_avgs = base_averages(&posts);
    let base = AveragesRecord::from_averages(base_avgs);

    let narrative = &options.narrative_model;
    let brand_comparison =
        compare_statistics(judge, narrative, &brand_match.record, &base, &request.brand).await?;
    // Baseline is the base record for both targets.
    let topic_comparison =
        compare_statistics(judge, narrative, &topic_match.record, &base, &request.topic).await?;

    let scoring = &options.scoring_model;
    let topic_score = fit_score(judge, scoring, &base, &topic_match.record).await?;
    let brand_score = fit_score(judge, scoring, &base, &brand_match.record).await?;
    tracing::info!(topic_score, brand_score, "fit scores judged");

    let topic_rationale = score_rationale(
        judge,
        scoring,
        &base,
        &topic_match.record,
        topic_score,
        &topic_comparison,
    )
    .await?;
    let brand_rationale = score_rationale(
        judge,
        scoring,
        &base,
        &brand_match.record,
        brand_score,
        &brand_comparison,
    )
    .await?;

    let followers = profile.followers();
    let executive = executive_report(judge, narrative, request, &base_avgs, followers).await?;

    let period_days = activity_period_days(&posts, Utc::now());
    let charts = dashboard_charts(
        &topic_match.record,
        &brand_match.record,
        &base,
        topic_score,
        brand_score,
    );

    Ok(AnalysisReport {
        creator: CreatorSummary {
            linkedin_url: url.to_owned(),
            creator_name: request.creator_name.trim().to_owned(),
            follower_count: followers,
            post_count: posts.len(),
            activity_period_days: period_days,
            posts_per_day: post_frequency(posts.len(), period_days),
        },
        base,
        brand: target_analysis(brand_match, brand_comparison, brand_score, brand_rationale),
        topic: target_analysis(topic_match, topic_comparison, topic_score, topic_rationale),
        executive_report: executive,
        charts,
    })
}

fn target_analysis(
    matched: TopicMatch,
    comparison: String,
    score: u8,
    rationale: String,
) -> TargetAnalysis {
    TargetAnalysis {
        matched_posts: matched.matched(),
        dropped_posts: matched.dropped,
        label: matched.label,
        failures: matched.failures,
        record: matched.record,
        comparison,
        fit: FitScore { score, rationale },
    }
}
