//! Creator fit analysis.
//!
//! Turns a creator's fetched posts and profile into engagement averages,
//! asks the judgment service which posts fit a brand and a topic, scores the
//! matching subsets against the creator's baseline, and assembles the report
//! and dashboard charts.

pub mod classifier;
pub mod error;
pub mod metrics;
pub mod narrative;
pub mod pipeline;
pub mod report;
pub mod scorer;

mod prompts;
#[cfg(test)]
mod test_support;

pub use classifier::{matching_posts, ClassificationFailure, ClassifyOptions, TopicMatch};
pub use error::{AnalysisError, ScoreParseError};
pub use metrics::{
    activity_period_days, authority_score, average, averages_from_totals, base_averages,
    post_frequency, AveragesRecord, EngagementAverages, EngagementTotals,
};
pub use pipeline::{run_analysis, AnalysisOptions, AnalysisRequest};
pub use report::{AnalysisReport, DashboardCharts, GaugeChart};
pub use scorer::{fit_score, parse_fit_score, score_rationale, FitScore};
