//! `analyze` command handler.

use chrono::Utc;

use creatorfit_analysis::{run_analysis, AnalysisOptions, AnalysisRequest};
use creatorfit_core::AppConfig;
use creatorfit_judge::JudgeClient;
use creatorfit_linkedin::LinkedinClient;

use crate::markdown::render_report;

/// Run one analysis and print the report to stdout.
///
/// # Errors
///
/// Returns an error if a client cannot be built, the analysis fails, or the
/// report cannot be serialized.
pub(crate) async fn run_analyze(
    config: &AppConfig,
    request: &AnalysisRequest,
    json: bool,
) -> anyhow::Result<()> {
    let source = LinkedinClient::from_app_config(config)?;
    let judge = JudgeClient::from_app_config(config)?;
    let options = AnalysisOptions::from_app_config(config);

    tracing::info!(
        linkedin_url = %request.linkedin_url,
        brand = %request.brand,
        topic = %request.topic,
        "starting creator analysis"
    );

    let report = run_analysis(&source, &judge, &options, request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report, Utc::now()));
    }

    let failed = report.brand.failures.len() + report.topic.failures.len();
    if failed > 0 {
        tracing::warn!(failed, "some posts could not be classified and were excluded");
    }
    Ok(())
}
