//! Free-text analyses written by the judgment service.

use creatorfit_judge::{CompletionRequest, Judge};

use crate::error::AnalysisError;
use crate::metrics::{AveragesRecord, EngagementAverages};
use crate::pipeline::AnalysisRequest;
use crate::prompts;

/// Direct analysis of `target` against `baseline`, framed as fit for `label`.
///
/// # Errors
///
/// Returns [`AnalysisError::Judge`] if the judgment call fails.
pub async fn compare_statistics<J: Judge>(
    judge: &J,
    model: &str,
    target: &AveragesRecord,
    baseline: &AveragesRecord,
    label: &str,
) -> Result<String, AnalysisError> {
    let prompt = prompts::compare_statistics(target, baseline, label);
    let reply = judge.complete(CompletionRequest::new(model, prompt)).await?;
    Ok(reply.trim().to_owned())
}

/// Sponsorship recommendation for the whole request, written by a
/// marketing-strategist persona from the creator's base analytics.
///
/// # Errors
///
/// Returns [`AnalysisError::Judge`] if the judgment call fails.
pub async fn executive_report<J: Judge>(
    judge: &J,
    model: &str,
    request: &AnalysisRequest,
    base: &EngagementAverages,
    follower_count: u64,
) -> Result<String, AnalysisError> {
    let prompt = prompts::executive_report(
        &request.creator_name,
        &request.brand,
        &request.topic,
        base,
        follower_count,
    );
    let reply = judge.complete(CompletionRequest::new(model, prompt)).await?;
    Ok(reply.trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedJudge;

    #[tokio::test]
    async fn comparison_prompt_names_label() {
        let judge = ScriptedJudge::new(|_: &CompletionRequest| Ok(" Strong fit. ".to_owned()));
        let record = AveragesRecord::default();

        let text = compare_statistics(&judge, "gpt-4", &record, &record, "Acme")
            .await
            .unwrap();

        assert_eq!(text, "Strong fit.");
        let calls = judge.calls();
        assert!(calls[0].prompt.contains("good fit for Acme"));
        assert_eq!(calls[0].max_tokens, None);
    }

    #[tokio::test]
    async fn executive_report_uses_request_fields() {
        let judge = ScriptedJudge::new(|_: &CompletionRequest| Ok("Sponsor them.".to_owned()));
        let request = AnalysisRequest {
            linkedin_url: "https://www.linkedin.com/in/jane/".to_owned(),
            topic: "observability".to_owned(),
            brand: "Acme".to_owned(),
            creator_name: "Jane".to_owned(),
        };

        let text = executive_report(&judge, "gpt-4", &request, &EngagementAverages::default(), 4200)
            .await
            .unwrap();

        assert_eq!(text, "Sponsor them.");
        let prompt = &judge.calls()[0].prompt;
        assert!(prompt.contains("Creator: Jane"));
        assert!(prompt.contains("Topic: observability"));
        assert!(prompt.contains("Followers: 4200"));
    }
}
