//! Prompt templates sent to the judgment service.

use crate::metrics::{AveragesRecord, EngagementAverages};

/// Yes/no question asking whether one post fits `label`.
pub(crate) fn classify_post(label: &str, post_text: &str) -> String {
    format!(
        "Does the content of this post fit or resonate with {label}? \
         Only answer yes or no.\n{post_text}"
    )
}

pub(crate) fn fit_score(base: &AveragesRecord, target: &AveragesRecord) -> String {
    format!(
        "Given the base averages {base} and the target averages {target}, \
         please provide a score out of 100. Judge the score based on how much \
         better or worse the target is than the base average; exactly the base \
         average should be around 50.\n\
         Your response should only be a number between 1-99",
        base = record_json(base),
        target = record_json(target),
    )
}

pub(crate) fn score_rationale(
    base: &AveragesRecord,
    target: &AveragesRecord,
    score: u8,
    narrative: &str,
) -> String {
    format!(
        "You are an expert influencer marketing analyst. Given the base averages \
         {base} and the target averages {target} and the score {score}, write one \
         sentence on why this score seems likely. Use this summary for more \
         context: {narrative}",
        base = record_json(base),
        target = record_json(target),
    )
}

pub(crate) fn compare_statistics(
    target: &AveragesRecord,
    baseline: &AveragesRecord,
    label: &str,
) -> String {
    format!(
        "Make a direct analysis. These are the averages for the posts that match \
         {label}: {target}. These are the averages for all the creator's posts: \
         {baseline}. I'm trying to determine if this creator's posts would be a \
         good fit for {label}.",
        target = record_json(target),
        baseline = record_json(baseline),
    )
}

pub(crate) fn executive_report(
    creator_name: &str,
    brand: &str,
    topic: &str,
    base: &EngagementAverages,
    follower_count: u64,
) -> String {
    let analytics = serde_json::to_string(base).unwrap_or_default();
    format!(
        "You are Harvey, an experienced marketing strategist specializing in content \
         creation and campaign planning, with a decade of experience developing \
         successful campaigns across industries.\n\
         A brand is considering sponsoring this creator's LinkedIn content; use that framing.\n\
         Your objective is to determine whether this creator would be a good fit for this \
         brand to sponsor. Use the analytics below and cite numbers to support your \
         conclusions. Think step by step. Everything you say should relate to why the \
         creator would or would not be a good fit for the brand and the topic. \
         Be direct and opinionated.\n\n\
         Creator: {creator_name}\n\
         Brand: {brand}\n\
         Topic: {topic}\n\
         Followers: {follower_count}\n\
         Average engagement per post: {analytics}\n"
    )
}

fn record_json(record: &AveragesRecord) -> String {
    serde_json::to_string(record).unwrap_or_default()
}
