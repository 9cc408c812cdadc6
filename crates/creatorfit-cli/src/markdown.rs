//! Markdown rendering of an analysis report.

use chrono::{DateTime, Utc};

use creatorfit_analysis::report::{BarChart, GaugeChart, TargetAnalysis};
use creatorfit_analysis::{AnalysisReport, AveragesRecord};
use creatorfit_core::EngagementMetric;

pub(crate) fn render_report(report: &AnalysisReport, generated_at: DateTime<Utc>) -> String {
    let creator = &report.creator;
    let mut lines = vec![
        format!("# Creator Fit Report: {}", creator.creator_name),
        String::new(),
        format!("**Generated**: {}", generated_at.format("%Y-%m-%d %H:%M UTC")),
        format!("**Profile**: {}", creator.linkedin_url),
        format!("**Followers**: {}", creator.follower_count),
        format!(
            "**Posts analyzed**: {} over {} days ({:.2} posts/day)",
            creator.post_count, creator.activity_period_days, creator.posts_per_day
        ),
        String::new(),
        "---".to_owned(),
        String::new(),
    ];

    lines.extend(analysis_section("Brand Analysis Results", &report.brand));
    lines.extend(analysis_section("Topic Analysis Results", &report.topic));
    lines.extend(gauge_section(&report.charts.topic_gauge, &report.topic));
    lines.extend(gauge_section(&report.charts.brand_gauge, &report.brand));
    lines.extend(bar_chart_section(&report.charts.overview));
    lines.extend(averages_section(report));

    lines.push("## Overall Executive Report".to_owned());
    lines.push(String::new());
    lines.push(report.executive_report.clone());
    lines.push(String::new());

    lines.join("\n")
}

fn analysis_section(heading: &str, target: &TargetAnalysis) -> Vec<String> {
    let mut lines = vec![
        format!("## {heading}: {}", target.label),
        String::new(),
        format!(
            "Matching posts: {} (not matching: {}, unclassified: {})",
            target.matched_posts,
            target.dropped_posts,
            target.failures.len()
        ),
    ];
    lines.extend(
        target
            .failures
            .iter()
            .map(|f| format!("- post #{} skipped: {}", f.index, f.error)),
    );
    lines.extend([String::new(), target.comparison.clone(), String::new()]);
    lines
}

fn gauge_section(gauge: &GaugeChart, target: &TargetAnalysis) -> Vec<String> {
    let band = gauge
        .band()
        .map_or_else(|| "out of range".to_owned(), |b| b.to_string());
    let marker = if gauge.meets_threshold() {
        format!(" (at or above {})", gauge.threshold)
    } else {
        String::new()
    };
    vec![
        format!("## {}", gauge.title),
        String::new(),
        format!("**{}/{}** ({band}){marker}", gauge.value, gauge.max),
        String::new(),
        target.fit.rationale.clone(),
        String::new(),
    ]
}

fn bar_chart_section(chart: &BarChart) -> Vec<String> {
    let mut header = String::from("| Series |");
    let mut rule = String::from("|--------|");
    for category in &chart.categories {
        header.push_str(&format!(" {category} |"));
        rule.push_str("------|");
    }

    let mut lines = vec![format!("## {}", chart.title), String::new(), header, rule];
    for series in &chart.series {
        let cells: Vec<String> = series.values.iter().map(|v| format!("{v:.2}")).collect();
        lines.push(format!("| {} | {} |", series.name, cells.join(" | ")));
    }
    lines.push(String::new());
    lines
}

fn averages_section(report: &AnalysisReport) -> Vec<String> {
    let records: [&AveragesRecord; 3] = [&report.brand.record, &report.topic.record, &report.base];
    let row = |name: &str, value: fn(&AveragesRecord) -> f64| {
        let cells: Vec<String> = records.iter().map(|r| format!("{:.2}", value(r))).collect();
        format!("| {name} | {} |", cells.join(" | "))
    };

    let mut lines = vec![
        "## Average Statistics".to_owned(),
        String::new(),
        "| Metric | Brand | Topic | Base |".to_owned(),
        "|--------|-------|-------|------|".to_owned(),
    ];
    for metric in EngagementMetric::ALL {
        let cells: Vec<String> = records
            .iter()
            .map(|r| format!("{:.2}", r.averages.get(metric)))
            .collect();
        lines.push(format!("| {} | {} |", metric.average_key(), cells.join(" | ")));
    }
    lines.push(row("creator_authority_score", |r| r.creator_authority_score));
    lines.push(row("combined_engagement", |r| r.combined_engagement));
    lines.push(String::new());
    lines
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use creatorfit_analysis::report::{dashboard_charts, CreatorSummary};
    use creatorfit_analysis::{ClassificationFailure, EngagementAverages, FitScore};

    use super::*;

    fn target(label: &str, likes: f64, score: u8) -> TargetAnalysis {
        TargetAnalysis {
            label: label.to_owned(),
            matched_posts: 2,
            dropped_posts: 1,
            failures: Vec::new(),
            record: AveragesRecord::from_averages(EngagementAverages {
                avg_likes: likes,
                ..EngagementAverages::default()
            }),
            comparison: format!("{label} posts outperform."),
            fit: FitScore {
                score,
                rationale: format!("{label} rationale."),
            },
        }
    }

    fn report() -> AnalysisReport {
        let brand = target("Acme", 30.0, 91);
        let topic = target("observability", 12.5, 40);
        let base = AveragesRecord::from_averages(EngagementAverages {
            avg_likes: 10.0,
            ..EngagementAverages::default()
        });
        let charts = dashboard_charts(&topic.record, &brand.record, &base, 40, 91);
        AnalysisReport {
            creator: CreatorSummary {
                linkedin_url: "https://www.linkedin.com/in/jane/".to_owned(),
                creator_name: "Jane".to_owned(),
                follower_count: 1200,
                post_count: 3,
                activity_period_days: 6,
                posts_per_day: 0.5,
            },
            base,
            brand,
            topic,
            executive_report: "Sponsor Jane.".to_owned(),
            charts,
        }
    }

    fn render(report: &AnalysisReport) -> String {
        render_report(report, Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap())
    }

    #[test]
    fn header_summarises_creator() {
        let text = render(&report());
        assert!(text.starts_with("# Creator Fit Report: Jane\n"));
        assert!(text.contains("**Generated**: 2024-06-15 12:00 UTC"));
        assert!(text.contains("**Posts analyzed**: 3 over 6 days (0.50 posts/day)"));
    }

    #[test]
    fn gauges_show_value_band_and_threshold() {
        let text = render(&report());
        assert!(text.contains("## Brand Score\n\n**91/100** (green) (at or above 90)"));
        assert!(text.contains("## Topic Score\n\n**40/100** (yellow)\n"));
        assert!(text.contains("Acme rationale."));
    }

    #[test]
    fn tables_list_every_series_and_metric() {
        let text = render(&report());
        assert!(text.contains(
            "| Series | Combined Engagement | Comments | Reposts | Creator Authority Score |"
        ));
        assert!(text.contains("| Brand averages | 30.00 | 0.00 | 0.00 | 30.00 |"));
        assert!(text.contains("| avg_likes | 30.00 | 12.50 | 10.00 |"));
        assert!(text.contains("| creator_authority_score | 30.00 | 12.50 | 10.00 |"));
        assert!(text.trim_end().ends_with("Sponsor Jane."));
    }

    #[test]
    fn classification_failures_are_listed() {
        let mut report = report();
        report.topic.failures.push(ClassificationFailure {
            index: 4,
            error: "judge call timed out after 30s".to_owned(),
        });
        let text = render(&report);
        assert!(text.contains("unclassified: 1"));
        assert!(text.contains("- post #4 skipped: judge call timed out after 30s"));
    }
}
