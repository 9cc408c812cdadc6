//! The assembled analysis report and its dashboard chart model.
//!
//! Charts are plain data; drawing them is left to whatever front end
//! consumes the report.

use serde::{Deserialize, Serialize};

use crate::classifier::ClassificationFailure;
use crate::metrics::AveragesRecord;
use crate::scorer::FitScore;

pub const BAR_CHART_TITLE: &str = "Statistical overview";
pub const TOPIC_GAUGE_TITLE: &str = "Topic Score";
pub const BRAND_GAUGE_TITLE: &str = "Brand Score";

const GAUGE_MIN: u8 = 0;
const GAUGE_MAX: u8 = 100;
const GAUGE_THRESHOLD: u8 = 90;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorSummary {
    pub linkedin_url: String,
    pub creator_name: String,
    pub follower_count: u64,
    pub post_count: usize,
    pub activity_period_days: u64,
    pub posts_per_day: f64,
}

/// Outcome for one label (brand or topic).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetAnalysis {
    pub label: String,
    pub matched_posts: usize,
    pub dropped_posts: usize,
    pub failures: Vec<ClassificationFailure>,
    pub record: AveragesRecord,
    pub comparison: String,
    pub fit: FitScore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub creator: CreatorSummary,
    pub base: AveragesRecord,
    pub brand: TargetAnalysis,
    pub topic: TargetAnalysis,
    pub executive_report: String,
    pub charts: DashboardCharts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardCharts {
    pub overview: BarChart,
    pub topic_gauge: GaugeChart,
    pub brand_gauge: GaugeChart,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub title: String,
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
}

/// One bar per category, in [`BarChart::categories`] order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandColor {
    Red,
    Yellow,
    Green,
}

impl std::fmt::Display for BandColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BandColor::Red => write!(f, "red"),
            BandColor::Yellow => write!(f, "yellow"),
            BandColor::Green => write!(f, "green"),
        }
    }
}

/// Half-open `[from, to)` except the last band, which includes `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaugeBand {
    pub from: u8,
    pub to: u8,
    pub color: BandColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaugeChart {
    pub title: String,
    pub value: u8,
    pub min: u8,
    pub max: u8,
    pub bands: Vec<GaugeBand>,
    pub threshold: u8,
}

impl GaugeChart {
    #[must_use]
    pub fn new(title: &str, value: u8) -> Self {
        Self {
            title: title.to_owned(),
            value,
            min: GAUGE_MIN,
            max: GAUGE_MAX,
            bands: vec![
                GaugeBand {
                    from: 0,
                    to: 33,
                    color: BandColor::Red,
                },
                GaugeBand {
                    from: 33,
                    to: 66,
                    color: BandColor::Yellow,
                },
                GaugeBand {
                    from: 66,
                    to: 100,
                    color: BandColor::Green,
                },
            ],
            threshold: GAUGE_THRESHOLD,
        }
    }

    /// Color band the gauge value falls in.
    #[must_use]
    pub fn band(&self) -> Option<BandColor> {
        let last = self.bands.len().saturating_sub(1);
        self.bands
            .iter()
            .enumerate()
            .find(|(i, b)| {
                self.value >= b.from && (self.value < b.to || (*i == last && self.value == b.to))
            })
            .map(|(_, b)| b.color)
    }

    #[must_use]
    pub fn meets_threshold(&self) -> bool {
        self.value >= self.threshold
    }
}

/// Builds the overview bar chart and both gauges.
#[must_use]
pub fn dashboard_charts(
    topic: &AveragesRecord,
    brand: &AveragesRecord,
    base: &AveragesRecord,
    topic_score: u8,
    brand_score: u8,
) -> DashboardCharts {
    let categories = ["Combined Engagement", "Comments", "Reposts", "Creator Authority Score"]
        .into_iter()
        .map(str::to_owned)
        .collect();

    let series = [
        ("Topic averages", topic),
        ("Brand averages", brand),
        ("Base averages", base),
    ]
    .into_iter()
    .map(|(name, record)| BarSeries {
        name: name.to_owned(),
        values: vec![
            record.combined_engagement,
            record.averages.avg_comments,
            record.averages.avg_reposts,
            record.creator_authority_score,
        ],
    })
    .collect();

    DashboardCharts {
        overview: BarChart {
            title: BAR_CHART_TITLE.to_owned(),
            categories,
            series,
        },
        topic_gauge: GaugeChart::new(TOPIC_GAUGE_TITLE, topic_score),
        brand_gauge: GaugeChart::new(BRAND_GAUGE_TITLE, brand_score),
    }
}
