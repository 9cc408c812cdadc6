//! Engagement averages and derived creator metrics.
//!
//! Everything here is pure arithmetic over fetched posts: no I/O, no
//! judgment calls. Missing counters read as zero and empty inputs yield zero
//! averages rather than errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use creatorfit_core::{EngagementMetric, Post};
use creatorfit_linkedin::parse_post_timestamp;

const COMMENTS_WEIGHT: f64 = 3.0;
const REPOSTS_WEIGHT: f64 = 2.0;
const LIKES_WEIGHT: f64 = 1.0;

/// Mean value of each engagement counter over a set of posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementAverages {
    pub avg_comments: f64,
    pub avg_empathy: f64,
    pub avg_interests: f64,
    pub avg_likes: f64,
    pub avg_praises: f64,
    pub avg_reposts: f64,
}

impl EngagementAverages {
    #[must_use]
    pub fn get(&self, metric: EngagementMetric) -> f64 {
        match metric {
            EngagementMetric::Comments => self.avg_comments,
            EngagementMetric::Empathy => self.avg_empathy,
            EngagementMetric::Interests => self.avg_interests,
            EngagementMetric::Likes => self.avg_likes,
            EngagementMetric::Praises => self.avg_praises,
            EngagementMetric::Reposts => self.avg_reposts,
        }
    }

    fn set(&mut self, metric: EngagementMetric, value: f64) {
        let slot = match metric {
            EngagementMetric::Comments => &mut self.avg_comments,
            EngagementMetric::Empathy => &mut self.avg_empathy,
            EngagementMetric::Interests => &mut self.avg_interests,
            EngagementMetric::Likes => &mut self.avg_likes,
            EngagementMetric::Praises => &mut self.avg_praises,
            EngagementMetric::Reposts => &mut self.avg_reposts,
        };
        *slot = value;
    }

    /// Sum of all six averages.
    #[must_use]
    pub fn combined(&self) -> f64 {
        EngagementMetric::ALL.iter().map(|m| self.get(*m)).sum()
    }
}

/// Averages plus the scalars derived from them.
///
/// Built only through [`AveragesRecord::from_averages`], so the derived
/// fields always agree with the averages they were computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AveragesRecord {
    #[serde(flatten)]
    pub averages: EngagementAverages,
    pub creator_authority_score: f64,
    pub combined_engagement: f64,
}

impl AveragesRecord {
    #[must_use]
    pub fn from_averages(averages: EngagementAverages) -> Self {
        Self {
            averages,
            creator_authority_score: authority_score(&averages),
            combined_engagement: averages.combined(),
        }
    }
}

/// Per-counter sums over a set of posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementTotals {
    pub num_comments: u64,
    pub num_empathy: u64,
    pub num_interests: u64,
    pub num_likes: u64,
    pub num_praises: u64,
    pub num_reposts: u64,
}

impl EngagementTotals {
    /// Adds every counter of `post`, saturating on overflow.
    pub fn add(&mut self, post: &Post) {
        for metric in EngagementMetric::ALL {
            let slot = self.slot_mut(metric);
            *slot = slot.saturating_add(post.metric(metric));
        }
    }

    #[must_use]
    pub fn get(&self, metric: EngagementMetric) -> u64 {
        match metric {
            EngagementMetric::Comments => self.num_comments,
            EngagementMetric::Empathy => self.num_empathy,
            EngagementMetric::Interests => self.num_interests,
            EngagementMetric::Likes => self.num_likes,
            EngagementMetric::Praises => self.num_praises,
            EngagementMetric::Reposts => self.num_reposts,
        }
    }

    fn slot_mut(&mut self, metric: EngagementMetric) -> &mut u64 {
        match metric {
            EngagementMetric::Comments => &mut self.num_comments,
            EngagementMetric::Empathy => &mut self.num_empathy,
            EngagementMetric::Interests => &mut self.num_interests,
            EngagementMetric::Likes => &mut self.num_likes,
            EngagementMetric::Praises => &mut self.num_praises,
            EngagementMetric::Reposts => &mut self.num_reposts,
        }
    }
}

impl<'a> FromIterator<&'a Post> for EngagementTotals {
    fn from_iter<I: IntoIterator<Item = &'a Post>>(iter: I) -> Self {
        let mut totals = Self::default();
        for post in iter {
            totals.add(post);
        }
        totals
    }
}

/// Arithmetic mean of `metric` over `posts`; `0.0` for an empty slice.
#[must_use]
pub fn average(posts: &[Post], metric: EngagementMetric) -> f64 {
    let total: u64 = posts
        .iter()
        .fold(0_u64, |acc, post| acc.saturating_add(post.metric(metric)));
    mean(total, posts.len())
}

/// One average per metric over every post.
#[must_use]
pub fn base_averages(posts: &[Post]) -> EngagementAverages {
    let mut averages = EngagementAverages::default();
    for metric in EngagementMetric::ALL {
        averages.set(metric, average(posts, metric));
    }
    averages
}

/// Weighted authority: comments ×3, reposts ×2, likes ×1.
#[must_use]
pub fn authority_score(averages: &EngagementAverages) -> f64 {
    averages.avg_comments * COMMENTS_WEIGHT
        + averages.avg_reposts * REPOSTS_WEIGHT
        + averages.avg_likes * LIKES_WEIGHT
}

/// Averages from accumulated totals; all zero when `count == 0`.
#[must_use]
pub fn averages_from_totals(totals: &EngagementTotals, count: usize) -> EngagementAverages {
    let mut averages = EngagementAverages::default();
    for metric in EngagementMetric::ALL {
        averages.set(metric, mean(totals.get(metric), count));
    }
    averages
}

/// Whole days between the newest and oldest post. Posts without any
/// timestamp are skipped; returns 0 when fewer than two timestamps exist.
#[must_use]
pub fn activity_period_days(posts: &[Post], now: DateTime<Utc>) -> u64 {
    let mut stamps = posts.iter().filter_map(|p| parse_post_timestamp(p, now));
    let Some(first) = stamps.next() else {
        return 0;
    };
    let (oldest, newest) = stamps.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
    u64::try_from((newest - oldest).num_days()).unwrap_or(0)
}

/// Posts per day over the activity period; 0 when `days == 0`.
#[must_use]
pub fn post_frequency(count: usize, days: u64) -> f64 {
    if days == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let (count, days) = (count as f64, days as f64);
    count / days
}

fn mean(total: u64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let (total, count) = (total as f64, count as f64);
    total / count
}
