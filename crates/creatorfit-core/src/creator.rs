use serde::{Deserialize, Serialize};

/// One of the six engagement counters attached to a LinkedIn post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementMetric {
    Comments,
    Empathy,
    Interests,
    Likes,
    Praises,
    Reposts,
}

impl EngagementMetric {
    pub const ALL: [EngagementMetric; 6] = [
        EngagementMetric::Comments,
        EngagementMetric::Empathy,
        EngagementMetric::Interests,
        EngagementMetric::Likes,
        EngagementMetric::Praises,
        EngagementMetric::Reposts,
    ];

    /// Field name in the posts payload, e.g. `"num_comments"`.
    #[must_use]
    pub fn field_name(self) -> &'static str {
        match self {
            EngagementMetric::Comments => "num_comments",
            EngagementMetric::Empathy => "num_empathy",
            EngagementMetric::Interests => "num_interests",
            EngagementMetric::Likes => "num_likes",
            EngagementMetric::Praises => "num_praises",
            EngagementMetric::Reposts => "num_reposts",
        }
    }

    /// Key used for the metric's mean in an averages record, e.g. `"avg_comments"`.
    #[must_use]
    pub fn average_key(self) -> &'static str {
        match self {
            EngagementMetric::Comments => "avg_comments",
            EngagementMetric::Empathy => "avg_empathy",
            EngagementMetric::Interests => "avg_interests",
            EngagementMetric::Likes => "avg_likes",
            EngagementMetric::Praises => "avg_praises",
            EngagementMetric::Reposts => "avg_reposts",
        }
    }
}

impl std::fmt::Display for EngagementMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngagementMetric::Comments => write!(f, "comments"),
            EngagementMetric::Empathy => write!(f, "empathy"),
            EngagementMetric::Interests => write!(f, "interests"),
            EngagementMetric::Likes => write!(f, "likes"),
            EngagementMetric::Praises => write!(f, "praises"),
            EngagementMetric::Reposts => write!(f, "reposts"),
        }
    }
}

/// A post as returned by the profile-posts endpoint.
///
/// Counters are optional in the payload; a missing or `null` counter reads
/// as zero through [`Post::metric`]. Fields the analysis does not use are
/// ignored during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub text: String,
    /// Relative age as shown on LinkedIn, e.g. `"3d"`, `"2w"`, `"5h"`.
    #[serde(default)]
    pub time: Option<String>,
    /// Absolute timestamp, `"%Y-%m-%d %H:%M:%S"`, when the API provides one.
    #[serde(default)]
    pub posted: Option<String>,
    #[serde(default)]
    pub num_comments: Option<u64>,
    #[serde(default)]
    pub num_empathy: Option<u64>,
    #[serde(default)]
    pub num_interests: Option<u64>,
    #[serde(default)]
    pub num_likes: Option<u64>,
    #[serde(default)]
    pub num_praises: Option<u64>,
    #[serde(default)]
    pub num_reposts: Option<u64>,
}

impl Post {
    /// Counter value for `metric`, treating an absent counter as `0`.
    #[must_use]
    pub fn metric(&self, metric: EngagementMetric) -> u64 {
        let value = match metric {
            EngagementMetric::Comments => self.num_comments,
            EngagementMetric::Empathy => self.num_empathy,
            EngagementMetric::Interests => self.num_interests,
            EngagementMetric::Likes => self.num_likes,
            EngagementMetric::Praises => self.num_praises,
            EngagementMetric::Reposts => self.num_reposts,
        };
        value.unwrap_or(0)
    }
}

/// Creator profile as returned by the profile endpoint's `data` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub followers_count: Option<u64>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub profile_url: Option<String>,
    #[serde(default)]
    pub public_id: Option<String>,
}

impl Profile {
    #[must_use]
    pub fn followers(&self) -> u64 {
        self.followers_count.unwrap_or(0)
    }
}
