//! Post timestamp parsing.
//!
//! LinkedIn reports post age as a short relative string (`"5h"`, `"3d"`,
//! `"2w"`). Unrecognized strings resolve to "now" rather than failing, so a
//! post with an odd age label still counts toward the activity window.

use std::sync::LazyLock;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use regex::Regex;

use creatorfit_core::Post;

static RELATIVE_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)([hdw])").expect("relative time pattern is valid"));

const POSTED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Resolve a relative age such as `"3d"` against `now`.
///
/// Leading digits followed by `h`, `d` or `w` subtract that many hours, days
/// or weeks. Anything else, including counts too large to represent,
/// returns `now`.
#[must_use]
pub fn parse_relative_time(time_str: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    let Some(caps) = RELATIVE_TIME.captures(time_str.trim()) else {
        return now;
    };
    let Ok(value) = caps[1].parse::<i64>() else {
        return now;
    };

    let offset = match &caps[2] {
        "h" => Duration::try_hours(value),
        "d" => Duration::try_days(value),
        "w" => Duration::try_weeks(value),
        _ => None,
    };

    offset
        .and_then(|delta| now.checked_sub_signed(delta))
        .unwrap_or(now)
}

/// Best-effort timestamp for a post.
///
/// Prefers the relative `time` label; falls back to the absolute `posted`
/// field. Returns `None` when the post carries neither.
#[must_use]
pub fn parse_post_timestamp(post: &Post, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if let Some(time) = post.time.as_deref() {
        return Some(parse_relative_time(time, now));
    }

    post.posted
        .as_deref()
        .and_then(|raw| NaiveDateTime::parse_from_str(raw.trim(), POSTED_FORMAT).ok())
        .map(|naive| naive.and_utc())
}
