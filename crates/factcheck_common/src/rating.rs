//! Score to rating bucket mapping.

use crate::interpret::{SCORE_MAX, SCORE_MIN};
use serde::Serialize;

/// One of the six display buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RatingBucket {
    NotRated,
    HighlyFactual,
    LikelyFactual,
    PartiallyFactual,
    LikelyFalse,
    HighlyInaccurate,
}

impl RatingBucket {
    pub fn label(&self) -> &'static str {
        match self {
            RatingBucket::NotRated => "Not Rated",
            RatingBucket::HighlyFactual => "Highly Factual",
            RatingBucket::LikelyFactual => "Likely Factual",
            RatingBucket::PartiallyFactual => "Partially Factual",
            RatingBucket::LikelyFalse => "Likely False",
            RatingBucket::HighlyInaccurate => "Highly Inaccurate",
        }
    }

    /// Hex color token for the badge
    pub fn color(&self) -> &'static str {
        match self {
            RatingBucket::NotRated => "#A9A9A9",
            RatingBucket::HighlyFactual => "#28a745",
            RatingBucket::LikelyFactual => "#ffc107",
            RatingBucket::PartiallyFactual => "#fd7e14",
            RatingBucket::LikelyFalse => "#dc3545",
            RatingBucket::HighlyInaccurate => "#a83232",
        }
    }

    /// Color token as an (r, g, b) triple
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = &self.color()[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }
}

/// Label and color for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rating {
    pub bucket: RatingBucket,
    pub label: &'static str,
    pub color: &'static str,
}

/// Map a score to its bucket. Out-of-range scores are clamped first;
/// bucket boundaries belong to the higher bucket.
pub fn bucket_for(score: Option<i64>) -> RatingBucket {
    let Some(score) = score else {
        return RatingBucket::NotRated;
    };
    match score.clamp(SCORE_MIN, SCORE_MAX) {
        80..=100 => RatingBucket::HighlyFactual,
        60..=79 => RatingBucket::LikelyFactual,
        40..=59 => RatingBucket::PartiallyFactual,
        20..=39 => RatingBucket::LikelyFalse,
        _ => RatingBucket::HighlyInaccurate,
    }
}

pub fn rate(score: Option<i64>) -> Rating {
    let bucket = bucket_for(score);
    Rating {
        bucket,
        label: bucket.label(),
        color: bucket.color(),
    }
}
