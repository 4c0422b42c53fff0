use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::normalize::{Entity, Schema};

/// Reader ratings of a work.
///
/// The service nests the aggregate figures under `summary` and the histogram
/// under `counts`; both are flattened here. Serde reads and writes that
/// nested service shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RatingsBody", into = "RatingsBody")]
pub struct Ratings {
    /// Mean star rating; absent when nobody rated the work
    pub average: Option<f64>,
    pub count: u64,
    /// Bayesian-weighted score used for sorting
    pub sortable: Option<f64>,
    /// Number of ratings per star value (1-5)
    pub star_counts: BTreeMap<u8, u64>,
}

#[derive(Serialize, Deserialize)]
struct RatingsBody {
    summary: RatingsSummary,
    #[serde(default)]
    counts: BTreeMap<u8, u64>,
}

#[derive(Serialize, Deserialize)]
struct RatingsSummary {
    average: Option<f64>,
    #[serde(default)]
    count: u64,
    sortable: Option<f64>,
}

impl From<RatingsBody> for Ratings {
    fn from(body: RatingsBody) -> Self {
        Self {
            average: body.summary.average,
            count: body.summary.count,
            sortable: body.summary.sortable,
            star_counts: body.counts,
        }
    }
}

impl From<Ratings> for RatingsBody {
    fn from(ratings: Ratings) -> Self {
        Self {
            summary: RatingsSummary {
                average: ratings.average,
                count: ratings.count,
                sortable: ratings.sortable,
            },
            counts: ratings.star_counts,
        }
    }
}

impl Entity for Ratings {
    const NAME: &'static str = "ratings";
    const SCHEMA: Schema = &[];
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::normalize::decode;

    #[test]
    fn test_decode_ratings() {
        let body = br#"{
            "summary": {"average": 4.25, "count": 4, "sortable": 3.2},
            "counts": {"1": 0, "2": 0, "3": 1, "4": 1, "5": 2}
        }"#;
        let ratings: Ratings = decode(body).unwrap();
        assert_eq!(ratings.average, Some(4.25));
        assert_eq!(ratings.count, 4);
        assert_eq!(ratings.star_counts[&5], 2);
        assert_eq!(ratings.star_counts.len(), 5);
    }

    #[test]
    fn test_decode_unrated_work() {
        let body = br#"{"summary": {"average": null, "count": 0}, "counts": {}}"#;
        let ratings: Ratings = decode(body).unwrap();
        assert!(ratings.average.is_none());
        assert_eq!(ratings.count, 0);
    }

    #[test]
    fn test_missing_summary_is_schema_error() {
        let err = decode::<Ratings>(br#"{"counts": {}}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Schema { target: "ratings", .. }));
    }

    #[test]
    fn test_serialized_ratings_decode_back() {
        let body = br#"{"summary": {"average": 3.5, "count": 2, "sortable": 2.9}, "counts": {"3": 1, "4": 1}}"#;
        let ratings: Ratings = decode(body).unwrap();

        let written = serde_json::to_value(&ratings).unwrap();
        assert_eq!(written["summary"]["count"], 2);
        assert_eq!(written["counts"]["4"], 1);

        let reread: Ratings = decode(written.to_string().as_bytes()).unwrap();
        assert_eq!(reread, ratings);
    }
}
