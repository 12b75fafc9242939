//! Rank a record's counters by utilization.
//!
//! Incomplete counters are dropped, the rest get a decimal percentage,
//! and the result is ordered from most to least utilized. Ordering is a
//! stable sort, so counters at the same percentage keep catalog order.

use super::catalog::CounterPair;
use super::percentage::Percentage;
use crate::utils::error::UsageError;
use log::debug;
use serde::{Deserialize, Serialize, Serializer};

/// A counter with both values known and its utilization
///
/// **Public** - element of a ranked snapshot
///
/// Deserializing checks the limit and recomputes the percentage, so an
/// entry read from JSON holds the same invariants as one built by [`rank`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawUsageEntry")]
pub struct UsageEntry {
    /// Counter name from the catalog
    pub name: String,

    /// Amount consumed
    pub current: i64,

    /// Ceiling for this counter
    #[serde(rename = "max")]
    pub limit: i64,

    /// `current / limit * 100`
    pub percentage: Percentage,
}

impl UsageEntry {
    /// Build an entry from a catalog pair
    ///
    /// Returns `None` when either value is missing or the limit is not positive.
    pub fn from_pair(pair: &CounterPair) -> Option<Self> {
        let (current, limit) = match (pair.current, pair.limit) {
            (Some(current), Some(limit)) => (current, limit),
            _ => return None,
        };

        let percentage = Percentage::from_ratio(current, limit)?;

        Some(Self {
            name: pair.name.clone(),
            current,
            limit,
            percentage,
        })
    }

    /// Remaining headroom before the limit (negative when exceeded)
    pub fn remaining(&self) -> i64 {
        self.limit.saturating_sub(self.current)
    }
}

/// Unchecked wire form of [`UsageEntry`]
#[derive(Deserialize)]
struct RawUsageEntry {
    name: String,
    current: i64,
    #[serde(rename = "max")]
    limit: i64,
    percentage: Percentage,
}

impl TryFrom<RawUsageEntry> for UsageEntry {
    type Error = UsageError;

    fn try_from(raw: RawUsageEntry) -> Result<Self, Self::Error> {
        let expected = Percentage::from_ratio(raw.current, raw.limit).ok_or_else(|| {
            UsageError::NonPositiveLimit {
                name: raw.name.clone(),
                limit: raw.limit,
            }
        })?;

        if expected != raw.percentage {
            return Err(UsageError::PercentageMismatch {
                name: raw.name,
                expected: expected.to_string(),
                found: raw.percentage.to_string(),
            });
        }

        Ok(Self {
            name: raw.name,
            current: raw.current,
            limit: raw.limit,
            percentage: expected,
        })
    }
}

/// Usage entries ordered by percentage, highest first
///
/// **Public** - returned from [`rank`]
///
/// Serialized as a bare list. Deserializing rejects lists that are not in
/// descending percentage order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<UsageEntry>")]
pub struct RankedSnapshot {
    entries: Vec<UsageEntry>,
}

impl Serialize for RankedSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl TryFrom<Vec<UsageEntry>> for RankedSnapshot {
    type Error = UsageError;

    fn try_from(entries: Vec<UsageEntry>) -> Result<Self, Self::Error> {
        if let Some(pair) = entries
            .windows(2)
            .find(|pair| pair[0].percentage < pair[1].percentage)
        {
            return Err(UsageError::OutOfOrder {
                name: pair[0].name.clone(),
            });
        }

        Ok(Self { entries })
    }
}

impl RankedSnapshot {
    pub fn entries(&self) -> &[UsageEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<UsageEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UsageEntry> {
        self.entries.iter()
    }

    /// Most utilized counter
    pub fn peak(&self) -> Option<&UsageEntry> {
        self.entries.first()
    }

    /// Keep only the `n` most utilized counters
    pub fn top(&self, n: usize) -> RankedSnapshot {
        RankedSnapshot {
            entries: self.entries.iter().take(n).cloned().collect(),
        }
    }

    /// Counters at or above `threshold` percent
    pub fn over_threshold(&self, threshold: Percentage) -> &[UsageEntry] {
        // Sorted descending, so the matches form a prefix
        let end = self
            .entries
            .iter()
            .position(|entry| entry.percentage < threshold)
            .unwrap_or(self.entries.len());
        &self.entries[..end]
    }

    pub fn get(&self, name: &str) -> Option<&UsageEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}

impl<'a> IntoIterator for &'a RankedSnapshot {
    type Item = &'a UsageEntry;
    type IntoIter = std::slice::Iter<'a, UsageEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Rank a catalog of counter pairs by utilization
///
/// **Public** - main entry point for usage ranking
///
/// # Arguments
/// * `catalog` - Counter pairs in declaration order
///
/// # Returns
/// Complete counters sorted by percentage (descending). Counters with equal
/// percentages keep their catalog order. An all-incomplete catalog yields an
/// empty snapshot.
pub fn rank(catalog: &[CounterPair]) -> RankedSnapshot {
    let mut entries: Vec<UsageEntry> = catalog
        .iter()
        .filter_map(|pair| {
            let entry = UsageEntry::from_pair(pair);
            if entry.is_none() {
                debug!("Skipping incomplete counter: {}", pair.name);
            }
            entry
        })
        .collect();

    // `sort_by` is stable; ties keep catalog order
    entries.sort_by(|a, b| b.percentage.cmp(&a.percentage));

    debug!(
        "Ranked {} of {} counters",
        entries.len(),
        catalog.len()
    );

    RankedSnapshot { entries }
}

/// Summary statistics over a ranked snapshot
///
/// **Public** - returned from [`summarize`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageSummary {
    /// Counters present in the catalog
    pub declared: usize,

    /// Counters that made it into the snapshot
    pub reported: usize,

    /// Counters dropped for missing values or a non-positive limit
    pub skipped: usize,

    /// Name and percentage of the most utilized counter
    pub peak: Option<(String, Percentage)>,

    /// Counters at or above the near-limit threshold
    pub near_limit: usize,

    /// Counters above 100%
    pub exceeded: usize,
}

impl UsageSummary {
    /// True when any counter is at or above the near-limit threshold
    pub fn has_pressure(&self) -> bool {
        self.near_limit > 0
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and CLI output
    pub fn summary(&self) -> String {
        let peak = match &self.peak {
            Some((name, pct)) => format!("{} ({}%)", name, pct),
            None => "none".to_string(),
        };

        format!(
            "Counters: {}/{} reported | Peak: {} | Near limit: {} | Exceeded: {}",
            self.reported, self.declared, peak, self.near_limit, self.exceeded
        )
    }
}

/// Summarize a snapshot against the catalog it came from
pub fn summarize(
    snapshot: &RankedSnapshot,
    declared: usize,
    near_limit: Percentage,
) -> UsageSummary {
    let hundred = Percentage::from_whole(100);

    UsageSummary {
        declared,
        reported: snapshot.len(),
        skipped: declared.saturating_sub(snapshot.len()),
        peak: snapshot
            .peak()
            .map(|entry| (entry.name.clone(), entry.percentage)),
        near_limit: snapshot.over_threshold(near_limit).len(),
        exceeded: snapshot
            .iter()
            .filter(|entry| entry.percentage > hundred)
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(snapshot: &RankedSnapshot) -> Vec<&str> {
        snapshot.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_rank_orders_by_percentage() {
        let catalog = vec![
            CounterPair::from(("Email", 5, 10)),
            CounterPair::from(("SOQL", 30, 100)),
            CounterPair::from(("Batch", 2, 5)),
        ];

        let ranked = rank(&catalog);

        assert_eq!(names(&ranked), vec!["Email", "Batch", "SOQL"]);
        assert_eq!(ranked.entries()[0].percentage, Percentage::from_whole(50));
        assert_eq!(ranked.entries()[1].percentage, Percentage::from_whole(40));
        assert_eq!(ranked.entries()[2].percentage, Percentage::from_whole(30));
    }

    #[test]
    fn test_rank_skips_incomplete() {
        let catalog = vec![
            CounterPair::new("Callouts", None, Some(100)),
            CounterPair::new("CPU", Some(5000), None),
            CounterPair::from(("Heap", 10, 0)),
            CounterPair::from(("DML", 1, 150)),
        ];

        let ranked = rank(&catalog);

        assert_eq!(names(&ranked), vec!["DML"]);
    }

    #[test]
    fn test_rank_ties_keep_catalog_order() {
        let catalog = vec![
            CounterPair::from(("Third", 1, 3)),
            CounterPair::from(("Half", 1, 2)),
            CounterPair::from(("AlsoThird", 2, 6)),
            CounterPair::from(("StillThird", 100, 300)),
        ];

        let ranked = rank(&catalog);

        assert_eq!(
            names(&ranked),
            vec!["Half", "Third", "AlsoThird", "StillThird"]
        );
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank(&[]).is_empty());
    }

    #[test]
    fn test_over_threshold_and_top() {
        let catalog = vec![
            CounterPair::from(("A", 90, 100)),
            CounterPair::from(("B", 80, 100)),
            CounterPair::from(("C", 10, 100)),
        ];
        let ranked = rank(&catalog);

        let hot = ranked.over_threshold(Percentage::from_whole(80));
        assert_eq!(hot.len(), 2);
        assert_eq!(ranked.top(1).len(), 1);
        assert_eq!(ranked.top(10).len(), 3);
        assert_eq!(ranked.peak().map(|e| e.name.as_str()), Some("A"));
        assert_eq!(ranked.get("C").map(|e| e.remaining()), Some(90));
    }

    #[test]
    fn test_summarize() {
        let catalog = vec![
            CounterPair::from(("Rows", 120, 100)),
            CounterPair::from(("Queries", 85, 100)),
            CounterPair::new("Heap", None, Some(6_000_000)),
        ];
        let ranked = rank(&catalog);

        let summary = summarize(&ranked, catalog.len(), Percentage::from_whole(80));

        assert_eq!(summary.reported, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.near_limit, 2);
        assert_eq!(summary.exceeded, 1);
        assert!(summary.has_pressure());
        assert!(summary.summary().contains("Rows (120.0000%)"));
    }

    #[test]
    fn test_entry_serializes_with_max_field() {
        let entry = UsageEntry::from_pair(&CounterPair::from(("Email", 5, 10))).unwrap();
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["name"], "Email");
        assert_eq!(json["current"], 5);
        assert_eq!(json["max"], 10);
        assert_eq!(json["percentage"], "50.0000");
    }

    #[test]
    fn test_snapshot_json_round_trip() {
        let ranked = rank(&[
            CounterPair::from(("Rows", 120, 100)),
            CounterPair::from(("Queries", 1, 3)),
        ]);
        let json = serde_json::to_string(&ranked).unwrap();

        assert_eq!(serde_json::from_str::<RankedSnapshot>(&json).unwrap(), ranked);
    }

    #[test]
    fn test_entry_rejects_zero_limit() {
        let err = serde_json::from_str::<UsageEntry>(
            r#"{"name": "A", "current": 5, "max": 0, "percentage": "10.0000"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("non-positive limit"));
    }

    #[test]
    fn test_entry_rejects_wrong_percentage() {
        let err = serde_json::from_str::<UsageEntry>(
            r#"{"name": "B", "current": 99, "max": 100, "percentage": "1.0000"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("current/max gives 99.0000%"));
    }

    #[test]
    fn test_snapshot_rejects_ascending_entries() {
        let err = serde_json::from_str::<RankedSnapshot>(
            r#"[
                {"name": "Low", "current": 1, "max": 100, "percentage": "1.0000"},
                {"name": "High", "current": 50, "max": 100, "percentage": "50.0000"}
            ]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("'Low' is ranked above"));
    }
}
