//! Merging validated profiles into the published aggregate.
//!
//! Pure transformation: sort by profile id, tally per-status counts. The
//! `generatedAt` stamp is the writer's concern so this stage stays
//! deterministic and directly testable.

use crate::profile::{Profile, ProfileStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The merged, sorted, statistics-annotated collection of all profiles.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Aggregate {
    pub profiles: Vec<Profile>,
    pub statistics: Statistics,
}

/// Per-status counts over the aggregate.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_profiles: usize,
    /// Keyed by the literal status string. The three known statuses are
    /// always present, zero or not; an unrecognized status is tallied under
    /// its own value rather than dropped.
    pub by_status: BTreeMap<String, u64>,
}

impl Statistics {
    pub fn tally(profiles: &[Profile]) -> Self {
        let mut by_status: BTreeMap<String, u64> = ProfileStatus::KNOWN
            .iter()
            .map(|status| (status.as_str().to_string(), 0))
            .collect();
        for profile in profiles {
            *by_status
                .entry(profile.identity.status.as_str().to_string())
                .or_insert(0) += 1;
        }
        Statistics {
            total_profiles: profiles.len(),
            by_status,
        }
    }
}

/// Build the aggregate from a validated set of profiles.
///
/// The sort is stable: ids are unique by invariant, but if that invariant is
/// ever violated upstream, equal keys keep their relative load order instead
/// of being reordered arbitrarily.
pub fn build_aggregate(mut profiles: Vec<Profile>) -> Aggregate {
    profiles.sort_by(|a, b| a.identity.id.cmp(&b.identity.id));
    let statistics = Statistics::tally(&profiles);
    Aggregate {
        profiles,
        statistics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(id: &str, status: &str) -> Profile {
        serde_json::from_value(json!({
            "schemaVersion": "1.0",
            "identity": {
                "id": id,
                "name": format!("Profile {id}"),
                "version": "1.0",
                "status": status,
                "specUrl": format!("https://example.org/{id}")
            },
            "capabilities": {}
        }))
        .expect("test profile deserializes")
    }

    #[test]
    fn profiles_are_sorted_by_id_regardless_of_input_order() {
        let aggregate = build_aggregate(vec![
            profile("zeta-v1", "stable"),
            profile("alpha-v2", "draft"),
            profile("mid-v9", "stable"),
        ]);
        let ids: Vec<&str> = aggregate
            .profiles
            .iter()
            .map(|p| p.identity.id.0.as_str())
            .collect();
        assert_eq!(ids, vec!["alpha-v2", "mid-v9", "zeta-v1"]);
    }

    #[test]
    fn statistics_cover_every_profile_and_every_known_status() {
        let aggregate = build_aggregate(vec![
            profile("a-v1", "stable"),
            profile("b-v1", "stable"),
            profile("c-v1", "draft"),
        ]);
        let stats = &aggregate.statistics;
        assert_eq!(stats.total_profiles, 3);
        assert_eq!(stats.by_status.get("stable"), Some(&2));
        assert_eq!(stats.by_status.get("draft"), Some(&1));
        // Unused statuses stay present at zero.
        assert_eq!(stats.by_status.get("deprecated"), Some(&0));
        let sum: u64 = stats.by_status.values().sum();
        assert_eq!(sum as usize, stats.total_profiles);
    }

    #[test]
    fn unknown_status_is_tallied_under_its_literal_value() {
        let aggregate = build_aggregate(vec![
            profile("a-v1", "experimental"),
            profile("b-v1", "stable"),
        ]);
        let stats = &aggregate.statistics;
        assert_eq!(stats.by_status.get("experimental"), Some(&1));
        assert_eq!(stats.total_profiles, 2);
        let sum: u64 = stats.by_status.values().sum();
        assert_eq!(sum as usize, stats.total_profiles);
    }

    #[test]
    fn empty_set_still_reports_the_closed_status_set() {
        let stats = Statistics::tally(&[]);
        assert_eq!(stats.total_profiles, 0);
        assert_eq!(
            stats.by_status.keys().collect::<Vec<_>>(),
            vec!["deprecated", "draft", "stable"]
        );
        assert!(stats.by_status.values().all(|count| *count == 0));
    }
}
