//! Sequence record model and release classification.
//!
//! Records come off the data API in camelCase; fields the watcher does
//! not interpret (affiliations, geography, collection dates) ride along
//! in `extra` and reappear unchanged in the notification body.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One pathogen sample record as returned by the data API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SequenceRecord {
    /// Accession plus dot-suffixed version, e.g. `"PP_123.2"`.
    pub accession_version: String,
    pub version: i64,
    /// `1` is the canonical aggregator group.
    pub group_id: i64,
    /// Release time, epoch seconds.
    pub released_at_timestamp: i64,
    /// Absent on older datasets; absent means not revoked.
    #[serde(default)]
    pub is_revocation: bool,
    /// Opaque metadata passed through to the notification body.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SequenceRecord {
    pub fn kind(&self) -> ReleaseKind {
        if self.accession_version.ends_with(".1") {
            ReleaseKind::InitialRelease
        } else if self.is_revocation {
            ReleaseKind::Revocation
        } else {
            ReleaseKind::Revision
        }
    }

    /// First-time submission by a group other than the canonical one.
    pub fn is_direct_submission(&self) -> bool {
        self.group_id != 1 && self.version == 1
    }
}

/// Release category of a record; exactly one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseKind {
    InitialRelease,
    Revision,
    Revocation,
}

/// New records bucketed by release kind, API order preserved.
#[derive(Debug, Default)]
pub struct Classified {
    pub initial_releases: Vec<SequenceRecord>,
    pub revisions: Vec<SequenceRecord>,
    pub revocations: Vec<SequenceRecord>,
}

impl Classified {
    pub fn from_records(records: &[SequenceRecord]) -> Self {
        let mut out = Self::default();
        for record in records {
            match record.kind() {
                ReleaseKind::InitialRelease => out.initial_releases.push(record.clone()),
                ReleaseKind::Revision => out.revisions.push(record.clone()),
                ReleaseKind::Revocation => out.revocations.push(record.clone()),
            }
        }
        out
    }

    pub fn total(&self) -> usize {
        self.initial_releases.len() + self.revisions.len() + self.revocations.len()
    }
}

/// Count of new records that are direct submissions.
pub fn direct_submission_count(records: &[SequenceRecord]) -> usize {
    records.iter().filter(|r| r.is_direct_submission()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(accession: &str, version: i64, group_id: i64, revoked: bool) -> SequenceRecord {
        SequenceRecord {
            accession_version: accession.to_string(),
            version,
            group_id,
            released_at_timestamp: 1_700_000_000,
            is_revocation: revoked,
            extra: Map::new(),
        }
    }

    #[test]
    fn initial_release_is_dot_one() {
        assert_eq!(record("A.1", 1, 1, false).kind(), ReleaseKind::InitialRelease);
        assert_eq!(record("A.2", 2, 1, false).kind(), ReleaseKind::Revision);
    }

    #[test]
    fn revocation_flag_only_matters_past_version_one() {
        // Matches the upstream filter order: ".1" wins over the flag.
        assert_eq!(record("A.1", 1, 1, true).kind(), ReleaseKind::InitialRelease);
        assert_eq!(record("A.3", 3, 1, true).kind(), ReleaseKind::Revocation);
    }

    #[test]
    fn classification_partitions_the_batch() {
        let batch = vec![
            record("A.1", 1, 1, false),
            record("B.2", 2, 1, false),
            record("C.2", 2, 1, true),
            record("D.1", 1, 4, false),
        ];
        let classified = Classified::from_records(&batch);
        assert_eq!(classified.initial_releases.len(), 2);
        assert_eq!(classified.revisions.len(), 1);
        assert_eq!(classified.revocations.len(), 1);
        assert_eq!(classified.total(), batch.len());
    }

    #[test]
    fn direct_submissions_require_first_version() {
        let batch = vec![
            record("A.1", 1, 4, false), // counts
            record("B.2", 2, 4, false), // new but not version 1
            record("C.1", 1, 1, false), // canonical group
        ];
        assert_eq!(direct_submission_count(&batch), 1);
    }

    #[test]
    fn is_revocation_defaults_to_false() {
        let json = r#"{
            "accessionVersion": "PP_1.2",
            "version": 2,
            "groupId": 1,
            "releasedAtTimestamp": 1700000000,
            "geoLocCountry": "Uganda"
        }"#;
        let record: SequenceRecord = serde_json::from_str(json).unwrap();
        assert!(!record.is_revocation);
        assert_eq!(record.extra["geoLocCountry"], "Uganda");
        assert_eq!(record.kind(), ReleaseKind::Revision);
    }

    #[test]
    fn reserializes_with_wire_names() {
        let json = r#"{
            "accessionVersion": "PP_1.1",
            "version": 1,
            "groupId": 2,
            "releasedAtTimestamp": 1700000001,
            "isRevocation": false,
            "groupName": "Example Lab"
        }"#;
        let record: SequenceRecord = serde_json::from_str(json).unwrap();
        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["accessionVersion"], "PP_1.1");
        assert_eq!(out["groupId"], 2);
        assert_eq!(out["groupName"], "Example Lab");
    }
}
