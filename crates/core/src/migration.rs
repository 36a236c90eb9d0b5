//! Schema upgrade for records persisted before ids and timestamps existed.

use chrono::Utc;

use crate::quote::{Quote, new_local_id};

/// Fills in a missing `id` and `updated_at` on every record.
///
/// Ids are random, never derived from content, so two records that briefly
/// share a content key still get distinct ids. Returns `true` if anything
/// changed and the caller should persist; a second run is a no-op.
pub fn migrate(records: &mut [Quote]) -> bool {
    let now = Utc::now();
    let mut changed = false;
    for record in records.iter_mut() {
        if record.id.is_empty() {
            record.id = new_local_id();
            changed = true;
        }
        if record.updated_at.is_none() {
            record.updated_at = Some(now);
            changed = true;
        }
    }
    if changed {
        tracing::debug!(records = records.len(), "migrated legacy quote records");
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn legacy(text: &str) -> Quote {
        Quote {
            id: String::new(),
            text: text.to_owned(),
            category: "Life".to_owned(),
            updated_at: None,
        }
    }

    #[test]
    fn fills_missing_fields() {
        let mut records = vec![legacy("a"), legacy("b")];
        assert!(migrate(&mut records));
        assert!(records.iter().all(Quote::is_migrated));
        let ids: HashSet<_> = records.iter().map(|q| q.id.clone()).collect();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn second_run_is_a_no_op() {
        let mut records = vec![legacy("a"), Quote::new("b", "Life").unwrap()];
        assert!(migrate(&mut records));
        let snapshot = records.clone();
        assert!(!migrate(&mut records));
        assert_eq!(records, snapshot);
    }

    #[test]
    fn ids_not_derived_from_content() {
        let mut records = vec![legacy("same"), legacy("same")];
        migrate(&mut records);
        assert_ne!(records[0].id, records[1].id);
    }

    #[test]
    fn keeps_existing_id_when_only_timestamp_missing() {
        let mut record = legacy("a");
        record.id = "keep-me".to_owned();
        let mut records = vec![record];
        assert!(migrate(&mut records));
        assert_eq!(records[0].id, "keep-me");
        assert!(records[0].updated_at.is_some());
    }

    #[test]
    fn empty_collection_reports_no_change() {
        let mut records: Vec<Quote> = Vec::new();
        assert!(!migrate(&mut records));
    }
}
