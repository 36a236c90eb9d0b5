//! Reconciliation of a remote snapshot into the local collection.
//!
//! The conflict policy is remote-wins: whenever a remote record matches a local
//! one by content key, the remote record replaces it whole. Records are
//! processed in remote-sequence order, so the operation is not commutative and
//! `updated_at` is carried along but never consulted.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::quote::{ContentKey, Quote};

/// Counts reported to the user after a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeSummary {
    /// Remote records whose content key was new locally.
    pub added: usize,
    /// Local records overwritten by a remote record with the same content key.
    pub replaced: usize,
    /// Replacements where the raw `text` or `category` actually differed.
    pub conflicts: usize,
}

impl MergeSummary {
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.added == 0 && self.replaced == 0
    }
}

impl fmt::Display for MergeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} added, {} replaced, {} conflicts",
            self.added, self.replaced, self.conflicts
        )
    }
}

/// Merged collection plus the reconciliation summary.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub merged: Vec<Quote>,
    pub summary: MergeSummary,
}

/// Pure computation: apply `remote` on top of `local`.
///
/// No I/O; the storage layer persists `merged` before reporting the summary.
#[must_use]
pub fn merge(local: &[Quote], remote: Vec<Quote>) -> MergeOutcome {
    let mut merged = local.to_vec();
    let mut index: HashMap<ContentKey, usize> =
        merged.iter().enumerate().map(|(pos, q)| (q.content_key(), pos)).collect();
    let mut summary = MergeSummary::default();

    for incoming in remote {
        let key = incoming.content_key();
        match index.get(&key).copied() {
            Some(pos) => {
                let existing = &merged[pos];
                if existing.text != incoming.text || existing.category != incoming.category {
                    summary.conflicts += 1;
                }
                merged[pos] = incoming;
                summary.replaced += 1;
            },
            None => {
                index.insert(key, merged.len());
                merged.push(incoming);
                summary.added += 1;
            },
        }
    }

    MergeOutcome { merged, summary }
}
