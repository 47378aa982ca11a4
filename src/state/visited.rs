//! Client-side canonical visitation state.
//!
//! The store is mutated only through the toggle protocol: flips happen
//! optimistically in the event handler, each flip leaves a pending entry,
//! and the gateway's eventual [`ToggleResult`] is reconciled against the
//! state the UI has meanwhile settled on. A result that no longer matches
//! that state is stale and gets discarded — last write wins at the UI
//! layer, the gateway owns final consistency.

use crate::core::province::ProvinceId;
use crate::persist::gateway::{ToggleAction, ToggleResult, VisitRecord};
use crate::prelude::HashSet;
use serde::{Deserialize, Serialize};

/// An optimistic flip awaiting its gateway confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingToggle {
    pub province: ProvinceId,
    pub action: ToggleAction,
}

/// Derived statistics for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitStats {
    pub visited: usize,
    pub total: usize,
    /// Percentage to one decimal, e.g. "20.0".
    pub percentage: String,
}

/// What a reconciliation pass decided about a toggle result.
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciliation {
    /// Result matches current optimistic state; nothing to do.
    Confirmed,
    /// Result no longer matches (the user toggled again); discarded.
    Stale,
    /// A failure matching current state; the optimistic flip was undone.
    Reverted {
        province: ProvinceId,
        action: ToggleAction,
    },
}

/// Canonical set of visited province identifiers plus derived counts.
pub struct VisitedStore {
    visited: HashSet<ProvinceId>,
    /// Provinces whose remote record carries detail content (notes).
    detail: HashSet<ProvinceId>,
    total: usize,
}

impl VisitedStore {
    /// `total` is the number of shapes the mounted asset exposes.
    pub fn new(total: usize) -> Self {
        Self {
            visited: HashSet::default(),
            detail: HashSet::default(),
            total,
        }
    }

    /// Seeds state from the gateway's mount-time snapshot.
    pub fn hydrate(&mut self, records: &[VisitRecord]) {
        for record in records {
            self.visited.insert(record.province.clone());
            if record.has_detail() {
                self.detail.insert(record.province.clone());
            }
        }
    }

    pub fn visit(&mut self, province: ProvinceId) -> bool {
        self.visited.insert(province)
    }

    pub fn unvisit(&mut self, province: &ProvinceId) -> bool {
        self.detail.remove(province);
        self.visited.remove(province)
    }

    pub fn is_visited(&self, province: &ProvinceId) -> bool {
        self.visited.contains(province)
    }

    pub fn has_detail(&self, province: &ProvinceId) -> bool {
        self.detail.contains(province)
    }

    pub fn set_detail(&mut self, province: ProvinceId) {
        self.detail.insert(province);
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn set_total(&mut self, total: usize) {
        self.total = total;
    }

    pub fn visited_set(&self) -> &HashSet<ProvinceId> {
        &self.visited
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProvinceId> {
        self.visited.iter()
    }

    /// Visited share of the total, one decimal ("13 of 65" -> "20.0").
    pub fn percentage(&self) -> String {
        if self.total == 0 {
            return "0.0".to_string();
        }
        format!(
            "{:.1}",
            self.visited.len() as f64 * 100.0 / self.total as f64
        )
    }

    pub fn stats(&self) -> VisitStats {
        VisitStats {
            visited: self.visited.len(),
            total: self.total,
            percentage: self.percentage(),
        }
    }

    /// Reconciles an asynchronous toggle result against current state.
    ///
    /// A success confirming the current membership is a no-op; a success
    /// contradicting it is stale (a later flip already superseded it) and
    /// is discarded. A failure whose attempted action still matches the
    /// current membership undoes the optimistic flip.
    pub fn reconcile(&mut self, result: &ToggleResult) -> Reconciliation {
        match result {
            ToggleResult::Added { record } => {
                if self.is_visited(&record.province) {
                    if record.has_detail() {
                        self.detail.insert(record.province.clone());
                    }
                    Reconciliation::Confirmed
                } else {
                    log::debug!("stale add confirmation for {}, discarding", record.province);
                    Reconciliation::Stale
                }
            }
            ToggleResult::Removed { province, .. } => {
                if self.is_visited(province) {
                    log::debug!("stale remove confirmation for {}, discarding", province);
                    Reconciliation::Stale
                } else {
                    Reconciliation::Confirmed
                }
            }
            ToggleResult::Failed {
                province,
                action,
                reason,
            } => match action {
                ToggleAction::Add if self.is_visited(province) => {
                    log::warn!("add of {} failed ({}), reverting", province, reason);
                    self.unvisit(province);
                    Reconciliation::Reverted {
                        province: province.clone(),
                        action: *action,
                    }
                }
                ToggleAction::Remove if !self.is_visited(province) => {
                    log::warn!("remove of {} failed ({}), reverting", province, reason);
                    self.visit(province.clone());
                    Reconciliation::Reverted {
                        province: province.clone(),
                        action: *action,
                    }
                }
                _ => {
                    log::debug!("stale failure for {}, discarding", province);
                    Reconciliation::Stale
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ProvinceId {
        ProvinceId::from(s)
    }

    fn record(province: &str, notes: Option<&str>) -> VisitRecord {
        VisitRecord {
            id: 1,
            user: "u1".to_string(),
            province: id(province),
            notes: notes.map(str::to_string),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_percentage_one_decimal() {
        let mut store = VisitedStore::new(65);
        for i in 0..13 {
            store.visit(id(&format!("P{i}")));
        }
        assert_eq!(store.percentage(), "20.0");
        assert_eq!(store.stats().visited, 13);
    }

    #[test]
    fn test_percentage_empty_total() {
        let store = VisitedStore::new(0);
        assert_eq!(store.percentage(), "0.0");
    }

    #[test]
    fn test_hydrate_sets_membership_and_detail() {
        let mut store = VisitedStore::new(65);
        store.hydrate(&[
            record("HaNoi", None),
            record("HoChiMinh", Some("old quarter walk")),
        ]);
        assert!(store.is_visited(&id("HaNoi")));
        assert!(!store.has_detail(&id("HaNoi")));
        assert!(store.has_detail(&id("HoChiMinh")));
    }

    #[test]
    fn test_toggle_round_trip_restores_membership() {
        let mut store = VisitedStore::new(65);
        store.visit(id("HaNoi"));
        let before: Vec<_> = store.iter().cloned().collect();
        store.visit(id("DaNang"));
        store.unvisit(&id("DaNang"));
        let after: Vec<_> = store.iter().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_reconcile_confirms_matching_add() {
        let mut store = VisitedStore::new(65);
        store.visit(id("HaNoi"));
        let result = ToggleResult::Added {
            record: record("HaNoi", None),
        };
        assert_eq!(store.reconcile(&result), Reconciliation::Confirmed);
        assert!(store.is_visited(&id("HaNoi")));
    }

    #[test]
    fn test_reconcile_discards_stale_add() {
        // User toggled off again before the add confirmation arrived.
        let mut store = VisitedStore::new(65);
        let result = ToggleResult::Added {
            record: record("HaNoi", None),
        };
        assert_eq!(store.reconcile(&result), Reconciliation::Stale);
        assert!(!store.is_visited(&id("HaNoi")));
    }

    #[test]
    fn test_reconcile_reverts_failed_add() {
        let mut store = VisitedStore::new(65);
        store.visit(id("HaNoi"));
        let result = ToggleResult::Failed {
            province: id("HaNoi"),
            action: ToggleAction::Add,
            reason: "offline".to_string(),
        };
        assert!(matches!(
            store.reconcile(&result),
            Reconciliation::Reverted { .. }
        ));
        assert!(!store.is_visited(&id("HaNoi")));
    }

    #[test]
    fn test_reconcile_reverts_failed_remove() {
        let mut store = VisitedStore::new(65);
        let result = ToggleResult::Failed {
            province: id("HaNoi"),
            action: ToggleAction::Remove,
            reason: "offline".to_string(),
        };
        assert!(matches!(
            store.reconcile(&result),
            Reconciliation::Reverted { .. }
        ));
        assert!(store.is_visited(&id("HaNoi")));
    }

    #[test]
    fn test_reconcile_discards_failure_already_superseded() {
        // Failed add, but the user already toggled off: nothing to undo.
        let mut store = VisitedStore::new(65);
        let result = ToggleResult::Failed {
            province: id("HaNoi"),
            action: ToggleAction::Add,
            reason: "offline".to_string(),
        };
        store.unvisit(&id("HaNoi"));
        assert_eq!(store.reconcile(&result), Reconciliation::Stale);
    }
}
