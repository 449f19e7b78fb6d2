//! Per-elective answer caches.
//!
//! Switching the elective subject snapshots the outgoing subject's in-range
//! slots, blanks the range and restores the incoming subject's snapshot when
//! one exists. Slots outside the range are never read or written here.

#[cfg(test)]
#[path = "cache_test.rs"]
mod cache_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::subject::ElectiveFamily;

/// Answers and scores of one elective range, aligned to the range's slot indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSnapshot {
    pub answers: Vec<String>,
    pub scores: Vec<String>,
}

impl SlotSnapshot {
    /// Capture `indices` from the working arrays.
    #[must_use]
    pub fn capture(answers: &[String], scores: &[String], indices: &[usize]) -> Self {
        let pick = |values: &[String]| -> Vec<String> {
            indices.iter().map(|&i| values.get(i).cloned().unwrap_or_default()).collect()
        };
        Self { answers: pick(answers), scores: pick(scores) }
    }

    /// Write the snapshot back over `indices`.
    pub fn restore(&self, answers: &mut [String], scores: &mut [String], indices: &[usize]) {
        for (k, &i) in indices.iter().enumerate() {
            if let (Some(slot), Some(value)) = (answers.get_mut(i), self.answers.get(k)) {
                slot.clone_from(value);
            }
            if let (Some(slot), Some(value)) = (scores.get_mut(i), self.scores.get(k)) {
                slot.clone_from(value);
            }
        }
    }
}

/// Lazily filled snapshots, one map per elective family keyed by subject name.
#[derive(Debug, Clone, Default)]
pub struct ElectiveCaches {
    korean: BTreeMap<String, SlotSnapshot>,
    math: BTreeMap<String, SlotSnapshot>,
    exploration: BTreeMap<String, SlotSnapshot>,
}

impl ElectiveCaches {
    fn map(&self, family: ElectiveFamily) -> &BTreeMap<String, SlotSnapshot> {
        match family {
            ElectiveFamily::Korean => &self.korean,
            ElectiveFamily::Math => &self.math,
            ElectiveFamily::Exploration => &self.exploration,
        }
    }

    fn map_mut(&mut self, family: ElectiveFamily) -> &mut BTreeMap<String, SlotSnapshot> {
        match family {
            ElectiveFamily::Korean => &mut self.korean,
            ElectiveFamily::Math => &mut self.math,
            ElectiveFamily::Exploration => &mut self.exploration,
        }
    }

    #[must_use]
    pub fn get(&self, family: ElectiveFamily, subject: &str) -> Option<&SlotSnapshot> {
        self.map(family).get(subject)
    }

    /// Store (or overwrite) a subject's snapshot.
    pub fn store(&mut self, family: ElectiveFamily, subject: &str, snapshot: SlotSnapshot) {
        self.map_mut(family).insert(subject.to_owned(), snapshot);
    }

    #[must_use]
    pub fn len(&self, family: ElectiveFamily) -> usize {
        self.map(family).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.korean.is_empty() && self.math.is_empty() && self.exploration.is_empty()
    }

    pub fn clear(&mut self) {
        self.korean.clear();
        self.math.clear();
        self.exploration.clear();
    }

    /// Swap the elective range from `outgoing` to `incoming`.
    ///
    /// Snapshots `outgoing` (when set), blanks `indices`, then restores
    /// `incoming`'s snapshot if one was cached.
    pub fn swap(
        &mut self,
        family: ElectiveFamily,
        outgoing: Option<&str>,
        incoming: &str,
        answers: &mut [String],
        scores: &mut [String],
        indices: &[usize],
    ) {
        if let Some(outgoing) = outgoing {
            self.store(family, outgoing, SlotSnapshot::capture(answers, scores, indices));
        }
        for &i in indices {
            if let Some(slot) = answers.get_mut(i) {
                slot.clear();
            }
            if let Some(slot) = scores.get_mut(i) {
                slot.clear();
            }
        }
        if let Some(cached) = self.get(family, incoming) {
            cached.restore(answers, scores, indices);
        }
    }
}
