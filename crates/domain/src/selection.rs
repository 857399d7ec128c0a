use std::collections::BTreeSet;

use crate::{Routine, RoutineExerciseID, SupersetID};

/// Transient multi-select state for batch grouping, ungrouping, and
/// deletion. Separate from the routine value and never persisted; discard it
/// on cancel or after a batch action commits.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    selected: BTreeSet<RoutineExerciseID>,
    active: bool,
}

impl Selection {
    #[must_use]
    pub fn start_with(id: RoutineExerciseID) -> Self {
        Self {
            selected: BTreeSet::from([id]),
            active: true,
        }
    }

    pub fn toggle(&mut self, id: RoutineExerciseID) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
            self.active = true;
        }
        if self.selected.is_empty() {
            self.active = false;
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.active = false;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_selected(&self, id: RoutineExerciseID) -> bool {
        self.selected.contains(&id)
    }

    /// Selected ids in a stable order, for handing to the batch operations.
    #[must_use]
    pub fn ids(&self) -> Vec<RoutineExerciseID> {
        self.selected.iter().copied().collect()
    }

    #[must_use]
    pub fn any_grouped(&self, routine: &Routine) -> bool {
        self.selected
            .iter()
            .filter_map(|id| routine.exercise(*id))
            .any(|e| e.superset_id.is_some())
    }

    /// The superset all selected entries belong to, if they share one.
    #[must_use]
    pub fn all_in_same_superset(&self, routine: &Routine) -> Option<SupersetID> {
        let mut groups = self
            .selected
            .iter()
            .map(|id| routine.exercise(*id).and_then(|e| e.superset_id));
        let first = groups.next()??;
        groups
            .all(|group| group == Some(first))
            .then_some(first)
    }
}
