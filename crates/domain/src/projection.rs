use std::collections::BTreeSet;

use crate::{Routine, RoutineExercise, Superset, SupersetID};

/// One row of the rendered routine: a standalone exercise or a whole
/// superset block.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutineItem {
    Single(RoutineExercise),
    Group {
        superset: Superset,
        exercises: Vec<RoutineExercise>,
    },
}

impl Routine {
    /// Projects the routine into a render-ready sequence. A superset is
    /// emitted as one contiguous block at the position of its first member;
    /// members reached later in the scan are skipped. Pure function of the
    /// routine value.
    #[must_use]
    pub fn flatten(&self) -> Vec<RoutineItem> {
        let mut items = Vec::with_capacity(self.exercises.len());
        let mut emitted: BTreeSet<SupersetID> = BTreeSet::new();
        for entry in &self.exercises {
            let Some(superset_id) = entry.superset_id else {
                items.push(RoutineItem::Single(entry.clone()));
                continue;
            };
            if emitted.contains(&superset_id) {
                continue;
            }
            if let Some(superset) = self.superset(superset_id) {
                emitted.insert(superset_id);
                items.push(RoutineItem::Group {
                    superset: superset.clone(),
                    exercises: self
                        .members(superset_id)
                        .into_iter()
                        .cloned()
                        .collect::<Vec<_>>(),
                });
            } else {
                items.push(RoutineItem::Single(entry.clone()));
            }
        }
        items
    }
}
