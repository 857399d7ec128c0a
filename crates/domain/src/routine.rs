use std::collections::BTreeSet;

use chrono::Duration;
use derive_more::{Deref, Display, Into};
use uuid::Uuid;

use crate::{
    ColorIndex, CreateError, DeleteError, Equipment, Exercise, ExerciseID, Name, ReadError,
    UpdateError, Weight,
};

#[allow(async_fn_in_trait)]
pub trait RoutineRepository {
    async fn read_routines(&self) -> Result<Vec<Routine>, ReadError>;
    async fn create_routine(&self, name: Name) -> Result<Routine, CreateError>;
    async fn replace_routine(&self, routine: Routine) -> Result<Routine, UpdateError>;
    async fn delete_routine(&self, id: RoutineID) -> Result<RoutineID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait RoutineService {
    async fn get_routines(&self) -> Result<Vec<Routine>, ReadError>;
    async fn create_routine(&self, name: Name) -> Result<Routine, CreateError>;
    async fn save_routine(&self, routine: Routine) -> Result<Routine, UpdateError>;
    async fn delete_routine(&self, id: RoutineID) -> Result<RoutineID, DeleteError>;
}

/// An ordered plan of exercises, some of which are grouped into supersets.
///
/// The aggregate is a value: every mutation leaves `self` untouched and
/// returns a new `Routine`, so observers always see a consistent snapshot.
/// After every mutation the exercise positions form a dense sequence, every
/// group has at least two members numbered densely from zero, and group
/// positions equal the position of their first member.
#[derive(Debug, Clone, PartialEq)]
pub struct Routine {
    pub id: RoutineID,
    pub name: Name,
    pub exercises: Vec<RoutineExercise>,
    pub supersets: Vec<Superset>,
}

impl Routine {
    #[must_use]
    pub fn new(name: Name) -> Self {
        Self {
            id: RoutineID::new(),
            name,
            exercises: vec![],
            supersets: vec![],
        }
    }

    #[must_use]
    pub fn exercise(&self, id: RoutineExerciseID) -> Option<&RoutineExercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn superset(&self, id: SupersetID) -> Option<&Superset> {
        self.supersets.iter().find(|s| s.id == id)
    }

    /// Members of a superset in within-group order.
    #[must_use]
    pub fn members(&self, id: SupersetID) -> Vec<&RoutineExercise> {
        let mut members = self
            .exercises
            .iter()
            .filter(|e| e.superset_id == Some(id))
            .collect::<Vec<_>>();
        members.sort_by_key(|e| e.order_in_superset);
        members
    }

    #[must_use]
    pub fn used_colors(&self) -> BTreeSet<ColorIndex> {
        self.supersets.iter().map(|s| s.color).collect()
    }

    /// Distinct exercise definitions referenced by this routine.
    #[must_use]
    pub fn exercise_ids(&self) -> BTreeSet<ExerciseID> {
        self.exercises.iter().map(|e| e.exercise_id).collect()
    }

    /// Accumulated rest prescribed by all supersets.
    pub fn total_rest(&self) -> Duration {
        self.supersets
            .iter()
            .map(|s| {
                let intervals = self.members(s.id).len().saturating_sub(1);
                s.rest_between.duration() * intervals.try_into().unwrap_or(0)
            })
            .sum()
    }

    /// Appends an exercise, optionally straight into an existing superset.
    /// The entry starts out with the definition's default equipment.
    pub fn add_exercise(
        &self,
        exercise: &Exercise,
        superset_id: Option<SupersetID>,
    ) -> Result<Routine, EditError> {
        let order_in_superset = match superset_id {
            Some(id) => {
                self.superset(id).ok_or(EditError::NotFound)?;
                self.next_slot(id)
            }
            None => 0,
        };
        let mut routine = self.clone();
        #[allow(clippy::cast_possible_truncation)]
        routine.exercises.push(RoutineExercise {
            id: RoutineExerciseID::new(),
            exercise_id: exercise.id,
            weight: Weight::default(),
            equipment: exercise.equipment,
            order_index: routine.exercises.len() as u32,
            superset_id,
            order_in_superset,
        });
        Ok(routine.normalized())
    }

    pub fn modify_exercise(
        &self,
        id: RoutineExerciseID,
        weight: Option<Weight>,
        equipment: Option<Equipment>,
    ) -> Result<Routine, EditError> {
        let mut routine = self.clone();
        let entry = routine
            .exercises
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(EditError::NotFound)?;
        if let Some(weight) = weight {
            entry.weight = weight;
        }
        if let Some(equipment) = equipment {
            entry.equipment = equipment;
        }
        Ok(routine.normalized())
    }

    pub fn remove_exercise(&self, id: RoutineExerciseID) -> Result<Routine, EditError> {
        self.remove_exercises(&[id])
    }

    /// Removes the given entries. A superset left with fewer than two
    /// members is dissolved.
    pub fn remove_exercises(&self, ids: &[RoutineExerciseID]) -> Result<Routine, EditError> {
        if ids.iter().any(|id| self.exercise(*id).is_none()) {
            return Err(EditError::NotFound);
        }
        let mut routine = self.clone();
        routine.exercises.retain(|e| !ids.contains(&e.id));
        Ok(routine.normalized())
    }

    /// Moves the entry at position `from` to position `to`. Group membership
    /// is untouched; grouped entries stay rendered with their group
    /// regardless of their individual position.
    pub fn move_exercise(&self, from: usize, to: usize) -> Result<Routine, EditError> {
        if from >= self.exercises.len() {
            return Err(EditError::OutOfRange(from));
        }
        if to >= self.exercises.len() {
            return Err(EditError::OutOfRange(to));
        }
        let mut routine = self.clone();
        let entry = routine.exercises.remove(from);
        routine.exercises.insert(to, entry);
        Ok(routine.normalized())
    }

    /// Forms a superset from an entry and its immediate successor.
    pub fn pair_with_next(&self, id: RoutineExerciseID) -> Result<Routine, EditError> {
        let index = self
            .exercises
            .iter()
            .position(|e| e.id == id)
            .ok_or(EditError::NotFound)?;
        let Some(next) = self.exercises.get(index + 1) else {
            return Err(EditError::NoEligibleNeighbor);
        };
        if self.exercises[index].superset_id.is_some() || next.superset_id.is_some() {
            return Err(EditError::AlreadyGrouped);
        }
        let mut routine = self.clone();
        let superset = self.new_superset(self.exercises[index].order_index);
        routine.exercises[index].superset_id = Some(superset.id);
        routine.exercises[index].order_in_superset = 0;
        routine.exercises[index + 1].superset_id = Some(superset.id);
        routine.exercises[index + 1].order_in_superset = 1;
        routine.supersets.push(superset);
        Ok(routine.normalized())
    }

    /// Forms a superset from at least two ungrouped entries. Within-group
    /// order follows the members' relative positions in the routine.
    pub fn group_exercises(&self, ids: &[RoutineExerciseID]) -> Result<Routine, EditError> {
        let ids = ids.iter().copied().collect::<BTreeSet<_>>();
        if ids.len() < 2 {
            return Err(EditError::InsufficientSelection);
        }
        for id in &ids {
            if self.exercise(*id).ok_or(EditError::NotFound)?.superset_id.is_some() {
                return Err(EditError::AlreadyGrouped);
            }
        }
        let mut routine = self.clone();
        let superset = self.new_superset(0);
        let mut slot = 0;
        for entry in &mut routine.exercises {
            if ids.contains(&entry.id) {
                entry.superset_id = Some(superset.id);
                entry.order_in_superset = slot;
                slot += 1;
            }
        }
        routine.supersets.push(superset);
        Ok(routine.normalized())
    }

    /// Appends entries to an existing superset, after its current members.
    pub fn add_to_superset(
        &self,
        superset_id: SupersetID,
        ids: &[RoutineExerciseID],
    ) -> Result<Routine, EditError> {
        self.superset(superset_id).ok_or(EditError::NotFound)?;
        let ids = ids.iter().copied().collect::<BTreeSet<_>>();
        for id in &ids {
            if self.exercise(*id).ok_or(EditError::NotFound)?.superset_id.is_some() {
                return Err(EditError::AlreadyGrouped);
            }
        }
        let mut routine = self.clone();
        let mut slot = self.next_slot(superset_id);
        for entry in &mut routine.exercises {
            if ids.contains(&entry.id) {
                entry.superset_id = Some(superset_id);
                entry.order_in_superset = slot;
                slot += 1;
            }
        }
        Ok(routine.normalized())
    }

    /// Clears the grouping of the given entries. A superset left with fewer
    /// than two members is dissolved.
    pub fn remove_from_superset(&self, ids: &[RoutineExerciseID]) -> Result<Routine, EditError> {
        if ids.iter().any(|id| self.exercise(*id).is_none()) {
            return Err(EditError::NotFound);
        }
        let mut routine = self.clone();
        for entry in &mut routine.exercises {
            if ids.contains(&entry.id) {
                entry.superset_id = None;
                entry.order_in_superset = 0;
            }
        }
        Ok(routine.normalized())
    }

    /// Removes a superset, keeping its members as standalone entries.
    pub fn dissolve_superset(&self, id: SupersetID) -> Result<Routine, EditError> {
        self.superset(id).ok_or(EditError::NotFound)?;
        let mut routine = self.clone();
        for entry in &mut routine.exercises {
            if entry.superset_id == Some(id) {
                entry.superset_id = None;
                entry.order_in_superset = 0;
            }
        }
        routine.supersets.retain(|s| s.id != id);
        Ok(routine.normalized())
    }

    /// Removes a superset together with all its members.
    pub fn remove_superset_with_exercises(&self, id: SupersetID) -> Result<Routine, EditError> {
        self.superset(id).ok_or(EditError::NotFound)?;
        let mut routine = self.clone();
        routine.exercises.retain(|e| e.superset_id != Some(id));
        routine.supersets.retain(|s| s.id != id);
        Ok(routine.normalized())
    }

    /// Appends a deep copy of a superset and its members. The copy keeps the
    /// source's color, rest, and per-entry configuration.
    pub fn duplicate_superset(&self, id: SupersetID) -> Result<Routine, EditError> {
        let source = self.superset(id).ok_or(EditError::NotFound)?;
        let mut routine = self.clone();
        let copy = Superset {
            id: SupersetID::new(),
            name: source.name.with_suffix("(Copy)"),
            color: source.color,
            rest_between: source.rest_between,
            order_index: source.order_index,
        };
        let mut copies = self
            .members(id)
            .into_iter()
            .map(|member| RoutineExercise {
                id: RoutineExerciseID::new(),
                superset_id: Some(copy.id),
                ..member.clone()
            })
            .collect::<Vec<_>>();
        routine.exercises.append(&mut copies);
        routine.supersets.push(copy);
        Ok(routine.normalized())
    }

    pub fn rename_superset(&self, id: SupersetID, name: Name) -> Result<Routine, EditError> {
        self.with_superset(id, |superset| superset.name = name)
    }

    pub fn set_superset_rest(&self, id: SupersetID, rest: Rest) -> Result<Routine, EditError> {
        self.with_superset(id, |superset| superset.rest_between = rest)
    }

    pub fn set_superset_color(&self, id: SupersetID, color: ColorIndex) -> Result<Routine, EditError> {
        self.with_superset(id, |superset| superset.color = color)
    }

    fn with_superset(
        &self,
        id: SupersetID,
        patch: impl FnOnce(&mut Superset),
    ) -> Result<Routine, EditError> {
        let mut routine = self.clone();
        let superset = routine
            .supersets
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(EditError::NotFound)?;
        patch(superset);
        Ok(routine.normalized())
    }

    fn new_superset(&self, order_index: u32) -> Superset {
        Superset {
            id: SupersetID::new(),
            name: self.next_superset_name(),
            color: ColorIndex::next_free(&self.used_colors()),
            rest_between: Rest::DEFAULT,
            order_index,
        }
    }

    /// Lowest free `"Superset {n}"` name, counting upwards from the highest
    /// numeric suffix still present so deleted groups never cause collisions.
    fn next_superset_name(&self) -> Name {
        let n = self
            .supersets
            .iter()
            .filter_map(|s| s.name.as_ref().strip_prefix("Superset "))
            .filter_map(|suffix| suffix.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        Name::new(&format!("Superset {n}")).unwrap()
    }

    fn next_slot(&self, id: SupersetID) -> u32 {
        self.exercises
            .iter()
            .filter(|e| e.superset_id == Some(id))
            .map(|e| e.order_in_superset)
            .max()
            .map_or(0, |max| max + 1)
    }

    /// Restores the representation invariants: dense global positions, dense
    /// within-group positions, no group below two members, group positions
    /// equal to their first member's, groups sorted by position, no stale
    /// group references.
    fn normalized(mut self) -> Routine {
        #[allow(clippy::cast_possible_truncation)]
        for (index, entry) in self.exercises.iter_mut().enumerate() {
            entry.order_index = index as u32;
        }

        let mut supersets = Vec::with_capacity(self.supersets.len());
        for mut superset in std::mem::take(&mut self.supersets) {
            let mut members = (0..self.exercises.len())
                .filter(|i| self.exercises[*i].superset_id == Some(superset.id))
                .collect::<Vec<_>>();
            if members.len() < 2 {
                for i in members {
                    self.exercises[i].superset_id = None;
                    self.exercises[i].order_in_superset = 0;
                }
                continue;
            }
            members.sort_by_key(|i| {
                (
                    self.exercises[*i].order_in_superset,
                    self.exercises[*i].order_index,
                )
            });
            #[allow(clippy::cast_possible_truncation)]
            for (slot, i) in members.iter().enumerate() {
                self.exercises[*i].order_in_superset = slot as u32;
            }
            superset.order_index = members
                .iter()
                .map(|i| self.exercises[*i].order_index)
                .min()
                .unwrap_or(0);
            supersets.push(superset);
        }
        supersets.sort_by_key(|s| s.order_index);
        self.supersets = supersets;

        let known = self.supersets.iter().map(|s| s.id).collect::<BTreeSet<_>>();
        for entry in &mut self.exercises {
            if entry.superset_id.is_some_and(|id| !known.contains(&id)) {
                entry.superset_id = None;
                entry.order_in_superset = 0;
            }
        }
        self
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RoutineID(Uuid);

impl RoutineID {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for RoutineID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for RoutineID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// An exercise placed into a routine, with its per-instance configuration.
/// `superset_id` is a reference by id, not a containment pointer; the
/// routine owns both lists.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineExercise {
    pub id: RoutineExerciseID,
    pub exercise_id: ExerciseID,
    pub weight: Weight,
    pub equipment: Equipment,
    pub order_index: u32,
    pub superset_id: Option<SupersetID>,
    pub order_in_superset: u32,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct RoutineExerciseID(Uuid);

impl RoutineExerciseID {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for RoutineExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for RoutineExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// A named, colored group of at least two entries performed back-to-back
/// with a shared rest interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Superset {
    pub id: SupersetID,
    pub name: Name,
    pub color: ColorIndex,
    pub rest_between: Rest,
    pub order_index: u32,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SupersetID(Uuid);

impl SupersetID {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for SupersetID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for SupersetID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Rest between the exercises of a superset, in seconds.
#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rest(u32);

impl Rest {
    pub const DEFAULT: Rest = Rest(60);

    pub fn new(value: u32) -> Result<Self, RestError> {
        if !(5..=120).contains(&value) {
            return Err(RestError::OutOfRange(value));
        }

        if value % 5 != 0 {
            return Err(RestError::InvalidResolution(value));
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn duration(self) -> Duration {
        Duration::seconds(i64::from(self.0))
    }
}

impl Default for Rest {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<&str> for Rest {
    type Error = RestError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Rest::new(parsed_value),
            Err(_) => Err(RestError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RestError {
    #[error("Rest must be in the range 5 to 120 s ({0})")]
    OutOfRange(u32),
    #[error("Rest must be a multiple of 5 s ({0})")]
    InvalidResolution(u32),
    #[error("Rest must be an integer")]
    ParseError,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum EditError {
    #[error("No exercise or superset with the given id")]
    NotFound,
    #[error("Position {0} is outside the routine")]
    OutOfRange(usize),
    #[error("At least two exercises must be selected")]
    InsufficientSelection,
    #[error("Exercise is already part of a superset")]
    AlreadyGrouped,
    #[error("No adjacent exercise to pair with")]
    NoEligibleNeighbor,
}
