#![warn(clippy::pedantic)]

use std::cell::RefCell;

use ironplan_domain::{
    CreateError, DeleteError, Equipment, Exercise, ExerciseID, ExerciseRepository, Name,
    ReadError, Routine, RoutineID, RoutineRepository, UpdateError, catalog,
};

/// In-memory storage, for tests and for hosts that bring their own
/// persistence. Tables live in `RefCell`s: the model runs on a single
/// logical execution context and mutations never interleave.
#[derive(Default)]
pub struct InMemory {
    exercises: RefCell<Vec<Exercise>>,
    routines: RefCell<Vec<Routine>>,
}

impl InMemory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage seeded with the built-in exercise catalog.
    #[must_use]
    pub fn with_catalog() -> Self {
        let storage = Self::default();
        storage.exercises.replace(
            catalog::EXERCISES
                .iter()
                .map(|e| Exercise {
                    id: ExerciseID::new(),
                    name: Name::new(e.name).unwrap(),
                    equipment: e.equipment,
                })
                .collect(),
        );
        storage
    }
}

impl ExerciseRepository for InMemory {
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        Ok(self.exercises.borrow().clone())
    }

    async fn create_exercise(
        &self,
        name: Name,
        equipment: Equipment,
    ) -> Result<Exercise, CreateError> {
        if self.exercises.borrow().iter().any(|e| e.name == name) {
            return Err(CreateError::Conflict);
        }
        let exercise = Exercise {
            id: ExerciseID::new(),
            name,
            equipment,
        };
        self.exercises.borrow_mut().push(exercise.clone());
        Ok(exercise)
    }

    async fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError> {
        let mut exercises = self.exercises.borrow_mut();
        let stored = exercises
            .iter_mut()
            .find(|e| e.id == exercise.id)
            .ok_or(UpdateError::NotFound)?;
        *stored = exercise.clone();
        Ok(exercise)
    }

    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError> {
        let mut exercises = self.exercises.borrow_mut();
        let index = exercises
            .iter()
            .position(|e| e.id == id)
            .ok_or(DeleteError::NotFound)?;
        exercises.remove(index);
        Ok(id)
    }
}

impl RoutineRepository for InMemory {
    async fn read_routines(&self) -> Result<Vec<Routine>, ReadError> {
        Ok(self.routines.borrow().clone())
    }

    async fn create_routine(&self, name: Name) -> Result<Routine, CreateError> {
        if self.routines.borrow().iter().any(|r| r.name == name) {
            return Err(CreateError::Conflict);
        }
        let routine = Routine::new(name);
        self.routines.borrow_mut().push(routine.clone());
        Ok(routine)
    }

    async fn replace_routine(&self, routine: Routine) -> Result<Routine, UpdateError> {
        let mut routines = self.routines.borrow_mut();
        let stored = routines
            .iter_mut()
            .find(|r| r.id == routine.id)
            .ok_or(UpdateError::NotFound)?;
        *stored = routine.clone();
        Ok(routine)
    }

    async fn delete_routine(&self, id: RoutineID) -> Result<RoutineID, DeleteError> {
        let mut routines = self.routines.borrow_mut();
        let index = routines
            .iter()
            .position(|r| r.id == id)
            .ok_or(DeleteError::NotFound)?;
        routines.remove(index);
        Ok(id)
    }
}
