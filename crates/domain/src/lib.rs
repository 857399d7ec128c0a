#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod catalog;

mod color;
mod error;
mod exercise;
mod name;
mod projection;
mod routine;
mod selection;
mod service;

pub use color::{ColorIndex, ColorIndexError, PALETTE_SIZE};
pub use error::{CreateError, DeleteError, ReadError, StorageError, UpdateError};
pub use exercise::{
    Equipment, Exercise, ExerciseID, ExerciseRepository, ExerciseService, Weight, WeightError,
};
pub use name::{Name, NameError};
pub use projection::RoutineItem;
pub use routine::{
    EditError, Rest, RestError, Routine, RoutineExercise, RoutineExerciseID, RoutineID,
    RoutineRepository, RoutineService, Superset, SupersetID,
};
pub use selection::Selection;
pub use service::Service;
