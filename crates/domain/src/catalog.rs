//! Built-in exercise definitions used to seed an empty installation.

use crate::Equipment;

pub struct Exercise {
    pub name: &'static str,
    pub equipment: Equipment,
}

pub static EXERCISES: &[Exercise] = &[
    Exercise {
        name: "Bench Press",
        equipment: Equipment::Barbell,
    },
    Exercise {
        name: "Biceps Curl",
        equipment: Equipment::Dumbbell,
    },
    Exercise {
        name: "Cable Fly",
        equipment: Equipment::Cable,
    },
    Exercise {
        name: "Face Pull",
        equipment: Equipment::Cable,
    },
    Exercise {
        name: "Goblet Squat",
        equipment: Equipment::Kettlebell,
    },
    Exercise {
        name: "Hip Thrust",
        equipment: Equipment::Barbell,
    },
    Exercise {
        name: "Lat Pulldown",
        equipment: Equipment::Cable,
    },
    Exercise {
        name: "Lateral Raise",
        equipment: Equipment::Dumbbell,
    },
    Exercise {
        name: "Leg Press",
        equipment: Equipment::Machine,
    },
    Exercise {
        name: "Pull-Up",
        equipment: Equipment::Bodyweight,
    },
    Exercise {
        name: "Push-Up",
        equipment: Equipment::Bodyweight,
    },
    Exercise {
        name: "Romanian Deadlift",
        equipment: Equipment::Barbell,
    },
    Exercise {
        name: "Seated Row",
        equipment: Equipment::Cable,
    },
    Exercise {
        name: "Shoulder Press",
        equipment: Equipment::Dumbbell,
    },
    Exercise {
        name: "Squat",
        equipment: Equipment::Barbell,
    },
    Exercise {
        name: "Triceps Pushdown",
        equipment: Equipment::Cable,
    },
];

#[must_use]
pub fn find(name: &str) -> Option<&'static Exercise> {
    EXERCISES.iter().find(|e| e.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique_and_valid() {
        let mut names = EXERCISES.iter().map(|e| e.name).collect::<Vec<_>>();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), EXERCISES.len());
        for name in names {
            assert!(crate::Name::new(name).is_ok());
        }
    }

    #[test]
    fn test_find() {
        assert_eq!(find("Seated Row").unwrap().equipment, Equipment::Cable);
        assert!(find("Wrist Twirl").is_none());
    }
}
