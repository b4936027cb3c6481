//! In-memory form state for logging or editing one exercise.
//!
//! Fields hold raw text exactly as typed, the way form inputs do. Conversion
//! to a typed [`ExerciseInput`] happens only on submit.

use uuid::Uuid;

use crate::types::{ExerciseInput, ExerciseRecord, MuscleGroup};

/// The four editable inputs, named as the API names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ExerciseName,
    Weight,
    Reps,
    MuscleGroup,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::ExerciseName,
        Field::Weight,
        Field::Reps,
        Field::MuscleGroup,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::ExerciseName => "exerciseName",
            Field::Weight => "weight",
            Field::Reps => "reps",
            Field::MuscleGroup => "muscleGroup",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::ExerciseName => "Exercise Name:",
            Field::Weight => "Weight (lbs/kg):",
            Field::Reps => "Reps:",
            Field::MuscleGroup => "Muscle Group:",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// Whether submit will create a record or update one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Editing(Uuid),
}

impl Mode {
    pub fn editing_id(self) -> Option<Uuid> {
        match self {
            Mode::Idle => None,
            Mode::Editing(id) => Some(id),
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Mode::Idle => "Log New Exercise",
            Mode::Editing(_) => "Edit Log",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Mode::Idle => "Add Log",
            Mode::Editing(_) => "Update Log",
        }
    }

    /// Cancel is only offered while editing.
    pub fn shows_cancel(self) -> bool {
        matches!(self, Mode::Editing(_))
    }
}

/// Why the form cannot be turned into a request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Name, weight or reps left blank.
    MissingFields,
    /// A field holds text the API would reject.
    Invalid(Field),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub exercise_name: String,
    pub weight: String,
    pub reps: String,
    pub muscle_group: String,
    pub editing_id: Option<Uuid>,
}

impl FormState {
    /// A form pre-populated from `record` and targeting it for update.
    pub fn editing(record: &ExerciseRecord) -> Self {
        Self {
            exercise_name: record.exercise_name.clone(),
            weight: record.weight.to_string(),
            reps: record.reps.to_string(),
            muscle_group: record.muscle_group.as_str().to_string(),
            editing_id: Some(record.id),
        }
    }

    pub fn mode(&self) -> Mode {
        match self.editing_id {
            Some(id) => Mode::Editing(id),
            None => Mode::Idle,
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::ExerciseName => &self.exercise_name,
            Field::Weight => &self.weight,
            Field::Reps => &self.reps,
            Field::MuscleGroup => &self.muscle_group,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::ExerciseName => self.exercise_name = value,
            Field::Weight => self.weight = value,
            Field::Reps => self.reps = value,
            Field::MuscleGroup => self.muscle_group = value,
        }
    }

    /// Empty fields and no edit target.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Build the request payload.
    ///
    /// Blank name, weight or reps is checked first and reported as
    /// [`FormError::MissingFields`]. Muscle group is not part of that check.
    pub fn to_input(&self) -> Result<ExerciseInput, FormError> {
        if self.exercise_name.is_empty() || self.weight.is_empty() || self.reps.is_empty() {
            return Err(FormError::MissingFields);
        }
        let weight = parse_number(&self.weight).ok_or(FormError::Invalid(Field::Weight))?;
        let reps = parse_number(&self.reps).ok_or(FormError::Invalid(Field::Reps))?;
        let muscle_group = MuscleGroup::from_name(&self.muscle_group)
            .ok_or(FormError::Invalid(Field::MuscleGroup))?;
        Ok(ExerciseInput {
            exercise_name: self.exercise_name.clone(),
            weight,
            reps,
            muscle_group,
        })
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
