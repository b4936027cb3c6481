//! Exercise record schema and request-body validation.
//!
//! Request bodies arrive as an [`ExerciseDraft`], where every field is an
//! arbitrary optional JSON value. [`ExerciseDraft::validate`] turns a draft
//! into a fully typed [`NewExercise`] or a [`ValidationError`] naming every
//! failing field. Only `NewExercise` values ever reach the record store, so
//! a persisted record always satisfies the schema.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// The closed set of muscle groups an exercise may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Arms,
    Shoulders,
    Core,
}

impl MuscleGroup {
    /// Every muscle group, in display order.
    pub const ALL: [MuscleGroup; 6] = [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Legs,
        MuscleGroup::Arms,
        MuscleGroup::Shoulders,
        MuscleGroup::Core,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Arms => "Arms",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Core => "Core",
        }
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known muscle group.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a valid muscle group")]
pub struct UnknownMuscleGroup(pub String);

impl FromStr for MuscleGroup {
    type Err = UnknownMuscleGroup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MuscleGroup::ALL
            .into_iter()
            .find(|group| group.as_str() == s)
            .ok_or_else(|| UnknownMuscleGroup(s.to_string()))
    }
}

/// A persisted exercise log entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRecord {
    pub id: Uuid,
    pub exercise_name: String,
    pub weight: f64,
    pub reps: f64,
    pub muscle_group: MuscleGroup,
}

impl ExerciseRecord {
    pub fn new(id: Uuid, input: NewExercise) -> Self {
        Self {
            id,
            exercise_name: input.exercise_name,
            weight: input.weight,
            reps: input.reps,
            muscle_group: input.muscle_group,
        }
    }

    /// Replace the four mutable fields. The id never changes.
    pub fn apply(&mut self, input: NewExercise) {
        self.exercise_name = input.exercise_name;
        self.weight = input.weight;
        self.reps = input.reps;
        self.muscle_group = input.muscle_group;
    }
}

/// The mutable fields of a record, already validated.
#[derive(Clone, Debug, PartialEq)]
pub struct NewExercise {
    pub exercise_name: String,
    pub weight: f64,
    pub reps: f64,
    pub muscle_group: MuscleGroup,
}

/// A create/update request body before validation.
///
/// `null` and absent fields both decode to `None`. Unknown keys, including
/// any `id` the caller sends, are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDraft {
    #[serde(default)]
    pub exercise_name: Option<Value>,
    #[serde(default)]
    pub weight: Option<Value>,
    #[serde(default)]
    pub reps: Option<Value>,
    #[serde(default)]
    pub muscle_group: Option<Value>,
}

impl ExerciseDraft {
    /// Check every field, collecting all failures rather than stopping at the
    /// first one.
    pub fn validate(self) -> Result<NewExercise, ValidationError> {
        let exercise_name = required_text("exerciseName", self.exercise_name);
        let weight = required_number("weight", self.weight);
        let reps = required_number("reps", self.reps);
        let muscle_group = required_muscle_group(self.muscle_group);

        match (exercise_name, weight, reps, muscle_group) {
            (Ok(exercise_name), Ok(weight), Ok(reps), Ok(muscle_group)) => Ok(NewExercise {
                exercise_name,
                weight,
                reps,
                muscle_group,
            }),
            (exercise_name, weight, reps, muscle_group) => {
                let fields = [
                    exercise_name.err(),
                    weight.err(),
                    reps.err(),
                    muscle_group.err(),
                ]
                .into_iter()
                .flatten()
                .collect();
                Err(ValidationError::Fields(fields))
            }
        }
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldProblem {
    Missing,
    WrongType { expected: &'static str },
    NotAllowed(UnknownMuscleGroup),
}

/// A rejected field and the reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {}", describe(.field, .problem))]
pub struct FieldError {
    pub field: &'static str,
    pub problem: FieldProblem,
}

fn describe(field: &str, problem: &FieldProblem) -> String {
    match problem {
        FieldProblem::Missing => format!("{field} is required"),
        FieldProblem::WrongType { expected } => format!("{field} must be {expected}"),
        FieldProblem::NotAllowed(err) => err.to_string(),
    }
}

/// A request body that cannot become a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more fields failed the schema.
    #[error("exercise validation failed: {}", join_fields(.0))]
    Fields(Vec<FieldError>),

    /// The body was not a decodable JSON object.
    #[error("invalid request body: {0}")]
    Body(String),
}

impl ValidationError {
    /// Names of the rejected fields, in schema order.
    pub fn field_names(&self) -> Vec<&'static str> {
        match self {
            ValidationError::Fields(fields) => fields.iter().map(|f| f.field).collect(),
            ValidationError::Body(_) => Vec::new(),
        }
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn field_error(field: &'static str, problem: FieldProblem) -> FieldError {
    FieldError { field, problem }
}

fn required_text(field: &'static str, value: Option<Value>) -> Result<String, FieldError> {
    match value {
        None => Err(field_error(field, FieldProblem::Missing)),
        Some(Value::String(s)) if s.is_empty() => Err(field_error(field, FieldProblem::Missing)),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(_) => Err(field_error(
            field,
            FieldProblem::WrongType { expected: "a string" },
        )),
    }
}

/// Form inputs post numbers as strings, so numeric strings are accepted.
fn required_number(field: &'static str, value: Option<Value>) -> Result<f64, FieldError> {
    let wrong_type = || field_error(field, FieldProblem::WrongType { expected: "a number" });
    match value {
        None => Err(field_error(field, FieldProblem::Missing)),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(wrong_type),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err(field_error(field, FieldProblem::Missing))
        }
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(wrong_type),
        Some(_) => Err(wrong_type()),
    }
}

fn required_muscle_group(value: Option<Value>) -> Result<MuscleGroup, FieldError> {
    const FIELD: &str = "muscleGroup";
    match value {
        None => Err(field_error(FIELD, FieldProblem::Missing)),
        Some(Value::String(s)) if s.is_empty() => Err(field_error(FIELD, FieldProblem::Missing)),
        Some(Value::String(s)) => s
            .parse()
            .map_err(|err| field_error(FIELD, FieldProblem::NotAllowed(err))),
        Some(_) => Err(field_error(
            FIELD,
            FieldProblem::WrongType { expected: "a string" },
        )),
    }
}
