//! Domain DTOs for the workout log API.
//!
//! # Design
//! These types mirror the server's schema but are defined independently, so
//! the client core does not pull in Axum. The integration tests catch any
//! drift between the two crates.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

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
    /// Options offered by the muscle group selector, in order.
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

    /// Look up a group by its exact (case-sensitive) name.
    pub fn from_name(name: &str) -> Option<Self> {
        MuscleGroup::ALL.into_iter().find(|group| group.as_str() == name)
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single exercise record returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRecord {
    pub id: Uuid,
    pub exercise_name: String,
    pub weight: f64,
    pub reps: f64,
    pub muscle_group: MuscleGroup,
}

/// Request payload for both create and update. Update replaces all four
/// fields, so the same shape serves both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseInput {
    pub exercise_name: String,
    pub weight: f64,
    pub reps: f64,
    pub muscle_group: MuscleGroup,
}

impl From<&ExerciseRecord> for ExerciseInput {
    fn from(record: &ExerciseRecord) -> Self {
        Self {
            exercise_name: record.exercise_name.clone(),
            weight: record.weight,
            reps: record.reps,
            muscle_group: record.muscle_group,
        }
    }
}

/// The `{"message": ...}` body the server sends with errors and delete
/// confirmations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMessage {
    pub message: String,
}
