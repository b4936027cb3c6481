//! Display text for the record table. Layout and styling belong to the host.

use uuid::Uuid;

use crate::types::ExerciseRecord;

pub const TABLE_HEADERS: [&str; 5] = ["Exercise", "Weight", "Reps", "Muscle Group", "Actions"];

/// Shown in place of rows when nothing has been logged.
pub const EMPTY_TABLE_MESSAGE: &str = "No exercises logged yet.";

/// One rendered table row. `id` is what the row's Edit and Delete actions
/// act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: Uuid,
    pub exercise_name: String,
    pub weight: String,
    pub reps: String,
    pub muscle_group: &'static str,
}

impl From<&ExerciseRecord> for TableRow {
    fn from(record: &ExerciseRecord) -> Self {
        Self {
            id: record.id,
            exercise_name: record.exercise_name.clone(),
            // f64's Display already drops a trailing ".0".
            weight: record.weight.to_string(),
            reps: record.reps.to_string(),
            muscle_group: record.muscle_group.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableView {
    Empty(&'static str),
    Rows(Vec<TableRow>),
}

impl TableView {
    pub fn from_records(records: &[ExerciseRecord]) -> Self {
        if records.is_empty() {
            TableView::Empty(EMPTY_TABLE_MESSAGE)
        } else {
            TableView::Rows(records.iter().map(TableRow::from).collect())
        }
    }
}
