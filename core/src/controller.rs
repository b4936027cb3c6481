//! The form/table controller behind the workout log screen.
//!
//! # Design
//! `WorkoutLog` owns the form state and the last list fetched from the
//! server. It never edits that list locally: every successful create,
//! update or delete is followed by a full re-fetch, so what the table shows
//! is always the server's view.
//!
//! Failures never escape as errors. Transport and decode failures are
//! logged and leave the state as it was; the user sees only the alerts
//! named by the constants below.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::client::ExerciseClient;
use crate::error::ApiError;
use crate::form::{Field, FormError, FormState, Mode};
use crate::host::{Prompter, Transport};
use crate::types::ExerciseRecord;
use crate::view::TableView;

pub const MISSING_FIELDS_ALERT: &str = "Please fill in all fields";
pub const SAVE_FAILED_ALERT: &str = "Error saving exercise";
pub const DELETE_CONFIRMATION: &str = "Delete this exercise log?";
pub const NOT_FOUND_ALERT: &str = "Exercise not found";

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(ExerciseRecord),
    Updated(ExerciseRecord),
    /// Accepted by the server, but the reply carried no readable record.
    Saved,
    /// Stopped before any request was sent.
    Rejected,
    /// A request was attempted and did not succeed.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user said no; nothing was sent.
    Declined,
    Deleted,
    NotFound,
    Failed,
}

#[derive(Debug)]
pub struct WorkoutLog<T, P> {
    client: ExerciseClient,
    transport: T,
    prompter: P,
    form: FormState,
    records: Vec<ExerciseRecord>,
}

impl<T: Transport, P: Prompter> WorkoutLog<T, P> {
    /// A controller with an empty form and no records fetched yet.
    pub fn new(client: ExerciseClient, transport: T, prompter: P) -> Self {
        Self {
            client,
            transport,
            prompter,
            form: FormState::default(),
            records: Vec::new(),
        }
    }

    /// Like [`WorkoutLog::new`], followed by the initial fetch.
    pub fn load(client: ExerciseClient, transport: T, prompter: P) -> Self {
        let mut log = Self::new(client, transport, prompter);
        log.refresh();
        log
    }

    pub fn records(&self) -> &[ExerciseRecord] {
        &self.records
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn mode(&self) -> Mode {
        self.form.mode()
    }

    pub fn table(&self) -> TableView {
        TableView::from_records(&self.records)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Target the listed record `id` for update and copy its values into the
    /// form. Returns `false` if no listed record has that id.
    pub fn start_edit(&mut self, id: Uuid) -> bool {
        match self.records.iter().find(|r| r.id == id) {
            Some(record) => {
                self.form = FormState::editing(record);
                true
            }
            None => {
                warn!(%id, "cannot edit a record that is not listed");
                false
            }
        }
    }

    pub fn cancel(&mut self) {
        self.form.reset();
    }

    /// Create (when idle) or update (when editing) from the form.
    pub fn submit(&mut self) -> SubmitOutcome {
        let input = match self.form.to_input() {
            Ok(input) => input,
            Err(FormError::MissingFields) => {
                self.prompter.alert(MISSING_FIELDS_ALERT);
                return SubmitOutcome::Rejected;
            }
            Err(FormError::Invalid(field)) => {
                warn!(field = field.name(), "form value cannot be sent");
                self.prompter.alert(SAVE_FAILED_ALERT);
                return SubmitOutcome::Rejected;
            }
        };

        let mode = self.form.mode();
        let request = match mode {
            Mode::Idle => self.client.build_create_exercise(&input),
            Mode::Editing(id) => self.client.build_update_exercise(id, &input),
        };
        let request = match request {
            Ok(request) => request,
            Err(err) => {
                warn!(error = %err, "error saving exercise");
                return SubmitOutcome::Failed;
            }
        };

        let response = match self.transport.execute(request) {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "error saving exercise");
                return SubmitOutcome::Failed;
            }
        };

        // Any 2xx means the server stored it, readable reply or not.
        let outcome = match self.client.parse_saved_exercise(response) {
            Ok(record) => match mode {
                Mode::Idle => SubmitOutcome::Created(record),
                Mode::Editing(_) => SubmitOutcome::Updated(record),
            },
            Err(ApiError::Deserialization(msg)) => {
                warn!(error = %msg, "unreadable save response");
                SubmitOutcome::Saved
            }
            Err(err) => {
                warn!(error = %err, "server rejected exercise");
                self.prompter.alert(SAVE_FAILED_ALERT);
                return SubmitOutcome::Failed;
            }
        };
        self.form.reset();
        self.refresh();
        outcome
    }

    /// Ask for confirmation, then delete. Unless declined, the list is
    /// re-fetched whatever the server answered.
    pub fn delete(&mut self, id: Uuid) -> DeleteOutcome {
        if !self.prompter.confirm(DELETE_CONFIRMATION) {
            return DeleteOutcome::Declined;
        }

        let request = self.client.build_delete_exercise(id);
        let outcome = match self.transport.execute(request) {
            Ok(response) => match self.client.parse_delete_exercise(response) {
                Ok(message) => {
                    debug!(%id, %message, "exercise deleted");
                    DeleteOutcome::Deleted
                }
                Err(ApiError::NotFound { .. }) => {
                    self.prompter.alert(NOT_FOUND_ALERT);
                    DeleteOutcome::NotFound
                }
                Err(err) => {
                    warn!(error = %err, "error deleting exercise");
                    DeleteOutcome::Failed
                }
            },
            Err(err) => {
                warn!(error = %err, "error deleting exercise");
                DeleteOutcome::Failed
            }
        };

        // Only an edit of a different record survives the delete.
        let reset = match (outcome, self.mode()) {
            (DeleteOutcome::Deleted, Mode::Idle) => true,
            (DeleteOutcome::Deleted | DeleteOutcome::NotFound, Mode::Editing(target)) => {
                target == id
            }
            _ => false,
        };
        if reset {
            self.form.reset();
        }
        self.refresh();
        outcome
    }

    /// Replace the list with the server's. On failure the previous list
    /// stays and `false` is returned.
    pub fn refresh(&mut self) -> bool {
        let request = self.client.build_list_exercises();
        let response = match self.transport.execute(request) {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "error fetching exercises");
                return false;
            }
        };
        match self.client.parse_list_exercises(response) {
            Ok(records) => {
                debug!(count = records.len(), "exercise list refreshed");
                self.records = records;
                true
            }
            Err(err) => {
                warn!(error = %err, "error fetching exercises");
                false
            }
        }
    }
}
