//! Client core for the workout log.
//!
//! # Overview
//! Two layers, neither of which touches the network:
//! - [`ExerciseClient`] builds `HttpRequest` values and parses
//!   `HttpResponse` values for the four API operations.
//! - [`WorkoutLog`] is the form/table controller. It drives a host-supplied
//!   [`Transport`] and [`Prompter`], and re-fetches the whole list after
//!   every mutation.
//!
//! # Design
//! - DTOs are defined independently from the server crate; integration
//!   tests catch schema drift.
//! - Failures are logged with `tracing`; installing a subscriber is the
//!   host's job.

pub mod client;
pub mod controller;
pub mod error;
pub mod form;
pub mod host;
pub mod http;
pub mod types;
pub mod view;

pub use client::{ExerciseClient, DEFAULT_BASE_URL};
pub use controller::{DeleteOutcome, SubmitOutcome, WorkoutLog};
pub use error::{ApiError, TransportError};
pub use form::{Field, FormError, FormState, Mode};
pub use host::{Prompter, Transport};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{ExerciseInput, ExerciseRecord, MuscleGroup, ServerMessage};
pub use view::{TableRow, TableView};
