//! What the embedding program provides to the form controller.
//!
//! The controller never performs I/O or draws dialogs itself. A host supplies
//! a [`Transport`] that executes requests and a [`Prompter`] that shows
//! alerts and confirmation dialogs.

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP round-trip.
///
/// Non-2xx statuses are ordinary responses, not errors. Return `Err` only
/// when no response was received at all.
pub trait Transport {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// User-facing dialogs.
pub trait Prompter {
    /// Show a message the user must acknowledge.
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question. `true` means the user confirmed.
    fn confirm(&mut self, message: &str) -> bool;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn alert(&mut self, message: &str) {
        (**self).alert(message);
    }

    fn confirm(&mut self, message: &str) -> bool {
        (**self).confirm(message)
    }
}
