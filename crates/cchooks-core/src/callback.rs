use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

use crate::error::{BoxError, HookError, Result};
use crate::payload::Payload;

/// Source error recorded when a callback panics instead of returning `Err`.
#[derive(Debug, Error)]
#[error("callback panicked: {message}")]
pub struct CallbackPanic {
    pub message: String,
}

impl CallbackPanic {
    fn from_panic(panic: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = panic.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = panic.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self { message }
    }
}

/// Confirm a callback was supplied, handing it back for [`invoke`].
pub fn check_invocable<F>(callback: Option<F>) -> Result<F> {
    callback.ok_or_else(|| HookError::callback_not_invocable("none-type"))
}

/// Run `callback` with the payload as its only argument.
///
/// Both `Err` returns and panics become [`HookError::CallbackFailure`]; the
/// original failure is kept as the error's `source()`.
pub fn invoke<F, T, E>(callback: F, payload: Payload) -> Result<T>
where
    F: FnOnce(Payload) -> std::result::Result<T, E>,
    E: Into<BoxError>,
{
    match panic::catch_unwind(AssertUnwindSafe(|| callback(payload))) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(HookError::callback_failed(e.into())),
        Err(panic) => Err(HookError::callback_failed(Box::new(
            CallbackPanic::from_panic(panic),
        ))),
    }
}
