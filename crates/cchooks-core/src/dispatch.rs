//! The dispatch pipeline.
//!
//! ```text
//! validate_event_name -> validate_callback -> acquire_payload -> cross_check -> invoke
//! ```
//!
//! Stages run strictly in order and the first failure ends the call. The
//! callback is checked before any input is read, so a missing callback never
//! consumes the stream.
//!
//! # Example
//!
//! ```rust
//! use cchooks_core::{dispatch, RawInput};
//! use serde_json::json;
//!
//! let input = RawInput::Value(json!({"hook_event_name": "Stop", "session_id": "abc"}));
//! let session = dispatch("Stop", Some(input), Some(|payload: cchooks_core::Payload| {
//!     Ok::<_, anyhow::Error>(payload.get_str("session_id").map(str::to_string))
//! }))
//! .unwrap();
//! assert_eq!(session.as_deref(), Some("abc"));
//! ```

use crate::callback;
use crate::error::{BoxError, HookError, Result};
use crate::observer::{DispatchObserver, DispatchStage, TracingObserver};
use crate::payload::{self, Payload, RawInput};
use crate::validate::validate_event_name;

/// Runs the pipeline and reports each stage to an observer.
///
/// Holds no state besides the observer; one instance can serve any number of
/// calls, from any number of threads if the observer allows it.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher<O = TracingObserver> {
    observer: O,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O: DispatchObserver> Dispatcher<O> {
    pub fn with_observer(observer: O) -> Self {
        Self { observer }
    }

    /// Validate `target`, the callback, and `input`, then call the callback
    /// with the payload and return its result.
    pub fn dispatch<F, T, E>(
        &self,
        target: &str,
        input: Option<RawInput<'_>>,
        callback: Option<F>,
    ) -> Result<T>
    where
        F: FnOnce(Payload) -> std::result::Result<T, E>,
        E: Into<BoxError>,
    {
        self.stage(target, DispatchStage::ValidateEventName, || {
            validate_event_name(target)
        })?;

        let callback = self.stage(target, DispatchStage::ValidateCallback, || {
            callback::check_invocable(callback)
        })?;

        let payload = self.stage(target, DispatchStage::AcquirePayload, || {
            payload::acquire(input)
        })?;

        self.stage(target, DispatchStage::CrossCheck, || {
            let declared = payload.event_name();
            if declared == target {
                Ok(())
            } else {
                Err(HookError::event_mismatch(target, declared))
            }
        })?;

        let result = self.stage(target, DispatchStage::Invoke, || {
            callback::invoke(callback, payload)
        })?;

        self.observer.dispatch_completed(target);
        Ok(result)
    }

    fn stage<R>(
        &self,
        event: &str,
        stage: DispatchStage,
        step: impl FnOnce() -> Result<R>,
    ) -> Result<R> {
        self.observer.stage_entered(event, stage);
        match step() {
            Ok(value) => {
                self.observer.stage_succeeded(event, stage);
                Ok(value)
            }
            Err(e) => {
                self.observer.stage_failed(event, stage, &e);
                Err(e)
            }
        }
    }
}

/// Dispatch with the default [`TracingObserver`].
pub fn dispatch<F, T, E>(target: &str, input: Option<RawInput<'_>>, callback: Option<F>) -> Result<T>
where
    F: FnOnce(Payload) -> std::result::Result<T, E>,
    E: Into<BoxError>,
{
    Dispatcher::new().dispatch(target, input, callback)
}
