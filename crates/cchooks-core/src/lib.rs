//! # cchooks-core
//!
//! Validated dispatch of Claude Code hook events.
//!
//! A hook process receives an event name (usually from its command line) and
//! a JSON payload (usually on stdin). [`dispatch`] checks both, makes sure
//! they agree, and hands the payload to a callback:
//!
//! ```text
//! event name ─┐
//! callback ───┼─> validate ─> acquire payload ─> cross-check ─> callback(payload)
//! input ──────┘
//! ```
//!
//! Every failure is a [`HookError`]; a failing callback's own error stays
//! reachable through `std::error::Error::source`.
//!
//! ## Modules
//!
//! - [`event`]: the supported event names
//! - [`validate`]: event name validation
//! - [`payload`]: input acquisition and payload validation
//! - [`callback`]: callback checks and invocation
//! - [`dispatch`]: the pipeline
//! - [`observer`]: stage notifications
//! - [`router`]: typed event → handler table
//! - [`config`]: layered TOML configuration for the hook binary

pub mod callback;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod observer;
pub mod payload;
pub mod router;
pub mod validate;

pub use dispatch::{dispatch, Dispatcher};
pub use error::{BoxError, HookError, HookErrorKind, Result};
pub use event::{supported_event_names, HookEventName};
pub use observer::{DispatchObserver, DispatchStage, NoopObserver, TracingObserver};
pub use payload::{Payload, RawInput, ReadAll};
pub use router::{HandlerRouter, RouteOutcome};
