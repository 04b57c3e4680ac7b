use crate::error::HookError;

/// Pipeline stages, in the order a dispatch runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchStage {
    ValidateEventName,
    ValidateCallback,
    AcquirePayload,
    CrossCheck,
    Invoke,
}

impl DispatchStage {
    pub const ALL: [DispatchStage; 5] = [
        Self::ValidateEventName,
        Self::ValidateCallback,
        Self::AcquirePayload,
        Self::CrossCheck,
        Self::Invoke,
    ];
}

impl std::fmt::Display for DispatchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidateEventName => write!(f, "validate_event_name"),
            Self::ValidateCallback => write!(f, "validate_callback"),
            Self::AcquirePayload => write!(f, "acquire_payload"),
            Self::CrossCheck => write!(f, "cross_check"),
            Self::Invoke => write!(f, "invoke"),
        }
    }
}

/// Receives lifecycle notifications from a [`Dispatcher`](crate::dispatch::Dispatcher).
///
/// `event` is the requested event name exactly as the caller passed it, so
/// observers also see names that later fail validation.
pub trait DispatchObserver {
    fn stage_entered(&self, _event: &str, _stage: DispatchStage) {}
    fn stage_succeeded(&self, _event: &str, _stage: DispatchStage) {}
    fn stage_failed(&self, _event: &str, _stage: DispatchStage, _error: &HookError) {}
    fn dispatch_completed(&self, _event: &str) {}
}

impl<O: DispatchObserver + ?Sized> DispatchObserver for &O {
    fn stage_entered(&self, event: &str, stage: DispatchStage) {
        (**self).stage_entered(event, stage)
    }

    fn stage_succeeded(&self, event: &str, stage: DispatchStage) {
        (**self).stage_succeeded(event, stage)
    }

    fn stage_failed(&self, event: &str, stage: DispatchStage, error: &HookError) {
        (**self).stage_failed(event, stage, error)
    }

    fn dispatch_completed(&self, event: &str) {
        (**self).dispatch_completed(event)
    }
}

/// Default observer: reports stages through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DispatchObserver for TracingObserver {
    fn stage_entered(&self, event: &str, stage: DispatchStage) {
        tracing::debug!(event, %stage, "stage entered");
    }

    fn stage_succeeded(&self, event: &str, stage: DispatchStage) {
        tracing::debug!(event, %stage, "stage succeeded");
    }

    fn stage_failed(&self, event: &str, stage: DispatchStage, error: &HookError) {
        tracing::warn!(event, %stage, error = %error, "hook dispatch failed");
    }

    fn dispatch_completed(&self, event: &str) {
        tracing::info!(event, "hook dispatch completed");
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl DispatchObserver for NoopObserver {}
