//! Typed event → handler table.
//!
//! A [`HandlerRouter`] is built once at startup and then used as the dispatch
//! callback: it resolves the payload's event name to a [`HookEventName`] and
//! runs the matching handler. Events without a registered handler are a no-op.

use std::collections::HashMap;

use crate::event::HookEventName;
use crate::payload::Payload;

/// A side-effecting handler for one hook event.
pub type Handler = Box<dyn Fn(&Payload) -> anyhow::Result<()> + Send + Sync>;

/// What [`HandlerRouter::route`] did with a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The handler for this event ran to completion.
    Handled(HookEventName),
    /// No handler is registered for the payload's event.
    Unhandled,
}

#[derive(Default)]
pub struct HandlerRouter {
    handlers: HashMap<HookEventName, Handler>,
}

impl HandlerRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `event`, replacing any previous one.
    pub fn on<H>(&mut self, event: HookEventName, handler: H) -> &mut Self
    where
        H: Fn(&Payload) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        if self.handlers.insert(event, Box::new(handler)).is_some() {
            tracing::debug!("replaced handler for {event}");
        }
        self
    }

    pub fn has_handler(&self, event: HookEventName) -> bool {
        self.handlers.contains_key(&event)
    }

    /// Events with a handler, in declaration order.
    pub fn registered_events(&self) -> Vec<HookEventName> {
        HookEventName::ALL
            .into_iter()
            .filter(|event| self.handlers.contains_key(event))
            .collect()
    }

    /// Run the handler for the payload's event. Handler errors propagate.
    pub fn route(&self, payload: &Payload) -> anyhow::Result<RouteOutcome> {
        let Ok(event) = payload.event_name().parse::<HookEventName>() else {
            tracing::debug!("no handler for unknown event '{}'", payload.event_name());
            return Ok(RouteOutcome::Unhandled);
        };

        match self.handlers.get(&event) {
            Some(handler) => {
                handler(payload)?;
                Ok(RouteOutcome::Handled(event))
            }
            None => {
                tracing::debug!("no handler registered for {event}");
                Ok(RouteOutcome::Unhandled)
            }
        }
    }
}

impl std::fmt::Debug for HandlerRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRouter")
            .field("events", &self.registered_events())
            .finish()
    }
}
