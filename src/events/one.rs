// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! One-shot single-argument event.
//!
//! `EventOne` is the smallest wrapper over the dispatcher: one private
//! channel, exactly one value per emit, no chaining, no short-circuiting.
//! Every registered handler sees the same value independently. As with
//! [`EventChain`](crate::events::EventChain), `then` does not make this a
//! promise.

use serde_json::Value;

use crate::errors::EventError;
use crate::events::dispatcher::{DispatcherOptions, EventDispatcher, Handler, HandlerToken};
use crate::events::unique_channel;

/// Single-channel, single-value event.
pub struct EventOne {
    dispatcher: EventDispatcher,
    channel: String,
}

impl EventOne {
    pub fn new() -> Self {
        let options = DispatcherOptions {
            false_break: false,
            ..Default::default()
        };
        Self {
            dispatcher: EventDispatcher::with_options(options),
            channel: unique_channel("EventOne"),
        }
    }

    /// Deliver `value` to every registered handler.
    pub fn emit(&self, value: Value) -> Result<&Self, EventError> {
        self.dispatcher.emit(&self.channel, &[value])?;
        Ok(self)
    }

    /// Register `handler`. Registering the same handler again is a no-op.
    pub fn then(&mut self, handler: Handler) -> &mut Self {
        self.dispatcher.on(&self.channel, handler, true);
        self
    }

    /// Remove the handler identified by `token`.
    pub fn off(&mut self, token: HandlerToken) -> &mut Self {
        self.dispatcher.off(&self.channel, token);
        self
    }
}

impl Default for EventOne {
    fn default() -> Self {
        Self::new()
    }
}
