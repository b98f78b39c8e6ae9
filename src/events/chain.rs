// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Chained single-channel event, driven through `then`.
//!
//! `EventChain` owns a private dispatcher configured with `chained = true`
//! and `false_break = false`, bound to one internally generated channel
//! name. Despite the `then` method, this is not a future or promise; every
//! `emit` replays the whole handler chain synchronously.

use serde_json::Value;

use crate::errors::EventError;
use crate::events::dispatcher::{DispatcherOptions, EventDispatcher, Handler, HandlerToken};
use crate::events::unique_channel;

/// A single chained event channel.
///
/// Handlers registered with [`then`](EventChain::then) run in registration
/// order; each receives the previous handler's return value as its sole
/// argument, with the first handler seeing the original emit arguments.
///
/// ```rust
/// use canopy::events::{EventChain, Handler};
/// use serde_json::json;
///
/// let mut chain = EventChain::new();
/// chain
///     .then(Handler::new(|_cx, args| {
///         Ok(json!(args[0].as_i64().unwrap() + args[1].as_i64().unwrap()))
///     }))
///     .then(Handler::new(|_cx, args| {
///         assert_eq!(args[0], json!(3));
///         Ok(json!(null))
///     }));
/// chain.emit(&[json!(1), json!(2)]).unwrap();
/// ```
pub struct EventChain {
    dispatcher: EventDispatcher,
    channel: String,
}

impl EventChain {
    /// Chain with no configured handler context.
    pub fn new() -> Self {
        Self::with_context(None)
    }

    /// Chain whose handlers see `context` through their `EmitContext`.
    pub fn with_context(context: Option<Value>) -> Self {
        let options = DispatcherOptions {
            chained: true,
            false_break: false,
            context,
            ..Default::default()
        };
        Self {
            dispatcher: EventDispatcher::with_options(options),
            channel: unique_channel("EventChain"),
        }
    }

    /// Run the chain with `args`.
    pub fn emit(&self, args: &[Value]) -> Result<&Self, EventError> {
        self.dispatcher.emit(&self.channel, args)?;
        Ok(self)
    }

    /// Append `handler` to the chain.
    ///
    /// Registering the same handler (same token) again is a no-op, so
    /// repeated `then` calls carry no side effects.
    pub fn then(&mut self, handler: Handler) -> &mut Self {
        self.dispatcher.on(&self.channel, handler, true);
        self
    }

    /// Remove the handler identified by `token` from the chain.
    pub fn off(&mut self, token: HandlerToken) -> &mut Self {
        self.dispatcher.off(&self.channel, token);
        self
    }
}

impl Default for EventChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_values_flow_through_the_chain() {
        let mut chain = EventChain::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first_seen = Rc::clone(&seen);
        chain.then(Handler::new(move |_cx, args| {
            first_seen.borrow_mut().push(args.to_vec());
            Ok(json!(args[0].as_i64().unwrap() * 3))
        }));

        let second_seen = Rc::clone(&seen);
        chain.then(Handler::new(move |_cx, args| {
            second_seen.borrow_mut().push(args.to_vec());
            // A list return travels as one argument, not several
            Ok(json!([4, 5]))
        }));

        let third_seen = Rc::clone(&seen);
        chain.then(Handler::new(move |_cx, args| {
            third_seen.borrow_mut().push(args.to_vec());
            Ok(Value::Null)
        }));

        chain.emit(&[json!(1), json!(2)]).unwrap();

        let seen = seen.borrow();
        assert_eq!(seen[0], vec![json!(1), json!(2)]);
        assert_eq!(seen[1], vec![json!(3)]);
        assert_eq!(seen[2], vec![json!([4, 5])]);
    }

    #[test]
    fn test_emit_replays_for_each_call() {
        let mut chain = EventChain::new();
        let count = Rc::new(RefCell::new(0));
        let counting = Rc::clone(&count);
        chain.then(Handler::new(move |_cx, _args| {
            *counting.borrow_mut() += 1;
            Ok(Value::Null)
        }));

        chain.emit(&[]).unwrap();
        chain.emit(&[]).unwrap();
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn test_repeated_then_is_a_no_op() {
        let mut chain = EventChain::new();
        let count = Rc::new(RefCell::new(0));
        let counting = Rc::clone(&count);
        let handler = Handler::new(move |_cx, _args| {
            *counting.borrow_mut() += 1;
            Ok(Value::Null)
        });

        chain.then(handler.clone()).then(handler);
        chain.emit(&[]).unwrap();
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_off_detaches_handler() {
        let mut chain = EventChain::new();
        let count = Rc::new(RefCell::new(0));
        let counting = Rc::clone(&count);
        let handler = Handler::new(move |_cx, _args| {
            *counting.borrow_mut() += 1;
            Ok(Value::Null)
        });
        let token = handler.token();

        chain.then(handler);
        chain.emit(&[]).unwrap();
        assert_eq!(*count.borrow(), 1);

        chain.off(token);
        chain.emit(&[]).unwrap();
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_false_return_does_not_interrupt() {
        let mut chain = EventChain::new();
        let reached = Rc::new(RefCell::new(false));
        chain.then(Handler::new(|_cx, _args| Ok(json!(false))));

        let sink = Rc::clone(&reached);
        chain.then(Handler::new(move |_cx, _args| {
            *sink.borrow_mut() = true;
            Ok(Value::Null)
        }));

        chain.emit(&[]).unwrap();
        assert!(*reached.borrow());
    }

    #[test]
    fn test_chains_use_distinct_channels() {
        let a = EventChain::new();
        let b = EventChain::new();
        assert_ne!(a.channel, b.channel);
    }
}
