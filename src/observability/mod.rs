// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and operational
//! logging throughout canopy. Message types follow a struct-based pattern
//! with `Display` trait implementation to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Enable future internationalization without code changes
//! * Maintain Single Responsibility Principle (SRP)
//! * Provide consistent, structured logging output
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::events` - channel dispatch lifecycle events
//! * `messages::tree` - tree walk and tree build events
//!
//! # Usage
//!
//! ```rust
//! use canopy::observability::messages::events::ChannelEmitted;
//!
//! let msg = ChannelEmitted {
//!     channel: "user:login",
//!     handler_count: 2,
//! };
//!
//! tracing::debug!("{}", msg);
//! ```

pub mod messages;
