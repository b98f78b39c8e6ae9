// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod cache;      // max-age in-memory cache
pub mod errors;     // error handling
pub mod events;     // named-channel dispatcher + wrappers
pub mod observability;
pub mod tree;       // tree walk/transform engine
