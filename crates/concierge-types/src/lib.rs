//! Shared domain types for Concierge.
//!
//! This crate contains the core domain types used across the Concierge
//! backend: chat sessions and messages, visitor contact records, the
//! knowledge profile behind the system prompt, analytics snapshots, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod analytics;
pub mod chat;
pub mod contact;
pub mod error;
pub mod gateway;
pub mod knowledge;
