//! Session/state management components and the ports they persist through.
//!
//! This crate owns every structure with real invariants: the session
//! registry, the contact directory, the knowledge base, and the usage
//! counters. Persistence and the completion gateway are ports (traits)
//! implemented in `concierge-infra` -- this crate never touches a file or a
//! network socket.

pub mod analytics;
pub mod contact;
pub mod gateway;
pub mod knowledge;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod testutil;
