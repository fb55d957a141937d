//! Session registry: ownership of all chat sessions and their messages.

pub mod registry;

pub use registry::SessionRegistry;
