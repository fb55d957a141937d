//! Request handlers, grouped by the component they mutate or read.

pub mod analytics;
pub mod contact;
pub mod history;
pub mod knowledge;
pub mod message;
