//! Application layer for the Record & Progression context.

pub mod command_handlers;
pub mod context;
pub mod query_handlers;
