//! Application layer for the Administration context.

pub mod command_handlers;
pub mod query_handlers;
