//! Domain layer for the Administration context.

pub mod commands;
