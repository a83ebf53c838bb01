//! Domain layer for the Record & Progression context.

pub mod commands;
pub mod patch;
pub mod progression;
pub mod record;
pub mod seed;
