//! Application layer for the Navigation & Rendering context.

pub mod dispatcher;
pub mod screens;
