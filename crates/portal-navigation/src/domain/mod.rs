//! Domain layer for the Navigation & Rendering context.

pub mod actions;
pub mod route;
pub mod screen;
