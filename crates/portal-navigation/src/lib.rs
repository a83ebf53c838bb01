//! Onboarding Portal: Navigation & Rendering context.
//!
//! Maps a navigation token to one of ten screens, renders the screen from
//! the current record snapshot, and applies screen actions through the
//! save-then-reload cycle before rendering again.

pub mod application;
pub mod domain;
