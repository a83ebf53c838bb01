//! Onboarding Portal: Record & Progression context.
//!
//! Owns the typed onboarding record, the stage/step progression rules, the
//! typed record patches and the save-then-reload cycle every mutation goes
//! through.

pub mod application;
pub mod domain;
