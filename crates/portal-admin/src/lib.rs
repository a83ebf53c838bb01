//! Onboarding Portal: Administration context.
//!
//! Employee lookup by normalized employee id, appointment edits and the
//! registration allow-list. Callers must establish administrator privilege
//! before invoking any handler here, except the registration check.

pub mod application;
pub mod domain;
