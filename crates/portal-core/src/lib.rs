//! Onboarding Portal Core: shared domain abstractions.
//!
//! This crate defines the traits and types that every portal context depends
//! on: the clock, the command marker, the error taxonomy, the employee
//! identifier, the JSON merge-patch primitive and the document store seams.
//! It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod employee_id;
pub mod error;
pub mod patch;
pub mod store;
