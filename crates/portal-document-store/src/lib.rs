//! `PostgreSQL` adapters for the onboarding portal stores.
//!
//! Records live in one JSONB column per user; writes are merge-patches
//! applied inside a transaction. The allow-list is a plain table keyed by
//! normalized employee id.

pub mod pg_allow_list_store;
pub mod pg_record_store;
pub mod schema;

use portal_core::error::DomainError;

pub(crate) fn infrastructure(e: &sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("database error: {e}"))
}
