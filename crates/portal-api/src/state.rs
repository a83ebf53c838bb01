//! Shared application state.

use std::sync::Arc;

use portal_core::clock::Clock;
use portal_core::store::{AllowListStore, RecordStore};

use crate::config::AdminEmails;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock used for every server-assigned timestamp.
    pub clock: Arc<dyn Clock>,
    /// Onboarding record documents.
    pub records: Arc<dyn RecordStore>,
    /// Registration allow-list.
    pub allow_list: Arc<dyn AllowListStore>,
    /// Administrator emails.
    pub admin_emails: Arc<AdminEmails>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        records: Arc<dyn RecordStore>,
        allow_list: Arc<dyn AllowListStore>,
        admin_emails: AdminEmails,
    ) -> Self {
        Self {
            clock,
            records,
            allow_list,
            admin_emails: Arc::new(admin_emails),
        }
    }
}
