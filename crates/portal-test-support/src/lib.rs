//! Shared test mocks and utilities for the onboarding portal.

mod allow_list;
mod clock;
mod record_store;

pub use allow_list::{FailingAllowListStore, InMemoryAllowListStore};
pub use clock::{FixedClock, SteppingClock, fixed_now};
pub use record_store::{FailingRecordStore, InMemoryRecordStore};
