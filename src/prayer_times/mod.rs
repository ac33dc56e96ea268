pub mod api;
pub mod countdown;
pub mod provider;

pub use api::{AladhanClient, FetchError, ScheduleSource};
pub use countdown::{compute_next_prayer, derive_background, should_alert, Background, NextPrayer};
pub use provider::{ApplyOutcome, ScheduleProvider};
