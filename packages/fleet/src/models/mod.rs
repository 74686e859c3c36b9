//! Data models for the fleet core.

mod availability;
mod user;

pub use availability::{parse_date, AvailabilityKey, AvailabilityStatus, DateError, KEY_SEPARATOR};
pub use user::{Role, User, ADMIN_ID, ADMIN_PASSWORD, ADMIN_USERNAME};
