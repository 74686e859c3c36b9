//! # Fleet crate — driver availability core
//!
//! Drivers mark calendar dates as available or unavailable; a fleet
//! administrator reviews availability per date and manages the driver roster.
//! This crate is the data model and its access/update contract. Rendering,
//! routing and forms live in whatever presentation layer embeds it.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | `User`/`Role`, `AvailabilityStatus`, the structured `AvailabilityKey`, date parsing |
//! | [`roster`] | Identity and roster management: sign-in, registration, deletion, logout |
//! | [`session`] | The current authenticated actor, persisted across restarts |
//! | [`ledger`] | `(driver, date) → status` with batch upsert and point lookup |
//! | [`report`] | Available / unavailable / pending drivers for one date |
//! | [`context`] | [`FleetContext`], the single object a presentation layer talks to |
//! | [`config`] | `fleet.toml`: storage keys and seeding |
//! | [`platform`] | Default store for the target: files on native, IndexedDB on web |
//! | [`error`] | Errors returned to callers |
//!
//! ## Persistence
//!
//! State lives in three independent JSON records of an injected
//! [`store::KeyValueStore`]:
//!
//! | Default key | Value |
//! |-------------|-------|
//! | `APP_USERS_V1` | array of drivers |
//! | `APP_AVAILABILITY_V1` | object `"{driver_id}_{YYYY-MM-DD}" → "AVAILABLE" \| "UNAVAILABLE"` |
//! | `APP_CURRENT_USER_V1` | the signed-in user, absent when anonymous |
//!
//! Store failures are logged through `tracing` and never returned; the
//! in-memory state stays authoritative for the life of the process.

pub mod config;
pub mod context;
pub mod error;
pub mod ledger;
pub mod models;
pub mod platform;
pub mod report;
pub mod roster;
pub mod session;

mod snapshot;

pub use config::{ConfigError, FleetConfig};
pub use context::FleetContext;
pub use error::{AuthError, AvailabilityError, RegisterError};
pub use ledger::Ledger;
pub use models::{parse_date, AvailabilityKey, AvailabilityStatus, DateError, Role, User};
pub use platform::make_store;
pub use report::DailyReport;
pub use roster::Roster;
pub use session::Session;

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use store::IdbStore;
