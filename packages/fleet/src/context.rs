//! # FleetContext — the core's in-process API
//!
//! One [`FleetContext`] per running instance replaces any global state: the
//! presentation layer builds it once at startup with [`FleetContext::load`] and
//! passes it to whatever screen or handler needs it.
//!
//! It composes a [`Roster`] (drivers and session) and a [`Ledger`]
//! (availability) over clones of one store handle. The two are persisted
//! independently: a crash between a roster write and a ledger write can leave
//! the stored copies out of step, which this system accepts.
//!
//! ## Operations
//!
//! | Method | Notes |
//! |--------|-------|
//! | [`authenticate`](FleetContext::authenticate) | Admin or driver sign-in. |
//! | [`register`](FleetContext::register) | New driver, signed in on success. |
//! | [`delete_driver`](FleetContext::delete_driver) | Roster only; availability entries are kept. |
//! | [`logout`](FleetContext::logout) | Ends the session. |
//! | [`set_availability`](FleetContext::set_availability) | For the signed-in driver only. |
//! | [`get_availability`](FleetContext::get_availability) | Point lookup, `None` when unset. |
//! | [`list_drivers`](FleetContext::list_drivers) | Roster snapshot, admin excluded. |
//! | [`daily_report`](FleetContext::daily_report) | Available / unavailable / pending drivers for a date. |
//!
//! Admin-only operations are not gated here. Screens decide what to offer
//! based on [`current_user`](FleetContext::current_user).
//!
//! Only one instance should write to a given store. Two instances on the same
//! store overwrite each other's snapshots (last writer wins).

use chrono::NaiveDate;
use store::KeyValueStore;

use crate::config::FleetConfig;
use crate::error::{AuthError, AvailabilityError, RegisterError};
use crate::ledger::Ledger;
use crate::models::{AvailabilityStatus, User};
use crate::report::DailyReport;
use crate::roster::Roster;
use crate::session::Session;

pub struct FleetContext<S> {
    roster: Roster<S>,
    ledger: Ledger<S>,
}

impl<S: KeyValueStore + Clone> FleetContext<S> {
    /// Load roster, availability and session from the store.
    pub async fn load(store: S, config: &FleetConfig) -> Self {
        let roster = Roster::load(store.clone(), config).await;
        let ledger = Ledger::load(store, config).await;
        Self { roster, ledger }
    }

    pub async fn authenticate(
        &mut self,
        identifier: &str,
        password: Option<&str>,
    ) -> Result<User, AuthError> {
        self.roster.authenticate(identifier, password).await
    }

    pub async fn register(
        &mut self,
        name: &str,
        phone: &str,
        password: Option<&str>,
    ) -> Result<User, RegisterError> {
        self.roster.register(name, phone, password).await
    }

    pub async fn delete_driver(&mut self, id: &str) -> bool {
        self.roster.delete_driver(id).await
    }

    pub async fn logout(&mut self) {
        self.roster.logout().await;
    }

    /// Mark dates for the signed-in driver.
    pub async fn set_availability<I>(
        &mut self,
        dates: I,
        status: AvailabilityStatus,
    ) -> Result<usize, AvailabilityError>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        self.ledger
            .set_availability(self.roster.session(), dates, status)
            .await
    }

    pub fn get_availability(&self, driver_id: &str, date: NaiveDate) -> Option<AvailabilityStatus> {
        self.ledger.get_availability(driver_id, date)
    }

    pub fn list_drivers(&self) -> &[User] {
        self.roster.drivers()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.roster.current_user()
    }

    pub fn session(&self) -> &Session {
        self.roster.session()
    }

    pub fn daily_report(&self, date: NaiveDate) -> DailyReport {
        DailyReport::build(date, self.roster.drivers(), |id, day| {
            self.ledger.get_availability(id, day)
        })
    }

    pub fn roster(&self) -> &Roster<S> {
        &self.roster
    }

    pub fn ledger(&self) -> &Ledger<S> {
        &self.ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_date;
    use crate::models::AvailabilityStatus::{Available, Unavailable};
    use store::{FileStore, MemoryStore};

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    async fn fresh() -> (MemoryStore, FleetContext<MemoryStore>) {
        let store = MemoryStore::new();
        let ctx = FleetContext::load(store.clone(), &FleetConfig::default()).await;
        (store, ctx)
    }

    #[tokio::test]
    async fn test_end_to_end_daily_report() {
        let (_store, mut ctx) = fresh().await;

        let alice = ctx.register("Alice", "555-1111", Some("pw")).await.unwrap();
        let n = ctx
            .set_availability([date("2025-03-01"), date("2025-03-02")], Available)
            .await
            .unwrap();
        assert_eq!(n, 2);

        ctx.logout().await;
        let admin = ctx
            .authenticate("Paramathma", Some("Paramathma"))
            .await
            .unwrap();
        assert!(admin.is_admin());

        let report = ctx.daily_report(date("2025-03-01"));
        assert_eq!(report.available, vec![alice.clone()]);
        assert!(report.unavailable.is_empty());
        // The seeded drivers have no entries and are pending; Alice is not
        assert_eq!(report.pending_count(), 2);
        assert!(report.pending.iter().all(|d| d.id != alice.id));
        assert!(report.pending.iter().any(|d| d.id == "d1"));

        let other_day = ctx.daily_report(date("2025-03-03"));
        assert!(other_day.pending.contains(&alice));
    }

    #[tokio::test]
    async fn test_set_availability_for_current_driver_only() {
        let (_store, mut ctx) = fresh().await;

        assert_eq!(
            ctx.set_availability([date("2025-03-01")], Available).await,
            Err(AvailabilityError::NotSignedIn)
        );

        ctx.authenticate("555-0101", Some("123")).await.unwrap();
        ctx.set_availability([date("2025-03-01")], Unavailable)
            .await
            .unwrap();
        assert_eq!(ctx.get_availability("d1", date("2025-03-01")), Some(Unavailable));
        assert_eq!(ctx.get_availability("d2", date("2025-03-01")), None);

        ctx.authenticate("Paramathma", Some("Paramathma"))
            .await
            .unwrap();
        assert_eq!(
            ctx.set_availability([date("2025-03-02")], Available).await,
            Err(AvailabilityError::NotADriver)
        );
    }

    #[tokio::test]
    async fn test_unset_for_fresh_driver() {
        let (_store, mut ctx) = fresh().await;
        let bob = ctx.register("Bob", "555-2222", None).await.unwrap();
        assert_eq!(ctx.get_availability(&bob.id, date("2030-01-01")), None);
    }

    #[tokio::test]
    async fn test_delete_driver_orphans_availability() {
        let (_store, mut ctx) = fresh().await;
        let day = date("2025-03-01");

        let carol = ctx.register("Carol", "555-3333", None).await.unwrap();
        ctx.set_availability([day], Available).await.unwrap();

        ctx.authenticate("Paramathma", Some("Paramathma"))
            .await
            .unwrap();
        assert!(ctx.delete_driver(&carol.id).await);
        assert!(ctx.list_drivers().iter().all(|d| d.id != carol.id));

        // The entry survives the driver
        assert_eq!(ctx.get_availability(&carol.id, day), Some(Available));
        // but no longer shows up in reports
        assert_eq!(ctx.daily_report(day).available_count(), 0);
    }

    #[tokio::test]
    async fn test_restart_restores_everything() {
        let (store, mut ctx) = fresh().await;
        let dave = ctx.register("Dave", "555-4444", Some("pw")).await.unwrap();
        ctx.set_availability([date("2025-04-01")], Unavailable)
            .await
            .unwrap();
        drop(ctx);

        let ctx = FleetContext::load(store, &FleetConfig::default()).await;
        assert_eq!(ctx.current_user(), Some(&dave));
        assert_eq!(ctx.list_drivers().len(), 3);
        assert_eq!(
            ctx.get_availability(&dave.id, date("2025-04-01")),
            Some(Unavailable)
        );
    }

    #[tokio::test]
    async fn test_storage_outage_is_silent() {
        let store = MemoryStore::failing();
        let mut ctx = FleetContext::load(store.clone(), &FleetConfig::default()).await;

        let erin = ctx.register("Erin", "555-5555", None).await.unwrap();
        ctx.set_availability([date("2025-05-01")], Available)
            .await
            .unwrap();
        assert_eq!(ctx.get_availability(&erin.id, date("2025-05-01")), Some(Available));
        ctx.logout().await;
        assert!(ctx.current_user().is_none());

        // Nothing reached the store
        store.set_failing(false);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_file_store_backed_context() {
        let dir = tempfile::tempdir().unwrap();
        let config = FleetConfig::default().with_demo_seed(false);

        let mut ctx = FleetContext::load(FileStore::new(dir.path().to_path_buf()), &config).await;
        assert!(ctx.list_drivers().is_empty());
        let frank = ctx.register("Frank", "555-6666", None).await.unwrap();
        ctx.set_availability([date("2025-06-01")], Available)
            .await
            .unwrap();

        let ctx = FleetContext::load(FileStore::new(dir.path().to_path_buf()), &config).await;
        assert_eq!(ctx.list_drivers(), &[frank.clone()]);
        assert_eq!(ctx.current_user(), Some(&frank));
        assert_eq!(
            ctx.get_availability(&frank.id, date("2025-06-01")),
            Some(Available)
        );
    }
}
