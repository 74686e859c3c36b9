//! # Roster — identity and driver management
//!
//! [`Roster`] owns the ordered list of registered drivers and the current
//! [`Session`]. The administrator is not part of the roster: it is recognised
//! by its fixed credentials during [`authenticate`](Roster::authenticate).
//!
//! ## Operations
//!
//! | Method | Effect | Persists |
//! |--------|--------|----------|
//! | [`authenticate`](Roster::authenticate) | Admin credentials first, then first driver whose phone or name matches. | session |
//! | [`register`](Roster::register) | Rejects a duplicate phone, appends a new driver, signs them in. | roster, session |
//! | [`delete_driver`](Roster::delete_driver) | Removes a driver by id; no-op when absent. Availability is left untouched. | roster |
//! | [`logout`](Roster::logout) | Clears the session. | session (removed) |
//!
//! ## Startup
//!
//! [`Roster::load`] reads the roster and session records. A missing roster is
//! replaced by the demonstration drivers (unless disabled in config) and written
//! back.
//!
//! When the roster record cannot be read (store failure) or does not decode,
//! the in-memory roster is provisional: the demonstration drivers after a
//! failed read, nothing after a corrupt record. A provisional roster is never
//! written over the stored one. Every operation first re-reads the record;
//! once it reads cleanly, the stored drivers become the base and the
//! registrations and deletions made in the meantime are replayed on top. A
//! corrupt record is left untouched until it is repaired or removed.
//!
//! ## Persistence failures
//!
//! Every write is attempted once, right after the in-memory update. A failed
//! write is logged and the in-memory state stays authoritative for the rest of
//! the process, so the stored copy may lag behind.

use store::KeyValueStore;
use tracing::{info, warn};

use crate::config::{FleetConfig, StorageConfig};
use crate::error::{AuthError, RegisterError};
use crate::models::{User, ADMIN_PASSWORD, ADMIN_USERNAME};
use crate::session::Session;
use crate::snapshot::{self, Loaded};

/// Demonstration drivers seeded into an empty store.
pub fn demo_drivers() -> Vec<User> {
    vec![
        User::driver("d1", "John Doe", "555-0101", Some("123".to_string())),
        User::driver("d2", "Jane Smith", "555-0102", Some("123".to_string())),
    ]
}

/// Changes made while the stored roster could not be read.
#[derive(Debug, Default)]
struct Unsynced {
    added: Vec<User>,
    deleted: Vec<String>,
}

impl Unsynced {
    fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty()
    }

    /// Replay onto a freshly read roster.
    fn apply(self, mut drivers: Vec<User>) -> Vec<User> {
        drivers.retain(|d| !self.deleted.contains(&d.id));
        for driver in self.added {
            if !drivers
                .iter()
                .any(|d| d.id == driver.id || d.phone == driver.phone)
            {
                drivers.push(driver);
            }
        }
        drivers
    }
}

pub struct Roster<S> {
    store: S,
    keys: StorageConfig,
    drivers: Vec<User>,
    session: Session,
    /// `Some` while the in-memory roster is provisional.
    unsynced: Option<Unsynced>,
}

impl<S: KeyValueStore> Roster<S> {
    pub async fn load(store: S, config: &FleetConfig) -> Self {
        let keys = config.storage.clone();
        let seed = || {
            if config.roster.seed_demo_drivers {
                demo_drivers()
            } else {
                Vec::new()
            }
        };

        let (drivers, unsynced) =
            match snapshot::load_json::<_, Vec<User>>(&store, &keys.users_key).await {
                Loaded::Found(drivers) => (drivers, None),
                Loaded::Missing => {
                    let drivers = seed();
                    if !drivers.is_empty() {
                        info!(count = drivers.len(), "seeding demo roster");
                        snapshot::save_json(&store, &keys.users_key, &drivers).await;
                    }
                    (drivers, None)
                }
                Loaded::Unreadable => (seed(), Some(Unsynced::default())),
                Loaded::Corrupt => (Vec::new(), Some(Unsynced::default())),
            };

        let session = Session::load(&store, &keys.session_key).await;

        Self {
            store,
            keys,
            drivers,
            session,
            unsynced,
        }
    }

    /// Sign in as the administrator or a driver.
    ///
    /// The administrator credentials win even if a driver's phone or name is
    /// also the admin username. A driver is matched by phone or name; a
    /// supplied password must match, an omitted one is not checked.
    pub async fn authenticate(
        &mut self,
        identifier: &str,
        password: Option<&str>,
    ) -> Result<User, AuthError> {
        self.refresh().await;
        let user = if identifier == ADMIN_USERNAME && password == Some(ADMIN_PASSWORD) {
            User::admin()
        } else {
            let driver = self
                .drivers
                .iter()
                .find(|d| d.matches_identifier(identifier))
                .ok_or(AuthError::InvalidCredentials)?;
            if !driver.accepts_password(password) {
                return Err(AuthError::InvalidCredentials);
            }
            driver.clone()
        };

        info!(user_id = %user.id, role = ?user.role, "signed in");
        self.start_session(user.clone()).await;
        Ok(user)
    }

    /// Register a new driver and sign them in.
    pub async fn register(
        &mut self,
        name: &str,
        phone: &str,
        password: Option<&str>,
    ) -> Result<User, RegisterError> {
        self.refresh().await;
        if self.drivers.iter().any(|d| d.phone == phone) {
            warn!(phone, "rejected duplicate registration");
            return Err(RegisterError::DuplicatePhone(phone.to_string()));
        }

        let driver = User::driver(
            self.fresh_id(),
            name,
            phone,
            password.map(str::to_string),
        );
        self.drivers.push(driver.clone());
        if let Some(unsynced) = self.unsynced.as_mut() {
            unsynced.added.push(driver.clone());
        }
        self.persist_drivers().await;

        info!(driver_id = %driver.id, "registered driver");
        self.start_session(driver.clone()).await;
        Ok(driver)
    }

    /// Remove a driver. Returns whether one was removed.
    ///
    /// Availability entries of the driver stay in the ledger.
    pub async fn delete_driver(&mut self, id: &str) -> bool {
        self.refresh().await;
        let before = self.drivers.len();
        self.drivers.retain(|d| d.id != id);
        let removed = self.drivers.len() != before;
        if removed {
            info!(driver_id = id, "deleted driver");
        }
        if let Some(unsynced) = self.unsynced.as_mut() {
            unsynced.added.retain(|d| d.id != id);
            unsynced.deleted.push(id.to_string());
        }
        self.persist_drivers().await;
        removed
    }

    pub async fn logout(&mut self) {
        if let Some(user) = self.session.user() {
            info!(user_id = %user.id, "signed out");
        }
        self.session = Session::anonymous();
        self.session.persist(&self.store, &self.keys.session_key).await;
    }

    /// Registered drivers in registration order. Never includes the admin.
    pub fn drivers(&self) -> &[User] {
        &self.drivers
    }

    pub fn find_driver(&self, id: &str) -> Option<&User> {
        self.drivers.iter().find(|d| d.id == id)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.user()
    }

    async fn start_session(&mut self, user: User) {
        self.session = Session::authenticated(user);
        self.session.persist(&self.store, &self.keys.session_key).await;
    }

    /// Whether the in-memory roster reflects the stored record.
    pub fn is_synced(&self) -> bool {
        self.unsynced.is_none()
    }

    /// Re-read a provisional roster. On success the stored drivers replace
    /// the provisional ones and pending changes are replayed and written.
    async fn refresh(&mut self) {
        let Some(unsynced) = self.unsynced.take() else {
            return;
        };
        match snapshot::load_json::<_, Vec<User>>(&self.store, &self.keys.users_key).await {
            Loaded::Found(stored) => {
                let dirty = !unsynced.is_empty();
                self.drivers = unsynced.apply(stored);
                info!(count = self.drivers.len(), "roster re-read from storage");
                if dirty {
                    self.persist_drivers().await;
                }
            }
            Loaded::Missing => {
                info!("no stored roster, keeping in-memory roster");
                self.persist_drivers().await;
            }
            Loaded::Unreadable | Loaded::Corrupt => self.unsynced = Some(unsynced),
        }
    }

    async fn persist_drivers(&self) {
        if self.unsynced.is_some() {
            warn!("stored roster not loaded, keeping changes in memory only");
            return;
        }
        snapshot::save_json(&self.store, &self.keys.users_key, &self.drivers).await;
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = uuid::Uuid::new_v4().to_string();
            if self.find_driver(&id).is_none() {
                return id;
            }
        }
    }
}
