//! # Availability ledger
//!
//! [`Ledger`] maps `(driver, date)` to an [`AvailabilityStatus`]. A missing
//! entry means the driver has not said anything about that date yet.
//!
//! Writes are upserts: setting a date again overwrites it (last write wins),
//! and the same date twice in one batch collapses to one entry. A batch is
//! applied in memory first and then persisted as a full snapshot in a single
//! store write.
//!
//! Writes require a signed-in driver [`Session`]. The ledger writes for the
//! session's own driver, so there is no way to set another driver's
//! availability through it.
//!
//! Deleting a driver from the roster does not remove their entries here.
//!
//! If the stored record could not be read or decoded at load, the ledger
//! starts empty and does not write over it. Each write re-reads the record
//! first; once it reads cleanly, the stored entries are merged under the ones
//! set since load and persisting resumes.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use store::KeyValueStore;
use tracing::{debug, info, warn};

use crate::config::FleetConfig;
use crate::error::AvailabilityError;
use crate::models::{AvailabilityKey, AvailabilityStatus};
use crate::session::Session;
use crate::snapshot::{self, Loaded};

pub struct Ledger<S> {
    store: S,
    key: String,
    entries: BTreeMap<AvailabilityKey, AvailabilityStatus>,
    /// False while the stored record has not been read successfully.
    synced: bool,
}

type RawEntries = BTreeMap<String, AvailabilityStatus>;

fn decode_entries(raw: RawEntries) -> BTreeMap<AvailabilityKey, AvailabilityStatus> {
    let mut entries = BTreeMap::new();
    for (storage_key, status) in raw {
        match AvailabilityKey::from_storage_key(&storage_key) {
            Some(k) => {
                entries.insert(k, status);
            }
            None => warn!(key = %storage_key, "skipping malformed availability key"),
        }
    }
    entries
}

impl<S: KeyValueStore> Ledger<S> {
    pub async fn load(store: S, config: &FleetConfig) -> Self {
        let key = config.storage.availability_key.clone();
        let (entries, synced) = match snapshot::load_json::<_, RawEntries>(&store, &key).await {
            Loaded::Found(raw) => (decode_entries(raw), true),
            Loaded::Missing => (BTreeMap::new(), true),
            Loaded::Unreadable | Loaded::Corrupt => (BTreeMap::new(), false),
        };

        Self {
            store,
            key,
            entries,
            synced,
        }
    }

    /// Set `status` on every date for the session's driver and persist.
    ///
    /// Returns the number of distinct dates written.
    pub async fn set_availability<I>(
        &mut self,
        session: &Session,
        dates: I,
        status: AvailabilityStatus,
    ) -> Result<usize, AvailabilityError>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let driver = match session.user() {
            None => return Err(AvailabilityError::NotSignedIn),
            Some(user) if !user.is_driver() => return Err(AvailabilityError::NotADriver),
            Some(user) => user,
        };

        self.refresh().await;
        let mut written = BTreeSet::new();
        for date in dates {
            self.entries
                .insert(AvailabilityKey::new(driver.id.as_str(), date), status);
            written.insert(date);
        }

        if !written.is_empty() {
            debug!(driver_id = %driver.id, %status, count = written.len(), "updated availability");
            self.persist().await;
        }
        Ok(written.len())
    }

    pub fn get_availability(&self, driver_id: &str, date: NaiveDate) -> Option<AvailabilityStatus> {
        self.entries
            .get(&AvailabilityKey::new(driver_id, date))
            .copied()
    }

    /// A driver's entries in date order.
    pub fn entries_for<'a>(
        &'a self,
        driver_id: &str,
    ) -> impl Iterator<Item = (NaiveDate, AvailabilityStatus)> + 'a {
        let range = AvailabilityKey::new(driver_id, NaiveDate::MIN)
            ..=AvailabilityKey::new(driver_id, NaiveDate::MAX);
        self.entries
            .range(range)
            .map(|(key, status)| (key.date, *status))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the stored record has been read since load.
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    async fn refresh(&mut self) {
        if self.synced {
            return;
        }
        match snapshot::load_json::<_, RawEntries>(&self.store, &self.key).await {
            Loaded::Found(raw) => {
                let mut stored = decode_entries(raw);
                stored.append(&mut self.entries);
                self.entries = stored;
                self.synced = true;
                info!(count = self.entries.len(), "availability re-read from storage");
            }
            Loaded::Missing => self.synced = true,
            Loaded::Unreadable | Loaded::Corrupt => {}
        }
    }

    async fn persist(&self) {
        if !self.synced {
            warn!("stored availability not loaded, keeping changes in memory only");
            return;
        }
        let raw: RawEntries = self
            .entries
            .iter()
            .map(|(key, status)| (key.to_storage_key(), *status))
            .collect();
        snapshot::save_json(&self.store, &self.key, &raw).await;
    }
}
