//! # Session — the currently authenticated actor
//!
//! ```text
//! ANONYMOUS ──login/register──▶ AUTHENTICATED(user) ──logout──▶ ANONYMOUS
//! ```
//!
//! There is at most one session per running instance. It is persisted under
//! the session key so a restart restores it, and it never expires.
//!
//! Only [`crate::Roster`] can move a session into the authenticated state, so
//! holding a `&Session` is holding a verified identity. The availability ledger
//! relies on this: it takes the session, not a bare driver id.

use store::KeyValueStore;
use tracing::debug;

use crate::models::User;
use crate::snapshot::{self, Loaded};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub(crate) fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The signed-in driver, if the actor is a driver.
    pub fn driver(&self) -> Option<&User> {
        self.user.as_ref().filter(|u| u.is_driver())
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    /// Restore the persisted session; anything unreadable means anonymous.
    pub(crate) async fn load<S: KeyValueStore>(store: &S, key: &str) -> Self {
        match snapshot::load_json::<_, User>(store, key).await {
            Loaded::Found(user) => {
                debug!(user_id = %user.id, "restored session");
                Self::authenticated(user)
            }
            _ => Self::anonymous(),
        }
    }

    /// Write the session record, or remove it when anonymous.
    pub(crate) async fn persist<S: KeyValueStore>(&self, store: &S, key: &str) {
        match &self.user {
            Some(user) => {
                snapshot::save_json(store, key, user).await;
            }
            None => {
                snapshot::remove(store, key).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryStore;

    const KEY: &str = "APP_CURRENT_USER_V1";

    #[test]
    fn test_roles() {
        let anon = Session::anonymous();
        assert!(!anon.is_authenticated());
        assert!(anon.driver().is_none());

        let admin = Session::authenticated(User::admin());
        assert!(admin.is_admin());
        assert!(admin.driver().is_none());

        let driver = Session::authenticated(User::driver("d1", "John", "555", None));
        assert!(!driver.is_admin());
        assert_eq!(driver.driver().map(|u| u.id.as_str()), Some("d1"));
    }

    #[tokio::test]
    async fn test_persist_and_restore() {
        let store = MemoryStore::new();
        assert_eq!(Session::load(&store, KEY).await, Session::anonymous());

        let session = Session::authenticated(User::driver("d1", "John", "555", None));
        session.persist(&store, KEY).await;
        assert_eq!(Session::load(&store, KEY).await, session);

        Session::anonymous().persist(&store, KEY).await;
        assert!(store.get(KEY).await.unwrap().is_none());
        assert_eq!(Session::load(&store, KEY).await, Session::anonymous());
    }

    #[tokio::test]
    async fn test_corrupt_session_is_anonymous() {
        let store = MemoryStore::new();
        store.set(KEY, "\"just a string\"").await.unwrap();
        assert_eq!(Session::load(&store, KEY).await, Session::anonymous());
    }
}
