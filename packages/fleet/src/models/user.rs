//! # User model for drivers and the administrator
//!
//! A [`User`] is either a registered driver (stored in the roster) or the single
//! built-in administrator (never stored in the roster). The JSON shape matches
//! what is persisted under the roster and session keys:
//!
//! ```json
//! { "id": "d1", "name": "John Doe", "phone": "555-0101", "password": "123", "role": "DRIVER" }
//! ```
//!
//! - `phone` doubles as the driver's login identifier and is unique in the roster.
//! - `password` is optional plaintext, compared verbatim. No hashing is applied,
//!   so previously stored credentials keep working unchanged.
//! - `role` never changes after creation.
//!
//! The administrator's credentials are the constants [`ADMIN_USERNAME`] and
//! [`ADMIN_PASSWORD`], not roster state.

use serde::{Deserialize, Serialize};

/// Fixed id of the administrator identity.
pub const ADMIN_ID: &str = "admin-001";
/// Login identifier of the administrator.
pub const ADMIN_USERNAME: &str = "Paramathma";
/// Password of the administrator.
pub const ADMIN_PASSWORD: &str = "Paramathma";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Driver,
    Admin,
}

/// A driver or the administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Role,
}

impl User {
    /// The built-in administrator identity.
    pub fn admin() -> Self {
        Self {
            id: ADMIN_ID.to_string(),
            name: ADMIN_USERNAME.to_string(),
            phone: ADMIN_USERNAME.to_string(),
            password: None,
            role: Role::Admin,
        }
    }

    pub fn driver(
        id: impl Into<String>,
        name: impl Into<String>,
        phone: impl Into<String>,
        password: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone: phone.into(),
            password,
            role: Role::Driver,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_driver(&self) -> bool {
        self.role == Role::Driver
    }

    /// Whether a login identifier refers to this user: the phone, or the
    /// display name as a convenience.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        self.phone == identifier || self.name == identifier
    }

    /// Whether a login attempt's password is acceptable. A missing or empty
    /// password is accepted; any other must equal the stored one exactly.
    pub fn accepts_password(&self, password: Option<&str>) -> bool {
        match password {
            None | Some("") => true,
            Some(given) => self.password.as_deref() == Some(given),
        }
    }
}
