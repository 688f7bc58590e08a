//! In-memory user directory.
//!
//! Credentials are plaintext strings compared in memory. This is a
//! demo login flow, not a security boundary.

use crate::error::{DeskError, DeskResult};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: HashMap<String, String>,
}

impl UserDirectory {
    /// Directory seeded with the default demo account.
    pub fn new() -> Self {
        let mut users = HashMap::new();
        users.insert("admin".to_string(), "admin".to_string());
        Self { users }
    }

    pub fn check(&self, username: &str, password: &str) -> bool {
        self.users.get(username).is_some_and(|p| p == password)
    }

    pub fn register(&mut self, username: &str, password: &str) -> DeskResult<()> {
        if username.is_empty() || password.is_empty() {
            return Err(DeskError::BlankCredentials);
        }
        if self.users.contains_key(username) {
            return Err(DeskError::UserExists { name: username.to_string() });
        }
        self.users.insert(username.to_string(), password.to_string());
        Ok(())
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}
