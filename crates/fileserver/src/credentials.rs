//! In-memory credential store built from the `user:pass,user2:pass2` setting

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Username installed when no users are configured
pub const DEFAULT_USERNAME: &str = "admin";

/// Password installed when no users are configured
pub const DEFAULT_PASSWORD: &str = "123456";

/// Read-only mapping from username to password
///
/// Built once at startup and shared between request handlers behind an
/// `Arc`. Nothing mutates it after [`CredentialStore::parse`] returns.
///
/// An empty configuration string yields the single account
/// `admin` / `123456`. That account exists so the server is usable out of
/// the box; it is not a secure default and anyone exposing the server should
/// configure their own users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialStore {
    users: HashMap<String, String>,
    fallback: bool,
}

impl CredentialStore {
    /// Parse a comma-separated list of `user:pass` entries
    ///
    /// # Arguments
    /// * `users` - Raw configuration string, e.g. `alice:secret,bob:hunter2`
    ///
    /// # Returns
    /// * `Ok(CredentialStore)` - At least one account
    /// * `Err(Error)` - The offending entry, or [`Error::NoUsers`]
    pub fn parse(users: &str) -> Result<Self> {
        if users.is_empty() {
            return Ok(Self::fallback());
        }

        let mut accounts = HashMap::new();
        for entry in users.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            // Passwords may contain colons, only the first one separates
            let (username, password) = entry
                .split_once(':')
                .ok_or_else(|| Error::MalformedUserEntry(entry.to_string()))?;
            let username = username.trim();
            let password = password.trim();
            if username.is_empty() || password.is_empty() {
                return Err(Error::EmptyUserField(entry.to_string()));
            }

            accounts.insert(username.to_string(), password.to_string());
        }

        if accounts.is_empty() {
            return Err(Error::NoUsers);
        }

        Ok(Self {
            users: accounts,
            fallback: false,
        })
    }

    fn fallback() -> Self {
        let mut users = HashMap::new();
        users.insert(DEFAULT_USERNAME.to_string(), DEFAULT_PASSWORD.to_string());
        Self {
            users,
            fallback: true,
        }
    }

    /// Check a username/password pair with plain, case-sensitive equality
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|expected| expected == password)
    }

    /// Password stored for `username`, if any
    pub fn get(&self, username: &str) -> Option<&str> {
        self.users.get(username).map(String::as_str)
    }

    /// Whether only the built-in fallback account is configured
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Configured usernames in sorted order
    pub fn usernames(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.users.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
