//! Authentication of FTP users.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// The error returned when a login attempt is refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("unknown user")]
    BadUser,
    #[error("bad password")]
    BadPassword,
}

/// Interface for username/password authentication.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Authenticate the given user with the given password.
    async fn authenticate(&self, username: &str, password: &str) -> Result<(), AuthenticationError>;
}

/// [`Authenticator`] backed by the credentials from the users file, plus
/// the two anonymous logins `anonymous` and `ftp`, which accept any
/// password containing an `@` (by convention an email address).
#[derive(Debug)]
pub struct UsersAuthenticator {
    users: HashMap<String, String>,
}

impl UsersAuthenticator {
    pub fn new(users: HashMap<String, String>) -> Self {
        UsersAuthenticator { users }
    }
}

#[async_trait]
impl Authenticator for UsersAuthenticator {
    async fn authenticate(&self, username: &str, password: &str) -> Result<(), AuthenticationError> {
        if username == "anonymous" || username == "ftp" {
            return if password.contains('@') {
                Ok(())
            } else {
                Err(AuthenticationError::BadPassword)
            };
        }
        match self.users.get(username) {
            None => Err(AuthenticationError::BadUser),
            Some(expected) if expected == password => Ok(()),
            Some(_) => Err(AuthenticationError::BadPassword),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> UsersAuthenticator {
        let mut users = HashMap::new();
        users.insert("alice".to_string(), "secret".to_string());
        UsersAuthenticator::new(users)
    }

    #[tokio::test]
    async fn anonymous_needs_an_at_sign() {
        let auth = authenticator();
        assert_eq!(auth.authenticate("anonymous", "foo@bar").await, Ok(()));
        assert_eq!(auth.authenticate("ftp", "me@").await, Ok(()));
        assert_eq!(
            auth.authenticate("anonymous", "nope").await,
            Err(AuthenticationError::BadPassword)
        );
    }

    #[tokio::test]
    async fn configured_users_match_exactly() {
        let auth = authenticator();
        assert_eq!(auth.authenticate("alice", "secret").await, Ok(()));
        assert_eq!(
            auth.authenticate("alice", "Secret").await,
            Err(AuthenticationError::BadPassword)
        );
        assert_eq!(
            auth.authenticate("mallory", "secret").await,
            Err(AuthenticationError::BadUser)
        );
    }
}
