use crate::logger;
use crate::models::User;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub fn default_session_path() -> PathBuf {
    crate::utils::data_dir().join("auth-storage.json")
}

/// Persisted fields of the session blob. Kept separate from [`AuthSession`]
/// so the storage path never ends up inside the file itself.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionBlob {
    token: Option<String>,
    expires_at: Option<String>,
    user: Option<User>,
}

/// The authenticated session: token, expiry, and user profile.
///
/// Every mutation is written back to the blob file immediately, so the
/// session survives restarts. There is no refresh-token flow; an expired
/// token simply makes the next authenticated request fail.
#[derive(Debug)]
pub struct AuthSession {
    token: Option<String>,
    expires_at: Option<String>,
    user: Option<User>,
    path: PathBuf,
}

impl AuthSession {
    /// Rehydrate the session from `path`. A missing or corrupt blob yields
    /// a logged-out session rather than an error.
    pub fn load(path: &Path) -> Self {
        let blob = std::fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str::<SessionBlob>(&content).ok())
            .unwrap_or_else(|| {
                logger::log("No usable session blob, starting logged out");
                SessionBlob::default()
            });

        Self {
            token: blob.token,
            expires_at: blob.expires_at,
            user: blob.user,
            path: path.to_path_buf(),
        }
    }

    /// Overwrite the session with a fresh login. The token format is not
    /// validated; the server is the authority on what it issued.
    pub fn login(&mut self, token: String, expires_at: String, user: User) {
        self.token = Some(token);
        self.expires_at = Some(expires_at);
        self.user = Some(user);
        self.persist();
    }

    pub fn logout(&mut self) {
        self.token = None;
        self.expires_at = None;
        self.user = None;
        self.persist();
    }

    /// True iff a token is present and `expires_at` parses to a future
    /// instant. An unparseable expiry fails closed.
    pub fn is_authenticated(&self) -> bool {
        let Some(_) = self.token else {
            return false;
        };
        match &self.expires_at {
            Some(raw) => match chrono::DateTime::parse_from_rfc3339(raw) {
                Ok(expiry) => expiry > chrono::Utc::now(),
                Err(_) => false,
            },
            None => false,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    fn persist(&self) {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let blob = SessionBlob {
            token: self.token.clone(),
            expires_at: self.expires_at.clone(),
            user: self.user.clone(),
        };
        match serde_json::to_string_pretty(&blob) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    logger::log(&format!("Failed to persist session: {}", e));
                }
            }
            Err(e) => logger::log(&format!("Failed to serialize session: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Organization, User};

    fn test_user() -> User {
        User {
            id: 1,
            email: "student@example.com".to_string(),
            full_name: "Test Student".to_string(),
            user_type: Some("student".to_string()),
            organization: Organization {
                id: 7,
                name: "Greenfield High".to_string(),
            },
        }
    }

    fn session_in(dir: &tempfile::TempDir) -> AuthSession {
        AuthSession::load(&dir.path().join("auth-storage.json"))
    }

    #[test]
    fn test_fresh_session_is_not_authenticated() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(&dir);
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_login_with_future_expiry_authenticates() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        session.login(
            "tok".to_string(),
            "2099-01-01T00:00:00Z".to_string(),
            test_user(),
        );
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok"));
        assert_eq!(session.user().unwrap().email, "student@example.com");
    }

    #[test]
    fn test_past_expiry_is_not_authenticated() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        session.login(
            "tok".to_string(),
            "2001-01-01T00:00:00Z".to_string(),
            test_user(),
        );
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_invalid_expiry_fails_closed() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        session.login("tok".to_string(), "not-a-date".to_string(), test_user());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_logout_clears_everything() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        session.login(
            "tok".to_string(),
            "2099-01-01T00:00:00Z".to_string(),
            test_user(),
        );
        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_logout_without_login_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        session.logout();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_session_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth-storage.json");
        {
            let mut session = AuthSession::load(&path);
            session.login(
                "tok".to_string(),
                "2099-01-01T00:00:00Z".to_string(),
                test_user(),
            );
        }
        let reloaded = AuthSession::load(&path);
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.token(), Some("tok"));
        assert_eq!(reloaded.user().unwrap().full_name, "Test Student");
    }

    #[test]
    fn test_logout_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth-storage.json");
        {
            let mut session = AuthSession::load(&path);
            session.login(
                "tok".to_string(),
                "2099-01-01T00:00:00Z".to_string(),
                test_user(),
            );
            session.logout();
        }
        let reloaded = AuthSession::load(&path);
        assert!(!reloaded.is_authenticated());
        assert!(reloaded.token().is_none());
    }

    #[test]
    fn test_corrupt_blob_loads_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth-storage.json");
        std::fs::write(&path, "{ not json").unwrap();
        let session = AuthSession::load(&path);
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
    }

    #[test]
    fn test_login_overwrites_previous_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        session.login(
            "first".to_string(),
            "2099-01-01T00:00:00Z".to_string(),
            test_user(),
        );
        let mut other = test_user();
        other.email = "other@example.com".to_string();
        session.login(
            "second".to_string(),
            "2099-06-01T00:00:00Z".to_string(),
            other,
        );
        assert_eq!(session.token(), Some("second"));
        assert_eq!(session.user().unwrap().email, "other@example.com");
    }
}
