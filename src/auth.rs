use std::fs;
use std::io;
use std::path::PathBuf;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Where the session document lives unless overridden.
pub const DEFAULT_STORE_PATH: &str = ".console-session.json";

/// The credentials returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthData {
    pub token: String,
    #[serde(rename = "clientId")]
    pub client_id: String,
    pub email: String,
}

/// File-backed store for the one persisted value: the current session.
///
/// Loaded once at startup, rewritten on login, deleted on logout.
/// Nothing else is ever persisted.
pub struct AuthStore {
    path: PathBuf,
    current: Mutex<Option<AuthData>>,
}

impl AuthStore {
    /// Open the store, restoring a previous session if the file exists
    /// and parses. A corrupt or missing file just means "not logged in".
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok());
        Self {
            path,
            current: Mutex::new(current),
        }
    }

    pub fn current(&self) -> Option<AuthData> {
        self.current.lock().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.current.lock().as_ref().map(|a| a.token.clone())
    }

    /// Persist a fresh session and make it current.
    pub fn save(&self, auth: AuthData) -> io::Result<()> {
        let raw = serde_json::to_string_pretty(&auth)?;
        fs::write(&self.path, raw)?;
        *self.current.lock() = Some(auth);
        Ok(())
    }

    /// Forget the session and remove the file. Missing file is fine.
    pub fn clear(&self) -> io::Result<()> {
        *self.current.lock() = None;
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> AuthData {
        AuthData {
            token: "tok_abc123".into(),
            client_id: "client_42".into(),
            email: "user@example.com".into(),
        }
    }

    #[test]
    fn save_then_reopen_restores_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = AuthStore::open(&path);
        assert_eq!(store.current(), None);
        store.save(auth()).unwrap();

        let reopened = AuthStore::open(&path);
        assert_eq!(reopened.current(), Some(auth()));
        assert_eq!(reopened.token().as_deref(), Some("tok_abc123"));
    }

    #[test]
    fn clear_removes_file_and_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = AuthStore::open(&path);
        store.save(auth()).unwrap();
        store.clear().unwrap();

        assert_eq!(store.current(), None);
        assert!(!path.exists());
        // clearing twice is not an error
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_means_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = AuthStore::open(&path);
        assert_eq!(store.current(), None);
    }

    #[test]
    fn wire_uses_client_id_camel_case() {
        let json = serde_json::to_value(auth()).unwrap();
        assert_eq!(json["clientId"], "client_42");
        assert!(json.get("client_id").is_none());
    }
}
