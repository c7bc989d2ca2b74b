//! Auth session file I/O.
//!
//! Reads and writes `<data_dir>/session.json` with secure file
//! permissions (0o600).

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::errors::SessionError;
use pulse_core::models::User;

/// Default session file name.
const SESSION_FILE_NAME: &str = "session.json";

/// Supported storage version.
const STORAGE_VERSION: u32 = 1;

/// Get the session file path under the given data directory.
pub fn session_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE_NAME)
}

/// On-disk shape of the session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredSession {
    /// Storage schema version.
    pub version: u32,
    /// Short-lived bearer token.
    pub access_token: Option<String>,
    /// Long-lived refresh token.
    pub refresh_token: Option<String>,
    /// The signed-in user, if known.
    pub user: Option<User>,
    /// RFC 3339 timestamp of the last write.
    pub last_updated: String,
}

impl Default for StoredSession {
    fn default() -> Self {
        Self {
            version: STORAGE_VERSION,
            access_token: None,
            refresh_token: None,
            user: None,
            last_updated: String::new(),
        }
    }
}

/// Load the session from file.
///
/// Returns `None` if the file doesn't exist, is invalid, or has an
/// unsupported version.
pub fn load_session(path: &Path) -> Option<StoredSession> {
    let data = match std::fs::read_to_string(path) {
        Ok(d) => d,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!("failed to read session file: {e}");
            return None;
        }
    };

    match serde_json::from_str::<StoredSession>(&data) {
        Ok(session) if session.version == STORAGE_VERSION => Some(session),
        Ok(session) => {
            tracing::warn!("unsupported session storage version: {}", session.version);
            None
        }
        Err(e) => {
            tracing::warn!("failed to parse session file: {e}");
            None
        }
    }
}

/// Save the session to file.
///
/// Creates parent directories if needed. Sets file permissions to 0o600.
pub fn save_session(path: &Path, session: &mut StoredSession) -> Result<(), SessionError> {
    session.last_updated = chrono::Utc::now().to_rfc3339();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(session)?;
    std::fs::write(path, &json)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        let _ = std::fs::set_permissions(path, perms);
    }

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// SessionStore
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory session with write-through persistence.
///
/// Every mutation is persisted immediately; loading problems degrade to an
/// empty (signed-out) session rather than failing.
pub struct SessionStore {
    path: PathBuf,
    current: Mutex<StoredSession>,
}

impl SessionStore {
    /// Open the store under `data_dir`, loading any persisted session.
    #[must_use]
    pub fn open(data_dir: &Path) -> Self {
        let path = session_file_path(data_dir);
        let current = load_session(&path).unwrap_or_default();
        Self {
            path,
            current: Mutex::new(current),
        }
    }

    /// The current access token, if signed in.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.current.lock().access_token.clone()
    }

    /// The current refresh token, if signed in.
    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.current.lock().refresh_token.clone()
    }

    /// The signed-in user, if known.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.current.lock().user.clone()
    }

    /// Whether an access token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.lock().access_token.is_some()
    }

    /// Whether the signed-in user has the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.current.lock().user.as_ref().is_some_and(User::is_admin)
    }

    /// Store a new token pair.
    pub fn set_tokens(
        &self,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Result<(), SessionError> {
        let mut current = self.current.lock();
        current.access_token = Some(access_token.into());
        current.refresh_token = Some(refresh_token.into());
        save_session(&self.path, &mut current)
    }

    /// Store the signed-in user.
    pub fn set_user(&self, user: User) -> Result<(), SessionError> {
        let mut current = self.current.lock();
        current.user = Some(user);
        save_session(&self.path, &mut current)
    }

    /// Drop tokens and user, signing the session out.
    pub fn clear(&self) -> Result<(), SessionError> {
        let mut current = self.current.lock();
        *current = StoredSession::default();
        save_session(&self.path, &mut current)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_user(role: &str) -> User {
        User {
            id: 1,
            email: "ops@example.com".into(),
            role: role.into(),
        }
    }

    #[test]
    fn session_file_path_construction() {
        let p = session_file_path(Path::new("/home/user/.inventorypulse"));
        assert_eq!(p, PathBuf::from("/home/user/.inventorypulse/session.json"));
    }

    #[test]
    fn load_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(load_session(&session_file_path(dir.path())).is_none());
    }

    #[test]
    fn load_invalid_json_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = session_file_path(dir.path());
        std::fs::write(&path, "not json").unwrap();
        assert!(load_session(&path).is_none());
    }

    #[test]
    fn load_wrong_version_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = session_file_path(dir.path());
        std::fs::write(
            &path,
            r#"{"version":2,"access_token":null,"refresh_token":null,"user":null,"last_updated":""}"#,
        )
        .unwrap();
        assert!(load_session(&path).is_none());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = session_file_path(dir.path());

        let mut session = StoredSession {
            access_token: Some("acc".into()),
            refresh_token: Some("ref".into()),
            user: Some(make_user("viewer")),
            ..StoredSession::default()
        };
        save_session(&path, &mut session).unwrap();
        assert!(!session.last_updated.is_empty());

        let loaded = load_session(&path).unwrap();
        assert_eq!(loaded.access_token.as_deref(), Some("acc"));
        assert_eq!(loaded.user.unwrap().email, "ops@example.com");
    }

    #[test]
    fn save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("dir").join("session.json");
        let mut session = StoredSession::default();
        save_session(&path, &mut session).unwrap();
        assert!(path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn save_sets_permissions_0600() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().unwrap();
        let path = session_file_path(dir.path());
        let mut session = StoredSession::default();
        save_session(&path, &mut session).unwrap();
        let perms = std::fs::metadata(&path).unwrap().permissions();
        assert_eq!(perms.mode() & 0o777, 0o600);
    }

    #[test]
    fn store_starts_signed_out() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path());
        assert!(!store.is_authenticated());
        assert!(!store.is_admin());
        assert!(store.user().is_none());
    }

    #[test]
    fn store_set_tokens_persists() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path());
        store.set_tokens("acc", "ref").unwrap();
        assert!(store.is_authenticated());

        // A fresh store over the same directory sees the session.
        let reopened = SessionStore::open(dir.path());
        assert_eq!(reopened.access_token().as_deref(), Some("acc"));
        assert_eq!(reopened.refresh_token().as_deref(), Some("ref"));
    }

    #[test]
    fn store_admin_detection() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path());
        store.set_user(make_user("admin")).unwrap();
        assert!(store.is_admin());

        store.set_user(make_user("viewer")).unwrap();
        assert!(!store.is_admin());
    }

    #[test]
    fn store_clear_signs_out() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path());
        store.set_tokens("acc", "ref").unwrap();
        store.set_user(make_user("admin")).unwrap();

        store.clear().unwrap();
        assert!(!store.is_authenticated());
        assert!(store.user().is_none());

        let reopened = SessionStore::open(dir.path());
        assert!(!reopened.is_authenticated());
    }

    #[test]
    fn corrupt_file_degrades_to_signed_out() {
        let dir = TempDir::new().unwrap();
        std::fs::write(session_file_path(dir.path()), "{broken").unwrap();
        let store = SessionStore::open(dir.path());
        assert!(!store.is_authenticated());
    }
}
