use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use super::error::AuthError;
use super::token::Credential;

/// Fixed slot name the client reads and writes its credential under.
pub const CREDENTIAL_KEY: &str = "token";

/// Storage capability for the persisted credential.
///
/// Implementations need no locking across calls: concurrent writers race
/// and the last write wins.
pub trait SessionStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<Credential>, AuthError>;
    fn save(&self, key: &str, credential: &Credential) -> Result<(), AuthError>;
    fn clear(&self, key: &str) -> Result<(), AuthError>;
}

/// Credential files on disk, `<dir>/<key>.toml`.
///
/// Keys become file names as-is, so only ASCII letters, digits, `-` and
/// `_` are accepted. Files are written to a sibling temp file first and
/// renamed into place.
///
/// ```no_run
/// use feedctl::auth::{Credential, FileSessionStore, SessionStore, CREDENTIAL_KEY};
///
/// let store = FileSessionStore::new(FileSessionStore::default_dir());
/// store.save(CREDENTIAL_KEY, &Credential::new("token"))?;
/// # Ok::<(), feedctl::auth::AuthError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `~/.feedctl`, or `.feedctl` in the working directory when no home
    /// directory is known.
    pub fn default_dir() -> PathBuf {
        directories::UserDirs::new()
            .map(|dirs| dirs.home_dir().join(".feedctl"))
            .unwrap_or_else(|| PathBuf::from(".feedctl"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, AuthError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
        if !valid {
            return Err(AuthError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(key).with_extension("toml"))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self, key: &str) -> Result<Option<Credential>, AuthError> {
        let raw = match fs::read_to_string(self.path_for(key)?) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let file: SessionFile = toml::from_str(&raw)?;
        Ok(Some(file.credential))
    }

    fn save(&self, key: &str, credential: &Credential) -> Result<(), AuthError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let contents = toml::to_string(&SessionFile {
            format: SESSION_FILE_FORMAT,
            credential: credential.clone(),
        })?;
        let staging = path.with_extension("toml.tmp");
        fs::write(&staging, contents)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&staging, fs::Permissions::from_mode(0o600))?;
        }
        fs::rename(&staging, &path)?;
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), AuthError> {
        match fs::remove_file(self.path_for(key)?) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

/// Process-local session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slots: Mutex<HashMap<String, Credential>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a token under [`CREDENTIAL_KEY`].
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store
            .slots()
            .insert(CREDENTIAL_KEY.to_string(), Credential::new(token));
        store
    }

    /// Token currently held under [`CREDENTIAL_KEY`].
    pub fn token(&self) -> Option<String> {
        self.slots()
            .get(CREDENTIAL_KEY)
            .map(|credential| credential.token.clone())
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, Credential>> {
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, key: &str) -> Result<Option<Credential>, AuthError> {
        Ok(self.slots().get(key).cloned())
    }

    fn save(&self, key: &str, credential: &Credential) -> Result<(), AuthError> {
        self.slots().insert(key.to_string(), credential.clone());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), AuthError> {
        self.slots().remove(key);
        Ok(())
    }
}

const SESSION_FILE_FORMAT: u32 = 1;

#[derive(Serialize, Deserialize)]
struct SessionFile {
    format: u32,
    credential: Credential,
}
