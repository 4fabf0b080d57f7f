//! Bearer credential storage.
//!
//! The backend issues a single opaque bearer token on login/register. The
//! store holds exactly one such token: written on successful auth, read on
//! boot and on every API call, erased on logout or on a 401 response.
//!
//! Storage is deliberately infallible from the caller's point of view. The
//! file-backed implementation logs I/O failures and carries on; a lost token
//! degrades to "logged out", which every caller already handles.

use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

/// Storage for at most one bearer credential.
pub trait TokenStore: Send + Sync {
    /// Store a token, overwriting any previous value.
    fn set(&self, token: &str);
    /// Read the stored token, if any.
    fn get(&self) -> Option<String>;
    /// Remove the stored token. Idempotent.
    fn clear(&self);
}

/// In-memory token store. Does not survive process restart.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn set(&self, token: &str) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
    }

    fn get(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn clear(&self) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

/// File-backed token store. The native analogue of the browser's single
/// origin-scoped storage key: one file, one token, survives restart.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    // Cache avoids re-reading the file on every API call.
    cached: RwLock<Option<String>>,
}

impl FileTokenStore {
    /// Create a store backed by `path`, loading any previously saved token.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cached = match fs::read_to_string(&path) {
            Ok(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else {
                    Some(s.to_string())
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read token file");
                None
            }
        };
        Self {
            path,
            cached: RwLock::new(cached),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn set(&self, token: &str) {
        *self.cached.write().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to create token dir");
            }
        }
        if let Err(e) = fs::write(&self.path, token) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to persist token");
        }
    }

    fn get(&self) -> Option<String> {
        self.cached
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn clear(&self) {
        *self.cached.write().unwrap_or_else(|e| e.into_inner()) = None;
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove token file");
            }
        }
    }
}
