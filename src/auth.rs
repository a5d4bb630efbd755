use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredState {
    authenticated: bool,
}

/// Process-wide admin/guest gate for the dashboard views.
///
/// The password is a fixed shared secret compared by exact string equality.
/// No hashing, no rate limiting, no lockout: a known weakness, kept as
/// shipped. The gate controls view visibility only and is not a security
/// boundary. The flag survives restarts via a small JSON state file; a
/// missing or unreadable file means guest.
pub struct SessionGate {
    secret: String,
    state_path: PathBuf,
    authenticated: Mutex<bool>,
    notifier: watch::Sender<bool>,
}

impl SessionGate {
    pub fn new(secret: String, state_path: PathBuf) -> Self {
        let initial = load_state(&state_path);
        let (notifier, _) = watch::channel(initial);
        SessionGate {
            secret,
            state_path,
            authenticated: Mutex::new(initial),
            notifier,
        }
    }

    /// Attempts a login. Returns `true` and flips to admin only on an exact
    /// secret match; anything else leaves the gate unchanged. A failure is a
    /// normal result, not an error.
    pub fn login(&self, candidate: &str) -> bool {
        if candidate != self.secret {
            info!("rejected login attempt");
            return false;
        }
        let mut authenticated = self.authenticated.lock().unwrap();
        *authenticated = true;
        self.persist(true);
        self.notifier.send_replace(true);
        info!("admin authenticated");
        true
    }

    /// Unconditionally returns to guest. Idempotent.
    pub fn logout(&self) {
        let mut authenticated = self.authenticated.lock().unwrap();
        *authenticated = false;
        self.persist(false);
        self.notifier.send_replace(false);
        info!("admin logged out");
    }

    pub fn is_authenticated(&self) -> bool {
        *self.authenticated.lock().unwrap()
    }

    /// Change notifications for dependent views, so they re-render on flips
    /// instead of polling.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.notifier.subscribe()
    }

    // State-file I/O follows client-storage semantics: a write failure is
    // logged and swallowed, never surfaced to the caller.
    fn persist(&self, value: bool) {
        let state = StoredState {
            authenticated: value,
        };
        let result = serde_json::to_vec(&state)
            .map_err(anyhow::Error::from)
            .and_then(|bytes| fs::write(&self.state_path, bytes).map_err(anyhow::Error::from));
        if let Err(e) = result {
            warn!(
                "failed to persist auth state to {}: {}",
                self.state_path.display(),
                e
            );
        }
    }
}

fn load_state(path: &Path) -> bool {
    match fs::read(path) {
        Ok(bytes) => serde_json::from_slice::<StoredState>(&bytes)
            .map(|s| s.authenticated)
            .unwrap_or_else(|e| {
                warn!("ignoring corrupt auth state file {}: {}", path.display(), e);
                false
            }),
        Err(_) => false,
    }
}
