//! Handle registry for sessions owned on behalf of foreign callers.
//!
//! Foreign callers never see a pointer: they hold a [`SessionHandle`], a
//! positive integer issued here. Handles are never reused, so a handle that
//! was torn down stays unknown and is rejected instead of reaching freed
//! memory.

use super::{ReadSession, RunStats};
use crate::error::{Result, SessionError};
use std::collections::HashMap;
use std::num::NonZeroI64;
use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

/// Opaque token for a registered session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHandle(NonZeroI64);

impl SessionHandle {
    /// Rebuilds a handle from its raw value. `0` and negative values are
    /// never issued and map to `None`.
    #[must_use]
    pub fn from_raw(raw: i64) -> Option<Self> {
        NonZeroI64::new(raw).filter(|v| v.get() > 0).map(Self)
    }

    /// Raw value handed across the boundary.
    #[must_use]
    pub const fn as_raw(self) -> i64 {
        self.0.get()
    }
}

type SharedSession = Arc<Mutex<ReadSession>>;

/// Arena of live sessions keyed by handle.
#[derive(Debug)]
pub struct SessionRegistry {
    next: AtomicI64,
    sessions: Mutex<HashMap<SessionHandle, SharedSession>>,
}

static GLOBAL: LazyLock<SessionRegistry> = LazyLock::new(SessionRegistry::new);

/// Process-wide registry used by the JNI entry points.
#[must_use]
pub fn global() -> &'static SessionRegistry {
    &GLOBAL
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next: AtomicI64::new(1),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    // A panic while the map lock is held cannot leave a half-inserted
    // entry, so a poisoned map is still usable.
    fn map(&self) -> MutexGuard<'_, HashMap<SessionHandle, SharedSession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lookup(&self, handle: SessionHandle) -> Result<SharedSession> {
        self.map().get(&handle).cloned().ok_or_else(|| {
            tracing::warn!(handle = handle.as_raw(), "unknown session handle");
            SessionError::UnknownHandle {
                handle: handle.as_raw(),
            }
            .into()
        })
    }

    /// Opens a session and returns its handle.
    ///
    /// Succeeds even if the file cannot be opened.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidBufferSize`] if `buffer_size` is zero.
    pub fn create<P: AsRef<Path>>(&self, path: P, buffer_size: usize) -> Result<SessionHandle> {
        let session = ReadSession::open(path, buffer_size)?;
        let raw = self.next.fetch_add(1, Ordering::Relaxed);
        let handle = SessionHandle::from_raw(raw).ok_or(SessionError::UnknownHandle { handle: raw })?;

        self.map().insert(handle, Arc::new(Mutex::new(session)));
        tracing::debug!(handle = raw, buffer_size, "session created");
        Ok(handle)
    }

    /// Drains the session's file; see [`ReadSession::run`].
    ///
    /// The registry lock is released before reading, so runs on different
    /// sessions do not serialize.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownHandle`] for handles that were never
    /// issued or already destroyed.
    pub fn run(&self, handle: SessionHandle) -> Result<RunStats> {
        let shared = self.lookup(handle)?;
        let mut session = shared.lock().map_err(|_| SessionError::Poisoned {
            handle: handle.as_raw(),
        })?;
        Ok(session.run())
    }

    /// Releases the session's file descriptor; see [`ReadSession::close`].
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownHandle`] for unknown handles.
    pub fn close(&self, handle: SessionHandle) -> Result<()> {
        let shared = self.lookup(handle)?;
        let mut session = shared.lock().map_err(|_| SessionError::Poisoned {
            handle: handle.as_raw(),
        })?;
        session.close();
        Ok(())
    }

    /// Removes the session, freeing its buffer and closing its file.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownHandle`] if the handle is not live,
    /// including a second destroy of the same handle.
    pub fn destroy(&self, handle: SessionHandle) -> Result<()> {
        let removed = self.map().remove(&handle);
        if removed.is_none() {
            tracing::warn!(handle = handle.as_raw(), "destroy of unknown session handle");
            return Err(SessionError::UnknownHandle {
                handle: handle.as_raw(),
            }
            .into());
        }
        tracing::debug!(handle = handle.as_raw(), "session destroyed");
        Ok(())
    }

    /// Returns `true` if `handle` refers to a live session.
    #[must_use]
    pub fn contains(&self, handle: SessionHandle) -> bool {
        self.map().contains_key(&handle)
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map().len()
    }

    /// Returns `true` if no sessions are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map().is_empty()
    }
}
