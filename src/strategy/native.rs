//! The native read-session loop as a strategy.

use super::traits::ReadStrategy;
use crate::error::{BenchError, Result};
use crate::session::{SessionHandle, SessionRegistry, global};
use std::path::Path;

/// Drives a [`ReadSession`](crate::session::ReadSession) through a
/// registry: create in `setup`, run, destroy in `teardown`.
///
/// The session owns its own buffer, so the harness buffer passed to `run`
/// is unused.
#[derive(Debug)]
pub struct SessionRead {
    registry: &'static SessionRegistry,
    handle: Option<SessionHandle>,
}

impl Default for SessionRead {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRead {
    /// Creates the strategy on the process-wide registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(global())
    }

    /// Creates the strategy on a specific registry.
    #[must_use]
    pub const fn with_registry(registry: &'static SessionRegistry) -> Self {
        Self {
            registry,
            handle: None,
        }
    }
}

impl ReadStrategy for SessionRead {
    fn name(&self) -> &'static str {
        "session"
    }

    fn description(&self) -> &'static str {
        "Native fixed-chunk read session (the JNI code path)"
    }

    fn setup(&mut self, path: &Path, buffer_size: usize) -> Result<()> {
        self.teardown();
        self.handle = Some(self.registry.create(path, buffer_size)?);
        Ok(())
    }

    fn run(&mut self, _buffer: &mut [u8]) -> Result<u64> {
        let handle = self
            .handle
            .ok_or(BenchError::NotPrepared { name: "session" })?;
        Ok(self.registry.run(handle)?.bytes)
    }

    fn teardown(&mut self) {
        if let Some(handle) = self.handle.take()
            && let Err(e) = self.registry.destroy(handle)
        {
            tracing::warn!(error = %e, "session teardown failed");
        }
    }
}

impl Drop for SessionRead {
    fn drop(&mut self) {
        self.teardown();
    }
}
