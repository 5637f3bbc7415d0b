//! Read strategies compared by the benchmark harness.
//!
//! Every strategy drains the same file front to back using a buffer of the
//! size under test:
//!
//! - **file**: unbuffered `read` calls on a `File`
//! - **buffered**: reads through a `BufReader`
//! - **mmap**: copies out of a read-only memory map
//! - **session**: the native [`ReadSession`](crate::session::ReadSession)
//!   loop, driven through the session registry exactly as the JNI bridge
//!   drives it

pub mod buffered;
pub mod direct;
pub mod mapped;
pub mod native;
pub mod traits;

pub use buffered::BufferedRead;
pub use direct::DirectRead;
pub use mapped::MappedRead;
pub use native::SessionRead;
pub use traits::ReadStrategy;

/// Creates a strategy by name.
///
/// # Arguments
///
/// * `name` - Strategy name: "file", "buffered", "mmap", or "session".
///
/// # Errors
///
/// Returns [`crate::error::BenchError::UnknownStrategy`] if the name is not recognized.
pub fn create_strategy(name: &str) -> crate::error::Result<Box<dyn ReadStrategy>> {
    match name.to_lowercase().as_str() {
        "file" => Ok(Box::new(DirectRead::new())),
        "buffered" => Ok(Box::new(BufferedRead::new())),
        "mmap" => Ok(Box::new(MappedRead::new())),
        "session" => Ok(Box::new(SessionRead::new())),
        _ => Err(crate::error::BenchError::UnknownStrategy {
            name: name.to_string(),
        }
        .into()),
    }
}

/// Lists available strategy names.
#[must_use]
pub fn available_strategies() -> Vec<&'static str> {
    vec!["file", "buffered", "mmap", "session"]
}
