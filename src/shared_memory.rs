//! Detects whether the host allows shared memory buffers (`SharedArrayBuffer`) to be created.
//!
//! Browsers only expose `SharedArrayBuffer` to cross-origin isolated pages, see the
//! `report_page` crate for the required response headers.
use failure::Fail;
use log::debug;

/// The size of the buffer allocated to detect shared memory support.
pub const PROBE_BYTE_LENGTH: u32 = 1024;

/// A host constructor for shared memory buffers.
pub trait SharedMemory {
    type Buffer;

    /// Attempts to allocate a buffer of `byte_length` bytes.
    ///
    /// Returns `Ok(None)` if the host's constructor returned a null handle.
    fn try_allocate(&self, byte_length: u32) -> Result<Option<Self::Buffer>, AllocationError>;
}

#[derive(Clone, PartialEq, Debug, Fail)]
pub enum AllocationError {
    #[fail(display = "the host does not provide a shared memory constructor")]
    Unavailable,
    #[fail(display = "the host refused to allocate shared memory: {}", _0)]
    Rejected(String),
}

/// Returns `true` if `memory` can allocate a shared buffer of [PROBE_BYTE_LENGTH] bytes.
///
/// The buffer is released before this function returns.
pub fn probe<M>(memory: &M) -> bool
where
    M: SharedMemory + ?Sized,
{
    match memory.try_allocate(PROBE_BYTE_LENGTH) {
        Ok(Some(buffer)) => {
            drop(buffer);

            true
        }
        Ok(None) => {
            debug!("shared memory constructor returned a null handle");

            false
        }
        Err(err) => {
            debug!("shared memory unavailable: {}", err);

            false
        }
    }
}
