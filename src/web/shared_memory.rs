use js_sys::{Array, Function, Object, Reflect, SharedArrayBuffer};
use wasm_bindgen::{JsCast, JsValue};

use crate::shared_memory::{AllocationError, SharedMemory};
use crate::web::{describe, property};

/// Allocates buffers through the global `SharedArrayBuffer` constructor.
///
/// The constructor is only present on cross-origin isolated pages; its absence is reported as
/// [AllocationError::Unavailable].
pub struct WebSharedMemory {
    global: Object,
}

impl WebSharedMemory {
    pub fn new() -> Self {
        WebSharedMemory {
            global: js_sys::global(),
        }
    }
}

impl Default for WebSharedMemory {
    fn default() -> Self {
        WebSharedMemory::new()
    }
}

impl SharedMemory for WebSharedMemory {
    type Buffer = SharedArrayBuffer;

    fn try_allocate(&self, byte_length: u32) -> Result<Option<SharedArrayBuffer>, AllocationError> {
        let constructor = property(&self.global, "SharedArrayBuffer")
            .and_then(|constructor| constructor.dyn_into::<Function>().ok())
            .ok_or(AllocationError::Unavailable)?;

        let buffer = Reflect::construct(&constructor, &Array::of1(&JsValue::from(byte_length)))
            .map_err(|err| AllocationError::Rejected(describe(&err)))?;

        if buffer.is_null() || buffer.is_undefined() {
            return Ok(None);
        }

        Ok(Some(buffer.unchecked_into()))
    }
}
