//! The browser implementation of the [Host] interfaces.
//!
//! Built on `web-sys` and `js-sys`. The WebGPU entry point and the `SharedArrayBuffer`
//! constructor are looked up dynamically on their host objects, so that a browser without them is
//! reported as unsupported rather than raising an exception.
use failure::Fail;
use js_sys::Reflect;
use log::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlCanvasElement, Navigator, Window};

use crate::host::Host;

mod compute;
pub use self::compute::{WebAdapter, WebDevice, WebGpu};

mod raster;
pub use self::raster::{WebGl2Context, WebGl2Surface};

mod shared_memory;
pub use self::shared_memory::WebSharedMemory;

mod timer;
pub use self::timer::{Delay, WindowTimer};

/// Returned when the page does not provide the objects a [WebHost] is built from.
#[derive(Clone, Copy, PartialEq, Debug, Fail)]
pub enum HostUnavailable {
    #[fail(display = "no global `window` object is available")]
    Window,
    #[fail(display = "the window has no document")]
    Document,
}

/// A [Host] backed by a browser window.
pub struct WebHost {
    navigator: Navigator,
    surface: Option<WebGl2Surface>,
    gpu: Option<WebGpu>,
    shared_memory: WebSharedMemory,
    timer: WindowTimer,
}

impl WebHost {
    /// Creates a host for the `window` that probes raster support on the `canvas`.
    ///
    /// Without a `canvas` the raster probe reports WebGL 2.0 as unsupported.
    pub fn new(window: Window, canvas: Option<HtmlCanvasElement>) -> Self {
        let navigator = window.navigator();
        let gpu = WebGpu::from_navigator(&navigator);

        WebHost {
            navigator,
            surface: canvas.map(WebGl2Surface::new),
            gpu,
            shared_memory: WebSharedMemory::new(),
            timer: WindowTimer::new(window),
        }
    }

    /// Creates a host for the global window, probing raster support on the canvas element with
    /// the given `id`.
    ///
    /// If the document has no such element, or the element is not a canvas, the host is created
    /// without a surface.
    pub fn from_canvas_id(id: &str) -> Result<Self, HostUnavailable> {
        let window = web_sys::window().ok_or(HostUnavailable::Window)?;
        let document = window.document().ok_or(HostUnavailable::Document)?;

        let canvas = document
            .get_element_by_id(id)
            .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok());

        if canvas.is_none() {
            debug!("no canvas element with id `{}`", id);
        }

        Ok(WebHost::new(window, canvas))
    }
}

impl Host for WebHost {
    type Surface = WebGl2Surface;

    type Gpu = WebGpu;

    type SharedMemory = WebSharedMemory;

    type Timer = WindowTimer;

    fn surface(&self) -> Option<&WebGl2Surface> {
        self.surface.as_ref()
    }

    fn gpu(&self) -> Option<&WebGpu> {
        self.gpu.as_ref()
    }

    fn shared_memory(&self) -> &WebSharedMemory {
        &self.shared_memory
    }

    fn timer(&self) -> &WindowTimer {
        &self.timer
    }

    fn user_agent(&self) -> String {
        match self.navigator.user_agent() {
            Ok(user_agent) => user_agent,
            Err(err) => {
                warn!("could not read the user agent: {}", describe(&err));

                String::new()
            }
        }
    }
}

/// Reads a property, treating `undefined`, `null` and a throwing getter alike as absent.
pub(crate) fn property(target: &JsValue, name: &str) -> Option<JsValue> {
    match Reflect::get(target, &JsValue::from_str(name)) {
        Ok(value) if !value.is_undefined() && !value.is_null() => Some(value),
        _ => None,
    }
}

/// A human-readable description of a thrown value, for logs and error messages.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(message) = value.as_string() {
        return message;
    }

    if let Some(message) = property(value, "message").and_then(|message| message.as_string()) {
        return message;
    }

    format!("{:?}", value)
}
