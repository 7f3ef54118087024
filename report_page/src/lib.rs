// Runs the capability report on a web page, toggles the page's support messages and prints the
// report to the browser console.
//
// `SharedArrayBuffer` is only available to cross-origin isolated pages. For the report to show
// `"SharedArrayBuffer": true`, the page (see `index.html`) must be served with the response
// headers:
//
//     Cross-Origin-Opener-Policy: same-origin
//     Cross-Origin-Embedder-Policy: require-corp

use log::{error, warn, LevelFilter};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{console, Document, HtmlCanvasElement};

use web3d_report::presentation::{present, SupportView};
use web3d_report::report::{Report, ReportAssembler};
use web3d_report::web::{HostUnavailable, WebHost};

mod console_logger;

/// The ids of the elements that show whether one graphics API is supported.
#[derive(Clone, Copy, Debug)]
pub struct ToggleIds {
    /// The canvas the API draws to, hidden if the API is unsupported.
    pub canvas: &'static str,
    pub supported: &'static str,
    pub unsupported: &'static str,
}

/// The element ids the page uses.
#[derive(Clone, Copy, Debug)]
pub struct PageConfig {
    pub webgl2: ToggleIds,
    pub webgpu: ToggleIds,
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            webgl2: ToggleIds {
                canvas: "webgl2-canvas",
                supported: "yes-webgl2",
                unsupported: "no-webgl2",
            },
            webgpu: ToggleIds {
                canvas: "webgpu-canvas",
                supported: "yes-webgpu",
                unsupported: "no-webgpu",
            },
        }
    }
}

/// Shows or hides page elements by setting their `style` attribute.
struct ElementToggle<'a> {
    document: &'a Document,
    ids: ToggleIds,
}

impl<'a> ElementToggle<'a> {
    fn new(document: &'a Document, ids: ToggleIds) -> Self {
        ElementToggle { document, ids }
    }

    fn set_display(&self, id: &str, display: &str) {
        let element = match self.document.get_element_by_id(id) {
            Some(element) => element,
            None => {
                warn!("page has no element with id `{}`", id);

                return;
            }
        };

        if let Err(err) = element.set_attribute("style", &format!("display:{};", display)) {
            warn!("could not set the style of `{}`: {:?}", id, err);
        }
    }
}

impl<'a> SupportView for ElementToggle<'a> {
    fn show_supported(&self) {
        self.set_display(self.ids.supported, "block");
    }

    fn show_unsupported(&self) {
        self.set_display(self.ids.canvas, "none");
        self.set_display(self.ids.unsupported, "block");
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    if console_logger::init(LevelFilter::Debug).is_err() {
        console::warn_1(&JsValue::from_str("a logger was already installed"));
    }

    spawn_local(async {
        if let Err(err) = run(PageConfig::default()).await {
            error!("could not run the capability report: {}", err);
        }
    });
}

async fn run(config: PageConfig) -> Result<(), HostUnavailable> {
    let document = web_sys::window()
        .ok_or(HostUnavailable::Window)?
        .document()
        .ok_or(HostUnavailable::Document)?;
    let host = WebHost::from_canvas_id(config.webgl2.canvas)?;

    let report = ReportAssembler::new(&host).assemble().await;

    present(
        &report,
        &ElementToggle::new(&document, config.webgl2),
        &ElementToggle::new(&document, config.webgpu),
    );

    print(&report);

    Ok(())
}

fn print(report: &Report) {
    match to_js(report) {
        Ok(object) => console::log_1(&object),
        Err(err) => error!("could not convert the report: {:?}", err),
    }

    match report.to_json() {
        Ok(json) => console::log_1(&JsValue::from_str(&json)),
        Err(err) => error!("could not serialize the report: {}", err),
    }
}

fn to_js(report: &Report) -> Result<JsValue, JsValue> {
    #[allow(deprecated)]
    let object = JsValue::from_serde(report);

    object.map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Assembles a capability report and returns it as a plain object.
///
/// Probes raster support on a new, detached canvas: the context the page's own canvas provided
/// is lost once the page's report is done. Rejects if there is no window or document.
#[wasm_bindgen]
pub async fn web3d_report() -> Result<JsValue, JsValue> {
    let window = web_sys::window()
        .ok_or_else(|| JsValue::from_str(&HostUnavailable::Window.to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str(&HostUnavailable::Document.to_string()))?;
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;

    let host = WebHost::new(window, Some(canvas));
    let report = ReportAssembler::new(&host).assemble().await;

    to_js(&report)
}
