use js_sys::Int32Array;
use log::{debug, warn};
use serde_derive::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext as Gl, WebglLoseContext};

use crate::raster::{ContextOptions, ParameterValue, PowerPreference, RasterContext, RasterSurface};
use crate::web::describe;

/// A canvas element as a [RasterSurface].
///
/// Once the canvas's context has been lost (a [WebGl2Context] loses it when dropped), contexts
/// are requested from a new canvas detached from the document.
pub struct WebGl2Surface {
    canvas: HtmlCanvasElement,
}

impl WebGl2Surface {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        WebGl2Surface { canvas }
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl RasterSurface for WebGl2Surface {
    type Context = WebGl2Context;

    fn get_context(&self, options: &ContextOptions) -> Option<WebGl2Context> {
        #[allow(deprecated)]
        let attributes = JsValue::from_serde(&OptionsJson {
            alpha: true,
            antialias: options.antialias(),
            depth: true,
            fail_if_major_performance_caveat: options.fail_if_major_performance_caveat(),
            power_preference: options.power_preference(),
            premultiplied_alpha: options.premultiplied_alpha(),
            preserve_drawing_buffer: options.preserve_drawing_buffer(),
            stencil: false,
        });

        let attributes = match attributes {
            Ok(attributes) => attributes,
            Err(err) => {
                warn!("could not encode the context attributes: {}", err);

                return None;
            }
        };

        let gl = request_context(&self.canvas, &attributes)?;

        if !gl.is_context_lost() {
            return Some(WebGl2Context::new(gl));
        }

        // A canvas keeps handing out its context after it was lost.
        debug!("canvas context was lost, requesting a context from a detached canvas");

        request_context(&self.detached_canvas()?, &attributes)
            .filter(|gl| !gl.is_context_lost())
            .map(WebGl2Context::new)
    }
}

impl WebGl2Surface {
    fn detached_canvas(&self) -> Option<HtmlCanvasElement> {
        let document = self.canvas.owner_document()?;

        match document.create_element("canvas") {
            Ok(element) => element.dyn_into::<HtmlCanvasElement>().ok(),
            Err(err) => {
                warn!("could not create a canvas: {}", describe(&err));

                None
            }
        }
    }
}

fn request_context(canvas: &HtmlCanvasElement, attributes: &JsValue) -> Option<Gl> {
    match canvas.get_context_with_context_options("webgl2", attributes) {
        Ok(Some(context)) => match context.dyn_into::<Gl>() {
            Ok(gl) => Some(gl),
            Err(_) => {
                warn!("canvas returned a context that is not a WebGL 2.0 context");

                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            debug!("canvas refused a WebGL 2.0 context: {}", describe(&err));

            None
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OptionsJson {
    alpha: bool,
    antialias: bool,
    depth: bool,
    fail_if_major_performance_caveat: bool,
    power_preference: PowerPreference,
    premultiplied_alpha: bool,
    preserve_drawing_buffer: bool,
    stencil: bool,
}

/// A WebGL 2.0 context acquired by a [WebGl2Surface].
///
/// The context is lost when this handle is dropped, releasing its resources before the browser's
/// context limit is reached.
pub struct WebGl2Context {
    gl: Gl,
}

impl WebGl2Context {
    fn new(gl: Gl) -> Self {
        WebGl2Context { gl }
    }
}

impl RasterContext for WebGl2Context {
    fn supported_extensions(&self) -> Vec<String> {
        match self.gl.get_supported_extensions() {
            Some(names) => names.iter().filter_map(|name| name.as_string()).collect(),
            None => Vec::new(),
        }
    }

    fn get_extension(&self, name: &str) -> bool {
        match self.gl.get_extension(name) {
            Ok(Some(_)) => true,
            _ => false,
        }
    }

    fn get_parameter(&self, id: u32) -> Option<ParameterValue> {
        match self.gl.get_parameter(id) {
            Ok(value) => parameter_value(&value),
            Err(err) => {
                debug!("parameter {:#06x} unavailable: {}", id, describe(&err));

                None
            }
        }
    }
}

impl Drop for WebGl2Context {
    fn drop(&mut self) {
        if let Ok(Some(extension)) = self.gl.get_extension("WEBGL_lose_context") {
            extension.unchecked_into::<WebglLoseContext>().lose_context();
        }
    }
}

fn parameter_value(value: &JsValue) -> Option<ParameterValue> {
    if let Some(text) = value.as_string() {
        return Some(ParameterValue::Text(text));
    }

    if let Some(number) = value.as_f64() {
        return Some(ParameterValue::Integer(number as i64));
    }

    if let Some(array) = value.dyn_ref::<Int32Array>() {
        if array.length() == 2 {
            let mut dimensions = [0; 2];

            array.copy_to(&mut dimensions);

            return Some(ParameterValue::Dimensions([
                dimensions[0] as i64,
                dimensions[1] as i64,
            ]));
        }
    }

    None
}
