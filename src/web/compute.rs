use futures::future::{FutureExt, LocalBoxFuture};
use js_sys::{Array, Function, Object, Promise};
use log::debug;
use serde_derive::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Navigator;

use crate::compute::{Adapter, AdapterDescriptor, ComputeOptions, Gpu, Limit, RequestError};
use crate::raster::PowerPreference;
use crate::web::{describe, property};

/// The browser's `navigator.gpu` object.
pub struct WebGpu {
    gpu: Object,
}

impl WebGpu {
    /// Returns the WebGPU entry point of the `navigator`, or `None` if the browser does not expose
    /// one.
    pub fn from_navigator(navigator: &Navigator) -> Option<WebGpu> {
        match property(navigator, "gpu") {
            Some(gpu) if gpu.is_object() => Some(WebGpu {
                gpu: gpu.unchecked_into(),
            }),
            _ => {
                debug!("navigator does not expose `gpu`");

                None
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AdapterOptionsJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    power_preference: Option<PowerPreference>,
}

impl Gpu for WebGpu {
    type Adapter = WebAdapter;

    type RequestAdapter = LocalBoxFuture<'static, Result<Option<WebAdapter>, RequestError>>;

    fn request_adapter(&self, options: &ComputeOptions) -> Self::RequestAdapter {
        // WebGPU only accepts an explicit preference.
        let power_preference = match options.power_preference() {
            PowerPreference::Default => None,
            preference => Some(preference),
        };

        #[allow(deprecated)]
        let call = JsValue::from_serde(&AdapterOptionsJson { power_preference })
            .map_err(|err| RequestError::Rejected(err.to_string()))
            .and_then(|options| {
                call_method(&self.gpu, "requestAdapter", &Array::of1(&options))
            });

        async move {
            let adapter = settle(call).await?;

            if adapter.is_null() || adapter.is_undefined() {
                Ok(None)
            } else {
                Ok(Some(WebAdapter { adapter }))
            }
        }
        .boxed_local()
    }
}

/// A `GPUAdapter`.
pub struct WebAdapter {
    adapter: JsValue,
}

impl Adapter for WebAdapter {
    type Device = WebDevice;

    type RequestDevice = LocalBoxFuture<'static, Result<Option<WebDevice>, RequestError>>;

    type RequestInfo = LocalBoxFuture<'static, Result<AdapterDescriptor, RequestError>>;

    fn request_device(&self) -> Self::RequestDevice {
        let call = call_method(&self.adapter, "requestDevice", &Array::new());

        async move {
            let device = settle(call).await?;

            if device.is_null() || device.is_undefined() {
                Ok(None)
            } else {
                Ok(Some(WebDevice { device }))
            }
        }
        .boxed_local()
    }

    fn limit(&self, limit: Limit) -> Option<u64> {
        property(&self.adapter, "limits")
            .and_then(|limits| property(&limits, limit.name()))
            .and_then(|value| value.as_f64())
            .map(|value| value as u64)
    }

    fn features(&self) -> Vec<String> {
        let features = match property(&self.adapter, "features") {
            Some(features) => features,
            None => return Vec::new(),
        };

        match js_sys::try_iter(&features) {
            Ok(Some(iter)) => iter
                .filter_map(|feature| feature.ok())
                .filter_map(|feature| feature.as_string())
                .collect(),
            _ => {
                debug!("adapter features are not iterable");

                Vec::new()
            }
        }
    }

    fn info(&self) -> Option<AdapterDescriptor> {
        property(&self.adapter, "info")
            .filter(|info| info.is_object())
            .map(|info| descriptor(&info))
    }

    fn request_info(&self) -> Self::RequestInfo {
        let call = call_method(&self.adapter, "requestAdapterInfo", &Array::new());

        async move {
            let info = settle(call).await?;

            Ok(descriptor(&info))
        }
        .boxed_local()
    }
}

/// A `GPUDevice`, destroyed when dropped.
pub struct WebDevice {
    device: JsValue,
}

impl Drop for WebDevice {
    fn drop(&mut self) {
        if let Err(err) = call_method(&self.device, "destroy", &Array::new()) {
            debug!("could not destroy the WebGPU device: {}", err);
        }
    }
}

fn descriptor(info: &JsValue) -> AdapterDescriptor {
    let mut descriptor = AdapterDescriptor::default();

    for name in AdapterDescriptor::FIELDS {
        if let Some(value) = property(info, name).and_then(|value| value.as_string()) {
            descriptor.set(name, value);
        }
    }

    descriptor
}

/// Calls the method `name` on the `target`; a missing method is reported as unavailable, an
/// exception as a rejection.
fn call_method(
    target: &JsValue,
    name: &'static str,
    args: &Array,
) -> Result<JsValue, RequestError> {
    let method = property(target, name)
        .and_then(|method| method.dyn_into::<Function>().ok())
        .ok_or(RequestError::Unavailable(name))?;

    method
        .apply(target, args)
        .map_err(|err| RequestError::Rejected(describe(&err)))
}

/// Resolves the value returned by a host call, awaiting it if it is a promise.
async fn settle(call: Result<JsValue, RequestError>) -> Result<JsValue, RequestError> {
    let promise = Promise::resolve(&call?);

    JsFuture::from(promise)
        .await
        .map_err(|err| RequestError::Rejected(describe(&err)))
}
