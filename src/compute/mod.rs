//! Probes the compute (WebGPU) capabilities of the host.
//!
//! The probe negotiates an adapter and then a device from that adapter. Both are requests to the
//! host that may suspend; by default the probe waits for the host indefinitely, a timeout can be
//! configured with [ComputeOptions::timeout]. If the host has no WebGPU entry point, no adapter,
//! or refuses to create a device, the probe reports the host as unsupported.
use std::convert::TryFrom;
use std::future::Future;
use std::time::Duration;

use failure::Fail;
use log::{debug, warn};
use serde_derive::{Deserialize, Serialize};

use crate::raster::PowerPreference;
use crate::report::InvalidReport;
use crate::timeout::{with_timeout, TimedOut, Timer};

mod adapter_info;
pub use self::adapter_info::AdapterDescriptor;

mod limit;
pub use self::limit::{Limit, LimitSet};

/// The host's WebGPU entry point.
pub trait Gpu {
    type Adapter: Adapter;

    type RequestAdapter: Future<Output = Result<Option<Self::Adapter>, RequestError>>;

    /// Requests an adapter; resolves to `None` if the host has no suitable adapter.
    fn request_adapter(&self, options: &ComputeOptions) -> Self::RequestAdapter;
}

/// A WebGPU adapter obtained from a [Gpu].
pub trait Adapter {
    type Device;

    type RequestDevice: Future<Output = Result<Option<Self::Device>, RequestError>>;

    type RequestInfo: Future<Output = Result<AdapterDescriptor, RequestError>>;

    /// Requests a device with default features and limits; resolves to `None` if the adapter
    /// cannot provide one.
    fn request_device(&self) -> Self::RequestDevice;

    /// The value the adapter reports for the `limit`, or `None` if it does not report it.
    fn limit(&self, limit: Limit) -> Option<u64>;

    /// The names of the features the adapter supports, in host order.
    fn features(&self) -> Vec<String>;

    /// The adapter's identification, if the host exposes it synchronously.
    fn info(&self) -> Option<AdapterDescriptor>;

    /// Requests the adapter's identification from hosts that only expose it asynchronously.
    fn request_info(&self) -> Self::RequestInfo;
}

/// Errors a host may report for a compute request.
#[derive(Clone, PartialEq, Debug, Fail)]
pub enum RequestError {
    #[fail(display = "the host rejected the request: {}", _0)]
    Rejected(String),
    #[fail(display = "the host does not provide `{}`", _0)]
    Unavailable(&'static str),
    #[fail(display = "the host did not respond within {:?}", _0)]
    TimedOut(Duration),
}

impl From<TimedOut> for RequestError {
    fn from(err: TimedOut) -> Self {
        RequestError::TimedOut(err.0)
    }
}

/// Configures the compute probe.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ComputeOptions {
    power_preference: PowerPreference,
    timeout: Option<Duration>,
}

impl ComputeOptions {
    pub fn new() -> Self {
        ComputeOptions {
            power_preference: PowerPreference::HighPerformance,
            timeout: None,
        }
    }

    pub fn power_preference(&self) -> PowerPreference {
        self.power_preference
    }

    /// The maximum time to wait for each individual host request, or `None` to wait
    /// indefinitely.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn with_power_preference(mut self, power_preference: PowerPreference) -> Self {
        self.power_preference = power_preference;

        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;

        self
    }
}

impl Default for ComputeOptions {
    fn default() -> Self {
        ComputeOptions::new()
    }
}

/// The capabilities of a host that provided both an adapter and a device.
#[derive(Clone, Debug, PartialEq)]
pub struct ComputeCapabilities {
    pub limits: LimitSet,
    pub features: Vec<String>,
    /// `None` if the host exposes the adapter's identification neither synchronously nor
    /// asynchronously.
    pub adapter: Option<AdapterDescriptor>,
}

/// The result of a compute probe.
///
/// Serializes as `{"supported": false}` or as `{"supported": true, "limits": {..}, "features":
/// [..], "adapter": {..}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "ComputeReportJson", try_from = "ComputeReportJson")]
pub enum ComputeReport {
    Unsupported,
    Supported(ComputeCapabilities),
}

impl ComputeReport {
    pub fn is_supported(&self) -> bool {
        match self {
            ComputeReport::Supported(_) => true,
            ComputeReport::Unsupported => false,
        }
    }

    pub fn capabilities(&self) -> Option<&ComputeCapabilities> {
        match self {
            ComputeReport::Supported(capabilities) => Some(capabilities),
            ComputeReport::Unsupported => None,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ComputeReportJson {
    supported: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    limits: Option<LimitSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    adapter: Option<AdapterDescriptor>,
}

impl From<ComputeReport> for ComputeReportJson {
    fn from(report: ComputeReport) -> Self {
        match report {
            ComputeReport::Unsupported => ComputeReportJson {
                supported: false,
                limits: None,
                features: None,
                adapter: None,
            },
            ComputeReport::Supported(capabilities) => ComputeReportJson {
                supported: true,
                limits: Some(capabilities.limits),
                features: Some(capabilities.features),
                adapter: capabilities.adapter,
            },
        }
    }
}

impl TryFrom<ComputeReportJson> for ComputeReport {
    type Error = InvalidReport;

    fn try_from(json: ComputeReportJson) -> Result<Self, Self::Error> {
        if !json.supported {
            if json.limits.is_some() {
                return Err(InvalidReport::UnexpectedField("webgpu", "limits"));
            }

            if json.features.is_some() {
                return Err(InvalidReport::UnexpectedField("webgpu", "features"));
            }

            if json.adapter.is_some() {
                return Err(InvalidReport::UnexpectedField("webgpu", "adapter"));
            }

            return Ok(ComputeReport::Unsupported);
        }

        Ok(ComputeReport::Supported(ComputeCapabilities {
            limits: json
                .limits
                .ok_or(InvalidReport::MissingField("webgpu", "limits"))?,
            features: json
                .features
                .ok_or(InvalidReport::MissingField("webgpu", "features"))?,
            adapter: json.adapter,
        }))
    }
}

/// Probes the compute capabilities exposed through the `gpu` entry point.
///
/// Pass `None` for a host without an entry point: the probe then reports the host as unsupported
/// without making any request. Host rejections and timeouts are logged and also reported as
/// unsupported.
///
/// The device is only requested to verify that one can be created; it is dropped before this
/// function returns.
pub async fn probe<G, T>(gpu: Option<&G>, timer: &T, options: &ComputeOptions) -> ComputeReport
where
    G: Gpu + ?Sized,
    T: Timer + ?Sized,
{
    let gpu = match gpu {
        Some(gpu) => gpu,
        None => {
            debug!("host has no WebGPU entry point");

            return ComputeReport::Unsupported;
        }
    };

    let adapter = match request(gpu.request_adapter(options), timer, options.timeout()).await {
        Ok(Some(adapter)) => adapter,
        Ok(None) => {
            debug!("host did not provide a WebGPU adapter");

            return ComputeReport::Unsupported;
        }
        Err(err) => {
            warn!("WebGPU adapter request failed: {}", err);

            return ComputeReport::Unsupported;
        }
    };

    let device = match request(adapter.request_device(), timer, options.timeout()).await {
        Ok(Some(device)) => device,
        Ok(None) => {
            debug!("WebGPU adapter did not provide a device");

            return ComputeReport::Unsupported;
        }
        Err(err) => {
            warn!("WebGPU device request failed: {}", err);

            return ComputeReport::Unsupported;
        }
    };

    let mut limits = LimitSet::new();

    for limit in Limit::ALL {
        if let Some(value) = adapter.limit(*limit) {
            limits.insert(*limit, value);
        }
    }

    let features = adapter.features();

    let adapter_descriptor = match adapter.info() {
        Some(info) => Some(info),
        None => match request(adapter.request_info(), timer, options.timeout()).await {
            Ok(info) => Some(info),
            Err(err) => {
                warn!("WebGPU adapter info unavailable: {}", err);

                None
            }
        },
    };

    drop(device);

    ComputeReport::Supported(ComputeCapabilities {
        limits,
        features,
        adapter: adapter_descriptor,
    })
}

async fn request<F, O, T>(future: F, timer: &T, timeout: Option<Duration>) -> Result<O, RequestError>
where
    F: Future<Output = Result<O, RequestError>>,
    T: Timer + ?Sized,
{
    with_timeout(future, timer, timeout).await?
}
