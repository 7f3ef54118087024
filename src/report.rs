//! Assembles the results of all probes into a single [Report].
use failure::Fail;
use futures::join;
use log::{debug, info};
use serde_derive::{Deserialize, Serialize};

use crate::compute::{self, ComputeReport};
use crate::host::Host;
use crate::options::ProbeOptions;
use crate::raster::{self, RasterReport};
use crate::shared_memory;

/// The capabilities of a host, as reported by all probes.
///
/// Serializes to JSON as:
///
/// ```json
/// {
///     "webgl2": { "supported": false },
///     "webgpu": { "supported": false },
///     "userAgent": "Mozilla/5.0 ...",
///     "SharedArrayBuffer": false
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub webgl2: RasterReport,
    pub webgpu: ComputeReport,
    #[serde(rename = "userAgent")]
    pub user_agent: String,
    #[serde(rename = "SharedArrayBuffer")]
    pub shared_array_buffer: bool,
}

impl Report {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a report previously produced by [Report::to_json].
    ///
    /// Fails if a sub-report's `supported` flag disagrees with the fields it carries.
    pub fn from_json(json: &str) -> Result<Report, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Returned when deserializing a sub-report whose fields contradict its `supported` flag.
#[derive(Clone, Copy, PartialEq, Debug, Fail)]
pub enum InvalidReport {
    #[fail(display = "supported `{}` report lacks the `{}` field", _0, _1)]
    MissingField(&'static str, &'static str),
    #[fail(display = "unsupported `{}` report carries the `{}` field", _0, _1)]
    UnexpectedField(&'static str, &'static str),
}

/// Runs every probe against a [Host] and merges the results into a [Report].
///
/// Assembling never fails: a capability the host lacks is recorded as unsupported.
pub struct ReportAssembler<'a, H> {
    host: &'a H,
    options: ProbeOptions,
}

impl<'a, H> ReportAssembler<'a, H>
where
    H: Host,
{
    pub fn new(host: &'a H) -> Self {
        ReportAssembler {
            host,
            options: ProbeOptions::default(),
        }
    }

    pub fn with_options(host: &'a H, options: ProbeOptions) -> Self {
        ReportAssembler { host, options }
    }

    pub fn options(&self) -> &ProbeOptions {
        &self.options
    }

    /// Runs the raster, compute and shared memory probes and reads the user agent.
    ///
    /// The raster and compute probes share no state and are driven concurrently; the only
    /// suspension points are the compute probe's requests to the host.
    pub async fn assemble(&self) -> Report {
        let host = self.host;
        let options = &self.options;

        let raster = async {
            match host.surface() {
                Some(surface) => raster::probe(surface, options.context_options()),
                None => {
                    debug!("host has no surface to probe for raster support");

                    RasterReport::Unsupported
                }
            }
        };
        let compute = compute::probe(host.gpu(), host.timer(), options.compute_options());

        let (webgl2, webgpu) = join!(raster, compute);

        let shared_array_buffer = shared_memory::probe(host.shared_memory());
        let user_agent = host.user_agent();

        info!(
            "capability report assembled (webgl2: {}, webgpu: {}, SharedArrayBuffer: {})",
            webgl2.is_supported(),
            webgpu.is_supported(),
            shared_array_buffer
        );

        Report {
            webgl2,
            webgpu,
            user_agent,
            shared_array_buffer,
        }
    }
}
