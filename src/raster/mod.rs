//! Probes the raster (WebGL 2.0) capabilities of a rendering surface.
//!
//! The probe first asks the surface for a context that refuses to run with a major performance
//! caveat. If the surface cannot provide one, it asks again with the restriction relaxed; a
//! context obtained on the second attempt is reported with `majorPerformanceCaveat: true`. If
//! neither attempt succeeds, the surface is reported as unsupported.
use std::convert::TryFrom;

use log::debug;
use serde_derive::{Deserialize, Serialize};

use crate::report::InvalidReport;

mod context_options;
pub use self::context_options::{ContextOptions, ContextOptionsBuilder, PowerPreference};

mod parameter;
pub use self::parameter::{Parameter, ParameterSet, ParameterValue};

pub mod extensions;

use self::extensions::debug_renderer_info;
use self::extensions::Extension;

/// A surface that can create raster contexts, e.g. a canvas element.
pub trait RasterSurface {
    type Context: RasterContext;

    /// Attempts to create a context with the given `options`, returns `None` if the surface
    /// refuses.
    fn get_context(&self, options: &ContextOptions) -> Option<Self::Context>;
}

/// The queries the raster probe performs on an acquired context.
pub trait RasterContext {
    /// The names of all extensions the context supports.
    fn supported_extensions(&self) -> Vec<String>;

    /// Requests the named extension, returns `true` if the context provides it.
    fn get_extension(&self, name: &str) -> bool;

    /// The value of the parameter identified by `id`, or `None` if the context does not report a
    /// value for it.
    fn get_parameter(&self, id: u32) -> Option<ParameterValue>;
}

/// The capabilities of a supported raster context.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterCapabilities {
    /// Whether the context could only be obtained by accepting a major performance caveat.
    pub major_performance_caveat: bool,
    pub extensions: Vec<String>,
    pub parameters: ParameterSet,
}

/// The result of a raster probe.
///
/// Serializes as `{"supported": false}` or as `{"supported": true, "majorPerformanceCaveat": ..,
/// "extensions": [..], "parameters": {..}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "RasterReportJson", try_from = "RasterReportJson")]
pub enum RasterReport {
    Unsupported,
    Supported(RasterCapabilities),
}

impl RasterReport {
    pub fn is_supported(&self) -> bool {
        match self {
            RasterReport::Supported(_) => true,
            RasterReport::Unsupported => false,
        }
    }

    pub fn capabilities(&self) -> Option<&RasterCapabilities> {
        match self {
            RasterReport::Supported(capabilities) => Some(capabilities),
            RasterReport::Unsupported => None,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RasterReportJson {
    supported: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    major_performance_caveat: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    extensions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parameters: Option<ParameterSet>,
}

impl From<RasterReport> for RasterReportJson {
    fn from(report: RasterReport) -> Self {
        match report {
            RasterReport::Unsupported => RasterReportJson {
                supported: false,
                major_performance_caveat: None,
                extensions: None,
                parameters: None,
            },
            RasterReport::Supported(capabilities) => RasterReportJson {
                supported: true,
                major_performance_caveat: Some(capabilities.major_performance_caveat),
                extensions: Some(capabilities.extensions),
                parameters: Some(capabilities.parameters),
            },
        }
    }
}

impl TryFrom<RasterReportJson> for RasterReport {
    type Error = InvalidReport;

    fn try_from(json: RasterReportJson) -> Result<Self, Self::Error> {
        if !json.supported {
            if json.major_performance_caveat.is_some() {
                return Err(InvalidReport::UnexpectedField("webgl2", "majorPerformanceCaveat"));
            }

            if json.extensions.is_some() {
                return Err(InvalidReport::UnexpectedField("webgl2", "extensions"));
            }

            if json.parameters.is_some() {
                return Err(InvalidReport::UnexpectedField("webgl2", "parameters"));
            }

            return Ok(RasterReport::Unsupported);
        }

        Ok(RasterReport::Supported(RasterCapabilities {
            major_performance_caveat: json
                .major_performance_caveat
                .ok_or(InvalidReport::MissingField("webgl2", "majorPerformanceCaveat"))?,
            extensions: json
                .extensions
                .ok_or(InvalidReport::MissingField("webgl2", "extensions"))?,
            parameters: json
                .parameters
                .ok_or(InvalidReport::MissingField("webgl2", "parameters"))?,
        }))
    }
}

/// Probes the raster capabilities of the `surface`.
///
/// The `options` configure the requested context (e.g. the power preference); their
/// `fail_if_major_performance_caveat` setting is ignored, the probe always tries a strict
/// context first and a relaxed context second.
///
/// The acquired context is dropped before this function returns.
pub fn probe<S>(surface: &S, options: &ContextOptions) -> RasterReport
where
    S: RasterSurface + ?Sized,
{
    let (context, major_performance_caveat) =
        if let Some(context) = surface.get_context(&options.strict()) {
            (context, false)
        } else if let Some(context) = surface.get_context(&options.relaxed()) {
            debug!("raster context only available with a major performance caveat");

            (context, true)
        } else {
            debug!("surface did not provide a raster context");

            return RasterReport::Unsupported;
        };

    let extensions = context.supported_extensions();
    let parameters = query_parameters(&context);

    debug!(
        "raster context reported {} extensions and {} parameters",
        extensions.len(),
        parameters.len()
    );

    RasterReport::Supported(RasterCapabilities {
        major_performance_caveat,
        extensions,
        parameters,
    })
}

fn query_parameters<C>(context: &C) -> ParameterSet
where
    C: RasterContext,
{
    let mut parameters = ParameterSet::new();

    for parameter in Parameter::ALL {
        if let Some(value) = context.get_parameter(parameter.id()) {
            parameters.insert(parameter.name(), value);
        }
    }

    if let Some(extension) = debug_renderer_info::Extension::try_init(context) {
        if let Some(vendor) = extension.unmasked_vendor(context) {
            parameters.insert(debug_renderer_info::UNMASKED_VENDOR_KEY, vendor);
        }

        if let Some(renderer) = extension.unmasked_renderer(context) {
            parameters.insert(debug_renderer_info::UNMASKED_RENDERER_KEY, renderer);
        }
    }

    parameters
}
