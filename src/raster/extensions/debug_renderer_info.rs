//! Exposes the unmasked vendor and renderer strings of the underlying graphics driver.
use log::debug;

use crate::raster::extensions;
use crate::raster::{ParameterValue, RasterContext};

/// Parameter id of the unmasked vendor string.
pub const UNMASKED_VENDOR_WEBGL: u32 = 0x9245;

/// Parameter id of the unmasked renderer string.
pub const UNMASKED_RENDERER_WEBGL: u32 = 0x9246;

/// Key under which the unmasked vendor is stored in a [ParameterSet](crate::raster::ParameterSet).
pub const UNMASKED_VENDOR_KEY: &str = "UNMASKED_VENDOR_WEBGL";

/// Key under which the unmasked renderer is stored in a
/// [ParameterSet](crate::raster::ParameterSet).
pub const UNMASKED_RENDERER_KEY: &str = "UNMASKED_RENDERER_WEBGL";

pub struct Extension {
    _private: (),
}

impl extensions::Extension for Extension {
    const NAME: &'static str = "WEBGL_debug_renderer_info";

    fn try_init<C>(context: &C) -> Option<Self>
    where
        C: RasterContext + ?Sized,
    {
        if context.get_extension(Self::NAME) {
            Some(Extension { _private: () })
        } else {
            debug!("raster context does not provide `{}`", Self::NAME);

            None
        }
    }
}

impl Extension {
    pub fn unmasked_vendor<C>(&self, context: &C) -> Option<ParameterValue>
    where
        C: RasterContext + ?Sized,
    {
        context.get_parameter(UNMASKED_VENDOR_WEBGL)
    }

    pub fn unmasked_renderer<C>(&self, context: &C) -> Option<ParameterValue>
    where
        C: RasterContext + ?Sized,
    {
        context.get_parameter(UNMASKED_RENDERER_WEBGL)
    }
}
