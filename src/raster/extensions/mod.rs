//! Optional raster context functionality that may not be available on all hosts.
//!
//! Each extension provides its functionality through a main [Extension] object that may be
//! obtained for a context by calling [Extension::try_init]. This returns an extension object if
//! the extension is available on the context, or `None` otherwise:
//!
//! ```
//! # use web3d_report::raster::RasterContext;
//! # fn wrapper<C>(context: &C) where C: RasterContext {
//! use web3d_report::raster::extensions::Extension;
//! use web3d_report::raster::extensions::debug_renderer_info::Extension as DebugRendererInfo;
//!
//! if let Some(extension) = DebugRendererInfo::try_init(context) {
//!     let vendor = extension.unmasked_vendor(context);
//! }
//! # }
//! ```
use crate::raster::RasterContext;

pub mod debug_renderer_info;

/// Trait implemented for extension objects.
pub trait Extension: Sized {
    /// The name under which the host exposes the extension.
    const NAME: &'static str;

    /// Attempts to enable the extension on the `context` and return the extension object, or
    /// returns `None` if the context does not provide it.
    fn try_init<C>(context: &C) -> Option<Self>
    where
        C: RasterContext + ?Sized;
}
