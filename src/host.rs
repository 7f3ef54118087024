//! The environment the probes run in.
use crate::compute::Gpu;
use crate::raster::RasterSurface;
use crate::shared_memory::SharedMemory;
use crate::timeout::Timer;

/// Bundles the host interfaces a [ReportAssembler](crate::report::ReportAssembler) needs.
///
/// [WebHost](crate::web::WebHost) implements this for a browser window.
pub trait Host {
    type Surface: RasterSurface;

    type Gpu: Gpu;

    type SharedMemory: SharedMemory;

    type Timer: Timer;

    /// The surface to probe for raster support, or `None` if the page has no such surface.
    fn surface(&self) -> Option<&Self::Surface>;

    /// The WebGPU entry point, or `None` if the host does not expose one.
    fn gpu(&self) -> Option<&Self::Gpu>;

    fn shared_memory(&self) -> &Self::SharedMemory;

    fn timer(&self) -> &Self::Timer;

    fn user_agent(&self) -> String;
}
