//! Queries the graphics capabilities of a web browser and assembles them into a single diagnostic
//! [Report](report::Report).
//!
//! A report combines the results of three independent probes:
//!
//! - a [raster] probe that acquires a WebGL 2.0 context and records its extensions and capability
//!   parameters,
//! - a [compute] probe that negotiates a WebGPU adapter and device and records the adapter's
//!   limits, features and identification,
//! - a [shared_memory] probe that checks whether a `SharedArrayBuffer` can be constructed.
//!
//! The probes never fail: the absence of a capability is recorded as `supported: false` in the
//! relevant part of the report. Probes talk to the browser through the traits in [host], which are
//! implemented for the real browser environment in [web]:
//!
//! ```no_run
//! # async fn wrapper() {
//! use web3d_report::report::ReportAssembler;
//! use web3d_report::web::WebHost;
//!
//! let host = WebHost::from_canvas_id("webgl2-canvas").unwrap();
//! let report = ReportAssembler::new(&host).assemble().await;
//!
//! println!("{}", report.to_json().unwrap());
//! # }
//! ```
pub mod compute;
pub mod host;
pub mod options;
pub mod presentation;
pub mod raster;
pub mod report;
pub mod shared_memory;
pub mod timeout;
pub mod web;

#[cfg(test)]
mod mock;
