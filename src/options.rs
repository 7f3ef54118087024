use std::time::Duration;

use crate::compute::ComputeOptions;
use crate::raster::{ContextOptions, PowerPreference};

/// Configures a report run.
///
/// ```
/// use std::time::Duration;
///
/// use web3d_report::options::ProbeOptions;
/// use web3d_report::raster::PowerPreference;
///
/// let options = ProbeOptions::begin()
///     .power_preference(PowerPreference::LowPower)
///     .compute_timeout(Duration::from_secs(5))
///     .finish();
///
/// assert_eq!(options.compute_options().timeout(), Some(Duration::from_secs(5)));
/// ```
///
/// The default options prefer high-performance hardware and wait for the host without a
/// timeout.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct ProbeOptions {
    context_options: ContextOptions,
    compute_options: ComputeOptions,
}

impl ProbeOptions {
    pub fn begin() -> ProbeOptionsBuilder {
        ProbeOptionsBuilder {
            context_options: ContextOptions::default(),
            compute_options: ComputeOptions::default(),
        }
    }

    pub fn context_options(&self) -> &ContextOptions {
        &self.context_options
    }

    pub fn compute_options(&self) -> &ComputeOptions {
        &self.compute_options
    }
}

pub struct ProbeOptionsBuilder {
    context_options: ContextOptions,
    compute_options: ComputeOptions,
}

impl ProbeOptionsBuilder {
    /// Sets the power preference for both the raster context and the compute adapter.
    pub fn power_preference(mut self, power_preference: PowerPreference) -> Self {
        self.context_options = self
            .context_options
            .with_power_preference(power_preference);
        self.compute_options = self
            .compute_options
            .with_power_preference(power_preference);

        self
    }

    pub fn context_options(mut self, context_options: ContextOptions) -> Self {
        self.context_options = context_options;

        self
    }

    pub fn compute_options(mut self, compute_options: ComputeOptions) -> Self {
        self.compute_options = compute_options;

        self
    }

    /// Gives up on each WebGPU request that takes longer than `timeout`.
    pub fn compute_timeout(mut self, timeout: Duration) -> Self {
        self.compute_options = self.compute_options.with_timeout(Some(timeout));

        self
    }

    pub fn finish(self) -> ProbeOptions {
        ProbeOptions {
            context_options: self.context_options,
            compute_options: self.compute_options,
        }
    }
}
