use serde_derive::Serialize;

/// Hints to the host which GPU configuration is suitable for a context or adapter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerPreference {
    Default,
    HighPerformance,
    LowPower,
}

impl Default for PowerPreference {
    fn default() -> Self {
        PowerPreference::Default
    }
}

/// The attributes a [RasterSurface](super::RasterSurface) is asked to create a context with.
///
/// Options are constructed with a builder:
///
/// ```
/// use web3d_report::raster::{ContextOptions, PowerPreference};
///
/// let options = ContextOptions::begin()
///     .power_preference(PowerPreference::LowPower)
///     .disable_antialias()
///     .finish();
///
/// assert_eq!(options.power_preference(), PowerPreference::LowPower);
/// ```
///
/// The default options request a high-performance context, which is what the raster probe
/// uses unless configured otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextOptions {
    antialias: bool,
    preserve_drawing_buffer: bool,
    fail_if_major_performance_caveat: bool,
    premultiplied_alpha: bool,
    power_preference: PowerPreference,
}

impl ContextOptions {
    pub fn begin() -> ContextOptionsBuilder {
        ContextOptionsBuilder {
            antialias: true,
            preserve_drawing_buffer: false,
            premultiplied_alpha: true,
            power_preference: PowerPreference::HighPerformance,
        }
    }

    pub fn antialias(&self) -> bool {
        self.antialias
    }

    pub fn preserve_drawing_buffer(&self) -> bool {
        self.preserve_drawing_buffer
    }

    pub fn fail_if_major_performance_caveat(&self) -> bool {
        self.fail_if_major_performance_caveat
    }

    pub fn premultiplied_alpha(&self) -> bool {
        self.premultiplied_alpha
    }

    pub fn power_preference(&self) -> PowerPreference {
        self.power_preference
    }

    /// Returns a copy of these options with a different power preference.
    pub fn with_power_preference(&self, power_preference: PowerPreference) -> ContextOptions {
        ContextOptions {
            power_preference,
            ..*self
        }
    }

    /// Returns a copy of these options that refuses contexts with a major performance caveat.
    pub fn strict(&self) -> ContextOptions {
        ContextOptions {
            fail_if_major_performance_caveat: true,
            ..*self
        }
    }

    /// Returns a copy of these options that accepts contexts with a major performance caveat.
    pub fn relaxed(&self) -> ContextOptions {
        ContextOptions {
            fail_if_major_performance_caveat: false,
            ..*self
        }
    }
}

impl Default for ContextOptions {
    fn default() -> Self {
        ContextOptions::begin().finish()
    }
}

pub struct ContextOptionsBuilder {
    antialias: bool,
    preserve_drawing_buffer: bool,
    premultiplied_alpha: bool,
    power_preference: PowerPreference,
}

impl ContextOptionsBuilder {
    pub fn preserve_drawing_buffer(mut self, preserve_drawing_buffer: bool) -> Self {
        self.preserve_drawing_buffer = preserve_drawing_buffer;

        self
    }

    pub fn premultiplied_alpha(mut self, premultiplied_alpha: bool) -> Self {
        self.premultiplied_alpha = premultiplied_alpha;

        self
    }

    pub fn power_preference(mut self, power_preference: PowerPreference) -> Self {
        self.power_preference = power_preference;

        self
    }

    pub fn disable_antialias(mut self) -> Self {
        self.antialias = false;

        self
    }

    pub fn finish(self) -> ContextOptions {
        ContextOptions {
            antialias: self.antialias,
            fail_if_major_performance_caveat: false,
            preserve_drawing_buffer: self.preserve_drawing_buffer,
            premultiplied_alpha: self.premultiplied_alpha,
            power_preference: self.power_preference,
        }
    }
}
