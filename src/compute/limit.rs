use std::collections::BTreeMap;

use serde_derive::{Deserialize, Serialize};

macro_rules! limits {
    ($($variant:ident => $name:expr,)*) => {
        /// The adapter limits queried by the compute probe.
        ///
        /// The names follow the members of WebGPU's `GPUSupportedLimits`. The list is explicit
        /// rather than discovered from the host, so limits a host adds later are not reported
        /// until they are added here.
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        pub enum Limit {
            $($variant,)*
        }

        impl Limit {
            /// Every limit, in query order.
            pub const ALL: &'static [Limit] = &[$(Limit::$variant,)*];

            pub fn name(&self) -> &'static str {
                match self {
                    $(Limit::$variant => $name,)*
                }
            }
        }
    }
}

limits! {
    MaxTextureDimension1D => "maxTextureDimension1D",
    MaxTextureDimension2D => "maxTextureDimension2D",
    MaxTextureDimension3D => "maxTextureDimension3D",
    MaxTextureArrayLayers => "maxTextureArrayLayers",
    MaxBindGroups => "maxBindGroups",
    MaxBindGroupsPlusVertexBuffers => "maxBindGroupsPlusVertexBuffers",
    MaxBindingsPerBindGroup => "maxBindingsPerBindGroup",
    MaxDynamicUniformBuffersPerPipelineLayout => "maxDynamicUniformBuffersPerPipelineLayout",
    MaxDynamicStorageBuffersPerPipelineLayout => "maxDynamicStorageBuffersPerPipelineLayout",
    MaxSampledTexturesPerShaderStage => "maxSampledTexturesPerShaderStage",
    MaxSamplersPerShaderStage => "maxSamplersPerShaderStage",
    MaxStorageBuffersPerShaderStage => "maxStorageBuffersPerShaderStage",
    MaxStorageTexturesPerShaderStage => "maxStorageTexturesPerShaderStage",
    MaxUniformBuffersPerShaderStage => "maxUniformBuffersPerShaderStage",
    MaxUniformBufferBindingSize => "maxUniformBufferBindingSize",
    MaxStorageBufferBindingSize => "maxStorageBufferBindingSize",
    MinUniformBufferOffsetAlignment => "minUniformBufferOffsetAlignment",
    MinStorageBufferOffsetAlignment => "minStorageBufferOffsetAlignment",
    MaxVertexBuffers => "maxVertexBuffers",
    MaxBufferSize => "maxBufferSize",
    MaxVertexAttributes => "maxVertexAttributes",
    MaxVertexBufferArrayStride => "maxVertexBufferArrayStride",
    MaxInterStageShaderComponents => "maxInterStageShaderComponents",
    MaxInterStageShaderVariables => "maxInterStageShaderVariables",
    MaxColorAttachments => "maxColorAttachments",
    MaxColorAttachmentBytesPerSample => "maxColorAttachmentBytesPerSample",
    MaxComputeWorkgroupStorageSize => "maxComputeWorkgroupStorageSize",
    MaxComputeInvocationsPerWorkgroup => "maxComputeInvocationsPerWorkgroup",
    MaxComputeWorkgroupSizeX => "maxComputeWorkgroupSizeX",
    MaxComputeWorkgroupSizeY => "maxComputeWorkgroupSizeY",
    MaxComputeWorkgroupSizeZ => "maxComputeWorkgroupSizeZ",
    MaxComputeWorkgroupsPerDimension => "maxComputeWorkgroupsPerDimension",
}

/// The limits reported by an adapter, keyed by limit name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LimitSet {
    values: BTreeMap<String, u64>,
}

impl LimitSet {
    pub(crate) fn new() -> Self {
        LimitSet {
            values: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, limit: Limit, value: u64) {
        self.values.insert(limit.name().to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.values.get(name).copied()
    }

    pub fn limit(&self, limit: Limit) -> Option<u64> {
        self.get(limit.name())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}
