use std::collections::BTreeMap;

use serde_derive::{Deserialize, Serialize};
use web_sys::WebGl2RenderingContext as Gl;

macro_rules! parameters {
    ($($variant:ident => $constant:ident,)*) => {
        /// The capability parameters queried from a raster context.
        ///
        /// Each parameter corresponds to a WebGL 2.0 `getParameter` name; [Parameter::name]
        /// returns the name used as the key in a [ParameterSet] and [Parameter::id] the enum
        /// value passed to the context.
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        pub enum Parameter {
            $($variant,)*
        }

        impl Parameter {
            /// Every parameter, in query order.
            pub const ALL: &'static [Parameter] = &[$(Parameter::$variant,)*];

            pub fn name(&self) -> &'static str {
                match self {
                    $(Parameter::$variant => stringify!($constant),)*
                }
            }

            pub fn id(&self) -> u32 {
                match self {
                    $(Parameter::$variant => Gl::$constant,)*
                }
            }
        }
    }
}

parameters! {
    Renderer => RENDERER,
    Vendor => VENDOR,
    Version => VERSION,
    ShadingLanguageVersion => SHADING_LANGUAGE_VERSION,
    MaxCombinedTextureImageUnits => MAX_COMBINED_TEXTURE_IMAGE_UNITS,
    MaxCubeMapTextureSize => MAX_CUBE_MAP_TEXTURE_SIZE,
    MaxFragmentUniformVectors => MAX_FRAGMENT_UNIFORM_VECTORS,
    MaxRenderbufferSize => MAX_RENDERBUFFER_SIZE,
    MaxTextureImageUnits => MAX_TEXTURE_IMAGE_UNITS,
    MaxTextureSize => MAX_TEXTURE_SIZE,
    MaxVaryingVectors => MAX_VARYING_VECTORS,
    MaxVertexAttribs => MAX_VERTEX_ATTRIBS,
    MaxVertexTextureImageUnits => MAX_VERTEX_TEXTURE_IMAGE_UNITS,
    MaxVertexUniformVectors => MAX_VERTEX_UNIFORM_VECTORS,
    MaxViewportDims => MAX_VIEWPORT_DIMS,
    Max3dTextureSize => MAX_3D_TEXTURE_SIZE,
    MaxArrayTextureLayers => MAX_ARRAY_TEXTURE_LAYERS,
    MaxClientWaitTimeout => MAX_CLIENT_WAIT_TIMEOUT_WEBGL,
    MaxColorAttachments => MAX_COLOR_ATTACHMENTS,
    MaxCombinedFragmentUniformComponents => MAX_COMBINED_FRAGMENT_UNIFORM_COMPONENTS,
    MaxCombinedUniformBlocks => MAX_COMBINED_UNIFORM_BLOCKS,
    MaxCombinedVertexUniformComponents => MAX_COMBINED_VERTEX_UNIFORM_COMPONENTS,
    MaxDrawBuffers => MAX_DRAW_BUFFERS,
    MaxElementIndex => MAX_ELEMENT_INDEX,
    MaxElementsIndices => MAX_ELEMENTS_INDICES,
    MaxElementsVertices => MAX_ELEMENTS_VERTICES,
    MaxFragmentInputComponents => MAX_FRAGMENT_INPUT_COMPONENTS,
    MaxFragmentUniformBlocks => MAX_FRAGMENT_UNIFORM_BLOCKS,
    MaxFragmentUniformComponents => MAX_FRAGMENT_UNIFORM_COMPONENTS,
    MaxProgramTexelOffset => MAX_PROGRAM_TEXEL_OFFSET,
    MinProgramTexelOffset => MIN_PROGRAM_TEXEL_OFFSET,
    MaxTransformFeedbackInterleavedComponents => MAX_TRANSFORM_FEEDBACK_INTERLEAVED_COMPONENTS,
    MaxTransformFeedbackSeparateAttribs => MAX_TRANSFORM_FEEDBACK_SEPARATE_ATTRIBS,
    MaxTransformFeedbackSeparateComponents => MAX_TRANSFORM_FEEDBACK_SEPARATE_COMPONENTS,
    MaxUniformBlockSize => MAX_UNIFORM_BLOCK_SIZE,
    MaxUniformBufferBindings => MAX_UNIFORM_BUFFER_BINDINGS,
    MaxVaryingComponents => MAX_VARYING_COMPONENTS,
    MaxVertexOutputComponents => MAX_VERTEX_OUTPUT_COMPONENTS,
    MaxVertexUniformBlocks => MAX_VERTEX_UNIFORM_BLOCKS,
    MaxVertexUniformComponents => MAX_VERTEX_UNIFORM_COMPONENTS,
}

/// The value a raster context reports for a capability parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Integer(i64),
    Text(String),
    /// A `[width, height]` pair, reported for `MAX_VIEWPORT_DIMS`.
    Dimensions([i64; 2]),
}

impl ParameterValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ParameterValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParameterValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_dimensions(&self) -> Option<[i64; 2]> {
        match self {
            ParameterValue::Dimensions(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Integer(value)
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::Text(value)
    }
}

impl<'a> From<&'a str> for ParameterValue {
    fn from(value: &'a str) -> Self {
        ParameterValue::Text(value.to_string())
    }
}

impl From<[i64; 2]> for ParameterValue {
    fn from(value: [i64; 2]) -> Self {
        ParameterValue::Dimensions(value)
    }
}

/// The capability parameters queried from a raster context, keyed by parameter name.
///
/// Only parameters for which the context reported a value are present. A parameter set is
/// populated once by the raster probe and is read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    values: BTreeMap<String, ParameterValue>,
}

impl ParameterSet {
    pub(crate) fn new() -> Self {
        ParameterSet {
            values: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, name: &str, value: ParameterValue) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.values.get(name)
    }

    /// Returns the value reported for `parameter`, if any.
    pub fn parameter(&self, parameter: Parameter) -> Option<&ParameterValue> {
        self.get(parameter.name())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|name| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_parameter_names_are_unique() {
        let mut names: Vec<&str> = Parameter::ALL.iter().map(|p| p.name()).collect();

        names.sort();
        names.dedup();

        assert_eq!(names.len(), Parameter::ALL.len());
        assert_eq!(Parameter::ALL.len(), 40);
    }

    #[test]
    fn test_parameter_ids() {
        assert_eq!(Parameter::MaxTextureSize.name(), "MAX_TEXTURE_SIZE");
        assert_eq!(Parameter::MaxTextureSize.id(), 0x0D33);
        assert_eq!(Parameter::MaxViewportDims.id(), 0x0D3A);
        assert_eq!(Parameter::Max3dTextureSize.name(), "MAX_3D_TEXTURE_SIZE");
        assert_eq!(
            Parameter::MaxClientWaitTimeout.name(),
            "MAX_CLIENT_WAIT_TIMEOUT_WEBGL"
        );
        assert_eq!(Parameter::MaxClientWaitTimeout.id(), 0x9247);
    }

    #[test]
    fn test_parameter_values_serialize_as_plain_json() {
        let mut set = ParameterSet::new();

        set.insert("MAX_TEXTURE_SIZE", ParameterValue::Integer(16384));
        set.insert("VENDOR", "WebKit".into());
        set.insert("MAX_VIEWPORT_DIMS", ParameterValue::Dimensions([32767, 32767]));

        assert_eq!(
            serde_json::to_value(&set).unwrap(),
            json!({
                "MAX_TEXTURE_SIZE": 16384,
                "VENDOR": "WebKit",
                "MAX_VIEWPORT_DIMS": [32767, 32767],
            })
        );
    }

    #[test]
    fn test_parameter_values_deserialize_by_shape() {
        let set: ParameterSet = serde_json::from_value(json!({
            "MIN_PROGRAM_TEXEL_OFFSET": -8,
            "VERSION": "WebGL 2.0",
            "MAX_VIEWPORT_DIMS": [16384, 8192],
        }))
        .unwrap();

        assert_eq!(
            set.parameter(Parameter::MinProgramTexelOffset)
                .and_then(|v| v.as_integer()),
            Some(-8)
        );
        assert_eq!(
            set.parameter(Parameter::Version).and_then(|v| v.as_text()),
            Some("WebGL 2.0")
        );
        assert_eq!(
            set.parameter(Parameter::MaxViewportDims)
                .and_then(|v| v.as_dimensions()),
            Some([16384, 8192])
        );
        assert_eq!(set.len(), 3);
        assert!(!set.contains("RENDERER"));
    }
}
