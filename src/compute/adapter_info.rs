use serde_derive::{Deserialize, Serialize};

/// Identifies the physical (or emulated) GPU behind an adapter.
///
/// Fields the host does not provide are `None` and are left out of the serialized form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AdapterDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AdapterDescriptor {
    /// The names of the descriptor fields, as read from the host's adapter info object.
    pub const FIELDS: &'static [&'static str] = &["vendor", "architecture", "device", "description"];

    /// Sets the field called `name` to `value`; unknown names are ignored.
    pub(crate) fn set(&mut self, name: &str, value: String) {
        match name {
            "vendor" => self.vendor = Some(value),
            "architecture" => self.architecture = Some(value),
            "device" => self.device = Some(value),
            "description" => self.description = Some(value),
            _ => (),
        }
    }
}
