use serde::Serialize;

/// One live-editable numeric control, as registered with the host's parameter panel.
///
/// The host groups controls by `group` (one folder per group) and reports edits
/// back as `(group_index, field_index, value)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlSpec {
    /// Folder label (e.g. a body name).
    pub group: String,
    pub group_index: u32,
    /// Field label shown next to the slider.
    pub field: String,
    pub field_index: u32,
    pub min: f64,
    pub max: f64,
    /// Current value at the time the list was produced.
    pub value: f64,
}

/// Serialize a control list for the host panel.
pub fn controls_to_json(controls: &[ControlSpec]) -> Result<String, serde_json::Error> {
    serde_json::to_string(controls)
}
