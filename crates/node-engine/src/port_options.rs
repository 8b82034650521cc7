//! Widget options attached to input ports.
//!
//! Hosts render an input port as a widget (text box, toggle, number field,
//! dropdown). `PortOptions` carries everything the widget needs: the default
//! value, the selectable choices for dropdowns, numeric bounds and whether a
//! text field spans several lines.
//!
//! Options are also what an executor falls back to when the host omits an
//! input, so they double as the runtime defaults of a node.

use serde::{Deserialize, Serialize};

/// Widget options for an input port.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortOptions {
    /// Value used when the input is not supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    /// Allowed values for `Choice` ports, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    /// Lower bound for `Number` ports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u64>,
    /// Upper bound for `Number` ports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,
    /// Render a multi-line text area.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub multiline: bool,
    /// Only accept a connection, never an inline widget.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub force_input: bool,
}

impl PortOptions {
    /// Options with only a default value.
    pub fn with_default(value: impl Into<serde_json::Value>) -> Self {
        Self {
            default: Some(value.into()),
            ..Self::default()
        }
    }

    /// Dropdown options over `choices` with the given default.
    pub fn choice(choices: Vec<String>, default: impl Into<String>) -> Self {
        Self {
            default: Some(serde_json::Value::String(default.into())),
            choices,
            ..Self::default()
        }
    }

    /// Numeric field bounded to `[min, max]`.
    pub fn bounded(default: u64, min: u64, max: u64) -> Self {
        Self {
            default: Some(serde_json::Value::from(default)),
            min: Some(min),
            max: Some(max),
            ..Self::default()
        }
    }

    /// Render as a multi-line text area
    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    /// Require a connection instead of an inline widget
    pub fn force_input(mut self) -> Self {
        self.force_input = true;
        self
    }

    /// Clamp `value` into the configured numeric bounds.
    pub fn clamp(&self, value: u64) -> u64 {
        let value = self.min.map_or(value, |min| value.max(min));
        self.max.map_or(value, |max| value.min(max))
    }
}
