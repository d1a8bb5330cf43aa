//! Persisted widget state.
//!
//! The widget contributes a single integer, keyed `progressState`, to the
//! host's view-state snapshot. Whatever the host stored for itself travels
//! alongside under `instanceState` and is handed back untouched on restore.
//!
//! Every way of obtaining a [`PersistedState`] validates it: the snapshot
//! must be a JSON object, carry a known version and hold a progress value in
//! `0..=100`.
//!
//! ```rust
//! use animated_progress::persist::PersistedState;
//! use serde_json::json;
//!
//! let state = PersistedState::new(42, Some(json!({ "scroll": 3 })));
//! let text = state.to_json().unwrap();
//! let back = PersistedState::from_json(&text).unwrap();
//! assert_eq!(back.progress(), 42);
//!
//! // Plain serde goes through the same checks.
//! assert!(serde_json::from_str::<PersistedState>(r#"{"progressState": 500}"#).is_err());
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Snapshot format version written by this build.
pub const STATE_VERSION: u32 = 1;

fn default_version() -> u32 {
    STATE_VERSION
}

/// A typed, versioned snapshot of the widget's logical progress.
///
/// Fields are private so a value of this type always holds a progress in
/// `0..=100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct PersistedState {
    version: u32,
    #[serde(rename = "progressState")]
    progress: i32,
    #[serde(rename = "instanceState", skip_serializing_if = "Option::is_none")]
    instance_state: Option<Value>,
}

#[derive(Deserialize)]
struct RawState {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(rename = "progressState")]
    progress: i64,
    #[serde(rename = "instanceState", default)]
    instance_state: Option<Value>,
}

impl TryFrom<Map<String, Value>> for PersistedState {
    type Error = Error;

    fn try_from(map: Map<String, Value>) -> Result<Self> {
        let raw: RawState = serde_json::from_value(Value::Object(map))?;
        if raw.version != STATE_VERSION {
            return Err(Error::UnsupportedVersion {
                found: raw.version,
                supported: STATE_VERSION,
            });
        }
        let progress = i32::try_from(raw.progress)
            .ok()
            .filter(|p| (0..=100).contains(p))
            .ok_or(Error::ProgressOutOfRange(raw.progress))?;

        Ok(Self {
            version: raw.version,
            progress,
            instance_state: raw.instance_state,
        })
    }
}

impl PersistedState {
    /// Captures `progress` together with the host's own state.
    ///
    /// `progress` is clamped to `0..=100`.
    pub fn new(progress: i32, instance_state: Option<Value>) -> Self {
        Self {
            version: STATE_VERSION,
            progress: progress.clamp(0, 100),
            instance_state,
        }
    }

    /// Format version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Committed progress, `0..=100`.
    pub fn progress(&self) -> i32 {
        self.progress
    }

    /// The host's own state, if any was saved.
    pub fn instance_state(&self) -> Option<&Value> {
        self.instance_state.as_ref()
    }

    /// Consumes the snapshot and returns the host's state.
    pub fn into_instance_state(self) -> Option<Value> {
        self.instance_state
    }

    /// Validates and decodes a snapshot.
    ///
    /// Fails when the value is not an object, the shape does not match, the
    /// version is unknown, or the stored progress lies outside `0..=100`.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::try_from(map),
            other => Err(Error::NotAnObject(json_kind(&other))),
        }
    }

    /// Decodes a snapshot from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Encodes the snapshot as a JSON value.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Encodes the snapshot as JSON text.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
