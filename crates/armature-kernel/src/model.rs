//! Typed skeleton document tree.
//!
//! Every field the passes inspect is optional at this layer: a document
//! missing `divisions` or a segment missing `id` must still load so the
//! structural pass can report it. Only values of the wrong JSON type are
//! rejected, as [`ArmatureError::InvalidInput`].

use crate::error::ArmatureError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Root fields that must be present on every skeleton.
pub const REQUIRED_ROOT_FIELDS: &[&str] = &[
    "schema_version",
    "skeleton_version",
    "created_at",
    "updated_at",
    "divisions",
    "tension_field",
    "metadata",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Skeleton {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skeleton_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divisions: Option<Vec<Division>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tension_field: Option<TensionField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_hooks: Option<Vec<Hook>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changelog: Option<Vec<ChangelogEntry>>,
}

impl Skeleton {
    /// Read a skeleton out of an already-parsed JSON value.
    pub fn from_value(value: &Value) -> Result<Self, ArmatureError> {
        if !value.is_object() {
            return Err(ArmatureError::InvalidInput(format!(
                "skeleton root must be a JSON object, got {}",
                json_kind(value)
            )));
        }
        Ok(Self::deserialize(value)?)
    }

    /// Whether a required root field is present (see [`REQUIRED_ROOT_FIELDS`]).
    pub fn has_root_field(&self, field: &str) -> bool {
        match field {
            "schema_version" => self.schema_version.is_some(),
            "skeleton_version" => self.skeleton_version.is_some(),
            "created_at" => self.created_at.is_some(),
            "updated_at" => self.updated_at.is_some(),
            "divisions" => self.divisions.is_some(),
            "tension_field" => self.tension_field.is_some(),
            "metadata" => self.metadata.is_some(),
            _ => false,
        }
    }

    pub fn divisions(&self) -> &[Division] {
        self.divisions.as_deref().unwrap_or_default()
    }

    pub fn global_hooks(&self) -> &[Hook] {
        self.global_hooks.as_deref().unwrap_or_default()
    }

    pub fn changelog(&self) -> &[ChangelogEntry] {
        self.changelog.as_deref().unwrap_or_default()
    }

    pub fn tension_sources(&self) -> &[TensionSource] {
        self.tension_field
            .as_ref()
            .map(|field| field.sources.as_slice())
            .unwrap_or_default()
    }

    pub fn resultant(&self) -> Option<&Resultant> {
        self.tension_field.as_ref()?.resultant.as_ref()
    }

    /// All segments in document order, across every division.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.divisions().iter().flat_map(Division::segments)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Division {
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<Segment>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub division_hooks: Vec<Hook>,
}

impl Division {
    pub fn segments(&self) -> &[Segment] {
        self.segments.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentStatus {
    Complete,
    InProgress,
    Pending,
}

impl SegmentStatus {
    /// Anything other than `complete` or `in_progress` counts as pending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("complete") => Self::Complete,
            Some("in_progress") => Self::InProgress,
            _ => Self::Pending,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub word_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<Block>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segment_hooks: Vec<Hook>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_hook: Option<Hook>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_hook: Option<Hook>,
}

impl Segment {
    pub fn status(&self) -> SegmentStatus {
        SegmentStatus::parse(self.status.as_deref())
    }

    pub fn blocks(&self) -> &[Block] {
        self.blocks.as_deref().unwrap_or_default()
    }

    /// The id if present and non-empty.
    pub fn known_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn entry_hook(&self) -> Option<&Hook> {
        self.entry_hook.as_ref().filter(|hook| !hook.is_empty())
    }

    pub fn exit_hook(&self) -> Option<&Hook> {
        self.exit_hook.as_ref().filter(|hook| !hook.is_empty())
    }

    /// Segment hooks, then entry, then exit.
    pub fn hooks(&self) -> impl Iterator<Item = &Hook> {
        self.segment_hooks
            .iter()
            .chain(self.entry_hook())
            .chain(self.exit_hook())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Block {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Hook {
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub hook_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structural: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tonal: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Hook {
    pub const DEFAULT_CONFIDENCE: f64 = 1.0;

    pub fn confidence(&self) -> f64 {
        self.confidence.unwrap_or(Self::DEFAULT_CONFIDENCE)
    }

    pub fn has_semantic(&self) -> bool {
        facet_is_set(self.semantic.as_ref())
    }

    pub fn has_structural(&self) -> bool {
        facet_is_set(self.structural.as_ref())
    }

    pub fn has_tonal(&self) -> bool {
        facet_is_set(self.tonal.as_ref())
    }

    pub fn label(&self) -> &str {
        self.hook_id.as_deref().unwrap_or("<unnamed>")
    }

    fn is_empty(&self) -> bool {
        self.hook_id.is_none()
            && self.semantic.is_none()
            && self.structural.is_none()
            && self.tonal.is_none()
            && self.confidence.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TensionField {
    #[serde(default)]
    pub sources: Vec<TensionSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resultant: Option<Resultant>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TensionSource {
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_segment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<bool>,
}

impl TensionSource {
    pub fn intensity(&self) -> f64 {
        self.intensity.unwrap_or(0.0)
    }

    /// Only an explicit `true` resolves a source; absent or `null` does not.
    pub fn is_resolved(&self) -> bool {
        self.resolved == Some(true)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Resultant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChangelogEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// A hook facet counts only when present and non-empty.
fn facet_is_set(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(Value::Number(number)) => number.as_f64() != Some(0.0),
    }
}

/// Identifiers may be written as strings or integers.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(id)) => Ok(Some(id)),
        Some(Value::Number(number)) if number.is_i64() || number.is_u64() => {
            Ok(Some(number.to_string()))
        }
        Some(other) => Err(D::Error::custom(format!(
            "expected string or integer identifier, got {}",
            json_kind(&other)
        ))),
    }
}

/// Counts may be written as integral floats (`100.0`); `null` is zero.
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(number)) => match (number.as_u64(), number.as_f64()) {
            (Some(count), _) => Ok(count),
            (None, Some(float))
                if float >= 0.0 && float.fract() == 0.0 && float <= u64::MAX as f64 =>
            {
                Ok(float as u64)
            }
            _ => Err(D::Error::custom(format!(
                "expected a non-negative whole count, got {number}"
            ))),
        },
        Some(other) => Err(D::Error::custom(format!(
            "expected a count, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
