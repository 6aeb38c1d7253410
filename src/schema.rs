use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use vec1::{vec1, Vec1};

macro_attr! {
    // Every variant needs a matching arm in `SettingName::schema` and `SettingName::key`
    #[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, IterVariants!(SettingNameVariants))]
    #[serde(rename_all = "camelCase")]
    pub enum SettingName {
        Theme,
        NavigatorLayout,
        IsAiCommandBarVisible,
        CanvasZoom
    }
}

impl SettingName {
    /// Name of the setting in the persisted JSON object
    pub fn key(&self) -> &'static str {
        match self {
            SettingName::Theme => "theme",
            SettingName::NavigatorLayout => "navigatorLayout",
            SettingName::IsAiCommandBarVisible => "isAiCommandBarVisible",
            SettingName::CanvasZoom => "canvasZoom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SettingName::Theme => "Theme",
            SettingName::NavigatorLayout => "Navigator layout",
            SettingName::IsAiCommandBarVisible => "Show AI command bar",
            SettingName::CanvasZoom => "Canvas zoom",
        }
    }

    pub fn schema(&self) -> &'static SchemaEntry {
        match self {
            SettingName::Theme => &THEME,
            SettingName::NavigatorLayout => &NAVIGATOR_LAYOUT,
            SettingName::IsAiCommandBarVisible => &IS_AI_COMMAND_BAR_VISIBLE,
            SettingName::CanvasZoom => &CANVAS_ZOOM,
        }
    }

    pub fn default_value(&self) -> &'static SettingValue {
        &self.schema().default_value
    }

    pub fn allows(&self, value: &SettingValue) -> bool {
        self.schema().allows(value)
    }
}

impl fmt::Display for SettingName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq, Hash)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Number(i64),
    Text(String),
}

impl SettingValue {
    /// Returns `None` for JSON values no setting can ever hold (fractional numbers, arrays,
    /// objects, null). Integral floats such as `150.0` are read as integers.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(SettingValue::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .or_else(|| {
                    n.as_f64()
                        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                        .map(|f| f as i64)
                })
                .map(SettingValue::Number),
            Value::String(s) => Some(SettingValue::Text(s.clone())),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            SettingValue::Bool(b) => Value::Bool(*b),
            SettingValue::Number(n) => Value::from(*n),
            SettingValue::Text(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{b}"),
            SettingValue::Number(n) => write!(f, "{n}"),
            SettingValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::Text(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        SettingValue::Text(s)
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        SettingValue::Bool(b)
    }
}

impl From<i64> for SettingValue {
    fn from(n: i64) -> Self {
        SettingValue::Number(n)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct SchemaEntry {
    pub values: Vec1<SettingValue>,
    pub default_value: SettingValue,
}

impl SchemaEntry {
    fn new(values: Vec1<SettingValue>, default_value: SettingValue) -> Self {
        debug_assert!(values.contains(&default_value));
        Self {
            values,
            default_value,
        }
    }

    pub fn allows(&self, value: &SettingValue) -> bool {
        self.values.contains(value)
    }

    /// Maps a textual input (ie. from a form field) back to one of the allowed values
    pub fn parse_value(&self, input: &str) -> Option<&SettingValue> {
        self.values.iter().find(|value| value.to_string() == input)
    }
}

lazy_static! {
    static ref THEME: SchemaEntry =
        SchemaEntry::new(vec1!["light".into(), "dark".into()], "light".into());
    static ref NAVIGATOR_LAYOUT: SchemaEntry =
        SchemaEntry::new(vec1!["docked".into(), "undocked".into()], "undocked".into());
    static ref IS_AI_COMMAND_BAR_VISIBLE: SchemaEntry =
        SchemaEntry::new(vec1![true.into(), false.into()], true.into());
    static ref CANVAS_ZOOM: SchemaEntry = SchemaEntry::new(
        vec1![
            SettingValue::Number(50),
            SettingValue::Number(75),
            SettingValue::Number(100),
            SettingValue::Number(150),
            SettingValue::Number(200)
        ],
        SettingValue::Number(100)
    );
}
