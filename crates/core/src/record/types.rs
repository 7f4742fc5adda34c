//! Record types: raw typed properties as delivered by the record store and
//! the flat ticket view produced from them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A record as returned by the record store: an id plus a bag of typed
/// properties keyed by property name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: String,
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

impl RawRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            properties: HashMap::new(),
        }
    }

    /// Builder-style helper used mostly by tests and fixtures.
    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Normalized scalar value of a property, `None` when absent or empty.
    pub fn scalar(&self, name: &str) -> Option<Scalar> {
        self.properties.get(name).and_then(PropertyValue::normalize)
    }

    /// Normalized value of a property rendered as text.
    pub fn text(&self, name: &str) -> Option<String> {
        self.scalar(name).map(Scalar::into_text)
    }
}

/// A fragment of rich text. Only the plain rendering is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
}

/// An option of a select, multi-select or status property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

/// A date or date range. `start` is an ISO 8601 date or timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
}

/// Result of a formula property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormulaResult {
    String {
        #[serde(default)]
        string: Option<String>,
    },
    Number {
        #[serde(default)]
        number: Option<f64>,
    },
    Boolean {
        #[serde(default)]
        boolean: Option<bool>,
    },
    Date {
        #[serde(default)]
        date: Option<DateRange>,
    },
}

/// A typed property value. The set of kinds is closed; anything the store
/// adds later lands in `Unsupported` and normalizes to null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default)]
        title: Vec<RichText>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<RichText>,
    },
    Select {
        #[serde(default)]
        select: Option<SelectOption>,
    },
    MultiSelect {
        #[serde(default)]
        multi_select: Vec<SelectOption>,
    },
    Status {
        #[serde(default)]
        status: Option<SelectOption>,
    },
    Date {
        #[serde(default)]
        date: Option<DateRange>,
    },
    Number {
        #[serde(default)]
        number: Option<f64>,
    },
    Checkbox {
        #[serde(default)]
        checkbox: bool,
    },
    Url {
        #[serde(default)]
        url: Option<String>,
    },
    Email {
        #[serde(default)]
        email: Option<String>,
    },
    PhoneNumber {
        #[serde(default)]
        phone_number: Option<String>,
    },
    Formula {
        formula: FormulaResult,
    },
    #[serde(other)]
    Unsupported,
}

/// A primitive value extracted from a typed property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Scalar {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render any scalar as text.
    pub fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn non_empty(s: &str) -> Option<Scalar> {
    if s.is_empty() {
        None
    } else {
        Some(Scalar::Text(s.to_string()))
    }
}

fn first_fragment(fragments: &[RichText]) -> Option<Scalar> {
    fragments.first().and_then(|f| non_empty(&f.plain_text))
}

impl PropertyValue {
    /// Plain text property value, handy for building fixtures.
    pub fn text(value: impl Into<String>) -> Self {
        PropertyValue::RichText {
            rich_text: vec![RichText {
                plain_text: value.into(),
            }],
        }
    }

    pub fn title(value: impl Into<String>) -> Self {
        PropertyValue::Title {
            title: vec![RichText {
                plain_text: value.into(),
            }],
        }
    }

    pub fn select(name: impl Into<String>) -> Self {
        PropertyValue::Select {
            select: Some(SelectOption { name: name.into() }),
        }
    }

    pub fn status(name: impl Into<String>) -> Self {
        PropertyValue::Status {
            status: Some(SelectOption { name: name.into() }),
        }
    }

    pub fn date(start: impl Into<String>) -> Self {
        PropertyValue::Date {
            date: Some(DateRange {
                start: start.into(),
                end: None,
            }),
        }
    }

    /// Kind name as used by the record store.
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyValue::Title { .. } => "title",
            PropertyValue::RichText { .. } => "rich_text",
            PropertyValue::Select { .. } => "select",
            PropertyValue::MultiSelect { .. } => "multi_select",
            PropertyValue::Status { .. } => "status",
            PropertyValue::Date { .. } => "date",
            PropertyValue::Number { .. } => "number",
            PropertyValue::Checkbox { .. } => "checkbox",
            PropertyValue::Url { .. } => "url",
            PropertyValue::Email { .. } => "email",
            PropertyValue::PhoneNumber { .. } => "phone_number",
            PropertyValue::Formula { .. } => "formula",
            PropertyValue::Unsupported => "unsupported",
        }
    }

    /// Reduce the typed value to a primitive scalar. Empty values and
    /// unsupported kinds yield `None`.
    pub fn normalize(&self) -> Option<Scalar> {
        match self {
            PropertyValue::Title { title } => first_fragment(title),
            PropertyValue::RichText { rich_text } => first_fragment(rich_text),
            PropertyValue::Select { select } | PropertyValue::Status { status: select } => {
                select.as_ref().and_then(|o| non_empty(&o.name))
            }
            PropertyValue::MultiSelect { multi_select } => {
                let joined = multi_select
                    .iter()
                    .map(|o| o.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                non_empty(&joined)
            }
            PropertyValue::Date { date } => date.as_ref().and_then(|d| non_empty(&d.start)),
            PropertyValue::Number { number } => number.map(Scalar::Number),
            PropertyValue::Checkbox { checkbox } => Some(Scalar::Bool(*checkbox)),
            PropertyValue::Url { url: value }
            | PropertyValue::Email { email: value }
            | PropertyValue::PhoneNumber {
                phone_number: value,
            } => value.as_deref().and_then(non_empty),
            PropertyValue::Formula { formula } => match formula {
                FormulaResult::String { string } => string.as_deref().and_then(non_empty),
                FormulaResult::Number { number } => number.map(Scalar::Number),
                FormulaResult::Boolean { boolean } => boolean.map(Scalar::Bool),
                FormulaResult::Date { date } => date.as_ref().and_then(|d| non_empty(&d.start)),
            },
            PropertyValue::Unsupported => None,
        }
    }
}

/// A value to write back onto a record property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PropertyUpdate {
    RichText(String),
    Url(String),
}

impl PropertyUpdate {
    pub fn value(&self) -> &str {
        match self {
            PropertyUpdate::RichText(v) | PropertyUpdate::Url(v) => v,
        }
    }
}

/// Flat view of a ticket used by the automation.
///
/// `date` is always populated: when the record has no due date the read
/// timestamp is substituted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketData {
    pub id: String,
    pub status: Option<String>,
    pub request_type: Option<String>,
    pub date: String,
    pub title: Option<String>,
}
