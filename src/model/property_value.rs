use super::Reduce;
use crate::types::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A page property: the property id plus its typed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageProperty {
    pub id: String,
    #[serde(flatten)]
    pub value: PropertyValue,
}

/// The value of a page property, discriminated by `type`.
///
/// The payload sits under a key named like the tag, e.g.
/// `{"type": "number", "number": 5.23}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Number {
        #[serde(deserialize_with = "Option::deserialize")]
        number: Option<Decimal>,
    },
    Select {
        #[serde(deserialize_with = "Option::deserialize")]
        select: Option<SelectOption>,
    },
    MultiSelect { multi_select: Vec<SelectOption> },
    Checkbox { checkbox: bool },
    Date {
        #[serde(deserialize_with = "Option::deserialize")]
        date: Option<DateRange>,
    },
    Url {
        #[serde(deserialize_with = "Option::deserialize")]
        url: Option<String>,
    },
    Email {
        #[serde(deserialize_with = "Option::deserialize")]
        email: Option<String>,
    },
    PhoneNumber {
        #[serde(deserialize_with = "Option::deserialize")]
        phone_number: Option<String>,
    },
    People { people: Vec<User> },
    Files { files: Vec<NamedFile> },
    Formula { formula: FormulaResult },
    Rollup { rollup: RollupValue },
    Relation { relation: Vec<RelationRef> },
    CreatedTime { created_time: Timestamp },
    LastEditedTime { last_edited_time: Timestamp },
    CreatedBy { created_by: User },
    LastEditedBy { last_edited_by: User },
    RichText { rich_text: Vec<RichText> },
    Title { title: Vec<RichText> },
}

/// Select and multi-select option.
///
/// `id` and `color` are assigned by the service, so write requests may
/// leave them out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// Computed value of a formula property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormulaResult {
    String {
        #[serde(deserialize_with = "Option::deserialize")]
        string: Option<String>,
    },
    Number {
        #[serde(deserialize_with = "Option::deserialize")]
        number: Option<Decimal>,
    },
    Boolean {
        #[serde(deserialize_with = "Option::deserialize")]
        boolean: Option<bool>,
    },
    Date {
        #[serde(deserialize_with = "Option::deserialize")]
        date: Option<DateRange>,
    },
}

/// Computed value of a rollup property, tagged with the aggregation used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RollupValue {
    Number {
        #[serde(deserialize_with = "Option::deserialize")]
        number: Option<Decimal>,
        function: RollupFunction,
    },
    Date {
        #[serde(deserialize_with = "Option::deserialize")]
        date: Option<DateRange>,
        function: RollupFunction,
    },
    Array {
        array: Vec<PropertyValue>,
        function: RollupFunction,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRef {
    pub id: PageId,
}

impl PropertyValue {
    /// A title value holding one unformatted span.
    pub fn title(text: impl Into<String>) -> Self {
        PropertyValue::Title {
            title: vec![RichText::plain(text)],
        }
    }

    pub fn rich_text(text: impl Into<String>) -> Self {
        PropertyValue::RichText {
            rich_text: vec![RichText::plain(text)],
        }
    }

    pub fn number(value: impl Into<Decimal>) -> Self {
        PropertyValue::Number {
            number: Some(value.into()),
        }
    }

    pub fn select(name: impl Into<String>) -> Self {
        PropertyValue::Select {
            select: Some(SelectOption::named(name)),
        }
    }

    /// Returns the wire tag of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Number { .. } => "number",
            PropertyValue::Select { .. } => "select",
            PropertyValue::MultiSelect { .. } => "multi_select",
            PropertyValue::Checkbox { .. } => "checkbox",
            PropertyValue::Date { .. } => "date",
            PropertyValue::Url { .. } => "url",
            PropertyValue::Email { .. } => "email",
            PropertyValue::PhoneNumber { .. } => "phone_number",
            PropertyValue::People { .. } => "people",
            PropertyValue::Files { .. } => "files",
            PropertyValue::Formula { .. } => "formula",
            PropertyValue::Rollup { .. } => "rollup",
            PropertyValue::Relation { .. } => "relation",
            PropertyValue::CreatedTime { .. } => "created_time",
            PropertyValue::LastEditedTime { .. } => "last_edited_time",
            PropertyValue::CreatedBy { .. } => "created_by",
            PropertyValue::LastEditedBy { .. } => "last_edited_by",
            PropertyValue::RichText { .. } => "rich_text",
            PropertyValue::Title { .. } => "title",
        }
    }
}

impl SelectOption {
    /// An option referenced by name only, as write requests do.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl Reduce for DateRange {
    fn reduce_to_scalar(&self) -> Value {
        json!({
            "start": self.start.to_wire(),
            "end": self.end.map(|end| end.to_wire()),
        })
    }
}

fn reduce_optional<T: Reduce>(value: &Option<T>) -> Value {
    value.as_ref().map_or(Value::Null, Reduce::reduce_to_scalar)
}

fn decimal_value(value: &Option<Decimal>) -> Value {
    value.clone().map_or(Value::Null, Value::from)
}

impl Reduce for PropertyValue {
    fn reduce_to_scalar(&self) -> Value {
        match self {
            PropertyValue::Number { number } => decimal_value(number),
            PropertyValue::Select { select } => select
                .as_ref()
                .map_or(Value::Null, |option| json!(option.name)),
            PropertyValue::MultiSelect { multi_select } => multi_select
                .iter()
                .map(|option| json!({"name": option.name, "color": option.color}))
                .collect(),
            PropertyValue::Checkbox { checkbox } => Value::Bool(*checkbox),
            PropertyValue::Date { date } => reduce_optional(date),
            PropertyValue::Url { url } => json!(url),
            PropertyValue::Email { email } => json!(email),
            PropertyValue::PhoneNumber { phone_number } => json!(phone_number),
            PropertyValue::People { people } => people.iter().map(User::reduce).collect(),
            PropertyValue::Files { files } => files.iter().map(|f| f.file.reduce()).collect(),
            PropertyValue::Formula { formula } => formula.reduce_to_scalar(),
            PropertyValue::Rollup { rollup } => rollup.reduce_to_scalar(),
            PropertyValue::Relation { relation } => relation
                .iter()
                .map(|related| json!(related.id.to_string()))
                .collect(),
            PropertyValue::CreatedTime { created_time } => json!(created_time.to_rfc3339()),
            PropertyValue::LastEditedTime { last_edited_time } => {
                json!(last_edited_time.to_rfc3339())
            }
            PropertyValue::CreatedBy { created_by } => created_by.reduce(),
            PropertyValue::LastEditedBy { last_edited_by } => last_edited_by.reduce(),
            PropertyValue::RichText { rich_text } => json!(plain_text(rich_text)),
            PropertyValue::Title { title } => json!(plain_text(title)),
        }
    }
}

impl Reduce for PageProperty {
    fn reduce_to_scalar(&self) -> Value {
        self.value.reduce_to_scalar()
    }
}

impl Reduce for FormulaResult {
    fn reduce_to_scalar(&self) -> Value {
        match self {
            FormulaResult::String { string } => json!(string),
            FormulaResult::Number { number } => decimal_value(number),
            FormulaResult::Boolean { boolean } => json!(boolean),
            FormulaResult::Date { date } => reduce_optional(date),
        }
    }
}

impl Reduce for RollupValue {
    fn reduce_to_scalar(&self) -> Value {
        match self {
            RollupValue::Number { number, .. } => decimal_value(number),
            RollupValue::Date { date, .. } => reduce_optional(date),
            RollupValue::Array { array, .. } => {
                array.iter().map(Reduce::reduce_to_scalar).collect()
            }
        }
    }
}

impl RollupValue {
    pub fn function(&self) -> RollupFunction {
        match self {
            RollupValue::Number { function, .. }
            | RollupValue::Date { function, .. }
            | RollupValue::Array { function, .. } => *function,
        }
    }
}
