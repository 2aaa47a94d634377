use super::{Empty, Reduce, SelectOption};
use crate::types::{DatabaseId, NumberFormat, RollupFunction};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Database property definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseProperty {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub schema: PropertySchema,
}

/// Configuration of a database column, discriminated by `type`.
///
/// Kinds without configuration carry an empty object, e.g.
/// `{"type": "checkbox", "checkbox": {}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertySchema {
    Number { number: NumberConfig },
    Select { select: SelectConfig },
    MultiSelect { multi_select: SelectConfig },
    Checkbox { checkbox: Empty },
    Date { date: Empty },
    Url { url: Empty },
    Email { email: Empty },
    PhoneNumber { phone_number: Empty },
    People { people: Empty },
    Files { files: Empty },
    Formula { formula: FormulaConfig },
    Rollup { rollup: RollupConfig },
    Relation { relation: RelationConfig },
    CreatedTime { created_time: Empty },
    LastEditedTime { last_edited_time: Empty },
    CreatedBy { created_by: Empty },
    LastEditedBy { last_edited_by: Empty },
    RichText { rich_text: Empty },
    Title { title: Empty },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NumberConfig {
    pub format: NumberFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectConfig {
    pub options: Vec<SelectOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaConfig {
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupConfig {
    pub relation_property_name: String,
    pub relation_property_id: String,
    pub rollup_property_name: String,
    pub rollup_property_id: String,
    pub function: RollupFunction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationConfig {
    pub database_id: DatabaseId,
    pub synced_property_name: Option<String>,
    pub synced_property_id: Option<String>,
}

impl PropertySchema {
    pub fn title() -> Self {
        PropertySchema::Title { title: Empty {} }
    }

    pub fn rich_text() -> Self {
        PropertySchema::RichText { rich_text: Empty {} }
    }

    pub fn number(format: NumberFormat) -> Self {
        PropertySchema::Number {
            number: NumberConfig { format },
        }
    }

    pub fn select(options: Vec<SelectOption>) -> Self {
        PropertySchema::Select {
            select: SelectConfig { options },
        }
    }

    pub fn checkbox() -> Self {
        PropertySchema::Checkbox { checkbox: Empty {} }
    }

    pub fn date() -> Self {
        PropertySchema::Date { date: Empty {} }
    }

    /// Returns the wire tag of this schema.
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertySchema::Number { .. } => "number",
            PropertySchema::Select { .. } => "select",
            PropertySchema::MultiSelect { .. } => "multi_select",
            PropertySchema::Checkbox { .. } => "checkbox",
            PropertySchema::Date { .. } => "date",
            PropertySchema::Url { .. } => "url",
            PropertySchema::Email { .. } => "email",
            PropertySchema::PhoneNumber { .. } => "phone_number",
            PropertySchema::People { .. } => "people",
            PropertySchema::Files { .. } => "files",
            PropertySchema::Formula { .. } => "formula",
            PropertySchema::Rollup { .. } => "rollup",
            PropertySchema::Relation { .. } => "relation",
            PropertySchema::CreatedTime { .. } => "created_time",
            PropertySchema::LastEditedTime { .. } => "last_edited_time",
            PropertySchema::CreatedBy { .. } => "created_by",
            PropertySchema::LastEditedBy { .. } => "last_edited_by",
            PropertySchema::RichText { .. } => "rich_text",
            PropertySchema::Title { .. } => "title",
        }
    }
}

impl Reduce for PropertySchema {
    fn reduce_to_scalar(&self) -> Value {
        match self {
            PropertySchema::Number { number } => json!(number.format.as_str()),
            PropertySchema::Select { select } | PropertySchema::MultiSelect { multi_select: select } => {
                select.options.iter().map(|option| json!(option.name)).collect()
            }
            PropertySchema::Formula { formula } => json!(formula.expression),
            PropertySchema::Rollup { rollup } => json!({
                "relation_property_name": rollup.relation_property_name,
                "relation_property_id": rollup.relation_property_id,
                "rollup_property_name": rollup.rollup_property_name,
                "rollup_property_id": rollup.rollup_property_id,
                "function": rollup.function.as_str(),
            }),
            PropertySchema::Relation { relation } => json!({
                "database_id": relation.database_id.to_string(),
                "synced_property_name": relation.synced_property_name,
                "synced_property_id": relation.synced_property_id,
            }),
            _ => json!({}),
        }
    }
}

impl Reduce for DatabaseProperty {
    fn reduce_to_scalar(&self) -> Value {
        self.schema.reduce_to_scalar()
    }
}
