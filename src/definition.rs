// Entity definitions - the JHipster-style JSON documents the generator consumes

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One entity definition file, e.g. `.jhipster/Customer.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDefinition {
    pub fields: Vec<Field>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    /// Engine name, e.g. `"elasticsearch"`; `false` or absent means none
    #[serde(default, deserialize_with = "engine_name")]
    pub search_engine: Option<String>,
    #[serde(default)]
    pub read_only: bool,
    pub pagination: Option<String>,
    pub service: Option<String>,
    pub dto: Option<String>,
    /// Keys the generator does not interpret (changelogDate, clientRootFolder, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EntityDefinition {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub field_name: String,
    pub field_type: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub field_validate_rules: Vec<String>,
    #[serde(default)]
    pub enum_values: Vec<String>,
    /// JHipster's comma-separated form of `enumValues`
    pub field_values: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Field {
    pub fn new(field_name: &str, field_type: &str) -> Self {
        Self {
            field_name: field_name.to_string(),
            field_type: field_type.to_string(),
            field_validate_rules: Vec::new(),
            enum_values: Vec::new(),
            field_values: None,
            extra: Map::new(),
        }
    }

    pub fn kind(&self) -> Option<FieldKind> {
        FieldKind::from_field_type(&self.field_type)
    }

    /// Enum values from `enumValues`, falling back to `fieldValues`.
    pub fn resolved_enum_values(&self) -> Vec<String> {
        if !self.enum_values.is_empty() {
            return self.enum_values.clone();
        }

        self.field_values
            .as_deref()
            .map(|values| {
                values
                    .split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(|v| v.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Kind of a field's type, as far as the templates care. Types outside this
/// set (String, UUID, enum class names) have no kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    Boolean,
    LocalDate,
    ZonedDateTime,
    Instant,
    Binary,
}

impl FieldKind {
    pub fn from_field_type(field_type: &str) -> Option<Self> {
        match field_type {
            "Integer" | "Long" | "Float" | "Double" | "BigDecimal" => Some(FieldKind::Numeric),
            "Boolean" => Some(FieldKind::Boolean),
            "LocalDate" => Some(FieldKind::LocalDate),
            "ZonedDateTime" => Some(FieldKind::ZonedDateTime),
            "Instant" => Some(FieldKind::Instant),
            "TextBlob" | "ImageBlob" | "AnyBlob" | "Blob" => Some(FieldKind::Binary),
            _ => None,
        }
    }

    pub fn is_timed(self) -> bool {
        matches!(
            self,
            FieldKind::LocalDate | FieldKind::ZonedDateTime | FieldKind::Instant
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipType {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl RelationshipType {
    pub fn is_collection(self) -> bool {
        matches!(self, RelationshipType::OneToMany | RelationshipType::ManyToMany)
    }

    /// One-to-many is the inverse side; the foreign key lives on the other entity.
    pub fn is_persistable(self) -> bool {
        self != RelationshipType::OneToMany
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub other_entity_name: String,
    /// Defaults to `otherEntityName` when omitted
    pub relationship_name: Option<String>,
    pub relationship_type: RelationshipType,
    pub other_entity_field: Option<String>,
    #[serde(default)]
    pub relationship_required: bool,
    #[serde(default)]
    pub relationship_with_built_in_entity: bool,
    #[serde(default, deserialize_with = "one_or_many")]
    pub relationship_validate_rules: Vec<String>,
}

impl Relationship {
    pub fn name(&self) -> &str {
        self.relationship_name
            .as_deref()
            .unwrap_or(&self.other_entity_name)
    }
}

fn engine_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(name)) if !name.is_empty() && name != "no" => Ok(Some(name)),
        _ => Ok(None),
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(rule)) => vec![rule],
        Some(OneOrMany::Many(rules)) => rules,
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_definition() {
        let def = EntityDefinition::from_json(r#"{"fields": []}"#).unwrap();
        assert!(def.fields.is_empty());
        assert!(def.relationships.is_empty());
        assert_eq!(def.search_engine, None);
        assert!(!def.read_only);
        assert_eq!(def.pagination, None);
    }

    #[test]
    fn test_missing_fields_is_rejected() {
        assert!(EntityDefinition::from_json(r#"{"relationships": []}"#).is_err());
    }

    #[test]
    fn test_search_engine_accepts_false_and_name() {
        let def = EntityDefinition::from_json(r#"{"fields": [], "searchEngine": false}"#).unwrap();
        assert_eq!(def.search_engine, None);

        let def = EntityDefinition::from_json(r#"{"fields": [], "searchEngine": "elasticsearch"}"#)
            .unwrap();
        assert_eq!(def.search_engine.as_deref(), Some("elasticsearch"));
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let def = EntityDefinition::from_json(
            r#"{"fields": [{"fieldName": "code", "fieldType": "String", "fieldValidateRulesMaxlength": 20}],
                "changelogDate": "20240101000000"}"#,
        )
        .unwrap();
        assert_eq!(def.extra["changelogDate"], "20240101000000");
        assert_eq!(def.fields[0].extra["fieldValidateRulesMaxlength"], 20);
    }

    #[test]
    fn test_field_values_fallback() {
        let mut field = Field::new("status", "OrderStatus");
        field.field_values = Some("NEW, PAID,SHIPPED".to_string());
        assert_eq!(field.resolved_enum_values(), vec!["NEW", "PAID", "SHIPPED"]);

        field.enum_values = vec!["OPEN".to_string()];
        assert_eq!(field.resolved_enum_values(), vec!["OPEN"]);
    }

    #[test]
    fn test_relationship_parsing() {
        let rel: Relationship = serde_json::from_str(
            r#"{"otherEntityName": "user", "relationshipType": "many-to-one",
                "relationshipValidateRules": "required", "relationshipWithBuiltInEntity": true}"#,
        )
        .unwrap();
        assert_eq!(rel.relationship_type, RelationshipType::ManyToOne);
        assert_eq!(rel.name(), "user");
        assert_eq!(rel.relationship_validate_rules, vec!["required"]);
        assert!(rel.relationship_with_built_in_entity);
    }

    #[test]
    fn test_field_kind_table() {
        assert_eq!(FieldKind::from_field_type("BigDecimal"), Some(FieldKind::Numeric));
        assert_eq!(FieldKind::from_field_type("Boolean"), Some(FieldKind::Boolean));
        assert_eq!(FieldKind::from_field_type("Instant"), Some(FieldKind::Instant));
        assert_eq!(FieldKind::from_field_type("AnyBlob"), Some(FieldKind::Binary));
        assert_eq!(FieldKind::from_field_type("String"), None);
        assert_eq!(FieldKind::from_field_type("UUID"), None);
        assert!(FieldKind::ZonedDateTime.is_timed());
        assert!(!FieldKind::Binary.is_timed());
    }

    #[test]
    fn test_relationship_type_classification() {
        assert!(RelationshipType::OneToMany.is_collection());
        assert!(RelationshipType::ManyToMany.is_collection());
        assert!(!RelationshipType::ManyToOne.is_collection());
        assert!(!RelationshipType::OneToMany.is_persistable());
        assert!(RelationshipType::OneToOne.is_persistable());
    }
}
