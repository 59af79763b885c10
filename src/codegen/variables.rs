// Template variable preparation - turns one entity definition into the
// fully resolved bag of names, fields and relationships the templates read

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;

use super::utils::{
    camel_to_kebab, humanize, lower_first_camel_case, pluralize, upper_first_camel_case,
};
use crate::definition::{EntityDefinition, Field, FieldKind, Relationship, RelationshipType};

/// Fields with this name are managed by the backend and never scaffolded.
pub const TENANT_FIELD: &str = "tenantId";

const BUILT_IN_USER: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimaryKey {
    pub name: String,
    #[serde(rename = "type")]
    pub key_type: String,
}

impl Default for PrimaryKey {
    fn default() -> Self {
        Self {
            name: "id".to_string(),
            key_type: "number".to_string(),
        }
    }
}

/// Per-type flags, all derived from a single [`FieldKind`] so at most one
/// kind is ever set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldFlags {
    pub field_type_numeric: bool,
    pub field_type_boolean: bool,
    pub field_type_local_date: bool,
    pub field_type_zoned_date_time: bool,
    pub field_type_instant: bool,
    pub field_type_timed: bool,
    pub field_type_binary: bool,
}

impl From<Option<FieldKind>> for FieldFlags {
    fn from(kind: Option<FieldKind>) -> Self {
        let Some(kind) = kind else {
            return Self::default();
        };

        Self {
            field_type_numeric: kind == FieldKind::Numeric,
            field_type_boolean: kind == FieldKind::Boolean,
            field_type_local_date: kind == FieldKind::LocalDate,
            field_type_zoned_date_time: kind == FieldKind::ZonedDateTime,
            field_type_instant: kind == FieldKind::Instant,
            field_type_timed: kind.is_timed(),
            field_type_binary: kind == FieldKind::Binary,
        }
    }
}

impl FieldFlags {
    pub fn is_date_derived(&self) -> bool {
        self.field_type_local_date
            || self.field_type_zoned_date_time
            || self.field_type_instant
            || self.field_type_timed
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedField {
    pub field_name: String,
    pub field_type: String,
    pub field_name_humanized: String,
    pub field_validate_rules: Vec<String>,
    pub field_validate: bool,
    pub field_required: bool,
    pub enum_values: Vec<String>,
    pub field_is_enum: bool,
    #[serde(flatten)]
    pub flags: FieldFlags,
    /// Unrecognised keys from the definition, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProcessedField {
    fn from_field(field: &Field) -> Self {
        let enum_values = field.resolved_enum_values();
        Self {
            field_name: field.field_name.clone(),
            field_type: field.field_type.clone(),
            field_name_humanized: humanize(&field.field_name),
            field_validate: !field.field_validate_rules.is_empty(),
            field_required: field.field_validate_rules.iter().any(|r| r == "required"),
            field_validate_rules: field.field_validate_rules.clone(),
            field_is_enum: !enum_values.is_empty(),
            enum_values,
            flags: FieldFlags::from(field.kind()),
            extra: field.extra.clone(),
        }
    }
}

/// Everything the templates need to link to the entity on the other side
/// of a relationship.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherEntity {
    pub entity_name: String,
    pub entity_class: String,
    pub entity_instance: String,
    pub entity_class_plural: String,
    pub entity_instance_plural: String,
    pub entity_file_name: String,
    pub route_path: String,
    pub primary_key: PrimaryKey,
    pub built_in_user: bool,
    /// Display field used when rendering the related entity
    pub field: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedRelationship {
    pub relationship_name: String,
    pub relationship_type: RelationshipType,
    pub other_entity_name: String,
    pub relationship_field_name: String,
    pub relationship_field_name_plural: String,
    pub relationship_name_humanized: String,
    pub collection: bool,
    pub other_entity_field: String,
    pub relationship_required: bool,
    pub relationship_with_built_in_entity: bool,
    pub relationship_validate_rules: Vec<String>,
    pub other_entity: OtherEntity,
}

impl ProcessedRelationship {
    fn from_relationship(rel: &Relationship) -> Self {
        let name = rel.name();
        let other = &rel.other_entity_name;
        let built_in_user = rel.relationship_with_built_in_entity && other == BUILT_IN_USER;

        let display_field = match &rel.other_entity_field {
            Some(field) => field.clone(),
            None if built_in_user => "login".to_string(),
            None => "name".to_string(),
        };

        let relationship_field_name = lower_first_camel_case(name);
        let other_class = upper_first_camel_case(other);
        let other_instance = lower_first_camel_case(other);
        let other_file_name = camel_to_kebab(other);

        Self {
            relationship_name: name.to_string(),
            relationship_type: rel.relationship_type,
            other_entity_name: other.clone(),
            relationship_field_name_plural: pluralize(&relationship_field_name),
            relationship_field_name,
            relationship_name_humanized: humanize(name),
            collection: rel.relationship_type.is_collection(),
            other_entity_field: display_field.clone(),
            relationship_required: rel.relationship_required
                || rel.relationship_validate_rules.iter().any(|r| r == "required"),
            relationship_with_built_in_entity: rel.relationship_with_built_in_entity,
            relationship_validate_rules: rel.relationship_validate_rules.clone(),
            other_entity: OtherEntity {
                entity_name: other.clone(),
                entity_class_plural: pluralize(&other_class),
                entity_class: other_class,
                entity_instance_plural: pluralize(&other_instance),
                entity_instance: other_instance,
                route_path: pluralize(&other_file_name),
                entity_file_name: other_file_name,
                primary_key: PrimaryKey::default(),
                built_in_user,
                field: display_field,
            },
        }
    }

    pub fn is_persistable(&self) -> bool {
        self.relationship_type.is_persistable()
    }
}

/// The complete variable bag for one entity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateVariables {
    pub entity_name: String,
    pub entity_class: String,
    pub entity_instance: String,
    pub entity_class_plural: String,
    pub entity_instance_plural: String,
    pub entity_file_name: String,
    pub entity_file_name_plural: String,
    pub entity_class_humanized: String,
    pub entity_class_plural_humanized: String,
    pub route_path: String,
    pub entity_api_url: String,
    pub primary_key: PrimaryKey,

    pub fields: Vec<ProcessedField>,
    pub relationships: Vec<ProcessedRelationship>,
    pub persistable_relationships: Vec<ProcessedRelationship>,
    pub other_entities_with_persistable_relationship: Vec<OtherEntity>,

    pub any_field_is_date_derived: bool,
    pub any_field_is_blob_derived: bool,
    pub any_field_is_enum: bool,

    pub search_engine: Option<String>,
    pub read_only: bool,
    pub pagination: String,
    pub service: String,
    pub dto: String,

    /// Top-level definition keys the generator does not interpret
    pub definition: Map<String, Value>,
}

pub fn prepare_template_variables(
    entity_name: &str,
    definition: &EntityDefinition,
) -> TemplateVariables {
    let entity_class = upper_first_camel_case(entity_name);
    let entity_instance = lower_first_camel_case(entity_name);
    let entity_file_name = camel_to_kebab(entity_name);
    let entity_class_plural = pluralize(&entity_class);
    let entity_file_name_plural = pluralize(&entity_file_name);

    let fields: Vec<ProcessedField> = definition
        .fields
        .iter()
        .filter(|field| {
            if field.field_name == TENANT_FIELD {
                debug!("Excluding {} from {} fields", TENANT_FIELD, entity_name);
                return false;
            }
            true
        })
        .map(ProcessedField::from_field)
        .collect();

    let relationships: Vec<ProcessedRelationship> = definition
        .relationships
        .iter()
        .map(ProcessedRelationship::from_relationship)
        .collect();

    let persistable_relationships: Vec<ProcessedRelationship> = relationships
        .iter()
        .filter(|rel| rel.is_persistable())
        .cloned()
        .collect();

    let mut seen = HashSet::new();
    let other_entities_with_persistable_relationship = persistable_relationships
        .iter()
        .filter(|rel| seen.insert(rel.other_entity_name.clone()))
        .map(|rel| rel.other_entity.clone())
        .collect();

    TemplateVariables {
        entity_name: entity_name.to_string(),
        entity_instance_plural: pluralize(&entity_instance),
        entity_instance,
        entity_class_humanized: humanize(&entity_class),
        entity_class_plural_humanized: humanize(&entity_class_plural),
        entity_class,
        entity_class_plural,
        entity_file_name,
        route_path: entity_file_name_plural.clone(),
        entity_api_url: format!("api/{}", entity_file_name_plural),
        entity_file_name_plural,
        primary_key: PrimaryKey::default(),

        any_field_is_date_derived: fields.iter().any(|f| f.flags.is_date_derived()),
        any_field_is_blob_derived: fields.iter().any(|f| f.flags.field_type_binary),
        any_field_is_enum: fields.iter().any(|f| f.field_is_enum),
        fields,
        relationships,
        persistable_relationships,
        other_entities_with_persistable_relationship,

        search_engine: definition.search_engine.clone(),
        read_only: definition.read_only,
        pagination: definition.pagination.clone().unwrap_or_else(|| "no".to_string()),
        service: definition.service.clone().unwrap_or_else(|| "no".to_string()),
        dto: definition.dto.clone().unwrap_or_else(|| "no".to_string()),
        definition: definition.extra.clone(),
    }
}
