//! API surface data model for idldoc.
//!
//! The IDL compiler emits a single JSON document: an ordered list of entity
//! records (classes and enums) with their methods, properties, constants and
//! events. This crate owns the serde types for that schema and the loading
//! entry points.
//!
//! The schema is implicit and lenient: optional collections stay absent when
//! missing, unknown entity kinds deserialize to [`EntityKind::Unknown`] and
//! are skipped by the renderer. The one thing validated at load time is the
//! `scriptable` annotation, which must be a boolean or the literal string
//! `"custom"`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

/// Kind of a documentable entity.
///
/// Anything other than `class` or `enum` maps to `Unknown`, which produces no
/// output file. Skipping rather than erroring is deliberate: the IDL schema
/// grows new kinds ahead of this tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Class,
    Enum,
    #[serde(other)]
    Unknown,
}

/// Tri-state `scriptable` annotation: off, on, or bound through custom glue.
///
/// The wire value is a boolean or the literal string `"custom"`; any other
/// string is a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scriptable {
    #[default]
    Off,
    On,
    Custom,
}

impl Scriptable {
    /// Whether the member is scriptable at all (on or custom).
    #[must_use]
    pub fn enabled(self) -> bool {
        !matches!(self, Self::Off)
    }

    /// Whether the member uses custom script binding glue.
    #[must_use]
    pub fn is_custom(self) -> bool {
        matches!(self, Self::Custom)
    }
}

impl<'de> Deserialize<'de> for Scriptable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Tag(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(true) => Ok(Self::On),
            Raw::Flag(false) => Ok(Self::Off),
            Raw::Tag(tag) if tag == "custom" => Ok(Self::Custom),
            Raw::Tag(tag) => Err(serde::de::Error::custom(format!(
                "unknown scriptable value '{tag}' (expected a boolean or \"custom\")"
            ))),
        }
    }
}

/// Annotation flags attached to a member.
///
/// A fixed record of named booleans; every flag defaults to off when absent.
/// `persitent` is the schema's historical spelling and is kept as the wire
/// name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Annotation {
    #[serde(default)]
    pub scriptable: Scriptable,
    #[serde(default)]
    pub fake: bool,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, rename = "persitent")]
    pub persistent: bool,
    #[serde(default)]
    pub design: bool,
    #[serde(default)]
    pub readable: bool,
    #[serde(default)]
    pub writable: bool,
    #[serde(default)]
    pub get_prop: bool,
    #[serde(default)]
    pub set_prop: bool,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub constructor: bool,
    #[serde(default)]
    pub cast: bool,
    #[serde(default, rename = "string")]
    pub enum_string: bool,
}

/// A method parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(default, rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub desc: String,
}

/// A method's return descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct ReturnValue {
    #[serde(default, rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub desc: String,
}

/// A member of an entity: method, property, constant or event.
#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default, rename = "type")]
    pub type_name: String,
    #[serde(default, rename = "return")]
    pub ret: Option<ReturnValue>,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub annotation: Annotation,
}

impl Member {
    /// Whether this member is excluded from index tables and detail sections.
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.annotation.private
    }
}

/// One documentable unit from the IDL output.
#[derive(Debug, Clone, Deserialize)]
pub struct Entity {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub methods: Option<Vec<Member>>,
    #[serde(default)]
    pub properties: Option<Vec<Member>>,
    #[serde(default)]
    pub consts: Option<Vec<Member>>,
    #[serde(default)]
    pub events: Option<Vec<Member>>,
}

/// Model loading error.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Parse the entity list from a JSON string.
pub fn parse_entities(json: &str) -> Result<Vec<Entity>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Load the entity list from a JSON file.
pub fn load_entities(path: &Path) -> Result<Vec<Entity>, ModelError> {
    let json = fs::read_to_string(path).map_err(|source| ModelError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_entities(&json).map_err(|source| ModelError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_class_with_members() {
        let json = r#"[{
            "name": "widget_t",
            "type": "class",
            "desc": "Base class.",
            "parent": "object_t",
            "methods": [{
                "name": "widget_create",
                "desc": "Create a widget.",
                "return": {"type": "widget_t*", "desc": "the widget"},
                "params": [{"name": "parent", "type": "widget_t*", "desc": "parent widget"}],
                "annotation": {"scriptable": true, "constructor": true}
            }],
            "properties": [{
                "name": "x",
                "type": "int32_t",
                "desc": "X position.",
                "annotation": {"readable": true, "persitent": true}
            }]
        }]"#;

        let entities = parse_entities(json).unwrap();
        assert_eq!(entities.len(), 1);

        let entity = &entities[0];
        assert_eq!(entity.name, "widget_t");
        assert_eq!(entity.kind, EntityKind::Class);
        assert_eq!(entity.parent.as_deref(), Some("object_t"));

        let method = &entity.methods.as_ref().unwrap()[0];
        assert_eq!(method.ret.as_ref().unwrap().type_name, "widget_t*");
        assert_eq!(method.params.len(), 1);
        assert_eq!(method.annotation.scriptable, Scriptable::On);
        assert!(method.annotation.constructor);

        let prop = &entity.properties.as_ref().unwrap()[0];
        assert!(prop.annotation.readable);
        assert!(prop.annotation.persistent);
        assert!(!prop.annotation.writable);

        assert!(entity.consts.is_none());
        assert!(entity.events.is_none());
    }

    #[test]
    fn test_parse_enum() {
        let json = r#"[{
            "name": "align_t",
            "type": "enum",
            "desc": "Alignment.",
            "consts": [
                {"name": "ALIGN_LEFT", "desc": "left"},
                {"name": "ALIGN_RIGHT", "desc": "right"}
            ],
            "annotation": {"string": true}
        }]"#;

        let entities = parse_entities(json).unwrap();
        assert_eq!(entities[0].kind, EntityKind::Enum);
        assert_eq!(entities[0].consts.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_kind_is_lenient() {
        let json = r#"[{"name": "x", "type": "interface", "desc": ""}]"#;
        let entities = parse_entities(json).unwrap();
        assert_eq!(entities[0].kind, EntityKind::Unknown);
    }

    #[test]
    fn test_scriptable_custom() {
        let json = r#"{"name": "m", "annotation": {"scriptable": "custom"}}"#;
        let member: Member = serde_json::from_str(json).unwrap();
        assert_eq!(member.annotation.scriptable, Scriptable::Custom);
        assert!(member.annotation.scriptable.enabled());
        assert!(member.annotation.scriptable.is_custom());
    }

    #[test]
    fn test_scriptable_rejects_unknown_string() {
        let json = r#"{"name": "m", "annotation": {"scriptable": "maybe"}}"#;
        let result: Result<Member, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_private_member() {
        let json = r#"{"name": "m", "annotation": {"private": true}}"#;
        let member: Member = serde_json::from_str(json).unwrap();
        assert!(member.is_private());
    }

    #[test]
    fn test_member_defaults() {
        let json = r#"{"name": "m"}"#;
        let member: Member = serde_json::from_str(json).unwrap();
        assert_eq!(member.desc, "");
        assert_eq!(member.type_name, "");
        assert!(member.ret.is_none());
        assert!(member.params.is_empty());
        assert!(!member.is_private());
        assert_eq!(member.annotation.scriptable, Scriptable::Off);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(parse_entities("not json").is_err());
        assert!(parse_entities(r#"{"name": "not a list"}"#).is_err());
    }
}
