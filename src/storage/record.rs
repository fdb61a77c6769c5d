use std::fmt;
use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;
use crate::metadata::ClassKind;
use super::error::StorageError;

/// Timestamp layout used in the JSON file.
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Keys owned by the record itself; they are never stored as attributes.
pub const MANAGED_FIELDS: [&str; 4] = ["id", "created_at", "updated_at", "__class__"];

/// One persisted entity: a class tag, a generated id, its timestamps and a bag
/// of instance attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub class: ClassKind,
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    attributes: Map<String, Value>,
}

// The file only keeps microseconds, so in-memory timestamps do the same.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn format_time(time: &DateTime<Utc>) -> String {
    time.format(TIME_FORMAT).to_string()
}

fn parse_time(field: &str, value: &Value) -> Result<DateTime<Utc>, StorageError> {
    let text = value.as_str()
        .ok_or_else(|| StorageError::InvalidRecord(format!("{} is not a string", field)))?;

    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(text)
        .map(|time| time.with_timezone(&Utc))
        .map_err(|e| StorageError::InvalidRecord(format!("bad {} '{}': {}", field, text, e)))
}

impl Record {
    pub fn new(class: ClassKind) -> Self {
        let now = now();
        Self {
            class,
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            attributes: Map::new(),
        }
    }

    /// The store key, `<ClassName>.<id>`.
    pub fn key(&self) -> String {
        format!("{}.{}", self.class.name(), self.id)
    }

    /// Instance attribute, falling back to the class-level default.
    pub fn get(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::String(self.id.clone())),
            "created_at" => Some(Value::String(format_time(&self.created_at))),
            "updated_at" => Some(Value::String(format_time(&self.updated_at))),
            "__class__" => Some(Value::String(self.class.name().to_string())),
            _ => self.attributes.get(name).cloned()
                .or_else(|| self.class.get_attribute(name).map(|attr| attr.default_value())),
        }
    }

    /// Sets an instance attribute, casting it to the class-declared type.
    /// Returns false, leaving the record untouched, for managed fields.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        if MANAGED_FIELDS.contains(&name) {
            return false;
        }
        let value = match self.class.get_attribute(name) {
            Some(attr) => attr.coerce(value),
            None => value,
        };
        self.attributes.insert(name.to_string(), value);
        true
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn touch(&mut self) {
        self.updated_at = now();
    }

    fn instance_dict(&self) -> Map<String, Value> {
        let mut dict = self.attributes.clone();
        dict.insert("id".to_string(), Value::String(self.id.clone()));
        dict.insert("created_at".to_string(), Value::String(format_time(&self.created_at)));
        dict.insert("updated_at".to_string(), Value::String(format_time(&self.updated_at)));
        dict
    }

    /// JSON form written to the store file.
    pub fn to_dict(&self) -> Map<String, Value> {
        let mut dict = self.instance_dict();
        dict.insert("__class__".to_string(), Value::String(self.class.name().to_string()));
        dict
    }

    pub fn from_dict(dict: &Map<String, Value>) -> Result<Self, StorageError> {
        let class_name = dict.get("__class__")
            .and_then(Value::as_str)
            .ok_or_else(|| StorageError::InvalidRecord("missing __class__".to_string()))?;
        let class = ClassKind::from_name(class_name)
            .ok_or_else(|| StorageError::InvalidRecord(format!("unknown class {}", class_name)))?;

        let id = dict.get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| StorageError::InvalidRecord("missing id".to_string()))?
            .to_string();

        let created_at = match dict.get("created_at") {
            Some(value) => parse_time("created_at", value)?,
            None => now(),
        };
        let updated_at = match dict.get("updated_at") {
            Some(value) => parse_time("updated_at", value)?,
            None => now(),
        };

        let attributes = dict.iter()
            .filter(|(key, _)| !MANAGED_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Self { class, id, created_at, updated_at, attributes })
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dict = Value::Object(self.instance_dict());
        write!(f, "[{}] ({}) {}", self.class.name(), self.id, dict)
    }
}
