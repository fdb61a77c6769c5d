use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrType {
    String,
    Integer,
    Float,
    List,
}

/// A class-level attribute and its declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDef {
    pub name: &'static str,
    pub attr_type: AttrType,
}

impl AttributeDef {
    pub const fn new(name: &'static str, attr_type: AttrType) -> Self {
        Self { name, attr_type }
    }

    pub fn default_value(&self) -> Value {
        match self.attr_type {
            AttrType::String => Value::String(String::new()),
            AttrType::Integer => Value::from(0),
            AttrType::Float => Value::from(0.0),
            AttrType::List => Value::Array(Vec::new()),
        }
    }

    pub fn validate_value(&self, value: &Value) -> bool {
        match self.attr_type {
            AttrType::String => value.is_string(),
            AttrType::Integer => value.is_i64() || value.is_u64(),
            AttrType::Float => value.is_number(),
            AttrType::List => value.is_array(),
        }
    }

    /// Casts `value` to the declared type. Values that cannot be cast are
    /// returned unchanged.
    pub fn coerce(&self, value: Value) -> Value {
        if self.validate_value(&value) {
            return match (self.attr_type, &value) {
                (AttrType::Float, Value::Number(n)) => {
                    n.as_f64().map(Value::from).unwrap_or(value)
                }
                _ => value,
            };
        }

        match (self.attr_type, &value) {
            (AttrType::String, Value::Number(n)) => Value::String(n.to_string()),
            (AttrType::String, Value::Bool(b)) => Value::String(b.to_string()),
            (AttrType::Integer, Value::String(s)) => {
                s.trim().parse::<i64>().map(Value::from).unwrap_or(value)
            }
            (AttrType::Float, Value::String(s)) => {
                s.trim().parse::<f64>().map(Value::from).unwrap_or(value)
            }
            _ => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_integer() {
        let def = AttributeDef::new("number_rooms", AttrType::Integer);
        assert_eq!(def.coerce(json!("4")), json!(4));
        assert_eq!(def.coerce(json!(7)), json!(7));
        // Unparseable input is kept as given
        assert_eq!(def.coerce(json!("many")), json!("many"));
    }

    #[test]
    fn test_coerce_float() {
        let def = AttributeDef::new("latitude", AttrType::Float);
        assert_eq!(def.coerce(json!("37.77")), json!(37.77));
        assert_eq!(def.coerce(json!(3)), json!(3.0));
    }

    #[test]
    fn test_coerce_string() {
        let def = AttributeDef::new("first_name", AttrType::String);
        assert_eq!(def.coerce(json!(89)), json!("89"));
        assert_eq!(def.coerce(json!("Betty")), json!("Betty"));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(AttributeDef::new("a", AttrType::String).default_value(), json!(""));
        assert_eq!(AttributeDef::new("a", AttrType::Integer).default_value(), json!(0));
        assert_eq!(AttributeDef::new("a", AttrType::List).default_value(), json!([]));
    }
}
