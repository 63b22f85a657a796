//! Build-time define values and structural type inference.
//!
//! A define is a named, build-time value that the engine emits into the
//! generated source tree as a type-annotated constant declaration. Values
//! are JSON-like, plus one extra shape JSON cannot express: a function
//! whose source text is carried verbatim.

use std::collections::BTreeMap;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Reserved object key marking a function-valued define in JSON input.
///
/// A JSON object with exactly this key and a string value converts to
/// [`DefineValue::Function`]; every other object converts to a struct.
pub const FUNCTION_KEY: &str = "$function";

/// Element type tag inferred for an empty array.
pub const WILDCARD_TAG: &str = "*";

/// A define value as a closed tagged variant.
///
/// Conversion from [`serde_json::Value`] is total, so downstream printing
/// can match exhaustively instead of re-inspecting runtime shapes. Function
/// text is trusted as-is: it is never validated or escaped, and callers are
/// responsible for supplying only safe, self-contained source text.
#[derive(Debug, Clone, PartialEq)]
pub enum DefineValue {
    /// The JSON `null` value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number, kept in its serde representation so the emitted literal
    /// matches the input text.
    Number(serde_json::Number),
    /// A string.
    String(String),
    /// Function source text, embedded verbatim in generated output.
    Function(String),
    /// An array of define values.
    Array(Vec<DefineValue>),
    /// A nested struct with deterministically ordered members.
    Struct(BTreeMap<String, DefineValue>),
}

impl DefineValue {
    /// Creates a function-valued define from verbatim source text.
    pub fn function(text: impl Into<String>) -> Self {
        DefineValue::Function(text.into())
    }

    /// Converts an arbitrary JSON value into a define value.
    ///
    /// Objects carrying exactly the reserved [`FUNCTION_KEY`] with a string
    /// value become functions; all other objects become structs.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => DefineValue::Null,
            serde_json::Value::Bool(b) => DefineValue::Bool(b),
            serde_json::Value::Number(n) => DefineValue::Number(n),
            serde_json::Value::String(s) => DefineValue::String(s),
            serde_json::Value::Array(items) => {
                DefineValue::Array(items.into_iter().map(Self::from_json).collect())
            }
            serde_json::Value::Object(mut map) => {
                if map.len() == 1
                    && matches!(map.get(FUNCTION_KEY), Some(serde_json::Value::String(_)))
                {
                    if let Some(serde_json::Value::String(text)) = map.remove(FUNCTION_KEY) {
                        return DefineValue::Function(text);
                    }
                }
                DefineValue::Struct(
                    map.into_iter()
                        .map(|(key, value)| (key, Self::from_json(value)))
                        .collect(),
                )
            }
        }
    }

    /// Converts the define value back into its JSON encoding.
    ///
    /// Functions round-trip through the reserved [`FUNCTION_KEY`] object
    /// form.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            DefineValue::Null => serde_json::Value::Null,
            DefineValue::Bool(b) => serde_json::Value::Bool(*b),
            DefineValue::Number(n) => serde_json::Value::Number(n.clone()),
            DefineValue::String(s) => serde_json::Value::String(s.clone()),
            DefineValue::Function(text) => {
                let mut map = serde_json::Map::with_capacity(1);
                map.insert(
                    FUNCTION_KEY.to_string(),
                    serde_json::Value::String(text.clone()),
                );
                serde_json::Value::Object(map)
            }
            DefineValue::Array(items) => {
                serde_json::Value::Array(items.iter().map(Self::to_json).collect())
            }
            DefineValue::Struct(members) => serde_json::Value::Object(
                members
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }

    /// Returns the inferred structural type tag for this value.
    ///
    /// Arrays infer `Array<T>` where `T` is the pipe-joined union of the
    /// de-duplicated element tags in first-seen order, or [`WILDCARD_TAG`]
    /// for an empty array.
    pub fn type_tag(&self) -> String {
        match self {
            DefineValue::Null => "null".to_string(),
            DefineValue::Bool(_) => "boolean".to_string(),
            DefineValue::Number(_) => "number".to_string(),
            DefineValue::String(_) => "string".to_string(),
            DefineValue::Function(_) => "Function".to_string(),
            DefineValue::Struct(_) => "Object".to_string(),
            DefineValue::Array(items) => {
                let mut element_tags: Vec<String> = Vec::new();
                for item in items {
                    let tag = item.type_tag();
                    if !element_tags.contains(&tag) {
                        element_tags.push(tag);
                    }
                }
                if element_tags.is_empty() {
                    format!("Array<{}>", WILDCARD_TAG)
                } else {
                    format!("Array<{}>", element_tags.join("|"))
                }
            }
        }
    }

    /// Returns true for struct values.
    pub fn is_struct(&self) -> bool {
        matches!(self, DefineValue::Struct(_))
    }

    /// Returns true for function values.
    pub fn is_function(&self) -> bool {
        matches!(self, DefineValue::Function(_))
    }
}

impl From<serde_json::Value> for DefineValue {
    fn from(value: serde_json::Value) -> Self {
        Self::from_json(value)
    }
}

impl Serialize for DefineValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DefineValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_json(value))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_json_primitives() {
        assert_eq!(DefineValue::from_json(json!(null)), DefineValue::Null);
        assert_eq!(DefineValue::from_json(json!(true)), DefineValue::Bool(true));
        assert_eq!(
            DefineValue::from_json(json!("x")),
            DefineValue::String("x".to_string())
        );
        assert!(matches!(
            DefineValue::from_json(json!(1.5)),
            DefineValue::Number(_)
        ));
    }

    #[test]
    fn test_from_json_function_marker() {
        let value = DefineValue::from_json(json!({ "$function": "() => 1" }));
        assert_eq!(value, DefineValue::Function("() => 1".to_string()));
    }

    #[test]
    fn test_from_json_object_with_extra_keys_is_struct() {
        let value = DefineValue::from_json(json!({ "$function": "() => 1", "other": 2 }));
        assert!(value.is_struct());
    }

    #[test]
    fn test_from_json_non_string_function_marker_is_struct() {
        let value = DefineValue::from_json(json!({ "$function": 42 }));
        let DefineValue::Struct(members) = value else {
            panic!("expected struct");
        };
        assert_eq!(members.len(), 1);
        assert!(members.contains_key("$function"));
    }

    #[test]
    fn test_from_json_nested_struct() {
        let value = DefineValue::from_json(json!({ "outer": { "inner": [1, 2] } }));
        let DefineValue::Struct(members) = value else {
            panic!("expected struct");
        };
        assert!(members["outer"].is_struct());
    }

    #[test]
    fn test_type_tag_primitives() {
        assert_eq!(DefineValue::Null.type_tag(), "null");
        assert_eq!(DefineValue::Bool(false).type_tag(), "boolean");
        assert_eq!(DefineValue::from_json(json!(3)).type_tag(), "number");
        assert_eq!(DefineValue::from_json(json!("s")).type_tag(), "string");
        assert_eq!(DefineValue::function("f").type_tag(), "Function");
        assert_eq!(DefineValue::from_json(json!({})).type_tag(), "Object");
    }

    #[test]
    fn test_type_tag_empty_array_is_wildcard() {
        assert_eq!(DefineValue::from_json(json!([])).type_tag(), "Array<*>");
    }

    #[test]
    fn test_type_tag_homogeneous_array() {
        let value = DefineValue::from_json(json!([1, 2, 3]));
        assert_eq!(value.type_tag(), "Array<number>");
    }

    #[test]
    fn test_type_tag_heterogeneous_array_union() {
        let value = DefineValue::from_json(json!([1, "a", null]));
        let tag = value.type_tag();
        assert!(tag.starts_with("Array<") && tag.ends_with('>'));
        let union: Vec<&str> = tag["Array<".len()..tag.len() - 1].split('|').collect();
        assert_eq!(union.len(), 3);
        assert!(union.contains(&"number"));
        assert!(union.contains(&"string"));
        assert!(union.contains(&"null"));
    }

    #[test]
    fn test_type_tag_deduplicates_union_members() {
        let value = DefineValue::from_json(json!([1, 2, "a", 3]));
        assert_eq!(value.type_tag(), "Array<number|string>");
    }

    #[test]
    fn test_serde_round_trip_preserves_function() {
        let original = DefineValue::from_json(json!({
            "handler": { "$function": "function () { return 0; }" },
            "count": 4
        }));
        let encoded = serde_json::to_string(&original).expect("serialize");
        let decoded: DefineValue = serde_json::from_str(&encoded).expect("deserialize");
        assert_eq!(decoded, original);
    }
}
