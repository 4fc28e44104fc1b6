//! Type-safe schema generation for Gemini structured outputs.
//!
//! Uses the `schemars` crate to generate JSON schemas from Rust types, then
//! rewrites them into the OpenAPI subset accepted by `responseSchema`.
//!
//! # Example
//!
//! ```rust,ignore
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use gemini_client::StructuredOutput;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Trend {
//!     name: String,
//!     techniques: Vec<String>,
//! }
//!
//! let schema = Trend::gemini_schema();
//! ```

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Keys that `responseSchema` rejects or ignores.
const UNSUPPORTED_KEYS: &[&str] = &[
    "$schema",
    "$id",
    "definitions",
    "title",
    "additionalProperties",
    "default",
    "examples",
    "format",
];

/// Trait for types that can be used as Gemini structured output.
///
/// Automatically implemented for any type that implements `JsonSchema + DeserializeOwned`.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Generate a Gemini-compatible response schema for this type.
    ///
    /// Gemini requires:
    /// 1. Fully inlined schemas (no `$ref`)
    /// 2. Upper-case OpenAPI type names and `nullable` instead of `["T", "null"]`
    /// 3. No JSON-Schema-only keywords (`additionalProperties`, `definitions`, ...)
    ///
    /// Every property is listed in `required` so the model fills all fields.
    fn gemini_schema() -> Value {
        let schema = schema_for!(Self);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        // Step 1: Inline all $ref references
        inline_refs(&mut value);

        // Step 2: Rewrite into the OpenAPI subset
        to_openapi_subset(&mut value);

        value
    }

    /// Get the schema name for this type.
    fn type_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// Inline all $ref references by replacing them with the actual schema from definitions.
fn inline_refs(value: &mut Value) {
    let definitions = if let Value::Object(map) = value {
        map.get("definitions").cloned()
    } else {
        None
    };

    if let Some(defs) = definitions {
        inline_refs_recursive(value, &defs);
    }
}

fn inline_refs_recursive(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(ref_path)) = map.get("$ref").cloned() {
                if let Some(type_name) = ref_path.strip_prefix("#/definitions/") {
                    if let Some(def) = definitions.get(type_name) {
                        // Keep sibling keys such as `description` next to the ref
                        let mut inlined = def.clone();
                        if let Value::Object(inlined_map) = &mut inlined {
                            for (k, v) in map.iter() {
                                if k != "$ref" {
                                    inlined_map.insert(k.clone(), v.clone());
                                }
                            }
                        }
                        *value = inlined;
                        inline_refs_recursive(value, definitions);
                        return;
                    }
                }
            }

            for (_, v) in map.iter_mut() {
                inline_refs_recursive(v, definitions);
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                inline_refs_recursive(item, definitions);
            }
        }
        _ => {}
    }
}

/// Rewrite a (ref-free) JSON schema into Gemini's OpenAPI subset.
fn to_openapi_subset(value: &mut Value) {
    match value {
        Value::Object(map) => {
            collapse_single_all_of(map);
            collapse_nullable_any_of(map);

            for key in UNSUPPORTED_KEYS {
                map.remove(*key);
            }

            rewrite_type(map);

            if map.get("type") == Some(&Value::String("OBJECT".to_string())) {
                if let Some(Value::Object(props)) = map.get("properties") {
                    let all_keys: Vec<Value> =
                        props.keys().map(|k| Value::String(k.clone())).collect();
                    map.insert("required".to_string(), Value::Array(all_keys));
                }
            }

            // `properties` is a name -> schema map; recurse into each schema
            // without treating property names as keywords.
            if let Some(Value::Object(props)) = map.get_mut("properties") {
                for (_, prop) in props.iter_mut() {
                    to_openapi_subset(prop);
                }
            }
            for key in ["items", "anyOf"] {
                if let Some(v) = map.get_mut(key) {
                    to_openapi_subset(v);
                }
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                to_openapi_subset(item);
            }
        }
        _ => {}
    }
}

/// schemars wraps a described `$ref` as `allOf: [X]`; unwrap it.
fn collapse_single_all_of(map: &mut Map<String, Value>) {
    let inner = match map.get("allOf") {
        Some(Value::Array(variants)) if variants.len() == 1 => match &variants[0] {
            Value::Object(inner) => inner.clone(),
            _ => return,
        },
        _ => return,
    };

    map.remove("allOf");
    for (k, v) in inner {
        map.entry(k).or_insert(v);
    }
}

/// `anyOf: [X, {type: null}]` becomes `X` with `nullable: true`.
fn collapse_nullable_any_of(map: &mut Map<String, Value>) {
    let Some(Value::Array(variants)) = map.get("anyOf") else {
        return;
    };

    let is_null = |v: &Value| v.get("type") == Some(&Value::String("null".to_string()));
    if variants.len() != 2 || !variants.iter().any(is_null) {
        return;
    }

    let Some(Value::Object(inner)) = variants.iter().find(|v| !is_null(v)).cloned() else {
        return;
    };

    map.remove("anyOf");
    for (k, v) in inner {
        map.entry(k).or_insert(v);
    }
    map.insert("nullable".to_string(), Value::Bool(true));
}

/// Upper-case the type name; `["T", "null"]` becomes `T` plus `nullable`.
fn rewrite_type(map: &mut Map<String, Value>) {
    let new_type = match map.get("type") {
        Some(Value::String(t)) => Some((t.to_uppercase(), false)),
        Some(Value::Array(types)) => {
            let nullable = types.iter().any(|t| t == "null");
            types
                .iter()
                .filter_map(|t| t.as_str())
                .find(|t| *t != "null")
                .map(|t| (t.to_uppercase(), nullable))
        }
        _ => None,
    };

    if let Some((type_name, nullable)) = new_type {
        map.insert("type".to_string(), Value::String(type_name));
        if nullable {
            map.insert("nullable".to_string(), Value::Bool(true));
        }
    }
}
