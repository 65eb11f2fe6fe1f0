//! Tolerant parsing of raw JSON/YAML into a [`Document`]
//!
//! Only a non-object root is rejected. Everything below it is read field by
//! field and whatever has the wrong shape is skipped.

use super::*;
use crate::errors::{Error, Result};
use serde_json::{Map, Value};

/// Parses document text, choosing JSON or YAML by its first significant byte
pub fn parse_str(content: &str) -> Result<Document> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();
    if trimmed.is_empty() {
        return Err(Error::parse("document is empty"));
    }

    let raw = if trimmed.starts_with('{') {
        serde_json::from_str::<Value>(trimmed)?
    } else {
        let mut yaml: serde_yaml::Value = serde_yaml::from_str(trimmed)?;
        yaml.apply_merge()?;
        yaml_to_json(yaml)?
    };

    parse_document(&raw)
}

/// Converts a YAML tree into the JSON value model
///
/// Non-string mapping keys (`200:`, `true:`) become their string form and
/// tags are dropped.
fn yaml_to_json(value: serde_yaml::Value) -> Result<Value> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => yaml_number(&n),
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(seq) => Value::Array(
            seq.into_iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut out = Map::new();
            for (key, value) in mapping {
                out.insert(yaml_key(key)?, yaml_to_json(value)?);
            }
            Value::Object(out)
        }
        Yaml::Tagged(tagged) => {
            let tagged = *tagged;
            yaml_to_json(tagged.value)?
        }
    })
}

fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::from(i)
    } else if let Some(u) = n.as_u64() {
        Value::from(u)
    } else {
        // .nan and .inf have no JSON form
        n.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

fn yaml_key(key: serde_yaml::Value) -> Result<String> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => {
            let tagged = *tagged;
            yaml_key(tagged.value)
        }
        Yaml::Sequence(_) | Yaml::Mapping(_) => {
            Err(Error::parse("mapping keys must be scalars"))
        }
    }
}

/// Builds a [`Document`] from a raw JSON value
pub fn parse_document(raw: &Value) -> Result<Document> {
    let root = raw
        .as_object()
        .ok_or_else(|| Error::invalid_document("document root must be an object"))?;

    let servers = root
        .get("servers")
        .and_then(|v| v.as_array())
        .map(|arr| parse_servers(arr))
        .unwrap_or_default();

    let paths = root
        .get("paths")
        .and_then(|v| v.as_object())
        .map(parse_paths)
        .unwrap_or_default();

    let components = root
        .get("components")
        .and_then(|v| v.as_object())
        .map(parse_components)
        .unwrap_or_default();

    Ok(Document {
        info: parse_info(root.get("info")),
        servers,
        paths,
        components,
    })
}

fn str_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(|v| v.as_str()).map(String::from)
}

fn bool_field(obj: &Map<String, Value>, key: &str) -> Option<bool> {
    obj.get(key).and_then(|v| v.as_bool())
}

fn string_list(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    obj.get(key)
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_info(value: Option<&Value>) -> Info {
    let Some(info) = value.and_then(|v| v.as_object()) else {
        return Info::default();
    };

    Info {
        title: str_field(info, "title").unwrap_or_default(),
        description: str_field(info, "description"),
        version: str_field(info, "version").unwrap_or_default(),
    }
}

fn parse_servers(arr: &[Value]) -> Vec<Server> {
    arr.iter()
        .filter_map(|v| v.as_object())
        .filter_map(|obj| {
            Some(Server {
                url: obj.get("url")?.as_str()?.to_string(),
                description: str_field(obj, "description"),
            })
        })
        .collect()
}

fn parse_paths(obj: &Map<String, Value>) -> Vec<(String, PathItem)> {
    obj.iter()
        .filter_map(|(path, item)| {
            item.as_object()
                .map(|item_obj| (path.clone(), parse_path_item(item_obj)))
        })
        .collect()
}

fn parse_path_item(obj: &Map<String, Value>) -> PathItem {
    let mut item = PathItem {
        parameters: parse_ref_list(obj.get("parameters"), parse_parameter),
        ..Default::default()
    };

    for method in crate::types::HttpMethod::ALL {
        let key = method.as_str().to_ascii_lowercase();
        *item.operation_mut(method) = obj
            .get(&key)
            .and_then(|v| v.as_object())
            .map(parse_operation);
    }

    item
}

fn parse_operation(obj: &Map<String, Value>) -> Operation {
    let responses = obj
        .get("responses")
        .and_then(|v| v.as_object())
        .map(|responses| {
            responses
                .iter()
                .filter_map(|(code, value)| {
                    parse_ref_or(value, parse_response).map(|r| (code.clone(), r))
                })
                .collect()
        })
        .unwrap_or_default();

    Operation {
        operation_id: str_field(obj, "operationId"),
        summary: str_field(obj, "summary"),
        description: str_field(obj, "description"),
        tags: string_list(obj, "tags"),
        parameters: parse_ref_list(obj.get("parameters"), parse_parameter),
        request_body: obj
            .get("requestBody")
            .and_then(|v| parse_ref_or(v, parse_request_body)),
        responses,
    }
}

/// Reads either a `$ref` object or an inline node
fn parse_ref_or<T>(value: &Value, parse: fn(&Map<String, Value>) -> T) -> Option<RefOr<T>> {
    let obj = value.as_object()?;
    match obj.get("$ref").and_then(|v| v.as_str()) {
        Some(reference) => Some(RefOr::Ref(reference.to_string())),
        None => Some(RefOr::Item(parse(obj))),
    }
}

fn parse_ref_list<T>(value: Option<&Value>, parse: fn(&Map<String, Value>) -> T) -> Vec<RefOr<T>> {
    value
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().filter_map(|v| parse_ref_or(v, parse)).collect())
        .unwrap_or_default()
}

fn parse_ref_map<T, M>(value: Option<&Value>, parse: fn(&Map<String, Value>) -> T) -> M
where
    M: FromIterator<(String, RefOr<T>)> + Default,
{
    value
        .and_then(|v| v.as_object())
        .map(|obj| {
            obj.iter()
                .filter_map(|(name, v)| parse_ref_or(v, parse).map(|node| (name.clone(), node)))
                .collect()
        })
        .unwrap_or_default()
}

fn parse_parameter(obj: &Map<String, Value>) -> Parameter {
    Parameter {
        name: str_field(obj, "name").unwrap_or_default(),
        location: str_field(obj, "in").unwrap_or_default(),
        description: str_field(obj, "description"),
        required: bool_field(obj, "required"),
        schema: obj.get("schema").and_then(|v| parse_ref_or(v, parse_schema)),
    }
}

fn parse_request_body(obj: &Map<String, Value>) -> RequestBody {
    RequestBody {
        description: str_field(obj, "description"),
        content: parse_content(obj.get("content")),
        required: bool_field(obj, "required"),
    }
}

fn parse_response(obj: &Map<String, Value>) -> Response {
    Response {
        description: str_field(obj, "description"),
        content: parse_content(obj.get("content")),
        headers: parse_ref_map(obj.get("headers"), parse_header),
    }
}

fn parse_header(obj: &Map<String, Value>) -> Header {
    Header {
        description: str_field(obj, "description"),
        schema: obj.get("schema").and_then(|v| parse_ref_or(v, parse_schema)),
    }
}

fn parse_content(value: Option<&Value>) -> BTreeMap<String, MediaType> {
    value
        .and_then(|v| v.as_object())
        .map(|obj| {
            obj.iter()
                .filter_map(|(media_type, v)| {
                    let entry = v.as_object()?;
                    Some((
                        media_type.clone(),
                        MediaType {
                            schema: entry
                                .get("schema")
                                .and_then(|s| parse_ref_or(s, parse_schema)),
                        },
                    ))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn parse_schema(obj: &Map<String, Value>) -> SchemaObject {
    SchemaObject {
        schema_type: obj.get("type").and_then(schema_type),
        format: str_field(obj, "format"),
        description: str_field(obj, "description"),
        required: string_list(obj, "required"),
        properties: parse_ref_map(obj.get("properties"), parse_schema),
        items: obj
            .get("items")
            .and_then(|v| parse_ref_or(v, parse_schema))
            .map(Box::new),
        enum_values: obj
            .get("enum")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default(),
    }
}

/// 3.0 uses a single string, 3.1 allows a list such as `["string", "null"]`
fn schema_type(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(types) => types
            .iter()
            .filter_map(|t| t.as_str())
            .find(|t| *t != "null")
            .map(String::from),
        _ => None,
    }
}

fn parse_components(obj: &Map<String, Value>) -> Components {
    Components {
        schemas: parse_ref_map(obj.get("schemas"), parse_schema),
        parameters: parse_ref_map(obj.get("parameters"), parse_parameter),
        request_bodies: parse_ref_map(obj.get("requestBodies"), parse_request_body),
        responses: parse_ref_map(obj.get("responses"), parse_response),
        headers: parse_ref_map(obj.get("headers"), parse_header),
    }
}
