use anyhow::{Context, Result, anyhow, bail};
use schemars::{Schema, schema_for};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
}

#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub required: bool,
    pub kind: FieldKind,
    pub default: Option<Value>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// `Option<T>` field: an empty answer maps to `null`.
    pub nullable: bool,
    /// Set for path fields marked `x-file`; lists the accepted extensions.
    pub file_extensions: Option<Vec<String>>,
}

impl FieldSpec {
    pub fn is_file(&self) -> bool {
        self.file_extensions.is_some()
    }
}

// Return the whole schema for T
pub fn schema_for<T: schemars::JsonSchema>() -> Schema {
    schema_for!(T)
}

pub fn specs_for_kind(root: &Schema, kind_key: &str) -> Result<Vec<FieldSpec>> {
    let root_obj = root.as_object().context("root schema is not an object")?;

    let alts = root_obj
        .get("oneOf")
        .or_else(|| root_obj.get("anyOf"))
        .and_then(|v| v.as_array())
        .context("missing oneOf/anyOf")?;

    for branch in alts {
        let bobj = branch.as_object().context("branch is not object")?;
        let props = match bobj.get("properties").and_then(|v| v.as_object()) {
            Some(p) => p,
            None => continue,
        };

        if !discriminant_matches(props, kind_key) {
            continue;
        }

        let params_val = match props.get("params") {
            None => return Ok(vec![]),
            Some(v) => v,
        };

        let mut params_obj = match params_val.as_object() {
            Some(o) => o,
            None => return Ok(vec![]),
        };

        params_obj = match resolve_ref_obj(root_obj, params_obj) {
            Some(o) => o,
            None => return Ok(vec![]),
        };

        return field_specs(root_obj, params_obj);
    }

    bail!("no branch found for type={kind_key}");
}

/// Field specs of a plain (non-enum) parameter struct.
pub fn specs_for_struct(root: &Schema) -> Result<Vec<FieldSpec>> {
    let root_obj = root.as_object().context("root schema is not an object")?;
    field_specs(root_obj, root_obj)
}

fn field_specs(
    root_obj: &Map<String, Value>,
    params_obj: &Map<String, Value>,
) -> Result<Vec<FieldSpec>> {
    let Some(params_props) = params_obj.get("properties").and_then(|v| v.as_object()) else {
        return Ok(vec![]);
    };

    let required: Vec<String> = params_obj
        .get("required")
        .and_then(|v| v.as_array())
        .map(|a| {
            a.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    let mut out = Vec::new();
    for (name, field_schema) in params_props {
        let mut fs_obj = field_schema
            .as_object()
            .context("field schema not object")?;

        if fs_obj.get("$ref").is_some() {
            fs_obj = resolve_ref_obj(root_obj, fs_obj)
                .ok_or_else(|| anyhow!("failed to resolve field $ref for '{name}'"))?;
        }

        let title = fs_obj
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or(name)
            .to_string();

        let description = fs_obj
            .get("description")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let default = fs_obj.get("default").cloned();

        let Some(kind) = detect_field_kind(fs_obj.get("type")) else {
            continue;
        };
        let nullable = is_nullable(fs_obj.get("type"));

        let file_extensions = fs_obj
            .get("x-file")
            .and_then(|v| v.as_bool())
            .filter(|is_file| *is_file)
            .map(|_| {
                fs_obj
                    .get("x-extensions")
                    .and_then(|v| v.as_array())
                    .map(|a| {
                        a.iter()
                            .filter_map(|e| e.as_str().map(str::to_string))
                            .collect()
                    })
                    .unwrap_or_default()
            });

        let min = fs_obj
            .get("minimum")
            .or_else(|| fs_obj.get("exclusiveMinimum"))
            .and_then(|v| v.as_f64());

        let max = fs_obj
            .get("maximum")
            .or_else(|| fs_obj.get("exclusiveMaximum"))
            .and_then(|v| v.as_f64());

        out.push(FieldSpec {
            name: name.clone(),
            title,
            description,
            required: required.iter().any(|r| r == name),
            kind,
            default,
            min,
            max,
            nullable,
            file_extensions,
        });
    }

    Ok(out)
}

fn discriminant_matches(props: &Map<String, Value>, kind_key: &str) -> bool {
    let Some(tval) = props.get("type") else {
        return false;
    };
    let Some(tobj) = tval.as_object() else {
        return false;
    };

    if tobj.get("const").and_then(|v| v.as_str()) == Some(kind_key) {
        return true;
    }
    if let Some(arr) = tobj.get("enum").and_then(|v| v.as_array()) {
        if arr.len() == 1 && arr[0].as_str() == Some(kind_key) {
            return true;
        }
    }
    false
}

/// Resolve a local $ref like "#/$defs/CsvColumnParameters" against the root object.
/// Returns the referenced object map, or None if it can't be resolved.
fn resolve_ref_obj<'a>(
    root_obj: &'a Map<String, Value>,
    obj: &'a Map<String, Value>,
) -> Option<&'a Map<String, Value>> {
    match obj.get("$ref") {
        Some(Value::String(r)) => {
            let path = r.strip_prefix("#/")?;
            let mut cur: &Map<String, Value> = root_obj;
            for raw_seg in path.split('/') {
                // JSON Pointer unescape (~1 => /, ~0 => ~)
                let seg = raw_seg.replace("~1", "/").replace("~0", "~");
                cur = cur.get(&seg)?.as_object()?;
            }
            Some(cur)
        }
        _ => Some(obj),
    }
}

fn kind_of(name: &str) -> Option<FieldKind> {
    match name {
        "string" => Some(FieldKind::String),
        "integer" => Some(FieldKind::Integer),
        "number" => Some(FieldKind::Number),
        "boolean" => Some(FieldKind::Boolean),
        _ => None,
    }
}

fn detect_field_kind(ty: Option<&Value>) -> Option<FieldKind> {
    match ty {
        Some(Value::String(s)) => kind_of(s),
        // unions like ["integer", "null"] for Option<T>
        Some(Value::Array(arr)) => arr.iter().filter_map(|v| v.as_str()).find_map(kind_of),
        _ => None,
    }
}

fn is_nullable(ty: Option<&Value>) -> bool {
    matches!(ty, Some(Value::Array(arr)) if arr.iter().any(|v| v.as_str() == Some("null")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::types::choices::{FilterParameters, StreamChoice, UIChoice};

    fn by_name<'a>(specs: &'a [FieldSpec], name: &str) -> &'a FieldSpec {
        specs.iter().find(|s| s.name == name).unwrap()
    }

    #[test]
    fn csv_branch_fields() {
        let specs = specs_for_kind(&StreamChoice::schema(), "csv-column").unwrap();

        let path = by_name(&specs, "path");
        assert_eq!(path.kind, FieldKind::String);
        assert!(path.required);
        assert_eq!(path.file_extensions, Some(vec!["csv".to_string()]));

        let limit = by_name(&specs, "limit");
        assert_eq!(limit.kind, FieldKind::Integer);
        assert!(limit.nullable);
        assert!(!limit.required);
        assert!(!limit.is_file());

        let column = by_name(&specs, "column");
        assert!(!column.nullable);
        assert_eq!(column.default, Some(Value::from("awa_deg")));
    }

    #[test]
    fn unknown_branch_is_an_error() {
        assert!(specs_for_kind(&StreamChoice::schema(), "parquet-file").is_err());
    }

    #[test]
    fn plain_struct_fields() {
        let specs = specs_for_struct(&schema_for::<FilterParameters>()).unwrap();
        let names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["initial_estimate", "std_initial", "std_meas", "std_noise"]
        );
        assert!(specs.iter().all(|s| s.kind == FieldKind::Number));
        assert_eq!(by_name(&specs, "std_meas").default, Some(Value::from(0.635)));
    }
}
