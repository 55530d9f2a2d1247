#![deny(missing_docs)]

//! # OpenAPI Loader
//!
//! Deserializes an OpenAPI 3.x document (YAML or JSON) through shim
//! structs and maps it onto the [`SchemaGraph`]:
//!
//! - `GET`, `HEAD`, `OPTIONS`, `TRACE` operations become queries.
//! - `POST`, `PUT`, `PATCH`, `DELETE` operations become mutations.
//! - `webhooks` operations become subscriptions.
//! - `components.schemas` objects become object types.
//!
//! Root types are synthesised and detached from the name index, so a
//! component schema called `Query` remains an ordinary type.

use super::check_path_segment;
use crate::error::{AppError, AppResult};
use crate::schema::{
    FieldDef, InputValue, NamedType, ObjectType, OperationKind, OtherCategory, SchemaGraph,
    TagDef,
};
use heck::ToLowerCamelCase;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

/// Top-level document, reduced to what the walker needs.
#[derive(Deserialize, Default)]
#[serde(default)]
struct ShimOpenApi {
    paths: IndexMap<String, serde_yaml::Value>,
    webhooks: IndexMap<String, serde_yaml::Value>,
    components: ShimComponents,
    tags: Vec<ShimTag>,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ShimComponents {
    schemas: IndexMap<String, ShimSchema>,
    parameters: IndexMap<String, ShimParameter>,
    request_bodies: IndexMap<String, ShimRequestBody>,
}

#[derive(Deserialize)]
struct ShimTag {
    name: String,
    description: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ShimPathItem {
    parameters: Vec<RefOr<ShimParameter>>,
    get: Option<ShimOperation>,
    put: Option<ShimOperation>,
    post: Option<ShimOperation>,
    delete: Option<ShimOperation>,
    options: Option<ShimOperation>,
    head: Option<ShimOperation>,
    patch: Option<ShimOperation>,
    trace: Option<ShimOperation>,
}

impl ShimPathItem {
    /// Operations in OpenAPI field order, paired with their method.
    fn operations(self) -> Vec<(&'static str, ShimOperation)> {
        [
            ("get", self.get),
            ("put", self.put),
            ("post", self.post),
            ("delete", self.delete),
            ("options", self.options),
            ("head", self.head),
            ("patch", self.patch),
            ("trace", self.trace),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.map(|op| (method, op)))
        .collect()
    }
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ShimOperation {
    operation_id: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    tags: Vec<String>,
    parameters: Vec<RefOr<ShimParameter>>,
    request_body: Option<RefOr<ShimRequestBody>>,
}

#[derive(Deserialize, Clone)]
struct ShimParameter {
    name: String,
    #[serde(rename = "in")]
    location: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    schema: Option<ShimSchema>,
}

#[derive(Deserialize, Clone, Default)]
#[serde(default)]
struct ShimRequestBody {
    content: IndexMap<String, ShimMediaType>,
    required: bool,
}

#[derive(Deserialize, Clone, Default)]
#[serde(default)]
struct ShimMediaType {
    schema: Option<ShimSchema>,
}

#[derive(Deserialize, Clone)]
#[serde(untagged)]
enum RefOr<T> {
    Ref {
        #[serde(rename = "$ref")]
        reference: String,
    },
    Item(T),
}

#[derive(Deserialize, Clone)]
#[serde(untagged)]
enum ShimType {
    Single(String),
    Multiple(Vec<String>),
}

#[derive(Deserialize, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
struct ShimSchema {
    #[serde(rename = "$ref")]
    reference: Option<String>,
    #[serde(rename = "type")]
    schema_type: Option<ShimType>,
    format: Option<String>,
    items: Option<Box<ShimSchema>>,
    properties: IndexMap<String, ShimSchema>,
    required: Vec<String>,
    description: Option<String>,
    #[serde(rename = "enum")]
    enum_values: Vec<serde_yaml::Value>,
    all_of: Vec<ShimSchema>,
    one_of: Vec<ShimSchema>,
    any_of: Vec<ShimSchema>,
}

impl ShimSchema {
    fn is_object(&self) -> bool {
        !self.properties.is_empty()
            || matches!(&self.schema_type, Some(ShimType::Single(t)) if t == "object")
    }
}

/// Parses an OpenAPI document into a schema graph.
pub fn parse_openapi(source: &str, origin: &Path) -> AppResult<SchemaGraph> {
    let shim: ShimOpenApi = serde_yaml::from_str(source)
        .map_err(|e| AppError::schema_parse(origin, format!("Failed to parse OpenAPI: {}", e)))?;

    let mut graph = SchemaGraph::new();
    let mut roots: IndexMap<OperationKind, ObjectType> = IndexMap::new();

    for (path, raw) in &shim.paths {
        let item = path_item(path, raw, origin)?;
        let common = item.parameters.clone();
        for (method, op) in item.operations() {
            let kind = method_kind(method);
            let field = build_operation(&shim.components, method, path, &common, op, origin)?;
            push_operation(&mut roots, kind, field, origin)?;
        }
    }

    for (name, raw) in &shim.webhooks {
        let item = path_item(name, raw, origin)?;
        let common = item.parameters.clone();
        for (method, op) in item.operations() {
            let field = build_operation(&shim.components, method, name, &common, op, origin)?;
            push_operation(&mut roots, OperationKind::Subscription, field, origin)?;
        }
    }

    for kind in OperationKind::ALL {
        if let Some(root) = roots.shift_remove(&kind) {
            graph.add_detached_root(kind, root);
        }
    }

    for (name, schema) in &shim.components.schemas {
        check_path_segment(name, "Component", origin)?;
        graph.add_type(component_type(name, schema));
    }

    for tag in shim.tags {
        graph.add_tag(TagDef {
            name: tag.name,
            description: tag.description,
        });
    }

    Ok(graph)
}

fn path_item(key: &str, raw: &serde_yaml::Value, origin: &Path) -> AppResult<ShimPathItem> {
    if key.starts_with("x-") {
        return Ok(ShimPathItem::default());
    }
    serde_yaml::from_value(raw.clone()).map_err(|e| {
        AppError::schema_parse(origin, format!("Failed to parse path item '{}': {}", key, e))
    })
}

fn method_kind(method: &str) -> OperationKind {
    match method {
        "get" | "head" | "options" | "trace" => OperationKind::Query,
        _ => OperationKind::Mutation,
    }
}

fn push_operation(
    roots: &mut IndexMap<OperationKind, ObjectType>,
    kind: OperationKind,
    field: FieldDef,
    origin: &Path,
) -> AppResult<()> {
    let root = roots
        .entry(kind)
        .or_insert_with(|| ObjectType::new(kind.default_root_name()));
    if root.fields.iter().any(|f| f.name == field.name) {
        return Err(AppError::schema_parse(
            origin,
            format!("Duplicate {} operation '{}'", kind.as_str(), field.name),
        ));
    }
    root.fields.push(field);
    Ok(())
}

fn build_operation(
    components: &ShimComponents,
    method: &str,
    path: &str,
    common: &[RefOr<ShimParameter>],
    op: ShimOperation,
    origin: &Path,
) -> AppResult<FieldDef> {
    let name = op
        .operation_id
        .unwrap_or_else(|| format!("{} {}", method, path).to_lower_camel_case());
    check_path_segment(&name, "Operation", origin)?;
    for tag in &op.tags {
        check_path_segment(tag, "Tag", origin)?;
    }

    // Operation-level parameters override path-level ones with the same name + location.
    let mut params: Vec<ShimParameter> = Vec::new();
    for param in common.iter().chain(op.parameters.iter()) {
        let param = resolve_parameter(components, param, origin)?;
        match params
            .iter_mut()
            .find(|p| p.name == param.name && p.location == param.location)
        {
            Some(existing) => *existing = param,
            None => params.push(param),
        }
    }

    let mut arguments: Vec<InputValue> = params
        .iter()
        .map(|p| {
            let sig = p.schema.as_ref().map(signature).unwrap_or_else(|| "any".into());
            InputValue::new(p.name.as_str(), required_suffix(sig, p.required))
        })
        .collect();

    if let Some(body) = &op.request_body {
        let body = resolve_request_body(components, body, origin)?;
        let media = body
            .content
            .get("application/json")
            .or_else(|| body.content.values().next());
        let sig = media
            .and_then(|m| m.schema.as_ref())
            .map(signature)
            .unwrap_or_else(|| "any".into());
        arguments.push(InputValue::new("body", required_suffix(sig, body.required)));
    }

    Ok(FieldDef {
        name,
        description: op.description.or(op.summary),
        arguments,
        type_signature: String::new(),
        tags: op.tags,
    })
}

fn resolve_parameter(
    components: &ShimComponents,
    param: &RefOr<ShimParameter>,
    origin: &Path,
) -> AppResult<ShimParameter> {
    match param {
        RefOr::Item(p) => Ok(p.clone()),
        RefOr::Ref { reference } => components
            .parameters
            .get(ref_name(reference))
            .cloned()
            .ok_or_else(|| {
                AppError::schema_parse(origin, format!("Unresolved parameter '{}'", reference))
            }),
    }
}

fn resolve_request_body(
    components: &ShimComponents,
    body: &RefOr<ShimRequestBody>,
    origin: &Path,
) -> AppResult<ShimRequestBody> {
    match body {
        RefOr::Item(b) => Ok(b.clone()),
        RefOr::Ref { reference } => components
            .request_bodies
            .get(ref_name(reference))
            .cloned()
            .ok_or_else(|| {
                AppError::schema_parse(origin, format!("Unresolved request body '{}'", reference))
            }),
    }
}

fn component_type(name: &str, schema: &ShimSchema) -> NamedType {
    if !schema.is_object() {
        let category = if schema.enum_values.is_empty() {
            OtherCategory::Schema
        } else {
            OtherCategory::Enum
        };
        return NamedType::Other {
            name: name.to_string(),
            category,
        };
    }

    let mut obj = ObjectType::new(name);
    obj.description = schema.description.clone();
    obj.fields = schema
        .properties
        .iter()
        .map(|(prop, prop_schema)| FieldDef {
            name: prop.clone(),
            description: prop_schema.description.clone(),
            type_signature: required_suffix(signature(prop_schema), schema.required.contains(prop)),
            ..Default::default()
        })
        .collect();
    NamedType::Object(obj)
}

fn required_suffix(sig: String, required: bool) -> String {
    if required {
        format!("{}!", sig)
    } else {
        sig
    }
}

/// Last segment of a JSON pointer such as `#/components/schemas/Pet`.
fn ref_name(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

/// Renders a schema as a compact type signature.
fn signature(schema: &ShimSchema) -> String {
    if let Some(reference) = &schema.reference {
        return ref_name(reference).to_string();
    }
    let compose = |parts: &[ShimSchema], sep: &str| {
        parts.iter().map(signature).collect::<Vec<_>>().join(sep)
    };
    if !schema.one_of.is_empty() {
        return compose(&schema.one_of, " | ");
    }
    if !schema.any_of.is_empty() {
        return compose(&schema.any_of, " | ");
    }
    if !schema.all_of.is_empty() {
        return compose(&schema.all_of, " & ");
    }

    let items = || {
        schema
            .items
            .as_deref()
            .map(signature)
            .unwrap_or_else(|| "any".into())
    };
    let types: Vec<&str> = match &schema.schema_type {
        None => Vec::new(),
        Some(ShimType::Single(t)) => vec![t.as_str()],
        Some(ShimType::Multiple(ts)) => ts
            .iter()
            .map(String::as_str)
            .filter(|t| *t != "null")
            .collect(),
    };

    match types.as_slice() {
        [] if schema.items.is_some() => format!("[{}]", items()),
        [] if !schema.properties.is_empty() => "object".into(),
        [] => "any".into(),
        ["array"] => format!("[{}]", items()),
        [single] => match &schema.format {
            Some(format) => format!("{}<{}>", single, format),
            None => single.to_string(),
        },
        many => many.join(" | "),
    }
}
