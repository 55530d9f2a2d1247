//! # GraphQL SDL Loader
//!
//! Maps a `graphql_parser` schema document onto the [`SchemaGraph`].

use super::check_path_segment;
use crate::error::{AppError, AppResult};
use crate::schema::{
    FieldDef, InputValue, NamedType, ObjectType, OperationKind, OtherCategory, SchemaGraph,
};
use graphql_parser::schema::{
    parse_schema, Definition, Directive, Field, TypeDefinition, TypeExtension, Value,
};
use std::path::Path;

/// Directive used to group operations, e.g. `@tag(name: "Pets")`.
const TAG_DIRECTIVE: &str = "tag";

/// Parses GraphQL SDL into a schema graph.
pub fn parse_graphql(source: &str, origin: &Path) -> AppResult<SchemaGraph> {
    let document = parse_schema::<String>(source)
        .map_err(|e| AppError::schema_parse(origin, e.to_string()))?;

    let mut graph = SchemaGraph::new();
    let mut explicit_roots: Option<[Option<String>; 3]> = None;
    let mut extensions = Vec::new();

    for definition in document.definitions {
        match definition {
            Definition::SchemaDefinition(def) => {
                explicit_roots = Some([def.query, def.mutation, def.subscription]);
            }
            Definition::TypeDefinition(def) => {
                let ty = convert_type(def, origin)?;
                if graph.lookup(ty.name()).is_some() {
                    return Err(AppError::schema_parse(
                        origin,
                        format!("Type '{}' is defined more than once", ty.name()),
                    ));
                }
                graph.add_type(ty);
            }
            Definition::TypeExtension(TypeExtension::Object(ext)) => extensions.push(ext),
            Definition::TypeExtension(_) | Definition::DirectiveDefinition(_) => {}
        }
    }

    for ext in extensions {
        let id = graph.lookup(&ext.name).ok_or_else(|| {
            AppError::schema_parse(origin, format!("Cannot extend unknown type '{}'", ext.name))
        })?;
        let NamedType::Object(obj) = graph.get_mut(id) else {
            return Err(AppError::schema_parse(
                origin,
                format!("Type '{}' extended as an object but is not one", ext.name),
            ));
        };
        for field in ext.fields {
            push_field(obj, convert_field(field), origin)?;
        }
    }

    for (kind, name) in OperationKind::ALL.into_iter().zip(root_names(explicit_roots)) {
        let Some((name, required)) = name else {
            continue;
        };
        match graph.lookup(&name) {
            Some(id) if graph.get(id).as_object().is_some() => graph.set_root(kind, id),
            _ if required => {
                return Err(AppError::schema_parse(
                    origin,
                    format!("Root {} type '{}' is not a defined object type", kind.as_str(), name),
                ));
            }
            _ => {}
        }
    }

    Ok(graph)
}

/// Root type names per kind, flagged with whether they were declared
/// explicitly (and therefore must exist).
fn root_names(explicit: Option<[Option<String>; 3]>) -> [Option<(String, bool)>; 3] {
    match explicit {
        Some(names) => names.map(|name| name.map(|n| (n, true))),
        None => OperationKind::ALL.map(|kind| Some((kind.default_root_name().to_string(), false))),
    }
}

fn convert_type(def: TypeDefinition<'_, String>, origin: &Path) -> AppResult<NamedType> {
    let other = |name: String, category| NamedType::Other { name, category };

    Ok(match def {
        TypeDefinition::Object(object) => {
            let mut obj = ObjectType::new(object.name);
            obj.description = object.description;
            for field in object.fields {
                push_field(&mut obj, convert_field(field), origin)?;
            }
            NamedType::Object(obj)
        }
        TypeDefinition::Scalar(t) => other(t.name, OtherCategory::Scalar),
        TypeDefinition::Enum(t) => other(t.name, OtherCategory::Enum),
        TypeDefinition::Union(t) => other(t.name, OtherCategory::Union),
        TypeDefinition::Interface(t) => other(t.name, OtherCategory::Interface),
        TypeDefinition::InputObject(t) => other(t.name, OtherCategory::InputObject),
    })
}

fn convert_field(field: Field<'_, String>) -> FieldDef {
    FieldDef {
        arguments: field
            .arguments
            .iter()
            .map(|arg| InputValue::new(arg.name.as_str(), arg.value_type.to_string()))
            .collect(),
        type_signature: field.field_type.to_string(),
        tags: tags(&field.directives),
        description: field.description,
        name: field.name,
    }
}

fn push_field(obj: &mut ObjectType, field: FieldDef, origin: &Path) -> AppResult<()> {
    for tag in &field.tags {
        check_path_segment(tag, "Tag", origin)?;
    }
    if obj.fields.iter().any(|f| f.name == field.name) {
        return Err(AppError::schema_parse(
            origin,
            format!("Field '{}.{}' is defined more than once", obj.name, field.name),
        ));
    }
    obj.fields.push(field);
    Ok(())
}

fn tags(directives: &[Directive<'_, String>]) -> Vec<String> {
    directives
        .iter()
        .filter(|d| d.name == TAG_DIRECTIVE)
        .flat_map(|d| d.arguments.iter())
        .filter_map(|(arg, value)| match value {
            Value::String(tag) if arg == "name" => Some(tag.clone()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(sdl: &str) -> AppResult<SchemaGraph> {
        parse_graphql(sdl, Path::new("schema.graphql"))
    }

    #[test]
    fn test_default_roots_and_fields() {
        let graph = parse(
            r#"
            type Query {
              "Fetch a key"
              getKey(id: ID, tags: [String!]!): String
            }
            type Mutation { setKey(id: ID!, value: String): Boolean! }
            type User { id: ID! friends: [User] }
            enum Role { ADMIN USER }
            "#,
        )
        .unwrap();

        let query = graph.root_object(OperationKind::Query).unwrap();
        let get_key = &query.fields[0];
        assert_eq!(get_key.name, "getKey");
        assert_eq!(get_key.description.as_deref(), Some("Fetch a key"));
        assert_eq!(
            get_key.arguments,
            vec![InputValue::new("id", "ID"), InputValue::new("tags", "[String!]!")]
        );
        assert_eq!(get_key.type_signature, "String");

        assert!(graph.root(OperationKind::Mutation).is_some());
        assert!(graph.root(OperationKind::Subscription).is_none());

        let user = graph.get(graph.lookup("User").unwrap()).as_object().unwrap();
        assert_eq!(user.fields[1].type_signature, "[User]");

        let role = graph.get(graph.lookup("Role").unwrap());
        assert!(matches!(
            role,
            NamedType::Other {
                category: OtherCategory::Enum,
                ..
            }
        ));
    }

    #[test]
    fn test_explicit_schema_definition() {
        let graph = parse(
            r#"
            schema { query: RootQuery }
            type RootQuery { ping: String }
            type Query { notARoot: String }
            "#,
        )
        .unwrap();
        let root = graph.root(OperationKind::Query).unwrap();
        assert_eq!(graph.get(root).name(), "RootQuery");
        assert_eq!(graph.root_kind(graph.lookup("Query").unwrap()), None);
    }

    #[test]
    fn test_explicit_root_must_exist() {
        let err = parse("schema { query: Missing } type Query { a: Int }").unwrap_err();
        assert!(err.to_string().contains("Root query type 'Missing'"));
    }

    #[test]
    fn test_extensions_append_fields() {
        let graph = parse(
            r#"
            type Query { a: Int }
            extend type Query { b: Int }
            "#,
        )
        .unwrap();
        let names: Vec<&str> = graph
            .root_object(OperationKind::Query)
            .unwrap()
            .fields
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_extension_of_unknown_type_fails() {
        assert!(parse("extend type Ghost { a: Int }").is_err());
    }

    #[test]
    fn test_duplicate_field_fails() {
        let err = parse("type Query { a: Int } extend type Query { a: String }").unwrap_err();
        assert!(err.to_string().contains("'Query.a' is defined more than once"));
    }

    #[test]
    fn test_tag_with_path_separator_rejected() {
        let err = parse(r#"type Query { pets: [String] @tag(name: "../types") }"#).unwrap_err();
        assert!(err.to_string().contains("Tag name '../types'"));
    }

    #[test]
    fn test_tag_directive() {
        let graph = parse(
            r#"
            type Query {
              pets: [String] @tag(name: "Pets") @tag(name: "Public")
              health: Boolean
            }
            "#,
        )
        .unwrap();
        let query = graph.root_object(OperationKind::Query).unwrap();
        assert_eq!(query.fields[0].tags, vec!["Pets", "Public"]);
        assert!(query.fields[1].tags.is_empty());
        assert!(graph.has_tagged_operations());
    }

    #[test]
    fn test_malformed_sdl() {
        match parse("type Query {").unwrap_err() {
            AppError::SchemaParse { path, .. } => assert_eq!(path, "schema.graphql"),
            other => panic!("Wrong error type: {}", other),
        }
    }
}
