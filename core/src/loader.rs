#![deny(missing_docs)]

//! # Schema Loading
//!
//! Reads a schema file and builds a [`SchemaGraph`]. The loader is picked
//! from the file extension.

use crate::error::{AppError, AppResult};
use crate::schema::SchemaGraph;
use std::fs;
use std::path::Path;

/// GraphQL SDL loader.
pub mod graphql;

/// OpenAPI (YAML/JSON) loader.
pub mod openapi;

/// Supported schema source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// GraphQL Schema Definition Language.
    GraphQl,
    /// OpenAPI 3.x document, YAML or JSON.
    OpenApi,
}

impl SchemaFormat {
    /// Detects the format from a file extension.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "graphql" | "graphqls" | "gql" | "sdl" => Ok(SchemaFormat::GraphQl),
            "yaml" | "yml" | "json" => Ok(SchemaFormat::OpenApi),
            other => Err(AppError::schema_parse(
                path,
                format!("Unsupported schema extension '{}'", other),
            )),
        }
    }
}

/// Loads and parses a schema file.
///
/// A missing or unreadable file is reported as a `SchemaParse` error since
/// nothing has been written yet at this point.
pub fn load_schema(path: &Path) -> AppResult<SchemaGraph> {
    let format = SchemaFormat::from_path(path)?;
    let source = fs::read_to_string(path)
        .map_err(|e| AppError::schema_parse(path, format!("Failed to read schema: {}", e)))?;
    tracing::debug!(path = %path.display(), ?format, "loading schema");
    parse_schema(&source, format, path)
}

/// Parses in-memory schema text. `origin` is only used in error messages.
pub fn parse_schema(source: &str, format: SchemaFormat, origin: &Path) -> AppResult<SchemaGraph> {
    match format {
        SchemaFormat::GraphQl => graphql::parse_graphql(source, origin),
        SchemaFormat::OpenApi => openapi::parse_openapi(source, origin),
    }
}

/// Rejects schema names that cannot be used as a single output path
/// segment. Operation, type and tag names all end up as file names.
pub(crate) fn check_path_segment(value: &str, what: &str, origin: &Path) -> AppResult<()> {
    let invalid = value.trim().is_empty()
        || value == "."
        || value == ".."
        || value.contains(['/', '\\']);
    if invalid {
        return Err(AppError::schema_parse(
            origin,
            format!("{} name '{}' cannot be used as a file name", what, value),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_format_detection() {
        let cases = [
            ("schema.graphql", SchemaFormat::GraphQl),
            ("schema.GQL", SchemaFormat::GraphQl),
            ("api/openapi.yaml", SchemaFormat::OpenApi),
            ("openapi.json", SchemaFormat::OpenApi),
        ];
        for (path, expected) in cases {
            assert_eq!(SchemaFormat::from_path(Path::new(path)).unwrap(), expected);
        }
        assert!(SchemaFormat::from_path(Path::new("schema.txt")).is_err());
        assert!(SchemaFormat::from_path(Path::new("schema")).is_err());
    }

    #[test]
    fn test_missing_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let missing: PathBuf = dir.path().join("missing.graphql");
        match load_schema(&missing).unwrap_err() {
            AppError::SchemaParse { message, .. } => {
                assert!(message.contains("Failed to read schema"))
            }
            other => panic!("Wrong error type: {}", other),
        }
    }

    #[test]
    fn test_path_segment_check() {
        let origin = Path::new("openapi.yaml");
        assert!(check_path_segment("getKey", "Operation", origin).is_ok());
        assert!(check_path_segment("a..b", "Operation", origin).is_ok());
        for bad in ["", " ", ".", "..", "../types/User", "orders/list", "a\\b"] {
            let err = check_path_segment(bad, "Operation", origin).unwrap_err();
            assert!(matches!(err, AppError::SchemaParse { .. }), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("schema.graphql");
        fs::write(&path, "type Query { ping: String }").unwrap();
        let graph = load_schema(&path).unwrap();
        assert!(graph.lookup("Query").is_some());
    }
}
