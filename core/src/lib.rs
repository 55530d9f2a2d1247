#![deny(missing_docs)]

//! # mdxgen Core
//!
//! Turns a GraphQL SDL or OpenAPI schema into a tree of MDX documents:
//! one per query, mutation, subscription and object type, or one per tag
//! when operations are grouped by tag.

/// Shared error types.
pub mod error;

/// Schema graph model.
pub mod schema;

/// Schema file loaders (GraphQL SDL, OpenAPI).
pub mod loader;

/// Identifier to title conversion.
pub mod title;

/// Documentable members derived from the graph.
pub mod member;

/// MDX rendering.
pub mod render;

/// Graph traversal and classification.
pub mod walker;

/// Filesystem output.
pub mod writer;

/// Generation options.
pub mod config;

/// Top-level generation entry points.
pub mod generate;

pub use config::{FilesConfig, GenerateConfig, Granularity};
pub use error::{AppError, AppResult};
pub use generate::{expand_inputs, generate_all, generate_files, generate_tags};
pub use loader::{load_schema, parse_schema, SchemaFormat};
pub use member::{Member, MemberKind};
pub use render::{render_member, render_tag_document, Document};
pub use schema::{OperationKind, SchemaGraph};
pub use title::format_title;
pub use walker::{collect_members, walk, Grouping};
pub use writer::{FileSystem, LocalFs};
