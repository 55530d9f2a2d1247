#![deny(missing_docs)]

//! # Schema Walker
//!
//! Classifies every documentable member of a [`SchemaGraph`] and renders
//! one [`Document`] per member (or per tag, when grouping by tag).

use crate::member::Member;
use crate::render::{render_member, render_tag_document, Document};
use crate::schema::{OperationKind, SchemaGraph};
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

/// Prefix reserved for introspection types.
const INTROSPECTION_PREFIX: &str = "__";

/// How operations are laid out in the output tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// One document per operation under `<kind>/`.
    Kind,
    /// One combined document per tag under `tags/`.
    Tag,
}

impl Grouping {
    /// Picks tag grouping for tagged schemas unless a grouping was requested.
    pub fn resolve(requested: Option<Grouping>, graph: &SchemaGraph) -> Grouping {
        requested.unwrap_or(if graph.has_tagged_operations() {
            Grouping::Tag
        } else {
            Grouping::Kind
        })
    }
}

/// Lists every member in walk order: query, mutation and subscription
/// root fields, then non-root object types in type map order.
pub fn collect_members(graph: &SchemaGraph) -> Vec<Member<'_>> {
    let mut members = Vec::new();

    for kind in OperationKind::ALL {
        if let Some(root) = graph.root_object(kind) {
            members.extend(root.fields.iter().map(|field| Member::Operation { kind, field }));
        }
    }

    for (id, ty) in graph.types() {
        if graph.root_kind(id).is_some() {
            continue;
        }
        let Some(obj) = ty.as_object() else {
            continue;
        };
        if obj.name.starts_with(INTROSPECTION_PREFIX) {
            continue;
        }
        members.push(Member::Type(obj));
    }

    members
}

/// Produces the full document list for `graph`.
pub fn walk(graph: &SchemaGraph, grouping: Grouping) -> Vec<Document> {
    let members = collect_members(graph);
    let documents = match grouping {
        Grouping::Kind => members.iter().map(member_document).collect(),
        Grouping::Tag => walk_by_tag(graph, &members),
    };
    debug!(count = documents.len(), ?grouping, "walked schema graph");
    documents
}

fn member_document(member: &Member<'_>) -> Document {
    let doc = Document::new(member.output_path(), render_member(member));
    debug!(path = %doc.output_path, "rendered member");
    doc
}

fn walk_by_tag(graph: &SchemaGraph, members: &[Member<'_>]) -> Vec<Document> {
    let mut documents = Vec::new();
    // lowercased tag -> (first-seen spelling, operations)
    let mut groups: IndexMap<String, (&str, Vec<Member<'_>>)> = IndexMap::new();
    let mut types = Vec::new();

    for member in members {
        if matches!(member, Member::Type(_)) {
            types.push(member_document(member));
            continue;
        }
        if member.tags().is_empty() {
            documents.push(member_document(member));
            continue;
        }

        let mut seen: Vec<String> = Vec::new();
        for tag in member.tags() {
            let key = tag.to_lowercase();
            if seen.contains(&key) {
                continue;
            }
            seen.push(key.clone());
            groups
                .entry(key)
                .or_insert_with(|| (tag.as_str(), Vec::new()))
                .1
                .push(*member);
        }
    }

    for (key, (tag, ops)) in &groups {
        let description = graph.tag(tag).and_then(|t| t.description.as_deref());
        let doc = Document::new(
            format!("tags/{}.mdx", key),
            render_tag_document(tag, description, ops),
        );
        debug!(path = %doc.output_path, operations = ops.len(), "rendered tag group");
        documents.push(doc);
    }

    documents.extend(types);
    documents
}
