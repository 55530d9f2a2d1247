#![deny(missing_docs)]

//! # Document Rendering
//!
//! Pure functions from members to MDX text. Output layout:
//!
//! ```text
//! ---
//! title: getKey
//! description: Description for getKey
//! ---
//!
//! # getKey
//!
//! ## Arguments
//!
//! - id: ID
//! ```

use crate::member::{Member, MemberKind};
use crate::schema::InputValue;
use crate::title::format_title;

/// A generated output unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Path relative to the output root, always `/`-separated.
    pub output_path: String,
    /// MDX content.
    pub content: String,
}

impl Document {
    /// Creates a document.
    pub fn new(output_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            output_path: output_path.into(),
            content: content.into(),
        }
    }
}

/// Renders a single member as a standalone MDX document.
pub fn render_member(member: &Member<'_>) -> String {
    let name = member.name();
    let fallback = match member.kind() {
        MemberKind::Operation(_) => format!("Description for {}", name),
        MemberKind::Type => format!("Type definition for {}", name),
    };
    let description = member.description();

    let mut out = front_matter(&[
        ("title", name),
        ("description", description.unwrap_or(&fallback)),
    ]);
    out.push_str(&format!("\n# {}\n\n", name));

    if let Some(desc) = description {
        out.push_str(desc);
        out.push_str("\n\n");
    }

    match member {
        Member::Operation { field, .. } => {
            push_list(&mut out, "## Arguments", &field.arguments);
        }
        Member::Type(obj) => {
            let fields: Vec<InputValue> = obj
                .fields
                .iter()
                .map(|f| InputValue::new(f.name.as_str(), f.type_signature.as_str()))
                .collect();
            push_list(&mut out, "## Fields", &fields);
        }
    }

    out.trim().to_string()
}

/// Renders all operations sharing a tag as one combined document.
///
/// `tag` is shown exactly as given; callers decide which spelling wins
/// when tags differ only in case.
pub fn render_tag_document(tag: &str, description: Option<&str>, members: &[Member<'_>]) -> String {
    let description = description.map(str::trim).filter(|d| !d.is_empty());
    let fallback = format!("Operations tagged {}", tag);

    let mut out = front_matter(&[
        ("title", tag),
        ("description", description.unwrap_or(&fallback)),
    ]);
    out.push_str(&format!("\n# {}\n\n", tag));

    if let Some(desc) = description {
        out.push_str(desc);
        out.push_str("\n\n");
    }

    for member in members {
        out.push_str(&format!("## {}\n\n", format_title(member.name())));
        out.push_str(&format!(
            "Operation: `{}` ({})\n\n",
            member.name(),
            member.kind()
        ));
        if let Some(desc) = member.description() {
            out.push_str(desc);
            out.push_str("\n\n");
        }
        push_list(&mut out, "### Arguments", member.arguments());
    }

    out.trim().to_string()
}

fn push_list(out: &mut String, heading: &str, items: &[InputValue]) {
    if items.is_empty() {
        return;
    }
    out.push_str(heading);
    out.push_str("\n\n");
    for item in items {
        out.push_str(&format!("- {}: {}\n", item.name, item.type_signature));
    }
    out.push('\n');
}

/// Builds a `---` delimited front-matter block.
fn front_matter(entries: &[(&str, &str)]) -> String {
    let mut out = String::from("---\n");
    for (key, value) in entries {
        out.push_str(&format!("{}: {}\n", key, yaml_scalar(value)));
    }
    out.push_str("---\n");
    out
}

/// Emits `value` as a plain YAML scalar when safe, double-quoted otherwise.
fn yaml_scalar(value: &str) -> String {
    if needs_quoting(value) {
        // JSON strings are valid YAML double-quoted scalars.
        serde_json::Value::String(value.to_string()).to_string()
    } else {
        value.to_string()
    }
}

fn needs_quoting(value: &str) -> bool {
    const INDICATORS: &[char] = &[
        '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%',
        '@', '`',
    ];
    const KEYWORDS: &[&str] = &["true", "false", "yes", "no", "on", "off", "null", "~"];

    let Some(first) = value.chars().next() else {
        return true;
    };

    INDICATORS.contains(&first)
        || value.contains(": ")
        || value.contains(" #")
        || value.contains('\n')
        || value.ends_with(':')
        || value.trim() != value
        || KEYWORDS.contains(&value.to_ascii_lowercase().as_str())
        || value.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDef, ObjectType, OperationKind};
    use pretty_assertions::assert_eq;

    fn field(name: &str, description: Option<&str>, args: &[(&str, &str)]) -> FieldDef {
        FieldDef {
            name: name.into(),
            description: description.map(Into::into),
            arguments: args.iter().map(|(n, t)| InputValue::new(*n, *t)).collect(),
            type_signature: "String".into(),
            tags: vec![],
        }
    }

    #[test]
    fn test_operation_without_description() {
        let f = field("getKey", None, &[("id", "ID")]);
        let member = Member::Operation {
            kind: OperationKind::Query,
            field: &f,
        };
        let expected = "---\n\
            title: getKey\n\
            description: Description for getKey\n\
            ---\n\
            \n\
            # getKey\n\
            \n\
            ## Arguments\n\
            \n\
            - id: ID";
        assert_eq!(render_member(&member), expected);
    }

    #[test]
    fn test_operation_with_description_and_no_arguments() {
        let f = field("health", Some("Liveness probe."), &[]);
        let member = Member::Operation {
            kind: OperationKind::Query,
            field: &f,
        };
        let content = render_member(&member);
        assert!(content.contains("description: Liveness probe.\n"));
        assert!(content.ends_with("# health\n\nLiveness probe."));
        assert!(!content.contains("## Arguments"));
    }

    #[test]
    fn test_type_fields_keep_declaration_order() {
        let mut obj = ObjectType::new("User");
        obj.fields.push(FieldDef {
            name: "zeta".into(),
            type_signature: "Int".into(),
            ..Default::default()
        });
        obj.fields.push(FieldDef {
            name: "alpha".into(),
            type_signature: "[String!]!".into(),
            ..Default::default()
        });
        let content = render_member(&Member::Type(&obj));
        assert!(content.contains("description: Type definition for User"));
        assert!(content.ends_with("## Fields\n\n- zeta: Int\n- alpha: [String!]!"));
    }

    #[test]
    fn test_type_without_fields_has_no_section() {
        let obj = ObjectType::new("Empty");
        let content = render_member(&Member::Type(&obj));
        assert!(!content.contains("## Fields"));
        assert!(content.ends_with("# Empty"));
    }

    #[test]
    fn test_front_matter_quoting() {
        let f = field("search", Some("Finds things: fast"), &[]);
        let member = Member::Operation {
            kind: OperationKind::Query,
            field: &f,
        };
        let content = render_member(&member);
        assert!(content.contains("description: \"Finds things: fast\"\n"));
        assert!(content.contains("\n\nFinds things: fast"));
    }

    #[test]
    fn test_tag_document() {
        let list = field("listPets", Some("List all pets"), &[("limit", "integer<int32>")]);
        let create = field("createPet", None, &[]);
        let members = [
            Member::Operation {
                kind: OperationKind::Query,
                field: &list,
            },
            Member::Operation {
                kind: OperationKind::Mutation,
                field: &create,
            },
        ];
        let content = render_tag_document("Pets", None, &members);
        let expected = "---\n\
            title: Pets\n\
            description: Operations tagged Pets\n\
            ---\n\
            \n\
            # Pets\n\
            \n\
            ## List Pets\n\
            \n\
            Operation: `listPets` (query)\n\
            \n\
            List all pets\n\
            \n\
            ### Arguments\n\
            \n\
            - limit: integer<int32>\n\
            \n\
            ## Create Pet\n\
            \n\
            Operation: `createPet` (mutation)";
        assert_eq!(content, expected);
    }

    #[test]
    fn test_needs_quoting() {
        assert!(!needs_quoting("Description for getKey"));
        assert!(needs_quoting(""));
        assert!(needs_quoting("true"));
        assert!(needs_quoting("42"));
        assert!(needs_quoting("# heading"));
        assert!(needs_quoting("line\nbreak"));
    }
}
