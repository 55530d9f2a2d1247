#![deny(missing_docs)]

//! # Members
//!
//! A member is one documentable entity derived from the schema graph: a
//! root operation field or a named object type. Members borrow from the
//! graph and only live for the duration of a walk.

use crate::schema::{FieldDef, InputValue, ObjectType, OperationKind};
use std::fmt;

/// Classification of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// A field on one of the root operation types.
    Operation(OperationKind),
    /// A non-root object type.
    Type,
}

impl MemberKind {
    /// Label used in content and as the output directory for operations.
    pub fn as_str(self) -> &'static str {
        match self {
            MemberKind::Operation(kind) => kind.as_str(),
            MemberKind::Type => "type",
        }
    }

    /// Directory the member's document lives in.
    pub fn directory(self) -> &'static str {
        match self {
            MemberKind::Operation(kind) => kind.as_str(),
            MemberKind::Type => "types",
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A documentable schema entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Member<'g> {
    /// A root operation field; carries arguments.
    Operation {
        /// Which root it belongs to.
        kind: OperationKind,
        /// The field itself.
        field: &'g FieldDef,
    },
    /// A named object type; carries fields.
    Type(&'g ObjectType),
}

impl<'g> Member<'g> {
    /// The member's raw name.
    pub fn name(&self) -> &'g str {
        match *self {
            Member::Operation { field, .. } => &field.name,
            Member::Type(obj) => &obj.name,
        }
    }

    /// The member's kind.
    pub fn kind(&self) -> MemberKind {
        match self {
            Member::Operation { kind, .. } => MemberKind::Operation(*kind),
            Member::Type(_) => MemberKind::Type,
        }
    }

    /// The description, if present and not blank.
    pub fn description(&self) -> Option<&'g str> {
        let description = match *self {
            Member::Operation { field, .. } => field.description.as_deref(),
            Member::Type(obj) => obj.description.as_deref(),
        };
        description.map(str::trim).filter(|d| !d.is_empty())
    }

    /// Tags attached to an operation. Types never carry tags.
    pub fn tags(&self) -> &'g [String] {
        match *self {
            Member::Operation { field, .. } => &field.tags,
            Member::Type(_) => &[],
        }
    }

    /// Operation arguments, or an empty slice for types.
    pub fn arguments(&self) -> &'g [InputValue] {
        match *self {
            Member::Operation { field, .. } => &field.arguments,
            Member::Type(_) => &[],
        }
    }

    /// Relative output path when documented on its own.
    pub fn output_path(&self) -> String {
        format!("{}/{}.mdx", self.kind().directory(), self.name())
    }
}
