#![deny(missing_docs)]

//! # Schema Graph
//!
//! The in-memory typed schema both loaders produce.
//!
//! Named types live in an arena and are addressed by [`TypeId`]. Root
//! operation types are stored as ids, so "is this the query root?" is an
//! identity check on the arena slot rather than a comparison of names.

use indexmap::IndexMap;

/// Index of a named type inside a [`SchemaGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(usize);

/// The three root operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Read operations.
    Query,
    /// Write operations.
    Mutation,
    /// Event streams.
    Subscription,
}

impl OperationKind {
    /// All kinds, in the order the walker visits them.
    pub const ALL: [OperationKind; 3] = [
        OperationKind::Query,
        OperationKind::Mutation,
        OperationKind::Subscription,
    ];

    /// Lowercase label, also used as the output directory.
    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }

    /// Conventional root type name when no explicit schema definition exists.
    pub fn default_root_name(self) -> &'static str {
        match self {
            OperationKind::Query => "Query",
            OperationKind::Mutation => "Mutation",
            OperationKind::Subscription => "Subscription",
        }
    }
}

/// A `name: Type` pair (argument, field or property).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputValue {
    /// Argument or field name.
    pub name: String,
    /// Type reference rendered as text, e.g. `[ID!]!` or `integer<int64>`.
    pub type_signature: String,
}

impl InputValue {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, type_signature: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_signature: type_signature.into(),
        }
    }
}

/// A field declared on an object type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldDef {
    /// Field name, unique within the owning type.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Arguments in declaration order.
    pub arguments: Vec<InputValue>,
    /// Return type reference.
    pub type_signature: String,
    /// Grouping tags (only meaningful on root fields).
    pub tags: Vec<String>,
}

/// A named object type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectType {
    /// Type name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Fields in declaration order.
    pub fields: Vec<FieldDef>,
}

impl ObjectType {
    /// Creates an empty object type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Category of a named type that is not an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtherCategory {
    /// Scalar type.
    Scalar,
    /// Enumeration.
    Enum,
    /// Union of object types.
    Union,
    /// Interface.
    Interface,
    /// Input object.
    InputObject,
    /// Any other schema shape (arrays, primitives, compositions).
    Schema,
}

/// An entry of the type map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamedType {
    /// A named object type; the only kind that gets documented.
    Object(ObjectType),
    /// Anything else, kept so the type map stays complete.
    Other {
        /// Type name.
        name: String,
        /// What kind of construct it is.
        category: OtherCategory,
    },
}

impl NamedType {
    /// The type name.
    pub fn name(&self) -> &str {
        match self {
            NamedType::Object(obj) => &obj.name,
            NamedType::Other { name, .. } => name,
        }
    }

    /// Returns the object payload, if this is an object type.
    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            NamedType::Object(obj) => Some(obj),
            NamedType::Other { .. } => None,
        }
    }
}

/// Declared metadata for a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDef {
    /// Tag name as written in the schema.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Immutable schema graph.
#[derive(Debug, Clone, Default)]
pub struct SchemaGraph {
    types: Vec<NamedType>,
    by_name: IndexMap<String, TypeId>,
    query: Option<TypeId>,
    mutation: Option<TypeId>,
    subscription: Option<TypeId>,
    tags: Vec<TagDef>,
}

impl SchemaGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named type and registers it in the type map.
    ///
    /// A later type with the same name replaces the earlier one in the
    /// name index; both stay in the arena.
    pub fn add_type(&mut self, ty: NamedType) -> TypeId {
        let id = TypeId(self.types.len());
        self.by_name.insert(ty.name().to_string(), id);
        self.types.push(ty);
        id
    }

    /// Adds a root object type that is reachable only through its id.
    ///
    /// Used for synthesised roots (OpenAPI), which must never shadow a
    /// user-defined type of the same name.
    pub fn add_detached_root(&mut self, kind: OperationKind, obj: ObjectType) -> TypeId {
        let id = TypeId(self.types.len());
        self.types.push(NamedType::Object(obj));
        self.set_root(kind, id);
        id
    }

    /// Marks `id` as the root for `kind`.
    pub fn set_root(&mut self, kind: OperationKind, id: TypeId) {
        match kind {
            OperationKind::Query => self.query = Some(id),
            OperationKind::Mutation => self.mutation = Some(id),
            OperationKind::Subscription => self.subscription = Some(id),
        }
    }

    /// Root type id for `kind`.
    pub fn root(&self, kind: OperationKind) -> Option<TypeId> {
        match kind {
            OperationKind::Query => self.query,
            OperationKind::Mutation => self.mutation,
            OperationKind::Subscription => self.subscription,
        }
    }

    /// Returns the operation kind `id` is the root of, if any.
    pub fn root_kind(&self, id: TypeId) -> Option<OperationKind> {
        OperationKind::ALL
            .into_iter()
            .find(|kind| self.root(*kind) == Some(id))
    }

    /// Root object type for `kind`.
    pub fn root_object(&self, kind: OperationKind) -> Option<&ObjectType> {
        self.root(kind).and_then(|id| self.get(id).as_object())
    }

    /// Looks up a type by id.
    pub fn get(&self, id: TypeId) -> &NamedType {
        &self.types[id.0]
    }

    /// Mutable access by id, for loaders still assembling the graph.
    pub fn get_mut(&mut self, id: TypeId) -> &mut NamedType {
        &mut self.types[id.0]
    }

    /// Looks up a type id by name.
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    /// Every type in insertion order, detached roots included.
    pub fn types(&self) -> impl Iterator<Item = (TypeId, &NamedType)> {
        self.types
            .iter()
            .enumerate()
            .map(|(idx, ty)| (TypeId(idx), ty))
    }

    /// Number of types in the arena.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True when the graph holds no types at all.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registers declared tag metadata.
    pub fn add_tag(&mut self, tag: TagDef) {
        self.tags.push(tag);
    }

    /// Declared tag metadata.
    pub fn tags(&self) -> &[TagDef] {
        &self.tags
    }

    /// Finds declared metadata for a tag, using the same case folding as
    /// tag grouping.
    pub fn tag(&self, name: &str) -> Option<&TagDef> {
        let key = name.to_lowercase();
        self.tags.iter().find(|tag| tag.name.to_lowercase() == key)
    }

    /// True when any root field carries a tag.
    pub fn has_tagged_operations(&self) -> bool {
        OperationKind::ALL.into_iter().any(|kind| {
            self.root_object(kind)
                .is_some_and(|root| root.fields.iter().any(|field| !field.tags.is_empty()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_root_does_not_shadow_named_type() {
        let mut graph = SchemaGraph::new();
        let user_query = graph.add_type(NamedType::Object(ObjectType::new("Query")));
        let root = graph.add_detached_root(OperationKind::Query, ObjectType::new("Query"));

        assert_ne!(user_query, root);
        assert_eq!(graph.lookup("Query"), Some(user_query));
        assert_eq!(graph.root(OperationKind::Query), Some(root));
        assert_eq!(graph.root_kind(root), Some(OperationKind::Query));
        assert_eq!(graph.root_kind(user_query), None);
    }

    #[test]
    fn test_has_tagged_operations() {
        let mut graph = SchemaGraph::new();
        let mut root = ObjectType::new("Query");
        root.fields.push(FieldDef {
            name: "pets".into(),
            type_signature: "[Pet]".into(),
            ..Default::default()
        });
        let id = graph.add_type(NamedType::Object(root));
        graph.set_root(OperationKind::Query, id);
        assert!(!graph.has_tagged_operations());

        if let NamedType::Object(obj) = graph.get_mut(id) {
            obj.fields[0].tags.push("Pets".into());
        }
        assert!(graph.has_tagged_operations());
    }

    #[test]
    fn test_tag_lookup_ignores_case() {
        let mut graph = SchemaGraph::new();
        graph.add_tag(TagDef {
            name: "Pets".into(),
            description: Some("Pet operations".into()),
        });
        assert!(graph.tag("pets").is_some());
        assert!(graph.tag("owners").is_none());
    }
}
