use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Marker the controller uses for internal padding members.
///
/// Any member whose path contains it is left out of a catalog.
pub const RESERVED_MEMBER_SENTINEL: &str = "ZZZZZZZZZZ";

/// One entry of a tag listing or of a composite type's member list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDescriptor {
    pub name: String,
    /// Primitive name, composite type name, or empty for program scopes.
    pub declared_type: String,
}

impl MemberDescriptor {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
        }
    }
}

/// A user-defined structured type.
///
/// The first member is the type marker the controller reports for the
/// structure itself; real fields start at index one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeType {
    pub name: String,
    pub members: Vec<MemberDescriptor>,
}

impl CompositeType {
    pub fn new(name: impl Into<String>, members: Vec<MemberDescriptor>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    /// Members after the type marker.
    pub fn fields(&self) -> &[MemberDescriptor] {
        self.members.get(1..).unwrap_or(&[])
    }
}

pub type PrimitiveRegistry = HashSet<String>;

pub type CompositeRegistry = HashMap<String, CompositeType>;
