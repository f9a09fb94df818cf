//! # Tag Catalog
//!
//! Turns a controller's tag listing into a flat map of leaf tag paths.
//!
//! Top-level tags with a primitive type become one entry each. Tags whose
//! type is a composite (UDT) are expanded depth-first: every field after the
//! type marker becomes `Parent.Field`, nested composites recurse the same
//! way, and members named with the reserved padding sentinel are dropped.
//! Members whose type is neither primitive nor a known composite are
//! dropped silently.
//!
//! The descent keeps the composite type names on the current path. Meeting
//! one of them again means the type graph loops, which fails the whole
//! build with [`TagError::CompositeTypeCycle`].

use std::collections::HashSet;

use tagcrawl_common::driver::Session;
use tagcrawl_common::error::TagError;
use tagcrawl_common::plc::address::Address;
use tagcrawl_common::plc::composite::{
    CompositeRegistry, CompositeType, MemberDescriptor, PrimitiveRegistry,
    RESERVED_MEMBER_SENTINEL,
};
use tagcrawl_common::plc::tag::{Catalog, TagDescriptor};
use tracing::{debug, info};

use crate::service::TagService;

/// A leaf produced by flattening, before it is stamped into a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub path: String,
    pub data_type: String,
}

/// The device's type registries, fetched once per catalog build.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    primitives: PrimitiveRegistry,
    composites: CompositeRegistry,
}

impl TypeRegistry {
    pub fn new(primitives: PrimitiveRegistry, composites: CompositeRegistry) -> Self {
        Self {
            primitives,
            composites,
        }
    }

    pub fn is_primitive(&self, declared_type: &str) -> bool {
        self.primitives.contains(declared_type)
    }

    pub fn composite(&self, declared_type: &str) -> Option<&CompositeType> {
        self.composites.get(declared_type)
    }

    /// Leaves of `composite` rooted at `prefix`, in member order.
    pub fn flatten(&self, prefix: &str, composite: &CompositeType) -> Result<Vec<Leaf>, TagError> {
        let mut leaves: Vec<Leaf> = Vec::new();
        let mut visiting: HashSet<String> = HashSet::new();
        self.flatten_into(prefix, composite, &mut visiting, &mut leaves)?;
        Ok(leaves)
    }

    fn flatten_into(
        &self,
        prefix: &str,
        composite: &CompositeType,
        visiting: &mut HashSet<String>,
        leaves: &mut Vec<Leaf>,
    ) -> Result<(), TagError> {
        if !visiting.insert(composite.name.clone()) {
            return Err(TagError::CompositeTypeCycle {
                type_name: composite.name.clone(),
                path: prefix.to_string(),
            });
        }

        for member in composite.fields() {
            let child_path: String = format!("{prefix}.{}", member.name);

            if self.is_primitive(&member.declared_type) {
                if !child_path.contains(RESERVED_MEMBER_SENTINEL) {
                    leaves.push(Leaf {
                        path: child_path,
                        data_type: member.declared_type.clone(),
                    });
                }
            } else if let Some(nested) = self.composite(&member.declared_type) {
                self.flatten_into(&child_path, nested, visiting, leaves)?;
            } else {
                debug!("dropping '{child_path}' of unknown type '{}'", member.declared_type);
            }
        }

        // Siblings may share a type; only the current descent path counts.
        visiting.remove(&composite.name);
        Ok(())
    }

    /// Builds a catalog from a raw tag listing.
    ///
    /// Entries with an empty type are program scopes, not tags.
    pub fn catalog(&self, address: &Address, tags: &[MemberDescriptor]) -> Result<Catalog, TagError> {
        let mut catalog: Catalog = Catalog::new();

        for tag in tags.iter().filter(|tag| !tag.declared_type.is_empty()) {
            if self.is_primitive(&tag.declared_type) {
                insert(&mut catalog, address, tag.name.clone(), tag.declared_type.clone());
            } else if let Some(composite) = self.composite(&tag.declared_type) {
                for leaf in self.flatten(&tag.name, composite)? {
                    insert(&mut catalog, address, leaf.path, leaf.data_type);
                }
            } else {
                debug!("dropping tag '{}' of unknown type '{}'", tag.name, tag.declared_type);
            }
        }

        Ok(catalog)
    }
}

fn insert(catalog: &mut Catalog, address: &Address, path: String, data_type: String) {
    let descriptor = TagDescriptor::new(path.clone(), data_type, address.clone());
    catalog.insert(path, descriptor);
}

struct Listing {
    tags: Vec<MemberDescriptor>,
    registry: TypeRegistry,
}

async fn fetch_listing(session: &dyn Session, address: &Address) -> Result<Listing, TagError> {
    let driver_failed = |e| TagError::connection(address, e);

    let response = session.tag_list().await.map_err(driver_failed)?;
    let tags: Vec<MemberDescriptor> = response
        .into_result()
        .map_err(TagError::CatalogRetrievalFailed)?;

    let primitives = session.primitive_types().await.map_err(driver_failed)?;
    let composites = session.composite_types().await.map_err(driver_failed)?;

    Ok(Listing {
        tags,
        registry: TypeRegistry::new(primitives, composites),
    })
}

impl TagService {
    /// Discovers every leaf tag on the controller at `candidate`.
    ///
    /// Descriptors are created fresh with `value = None` and stamped with
    /// the discovery time.
    pub async fn build_catalog(&self, candidate: &str) -> Result<Catalog, TagError> {
        let address: Address = self.precheck(candidate).await?;

        let session = self.open_session(&address).await?;
        let listing = fetch_listing(session.as_ref(), &address).await;
        self.close_session(session.as_ref(), &address).await;
        let listing: Listing = listing?;
        self.ensure_not_interrupted()?;

        let catalog: Catalog = listing.registry.catalog(&address, &listing.tags)?;
        info!(
            "{} leaf tags found in {} listed entries on {address}",
            catalog.len(),
            listing.tags.len()
        );
        Ok(catalog)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
