//! Vertex module for phylogenetic tree representation.

use crate::error::ModelError;
use crate::model::taxon_namespace::TaxonIndex;
use crate::model::tree::VertexIndex;
use std::fmt;
use std::ops::Deref;

/// During construction, Internal and Leaf vertex might not have parent set yet.
const NO_PARENT_SET: VertexIndex = usize::MAX;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (node) in a phylogenetic tree.
///
/// A vertex can be either:
/// - **Root**: Has two children, no parent and no branch_length
/// - **Internal**: Has two children, no taxon, might have branch_length
/// - **Leaf**: Has no children, has a taxon (via index) and might have branch_length
///
/// # Invariants
/// - `index` is index in arena
/// - `branch_length` is non-negative and finite; might not be set
/// - Internal vertices and leaves have `parent` set once the tree is finished
/// - Leaf vertices refer to their taxon by [TaxonIndex] into the tree's
///   [TaxonNamespace](crate::model::TaxonNamespace)
#[derive(PartialEq, Debug, Clone)]
pub enum Vertex {
    /// Root vertex of the tree (has no parent, has two children)
    Root {
        index: VertexIndex,
        children: (VertexIndex, VertexIndex),
    },
    /// Internal vertex (has parent and two children, no taxon)
    Internal {
        index: VertexIndex,
        parent: VertexIndex,
        children: (VertexIndex, VertexIndex),
        branch_length: Option<BranchLength>,
    },
    /// Leaf vertex (has parent and taxon, no children)
    Leaf {
        index: VertexIndex,
        taxon: TaxonIndex,
        parent: VertexIndex,
        branch_length: Option<BranchLength>,
    },
}

impl Vertex {
    pub(crate) fn new_root(index: VertexIndex, children: (VertexIndex, VertexIndex)) -> Self {
        Vertex::Root { index, children }
    }

    pub(crate) fn new_internal(
        index: VertexIndex,
        children: (VertexIndex, VertexIndex),
        branch_length: Option<BranchLength>,
    ) -> Self {
        Vertex::Internal {
            index,
            parent: NO_PARENT_SET,
            children,
            branch_length,
        }
    }

    pub(crate) fn new_leaf(
        index: VertexIndex,
        branch_length: Option<BranchLength>,
        taxon: TaxonIndex,
    ) -> Self {
        Vertex::Leaf {
            index,
            taxon,
            parent: NO_PARENT_SET,
            branch_length,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        match self {
            Vertex::Root { index, .. }
            | Vertex::Internal { index, .. }
            | Vertex::Leaf { index, .. } => *index,
        }
    }

    /// Returns the branch length if this is a non-root vertex that has one.
    pub fn branch_length(&self) -> Option<BranchLength> {
        match self {
            Vertex::Root { .. } => None,
            Vertex::Internal { branch_length, .. } | Vertex::Leaf { branch_length, .. } => {
                *branch_length
            }
        }
    }

    /// Returns the taxon index if this is a leaf, else `None`.
    pub fn taxon(&self) -> Option<TaxonIndex> {
        match self {
            Vertex::Leaf { taxon, .. } => Some(*taxon),
            _ => None,
        }
    }

    /// Returns `true` if this vertex is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Vertex::Leaf { .. })
    }

    /// Returns `true` if this vertex is an internal vertex.
    pub fn is_internal(&self) -> bool {
        matches!(self, Vertex::Internal { .. })
    }

    /// Returns `true` if this vertex is a root.
    pub fn is_root(&self) -> bool {
        matches!(self, Vertex::Root { .. })
    }

    /// Returns the children if this is a root or internal vertex, else `None`.
    pub fn children(&self) -> Option<(VertexIndex, VertexIndex)> {
        match self {
            Vertex::Root { children, .. } | Vertex::Internal { children, .. } => Some(*children),
            Vertex::Leaf { .. } => None,
        }
    }

    /// Returns the index of parent if this a non-root vertex with parent set.
    pub fn parent_index(&self) -> Option<VertexIndex> {
        match self {
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => {
                (*parent != NO_PARENT_SET).then_some(*parent)
            }
            Vertex::Root { .. } => None,
        }
    }

    /// Returns `true` if this vertex has a parent set.
    pub fn has_parent(&self) -> bool {
        self.parent_index().is_some()
    }

    /// Replaces the taxon of a leaf by `taxa[taxon]`; other vertices are left
    /// as they are.
    pub(crate) fn remap_taxon(&mut self, taxa: &[TaxonIndex]) {
        if let Vertex::Leaf { taxon, .. } = self {
            *taxon = taxa[*taxon];
        }
    }

    /// Sets the parent of a non-root vertex; returns `false` on a root.
    pub(crate) fn set_parent(&mut self, new_parent: VertexIndex) -> bool {
        match self {
            Vertex::Root { .. } => false,
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => {
                *parent = new_parent;
                true
            }
        }
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced non-negative.
///
/// Represents the evolutionary distance between a vertex and its parent.
/// The value is guaranteed to be non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length.
    ///
    /// # Errors
    /// [ModelError::InvalidBranchLength] if `length` is negative or not finite.
    pub fn new(length: f64) -> Result<Self, ModelError> {
        if length >= 0.0 && length.is_finite() {
            Ok(BranchLength(length))
        } else {
            Err(ModelError::InvalidBranchLength(length))
        }
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl TryFrom<f64> for BranchLength {
    type Error = ModelError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        BranchLength::new(value)
    }
}

impl fmt::Display for BranchLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
