//! Tree module for phylogenetic tree representation.
//!
//! This module provides the core data structures for representing phylogenetic trees:
//! - `Tree`: binary tree using the arena pattern, leaves refer to taxa of a
//!   [TaxonNamespace] by index.
//! - `VertexIndex` is used to index vertices.

use crate::error::ModelError;
use crate::identity::{Identity, InstanceId};
use crate::model::taxon_namespace::{TaxonIndex, TaxonNamespace};
use crate::model::vertex::{BranchLength, Vertex};
use std::collections::HashSet;

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: VertexIndex = usize::MAX;

// =#========================================================================#=
// TREE
// =#========================================================================#=
/// A binary phylogenetic tree represented using the arena pattern on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by [VertexIndex].
///
/// # Structure
/// - All vertices (root, internal, and leaves) are stored in the arena
/// - No assumption on order of indices is maintained
/// - Leaves contain a [TaxonIndex] into the [TaxonNamespace] the tree was
///   built against; the tree remembers that namespace's identity
/// - Branch lengths are optional, but if provided are non-negative
///
/// # Construction
/// Trees are built with a [TreeBuilder](crate::model::TreeBuilder), which
/// only hands out structurally valid trees. A [Tree] is thus immutable.
#[derive(Debug, Clone)]
pub struct Tree {
    /// Identity of the namespace the taxon indices refer to
    taxon_namespace_id: InstanceId,

    /// Number of leaves announced at construction
    num_leaves_init: usize,

    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    root_index: VertexIndex,

    /// Name of tree; optional
    name: Option<String>,
}

// ============================================================================
// Construction (crate)
// ============================================================================
impl Tree {
    pub(crate) fn new(taxon_namespace_id: InstanceId, num_leaves: usize) -> Self {
        let capacity = (2 * num_leaves).saturating_sub(1);
        Tree {
            taxon_namespace_id,
            num_leaves_init: num_leaves,
            vertices: Vec::with_capacity(capacity),
            root_index: NO_ROOT_SET_INDEX,
            name: None,
        }
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    pub(crate) fn push_leaf(
        &mut self,
        branch_length: Option<BranchLength>,
        taxon: TaxonIndex,
    ) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices.push(Vertex::new_leaf(index, branch_length, taxon));
        index
    }

    /// Adds an internal vertex; children must have been checked by the caller.
    pub(crate) fn push_internal(
        &mut self,
        children: (VertexIndex, VertexIndex),
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices
            .push(Vertex::new_internal(index, children, branch_length));
        self.vertices[children.0].set_parent(index);
        self.vertices[children.1].set_parent(index);
        index
    }

    /// Adds the root; children must have been checked by the caller.
    pub(crate) fn push_root(&mut self, children: (VertexIndex, VertexIndex)) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices.push(Vertex::new_root(index, children));
        self.vertices[children.0].set_parent(index);
        self.vertices[children.1].set_parent(index);
        self.root_index = index;
        index
    }

    /// Returns whether `index` may become a child: exists, is not the root
    /// and has no parent yet.
    pub(crate) fn is_attachable(&self, index: VertexIndex) -> bool {
        self.vertices
            .get(index)
            .is_some_and(|v| !v.is_root() && !v.has_parent())
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root is set
    /// - There are the announced number of leaves
    /// - All non-root vertices are attached, and parent/child references agree
    /// - No taxon appears on two leaves
    pub(crate) fn validate(&self) -> Result<(), ModelError> {
        if !self.is_root_set() {
            return Err(ModelError::IncompleteTree("root not set".to_string()));
        }

        let num_leaves = self.num_leaves();
        if num_leaves != self.num_leaves_init {
            return Err(ModelError::IncompleteTree(format!(
                "expected {} leaves, found {}",
                self.num_leaves_init, num_leaves
            )));
        }

        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.is_root() {
                continue;
            }
            let Some(parent) = vertex.parent_index() else {
                return Err(ModelError::IncompleteTree(format!(
                    "vertex {index} is not attached"
                )));
            };
            let points_back = self.vertices[parent]
                .children()
                .is_some_and(|(left, right)| left == index || right == index);
            if !points_back {
                return Err(ModelError::IncompleteTree(format!(
                    "vertex {index} and its parent {parent} disagree"
                )));
            }
        }

        let mut seen = HashSet::with_capacity(num_leaves);
        for taxon in self.leaf_taxa() {
            if !seen.insert(taxon) {
                return Err(ModelError::DuplicateTaxon(taxon.to_string()));
            }
        }

        Ok(())
    }

    /// Replaces every leaf taxon `t` by `taxa[t]`.
    pub(crate) fn remap_taxa(&mut self, taxa: &[TaxonIndex]) {
        for vertex in &mut self.vertices {
            vertex.remap_taxon(taxa);
        }
    }
}

// ============================================================================
// Getters / Accessors (pub)
// ============================================================================
impl Tree {
    /// Returns the identity of the namespace this tree's taxa belong to.
    pub fn taxon_namespace_id(&self) -> InstanceId {
        self.taxon_namespace_id
    }

    /// Returns name of this tree, or `None` if not set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns whether root of tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns `true` if the tree is structurally complete and consistent.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Returns a reference to the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set, which cannot happen for trees
    /// handed out by [TreeBuilder::finish](crate::model::TreeBuilder::finish).
    pub fn root(&self) -> &Vertex {
        &self.vertices[self.root_index]
    }

    /// Returns the vertex at `index`, or `None` if out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_leaf()).count()
    }

    /// Returns the number of internal vertices (root excluded).
    pub fn num_internal(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_internal()).count()
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Iterates over the taxa of all leaves, in pre-order.
    pub fn leaf_taxa(&self) -> impl Iterator<Item = TaxonIndex> + '_ {
        self.pre_order_iter().filter_map(Vertex::taxon)
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }
}

impl std::ops::Index<VertexIndex> for Tree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

// ============================================================================
// NEWICK STYLE
// ============================================================================
/// Style for rendering a tree as a Newick string,
/// controlling how leaf taxa are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewickStyle {
    /// Use taxon labels from the tree's [TaxonNamespace]
    Label,
    /// Use 0-based taxon indices (0, 1, 2, ...)
    ZeroIndexed,
    /// Use 1-based taxon indices (1, 2, 3, ...)
    OneIndexed,
}

impl Tree {
    /// Renders the tree as a Newick string, terminated with `;`.
    ///
    /// # Arguments
    /// * `style` - How to represent leaf taxa
    /// * `namespace` - Required for [NewickStyle::Label]; must be the namespace
    ///   the tree was built against
    ///
    /// # Errors
    /// [ModelError::NamespaceMismatch] if labels are requested without the
    /// tree's own namespace.
    pub fn to_newick(
        &self,
        style: NewickStyle,
        namespace: Option<&TaxonNamespace>,
    ) -> Result<String, ModelError> {
        let labels = match (style, namespace) {
            (NewickStyle::Label, Some(ns)) if ns.instance_id() == self.taxon_namespace_id => {
                ns.labels()
            }
            (NewickStyle::Label, _) => return Err(ModelError::NamespaceMismatch),
            _ => Vec::new(),
        };

        let mut newick = String::with_capacity(self.vertices.len() * 8);
        let mut stack = vec![NewickFrame::Enter(self.root_index)];
        while let Some(frame) = stack.pop() {
            match frame {
                NewickFrame::Enter(index) => match self.vertices[index].children() {
                    Some((left, right)) => {
                        newick.push('(');
                        stack.push(NewickFrame::Exit(index));
                        stack.push(NewickFrame::Enter(right));
                        stack.push(NewickFrame::Separator);
                        stack.push(NewickFrame::Enter(left));
                    }
                    None => {
                        let taxon = self.vertices[index].taxon().unwrap_or_default();
                        match style {
                            // Taxon indices of a tree lie within its namespace, which only grows
                            NewickStyle::Label => push_newick_label(&mut newick, &labels[taxon]),
                            NewickStyle::ZeroIndexed => newick.push_str(&taxon.to_string()),
                            NewickStyle::OneIndexed => newick.push_str(&(taxon + 1).to_string()),
                        }
                        push_branch_length(&mut newick, &self.vertices[index]);
                    }
                },
                NewickFrame::Separator => newick.push(','),
                NewickFrame::Exit(index) => {
                    newick.push(')');
                    push_branch_length(&mut newick, &self.vertices[index]);
                }
            }
        }
        newick.push(';');
        Ok(newick)
    }
}

/// Pending step of the iterative Newick writer.
enum NewickFrame {
    /// Open a subtree, or write a leaf
    Enter(VertexIndex),
    /// Comma between siblings
    Separator,
    /// Close a subtree
    Exit(VertexIndex),
}

fn push_branch_length(newick: &mut String, vertex: &Vertex) {
    if let Some(branch_length) = vertex.branch_length() {
        newick.push(':');
        newick.push_str(&branch_length.to_string());
    }
}

/// Pushes a label, quoting it if it holds Newick punctuation or whitespace.
fn push_newick_label(newick: &mut String, label: &str) {
    const SPECIAL: &[char] = &['(', ')', '[', ']', '\'', ':', ';', ',', ' ', '\t'];
    if label.contains(SPECIAL) {
        newick.push('\'');
        newick.push_str(&label.replace('\'', "''"));
        newick.push('\'');
    } else {
        newick.push_str(label);
    }
}

// =#========================================================================#=
// ITERATORS
// =#========================================================================#=
/// Iterator for pre-order traversal (parents before children).
///
/// Stack-based, so deep caterpillar trees do not recurse.
pub struct PreOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push(tree.root_index);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree.vertices[index];

        // Right first, so left is processed first
        if let Some((left, right)) = vertex.children() {
            self.stack.push(right);
            self.stack.push(left);
        }

        Some(vertex)
    }
}
