//! Construction of [Tree]s against a [TaxonNamespace].
//!
//! A [TreeBuilder] is bound to one namespace. Leaf labels are kept in the
//! builder until [finish](TreeBuilder::finish) has validated the tree; only
//! then are new taxa registered in the namespace and the leaves pointed at
//! their indices. A failed or abandoned build leaves the namespace as it was.
//! The finished tree remembers which namespace its taxon indices belong to,
//! so a [TreeList](crate::model::TreeList) can reject trees from elsewhere.
//!
//! # Builder lifecycle
//! ```text
//! new() ──→ add_leaf / add_internal ──→ add_root ──→ [with_name] ──→ finish()
//! ```
//! Construction is bottom-up: children must exist before their parent.

use crate::error::ModelError;
use crate::identity::Identity;
use crate::model::taxon_namespace::{TaxonIndex, TaxonNamespace};
use crate::model::tree::{Tree, VertexIndex};
use crate::model::vertex::BranchLength;
use indexmap::IndexSet;
use std::rc::Rc;

// =#========================================================================#=
// TREE BUILDER
// =#========================================================================#=
/// Builds one binary [Tree] whose leaves refer to taxa of a shared namespace.
///
/// # Example
/// ```
/// use phyloset::model::{TaxonNamespace, TreeBuilder};
/// use std::rc::Rc;
///
/// // ((A:0.2,B:0.2):0.2,C:0.4);
/// let taxa = Rc::new(TaxonNamespace::new());
/// let mut builder = TreeBuilder::new(Rc::clone(&taxa), 3);
/// let a = builder.add_leaf("A", Some(0.2))?;
/// let b = builder.add_leaf("B", Some(0.2))?;
/// let c = builder.add_leaf("C", Some(0.4))?;
/// let ab = builder.add_internal((a, b), Some(0.2))?;
/// builder.add_root((ab, c))?;
/// let tree = builder.finish()?;
///
/// assert_eq!(tree.num_leaves(), 3);
/// assert_eq!(taxa.len(), 3);
/// # Ok::<(), phyloset::ModelError>(())
/// ```
#[derive(Debug)]
pub struct TreeBuilder {
    taxon_namespace: Rc<TaxonNamespace>,
    /// Leaves hold positions into this set until `finish`
    leaf_labels: IndexSet<String>,
    tree: Tree,
}

impl TreeBuilder {
    /// Creates a builder for a tree with `num_leaves` leaves on `taxon_namespace`.
    pub fn new(taxon_namespace: Rc<TaxonNamespace>, num_leaves: usize) -> Self {
        let tree = Tree::new(taxon_namespace.instance_id(), num_leaves);
        TreeBuilder {
            taxon_namespace,
            leaf_labels: IndexSet::with_capacity(num_leaves),
            tree,
        }
    }

    /// Attaches a name to the tree under construction.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.tree.set_name(name.into());
        self
    }

    /// Returns the namespace this builder resolves labels against.
    pub fn taxon_namespace(&self) -> &Rc<TaxonNamespace> {
        &self.taxon_namespace
    }

    /// Adds a leaf for the taxon `label`. A new taxon is registered by
    /// [finish](Self::finish).
    ///
    /// # Errors
    /// - [ModelError::InvalidBranchLength] for negative or non-finite lengths
    /// - [ModelError::TaxonNamespaceLocked] if the taxon is new and the
    ///   namespace is locked
    /// - [ModelError::DuplicateTaxon] if this tree already has a leaf for it
    pub fn add_leaf(
        &mut self,
        label: &str,
        branch_length: Option<f64>,
    ) -> Result<VertexIndex, ModelError> {
        let branch_length = branch_length.map(BranchLength::new).transpose()?;
        self.taxon_namespace.check_can_add(label)?;
        if self.leaf_labels.contains(label) {
            return Err(ModelError::DuplicateTaxon(label.to_string()));
        }
        let (position, _) = self.leaf_labels.insert_full(label.to_string());
        Ok(self.tree.push_leaf(branch_length, position))
    }

    /// Adds an internal vertex above two existing, still unattached vertices.
    ///
    /// # Errors
    /// - [ModelError::InvalidBranchLength] for negative or non-finite lengths
    /// - [ModelError::InvalidChild] if a child is unknown, the root, already
    ///   attached, or both children are the same vertex
    pub fn add_internal(
        &mut self,
        children: (VertexIndex, VertexIndex),
        branch_length: Option<f64>,
    ) -> Result<VertexIndex, ModelError> {
        let branch_length = branch_length.map(BranchLength::new).transpose()?;
        self.check_children(children)?;
        Ok(self.tree.push_internal(children, branch_length))
    }

    /// Adds the root above two existing, still unattached vertices.
    ///
    /// # Errors
    /// - [ModelError::RootAlreadySet] on a second call
    /// - [ModelError::InvalidChild] as for [add_internal](Self::add_internal)
    pub fn add_root(
        &mut self,
        children: (VertexIndex, VertexIndex),
    ) -> Result<VertexIndex, ModelError> {
        if self.tree.is_root_set() {
            return Err(ModelError::RootAlreadySet);
        }
        self.check_children(children)?;
        Ok(self.tree.push_root(children))
    }

    /// Validates the tree, registers its new taxa and returns it.
    ///
    /// On error the namespace is left unchanged.
    ///
    /// # Errors
    /// - [ModelError::IncompleteTree] or [ModelError::DuplicateTaxon] if the
    ///   structure is not a complete binary tree on distinct taxa
    /// - [ModelError::TaxonNamespaceLocked] if the namespace was locked after
    ///   a new taxon was added
    pub fn finish(mut self) -> Result<Tree, ModelError> {
        self.tree.validate()?;
        for label in &self.leaf_labels {
            self.taxon_namespace.check_can_add(label)?;
        }

        let taxa = self
            .leaf_labels
            .iter()
            .map(|label| self.taxon_namespace.add_taxon(label))
            .collect::<Result<Vec<TaxonIndex>, _>>()?;
        self.tree.remap_taxa(&taxa);
        Ok(self.tree)
    }

    fn check_children(&self, (left, right): (VertexIndex, VertexIndex)) -> Result<(), ModelError> {
        if left == right {
            return Err(ModelError::InvalidChild(right));
        }
        for child in [left, right] {
            if !self.tree.is_attachable(child) {
                return Err(ModelError::InvalidChild(child));
            }
        }
        Ok(())
    }
}
