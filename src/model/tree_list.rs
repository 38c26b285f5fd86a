//! Ordered collection of trees sharing one taxon namespace.

use crate::error::ModelError;
use crate::identity::{Identity, InstanceId, identity_equality};
use crate::model::taxon_namespace::TaxonNamespace;
use crate::model::tree::Tree;
use crate::model::tree_builder::TreeBuilder;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

// =#========================================================================#=
// TREE LIST
// =#========================================================================#=
/// Ordered list of [Tree]s that all refer to the same [TaxonNamespace].
///
/// The namespace is fixed when the list is created. Trees are appended
/// through a shared handle, so the list has interior mutability; equality
/// is instance identity.
///
/// # Example
/// ```
/// use phyloset::model::{TaxonNamespace, TreeList};
/// use std::rc::Rc;
///
/// let taxa = Rc::new(TaxonNamespace::new());
/// let trees = TreeList::new(Rc::clone(&taxa)).with_label("posterior");
///
/// let mut builder = trees.new_tree(2);
/// let a = builder.add_leaf("A", Some(1.0))?;
/// let b = builder.add_leaf("B", Some(1.0))?;
/// builder.add_root((a, b))?;
/// trees.push(builder.finish()?)?;
///
/// assert_eq!(trees.len(), 1);
/// assert!(Rc::ptr_eq(trees.taxon_namespace(), &taxa));
/// # Ok::<(), phyloset::ModelError>(())
/// ```
#[derive(Debug)]
pub struct TreeList {
    id: InstanceId,
    label: Option<String>,
    taxon_namespace: Rc<TaxonNamespace>,
    trees: RefCell<Vec<Tree>>,
}

identity_equality!(TreeList);

impl TreeList {
    /// Creates a new empty tree list on `taxon_namespace`.
    pub fn new(taxon_namespace: Rc<TaxonNamespace>) -> Self {
        TreeList {
            id: InstanceId::new(),
            label: None,
            taxon_namespace,
            trees: RefCell::new(Vec::new()),
        }
    }

    /// Attaches a label to this tree list.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the label of this tree list, or `None` if not set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the namespace all trees of this list refer to.
    pub fn taxon_namespace(&self) -> &Rc<TaxonNamespace> {
        &self.taxon_namespace
    }

    /// Returns a [TreeBuilder] bound to this list's namespace.
    pub fn new_tree(&self, num_leaves: usize) -> TreeBuilder {
        TreeBuilder::new(Rc::clone(&self.taxon_namespace), num_leaves)
    }

    /// Appends a tree.
    ///
    /// # Errors
    /// [ModelError::NamespaceMismatch] if the tree was built against another
    /// namespace.
    pub fn push(&self, tree: Tree) -> Result<(), ModelError> {
        if tree.taxon_namespace_id() != self.taxon_namespace.instance_id() {
            return Err(ModelError::NamespaceMismatch);
        }
        self.trees.borrow_mut().push(tree);
        Ok(())
    }

    /// Returns the number of trees.
    pub fn len(&self) -> usize {
        self.trees.borrow().len()
    }

    /// Returns `true` if the list holds no trees.
    pub fn is_empty(&self) -> bool {
        self.trees.borrow().is_empty()
    }

    /// Borrows the trees in insertion order.
    ///
    /// Drop the guard before calling [push](Self::push) on the same list,
    /// otherwise `push` panics.
    pub fn trees(&self) -> Ref<'_, [Tree]> {
        Ref::map(self.trees.borrow(), |trees| trees.as_slice())
    }

    /// Returns a copy of the tree at `index`, or `None` if out of bounds.
    pub fn get(&self, index: usize) -> Option<Tree> {
        self.trees.borrow().get(index).cloned()
    }
}
