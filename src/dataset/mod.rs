//! The [DataSet]: top-level container of taxon namespaces, tree lists and
//! character matrices.
//!
//! # Referential integrity
//! Every tree list and character matrix refers to exactly one
//! [TaxonNamespace]. A data set guarantees that this namespace is itself one
//! of its `taxon_namespaces`, after every single mutation: registering a tree
//! list registers its namespace *first*, and a namespace cannot be removed
//! while anything in the data set still refers to it.
//!
//! # Identity
//! Data sets are mutable, so equality and hashing use a per-instance
//! [InstanceId]. Two data sets with the same contents are not equal.
//!
//! # Threading
//! Contents are shared with `Rc`, so a [DataSet] is neither `Send` nor
//! `Sync`. It is not meant for concurrent mutation from multiple threads.

pub mod builder;
pub mod copy;
pub mod item;

pub use builder::{DataSetBuilder, Initializer};
pub use copy::CopyMemo;
pub use item::DataItem;

use crate::container::OrderedSet;
use crate::error::DataSetError;
use crate::identity::{Identity, InstanceId};
use crate::model::{CharacterDataType, CharacterMatrix, TaxonNamespace, TreeList};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::Read;
use std::rc::Rc;
use tracing::{debug, trace, warn};

/// Advice given when a caller tries to construct a data set from a stream.
pub(crate) const STREAM_CONSTRUCTION_ADVICE: &str = "constructing a DataSet from an external stream \
     is no longer supported: read the data with a format reader and register the resulting \
     collections with `DataSet::from_items()`";

// =#========================================================================#=
// DATA SET
// =#========================================================================#=
/// Coordinates collections of [TaxonNamespace], [TreeList] and
/// [CharacterMatrix] objects.
///
/// All three collections keep insertion order and hold each instance at most
/// once. Several namespaces are allowed, e.g. for sources with several
/// independent taxa blocks, but sharing one namespace among all data is the
/// idiomatic use.
///
/// # Example
/// ```
/// use phyloset::DataSet;
/// use phyloset::model::{TaxonNamespace, TreeList};
/// use std::rc::Rc;
///
/// let taxa = Rc::new(TaxonNamespace::new().with_label("birds"));
/// let trees = Rc::new(TreeList::new(Rc::clone(&taxa)));
///
/// let mut data_set = DataSet::new();
/// data_set.add_tree_list(Rc::clone(&trees));
///
/// // The namespace came along with the tree list
/// assert!(data_set.taxon_namespaces().contains(&taxa));
/// assert!(data_set.is_consistent());
/// ```
pub struct DataSet {
    id: InstanceId,
    label: Option<String>,
    taxon_namespaces: OrderedSet<TaxonNamespace>,
    tree_lists: OrderedSet<TreeList>,
    char_matrices: OrderedSet<CharacterMatrix>,
    comments: Vec<String>,
    /// Namespace new tree lists and matrices default to
    attached_taxon_namespace: Option<Rc<TaxonNamespace>>,
}

// ============================================================================
// Construction (pub)
// ============================================================================
impl DataSet {
    /// Creates an empty data set without label or comments.
    pub fn new() -> Self {
        let id = InstanceId::new();
        trace!(data_set = %id, "created data set");
        DataSet {
            id,
            label: None,
            taxon_namespaces: OrderedSet::new(),
            tree_lists: OrderedSet::new(),
            char_matrices: OrderedSet::new(),
            comments: Vec::new(),
            attached_taxon_namespace: None,
        }
    }

    /// Creates a data set and [add](Self::add)s each item in order.
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<DataItem>,
    {
        let mut data_set = Self::new();
        for item in items {
            data_set.add(item);
        }
        data_set
    }

    /// Returns a [DataSetBuilder] for argument-checked construction.
    pub fn builder<'a>() -> DataSetBuilder<'a> {
        DataSetBuilder::new()
    }

    /// Legacy shortcut for reading a data set straight from a stream.
    ///
    /// # Errors
    /// Always [DataSetError::UnsupportedArguments] naming `stream` and
    /// `schema`.
    #[deprecated(note = "read with a format reader and use `DataSet::from_items` instead")]
    pub fn from_stream<R: Read>(_stream: R, schema: &str) -> Result<Self, DataSetError> {
        warn!(schema, "rejected construction of data set from stream");
        Err(DataSetError::UnsupportedArguments {
            names: vec!["stream".to_string(), "schema".to_string()],
            reason: STREAM_CONSTRUCTION_ADVICE.to_string(),
        })
    }

    /// Attaches a label to this data set.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

// ============================================================================
// Getters / Accessors (pub)
// ============================================================================
impl DataSet {
    /// Returns the identity token of this data set.
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Returns the label, or `None` if not set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Replaces the label.
    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    /// Returns the free-text comments in the order they were added.
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Appends a comment.
    pub fn push_comment(&mut self, comment: impl Into<String>) {
        self.comments.push(comment.into());
    }

    /// Returns the registered taxon namespaces.
    pub fn taxon_namespaces(&self) -> &OrderedSet<TaxonNamespace> {
        &self.taxon_namespaces
    }

    /// Returns the registered tree lists.
    pub fn tree_lists(&self) -> &OrderedSet<TreeList> {
        &self.tree_lists
    }

    /// Returns the registered character matrices.
    pub fn char_matrices(&self) -> &OrderedSet<CharacterMatrix> {
        &self.char_matrices
    }

    /// Iterates over the tree lists that refer to `namespace`.
    pub fn tree_lists_in<'a>(
        &'a self,
        namespace: &'a TaxonNamespace,
    ) -> impl Iterator<Item = &'a Rc<TreeList>> {
        self.tree_lists
            .iter()
            .filter(move |tree_list| **tree_list.taxon_namespace() == *namespace)
    }

    /// Iterates over the character matrices that refer to `namespace`.
    pub fn char_matrices_in<'a>(
        &'a self,
        namespace: &'a TaxonNamespace,
    ) -> impl Iterator<Item = &'a Rc<CharacterMatrix>> {
        self.char_matrices
            .iter()
            .filter(move |char_matrix| **char_matrix.taxon_namespace() == *namespace)
    }

    /// Returns `true` if every tree list's and matrix's namespace is
    /// registered in this data set.
    pub fn is_consistent(&self) -> bool {
        let tree_lists_ok = self
            .tree_lists
            .iter()
            .all(|tree_list| self.taxon_namespaces.contains(tree_list.taxon_namespace()));
        let char_matrices_ok = self
            .char_matrices
            .iter()
            .all(|char_matrix| self.taxon_namespaces.contains(char_matrix.taxon_namespace()));
        tree_lists_ok && char_matrices_ok
    }
}

// ============================================================================
// Mutation (pub)
// ============================================================================
impl DataSet {
    /// Adds a namespace, tree list or matrix to the matching collection.
    ///
    /// # Returns
    /// `true` if the item was newly added; adding an instance that is
    /// already present changes nothing.
    pub fn add(&mut self, item: impl Into<DataItem>) -> bool {
        match item.into() {
            DataItem::TaxonNamespace(namespace) => self.add_taxon_namespace(namespace),
            DataItem::TreeList(tree_list) => self.add_tree_list(tree_list),
            DataItem::CharMatrix(char_matrix) => self.add_char_matrix(char_matrix),
        }
    }

    /// Registers a taxon namespace.
    pub fn add_taxon_namespace(&mut self, namespace: Rc<TaxonNamespace>) -> bool {
        let id = namespace.instance_id();
        let added = self.taxon_namespaces.add(namespace);
        log_add(self.id, "taxon namespace", id, added);
        added
    }

    /// Registers a tree list, registering its namespace first if needed.
    pub fn add_tree_list(&mut self, tree_list: Rc<TreeList>) -> bool {
        self.ensure_taxon_namespace(tree_list.taxon_namespace());
        let id = tree_list.instance_id();
        let added = self.tree_lists.add(tree_list);
        log_add(self.id, "tree list", id, added);
        debug_assert!(self.is_consistent());
        added
    }

    /// Registers a character matrix, registering its namespace first if needed.
    pub fn add_char_matrix(&mut self, char_matrix: Rc<CharacterMatrix>) -> bool {
        self.ensure_taxon_namespace(char_matrix.taxon_namespace());
        let id = char_matrix.instance_id();
        let added = self.char_matrices.add(char_matrix);
        log_add(self.id, "character matrix", id, added);
        debug_assert!(self.is_consistent());
        added
    }

    /// Creates, registers and returns a new taxon namespace.
    pub fn new_taxon_namespace(&mut self, label: Option<&str>) -> Rc<TaxonNamespace> {
        let mut namespace = TaxonNamespace::new();
        if let Some(label) = label {
            namespace = namespace.with_label(label);
        }
        let namespace = Rc::new(namespace);
        self.add_taxon_namespace(Rc::clone(&namespace));
        namespace
    }

    /// Creates, registers and returns a new tree list.
    ///
    /// The list refers to `namespace` if given, else to the attached
    /// namespace, else to a fresh namespace registered alongside.
    pub fn new_tree_list(
        &mut self,
        label: Option<&str>,
        namespace: Option<Rc<TaxonNamespace>>,
    ) -> Rc<TreeList> {
        let namespace = self.resolve_taxon_namespace(namespace);
        let mut tree_list = TreeList::new(namespace);
        if let Some(label) = label {
            tree_list = tree_list.with_label(label);
        }
        let tree_list = Rc::new(tree_list);
        self.add_tree_list(Rc::clone(&tree_list));
        tree_list
    }

    /// Creates, registers and returns a new character matrix, resolving its
    /// namespace as [new_tree_list](Self::new_tree_list) does.
    pub fn new_char_matrix(
        &mut self,
        data_type: CharacterDataType,
        label: Option<&str>,
        namespace: Option<Rc<TaxonNamespace>>,
    ) -> Rc<CharacterMatrix> {
        let namespace = self.resolve_taxon_namespace(namespace);
        let mut char_matrix = CharacterMatrix::new(namespace, data_type);
        if let Some(label) = label {
            char_matrix = char_matrix.with_label(label);
        }
        let char_matrix = Rc::new(char_matrix);
        self.add_char_matrix(Rc::clone(&char_matrix));
        char_matrix
    }

    /// Makes `namespace` the default for new tree lists and matrices,
    /// registering it if needed.
    pub fn attach_taxon_namespace(&mut self, namespace: Rc<TaxonNamespace>) {
        self.ensure_taxon_namespace(&namespace);
        debug!(data_set = %self.id, namespace = %namespace.instance_id(), "attached taxon namespace");
        self.attached_taxon_namespace = Some(namespace);
    }

    /// Removes the default namespace, returning it. It stays registered.
    pub fn detach_taxon_namespace(&mut self) -> Option<Rc<TaxonNamespace>> {
        self.attached_taxon_namespace.take()
    }

    /// Returns the default namespace for new tree lists and matrices.
    pub fn attached_taxon_namespace(&self) -> Option<&Rc<TaxonNamespace>> {
        self.attached_taxon_namespace.as_ref()
    }

    /// Removes a tree list; its namespace stays registered.
    ///
    /// # Returns
    /// `true` if the tree list was a member.
    pub fn remove_tree_list(&mut self, tree_list: &TreeList) -> bool {
        let removed = self.tree_lists.remove(tree_list).is_some();
        if removed {
            debug!(data_set = %self.id, tree_list = %tree_list.instance_id(), "removed tree list");
        }
        removed
    }

    /// Removes a character matrix; its namespace stays registered.
    ///
    /// # Returns
    /// `true` if the matrix was a member.
    pub fn remove_char_matrix(&mut self, char_matrix: &CharacterMatrix) -> bool {
        let removed = self.char_matrices.remove(char_matrix).is_some();
        if removed {
            debug!(data_set = %self.id, char_matrix = %char_matrix.instance_id(), "removed character matrix");
        }
        removed
    }

    /// Removes a taxon namespace nothing in this data set refers to.
    ///
    /// # Returns
    /// `Ok(true)` if removed, `Ok(false)` if it was not a member.
    ///
    /// # Errors
    /// [DataSetError::TaxonNamespaceInUse] if a tree list, a matrix or the
    /// attachment still refers to it; nothing changes then.
    pub fn remove_taxon_namespace(
        &mut self,
        namespace: &TaxonNamespace,
    ) -> Result<bool, DataSetError> {
        let attached = self
            .attached_taxon_namespace
            .as_deref()
            .is_some_and(|attached| attached == namespace);
        let referenced = self.tree_lists_in(namespace).next().is_some()
            || self.char_matrices_in(namespace).next().is_some();
        if attached || referenced {
            return Err(DataSetError::TaxonNamespaceInUse {
                namespace: namespace.display_name(),
            });
        }

        let removed = self.taxon_namespaces.remove(namespace).is_some();
        if removed {
            debug!(data_set = %self.id, namespace = %namespace.instance_id(), "removed taxon namespace");
        }
        Ok(removed)
    }
}

// ============================================================================
// Helpers (private)
// ============================================================================
impl DataSet {
    /// Registers `namespace` unless already present.
    fn ensure_taxon_namespace(&mut self, namespace: &Rc<TaxonNamespace>) {
        if !self.taxon_namespaces.contains(namespace) {
            self.add_taxon_namespace(Rc::clone(namespace));
        }
    }

    fn resolve_taxon_namespace(
        &mut self,
        namespace: Option<Rc<TaxonNamespace>>,
    ) -> Rc<TaxonNamespace> {
        match namespace.or_else(|| self.attached_taxon_namespace.clone()) {
            Some(namespace) => namespace,
            None => self.new_taxon_namespace(None),
        }
    }
}

fn log_add(data_set: InstanceId, kind: &str, item: InstanceId, added: bool) {
    if added {
        debug!(data_set = %data_set, item = %item, "added {kind}");
    } else {
        trace!(data_set = %data_set, item = %item, "{kind} already present");
    }
}

// ============================================================================
// Traits
// ============================================================================
impl Default for DataSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for DataSet {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for DataSet {}

impl Hash for DataSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Identity for DataSet {
    fn instance_id(&self) -> InstanceId {
        self.id
    }
}

impl fmt::Debug for DataSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSet")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("taxon_namespaces", &self.taxon_namespaces.len())
            .field("tree_lists", &self.tree_lists.len())
            .field("char_matrices", &self.char_matrices.len())
            .field("comments", &self.comments.len())
            .finish()
    }
}

impl fmt::Display for DataSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "DataSet '{label}'")?,
            None => write!(f, "DataSet <{}>", self.id)?,
        }
        write!(
            f,
            ": {} taxon namespace(s), {} tree list(s), {} character matrix(es)",
            self.taxon_namespaces.len(),
            self.tree_lists.len(),
            self.char_matrices.len()
        )
    }
}
