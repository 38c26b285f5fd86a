//! Taxon namespace: shared registry of taxon labels.
//!
//! - `TaxonNamespace`: joined storage and lookup of taxon labels for all
//!   trees and character matrices defined on the same taxa.

use crate::error::ModelError;
use crate::identity::{InstanceId, identity_equality};
use indexmap::IndexSet;
use std::cell::{Cell, RefCell};
use std::fmt;

/// Index of a taxon in a [TaxonNamespace] (0-based insertion position).
pub type TaxonIndex = usize;

// =#========================================================================#=
// TAXON NAMESPACE
// =#========================================================================#=
/// Maps taxon labels to compact indices, shared between trees and matrices.
///
/// Trees and character matrices that refer to the same namespace refer to
/// the same taxa: leaf "3" of a tree and row "3" of a matrix are the same
/// operational taxonomic unit. Labels are deduplicated, inserting the same
/// label twice returns the same [TaxonIndex], and indices never change.
///
/// A namespace is shared through `Rc` and has interior mutability, so taxa
/// can be added through any handle. Equality is instance identity.
///
/// # Example
/// ```
/// use phyloset::model::TaxonNamespace;
///
/// let taxa = TaxonNamespace::new().with_label("kiwi");
///
/// let idx_a = taxa.add_taxon("Apteryx haastii").unwrap();  // 0
/// let idx_b = taxa.add_taxon("Apteryx owenii").unwrap();   // 1
/// let idx_a2 = taxa.add_taxon("Apteryx haastii").unwrap(); // 0 (deduplicated)
///
/// assert_eq!(idx_a, idx_a2);
/// assert_ne!(idx_a, idx_b);
/// assert_eq!(taxa.taxon_label(idx_b).as_deref(), Some("Apteryx owenii"));
/// ```
#[derive(Debug)]
pub struct TaxonNamespace {
    id: InstanceId,
    label: Option<String>,
    taxa: RefCell<IndexSet<String>>,
    /// Whether new taxa may still be added
    mutable: Cell<bool>,
}

identity_equality!(TaxonNamespace);

impl TaxonNamespace {
    /// Creates a new empty, mutable namespace without a label.
    pub fn new() -> Self {
        TaxonNamespace {
            id: InstanceId::new(),
            label: None,
            taxa: RefCell::new(IndexSet::new()),
            mutable: Cell::new(true),
        }
    }

    /// Creates a new namespace holding the given labels in order (duplicates
    /// are dropped).
    pub fn with_taxa<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let namespace = Self::new();
        namespace
            .taxa
            .borrow_mut()
            .extend(labels.into_iter().map(Into::into));
        namespace
    }

    /// Attaches a label to this namespace.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the label of this namespace, or `None` if not set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the label, or the short identity if there is none.
    pub(crate) fn display_name(&self) -> String {
        match &self.label {
            Some(label) => format!("'{label}'"),
            None => format!("<{}>", self.id),
        }
    }

    /// Gets the index for a taxon label, registering it if it doesn't exist.
    ///
    /// # Errors
    /// [ModelError::TaxonNamespaceLocked] if the label is new and the
    /// namespace has been locked with [set_mutable](Self::set_mutable).
    pub fn add_taxon(&self, label: &str) -> Result<TaxonIndex, ModelError> {
        if let Some(index) = self.taxon_index(label) {
            return Ok(index);
        }
        self.check_can_add(label)?;

        let (index, _) = self.taxa.borrow_mut().insert_full(label.to_string());
        tracing::trace!(namespace = %self.id, taxon = label, index, "registered taxon");
        Ok(index)
    }

    /// Checks that [add_taxon](Self::add_taxon) would succeed for `label`
    /// without registering it.
    pub(crate) fn check_can_add(&self, label: &str) -> Result<(), ModelError> {
        if self.mutable.get() || self.contains_taxon(label) {
            return Ok(());
        }
        Err(ModelError::TaxonNamespaceLocked {
            namespace: self.display_name(),
            taxon: label.to_string(),
        })
    }

    /// Retrieves the index of an existing taxon.
    ///
    /// # Errors
    /// [ModelError::UnknownTaxon] if the label has not been registered.
    pub fn require_taxon(&self, label: &str) -> Result<TaxonIndex, ModelError> {
        self.taxon_index(label)
            .ok_or_else(|| ModelError::UnknownTaxon(label.to_string()))
    }

    /// Retrieves the index for a given label, or `None` if unknown.
    pub fn taxon_index(&self, label: &str) -> Option<TaxonIndex> {
        self.taxa.borrow().get_index_of(label)
    }

    /// Retrieves the label of the taxon at `index`, or `None` if out of range.
    pub fn taxon_label(&self, index: TaxonIndex) -> Option<String> {
        self.taxa.borrow().get_index(index).cloned()
    }

    /// Checks if a taxon with this label exists.
    pub fn contains_taxon(&self, label: &str) -> bool {
        self.taxa.borrow().contains(label)
    }

    /// Returns the number of taxa.
    pub fn len(&self) -> usize {
        self.taxa.borrow().len()
    }

    /// Returns `true` if no taxa are registered.
    pub fn is_empty(&self) -> bool {
        self.taxa.borrow().is_empty()
    }

    /// Returns a copy of all labels in index order.
    pub fn labels(&self) -> Vec<String> {
        self.taxa.borrow().iter().cloned().collect()
    }

    /// Returns whether new taxa may be added.
    pub fn is_mutable(&self) -> bool {
        self.mutable.get()
    }

    /// Locks (`false`) or unlocks (`true`) the namespace for new taxa.
    pub fn set_mutable(&self, mutable: bool) {
        self.mutable.set(mutable);
    }
}

impl Default for TaxonNamespace {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaxonNamespace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let taxa = self.taxa.borrow();
        writeln!(f, "TaxonNamespace {} ({} taxa):", self.display_name(), taxa.len())?;
        for (idx, label) in taxa.iter().enumerate() {
            writeln!(f, "  [{}] {}", idx, label)?;
        }
        Ok(())
    }
}
