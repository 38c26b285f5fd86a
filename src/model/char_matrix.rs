//! Character matrices: per-taxon sequence data bound to a taxon namespace.

use crate::error::ModelError;
use crate::identity::{InstanceId, identity_equality};
use crate::model::taxon_namespace::{TaxonIndex, TaxonNamespace};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Gap symbol, valid for all data types
const GAP: char = '-';
/// Missing data symbol, valid for all data types
const MISSING: char = '?';

// =#========================================================================#=
// CHARACTER DATA TYPE
// =#========================================================================#=
/// Kind of data held by a [CharacterMatrix], determining its alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterDataType {
    /// Nucleotides with IUPAC ambiguity codes
    Dna,
    /// As [Dna](Self::Dna) with `U` in place of `T`
    Rna,
    /// Amino acids with IUPAC ambiguity codes and stop `*`
    Protein,
    /// Discrete morphological states `0`-`9`
    Standard,
}

impl CharacterDataType {
    /// Symbols of this data type besides gap and missing (upper case).
    pub fn alphabet(&self) -> &'static str {
        match self {
            CharacterDataType::Dna => "ACGTRYSWKMBDHVN",
            CharacterDataType::Rna => "ACGURYSWKMBDHVN",
            CharacterDataType::Protein => "ACDEFGHIKLMNPQRSTVWYBZJXUO*",
            CharacterDataType::Standard => "0123456789",
        }
    }

    /// Returns whether `symbol` is valid for this data type (case-insensitive).
    pub fn is_valid_symbol(&self, symbol: char) -> bool {
        symbol == GAP || symbol == MISSING || self.alphabet().contains(symbol.to_ascii_uppercase())
    }
}

impl fmt::Display for CharacterDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CharacterDataType::Dna => "DNA",
            CharacterDataType::Rna => "RNA",
            CharacterDataType::Protein => "protein",
            CharacterDataType::Standard => "standard",
        };
        f.write_str(name)
    }
}

// =#========================================================================#=
// CHARACTER MATRIX
// =#========================================================================#=
/// Table of per-taxon character sequences on a fixed [TaxonNamespace].
///
/// Rows are kept in insertion order; setting the sequence of a taxon that
/// already has one replaces it in place. Equality is instance identity.
///
/// # Example
/// ```
/// use phyloset::model::{CharacterDataType, CharacterMatrix, TaxonNamespace};
/// use std::rc::Rc;
///
/// let taxa = Rc::new(TaxonNamespace::new());
/// let matrix = CharacterMatrix::new(Rc::clone(&taxa), CharacterDataType::Dna);
/// matrix.set_sequence("Apteryx mantelli", "ACGT-N")?;
/// matrix.set_sequence("Apteryx rowi", "acgtaa")?;
///
/// assert!(matrix.is_aligned());
/// assert_eq!(matrix.num_characters(), Some(6));
/// assert_eq!(taxa.len(), 2);
/// # Ok::<(), phyloset::ModelError>(())
/// ```
#[derive(Debug)]
pub struct CharacterMatrix {
    id: InstanceId,
    label: Option<String>,
    taxon_namespace: Rc<TaxonNamespace>,
    data_type: CharacterDataType,
    rows: RefCell<IndexMap<TaxonIndex, String>>,
}

identity_equality!(CharacterMatrix);

impl CharacterMatrix {
    /// Creates a new empty matrix of `data_type` on `taxon_namespace`.
    pub fn new(taxon_namespace: Rc<TaxonNamespace>, data_type: CharacterDataType) -> Self {
        CharacterMatrix {
            id: InstanceId::new(),
            label: None,
            taxon_namespace,
            data_type,
            rows: RefCell::new(IndexMap::new()),
        }
    }

    /// Attaches a label to this matrix.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the label of this matrix, or `None` if not set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the namespace the rows of this matrix refer to.
    pub fn taxon_namespace(&self) -> &Rc<TaxonNamespace> {
        &self.taxon_namespace
    }

    /// Returns the kind of data held.
    pub fn data_type(&self) -> CharacterDataType {
        self.data_type
    }

    /// Sets the sequence of `taxon`, registering the taxon if new.
    ///
    /// # Errors
    /// - [ModelError::InvalidCharacter] if a symbol is not part of the data
    ///   type's alphabet; nothing is stored then
    /// - [ModelError::TaxonNamespaceLocked] if the taxon is new and the
    ///   namespace is locked
    pub fn set_sequence(&self, taxon: &str, sequence: &str) -> Result<(), ModelError> {
        if let Some(symbol) = sequence.chars().find(|&c| !self.data_type.is_valid_symbol(c)) {
            return Err(ModelError::InvalidCharacter {
                taxon: taxon.to_string(),
                symbol,
                data_type: self.data_type,
            });
        }

        let index = self.taxon_namespace.add_taxon(taxon)?;
        self.rows.borrow_mut().insert(index, sequence.to_string());
        Ok(())
    }

    /// Returns the sequence of `taxon`, or `None` if it has no row.
    pub fn sequence(&self, taxon: &str) -> Option<String> {
        let index = self.taxon_namespace.taxon_index(taxon)?;
        self.rows.borrow().get(&index).cloned()
    }

    /// Returns the labels of all taxa with a row, in row order.
    pub fn taxa(&self) -> Vec<String> {
        self.rows
            .borrow()
            .keys()
            .filter_map(|&index| self.taxon_namespace.taxon_label(index))
            .collect()
    }

    /// Returns the number of rows.
    pub fn num_taxa(&self) -> usize {
        self.rows.borrow().len()
    }

    /// Returns `true` if the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.borrow().is_empty()
    }

    /// Returns whether all rows have the same number of characters.
    pub fn is_aligned(&self) -> bool {
        self.num_characters().is_some() || self.is_empty()
    }

    /// Returns the common row length, or `None` if empty or not aligned.
    pub fn num_characters(&self) -> Option<usize> {
        let rows = self.rows.borrow();
        let mut lengths = rows.values().map(|seq| seq.chars().count());
        let first = lengths.next()?;
        lengths.all(|len| len == first).then_some(first)
    }
}
