//! Error types for data sets and the entities they aggregate.
//!
//! - [DataSetError]: construction and bookkeeping failures of a
//!   [DataSet](crate::DataSet).
//! - [ModelError]: failures of the entity model (namespaces, trees,
//!   character matrices).

use crate::model::CharacterDataType;
use crate::model::VertexIndex;
use thiserror::Error;

// =#========================================================================#=
// DATA SET ERROR
// =#========================================================================#=
/// Errors raised by [DataSet](crate::DataSet) construction and bookkeeping.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataSetError {
    /// More positional initializers than the constructor accepts.
    #[error("{func_name}() takes at most {max_args} argument(s) ({} given): {args:?}", .args.len())]
    TooManyArguments {
        /// Name of the constructor
        func_name: &'static str,
        /// Maximum number of positional initializers accepted
        max_args: usize,
        /// Descriptions of all initializers received
        args: Vec<String>,
    },

    /// Keyword options that are unknown, or no longer supported.
    #[error("Unrecognized or unsupported arguments {names:?}: {reason}")]
    UnsupportedArguments {
        /// Names of the offending keywords
        names: Vec<String>,
        /// What went wrong and what to do instead
        reason: String,
    },

    /// Operation that is permanently unavailable on this type.
    #[error("Operation '{operation}' is not implemented for DataSet")]
    NotImplemented {
        /// Name of the operation
        operation: &'static str,
    },

    /// A taxon namespace cannot be removed while something still refers to it.
    #[error("Taxon namespace {namespace} is still referenced and cannot be removed")]
    TaxonNamespaceInUse {
        /// Label (or identity) of the namespace
        namespace: String,
    },
}

impl DataSetError {
    /// Convenience constructor for [DataSetError::NotImplemented].
    pub fn not_implemented(operation: &'static str) -> Self {
        DataSetError::NotImplemented { operation }
    }

    /// Returns `true` if this error signals an operation that is permanently
    /// unsupported, as opposed to a failure caused by the given arguments.
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, DataSetError::NotImplemented { .. })
    }
}

// =#========================================================================#=
// MODEL ERROR
// =#========================================================================#=
/// Errors raised by the entity model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Branch length must be non-negative and finite, got {0}")]
    InvalidBranchLength(f64),

    #[error("Taxon namespace {namespace} is locked, cannot add taxon '{taxon}'")]
    TaxonNamespaceLocked { namespace: String, taxon: String },

    #[error("Taxon '{0}' is not part of the taxon namespace")]
    UnknownTaxon(String),

    #[error("Tree was built against a different taxon namespace")]
    NamespaceMismatch,

    #[error("Vertex {0} cannot be used as child (unknown, root, or already attached)")]
    InvalidChild(VertexIndex),

    #[error("Root of tree has already been set")]
    RootAlreadySet,

    #[error("Tree is incomplete: {0}")]
    IncompleteTree(String),

    #[error("Taxon '{0}' appears on more than one leaf")]
    DuplicateTaxon(String),

    #[error("Symbol '{symbol}' in sequence of '{taxon}' is not valid {data_type} data")]
    InvalidCharacter {
        taxon: String,
        symbol: char,
        data_type: CharacterDataType,
    },
}
