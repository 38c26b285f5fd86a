//! Copy operations of [DataSet].
//!
//! How deep a copy of a data set should go (share namespaces, copy them, or
//! re-scope everything onto one namespace) is not settled, so all copy
//! operations exist but report [DataSetError::NotImplemented]. `DataSet`
//! does not implement [Clone].

use crate::dataset::DataSet;
use crate::error::DataSetError;
use crate::identity::InstanceId;
use std::collections::HashMap;

/// Identity-keyed map from original instances to their copies.
///
/// A graph copy fills it as each collection is copied, so that a copied
/// tree list can be re-pointed at the copy of its namespace.
pub type CopyMemo = HashMap<InstanceId, InstanceId>;

impl DataSet {
    /// Creates a new data set replicating `other`.
    ///
    /// # Errors
    /// Always [DataSetError::NotImplemented].
    pub fn from_dataset(other: &DataSet) -> Result<DataSet, DataSetError> {
        tracing::debug!(source = %other.id, "clone of data set requested");
        Err(DataSetError::not_implemented("clone_from"))
    }

    /// Copies this data set with all contents re-scoped onto one taxon
    /// namespace.
    ///
    /// # Errors
    /// Always [DataSetError::NotImplemented].
    pub fn taxon_namespace_scoped_copy(
        &self,
        _memo: Option<&mut CopyMemo>,
    ) -> Result<DataSet, DataSetError> {
        Err(DataSetError::not_implemented("taxon_namespace_scoped_copy"))
    }

    /// Copies this data set sharing all namespaces, tree lists and matrices.
    ///
    /// # Errors
    /// Always [DataSetError::NotImplemented].
    pub fn shallow_copy(&self) -> Result<DataSet, DataSetError> {
        Err(DataSetError::not_implemented("shallow_copy"))
    }

    /// Copies this data set and everything it references.
    ///
    /// # Errors
    /// Always [DataSetError::NotImplemented].
    pub fn deep_copy(&self, _memo: Option<&mut CopyMemo>) -> Result<DataSet, DataSetError> {
        Err(DataSetError::not_implemented("deep_copy"))
    }
}
