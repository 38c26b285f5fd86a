//! Phyloset is a library to keep phylogenetic data sets together.
//!
//! A [DataSet] coordinates collections of taxon namespaces, tree lists and
//! character matrices. Trees and matrices refer to their taxa through a
//! shared [TaxonNamespace](model::TaxonNamespace), and a data set guarantees
//! that every namespace one of its tree lists or matrices refers to is itself
//! part of the data set.
//!
//! Core functionality provided:
//! - [DataSet]: three insertion-ordered, duplicate-free collections
//!   ([container::OrderedSet]), namespace-first registration, identity-based
//!   equality, and argument-checked construction via [DataSetBuilder].
//! - Data model (see [crate::model]):
//!   - [TaxonNamespace](model::TaxonNamespace): shared taxon label registry
//!   - [TreeList](model::TreeList) of binary arena [Tree](model::Tree)s,
//!     built with a namespace-bound [TreeBuilder](model::TreeBuilder)
//!   - [CharacterMatrix](model::CharacterMatrix) of DNA, RNA, protein or
//!     standard data
//! - Identity: namespaces, tree lists, matrices and data sets are equal only
//!   to themselves (see [crate::identity]).
//!
//! Limitations:
//! - No readers; data is built in memory (a format reader can feed
//!   [DataSet::from_items])
//! - Copying a data set is not supported yet
//! - Only binary trees
//! - Not thread-safe: contents are shared with `Rc`
//!
//! # Usage patterns
//! ```
//! use phyloset::DataSet;
//! use phyloset::model::CharacterDataType;
//!
//! let mut data_set = DataSet::new().with_label("ratites");
//! let taxa = data_set.new_taxon_namespace(Some("ratites"));
//! data_set.attach_taxon_namespace(taxa.clone());
//!
//! // Both default to the attached namespace
//! let trees = data_set.new_tree_list(Some("mcmc"), None);
//! let alignment = data_set.new_char_matrix(CharacterDataType::Dna, None, None);
//!
//! let mut builder = trees.new_tree(2);
//! let kiwi = builder.add_leaf("Apteryx australis", Some(0.4))?;
//! let emu = builder.add_leaf("Dromaius novaehollandiae", Some(0.4))?;
//! builder.add_root((kiwi, emu))?;
//! trees.push(builder.finish()?)?;
//!
//! alignment.set_sequence("Apteryx australis", "ACGTTA")?;
//!
//! assert_eq!(data_set.taxon_namespaces().len(), 1);
//! assert_eq!(taxa.len(), 2);
//! assert!(data_set.is_consistent());
//! # Ok::<(), phyloset::ModelError>(())
//! ```

pub mod container;
pub mod dataset;
pub mod error;
pub mod identity;
pub mod model;

pub use crate::dataset::DataItem;
pub use crate::dataset::DataSet;
pub use crate::dataset::DataSetBuilder;
pub use crate::error::DataSetError;
pub use crate::error::ModelError;
pub use crate::identity::InstanceId;
