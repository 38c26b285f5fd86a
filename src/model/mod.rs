//! Entities aggregated by a [DataSet](crate::DataSet).
//!
//! # Taxa
//! A [TaxonNamespace] is the registry of taxon labels that trees and
//! character matrices refer to. Taxa are addressed by [TaxonIndex], so "leaf
//! 3 of this tree" and "row 3 of this matrix" are the same taxon exactly when
//! both refer to the same namespace instance.
//!
//! # Trees
//! Trees are represented by [Tree], which uses the arena pattern to store
//! [Vertex] nodes, referenced by [VertexIndex]. Trees are binary and rooted,
//! and are built with a [TreeBuilder] bound to a namespace. A [TreeList]
//! holds trees on one namespace.
//!
//! # Character data
//! A [CharacterMatrix] holds per-taxon sequences of a [CharacterDataType].
//!
//! # Sharing
//! Namespaces, tree lists and matrices are shared by `Rc` and compare by
//! instance identity (see [crate::identity]). They are not thread-safe.

pub mod char_matrix;
pub mod taxon_namespace;
pub mod tree;
pub mod tree_builder;
pub mod tree_list;
pub mod vertex;

// Taxa
pub use taxon_namespace::TaxonIndex;
pub use taxon_namespace::TaxonNamespace;
// Trees
pub use tree::NewickStyle;
pub use tree::Tree;
pub use tree::VertexIndex;
pub use tree_builder::TreeBuilder;
pub use tree_list::TreeList;
pub use vertex::BranchLength;
pub use vertex::Vertex;
// Character data
pub use char_matrix::CharacterDataType;
pub use char_matrix::CharacterMatrix;
