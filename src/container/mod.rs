//! Generic collection primitives shared by the data set.

pub mod ordered_set;

pub use ordered_set::OrderedSet;
