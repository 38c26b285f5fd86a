//! Argument-checked construction of a [DataSet].
//!
//! A data set accepts at most one initializer (another data set to clone,
//! or a sequence of items) plus a small set of keyword options. The builder
//! collects whatever the caller supplies and [build](DataSetBuilder::build)
//! checks it in a fixed order:
//!
//! 1. more than one initializer → [DataSetError::TooManyArguments]
//! 2. `stream` or `schema` keyword → [DataSetError::UnsupportedArguments]
//! 3. clone initializer → [DataSetError::NotImplemented]
//! 4. create the data set, consuming the `label` keyword and adding items
//! 5. any keyword left over → [DataSetError::UnsupportedArguments]
//!
//! A data set is only returned if every check passes.
//!
//! # Example
//! ```
//! use phyloset::{DataSet, DataSetError};
//! use phyloset::model::TaxonNamespace;
//! use std::rc::Rc;
//!
//! let taxa = Rc::new(TaxonNamespace::new());
//! let data_set = DataSet::builder()
//!     .items([Rc::clone(&taxa)])
//!     .with_label("kiwi")
//!     .build()?;
//! assert_eq!(data_set.label(), Some("kiwi"));
//!
//! let err = DataSet::builder()
//!     .with_keyword("schema", "newick")
//!     .build()
//!     .unwrap_err();
//! assert!(matches!(err, DataSetError::UnsupportedArguments { .. }));
//! # Ok::<(), DataSetError>(())
//! ```

use crate::dataset::item::DataItem;
use crate::dataset::{DataSet, STREAM_CONSTRUCTION_ADVICE};
use crate::error::DataSetError;
use indexmap::IndexMap;
use tracing::warn;

/// Name reported in construction errors
const CONSTRUCTOR_NAME: &str = "DataSet";
/// Maximum number of initializers
const MAX_INITIALIZERS: usize = 1;
/// Keywords that once selected construction from a stream
const LEGACY_STREAM_KEYWORDS: &[&str] = &["stream", "schema"];
/// Keyword setting the label
const LABEL_KEYWORD: &str = "label";

// =#========================================================================#=
// INITIALIZER
// =#========================================================================#=
/// The single positional argument a data set may be constructed from.
#[derive(Debug)]
pub enum Initializer<'a> {
    /// Replicate another data set
    DataSet(&'a DataSet),
    /// Add each item in order
    Items(Vec<DataItem>),
}

impl Initializer<'_> {
    /// Short description used when echoing rejected arguments.
    pub fn describe(&self) -> String {
        match self {
            Initializer::DataSet(data_set) => format!("DataSet <{}>", data_set.id()),
            Initializer::Items(items) => {
                let categories: Vec<_> = items.iter().map(DataItem::category).collect();
                format!("[{}]", categories.join(", "))
            }
        }
    }
}

impl<'a> From<&'a DataSet> for Initializer<'a> {
    fn from(data_set: &'a DataSet) -> Self {
        Initializer::DataSet(data_set)
    }
}

impl From<Vec<DataItem>> for Initializer<'_> {
    fn from(items: Vec<DataItem>) -> Self {
        Initializer::Items(items)
    }
}

// =#========================================================================#=
// DATA SET BUILDER
// =#========================================================================#=
/// Collects initializers and keyword options, then builds a [DataSet].
///
/// See the [module documentation](self) for the order of checks.
#[derive(Debug, Default)]
pub struct DataSetBuilder<'a> {
    initializers: Vec<Initializer<'a>>,
    keywords: IndexMap<String, String>,
}

impl<'a> DataSetBuilder<'a> {
    /// Creates a builder without arguments, which builds an empty data set.
    pub fn new() -> Self {
        DataSetBuilder {
            initializers: Vec::new(),
            keywords: IndexMap::new(),
        }
    }

    /// Supplies an initializer.
    pub fn initializer(mut self, initializer: impl Into<Initializer<'a>>) -> Self {
        self.initializers.push(initializer.into());
        self
    }

    /// Supplies a sequence of items as initializer.
    pub fn items<I>(self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<DataItem>,
    {
        let items: Vec<DataItem> = items.into_iter().map(Into::into).collect();
        self.initializer(items)
    }

    /// Supplies another data set to clone as initializer.
    pub fn clone_of(self, data_set: &'a DataSet) -> Self {
        self.initializer(data_set)
    }

    /// Sets the label of the new data set.
    pub fn with_label(self, label: impl Into<String>) -> Self {
        self.with_keyword(LABEL_KEYWORD, label)
    }

    /// Supplies a keyword option. Supplying the same keyword again replaces
    /// its value.
    pub fn with_keyword(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.keywords.insert(name.into(), value.into());
        self
    }

    /// Checks the collected arguments and builds the data set.
    ///
    /// # Errors
    /// See the [module documentation](self).
    pub fn build(self) -> Result<DataSet, DataSetError> {
        let DataSetBuilder {
            mut initializers,
            mut keywords,
        } = self;

        if initializers.len() > MAX_INITIALIZERS {
            return Err(DataSetError::TooManyArguments {
                func_name: CONSTRUCTOR_NAME,
                max_args: MAX_INITIALIZERS,
                args: initializers.iter().map(Initializer::describe).collect(),
            });
        }

        let legacy: Vec<String> = keywords
            .keys()
            .filter(|name| LEGACY_STREAM_KEYWORDS.contains(&name.as_str()))
            .cloned()
            .collect();
        if !legacy.is_empty() {
            warn!(keywords = ?legacy, "rejected construction of data set from stream");
            return Err(DataSetError::UnsupportedArguments {
                names: legacy,
                reason: STREAM_CONSTRUCTION_ADVICE.to_string(),
            });
        }

        let items = match initializers.pop() {
            Some(Initializer::DataSet(other)) => return DataSet::from_dataset(other),
            Some(Initializer::Items(items)) => items,
            None => Vec::new(),
        };

        let mut data_set = DataSet::from_items(items);
        data_set.set_label(keywords.shift_remove(LABEL_KEYWORD));

        if !keywords.is_empty() {
            return Err(DataSetError::UnsupportedArguments {
                names: keywords.into_keys().collect(),
                reason: "unrecognized keyword(s)".to_string(),
            });
        }

        Ok(data_set)
    }
}
