//! Items a [DataSet](crate::DataSet) can hold.

use crate::model::{CharacterMatrix, TaxonNamespace, TreeList};
use std::rc::Rc;

/// One entity of any of the three categories a data set aggregates.
///
/// The category set is closed, so dispatch in
/// [DataSet::add](crate::DataSet::add) is a plain `match`. Each shared handle
/// converts into a [DataItem] with `.into()`.
#[derive(Debug, Clone)]
pub enum DataItem {
    /// A taxon namespace
    TaxonNamespace(Rc<TaxonNamespace>),
    /// A tree list (brings its namespace along)
    TreeList(Rc<TreeList>),
    /// A character matrix (brings its namespace along)
    CharMatrix(Rc<CharacterMatrix>),
}

impl DataItem {
    /// Name of the item's category, for messages.
    pub fn category(&self) -> &'static str {
        match self {
            DataItem::TaxonNamespace(_) => "TaxonNamespace",
            DataItem::TreeList(_) => "TreeList",
            DataItem::CharMatrix(_) => "CharacterMatrix",
        }
    }
}

impl From<Rc<TaxonNamespace>> for DataItem {
    fn from(namespace: Rc<TaxonNamespace>) -> Self {
        DataItem::TaxonNamespace(namespace)
    }
}

impl From<Rc<TreeList>> for DataItem {
    fn from(tree_list: Rc<TreeList>) -> Self {
        DataItem::TreeList(tree_list)
    }
}

impl From<Rc<CharacterMatrix>> for DataItem {
    fn from(char_matrix: Rc<CharacterMatrix>) -> Self {
        DataItem::CharMatrix(char_matrix)
    }
}

impl From<&Rc<TaxonNamespace>> for DataItem {
    fn from(namespace: &Rc<TaxonNamespace>) -> Self {
        DataItem::TaxonNamespace(Rc::clone(namespace))
    }
}

impl From<&Rc<TreeList>> for DataItem {
    fn from(tree_list: &Rc<TreeList>) -> Self {
        DataItem::TreeList(Rc::clone(tree_list))
    }
}

impl From<&Rc<CharacterMatrix>> for DataItem {
    fn from(char_matrix: &Rc<CharacterMatrix>) -> Self {
        DataItem::CharMatrix(Rc::clone(char_matrix))
    }
}
