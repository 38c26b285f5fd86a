//! Insertion-ordered, duplicate-free collection of shared entities.

use crate::identity::{Identity, InstanceId};
use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;

// =#========================================================================#=
// ORDERED SET
// =#========================================================================#=
/// Set of shared entities that keeps insertion order and rejects duplicates.
///
/// Membership is decided by [InstanceId], never by content: two distinct
/// namespaces holding the same taxa are both kept, while adding the same
/// `Rc` twice is a no-op. Removal keeps the relative order of the remaining
/// elements.
///
/// # Example
/// ```
/// use phyloset::container::OrderedSet;
/// use phyloset::model::TaxonNamespace;
/// use std::rc::Rc;
///
/// let mut set = OrderedSet::new();
/// let birds = Rc::new(TaxonNamespace::new().with_label("birds"));
/// let fish = Rc::new(TaxonNamespace::new().with_label("fish"));
///
/// assert!(set.add(Rc::clone(&birds)));
/// assert!(set.add(Rc::clone(&fish)));
/// assert!(!set.add(Rc::clone(&birds))); // already present
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.position(&fish), Some(1));
/// ```
pub struct OrderedSet<T: Identity> {
    items: IndexMap<InstanceId, Rc<T>>,
}

impl<T: Identity> OrderedSet<T> {
    /// Creates a new empty set.
    pub fn new() -> Self {
        OrderedSet {
            items: IndexMap::new(),
        }
    }

    /// Adds `item` at the end unless the same instance is already present.
    ///
    /// # Returns
    /// `true` if the item was inserted, `false` if it was already a member
    /// (in which case neither size nor order change).
    pub fn add(&mut self, item: Rc<T>) -> bool {
        let id = item.instance_id();
        if self.items.contains_key(&id) {
            return false;
        }
        self.items.insert(id, item);
        true
    }

    /// Returns whether this exact instance is a member.
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains_key(&item.instance_id())
    }

    /// Returns whether an instance with the given identity is a member.
    pub fn contains_id(&self, id: InstanceId) -> bool {
        self.items.contains_key(&id)
    }

    /// Returns the insertion position of `item`, or `None` if not a member.
    pub fn position(&self, item: &T) -> Option<usize> {
        self.items.get_index_of(&item.instance_id())
    }

    /// Returns the element at insertion position `index`.
    pub fn get(&self, index: usize) -> Option<&Rc<T>> {
        self.items.get_index(index).map(|(_, item)| item)
    }

    /// Removes `item`, shifting later elements down by one.
    ///
    /// # Returns
    /// The removed handle, or `None` if `item` was not a member.
    pub fn remove(&mut self, item: &T) -> Option<Rc<T>> {
        self.items.shift_remove(&item.instance_id())
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<T>> {
        self.items.values()
    }
}

impl<T: Identity> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identity + fmt::Debug> fmt::Debug for OrderedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.values()).finish()
    }
}

impl<'a, T: Identity> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a Rc<T>;
    type IntoIter = indexmap::map::Values<'a, InstanceId, Rc<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.values()
    }
}

impl<T: Identity> FromIterator<Rc<T>> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = Rc<T>>>(iter: I) -> Self {
        let mut set = OrderedSet::new();
        for item in iter {
            set.add(item);
        }
        set
    }
}
