//! Instance identity for mutable, shared entities.
//!
//! Data sets, taxon namespaces, tree lists and character matrices are mutable
//! and get shared between collections. Two of them are equal only if they are
//! the same instance, so equality and hashing must not look at content.
//! Each instance mints an [InstanceId] when created and keeps it for its
//! whole life; moving the value does not change it.

use std::fmt;
use uuid::Uuid;

/// Stable per-instance identity token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(Uuid);

impl InstanceId {
    /// Mints a fresh, unique identity.
    pub fn new() -> Self {
        InstanceId(Uuid::new_v4())
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form is enough to tell instances apart in logs
        let simple = self.0.simple().to_string();
        write!(f, "{}", &simple[..8])
    }
}

/// Types whose equality is instance identity.
///
/// Implementors are stored in [OrderedSet](crate::container::OrderedSet)
/// keyed by [Identity::instance_id].
pub trait Identity {
    /// Returns the identity token of this instance.
    fn instance_id(&self) -> InstanceId;
}

/// Implements [Identity], `PartialEq`, `Eq` and `Hash` for a type with an
/// `id: InstanceId` field.
macro_rules! identity_equality {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::identity::Identity for $ty {
                fn instance_id(&self) -> $crate::identity::InstanceId {
                    self.id
                }
            }

            impl PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    self.id == other.id
                }
            }

            impl Eq for $ty {}

            impl std::hash::Hash for $ty {
                fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                    self.id.hash(state);
                }
            }
        )+
    };
}

pub(crate) use identity_equality;
