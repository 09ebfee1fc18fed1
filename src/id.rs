//! Code for handling IDs
use indexmap::IndexSet;

/// A trait alias for ID types
pub trait IDLike:
    Eq + std::hash::Hash + std::borrow::Borrow<str> + Clone + std::fmt::Display + for<'a> From<&'a str>
{
}
impl<T> IDLike for T where
    T: Eq
        + std::hash::Hash
        + std::borrow::Borrow<str>
        + Clone
        + std::fmt::Display
        + for<'a> From<&'a str>
{
}

macro_rules! define_id_type {
    ($name:ident) => {
        #[derive(Clone, std::hash::Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
        /// An ID type (e.g. `OriginID`, `FacilityID`, etc.)
        pub struct $name(pub std::rc::Rc<str>);

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(std::rc::Rc::from(s))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(std::rc::Rc::from(s))
            }
        }

        impl $name {
            /// Create a new ID from a string slice
            pub fn new(id: &str) -> Self {
                $name(std::rc::Rc::from(id))
            }
        }
    };
}

define_id_type! {OriginID}
define_id_type! {FacilityID}

/// A data structure containing a set of IDs
pub trait IDCollection<ID: IDLike> {
    /// Get the IDs from `ids` which are not present in this collection, in their original order.
    fn missing_from<'a, I>(&self, ids: I) -> Vec<&'a ID>
    where
        I: IntoIterator<Item = &'a ID>,
        ID: 'a;
}

impl<ID: IDLike> IDCollection<ID> for IndexSet<ID> {
    fn missing_from<'a, I>(&self, ids: I) -> Vec<&'a ID>
    where
        I: IntoIterator<Item = &'a ID>,
        ID: 'a,
    {
        ids.into_iter().filter(|id| !self.contains(*id)).collect()
    }
}
