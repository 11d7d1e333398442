use std::fmt;
use std::slice::Iter;

use itertools::Itertools;

///
/// A set that is internally represented by a sorted vector. Mostly useful for
/// a compact representation of small sets that are built once and then only
/// queried, such as the targets of a nondeterministic transition.
///
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VecSet<T> {
    /// The internal storage with the invariant that the array is sorted and
    /// free of duplicates.
    sorted_array: Vec<T>,
}

impl<T: Ord> VecSet<T> {
    pub fn new() -> Self {
        Self {
            sorted_array: Vec::new(),
        }
    }

    /// Returns a new set only containing the given element.
    pub fn singleton(element: T) -> Self {
        Self {
            sorted_array: vec![element],
        }
    }

    /// Returns true iff the set is empty.
    pub fn is_empty(&self) -> bool {
        self.sorted_array.is_empty()
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.sorted_array.len()
    }

    /// Inserts the given element into the set, returns true iff the element was
    /// inserted.
    pub fn insert(&mut self, element: T) -> bool {
        match self.sorted_array.binary_search(&element) {
            Ok(_) => false,
            Err(position) => {
                self.sorted_array.insert(position, element);
                true
            }
        }
    }

    /// Returns true iff the given element is in the set.
    pub fn contains(&self, element: &T) -> bool {
        self.sorted_array.binary_search(element).is_ok()
    }

    /// Returns true iff every element of this set is also in the other set.
    pub fn is_subset(&self, other: &VecSet<T>) -> bool {
        // Both arrays are sorted, so a single merge pass suffices.
        let mut other_iter = other.sorted_array.iter();
        'outer: for element in &self.sorted_array {
            for candidate in other_iter.by_ref() {
                if candidate == element {
                    continue 'outer;
                }

                if candidate > element {
                    return false;
                }
            }

            return false;
        }

        true
    }

    /// Returns an iterator over the elements in the set, they are yielded in sorted order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.sorted_array.iter()
    }

    /// Returns the smallest element of the set, if any.
    pub fn first(&self) -> Option<&T> {
        self.sorted_array.first()
    }

    /// Returns the largest element of the set, if any.
    pub fn last(&self) -> Option<&T> {
        self.sorted_array.last()
    }
}

impl<T: Ord> Default for VecSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for VecSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut sorted_array: Vec<T> = iter.into_iter().collect();
        sorted_array.sort_unstable();
        sorted_array.dedup();

        Self { sorted_array }
    }
}

impl<'a, T> IntoIterator for &'a VecSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.sorted_array.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for VecSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{:?}}}", self.sorted_array.iter().format(", "))
    }
}
