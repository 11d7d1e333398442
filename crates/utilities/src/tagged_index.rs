use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;
use std::ops::Deref;

/// An index type that is tagged with a zero sized type, such that indices into
/// different collections cannot be mixed up by accident.
///
/// The tag is only used at the type level, so none of the trait implementations
/// below require anything of it.
pub struct TagIndex<T, Tag> {
    index: T,
    marker: PhantomData<fn() -> Tag>,
}

impl<T, Tag> TagIndex<T, Tag> {
    /// Creates a new index with the given value.
    pub const fn new(index: T) -> Self {
        Self {
            index,
            marker: PhantomData,
        }
    }
}

impl<T: Copy, Tag> TagIndex<T, Tag> {
    /// Returns the underlying value of the index.
    pub fn value(&self) -> T {
        self.index
    }
}

impl<T, Tag> Deref for TagIndex<T, Tag> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.index
    }
}

impl<T: Clone, Tag> Clone for TagIndex<T, Tag> {
    fn clone(&self) -> Self {
        Self::new(self.index.clone())
    }
}

impl<T: Copy, Tag> Copy for TagIndex<T, Tag> {}

impl<T: PartialEq, Tag> PartialEq for TagIndex<T, Tag> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T: Eq, Tag> Eq for TagIndex<T, Tag> {}

impl<T: PartialOrd, Tag> PartialOrd for TagIndex<T, Tag> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.index.partial_cmp(&other.index)
    }
}

impl<T: Ord, Tag> Ord for TagIndex<T, Tag> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T: Hash, Tag> Hash for TagIndex<T, Tag> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T: Default, Tag> Default for TagIndex<T, Tag> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug, Tag> fmt::Debug for TagIndex<T, Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.index)
    }
}

impl<T: fmt::Display, Tag> fmt::Display for TagIndex<T, Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ExampleTag;

    type ExampleIndex = TagIndex<usize, ExampleTag>;

    #[test]
    fn test_tag_index_ordering() {
        let first = ExampleIndex::new(1);
        let second = ExampleIndex::new(5);

        assert!(first < second);
        assert_eq!(*first + 4, *second);
        assert_eq!(second.value(), 5);
        assert_eq!(format!("{first} {second:?}"), "1 5");
    }
}
