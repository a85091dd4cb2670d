//! Read-mostly collection contracts shared by the dictionary's views.
//!
//! Every mutator is provided and fails with `ViewError::UnsupportedMutation`;
//! implementors only supply `len` (and `contains` for sets). The one mutation
//! channel a view supports is removal through its own cursor.

use crate::error::ViewError;

pub trait UnmodifiableCollection {
    type Element;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn add(&mut self, _element: Self::Element) -> Result<bool, ViewError> {
        Err(ViewError::UnsupportedMutation)
    }

    fn add_all<I>(&mut self, _elements: I) -> Result<bool, ViewError>
    where
        I: IntoIterator<Item = Self::Element>,
    {
        Err(ViewError::UnsupportedMutation)
    }

    fn remove(&mut self, _element: &Self::Element) -> Result<bool, ViewError> {
        Err(ViewError::UnsupportedMutation)
    }

    fn remove_all<'e, I>(&mut self, _elements: I) -> Result<bool, ViewError>
    where
        I: IntoIterator<Item = &'e Self::Element>,
        Self::Element: 'e,
    {
        Err(ViewError::UnsupportedMutation)
    }

    fn retain_all<'e, I>(&mut self, _elements: I) -> Result<bool, ViewError>
    where
        I: IntoIterator<Item = &'e Self::Element>,
        Self::Element: 'e,
    {
        Err(ViewError::UnsupportedMutation)
    }

    fn remove_if<F>(&mut self, _predicate: F) -> Result<bool, ViewError>
    where
        F: FnMut(&Self::Element) -> bool,
    {
        Err(ViewError::UnsupportedMutation)
    }

    fn clear(&mut self) -> Result<(), ViewError> {
        Err(ViewError::UnsupportedMutation)
    }
}

pub trait UnmodifiableSet: UnmodifiableCollection {
    fn contains(&self, element: &Self::Element) -> bool;

    fn contains_all<'e, I>(&self, elements: I) -> bool
    where
        I: IntoIterator<Item = &'e Self::Element>,
        Self::Element: 'e,
    {
        elements.into_iter().all(|e| self.contains(e))
    }

    /// Set equality against a duplicate-free sequence: every element of
    /// `other` is contained here and the counts match.
    fn set_eq<'e, I>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = &'e Self::Element>,
        Self::Element: 'e,
    {
        let mut count = 0;
        for element in other {
            if !self.contains(element) {
                return false;
            }
            count += 1;
        }
        count == self.len()
    }
}
