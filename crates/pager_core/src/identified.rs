use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// An item with a stable identity used for de-duplication.
pub trait Identified {
    type Id: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    fn id(&self) -> Self::Id;
}

/// Insertion-ordered collection holding at most one element per id.
///
/// Inserting an element whose id is already present replaces the stored
/// element in place, so positions always reflect first arrival.
#[derive(Debug, Clone)]
pub struct IdentifiedVec<T: Identified> {
    items: Vec<T>,
    index: HashMap<T::Id, usize>,
}

impl<T: Identified> Default for IdentifiedVec<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Identified> IdentifiedVec<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.index.get(id).map(|&position| &self.items[position])
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.index.contains_key(id)
    }

    pub fn ids(&self) -> Vec<T::Id> {
        self.items.iter().map(Identified::id).collect()
    }

    /// Inserts `item`, returning `true` when its id was not present before.
    pub fn insert(&mut self, item: T) -> bool {
        let id = item.id();
        match self.index.get(&id) {
            Some(&position) => {
                self.items[position] = item;
                false
            }
            None => {
                self.index.insert(id, self.items.len());
                self.items.push(item);
                true
            }
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Identified + PartialEq> PartialEq for IdentifiedVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Identified + Eq> Eq for IdentifiedVec<T> {}

impl<T: Identified> Extend<T> for IdentifiedVec<T> {
    fn extend<It: IntoIterator<Item = T>>(&mut self, iter: It) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Identified> FromIterator<T> for IdentifiedVec<T> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        let mut collection = Self::new();
        collection.extend(iter);
        collection
    }
}

impl<'a, T: Identified> IntoIterator for &'a IdentifiedVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
