//! Ordered, duplicate-free collection of extracted links.

use std::collections::HashSet;
use std::hash::Hash;

/// Link set: unique URL strings in first-seen order.
///
/// The seen-set is owned by the value, so every extraction starts from a
/// clean slate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    links: Vec<String>,
    seen: HashSet<String>,
}

impl LinkSet {
    /// Creates an empty link set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `link` unless it is already present. Returns `true` if added.
    pub fn insert(&mut self, link: &str) -> bool {
        if self.seen.contains(link) {
            return false;
        }
        self.seen.insert(link.to_string());
        self.links.push(link.to_string());
        true
    }

    /// Returns `true` if `link` is in the set.
    #[must_use]
    pub fn contains(&self, link: &str) -> bool {
        self.seen.contains(link)
    }

    /// Number of unique links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns `true` when no link was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Links in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.links
    }

    /// Iterates links in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.links.iter()
    }

    /// Consumes the set, returning links in insertion order.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.links
    }
}

impl<S: AsRef<str>> FromIterator<S> for LinkSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for link in iter {
            set.insert(link.as_ref());
        }
        set
    }
}

impl IntoIterator for LinkSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.into_iter()
    }
}

impl<'a> IntoIterator for &'a LinkSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}

/// Removes repeated items, keeping the first occurrence of each in order.
#[must_use]
pub fn dedupe_preserving_order<T>(items: Vec<T>) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
