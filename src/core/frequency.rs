//! Counting with first-occurrence tie-breaks.
//!
//! Every ranking in a [`StatsBundle`](super::stats::StatsBundle) orders by
//! count descending and breaks ties by which key was seen first. Keys are kept
//! in insertion order next to a hash index, and a stable sort does the rest.

use std::collections::HashMap;
use std::hash::Hash;

/// Occurrence counter that remembers first-seen order.
///
/// ```
/// use chatlens::core::frequency::RankedCounter;
///
/// let mut counter = RankedCounter::new();
/// for word in ["pizza", "tonight", "pizza", "movie", "tonight"] {
///     counter.add(word);
/// }
///
/// // "pizza" and "tonight" tie at 2; "pizza" appeared first
/// assert_eq!(counter.top(2), vec![("pizza", 2), ("tonight", 2)]);
/// ```
#[derive(Debug, Clone)]
pub struct RankedCounter<K> {
    index: HashMap<K, usize>,
    entries: Vec<(K, usize)>,
}

impl<K> RankedCounter<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Counts one occurrence of `key`.
    pub fn add(&mut self, key: K) {
        if let Some(&slot) = self.index.get(&key) {
            self.entries[slot].1 += 1;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, 1));
        }
    }

    /// Current count for `key`, 0 if never seen.
    pub fn count(&self, key: &K) -> usize {
        self.index.get(key).map_or(0, |&slot| self.entries[slot].1)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// The `n` most frequent keys, ties in first-seen order. Never padded.
    pub fn top(&self, n: usize) -> Vec<(K, usize)> {
        let mut ranked = self.entries.clone();
        // stable: equal counts keep insertion order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

impl<K> Default for RankedCounter<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Extend<K> for RankedCounter<K>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = K>>(&mut self, iter: T) {
        for key in iter {
            self.add(key);
        }
    }
}

impl<K> FromIterator<K> for RankedCounter<K>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        let mut counter = Self::new();
        counter.extend(iter);
        counter
    }
}
