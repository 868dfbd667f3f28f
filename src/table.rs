//! ChainTable: the string-keyed separate-chaining table and its cursor.

use crate::chain::{Chain, VecChain};
use crate::config::TableConfig;
use crate::fnv;
use std::marker::PhantomData;

/// A key/value pair stored in a bucket chain. The key is owned by the
/// table and immutable once stored.
#[derive(Debug)]
pub struct Entry<V> {
    key: String,
    value: V,
}

impl<V> Entry<V> {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }
}

/// String-keyed hash map built from an array of bucket chains.
///
/// Placement hashes the key's bytes and reduces modulo the current
/// capacity. Collisions extend the bucket's chain at the tail. After a new
/// insertion or a removal the load factor is compared against the
/// configured thresholds and the whole table rehashes into a larger or
/// smaller bucket array when crossed.
///
/// Keys are unique: inserting an existing key replaces its value. The
/// bucket chains are any [`Chain`] implementation; `VecChain` is the
/// default.
pub struct ChainTable<V, C = VecChain<Entry<V>>> {
    buckets: Vec<C>,
    len: usize,
    config: TableConfig,
    _marker: PhantomData<V>,
}

impl<V> ChainTable<V> {
    /// Empty table with the default policy (37 buckets, grow past 3.0,
    /// shrink below 1.0).
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }
}

impl<V> Default for ChainTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, C> ChainTable<V, C>
where
    C: Chain<Entry<V>>,
{
    /// Empty table with an explicit resizing policy.
    pub fn with_config(config: TableConfig) -> Self {
        Self {
            buckets: empty_buckets(config.initial_capacity),
            len: 0,
            config,
            _marker: PhantomData,
        }
    }

    /// Number of stored entries. O(1).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current bucket count. Starts at `initial_capacity` and never drops
    /// below it.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    fn bucket_index(key: &str, capacity: usize) -> usize {
        fnv::fnv1a(key.as_bytes()) as usize % capacity
    }

    /// Locate `key`: its bucket, and its chain position when present.
    fn locate(&self, key: &str) -> (usize, Option<usize>) {
        let bucket = Self::bucket_index(key, self.capacity());
        let chain = &self.buckets[bucket];
        let pos = (0..chain.len())
            .find(|&i| chain.get(i).map(|e| e.key == key).unwrap_or(false));
        (bucket, pos)
    }

    fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// Store `value` under `key`.
    ///
    /// An existing key keeps its stored key string and has its old value
    /// dropped in place; the length is unchanged and `false` is returned.
    /// A new key copies the key into a fresh entry at the tail of its
    /// bucket's chain and returns `true`; if the load factor then exceeds
    /// the grow threshold, capacity multiplies by the resize factor.
    pub fn insert(&mut self, key: &str, value: V) -> bool {
        let (bucket, pos) = self.locate(key);
        if let Some(pos) = pos {
            if let Some(entry) = self.buckets[bucket].get_mut(pos) {
                entry.value = value;
            }
            return false;
        }

        self.buckets[bucket].push_back(Entry {
            key: key.to_owned(),
            value,
        });
        self.len += 1;

        if self.load_factor() > self.config.grow_above {
            self.resize(self.capacity() * self.config.resize_factor);
        }
        true
    }

    /// Detach `key`'s entry and hand its value back undropped, or `None`
    /// when absent. The entry's key storage is released. If the load
    /// factor then falls below the shrink threshold and the reduced
    /// capacity would stay strictly above `initial_capacity`, capacity
    /// divides by the resize factor.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let (bucket, pos) = self.locate(key);
        let entry = self.buckets[bucket].remove(pos?)?;
        self.len -= 1;

        let reduced = self.capacity() / self.config.resize_factor;
        if self.load_factor() < self.config.shrink_below
            && reduced > self.config.initial_capacity
        {
            self.resize(reduced);
        }
        Some(entry.value)
    }

    /// Whether an entry with `key` exists. No mutation.
    pub fn contains_key(&self, key: &str) -> bool {
        self.locate(key).1.is_some()
    }

    /// Borrow the value stored under `key`. The table keeps ownership.
    pub fn get(&self, key: &str) -> Option<&V> {
        let (bucket, pos) = self.locate(key);
        self.buckets[bucket].get(pos?).map(|e| &e.value)
    }

    /// Mutably borrow the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let (bucket, pos) = self.locate(key);
        self.buckets[bucket].get_mut(pos?).map(|e| &mut e.value)
    }

    /// Rehash every entry into a fresh bucket array of `new_capacity`
    /// chains. Entries are moved, never cloned, in old-bucket order then
    /// old-chain order, so entries that collide again keep their relative
    /// order.
    fn resize(&mut self, new_capacity: usize) {
        let mut rehashed: Vec<C> = empty_buckets(new_capacity);
        for chain in &mut self.buckets {
            while let Some(entry) = chain.pop_front() {
                let bucket = Self::bucket_index(&entry.key, new_capacity);
                rehashed[bucket].push_back(entry);
            }
        }
        self.buckets = rehashed;
    }

    /// Cursor positioned at the first entry in bucket order, or already
    /// finished when the table is empty.
    pub fn cursor(&self) -> Cursor<'_, V, C> {
        Cursor::new(self)
    }

    /// Iterator over all keys, in bucket order then chain order. The order
    /// is unrelated to insertion order and is not stable across resizes.
    pub fn keys(&self) -> Keys<'_, V, C> {
        Keys {
            cursor: self.cursor(),
        }
    }

    #[cfg(test)]
    pub(crate) fn sum_of_chain_lens(&self) -> usize {
        self.buckets.iter().map(|c| c.len()).sum()
    }
}

fn empty_buckets<C: Default>(capacity: usize) -> Vec<C> {
    (0..capacity).map(|_| C::default()).collect()
}

/// Forward-only cursor over a table's entries: ascending bucket index,
/// chain order within a bucket.
///
/// Holding a cursor borrows the table immutably, so structural mutation
/// while a cursor is live is rejected at compile time.
pub struct Cursor<'a, V, C = VecChain<Entry<V>>> {
    table: &'a ChainTable<V, C>,
    bucket: usize,
    pos: usize,
}

impl<'a, V, C> Cursor<'a, V, C>
where
    C: Chain<Entry<V>>,
{
    fn new(table: &'a ChainTable<V, C>) -> Self {
        let mut cursor = Self {
            table,
            bucket: 0,
            pos: 0,
        };
        cursor.bucket = cursor.next_occupied(0);
        cursor
    }

    /// First bucket at or after `from` with at least one entry, or
    /// `capacity()` when none remains (the finished state).
    fn next_occupied(&self, from: usize) -> usize {
        (from..self.table.capacity())
            .find(|&b| !self.table.buckets[b].is_empty())
            .unwrap_or(self.table.capacity())
    }

    /// True once every bucket is exhausted.
    pub fn is_finished(&self) -> bool {
        self.bucket >= self.table.capacity()
    }

    /// Key of the current entry, or `None` when finished. The key stays
    /// owned by the table.
    pub fn current_key(&self) -> Option<&'a str> {
        if self.is_finished() {
            return None;
        }
        self.table.buckets[self.bucket]
            .get(self.pos)
            .map(|e| e.key.as_str())
    }

    /// Step to the next entry in the current chain, else to the first
    /// entry of the next non-empty bucket, else into the finished state.
    /// Returns whether a current entry exists afterward. Advancing a
    /// finished cursor stays finished.
    pub fn advance(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.pos += 1;
        if self.pos < self.table.buckets[self.bucket].len() {
            return true;
        }
        self.pos = 0;
        self.bucket = self.next_occupied(self.bucket + 1);
        !self.is_finished()
    }
}

/// `Iterator` adapter over [`Cursor`], yielding every key exactly once.
pub struct Keys<'a, V, C = VecChain<Entry<V>>> {
    cursor: Cursor<'a, V, C>,
}

impl<'a, V, C> Iterator for Keys<'a, V, C>
where
    C: Chain<Entry<V>>,
{
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor.current_key()?;
        self.cursor.advance();
        Some(key)
    }
}
