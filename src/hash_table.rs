use alloc::collections::TryReserveError;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::FusedIterator;
use core::marker::PhantomData;

/// Number of buckets a table starts with when no capacity is requested.
pub const DEFAULT_CAPACITY: usize = 16;

/// A collision chain: every value whose hash masks to the same bucket, in
/// insertion order, next to the hash it was inserted with.
type Bucket<V> = Vec<(u64, V)>;

/// `len / capacity > 3/4`
#[inline(always)]
fn exceeds_upper_bound(len: usize, capacity: usize) -> bool {
    len.saturating_mul(4) > capacity.saturating_mul(3)
}

/// `len / capacity >= 1/4`
#[inline(always)]
fn reaches_lower_bound(len: usize, capacity: usize) -> bool {
    len.saturating_mul(4) >= capacity
}

/// Smallest power-of-two bucket count that holds `len` values without
/// crossing the upper load bound.
fn capacity_for(len: usize) -> usize {
    let mut capacity = 1usize;
    while exceeds_upper_bound(len, capacity) {
        capacity <<= 1;
    }
    capacity
}

/// Bucket count a table holding `len` values shrinks to: the candidate just
/// below the first power of two whose load factor drops under the lower bound.
fn shrink_target(len: usize) -> usize {
    if len == 0 {
        return 1;
    }

    let mut candidate = 1usize;
    while reaches_lower_bound(len, candidate) {
        candidate <<= 1;
    }
    candidate >> 1
}

fn empty_buckets<V>(capacity: usize) -> Vec<Bucket<V>> {
    debug_assert!(capacity.is_power_of_two());
    (0..capacity).map(|_| Vec::new()).collect()
}

/// Debug statistics for bucket chain analysis.
///
/// Only available with the `stats` feature (or under `cfg(test)`).
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of values currently in the table.
    pub populated: usize,
    /// Number of buckets.
    pub capacity: usize,
    /// `populated / capacity`.
    pub load_factor: f64,
    /// Buckets holding no value.
    pub empty_buckets: usize,
    /// Length of the longest collision chain.
    pub longest_chain: usize,
    /// Mean chain length over the non-empty buckets.
    pub average_chain_len: f64,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the statistics to stdout.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        std::println!("=== Bucket Chain Statistics ===");
        std::println!("Populated:         {}", self.populated);
        std::println!("Capacity:          {}", self.capacity);
        std::println!("Load factor:       {:.4}", self.load_factor);
        std::println!(
            "Empty buckets:     {} ({:.2}%)",
            self.empty_buckets,
            self.empty_buckets as f64 / self.capacity as f64 * 100.0
        );
        std::println!("Longest chain:     {}", self.longest_chain);
        std::println!("Avg chain length:  {:.3}", self.average_chain_len);
    }
}

/// A separate-chaining hash table over values of type `V`.
///
/// The table does not know how to hash or compare its contents. Every lookup
/// takes the value's precomputed `u64` hash and an equality predicate, and the
/// hash is stored next to the value so rehashing never has to call back into
/// user code. Typed wrappers such as [`HashMap`](crate::HashMap) supply both.
///
/// The bucket count is always a power of two, and a hash selects its bucket
/// through `hash & (capacity - 1)`. Inserting through a [`VacantEntry`] doubles
/// the bucket count once the load factor would pass 3/4; removing a value
/// shrinks it once the load factor falls below 1/4, which keeps the table
/// from oscillating around a single threshold.
///
/// # Examples
///
/// ```rust
/// # use chain_hash::hash_table::Entry;
/// # use chain_hash::hash_table::HashTable;
/// #
/// #[derive(Debug, PartialEq)]
/// struct Person {
///     id: u64,
///     name: String,
/// }
///
/// let mut table = HashTable::new();
/// match table.entry(123, |p: &Person| p.id == 123) {
///     Entry::Vacant(entry) => {
///         entry.insert(Person {
///             id: 123,
///             name: "Alice".to_string(),
///         });
///     }
///     Entry::Occupied(_) => unreachable!(),
/// }
///
/// assert_eq!(table.find(123, |p| p.id == 123).unwrap().name, "Alice");
/// assert_eq!(table.capacity(), 16);
/// ```
pub struct HashTable<V> {
    buckets: Vec<Bucket<V>>,
    populated: usize,
}

impl<V> Debug for HashTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HashTable")
            .field(
                "chains",
                &self.buckets.iter().map(Vec::len).collect::<Vec<_>>(),
            )
            .field("populated", &self.populated)
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl<V> Clone for HashTable<V>
where
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            populated: self.populated,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        // Reuses chain storage wherever the bucket counts line up.
        self.buckets.clone_from(&source.buckets);
        self.populated = source.populated;
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> HashTable<V> {
    /// Creates an empty table with [`DEFAULT_CAPACITY`] buckets.
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_CAPACITY)
    }

    /// Creates an empty table that holds at least `capacity` values before
    /// it needs to grow.
    ///
    /// The bucket count is the smallest power of two keeping `capacity`
    /// values at or below a 3/4 load factor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<String> = HashTable::with_capacity(100);
    /// assert_eq!(table.capacity(), 256);
    ///
    /// let table: HashTable<String> = HashTable::with_capacity(0);
    /// assert_eq!(table.capacity(), 1);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_buckets(capacity_for(capacity))
    }

    fn with_buckets(capacity: usize) -> Self {
        Self {
            buckets: empty_buckets(capacity),
            populated: 0,
        }
    }

    /// Returns an iterator over all values in the table.
    ///
    /// Buckets are visited in index order and each chain in insertion order.
    /// The iterator borrows the table, so the table cannot be modified until
    /// the iterator is gone:
    ///
    /// ```compile_fail
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table: HashTable<u64> = HashTable::new();
    /// table.entry(1, |&v| v == 1).or_insert(1);
    ///
    /// for value in table.iter() {
    ///     table.remove(1, |&v| v == *value);
    /// }
    /// ```
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.entry(1, |&v: &u64| v == 10).or_insert(10);
    /// table.entry(0, |&v: &u64| v == 20).or_insert(20);
    /// table.entry(17, |&v: &u64| v == 30).or_insert(30);
    ///
    /// // Hash 17 lands in bucket 1 behind hash 1.
    /// let values: Vec<_> = table.iter().copied().collect();
    /// assert_eq!(values, [20, 10, 30]);
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: Default::default(),
            remaining: self.populated,
        }
    }

    /// Returns an iterator yielding mutable references to all values, in the
    /// same order as [`iter`](Self::iter).
    ///
    /// Callers must not change the part of a value its hash was derived from.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            buckets: self.buckets.iter_mut(),
            chain: Default::default(),
            remaining: self.populated,
        }
    }

    /// Returns an iterator that removes and yields all values from the table.
    ///
    /// The table keeps its bucket count. Values not consumed by the time the
    /// iterator is dropped are dropped with it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.entry(7, |s: &String| s == "key1").or_insert("key1".to_string());
    ///
    /// let values: Vec<String> = table.drain().collect();
    /// assert!(table.is_empty());
    /// assert_eq!(values, ["key1"]);
    /// ```
    pub fn drain(&mut self) -> Drain<'_, V> {
        let capacity = self.capacity();
        let buckets = core::mem::replace(&mut self.buckets, empty_buckets(capacity));
        let remaining = core::mem::take(&mut self.populated);
        Drain {
            inner: IntoIter {
                buckets: buckets.into_iter(),
                chain: Default::default(),
                remaining,
            },
            _table: PhantomData,
        }
    }

    /// Returns `true` if the table contains no values.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of values in the table.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns the number of buckets. Always a power of two.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `len / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.populated as f64 / self.capacity() as f64
    }

    #[inline(always)]
    fn mask(&self) -> usize {
        self.buckets.len() - 1
    }

    /// Returns the bucket a value with this hash lives in under the current
    /// bucket count.
    #[inline]
    pub fn bucket_index(&self, hash: u64) -> usize {
        hash as usize & self.mask()
    }

    /// Returns the length of the chain a value with this hash lives in.
    pub fn bucket_len(&self, hash: u64) -> usize {
        self.buckets[self.bucket_index(hash)].len()
    }

    /// Removes all values, leaving a fresh set of empty buckets of the same
    /// count.
    pub fn clear(&mut self) {
        self.buckets = empty_buckets(self.capacity());
        self.populated = 0;
    }

    /// Shrinks the bucket count to the target the removal path would pick
    /// for the current number of values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table: HashTable<i32> = HashTable::with_capacity(1000);
    /// table.entry(42, |&v| v == 5).or_insert(5);
    /// table.entry(123, |&v| v == 10).or_insert(10);
    ///
    /// table.shrink_to_fit();
    /// assert_eq!(table.capacity(), 8);
    /// assert_eq!(table.len(), 2);
    /// ```
    pub fn shrink_to_fit(&mut self) {
        let target = shrink_target(self.populated);
        if target < self.capacity() {
            self.resize(target);
        }
    }

    /// Grows the bucket count so `additional` more values fit without
    /// crossing the upper load bound.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table: HashTable<i32> = HashTable::new();
    /// table.reserve(50);
    /// assert_eq!(table.capacity(), 128);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        let target = capacity_for(self.populated.saturating_add(additional));
        if target > self.capacity() {
            self.resize(target);
        }
    }

    /// Removes and returns the value matching `hash` and `eq`.
    ///
    /// Other values in the chain keep their relative order. The bucket count
    /// shrinks if the load factor falls below 1/4.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.entry(42, |&n: &u64| n == 42).or_insert(42);
    ///
    /// assert_eq!(table.remove(42, |&n| n == 42), Some(42));
    /// assert!(table.is_empty());
    /// assert_eq!(table.remove(99, |&n| n == 99), None);
    /// ```
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<V> {
        let (bucket, slot) = self.position(hash, eq)?;
        Some(self.remove_at(bucket, slot))
    }

    fn remove_at(&mut self, bucket: usize, slot: usize) -> V {
        let (_, value) = self.buckets[bucket].remove(slot);
        self.populated -= 1;
        self.maybe_shrink();
        value
    }

    /// Gets the entry for the given hash and equality predicate.
    ///
    /// Looking up an entry never resizes; only [`VacantEntry::insert`] and
    /// [`OccupiedEntry::remove`] do.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::Entry;
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// let hash = 0xfeed;
    ///
    /// match table.entry(hash, |s: &String| s == "hello") {
    ///     Entry::Vacant(entry) => {
    ///         entry.insert("hello".to_string());
    ///     }
    ///     Entry::Occupied(mut entry) => {
    ///         *entry.get_mut() = "updated".to_string();
    ///     }
    /// }
    ///
    /// table
    ///     .entry(hash, |s: &String| s == "hello")
    ///     .or_insert("ignored".to_string());
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        match self.position(hash, eq) {
            Some((bucket, slot)) => Entry::Occupied(OccupiedEntry {
                table: self,
                bucket,
                slot,
            }),
            None => Entry::Vacant(VacantEntry { table: self, hash }),
        }
    }

    /// Returns a reference to the value matching `hash` and `eq`.
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        self.buckets[self.bucket_index(hash)]
            .iter()
            .find(|(h, v)| *h == hash && eq(v))
            .map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value matching `hash` and `eq`.
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&mut V> {
        let index = self.bucket_index(hash);
        self.buckets[index]
            .iter_mut()
            .find(|(h, v)| *h == hash && eq(v))
            .map(|(_, v)| v)
    }

    fn position(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<(usize, usize)> {
        let bucket = self.bucket_index(hash);
        self.buckets[bucket]
            .iter()
            .position(|(h, v)| *h == hash && eq(v))
            .map(|slot| (bucket, slot))
    }

    /// Appends to the chain for `hash` without checking the load factor.
    fn push(&mut self, hash: u64, value: V) -> &mut V {
        let index = self.bucket_index(hash);
        self.populated += 1;

        let bucket = &mut self.buckets[index];
        let slot = bucket.len();
        bucket.push((hash, value));
        &mut bucket[slot].1
    }

    /// Runs the grow check once after the table has been filled without
    /// per-insert checks: if the load factor is above 3/4 the bucket count
    /// doubles, once. A large bulk load can stay above the bound until later
    /// inserts grow it further.
    pub(crate) fn grow_after_load(&mut self) {
        let capacity = self.capacity();
        let grow = exceeds_upper_bound(self.populated, capacity);
        tracing::trace!(
            len = self.populated,
            capacity,
            grow,
            "post-load growth check"
        );
        if grow {
            self.resize(capacity << 1);
        }
    }

    fn maybe_shrink(&mut self) {
        let target = shrink_target(self.populated);
        if target < self.capacity() {
            self.resize(target);
        }
    }

    /// Moves every value into a freshly allocated array of `capacity` buckets.
    ///
    /// All storage is reserved up front, chains included, so the move itself
    /// cannot fail. If reservation fails the table is left untouched at its
    /// current bucket count.
    #[cold]
    fn resize(&mut self, capacity: usize) {
        debug_assert!(capacity.is_power_of_two());
        let old_capacity = self.capacity();

        let mut buckets = match self.allocate_buckets(capacity) {
            Ok(buckets) => buckets,
            Err(error) => {
                tracing::warn!(
                    old_capacity,
                    new_capacity = capacity,
                    len = self.populated,
                    %error,
                    "abandoning resize, keeping current buckets"
                );
                return;
            }
        };

        let mask = capacity - 1;
        for bucket in core::mem::take(&mut self.buckets) {
            for (hash, value) in bucket {
                buckets[hash as usize & mask].push((hash, value));
            }
        }
        self.buckets = buckets;

        tracing::debug!(
            old_capacity,
            new_capacity = capacity,
            len = self.populated,
            "rehashed buckets"
        );
    }

    fn allocate_buckets(&self, capacity: usize) -> Result<Vec<Bucket<V>>, TryReserveError> {
        let mask = capacity - 1;

        let mut sizes: Vec<usize> = Vec::new();
        sizes.try_reserve_exact(capacity)?;
        sizes.resize(capacity, 0);
        for (hash, _) in self.buckets.iter().flatten() {
            sizes[*hash as usize & mask] += 1;
        }

        let mut buckets = Vec::new();
        buckets.try_reserve_exact(capacity)?;
        for size in sizes {
            let mut bucket = Vec::new();
            bucket.try_reserve_exact(size)?;
            buckets.push(bucket);
        }

        Ok(buckets)
    }

    /// Returns a histogram of chain lengths: index `n` holds the number of
    /// buckets whose chain has exactly `n` values.
    #[cfg(any(test, feature = "stats"))]
    pub fn chain_histogram(&self) -> Vec<usize> {
        let longest = self.buckets.iter().map(Vec::len).max().unwrap_or(0);
        let mut hist = alloc::vec![0usize; longest + 1];
        for bucket in &self.buckets {
            hist[bucket.len()] += 1;
        }
        hist
    }

    /// Returns a summary of the bucket layout.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        let empty_buckets = self.buckets.iter().filter(|b| b.is_empty()).count();
        let occupied = self.capacity() - empty_buckets;
        DebugStats {
            populated: self.populated,
            capacity: self.capacity(),
            load_factor: self.load_factor(),
            empty_buckets,
            longest_chain: self.buckets.iter().map(Vec::len).max().unwrap_or(0),
            average_chain_len: if occupied == 0 {
                0.0
            } else {
                self.populated as f64 / occupied as f64
            },
        }
    }
}

/// A view into a single entry of a [`HashTable`], which may either be vacant
/// or occupied.
///
/// This enum is constructed by [`HashTable::entry`].
pub enum Entry<'a, V> {
    /// No value matched the hash and predicate.
    Vacant(VacantEntry<'a, V>),
    /// A value matched the hash and predicate.
    Occupied(OccupiedEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the value in the entry.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the result of `default` if the entry is vacant and returns a
    /// mutable reference to the value in the entry.
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Runs `f` on the value if the entry is occupied.
    pub fn and_modify(self, f: impl FnOnce(&mut V)) -> Self {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }
}

impl<'a, V> Entry<'a, V>
where
    V: Default,
{
    /// Inserts `V::default()` if the entry is vacant and returns a mutable
    /// reference to the value in the entry.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(V::default)
    }
}

/// A view into a vacant entry in a [`HashTable`].
pub struct VacantEntry<'a, V> {
    table: &'a mut HashTable<V>,
    hash: u64,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Appends the value to the end of its chain and returns a mutable
    /// reference to it.
    ///
    /// If the new value would push the load factor past 3/4, the bucket count
    /// doubles first. Rehashing before the append is equivalent to rehashing
    /// after it and keeps the returned reference valid.
    ///
    /// If the larger bucket array cannot be allocated, the value is still
    /// appended at the current bucket count and a warning is logged; the load
    /// factor then stays above 3/4 until a later grow check succeeds.
    pub fn insert(self, value: V) -> &'a mut V {
        let table = self.table;
        if exceeds_upper_bound(table.populated + 1, table.capacity()) {
            table.resize(table.capacity() << 1);
        }
        table.push(self.hash, value)
    }

    /// Appends the value without a growth check. The caller must follow a
    /// run of these with [`HashTable::grow_after_load`].
    pub(crate) fn insert_deferred(self, value: V) -> &'a mut V {
        self.table.push(self.hash, value)
    }
}

/// A view into an occupied entry in a [`HashTable`].
pub struct OccupiedEntry<'a, V> {
    table: &'a mut HashTable<V>,
    bucket: usize,
    slot: usize,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.table.buckets[self.bucket][self.slot].1
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.table.buckets[self.bucket][self.slot].1
    }

    /// Converts the entry into a mutable reference bound to the table's
    /// borrow.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.table.buckets[self.bucket][self.slot].1
    }

    /// Replaces the value in the entry, returning the old one.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(self.get_mut(), value)
    }

    /// Removes the value from the table, shrinking it if the load factor
    /// falls below 1/4.
    pub fn remove(self) -> V {
        self.table.remove_at(self.bucket, self.slot)
    }
}

/// An iterator over the values of a [`HashTable`].
///
/// Created by [`HashTable::iter`]. Yields values bucket by bucket, each chain
/// in insertion order.
pub struct Iter<'a, V> {
    buckets: core::slice::Iter<'a, Bucket<V>>,
    chain: core::slice::Iter<'a, (u64, V)>,
    remaining: usize,
}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            chain: self.chain.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((_, value)) = self.chain.next() {
                self.remaining -= 1;
                return Some(value);
            }
            self.chain = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

/// A mutable iterator over the values of a [`HashTable`].
///
/// Created by [`HashTable::iter_mut`].
pub struct IterMut<'a, V> {
    buckets: core::slice::IterMut<'a, Bucket<V>>,
    chain: core::slice::IterMut<'a, (u64, V)>,
    remaining: usize,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((_, value)) = self.chain.next() {
                self.remaining -= 1;
                return Some(value);
            }
            self.chain = self.buckets.next()?.iter_mut();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}

impl<V> FusedIterator for IterMut<'_, V> {}

/// An owning iterator over the values of a [`HashTable`].
pub struct IntoIter<V> {
    buckets: alloc::vec::IntoIter<Bucket<V>>,
    chain: alloc::vec::IntoIter<(u64, V)>,
    remaining: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((_, value)) = self.chain.next() {
                self.remaining -= 1;
                return Some(value);
            }
            self.chain = self.buckets.next()?.into_iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> FusedIterator for IntoIter<V> {}

impl<V> IntoIterator for HashTable<V> {
    type IntoIter = IntoIter<V>;
    type Item = V;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            buckets: self.buckets.into_iter(),
            chain: Default::default(),
            remaining: self.populated,
        }
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type IntoIter = Iter<'a, V>;
    type Item = &'a V;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A draining iterator over the values of a [`HashTable`].
///
/// Created by [`HashTable::drain`]. The table is already empty when this is
/// handed out; the iterator owns the detached buckets.
pub struct Drain<'a, V> {
    inner: IntoIter<V>,
    _table: PhantomData<&'a mut HashTable<V>>,
}

impl<V> Iterator for Drain<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Drain<'_, V> {}

impl<V> FusedIterator for Drain<'_, V> {}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec;
    use core::hash::Hasher;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;

    struct HashState {
        k0: u64,
        k1: u64,
    }

    impl HashState {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k0: rng.try_next_u64().unwrap(),
                k1: rng.try_next_u64().unwrap(),
            }
        }

        fn build_hasher(&self) -> SipHasher {
            SipHasher::new_with_keys(self.k0, self.k1)
        }
    }

    #[derive(Debug, PartialEq, Eq, Clone)]
    struct Item {
        key: u64,
        value: i32,
    }

    fn hash_key(state: &HashState, key: u64) -> u64 {
        let mut h = state.build_hasher();
        h.write_u64(key);
        h.finish()
    }

    fn fill(state: &HashState, table: &mut HashTable<Item>, keys: impl Iterator<Item = u64>) {
        for k in keys {
            let hash = hash_key(state, k);
            match table.entry(hash, |v| v.key == k) {
                Entry::Vacant(v) => {
                    v.insert(Item {
                        key: k,
                        value: k as i32,
                    });
                }
                Entry::Occupied(_) => panic!("unexpected occupied on first insert: {:#?}", table),
            }
        }
    }

    fn sorted_keys(table: &HashTable<Item>) -> Vec<u64> {
        let mut keys: Vec<u64> = table.iter().map(|v| v.key).collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn insert_and_find() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..32u64 {
            let hash = hash_key(&state, k);
            match table.entry(hash, |v: &Item| v.key == k) {
                Entry::Vacant(v) => {
                    v.insert(Item {
                        key: k,
                        value: (k as i32) * 2,
                    });
                    assert_eq!(
                        table.find(hash, |v| v.key == k),
                        Some(&Item {
                            key: k,
                            value: (k as i32) * 2
                        }),
                        "{:#?}",
                        table
                    );
                }
                Entry::Occupied(_) => panic!("unexpected occupied on first insert: {:#?}", table),
            }
        }
        assert_eq!(table.len(), 32);
        for k in 0..32u64 {
            let hash = hash_key(&state, k);
            assert_eq!(
                table.find(hash, |v| v.key == k).map(|v| v.value),
                Some((k as i32) * 2),
                "{:#?}",
                table
            );
        }

        let miss_hash = hash_key(&state, 999);
        assert!(table.find(miss_hash, |v| v.key == 999).is_none());
    }

    #[test]
    fn duplicate_entry_is_occupied() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        let k = 42u64;
        let hash = hash_key(&state, k);

        match table.entry(hash, |v| v.key == k) {
            Entry::Vacant(v) => {
                v.insert(Item { key: k, value: 7 });
            }
            Entry::Occupied(_) => panic!("should be vacant first time"),
        }

        match table.entry(hash, |v| v.key == k) {
            Entry::Occupied(mut occ) => {
                let prev = occ.insert(Item { key: k, value: 11 });
                assert_eq!(prev.value, 7, "{:#?}", table);
            }
            Entry::Vacant(_) => panic!("should be occupied: {}#{:02X} in {:#?}", k, hash, table),
        }
        assert_eq!(table.len(), 1);
        assert_eq!(table.find(hash, |v| v.key == k).unwrap().value, 11);
    }

    #[test]
    fn find_mut_and_modify() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        fill(&state, &mut table, 0..5);

        for k in 0..5u64 {
            let hash = hash_key(&state, k);
            if let Some(v) = table.find_mut(hash, |v| v.key == k) {
                v.value += 9;
            }
        }
        for k in 0..5u64 {
            let hash = hash_key(&state, k);
            let v = table.find(hash, |v| v.key == k).unwrap();
            assert_eq!(v.value, k as i32 + 9);
        }
    }

    #[test]
    fn remove_items() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        fill(&state, &mut table, 0..8);
        assert_eq!(table.len(), 8);

        for k in [0u64, 3, 7] {
            let hash = hash_key(&state, k);
            let removed = table.remove(hash, |v| v.key == k).expect("should remove");
            assert_eq!(removed.key, k);
        }
        assert_eq!(table.len(), 5);
        assert_eq!(sorted_keys(&table), [1, 2, 4, 5, 6]);

        let hash = hash_key(&state, 1000);
        assert!(table.remove(hash, |v| v.key == 1000).is_none());
        assert_eq!(table.len(), 5);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn insert_many() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        fill(&state, &mut table, 0..100_000);

        assert_eq!(table.len(), 100_000);
        assert_eq!(table.capacity(), 262_144);
        for k in 0..100_000u64 {
            let hash = hash_key(&state, k);
            assert_eq!(
                table.find(hash, |v| v.key == k).map(|v| v.value),
                Some(k as i32)
            );
        }
    }

    #[test]
    fn explicit_collision() {
        let mut table: HashTable<Item> = HashTable::new();
        let hash = 0;
        for k in 0..65u64 {
            match table.entry(hash, |v| v.key == k) {
                Entry::Vacant(v) => {
                    v.insert(Item {
                        key: k,
                        value: k as i32,
                    });
                }
                _ => unreachable!(),
            }
        }

        assert_eq!(table.len(), 65);
        assert_eq!(table.bucket_index(hash), 0);
        assert_eq!(table.bucket_len(hash), 65);
        for k in 0..65u64 {
            assert_eq!(
                table.find(hash, |v| v.key == k).map(|v| v.value),
                Some(k as i32),
                "{:#?}",
                table
            );
        }

        // Removing from the middle of a chain keeps the rest in order.
        table.remove(hash, |v| v.key == 10).unwrap();
        let keys: Vec<u64> = table.iter().map(|v| v.key).collect();
        let expected: Vec<u64> = (0..65).filter(|&k| k != 10).collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn iteration_order_is_bucket_then_chain() {
        let mut table: HashTable<u64> = HashTable::new();
        for hash in [5u64, 3, 21, 37, 0] {
            table.entry(hash, |&v| v == hash).or_insert(hash);
        }

        // 21 and 37 share bucket 5 with 5, behind it in insertion order.
        let order: Vec<u64> = table.iter().copied().collect();
        assert_eq!(order, [0, 3, 5, 21, 37]);
        assert_eq!(table.bucket_len(21), 3);

        // Restartable: a second pass yields the same sequence.
        let again: Vec<u64> = table.iter().copied().collect();
        assert_eq!(order, again);

        let iter = table.iter();
        assert_eq!(iter.len(), 5);
        let cloned: Vec<u64> = iter.clone().copied().collect();
        assert_eq!(cloned, order);
    }

    #[test]
    fn fresh_iterator_sees_mutations() {
        let mut table: HashTable<u64> = HashTable::new();
        for hash in 0..4u64 {
            table.entry(hash, |&v| v == hash).or_insert(hash);
        }
        let before: Vec<u64> = table.iter().copied().collect();
        assert_eq!(before, [0, 1, 2, 3]);

        table.remove(1, |&v| v == 1);
        table.entry(4, |&v| v == 4).or_insert(4);

        let after: Vec<u64> = table.iter().copied().collect();
        assert_eq!(after, [0, 2, 3, 4]);
    }

    #[test]
    fn grows_past_three_quarters() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();

        fill(&state, &mut table, 0..12);
        assert_eq!(table.capacity(), 16);
        assert_eq!(table.load_factor(), 0.75);
        let before = sorted_keys(&table);

        fill(&state, &mut table, 12..13);
        assert_eq!(table.capacity(), 32);
        assert_eq!(table.len(), 13);

        let mut expected = before;
        expected.push(12);
        assert_eq!(sorted_keys(&table), expected);
        for k in 0..13u64 {
            let hash = hash_key(&state, k);
            assert_eq!(table.bucket_index(hash), hash as usize & 31);
            assert!(table.find(hash, |v| v.key == k).is_some());
        }
    }

    #[test]
    fn shrinks_below_one_quarter() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        fill(&state, &mut table, 0..13);
        assert_eq!(table.capacity(), 32);

        // 8/32 sits exactly on the lower bound, no shrink yet.
        for k in 0..5u64 {
            let hash = hash_key(&state, k);
            table.remove(hash, |v| v.key == k).unwrap();
        }
        assert_eq!(table.len(), 8);
        assert_eq!(table.capacity(), 32);

        let hash = hash_key(&state, 5);
        table.remove(hash, |v| v.key == 5).unwrap();
        assert_eq!(table.len(), 7);
        assert_eq!(table.capacity(), 16);
        assert_eq!(sorted_keys(&table), [6, 7, 8, 9, 10, 11, 12]);

        for k in 6..13u64 {
            let hash = hash_key(&state, k);
            table.remove(hash, |v| v.key == k).unwrap();
        }
        assert!(table.is_empty());
        assert_eq!(table.capacity(), 1);
    }

    #[test]
    fn shrink_targets() {
        assert_eq!(shrink_target(0), 1);
        assert_eq!(shrink_target(1), 4);
        assert_eq!(shrink_target(2), 8);
        assert_eq!(shrink_target(3), 8);
        assert_eq!(shrink_target(4), 16);
        assert_eq!(shrink_target(7), 16);
        assert_eq!(shrink_target(8), 32);

        assert_eq!(capacity_for(0), 1);
        assert_eq!(capacity_for(3), 4);
        assert_eq!(capacity_for(4), 8);
        assert_eq!(capacity_for(12), 16);
        assert_eq!(capacity_for(13), 32);
    }

    #[test]
    fn capacity_stays_power_of_two() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        for k in 0..500u64 {
            fill(&state, &mut table, k..k + 1);
            assert!(table.capacity().is_power_of_two());
            assert!(table.load_factor() <= 0.75);
        }
        for k in 0..500u64 {
            let hash = hash_key(&state, k);
            table.remove(hash, |v| v.key == k).unwrap();
            assert!(table.capacity().is_power_of_two());
            assert_eq!(table.iter().count(), table.len());
        }
        assert_eq!(table.capacity(), 1);
    }

    #[test]
    fn grow_after_load_doubles_once() {
        let mut table: HashTable<u64> = HashTable::new();
        for hash in 0..100u64 {
            match table.entry(hash, |&v| v == hash) {
                Entry::Vacant(v) => {
                    v.insert_deferred(hash);
                }
                Entry::Occupied(_) => unreachable!(),
            }
        }
        assert_eq!(table.capacity(), 16);
        assert_eq!(table.len(), 100);

        table.grow_after_load();
        assert_eq!(table.capacity(), 32);
        assert_eq!(table.iter().count(), 100);
        for hash in 0..100u64 {
            assert_eq!(table.find(hash, |&v| v == hash), Some(&hash));
        }

        // Still above 3/4; the next insert resumes doubling.
        table.entry(100, |&v| v == 100).or_insert(100);
        assert_eq!(table.capacity(), 64);
    }

    #[test]
    fn grow_after_load_within_bound_keeps_capacity() {
        let mut table: HashTable<u64> = HashTable::new();
        for hash in 0..12u64 {
            match table.entry(hash, |&v| v == hash) {
                Entry::Vacant(v) => {
                    v.insert_deferred(hash);
                }
                Entry::Occupied(_) => unreachable!(),
            }
        }
        table.grow_after_load();
        assert_eq!(table.capacity(), 16);
    }

    #[test]
    fn drain_keeps_grown_capacity() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        fill(&state, &mut table, 0..40);
        assert_eq!(table.capacity(), 64);

        let mut keys: Vec<u64> = table.drain().map(|item| item.key).collect();
        keys.sort_unstable();
        assert_eq!(keys, (0..40).collect::<Vec<_>>());
        assert!(table.is_empty());
        assert_eq!(table.capacity(), 64);
        assert_eq!(table.iter().count(), 0);

        fill(&state, &mut table, 0..3);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn clear_keeps_capacity() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        fill(&state, &mut table, 0..40);
        assert_eq!(table.capacity(), 64);

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.capacity(), 64);
        assert_eq!(table.iter().count(), 0);

        fill(&state, &mut table, 0..3);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn iter_and_drain() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        fill(&state, &mut table, 10..20);

        let mut seen = vec![false; 10];
        for v in table.iter() {
            let idx = (v.key - 10) as usize;
            assert!(!seen[idx], "duplicate in iter: {}", v.key);
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&b| b));

        for v in table.iter_mut() {
            v.value += 1;
        }
        assert!(table.iter().all(|v| v.value == v.key as i32 + 1));

        let capacity = table.capacity();
        let mut drained: Vec<u64> = table.drain().map(|v| v.key).collect();
        drained.sort_unstable();
        assert_eq!(drained, (10..20).collect::<Vec<_>>());
        assert!(table.is_empty());
        assert_eq!(table.capacity(), capacity);
        assert!(table.iter().next().is_none());
    }

    #[test]
    fn into_iter_yields_everything() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        fill(&state, &mut table, 0..25);

        let mut keys: Vec<u64> = table.into_iter().map(|v| v.key).collect();
        keys.sort_unstable();
        assert_eq!(keys, (0..25).collect::<Vec<_>>());
    }

    fn hash_string_key(state: &HashState, key: &str) -> u64 {
        let mut h = state.build_hasher();
        h.write(key.as_bytes());
        h.finish()
    }

    #[test]
    fn insert_and_find_string_keys() {
        let state = HashState::default();
        let mut table: HashTable<(String, i32)> = HashTable::new();
        let keys = ["alpha", "beta", "gamma", "delta", "epsilon"];
        for (i, k) in keys.iter().enumerate() {
            let hash = hash_string_key(&state, k);
            table
                .entry(hash, |(key, _)| key == k)
                .or_insert((k.to_string(), i as i32));
        }

        assert_eq!(table.len(), keys.len());
        for (i, k) in keys.iter().enumerate() {
            let hash = hash_string_key(&state, k);
            assert_eq!(
                table.find(hash, |(key, _)| key == k).map(|(_, v)| *v),
                Some(i as i32)
            );
        }
        let miss = hash_string_key(&state, "zeta");
        assert!(table.find(miss, |(key, _)| key == "zeta").is_none());
    }

    #[test]
    fn entry_or_insert_with_and_modify() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        let hash = hash_key(&state, 7);

        let mut calls = 0;
        table
            .entry(hash, |v| v.key == 7)
            .or_insert_with(|| {
                calls += 1;
                Item { key: 7, value: 1 }
            })
            .value += 1;
        table
            .entry(hash, |v| v.key == 7)
            .and_modify(|v| v.value *= 10)
            .or_insert_with(|| unreachable!());

        assert_eq!(calls, 1);
        assert_eq!(table.find(hash, |v| v.key == 7).unwrap().value, 20);

        let mut counters: HashTable<u32> = HashTable::new();
        *counters.entry(3, |_| true).or_default() += 2;
        assert_eq!(counters.find(3, |_| true), Some(&2));
    }

    #[test]
    fn occupied_entry_remove_shrinks() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        fill(&state, &mut table, 0..4);
        assert_eq!(table.capacity(), 16);

        let hash = hash_key(&state, 2);
        match table.entry(hash, |v| v.key == 2) {
            Entry::Occupied(entry) => {
                assert_eq!(entry.get().value, 2);
                assert_eq!(entry.remove().key, 2);
            }
            Entry::Vacant(_) => panic!("expected occupied entry"),
        }
        assert_eq!(table.len(), 3);
        assert_eq!(table.capacity(), 8);
    }

    #[test]
    fn test_clone() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        fill(&state, &mut table, 0..50);

        let cloned = table.clone();
        assert_eq!(cloned.len(), table.len());
        assert_eq!(cloned.capacity(), table.capacity());
        assert_eq!(sorted_keys(&cloned), sorted_keys(&table));

        // Deep copy: modifying the original leaves the clone alone.
        let hash = hash_key(&state, 0);
        table.find_mut(hash, |v| v.key == 0).unwrap().value = -1;
        assert_eq!(cloned.find(hash, |v| v.key == 0).unwrap().value, 0);

        let mut target: HashTable<Item> = HashTable::new();
        fill(&state, &mut target, 100..103);
        target.clone_from(&cloned);
        assert_eq!(sorted_keys(&target), sorted_keys(&cloned));
        assert_eq!(target.capacity(), cloned.capacity());
    }

    #[test]
    fn test_shrink_to_fit_and_reserve() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::new();
        table.shrink_to_fit();
        assert_eq!(table.capacity(), 1);

        table.reserve(100);
        assert_eq!(table.capacity(), 256);
        fill(&state, &mut table, 0..100);
        assert_eq!(table.capacity(), 256);

        table.reserve(10);
        assert_eq!(table.capacity(), 256);

        table.shrink_to_fit();
        assert_eq!(table.capacity(), 256);
        for k in 0..90u64 {
            let hash = hash_key(&state, k);
            table.remove(hash, |v| v.key == k).unwrap();
        }
        table.shrink_to_fit();
        assert_eq!(table.capacity(), 32);
        assert_eq!(sorted_keys(&table), (90..100).collect::<Vec<_>>());
    }

    #[test]
    fn histogram_output() {
        let mut table: HashTable<u64> = HashTable::new();
        for value in [0u64, 16, 32, 1, 2] {
            table.entry(value, |&v| v == value).or_insert(value);
        }

        let hist = table.chain_histogram();
        assert_eq!(hist, [13, 2, 0, 1]);

        let stats = table.debug_stats();
        assert_eq!(stats.populated, 5);
        assert_eq!(stats.capacity, 16);
        assert_eq!(stats.empty_buckets, 13);
        assert_eq!(stats.longest_chain, 3);
        assert!((stats.average_chain_len - 5.0 / 3.0).abs() < 1e-9);
    }
}
