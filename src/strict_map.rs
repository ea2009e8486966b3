use alloc::string::String;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::ops::Index;

use crate::DefaultHashBuilder;
use crate::error::Error;
use crate::error::Result;
use crate::hash_map::HashMap;
use crate::hash_map::Iter;
use crate::hash_map::Keys;
use crate::hash_map::Values;

/// A `String`-to-`String` [`HashMap`] that refuses to remove what it does
/// not hold and can upsert in bulk.
///
/// Reads and inserts behave exactly as on [`HashMap`]. The differences:
///
/// - [`erase`](Self::erase) returns [`Error::KeyNotFound`] for a missing
///   key instead of `false`.
/// - [`update`](Self::update) writes every pair it is given, overwriting
///   existing values, where [`insert`](Self::insert) leaves them alone.
///
/// # Examples
///
/// ```rust
/// use chain_hash::{Error, StrictMap};
///
/// let mut env: StrictMap = StrictMap::new();
/// env.update([
///     ("HOME".to_string(), "/root".to_string()),
///     ("SHELL".to_string(), "sh".to_string()),
/// ]);
/// env.update([("SHELL".to_string(), "bash".to_string())]);
///
/// assert_eq!(env.at("SHELL").map(String::as_str), Ok("bash"));
/// assert_eq!(env.erase("HOME"), Ok(()));
/// assert_eq!(env.erase("HOME"), Err(Error::KeyNotFound));
/// ```
pub struct StrictMap<S = DefaultHashBuilder> {
    map: HashMap<String, String, S>,
}

impl<S: Clone> Clone for StrictMap<S> {
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.map.clone_from(&source.map);
    }
}

impl<S> Debug for StrictMap<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.map, f)
    }
}

impl<S: BuildHasher> PartialEq for StrictMap<S> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<S: BuildHasher> Eq for StrictMap<S> {}

impl<S: BuildHasher + Default> StrictMap<S> {
    /// Creates an empty map with 16 buckets.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Creates an empty map that holds at least `capacity` pairs before it
    /// grows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
        }
    }

    /// Builds a map from parallel key and value sequences; a repeated key
    /// keeps its last value.
    ///
    /// # Errors
    ///
    /// [`Error::LengthMismatch`] if the sequences differ in length.
    pub fn from_keys_values<I, J>(keys: I, values: J) -> Result<Self>
    where
        I: IntoIterator<Item = String, IntoIter: ExactSizeIterator>,
        J: IntoIterator<Item = String, IntoIter: ExactSizeIterator>,
    {
        HashMap::from_keys_values(keys, values).map(Self::from)
    }
}

impl<S: BuildHasher> StrictMap<S> {
    /// Creates an empty map with 16 buckets and the given hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            map: HashMap::with_hasher(hash_builder),
        }
    }

    /// Removes `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `key` is absent; the map is unchanged.
    pub fn erase(&mut self, key: &str) -> Result<()> {
        match self.map.remove(key) {
            Some(_) => Ok(()),
            None => Err(Error::KeyNotFound),
        }
    }

    /// Writes every pair from `pairs`, in order, overwriting the value of any
    /// key already present.
    ///
    /// ```rust
    /// # use chain_hash::StrictMap;
    /// let mut map: StrictMap = StrictMap::new();
    /// map.insert("a".to_string(), "1".to_string());
    /// map.update([
    ///     ("a".to_string(), "2".to_string()),
    ///     ("b".to_string(), "3".to_string()),
    /// ]);
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map["a"], "2");
    /// ```
    pub fn update<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in pairs {
            self.map.insert_or_replace(key, value);
        }
    }

    /// Inserts `value` under `key` if the key is absent. Returns `false`
    /// and leaves the map unchanged otherwise.
    pub fn insert(&mut self, key: String, value: String) -> bool {
        self.map.insert(key, value)
    }

    /// Returns the value under `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `key` is absent.
    pub fn at(&self, key: &str) -> Result<&String> {
        self.map.at(key)
    }

    /// Returns the value under `key` for modification.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `key` is absent.
    pub fn at_mut(&mut self, key: &str) -> Result<&mut String> {
        self.map.at_mut(key)
    }

    /// Returns the value under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&String> {
        self.map.get(key)
    }

    /// Returns the value under `key` for modification, if any.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut String> {
        self.map.get_mut(key)
    }

    /// Returns the value under `key`, inserting an empty string first if the
    /// key is absent.
    pub fn get_or_insert_default(&mut self, key: String) -> &mut String {
        self.map.get_or_insert_default(key)
    }

    /// Returns `true` if the map holds `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Returns the index of the bucket holding `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `key` is absent.
    pub fn bucket_index(&self, key: &str) -> Result<usize> {
        self.map.bucket_index(key)
    }

    /// Returns the length of the collision chain holding `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `key` is absent.
    pub fn bucket_size(&self, key: &str) -> Result<usize> {
        self.map.bucket_size(key)
    }

    /// Returns the number of pairs in the map.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the number of buckets.
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Returns `len / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.map.load_factor()
    }

    /// Removes all pairs. The bucket count is kept.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Copies `source` into `self` unless the two already compare equal.
    pub fn assign(&mut self, source: &Self)
    where
        S: Clone,
    {
        self.map.assign(&source.map);
    }

    /// Returns an iterator over the pairs, bucket by bucket.
    pub fn iter(&self) -> Iter<'_, String, String> {
        self.map.iter()
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> Keys<'_, String, String> {
        self.map.keys()
    }

    /// Returns an iterator over the values.
    pub fn values(&self) -> Values<'_, String, String> {
        self.map.values()
    }

    /// Borrows the underlying map.
    pub fn as_map(&self) -> &HashMap<String, String, S> {
        &self.map
    }

    /// Unwraps the underlying map.
    pub fn into_inner(self) -> HashMap<String, String, S> {
        self.map
    }
}

impl<S: BuildHasher + Default> Default for StrictMap<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> From<HashMap<String, String, S>> for StrictMap<S> {
    fn from(map: HashMap<String, String, S>) -> Self {
        Self { map }
    }
}

impl<S: BuildHasher> Extend<(String, String)> for StrictMap<S> {
    fn extend<I: IntoIterator<Item = (String, String)>>(&mut self, iter: I) {
        self.update(iter);
    }
}

impl<S: BuildHasher + Default> FromIterator<(String, String)> for StrictMap<S> {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.update(iter);
        map
    }
}

impl<S: BuildHasher> Index<&str> for StrictMap<S> {
    type Output = String;

    fn index(&self, key: &str) -> &String {
        &self.map[key]
    }
}

impl<'a, S> IntoIterator for &'a StrictMap<S> {
    type IntoIter = Iter<'a, String, String>;
    type Item = (&'a String, &'a String);

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}
