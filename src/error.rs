use thiserror::Error;

/// Failures reported by lookups and constructors of this crate.
///
/// Both kinds are recoverable: check [`contains_key`] first to avoid
/// [`Error::KeyNotFound`], or treat it as the ordinary "absent" signal.
///
/// [`contains_key`]: crate::HashMap::contains_key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The operation requires a key that is not present.
    #[error("a value with the given key does not exist")]
    KeyNotFound,
    /// The key and value sequences handed to a constructor differ in length.
    #[error("the length of keys ({keys}) and values ({values}) do not match")]
    LengthMismatch {
        /// Number of keys supplied.
        keys: usize,
        /// Number of values supplied.
        values: usize,
    },
}

/// Shorthand for results carrying an [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
