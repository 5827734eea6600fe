use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// `first_key` or `last_key` was called on a map with no entries.
    #[error("skip list is empty")]
    Empty,
}

pub type Result<T> = std::result::Result<T, Error>;
