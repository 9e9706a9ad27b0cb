pub(crate) use inner::OnceCell;

#[cfg(not(feature = "sync"))]
mod inner {
    /// Single-assignment cell for values computed at most once.
    pub type OnceCell<T> = std::cell::OnceCell<T>;
}

#[cfg(feature = "sync")]
mod inner {
    /// Single-assignment cell for values computed at most once.
    ///
    /// `OnceLock` keeps the at-most-once guarantee even when the cell is
    /// raced from multiple threads.
    pub type OnceCell<T> = std::sync::OnceLock<T>;
}
