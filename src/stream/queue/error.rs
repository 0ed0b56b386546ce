use core::fmt;

/// The error returned when pushing onto a queue which has already ended.
///
/// The rejected item is handed back and can be recovered with
/// [`PushError::into_inner`].
#[derive(thiserror::Error, Clone, PartialEq, Eq)]
#[error("pushed onto a queue which has already ended")]
pub struct PushError<T>(pub(crate) T);

impl<T> PushError<T> {
    /// Returns the item which could not be pushed.
    pub fn into_inner(self) -> T {
        self.0
    }

    /// Returns a reference to the item which could not be pushed.
    pub fn get_ref(&self) -> &T {
        &self.0
    }
}

impl<T> fmt::Debug for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushError").finish_non_exhaustive()
    }
}
