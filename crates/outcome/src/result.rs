//! Result constructors
//!
//! The success/failure container is the standard [`Result`]; the compiler
//! guarantees that exactly one variant is live and that the inactive payload
//! cannot be reached. These constructors exist so call sites read the same
//! whether they build a value by hand or receive one from
//! [`resolve`](crate::resolve()).

#[cfg(feature = "async")]
use std::future::Future;
#[cfg(feature = "async")]
use std::pin::Pin;

/// A deferred [`Result`], as produced by async operations handed to
/// [`resolve_async`](crate::resolve_async()).
#[cfg(feature = "async")]
pub type ResultAsync<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Wrap a success value.
///
/// The payload is expected to be meaningful on its own. An `Option` payload
/// is accepted as an ordinary value; nothing is checked at runtime.
#[inline]
pub const fn ok<T, E>(value: T) -> Result<T, E> {
    Ok(value)
}

/// Wrap an error value.
///
/// Same precondition as [`ok`]: the error should describe the failure.
#[inline]
pub const fn err<T, E>(error: E) -> Result<T, E> {
    Err(error)
}
