//! Adapters that turn raised failures into results
//!
//! Every adapter runs the operation exactly once. A result the operation
//! returns, `Err` included, comes back unchanged; only a panic is caught and
//! routed through [`handle_error`].
//!
//! | Call shape | Handler |
//! |------------|---------|
//! | [`resolve`] | failure message, `E = String` |
//! | [`resolve_or`] | fixed default error |
//! | [`resolve_with`] / [`resolve_err_with`] | handler function |
//! | [`resolve_using`] | any [`Handler`] |
//!
//! The `resolve_async*` family mirrors these for operations returning a
//! future. The process panic hook is left alone, so the default hook may
//! still print caught panics to stderr.

use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use crate::failure::Failure;
use crate::handler::{Handler, Recovery, handle_error};

#[cfg(feature = "async")]
use futures::FutureExt;
#[cfg(feature = "async")]
use std::future::Future;

/// Run `op`, normalizing a panic with `handler`.
pub fn resolve_using<T, E, F, H, R>(op: F, handler: Handler<E, H>) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    H: FnOnce(Failure) -> R,
    R: Into<Recovery<T, E>>,
{
    match panic::catch_unwind(AssertUnwindSafe(op)) {
        Ok(result) => result,
        Err(payload) => recover("sync", payload.into(), handler),
    }
}

/// Run `op`; a panic becomes `Err` carrying its message.
///
/// ```
/// use nebula_outcome::{ok, resolve};
///
/// assert_eq!(resolve(|| ok::<_, String>(42)), Ok(42));
/// assert_eq!(resolve::<i32, _>(|| panic!("boom")), Err("boom".to_owned()));
/// ```
pub fn resolve<T, F>(op: F) -> Result<T, String>
where
    F: FnOnce() -> Result<T, String>,
{
    resolve_using(op, Handler::message())
}

/// Run `op`; a panic becomes `Err(default)`.
pub fn resolve_or<T, E, F>(op: F, default: E) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
{
    resolve_using(op, Handler::default_error(default))
}

/// Run `op`; a panic is handed to `handler`.
///
/// The handler returns anything convertible into [`Recovery`]: a full
/// `Result` is returned as is (so `Ok` recovers), `Recovery::Fail` is wrapped.
pub fn resolve_with<T, E, F, H, R>(op: F, handler: H) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    H: FnOnce(Failure) -> R,
    R: Into<Recovery<T, E>>,
{
    resolve_using(op, Handler::with(handler))
}

/// Run `op`; a panic is mapped to an error by `handler`.
pub fn resolve_err_with<T, E, F, H>(op: F, handler: H) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    H: FnOnce(Failure) -> E,
{
    resolve_using(op, Handler::map_err::<T, H>(handler))
}

/// Await the future produced by `op`, normalizing a panic with `handler`.
///
/// A panic while calling `op` and a panic while polling its future are
/// treated the same way. The returned future is `Send` when the operation's
/// future, the handler and `E` are.
#[cfg(feature = "async")]
pub async fn resolve_async_using<T, E, F, Fut, H, R>(op: F, handler: Handler<E, H>) -> Result<T, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    H: FnOnce(Failure) -> R,
    R: Into<Recovery<T, E>>,
{
    let settled = match panic::catch_unwind(AssertUnwindSafe(op)) {
        Ok(future) => AssertUnwindSafe(future).catch_unwind().await,
        Err(payload) => Err(payload),
    };

    match settled {
        Ok(result) => result,
        Err(payload) => recover("async", payload.into(), handler),
    }
}

/// Async counterpart of [`resolve`].
#[cfg(feature = "async")]
pub async fn resolve_async<T, F, Fut>(op: F) -> Result<T, String>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, String>>,
{
    resolve_async_using(op, Handler::message()).await
}

/// Async counterpart of [`resolve_or`].
#[cfg(feature = "async")]
pub async fn resolve_async_or<T, E, F, Fut>(op: F, default: E) -> Result<T, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    resolve_async_using(op, Handler::default_error(default)).await
}

/// Async counterpart of [`resolve_with`].
#[cfg(feature = "async")]
pub async fn resolve_async_with<T, E, F, Fut, H, R>(op: F, handler: H) -> Result<T, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    H: FnOnce(Failure) -> R,
    R: Into<Recovery<T, E>>,
{
    resolve_async_using(op, Handler::with(handler)).await
}

/// Async counterpart of [`resolve_err_with`].
#[cfg(feature = "async")]
pub async fn resolve_async_err_with<T, E, F, Fut, H>(op: F, handler: H) -> Result<T, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    H: FnOnce(Failure) -> E,
{
    resolve_async_using(op, Handler::map_err::<T, H>(handler)).await
}

fn recover<T, E, H, R>(
    adapter: &'static str,
    failure: Failure,
    handler: Handler<E, H>,
) -> Result<T, E>
where
    H: FnOnce(Failure) -> R,
    R: Into<Recovery<T, E>>,
{
    debug!(adapter, message = %failure.message(), "captured raised failure");
    handle_error(failure, handler)
}
