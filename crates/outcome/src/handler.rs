//! Error-normalization policy
//!
//! A [`Handler`] decides what a raised [`Failure`] turns into. It is a closed
//! choice of three strategies, applied by [`handle_error`]:
//!
//! | Variant | Result |
//! |---------|--------|
//! | [`Handler::Message`] | `Err` built from the failure's message |
//! | [`Handler::With`] | whatever the handler function recovers |
//! | [`Handler::Default`] | `Err` with a fixed error, failure dropped |
//!
//! The handler function is a type parameter, not a boxed trait object: a
//! handler capturing an `Rc` or a `&Cell` works with the synchronous adapters,
//! and an async adapter's future is `Send` whenever its handler is.

use std::convert::Infallible;
use std::fmt;

use tracing::trace;

use crate::failure::Failure;

/// What a handler function produced.
///
/// A bare error is wrapped into `Err`; a full `Result` is passed through as
/// is, which is how a handler turns a failure back into success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recovery<T, E> {
    /// A bare error, wrapped into `Err`
    Fail(E),
    /// A complete result, returned untouched
    Resolve(Result<T, E>),
}

impl<T, E> Recovery<T, E> {
    /// Collapse into the result the adapter returns
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Fail(error) => Err(error),
            Self::Resolve(result) => result,
        }
    }
}

impl<T, E> From<Result<T, E>> for Recovery<T, E> {
    fn from(result: Result<T, E>) -> Self {
        Self::Resolve(result)
    }
}

// Lets `NoHandler` satisfy the handler bounds; it is never called.
impl<T, E> From<Infallible> for Recovery<T, E> {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Handler function type of the variants that never call one.
pub type NoHandler = fn(Failure) -> Infallible;

/// How a raised failure becomes a typed result.
///
/// `H` is the handler function of [`Handler::With`]; the other variants keep
/// the [`NoHandler`] default.
pub enum Handler<E, H = NoHandler> {
    /// Convert the failure's message into `E`.
    ///
    /// This is what the single-argument adapters use; see
    /// [`Handler::message`].
    Message(fn(String) -> E),
    /// Hand the failure to a function.
    With(H),
    /// Replace the failure with a fixed error.
    Default(E),
}

impl<E> Handler<E> {
    /// Stringify the failure into any error type built from a `String`
    pub fn message() -> Self
    where
        E: From<String>,
    {
        Self::Message(<E as From<String>>::from)
    }

    /// Substitute `error` for whatever was raised
    pub fn default_error(error: E) -> Self {
        Self::Default(error)
    }

    /// Delegate to `handler`, which maps the failure to a bare error
    pub fn map_err<T, F>(handler: F) -> Handler<E, impl FnOnce(Failure) -> Recovery<T, E>>
    where
        F: FnOnce(Failure) -> E,
    {
        Handler::With(move |failure: Failure| -> Recovery<T, E> {
            Recovery::Fail(handler(failure))
        })
    }
}

impl<E, H> Handler<E, H> {
    /// Delegate to `handler`, which may return [`Recovery::Fail`] or a full
    /// `Result`.
    pub fn with(handler: H) -> Self {
        Self::With(handler)
    }

    fn branch(&self) -> &'static str {
        match self {
            Self::Message(_) => "message",
            Self::With(_) => "with",
            Self::Default(_) => "default",
        }
    }
}

impl<E> Default for Handler<E>
where
    E: From<String>,
{
    fn default() -> Self {
        Self::message()
    }
}

impl<E: fmt::Debug, H> fmt::Debug for Handler<E, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(_) => f.write_str("Message"),
            Self::With(_) => f.write_str("With(..)"),
            Self::Default(error) => f.debug_tuple("Default").field(error).finish(),
        }
    }
}

/// Turn a raised failure into a result according to `handler`.
///
/// The output is always `Err`, except when a [`Handler::With`] function
/// recovers with `Ok`. A panic inside the handler function is not caught.
pub fn handle_error<T, E, H, R>(failure: Failure, handler: Handler<E, H>) -> Result<T, E>
where
    H: FnOnce(Failure) -> R,
    R: Into<Recovery<T, E>>,
{
    trace!(branch = handler.branch(), "normalizing raised failure");

    match handler {
        Handler::Message(into) => Err(into(failure.message().into_owned())),
        Handler::With(handler) => {
            let recovery: Recovery<T, E> = handler(failure).into();
            recovery.into_result()
        }
        Handler::Default(error) => Err(error),
    }
}
