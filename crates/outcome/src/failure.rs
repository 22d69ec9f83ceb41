//! Raised failures captured from unwinding operations
//!
//! A panic carries an opaque `Box<dyn Any + Send>` payload. [`Failure`] owns
//! that payload and knows how to pull a human-readable message out of it:
//!
//! - `&'static str` / `String` payloads (what `panic!` produces) are used
//!   verbatim;
//! - describable payloads ([`Raised`], boxed `std::error::Error`,
//!   [`anyhow::Error`], [`std::io::Error`]) report their `Display`;
//! - anything else falls back to [`FALLBACK_MESSAGE`].

use std::any::Any;
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::panic;

/// Message used when a raised payload cannot describe itself.
pub const FALLBACK_MESSAGE: &str = "An error occurred";

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// An error raised through [`raise`].
///
/// Wrapping the error keeps its `Display` reachable after it has travelled
/// through a panic payload, where only concrete types can be recovered.
#[derive(Debug)]
pub struct Raised(BoxError);

impl Raised {
    /// Wrap an error so it can be raised as a panic payload
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self(Box::new(error))
    }

    /// Borrow the wrapped error
    pub fn get_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.0
    }

    /// Unwrap into the boxed error
    pub fn into_inner(self) -> BoxError {
        self.0
    }
}

impl fmt::Display for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for Raised {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

/// Raise `error` as a panic whose payload stays describable.
///
/// This is the counterpart of returning `Err(error)`: use it inside an
/// operation given to [`resolve`](crate::resolve()) when the error should be
/// routed through the handler instead of passed back as a declared failure.
#[track_caller]
pub fn raise<E>(error: E) -> !
where
    E: StdError + Send + Sync + 'static,
{
    panic::panic_any(Raised::new(error))
}

/// The payload of a panic caught by one of the resolve adapters.
pub struct Failure {
    payload: Box<dyn Any + Send + 'static>,
}

impl Failure {
    /// Take ownership of a caught panic payload
    pub fn new(payload: Box<dyn Any + Send + 'static>) -> Self {
        Self { payload }
    }

    /// Text carried by the payload, if it has any.
    ///
    /// Returns `None` for opaque payloads such as `panic_any(42_u8)`.
    pub fn description(&self) -> Option<Cow<'_, str>> {
        let payload = &*self.payload;
        if let Some(text) = payload.downcast_ref::<&'static str>() {
            return Some(Cow::Borrowed(*text));
        }
        if let Some(text) = payload.downcast_ref::<String>() {
            return Some(Cow::Borrowed(text.as_str()));
        }
        describe_error(payload).map(Cow::Owned)
    }

    /// Text carried by the payload, or [`FALLBACK_MESSAGE`].
    pub fn message(&self) -> Cow<'_, str> {
        self.description().unwrap_or(Cow::Borrowed(FALLBACK_MESSAGE))
    }

    /// Whether the payload is a `T`
    pub fn is<T: Any>(&self) -> bool {
        self.payload.is::<T>()
    }

    /// Borrow the payload as a `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// Take the payload as a `T`, or get the failure back untouched.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        match self.payload.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(payload) => Err(Self { payload }),
        }
    }

    /// Give up the payload
    pub fn into_payload(self) -> Box<dyn Any + Send + 'static> {
        self.payload
    }

    /// Re-raise the original panic.
    ///
    /// Handlers that decide a failure is not theirs to handle call this; the
    /// adapters never catch what a handler raises.
    pub fn resume(self) -> ! {
        panic::resume_unwind(self.payload)
    }
}

impl From<Box<dyn Any + Send + 'static>> for Failure {
    fn from(payload: Box<dyn Any + Send + 'static>) -> Self {
        Self::new(payload)
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Failure")
            .field("message", &self.message())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

fn describe_error(payload: &(dyn Any + Send)) -> Option<String> {
    if let Some(error) = payload.downcast_ref::<Raised>() {
        return Some(error.to_string());
    }
    if let Some(error) = payload.downcast_ref::<BoxError>() {
        return Some(error.to_string());
    }
    if let Some(error) = payload.downcast_ref::<anyhow::Error>() {
        return Some(error.to_string());
    }
    if let Some(error) = payload.downcast_ref::<std::io::Error>() {
        return Some(error.to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io;

    fn caught(f: impl FnOnce()) -> Failure {
        match panic::catch_unwind(panic::AssertUnwindSafe(f)) {
            Ok(()) => panic!("closure did not panic"),
            Err(payload) => Failure::new(payload),
        }
    }

    #[test]
    fn static_str_payload_is_verbatim() {
        let failure = caught(|| panic!("boom"));
        assert_eq!(failure.message(), "boom");
    }

    #[test]
    fn formatted_payload_is_verbatim() {
        let code = 7;
        let failure = caught(|| panic!("boom {code}"));
        assert_eq!(failure.message(), "boom 7");
    }

    #[test]
    fn raised_error_reports_display() {
        let failure = caught(|| raise(io::Error::other("disk on fire")));
        assert!(failure.is::<Raised>());
        assert_eq!(failure.message(), "disk on fire");
    }

    #[test]
    fn anyhow_payload_is_describable() {
        let failure = caught(|| panic::panic_any(anyhow::anyhow!("bad state")));
        assert_eq!(failure.description().as_deref(), Some("bad state"));
    }

    #[test]
    fn opaque_payload_falls_back() {
        let failure = caught(|| panic::panic_any(42_u8));
        assert_eq!(failure.description(), None);
        assert_eq!(failure.message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn downcast_returns_failure_on_mismatch() {
        let failure = caught(|| panic::panic_any(42_u8));
        let failure = failure.downcast::<String>().unwrap_err();
        assert_eq!(failure.downcast::<u8>().unwrap(), 42);
    }

    #[test]
    fn resume_reraises_original_payload() {
        let failure = caught(|| panic::panic_any(9_i64));
        let again = caught(move || failure.resume());
        assert_eq!(again.downcast_ref::<i64>(), Some(&9));
    }

    #[test]
    fn debug_shows_message() {
        let failure = caught(|| panic!("boom"));
        assert_eq!(format!("{failure:?}"), r#"Failure { message: "boom", .. }"#);
    }
}
