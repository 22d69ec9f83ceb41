//! Result assertions
//!
//! `check_*` return an [`AssertionError`] describing the mismatch;
//! `assert_result_*` panic with the same text and are meant for tests and
//! preconditions. Nothing in this crate catches those panics.
//!
//! Payload comparison goes through [`Identical`], not [`PartialEq`]: scalars
//! and owned strings compare by value, references and shared handles by
//! pointer.

use std::fmt::Debug;
use std::rc::Rc;
use std::sync::Arc;

/// A result did not have the expected shape or payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssertionError {
    /// Expected `Ok`, found `Err`.
    #[error("expected a successful result, got error: {error}")]
    ExpectedOk {
        /// Debug rendering of the error payload.
        error: String,
    },

    /// Expected `Err`, found `Ok`.
    #[error("expected a failed result, got value: {value}")]
    ExpectedErr {
        /// Debug rendering of the success payload.
        value: String,
    },

    /// `Ok` payload is not the expected one.
    #[error("successful result mismatch: expected {expected}, got {actual}")]
    OkMismatch {
        /// Debug rendering of the expected value.
        expected: String,
        /// Debug rendering of the actual value.
        actual: String,
    },

    /// `Err` payload is not the expected one.
    #[error("failed result mismatch: expected {expected}, got {actual}")]
    ErrMismatch {
        /// Debug rendering of the expected error.
        expected: String,
        /// Debug rendering of the actual error.
        actual: String,
    },
}

/// Strict equality.
///
/// Two distinct `Arc`s holding equal contents are not identical; two equal
/// integers are. References compare the address they point to, so two
/// `&String`s to distinct strings with the same text are not identical, and
/// neither are two `&str`s over different buffers. Floats follow IEEE
/// comparison, so `NaN` is never identical to anything.
pub trait Identical {
    /// Whether `self` and `other` are the same value
    fn identical(&self, other: &Self) -> bool;
}

macro_rules! identical_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identical for $ty {
                #[inline]
                fn identical(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

identical_by_value!(
    (), bool, char, String, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
    f32, f64,
);

impl<T: ?Sized> Identical for &T {
    #[inline]
    fn identical(&self, other: &Self) -> bool {
        std::ptr::eq(*self, *other)
    }
}

impl<T: ?Sized> Identical for Arc<T> {
    #[inline]
    fn identical(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identical for Rc<T> {
    #[inline]
    fn identical(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

/// Borrow the success payload, or describe why there is none.
pub fn check_ok<T: Debug, E: Debug>(result: &Result<T, E>) -> Result<&T, AssertionError> {
    match result {
        Ok(value) => Ok(value),
        Err(error) => Err(AssertionError::ExpectedOk {
            error: format!("{error:?}"),
        }),
    }
}

/// Borrow the error payload, or describe why there is none.
pub fn check_err<T: Debug, E: Debug>(result: &Result<T, E>) -> Result<&E, AssertionError> {
    match result {
        Ok(value) => Err(AssertionError::ExpectedErr {
            value: format!("{value:?}"),
        }),
        Err(error) => Ok(error),
    }
}

/// Check that `result` is `Ok` and its payload is identical to `expected`.
pub fn check_ok_equal<T, E>(result: &Result<T, E>, expected: &T) -> Result<(), AssertionError>
where
    T: Identical + Debug,
    E: Debug,
{
    let actual = check_ok(result)?;
    if actual.identical(expected) {
        Ok(())
    } else {
        Err(AssertionError::OkMismatch {
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        })
    }
}

/// Check that `result` is `Err` and its payload is identical to `expected`.
pub fn check_err_equal<T, E>(result: &Result<T, E>, expected: &E) -> Result<(), AssertionError>
where
    T: Debug,
    E: Identical + Debug,
{
    let actual = check_err(result)?;
    if actual.identical(expected) {
        Ok(())
    } else {
        Err(AssertionError::ErrMismatch {
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        })
    }
}

/// Panic unless `result` is `Ok`; returns the payload.
#[track_caller]
pub fn assert_result_ok<T: Debug, E: Debug>(result: &Result<T, E>) -> &T {
    match check_ok(result) {
        Ok(payload) => payload,
        Err(error) => panic!("{error}"),
    }
}

/// Panic unless `result` is `Err`; returns the payload.
#[track_caller]
pub fn assert_result_err<T: Debug, E: Debug>(result: &Result<T, E>) -> &E {
    match check_err(result) {
        Ok(payload) => payload,
        Err(error) => panic!("{error}"),
    }
}

/// Panic unless `result` is `Ok` with a payload identical to `expected`.
#[track_caller]
pub fn assert_result_ok_equal<T, E>(result: &Result<T, E>, expected: &T)
where
    T: Identical + Debug,
    E: Debug,
{
    if let Err(error) = check_ok_equal(result, expected) {
        panic!("{error}");
    }
}

/// Panic unless `result` is `Err` with a payload identical to `expected`.
#[track_caller]
pub fn assert_result_err_equal<T, E>(result: &Result<T, E>, expected: &E)
where
    T: Debug,
    E: Identical + Debug,
{
    if let Err(error) = check_err_equal(result, expected) {
        panic!("{error}");
    }
}
