//! # Nebula Outcome
//!
//! Result constructors and adapters that turn panicking operations into
//! [`Result`] values.
//!
//! ## Quick Start
//!
//! ```rust
//! use nebula_outcome::prelude::*;
//!
//! #[derive(Debug, PartialEq)]
//! struct Unavailable;
//!
//! // Declared failures pass through untouched
//! assert_eq!(resolve(|| err::<i32, _>("nope".to_owned())), Err("nope".to_owned()));
//!
//! // A panic becomes its message...
//! assert_eq!(resolve::<i32, _>(|| panic!("boom")), Err("boom".to_owned()));
//!
//! // ...or a fixed default error
//! assert_eq!(resolve_or::<i32, _, _>(|| panic!("boom"), Unavailable), Err(Unavailable));
//! ```
//!
//! ## Handlers
//!
//! The way a caught panic is normalized is a closed choice, see [`Handler`]:
//!
//! - **Message**: stringify the failure (`resolve`, `resolve_async`)
//! - **Default**: substitute a fixed error (`resolve_or`, `resolve_async_or`)
//! - **With**: delegate to a function that may return a bare error or a full
//!   result (`resolve_with`, `resolve_err_with` and their async twins)
//!
//! ## Features
//!
//! - `async` (default): `resolve_async*` and [`ResultAsync`]
//! - `json` (default): [`is_result`] over `serde_json::Value`

// === Modules ===
pub mod assert;
pub mod failure;
pub mod handler;
pub mod resolve;
pub mod result;

#[cfg(feature = "json")]
pub mod shape;

// === Public API Exports ===

/// Result constructors
pub use result::{err, ok};

/// Deferred result
#[cfg(feature = "async")]
pub use result::ResultAsync;

/// Raised failures
pub use failure::{FALLBACK_MESSAGE, Failure, Raised, raise};

/// Error-normalization policy
pub use handler::{Handler, NoHandler, Recovery, handle_error};

/// Synchronous adapters
pub use resolve::{resolve, resolve_err_with, resolve_or, resolve_using, resolve_with};

/// Asynchronous adapters
#[cfg(feature = "async")]
pub use resolve::{
    resolve_async, resolve_async_err_with, resolve_async_or, resolve_async_using,
    resolve_async_with,
};

/// Assertions
pub use assert::{
    AssertionError, Identical, assert_result_err, assert_result_err_equal, assert_result_ok,
    assert_result_ok_equal, check_err, check_err_equal, check_ok, check_ok_equal,
};

/// Structural result detection
#[cfg(feature = "json")]
pub use shape::is_result;

/// Convenient prelude with everything you need
pub mod prelude {
    pub use super::{
        AssertionError, FALLBACK_MESSAGE, Failure, Handler, Identical, Raised, Recovery,
        assert_result_err, assert_result_err_equal, assert_result_ok, assert_result_ok_equal,
        check_err, check_err_equal, check_ok, check_ok_equal, err, handle_error, ok, raise,
        resolve, resolve_err_with, resolve_or, resolve_using, resolve_with,
    };

    #[cfg(feature = "async")]
    pub use super::{
        ResultAsync, resolve_async, resolve_async_err_with, resolve_async_or,
        resolve_async_using, resolve_async_with,
    };

    #[cfg(feature = "json")]
    pub use super::is_result;
}
