//! End-to-end behaviour of the synchronous adapters.

use std::cell::RefCell;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::sync::{Arc, Once};

use nebula_outcome::prelude::*;
use pretty_assertions::assert_eq;

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
struct ErrorCode {
    code: &'static str,
}

#[derive(Debug)]
struct Thrown;

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    });
}

// ---------------------------------------------------------------------------
// Declared results
// ---------------------------------------------------------------------------

#[test]
fn declared_results_pass_through_every_handler() {
    init_tracing();

    assert_eq!(resolve(|| ok(42)), Ok(42));
    assert_eq!(resolve(|| err::<i32, _>("x".to_owned())), Err("x".to_owned()));

    let fallback = ErrorCode { code: "E" };
    assert_eq!(
        resolve_or(|| err::<i32, _>(ErrorCode { code: "X" }), fallback),
        Err(ErrorCode { code: "X" })
    );
    assert_eq!(
        resolve_with(
            || ok::<i32, ErrorCode>(1),
            |_| Recovery::<i32, ErrorCode>::Fail(ErrorCode { code: "H" })
        ),
        Ok(1)
    );
}

// ---------------------------------------------------------------------------
// Raised failures
// ---------------------------------------------------------------------------

#[test]
fn raised_error_becomes_its_message() {
    init_tracing();

    let result = resolve(|| -> Result<i32, String> { raise(io::Error::other("boom")) });
    assert_eq!(result, Err("boom".to_owned()));

    let result = resolve(|| -> Result<i32, String> { panic!("boom") });
    assert_eq!(result, Err("boom".to_owned()));
}

#[test]
fn opaque_panic_becomes_generic_message() {
    let result = resolve(|| -> Result<i32, String> { panic::panic_any(Thrown) });
    assert_eq!(result, Err(FALLBACK_MESSAGE.to_owned()));
}

#[test]
fn default_error_discards_raised_message() {
    init_tracing();

    let result = resolve_or(
        || -> Result<i32, ErrorCode> { raise(io::Error::other("boom")) },
        ErrorCode { code: "E" },
    );
    assert_eq!(result, Err(ErrorCode { code: "E" }));
}

#[test]
fn handler_bare_value_is_wrapped() {
    let thrown = Arc::new(Thrown);
    let raised = Arc::clone(&thrown);

    let result = resolve_err_with(
        move || -> Result<i32, Arc<Thrown>> { panic::panic_any(raised) },
        |failure| match failure.downcast::<Arc<Thrown>>() {
            Ok(thrown) => thrown,
            Err(other) => other.resume(),
        },
    );

    assert_result_err_equal(&result, &thrown);
}

#[test]
fn handler_result_is_not_wrapped_twice() {
    let thrown = Arc::new(Thrown);
    let raised = Arc::clone(&thrown);
    let expected = Arc::clone(&thrown);

    let result = resolve_with(
        move || -> Result<i32, Arc<Thrown>> { panic::panic_any(raised) },
        move |_| err::<i32, Arc<Thrown>>(expected),
    );

    assert_result_err_equal(&result, &thrown);
}

#[test]
fn handler_can_turn_failure_into_success() {
    let result = resolve_with(
        || -> Result<&'static str, ErrorCode> { panic!("cache miss") },
        |failure| {
            assert_eq!(failure.message(), "cache miss");
            ok::<&'static str, ErrorCode>("recomputed")
        },
    );
    assert_eq!(result, Ok("recomputed"));
}

#[test]
fn explicit_handler_variants() {
    let uppercase: Handler<String> = Handler::Message(|message| message.to_uppercase());
    let result: Result<(), String> = resolve_using(|| panic!("boom"), uppercase);
    assert_eq!(result, Err("BOOM".to_owned()));

    let fixed: Handler<ErrorCode> = Handler::Default(ErrorCode { code: "F" });
    let result: Result<(), ErrorCode> = resolve_using(|| panic!("boom"), fixed);
    assert_eq!(result, Err(ErrorCode { code: "F" }));
}

#[test]
fn handler_may_capture_rc() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let result = resolve_err_with(
        || -> Result<(), String> { panic!("boom") },
        move |failure| {
            sink.borrow_mut().push(failure.message().into_owned());
            "handled".to_owned()
        },
    );

    assert_eq!(result, Err("handled".to_owned()));
    assert_eq!(*seen.borrow(), vec!["boom".to_owned()]);
}

#[test]
fn handler_receives_describable_payload() {
    let result = resolve_err_with(
        || -> Result<(), String> { raise(io::Error::new(io::ErrorKind::NotFound, "gone")) },
        |failure| {
            let raised = failure.downcast_ref::<Raised>().map(ToString::to_string);
            raised.unwrap_or_default()
        },
    );
    assert_eq!(result, Err("gone".to_owned()));
}

// ---------------------------------------------------------------------------
// Handler panics are not caught
// ---------------------------------------------------------------------------

#[test]
fn handler_panic_propagates() {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        resolve_err_with(
            || -> Result<(), String> { panic!("original") },
            |_| panic!("handler failed"),
        )
    }));

    let payload = outcome.expect_err("handler panic must escape the adapter");
    assert_eq!(payload.downcast_ref::<&str>(), Some(&"handler failed"));
}

#[test]
#[should_panic(expected = "original")]
fn resumed_failure_propagates() {
    let _ = resolve_err_with(
        || -> Result<(), String> { panic!("original") },
        |failure| failure.resume(),
    );
}
