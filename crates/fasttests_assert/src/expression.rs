//! The chainable assertion expression.

use std::any::{Any, type_name};
use std::borrow::Borrow;
use std::error::Error;
use std::fmt::Debug;
use std::ptr;

use fasttests_core::{Detail, FailureKind, LineInfo, TestFailure, failure_test, unwind};

use crate::capability::{Nullable, Tolerance};

/// A wrapped value awaiting verification.
///
/// Every verification consumes the expression and, when it holds, returns an [`EmptyExpression`] that keeps the
/// source location so the chain can continue with [`AssertThat::and_that`]. When it does not hold the current test
/// body unwinds with a [`TestFailure`].
#[derive(Debug, Clone)]
pub struct AssertThat<E> {
    expr: E,
    message: Option<String>,
    line_info: LineInfo,
}

/// The continuation returned by every verification.
pub type EmptyExpression = AssertThat<()>;

/// Wrap `expr` for verification, without a message or location.
#[must_use = "an assertion expression does nothing until a verification is called"]
pub fn assert_that<E>(expr: E) -> AssertThat<E> {
    AssertThat::new(expr)
}

impl<E> AssertThat<E> {
    pub fn new(expr: E) -> Self {
        Self {
            expr,
            message: None,
            line_info: LineInfo::default(),
        }
    }

    /// Message shown in front of the failure detail.
    pub fn because(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Location appended to the failure message.
    pub fn at(mut self, line_info: LineInfo) -> Self {
        self.line_info = line_info;
        self
    }

    pub fn value(&self) -> &E {
        &self.expr
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn line_info(&self) -> LineInfo {
        self.line_info
    }

    /// Continue with a new value. This is a chaining convenience, not a logical AND: the message is dropped and the
    /// location kept.
    pub fn and_that<N>(self, next: N) -> AssertThat<N> {
        AssertThat {
            expr: next,
            message: None,
            line_info: self.line_info,
        }
    }

    /// Unconditional failure.
    #[track_caller]
    pub fn fail(self) -> EmptyExpression {
        self.verify(false, FailureKind::Equal, || Detail::None)
    }

    #[track_caller]
    fn verify(&self, condition: bool, kind: FailureKind, detail: impl FnOnce() -> Detail) -> EmptyExpression {
        failure_test(condition, kind, detail, self.message.as_deref().unwrap_or(""), &self.line_info);
        AssertThat {
            expr: (),
            message: None,
            line_info: self.line_info,
        }
    }
}

impl<E: Borrow<bool>> AssertThat<E> {
    #[track_caller]
    pub fn is_true(self) -> EmptyExpression {
        let value: bool = *Borrow::<bool>::borrow(&self.expr);
        self.verify(value, FailureKind::Equal, || Detail::debug(&value, &true))
    }

    #[track_caller]
    pub fn is_false(self) -> EmptyExpression {
        let value: bool = *Borrow::<bool>::borrow(&self.expr);
        self.verify(!value, FailureKind::Equal, || Detail::debug(&value, &false))
    }
}

impl<T: ?Sized> AssertThat<&T> {
    /// Identity check: both references point at the same storage.
    #[track_caller]
    pub fn is_same_as(self, other: &T) -> EmptyExpression {
        let same = ptr::addr_eq(self.expr, other);
        self.verify(same, FailureKind::Equal, || Detail::values(format!("{:p}", self.expr), format!("{other:p}")))
    }

    #[track_caller]
    pub fn is_not_same_as(self, other: &T) -> EmptyExpression {
        let same = ptr::addr_eq(self.expr, other);
        self.verify(!same, FailureKind::Different, || Detail::values(format!("{:p}", self.expr), format!("{other:p}")))
    }
}

impl<E: Nullable> AssertThat<E> {
    #[track_caller]
    pub fn is_null(self) -> EmptyExpression {
        let null = self.expr.is_null_value();
        self.verify(null, FailureKind::Equal, || Detail::values(self.expr.describe(), "null"))
    }

    #[track_caller]
    pub fn is_not_null(self) -> EmptyExpression {
        let null = self.expr.is_null_value();
        self.verify(!null, FailureKind::Different, || Detail::values(self.expr.describe(), "null"))
    }
}

impl<E> AssertThat<E> {
    /// Value equality through `PartialEq`, rendering both operands on failure.
    #[track_caller]
    pub fn is_equal_to<U>(self, expected: U) -> EmptyExpression
    where
        E: PartialEq<U> + Debug,
        U: Debug,
    {
        let equal = self.expr == expected;
        self.verify(equal, FailureKind::Equal, || Detail::debug(&self.expr, &expected))
    }

    #[track_caller]
    pub fn is_not_equal_to<U>(self, not_expected: U) -> EmptyExpression
    where
        E: PartialEq<U> + Debug,
        U: Debug,
    {
        let equal = self.expr == not_expected;
        self.verify(!equal, FailureKind::Different, || Detail::debug(&self.expr, &not_expected))
    }

    /// Value equality for types that cannot be displayed; the failure message is categorical.
    #[track_caller]
    pub fn is_equal_to_opaque<U>(self, expected: U) -> EmptyExpression
    where
        E: PartialEq<U>,
    {
        let equal = self.expr == expected;
        self.verify(equal, FailureKind::Equal, || Detail::Opaque)
    }

    #[track_caller]
    pub fn is_not_equal_to_opaque<U>(self, not_expected: U) -> EmptyExpression
    where
        E: PartialEq<U>,
    {
        let equal = self.expr == not_expected;
        self.verify(!equal, FailureKind::Different, || Detail::Opaque)
    }
}

impl<E: Tolerance> AssertThat<E> {
    /// Passes when `|expected - value| <= |tolerance|`.
    #[track_caller]
    pub fn is_equal_within(self, expected: E, tolerance: E) -> EmptyExpression {
        let within = self.expr.distance_to(expected) <= tolerance.magnitude();
        self.verify(within, FailureKind::Equal, || {
            Detail::values(format!("{:?}", self.expr), format!("{expected:?} +/- {:?}", tolerance.magnitude()))
        })
    }

    /// Passes when `|not_expected - value| > |tolerance|`.
    #[track_caller]
    pub fn is_not_equal_within(self, not_expected: E, tolerance: E) -> EmptyExpression {
        let beyond = self.expr.distance_to(not_expected) > tolerance.magnitude();
        self.verify(beyond, FailureKind::Different, || {
            Detail::values(format!("{:?}", self.expr), format!("{not_expected:?} +/- {:?}", tolerance.magnitude()))
        })
    }
}

fn text_equal(reached: &str, expected: &str, ignore_case: bool) -> bool {
    if ignore_case {
        reached.to_ascii_lowercase() == expected.to_ascii_lowercase()
    } else {
        reached == expected
    }
}

impl<E: AsRef<str>> AssertThat<E> {
    /// Text equality, optionally ignoring ASCII case. The wrapped value is never modified.
    #[track_caller]
    pub fn is_equal_to_text(self, expected: impl AsRef<str>, ignore_case: bool) -> EmptyExpression {
        let (reached, expected) = (self.expr.as_ref(), expected.as_ref());
        let equal = text_equal(reached, expected, ignore_case);
        self.verify(equal, FailureKind::Equal, || Detail::debug(reached, expected))
    }

    #[track_caller]
    pub fn is_not_equal_to_text(self, not_expected: impl AsRef<str>, ignore_case: bool) -> EmptyExpression {
        let (reached, not_expected) = (self.expr.as_ref(), not_expected.as_ref());
        let equal = text_equal(reached, not_expected, ignore_case);
        self.verify(!equal, FailureKind::Different, || Detail::debug(reached, not_expected))
    }
}

fn describe_caught(payload: &(dyn Any + Send)) -> String {
    if let Some(failure) = TestFailure::from_payload(payload) {
        format!("assertion failure: {}", failure.headline())
    } else if let Some(text) = unwind::describe_payload(payload) {
        format!("panic: {text}")
    } else {
        "panic with a payload of another type".to_string()
    }
}

impl<F, R> AssertThat<F>
where
    F: FnOnce() -> R,
{
    /// Invoke the wrapped callable and pass only if it panics with a payload of type `P`.
    ///
    /// `panic!("literal")` carries a `&'static str`, formatted panics carry a `String`, and `panic_any(v)` carries
    /// `v`'s type.
    #[track_caller]
    pub fn expect_panic<P: Any>(self) -> EmptyExpression {
        let AssertThat {
            expr,
            message,
            line_info,
        } = self;
        let outcome = unwind::catch(expr);
        let (matched, reached) = match &outcome {
            Ok(_) => (false, "no panic".to_string()),
            Err(payload) if (**payload).is::<P>() => (true, String::new()),
            Err(payload) => (false, describe_caught(&**payload)),
        };
        AssertThat {
            expr: (),
            message,
            line_info,
        }
        .verify(matched, FailureKind::Exception, || Detail::values(reached, type_name::<P>()))
    }
}

impl<F, T, Er> AssertThat<F>
where
    F: FnOnce() -> Result<T, Er>,
    Er: Into<Box<dyn Error + Send + Sync>>,
{
    /// Invoke the wrapped callable and pass only if it returns an error of type `X`.
    #[track_caller]
    pub fn expect_error<X: Error + 'static>(self) -> EmptyExpression {
        let AssertThat {
            expr,
            message,
            line_info,
        } = self;
        let (matched, reached) = match expr() {
            Ok(_) => (false, "Ok".to_string()),
            Err(error) => {
                let error: Box<dyn Error + Send + Sync> = error.into();
                if error.is::<X>() {
                    (true, String::new())
                } else {
                    (false, format!("error: {error}"))
                }
            }
        };
        AssertThat {
            expr: (),
            message,
            line_info,
        }
        .verify(matched, FailureKind::Exception, || Detail::values(reached, type_name::<X>()))
    }
}
