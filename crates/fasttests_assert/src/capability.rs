//! Capabilities a wrapped value must have for the pointer and float verifications.
//!
//! Asking for nullness on a non-pointer or a tolerance on a non-float is a type error: the bound is simply not met.

use std::fmt::Debug;
use std::ptr::NonNull;

/// Pointer-like values that can be null.
pub trait Nullable {
    fn is_null_value(&self) -> bool;

    /// Rendering used in failure messages.
    fn describe(&self) -> String;
}

impl<T: ?Sized> Nullable for *const T {
    fn is_null_value(&self) -> bool {
        self.is_null()
    }

    fn describe(&self) -> String {
        format!("{:p}", *self)
    }
}

impl<T: ?Sized> Nullable for *mut T {
    fn is_null_value(&self) -> bool {
        self.is_null()
    }

    fn describe(&self) -> String {
        format!("{:p}", *self)
    }
}

impl<T: ?Sized> Nullable for NonNull<T> {
    fn is_null_value(&self) -> bool {
        false
    }

    fn describe(&self) -> String {
        format!("{:p}", *self)
    }
}

impl<T> Nullable for Option<T> {
    fn is_null_value(&self) -> bool {
        self.is_none()
    }

    fn describe(&self) -> String {
        match self {
            Some(_) => "Some(..)".to_string(),
            None => "None".to_string(),
        }
    }
}

/// Floating point values compared with an absolute tolerance.
pub trait Tolerance: Copy + PartialOrd + Debug {
    /// `|expected - self|`
    fn distance_to(self, expected: Self) -> Self;

    fn magnitude(self) -> Self;
}

macro_rules! impl_tolerance {
    ($($ty:ty),*) => {
        $(
            impl Tolerance for $ty {
                fn distance_to(self, expected: Self) -> Self {
                    (expected - self).abs()
                }

                fn magnitude(self) -> Self {
                    self.abs()
                }
            }
        )*
    };
}

impl_tolerance!(f32, f64);
