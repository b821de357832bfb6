//! Source locations attached to assertion failures.

use std::fmt;

/// Where an assertion or an explicit `fail` was written.
///
/// A default-constructed value is *uninitialised*: it renders as nothing and failure messages carry no location
/// suffix. Values are immutable once built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineInfo {
    file: &'static str,
    function: &'static str,
    line: u32,
    initialized: bool,
}

impl LineInfo {
    /// Build an initialised location. `function` may be empty.
    pub const fn new(file: &'static str, function: &'static str, line: u32) -> Self {
        Self {
            file,
            function,
            line,
            initialized: true,
        }
    }

    /// Capture the location of the caller (no function name).
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self::new(location.file(), "", location.line())
    }

    pub fn is_init(&self) -> bool {
        self.initialized
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn function(&self) -> &'static str {
        self.function
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for LineInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.initialized {
            return Ok(());
        }
        write!(f, "{}:{}", self.file, self.line)?;
        if !self.function.is_empty() {
            write!(f, " {}", self.function)?;
        }
        Ok(())
    }
}

/// Strip the helper suffix and closure segments from a `type_name` produced inside `line_info_f!`.
#[doc(hidden)]
pub fn __enclosing_function(raw: &'static str) -> &'static str {
    let path = raw.strip_suffix("::__here").unwrap_or(raw);
    path.rsplit("::").find(|segment| *segment != "{{closure}}").unwrap_or(path)
}

/// Capture the current file and line.
///
/// ```
/// let here = fasttests_core::line_info!();
/// assert!(here.is_init());
/// assert!(here.function().is_empty());
/// ```
#[macro_export]
macro_rules! line_info {
    () => {
        $crate::LineInfo::new(::core::file!(), "", ::core::line!())
    };
}

/// Capture the current file, line and enclosing function name.
///
/// ```
/// fn probe() -> fasttests_core::LineInfo {
///     fasttests_core::line_info_f!()
/// }
/// assert_eq!(probe().function(), "probe");
/// ```
#[macro_export]
macro_rules! line_info_f {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        $crate::LineInfo::new(
            ::core::file!(),
            $crate::line_info::__enclosing_function(__type_name_of(__here)),
            ::core::line!(),
        )
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_uninitialized() {
        let info = LineInfo::default();
        assert!(!info.is_init());
        assert_eq!(info.to_string(), "");
    }

    #[test]
    fn test_display_without_function() {
        let info = LineInfo::new("src/lib.rs", "", 12);
        assert_eq!(info.to_string(), "src/lib.rs:12");
    }

    #[test]
    fn test_display_with_function() {
        let info = LineInfo::new("src/lib.rs", "parse", 7);
        assert_eq!(info.to_string(), "src/lib.rs:7 parse");
    }

    #[test]
    fn test_caller_records_this_file() {
        let info = LineInfo::caller();
        assert!(info.is_init());
        assert!(info.file().ends_with("line_info.rs"));
    }

    #[test]
    fn test_line_info_macro() {
        let info = crate::line_info!();
        assert_eq!(info.file(), file!());
        assert!(info.function().is_empty());
    }

    #[test]
    fn test_line_info_f_macro_names_function() {
        let info = crate::line_info_f!();
        assert_eq!(info.function(), "test_line_info_f_macro_names_function");
    }

    #[test]
    fn test_line_info_f_inside_closure() {
        let capture = || crate::line_info_f!();
        assert_eq!(capture().function(), "test_line_info_f_inside_closure");
    }

    #[test]
    fn test_enclosing_function_strips_closures() {
        assert_eq!(__enclosing_function("a::b::run::{{closure}}::__here"), "run");
        assert_eq!(__enclosing_function("run::__here"), "run");
    }
}
