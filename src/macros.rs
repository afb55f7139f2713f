//! Call-site macros: [`debug_line!`](crate::debug_line) and
//! [`v!`](crate::v).
//!
//! Each macro is defined twice and the `debug-log` feature picks one, so a
//! call site compiles identically in both modes. With the feature off the
//! expansions contain no formatting, no call-site strings, and no I/O.

/// Name of the enclosing function, without its module path.
///
/// `std` has no `function!()` counterpart to `file!()`/`line!()`; this is
/// the usual nested-fn trick over `type_name`.
#[doc(hidden)]
#[macro_export]
macro_rules! __function {
    () => {{
        fn __f() {}
        fn name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let full = name_of(__f);
        let path = full.strip_suffix("::__f").unwrap_or(full);
        let path = path.trim_end_matches("::{{closure}}");
        match path.rfind(':') {
            ::std::option::Option::Some(pos) => &path[pos + 1..],
            ::std::option::Option::None => path,
        }
    }};
}

/// Opens one diagnostic line scoped to the current statement.
///
/// Expands to an [`Emitter`](crate::Emitter) seeded with the current file,
/// function, and line; the line is flushed when the statement ends. Append
/// values with the chainable methods:
///
/// ```
/// use dbgline::{debug_line, v};
///
/// let shards = 8;
/// debug_line!().push("rebuilding").labeled(v!(shards));
/// ```
#[cfg(feature = "debug-log")]
#[macro_export]
macro_rules! debug_line {
    () => {
        $crate::Emitter::new(file!(), $crate::__function!(), line!())
    };
}

/// Opens one diagnostic line scoped to the current statement.
///
/// The `debug-log` feature is off: expands to a
/// [`NullEmitter`](crate::NullEmitter), so the chain compiles unchanged and
/// nothing is formatted or written.
#[cfg(not(feature = "debug-log"))]
#[macro_export]
macro_rules! debug_line {
    () => {
        $crate::NullEmitter::new()
    };
}

/// Labels an expression with its own source text, for
/// [`Emitter::labeled`](crate::Emitter::labeled).
///
/// `debug_line!().labeled(v!(offset))` emits `offset:42`, preceded by a
/// space unless the line already ends in whitespace. The operand is
/// borrowed, never moved, and is evaluated exactly once whether or not the
/// `debug-log` feature is enabled, so expressions with side effects behave
/// the same in both modes.
#[cfg(feature = "debug-log")]
#[macro_export]
macro_rules! v {
    ($value:expr) => {
        $crate::Labeled::new(stringify!($value), &$value)
    };
}

/// Labels an expression with its own source text.
///
/// The `debug-log` feature is off: degrades to borrowing the evaluated
/// expression, with no textual trace of it left in the binary.
#[cfg(not(feature = "debug-log"))]
#[macro_export]
macro_rules! v {
    ($value:expr) => {
        &$value
    };
}
