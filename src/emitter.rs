//! Line emitters: the buffering [`Emitter`] and its no-op twin [`NullEmitter`].
//!
//! An emitter lives for exactly one diagnostic statement. Construction
//! formats the call-site preamble into a private buffer, the append methods
//! grow that buffer without performing any I/O, and dropping the emitter
//! flushes the whole buffer as one line through the process-wide output lock.
//! Every append method takes `self` by value and hands it back, so a chain
//! is a single expression whose temporary drops at the end of the statement.

use std::fmt;
use std::io::Write;

use crate::{sink, tid};

/// Final path component of a source file path, as reported by `file!()`.
fn basename(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// An expression's source text paired with its value, produced by [`v!`].
///
/// [`v!`]: crate::v
pub struct Labeled<T> {
    name: &'static str,
    value: T,
}

impl<T: fmt::Display> Labeled<T> {
    pub fn new(name: &'static str, value: T) -> Self {
        Labeled { name, value }
    }
}

/// One diagnostic line in the making.
///
/// Created by [`debug_line!`](crate::debug_line) when the `debug-log`
/// feature is enabled. The accumulated line is written to the diagnostic
/// stream when the emitter goes out of scope, on every exit path.
pub struct Emitter {
    buf: Vec<u8>,
}

impl Emitter {
    /// Starts a line with the `<pthread>/<tid>:<basename>:<function>:<line>: `
    /// preamble. No I/O happens until the emitter is dropped.
    pub fn new(file: &str, function: &str, line: u32) -> Self {
        let (pthread, os_tid) = tid::current();
        let mut buf = Vec::with_capacity(96);
        // Vec<u8> never fails to write; allocation failure aborts.
        let _ = write!(
            buf,
            "{pthread}/{os_tid}:{}:{function}:{line}: ",
            basename(file)
        );
        Emitter { buf }
    }

    /// Appends a value in its natural textual form, with no separator.
    ///
    /// Error values are rendered the same way: their `Display` output is
    /// the human-readable description.
    pub fn push<T: fmt::Display>(mut self, value: T) -> Self {
        let _ = write!(self.buf, "{value}");
        self
    }

    /// Appends exactly `raw.len()` bytes verbatim. Embedded NUL or
    /// non-printable bytes pass through untouched.
    pub fn bytes(mut self, raw: &[u8]) -> Self {
        self.buf.extend_from_slice(raw);
        self
    }

    /// Appends each element on its own line (separated by `\n`, none
    /// trailing). Convenient for dumping argv-style lists.
    pub fn lines<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.buf.push(b'\n');
            }
            let _ = write!(self.buf, "{item}");
        }
        self
    }

    /// Conditional space: appends one space unless the line already ends in
    /// whitespace. Appending it twice is the same as appending it once.
    pub fn sep(mut self) -> Self {
        if !self.ends_in_space() {
            self.buf.push(b' ');
        }
        self
    }

    /// Appends `<source-text>:<value>`, preceded by a conditional space.
    /// Target of the [`v!`](crate::v) macro.
    pub fn labeled<T: fmt::Display>(self, v: Labeled<T>) -> Self {
        let mut this = self.sep();
        let _ = write!(this.buf, "{}:{}", v.name, v.value);
        this
    }

    /// The line accumulated so far, preamble included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// True when the buffer is empty or its last byte is ASCII whitespace.
    /// (A continuation byte of a multi-byte UTF-8 character has the high bit
    /// set, so it never reads as whitespace.)
    fn ends_in_space(&self) -> bool {
        match self.buf.last() {
            None => true,
            Some(last) => last.is_ascii_whitespace(),
        }
    }
}

impl Drop for Emitter {
    /// Flushes the line, terminator included, as one unit under the output
    /// lock. Runs exactly once per emitter, unwind paths included.
    fn drop(&mut self) {
        sink::write_line(&self.buf);
    }
}

/// The emitter [`debug_line!`](crate::debug_line) expands to when the
/// `debug-log` feature is off.
///
/// Accepts the same chains as [`Emitter`] and discards everything: no
/// buffer, no formatting, no I/O, nothing on drop. Call sites cannot tell
/// which emitter they got except by the presence or absence of output.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullEmitter;

impl NullEmitter {
    pub const fn new() -> Self {
        NullEmitter
    }

    pub fn push<T>(self, _value: T) -> Self {
        self
    }

    pub fn bytes(self, _raw: &[u8]) -> Self {
        self
    }

    pub fn lines<I>(self, _items: I) -> Self {
        self
    }

    pub fn sep(self) -> Self {
        self
    }

    pub fn labeled<T>(self, _value: T) -> Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::SINK_GUARD;

    /// Everything after the call-site preamble.
    fn content(emitter: &Emitter) -> &[u8] {
        let bytes = emitter.as_bytes();
        let colon_space = bytes
            .windows(2)
            .position(|w| w == b": ")
            .expect("preamble terminator");
        &bytes[colon_space + 2..]
    }

    #[test]
    fn test_basename_strips_directories() {
        assert_eq!(basename("/a/b/c.rs"), "c.rs");
        assert_eq!(basename("c.rs"), "c.rs");
        assert_eq!(basename("src\\win\\c.rs"), "c.rs");
        assert_eq!(basename(""), "");
    }

    #[test]
    fn test_preamble_shape() {
        let _guard = SINK_GUARD.lock().unwrap();
        let emitter = Emitter::new("/src/worker.rs", "run", 42);
        let text = String::from_utf8(emitter.as_bytes().to_vec()).unwrap();

        let (ids, rest) = text.split_once(':').unwrap();
        let (pthread, os_tid) = ids.split_once('/').unwrap();
        assert!(pthread.chars().all(|c| c.is_ascii_digit()));
        assert!(os_tid.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(rest, "worker.rs:run:42: ");
    }

    #[test]
    fn test_push_appends_without_separator() {
        let _guard = SINK_GUARD.lock().unwrap();
        let emitter = Emitter::new("a.rs", "f", 1).push("start").push("ok").push(7);
        assert_eq!(content(&emitter), b"startok7");
    }

    #[test]
    fn test_sep_inserts_single_space() {
        let _guard = SINK_GUARD.lock().unwrap();
        let emitter = Emitter::new("worker.rs", "run", 42)
            .push("start")
            .sep()
            .push("ok");
        assert_eq!(content(&emitter), b"start ok");
    }

    #[test]
    fn test_sep_is_idempotent() {
        let _guard = SINK_GUARD.lock().unwrap();
        let emitter = Emitter::new("a.rs", "f", 1).push("x").sep().sep().push("y");
        assert_eq!(content(&emitter), b"x y");
    }

    #[test]
    fn test_sep_after_whitespace_is_noop() {
        let _guard = SINK_GUARD.lock().unwrap();
        // The preamble ends in a space, so a leading sep adds nothing.
        let emitter = Emitter::new("a.rs", "f", 1).sep().push("x ").sep().push("y");
        assert_eq!(content(&emitter), b"x y");
    }

    #[test]
    fn test_bytes_verbatim_with_embedded_nul() {
        let _guard = SINK_GUARD.lock().unwrap();
        let raw = b"a\x00b\xffc";
        let emitter = Emitter::new("a.rs", "f", 1);
        let before = emitter.as_bytes().len();
        let emitter = emitter.bytes(raw);
        assert_eq!(emitter.as_bytes().len(), before + raw.len());
        assert_eq!(content(&emitter), raw);
    }

    #[test]
    fn test_lines_joins_with_newlines() {
        let _guard = SINK_GUARD.lock().unwrap();
        let emitter = Emitter::new("a.rs", "f", 1).lines(["prog", "--in", "x.fa"]);
        assert_eq!(content(&emitter), b"prog\n--in\nx.fa");
    }

    #[test]
    fn test_lines_empty_appends_nothing() {
        let _guard = SINK_GUARD.lock().unwrap();
        let empty: [&str; 0] = [];
        let emitter = Emitter::new("a.rs", "f", 1);
        let before = emitter.as_bytes().len();
        let emitter = emitter.lines(empty);
        assert_eq!(emitter.as_bytes().len(), before);
    }

    #[test]
    fn test_labeled_renders_name_colon_value() {
        let _guard = SINK_GUARD.lock().unwrap();
        let emitter = Emitter::new("a.rs", "f", 1)
            .push("fd")
            .labeled(Labeled::new("count", 3));
        assert_eq!(content(&emitter), b"fd count:3");
    }

    #[test]
    fn test_error_values_render_description() {
        let _guard = SINK_GUARD.lock().unwrap();
        let err = std::io::Error::other("pipe closed");
        let emitter = Emitter::new("a.rs", "f", 1).push(&err);
        assert_eq!(content(&emitter), b"pipe closed");
    }

    #[test]
    fn test_null_emitter_chains() {
        let chained = NullEmitter::new()
            .push("anything")
            .bytes(b"\x00")
            .lines(["a", "b"])
            .sep()
            .labeled(5);
        // Zero-sized and stateless; the chain only proves the surface lines up.
        assert_eq!(std::mem::size_of_val(&chained), 0);
    }
}
