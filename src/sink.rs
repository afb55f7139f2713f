//! Process-wide output lock and diagnostic stream.
//!
//! One `static` mutex guards the stream for the life of the process. A flush
//! holds the lock for the whole line (content plus terminator), so bytes from
//! concurrent emitters never interleave.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// `None` routes lines to stderr; `redirect` installs a replacement stream.
static SINK: Mutex<Option<Box<dyn Write + Send>>> = Mutex::new(None);

/// Write one accumulated line plus terminator under the output lock.
///
/// Write errors are discarded: if the diagnostic stream is gone the process
/// is already past the point where logging matters.
pub(crate) fn write_line(buf: &[u8]) {
    let mut guard = SINK.lock().unwrap_or_else(PoisonError::into_inner);
    match guard.as_mut() {
        Some(out) => emit(out, buf),
        None => emit(&mut io::stderr().lock(), buf),
    }
}

fn emit<W: Write>(out: &mut W, buf: &[u8]) {
    let _ = out.write_all(buf);
    let _ = out.write_all(b"\n");
    let _ = out.flush();
}

/// Replace the diagnostic stream, returning the previously installed one.
///
/// Passing `None` restores the default (stderr). Intended for tests and for
/// hosts that collect diagnostics somewhere other than the error stream; the
/// swap happens under the same lock that serializes flushes, so no line is
/// ever split across the old and new streams.
pub fn redirect(stream: Option<Box<dyn Write + Send>>) -> Option<Box<dyn Write + Send>> {
    let mut guard = SINK.lock().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *guard, stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{Captured, SINK_GUARD};

    #[test]
    fn test_redirect_captures_lines() {
        let _guard = SINK_GUARD.lock().unwrap();
        let captured = Captured::default();
        redirect(Some(Box::new(captured.clone())));

        write_line(b"first");
        write_line(b"second");
        redirect(None);

        assert_eq!(captured.bytes(), b"first\nsecond\n");
    }

    #[test]
    fn test_redirect_returns_previous_stream() {
        let _guard = SINK_GUARD.lock().unwrap();
        assert!(redirect(Some(Box::new(io::sink()))).is_none());
        assert!(redirect(None).is_some());
        assert!(redirect(None).is_none());
    }
}
