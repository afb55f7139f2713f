//! Line-buffered, thread-safe debug diagnostics.
//!
//! This crate provides one facility: a diagnostic statement that buffers a
//! single line (thread identity, call site, caller-supplied content) and
//! writes it atomically to the process's error stream, serialized across
//! threads so lines never interleave. The whole thing sits behind the
//! `debug-log` Cargo feature; with the feature off (the default), every
//! call site compiles to a no-op with zero runtime cost.
//!
//! ```
//! use dbgline::{debug_line, v};
//!
//! fn accept(fd: i32, tries: u32) {
//!     debug_line!().push("accepted").labeled(v!(fd)).labeled(v!(tries));
//!     // with `--features debug-log`, emits one line like:
//!     //   140214786750016/53412:lib.rs:accept:5: accepted fd:7 tries:1
//! }
//! # accept(7, 1);
//! ```
//!
//! The emitter flushes when it goes out of scope, so a chain left
//! unassigned logs at the end of its own statement. Appends never perform
//! I/O themselves; the only blocking is the brief output-lock acquisition
//! during the flush.

mod emitter;
mod macros;
mod sink;
mod tid;

pub use emitter::{Emitter, Labeled, NullEmitter};
pub use sink::redirect;
