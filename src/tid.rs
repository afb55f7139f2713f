//! Thread identity for line preambles.

/// Returns the `(pthread, os_tid)` pair rendered as `<pthread>/<tid>` at the
/// start of every diagnostic line.
#[cfg(target_os = "linux")]
pub(crate) fn current() -> (u64, u64) {
    // Both are plain identity reads with no failure mode.
    unsafe { (libc::pthread_self() as u64, libc::gettid() as u64) }
}

#[cfg(target_os = "macos")]
pub(crate) fn current() -> (u64, u64) {
    let mut os_tid: u64 = 0;
    unsafe {
        libc::pthread_threadid_np(libc::pthread_self(), &mut os_tid);
        (libc::pthread_self() as u64, os_tid)
    }
}

/// Other Unixes have no portable kernel-tid call; the pthread id stands in
/// for both fields.
#[cfg(all(unix, not(any(target_os = "linux", target_os = "macos"))))]
pub(crate) fn current() -> (u64, u64) {
    let pthread = unsafe { libc::pthread_self() } as u64;
    (pthread, pthread)
}

/// Non-Unix fallback: derive a stable per-thread number from the opaque
/// `ThreadId` (no stable integer accessor exists).
#[cfg(not(unix))]
pub(crate) fn current() -> (u64, u64) {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    std::thread::current().id().hash(&mut hasher);
    let id = hasher.finish();
    (id, id)
}
