//! Test utilities and mock types for Ledge development.
//!
//! Provides an in-memory [`PlatformServices`] implementation
//! ([`MemoryPlatform`]) and a [`LevelBuilder`] for writing level files
//! in tests without touching the file system.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use ledge_core::PlatformServices;

pub use fixtures::LevelBuilder;

/// In-memory file store implementing [`PlatformServices`].
///
/// Clones share the same storage, so a test can keep one handle for
/// inspection after boxing another into the simulation.
#[derive(Clone, Default)]
pub struct MemoryPlatform {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl MemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    fn files(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Store `contents` at `path`, replacing any previous file.
    pub fn insert(&self, path: &str, contents: impl Into<Vec<u8>>) {
        self.files().insert(path.to_string(), contents.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_file(self, path: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Copy of the file at `path`.
    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.files().get(path).cloned()
    }

    /// The file at `path` as text.
    pub fn file_string(&self, path: &str) -> Option<String> {
        self.file(path).map(|b| String::from_utf8_lossy(&b).into_owned())
    }

    /// Make every subsequent write fail (returning `false`).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of write attempts so far, failed ones included.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl PlatformServices for MemoryPlatform {
    fn read_entire_file(&mut self, buffer: &mut [u8], path: &str) -> usize {
        match self.files().get(path) {
            Some(bytes) if bytes.len() <= buffer.len() => {
                buffer[..bytes.len()].copy_from_slice(bytes);
                bytes.len()
            }
            _ => 0,
        }
    }

    fn write_entire_file(&mut self, path: &str, bytes: &[u8]) -> bool {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return false;
        }
        self.files().insert(path.to_string(), bytes.to_vec());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_storage() {
        let platform = MemoryPlatform::new();
        let mut boxed: Box<dyn PlatformServices> = Box::new(platform.clone());
        assert!(boxed.write_entire_file("a.txt", b"hello"));
        assert_eq!(platform.file("a.txt").as_deref(), Some(&b"hello"[..]));

        let mut buf = [0u8; 16];
        assert_eq!(boxed.read_entire_file(&mut buf, "a.txt"), 5);
        assert_eq!(&buf[..5], b"hello");
    }

    #[test]
    fn missing_or_oversized_reads_return_zero() {
        let mut platform = MemoryPlatform::new().with_file("big", vec![1u8; 32]);
        let mut buf = [0u8; 8];
        assert_eq!(platform.read_entire_file(&mut buf, "nope"), 0);
        assert_eq!(platform.read_entire_file(&mut buf, "big"), 0);
    }

    #[test]
    fn failing_writes_leave_files_untouched() {
        let mut platform = MemoryPlatform::new().with_file("lvl", "old");
        platform.set_fail_writes(true);
        assert!(!platform.write_entire_file("lvl", b"new"));
        assert_eq!(platform.file_string("lvl").as_deref(), Some("old"));
        assert_eq!(platform.write_count(), 1);
    }
}
