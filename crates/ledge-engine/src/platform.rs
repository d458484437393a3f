//! File-system platform services.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ledge_core::PlatformServices;
use tracing::{debug, warn};

/// [`PlatformServices`] backed by `std::fs`, with every path resolved
/// relative to a root directory.
///
/// Writes go to a sibling `.tmp` file that is synced and then renamed
/// over the target, so a failed write never leaves a partial level.
#[derive(Clone, Debug)]
pub struct FsPlatform {
    root: PathBuf,
}

impl FsPlatform {
    /// Resolve paths relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

fn temp_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_atomically(target: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = temp_path(target);
    let result = File::create(&tmp).and_then(|mut file| {
        file.write_all(bytes)?;
        file.sync_all()
    });
    let result = result.and_then(|()| fs::rename(&tmp, target));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

impl PlatformServices for FsPlatform {
    fn read_entire_file(&mut self, buffer: &mut [u8], path: &str) -> usize {
        let full = self.resolve(path);
        match fs::read(&full) {
            Ok(bytes) if bytes.len() <= buffer.len() => {
                buffer[..bytes.len()].copy_from_slice(&bytes);
                bytes.len()
            }
            Ok(bytes) => {
                warn!(
                    path = %full.display(),
                    size = bytes.len(),
                    capacity = buffer.len(),
                    "file larger than read buffer"
                );
                0
            }
            Err(err) => {
                debug!(path = %full.display(), error = %err, "read failed");
                0
            }
        }
    }

    fn write_entire_file(&mut self, path: &str, bytes: &[u8]) -> bool {
        let full = self.resolve(path);
        match write_atomically(&full, bytes) {
            Ok(()) => true,
            Err(err) => {
                warn!(path = %full.display(), error = %err, "write failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ledge-fs-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn write_then_read_back() {
        let dir = scratch_dir("roundtrip");
        let mut platform = FsPlatform::new(&dir);
        assert!(platform.write_entire_file("level.txt", b"hello"));
        assert!(!dir.join("level.txt.tmp").exists());

        let mut buf = [0u8; 32];
        assert_eq!(platform.read_entire_file(&mut buf, "level.txt"), 5);
        assert_eq!(&buf[..5], b"hello");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn oversized_and_missing_files_read_as_zero() {
        let dir = scratch_dir("oversized");
        let mut platform = FsPlatform::new(&dir);
        fs::write(dir.join("big.txt"), vec![b'x'; 64]).unwrap();
        let mut buf = [0u8; 8];
        assert_eq!(platform.read_entire_file(&mut buf, "big.txt"), 0);
        assert_eq!(platform.read_entire_file(&mut buf, "missing.txt"), 0);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn failed_write_leaves_target_untouched() {
        let dir = scratch_dir("failed");
        fs::write(dir.join("level.txt"), b"old").unwrap();
        let mut platform = FsPlatform::new(&dir);
        // The parent directory does not exist, so the temp file cannot be created.
        assert!(!platform.write_entire_file("missing/level.txt", b"new"));
        assert_eq!(fs::read(dir.join("level.txt")).unwrap(), b"old");
        fs::remove_dir_all(&dir).unwrap();
    }
}
