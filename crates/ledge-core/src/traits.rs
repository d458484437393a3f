//! Traits injected into the simulation by its host.

/// File access supplied by the host platform.
///
/// The simulation never touches the file system directly. Both methods
/// report failure in-band: a read that finds nothing returns `0`, a
/// write that cannot complete returns `false` and must not leave a
/// partially written file behind.
pub trait PlatformServices: Send {
    /// Read the whole file at `path` into `buffer`.
    ///
    /// Returns the number of bytes read, or `0` if the file is missing,
    /// unreadable, or larger than `buffer`.
    fn read_entire_file(&mut self, buffer: &mut [u8], path: &str) -> usize;

    /// Replace the file at `path` with `bytes`. Returns `true` on success.
    fn write_entire_file(&mut self, path: &str, bytes: &[u8]) -> bool;
}
