// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A buffered file with a small read-ahead cache and deferred seeking.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

use crate::error::FileError;

/// Size of the per-file read-ahead cache, in bytes.
pub const CACHE_SIZE: usize = 256;

/// An open file slot: OS descriptor plus logical cursor, tracked end and a
/// fixed read-ahead cache.
///
/// Reads that overlap the cache window `[cache_base, cache_base + cache_len)`
/// are served from memory; everything else goes to the OS, refilling the
/// cache for small requests and bypassing it for large ones. Seeks are
/// logical only and resolved on the next read or write. `tracked_end` is this
/// abstraction's notion of the file size; writes past it grow it.
#[derive(Debug)]
pub struct BufferedFile {
    file: File,
    path: String,
    logical_offset: u64,
    /// Last known OS file position; `None` after a failed reposition.
    os_cursor: Option<u64>,
    tracked_end: u64,
    cache_base: u64,
    cache_len: usize,
    cache: [u8; CACHE_SIZE],
}

impl BufferedFile {
    pub(crate) fn new(file: File, path: String) -> std::io::Result<Self> {
        let tracked_end = file.metadata()?.len();
        Ok(Self {
            file,
            path,
            logical_offset: 0,
            os_cursor: Some(0),
            tracked_end,
            cache_base: 0,
            cache_len: 0,
            cache: [0; CACHE_SIZE],
        })
    }

    /// The composed path this file was opened with.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Reads up to `buf.len()` bytes at the logical offset.
    ///
    /// Returns the number of bytes actually copied. A short count signals
    /// end-of-file, an I/O limit, or a failed cursor reposition; it is never
    /// an error by itself and the caller must check it. Bytes already served
    /// from the cache are always kept, even when the OS phase fails.
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        let length = buf.len();
        let mut copied = 0usize;

        // Serve the overlapping suffix of the cache window first.
        if self.logical_offset >= self.cache_base
            && self.logical_offset < self.cache_base + self.cache_len as u64
        {
            let start = (self.logical_offset - self.cache_base) as usize;
            let take = (self.cache_len - start).min(length);
            buf[..take].copy_from_slice(&self.cache[start..start + take]);
            self.logical_offset += take as u64;
            copied = take;
            if copied == length {
                return length;
            }
        }

        if self.os_cursor != Some(self.logical_offset) {
            match self.file.seek(SeekFrom::Start(self.logical_offset)) {
                Ok(pos) => self.os_cursor = Some(pos),
                Err(err) => {
                    log::warn!(
                        "reposition of '{}' to {} failed: {err}",
                        self.path,
                        self.logical_offset
                    );
                    self.os_cursor = None;
                    return copied;
                }
            }
        }

        let remaining = length - copied;
        if remaining < CACHE_SIZE / 2 {
            // Small remainder: refill the whole cache from the logical
            // offset, discarding the old window unconditionally.
            self.cache_base = self.logical_offset;
            self.cache_len = match self.file.read(&mut self.cache) {
                Ok(n) => n,
                Err(err) => {
                    log::warn!("read of '{}' failed: {err}", self.path);
                    0
                }
            };
            self.os_cursor = Some(self.logical_offset + self.cache_len as u64);

            let take = remaining.min(self.cache_len);
            buf[copied..copied + take].copy_from_slice(&self.cache[..take]);
            self.logical_offset += take as u64;
            copied += take;
        } else {
            // Large remainder: bypass the cache entirely.
            match self.file.read(&mut buf[copied..]) {
                Ok(n) => {
                    self.os_cursor = Some(self.logical_offset + n as u64);
                    self.logical_offset += n as u64;
                    copied += n;
                }
                Err(err) => {
                    log::warn!("read of '{}' failed: {err}", self.path);
                }
            }
        }

        copied
    }

    /// Writes `buf` at the logical offset.
    ///
    /// The read cache is invalidated unconditionally, since the written
    /// bytes may alias it. Returns the number of bytes the OS accepted; a
    /// short write is reported as-is, not retried. Fails only when the
    /// cursor cannot be repositioned, in which case nothing was written.
    pub fn write(&mut self, buf: &[u8]) -> Result<usize, FileError> {
        self.cache_len = 0;

        if self.os_cursor != Some(self.logical_offset) {
            match self.file.seek(SeekFrom::Start(self.logical_offset)) {
                Ok(pos) => self.os_cursor = Some(pos),
                Err(source) => {
                    self.os_cursor = None;
                    return Err(FileError::RepositionFailed {
                        path: self.path.clone(),
                        offset: self.logical_offset,
                        source,
                    });
                }
            }
        }

        let written = match self.file.write(buf) {
            Ok(n) => n,
            Err(err) => {
                log::warn!("write to '{}' failed: {err}", self.path);
                // The OS cursor state is unknown after a failed write.
                self.os_cursor = None;
                0
            }
        };

        self.logical_offset += written as u64;
        if let Some(cursor) = self.os_cursor {
            self.os_cursor = Some(cursor + written as u64);
        }
        if self.logical_offset > self.tracked_end {
            self.tracked_end = self.logical_offset;
        }

        Ok(written)
    }

    /// Moves the logical offset. No OS seek happens until the next read or
    /// write, and no bounds are enforced: offsets past the tracked end (or
    /// wrapped negative ones) simply surface as short transfers later.
    pub fn seek(&mut self, pos: SeekFrom) {
        self.logical_offset = match pos {
            SeekFrom::Start(offset) => offset,
            SeekFrom::Current(delta) => self.logical_offset.wrapping_add_signed(delta),
            SeekFrom::End(delta) => self.tracked_end.wrapping_add_signed(delta),
        };
    }

    /// The logical offset.
    pub fn tell(&self) -> u64 {
        self.logical_offset
    }

    /// `true` once the logical offset has reached the tracked end.
    pub fn eof(&self) -> bool {
        self.logical_offset >= self.tracked_end
    }

    /// The tracked file size.
    pub fn size(&self) -> u64 {
        self.tracked_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn open_with_pattern(dir: &Path, len: usize) -> BufferedFile {
        let path = dir.join("data.bin");
        let bytes: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        fs::write(&path, &bytes).unwrap();
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .unwrap();
        BufferedFile::new(file, path.to_string_lossy().into_owned()).unwrap()
    }

    fn pattern(offset: usize, len: usize) -> Vec<u8> {
        (offset..offset + len).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn test_small_read_fills_cache() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = open_with_pattern(dir.path(), 1000);

        let mut buf = [0u8; 10];
        assert_eq!(file.read(&mut buf), 10);
        assert_eq!(&buf[..], &pattern(0, 10)[..]);
        assert_eq!(file.tell(), 10);

        // The next small read at 10 is served from the cache window [0, 256).
        let mut buf = [0u8; 20];
        assert_eq!(file.read(&mut buf), 20);
        assert_eq!(&buf[..], &pattern(10, 20)[..]);
    }

    #[test]
    fn test_cache_boundary_read_is_contiguous() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = open_with_pattern(dir.path(), 1000);

        // Load the cache window [100, 356).
        file.seek(SeekFrom::Start(100));
        let mut small = [0u8; 4];
        assert_eq!(file.read(&mut small), 4);

        // Read across the window's end: part cache, part fresh.
        file.seek(SeekFrom::Start(300));
        let mut buf = [0u8; 120];
        assert_eq!(file.read(&mut buf), 120);
        assert_eq!(&buf[..], &pattern(300, 120)[..]);
        assert_eq!(file.tell(), 420);
    }

    #[test]
    fn test_large_read_bypasses_cache() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = open_with_pattern(dir.path(), 1000);

        let mut buf = vec![0u8; 500];
        assert_eq!(file.read(&mut buf), 500);
        assert_eq!(buf, pattern(0, 500));
    }

    #[test]
    fn test_read_past_end_is_short() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = open_with_pattern(dir.path(), 50);

        file.seek(SeekFrom::Start(40));
        let mut buf = [0u8; 32];
        assert_eq!(file.read(&mut buf), 10);
        assert!(file.eof());
    }

    #[test]
    fn test_write_at_end_grows_tracked_end() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = open_with_pattern(dir.path(), 100);
        assert_eq!(file.size(), 100);

        file.seek(SeekFrom::End(0));
        assert_eq!(file.write(&[1, 2, 3, 4]).unwrap(), 4);
        assert_eq!(file.size(), 104);
        assert_eq!(file.tell(), 104);
        assert!(file.eof());
    }

    #[test]
    fn test_overwrite_within_file_keeps_size() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = open_with_pattern(dir.path(), 100);

        file.seek(SeekFrom::Start(10));
        assert_eq!(file.write(&[0xAA; 5]).unwrap(), 5);
        assert_eq!(file.size(), 100);
        assert!(!file.eof());
    }

    #[test]
    fn test_write_invalidates_cache() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = open_with_pattern(dir.path(), 200);

        // Warm the cache over [0, 200).
        let mut buf = [0u8; 8];
        assert_eq!(file.read(&mut buf), 8);

        // Overwrite part of the cached region through the same handle.
        file.seek(SeekFrom::Start(4));
        assert_eq!(file.write(&[0xFF; 4]).unwrap(), 4);

        // A re-read must see the written bytes, not the stale cache.
        file.seek(SeekFrom::Start(0));
        let mut buf = [0u8; 8];
        assert_eq!(file.read(&mut buf), 8);
        assert_eq!(&buf[4..], &[0xFF; 4]);
    }

    #[test]
    fn test_seek_origins() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = open_with_pattern(dir.path(), 100);

        file.seek(SeekFrom::Start(30));
        assert_eq!(file.tell(), 30);
        file.seek(SeekFrom::Current(-10));
        assert_eq!(file.tell(), 20);
        file.seek(SeekFrom::End(-5));
        assert_eq!(file.tell(), 95);
        assert!(!file.eof());
        file.seek(SeekFrom::End(5));
        assert_eq!(file.tell(), 105);
        assert!(file.eof());
    }

    #[test]
    fn test_read_after_sparse_seek() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = open_with_pattern(dir.path(), 100);

        // Past-end offsets are allowed; the read just comes back empty.
        file.seek(SeekFrom::Start(500));
        let mut buf = [0u8; 8];
        assert_eq!(file.read(&mut buf), 0);
    }
}
