//! Read-only random access over the file being viewed.
//!
//! `ByteSource` is the only place in the workspace that performs file I/O.
//! Views hold it through an `Arc` and never keep a read position of their
//! own: every access is a seek immediately followed by a read, and that pair
//! runs inside a single mutex guard scope. A display read (scroll / resize)
//! and a selection export (copy) issued from different call sites within the
//! same turn therefore cannot interleave their seeks.
//!
//! Invariants:
//! * `size` is captured once at open and never changes afterwards.
//! * `read(offset, len)` returns fewer than `len` bytes only when the range
//!   runs past end-of-file; short reads from the OS are retried internally.
//! * Reads starting at or after `size` return an empty buffer without
//!   touching the handle.

use std::fmt;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Anything seekable and readable can back a `ByteSource` (files in the
/// binary, in-memory cursors in tests).
pub trait SourceHandle: Read + Seek + Send {}

impl<T: Read + Seek + Send> SourceHandle for T {}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot determine size of {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("read of {len} bytes at offset {offset:#x} failed: {source}")]
    Read {
        offset: u64,
        len: usize,
        #[source]
        source: io::Error,
    },
}

pub struct ByteSource {
    name: String,
    path: Option<PathBuf>,
    size: u64,
    handle: Mutex<Box<dyn SourceHandle>>,
}

impl fmt::Debug for ByteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteSource")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("size", &self.size)
            .finish()
    }
}

impl ByteSource {
    /// Open `path` read-only and capture its size.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let size = file
            .metadata()
            .map_err(|source| SourceError::Metadata {
                path: path.to_path_buf(),
                source,
            })?
            .len();
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("file")
            .to_string();
        debug!(target: "source.io", file = %path.display(), size, "source_open_ok");
        Ok(Self {
            name,
            path: Some(path.to_path_buf()),
            size,
            handle: Mutex::new(Box::new(file)),
        })
    }

    /// Wrap an arbitrary seekable reader. The size is taken by seeking to
    /// the end once.
    pub fn from_reader<R>(name: impl Into<String>, mut reader: R) -> Result<Self, SourceError>
    where
        R: SourceHandle + 'static,
    {
        let name = name.into();
        let size = reader
            .seek(SeekFrom::End(0))
            .map_err(|source| SourceError::Metadata {
                path: PathBuf::from(&name),
                source,
            })?;
        Ok(Self {
            name,
            path: None,
            size,
            handle: Mutex::new(Box::new(reader)),
        })
    }

    /// In-memory source, mostly for tests and piped input.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size = bytes.len() as u64;
        Self {
            name: name.into(),
            path: None,
            size,
            handle: Mutex::new(Box::new(io::Cursor::new(bytes))),
        }
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read up to `len` bytes starting at `offset`.
    pub fn read(&self, offset: u64, len: usize) -> Result<Vec<u8>, SourceError> {
        if offset >= self.size || len == 0 {
            return Ok(Vec::new());
        }
        let available = self.size - offset;
        let want = usize::try_from(available).map_or(len, |a| a.min(len));
        let mut buf = vec![0u8; want];

        let mut handle = self.lock();
        handle
            .seek(SeekFrom::Start(offset))
            .map_err(|source| SourceError::Read {
                offset,
                len,
                source,
            })?;
        let mut filled = 0usize;
        while filled < want {
            match handle.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(SourceError::Read {
                        offset,
                        len,
                        source,
                    });
                }
            }
        }
        drop(handle);

        buf.truncate(filled);
        trace!(target: "source.io", offset, requested = len, got = filled, "source_read");
        Ok(buf)
    }

    /// Read the half-open range `[begin, end)`.
    pub fn read_range(&self, begin: u64, end: u64) -> Result<Vec<u8>, SourceError> {
        let len = usize::try_from(end.saturating_sub(begin)).unwrap_or(usize::MAX);
        self.read(begin, len)
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn SourceHandle>> {
        // Every access re-seeks, so a handle left behind by a panicking
        // reader is still usable.
        self.handle.lock().unwrap_or_else(|poisoned| {
            warn!(target: "source.io", name = self.name.as_str(), "source_lock_poisoned");
            poisoned.into_inner()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn counting(n: usize) -> Vec<u8> {
        (0..n).map(|i| i as u8).collect()
    }

    #[test]
    fn reads_exact_range() {
        let src = ByteSource::from_bytes("mem", counting(40));
        assert_eq!(src.size(), 40);
        assert_eq!(src.read(16, 4).unwrap(), vec![16, 17, 18, 19]);
    }

    #[test]
    fn short_read_at_eof() {
        let src = ByteSource::from_bytes("mem", counting(40));
        let tail = src.read(32, 16).unwrap();
        assert_eq!(tail.len(), 8);
        assert_eq!(tail[0], 32);
    }

    #[test]
    fn read_past_end_is_empty() {
        let src = ByteSource::from_bytes("mem", counting(4));
        assert!(src.read(4, 8).unwrap().is_empty());
        assert!(src.read(100, 8).unwrap().is_empty());
    }

    #[test]
    fn read_range_is_half_open() {
        let src = ByteSource::from_bytes("mem", counting(10));
        assert_eq!(src.read_range(2, 5).unwrap(), vec![2, 3, 4]);
        assert!(src.read_range(5, 5).unwrap().is_empty());
    }

    /// Reader that hands out at most `chunk` bytes per call.
    struct Trickle {
        inner: Cursor<Vec<u8>>,
        chunk: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = buf.len().min(self.chunk);
            self.inner.read(&mut buf[..n])
        }
    }

    impl Seek for Trickle {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    #[test]
    fn partial_reads_are_retried_until_satisfied() {
        let src = ByteSource::from_reader(
            "trickle",
            Trickle {
                inner: Cursor::new(counting(64)),
                chunk: 3,
            },
        )
        .unwrap();
        assert_eq!(src.size(), 64);
        let bytes = src.read(10, 20).unwrap();
        assert_eq!(bytes, (10..30).map(|i| i as u8).collect::<Vec<_>>());
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device gone"))
        }
    }

    impl Seek for Broken {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            match pos {
                SeekFrom::End(_) => Ok(32),
                SeekFrom::Start(n) => Ok(n),
                SeekFrom::Current(_) => Ok(0),
            }
        }
    }

    #[test]
    fn read_failure_reports_offset() {
        let src = ByteSource::from_reader("broken", Broken).unwrap();
        let err = src.read(8, 4).unwrap_err();
        match err {
            SourceError::Read { offset, len, .. } => {
                assert_eq!(offset, 8);
                assert_eq!(len, 4);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
