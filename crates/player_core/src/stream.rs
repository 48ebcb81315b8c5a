use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Absolute byte position of a [`TrackedFile`] within its file, readable
/// from any thread while the stream itself is owned by a playback worker.
#[derive(Debug, Clone, Default)]
pub struct StreamPosition(Arc<AtomicU64>);

impl StreamPosition {
    fn new(at: u64) -> Self {
        Self(Arc::new(AtomicU64::new(at)))
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    fn set(&self, at: u64) {
        self.0.store(at, Ordering::Release);
    }
}

/// A file opened `skip` bytes in, exposed as a stream that starts at the
/// skip point.
///
/// Reads are counted against the whole file, so `total_len - position` is
/// the number of bytes the decoder has not pulled yet. Decoders read ahead
/// and MPEG frames don't line up with arbitrary byte offsets, so this is
/// only a coarse position.
#[derive(Debug)]
pub struct TrackedFile {
    file: File,
    skip: u64,
    total_len: u64,
    position: StreamPosition,
}

impl TrackedFile {
    pub fn open(path: impl AsRef<Path>, skip: u64) -> io::Result<Self> {
        let mut file = File::open(path.as_ref())?;
        let total_len = file.metadata()?.len();
        let skip = skip.min(total_len);
        file.seek(SeekFrom::Start(skip))?;

        Ok(Self {
            file,
            skip,
            total_len,
            position: StreamPosition::new(skip),
        })
    }

    /// Length of the whole file, skipped bytes included.
    pub fn total_len(&self) -> u64 {
        self.total_len
    }

    pub fn skip(&self) -> u64 {
        self.skip
    }

    pub fn position(&self) -> StreamPosition {
        self.position.clone()
    }

    /// Bytes left between the current position and the end of the file.
    pub fn remaining(&self) -> u64 {
        self.total_len.saturating_sub(self.position.get())
    }
}

impl Read for TrackedFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.file.read(buf)?;
        self.position.set(self.position.get() + n as u64);
        Ok(n)
    }
}

impl Seek for TrackedFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(n) => self.skip as i128 + n as i128,
            SeekFrom::End(n) => self.total_len as i128 + n as i128,
            SeekFrom::Current(n) => self.position.get() as i128 + n as i128,
        };

        if target < self.skip as i128 || target > u64::MAX as i128 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek before start of stream",
            ));
        }

        let absolute = self.file.seek(SeekFrom::Start(target as u64))?;
        self.position.set(absolute);
        Ok(absolute - self.skip)
    }
}
