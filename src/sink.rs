use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// A cloneable [`Write`] target that serializes every write behind a mutex.
///
/// Each `write` and `flush` call holds the lock for its whole duration, so
/// bytes from different clones never interleave within a call.
#[derive(Debug, Default)]
pub struct SyncWriter<W> {
    inner: Arc<Mutex<W>>,
}

impl<W> Clone for SyncWriter<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W: Write> SyncWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
        }
    }
}

impl<W: Write> Write for SyncWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .write_all(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
    }
}

/// In-memory output that can be read while another thread is writing to it.
///
/// Useful for capturing what a display emitted:
///
/// ```rust
/// use nested_progress::{ProgressDisplay, ProgressReporter, SharedBuffer};
///
/// let buffer = SharedBuffer::new();
/// let display = ProgressDisplay::new(buffer.clone());
/// display.log_accomplishment("Built application").unwrap();
/// assert!(buffer.contents().contains("Built application"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    buf: Arc<RwLock<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        let buf = self.buf.read().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }

    pub fn len(&self) -> usize {
        self.buf.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buf
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
