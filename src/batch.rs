/// Default number of keys per migration batch.
pub const BATCH_SIZE: usize = 100;

/// Groups scanned key names into fixed-size batches.
///
/// Boundaries are purely positional: every `capacity`-th key closes a batch.
/// The trailing partial batch comes out of `finish`; an empty one never does.
pub struct BatchCollector {
    capacity: usize,
    buf: Vec<Vec<u8>>,
}

impl BatchCollector {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "batch capacity must be positive");
        Self {
            capacity,
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Adds one key, returning a full batch when the key closes one.
    pub fn push(&mut self, key: Vec<u8>) -> Option<Vec<Vec<u8>>> {
        self.buf.push(key);
        if self.buf.len() == self.capacity {
            Some(std::mem::replace(
                &mut self.buf,
                Vec::with_capacity(self.capacity),
            ))
        } else {
            None
        }
    }

    /// Drains the trailing partial batch, if any keys are still buffered.
    pub fn finish(&mut self) -> Option<Vec<Vec<u8>>> {
        if self.buf.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.buf))
        }
    }
}
