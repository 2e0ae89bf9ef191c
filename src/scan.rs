use crate::store::SourceStore;
use anyhow::Result;

/// Cursor-paged SCAN over the source keyspace.
///
/// Yields every key matching the pattern that is present for the whole scan
/// at least once; duplicates are possible across rehashes and are tolerated
/// downstream. A scanner cannot be restarted mid-scan; build a new one.
pub struct KeyScanner {
    pattern: String,
    cursor: u64,
    done: bool,
}

impl KeyScanner {
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            cursor: 0,
            done: false,
        }
    }

    /// The next page of key names, or `None` once the cursor wraps to 0.
    /// A page can be empty even though the scan is not finished.
    pub fn next_page<S: SourceStore>(&mut self, src: &mut S) -> Result<Option<Vec<Vec<u8>>>> {
        if self.done {
            return Ok(None);
        }
        let (next, keys) = src.scan_page(&self.pattern, self.cursor)?;
        self.cursor = next;
        if next == 0 {
            self.done = true;
        }
        Ok(Some(keys))
    }
}
