use crc32fast::Hasher;

/// Derive a document seed from its name using CRC32
pub fn document_seed(name: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(name.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id allocator for elements within a document.
///
/// The counter is monotonic for the lifetime of an editing session and is
/// deliberately kept out of history snapshots: restoring an older document
/// state never rolls it back, so a fresh id can never collide with one
/// handed out earlier.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    pub fn new(document_name: &str) -> Self {
        Self {
            seed: document_seed(document_name),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Allocate the next id
    pub fn next_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
