//! Content hashes of a source file, computed during the decoration pass.

use sha2::{Digest, Sha256};

/// Hash of a line ignoring all whitespace. Blank lines hash to "".
pub fn line_hash(line: &str) -> String {
    let stripped: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    if stripped.is_empty() {
        return String::new();
    }
    format!("{:x}", Sha256::digest(stripped.as_bytes()))
}

/// Incremental hash of the whole file, lines joined by `\n`
pub struct SourceHasher {
    hasher: Sha256,
    first: bool,
}

impl SourceHasher {
    pub fn new() -> Self {
        Self {
            hasher: Sha256::new(),
            first: true,
        }
    }

    pub fn update(&mut self, line: &str) {
        if !self.first {
            self.hasher.update(b"\n");
        }
        self.first = false;
        self.hasher.update(line.as_bytes());
    }

    pub fn finish(self) -> String {
        format!("{:x}", self.hasher.finalize())
    }
}

impl Default for SourceHasher {
    fn default() -> Self {
        Self::new()
    }
}
