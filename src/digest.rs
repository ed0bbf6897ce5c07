/// Incremental checksum over the extracted text of one document.
///
/// Fragments are hashed in emission order; the resulting digest equals
/// hashing the concatenation of all fragments, so the full text never needs
/// to exist in memory. The digest is what makes two fetches of the same
/// document comparable: identical extracted text, identical checksum.
pub struct ContentDigest {
    hasher: blake3::Hasher,
}

impl ContentDigest {
    pub fn new() -> Self {
        Self {
            hasher: blake3::Hasher::new(),
        }
    }

    pub fn consume(&mut self, fragment: &str) {
        self.hasher.update(fragment.as_bytes());
    }

    /// Finish the digest, returning the lowercase hex checksum.
    ///
    /// Terminal: a new document needs a new `ContentDigest`.
    pub fn finalize(self) -> String {
        self.hasher.finalize().to_hex().to_string()
    }
}

impl Default for ContentDigest {
    fn default() -> Self {
        Self::new()
    }
}
