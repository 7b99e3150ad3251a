use crc32fast::Hasher;

/// Derive an id seed from a namespace using CRC32
pub fn namespace_seed(namespace: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(namespace.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator for nodes and pages
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String, // Namespace hash (CRC32)
    count: u64,   // Sequential counter
}

impl IdGenerator {
    pub fn new(namespace: &str) -> Self {
        Self {
            seed: namespace_seed(namespace),
            count: 0,
        }
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next sequential id
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Advance past an id minted earlier with the same seed.
    ///
    /// Ids from other seeds (or hand-written ids) are ignored.
    pub fn observe(&mut self, id: &str) {
        let counter = id
            .strip_prefix(self.seed.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(|n| n.parse::<u64>().ok());

        if let Some(n) = counter {
            self.count = self.count.max(n);
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_seed_is_stable() {
        let a = namespace_seed("pagecraft");
        let b = namespace_seed("pagecraft");
        assert_eq!(a, b);
        assert_ne!(a, namespace_seed("other"));
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::from_seed("n");

        assert_eq!(gen.new_id(), "n-1");
        assert_eq!(gen.new_id(), "n-2");
        assert_eq!(gen.new_id(), "n-3");
    }

    #[test]
    fn test_observe_skips_existing_ids() {
        let mut gen = IdGenerator::from_seed("n");
        gen.observe("n-41");
        gen.observe("n-7");
        gen.observe("other-900");
        gen.observe("n-abc");
        gen.observe("heading-1");

        assert_eq!(gen.new_id(), "n-42");
    }
}
