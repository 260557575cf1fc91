//! Faster (but not DoS-resistant) hashmap for counting tokens
use farmhash;
use std::collections::HashMap;
use std::hash::{Hash, Hasher, BuildHasherDefault};

/// Streaming farmhash
///
/// Farmhash isn't a streaming hash, so every write is folded into the running state by using the
/// previous state as the seed. `str` hashes as its bytes followed by a 0xff terminator, so both
/// writes have to count or every string would land in the same bucket.
pub struct FarmChain(u64);

impl Default for FarmChain {
    #[inline]
    fn default() -> FarmChain { FarmChain(0) }
}

impl Hasher for FarmChain {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.0 = farmhash::hash64_with_seed(bytes, self.0);
    }
}

pub type Farm = BuildHasherDefault<FarmChain>;
pub type FarmMap<X, Y> = HashMap<X, Y, Farm>;

pub fn new_farm<X: Hash+Eq, Y>() -> FarmMap<X, Y> {
    Default::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::BuildHasher;

    fn hash_of(s: &str) -> u64 {
        let mut hasher = Farm::default().build_hasher();
        s.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn distinct_strings_hash_apart() {
        assert_ne!(hash_of("cat"), hash_of("dog"));
        assert_eq!(hash_of("cat"), hash_of("cat"));
    }

    #[test]
    fn counts_like_a_hashmap() {
        let mut counts: FarmMap<&str, usize> = new_farm();
        for word in "a b a c a".split(' ') {
            *counts.entry(word).or_insert(0) += 1;
        }
        assert_eq!(counts["a"], 3);
        assert_eq!(counts.len(), 3);
    }
}
