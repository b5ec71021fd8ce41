//! Sets of postal codes to sweep.
//!
//! A space is an ordered, duplicate-free list of postal codes. Spaces can be
//! given explicitly, expanded from the metro prefix table, or sampled at
//! random with a fixed seed.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use supply_core::geocode::metro_prefixes;

/// Lowest and highest 6-digit PIN codes.
const MIN_PIN: u32 = 100_000;
const MAX_PIN: u32 = 999_999;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalCodeSpace {
    codes: Vec<String>,
}

impl PostalCodeSpace {
    /// Explicit codes, in order, with later duplicates dropped.
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let codes = codes
            .into_iter()
            .map(Into::into)
            .filter(|code: &String| seen.insert(code.clone()))
            .collect();
        Self { codes }
    }

    /// Every metro prefix combined with each 3-digit `suffix`
    /// (`["001", "050"]` -> `400001`, `400050`, `110001`, ...).
    pub fn metro_prefixes(suffixes: &[&str]) -> Self {
        Self::from_codes(
            metro_prefixes()
                .flat_map(|prefix| suffixes.iter().map(move |suffix| format!("{prefix}{suffix}"))),
        )
    }

    /// Sample `count` unique 6-digit codes. Reproducible for a given seed.
    pub fn sample_random(count: usize, seed: u64) -> Self {
        let count = count.min((MAX_PIN - MIN_PIN + 1) as usize);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut seen = HashSet::with_capacity(count);
        let mut codes = Vec::with_capacity(count);

        while codes.len() < count {
            let pin = rng.gen_range(MIN_PIN..=MAX_PIN);
            if seen.insert(pin) {
                codes.push(pin.to_string());
            }
        }

        Self { codes }
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// SHA-256 over the sorted codes, hex encoded. Independent of order, so
    /// the same set always maps to the same output name.
    pub fn fingerprint(&self) -> String {
        let mut sorted: Vec<&str> = self.codes.iter().map(String::as_str).collect();
        sorted.sort_unstable();

        let mut hasher = Sha256::new();
        for code in sorted {
            hasher.update(code.as_bytes());
            hasher.update(b"\n");
        }
        format!("{:x}", hasher.finalize())
    }
}

/// Serializable description of a space, used by sweep configs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpaceSource {
    Codes { codes: Vec<String> },
    MetroPrefixes { suffixes: Vec<String> },
    Random { count: usize, seed: u64 },
}

impl Default for SpaceSource {
    fn default() -> Self {
        Self::MetroPrefixes {
            suffixes: vec!["001".to_string()],
        }
    }
}

impl SpaceSource {
    pub fn build(&self) -> PostalCodeSpace {
        match self {
            Self::Codes { codes } => PostalCodeSpace::from_codes(codes.iter().cloned()),
            Self::MetroPrefixes { suffixes } => {
                let suffixes: Vec<&str> = suffixes.iter().map(String::as_str).collect();
                PostalCodeSpace::metro_prefixes(&suffixes)
            }
            Self::Random { count, seed } => PostalCodeSpace::sample_random(*count, *seed),
        }
    }
}
