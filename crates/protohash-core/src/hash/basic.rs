//! Tagged primitive hashing over the pluggable basic hash functions.
//!
//! Every node in the object walk is hashed as a single ASCII tag byte
//! followed by a payload. The tag alphabet is part of the wire-compatible
//! contract: changing any tag changes every digest this library produces.

use std::fmt;
use std::str::FromStr;

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use xxhash_rust::xxh64::Xxh64;

use crate::hash::digest::Digest;
use crate::hash::error::{HashError, HashResult};
use crate::hash::float::normalize_float;

// Tag alphabet, sorted alphabetically by value.
pub(crate) const BOOL_TAG: u8 = b'b';
pub(crate) const MAP_TAG: u8 = b'd';
pub(crate) const FLOAT_TAG: u8 = b'f';
pub(crate) const INT_TAG: u8 = b'i';
pub(crate) const LIST_TAG: u8 = b'l';
pub(crate) const NIL_TAG: u8 = b'n';
pub(crate) const BYTES_TAG: u8 = b'r';
pub(crate) const UNICODE_TAG: u8 = b'u';

/// The primitive hash function backing [`BasicHasher::hash`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasicHashFunction {
    /// 256-bit SHA-2, the default.
    #[default]
    Sha256,
    /// MD5. Cryptographically broken; retained for interoperability with
    /// existing digest stores.
    Md5,
    /// FNV-1a with a 128-bit state. Not cryptographic.
    Fnv1a128,
    /// XXHASH64 with seed 0. Not cryptographic.
    Xxhash64,
}

impl BasicHashFunction {
    /// Digest width in bytes.
    pub fn digest_len(&self) -> usize {
        match self {
            BasicHashFunction::Sha256 => 32,
            BasicHashFunction::Md5 => 16,
            BasicHashFunction::Fnv1a128 => 16,
            BasicHashFunction::Xxhash64 => 8,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            BasicHashFunction::Sha256 => "sha256",
            BasicHashFunction::Md5 => "md5",
            BasicHashFunction::Fnv1a128 => "fnv1a128",
            BasicHashFunction::Xxhash64 => "xxhash64",
        }
    }
}

impl fmt::Display for BasicHashFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BasicHashFunction {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha256" => Ok(BasicHashFunction::Sha256),
            "md5" => Ok(BasicHashFunction::Md5),
            "fnv1a128" => Ok(BasicHashFunction::Fnv1a128),
            "xxhash64" => Ok(BasicHashFunction::Xxhash64),
            other => Err(HashError::UnknownHashFunction(other.to_string())),
        }
    }
}

/// Stateless adapter feeding tagged payloads to the selected primitive.
///
/// Each call constructs a fresh accumulator, so one `BasicHasher` is freely
/// shareable across tree nodes and threads.
#[derive(Debug, Clone, Copy)]
pub struct BasicHasher {
    function: BasicHashFunction,
}

impl BasicHasher {
    pub fn new(function: BasicHashFunction) -> Self {
        Self { function }
    }

    /// The function this hasher feeds.
    pub fn function(&self) -> BasicHashFunction {
        self.function
    }

    /// Hash a single tag byte followed by `payload`.
    pub fn hash(&self, tag: u8, payload: &[u8]) -> Digest {
        match self.function {
            BasicHashFunction::Sha256 => {
                let mut h = Sha256::new();
                h.update([tag]);
                h.update(payload);
                Digest::new(h.finalize().to_vec())
            }
            BasicHashFunction::Md5 => {
                let mut h = Md5::new();
                h.update([tag]);
                h.update(payload);
                Digest::new(h.finalize().to_vec())
            }
            BasicHashFunction::Fnv1a128 => {
                let mut state = Fnv1a128::new();
                state.update(&[tag]);
                state.update(payload);
                Digest::new(state.finalize().to_vec())
            }
            BasicHashFunction::Xxhash64 => {
                let mut h = Xxh64::new(0);
                h.update(&[tag]);
                h.update(payload);
                Digest::new(h.digest().to_be_bytes().to_vec())
            }
        }
    }

    /// `b`-tagged hash of `"1"` or `"0"`.
    pub fn hash_bool(&self, value: bool) -> Digest {
        self.hash(BOOL_TAG, if value { b"1" } else { b"0" })
    }

    /// `i`-tagged hash of the shortest signed decimal rendering.
    pub fn hash_int64(&self, value: i64) -> Digest {
        self.hash(INT_TAG, value.to_string().as_bytes())
    }

    /// `i`-tagged hash of the decimal rendering. Signed and unsigned values
    /// share the integer namespace.
    pub fn hash_uint64(&self, value: u64) -> Digest {
        self.hash(INT_TAG, value.to_string().as_bytes())
    }

    /// `u`-tagged hash of the UTF-8 bytes as given. No Unicode
    /// normalization: canonically-equivalent strings in different forms
    /// hash differently.
    pub fn hash_unicode(&self, value: &str) -> Digest {
        self.hash(UNICODE_TAG, value.as_bytes())
    }

    /// `r`-tagged hash of raw bytes.
    pub fn hash_bytes(&self, value: &[u8]) -> Digest {
        self.hash(BYTES_TAG, value)
    }

    /// `n`-tagged hash of the empty payload.
    pub fn hash_nil(&self) -> Digest {
        self.hash(NIL_TAG, b"")
    }

    /// `f`-tagged hash of the canonical float text.
    pub fn hash_float(&self, value: f64) -> HashResult<Digest> {
        Ok(self.hash(FLOAT_TAG, normalize_float(value)?.as_bytes()))
    }
}

/// FNV-1a over a 128-bit state. No maintained crate ships the 128-bit
/// variant, so the fold lives here; `u128` arithmetic keeps it exact.
struct Fnv1a128 {
    state: u128,
}

impl Fnv1a128 {
    const OFFSET_BASIS: u128 = 0x6c62272e07bb014262b821756295c58d;
    const PRIME: u128 = 0x0000000001000000000000000000013b;

    fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }

    fn update(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= u128::from(b);
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }

    fn finalize(self) -> [u8; 16] {
        self.state.to_be_bytes()
    }
}
