//! Deterministic randomness derived from a user secret.
//!
//! [`KeyedRandom`] adapts a cipher-engine keystream to the
//! [`RandomSource`] interface. The keystream itself sits behind the
//! [`Keystream`] trait so a full cipher engine can be plugged in; the
//! crate ships [`SecretKeystream`], which seeds an MT19937-64 state from
//! the secret bytes. For a fixed secret and a fixed sequence of primitive
//! calls the generated machine is byte-identical across runs. That
//! determinism is the point: a passphrase reproduces a proforma machine.

use crate::error::ProformaError;
use crate::random::mt64::Mt19937_64;
use crate::random::RandomSource;

/// A deterministic stream of keying material.
///
/// This is the seam to the external cipher engine: anything able to emit
/// a reproducible byte stream can drive machine generation.
pub trait Keystream {
    /// Fills `buf` with the next bytes of the stream.
    ///
    /// # Errors
    /// Returns [`ProformaError::Entropy`] if the stream cannot produce
    /// more bytes.
    fn next_block(&mut self, buf: &mut [u8]) -> Result<(), ProformaError>;
}

/// Keystream seeded from a user secret.
///
/// The secret bytes are packed into big-endian 64-bit words and fed to
/// the MT19937-64 array-seeding routine, so every byte of the secret
/// contributes to the initial state.
#[derive(Debug)]
pub struct SecretKeystream {
    rng: Mt19937_64,
}

impl SecretKeystream {
    /// Creates a keystream from the given secret.
    ///
    /// # Errors
    /// Returns [`ProformaError::MissingSecret`] if `secret` is empty.
    pub fn from_secret(secret: &[u8]) -> Result<Self, ProformaError> {
        if secret.is_empty() {
            return Err(ProformaError::MissingSecret);
        }
        let mut key = Vec::with_capacity(secret.len().div_ceil(8));
        for chunk in secret.chunks(8) {
            let mut word = [0u8; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            key.push(u64::from_be_bytes(word));
        }
        Ok(SecretKeystream {
            rng: Mt19937_64::from_key(&key),
        })
    }
}

impl Keystream for SecretKeystream {
    fn next_block(&mut self, buf: &mut [u8]) -> Result<(), ProformaError> {
        self.rng.fill(buf);
        Ok(())
    }
}

/// [`RandomSource`] reading a deterministic keystream.
#[derive(Debug)]
pub struct KeyedRandom<K: Keystream> {
    stream: K,
}

impl<K: Keystream> KeyedRandom<K> {
    /// Wraps an already-initialized keystream.
    pub fn new(stream: K) -> Self {
        KeyedRandom { stream }
    }
}

impl KeyedRandom<SecretKeystream> {
    /// Creates a keyed source directly from a user secret.
    ///
    /// # Errors
    /// Returns [`ProformaError::MissingSecret`] if `secret` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use proforma::random::{KeyedRandom, RandomSource};
    ///
    /// let mut source = KeyedRandom::from_secret(b"my passphrase").unwrap();
    /// let draw = source.bounded_int(100).unwrap();
    /// assert!(draw < 100);
    /// ```
    pub fn from_secret(secret: &[u8]) -> Result<Self, ProformaError> {
        Ok(KeyedRandom::new(SecretKeystream::from_secret(secret)?))
    }
}

impl<K: Keystream> RandomSource for KeyedRandom<K> {
    fn fill_bytes(&mut self, buf: &mut [u8]) -> Result<(), ProformaError> {
        self.stream.next_block(buf)
    }
}
