//! Passphrase-to-key derivation.
//!
//! Every symmetric encryptor obtains its key material here. The salt is
//! generated per encode (surfaced through the cipher prelude so decode can
//! reconstruct the same derivation) and the cost tier exists so the test
//! suite does not pay production work factors.

use pbkdf2::pbkdf2_hmac;
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::CryptoError;

/// Salt length shared by all salted derivations.
pub const SALT_LEN: usize = 16;

const PBKDF2_ROUNDS: u32 = 100_000;
const PBKDF2_ROUNDS_REDUCED: u32 = 1;

/// scrypt N = 2^14, r = 8, p = 1 in production.
const SCRYPT_LOG_N: u8 = 14;
const SCRYPT_LOG_N_REDUCED: u8 = 8;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;

/// Which derivation function turns the passphrase into key bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfVariant {
    /// Identity passthrough: passphrase bytes, zero-padded or truncated to
    /// the requested length.
    None,
    /// PBKDF2-HMAC-SHA256.
    Pbkdf2,
    /// scrypt.
    Scrypt,
}

/// Work-factor tier. `Reduced` exists for tests only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KdfCost {
    #[default]
    Standard,
    Reduced,
}

/// A concrete derivation: variant, cost tier, and salt.
#[derive(Debug, Clone)]
pub struct KeyDerivation {
    variant: KdfVariant,
    cost: KdfCost,
    salt: [u8; SALT_LEN],
}

impl KeyDerivation {
    /// A derivation with a freshly generated random salt.
    pub fn new(variant: KdfVariant, cost: KdfCost) -> Self {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        KeyDerivation { variant, cost, salt }
    }

    /// A derivation over a caller-supplied salt, as recovered from a header
    /// prelude at decode time.
    pub fn with_salt(variant: KdfVariant, cost: KdfCost, salt: [u8; SALT_LEN]) -> Self {
        KeyDerivation { variant, cost, salt }
    }

    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    /// Derive `len` key bytes from `passphrase`.
    pub fn derive(
        &self,
        passphrase: &[u8],
        len: usize,
    ) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        let mut out = Zeroizing::new(vec![0u8; len]);
        match self.variant {
            KdfVariant::None => {
                let n = passphrase.len().min(len);
                out[..n].copy_from_slice(&passphrase[..n]);
            }
            KdfVariant::Pbkdf2 => {
                let rounds = match self.cost {
                    KdfCost::Standard => PBKDF2_ROUNDS,
                    KdfCost::Reduced => PBKDF2_ROUNDS_REDUCED,
                };
                pbkdf2_hmac::<Sha256>(passphrase, &self.salt, rounds, &mut out);
            }
            KdfVariant::Scrypt => {
                let log_n = match self.cost {
                    KdfCost::Standard => SCRYPT_LOG_N,
                    KdfCost::Reduced => SCRYPT_LOG_N_REDUCED,
                };
                let params = scrypt::Params::new(log_n, SCRYPT_R, SCRYPT_P, len)
                    .map_err(|_| CryptoError::KdfFailure)?;
                scrypt::scrypt(passphrase, &self.salt, &params, &mut out)
                    .map_err(|_| CryptoError::KdfFailure)?;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALT_HEX: &str = "40b13a71f90b966e375408f2d181a1aa";
    const OTHER_SALT_HEX: &str = "ef30f8e394432bbdeed15b0c496682e8";

    fn salt(hex_str: &str) -> [u8; SALT_LEN] {
        hex::decode(hex_str)
            .expect("valid hex")
            .try_into()
            .expect("16-byte salt")
    }

    #[test]
    fn none_variant_pads_and_truncates() {
        let kdf = KeyDerivation::with_salt(KdfVariant::None, KdfCost::Reduced, salt(SALT_HEX));
        let key = kdf.derive(b"abc", 6).expect("derive");
        assert_eq!(&key[..], b"abc\0\0\0");
        let key = kdf.derive(b"abcdef", 3).expect("derive");
        assert_eq!(&key[..], b"abc");
    }

    #[test]
    fn same_inputs_same_key() {
        for variant in [KdfVariant::Pbkdf2, KdfVariant::Scrypt] {
            let a = KeyDerivation::with_salt(variant, KdfCost::Reduced, salt(SALT_HEX));
            let b = KeyDerivation::with_salt(variant, KdfCost::Reduced, salt(SALT_HEX));
            assert_eq!(
                a.derive(b"pass", 32).expect("derive"),
                b.derive(b"pass", 32).expect("derive"),
            );
        }
    }

    #[test]
    fn salt_and_cost_change_the_key() {
        let base = KeyDerivation::with_salt(KdfVariant::Pbkdf2, KdfCost::Reduced, salt(SALT_HEX));
        let other_salt =
            KeyDerivation::with_salt(KdfVariant::Pbkdf2, KdfCost::Reduced, salt(OTHER_SALT_HEX));
        assert_ne!(
            base.derive(b"pass", 32).expect("derive"),
            other_salt.derive(b"pass", 32).expect("derive"),
        );
    }

    #[test]
    fn fresh_derivations_use_distinct_salts() {
        let a = KeyDerivation::new(KdfVariant::Pbkdf2, KdfCost::Reduced);
        let b = KeyDerivation::new(KdfVariant::Pbkdf2, KdfCost::Reduced);
        assert_ne!(a.salt(), b.salt());
    }
}
