//! AES-256-CTR with encrypt-then-MAC authentication.
//!
//! CTR mode alone would decrypt under any key and hand back noise, so the
//! ciphertext carries an HMAC-SHA256 tag over nonce and ciphertext. 64 bytes
//! of key material are derived per encode: the first 32 key the cipher, the
//! last 32 key the MAC. The prelude carries nonce then KDF salt.

use ctr::cipher::{KeyIvInit, StreamCipher};
use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::kdf::{KeyDerivation, SALT_LEN};

type Aes256Ctr = ctr::Ctr128BE<aes::Aes256>;
type HmacSha256 = Hmac<Sha256>;

pub const NONCE_LEN: usize = 16;
const TAG_LEN: usize = 32;

pub struct AesEncryptor {
    cipher_key: Zeroizing<[u8; 32]>,
    mac_key: Zeroizing<[u8; 32]>,
    nonce: [u8; NONCE_LEN],
    salt: [u8; SALT_LEN],
}

impl AesEncryptor {
    /// Build from a passphrase and derivation, with a fresh random nonce.
    pub fn new(kdf: &KeyDerivation, passphrase: &[u8]) -> Result<Self, CryptoError> {
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);
        Self::with_nonce(kdf, passphrase, nonce)
    }

    /// Build with a caller-chosen nonce, as recovered from a header prelude.
    pub fn with_nonce(
        kdf: &KeyDerivation,
        passphrase: &[u8],
        nonce: [u8; NONCE_LEN],
    ) -> Result<Self, CryptoError> {
        let key = kdf.derive(passphrase, 64)?;
        let mut cipher_key = Zeroizing::new([0u8; 32]);
        let mut mac_key = Zeroizing::new([0u8; 32]);
        cipher_key.copy_from_slice(&key[..32]);
        mac_key.copy_from_slice(&key[32..]);
        Ok(AesEncryptor {
            cipher_key,
            mac_key,
            nonce,
            salt: *kdf.salt(),
        })
    }

    pub fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }

    /// The KDF salt, carried in the header prelude after the nonce.
    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    pub fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut out = data.to_vec();
        self.apply_keystream(&mut out)?;
        let tag = self.tag(&out)?;
        out.extend_from_slice(&tag);
        Ok(out)
    }

    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if data.len() < TAG_LEN {
            return Err(CryptoError::AuthenticationFailed);
        }
        let (ciphertext, tag) = data.split_at(data.len() - TAG_LEN);
        let expected = self.tag(ciphertext)?;
        if expected.ct_eq(tag).unwrap_u8() != 1 {
            return Err(CryptoError::AuthenticationFailed);
        }
        let mut out = ciphertext.to_vec();
        self.apply_keystream(&mut out)?;
        Ok(out)
    }

    fn apply_keystream(&self, buf: &mut [u8]) -> Result<(), CryptoError> {
        let mut cipher = Aes256Ctr::new_from_slices(&*self.cipher_key, &self.nonce)
            .map_err(|_| CryptoError::InvalidKey)?;
        cipher.apply_keystream(buf);
        Ok(())
    }

    fn tag(&self, ciphertext: &[u8]) -> Result<[u8; TAG_LEN], CryptoError> {
        let mut mac =
            HmacSha256::new_from_slice(&*self.mac_key).map_err(|_| CryptoError::KdfFailure)?;
        mac.update(&self.nonce);
        mac.update(ciphertext);
        Ok(mac.finalize().into_bytes().into())
    }
}
