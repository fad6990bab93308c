//! RSA-OAEP asymmetric encryption.
//!
//! OAEP and MGF1 both use SHA-256. Keys are 2048-bit; each ciphertext block
//! is `key size` bytes (256) and carries at most `key size − 66` plaintext
//! bytes (190), so longer payloads are split into blocks encrypted
//! independently. The public key travels as an SPKI PEM and the private key
//! as a passphrase-encrypted PKCS#8 PEM; persistence of either is the
//! caller's business.

use rand::rngs::OsRng;
use rsa::pkcs8::{
    DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding,
};
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use crate::error::CryptoError;

pub const RSA_BITS: usize = 2048;

/// OAEP overhead per block: two SHA-256 digests plus two bytes.
const OAEP_OVERHEAD: usize = 2 * 32 + 2;

/// A freshly generated key pair, ready for the caller to persist.
pub struct RsaKeyPair {
    /// SPKI public key PEM.
    pub public_pem: String,
    /// PKCS#8 private key PEM, encrypted under the supplied passphrase.
    pub private_pem: String,
}

/// Generate a 2048-bit key pair, the private half encrypted under
/// `passphrase`.
pub fn generate_keypair(passphrase: &[u8]) -> Result<RsaKeyPair, CryptoError> {
    let private = RsaPrivateKey::new(&mut OsRng, RSA_BITS).map_err(|_| CryptoError::InvalidKey)?;
    let public = RsaPublicKey::from(&private);

    let public_pem = public
        .to_public_key_pem(LineEnding::LF)
        .map_err(|_| CryptoError::InvalidKey)?;
    let private_pem = private
        .to_pkcs8_encrypted_pem(&mut OsRng, passphrase, LineEnding::LF)
        .map_err(|_| CryptoError::InvalidKey)?;

    Ok(RsaKeyPair {
        public_pem,
        private_pem: private_pem.to_string(),
    })
}

pub struct RsaEncryptor {
    public_key: RsaPublicKey,
    private_key: Option<RsaPrivateKey>,
}

impl RsaEncryptor {
    /// Encrypt-only instance from an SPKI public key PEM.
    pub fn from_public_pem(pem: &str) -> Result<Self, CryptoError> {
        let public_key =
            RsaPublicKey::from_public_key_pem(pem).map_err(|_| CryptoError::InvalidKey)?;
        Ok(RsaEncryptor {
            public_key,
            private_key: None,
        })
    }

    /// Full instance from an encrypted PKCS#8 private key PEM.
    ///
    /// Fails with [`CryptoError::InvalidKey`] when the passphrase does not
    /// decrypt the key.
    pub fn from_private_pem(pem: &str, passphrase: &[u8]) -> Result<Self, CryptoError> {
        let private_key = RsaPrivateKey::from_pkcs8_encrypted_pem(pem, passphrase)
            .map_err(|_| CryptoError::InvalidKey)?;
        let public_key = RsaPublicKey::from(&private_key);
        Ok(RsaEncryptor {
            public_key,
            private_key: Some(private_key),
        })
    }

    fn block_len(&self) -> usize {
        use rsa::traits::PublicKeyParts;
        self.public_key.size()
    }

    pub fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let chunk_len = self.block_len() - OAEP_OVERHEAD;
        let mut out = Vec::with_capacity(data.len().div_ceil(chunk_len) * self.block_len());
        for chunk in data.chunks(chunk_len) {
            let block = self
                .public_key
                .encrypt(&mut OsRng, Oaep::new::<Sha256>(), chunk)
                .map_err(|_| CryptoError::InvalidKey)?;
            out.extend_from_slice(&block);
        }
        Ok(out)
    }

    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let private_key = self
            .private_key
            .as_ref()
            .ok_or(CryptoError::MissingKeyMaterial("RSA private key"))?;
        let block_len = self.block_len();
        if data.len() % block_len != 0 {
            return Err(CryptoError::AuthenticationFailed);
        }
        let mut out = Vec::new();
        for block in data.chunks(block_len) {
            let plain = private_key
                .decrypt(Oaep::new::<Sha256>(), block)
                .map_err(|_| CryptoError::AuthenticationFailed)?;
            out.extend_from_slice(&plain);
        }
        Ok(out)
    }
}
