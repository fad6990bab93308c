//! Fernet-style authenticated symmetric encryption.
//!
//! Tokens follow the Fernet layout: version byte 0x80, a big-endian timestamp,
//! a 16-byte IV, AES-128-CBC/PKCS7 ciphertext, and an HMAC-SHA256 tag over
//! everything before it, the whole token URL-safe base64 encoded. The 32 bytes
//! of derived key material split into a 16-byte signing key and a 16-byte
//! encryption key, in that order. The timestamp is fixed at zero: TTL checking
//! is not part of the contract, and a wall-clock stamp would make encoding
//! non-deterministic.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::Aes128;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::kdf::{KeyDerivation, SALT_LEN};

type HmacSha256 = Hmac<Sha256>;
type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

const VERSION: u8 = 0x80;
const TIMESTAMP: u64 = 0;
const IV_LEN: usize = 16;
const TAG_LEN: usize = 32;
/// version + timestamp + IV + at least one cipher block + tag.
const MIN_TOKEN_LEN: usize = 1 + 8 + IV_LEN + 16 + TAG_LEN;

pub struct FernetEncryptor {
    signing_key: Zeroizing<[u8; 16]>,
    encryption_key: Zeroizing<[u8; 16]>,
    iv: [u8; IV_LEN],
    salt: [u8; SALT_LEN],
}

impl FernetEncryptor {
    /// Build from a passphrase and derivation, with a fresh random IV.
    pub fn new(kdf: &KeyDerivation, passphrase: &[u8]) -> Result<Self, CryptoError> {
        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut iv);
        Self::with_iv(kdf, passphrase, iv)
    }

    /// Build with a caller-chosen IV. Tests use this for determinism.
    pub fn with_iv(
        kdf: &KeyDerivation,
        passphrase: &[u8],
        iv: [u8; IV_LEN],
    ) -> Result<Self, CryptoError> {
        let key = kdf.derive(passphrase, 32)?;
        let mut signing_key = Zeroizing::new([0u8; 16]);
        let mut encryption_key = Zeroizing::new([0u8; 16]);
        signing_key.copy_from_slice(&key[..16]);
        encryption_key.copy_from_slice(&key[16..]);
        Ok(FernetEncryptor {
            signing_key,
            encryption_key,
            iv,
            salt: *kdf.salt(),
        })
    }

    /// The KDF salt, carried in the header prelude.
    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    pub fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let cipher = Aes128CbcEnc::new((&*self.encryption_key).into(), (&self.iv).into());
        let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(data);

        let mut token = Vec::with_capacity(MIN_TOKEN_LEN + ciphertext.len());
        token.push(VERSION);
        token.extend_from_slice(&TIMESTAMP.to_be_bytes());
        token.extend_from_slice(&self.iv);
        token.extend_from_slice(&ciphertext);

        let mut mac = HmacSha256::new_from_slice(&*self.signing_key)
            .map_err(|_| CryptoError::KdfFailure)?;
        mac.update(&token);
        token.extend_from_slice(&mac.finalize().into_bytes());

        Ok(URL_SAFE.encode(&token).into_bytes())
    }

    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let token = URL_SAFE
            .decode(data)
            .map_err(|_| CryptoError::AuthenticationFailed)?;
        if token.len() < MIN_TOKEN_LEN || token[0] != VERSION {
            return Err(CryptoError::AuthenticationFailed);
        }

        let (signed, tag) = token.split_at(token.len() - TAG_LEN);
        let mut mac = HmacSha256::new_from_slice(&*self.signing_key)
            .map_err(|_| CryptoError::KdfFailure)?;
        mac.update(signed);
        let expected = mac.finalize().into_bytes();
        if expected.ct_eq(tag).unwrap_u8() != 1 {
            return Err(CryptoError::AuthenticationFailed);
        }

        let iv: [u8; IV_LEN] = signed[9..9 + IV_LEN]
            .try_into()
            .map_err(|_| CryptoError::AuthenticationFailed)?;
        let cipher = Aes128CbcDec::new((&*self.encryption_key).into(), (&iv).into());
        cipher
            .decrypt_padded_vec_mut::<Pkcs7>(&signed[9 + IV_LEN..])
            .map_err(|_| CryptoError::AuthenticationFailed)
    }
}
