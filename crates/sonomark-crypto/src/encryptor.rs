//! The closed set of payload encryptors and the key material that feeds them.
//!
//! The embedded header records which variant produced a payload as a one-byte
//! tag plus a variant-specific prelude (salt, nonce); [`for_decoding`]
//! rebuilds the matching instance from those two plus the caller's
//! [`KeyMaterial`]. The set is deliberately closed: dispatch is a `match` on
//! the tag, not a registry.

use zeroize::Zeroizing;

use crate::aes_ctr::{AesEncryptor, NONCE_LEN};
use crate::error::CryptoError;
use crate::fernet::FernetEncryptor;
use crate::kdf::{KdfCost, KdfVariant, KeyDerivation, SALT_LEN};
use crate::rsa_oaep::RsaEncryptor;

/// Wire tag of an encryption variant, as stored in the embedded header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncVariant {
    None,
    Fernet,
    Aes,
    Rsa,
}

impl EncVariant {
    pub fn tag(self) -> u8 {
        match self {
            EncVariant::None => 0,
            EncVariant::Fernet => 1,
            EncVariant::Aes => 2,
            EncVariant::Rsa => 3,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(EncVariant::None),
            1 => Some(EncVariant::Fernet),
            2 => Some(EncVariant::Aes),
            3 => Some(EncVariant::Rsa),
            _ => None,
        }
    }

    /// Length of the prelude this variant stores in the header.
    pub fn prelude_len(self) -> usize {
        match self {
            EncVariant::None | EncVariant::Rsa => 0,
            EncVariant::Fernet => SALT_LEN,
            EncVariant::Aes => NONCE_LEN + SALT_LEN,
        }
    }
}

/// Secrets supplied by the caller (in the original system, by the registry
/// collaborator). Which fields must be present depends on the variant in use.
pub struct KeyMaterial {
    kdf: KdfVariant,
    cost: KdfCost,
    passphrase: Option<Zeroizing<Vec<u8>>>,
    rsa_public_pem: Option<String>,
    rsa_private_pem: Option<String>,
}

impl KeyMaterial {
    /// No secrets; only valid with [`EncVariant::None`].
    pub fn none() -> Self {
        KeyMaterial {
            kdf: KdfVariant::None,
            cost: KdfCost::Standard,
            passphrase: None,
            rsa_public_pem: None,
            rsa_private_pem: None,
        }
    }

    /// A passphrase plus the KDF that stretches it.
    pub fn passphrase(kdf: KdfVariant, passphrase: &[u8]) -> Self {
        KeyMaterial {
            kdf,
            cost: KdfCost::Standard,
            passphrase: Some(Zeroizing::new(passphrase.to_vec())),
            rsa_public_pem: None,
            rsa_private_pem: None,
        }
    }

    /// Reduced KDF work factor, for tests.
    pub fn with_cost(mut self, cost: KdfCost) -> Self {
        self.cost = cost;
        self
    }

    /// SPKI public key PEM, enough for RSA encoding.
    pub fn with_rsa_public_pem(mut self, pem: impl Into<String>) -> Self {
        self.rsa_public_pem = Some(pem.into());
        self
    }

    /// Encrypted PKCS#8 private key PEM; the passphrase unlocks it.
    pub fn with_rsa_private_pem(mut self, pem: impl Into<String>) -> Self {
        self.rsa_private_pem = Some(pem.into());
        self
    }

    fn passphrase_bytes(&self) -> Result<&[u8], CryptoError> {
        self.passphrase
            .as_deref()
            .map(Vec::as_slice)
            .ok_or(CryptoError::MissingKeyMaterial("passphrase"))
    }
}

/// A payload encryptor, one of the closed variant set.
pub enum Encryptor {
    None,
    Fernet(FernetEncryptor),
    Aes(AesEncryptor),
    Rsa(RsaEncryptor),
}

impl Encryptor {
    pub fn variant(&self) -> EncVariant {
        match self {
            Encryptor::None => EncVariant::None,
            Encryptor::Fernet(_) => EncVariant::Fernet,
            Encryptor::Aes(_) => EncVariant::Aes,
            Encryptor::Rsa(_) => EncVariant::Rsa,
        }
    }

    /// Variant-specific material the header must carry so decode can rebuild
    /// this instance: nothing, a KDF salt, or nonce followed by salt.
    pub fn prelude(&self) -> Vec<u8> {
        match self {
            Encryptor::None | Encryptor::Rsa(_) => Vec::new(),
            Encryptor::Fernet(f) => f.salt().to_vec(),
            Encryptor::Aes(a) => {
                let mut out = Vec::with_capacity(NONCE_LEN + SALT_LEN);
                out.extend_from_slice(a.nonce());
                out.extend_from_slice(a.salt());
                out
            }
        }
    }

    pub fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        match self {
            Encryptor::None => Ok(data.to_vec()),
            Encryptor::Fernet(f) => f.encrypt(data),
            Encryptor::Aes(a) => a.encrypt(data),
            Encryptor::Rsa(r) => r.encrypt(data),
        }
    }

    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        match self {
            Encryptor::None => Ok(data.to_vec()),
            Encryptor::Fernet(f) => f.decrypt(data),
            Encryptor::Aes(a) => a.decrypt(data),
            Encryptor::Rsa(r) => r.decrypt(data),
        }
    }
}

/// Build an encryptor for a fresh encode: new salts and nonces throughout.
pub fn for_encoding(variant: EncVariant, material: &KeyMaterial) -> Result<Encryptor, CryptoError> {
    match variant {
        EncVariant::None => Ok(Encryptor::None),
        EncVariant::Fernet => {
            let kdf = KeyDerivation::new(material.kdf, material.cost);
            Ok(Encryptor::Fernet(FernetEncryptor::new(
                &kdf,
                material.passphrase_bytes()?,
            )?))
        }
        EncVariant::Aes => {
            let kdf = KeyDerivation::new(material.kdf, material.cost);
            Ok(Encryptor::Aes(AesEncryptor::new(
                &kdf,
                material.passphrase_bytes()?,
            )?))
        }
        EncVariant::Rsa => {
            if let Some(pem) = &material.rsa_public_pem {
                Ok(Encryptor::Rsa(RsaEncryptor::from_public_pem(pem)?))
            } else if let Some(pem) = &material.rsa_private_pem {
                Ok(Encryptor::Rsa(RsaEncryptor::from_private_pem(
                    pem,
                    material.passphrase_bytes()?,
                )?))
            } else {
                Err(CryptoError::MissingKeyMaterial("RSA key PEM"))
            }
        }
    }
}

/// Rebuild the encryptor a header describes, from its tag and prelude.
pub fn for_decoding(
    variant: EncVariant,
    prelude: &[u8],
    material: &KeyMaterial,
) -> Result<Encryptor, CryptoError> {
    match variant {
        EncVariant::None => {
            expect_prelude(prelude, 0)?;
            Ok(Encryptor::None)
        }
        EncVariant::Fernet => {
            let salt = expect_prelude(prelude, SALT_LEN)?;
            let kdf = KeyDerivation::with_salt(
                material.kdf,
                material.cost,
                salt[..SALT_LEN].try_into().map_err(|_| CryptoError::InvalidPrelude {
                    expected: SALT_LEN,
                    actual: prelude.len(),
                })?,
            );
            // The IV is inside each token, so decode-side instances never use
            // the one generated here.
            Ok(Encryptor::Fernet(FernetEncryptor::new(
                &kdf,
                material.passphrase_bytes()?,
            )?))
        }
        EncVariant::Aes => {
            let bytes = expect_prelude(prelude, NONCE_LEN + SALT_LEN)?;
            let err = CryptoError::InvalidPrelude {
                expected: NONCE_LEN + SALT_LEN,
                actual: prelude.len(),
            };
            let nonce: [u8; NONCE_LEN] =
                bytes[..NONCE_LEN].try_into().map_err(|_| err.clone())?;
            let salt: [u8; SALT_LEN] = bytes[NONCE_LEN..].try_into().map_err(|_| err)?;
            let kdf = KeyDerivation::with_salt(material.kdf, material.cost, salt);
            Ok(Encryptor::Aes(AesEncryptor::with_nonce(
                &kdf,
                material.passphrase_bytes()?,
                nonce,
            )?))
        }
        EncVariant::Rsa => {
            expect_prelude(prelude, 0)?;
            let pem = material
                .rsa_private_pem
                .as_deref()
                .ok_or(CryptoError::MissingKeyMaterial("RSA private key PEM"))?;
            Ok(Encryptor::Rsa(RsaEncryptor::from_private_pem(
                pem,
                material.passphrase_bytes()?,
            )?))
        }
    }
}

fn expect_prelude(prelude: &[u8], expected: usize) -> Result<&[u8], CryptoError> {
    if prelude.len() != expected {
        return Err(CryptoError::InvalidPrelude {
            expected,
            actual: prelude.len(),
        });
    }
    Ok(prelude)
}
