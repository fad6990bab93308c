use sonomark_crypto::{
    for_decoding, for_encoding, CryptoError, EncVariant, KdfCost, KdfVariant, KeyMaterial,
    NONCE_LEN, SALT_LEN,
};

fn material(passphrase: &[u8], kdf: KdfVariant) -> KeyMaterial {
    KeyMaterial::passphrase(kdf, passphrase).with_cost(KdfCost::Reduced)
}

#[test]
fn symmetric_variants_round_trip_through_prelude() {
    let payload = b"ownership fingerprint #42";
    for variant in [EncVariant::Fernet, EncVariant::Aes] {
        for kdf in [KdfVariant::Pbkdf2, KdfVariant::Scrypt] {
            let secrets = material(b"correct horse", kdf);
            let enc = for_encoding(variant, &secrets).expect("encryptor");
            let ciphertext = enc.encrypt(payload).expect("encrypt");
            assert_ne!(&ciphertext[..], &payload[..]);

            let dec = for_decoding(variant, &enc.prelude(), &secrets).expect("decryptor");
            assert_eq!(dec.decrypt(&ciphertext).expect("decrypt"), payload);
        }
    }
}

#[test]
fn none_variant_is_identity_with_empty_prelude() {
    let enc = for_encoding(EncVariant::None, &KeyMaterial::none()).expect("encryptor");
    assert!(enc.prelude().is_empty());
    assert_eq!(enc.encrypt(b"plain").expect("encrypt"), b"plain");
    assert_eq!(enc.decrypt(b"plain").expect("decrypt"), b"plain");
}

#[test]
fn aes_prelude_is_nonce_then_salt() {
    let secrets = material(b"p", KdfVariant::Pbkdf2);
    let enc = for_encoding(EncVariant::Aes, &secrets).expect("encryptor");
    assert_eq!(enc.prelude().len(), NONCE_LEN + SALT_LEN);

    // Two fresh encryptors must not share nonce or salt.
    let other = for_encoding(EncVariant::Aes, &secrets).expect("encryptor");
    assert_ne!(enc.prelude(), other.prelude());
}

#[test]
fn wrong_passphrase_never_yields_plaintext() {
    let payload = b"do not leak";
    for variant in [EncVariant::Fernet, EncVariant::Aes] {
        let good = material(b"p1", KdfVariant::Pbkdf2);
        let enc = for_encoding(variant, &good).expect("encryptor");
        let ciphertext = enc.encrypt(payload).expect("encrypt");

        let bad = material(b"p2", KdfVariant::Pbkdf2);
        let dec = for_decoding(variant, &enc.prelude(), &bad).expect("decryptor");
        assert_eq!(
            dec.decrypt(&ciphertext),
            Err(CryptoError::AuthenticationFailed)
        );
    }
}

#[test]
fn kdf_variant_mismatch_fails_authentication() {
    let payload = b"salted";
    let enc_secrets = material(b"p1", KdfVariant::Pbkdf2);
    let enc = for_encoding(EncVariant::Aes, &enc_secrets).expect("encryptor");
    let ciphertext = enc.encrypt(payload).expect("encrypt");

    let dec_secrets = material(b"p1", KdfVariant::Scrypt);
    let dec = for_decoding(EncVariant::Aes, &enc.prelude(), &dec_secrets).expect("decryptor");
    assert_eq!(
        dec.decrypt(&ciphertext),
        Err(CryptoError::AuthenticationFailed)
    );
}
