//! End-to-end tests across the workspace crates

use opencrypto::prelude::*;
use opencrypto_algorithms::hash::{LegacyDigestAlgorithm, Md5};
use opencrypto_algorithms::types::ExportedKey;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn test_key_length_checked_at_construction() {
    let err = KeyMaterial::from_bytes(&[0u8; 16], KeyPurpose::Aes256Gcm).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidKeyLength);

    let key = KeyMaterial::from_bytes(&[0u8; 32], KeyPurpose::Aes256Gcm).unwrap();
    assert_eq!(key.len(), 32);
}

#[test]
fn test_finalize_twice_fails_everywhere() {
    let mut digest = DigestState::new(DigestAlgorithm::Sha512);
    digest.update(b"data").unwrap();
    digest.finalize().unwrap();
    assert_eq!(digest.finalize().unwrap_err().kind(), ErrorKind::InvalidState);

    let mut legacy = DigestState::new_legacy(LegacyDigestAlgorithm::Sha1);
    legacy.finalize().unwrap();
    assert_eq!(legacy.finalize().unwrap_err().kind(), ErrorKind::InvalidState);

    let key = KeyMaterial::from_random(RandomSource::global(), KeyPurpose::HmacSha256).unwrap();
    let mut mac = MacState::new(&key, MacAlgorithm::HmacSha256).unwrap();
    mac.update(b"data").unwrap();
    mac.finalize().unwrap();
    assert_eq!(mac.finalize().unwrap_err().kind(), ErrorKind::InvalidState);
}

#[test]
fn test_hash_output_is_not_a_key() {
    // A digest must go through from_bytes, with an explicit purpose, to be
    // used as a key; the wrong purpose is refused at use.
    let digest = Sha256::digest(b"not a key").unwrap();
    let key = KeyMaterial::from_bytes(digest.as_ref(), KeyPurpose::ChaCha20Poly1305).unwrap();
    let err = Hmac::<Sha256>::new(&key).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyWrongAlgorithm);
}

#[test]
fn test_legacy_digest_standalone() {
    assert_eq!(
        hex::encode(Md5::digest(b"abc").unwrap().as_ref()),
        "900150983cd24fb0d6963f7d28e17f72"
    );
}

#[test]
fn test_hkdf_to_session() {
    // Shared secret handed over by a key exchange
    let shared_secret = [0x5cu8; 32];
    let key = Hkdf::<Sha256>::derive_key(
        Some(b"handshake salt".as_slice()),
        &shared_secret,
        b"client write key",
        KeyPurpose::Aes256Gcm,
    )
    .unwrap();
    let peer_key = Hkdf::<Sha256>::derive_key(
        Some(b"handshake salt".as_slice()),
        &shared_secret,
        b"client write key",
        KeyPurpose::Aes256Gcm,
    )
    .unwrap();
    assert!(key.ct_eq(&peer_key));

    let mut sender = AeadSession::<Aes256Gcm>::new(key).unwrap();
    let receiver = AeadSession::<Aes256Gcm>::new(peer_key).unwrap();

    for i in 0..10u8 {
        let message = vec![i; i as usize * 7];
        let package = sender.seal(&message, b"record").unwrap();
        let wire = package.to_string();

        let received: CiphertextPackage = wire.parse().unwrap();
        assert_eq!(&receiver.open(&received, b"record").unwrap()[..], &message[..]);
    }
    assert_eq!(sender.messages_sealed(), 10);
}

#[test]
fn test_export_import_for_storage() {
    let mut rng = ChaCha20Rng::seed_from_u64(11);
    let key = KeyMaterial::from_rng(&mut rng, KeyPurpose::ChaCha20Poly1305).unwrap();
    let nonce = opencrypto_algorithms::aead::generate_nonce_with(&mut rng).unwrap();
    let sealed = seal::<ChaCha20Poly1305>(&key, &nonce, b"persisted", b"").unwrap();

    let stored = key.export_for_storage().to_hex();
    let restored = KeyMaterial::import_from_storage(
        ExportedKey::from_hex(KeyPurpose::ChaCha20Poly1305, &stored).unwrap(),
    )
    .unwrap();

    let opened =
        open::<ChaCha20Poly1305>(&restored, &nonce, sealed.ciphertext(), sealed.tag(), b"").unwrap();
    assert_eq!(&opened[..], b"persisted");
}

#[test]
fn test_authentication_failure_is_undifferentiated() {
    let key = KeyMaterial::from_random(RandomSource::global(), KeyPurpose::Aes128Gcm).unwrap();
    let nonce = generate_nonce(RandomSource::global()).unwrap();
    let sealed = seal::<Aes128Gcm>(&key, &nonce, b"message", b"aad").unwrap();

    let mut ct = sealed.ciphertext().to_vec();
    ct[0] ^= 1;
    let bad_ct = open::<Aes128Gcm>(&key, &nonce, &ct, sealed.tag(), b"aad").unwrap_err();

    let mut tag = **sealed.tag();
    tag[0] ^= 1;
    let bad_tag =
        open::<Aes128Gcm>(&key, &nonce, sealed.ciphertext(), &AeadTag::new(tag), b"aad").unwrap_err();

    let bad_aad = open::<Aes128Gcm>(&key, &nonce, sealed.ciphertext(), sealed.tag(), b"AAD").unwrap_err();

    assert_eq!(bad_ct.to_string(), bad_tag.to_string());
    assert_eq!(bad_tag.to_string(), bad_aad.to_string());
    assert_eq!(bad_ct.kind(), ErrorKind::AuthenticationFailed);
}

#[test]
fn test_cipher_and_session_interoperate() {
    let key = KeyMaterial::from_random(RandomSource::global(), KeyPurpose::ChaCha20Poly1305).unwrap();
    let cipher = AeadCipher::<ChaCha20Poly1305>::new(key.duplicate()).unwrap();
    let mut session = AeadSession::<ChaCha20Poly1305>::new(key).unwrap();

    let from_session = session.seal(b"one", b"").unwrap();
    assert_eq!(&cipher.decrypt_package(&from_session, None).unwrap()[..], b"one");

    let from_cipher = cipher.encrypt_to_package(b"two", None).unwrap();
    assert_eq!(&session.open(&from_cipher, b"").unwrap()[..], b"two");
}

#[test]
fn test_errors_do_not_leak_secrets() {
    let key = KeyMaterial::from_bytes(&[0xaa; 32], KeyPurpose::HmacSha256).unwrap();
    assert!(!format!("{:?}", key).contains("aa"));

    let err = MacState::new(&key, MacAlgorithm::HmacSha512).unwrap_err();
    let rendered = format!("{} {:?}", err, err);
    assert!(!rendered.contains("aaaa"));
    assert!(!rendered.contains("170"));
}
