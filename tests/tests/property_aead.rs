//! Property-based tests for the AEAD constructions

use opencrypto_algorithms::aead::{
    open, seal, AeadAlgorithm, AeadNonce, AeadTag, Aes128Gcm, Aes256Gcm, ChaCha20Poly1305,
};
use opencrypto_algorithms::types::KeyMaterial;
use opencrypto_api::ErrorKind;
use proptest::prelude::*;

fn key_for<A: AeadAlgorithm>(bytes: &[u8; 32]) -> KeyMaterial {
    KeyMaterial::from_bytes(&bytes[..A::KEY_SIZE], A::PURPOSE).unwrap()
}

fn roundtrip<A: AeadAlgorithm>(
    key: &[u8; 32],
    nonce: [u8; 12],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<(), TestCaseError> {
    let key = key_for::<A>(key);
    let nonce = AeadNonce::new(nonce);
    let sealed = seal::<A>(&key, &nonce, plaintext, aad).unwrap();
    prop_assert_eq!(sealed.ciphertext().len(), plaintext.len());

    let opened = open::<A>(&key, &nonce, sealed.ciphertext(), sealed.tag(), aad).unwrap();
    prop_assert_eq!(&opened[..], plaintext);
    Ok(())
}

/// Which input a tamper test alters
#[derive(Debug, Clone, Copy)]
enum Target {
    Ciphertext,
    Tag,
    Aad,
}

fn tampered_open_fails<A: AeadAlgorithm>(
    key: &[u8; 32],
    nonce: [u8; 12],
    plaintext: &[u8],
    aad: &[u8],
    target: Target,
    position: prop::sample::Index,
    flip: u8,
) -> Result<(), TestCaseError> {
    let key = key_for::<A>(key);
    let nonce = AeadNonce::new(nonce);
    let sealed = seal::<A>(&key, &nonce, plaintext, aad).unwrap();

    let mut ciphertext = sealed.ciphertext().to_vec();
    let mut tag = **sealed.tag();
    let mut aad = aad.to_vec();

    let buffer: &mut [u8] = match target {
        Target::Ciphertext => &mut ciphertext,
        Target::Tag => &mut tag,
        Target::Aad => &mut aad,
    };
    if buffer.is_empty() {
        return Ok(());
    }
    let i = position.index(buffer.len());
    buffer[i] ^= flip;

    let err = open::<A>(&key, &nonce, &ciphertext, &AeadTag::new(tag), &aad).unwrap_err();
    prop_assert_eq!(err.kind(), ErrorKind::AuthenticationFailed);

    // The in-place primitive must not leave plaintext behind
    let mut working = ciphertext.clone();
    prop_assert!(A::open_in_place(&key, &nonce, &aad, &mut working, &AeadTag::new(tag)).is_err());
    prop_assert!(working.iter().all(|&b| b == 0));
    Ok(())
}

fn target() -> impl Strategy<Value = Target> {
    prop_oneof![Just(Target::Ciphertext), Just(Target::Tag), Just(Target::Aad)]
}

proptest! {
    #[test]
    fn aead_roundtrip(
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 12]>(),
        plaintext in prop::collection::vec(any::<u8>(), 0..300),
        aad in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        roundtrip::<Aes128Gcm>(&key, nonce, &plaintext, &aad)?;
        roundtrip::<Aes256Gcm>(&key, nonce, &plaintext, &aad)?;
        roundtrip::<ChaCha20Poly1305>(&key, nonce, &plaintext, &aad)?;
    }

    #[test]
    fn aead_single_byte_tamper_fails(
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 12]>(),
        plaintext in prop::collection::vec(any::<u8>(), 1..200),
        aad in prop::collection::vec(any::<u8>(), 1..32),
        target in target(),
        position in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        tampered_open_fails::<Aes128Gcm>(&key, nonce, &plaintext, &aad, target, position, flip)?;
        tampered_open_fails::<Aes256Gcm>(&key, nonce, &plaintext, &aad, target, position, flip)?;
        tampered_open_fails::<ChaCha20Poly1305>(&key, nonce, &plaintext, &aad, target, position, flip)?;
    }

    #[test]
    fn aead_nonce_change_fails(
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 12]>(),
        plaintext in prop::collection::vec(any::<u8>(), 0..64),
        position in 0usize..12,
    ) {
        let key = key_for::<ChaCha20Poly1305>(&key);
        let sealed = seal::<ChaCha20Poly1305>(&key, &AeadNonce::new(nonce), &plaintext, b"").unwrap();

        let mut other = nonce;
        other[position] ^= 0x80;
        let err = open::<ChaCha20Poly1305>(&key, &AeadNonce::new(other), sealed.ciphertext(), sealed.tag(), b"")
            .unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::AuthenticationFailed);
    }
}
