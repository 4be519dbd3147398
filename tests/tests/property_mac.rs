//! Property-based tests for HMAC

use opencrypto_algorithms::hash::{SecureHash, Sha256, Sha384, Sha512};
use opencrypto_algorithms::mac::Hmac;
use opencrypto_algorithms::types::KeyMaterial;
use proptest::prelude::*;

fn key_for<H: SecureHash>(seed: &[u8]) -> KeyMaterial {
    let purpose = H::MAC_PURPOSE;
    let bytes: Vec<u8> = seed.iter().copied().cycle().take(purpose.key_size()).collect();
    KeyMaterial::from_bytes(&bytes, purpose).unwrap()
}

fn check_verify_and_flips<H: SecureHash>(seed: &[u8], message: &[u8], bit: usize) -> Result<(), TestCaseError> {
    let key = key_for::<H>(seed);
    let tag = Hmac::<H>::mac(&key, message).unwrap();
    prop_assert!(Hmac::<H>::verify(&key, message, tag.as_ref()).unwrap());

    let mut bad_tag = tag.to_vec();
    let idx = bit % (bad_tag.len() * 8);
    bad_tag[idx / 8] ^= 1 << (idx % 8);
    prop_assert!(!Hmac::<H>::verify(&key, message, &bad_tag).unwrap());

    if !message.is_empty() {
        let mut bad_message = message.to_vec();
        let idx = bit % (bad_message.len() * 8);
        bad_message[idx / 8] ^= 1 << (idx % 8);
        prop_assert!(!Hmac::<H>::verify(&key, &bad_message, tag.as_ref()).unwrap());
    }
    Ok(())
}

proptest! {
    #[test]
    fn hmac_sha256_verify_and_flips(
        seed in prop::collection::vec(any::<u8>(), 1..16),
        message in prop::collection::vec(any::<u8>(), 0..256),
        bit in any::<usize>(),
    ) {
        check_verify_and_flips::<Sha256>(&seed, &message, bit)?;
    }

    #[test]
    fn hmac_sha384_verify_and_flips(
        seed in prop::collection::vec(any::<u8>(), 1..16),
        message in prop::collection::vec(any::<u8>(), 0..256),
        bit in any::<usize>(),
    ) {
        check_verify_and_flips::<Sha384>(&seed, &message, bit)?;
    }

    #[test]
    fn hmac_sha512_incremental_matches_one_shot(
        seed in prop::collection::vec(any::<u8>(), 1..16),
        message in prop::collection::vec(any::<u8>(), 0..400),
        split in any::<prop::sample::Index>(),
    ) {
        let key = key_for::<Sha512>(&seed);
        let at = split.index(message.len() + 1);

        let mut hmac = Hmac::<Sha512>::new(&key).unwrap();
        hmac.update(&message[..at]).unwrap().update(&message[at..]).unwrap();
        let incremental = hmac.finalize().unwrap();

        prop_assert_eq!(incremental, Hmac::<Sha512>::mac(&key, &message).unwrap());
    }

    #[test]
    fn hmac_rejects_truncated_tags(
        message in prop::collection::vec(any::<u8>(), 0..64),
        keep in 0usize..32,
    ) {
        let key = key_for::<Sha256>(b"truncation");
        let tag = Hmac::<Sha256>::mac(&key, &message).unwrap();
        prop_assert!(!Hmac::<Sha256>::verify(&key, &message, &tag.as_ref()[..keep]).unwrap());
    }
}
