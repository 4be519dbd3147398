//! Property-based tests for incremental hashing

use opencrypto_algorithms::hash::{HashFunction, Md5, Sha1, Sha224, Sha256, Sha384, Sha512};
use proptest::prelude::*;

/// A message and an arbitrary set of cut points into it
fn chunked_message() -> impl Strategy<Value = (Vec<u8>, Vec<usize>)> {
    prop::collection::vec(any::<u8>(), 0..600).prop_flat_map(|data| {
        let len = data.len();
        (Just(data), prop::collection::vec(0..=len, 0..8))
    })
}

fn digest_in_chunks<H: HashFunction>(data: &[u8], cuts: &[usize]) -> Vec<u8> {
    let mut cuts = cuts.to_vec();
    cuts.sort_unstable();

    let mut hasher = H::new();
    let mut start = 0;
    for cut in cuts {
        hasher.update(&data[start..cut]).unwrap();
        start = cut;
    }
    hasher.update(&data[start..]).unwrap();
    hasher.finalize().unwrap().as_ref().to_vec()
}

fn one_shot<H: HashFunction>(data: &[u8]) -> Vec<u8> {
    H::digest(data).unwrap().as_ref().to_vec()
}

proptest! {
    #[test]
    fn sha2_chunking_invariance((data, cuts) in chunked_message()) {
        prop_assert_eq!(digest_in_chunks::<Sha224>(&data, &cuts), one_shot::<Sha224>(&data));
        prop_assert_eq!(digest_in_chunks::<Sha256>(&data, &cuts), one_shot::<Sha256>(&data));
        prop_assert_eq!(digest_in_chunks::<Sha384>(&data, &cuts), one_shot::<Sha384>(&data));
        prop_assert_eq!(digest_in_chunks::<Sha512>(&data, &cuts), one_shot::<Sha512>(&data));
    }

    #[test]
    fn legacy_chunking_invariance((data, cuts) in chunked_message()) {
        prop_assert_eq!(digest_in_chunks::<Md5>(&data, &cuts), one_shot::<Md5>(&data));
        prop_assert_eq!(digest_in_chunks::<Sha1>(&data, &cuts), one_shot::<Sha1>(&data));
    }

    #[test]
    fn digest_length_is_fixed(data in prop::collection::vec(any::<u8>(), 0..300)) {
        prop_assert_eq!(one_shot::<Sha256>(&data).len(), 32);
        prop_assert_eq!(one_shot::<Sha512>(&data).len(), 64);
        prop_assert_eq!(one_shot::<Md5>(&data).len(), 16);
    }
}
