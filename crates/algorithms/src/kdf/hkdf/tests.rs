use super::*;
use crate::error::ErrorKind;
use crate::hash::{Sha224, Sha256, Sha384, Sha512};
use hex;

struct Rfc5869Case1 {
    ikm: Vec<u8>,
    salt: Vec<u8>,
    info: Vec<u8>,
}

fn case1() -> Rfc5869Case1 {
    Rfc5869Case1 {
        ikm: vec![0x0b; 22],
        salt: (0x00..=0x0c).collect(),
        info: (0xf0..=0xf9).collect(),
    }
}

/// RFC 5869 Test Case 1
#[test]
fn test_hkdf_sha256_rfc5869_1() {
    let c = case1();
    let prk = Hkdf::<Sha256>::extract(Some(&c.salt), &c.ikm).unwrap();
    assert_eq!(
        hex::encode(&prk[..]),
        "077709362c2e32df0ddc3f0dc47bba6390b6c73bb50f9c3122ec844ad7c2b3e5"
    );

    let okm = Hkdf::<Sha256>::expand(&prk, Some(&c.info), 42).unwrap();
    let expected = "3cb25f25faacd57a90434f64d0362f2a2d2d0a90cf1a5a4c5db02d56ecc4c5bf34007208d5b887185865";
    assert_eq!(hex::encode(&okm[..]), expected);

    let okm = Hkdf::<Sha256>::derive(Some(&c.salt), &c.ikm, Some(&c.info), 42).unwrap();
    assert_eq!(hex::encode(&okm[..]), expected);
}

/// RFC 5869 Test Case 2: longer inputs, three output blocks
#[test]
fn test_hkdf_sha256_rfc5869_2() {
    let ikm: Vec<u8> = (0x00..=0x4f).collect();
    let salt: Vec<u8> = (0x60..=0xaf).collect();
    let info: Vec<u8> = (0xb0..=0xff).collect();

    let prk = Hkdf::<Sha256>::extract(Some(&salt), &ikm).unwrap();
    assert_eq!(
        hex::encode(&prk[..]),
        "06a6b88c5853361a06104c9ceb35b45cef760014904671014a193f40c15fc244"
    );

    let okm = Hkdf::<Sha256>::expand(&prk, Some(&info), 82).unwrap();
    assert_eq!(
        hex::encode(&okm[..]),
        "b11e398dc80327a1c8e7f78c596a49344f012eda2d4efad8a050cc4c19afa97c59045a99cac7827271cb41c65e590e09da3275600c2f09b8367793a9aca3db71cc30c58179ec3e87c14c01d5c1f3434f1d87"
    );
}

/// RFC 5869 Test Case 3: empty salt and info
#[test]
fn test_hkdf_sha256_rfc5869_3() {
    let ikm = vec![0x0b; 22];
    let expected_prk = "19ef24a32c717b167f33a91d6f648bdf96596776afdb6377ac434c1c293ccb04";
    let expected_okm = "8da4e775a563c18f715f802a063c5a31b8a11f5c5ee1879ec3454e5f3c738d2d9d201395faa4b61a96c8";

    let prk = Hkdf::<Sha256>::extract(Some(&[][..]), &ikm).unwrap();
    assert_eq!(hex::encode(&prk[..]), expected_prk);
    let okm = Hkdf::<Sha256>::expand(&prk, None, 42).unwrap();
    assert_eq!(hex::encode(&okm[..]), expected_okm);

    // An absent salt behaves like a zero-filled one
    let prk = Hkdf::<Sha256>::extract(None, &ikm).unwrap();
    assert_eq!(hex::encode(&prk[..]), expected_prk);
}

#[test]
fn test_hkdf_other_digests() {
    let c = case1();

    let okm = Hkdf::<Sha224>::derive(Some(&c.salt), &c.ikm, Some(&c.info), 28).unwrap();
    assert_eq!(
        hex::encode(&okm[..]),
        "2f21cd7cbc818ca5c561b933728e2e08e154a87e1432399a820dee13"
    );

    let prk = Hkdf::<Sha384>::extract(Some(&c.salt), &c.ikm).unwrap();
    assert_eq!(
        hex::encode(&prk[..]),
        "704b39990779ce1dc548052c7dc39f303570dd13fb39f7acc564680bef80e8dec70ee9a7e1f3e293ef68eceb072a5ade"
    );
    let okm = Hkdf::<Sha384>::expand(&prk, Some(&c.info), 48).unwrap();
    assert_eq!(
        hex::encode(&okm[..]),
        "9b5097a86038b805309076a44b3a9f38063e25b516dcbf369f394cfab43685f748b6457763e4f0204fc5d95d1da3e625"
    );

    let okm = Hkdf::<Sha512>::derive(Some(&c.salt), &c.ikm, Some(&c.info), 42).unwrap();
    assert_eq!(
        hex::encode(&okm[..]),
        "832390086cda71fb47625bb5ceb168e4c8e26a1a16ed34d9fc7fe92c1481579338da362cb8d9f925d7cb"
    );
}

#[test]
fn test_expand_output_limit() {
    let prk = [0x42u8; 32];
    assert_eq!(Hkdf::<Sha256>::max_output_size(), 255 * 32);

    let okm = Hkdf::<Sha256>::expand(&prk, None, 255 * 32).unwrap();
    assert_eq!(okm.len(), 255 * 32);

    let err = Hkdf::<Sha256>::expand(&prk, None, 255 * 32 + 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
}

#[test]
fn test_expand_prefix_property() {
    let prk = [0x17u8; 64];
    let long = Hkdf::<Sha512>::expand(&prk, Some(b"ctx".as_slice()), 200).unwrap();
    for len in [0usize, 1, 63, 64, 65, 128, 199] {
        let short = Hkdf::<Sha512>::expand(&prk, Some(b"ctx".as_slice()), len).unwrap();
        assert_eq!(&short[..], &long[..len]);
    }
}

#[test]
fn test_expand_rejects_short_prk() {
    let err = Hkdf::<Sha384>::expand(&[0u8; 47], None, 16).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidLength);
}

#[test]
fn test_derive_key_binds_purpose() {
    let key = Hkdf::<Sha256>::derive_key(
        Some(b"opencrypto salt".as_slice()),
        b"shared secret",
        b"AEAD-AES-256-GCM",
        KeyPurpose::Aes256Gcm,
    )
    .unwrap();
    assert_eq!(key.purpose(), KeyPurpose::Aes256Gcm);
    assert_eq!(key.len(), 32);
    assert_eq!(
        key.export_for_storage().to_hex().as_str(),
        "19fdbc7b5e43bee55336922884fdefd15374c63fcddc5f3e1836ac5770f9b3a3"
    );

    let key = Hkdf::<Sha512>::derive_key(None, b"ikm", b"mac", KeyPurpose::HmacSha384).unwrap();
    assert_eq!(key.len(), 48);
    assert_eq!(key.purpose(), KeyPurpose::HmacSha384);
}
