use super::*;
use crate::error::ErrorKind;
use hex;

fn encrypt_hex<C: BlockCipher>(key: &str, plaintext: &str) -> String {
    let cipher = C::new(&hex::decode(key).unwrap()).unwrap();
    let mut block = [0u8; 16];
    block.copy_from_slice(&hex::decode(plaintext).unwrap());
    cipher.encrypt_block(&mut block);
    hex::encode(block)
}

#[test]
fn test_sbox_known_values() {
    assert_eq!(sbox(0x00), 0x63);
    assert_eq!(sbox(0x01), 0x7c);
    assert_eq!(sbox(0x53), 0xed);
    assert_eq!(sbox(0xff), 0x16);
}

#[test]
fn test_aes128_fips197_appendix_c1() {
    assert_eq!(
        encrypt_hex::<Aes128>(
            "000102030405060708090a0b0c0d0e0f",
            "00112233445566778899aabbccddeeff"
        ),
        "69c4e0d86a7b0430d8cdb78070b4c55a"
    );
}

#[test]
fn test_aes128_sp800_38a_ecb() {
    assert_eq!(
        encrypt_hex::<Aes128>(
            "2b7e151628aed2a6abf7158809cf4f3c",
            "6bc1bee22e409f96e93d7e117393172a"
        ),
        "3ad77bb40d7a3660a89ecaf32466ef97"
    );
}

#[test]
fn test_aes256_fips197_appendix_c3() {
    assert_eq!(
        encrypt_hex::<Aes256>(
            "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
            "00112233445566778899aabbccddeeff"
        ),
        "8ea2b7ca516745bfeafc49904b496089"
    );
}

#[test]
fn test_zero_key_zero_block() {
    assert_eq!(
        encrypt_hex::<Aes128>(&"00".repeat(16), &"00".repeat(16)),
        "66e94bd4ef8a2c3b884cfa59ca342b2e"
    );
    assert_eq!(
        encrypt_hex::<Aes256>(&"00".repeat(32), &"00".repeat(16)),
        "dc95c078a2408989ad48a21492842087"
    );
}

#[test]
fn test_wrong_key_length() {
    assert_eq!(
        Aes128::new(&[0u8; 32]).err().map(|e| e.kind()),
        Some(ErrorKind::InvalidLength)
    );
    assert_eq!(
        Aes256::new(&[0u8; 16]).err().map(|e| e.kind()),
        Some(ErrorKind::InvalidLength)
    );
}
