//! The payload stream cipher
//!
//! Save payloads are obfuscated with a self-feeding xor stream: every byte is
//! masked with a constant from a repeating 32 byte table xored with a feedback
//! byte, which is the ciphertext 32 positions earlier (or a fixed prefix table
//! for the first 32 positions). Since each mask depends only on ciphertext,
//! the two directions differ solely in iteration order: decryption walks from
//! the end so the feedback bytes it reads are still ciphertext, while
//! encryption walks from the start so the feedback bytes it reads are already
//! ciphertext.
//!
//! Both routines work in place and are exact inverses of one another:
//!
//! ```
//! let mut data = b"hello world".to_vec();
//! oaksave::cipher::encrypt(&mut data);
//! oaksave::cipher::decrypt(&mut data);
//! assert_eq!(data.as_slice(), b"hello world");
//! ```

#[rustfmt::skip]
const PREFIX_MAGIC: [u8; 32] = [
    0x71, 0x34, 0x36, 0xb3, 0x56, 0x63, 0x25, 0x5f,
    0xea, 0xe2, 0x83, 0x73, 0xf4, 0x98, 0xb8, 0x18,
    0x2e, 0xe5, 0x42, 0x2e, 0x50, 0xa2, 0x0f, 0x49,
    0x87, 0x24, 0xe6, 0x65, 0x9a, 0xf0, 0x7c, 0xd7,
];

#[rustfmt::skip]
const XOR_MAGIC: [u8; 32] = [
    0x7c, 0x07, 0x69, 0x83, 0x31, 0x7e, 0x0c, 0x82,
    0x5f, 0x2e, 0x36, 0x7f, 0x76, 0xb4, 0xa2, 0x71,
    0x38, 0x2b, 0x6e, 0x87, 0x39, 0x05, 0x02, 0xc6,
    0xcd, 0xd8, 0xb1, 0xcc, 0xa1, 0x33, 0xf9, 0xb6,
];

/// Decrypts a payload in place
pub fn decrypt(data: &mut [u8]) {
    // Walk backwards so data[i - 32] still holds ciphertext when byte i is
    // rewritten.
    for i in (0..data.len()).rev() {
        let feedback = if i < 32 {
            PREFIX_MAGIC[i]
        } else {
            data[i - 32]
        };
        data[i] ^= feedback ^ XOR_MAGIC[i % 32];
    }
}

/// Encrypts a payload in place
pub fn encrypt(data: &mut [u8]) {
    // Walk forwards so data[i - 32] already holds the ciphertext produced
    // earlier in this pass.
    for i in 0..data.len() {
        let feedback = if i < 32 {
            PREFIX_MAGIC[i]
        } else {
            data[i - 32]
        };
        data[i] ^= feedback ^ XOR_MAGIC[i % 32];
    }
}
