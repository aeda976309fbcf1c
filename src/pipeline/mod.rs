pub mod cipher;
pub mod codec;
pub mod digest;
pub mod kdf;

pub use cipher::{decrypt, encrypt, encrypt_with, open, seal, BlobHeader};
pub use codec::{compress, decode, decode_with, decompress, encode, encode_with};
pub use digest::{fingerprint, fingerprint_with, verify_with};
pub use kdf::{derive_key, generate_salt, DerivedKey, KEY_SIZE, SALT_SIZE};
