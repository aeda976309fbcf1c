use crate::header::HashAlgorithm;
use sha2::{Digest, Sha256};
use sha3::Sha3_256;

/// Fingerprint text with the default algorithm (SHA-256), as lowercase hex
pub fn fingerprint(data: &str) -> String {
    fingerprint_with(data.as_bytes(), HashAlgorithm::default())
}

/// Check text against a fingerprint produced by [`fingerprint`]
pub fn verify(data: &str, digest: &str) -> bool {
    verify_with(data.as_bytes(), digest, HashAlgorithm::default())
}

/// Fingerprint raw bytes with the given algorithm
pub fn fingerprint_with(data: &[u8], algorithm: HashAlgorithm) -> String {
    hex::encode(hash_bytes(data, algorithm))
}

/// Constant-time check of raw bytes against a hex fingerprint
pub fn verify_with(data: &[u8], digest: &str, algorithm: HashAlgorithm) -> bool {
    let expected = fingerprint_with(data, algorithm);
    constant_time_compare(expected.as_bytes(), digest.as_bytes())
}

fn hash_bytes(data: &[u8], algorithm: HashAlgorithm) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Sha256 => hash_with::<Sha256>(data),
        HashAlgorithm::Sha3 => hash_with::<Sha3_256>(data),
        HashAlgorithm::Blake3 => blake3::hash(data).as_bytes().to_vec(),
    }
}

fn hash_with<D: Digest>(data: &[u8]) -> Vec<u8> {
    D::digest(data).to_vec()
}

/// Length leaks; content does not. Every byte pair is visited.
fn constant_time_compare(expected: &[u8], given: &[u8]) -> bool {
    expected.len() == given.len()
        && expected
            .iter()
            .zip(given)
            .fold(0u8, |acc, (x, y)| acc | (x ^ y))
            == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sha256_vector() {
        assert_eq!(
            fingerprint("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_deterministic() {
        let data = "invoice 2024-01-24 total 1.250,00 EUR";
        assert_eq!(fingerprint(data), fingerprint(data));
        for alg in [HashAlgorithm::Sha256, HashAlgorithm::Sha3, HashAlgorithm::Blake3] {
            let a = fingerprint_with(data.as_bytes(), alg);
            let b = fingerprint_with(data.as_bytes(), alg);
            assert_eq!(a, b);
            assert_eq!(a.len(), 64);
        }
    }

    #[test]
    fn test_distinct_inputs_distinct_digests() {
        assert_ne!(fingerprint("payload-a"), fingerprint("payload-b"));
        assert_ne!(fingerprint(""), fingerprint(" "));
    }

    #[test]
    fn test_algorithms_differ() {
        let data = b"same input";
        let sha2 = fingerprint_with(data, HashAlgorithm::Sha256);
        let sha3 = fingerprint_with(data, HashAlgorithm::Sha3);
        let blake = fingerprint_with(data, HashAlgorithm::Blake3);
        assert_ne!(sha2, sha3);
        assert_ne!(sha3, blake);
    }

    #[test]
    fn test_verify() {
        let data = "container ciphertext";
        let digest = fingerprint(data);
        assert!(verify(data, &digest));
        assert!(!verify("container ciphertexT", &digest));
        assert!(!verify(data, &digest[..63]));
        assert!(!verify(data, ""));
        assert!(!verify(data, "not hex at all"));
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare(b"abc", b"abc"));
        assert!(!constant_time_compare(b"abc", b"abd"));
        assert!(!constant_time_compare(b"abc", b"abcd"));
        assert!(constant_time_compare(b"", b""));
    }
}
