//! Pay-to-pubkey-hash address derivation on secp256k1

use bitcoin_hashes::{Hash, ripemd160, sha256};
use secp256k1::{PublicKey, Secp256k1, SecretKey, SignOnly};

use super::enumerator::CandidateKey;
use super::matcher::AddressDeriver;
use crate::error::DeriveError;

/// Base58check P2PKH addresses: version byte + HASH160(pubkey)
pub struct P2pkhDeriver {
    secp: Secp256k1<SignOnly>,
}

impl P2pkhDeriver {
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::signing_only(),
        }
    }
}

impl Default for P2pkhDeriver {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressDeriver for P2pkhDeriver {
    fn derive_address(
        &self,
        version: u8,
        compressed: bool,
        key: &CandidateKey,
    ) -> Result<String, DeriveError> {
        let bytes = key
            .to_bytes()
            .ok_or(DeriveError::KeyTooWide(key.as_hex().len()))?;
        let secret = SecretKey::from_slice(&bytes)
            .map_err(|_| DeriveError::KeyOutOfRange(key.to_string()))?;
        let public = PublicKey::from_secret_key(&self.secp, &secret);

        let sha = if compressed {
            sha256::Hash::hash(&public.serialize())
        } else {
            sha256::Hash::hash(&public.serialize_uncompressed())
        };
        let pubkey_hash = ripemd160::Hash::hash(&sha.to_byte_array());

        Ok(bs58::encode(pubkey_hash.to_byte_array())
            .with_check_version(version)
            .into_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_one() {
        // Prefix nibble alone is the scalar 1
        let key = CandidateKey::from_hex_body("");
        let deriver = P2pkhDeriver::new();
        assert_eq!(
            deriver.derive_address(0, true, &key).unwrap(),
            "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
        );
        assert_eq!(
            deriver.derive_address(0, false, &key).unwrap(),
            "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm"
        );
    }

    #[test]
    fn test_too_wide() {
        let key = CandidateKey::from_hex_body(&"0".repeat(64));
        let err = P2pkhDeriver::new().derive_address(0, true, &key).unwrap_err();
        assert!(matches!(err, DeriveError::KeyTooWide(65)));
    }
}
