//! Hex info-hash parsing.

use std::fmt;
use std::str::FromStr;

use crate::constants::INFO_HASH_LEN;
use crate::tracker::TrackerError;

/// A v1 (SHA-1) torrent info hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfoHash([u8; INFO_HASH_LEN]);

impl InfoHash {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TrackerError> {
        let arr: [u8; INFO_HASH_LEN] = bytes
            .try_into()
            .map_err(|_| TrackerError::MalformedHash(hex::encode(bytes)))?;
        Ok(Self(arr))
    }

    /// Parses a 40 character hex string. Either case is accepted.
    pub fn from_hex(s: &str) -> Result<Self, TrackerError> {
        let bytes = hex::decode(s).map_err(|_| TrackerError::MalformedHash(s.to_string()))?;
        if bytes.len() != INFO_HASH_LEN {
            return Err(TrackerError::MalformedHash(s.to_string()));
        }
        Self::from_bytes(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; INFO_HASH_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for InfoHash {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; INFO_HASH_LEN]> for InfoHash {
    fn from(bytes: [u8; INFO_HASH_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InfoHash({})", self.to_hex())
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "c12fe1c06bba254a9dc9f519b335aa7c1367a88a";

    #[test]
    fn test_from_hex() {
        let hash = InfoHash::from_hex(HASH).unwrap();
        assert_eq!(hash.as_bytes()[0], 0xc1);
        assert_eq!(hash.as_bytes()[19], 0x8a);
        assert_eq!(hash.to_hex(), HASH);
    }

    #[test]
    fn test_from_hex_uppercase() {
        let hash = InfoHash::from_hex(&HASH.to_uppercase()).unwrap();
        assert_eq!(hash.to_hex(), HASH);
    }

    #[test]
    fn test_from_hex_odd_length() {
        let result = InfoHash::from_hex(&HASH[..39]);
        assert!(matches!(result, Err(TrackerError::MalformedHash(_))));
    }

    #[test]
    fn test_from_hex_wrong_length() {
        assert!(InfoHash::from_hex(&HASH[..38]).is_err());
        assert!(InfoHash::from_hex(&format!("{}00", HASH)).is_err());
    }

    #[test]
    fn test_from_hex_not_hex() {
        let bad = format!("zz{}", &HASH[2..]);
        assert!(matches!(
            InfoHash::from_hex(&bad),
            Err(TrackerError::MalformedHash(s)) if s == bad
        ));
    }

    #[test]
    fn test_from_bytes_invalid() {
        assert!(InfoHash::from_bytes(&[1u8; 10]).is_err());
        assert!(InfoHash::from_bytes(&[1u8; 20]).is_ok());
    }
}
