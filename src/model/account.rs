use serde::{Deserialize, Serialize};
use std::fmt;

/// Length in bytes of an account's public key.
pub const ACCOUNT_LEN: usize = 32;

/// Authenticated account identity (a 32-byte public key).
///
/// Signature checks happen before an invocation reaches the machine, so an
/// `AccountId` is trusted as given.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId([u8; ACCOUNT_LEN]);

impl AccountId {
    pub const fn new(bytes: [u8; ACCOUNT_LEN]) -> Self {
        Self(bytes)
    }

    /// Build from a raw argument; `None` unless exactly 32 bytes long.
    pub fn from_slice(raw: &[u8]) -> Option<Self> {
        let bytes: [u8; ACCOUNT_LEN] = raw.try_into().ok()?;
        Some(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; ACCOUNT_LEN] {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

// Short form keeps logs readable.
impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({}..)", hex::encode(&self.0[..4]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_requires_exact_length() {
        assert!(AccountId::from_slice(&[7u8; 32]).is_some());
        assert!(AccountId::from_slice(&[7u8; 31]).is_none());
        assert!(AccountId::from_slice(&[7u8; 33]).is_none());
        assert!(AccountId::from_slice(&[]).is_none());
    }

    #[test]
    fn display_is_full_hex() {
        let account = AccountId::new([0xab; 32]);
        let shown = account.to_string();
        assert_eq!(shown, "ab".repeat(32));
        assert_eq!(hex::decode(&shown).unwrap(), account.as_bytes().to_vec());
    }

    #[test]
    fn debug_is_abbreviated() {
        let mut bytes = [0u8; 32];
        bytes[..4].copy_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(
            format!("{:?}", AccountId::new(bytes)),
            "AccountId(deadbeef..)"
        );
    }
}
