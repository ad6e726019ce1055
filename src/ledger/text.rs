// Bounded text and byte fields
// Lengths are part of the type, so an out-of-bound value never reaches a registry

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum length of a contact-info field
pub const CONTACT_INFO_MAX_LEN: usize = 100;
/// Maximum length of a token URI
pub const TOKEN_URI_MAX_LEN: usize = 256;
/// Maximum length of a transfer memo in bytes
pub const MEMO_MAX_LEN: usize = 34;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("Text too long: {len} (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("Text contains non-ASCII character {0:?}")]
    NonAscii(char),
}

/// ASCII text of at most `MAX` characters
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BoundedAscii<const MAX: usize>(String);

impl<const MAX: usize> BoundedAscii<MAX> {
    pub fn new(value: impl Into<String>) -> Result<Self, TextError> {
        let value = value.into();
        if let Some(ch) = value.chars().find(|c| !c.is_ascii()) {
            return Err(TextError::NonAscii(ch));
        }
        if value.len() > MAX {
            return Err(TextError::TooLong {
                len: value.len(),
                max: MAX,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<const MAX: usize> fmt::Display for BoundedAscii<MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<const MAX: usize> TryFrom<String> for BoundedAscii<MAX> {
    type Error = TextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<const MAX: usize> From<BoundedAscii<MAX>> for String {
    fn from(text: BoundedAscii<MAX>) -> Self {
        text.0
    }
}

/// Contact details attached to a listing
pub type ContactInfo = BoundedAscii<CONTACT_INFO_MAX_LEN>;

/// Metadata URI of a token
pub type TokenUri = BoundedAscii<TOKEN_URI_MAX_LEN>;

/// Opaque memo attached to a transfer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Memo(Vec<u8>);

impl Memo {
    pub fn new(bytes: Vec<u8>) -> Result<Self, TextError> {
        if bytes.len() > MEMO_MAX_LEN {
            return Err(TextError::TooLong {
                len: bytes.len(),
                max: MEMO_MAX_LEN,
            });
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<Vec<u8>> for Memo {
    type Error = TextError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Memo> for Vec<u8> {
    fn from(memo: Memo) -> Self {
        memo.0
    }
}

impl fmt::Display for Memo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}
