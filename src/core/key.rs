use std::fmt;

use serde_derive::{Deserialize, Serialize};

/// Case-insensitive lookup key for a bone name.
///
/// Bone records keep their original casing. Every table lookup and set
/// membership test in the crate goes through this key instead.
#[derive(
    Debug, Default, Clone, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct BoneKey(String);

impl BoneKey {
    pub fn from_name(value: &str) -> Self {
        Self(value.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for BoneKey {
    fn from(value: &str) -> Self {
        Self::from_name(value)
    }
}

impl From<&String> for BoneKey {
    fn from(value: &String) -> Self {
        Self::from_name(value)
    }
}

impl fmt::Display for BoneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
