use std::collections::HashSet;

use serde_derive::{Deserialize, Serialize};
use tracing::warn;

use crate::{BoneKey, BoneTable, ALLOWED_BONES};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BoneMatch {
    /// Allowed bones present in both skeletons, in model order
    pub matched: Vec<String>,
    /// Model bones outside the allowed set
    pub custom: Vec<String>,
    /// Allowed bones that the reference skeleton does not define
    pub unresolved: Vec<String>,
}

impl BoneMatch {
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }
}

/// Case-insensitive filter over a fixed set of bone names.
#[derive(Debug, Clone)]
pub struct BoneMatcher {
    allowed: HashSet<BoneKey>,
}

impl Default for BoneMatcher {
    fn default() -> Self {
        Self::valve_biped()
    }
}

impl BoneMatcher {
    pub fn new<T: AsRef<str>>(allowed: impl IntoIterator<Item = T>) -> Self {
        Self {
            allowed: allowed
                .into_iter()
                .map(|name| BoneKey::from_name(name.as_ref()))
                .collect(),
        }
    }

    /// The core ValveBiped bones.
    pub fn valve_biped() -> Self {
        Self::new(ALLOWED_BONES)
    }

    pub fn is_allowed(&self, name: &str) -> bool {
        self.allowed.contains(&BoneKey::from_name(name))
    }

    /// Splits the model bones into matched and custom ones. Names keep the
    /// model's casing and order.
    pub fn match_bones(&self, model: &BoneTable, reference: &BoneTable) -> BoneMatch {
        let mut result = BoneMatch::default();
        for bone in model {
            let key = bone.key();
            if !self.allowed.contains(&key) {
                result.custom.push(bone.name.clone());
            } else if reference.contains_key(&key) {
                result.matched.push(bone.name.clone());
            } else {
                warn!(bone = %bone.name, "allowed bone missing from the reference skeleton");
                result.unresolved.push(bone.name.clone());
            }
        }
        result
    }
}
