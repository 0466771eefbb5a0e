use std::collections::HashMap;

use serde_derive::{Deserialize, Serialize};
use tracing::debug;

use crate::{BoneKey, BoneTable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FlatNode {
    pub index: u32,
    pub name: String,
    /// [`FlatNode::ROOT`] or the index of an earlier node
    pub parent_index: i32,
}

impl FlatNode {
    pub const ROOT: i32 = -1;

    pub fn is_root(&self) -> bool {
        self.parent_index == Self::ROOT
    }
}

/// Parent-index tree over the matched bones only.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FlatSkeleton {
    pub nodes: Vec<FlatNode>,
}

impl FlatSkeleton {
    /// Builds the tree by walking the reference hierarchy from each bone up to
    /// the nearest ancestor that is itself in `bones`, skipping the ones in
    /// between.
    ///
    /// Bones keep their order, except that an ancestor listed after one of its
    /// descendants is moved in front of it. Bones absent from the reference,
    /// or whose walk never reaches a listed ancestor, become roots.
    pub fn flatten<T: AsRef<str>>(bones: &[T], reference: &BoneTable) -> Self {
        let mut positions: HashMap<BoneKey, usize> = HashMap::with_capacity(bones.len());
        for (position, bone) in bones.iter().enumerate() {
            positions.entry(BoneKey::from_name(bone.as_ref())).or_insert(position);
        }

        let ancestors: Vec<Option<usize>> = bones
            .iter()
            .enumerate()
            .map(|(position, bone)| {
                nearest_listed_ancestor(&BoneKey::from_name(bone.as_ref()), &positions, reference)
                    .filter(|&ancestor| ancestor != position)
            })
            .collect();

        let mut placed: Vec<Option<u32>> = vec![None; bones.len()];
        let mut nodes: Vec<FlatNode> = Vec::with_capacity(bones.len());

        for start in 0..bones.len() {
            let mut chain = Vec::new();
            let mut cursor = Some(start);
            while let Some(position) = cursor {
                if placed[position].is_some() || chain.contains(&position) {
                    break;
                }
                chain.push(position);
                cursor = ancestors[position];
            }

            for position in chain.into_iter().rev() {
                let parent_index = ancestors[position]
                    .and_then(|ancestor| placed[ancestor])
                    .map(|index| index as i32)
                    .unwrap_or(FlatNode::ROOT);
                let index = nodes.len() as u32;
                let name = bones[position].as_ref();
                debug!(bone = name, index, parent_index, "flattened bone");
                placed[position] = Some(index);
                nodes.push(FlatNode {
                    index,
                    name: name.to_owned(),
                    parent_index,
                });
            }
        }

        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FlatNode> {
        self.nodes.iter()
    }

    pub fn node_by_name(&self, name: &str) -> Option<&FlatNode> {
        let key = BoneKey::from_name(name);
        self.nodes
            .iter()
            .find(|node| BoneKey::from_name(&node.name) == key)
    }

    pub fn parent(&self, node: &FlatNode) -> Option<&FlatNode> {
        usize::try_from(node.parent_index)
            .ok()
            .and_then(|index| self.nodes.get(index))
    }
}

/// Position in `positions` of the closest ancestor of `bone` in the reference
/// hierarchy. The walk is bounded by the table size so a cyclic reference
/// terminates.
fn nearest_listed_ancestor(
    bone: &BoneKey,
    positions: &HashMap<BoneKey, usize>,
    reference: &BoneTable,
) -> Option<usize> {
    let mut parent = reference.get_by_key(bone)?.parent_key();
    for _ in 0..reference.len() {
        if parent.is_empty() {
            return None;
        }
        if let Some(&position) = positions.get(&parent) {
            return Some(position);
        }
        parent = reference.get_by_key(&parent)?.parent_key();
    }
    None
}
