use glam::DVec3;
use thiserror::Error;

use crate::{smd_rotation, BoneTable, FlatNode, FlatSkeleton};

/// One bone sample of a single frame skeleton animation.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct PoseFrame {
    pub position: DVec3,
    /// Radians, Z X Y
    pub rotation: DVec3,
}

/// The two samples written for one bone. Both carry the same rotation value.
#[derive(Debug, Clone, PartialEq)]
pub struct PosePair {
    pub node: FlatNode,
    /// Model position and rotation
    pub proportions: PoseFrame,
    /// Reference position with the model rotation
    pub reference: PoseFrame,
}

impl PosePair {
    /// Translation that the compiler's subtract will produce for this bone.
    pub fn delta(&self) -> DVec3 {
        self.proportions.position - self.reference.position
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoseError {
    #[error("bone {0:?} is not defined by the model")]
    MissingModelBone(String),
    #[error("bone {0:?} is not defined by the reference skeleton")]
    MissingReferenceBone(String),
}

/// Builds the pose pair for every node of `skeleton`, in node order.
pub fn build_pose_pairs(
    skeleton: &FlatSkeleton,
    model: &BoneTable,
    reference: &BoneTable,
) -> Result<Vec<PosePair>, PoseError> {
    skeleton
        .iter()
        .map(|node| -> Result<PosePair, PoseError> {
            let model_bone = model
                .get(&node.name)
                .ok_or_else(|| PoseError::MissingModelBone(node.name.clone()))?;
            let reference_bone = reference
                .get(&node.name)
                .ok_or_else(|| PoseError::MissingReferenceBone(node.name.clone()))?;

            let rotation = smd_rotation(model_bone.rotation);

            Ok(PosePair {
                node: node.clone(),
                proportions: PoseFrame {
                    position: model_bone.position,
                    rotation,
                },
                reference: PoseFrame {
                    position: reference_bone.position,
                    rotation,
                },
            })
        })
        .collect()
}

pub fn proportions_frames(pairs: &[PosePair]) -> Vec<PoseFrame> {
    pairs.iter().map(|pair| pair.proportions).collect()
}

pub fn reference_frames(pairs: &[PosePair]) -> Vec<PoseFrame> {
    pairs.iter().map(|pair| pair.reference).collect()
}
