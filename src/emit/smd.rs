use std::fmt;

use crate::{FlatNode, PoseFrame};

/// A skeleton-only SMD with a single `time 0` frame.
///
/// Nodes and frames are paired by position. No triangles block is written.
#[derive(Debug, Clone, Copy)]
pub struct SmdSkeleton<'a> {
    pub nodes: &'a [FlatNode],
    pub frames: &'a [PoseFrame],
}

impl<'a> SmdSkeleton<'a> {
    pub fn new(nodes: &'a [FlatNode], frames: &'a [PoseFrame]) -> Self {
        Self { nodes, frames }
    }
}

impl fmt::Display for SmdSkeleton<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "version 1")?;
        writeln!(f, "nodes")?;
        for node in self.nodes {
            writeln!(f, "  {} \"{}\" {}", node.index, node.name, node.parent_index)?;
        }
        writeln!(f, "end")?;

        writeln!(f, "skeleton")?;
        writeln!(f, "time 0")?;
        for (node, frame) in self.nodes.iter().zip(self.frames) {
            let (p, r) = (frame.position, frame.rotation);
            writeln!(
                f,
                "  {}  {:.6} {:.6} {:.6}  {:.6} {:.6} {:.6}",
                node.index, p.x, p.y, p.z, r.x, r.y, r.z
            )?;
        }
        writeln!(f, "end")
    }
}

pub fn write_smd(nodes: &[FlatNode], frames: &[PoseFrame]) -> String {
    SmdSkeleton::new(nodes, frames).to_string()
}
