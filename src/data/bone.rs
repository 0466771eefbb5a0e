use std::collections::HashMap;

use glam::DVec3;

use crate::BoneKey;

/// A single `$definebone` record.
#[derive(Debug, Clone, PartialEq)]
pub struct BoneDefinition {
    pub name: String,
    /// Empty for a root bone
    pub parent: String,
    pub position: DVec3,
    /// Degrees, X Y Z as written in the QC
    pub rotation: DVec3,
}

impl BoneDefinition {
    pub fn new(
        name: impl Into<String>,
        parent: impl Into<String>,
        position: DVec3,
        rotation: DVec3,
    ) -> Self {
        Self {
            name: name.into(),
            parent: parent.into(),
            position,
            rotation,
        }
    }

    pub fn key(&self) -> BoneKey {
        BoneKey::from_name(&self.name)
    }

    pub fn parent_key(&self) -> BoneKey {
        BoneKey::from_name(&self.parent)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_empty()
    }
}

/// Bone definitions in order of appearance, indexed by [`BoneKey`].
#[derive(Debug, Default, Clone)]
pub struct BoneTable {
    bones: Vec<BoneDefinition>,
    lookup: HashMap<BoneKey, usize>,
}

impl BoneTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a bone. A bone whose name is already present (ignoring case)
    /// keeps its original position in the table and takes the new values;
    /// the replaced record is returned.
    pub fn insert(&mut self, bone: BoneDefinition) -> Option<BoneDefinition> {
        let key = bone.key();
        match self.lookup.get(&key) {
            Some(&index) => Some(std::mem::replace(&mut self.bones[index], bone)),
            None => {
                self.lookup.insert(key, self.bones.len());
                self.bones.push(bone);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&BoneDefinition> {
        self.get_by_key(&BoneKey::from_name(name))
    }

    pub fn get_by_key(&self, key: &BoneKey) -> Option<&BoneDefinition> {
        self.lookup.get(key).map(|&index| &self.bones[index])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.contains_key(&BoneKey::from_name(name))
    }

    pub fn contains_key(&self, key: &BoneKey) -> bool {
        self.lookup.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BoneDefinition> {
        self.bones.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bones.iter().map(|bone| bone.name.as_str())
    }
}

impl<'a> IntoIterator for &'a BoneTable {
    type Item = &'a BoneDefinition;
    type IntoIter = std::slice::Iter<'a, BoneDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<BoneDefinition> for BoneTable {
    fn from_iter<I: IntoIterator<Item = BoneDefinition>>(iter: I) -> Self {
        let mut table = BoneTable::new();
        for bone in iter {
            table.insert(bone);
        }
        table
    }
}

#[cfg(test)]
mod test {
    use glam::DVec3;

    use super::{BoneDefinition, BoneTable};

    fn bone(name: &str, parent: &str, z: f64) -> BoneDefinition {
        BoneDefinition::new(name, parent, DVec3::new(0.0, 0.0, z), DVec3::ZERO)
    }

    #[test]
    fn test_lookup_ignores_case() {
        let table: BoneTable = [bone("ValveBiped.Bip01_Pelvis", "", 37.9)]
            .into_iter()
            .collect();

        let pelvis = table.get("VALVEBIPED.BIP01_PELVIS").unwrap();
        assert_eq!(pelvis.name, "ValveBiped.Bip01_Pelvis");
        assert!(pelvis.is_root());
        assert!(table.contains("valvebiped.bip01_pelvis"));
        assert!(!table.contains("ValveBiped.Bip01_Spine"));
    }

    #[test]
    fn test_duplicate_keeps_first_position() {
        let mut table = BoneTable::new();
        table.insert(bone("Root", "", 0.0));
        table.insert(bone("Child", "Root", 1.0));
        let replaced = table.insert(bone("ROOT", "", 5.0));

        assert_eq!(replaced.unwrap().position.z, 0.0);
        assert_eq!(table.len(), 2);
        let names: Vec<_> = table.names().collect();
        assert_eq!(names, ["ROOT", "Child"]);
        assert_eq!(table.get("root").unwrap().position.z, 5.0);
    }
}
