use std::path::Path;

use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

/// Output names and layout. Missing fields in a settings file take the
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct GeneratorSettings {
    /// Folder for the SMDs, relative to the output directory and the QC
    pub anims_subfolder: String,
    pub proportions_file: String,
    pub reference_file: String,
    pub snippet_file: String,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            anims_subfolder: "anims".to_owned(),
            proportions_file: "proportions.smd".to_owned(),
            reference_file: "hl2_female_reference.smd".to_owned(),
            snippet_file: "corrective_qc_snippet.txt".to_owned(),
        }
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings: {0}")]
    Json(#[from] serde_json::Error),
}

impl GeneratorSettings {
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Path of the proportions SMD as written in the snippet.
    pub fn proportions_path(&self) -> String {
        self.anims_relative(&self.proportions_file)
    }

    /// Path of the reference SMD as written in the snippet.
    pub fn reference_path(&self) -> String {
        self.anims_relative(&self.reference_file)
    }

    fn anims_relative(&self, file: &str) -> String {
        let folder = self.anims_subfolder.trim_end_matches(['/', '\\']);
        if folder.is_empty() {
            file.to_owned()
        } else {
            format!("{folder}/{file}")
        }
    }
}
