use serde_derive::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::{
    build_pose_pairs, detect_ik_chains, hl2_female_reference, parse_definebones,
    proportions_frames, reference_frames, write_smd, write_snippet, BoneMatch, BoneMatcher,
    BoneTable, FlatSkeleton, GeneratorSettings, PoseError, PosePair,
};

#[cfg(test)]
mod tests;

/// Number of custom bone names listed in the log before summarizing.
pub const CUSTOM_PREVIEW_LEN: usize = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("no $definebone lines found")]
    NoInputBones,
    #[error("no matching ValveBiped bones found, incompatible skeleton")]
    NoMatchedBones,
    #[error("pose construction failed: {0}")]
    Pose(#[from] PoseError),
}

/// Skeleton compatibility report for a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Analysis {
    pub model_name: String,
    pub total_bones: usize,
    pub matched_bones: Vec<String>,
    pub custom_bones: Vec<String>,
    pub unresolved_bones: Vec<String>,
    pub has_ik_chains: bool,
}

impl Analysis {
    fn new(model_name: &str, text: &str, model: &BoneTable, bone_match: BoneMatch) -> Self {
        Self {
            model_name: model_name.to_owned(),
            total_bones: model.len(),
            matched_bones: bone_match.matched,
            custom_bones: bone_match.custom,
            unresolved_bones: bone_match.unresolved,
            has_ik_chains: detect_ik_chains(text),
        }
    }

    pub fn matched_count(&self) -> usize {
        self.matched_bones.len()
    }

    pub fn custom_count(&self) -> usize {
        self.custom_bones.len()
    }

    pub fn is_compatible(&self) -> bool {
        !self.matched_bones.is_empty()
    }
}

/// Everything a run produces. Nothing is written to disk.
#[derive(Debug, Clone)]
pub struct GeneratedFiles {
    pub analysis: Analysis,
    pub skeleton: FlatSkeleton,
    pub pose_pairs: Vec<PosePair>,
    /// Snippet-relative path of the proportions SMD
    pub proportions_path: String,
    /// Snippet-relative path of the reference SMD
    pub reference_path: String,
    pub proportions_smd: String,
    pub reference_smd: String,
    pub snippet: String,
}

impl GeneratedFiles {
    pub fn bone_count(&self) -> usize {
        self.skeleton.len()
    }
}

/// Parses a model's `$definebone` block and builds the proportion trick
/// files against a reference skeleton.
#[derive(Debug, Clone)]
pub struct ProportionGenerator<'a> {
    reference: &'a BoneTable,
    matcher: BoneMatcher,
    settings: GeneratorSettings,
}

impl Default for ProportionGenerator<'static> {
    fn default() -> Self {
        Self::new(GeneratorSettings::default())
    }
}

impl ProportionGenerator<'static> {
    /// Uses the built-in HL2 female reference skeleton.
    pub fn new(settings: GeneratorSettings) -> Self {
        Self::with_reference(hl2_female_reference(), settings)
    }
}

impl<'a> ProportionGenerator<'a> {
    pub fn with_reference(reference: &'a BoneTable, settings: GeneratorSettings) -> Self {
        Self {
            reference,
            matcher: BoneMatcher::valve_biped(),
            settings,
        }
    }

    pub fn with_matcher(mut self, matcher: BoneMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    pub fn reference(&self) -> &BoneTable {
        self.reference
    }

    /// Reports matched and custom bones. An incompatible skeleton is not an
    /// error here, see [`Analysis::is_compatible`].
    pub fn analyze(&self, model_name: &str, text: &str) -> Result<Analysis, GeneratorError> {
        let model = parse_model(text)?;
        let bone_match = self.matcher.match_bones(&model, self.reference);
        Ok(Analysis::new(model_name, text, &model, bone_match))
    }

    pub fn generate(&self, model_name: &str, text: &str) -> Result<GeneratedFiles, GeneratorError> {
        let model = parse_model(text)?;

        info!("Model: {model_name}");
        info!("Target skeleton: {} bones", model.len());
        info!("Reference skeleton: {} bones", self.reference.len());

        let bone_match = self.matcher.match_bones(&model, self.reference);
        info!(
            "Matched ValveBiped: {}/{}",
            bone_match.matched.len(),
            model.len()
        );
        if bone_match.is_empty() {
            return Err(GeneratorError::NoMatchedBones);
        }
        if !bone_match.custom.is_empty() {
            info!(
                "Custom bones ({}): {}",
                bone_match.custom.len(),
                custom_bones_preview(&bone_match.custom)
            );
        }

        let skeleton = FlatSkeleton::flatten(&bone_match.matched, self.reference);
        let pose_pairs = build_pose_pairs(&skeleton, &model, self.reference)?;

        let proportions_smd = write_smd(&skeleton.nodes, &proportions_frames(&pose_pairs));
        let reference_smd = write_smd(&skeleton.nodes, &reference_frames(&pose_pairs));

        let analysis = Analysis::new(model_name, text, &model, bone_match);
        let proportions_path = self.settings.proportions_path();
        let reference_path = self.settings.reference_path();
        let snippet = write_snippet(&reference_path, &proportions_path, analysis.has_ik_chains);
        if analysis.has_ik_chains {
            info!("$ikchain detected, see snippet for notes");
        }

        Ok(GeneratedFiles {
            analysis,
            skeleton,
            pose_pairs,
            proportions_path,
            reference_path,
            proportions_smd,
            reference_smd,
            snippet,
        })
    }
}

fn parse_model(text: &str) -> Result<BoneTable, GeneratorError> {
    let model = parse_definebones(text);
    if model.is_empty() {
        return Err(GeneratorError::NoInputBones);
    }
    Ok(model)
}

/// `a, b, c, d, e, f ... +N more`
pub fn custom_bones_preview<T: AsRef<str>>(custom: &[T]) -> String {
    let preview = custom
        .iter()
        .take(CUSTOM_PREVIEW_LEN)
        .map(|name| name.as_ref())
        .collect::<Vec<_>>()
        .join(", ");
    if custom.len() > CUSTOM_PREVIEW_LEN {
        format!("{preview} ... +{} more", custom.len() - CUSTOM_PREVIEW_LEN)
    } else {
        preview
    }
}
