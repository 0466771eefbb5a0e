//! Writes generated files to disk.
//!
//! Layout under the output directory:
//! `<anims>/<proportions>.smd`, `<anims>/<reference>.smd` and the snippet at
//! the top level.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::{GeneratedFiles, GeneratorSettings};

#[derive(Error, Debug)]
#[error("failed to write {path:?}: {source}")]
pub struct ExportError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedPaths {
    pub proportions: PathBuf,
    pub reference: PathBuf,
    pub snippet: PathBuf,
}

pub fn write_generated(
    output_dir: &Path,
    settings: &GeneratorSettings,
    files: &GeneratedFiles,
) -> Result<ExportedPaths, ExportError> {
    let anims_dir = output_dir.join(&settings.anims_subfolder);
    fs::create_dir_all(&anims_dir).map_err(|source| ExportError {
        path: anims_dir.clone(),
        source,
    })?;

    let paths = ExportedPaths {
        proportions: anims_dir.join(&settings.proportions_file),
        reference: anims_dir.join(&settings.reference_file),
        snippet: output_dir.join(&settings.snippet_file),
    };

    write_file(&paths.proportions, &files.proportions_smd)?;
    info!("{} ({} bones)", paths.proportions.display(), files.bone_count());
    write_file(&paths.reference, &files.reference_smd)?;
    info!("{} ({} bones)", paths.reference.display(), files.bone_count());
    write_file(&paths.snippet, &files.snippet)?;
    info!("{}", paths.snippet.display());

    Ok(paths)
}

fn write_file(path: &Path, contents: &str) -> Result<(), ExportError> {
    fs::write(path, contents).map_err(|source| ExportError {
        path: path.to_owned(),
        source,
    })
}
