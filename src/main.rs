//! proportion-trick - corrective proportion files for Source playermodels
//!
//! Reads a decompiled QC, matches its `$definebone` block against the HL2
//! female skeleton and writes the proportion trick SMDs and QC snippet.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use proportion_trick::{export, GeneratorSettings, ProportionGenerator};

#[derive(Parser)]
#[command(name = "proportion-trick")]
#[command(about = "Proportion trick generator for Source playermodels")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report which bones of a QC take part in the proportion trick
    Analyze {
        /// Decompiled QC file
        qc: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate the proportion SMDs and the QC snippet
    Generate {
        /// Decompiled QC file
        qc: PathBuf,

        /// Output directory (default: the QC's directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// SMD subfolder inside the output directory
        #[arg(long)]
        anims: Option<String>,

        /// JSON settings file
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Print the snippet to stdout after writing
        #[arg(long)]
        print_snippet: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { qc, json } => {
            let text = read_qc(&qc)?;
            let analysis = ProportionGenerator::default()
                .analyze(&model_name(&qc), &text)
                .with_context(|| format!("Failed to analyze {:?}", qc))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
                return Ok(());
            }

            println!("Model:        {}", analysis.model_name);
            println!("Total bones:  {}", analysis.total_bones);
            println!(
                "Matched:      {}/{}",
                analysis.matched_count(),
                analysis.total_bones
            );
            println!("Custom:       {}", analysis.custom_count());
            println!("IK chains:    {}", if analysis.has_ik_chains { "yes" } else { "no" });
            for name in &analysis.matched_bones {
                println!("  + {name}");
            }
            for name in &analysis.custom_bones {
                println!("  - {name}");
            }
            if !analysis.is_compatible() {
                tracing::warn!("No ValveBiped bones found, the proportion trick will not apply");
            }
        }

        Commands::Generate {
            qc,
            output,
            anims,
            settings,
            print_snippet,
        } => {
            let mut settings = match settings {
                Some(path) => GeneratorSettings::load(&path)
                    .with_context(|| format!("Failed to load settings {:?}", path))?,
                None => GeneratorSettings::default(),
            };
            if let Some(anims) = anims {
                settings.anims_subfolder = anims;
            }

            let output = match output {
                Some(output) => output,
                None => qc
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from(".")),
            };

            tracing::info!("Generating {:?} -> {:?}", qc, output);
            let text = read_qc(&qc)?;
            let generator = ProportionGenerator::new(settings);
            let files = generator
                .generate(&model_name(&qc), &text)
                .with_context(|| format!("Failed to generate from {:?}", qc))?;

            export::write_generated(&output, generator.settings(), &files)?;

            tracing::info!("All files generated successfully");
            tracing::info!(
                "Paste {} into your QC and recompile",
                generator.settings().snippet_file
            );

            if print_snippet {
                print!("{}", files.snippet);
            }
        }
    }

    Ok(())
}

fn read_qc(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read QC: {:?}", path))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn model_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
