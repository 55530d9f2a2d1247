#![deny(missing_docs)]

//! # Files Command
//!
//! Generates output for every schema matched by the given glob patterns.

use crate::error::CliResult;
use crate::generate::GroupBy;
use mdxgen_core::{generate_files, FileSystem, FilesConfig, Granularity};
use std::path::PathBuf;

/// Output granularity selectable on the command line.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Per {
    /// One combined `<stem>.mdx` per input schema.
    File,
    /// One file per operation, type or tag.
    Entity,
}

impl From<Per> for Granularity {
    fn from(value: Per) -> Self {
        match value {
            Per::File => Granularity::File,
            Per::Entity => Granularity::Entity,
        }
    }
}

/// Arguments for the files command.
#[derive(clap::Args, Debug, Clone)]
pub struct FilesArgs {
    /// Glob patterns selecting schema files, e.g. `schemas/**/*.graphql`.
    pub patterns: Vec<String>,

    /// Output directory.
    #[clap(short, long, env = "MDXGEN_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Base directory for relative patterns and output.
    #[clap(long)]
    pub cwd: Option<PathBuf>,

    /// Output granularity (default: entity).
    #[clap(long, value_enum)]
    pub per: Option<Per>,

    /// Operation layout. Defaults to `tag` for schemas that carry tags.
    #[clap(long, value_enum)]
    pub group_by: Option<GroupBy>,

    /// YAML config file; explicit flags override its values.
    #[clap(long)]
    pub config: Option<PathBuf>,
}

impl FilesArgs {
    fn to_config(&self) -> CliResult<FilesConfig> {
        let mut config = match &self.config {
            Some(path) => FilesConfig::from_yaml_file(path)?,
            None => FilesConfig::default(),
        };
        if !self.patterns.is_empty() {
            config.inputs = self.patterns.clone();
        }
        if let Some(output) = &self.output {
            config.output = Some(output.clone());
        }
        if let Some(cwd) = &self.cwd {
            config.cwd = Some(cwd.clone());
        }
        if let Some(per) = self.per {
            config.per = per.into();
        }
        if let Some(group_by) = self.group_by {
            config.group_by = Some(group_by.into());
        }
        Ok(config)
    }
}

/// Executes the multi-file generation.
pub fn execute(args: &FilesArgs, fs: &impl FileSystem) -> CliResult<()> {
    let config = args.to_config()?;
    let written = generate_files(&config, fs)?;

    println!("Generated {} files", written.len());
    Ok(())
}
