#![deny(missing_docs)]

//! # Generate Command
//!
//! Writes the MDX tree for one schema file.

use crate::error::CliResult;
use mdxgen_core::{generate_all, FileSystem, GenerateConfig, Grouping};
use std::path::PathBuf;

/// Operation layout selectable on the command line.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    /// One document per operation under query/, mutation/, subscription/.
    Kind,
    /// One document per tag under tags/.
    Tag,
}

impl From<GroupBy> for Grouping {
    fn from(value: GroupBy) -> Self {
        match value {
            GroupBy::Kind => Grouping::Kind,
            GroupBy::Tag => Grouping::Tag,
        }
    }
}

/// Options shared by the single-schema commands.
#[derive(clap::Args, Debug, Clone)]
pub struct SchemaArgs {
    /// Schema file (.graphql, .gql, .yaml, .yml, .json).
    #[clap(short, long)]
    pub input: Option<PathBuf>,

    /// Base directory for relative paths.
    #[clap(long)]
    pub cwd: Option<PathBuf>,

    /// Operation layout. Defaults to `tag` when the schema carries tags.
    #[clap(long, value_enum)]
    pub group_by: Option<GroupBy>,

    /// YAML config file; explicit flags override its values.
    #[clap(long)]
    pub config: Option<PathBuf>,
}

impl SchemaArgs {
    /// Builds the core config: file values first, then flags.
    pub fn to_config(&self, output: Option<&PathBuf>) -> CliResult<GenerateConfig> {
        let mut config = match &self.config {
            Some(path) => GenerateConfig::from_yaml_file(path)?,
            None => GenerateConfig::default(),
        };
        if let Some(input) = &self.input {
            config.input = Some(input.clone());
        }
        if let Some(output) = output {
            config.output = Some(output.clone());
        }
        if let Some(cwd) = &self.cwd {
            config.cwd = Some(cwd.clone());
        }
        if let Some(group_by) = self.group_by {
            config.group_by = Some(group_by.into());
        }
        Ok(config)
    }
}

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    #[clap(flatten)]
    pub schema: SchemaArgs,

    /// Output directory for the MDX tree.
    #[clap(short, long, env = "MDXGEN_OUTPUT")]
    pub output: Option<PathBuf>,
}

/// Executes the generation.
///
/// # Arguments
///
/// * `args` - Command arguments.
/// * `fs` - Filesystem the documents are written through.
pub fn execute(args: &GenerateArgs, fs: &impl FileSystem) -> CliResult<()> {
    let config = args.schema.to_config(args.output.as_ref())?;
    let written = generate_all(&config, fs)?;

    println!("Generated {} documents", written.len());
    Ok(())
}
