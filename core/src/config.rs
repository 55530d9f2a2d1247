#![deny(missing_docs)]

//! # Configuration
//!
//! Options for the generation entry points. Both structs deserialize from
//! YAML (camelCase keys) so the CLI can load them from a config file.

use crate::error::{AppError, AppResult};
use crate::walker::Grouping;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Output granularity for multi-input runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One combined file per input schema.
    File,
    /// One file per member (or tag).
    #[default]
    Entity,
}

/// Options for a single-input run.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerateConfig {
    /// Schema file to read.
    pub input: Option<PathBuf>,
    /// Directory the MDX tree is written to.
    pub output: Option<PathBuf>,
    /// Base directory for relative `input`/`output` paths.
    pub cwd: Option<PathBuf>,
    /// Operation layout; inferred from the schema when unset.
    pub group_by: Option<Grouping>,
}

impl GenerateConfig {
    /// Reads a YAML config file.
    pub fn from_yaml_file(path: &Path) -> AppResult<Self> {
        read_yaml(path)
    }

    /// The input path resolved against `cwd`.
    pub fn input_path(&self) -> AppResult<PathBuf> {
        let input = self
            .input
            .as_deref()
            .ok_or_else(|| AppError::Configuration("No input schema path given".into()))?;
        Ok(resolve(self.cwd.as_deref(), input))
    }

    /// The output directory resolved against `cwd`.
    pub fn output_dir(&self) -> AppResult<PathBuf> {
        output_dir(self.cwd.as_deref(), self.output.as_deref())
    }
}

/// Options for a multi-input run.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilesConfig {
    /// Glob patterns selecting the schema files.
    pub inputs: Vec<String>,
    /// Directory the output is written to.
    pub output: Option<PathBuf>,
    /// Base directory for relative patterns and output.
    pub cwd: Option<PathBuf>,
    /// Per-file or per-entity output.
    pub per: Granularity,
    /// Operation layout; inferred per schema when unset.
    pub group_by: Option<Grouping>,
}

impl FilesConfig {
    /// Reads a YAML config file.
    pub fn from_yaml_file(path: &Path) -> AppResult<Self> {
        read_yaml(path)
    }

    /// Patterns resolved against `cwd`. Fails when no pattern is given.
    pub fn patterns(&self) -> AppResult<Vec<String>> {
        if self.inputs.is_empty() {
            return Err(AppError::Configuration("No input patterns given".into()));
        }
        Ok(self
            .inputs
            .iter()
            .map(|pattern| match self.cwd.as_deref() {
                Some(base) if Path::new(pattern).is_relative() => {
                    base.join(pattern).to_string_lossy().into_owned()
                }
                _ => pattern.clone(),
            })
            .collect())
    }

    /// The output directory resolved against `cwd`.
    pub fn output_dir(&self) -> AppResult<PathBuf> {
        output_dir(self.cwd.as_deref(), self.output.as_deref())
    }
}

fn output_dir(cwd: Option<&Path>, output: Option<&Path>) -> AppResult<PathBuf> {
    match output {
        Some(out) if !out.as_os_str().is_empty() => Ok(resolve(cwd, out)),
        _ => Err(AppError::Configuration("No output directory given".into())),
    }
}

fn resolve(cwd: Option<&Path>, path: &Path) -> PathBuf {
    match cwd {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}

fn read_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> AppResult<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::Configuration(format!("Failed to read config {}: {}", path.display(), e))
    })?;
    serde_yaml::from_str(&content).map_err(|e| {
        AppError::Configuration(format!("Invalid config {}: {}", path.display(), e))
    })
}
