#![deny(missing_docs)]

//! # Generation Entry Points
//!
//! Wires loader, walker and writer together:
//!
//! 1. **Configure**: validate options before touching any schema.
//! 2. **Load**: parse each schema into a graph.
//! 3. **Walk**: render every document in memory.
//! 4. **Write**: hand the documents to the [`FileSystem`].

use crate::config::{FilesConfig, GenerateConfig, Granularity};
use crate::error::{AppError, AppResult};
use crate::loader::load_schema;
use crate::render::Document;
use crate::walker::{walk, Grouping};
use crate::writer::{write_combined, write_documents, FileSystem};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Generates the MDX tree for one schema and writes it under `output`.
///
/// Returns the paths written.
pub fn generate_all<F: FileSystem>(config: &GenerateConfig, fs: &F) -> AppResult<Vec<PathBuf>> {
    let input = config.input_path()?;
    let output = config.output_dir()?;
    let documents = generate_documents(&input, config.group_by)?;
    write_documents(&output, &documents, fs)
}

/// Generates the documents for one schema without writing anything.
pub fn generate_tags(config: &GenerateConfig) -> AppResult<Vec<Document>> {
    let input = config.input_path()?;
    generate_documents(&input, config.group_by)
}

/// Generates output for every schema matched by the configured globs.
///
/// With [`Granularity::File`] all inputs are rendered before the first
/// write, and each input yields `<stem>.mdx` in the output root.
pub fn generate_files<F: FileSystem>(config: &FilesConfig, fs: &F) -> AppResult<Vec<PathBuf>> {
    let patterns = config.patterns()?;
    let output = config.output_dir()?;
    let inputs = expand_inputs(&patterns)?;

    if inputs.is_empty() {
        warn!(?patterns, "no schema files matched");
        return Ok(Vec::new());
    }
    info!(count = inputs.len(), per = ?config.per, "generating from schema files");

    match config.per {
        Granularity::Entity => {
            let mut written = Vec::new();
            let mut claimed: HashSet<String> = HashSet::new();
            for input in &inputs {
                let documents = generate_documents(input, config.group_by)?;
                if let Some(doc) = documents.iter().find(|d| claimed.contains(&d.output_path)) {
                    return Err(AppError::Configuration(format!(
                        "'{}' would overwrite '{}' written for an earlier input",
                        input.display(),
                        doc.output_path
                    )));
                }
                claimed.extend(documents.iter().map(|d| d.output_path.clone()));
                written.extend(write_documents(&output, &documents, fs)?);
            }
            Ok(written)
        }
        Granularity::File => {
            let mut outputs: Vec<(String, Vec<Document>)> = Vec::with_capacity(inputs.len());
            for input in &inputs {
                let name = combined_name(input)?;
                if outputs.iter().any(|(existing, _)| *existing == name) {
                    return Err(AppError::Configuration(format!(
                        "Several inputs map to the same output file '{}'",
                        name
                    )));
                }
                outputs.push((name, generate_documents(input, config.group_by)?));
            }
            write_combined(&output, &outputs, fs)
        }
    }
}

/// Expands glob patterns into existing files, sorted per pattern and
/// de-duplicated across patterns. An empty match is not an error.
pub fn expand_inputs(patterns: &[String]) -> AppResult<Vec<PathBuf>> {
    let mut inputs: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let entries = glob::glob(pattern).map_err(|e| {
            AppError::Configuration(format!("Invalid glob pattern '{}': {}", pattern, e))
        })?;

        let mut matched = 0;
        for entry in entries {
            let path = entry.map_err(|e| AppError::Io(e.into_error()))?;
            if path.is_file() && !inputs.contains(&path) {
                inputs.push(path);
                matched += 1;
            }
        }
        if matched == 0 {
            warn!(pattern = %pattern, "glob matched no files");
        }
    }

    Ok(inputs)
}

fn generate_documents(input: &Path, group_by: Option<Grouping>) -> AppResult<Vec<Document>> {
    let graph = load_schema(input)?;
    let grouping = Grouping::resolve(group_by, &graph);
    let documents = walk(&graph, grouping);
    ensure_unique_paths(&documents, input)?;
    info!(input = %input.display(), documents = documents.len(), ?grouping, "generated documents");
    Ok(documents)
}

fn ensure_unique_paths(documents: &[Document], input: &Path) -> AppResult<()> {
    let mut seen = HashSet::with_capacity(documents.len());
    for doc in documents {
        if !seen.insert(doc.output_path.as_str()) {
            return Err(AppError::schema_parse(
                input,
                format!("Two documents map to '{}'", doc.output_path),
            ));
        }
    }
    Ok(())
}

fn combined_name(input: &Path) -> AppResult<String> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| AppError::schema_parse(input, "Input has no usable file name"))?;
    Ok(format!("{}.mdx", stem))
}
