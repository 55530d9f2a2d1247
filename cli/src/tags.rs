#![deny(missing_docs)]

//! # Tags Command
//!
//! Renders the documents for one schema and prints them instead of
//! writing files. Useful for previews and for piping into other tools.

use crate::error::CliResult;
use crate::generate::SchemaArgs;
use mdxgen_core::generate_tags;
use std::io::Write;

/// Arguments for the tags command.
#[derive(clap::Args, Debug, Clone)]
pub struct TagsArgs {
    #[clap(flatten)]
    pub schema: SchemaArgs,

    /// Print a JSON array of `{ "path", "content" }` objects.
    #[clap(long)]
    pub json: bool,
}

/// Executes the preview, writing to `out`.
pub fn execute(args: &TagsArgs, out: &mut impl Write) -> CliResult<()> {
    let config = args.schema.to_config(None)?;
    let documents = generate_tags(&config)?;

    if args.json {
        let listing: Vec<serde_json::Value> = documents
            .iter()
            .map(|doc| serde_json::json!({ "path": doc.output_path, "content": doc.content }))
            .collect();
        let rendered = serde_json::to_string_pretty(&listing).map_err(|e| {
            crate::error::CliError::General(format!("JSON serialization failed: {}", e))
        })?;
        writeln!(out, "{}", rendered)?;
    } else {
        for doc in &documents {
            writeln!(out, "==> {} <==", doc.output_path)?;
            writeln!(out, "{}", doc.content)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn args(input: std::path::PathBuf, json: bool) -> TagsArgs {
        TagsArgs {
            schema: SchemaArgs {
                input: Some(input),
                cwd: None,
                group_by: None,
                config: None,
            },
            json,
        }
    }

    #[test]
    fn test_plain_listing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("schema.graphql");
        fs::write(&input, "type Query { ping: String }").unwrap();

        let mut out = Vec::new();
        execute(&args(input, false), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("==> query/ping.mdx <==\n---\ntitle: ping\n"));
    }

    #[test]
    fn test_json_listing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("schema.graphql");
        fs::write(&input, "type Query { ping: String } type Pong { at: Int }").unwrap();

        let mut out = Vec::new();
        execute(&args(input, true), &mut out).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let items = parsed.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["path"], "types/Pong.mdx");
        assert!(items[1]["content"].as_str().unwrap().contains("- at: Int"));
    }
}
