#![deny(missing_docs)]

//! # Writer
//!
//! The only effectful part of the pipeline. Filesystem access goes through
//! the [`FileSystem`] trait so tests can substitute a recording fake.

use crate::error::AppResult;
use crate::render::Document;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Separator placed between documents in a combined per-file output.
pub const COMBINED_SEPARATOR: &str = "\n\n";

/// Interface for filesystem side effects.
///
/// Abstracted to allow capturing writes in tests without touching disk.
pub trait FileSystem {
    /// Creates `path` and any missing parents. Must succeed if it already exists.
    fn ensure_dir(&self, path: &Path) -> io::Result<()>;

    /// Writes `content` to `path`, replacing any existing file.
    fn write_file(&self, path: &Path, content: &str) -> io::Result<()>;
}

/// Standard implementation backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        fs::write(path, content)
    }
}

/// Writes each document under `root`, creating parent directories first.
///
/// Stops at the first failure; files written before it stay on disk.
pub fn write_documents<F: FileSystem>(
    root: &Path,
    documents: &[Document],
    fs: &F,
) -> AppResult<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(documents.len());

    for doc in documents {
        let target = root.join(&doc.output_path);
        if let Some(parent) = target.parent() {
            fs.ensure_dir(parent)?;
        }
        fs.write_file(&target, &doc.content)?;
        debug!(path = %target.display(), "wrote document");
        written.push(target);
    }

    info!(root = %root.display(), count = written.len(), "documents written");
    Ok(written)
}

/// Writes one combined file per input. `outputs` pairs each file name
/// (relative to `root`) with the documents generated for that input.
///
/// The output root is created once up front.
pub fn write_combined<F: FileSystem>(
    root: &Path,
    outputs: &[(String, Vec<Document>)],
    fs: &F,
) -> AppResult<Vec<PathBuf>> {
    fs.ensure_dir(root)?;

    let mut written = Vec::with_capacity(outputs.len());
    for (file_name, documents) in outputs {
        let target = root.join(file_name);
        fs.write_file(&target, &combine(documents))?;
        debug!(path = %target.display(), documents = documents.len(), "wrote combined file");
        written.push(target);
    }

    info!(root = %root.display(), count = written.len(), "combined files written");
    Ok(written)
}

/// Concatenates document contents in order.
pub fn combine(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|doc| doc.content.as_str())
        .collect::<Vec<_>>()
        .join(COMBINED_SEPARATOR)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;

    /// Records every call; optionally fails writes to a given file name.
    #[derive(Default)]
    pub struct RecordingFs {
        pub dirs: RefCell<Vec<PathBuf>>,
        pub files: RefCell<Vec<(PathBuf, String)>>,
        pub fail_on: Option<String>,
    }

    impl FileSystem for RecordingFs {
        fn ensure_dir(&self, path: &Path) -> io::Result<()> {
            self.dirs.borrow_mut().push(path.to_path_buf());
            Ok(())
        }

        fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
            if let Some(name) = &self.fail_on {
                if path.ends_with(name) {
                    return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
                }
            }
            self.files
                .borrow_mut()
                .push((path.to_path_buf(), content.to_string()));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingFs;
    use super::*;
    use crate::error::AppError;
    use tempfile::tempdir;

    fn docs() -> Vec<Document> {
        vec![
            Document::new("query/getKey.mdx", "# getKey"),
            Document::new("types/User.mdx", "# User"),
        ]
    }

    #[test]
    fn test_write_documents_creates_parents() {
        let fs = RecordingFs::default();
        let written = write_documents(Path::new("out"), &docs(), &fs).unwrap();

        assert_eq!(
            written,
            vec![
                PathBuf::from("out/query/getKey.mdx"),
                PathBuf::from("out/types/User.mdx"),
            ]
        );
        assert_eq!(
            *fs.dirs.borrow(),
            vec![PathBuf::from("out/query"), PathBuf::from("out/types")]
        );
    }

    #[test]
    fn test_write_failure_keeps_earlier_files() {
        let fs = RecordingFs {
            fail_on: Some("User.mdx".into()),
            ..Default::default()
        };
        let err = write_documents(Path::new("out"), &docs(), &fs).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
        assert_eq!(fs.files.borrow().len(), 1);
    }

    #[test]
    fn test_write_combined_creates_root_once() {
        let fs = RecordingFs::default();
        let outputs = vec![
            ("a.mdx".to_string(), docs()),
            ("b.mdx".to_string(), vec![Document::new("x", "only")]),
        ];
        write_combined(Path::new("out"), &outputs, &fs).unwrap();

        assert_eq!(*fs.dirs.borrow(), vec![PathBuf::from("out")]);
        let files = fs.files.borrow();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].1, "# getKey\n\n# User");
        assert_eq!(files[1].1, "only");
    }

    #[test]
    fn test_local_fs_overwrites_and_is_idempotent() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("docs");

        write_documents(&root, &docs(), &LocalFs).unwrap();
        let changed = vec![Document::new("query/getKey.mdx", "# changed")];
        write_documents(&root, &changed, &LocalFs).unwrap();

        let content = fs::read_to_string(root.join("query/getKey.mdx")).unwrap();
        assert_eq!(content, "# changed");
        assert!(root.join("types/User.mdx").exists());
    }
}
