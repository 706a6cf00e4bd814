use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

// @module: File and directory utilities

/// A post document found at `<root>/<year>/<slug>/<document_name>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDocument {
    pub year: String,
    /// Slug directory name, used as the post id
    pub slug: String,
    /// Full path of the document
    pub path: PathBuf,
}

impl PostDocument {
    /// Path of the same post under another root
    pub fn mirror_path<P: AsRef<Path>>(&self, root: P, document_name: &str) -> PathBuf {
        root.as_ref().join(&self.year).join(&self.slug).join(document_name)
    }
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path).with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Find every `<root>/<year>/<slug>/<document_name>` file, sorted by path.
    ///
    /// A missing root yields no documents; entries that cannot be read are skipped.
    pub fn find_post_documents<P: AsRef<Path>>(root: P, document_name: &str) -> Vec<PostDocument> {
        let root = root.as_ref();
        if !Self::dir_exists(root) {
            debug!("Post directory {:?} does not exist", root);
            return Vec::new();
        }

        WalkDir::new(root)
            .min_depth(3)
            .max_depth(3)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && entry.file_name() == document_name)
            .filter_map(|entry| {
                let path = entry.into_path();
                let slug_dir = path.parent()?;
                let year_dir = slug_dir.parent()?;
                Some(PostDocument {
                    year: year_dir.file_name()?.to_string_lossy().into_owned(),
                    slug: slug_dir.file_name()?.to_string_lossy().into_owned(),
                    path,
                })
            })
            .collect()
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file, replacing it atomically
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        Self::ensure_dir(parent)?;

        let mut file = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temporary file in: {:?}", parent))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write to file: {:?}", path))?;
        file.persist(path)
            .with_context(|| format!("Failed to write to file: {:?}", path))?;

        Ok(())
    }
}
