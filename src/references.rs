//! Filename reference rewriting inside the package markup
//!
//! Media files are referenced by bare file name from a small set of markup
//! files. When an image is renamed, every literal occurrence of the old name
//! in those files is replaced with the new one. This is plain substring
//! replacement: no XML parsing, so any other text that happens to contain the
//! old name is rewritten as well.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ReferenceError;

/// Rewrites media file names in the configured markup files
#[derive(Debug, Clone)]
pub struct ReferenceRewriter {
    files: Vec<PathBuf>,
}

/// Original contents of every file touched by a rewrite, for rollback
#[derive(Debug, Default)]
#[must_use]
pub struct RewriteJournal {
    originals: Vec<(PathBuf, String)>,
}

impl ReferenceRewriter {
    /// `files` are relative to the package root
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self { files }
    }

    /// Replace `old_name` with `new_name` in each reference file under `root`.
    ///
    /// Missing files are skipped; files without an occurrence are not
    /// rewritten. If a write fails, files already rewritten by this call are
    /// restored before the error is returned.
    pub fn rewrite(
        &self,
        root: &Path,
        old_name: &str,
        new_name: &str,
    ) -> Result<RewriteJournal, ReferenceError> {
        let mut journal = RewriteJournal::default();

        for relative in &self.files {
            let path = root.join(relative);
            if !path.is_file() {
                continue;
            }

            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(source) => {
                    journal.restore();
                    return Err(ReferenceError::Io { path, source });
                }
            };
            if !content.contains(old_name) {
                continue;
            }

            let count = content.matches(old_name).count();
            let updated = content.replace(old_name, new_name);
            if let Err(source) = fs::write(&path, updated) {
                // A failed write may have truncated the file
                journal.originals.push((path.clone(), content));
                journal.restore();
                return Err(ReferenceError::Io { path, source });
            }

            log::debug!(
                "Replaced {} occurrence(s) of {} in {}",
                count,
                old_name,
                relative.display()
            );
            journal.originals.push((path, content));
        }

        Ok(journal)
    }
}

impl RewriteJournal {
    /// Number of files that were modified
    pub fn len(&self) -> usize {
        self.originals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }

    /// Put every modified file back to its original text. Best effort:
    /// failures are logged, not returned.
    pub fn restore(self) {
        for (path, content) in self.originals.into_iter().rev() {
            if let Err(e) = fs::write(&path, content) {
                log::error!("Failed to restore {}: {}", path.display(), e);
            }
        }
    }

    /// Accept the rewrite. Dropping the journal without calling `restore`
    /// keeps the edits as well.
    pub fn keep(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn setup() -> (tempfile::TempDir, ReferenceRewriter) {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("word/_rels")).unwrap();
        let rewriter = ReferenceRewriter::new(Settings::default().reference_files);
        (tmp, rewriter)
    }

    #[test]
    fn test_rewrites_document_and_rels() {
        let (tmp, rewriter) = setup();
        let doc = tmp.path().join("word/document.xml");
        let rels = tmp.path().join("word/_rels/document.xml.rels");
        fs::write(&doc, r#"<a:blip name="image1.png"/><a:blip name="image1.png"/>"#).unwrap();
        fs::write(&rels, r#"<Relationship Target="media/image1.png"/>"#).unwrap();

        let journal = rewriter
            .rewrite(tmp.path(), "image1.png", "image1.jpg")
            .unwrap();
        assert_eq!(journal.len(), 2);
        journal.keep();

        let doc_text = fs::read_to_string(&doc).unwrap();
        assert!(!doc_text.contains("image1.png"));
        assert_eq!(doc_text.matches("image1.jpg").count(), 2);
        assert_eq!(
            fs::read_to_string(&rels).unwrap(),
            r#"<Relationship Target="media/image1.jpg"/>"#
        );
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let (tmp, rewriter) = setup();
        let journal = rewriter.rewrite(tmp.path(), "a.png", "a.jpg").unwrap();
        assert!(journal.is_empty());
    }

    #[test]
    fn test_substring_matches_are_rewritten_too() {
        let (tmp, rewriter) = setup();
        let doc = tmp.path().join("word/document.xml");
        fs::write(&doc, "image1.png image11.png").unwrap();

        rewriter
            .rewrite(tmp.path(), "image1.png", "image1.jpg")
            .unwrap()
            .keep();

        // "image11.png" does not contain "image1.png", so only the first changes
        assert_eq!(fs::read_to_string(&doc).unwrap(), "image1.jpg image11.png");

        fs::write(&doc, "logo.gif and my-logo.gif").unwrap();
        rewriter
            .rewrite(tmp.path(), "logo.gif", "logo.jpg")
            .unwrap()
            .keep();
        assert_eq!(
            fs::read_to_string(&doc).unwrap(),
            "logo.jpg and my-logo.jpg"
        );
    }

    #[test]
    fn test_restore_puts_original_text_back() {
        let (tmp, rewriter) = setup();
        let doc = tmp.path().join("word/document.xml");
        fs::write(&doc, "see image2.bmp").unwrap();

        let journal = rewriter
            .rewrite(tmp.path(), "image2.bmp", "image2.jpg")
            .unwrap();
        assert_eq!(fs::read_to_string(&doc).unwrap(), "see image2.jpg");

        journal.restore();
        assert_eq!(fs::read_to_string(&doc).unwrap(), "see image2.bmp");
    }

    #[test]
    fn test_untouched_file_not_journaled() {
        let (tmp, rewriter) = setup();
        fs::write(tmp.path().join("word/document.xml"), "no images here").unwrap();
        let journal = rewriter.rewrite(tmp.path(), "x.png", "x.jpg").unwrap();
        assert!(journal.is_empty());
    }
}
