use crate::models::Category;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempDir};
use uuid::Uuid;

const RELATION: &str = "article_class";

/// Renders a single-row ARFF document with the class left unknown.
///
/// The text is embedded between double quotes as-is.
pub fn render(article_text: &str) -> String {
    let classes = Category::ALL
        .iter()
        .map(Category::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "@RELATION {RELATION}\n\
         @ATTRIBUTE text STRING\n\
         @ATTRIBUTE class {{{classes}}}\n\
         @DATA\n\
         \"{article_text}\",?\n"
    )
}

/// A per-request ARFF file. The file and its directory are removed on drop.
pub struct ArffArtifact {
    dir: TempDir,
    path: PathBuf,
}

impl ArffArtifact {
    pub fn create(article_text: &str) -> io::Result<Self> {
        let dir = Builder::new().prefix("article_class").tempdir()?;
        let path = dir.path().join(format!("{}.arff", Uuid::new_v4()));

        let mut f = File::create(&path)?;
        f.write_all(render(article_text).as_bytes())?;
        f.sync_all()?;

        Ok(Self { dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the artifact now, reporting any failure instead of swallowing it.
    pub fn close(self) -> io::Result<()> {
        self.dir.close()
    }
}
