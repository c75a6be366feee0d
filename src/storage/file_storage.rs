use crate::{error::Result, storage::Storage};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based storage; each key is a JSON file in one directory
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const TASKFLOW_DIR: &'static str = ".taskflow";

    /// Creates a FileStorage rooted at `<base>/.taskflow`
    pub fn new(base: impl AsRef<Path>) -> Self {
        Self {
            root_path: base.as_ref().join(Self::TASKFLOW_DIR),
        }
    }

    /// Creates a FileStorage that writes directly into `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            root_path: dir.as_ref().to_path_buf(),
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn key_file(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' => '_',
                c => c,
            })
            .collect();
        self.root_path.join(format!("{safe}.json"))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let file_path = self.key_file(key);

        if !file_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&file_path).await?;
        Ok(Some(contents))
    }

    async fn save(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        // Write to a sibling file first so a crash never leaves half a record
        let file_path = self.key_file(key);
        let tmp_path = file_path.with_extension("json.tmp");
        fs::write(&tmp_path, value).await?;
        fs::rename(&tmp_path, &file_path).await?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let file_path = self.key_file(key);

        if file_path.exists() {
            fs::remove_file(file_path).await?;
        }
        Ok(())
    }
}
