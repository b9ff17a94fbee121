use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::PathBuf;

/// 寫入本機目錄，必要時建立上層資料夾
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn full_path(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(path);

        if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("reports"));

        storage
            .write_file("nested/job_results.txt", b"Total: 0 jobs found")
            .await
            .unwrap();

        let data = std::fs::read(storage.full_path("nested/job_results.txt")).unwrap();
        assert_eq!(data, b"Total: 0 jobs found");
    }

    #[tokio::test]
    async fn test_write_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage.write_file("job_results.json", b"{\"jobs\": [1]}").await.unwrap();
        storage.write_file("job_results.json", b"{\"jobs\": []}").await.unwrap();

        let data = std::fs::read(temp_dir.path().join("job_results.json")).unwrap();
        assert_eq!(data, b"{\"jobs\": []}");
    }
}
