use crate::core::Storage;
use crate::utils::error::Result;
use std::path::Path;

/// Writes outputs under a base directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
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
    async fn test_write_creates_directories() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("nested/out");
        let storage = LocalStorage::new(base.to_str().unwrap().to_string());

        storage.write_file("quake_map.html", b"<html></html>").await.unwrap();

        assert_eq!(
            std::fs::read(base.join("quake_map.html")).unwrap(),
            b"<html></html>".to_vec()
        );
        assert!(!base.join("earthquakes.csv").exists());
    }
}
