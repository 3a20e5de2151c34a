//! 결과 텍스트 파일 내보내기 포트 구현 어댑터.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::TextExporter;

/// 내보내기 파일명(고정).
pub const EXPORT_FILENAME: &str = "humanized-text.txt";

/// 지정 디렉터리에 재작성 결과만 담긴 plain text 파일을 쓴다.
pub struct FileTextExporter;

impl TextExporter for FileTextExporter {
    fn export(&self, dir: &Path, text: &str) -> Result<PathBuf> {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create directory {}", dir.display()))?;
        }

        let path = dir.join(EXPORT_FILENAME);
        fs::write(&path, text)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "humanized text exported");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn writes_exact_text_to_fixed_filename() {
        let tmp = TempDir::new().expect("create temp dir");
        let target = tmp.path().join("out");

        let path = FileTextExporter
            .export(&target, "Línea uno.\nLínea dos.")
            .unwrap();

        assert_eq!(path, target.join("humanized-text.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "Línea uno.\nLínea dos.");
    }
}
