//! 설정 파일 탐색/병합 로더.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::config::Config;

pub const CONFIG_ENV: &str = "HUMANIZER_CONFIG";

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub searched_paths: Vec<PathBuf>,
    pub loaded_paths: Vec<PathBuf>,
}

/// 우선순위 경로를 순회해 JSON 설정을 병합한다.
pub(crate) fn load_merged_config() -> Result<LoadedConfig> {
    load_from_paths(config_paths())
}

/// 주어진 경로를 낮은 우선순위 -> 높은 우선순위 순서로 병합한다.
/// 존재하지 않는 파일은 건너뛰고, 파일이 하나도 없으면 기본 설정을 사용한다.
pub fn load_from_paths(paths: Vec<PathBuf>) -> Result<LoadedConfig> {
    let mut merged = Config::default();
    let mut loaded_paths = Vec::new();

    for path in &paths {
        if !path.exists() {
            continue;
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let parsed: Config = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse JSON in {}", path.display()))?;
        merged.merge_from(parsed);
        loaded_paths.push(path.to_path_buf());
        tracing::debug!(path = %path.display(), "config file merged");
    }

    Ok(LoadedConfig {
        config: merged,
        searched_paths: paths,
        loaded_paths,
    })
}

/// 시스템 + 사용자 + 프로젝트 + 명시 경로 순으로 병합 경로를 구성한다.
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/humanizer/config.json")];

    if let Some(base) = dirs::config_dir() {
        paths.push(base.join("humanizer").join("config.json"));
    }

    paths.push(PathBuf::from(".humanizer/config.json"));

    if let Ok(path) = env::var(CONFIG_ENV) {
        paths.push(Path::new(&path).to_path_buf());
    }

    dedup_paths(paths)
}

fn dedup_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for p in paths {
        if !out.contains(&p) {
            out.push(p);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::domain::humanize::Tone;

    #[test]
    fn merges_existing_files_in_priority_order() {
        let tmp = TempDir::new().expect("create temp dir");
        let user = tmp.path().join("user.json");
        let project = tmp.path().join("project.json");
        let missing = tmp.path().join("missing.json");
        fs::write(
            &user,
            r#"{ "defaults": { "tone": "formal" }, "gateway": { "model": "gpt-4o" } }"#,
        )
        .unwrap();
        fs::write(&project, r#"{ "gateway": { "model": "gpt-4.1-mini" } }"#).unwrap();

        let loaded = load_from_paths(vec![user.clone(), missing, project.clone()]).unwrap();

        assert_eq!(loaded.searched_paths.len(), 3);
        assert_eq!(loaded.loaded_paths, vec![user, project]);
        assert_eq!(loaded.config.tone(), Tone::Formal);
        assert_eq!(loaded.config.gateway.model(), "gpt-4.1-mini");
    }

    #[test]
    fn invalid_json_names_the_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let broken = tmp.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();

        let err = load_from_paths(vec![broken]).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }

    #[test]
    fn duplicate_paths_are_collapsed() {
        let paths = dedup_paths(vec![
            PathBuf::from("a.json"),
            PathBuf::from("b.json"),
            PathBuf::from("a.json"),
        ]);
        assert_eq!(paths, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
    }
}
