//! 설정 저장소 포트 구현 어댑터.

use anyhow::Result;

use crate::application::ports::ConfigRepository;
use crate::infrastructure::config::{self, Config, LoadedConfig};

/// 계층형 JSON 파일 기반 설정 저장소 어댑터.
pub struct JsonConfigRepository;

impl ConfigRepository for JsonConfigRepository {
    fn load(&self) -> Result<Config> {
        Config::load()
    }

    fn inspect_pretty_json(&self) -> Result<String> {
        Config::inspect_pretty_json()
    }
}

/// 이미 로딩된 설정을 그대로 돌려주는 저장소(라이브러리 직접 호출/테스트용).
pub struct StaticConfigRepository {
    loaded: LoadedConfig,
}

impl StaticConfigRepository {
    pub fn new(config: Config) -> Self {
        Self {
            loaded: LoadedConfig {
                config,
                searched_paths: Vec::new(),
                loaded_paths: Vec::new(),
            },
        }
    }
}

impl ConfigRepository for StaticConfigRepository {
    fn load(&self) -> Result<Config> {
        Ok(self.loaded.config.clone())
    }

    fn inspect_pretty_json(&self) -> Result<String> {
        let inspection = config::ConfigInspection::from_loaded(self.loaded.clone());
        Ok(serde_json::to_string_pretty(&inspection)?)
    }
}
