//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;

use super::loader::LoadedConfig;
use super::resolve::{credential_file_path, env_api_key, inline_api_key, read_credential_file};
use crate::application::config::{Config, DefaultsConfig};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsConfig,
    pub effective: EffectiveSettings,
    pub credential: CredentialInspection,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveSettings {
    pub tone: String,
    pub temperature: f32,
    pub language: String,
    pub api_base: String,
    pub model: String,
    pub max_tokens: u32,
    pub detection_temperature: f32,
    pub timeout_secs: u64,
}

/// 인증 키 해석 상태. 키 값 자체는 절대 포함하지 않는다.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialInspection {
    pub source: Option<String>,
    pub resolved: bool,
    pub api_key_env: String,
    pub credential_file: Option<String>,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = &loaded.config;
        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            defaults: config.defaults.clone(),
            effective: EffectiveSettings {
                tone: config.tone().code().to_string(),
                temperature: config.temperature(),
                language: config.language().code().to_string(),
                api_base: config.gateway.api_base(),
                model: config.gateway.model(),
                max_tokens: config.gateway.max_tokens(),
                detection_temperature: config.gateway.detection_temperature(),
                timeout_secs: config.gateway.timeout_secs(),
            },
            credential: credential_inspection(config),
        }
    }
}

/// 세션 입력값을 제외한 영속 소스(inline -> env -> file) 기준으로 상태를 계산한다.
fn credential_inspection(config: &Config) -> CredentialInspection {
    let gateway = &config.gateway;
    let (env_name, env_value) = env_api_key(gateway);
    let file_path = credential_file_path(gateway);

    let source = if inline_api_key(gateway).is_some() {
        Some("inline".to_string())
    } else if env_value.is_some() {
        Some(format!("env:{env_name}"))
    } else if let Some(path) = file_path.as_deref()
        && read_credential_file(path).is_some()
    {
        Some(format!("file:{}", path.display()))
    } else {
        None
    };

    CredentialInspection {
        resolved: source.is_some(),
        source,
        api_key_env: env_name,
        credential_file: file_path.map(|p| p.display().to_string()),
    }
}
