//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use serde::{Deserialize, Serialize};

use crate::domain::humanize::{OutputLanguage, Tone};

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_DETECTION_TEMPERATURE: f32 = 0.0;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 폼 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// completion API 연동 설정
    #[serde(default)]
    pub gateway: GatewayConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    /// 기본 문체(natural/conversational/formal/youthful)
    pub tone: Option<String>,
    /// 재작성 temperature(0~1)
    pub temperature: Option<f32>,
    /// 응답 언어(auto/es/en)
    pub language: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct GatewayConfig {
    /// API base URL override(선택)
    pub api_base: Option<String>,
    /// 모델 식별자
    pub model: Option<String>,
    /// 응답 최대 토큰
    pub max_tokens: Option<u32>,
    /// 탐지 요청 temperature
    pub detection_temperature: Option<f32>,
    /// HTTP 클라이언트 타임아웃(초)
    pub timeout_secs: Option<u64>,
    /// 인증 키(직접값, 민감정보: 권장하지 않음)
    pub api_key: Option<String>,
    /// 인증 키를 읽을 환경변수 이름
    pub api_key_env: Option<String>,
    /// 인증 키를 보관하는 로컬 파일 경로
    pub credential_file: Option<String>,
}

impl Config {
    /// 설정 문자열을 문체로 해석한다. 알 수 없는 값은 natural.
    pub fn tone(&self) -> Tone {
        self.defaults
            .tone
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    pub fn temperature(&self) -> f32 {
        self.defaults.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    pub fn language(&self) -> OutputLanguage {
        OutputLanguage::from_config(self.defaults.language.as_deref())
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);
        self.gateway.merge_from(other.gateway);
    }
}

impl DefaultsConfig {
    pub fn merge_from(&mut self, other: DefaultsConfig) {
        if other.tone.is_some() {
            self.tone = other.tone;
        }
        if other.temperature.is_some() {
            self.temperature = other.temperature;
        }
        if other.language.is_some() {
            self.language = other.language;
        }
    }
}

impl GatewayConfig {
    pub fn api_base(&self) -> String {
        self.api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }

    pub fn model(&self) -> String {
        self.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    pub fn detection_temperature(&self) -> f32 {
        self.detection_temperature
            .unwrap_or(DEFAULT_DETECTION_TEMPERATURE)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    pub fn api_key_env(&self) -> String {
        self.api_key_env
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_KEY_ENV)
            .to_string()
    }

    pub fn merge_from(&mut self, other: GatewayConfig) {
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
        if other.model.is_some() {
            self.model = other.model;
        }
        if other.max_tokens.is_some() {
            self.max_tokens = other.max_tokens;
        }
        if other.detection_temperature.is_some() {
            self.detection_temperature = other.detection_temperature;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.api_key_env.is_some() {
            self.api_key_env = other.api_key_env;
        }
        if other.credential_file.is_some() {
            self.credential_file = other.credential_file;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_config_overrides_field_by_field() {
        let mut base: Config = serde_json::from_str(
            r#"{
                "defaults": { "tone": "formal", "temperature": 0.2 },
                "gateway": { "model": "gpt-4o", "api_key_env": "MY_KEY" }
            }"#,
        )
        .unwrap();
        let overlay: Config = serde_json::from_str(
            r#"{ "defaults": { "temperature": 0.9 }, "gateway": { "max_tokens": 256 } }"#,
        )
        .unwrap();

        base.merge_from(overlay);

        assert_eq!(base.tone(), Tone::Formal);
        assert_eq!(base.temperature(), 0.9);
        assert_eq!(base.gateway.model(), "gpt-4o");
        assert_eq!(base.gateway.max_tokens(), 256);
        assert_eq!(base.gateway.api_key_env(), "MY_KEY");
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::default();
        assert_eq!(config.tone(), Tone::Natural);
        assert_eq!(config.temperature(), DEFAULT_TEMPERATURE);
        assert_eq!(config.language(), OutputLanguage::SameAsInput);
        assert_eq!(config.gateway.api_base(), DEFAULT_API_BASE);
        assert_eq!(config.gateway.api_key_env(), DEFAULT_API_KEY_ENV);
        assert_eq!(config.gateway.detection_temperature(), 0.0);
    }
}
