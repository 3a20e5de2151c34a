//! 적용 중인 설정(병합 결과, 인증 소스 상태)을 확인하는 유스케이스.

use anyhow::Result;
use serde_json::Value;

use crate::application::ports::ConfigRepository;

/// 설정 점검 결과를 JSON 또는 요약 줄로 제공한다.
pub struct InspectConfigUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
}

impl<'a> InspectConfigUseCase<'a> {
    /// 설정 점검 결과 문자열(pretty JSON)을 생성한다.
    pub fn execute(&self) -> Result<String> {
        self.config_repo.inspect_pretty_json()
    }

    /// 대화형 쉘 시작 화면에 표시할 요약 줄을 만든다. 실패해도 안내 문구로 대체한다.
    pub fn dashboard_lines(&self) -> Vec<String> {
        let raw = match self.execute() {
            Ok(raw) => raw,
            Err(err) => {
                return vec![
                    "Config: error".to_string(),
                    format!("detail: {err}"),
                    "hint: run `/config` to inspect and fix".to_string(),
                ];
            }
        };

        let Ok(value) = serde_json::from_str::<Value>(&raw) else {
            return vec!["Config: loaded (summary unavailable)".to_string()];
        };

        let loaded_count = value
            .get("loaded_paths")
            .and_then(Value::as_array)
            .map(|arr| arr.len())
            .unwrap_or(0);
        let text = |pointer: &str, fallback: &'static str| {
            value
                .pointer(pointer)
                .and_then(Value::as_str)
                .unwrap_or(fallback)
                .to_string()
        };

        let mut lines = vec![format!("Config: ok (loaded files: {loaded_count})")];
        lines.push(format!("Model: {}", text("/effective/model", "-")));
        lines.push(format!("Tone: {}", text("/effective/tone", "natural")));
        lines.push(format!("Language: {}", text("/effective/language", "auto")));

        let resolved = value
            .pointer("/credential/resolved")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if resolved {
            lines.push(format!(
                "API Key: {}",
                text("/credential/source", "resolved")
            ));
        } else {
            lines.push("API Key: not found (you will be asked on first run)".to_string());
        }
        lines
    }
}
