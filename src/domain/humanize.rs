//! 휴머나이즈 도메인 엔티티/값 객체.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// 한 번의 실행 요청(폼 입력값). tone/temperature가 없으면 설정 기본값을 사용한다.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub text: String,
    pub tone: Option<Tone>,
    pub temperature: Option<f32>,
}

/// 재작성 문체.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Natural,
    Conversational,
    Formal,
    Youthful,
}

impl Tone {
    pub const ALL: [Tone; 4] = [
        Tone::Natural,
        Tone::Conversational,
        Tone::Formal,
        Tone::Youthful,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::Natural => "natural",
            Self::Conversational => "conversational",
            Self::Formal => "formal",
            Self::Youthful => "youthful",
        }
    }

    /// 프롬프트에 넣을 문체 설명(영문).
    pub fn prompt_descriptor(self) -> &'static str {
        match self {
            Self::Natural => "natural and fluent, like a careful human writer",
            Self::Conversational => "conversational, close to how people actually talk",
            Self::Formal => "formal and professional",
            Self::Youthful => "youthful, relaxed and casual",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Tone {
    type Err = String;

    /// 지원값: natural, conversational/conversacional, formal, youthful/juvenil
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "natural" => Ok(Self::Natural),
            "conversational" | "conversacional" => Ok(Self::Conversational),
            "formal" => Ok(Self::Formal),
            "youthful" | "juvenil" => Ok(Self::Youthful),
            other => Err(format!(
                "unknown tone '{other}' (expected natural, conversational, formal or youthful)"
            )),
        }
    }
}

/// 모델 응답 언어 정책.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputLanguage {
    /// 입력 텍스트와 같은 언어
    SameAsInput,
    Spanish,
    English,
}

impl OutputLanguage {
    /// 설정 문자열을 언어 정책으로 변환한다.
    /// 지원값: auto, es/spanish, en/english (미지정/알수없음은 auto)
    pub fn from_config(value: Option<&str>) -> Self {
        let Some(raw) = value else {
            return Self::SameAsInput;
        };

        match raw.trim().to_ascii_lowercase().as_str() {
            "es" | "spanish" | "español" => Self::Spanish,
            "en" | "english" => Self::English,
            _ => Self::SameAsInput,
        }
    }

    /// 프롬프트에 넣을 출력 언어 지시문(영문).
    pub fn prompt_instruction(self) -> &'static str {
        match self {
            Self::SameAsInput => "Answer in the same language as the original text.",
            Self::Spanish => "Answer in Spanish only.",
            Self::English => "Answer in English only.",
        }
    }

    /// inspection 출력용 코드값.
    pub fn code(self) -> &'static str {
        match self {
            Self::SameAsInput => "auto",
            Self::Spanish => "es",
            Self::English => "en",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("source text is empty")]
    EmptyText,
    #[error("temperature must be between 0 and 1 (got {0})")]
    TemperatureOutOfRange(f32),
}

/// 재작성(휴머나이즈) 요청.
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteRequest {
    source_text: String,
    tone: Tone,
    temperature: f32,
}

impl RewriteRequest {
    pub fn new(
        source_text: impl Into<String>,
        tone: Tone,
        temperature: f32,
    ) -> Result<Self, RequestError> {
        let source_text = source_text.into();
        if source_text.trim().is_empty() {
            return Err(RequestError::EmptyText);
        }
        if !(0.0..=1.0).contains(&temperature) {
            return Err(RequestError::TemperatureOutOfRange(temperature));
        }

        Ok(Self {
            source_text,
            tone,
            temperature,
        })
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}

/// AI 작성 확률 탐지 요청. 재작성 결과가 아니라 원문을 평가한다.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionRequest {
    source_text: String,
}

impl DetectionRequest {
    pub fn new(source_text: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
        }
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }
}

/// Bearer 인증 값. 로그/디버그 출력에 노출되지 않는다.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// 공백만 있는 값은 인증 값으로 취급하지 않는다.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenUsage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

impl TokenUsage {
    pub fn add_from(&mut self, other: &TokenUsage) {
        self.prompt_tokens = sum_optional(self.prompt_tokens, other.prompt_tokens);
        self.completion_tokens = sum_optional(self.completion_tokens, other.completion_tokens);
        self.total_tokens = sum_optional(self.total_tokens, other.total_tokens);
    }
}

fn sum_optional(a: Option<u64>, b: Option<u64>) -> Option<u64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x + y),
        (Some(x), None) => Some(x),
        (None, Some(y)) => Some(y),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_accepts_spanish_labels() {
        assert_eq!("Conversacional".parse::<Tone>(), Ok(Tone::Conversational));
        assert_eq!("juvenil".parse::<Tone>(), Ok(Tone::Youthful));
        assert!("sarcastic".parse::<Tone>().is_err());
    }

    #[test]
    fn rewrite_request_rejects_blank_text_and_bad_temperature() {
        assert_eq!(
            RewriteRequest::new("   \n", Tone::Natural, 0.5),
            Err(RequestError::EmptyText)
        );
        assert_eq!(
            RewriteRequest::new("hola", Tone::Natural, 1.5),
            Err(RequestError::TemperatureOutOfRange(1.5))
        );
        assert!(RewriteRequest::new("hola", Tone::Formal, 0.0).is_ok());
        assert!(RewriteRequest::new("hola", Tone::Formal, 1.0).is_ok());
    }

    #[test]
    fn credential_debug_is_redacted() {
        let credential = Credential::new(" sk-secret ").unwrap();
        assert_eq!(credential.expose(), "sk-secret");
        assert_eq!(format!("{credential:?}"), "Credential(***)");
        assert!(Credential::new("  ").is_none());
    }

    #[test]
    fn usage_sums_partial_counts() {
        let mut total = TokenUsage {
            prompt_tokens: Some(10),
            completion_tokens: None,
            total_tokens: Some(10),
        };
        total.add_from(&TokenUsage {
            prompt_tokens: Some(5),
            completion_tokens: Some(7),
            total_tokens: Some(12),
        });
        assert_eq!(total.prompt_tokens, Some(15));
        assert_eq!(total.completion_tokens, Some(7));
        assert_eq!(total.total_tokens, Some(22));
    }
}
