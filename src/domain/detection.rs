//! 탐지 응답(자유 형식 텍스트)에서 JSON 결과를 best-effort로 추출한다.

use serde::Serialize;
use serde_json::Value;

/// 0~100 범위가 보장된 AI 작성 확률(%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Probability(u8);

impl Probability {
    pub fn new(value: i64) -> Option<Self> {
        if (0..=100).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// 탐지 결과. 점수가 없으면 모델 원문(또는 설명)만 보존한다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetectionResult {
    Scored {
        probability: Probability,
        explanation: String,
    },
    Unscored {
        explanation: String,
    },
}

impl DetectionResult {
    pub fn probability(&self) -> Option<Probability> {
        match self {
            Self::Scored { probability, .. } => Some(*probability),
            Self::Unscored { .. } => None,
        }
    }

    pub fn explanation(&self) -> &str {
        match self {
            Self::Scored { explanation, .. } | Self::Unscored { explanation } => explanation,
        }
    }
}

/// 응답 문자열을 탐지 결과로 변환한다. 실패해도 오류를 내지 않는다.
///
/// - 첫 `{`부터 마지막 `}`까지를 JSON 후보로 본다.
/// - `probability`가 0~100 정수가 아니면 점수는 버리고 `explanation`은 유지한다.
pub fn extract_detection(raw: &str) -> DetectionResult {
    let fallback = || DetectionResult::Unscored {
        explanation: raw.trim().to_string(),
    };

    let Some(candidate) = json_object_span(raw) else {
        tracing::debug!("detection response has no JSON object span");
        return fallback();
    };

    let map = match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => map,
        Ok(_) => return fallback(),
        Err(err) => {
            tracing::debug!(error = %err, "detection JSON candidate did not parse");
            return fallback();
        }
    };

    let explanation = map
        .get("explanation")
        .and_then(Value::as_str)
        .map(|text| text.trim().to_string());

    match map.get("probability").and_then(parse_probability) {
        Some(probability) => DetectionResult::Scored {
            probability,
            explanation: explanation.unwrap_or_default(),
        },
        None => {
            tracing::debug!("detection probability missing or out of range");
            DetectionResult::Unscored {
                explanation: explanation.unwrap_or_else(|| raw.trim().to_string()),
            }
        }
    }
}

fn json_object_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

fn parse_probability(value: &Value) -> Option<Probability> {
    // 정수 JSON 숫자만 허용한다(87.5, "87" 등은 거부).
    value.as_i64().and_then(Probability::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(probability: i64, explanation: &str) -> DetectionResult {
        DetectionResult::Scored {
            probability: Probability::new(probability).unwrap(),
            explanation: explanation.to_string(),
        }
    }

    fn unscored(explanation: &str) -> DetectionResult {
        DetectionResult::Unscored {
            explanation: explanation.to_string(),
        }
    }

    #[test]
    fn extracts_object_embedded_in_noise() {
        let result = extract_detection(r#"noise {"probability": 42, "explanation": "ok"} trailing"#);
        assert_eq!(result, scored(42, "ok"));
    }

    #[test]
    fn no_braces_degrades_to_raw_text() {
        let result = extract_detection("no braces here");
        assert_eq!(result, unscored("no braces here"));
        assert_eq!(result.probability(), None);
    }

    #[test]
    fn closing_brace_before_opening_is_unscored() {
        assert_eq!(extract_detection("} oops {"), unscored("} oops {"));
    }

    #[test]
    fn out_of_range_probability_keeps_explanation() {
        let result = extract_detection(r#"{"probability": 150, "explanation": "x"}"#);
        assert_eq!(result, unscored("x"));

        let negative = extract_detection(r#"{"probability": -3, "explanation": "y"}"#);
        assert_eq!(negative, unscored("y"));
    }

    #[test]
    fn wrong_probability_type_is_unscored() {
        let result = extract_detection(r#"{"probability": "seventy", "explanation": "x"}"#);
        assert_eq!(result, unscored("x"));

        let fractional = extract_detection(r#"{"probability": 87.5, "explanation": "z"}"#);
        assert_eq!(fractional, unscored("z"));
    }

    #[test]
    fn invalid_json_keeps_whole_response() {
        let raw = "Probability: {about 80 percent}";
        assert_eq!(extract_detection(raw), unscored(raw));
    }

    #[test]
    fn missing_explanation_on_rejected_score_falls_back_to_raw() {
        let raw = r#"{"probability": 101}"#;
        assert_eq!(extract_detection(raw), unscored(raw));
    }

    #[test]
    fn scored_without_explanation_has_empty_text() {
        assert_eq!(extract_detection(r#"{"probability": 0}"#), scored(0, ""));
        assert_eq!(
            extract_detection("```json\n{\"probability\": 100, \"explanation\": \" all \"}\n```"),
            scored(100, "all")
        );
    }
}
