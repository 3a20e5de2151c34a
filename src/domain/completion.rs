//! Chat completion 요청/응답 값 객체.

use serde::Serialize;
use serde_json::Value;

use crate::domain::humanize::TokenUsage;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// `/chat/completions`로 전송되는 본문.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// 단일 user 메시지 요청을 만든다.
    pub fn user_prompt(
        model: impl Into<String>,
        prompt: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.into(),
            }],
            temperature,
            max_tokens,
        }
    }
}

/// 파싱된 최상위 응답 객체. 형태가 달라도 오류 대신 빈 값으로 접근한다.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    pub raw: Value,
}

impl CompletionResponse {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// `choices[0].message.content`, 없으면 빈 문자열.
    pub fn first_choice_text(&self) -> &str {
        self.raw
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// `choices[0].finish_reason`.
    pub fn finish_reason(&self) -> Option<&str> {
        self.raw
            .pointer("/choices/0/finish_reason")
            .and_then(Value::as_str)
    }

    /// 응답이 `max_tokens` 한도에서 잘렸는지 여부.
    pub fn is_truncated(&self) -> bool {
        self.finish_reason() == Some("length")
    }

    pub fn usage(&self) -> TokenUsage {
        let prompt = self
            .raw
            .pointer("/usage/prompt_tokens")
            .and_then(Value::as_u64);
        let completion = self
            .raw
            .pointer("/usage/completion_tokens")
            .and_then(Value::as_u64);
        let total = self
            .raw
            .pointer("/usage/total_tokens")
            .and_then(Value::as_u64)
            .or(match (prompt, completion) {
                (Some(p), Some(c)) => Some(p + c),
                _ => None,
            });

        TokenUsage {
            prompt_tokens: prompt,
            completion_tokens: completion,
            total_tokens: total,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn first_choice_text_defaults_to_empty() {
        let ok = CompletionResponse::new(json!({
            "choices": [{ "message": { "role": "assistant", "content": "hola" } }]
        }));
        assert_eq!(ok.first_choice_text(), "hola");

        let no_choices = CompletionResponse::new(json!({ "choices": [] }));
        assert_eq!(no_choices.first_choice_text(), "");

        let wrong_type = CompletionResponse::new(json!({
            "choices": [{ "message": { "content": 42 } }]
        }));
        assert_eq!(wrong_type.first_choice_text(), "");
    }

    #[test]
    fn length_finish_reason_marks_truncation() {
        let cut = CompletionResponse::new(json!({
            "choices": [{ "message": { "content": "a medias" }, "finish_reason": "length" }]
        }));
        assert_eq!(cut.finish_reason(), Some("length"));
        assert!(cut.is_truncated());

        let done = CompletionResponse::new(json!({
            "choices": [{ "message": { "content": "entero" }, "finish_reason": "stop" }]
        }));
        assert!(!done.is_truncated());
        assert!(!CompletionResponse::new(json!({})).is_truncated());
    }

    #[test]
    fn usage_falls_back_to_sum_when_total_missing() {
        let response = CompletionResponse::new(json!({
            "usage": { "prompt_tokens": 30, "completion_tokens": 12 }
        }));
        assert_eq!(response.usage().total_tokens, Some(42));
        assert_eq!(CompletionResponse::new(json!({})).usage(), TokenUsage::default());
    }

    #[test]
    fn request_serializes_wire_shape() {
        let request = CompletionRequest::user_prompt("gpt-4o-mini", "hi", 0.7, 1024);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hi");
        assert_eq!(value["max_tokens"], 1024);
    }
}
