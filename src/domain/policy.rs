//! 도메인 정책(재작성/탐지 프롬프트 구성).

use crate::domain::humanize::{DetectionRequest, OutputLanguage, RewriteRequest};

const TEXT_DELIMITER: &str = "\"\"\"";

/// 재작성(휴머나이즈)용 프롬프트를 생성한다. 원문은 이스케이프 없이 그대로 넣는다.
pub fn build_rewrite_prompt(request: &RewriteRequest, language: OutputLanguage) -> String {
    let mut out = String::new();
    out.push_str("Rewrite the following text so that it reads as if a person wrote it.\n");
    out.push_str(&format!(
        "Tone: {} ({}).\n",
        request.tone().code(),
        request.tone().prompt_descriptor()
    ));
    out.push_str("Rules:\n");
    out.push_str("- Keep the original meaning and every fact, name and figure.\n");
    out.push_str("- Improve fluency: vary sentence length and avoid repetitive or formulaic phrasing.\n");
    out.push_str("- Do not add new information and do not summarize.\n");
    out.push_str("- Return only the rewritten text, without preamble, notes or surrounding quotes.\n");
    out.push_str(language.prompt_instruction());
    out.push_str("\n\nText:\n");
    push_delimited(&mut out, request.source_text());
    out
}

/// AI 작성 확률 탐지용 프롬프트를 생성한다. 엄격한 JSON 한 개를 요청한다.
pub fn build_detection_prompt(request: &DetectionRequest, language: OutputLanguage) -> String {
    let mut out = String::new();
    out.push_str(
        "Estimate the probability that the following text was generated by an AI language model.\n",
    );
    out.push_str("Respond with strict JSON only: exactly one object with this shape and nothing before or after it:\n");
    out.push_str("{\"probability\": <integer from 0 to 100>, \"explanation\": \"<one or two sentences>\"}\n");
    out.push_str("Write the explanation value as follows. ");
    out.push_str(language.prompt_instruction());
    out.push_str("\n\nText:\n");
    push_delimited(&mut out, request.source_text());
    out
}

fn push_delimited(out: &mut String, text: &str) {
    out.push_str(TEXT_DELIMITER);
    out.push('\n');
    out.push_str(text);
    out.push('\n');
    out.push_str(TEXT_DELIMITER);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::humanize::Tone;

    const SAMPLES: [&str; 4] = [
        "este texto fue escrito por una maquina",
        "  leading and trailing spaces  ",
        "quotes \"\"\" and {braces} survive",
        "línea uno\nlínea dos\n\n- viñeta",
    ];

    #[test]
    fn rewrite_prompt_contains_literal_text_for_every_tone_and_temperature() {
        for sample in SAMPLES {
            for tone in Tone::ALL {
                for temperature in [0.0, 0.35, 1.0] {
                    let request = RewriteRequest::new(sample, tone, temperature).unwrap();
                    let prompt = build_rewrite_prompt(&request, OutputLanguage::SameAsInput);
                    assert!(prompt.contains(sample), "missing text for {tone}");
                    assert!(prompt.contains(tone.prompt_descriptor()));
                }
            }
        }
    }

    #[test]
    fn rewrite_prompt_wraps_text_in_delimiters() {
        let request = RewriteRequest::new("hola mundo", Tone::Formal, 0.7).unwrap();
        let prompt = build_rewrite_prompt(&request, OutputLanguage::Spanish);
        assert!(prompt.contains("\"\"\"\nhola mundo\n\"\"\""));
        assert!(prompt.contains("Answer in Spanish only."));
    }

    #[test]
    fn detection_prompt_requests_probability_and_explanation() {
        for sample in SAMPLES {
            let prompt =
                build_detection_prompt(&DetectionRequest::new(sample), OutputLanguage::English);
            assert!(prompt.contains("strict JSON"));
            assert!(prompt.contains("\"probability\""));
            assert!(prompt.contains("\"explanation\""));
            assert!(prompt.contains(sample));
        }
    }
}
