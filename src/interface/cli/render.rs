//! 실행 결과(상태) 출력 렌더러.

use anyhow::Result;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::domain::detection::DetectionResult;
use crate::domain::humanize::TokenUsage;
use crate::domain::state::OrchestrationState;

const BOX_WIDTH: usize = 72;
const BAR_CELLS: usize = 20;

/// 현재 상태를 사람이 읽는 줄 목록으로 변환한다.
pub fn render_state(state: &OrchestrationState) -> Vec<String> {
    match state {
        OrchestrationState::Idle => vec!["(no result yet)".to_string()],
        OrchestrationState::Processing => vec!["(processing...)".to_string()],
        OrchestrationState::Completed {
            humanized,
            detection,
            usage,
        } => {
            let mut lines = boxed("Humanized text", humanized);
            lines.push(String::new());
            lines.extend(render_detection(detection));
            if let Some(line) = render_usage(usage) {
                lines.push(line);
            }
            lines
        }
        OrchestrationState::Failed { message, humanized } => {
            let mut lines = vec![format!("error: {message}")];
            if let Some(text) = humanized {
                lines.push("the rewrite succeeded before the failure; keeping it:".to_string());
                lines.extend(boxed("Humanized text", text));
            }
            lines
        }
    }
}

/// `--json` 출력. 상태 값을 그대로 직렬화한다.
pub fn render_json(state: &OrchestrationState) -> Result<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

fn render_detection(detection: &DetectionResult) -> Vec<String> {
    let mut lines = Vec::new();
    match detection.probability() {
        Some(probability) => {
            let value = probability.value();
            lines.push(format!(
                "AI probability: {} {value}%",
                probability_bar(value)
            ));
        }
        None => lines.push("AI probability: unscored".to_string()),
    }
    if !detection.explanation().is_empty() {
        for line in wrap_text(detection.explanation(), BOX_WIDTH) {
            lines.push(format!("  {line}"));
        }
    }
    lines
}

fn render_usage(usage: &TokenUsage) -> Option<String> {
    let total = usage.total_tokens?;
    Some(format!(
        "tokens: {total} (prompt {}, completion {})",
        usage.prompt_tokens.unwrap_or(0),
        usage.completion_tokens.unwrap_or(0)
    ))
}

fn probability_bar(value: u8) -> String {
    let filled = (usize::from(value) * BAR_CELLS + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_CELLS - filled))
}

fn boxed(title: &str, text: &str) -> Vec<String> {
    let inner = BOX_WIDTH - 4;
    let mut lines = vec![format!("+{}+", "-".repeat(BOX_WIDTH - 2))];
    lines.push(format!("| {} |", pad_line_display(title, inner)));
    lines.push(format!("+{}+", "-".repeat(BOX_WIDTH - 2)));
    for line in wrap_text(text, inner) {
        lines.push(format!("| {} |", pad_line_display(&line, inner)));
    }
    lines.push(format!("+{}+", "-".repeat(BOX_WIDTH - 2)));
    lines
}

/// 표시 폭 기준 줄바꿈. 원문의 줄 구분은 유지하고 너무 긴 단어는 강제로 자른다.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            out.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if current.is_empty() {
                display_width(word)
            } else {
                display_width(&current) + 1 + display_width(word)
            };
            if needed <= width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                continue;
            }

            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            if display_width(word) <= width {
                current.push_str(word);
                continue;
            }
            for ch in word.chars() {
                if !current.is_empty() && display_width(&current) + char_display_width(ch) > width
                {
                    out.push(std::mem::take(&mut current));
                }
                current.push(ch);
            }
        }
        if !current.is_empty() {
            out.push(current);
        }
    }
    out
}

/// 표시 폭이 `max_width`를 넘으면 `...`로 자른다.
pub fn clip_line_display(line: &str, max_width: usize) -> String {
    if display_width(line) <= max_width {
        return line.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let cap = max_width - 3;
    let mut out = String::new();
    let mut used = 0usize;
    for ch in line.chars() {
        let cw = char_display_width(ch);
        if used + cw > cap {
            break;
        }
        out.push(ch);
        used += cw;
    }
    out.push_str("...");
    out
}

pub fn pad_line_display(line: &str, width: usize) -> String {
    let clipped = clip_line_display(line, width);
    let used = display_width(&clipped);
    format!("{clipped}{}", " ".repeat(width.saturating_sub(used)))
}

pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

pub fn char_display_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}
