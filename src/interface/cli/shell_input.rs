//! 대화형 쉘 한 줄 입력기.
//! `/`로 시작하면 입력 중 명령 추천을 입력줄 아래에 표시한다.

use std::env;
use std::io::{self, IsTerminal, Write};

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEventKind, KeyModifiers,
};
use crossterm::execute;
use crossterm::style::{Color, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType};

use crate::interface::cli::render::{clip_line_display, display_width};

pub struct Suggestion {
    pub slash: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub const SUGGESTIONS: [Suggestion; 12] = [
    Suggestion {
        slash: "/run",
        usage: "/run",
        description: "humanize the current draft",
    },
    Suggestion {
        slash: "/humanize",
        usage: "/humanize <text>",
        description: "replace the draft and run",
    },
    Suggestion {
        slash: "/tone",
        usage: "/tone <natural|conversational|formal|youthful>",
        description: "set the rewrite tone",
    },
    Suggestion {
        slash: "/temperature",
        usage: "/temperature <0..1>",
        description: "set the rewrite temperature",
    },
    Suggestion {
        slash: "/show",
        usage: "/show",
        description: "show draft, options and last result",
    },
    Suggestion {
        slash: "/copy",
        usage: "/copy",
        description: "copy the humanized text",
    },
    Suggestion {
        slash: "/download",
        usage: "/download [dir]",
        description: "save humanized-text.txt",
    },
    Suggestion {
        slash: "/clear",
        usage: "/clear",
        description: "reset draft and result",
    },
    Suggestion {
        slash: "/key",
        usage: "/key",
        description: "forget the session API key",
    },
    Suggestion {
        slash: "/config",
        usage: "/config",
        description: "show effective merged config",
    },
    Suggestion {
        slash: "/help",
        usage: "/help",
        description: "list commands",
    },
    Suggestion {
        slash: "/exit",
        usage: "/exit",
        description: "exit interactive shell",
    },
];

const PROMPT: &str = "> ";

/// 쉘 한 줄 입력을 읽는다. EOF면 `None`.
/// - TTY + 지원 터미널: 실시간 추천 + 방향키 선택
/// - non-TTY/미지원 터미널: 일반 라인 입력
pub fn read_shell_input() -> Result<Option<String>> {
    if !supports_interactive_input() {
        return read_line_fallback();
    }
    match read_line_interactive() {
        Ok(line) => Ok(line),
        Err(err) => {
            tracing::debug!(error = %err, "interactive input failed, falling back to line mode");
            read_line_fallback()
        }
    }
}

fn supports_interactive_input() -> bool {
    if !io::stdout().is_terminal() || !io::stdin().is_terminal() {
        return false;
    }
    !matches!(env::var("TERM"), Ok(term) if term.eq_ignore_ascii_case("dumb"))
}

fn read_line_fallback() -> Result<Option<String>> {
    print!("{PROMPT}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

pub fn match_suggestions(input: &str) -> Vec<&'static Suggestion> {
    if !input.starts_with('/') || input.contains(' ') {
        return Vec::new();
    }
    let query = input.to_ascii_lowercase();
    SUGGESTIONS
        .iter()
        .filter(|s| s.slash.starts_with(&query))
        .collect()
}

/// 명령 이름만 입력된 상태에서 Enter를 누르면 선택된 추천으로 확정한다.
fn finalize_input(input: &str, suggestions: &[&Suggestion], selected: usize) -> String {
    match suggestions.get(selected) {
        Some(item) if input.starts_with('/') && !input.contains(' ') => item.slash.to_string(),
        _ => input.to_string(),
    }
}

/// 인자가 필요한 명령은 공백을 붙여 인자 입력 상태로 확장한다.
fn expand_input(input: &str, suggestions: &[&Suggestion], selected: usize) -> Option<String> {
    const NEEDS_ARGS: &[&str] = &["/humanize", "/tone", "/temperature"];
    if input.contains(' ') || !input.starts_with('/') {
        return None;
    }
    let slash = suggestions.get(selected)?.slash;
    NEEDS_ARGS.contains(&slash).then(|| format!("{slash} "))
}

struct InputGuard;

impl InputGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        // 붙여넣기를 키 입력이 아닌 한 번의 Paste 이벤트로 받는다.
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnableBracketedPaste) {
            let _ = terminal::disable_raw_mode();
            return Err(err.into());
        }
        Ok(Self)
    }
}

impl Drop for InputGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, DisableBracketedPaste, cursor::Show, ResetColor);
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
    }
}

fn read_line_interactive() -> Result<Option<String>> {
    let mut stdout = io::stdout();
    let _guard = InputGuard::enter()?;

    let mut input = String::new();
    let mut cursor_chars = 0usize;
    let mut selected = 0usize;

    loop {
        let suggestions = match_suggestions(&input);
        selected = selected.min(suggestions.len().saturating_sub(1));
        render_frame(&mut stdout, &input, cursor_chars, &suggestions, selected)?;

        let key = match event::read()? {
            Event::Paste(text) => {
                cursor_chars = insert_pasted(&mut input, cursor_chars, &text);
                continue;
            }
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };

        match key.code {
            KeyCode::Enter => {
                if let Some(expanded) = expand_input(&input, &suggestions, selected) {
                    input = expanded;
                    cursor_chars = input.chars().count();
                    continue;
                }
                let line = finalize_input(&input, &suggestions, selected);
                finish_frame(&mut stdout, &line)?;
                return Ok(Some(line));
            }
            KeyCode::Backspace if cursor_chars > 0 => {
                remove_char_at(&mut input, cursor_chars - 1);
                cursor_chars -= 1;
            }
            KeyCode::Delete if cursor_chars < input.chars().count() => {
                remove_char_at(&mut input, cursor_chars);
            }
            KeyCode::Left => cursor_chars = cursor_chars.saturating_sub(1),
            KeyCode::Right => cursor_chars = (cursor_chars + 1).min(input.chars().count()),
            KeyCode::Home => cursor_chars = 0,
            KeyCode::End => cursor_chars = input.chars().count(),
            KeyCode::Up => selected = selected.saturating_sub(1),
            KeyCode::Down => selected += 1,
            KeyCode::Tab => {
                if let Some(item) = suggestions.get(selected) {
                    input = item.slash.to_string();
                    cursor_chars = input.chars().count();
                }
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                finish_frame(&mut stdout, &input)?;
                return Ok(None);
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                finish_frame(&mut stdout, &input)?;
                return Ok(Some("/exit".to_string()));
            }
            KeyCode::Char(ch)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                insert_char_at(&mut input, cursor_chars, ch);
                cursor_chars += 1;
            }
            _ => {}
        }
    }
}

/// 입력줄과 추천 목록을 현재 커서 위치에 다시 그린다.
fn render_frame(
    stdout: &mut io::Stdout,
    input: &str,
    cursor_chars: usize,
    suggestions: &[&Suggestion],
    selected: usize,
) -> Result<()> {
    let (w, _) = terminal::size().unwrap_or((100, 30));
    let width = usize::from(w).max(20) - 1;

    execute!(
        stdout,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::FromCursorDown)
    )?;
    write!(stdout, "{}", clip_line_display(&format!("{PROMPT}{input}"), width))?;

    for (idx, item) in suggestions.iter().enumerate() {
        let marker = if idx == selected { ">" } else { " " };
        let color = if idx == selected {
            Color::Cyan
        } else {
            Color::DarkGrey
        };
        let line = format!("{marker} {:<14} {}", item.usage, item.description);
        execute!(stdout, SetForegroundColor(color))?;
        write!(stdout, "\r\n{}", clip_line_display(&line, width))?;
        execute!(stdout, ResetColor)?;
    }
    if !suggestions.is_empty() {
        execute!(stdout, cursor::MoveUp(suggestions.len() as u16))?;
    }

    let before: String = input.chars().take(cursor_chars).collect();
    let col = (display_width(PROMPT) + display_width(&before)).min(width);
    execute!(stdout, cursor::MoveToColumn(col as u16))?;
    stdout.flush()?;
    Ok(())
}

fn finish_frame(stdout: &mut io::Stdout, line: &str) -> Result<()> {
    execute!(
        stdout,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::FromCursorDown)
    )?;
    write!(stdout, "{PROMPT}{line}\r\n")?;
    stdout.flush()?;
    Ok(())
}

/// 붙여넣은 텍스트를 커서 위치에 넣고 새 커서 위치를 돌려준다.
/// 한 줄 입력이므로 줄바꿈은 공백으로 바꾸고 나머지 제어 문자는 버린다.
fn insert_pasted(input: &mut String, cursor_chars: usize, text: &str) -> usize {
    let mut cursor = cursor_chars;
    for ch in text.chars() {
        let ch = match ch {
            '\n' => ' ',
            c if c.is_control() => continue,
            c => c,
        };
        insert_char_at(input, cursor, ch);
        cursor += 1;
    }
    cursor
}

fn insert_char_at(input: &mut String, char_idx: usize, ch: char) {
    let byte_idx = byte_index_at_char(input, char_idx);
    input.insert(byte_idx, ch);
}

fn remove_char_at(input: &mut String, char_idx: usize) {
    let start = byte_index_at_char(input, char_idx);
    let end = byte_index_at_char(input, char_idx + 1);
    if start < end {
        input.replace_range(start..end, "");
    }
}

fn byte_index_at_char(input: &str, char_idx: usize) -> usize {
    input
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(input.len())
}
