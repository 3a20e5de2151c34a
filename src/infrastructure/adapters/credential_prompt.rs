//! 인증 키 입력 포트 구현 어댑터.

use std::io::{self, IsTerminal, Write};

use anyhow::Result;
use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEventKind, KeyModifiers,
};
use crossterm::{execute, terminal};

use crate::application::ports::CredentialPrompt;
use crate::domain::humanize::Credential;

const PROMPT_MESSAGE: &str = "API key not found (config, environment or credential file).";

/// 터미널에서 키를 입력받는 어댑터. TTY면 입력값을 `*`로 가린다.
/// 빈 입력, Esc, Ctrl-C는 거절로 처리한다.
pub struct TerminalCredentialPrompt;

impl CredentialPrompt for TerminalCredentialPrompt {
    fn ask(&self) -> Result<Option<Credential>> {
        eprintln!("{PROMPT_MESSAGE}");
        eprint!("enter API key for this session (empty to cancel): ");
        io::stderr().flush()?;

        let raw = if io::stdin().is_terminal() {
            read_masked()?
        } else {
            read_plain()?
        };

        Ok(raw.and_then(Credential::new))
    }
}

/// 입력을 받을 수 없는 실행(파이프 입력 등)에서 항상 거절하는 어댑터.
pub struct NonInteractivePrompt;

impl CredentialPrompt for NonInteractivePrompt {
    fn ask(&self) -> Result<Option<Credential>> {
        eprintln!("{PROMPT_MESSAGE}");
        eprintln!("hint: set OPENAI_API_KEY (or gateway.api_key_env) to run non-interactively");
        Ok(None)
    }
}

fn read_plain() -> Result<Option<String>> {
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

/// raw mode와 bracketed paste를 해제하는 가드. 패닉/오류 경로에서도 터미널을 복구한다.
struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stderr = io::stderr();
        if let Err(err) = execute!(stderr, EnableBracketedPaste) {
            let _ = terminal::disable_raw_mode();
            return Err(err.into());
        }
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let mut stderr = io::stderr();
        let _ = execute!(stderr, DisableBracketedPaste);
        let _ = terminal::disable_raw_mode();
    }
}

fn read_masked() -> Result<Option<String>> {
    let result = {
        let _guard = RawModeGuard::enter()?;
        read_masked_keys()
    };
    eprintln!();
    result
}

fn read_masked_keys() -> Result<Option<String>> {
    let mut stderr = io::stderr();
    let mut buf = String::new();

    loop {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Enter => return Ok(Some(buf)),
                KeyCode::Esc => return Ok(None),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(None);
                }
                KeyCode::Backspace => {
                    if buf.pop().is_some() {
                        write!(stderr, "\x08 \x08")?;
                    }
                }
                KeyCode::Char(ch) => {
                    buf.push(ch);
                    write!(stderr, "*")?;
                }
                _ => {}
            },
            Event::Paste(text) => {
                let cleaned = clean_pasted_key(&text);
                write!(stderr, "{}", "*".repeat(cleaned.chars().count()))?;
                buf.push_str(&cleaned);
            }
            _ => {}
        }
        stderr.flush()?;
    }
}

/// 붙여넣은 키에서 줄바꿈/제어 문자를 제거한다(복사 시 끝 줄바꿈이 딸려오는 경우).
fn clean_pasted_key(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pasted_key_drops_trailing_newline_and_controls() {
        assert_eq!(clean_pasted_key("sk-abc123\r\n"), "sk-abc123");
        assert_eq!(clean_pasted_key("\tsk-abc\u{7}123"), "sk-abc123");
        assert_eq!(clean_pasted_key("\n"), "");
    }
}
