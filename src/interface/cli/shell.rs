//! `humanizer` 대화형 쉘 인터페이스.
//! 일반 줄은 폼 초안에 누적되고, `/command`로 실행/설정/결과 작업을 한다.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Result;

use crate::application::usecases::humanize_text::Orchestrator;
use crate::application::usecases::result_actions::ActionOutcome;
use crate::domain::humanize::{RunOptions, Tone};
use crate::interface::cli::composition::AppComposition;
use crate::interface::cli::render::{pad_line_display, render_state};
use crate::interface::cli::shell_input::{SUGGESTIONS, read_shell_input};

/// 폼 입력값(초안 텍스트 + 옵션). 실행 상태는 오케스트레이터가 소유한다.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FormDraft {
    lines: Vec<String>,
    tone: Option<Tone>,
    temperature: Option<f32>,
}

impl FormDraft {
    pub fn push_line(&mut self, line: &str) {
        if line.trim().is_empty() && self.lines.is_empty() {
            return;
        }
        self.lines.push(line.to_string());
    }

    pub fn replace_text(&mut self, text: &str) {
        self.lines = text.lines().map(str::to_string).collect();
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.trim().is_empty())
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            text: self.text(),
            tone: self.tone,
            temperature: self.temperature,
        }
    }

    /// 초안 텍스트만 비운다. 톤/온도 선택은 유지한다.
    pub fn clear_text(&mut self) {
        self.lines.clear();
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ShellCommand {
    Exit,
    Help,
    Config,
    Run,
    Humanize(String),
    SetTone(Tone),
    SetTemperature(f32),
    Show,
    Copy,
    Download(PathBuf),
    Clear,
    ForgetKey,
    AppendLine(String),
}

/// 대화형 입력으로 초안을 모으고 `/command`를 처리한다.
pub async fn run_shell(composition: &AppComposition) -> Result<()> {
    print_welcome(composition);
    io::stdout().flush()?;

    let mut orchestrator = composition.orchestrator();
    let mut draft = FormDraft::default();

    while let Some(raw) = read_shell_input()? {
        match parse_shell_command(&raw) {
            Ok(ShellCommand::Exit) => break,
            Ok(command) => {
                if let Err(err) =
                    execute_command(composition, &mut orchestrator, &mut draft, command).await
                {
                    eprintln!("error: {err:#}");
                }
            }
            Err(msg) => {
                eprintln!("error: {msg}");
                eprintln!("hint: type / for command suggestions or /help");
            }
        }
    }

    Ok(())
}

async fn execute_command(
    composition: &AppComposition,
    orchestrator: &mut Orchestrator<'_>,
    draft: &mut FormDraft,
    command: ShellCommand,
) -> Result<()> {
    match command {
        ShellCommand::Exit => {}
        ShellCommand::AppendLine(line) => draft.push_line(&line),
        ShellCommand::Help => print_help(),
        ShellCommand::Config => {
            println!("{}", composition.inspect_config_usecase().execute()?);
        }
        ShellCommand::Run => run_draft(orchestrator, draft).await,
        ShellCommand::Humanize(text) => {
            draft.replace_text(&text);
            run_draft(orchestrator, draft).await;
        }
        ShellCommand::SetTone(tone) => {
            draft.tone = Some(tone);
            println!("tone: {tone}");
        }
        ShellCommand::SetTemperature(value) => {
            draft.temperature = Some(value);
            println!("temperature: {value:.2}");
        }
        ShellCommand::Show => print_form(orchestrator, draft),
        ShellCommand::Copy => {
            match composition
                .copy_result_usecase()
                .execute(orchestrator.state())?
            {
                ActionOutcome::Done(()) => println!("copied to clipboard"),
                ActionOutcome::NothingYet => println!("notice: nothing to copy yet"),
            }
        }
        ShellCommand::Download(dir) => {
            match composition
                .export_result_usecase()
                .execute(orchestrator.state(), &dir)?
            {
                ActionOutcome::Done(path) => println!("saved: {}", path.display()),
                ActionOutcome::NothingYet => println!("notice: nothing to download yet"),
            }
        }
        ShellCommand::Clear => {
            if orchestrator.clear() {
                draft.clear_text();
                println!("draft cleared");
            } else {
                println!("notice: a run is in progress");
            }
        }
        ShellCommand::ForgetKey => {
            orchestrator.forget_session_credential();
            println!("session API key cleared");
        }
    }
    Ok(())
}

async fn run_draft(orchestrator: &mut Orchestrator<'_>, draft: &FormDraft) {
    match orchestrator.start(draft.run_options()).await {
        Ok(()) => {
            println!();
            for line in render_state(orchestrator.state()) {
                println!("{line}");
            }
        }
        Err(err) => println!("notice: {err}"),
    }
}

fn parse_shell_command(input: &str) -> Result<ShellCommand, String> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return Ok(ShellCommand::AppendLine(input.trim_end().to_string()));
    }

    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (trimmed, ""),
    };

    let no_args = |command: ShellCommand| {
        if rest.is_empty() {
            Ok(command)
        } else {
            Err(format!("usage: {head}"))
        }
    };

    match head {
        "/exit" | "/quit" => no_args(ShellCommand::Exit),
        "/help" => no_args(ShellCommand::Help),
        "/config" => no_args(ShellCommand::Config),
        "/run" => no_args(ShellCommand::Run),
        "/show" => no_args(ShellCommand::Show),
        "/copy" => no_args(ShellCommand::Copy),
        "/clear" => no_args(ShellCommand::Clear),
        "/key" => no_args(ShellCommand::ForgetKey),
        "/humanize" => {
            if rest.is_empty() {
                return Err("usage: /humanize <text>".to_string());
            }
            Ok(ShellCommand::Humanize(rest.to_string()))
        }
        "/tone" => rest.parse::<Tone>().map(ShellCommand::SetTone),
        "/temperature" => {
            let value: f32 = rest
                .parse()
                .map_err(|_| "usage: /temperature <0..1>".to_string())?;
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("temperature must be between 0 and 1 (got {value})"));
            }
            Ok(ShellCommand::SetTemperature(value))
        }
        "/download" => {
            let dir = if rest.is_empty() { "." } else { rest };
            Ok(ShellCommand::Download(PathBuf::from(dir)))
        }
        other => Err(format!("unknown command: {other}")),
    }
}

fn print_form(orchestrator: &Orchestrator<'_>, draft: &FormDraft) {
    let tone = draft
        .tone
        .map(|tone| tone.code().to_string())
        .unwrap_or_else(|| "config default".to_string());
    let temperature = draft
        .temperature
        .map(|value| format!("{value:.2}"))
        .unwrap_or_else(|| "config default".to_string());

    println!("tone        : {tone}");
    println!("temperature : {temperature}");
    println!("state       : {}", orchestrator.state().label());
    if draft.is_empty() {
        println!("draft       : (empty)");
    } else {
        println!("draft       :");
        for line in &draft.lines {
            println!("  {line}");
        }
    }
    if orchestrator.state().is_terminal() {
        println!();
        for line in render_state(orchestrator.state()) {
            println!("{line}");
        }
    }
}

fn print_help() {
    for item in &SUGGESTIONS {
        println!("  {:<50} {}", item.usage, item.description);
    }
    println!("  any other line is appended to the draft");
}

fn print_welcome(composition: &AppComposition) {
    let interactive = io::stdout().is_terminal();
    if interactive {
        print!("\x1b[2J\x1b[H");
    }

    let title = paint("humanizer interactive shell", "1;36", interactive);
    let subtitle = paint("rewrite text, then estimate how AI-written it reads", "2;37", interactive);

    println!("+------------------------------------------------------------+");
    println!("| {} |", pad_ansi(&title, "humanizer interactive shell", 58));
    println!(
        "| {} |",
        pad_ansi(&subtitle, "rewrite text, then estimate how AI-written it reads", 58)
    );
    println!("+------------------------------------------------------------+");
    for line in composition.inspect_config_usecase().dashboard_lines() {
        println!("| {} |", pad_line_display(&line, 58));
    }
    println!("+------------------------------------------------------------+");
    println!("| {} |", pad_line_display("Type or paste text, then /run", 58));
    println!("| {} |", pad_line_display("/help lists every command, /exit quits", 58));
    println!("+------------------------------------------------------------+");
    println!();
}

fn paint(text: &str, ansi: &str, interactive: bool) -> String {
    if interactive {
        format!("\x1b[{ansi}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

/// ANSI 색상 코드는 폭 계산에서 제외하고 원문 폭 기준으로 채운다.
fn pad_ansi(painted: &str, plain: &str, width: usize) -> String {
    let padded = pad_line_display(plain, width);
    padded.replacen(plain, painted, 1)
}
