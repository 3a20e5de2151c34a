//! CLI 명령 파싱 모듈.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::humanize::{RunOptions, Tone};

#[derive(Debug, Parser)]
#[command(name = "humanizer")]
#[command(about = "Rewrite text so it reads human-written and estimate how AI-generated it looks")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Text to humanize (falls back to --file or piped stdin)
    text: Option<String>,

    /// Read the text from a file
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// natural | conversational | formal | youthful
    #[arg(short, long)]
    tone: Option<String>,

    /// Rewrite temperature between 0 and 1
    #[arg(long)]
    temperature: Option<f32>,

    /// Copy the humanized text to the clipboard
    #[arg(long)]
    copy: bool,

    /// Save the humanized text as humanized-text.txt in DIR
    #[arg(long, value_name = "DIR", num_args = 0..=1, default_missing_value = ".")]
    download: Option<PathBuf>,

    /// Print the final state as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show effective merged config and API key source
    Config,
}

/// 한 번 실행 후 종료하는 모드의 옵션.
#[derive(Debug, Clone)]
pub struct OneShotOptions {
    pub run: RunOptions,
    pub copy: bool,
    pub download: Option<PathBuf>,
    pub json: bool,
}

pub enum CliAction {
    Interactive,
    InspectConfig,
    Run(OneShotOptions),
}

impl Cli {
    pub fn parse_action() -> Result<CliAction, String> {
        Cli::parse().into_action()
    }

    fn into_action(self) -> Result<CliAction, String> {
        if let Some(Commands::Config) = self.command {
            return Ok(CliAction::InspectConfig);
        }

        let tone = self.tone.as_deref().map(str::parse::<Tone>).transpose()?;
        if let Some(value) = self.temperature
            && !(0.0..=1.0).contains(&value)
        {
            return Err(format!("--temperature must be between 0 and 1 (got {value})"));
        }

        let text = match (self.text, self.file) {
            (Some(_), Some(_)) => return Err("pass either TEXT or --file, not both".to_string()),
            (Some(text), None) => text,
            (None, Some(path)) => fs::read_to_string(&path)
                .map_err(|err| format!("failed to read {}: {err}", path.display()))?,
            (None, None) => {
                if io::stdin().is_terminal() {
                    return Ok(CliAction::Interactive);
                }
                read_stdin()?
            }
        };

        Ok(CliAction::Run(OneShotOptions {
            run: RunOptions {
                text,
                tone,
                temperature: self.temperature,
            },
            copy: self.copy,
            download: self.download,
            json: self.json,
        }))
    }
}

fn read_stdin() -> Result<String, String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|err| format!("failed to read stdin: {err}"))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(args: &[&str]) -> Result<CliAction, String> {
        let mut argv = vec!["humanizer"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv)
            .map_err(|err| err.to_string())?
            .into_action()
    }

    #[test]
    fn text_argument_runs_once_with_options() {
        let Ok(CliAction::Run(options)) = action(&[
            "hola",
            "--tone",
            "formal",
            "--temperature",
            "0.3",
            "--download",
            "--json",
        ]) else {
            panic!("expected one-shot run");
        };

        assert_eq!(options.run.text, "hola");
        assert_eq!(options.run.tone, Some(Tone::Formal));
        assert_eq!(options.run.temperature, Some(0.3));
        assert_eq!(options.download, Some(PathBuf::from(".")));
        assert!(options.json);
        assert!(!options.copy);
    }

    #[test]
    fn config_subcommand_inspects() {
        assert!(matches!(action(&["config"]), Ok(CliAction::InspectConfig)));
    }

    #[test]
    fn invalid_tone_and_temperature_are_argument_errors() {
        assert!(action(&["hola", "--tone", "angry"]).is_err());
        assert!(action(&["hola", "--temperature", "1.5"]).is_err());
        assert!(action(&["hola", "--file", "x.txt"]).is_err());
    }
}
