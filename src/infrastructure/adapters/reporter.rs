//! 콘솔 리포터/상태 구독 포트 구현 어댑터.

use std::collections::BTreeMap;
use std::io::{self, IsTerminal, Write};
use std::sync::Mutex;

use crate::application::ports::{Reporter, StateObserver};
use crate::domain::state::OrchestrationState;

#[derive(Default)]
struct StepPanelState {
    rendered_lines: usize,
    rows: BTreeMap<String, (String, Option<String>)>,
}

/// 콘솔 전용 리포터 어댑터.
pub struct ConsoleReporter {
    enabled: bool,
    interactive: bool,
    state: Mutex<StepPanelState>,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReporter {
    /// stdout이 TTY일 때 실시간 단계 상태판을 사용한다.
    pub fn new() -> Self {
        Self {
            enabled: true,
            interactive: io::stdout().is_terminal(),
            state: Mutex::new(StepPanelState::default()),
        }
    }

    /// 진행 출력을 끈다(`--json`처럼 stdout을 결과 전용으로 써야 할 때).
    pub fn silent() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    fn reset_panel(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.rows.clear();
            state.rendered_lines = 0;
        }
    }

    fn render_step_panel(&self, state: &mut StepPanelState) {
        let mut out = io::stdout();
        if state.rendered_lines > 0 {
            let _ = write!(out, "\x1b[{}A\x1b[J", state.rendered_lines);
        }

        let mut lines = Vec::new();
        lines.push("┌────────────────── Steps ──────────────────┐".to_string());
        for (step, (status, extra)) in &state.rows {
            let status_colored = colorize_status(status);
            let extra_text = extra.as_deref().unwrap_or("-");
            lines.push(format!("│ {:<10} {:<16} {:<14} │", step, status_colored, extra_text));
        }
        lines.push("└───────────────────────────────────────────┘".to_string());

        for line in &lines {
            let _ = writeln!(out, "{line}");
        }
        let _ = out.flush();
        state.rendered_lines = lines.len();
    }
}

impl Reporter for ConsoleReporter {
    fn section(&self, name: &str) {
        if !self.enabled {
            return;
        }
        self.reset_panel();
        println!();
        println!("==================== {} ====================", name);
    }

    fn kv(&self, key: &str, value: &str) {
        if self.enabled {
            println!("{:<12}: {}", key, value);
        }
    }

    fn status(&self, scope: &str, message: &str) {
        if self.enabled {
            println!("[{:<10}] {}", scope, message);
        }
    }

    fn step_status(&self, step: &str, status: &str, extra: Option<&str>) {
        if !self.enabled {
            return;
        }
        if self.interactive
            && let Ok(mut state) = self.state.lock()
        {
            state.rows.insert(
                step.to_string(),
                (status.to_string(), extra.map(|s| s.to_string())),
            );
            self.render_step_panel(&mut state);
            return;
        }

        match extra {
            Some(extra) => println!("[step:{:<8}] {:<7} {}", step, status, extra),
            None => println!("[step:{:<8}] {}", step, status),
        }
    }

    fn raw(&self, line: &str) {
        if self.enabled {
            println!("{}", line);
        }
    }
}

impl StateObserver for ConsoleReporter {
    fn state_changed(&self, state: &OrchestrationState) {
        match state {
            OrchestrationState::Idle => self.status("State", "idle"),
            OrchestrationState::Processing => self.status("State", "processing..."),
            OrchestrationState::Completed { .. } => self.status("State", "completed"),
            OrchestrationState::Failed { message, .. } => {
                self.status("State", &format!("failed: {message}"))
            }
        }
    }
}

fn colorize_status(status: &str) -> String {
    match status {
        "running" => format!("\x1b[33m{status}\x1b[0m"),
        "done" => format!("\x1b[32m{status}\x1b[0m"),
        "error" => format!("\x1b[31m{status}\x1b[0m"),
        _ => status.to_string(),
    }
}
