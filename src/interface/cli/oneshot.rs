//! 인자/파이프 입력으로 한 번 실행하고 종료하는 모드.

use anyhow::Result;

use crate::application::usecases::result_actions::ActionOutcome;
use crate::domain::state::OrchestrationState;
use crate::interface::cli::command::OneShotOptions;
use crate::interface::cli::composition::AppComposition;
use crate::interface::cli::render::{render_json, render_state};

/// 실행 후 결과를 출력하고, 요청 시 복사/저장한다.
/// 실행이 `Completed`로 끝났는지 여부를 반환한다.
pub async fn run_once(composition: &AppComposition, options: OneShotOptions) -> Result<bool> {
    let mut orchestrator = composition.orchestrator();
    orchestrator.start(options.run).await?;
    let state = orchestrator.state();

    if options.json {
        println!("{}", render_json(state)?);
    } else {
        println!();
        for line in render_state(state) {
            println!("{line}");
        }
    }

    if options.copy {
        match composition.copy_result_usecase().execute(state)? {
            ActionOutcome::Done(()) => eprintln!("copied to clipboard"),
            ActionOutcome::NothingYet => eprintln!("notice: nothing to copy"),
        }
    }
    if let Some(dir) = options.download.as_deref() {
        match composition.export_result_usecase().execute(state, dir)? {
            ActionOutcome::Done(path) => eprintln!("saved: {}", path.display()),
            ActionOutcome::NothingYet => eprintln!("notice: nothing to download"),
        }
    }

    Ok(matches!(state, OrchestrationState::Completed { .. }))
}
