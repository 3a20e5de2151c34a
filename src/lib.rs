//! humanizer library root.
//! Clean Architecture + DDD 계층을 외부에 노출한다.

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use domain::humanize::RunOptions;
use domain::state::OrchestrationState;
use infrastructure::adapters::{ConsoleReporter, JsonConfigRepository, NonInteractivePrompt};
use interface::cli::AppComposition;

/// 라이브러리 직접 호출용 실행 함수.
/// 진행 출력 없이 한 번 실행하고 최종 상태를 돌려준다. 인증 키는 입력받지 않는다.
pub async fn humanize(options: RunOptions) -> Result<OrchestrationState> {
    let composition = AppComposition::with_parts(
        Box::new(JsonConfigRepository),
        Box::new(NonInteractivePrompt),
        ConsoleReporter::silent(),
    );
    let mut orchestrator = composition.orchestrator();
    orchestrator.start(options).await?;
    Ok(orchestrator.state().clone())
}

/// 설정 점검 JSON 출력용 함수.
pub fn inspect_config_pretty_json() -> Result<String> {
    let composition = AppComposition::new(false, true);
    composition.inspect_config_usecase().execute()
}
