//! CLI 인터페이스 모듈 묶음.
//! 입력 파싱/쉘/렌더링/조립을 한 네임스페이스로 관리한다.

pub mod command;
pub mod composition;
pub mod oneshot;
pub mod render;
pub mod shell;
mod shell_input;

pub use command::{Cli, CliAction, OneShotOptions};
pub use composition::AppComposition;
pub use oneshot::run_once;
pub use shell::run_shell;
