//! 결과 복사/내보내기 유스케이스.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::application::ports::{Clipboard, TextExporter};
use crate::domain::state::OrchestrationState;

/// 결과가 없을 때는 아무 것도 하지 않고 `NothingYet`을 돌려준다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome<T> {
    Done(T),
    NothingYet,
}

/// 재작성 결과를 클립보드에 복사한다.
pub struct CopyResultUseCase<'a> {
    pub clipboard: &'a dyn Clipboard,
}

impl<'a> CopyResultUseCase<'a> {
    pub fn execute(&self, state: &OrchestrationState) -> Result<ActionOutcome<()>> {
        let Some(text) = state.humanized_text() else {
            return Ok(ActionOutcome::NothingYet);
        };
        self.clipboard.copy(text)?;
        Ok(ActionOutcome::Done(()))
    }
}

/// 재작성 결과를 고정 파일명의 텍스트 파일로 내보낸다.
pub struct ExportResultUseCase<'a> {
    pub exporter: &'a dyn TextExporter,
}

impl<'a> ExportResultUseCase<'a> {
    pub fn execute(
        &self,
        state: &OrchestrationState,
        dir: &Path,
    ) -> Result<ActionOutcome<PathBuf>> {
        let Some(text) = state.humanized_text() else {
            return Ok(ActionOutcome::NothingYet);
        };
        let path = self.exporter.export(dir, text)?;
        Ok(ActionOutcome::Done(path))
    }
}
