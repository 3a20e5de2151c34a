//! 설정 값(api_key/env/file)을 실제 인증 값으로 해석하는 유틸리티.
//!
//! - 환경변수/파일 접근은 인프라 계층에서만 수행한다.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::application::config::GatewayConfig;
use crate::domain::humanize::Credential;

/// 설정 파일에 직접 적힌 인증 키.
pub fn inline_api_key(cfg: &GatewayConfig) -> Option<Credential> {
    cfg.api_key.as_deref().and_then(Credential::new)
}

/// 환경변수 이름과, 그 변수에서 읽은 인증 키.
pub fn env_api_key(cfg: &GatewayConfig) -> (String, Option<Credential>) {
    let env_name = cfg.api_key_env();
    let credential = env::var(&env_name).ok().and_then(Credential::new);
    (env_name, credential)
}

/// 인증 키 보관 파일 경로. 미지정이면 `<config_dir>/humanizer/credential`.
pub fn credential_file_path(cfg: &GatewayConfig) -> Option<PathBuf> {
    if let Some(path) = cfg
        .credential_file
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|base| base.join("humanizer").join("credential"))
}

/// 파일의 첫 번째 비어 있지 않은 줄을 인증 키로 읽는다. 파일이 없거나 비어 있으면 `None`.
pub fn read_credential_file(path: &Path) -> Option<Credential> {
    let raw = fs::read_to_string(path).ok()?;
    raw.lines().find_map(Credential::new)
}
