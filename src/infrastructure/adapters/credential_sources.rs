//! 인증 소스/세션 저장소 포트 구현.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::application::config::GatewayConfig;
use crate::application::ports::{
    CredentialSource, CredentialSourceFactory, SessionCredentialStore,
};
use crate::domain::humanize::Credential;
use crate::infrastructure::config::{
    Config, credential_file_path, env_api_key, inline_api_key, read_credential_file,
};

/// 프로세스(세션) 수명 동안만 유지되는 메모리 저장소.
#[derive(Default)]
pub struct InMemorySessionStore {
    slot: Mutex<Option<Credential>>,
}

impl SessionCredentialStore for InMemorySessionStore {
    fn get(&self) -> Option<Credential> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    fn put(&self, credential: Credential) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(credential);
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}

/// 설정 파일의 `gateway.api_key` 직접값.
struct InlineKeySource {
    gateway: GatewayConfig,
}

impl CredentialSource for InlineKeySource {
    fn label(&self) -> String {
        "inline".to_string()
    }

    fn fetch(&self) -> Option<Credential> {
        inline_api_key(&self.gateway)
    }
}

/// 프로세스에 주입된 환경변수.
struct EnvKeySource {
    gateway: GatewayConfig,
}

impl CredentialSource for EnvKeySource {
    fn label(&self) -> String {
        format!("env:{}", self.gateway.api_key_env())
    }

    fn fetch(&self) -> Option<Credential> {
        env_api_key(&self.gateway).1
    }
}

/// 로컬에 영속 저장된 인증 키 파일.
struct CredentialFileSource {
    path: PathBuf,
}

impl CredentialSource for CredentialFileSource {
    fn label(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn fetch(&self) -> Option<Credential> {
        read_credential_file(&self.path)
    }
}

/// 대화형 입력으로 받아 둔 세션 값.
struct SessionSource {
    store: Arc<InMemorySessionStore>,
}

impl CredentialSource for SessionSource {
    fn label(&self) -> String {
        "session".to_string()
    }

    fn fetch(&self) -> Option<Credential> {
        self.store.get()
    }
}

/// 주입값(inline/env) -> 영속 파일 -> 세션 순서로 소스를 구성한다.
pub struct CredentialSourceFactoryAdapter {
    session: Arc<InMemorySessionStore>,
}

impl CredentialSourceFactoryAdapter {
    pub fn new(session: Arc<InMemorySessionStore>) -> Self {
        Self { session }
    }
}

impl CredentialSourceFactory for CredentialSourceFactoryAdapter {
    fn build(&self, config: &Config) -> Vec<Box<dyn CredentialSource>> {
        let mut sources: Vec<Box<dyn CredentialSource>> = vec![
            Box::new(InlineKeySource {
                gateway: config.gateway.clone(),
            }),
            Box::new(EnvKeySource {
                gateway: config.gateway.clone(),
            }),
        ];
        if let Some(path) = credential_file_path(&config.gateway) {
            sources.push(Box::new(CredentialFileSource { path }));
        }
        sources.push(Box::new(SessionSource {
            store: self.session.clone(),
        }));
        sources
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::application::credentials::resolve_credential;

    fn config_with_file(path: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.gateway.api_key_env = Some("HUMANIZER_TEST_UNSET_KEY_VAR".to_string());
        config.gateway.credential_file = Some(path.display().to_string());
        config
    }

    #[test]
    fn sources_are_ordered_injected_file_session() {
        let tmp = TempDir::new().expect("create temp dir");
        let factory = CredentialSourceFactoryAdapter::new(Arc::default());
        let labels: Vec<String> = factory
            .build(&config_with_file(&tmp.path().join("credential")))
            .iter()
            .map(|s| s.label())
            .collect();

        assert_eq!(labels[0], "inline");
        assert_eq!(labels[1], "env:HUMANIZER_TEST_UNSET_KEY_VAR");
        assert!(labels[2].starts_with("file:"));
        assert_eq!(labels[3], "session");
    }

    #[test]
    fn file_beats_session_and_session_is_last_resort() {
        let tmp = TempDir::new().expect("create temp dir");
        let file = tmp.path().join("credential");
        let session = Arc::new(InMemorySessionStore::default());
        session.put(Credential::new("sk-session").unwrap());
        let factory = CredentialSourceFactoryAdapter::new(session.clone());
        let config = config_with_file(&file);

        let resolved = resolve_credential(&factory.build(&config)).unwrap();
        assert_eq!(resolved.source, "session");

        fs::write(&file, "sk-file\n").unwrap();
        let resolved = resolve_credential(&factory.build(&config)).unwrap();
        assert_eq!(resolved.credential.expose(), "sk-file");

        fs::remove_file(&file).unwrap();
        session.clear();
        assert!(resolve_credential(&factory.build(&config)).is_none());
    }
}
