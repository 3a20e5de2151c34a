//! 우선순위 인증 소스 해석.

use crate::application::ports::CredentialSource;
use crate::domain::humanize::Credential;

/// 인증 값 해석 결과.
#[derive(Debug, Clone)]
pub struct CredentialResolution {
    pub credential: Credential,
    pub source: String,
}

/// 소스 목록을 앞에서부터 확인해 처음 발견한 인증 값을 반환한다.
pub fn resolve_credential(sources: &[Box<dyn CredentialSource>]) -> Option<CredentialResolution> {
    for source in sources {
        if let Some(credential) = source.fetch() {
            let label = source.label();
            tracing::debug!(source = %label, "credential resolved");
            return Some(CredentialResolution {
                credential,
                source: label,
            });
        }
    }
    tracing::debug!(checked = sources.len(), "no credential source produced a value");
    None
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    struct Fixed {
        label: &'static str,
        value: Option<&'static str>,
        calls: Arc<AtomicUsize>,
    }

    impl CredentialSource for Fixed {
        fn label(&self) -> String {
            self.label.to_string()
        }

        fn fetch(&self) -> Option<Credential> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.value.and_then(Credential::new)
        }
    }

    fn source(
        label: &'static str,
        value: Option<&'static str>,
    ) -> (Box<dyn CredentialSource>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let boxed: Box<dyn CredentialSource> = Box::new(Fixed {
            label,
            value,
            calls: calls.clone(),
        });
        (boxed, calls)
    }

    #[test]
    fn first_available_source_wins() {
        let (injected, _) = source("env:OPENAI_API_KEY", None);
        let (persistent, _) = source("file", Some("sk-file"));
        let (session, session_calls) = source("session", Some("sk-session"));

        let resolved = resolve_credential(&[injected, persistent, session]).unwrap();

        assert_eq!(resolved.credential.expose(), "sk-file");
        assert_eq!(resolved.source, "file");
        assert_eq!(session_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn blank_values_are_skipped() {
        let (blank, _) = source("inline", Some("   "));
        let (session, _) = source("session", Some("sk-session"));

        let resolved = resolve_credential(&[blank, session]).unwrap();
        assert_eq!(resolved.source, "session");
    }

    #[test]
    fn empty_sources_resolve_to_none() {
        assert!(resolve_credential(&[]).is_none());
        let (missing, _) = source("env:NOPE", None);
        assert!(resolve_credential(&[missing]).is_none());
    }
}
