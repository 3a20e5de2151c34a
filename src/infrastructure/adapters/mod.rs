//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod clipboard;
mod config_repository;
mod credential_prompt;
mod credential_sources;
mod gateway_factory;
mod reporter;
mod text_exporter;

pub use clipboard::SystemClipboard;
pub use config_repository::{JsonConfigRepository, StaticConfigRepository};
pub use credential_prompt::{NonInteractivePrompt, TerminalCredentialPrompt};
pub use credential_sources::{CredentialSourceFactoryAdapter, InMemorySessionStore};
pub use gateway_factory::GatewayFactoryAdapter;
pub use reporter::ConsoleReporter;
pub use text_exporter::{EXPORT_FILENAME, FileTextExporter};
