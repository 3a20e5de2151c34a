//! 외부 completion API 게이트웨이 구현.

mod api_runner;
pub mod openai;

pub use openai::ChatCompletionGateway;
