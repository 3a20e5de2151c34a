//! 게이트웨이 팩토리 포트 구현 어댑터.

use anyhow::Result;

use crate::application::ports::{CompletionGateway, GatewayFactory};
use crate::infrastructure::config::Config;
use crate::infrastructure::gateway::ChatCompletionGateway;

/// 설정의 gateway 섹션으로 HTTP 게이트웨이를 생성한다.
pub struct GatewayFactoryAdapter;

impl GatewayFactory for GatewayFactoryAdapter {
    fn build(&self, config: &Config) -> Result<Box<dyn CompletionGateway>> {
        let gateway = ChatCompletionGateway::from_config(&config.gateway)?;
        tracing::debug!(endpoint = %gateway.endpoint(), "completion gateway ready");
        Ok(Box::new(gateway))
    }
}
