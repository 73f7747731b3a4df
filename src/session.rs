use std::sync::Arc;

use crate::config::AppConfig;
use crate::features::account::Account;
use crate::features::video::Video;

/// 会话：访问令牌、可选的内容所有者身份与端点配置的聚合。
///
/// Account / Video 门面共享同一个会话；内部通过 Arc 共享配置，
/// Clone 开销极小。令牌由外部认证流程获得（认证流程不在本库范围内）。
#[derive(Debug, Clone)]
pub struct Session {
    config: Arc<AppConfig>,
    access_token: String,
    content_owner: Option<String>,
}

impl Session {
    /// 以全局配置构造会话
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_config(AppConfig::global().clone(), access_token)
    }

    /// 以显式配置构造会话（测试中可将 base_url 指向本地桩服务）
    pub fn with_config(config: AppConfig, access_token: impl Into<String>) -> Self {
        Self {
            config: Arc::new(config),
            access_token: access_token.into(),
            content_owner: None,
        }
    }

    /// 以内容所有者身份执行后续请求（合作伙伴/收益类查询需要）
    pub fn on_behalf_of_content_owner(mut self, id: impl Into<String>) -> Self {
        self.content_owner = Some(id.into());
        self
    }

    /// 构造账号门面
    pub fn account(&self) -> Account {
        Account::new(self.clone())
    }

    /// 构造指定视频的门面
    pub fn video(&self, id: impl Into<String>) -> Video {
        Video::new(id, self.clone())
    }

    pub(crate) fn config(&self) -> &AppConfig {
        &self.config
    }

    pub(crate) fn content_owner_id(&self) -> Option<&str> {
        self.content_owner.as_deref()
    }

    /// 为请求附加 Bearer 令牌
    pub(crate) fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.bearer_auth(&self.access_token)
    }

    /// 报表查询的 ids 参数：内容所有者身份优先，否则为频道本身。
    pub(crate) fn report_ids(&self) -> String {
        match self.content_owner_id() {
            Some(owner) => format!("contentOwner=={owner}"),
            None => "channel==mine".to_string(),
        }
    }
}
