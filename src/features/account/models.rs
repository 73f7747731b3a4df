use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::ClientError;
use crate::http;
use crate::session::Session;

/// 账号门面：频道/用户信息/视频列表/上传，以及频道维度的指标方法。
#[derive(Debug, Clone)]
pub struct Account {
    session: Session,
}

/// 账号关联的频道。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    pub title: Option<String>,
}

/// 账号基础信息（userinfo 端点）。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// channels.list 响应
#[derive(Debug, Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelResource>,
}

#[derive(Debug, Deserialize)]
struct ChannelResource {
    id: String,
    #[serde(default)]
    snippet: Option<ChannelSnippet>,
}

#[derive(Debug, Deserialize)]
struct ChannelSnippet {
    #[serde(default)]
    title: Option<String>,
}

impl Account {
    pub(crate) fn new(session: Session) -> Self {
        Self { session }
    }

    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    /// 账号关联的频道。
    pub async fn channel(&self) -> Result<Channel, ClientError> {
        let url = format!("{}/v3/channels", self.session.config().data.base_url);
        let client = http::client_timeout_30s()?;
        let response = self
            .session
            .authorize(client.get(&url).query(&[("part", "snippet"), ("mine", "true")]))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ClientError::Auth(format!("上游拒绝访问: {status}")));
        }
        if !status.is_success() {
            return Err(ClientError::Network(format!("频道查询失败: {status}")));
        }

        let body: ChannelListResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Json(format!("解析频道响应失败: {e}")))?;
        let item = body
            .items
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::InvalidResponse("账号没有关联频道".to_string()))?;
        Ok(Channel {
            id: item.id,
            title: item.snippet.and_then(|s| s.title),
        })
    }

    /// 账号基础信息（尽力而为的辅助请求，走默认 client）。
    pub async fn user_info(&self) -> Result<UserInfo, ClientError> {
        let url = &self.session.config().data.user_info_endpoint;
        let client = http::client_default()?;
        let response = self.session.authorize(client.get(url)).send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ClientError::Auth(format!("上游拒绝访问: {status}")));
        }
        if !status.is_success() {
            return Err(ClientError::Network(format!("用户信息查询失败: {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Json(format!("解析用户信息失败: {e}")))
    }
}
