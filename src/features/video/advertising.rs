use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::http;

use super::models::Video;

/// 广告选项（合作伙伴 API videoAdvertisingOptions 资源的子集）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvertisingOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// 启用的广告形态（standard_instream / overlay / trueview_instream 等）
    #[serde(default)]
    pub ad_formats: Vec<String>,
}

impl AdvertisingOptions {
    /// 仅指定广告形态的更新载荷。
    pub fn with_ad_formats<S: Into<String>>(formats: impl IntoIterator<Item = S>) -> Self {
        Self {
            id: None,
            ad_formats: formats.into_iter().map(Into::into).collect(),
        }
    }
}

impl Video {
    /// 读取广告选项。需要内容所有者身份，缺失时同步报错，不发起请求。
    pub async fn advertising_options(&self) -> Result<AdvertisingOptions, ClientError> {
        let owner = self.owner()?;
        let request = self
            .session()
            .authorize(http::client_timeout_30s()?.get(self.advertising_url()));
        let response = request
            .query(&[("onBehalfOfContentOwner", owner)])
            .send()
            .await?;
        decode_options(response).await
    }

    /// 更新广告选项并返回更新后的资源。
    pub async fn update_advertising_options(
        &self,
        patch: &AdvertisingOptions,
    ) -> Result<AdvertisingOptions, ClientError> {
        let owner = self.owner()?;
        let request = self
            .session()
            .authorize(http::client_timeout_30s()?.put(self.advertising_url()));
        let response = request
            .query(&[("onBehalfOfContentOwner", owner)])
            .json(patch)
            .send()
            .await?;
        decode_options(response).await
    }

    /// 便捷方法：当前启用的广告形态。
    pub async fn ad_formats(&self) -> Result<Vec<String>, ClientError> {
        Ok(self.advertising_options().await?.ad_formats)
    }

    fn advertising_url(&self) -> String {
        format!(
            "{}/v1/videoAdvertisingOptions/{}",
            self.session().config().partner.base_url,
            self.id()
        )
    }

    fn owner(&self) -> Result<&str, ClientError> {
        self.session()
            .content_owner_id()
            .ok_or_else(|| ClientError::Auth("广告选项操作需要内容所有者身份".to_string()))
    }
}

async fn decode_options(response: reqwest::Response) -> Result<AdvertisingOptions, ClientError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ClientError::Auth(format!("上游拒绝访问: {status}")));
    }
    if !status.is_success() {
        return Err(ClientError::Network(format!("广告选项请求失败: {status}")));
    }
    response
        .json()
        .await
        .map_err(|e| ClientError::Json(format!("解析广告选项响应失败: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ad_formats_payload_serializes_camel_case() {
        let patch = AdvertisingOptions::with_ad_formats(["standard_instream", "overlay"]);
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"adFormats": ["standard_instream", "overlay"]})
        );
    }

    #[test]
    fn options_deserialize_with_missing_formats() {
        let options: AdvertisingOptions = serde_json::from_str(r#"{"id":"vid9"}"#).unwrap();
        assert_eq!(options.id.as_deref(), Some("vid9"));
        assert!(options.ad_formats.is_empty());
    }
}
