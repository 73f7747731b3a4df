use serde::Deserialize;

use crate::error::ClientError;
use crate::http;
use crate::session::Session;

/// 视频快照元数据（数据 API snippet 部分的子集）。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

/// 视频门面：携带会话，暴露指标方法与广告选项操作。
#[derive(Debug, Clone)]
pub struct Video {
    id: String,
    session: Session,
    snippet: Option<VideoSnippet>,
}

impl Video {
    pub(crate) fn new(id: impl Into<String>, session: Session) -> Self {
        Self {
            id: id.into(),
            session,
            snippet: None,
        }
    }

    pub(crate) fn with_snippet(
        id: impl Into<String>,
        session: Session,
        snippet: Option<VideoSnippet>,
    ) -> Self {
        Self {
            id: id.into(),
            session,
            snippet,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn snippet(&self) -> Option<&VideoSnippet> {
        self.snippet.as_ref()
    }

    pub fn title(&self) -> Option<&str> {
        self.snippet.as_ref().and_then(|s| s.title.as_deref())
    }

    pub(crate) fn session(&self) -> &Session {
        &self.session
    }
}

/// videos.list 响应
#[derive(Debug, Deserialize)]
pub(crate) struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoResource>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoResource {
    pub id: String,
    #[serde(default)]
    pub snippet: Option<VideoSnippet>,
}

/// 相关视频的惰性引用。
///
/// 整形阶段只携带 id；fetch 是显式的取回边界，避免对结果的
/// 每一行都发起资源请求。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRef {
    id: String,
}

impl VideoRef {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// 解析为完整视频对象（一次数据 API 请求）。
    pub async fn fetch(&self, session: &Session) -> Result<Video, ClientError> {
        let url = format!("{}/v3/videos", session.config().data.base_url);
        let client = http::client_timeout_30s()?;
        let response = session
            .authorize(
                client
                    .get(&url)
                    .query(&[("part", "snippet"), ("id", self.id.as_str())]),
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Network(format!("视频查询失败: {status}")));
        }

        let body: VideoListResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Json(format!("解析视频响应失败: {e}")))?;
        let item = body
            .items
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::InvalidResponse(format!("未找到视频: {}", self.id)))?;
        Ok(Video::with_snippet(item.id, session.clone(), item.snippet))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_deserializes_camel_case_fields() {
        let snippet: VideoSnippet = serde_json::from_str(
            r#"{"title":"t","channelId":"c1","publishedAt":"2021-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(snippet.title.as_deref(), Some("t"));
        assert_eq!(snippet.channel_id.as_deref(), Some("c1"));
        assert!(snippet.description.is_none());
    }

    #[test]
    fn video_ref_only_carries_the_id() {
        let r = VideoRef::new("vidA");
        assert_eq!(r.id(), "vidA");
        assert_eq!(r, VideoRef::new("vidA".to_string()));
    }
}
