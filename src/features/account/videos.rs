use std::path::{Path, PathBuf};

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::features::video::models::{Video, VideoResource, VideoSnippet};
use crate::http;

use super::models::Account;

/// search.list 响应（id 为嵌套对象，只保留视频命中）
#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: SearchResultId,
    #[serde(default)]
    snippet: Option<VideoSnippet>,
}

#[derive(Debug, Deserialize)]
struct SearchResultId {
    #[serde(rename = "videoId", default)]
    video_id: Option<String>,
}

/// 上传来源：本地文件路径或远端 URL。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource {
    Path(PathBuf),
    Url(String),
}

impl UploadSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }
}

impl From<&str> for UploadSource {
    /// http(s) 开头视为远端 URL，其余视为本地路径。
    fn from(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            Self::Url(source.to_string())
        } else {
            Self::Path(PathBuf::from(source))
        }
    }
}

impl From<&Path> for UploadSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

/// 新视频的元数据参数。
#[derive(Debug, Clone, Default)]
pub struct UploadParams {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    /// private / public / unlisted
    pub privacy_status: Option<String>,
}

impl UploadParams {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.tags.is_empty()
            && self.privacy_status.is_none()
    }
}

/// videos.update 的请求体
#[derive(Debug, Serialize)]
struct VideoUpdateBody<'a> {
    id: &'a str,
    snippet: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<serde_json::Value>,
}

impl Account {
    /// 列出账号名下的视频；query 为可选的检索关键词。
    ///
    /// 仅取第一页（分页不在本库范围内）；无命中时返回空列表。
    pub async fn videos(&self, query: Option<&str>) -> Result<Vec<Video>, ClientError> {
        let url = format!("{}/v3/search", self.session().config().data.base_url);
        let mut params = vec![
            ("part", "snippet"),
            ("forMine", "true"),
            ("type", "video"),
        ];
        if let Some(q) = query {
            params.push(("q", q));
        }

        let client = http::client_timeout_30s()?;
        let response = self
            .session()
            .authorize(client.get(&url).query(&params))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ClientError::Auth(format!("上游拒绝访问: {status}")));
        }
        if !status.is_success() {
            return Err(ClientError::Network(format!("视频检索失败: {status}")));
        }

        let body: SearchListResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Json(format!("解析检索响应失败: {e}")))?;

        Ok(body
            .items
            .into_iter()
            .filter_map(|item| {
                item.id
                    .video_id
                    .map(|id| Video::with_snippet(id, self.session().clone(), item.snippet))
            })
            .collect())
    }

    /// 上传视频并设置元数据。
    ///
    /// 上传为单次请求（不做断点续传）；远端 URL 来源先取回字节再上传。
    /// 元数据非空时在上传完成后通过 videos.update 写入。
    pub async fn upload_video(
        &self,
        source: impl Into<UploadSource>,
        params: UploadParams,
    ) -> Result<Video, ClientError> {
        let bytes = self.read_source(source.into()).await?;

        let url = format!("{}/v3/videos", self.session().config().upload.base_url);
        let client = http::client_timeout_90s()?;
        let response = self
            .session()
            .authorize(
                client
                    .post(&url)
                    .query(&[("uploadType", "media"), ("part", "snippet,status")])
                    .header("Content-Type", "application/octet-stream")
                    .body(bytes),
            )
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ClientError::Auth(format!("上游拒绝访问: {status}")));
        }
        if !status.is_success() {
            return Err(ClientError::Upload(format!("上传请求失败: {status}")));
        }

        let created: VideoResource = response
            .json()
            .await
            .map_err(|e| ClientError::Json(format!("解析上传响应失败: {e}")))?;

        if params.is_empty() {
            return Ok(Video::with_snippet(
                created.id,
                self.session().clone(),
                created.snippet,
            ));
        }
        self.apply_upload_params(&created.id, &params).await
    }

    async fn read_source(&self, source: UploadSource) -> Result<Vec<u8>, ClientError> {
        match source {
            UploadSource::Path(path) => Ok(tokio::fs::read(&path).await?),
            UploadSource::Url(url) => {
                let client = http::client_timeout_90s()?;
                let response = client.get(&url).send().await?;
                if !response.status().is_success() {
                    return Err(ClientError::Upload(format!(
                        "取回远端视频失败: {}",
                        response.status()
                    )));
                }
                Ok(response.bytes().await?.to_vec())
            }
        }
    }

    /// 上传完成后写入标题/描述/可见性等元数据。
    async fn apply_upload_params(
        &self,
        id: &str,
        params: &UploadParams,
    ) -> Result<Video, ClientError> {
        let mut snippet = serde_json::Map::new();
        if let Some(title) = &params.title {
            snippet.insert("title".into(), title.clone().into());
        }
        if let Some(description) = &params.description {
            snippet.insert("description".into(), description.clone().into());
        }
        if !params.tags.is_empty() {
            snippet.insert("tags".into(), params.tags.clone().into());
        }
        let status = params
            .privacy_status
            .as_ref()
            .map(|p| serde_json::json!({ "privacyStatus": p }));

        let body = VideoUpdateBody {
            id,
            snippet: serde_json::Value::Object(snippet),
            status,
        };

        let url = format!("{}/v3/videos", self.session().config().data.base_url);
        let client = http::client_timeout_30s()?;
        let response = self
            .session()
            .authorize(
                client
                    .put(&url)
                    .query(&[("part", "snippet,status")])
                    .json(&body),
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Upload(format!("写入视频元数据失败: {status}")));
        }

        let updated: VideoResource = response
            .json()
            .await
            .map_err(|e| ClientError::Json(format!("解析元数据响应失败: {e}")))?;
        Ok(Video::with_snippet(
            updated.id,
            self.session().clone(),
            updated.snippet,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_sources_are_detected_by_scheme() {
        assert_eq!(
            UploadSource::from("https://bit.ly/test"),
            UploadSource::Url("https://bit.ly/test".into())
        );
        assert_eq!(
            UploadSource::from("./clips/video.mp4"),
            UploadSource::Path(PathBuf::from("./clips/video.mp4"))
        );
    }

    #[test]
    fn empty_params_skip_the_metadata_update() {
        assert!(UploadParams::default().is_empty());
        let params = UploadParams {
            title: Some("t".into()),
            ..Default::default()
        };
        assert!(!params.is_empty());
    }
}
