use thiserror::Error;

/// 客户端统一错误类型
#[derive(Error, Debug)]
pub enum ClientError {
    /// 报表查询错误
    #[error("报表查询错误: {0}")]
    Report(#[from] ReportError),

    /// 网络请求错误
    #[error("网络错误: {0}")]
    Network(String),
    /// 上游请求超时（包含 connect/read 等阶段）
    #[error("请求超时")]
    Timeout,

    /// 认证失败 / 业务错误
    #[error("认证失败: {0}")]
    Auth(String),

    /// JSON 解析错误
    #[error("JSON 解析错误: {0}")]
    Json(String),

    /// 无效的响应
    #[error("无效的响应: {0}")]
    InvalidResponse(String),

    /// 上传处理错误
    #[error("上传处理错误: {0}")]
    Upload(String),

    /// I/O 错误
    #[error("I/O 错误: {0}")]
    Io(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),
}

/// 报表查询层错误类型
///
/// 校验类错误（InvalidRange / UnsupportedQuery / Validation）在发起任何
/// 网络请求之前同步产生；其余错误来自上游报表服务，原样向调用方传递。
#[derive(Error, Debug)]
pub enum ReportError {
    /// 日期范围无效（起始日期晚于结束日期）
    #[error("无效的日期范围: {0}")]
    InvalidRange(String),

    /// 指标与分组/筛选组合不受上游维度模型支持
    #[error("不支持的查询组合: {0}")]
    UnsupportedQuery(String),

    /// 参数校验错误
    #[error("参数校验错误: {0}")]
    Validation(String),

    /// 网络请求错误
    #[error("网络错误: {0}")]
    Network(String),

    /// 超时
    #[error("超时")]
    Timeout,

    /// 认证失败
    #[error("认证失败: {0}")]
    Auth(String),

    /// JSON 解析错误
    #[error("JSON 解析错误: {0}")]
    Json(String),

    /// 无效的响应（表格结构与所请求的维度不符、未知的维度取值等）
    #[error("无效的响应: {0}")]
    InvalidResponse(String),
}

// =============== Error conversions for common external errors ===============

impl From<reqwest::Error> for ReportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ReportError::Timeout
        } else {
            ReportError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Json(err.to_string())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Json(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{ClientError, ReportError};
    use std::time::Duration;

    async fn start_hanging_http_server() -> std::net::SocketAddr {
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind tcp listener");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            loop {
                let (socket, _) = match listener.accept().await {
                    Ok(v) => v,
                    Err(_) => break,
                };
                tokio::spawn(async move {
                    // 不返回任何 HTTP 响应，触发客户端 read timeout。
                    tokio::time::sleep(Duration::from_secs(3)).await;
                    drop(socket);
                });
            }
        });

        addr
    }

    #[tokio::test]
    async fn report_error_from_reqwest_timeout_is_timeout() {
        let addr = start_hanging_http_server().await;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("build reqwest client");

        let err = client
            .get(format!("http://{addr}/"))
            .send()
            .await
            .expect_err("expected timeout");
        assert!(err.is_timeout(), "expected reqwest timeout, got: {err}");

        let re: ReportError = err.into();
        assert!(
            matches!(re, ReportError::Timeout),
            "expected ReportError::Timeout, got: {re:?}"
        );
    }

    #[test]
    fn client_error_wraps_report_error() {
        let err: ClientError = ReportError::InvalidRange("2021-01-03 > 2021-01-01".into()).into();
        assert!(matches!(
            err,
            ClientError::Report(ReportError::InvalidRange(_))
        ));
    }
}
