use reqwest::StatusCode;

use crate::error::ReportError;
use crate::http;
use crate::session::Session;

use super::models::ReportTable;
use super::query::ReportQuery;

/// 执行一次报表查询。
///
/// 每次指标调用恰好对应一次上游请求；上游失败原样传递，本层不重试。
pub async fn run_report(session: &Session, query: &ReportQuery) -> Result<ReportTable, ReportError> {
    let url = format!("{}/v1/reports", session.config().reports.base_url);
    let params = query.to_params(&session.report_ids());

    tracing::debug!(
        metric = query.metric.wire_name(),
        grouping = ?query.grouping,
        "发起报表查询"
    );

    let client = http::client_timeout_30s()?;
    let response = session
        .authorize(client.get(&url).query(&params))
        .send()
        .await?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ReportError::Auth(format!("上游拒绝访问: {status}")));
    }
    if !status.is_success() {
        tracing::warn!(%status, "报表查询失败");
        return Err(ReportError::Network(format!("报表请求失败: {status}")));
    }

    response
        .json::<ReportTable>()
        .await
        .map_err(|e| ReportError::Json(format!("解析报表响应失败: {e}")))
}
