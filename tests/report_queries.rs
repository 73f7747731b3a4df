use std::net::SocketAddr;
use std::sync::{Arc, Mutex, Once};

use chrono::NaiveDate;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use tube_analytics::{
    AppConfig, ClientError, Grouping, LocationInput, MetricSeries, MetricValue, ReportError,
    ReportOptions, Session,
};

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

async fn read_request(socket: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 4096];
    let header_end = loop {
        let n = socket.read(&mut tmp).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&tmp[..n]);
        if let Some(pos) = find_subslice(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())?
        })
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut tmp).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&tmp[..n]);
    }

    Some(String::from_utf8_lossy(&buf).to_string())
}

/// 启动固定响应的桩上游：每个请求都返回同一份 JSON，并记录完整请求。
async fn start_canned_upstream(
    status: u16,
    body: &'static str,
) -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let log: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let server_log = log.clone();
    tokio::spawn(async move {
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(v) => v,
                Err(_) => break,
            };
            let log = server_log.clone();
            tokio::spawn(async move {
                if let Some(request) = read_request(&mut socket).await {
                    log.lock().unwrap().push(request);
                    let response = format!(
                        "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.flush().await;
                }
            });
        }
    });

    (addr, log)
}

fn session_for(addr: SocketAddr) -> Session {
    let mut config = AppConfig::default();
    let base = format!("http://{addr}");
    config.reports.base_url = base.clone();
    config.data.base_url = base.clone();
    config.partner.base_url = base.clone();
    config.upload.base_url = base;
    Session::with_config(config, "test-token")
}

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn query_of(request: &str) -> &str {
    let line = request.lines().next().unwrap();
    let path = line.split_whitespace().nth(1).unwrap();
    path.split_once('?').map(|(_, q)| q).unwrap_or("")
}

#[tokio::test]
async fn views_by_day_preserve_zero_and_cover_reported_days() {
    let (addr, log) = start_canned_upstream(
        200,
        r#"{"columnHeaders":[{"name":"day"},{"name":"views"}],"rows":[["2021-01-02",0],["2021-01-01",10],["2021-01-03",5]]}"#,
    )
    .await;

    let video = session_for(addr).video("vid9");
    let opts = ReportOptions::new().since(d("2021-01-01")).until(d("2021-01-03"));
    let series = video.views(opts).await.unwrap();

    let map = series.by_day().unwrap();
    assert_eq!(map.len(), 3);
    assert_eq!(map[&d("2021-01-01")], MetricValue::Count(10));
    assert_eq!(map[&d("2021-01-02")], MetricValue::Count(0));
    assert_eq!(map[&d("2021-01-03")], MetricValue::Count(5));

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1, "一次指标调用恰好一次上游请求");
    let query = query_of(&log[0]);
    assert!(query.contains("metrics=views"));
    assert!(query.contains("dimensions=day"));
    assert!(query.contains("start-date=2021-01-01"));
    assert!(query.contains("end-date=2021-01-03"));
    assert!(query.contains("ids=channel%3D%3Dmine"));
    assert!(query.contains("filters=video%3D%3Dvid9"));
}

#[tokio::test]
async fn views_on_returns_value_for_reported_day() {
    let (addr, _log) = start_canned_upstream(
        200,
        r#"{"rows":[["2021-01-02",7]]}"#,
    )
    .await;

    let video = session_for(addr).video("vid9");
    assert_eq!(video.views_on(d("2021-01-02")).await.unwrap(), Some(7));
}

#[tokio::test]
async fn views_on_returns_none_when_upstream_has_no_data() {
    // 未合作期/未来日期：上游不返回行，单日取值为 None 而非 0。
    let (addr, _log) = start_canned_upstream(200, r#"{}"#).await;

    let video = session_for(addr).video("vid9");
    assert_eq!(video.views_on(d("1999-01-01")).await.unwrap(), None);
}

#[tokio::test]
async fn earnings_by_range_yield_a_single_total() {
    let (addr, log) = start_canned_upstream(200, r#"{"rows":[[42.5]]}"#).await;

    let session = session_for(addr).on_behalf_of_content_owner("acme");
    let video = session.video("vid9");
    let opts = ReportOptions::new().since(d("2021-01-01")).by(Grouping::Range);
    let series = video.earnings(opts).await.unwrap();

    assert_eq!(series.len(), 1);
    assert_eq!(series.total(), Some(MetricValue::Rate(42.5)));

    let log = log.lock().unwrap();
    let query = query_of(&log[0]);
    assert!(query.contains("ids=contentOwner%3D%3Dacme"));
    assert!(query.contains("metrics=earnings"));
    assert!(!query.contains("dimensions="));
}

#[tokio::test]
async fn bare_code_and_country_spec_build_identical_queries() {
    let (addr, log) = start_canned_upstream(200, r#"{"rows":[["US",8]]}"#).await;
    let video = session_for(addr).video("vid9");

    let base = || {
        ReportOptions::new()
            .since(d("2021-01-01"))
            .until(d("2021-01-03"))
            .by(Grouping::Country)
    };
    let first = video
        .views(base().in_location("US"))
        .await
        .unwrap();
    let second = video
        .views(base().in_location(LocationInput::country("US")))
        .await
        .unwrap();

    assert_eq!(first, second);
    let keys: Vec<_> = first.by_country().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["US".to_string()]);

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(query_of(&log[0]), query_of(&log[1]));
}

#[tokio::test]
async fn state_forms_agree_and_strip_the_us_prefix() {
    let (addr, log) = start_canned_upstream(200, r#"{"rows":[["US-NY",6]]}"#).await;
    let video = session_for(addr).video("vid9");

    let base = || {
        ReportOptions::new()
            .since(d("2021-01-01"))
            .until(d("2021-01-03"))
            .by(Grouping::State)
    };
    let first = video
        .views(base().in_location(LocationInput::state("NY")))
        .await
        .unwrap();
    let second = video
        .views(base().in_location(LocationInput::country_state("US", "NY")))
        .await
        .unwrap();

    assert_eq!(first, second);
    let keys: Vec<_> = first.by_state().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["NY".to_string()]);

    let log = log.lock().unwrap();
    assert_eq!(query_of(&log[0]), query_of(&log[1]));
    assert!(
        query_of(&log[0]).contains("country%3D%3DUS%3Bprovince%3D%3DUS-NY"),
        "state 筛选按 country==US + province==US-NY 下发: {}",
        query_of(&log[0])
    );
}

#[tokio::test]
async fn viewer_percentage_defaults_to_nested_gender_age_grouping() {
    let (addr, log) = start_canned_upstream(
        200,
        r#"{"rows":[["female","age18-24",12.3],["female","age25-34",7.2],["male","age18-24",9.1]]}"#,
    )
    .await;

    let video = session_for(addr).video("vid9");
    let opts = ReportOptions::new().since(d("2020-01-01")).until(d("2021-01-01"));
    let series = video.viewer_percentage(opts).await.unwrap();

    let map = series.by_gender_age_group().unwrap();
    assert_eq!(map.len(), 2);
    let female: f64 = map[&tube_analytics::Gender::Female].values().sum();
    assert!(female <= 100.0);

    let log = log.lock().unwrap();
    assert!(query_of(&log[0]).contains("dimensions=gender%2CageGroup"));
}

#[tokio::test]
async fn related_video_keys_resolve_lazily() {
    let (addr, log) = start_canned_upstream(200, r#"{"rows":[["vidA",5],["vidB",2]]}"#).await;

    let session = session_for(addr);
    let opts = ReportOptions::new()
        .since(d("2021-01-01"))
        .until(d("2021-01-03"))
        .by(Grouping::RelatedVideo);
    let series = session.video("vid9").views(opts).await.unwrap();

    let entries = series.by_related_video().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].0.id(), "vidA");

    // 整形阶段不应取回视频资源：只有报表查询一条请求。
    assert_eq!(log.lock().unwrap().len(), 1);
    assert!(
        query_of(&log.lock().unwrap()[0])
            .contains("insightTrafficSourceType%3D%3DRELATED_VIDEO")
    );
}

#[tokio::test]
async fn validation_failures_send_no_request() {
    let (addr, log) = start_canned_upstream(200, r#"{"rows":[]}"#).await;
    let video = session_for(addr).video("vid9");

    // 起始晚于结束
    let err = video
        .views(ReportOptions::new().since(d("2021-01-03")).until(d("2021-01-01")))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Report(ReportError::InvalidRange(_))
    ));

    // 别名取值冲突
    let err = video
        .views(ReportOptions::new().since(d("2021-01-01")).from(d("2021-01-02")))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Report(ReportError::Validation(_))
    ));

    // 指标不支持的分组
    let err = video
        .earnings(
            ReportOptions::new()
                .since(d("2021-01-01"))
                .until(d("2021-01-02"))
                .by(Grouping::State),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Report(ReportError::UnsupportedQuery(_))
    ));

    // detail 维度叠加地域筛选
    let err = video
        .views(
            ReportOptions::new()
                .since(d("2021-01-01"))
                .until(d("2021-01-02"))
                .by(Grouping::RelatedVideo)
                .in_location("US"),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Report(ReportError::UnsupportedQuery(_))
    ));

    assert!(log.lock().unwrap().is_empty(), "校验失败不应发起任何请求");
}

#[tokio::test]
async fn upstream_failures_propagate_unmodified() {
    let (addr, _log) = start_canned_upstream(500, r#"{"error":"boom"}"#).await;
    let video = session_for(addr).video("vid9");
    let err = video
        .views(ReportOptions::new().since(d("2021-01-01")).until(d("2021-01-02")))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Report(ReportError::Network(_))));

    let (addr, _log) = start_canned_upstream(401, r#"{"error":"nope"}"#).await;
    let video = session_for(addr).video("vid9");
    let err = video
        .views(ReportOptions::new().since(d("2021-01-01")).until(d("2021-01-02")))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Report(ReportError::Auth(_))));
}

#[tokio::test]
async fn repeated_identical_calls_are_idempotent() {
    let (addr, log) = start_canned_upstream(
        200,
        r#"{"rows":[["DESKTOP",11],["MOBILE",4],["TV",1]]}"#,
    )
    .await;

    let video = session_for(addr).video("vid9");
    let opts = || {
        ReportOptions::new()
            .since(d("2021-01-01"))
            .until(d("2021-01-03"))
            .by(Grouping::DeviceType)
    };
    let first = video.views(opts()).await.unwrap();
    let second = video.views(opts()).await.unwrap();

    assert_eq!(first, second);
    assert!(matches!(first, MetricSeries::ByDeviceType(_)));
    assert_eq!(log.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn channel_scoped_metrics_use_the_channel_identity() {
    let (addr, log) = start_canned_upstream(200, r#"{"rows":[["2021-01-01",3]]}"#).await;

    let account = session_for(addr).account();
    let opts = ReportOptions::new().since(d("2021-01-01")).until(d("2021-01-01"));
    let series = account.comments(opts).await.unwrap();
    assert_eq!(series.by_day().unwrap().len(), 1);

    let log = log.lock().unwrap();
    let query = query_of(&log[0]);
    assert!(query.contains("ids=channel%3D%3Dmine"));
    // 频道维度的查询不应带 video 过滤
    assert!(!query.contains("video%3D%3D"));
}
