use std::path::Path;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use xbrl_spider::edgar::{self, index, scan};
use xbrl_spider::{Config, SpiderError};

const EMAIL: &str = "analyst@example.com";

const INDEX: &str = "\
Description:           XBRL Index of EDGAR Dissemination Feed
Last Data Received:    December 31, 2024
Comments:              webmaster@sec.gov
Anonymous FTP:         ftp://ftp.sec.gov/edgar/




CIK|Company Name|Form Type|Date Filed|Filename
--------------------------------------------------------------------------------
1000209|MEDALLION FINANCIAL CORP|10-K|2024-10-03|edgar/data/1000209/a.txt
1000228|HENRY SCHEIN INC|10-Q|2024-10-21|edgar/data/1000228/b.txt
1000623|SCHWEITZER MAUDUIT INTERNATIONAL INC|10-K|2024-11-01|edgar/data/1000623/c.txt
1001039|WALT DISNEY CO/|10-K|2024-11-14|edgar/data/1001039/d.txt
";

const RESTATED: &str = "<xbrl>\
<dei:DocumentFinStmtErrorCorrectionFlag contextRef=\"c-1\">true</dei:DocumentFinStmtErrorCorrectionFlag>\
<dei:AuditorName contextRef=\"c-1\">Deloitte & Touche LLP</dei:AuditorName>\
</xbrl>";

const RESTATED_UNNAMED: &str = "<xbrl>\
<dei:DocumentFinStmtErrorCorrectionFlag contextRef=\"c-1\">true</dei:DocumentFinStmtErrorCorrectionFlag>\
</xbrl>";

const CLEAN: &str = "<xbrl>\
<dei:DocumentFinStmtErrorCorrectionFlag contextRef=\"c-1\">false</dei:DocumentFinStmtErrorCorrectionFlag>\
<dei:AuditorName contextRef=\"c-1\">KPMG LLP</dei:AuditorName>\
</xbrl>";

fn config(server: &MockServer, dir: &Path) -> Config {
    Config::new("2024", "QTR4", EMAIL)
        .unwrap()
        .with_archive_url(&server.uri())
        .unwrap()
        .with_temp_dir(dir.join("temp"))
        .with_output_dir(dir)
}

async fn mount_index(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/edgar/full-index/2024/QTR4/xbrl.idx"))
        .and(header("user-agent", EMAIL))
        .respond_with(ResponseTemplate::new(200).set_body_string(INDEX))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_document(server: &MockServer, name: &str, response: ResponseTemplate, hits: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/edgar/data/{name}")))
        .and(header("user-agent", EMAIL))
        .respond_with(response)
        .expect(hits)
        .mount(server)
        .await;
}

fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn scrape_writes_restated_filings() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config(&server, dir.path());

    mount_index(&server).await;
    let ok = |body: &str| ResponseTemplate::new(200).set_body_string(body);
    mount_document(&server, "1000209/a.txt", ok(RESTATED), 1).await;
    mount_document(&server, "1000623/c.txt", ok(CLEAN), 1).await;
    mount_document(&server, "1001039/d.txt", ok(RESTATED_UNNAMED), 1).await;
    // the 10-Q is never fetched
    mount_document(&server, "1000228/b.txt", ok(RESTATED), 0).await;

    let report = edgar::scrape(&config, false).await.unwrap();

    assert_eq!(report.filings, 3);
    assert_eq!(report.matches, 2);
    assert_eq!(report.output, dir.path().join("xbrl-2024-QTR4.xlsx"));
    assert!(report.output.exists());

    // only the index survives in the temp directory
    assert_eq!(files_in(&dir.path().join("temp")), ["xbrl.idx"]);
}

#[tokio::test]
async fn scan_collects_matches_with_auditors() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config(&server, dir.path());
    let http_client = xbrl_spider::build_client(&config).unwrap();
    let filings = index::parse(INDEX).unwrap();

    let ok = |body: &str| ResponseTemplate::new(200).set_body_string(body);
    mount_document(&server, "1000209/a.txt", ok(RESTATED), 1).await;
    mount_document(&server, "1000623/c.txt", ok(CLEAN), 1).await;
    mount_document(&server, "1001039/d.txt", ok(RESTATED_UNNAMED), 1).await;

    let matches = scan::scan(&http_client, &config, &filings, false)
        .await
        .unwrap();

    let found: Vec<_> = matches
        .iter()
        .map(|m| (m.filing.ordinal, m.filing.cik.as_str(), m.auditor.as_deref()))
        .collect();
    assert_eq!(
        found,
        [
            (0, "1000209", Some("Deloitte & Touche LLP")),
            (2, "1001039", None),
        ]
    );
    assert!(matches.iter().all(|m| m.filing.form_type == "10-K"));
    assert!(files_in(&config.temp_dir).is_empty());
}

#[tokio::test]
async fn failed_download_stops_the_scan() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config(&server, dir.path());
    let http_client = xbrl_spider::build_client(&config).unwrap();
    let filings = index::parse(INDEX).unwrap();

    let ok = |body: &str| ResponseTemplate::new(200).set_body_string(body);
    mount_document(&server, "1000209/a.txt", ok(RESTATED), 1).await;
    mount_document(&server, "1000623/c.txt", ResponseTemplate::new(503), 1).await;
    // later rows are never requested
    mount_document(&server, "1001039/d.txt", ok(RESTATED), 0).await;

    let err = scan::scan(&http_client, &config, &filings, false)
        .await
        .unwrap_err();

    match &err {
        SpiderError::Download { ordinal, url, source } => {
            assert_eq!(*ordinal, 1);
            assert!(url.ends_with("/edgar/data/1000623/c.txt"));
            assert_eq!(source.status().map(|s| s.as_u16()), Some(503));
        }
        other => panic!("expected a download error, got {other:?}"),
    }
    let msg = err.operator_message();
    assert!(msg.starts_with("Failed to download http://"), "{msg}");
    assert_eq!(msg.matches("/edgar/data/1000623/c.txt").count(), 1, "{msg}");

    // the scratch file is gone even though the scan failed
    assert!(files_in(&config.temp_dir).is_empty());
}

#[tokio::test]
async fn failed_download_writes_no_spreadsheet() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config(&server, dir.path());

    mount_index(&server).await;
    mount_document(&server, "1000209/a.txt", ResponseTemplate::new(404), 1).await;

    let result = edgar::scrape(&config, false).await;

    assert!(matches!(result, Err(SpiderError::Download { ordinal: 0, .. })));
    assert!(!config.output_path().exists());
}

#[tokio::test]
async fn index_error_status_is_reported() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config(&server, dir.path());
    let http_client = xbrl_spider::build_client(&config).unwrap();

    Mock::given(method("GET"))
        .and(path("/edgar/full-index/2024/QTR4/xbrl.idx"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let err = index::fetch(&http_client, &config, false).await.unwrap_err();

    match err {
        SpiderError::IndexStatus { url, status } => {
            assert_eq!(url, config.index_url());
            assert_eq!(status.as_u16(), 403);
        }
        other => panic!("expected an index status error, got {other:?}"),
    }
    assert!(!config.index_path().exists());
}

#[tokio::test]
async fn index_is_saved_and_filtered() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config(&server, dir.path());
    let http_client = xbrl_spider::build_client(&config).unwrap();

    mount_index(&server).await;

    let saved = index::fetch(&http_client, &config, false).await.unwrap();
    assert_eq!(saved, config.index_path());
    assert_eq!(std::fs::read_to_string(&saved).unwrap(), INDEX);

    // the archive expects compressed transfers and an explicit host
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let sent = |name: &str| {
        requests[0]
            .headers
            .get(name)
            .map(|value| value.to_str().unwrap().to_string())
    };
    assert_eq!(sent("accept-encoding").as_deref(), Some("gzip,deflate"));
    assert_eq!(sent("host"), Some(server.address().to_string()));
    assert_eq!(sent("user-agent").as_deref(), Some(EMAIL));

    let filings = index::read(&saved, false).await.unwrap();
    let ordinals: Vec<_> = filings.iter().map(|f| f.ordinal).collect();
    assert_eq!(ordinals, [0, 1, 2]);
}

#[tokio::test]
async fn index_save_failure_is_an_io_error() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config(&server, dir.path());
    let http_client = xbrl_spider::build_client(&config).unwrap();

    // a plain file where the temp directory should go
    std::fs::write(&config.temp_dir, b"").unwrap();
    mount_index(&server).await;

    let err = index::fetch(&http_client, &config, false).await.unwrap_err();

    assert!(matches!(err, SpiderError::Io { .. }), "got {err:?}");
    assert!(!config.index_path().exists());
}
