use std::future::Future;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tempfile::tempdir;

use super::{FileSource, HttpSource, PercentileSource, StatsFetchClient, decode_rows, fetch_first_row};
use crate::error::{AppError, AppResult, FetchError, RenderError};
use crate::metrics::{PageKind, PercentileRow};

fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}

fn expectation(message: impl Into<String>) -> AppError {
    AppError::Io {
        source: std::io::Error::other(message.into()),
    }
}

/// Serves one HTTP response and hands back the raw request it received.
fn serve_once(status_line: &'static str, body: String) -> AppResult<(String, mpsc::Receiver<String>)> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    let (request_tx, request_rx) = mpsc::channel();

    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut raw = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let Ok(read) = stream.read(&mut buf) else {
                break;
            };
            if read == 0 {
                break;
            }
            raw.extend_from_slice(buf.get(..read).unwrap_or_default());
            if request_complete(&raw) {
                break;
            }
        }
        let response = format!(
            "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        drop(stream.write_all(response.as_bytes()));
        drop(request_tx.send(String::from_utf8_lossy(&raw).into_owned()));
    });

    Ok((format!("http://{}", addr), request_rx))
}

fn request_complete(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    let Some((head, body)) = text.split_once("\r\n\r\n") else {
        return false;
    };
    let length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    body.len() >= length
}

struct FakeSource {
    rows: Vec<PercentileRow>,
}

#[async_trait]
impl PercentileSource for FakeSource {
    fn describe(&self) -> String {
        "fake".to_owned()
    }

    async fn fetch_rows(&self) -> AppResult<Vec<PercentileRow>> {
        Ok(self.rows.clone())
    }
}

#[test]
fn decode_accepts_envelope_array_and_single_row() -> Result<(), String> {
    let envelope = decode_rows(json!({ "success": true, "data": [{ "xBA": 40 }] }), "x")
        .map_err(|err| err.to_string())?;
    let array = decode_rows(json!([{ "xBA": 40 }, { "xBA": 60 }]), "x")
        .map_err(|err| err.to_string())?;
    let single = decode_rows(json!({ "xBA": 40 }), "x").map_err(|err| err.to_string())?;
    if envelope.len() != 1 || array.len() != 2 || single.len() != 1 {
        return Err(format!(
            "Unexpected row counts: {} {} {}",
            envelope.len(),
            array.len(),
            single.len()
        ));
    }
    Ok(())
}

#[test]
fn decode_rejects_failed_envelope_and_scalars() -> Result<(), String> {
    match decode_rows(json!({ "success": false, "data": [] }), "Jane Doe") {
        Err(FetchError::Unsuccessful { subject }) if subject == "Jane Doe" => {}
        other => return Err(format!("Expected Unsuccessful, got {:?}", other)),
    }
    match decode_rows(json!(42), "x") {
        Err(FetchError::UnexpectedShape { .. }) => Ok(()),
        other => Err(format!("Expected UnexpectedShape, got {:?}", other)),
    }
}

#[test]
fn decode_never_reads_a_malformed_envelope_as_a_row() -> Result<(), String> {
    let cases = [
        json!({ "success": true, "data": [1, 2] }),
        json!({ "success": false, "data": "x" }),
        json!({ "success": "yes" }),
    ];
    for case in cases {
        match decode_rows(case.clone(), "Jane Doe") {
            Err(FetchError::UnexpectedShape { .. }) => {}
            other => return Err(format!("Expected UnexpectedShape for {}, got {:?}", case, other)),
        }
    }
    Ok(())
}

#[test]
fn file_source_rejects_envelope_with_bad_rows() -> AppResult<()> {
    run_async_test(async {
        let dir = tempdir()?;
        let path = dir.path().join("bad_envelope.json");
        std::fs::write(&path, r#"{"success": true, "data": [1, 2]}"#)?;
        match FileSource::new(path).fetch_rows().await {
            Err(AppError::Fetch(FetchError::UnexpectedShape { .. })) => Ok(()),
            other => Err(expectation(format!("Expected UnexpectedShape, got {:?}", other))),
        }
    })
}

#[test]
fn fetch_first_row_reports_empty_results() -> AppResult<()> {
    run_async_test(async {
        let source = FakeSource { rows: Vec::new() };
        match fetch_first_row(&source).await {
            Err(AppError::Render(RenderError::NoRows)) => Ok(()),
            other => Err(expectation(format!("Expected NoRows, got {:?}", other))),
        }
    })
}

#[test]
fn file_source_reads_backend_envelope() -> AppResult<()> {
    run_async_test(async {
        let dir = tempdir()?;
        let path = dir.path().join("jane_doe.json");
        std::fs::write(
            &path,
            r#"{"success": true, "data": [{"xBA_percentile": 75}, {"xBA_percentile": 12}]}"#,
        )?;

        let source = FileSource::new(path);
        if source.describe() != "jane_doe" {
            return Err(expectation(format!("Unexpected description: {}", source.describe())));
        }
        let row = fetch_first_row(&source).await?;
        let value = row.percentile("xBA_percentile")?;
        if (value - 75.0).abs() > f64::EPSILON {
            return Err(expectation(format!("Expected first row, got {}", value)));
        }
        Ok(())
    })
}

#[test]
fn file_source_reports_invalid_json() -> AppResult<()> {
    run_async_test(async {
        let dir = tempdir()?;
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json")?;
        match FileSource::new(path).fetch_rows().await {
            Err(AppError::Fetch(FetchError::ParseFile { .. })) => Ok(()),
            other => Err(expectation(format!("Expected ParseFile, got {:?}", other))),
        }
    })
}

#[test]
fn client_joins_endpoint_under_base_path() -> AppResult<()> {
    let client = StatsFetchClient::new("http://stats.local/dashboard", Duration::from_secs(1))?;
    let url = client.endpoint(PageKind::Pitcher)?;
    if url.as_str() != "http://stats.local/dashboard/update_pitcher_percentiles" {
        return Err(expectation(format!("Unexpected endpoint: {}", url)));
    }
    match StatsFetchClient::new("not a url", Duration::from_secs(1)) {
        Err(AppError::Validation(_)) => Ok(()),
        other => Err(expectation(format!("Expected validation error, got {:?}", other))),
    }
}

#[test]
fn http_source_posts_subject_form() -> AppResult<()> {
    run_async_test(async {
        let body = json!({ "success": true, "data": [{ "xERA_percentile": 88 }] }).to_string();
        let (base_url, requests) = serve_once("HTTP/1.1 200 OK", body)?;
        let client = StatsFetchClient::new(&base_url, Duration::from_secs(5))?;
        let source = HttpSource::new(client, PageKind::Pitcher, "Jane Doe".to_owned());

        let row = fetch_first_row(&source).await?;
        let value = row.percentile("xERA_percentile")?;
        if (value - 88.0).abs() > f64::EPSILON {
            return Err(expectation(format!("Unexpected value: {}", value)));
        }

        let request = requests
            .recv_timeout(Duration::from_secs(5))
            .map_err(|err| expectation(format!("No request captured: {}", err)))?;
        if !request.starts_with("POST /update_pitcher_percentiles") {
            return Err(expectation(format!("Unexpected request line: {}", request)));
        }
        if !request.contains("Pitcher=Jane+Doe") {
            return Err(expectation(format!("Missing form body: {}", request)));
        }
        Ok(())
    })
}

#[test]
fn http_source_surfaces_backend_failure() -> AppResult<()> {
    run_async_test(async {
        let body = json!({ "success": false }).to_string();
        let (base_url, _requests) = serve_once("HTTP/1.1 200 OK", body)?;
        let client = StatsFetchClient::new(&base_url, Duration::from_secs(5))?;
        let source = HttpSource::new(client, PageKind::Hitter, "Nobody".to_owned());
        match source.fetch_rows().await {
            Err(AppError::Fetch(FetchError::Unsuccessful { subject })) if subject == "Nobody" => {
                Ok(())
            }
            other => Err(expectation(format!("Expected Unsuccessful, got {:?}", other))),
        }
    })
}

#[test]
fn http_source_surfaces_error_status() -> AppResult<()> {
    run_async_test(async {
        let (base_url, _requests) =
            serve_once("HTTP/1.1 500 Internal Server Error", "{}".to_owned())?;
        let client = StatsFetchClient::new(&base_url, Duration::from_secs(5))?;
        let source = HttpSource::new(client, PageKind::Hitter, "Anyone".to_owned());
        match source.fetch_rows().await {
            Err(AppError::Fetch(FetchError::Status { status: 500, .. })) => Ok(()),
            other => Err(expectation(format!("Expected HTTP 500, got {:?}", other))),
        }
    })
}
