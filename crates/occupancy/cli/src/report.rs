//! Occupancy report rendering
//!
//! Rooms are fetched one at a time, in roster order. In table mode each
//! row is written as soon as its reading arrives.

use std::io::Write;

use chrono::{DateTime, Utc};
use occupancy_client::OccupancySource;
use occupancy_types::{Reading, RoomConfig, Roster};
use serde::Serialize;
use tracing::debug;

use crate::error::CliResult;
use crate::output::{write_structured, OutputFormat};

/// Width of the separator rule under the header.
pub const SEPARATOR_WIDTH: usize = 60;

/// Table header line.
pub fn header_line() -> String {
    format!(
        "{:<25} | {:<7} | {:<8} | {}",
        "Room Name", "Count", "Max Cap", "% Full"
    )
}

/// Separator rule printed under the header.
pub fn separator_line() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

/// Format one table row.
///
/// Rooms without a count show the failure text in place of the numeric
/// columns.
pub fn format_row(room: &RoomConfig, reading: &Reading) -> String {
    match reading {
        Reading::Count(count) => format!(
            "{:<25} | {:<7} | {:<8} | {:>6.1}%",
            room.display_name(),
            count,
            room.max_capacity(),
            room.percent_full(*count)
        ),
        Reading::Unavailable(failure) => {
            format!("{:<25} | {}", room.display_name(), failure)
        }
    }
}

/// One room in a structured report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomReport {
    pub room_name: String,
    pub space_id: String,
    pub max_capacity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    /// Percent full, rounded to two decimals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RoomReport {
    pub fn new(room: &RoomConfig, reading: &Reading) -> Self {
        Self {
            room_name: room.display_name().to_string(),
            space_id: room.space_id().to_string(),
            max_capacity: room.max_capacity(),
            count: reading.count(),
            percentage: reading
                .count()
                .map(|count| round2(room.percent_full(count))),
            error: reading.failure().map(ToString::to_string),
        }
    }
}

/// Structured report for JSON and YAML output
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    /// True when every room returned a count
    pub success: bool,
    pub message: String,
    pub data: Vec<RoomReport>,
    pub failed: usize,
    pub generated_at: DateTime<Utc>,
}

impl ReportSummary {
    pub fn from_rooms(data: Vec<RoomReport>) -> Self {
        let total = data.len();
        let failed = data.iter().filter(|r| r.count.is_none()).count();

        Self {
            success: failed == 0,
            message: format!(
                "Scraped {}/{} rooms successfully",
                total - failed,
                total
            ),
            data,
            failed,
            generated_at: Utc::now(),
        }
    }
}

/// Render the report as a fixed-width table.
///
/// Returns the number of rooms that produced a count.
pub async fn render_table<S, W>(roster: &Roster, source: &S, out: &mut W) -> CliResult<usize>
where
    S: OccupancySource + ?Sized,
    W: Write,
{
    writeln!(out, "{}", header_line())?;
    writeln!(out, "{}", separator_line())?;

    let mut counted = 0;
    for room in roster {
        let reading = source.fetch(room.space_id()).await;
        if reading.count().is_some() {
            counted += 1;
        }
        writeln!(out, "{}", format_row(room, &reading))?;
        out.flush()?;
    }

    debug!(counted, total = roster.len(), "report rendered");
    Ok(counted)
}

/// Fetch every room and build a structured summary.
pub async fn collect<S>(roster: &Roster, source: &S) -> ReportSummary
where
    S: OccupancySource + ?Sized,
{
    let mut data = Vec::with_capacity(roster.len());
    for room in roster {
        let reading = source.fetch(room.space_id()).await;
        data.push(RoomReport::new(room, &reading));
    }
    ReportSummary::from_rooms(data)
}

/// Run one report pass in the requested format.
///
/// `stream` marks a pass that is one of many written to the same output.
pub async fn run_pass<S, W>(
    roster: &Roster,
    source: &S,
    format: OutputFormat,
    stream: bool,
    out: &mut W,
) -> CliResult<()>
where
    S: OccupancySource + ?Sized,
    W: Write,
{
    match format {
        OutputFormat::Table => {
            render_table(roster, source, out).await?;
        }
        OutputFormat::Json | OutputFormat::Yaml => {
            let summary = collect(roster, source).await;
            write_structured(&summary, format, stream, out)?;
        }
    }
    Ok(())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use occupancy_client::DensityClient;
    use occupancy_types::{Credential, FetchFailure};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use wiremock::matchers::{any, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Source that replays canned readings and records the order of calls.
    #[derive(Default)]
    struct ScriptedSource {
        readings: HashMap<String, Reading>,
        calls: Mutex<Vec<String>>,
        fetches: AtomicUsize,
    }

    impl ScriptedSource {
        fn with(mut self, space_id: &str, reading: Reading) -> Self {
            self.readings.insert(space_id.to_string(), reading);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl OccupancySource for ScriptedSource {
        async fn fetch(&self, space_id: &str) -> Reading {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.calls.lock().unwrap().push(space_id.to_string());
            self.readings.get(space_id).cloned().unwrap_or_else(|| {
                FetchFailure::Transport(format!("unknown space {}", space_id)).into()
            })
        }
    }

    fn roster(ids: &[&str]) -> Roster {
        Roster::builtin_paired(ids)
    }

    async fn render_to_string<S: OccupancySource>(roster: &Roster, source: &S) -> String {
        let mut out = Vec::new();
        render_table(roster, source, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_header_and_separator() {
        assert_eq!(
            header_line(),
            "Room Name                 | Count   | Max Cap  | % Full"
        );
        assert_eq!(separator_line().len(), 60);
        assert!(separator_line().chars().all(|c| c == '-'));
    }

    #[test]
    fn test_format_count_row() {
        let room = RoomConfig::new("Weight Rooms (Total)", "spc_total", 150).unwrap();
        assert_eq!(
            format_row(&room, &Reading::Count(37)),
            "Weight Rooms (Total)      | 37      | 150      |   24.7%"
        );
    }

    #[test]
    fn test_format_over_capacity_row() {
        let room = RoomConfig::new("Annex Weight Room", "spc_annex", 30).unwrap();
        assert_eq!(
            format_row(&room, &Reading::Count(45)),
            "Annex Weight Room         | 45      | 30       |  150.0%"
        );
    }

    #[test]
    fn test_format_failure_row() {
        let room = RoomConfig::new("Main Weight Room", "spc_main", 80).unwrap();
        assert_eq!(
            format_row(&room, &FetchFailure::MissingToken.into()),
            "Main Weight Room          | Missing Token"
        );
    }

    #[tokio::test]
    async fn test_renders_one_row_per_room_in_order() {
        let source = ScriptedSource::default()
            .with("s1", Reading::Count(37))
            .with("s2", Reading::Count(20))
            .with("s3", Reading::Count(10))
            .with("s4", Reading::Count(0))
            .with("s5", Reading::Count(55));
        let roster = roster(&["s1", "s2", "s3", "s4", "s5"]);

        let text = render_to_string(&roster, &source).await;
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 2 + 5);
        assert_eq!(lines[0], header_line());
        assert_eq!(lines[1], separator_line());
        assert_eq!(lines[2], "Weight Rooms (Total)      | 37      | 150      |   24.7%");
        assert_eq!(lines[6], "CMS Fitness Center        | 55      | 55       |  100.0%");
        assert_eq!(source.calls(), ["s1", "s2", "s3", "s4", "s5"]);
    }

    #[tokio::test]
    async fn test_failed_room_does_not_stop_report() {
        let source = ScriptedSource::default()
            .with("s1", Reading::Count(12))
            .with(
                "s2",
                FetchFailure::Http {
                    status: 500,
                    reason: "Internal Server Error".into(),
                }
                .into(),
            )
            .with("s3", Reading::Count(8));
        let roster = roster(&["s1", "s2", "s3"]);

        let mut out = Vec::new();
        let counted = render_table(&roster, &source, &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(counted, 2);
        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[3],
            "Main Weight Room          | Error: HTTP 500 Internal Server Error"
        );
        assert!(lines[4].starts_with("Extension Weight Room     | 8 "));
        assert_eq!(source.fetches.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_missing_count_renders_marker_without_percent() {
        let source = ScriptedSource::default().with(
            "s1",
            FetchFailure::MalformedResponse("missing field `count`".into()).into(),
        );
        let text = render_to_string(&roster(&["s1"]), &source).await;
        let row = text.lines().nth(2).unwrap();

        assert_eq!(row, "Weight Rooms (Total)      | No count in response");
        assert!(!row.contains('%'));
    }

    #[tokio::test]
    async fn test_consecutive_runs_are_identical() {
        let source = ScriptedSource::default()
            .with("s1", Reading::Count(37))
            .with("s2", FetchFailure::Transport("connection refused".into()).into());
        let roster = roster(&["s1", "s2"]);

        let first = render_to_string(&roster, &source).await;
        let second = render_to_string(&roster, &source).await;
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[tokio::test]
    async fn test_missing_token_renders_every_row_without_requests() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 1})))
            .expect(0)
            .mount(&server)
            .await;

        let client =
            DensityClient::new(Credential::absent(), &server.uri(), Duration::from_secs(5)).unwrap();
        let roster = roster(&["s1", "s2", "s3", "s4", "s5"]);

        let text = render_to_string(&roster, &client).await;
        let rows: Vec<_> = text.lines().skip(2).collect();

        assert_eq!(rows.len(), 5);
        for row in rows {
            assert!(row.ends_with(" | Missing Token"), "{}", row);
        }
    }

    #[tokio::test]
    async fn test_density_backend_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/spaces/spc_total/count"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 37})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/spaces/spc_main/count"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/spaces/spc_ext/count"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .mount(&server)
            .await;

        let client = DensityClient::new(
            Credential::bearer("tok_test"),
            &server.uri(),
            Duration::from_secs(5),
        )
        .unwrap();
        let roster = roster(&["spc_total", "spc_main", "spc_ext"]);

        let first = render_to_string(&roster, &client).await;
        let lines: Vec<_> = first.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[2].ends_with("|   24.7%"));
        assert!(lines[3].starts_with("Main Weight Room          | Error:"));
        assert_eq!(lines[4], "Extension Weight Room     | No count in response");

        let second = render_to_string(&roster, &client).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_collect_summary() {
        let source = ScriptedSource::default()
            .with("s1", Reading::Count(37))
            .with("s2", FetchFailure::MissingToken.into());
        let summary = collect(&roster(&["s1", "s2"]), &source).await;

        assert!(!summary.success);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.message, "Scraped 1/2 rooms successfully");
        assert_eq!(summary.data[0].percentage, Some(24.67));
        assert_eq!(summary.data[0].max_capacity, 150);
        assert_eq!(summary.data[1].count, None);
        assert_eq!(summary.data[1].error.as_deref(), Some("Missing Token"));
    }

    #[tokio::test]
    async fn test_run_pass_json() {
        let source = ScriptedSource::default().with("s1", Reading::Count(40));
        let mut out = Vec::new();
        run_pass(&roster(&["s1"]), &source, OutputFormat::Json, false, &mut out)
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["failed"], 0);
        assert_eq!(value["data"][0]["room_name"], "Weight Rooms (Total)");
        assert_eq!(value["data"][0]["count"], 40);
        assert!(value["data"][0].get("error").is_none());
    }

    #[tokio::test]
    async fn test_repeated_json_passes_stay_parseable() {
        let source = ScriptedSource::default()
            .with("s1", Reading::Count(40))
            .with("s2", FetchFailure::MissingToken.into());
        let roster = roster(&["s1", "s2"]);
        let mut out = Vec::new();
        for _ in 0..2 {
            run_pass(&roster, &source, OutputFormat::Json, true, &mut out)
                .await
                .unwrap();
        }

        let text = String::from_utf8(out).unwrap();
        let documents: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(documents.len(), 2);
        for document in documents {
            assert_eq!(document["failed"], 1);
            assert_eq!(document["data"][0]["count"], 40);
        }
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(24.666_666), 24.67);
        assert_eq!(round2(100.0), 100.0);
    }
}
