use anyhow::Result;
use colored::*;
use std::time::{Duration, Instant};

use crate::output::{print_event, print_latency, TestResult};
use crate::sse_client::Connection;

const EXPECTED_EVENTS: u64 = 15;
// Events are a second apart; anything much slower means the server is stuck.
const EVENT_TIMEOUT: Duration = Duration::from_secs(5);
// How long the slow request gets to start before the probe is fired.
const PROBE_DELAY: Duration = Duration::from_millis(200);
const STARVATION_TOLERANCE: Duration = Duration::from_millis(50);

fn result(scenario: &str, start: Instant, failure: Option<String>) -> TestResult {
    TestResult {
        scenario: scenario.to_string(),
        passed: failure.is_none(),
        message: failure,
        duration: start.elapsed(),
    }
}

/// Consumes a whole stream and checks it carries ids `0..15` and then `streamend`.
pub async fn test_stream(base_url: &str) -> Result<TestResult> {
    let start = Instant::now();
    println!("\n{}", "=== TEST: Full Stream ===".bright_cyan().bold());

    let mut connection = Connection::establish(base_url, "stream".to_string())?;
    let mut expected_id = 0;

    loop {
        let Some(event) = connection.next_event(EVENT_TIMEOUT).await? else {
            return Ok(result(
                "stream",
                start,
                Some(format!("Stream closed after {expected_id} events without streamend")),
            ));
        };
        print_event(&connection.label, &event);

        if event.is_stream_end() {
            let failure = (expected_id != EXPECTED_EVENTS).then(|| {
                format!("streamend arrived after {expected_id} events, expected {EXPECTED_EVENTS}")
            });
            return Ok(result("stream", start, failure));
        }

        let id = event.json().and_then(|json| json["id"].as_u64());
        if id != Some(expected_id) {
            return Ok(result(
                "stream",
                start,
                Some(format!("Expected event id {expected_id}, got {id:?}")),
            ));
        }
        expected_id += 1;
    }
}

/// Reads `stop_after` events and hangs up. The server should stop that session's timer;
/// watch its log for "Client disconnected".
pub async fn test_stream_disconnect(base_url: &str, stop_after: u64) -> Result<TestResult> {
    let start = Instant::now();
    println!(
        "\n{}",
        format!("=== TEST: Disconnect after {stop_after} events ===")
            .bright_cyan()
            .bold()
    );

    let mut connection = Connection::establish(base_url, "disconnect".to_string())?;

    for expected_id in 0..stop_after {
        let Some(event) = connection.next_event(EVENT_TIMEOUT).await? else {
            return Ok(result(
                "stream_disconnect",
                start,
                Some(format!("Stream closed after {expected_id} events")),
            ));
        };
        print_event(&connection.label, &event);

        if event.is_stream_end() {
            return Ok(result(
                "stream_disconnect",
                start,
                Some(format!("streamend arrived after only {expected_id} events")),
            ));
        }
    }

    drop(connection);
    println!("{} Disconnected after {} events", "✓".green(), stop_after);

    Ok(result("stream_disconnect", start, None))
}

/// Fires a slow Fibonacci request and, while it runs, a `/random` probe.
///
/// With `blocking` the probe is expected to finish only once the slow request has
/// finished; without it the probe should come back long before.
pub async fn test_starvation(
    client: &reqwest::Client,
    base_url: &str,
    n: u32,
    blocking: bool,
) -> Result<TestResult> {
    let start = Instant::now();
    let (scenario, path) = if blocking {
        ("starvation_blocking", format!("/fibonacci-block/{n}"))
    } else {
        ("starvation_offloaded", format!("/fibonacci/{n}"))
    };
    println!(
        "\n{}",
        format!("=== TEST: /random alongside {path} ===")
            .bright_cyan()
            .bold()
    );

    let slow = tokio::spawn({
        let client = client.clone();
        let url = format!("{base_url}{path}");
        async move {
            let started = Instant::now();
            let body = client.get(url).send().await?.text().await?;
            Ok::<_, reqwest::Error>((body, started.elapsed(), Instant::now()))
        }
    });

    tokio::time::sleep(PROBE_DELAY).await;

    let probe_started = Instant::now();
    let random = client
        .get(format!("{base_url}/random"))
        .send()
        .await?
        .text()
        .await?;
    let probe_latency = probe_started.elapsed();
    let probe_done = Instant::now();

    let (body, slow_latency, slow_done) = slow.await??;

    println!("{} {}", "→".blue(), body);
    println!("{} /random = {}", "→".blue(), random);
    print_latency(&path, slow_latency);
    print_latency("/random", probe_latency);

    if slow_latency < PROBE_DELAY * 2 {
        return Ok(result(
            scenario,
            start,
            Some(format!(
                "{path} finished in {slow_latency:?}; pick a larger n to observe starvation"
            )),
        ));
    }

    // Both responses of a starved probe arrive back to back, in either order.
    let starved = probe_done + STARVATION_TOLERANCE >= slow_done;
    let failure = match (blocking, starved) {
        (true, false) => Some(
            "/random was answered while the control thread should have been blocked".to_string(),
        ),
        (false, true) => Some("/random waited for the offloaded computation".to_string()),
        _ => None,
    };

    Ok(result(scenario, start, failure))
}
