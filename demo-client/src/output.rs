use colored::*;
use std::time::Duration;

use crate::sse_client::Event;

#[derive(Debug)]
pub struct TestResult {
    pub scenario: String,
    pub passed: bool,
    pub message: Option<String>,
    pub duration: Duration,
}

pub fn print_event(label: &str, event: &Event) {
    if event.is_stream_end() {
        println!(
            "[{}] +{:.1}s {} {}",
            label.bright_blue().bold(),
            event.received_after.as_secs_f64(),
            event.event_type.yellow(),
            event.data.dimmed()
        );
        return;
    }

    match event.json() {
        Some(json) => println!(
            "[{}] +{:.1}s #{} at {} {}",
            label.bright_blue().bold(),
            event.received_after.as_secs_f64(),
            json["id"].to_string().yellow(),
            json["timestamp"].as_str().unwrap_or("?"),
            json["message"].as_str().unwrap_or("").dimmed()
        ),
        None => println!("[{}] {}", label.bright_blue().bold(), event.data.dimmed()),
    }
}

pub fn print_latency(label: &str, latency: Duration) {
    println!("   {} {:?}", format!("{label}:").bold(), latency);
}

pub fn print_test_summary(results: &[TestResult]) {
    println!("\n{}", "=== TEST SUMMARY ===".bright_white().bold());

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = total - passed;

    for result in results {
        let status = if result.passed {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };

        println!("[{}] {} ({:?})", status, result.scenario, result.duration);

        if let Some(msg) = &result.message {
            println!("      {}", msg.dimmed());
        }
    }

    println!(
        "\n{}: {} passed, {} failed",
        "Results".bold(),
        passed.to_string().green(),
        failed.to_string().red()
    );
}
