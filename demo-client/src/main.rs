use anyhow::Result;
use clap::Parser;
use colored::*;

mod output;
mod scenarios;
mod sse_client;

use output::print_test_summary;

#[derive(Parser)]
#[command(name = "demo-client")]
#[command(about = "Exercises the streaming and offload demo endpoints")]
struct Cli {
    /// Base URL of the server (e.g., http://localhost:3000)
    #[arg(long, default_value = "http://localhost:3000")]
    base_url: String,

    /// Scenario to run
    #[arg(long, value_enum)]
    scenario: ScenarioChoice,

    /// Fibonacci index used by the starvation scenarios
    #[arg(long, default_value_t = 40)]
    n: u32,

    /// Number of events to read before hanging up in the disconnect scenario
    #[arg(long, default_value_t = 3)]
    stop_after: u64,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

#[derive(clap::ValueEnum, Clone)]
enum ScenarioChoice {
    /// Read a whole event stream through to its streamend event
    Stream,
    /// Hang up on an event stream part way through
    StreamDisconnect,
    /// Probe /random while /fibonacci/:n runs on a worker
    Offloaded,
    /// Probe /random while /fibonacci-block/:n blocks the server
    Blocking,
    /// Run every scenario
    All,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    }

    let base_url = cli.base_url.trim_end_matches('/').to_string();
    let client = reqwest::Client::new();

    println!(
        "{} Running against {}",
        "→".blue(),
        base_url.bright_white().bold()
    );

    let mut results = Vec::new();

    match cli.scenario {
        ScenarioChoice::Stream => {
            results.push(scenarios::test_stream(&base_url).await?);
        }
        ScenarioChoice::StreamDisconnect => {
            results.push(scenarios::test_stream_disconnect(&base_url, cli.stop_after).await?);
        }
        ScenarioChoice::Offloaded => {
            results.push(scenarios::test_starvation(&client, &base_url, cli.n, false).await?);
        }
        ScenarioChoice::Blocking => {
            results.push(scenarios::test_starvation(&client, &base_url, cli.n, true).await?);
        }
        ScenarioChoice::All => {
            results.push(scenarios::test_stream_disconnect(&base_url, cli.stop_after).await?);
            results.push(scenarios::test_starvation(&client, &base_url, cli.n, false).await?);
            results.push(scenarios::test_starvation(&client, &base_url, cli.n, true).await?);
            results.push(scenarios::test_stream(&base_url).await?);
        }
    }

    print_test_summary(&results);

    let all_passed = results.iter().all(|r| r.passed);

    if all_passed {
        println!("\n{}", "All tests passed! ✓".bright_green().bold());
    } else {
        println!("\n{}", "Some tests failed! ✗".bright_red().bold());
    }

    std::process::exit(if all_passed { 0 } else { 1 });
}
