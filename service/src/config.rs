use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::time::Duration;

const DEFAULT_INTERFACE: &str = "127.0.0.1";

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs that allowed to receive server responses.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "http://localhost:4200"
    )]
    pub allowed_origins: Vec<String>,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = DEFAULT_INTERFACE)]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 3000)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Seconds to wait for an offloaded computation before answering 504.
    /// Unset means wait for as long as the worker takes.
    #[arg(
        long = "worker-timeout-secs",
        env = "WORKER_TIMEOUT_SECS",
        value_parser = clap::value_parser!(u64).range(1..).map(Duration::from_secs),
    )]
    worker_timeout: Option<Duration>,
}

impl Default for Config {
    /// Defaults plus any environment overrides, ignoring the process arguments.
    fn default() -> Self {
        Config::parse_from([env!("CARGO_PKG_NAME")])
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn interface(&self) -> &str {
        self.interface.as_deref().unwrap_or(DEFAULT_INTERFACE)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.interface(), self.port)
    }

    pub fn worker_timeout(&self) -> Option<Duration> {
        self.worker_timeout
    }

    /// A zero timeout would fail every offloaded request, so it is treated as unset.
    pub fn set_worker_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.worker_timeout = timeout.filter(|t| !t.is_zero());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo_constants() {
        let config = Config::try_parse_from(["event_loop_demos"]).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.interface(), "127.0.0.1");
        assert_eq!(config.allowed_origins, vec!["http://localhost:4200"]);
        assert_eq!(config.log_level_filter, LevelFilter::Info);
        assert_eq!(config.worker_timeout(), None);
    }

    #[test]
    fn test_allowed_origins_are_comma_delimited() {
        let config = Config::try_parse_from([
            "event_loop_demos",
            "--allowed-origins",
            "http://localhost:4200,https://demo.example.com",
        ])
        .unwrap();

        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:4200", "https://demo.example.com"]
        );
    }

    #[test]
    fn test_worker_timeout_is_parsed_as_seconds() {
        let config =
            Config::try_parse_from(["event_loop_demos", "--worker-timeout-secs", "30"]).unwrap();

        assert_eq!(config.worker_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.listen_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_rejects_zero_worker_timeout() {
        assert!(
            Config::try_parse_from(["event_loop_demos", "--worker-timeout-secs", "0"]).is_err()
        );
    }

    #[test]
    fn test_set_worker_timeout_keeps_sub_second_values() {
        let config = Config::try_parse_from(["event_loop_demos"])
            .unwrap()
            .set_worker_timeout(Some(Duration::from_millis(500)));

        assert_eq!(config.worker_timeout(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_set_worker_timeout_treats_zero_as_unset() {
        let config = Config::try_parse_from(["event_loop_demos"])
            .unwrap()
            .set_worker_timeout(Some(Duration::ZERO));

        assert_eq!(config.worker_timeout(), None);
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        assert!(
            Config::try_parse_from(["event_loop_demos", "--log-level-filter", "LOUD"]).is_err()
        );
    }
}
