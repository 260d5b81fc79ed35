use crate::assistant::HttpChatConfig;
use crate::seed::DEFAULT_SEED;
use chrono::NaiveDate;
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "estacaod")]
#[command(about = "Estação Tech dashboard sidecar (JSON lines over stdin/stdout)")]
#[command(
    after_help = "Environment:\n  RUST_LOG          Log filter override\n  OPENAI_API_KEY    Assistant API key"
)]
pub struct Config {
    /// Seed for the generated demo students.
    #[arg(long, env = "ESTACAOD_SEED", default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Last attendance day of the generated data (YYYY-MM-DD). Defaults to today.
    #[arg(long, env = "ESTACAOD_TODAY")]
    pub today: Option<NaiveDate>,

    #[arg(
        long,
        env = "ESTACAOD_ASSISTANT_ENDPOINT",
        default_value = "https://api.openai.com/v1/chat/completions"
    )]
    pub assistant_endpoint: String,

    #[arg(long, env = "ESTACAOD_ASSISTANT_MODEL", default_value = "gpt-3.5-turbo")]
    pub assistant_model: String,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub assistant_api_key: Option<String>,

    #[arg(long, env = "ESTACAOD_ASSISTANT_TIMEOUT_SECS")]
    pub assistant_timeout_secs: Option<u64>,

    /// Default level when RUST_LOG is unset.
    #[arg(long, env = "ESTACAOD_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[arg(long, default_value_t = false)]
    pub log_json: bool,
}

impl Config {
    pub fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    pub fn assistant(&self) -> HttpChatConfig {
        HttpChatConfig {
            endpoint: self.assistant_endpoint.clone(),
            model: self.assistant_model.clone(),
            api_key: self.assistant_api_key.clone().filter(|k| !k.trim().is_empty()),
            timeout: self.assistant_timeout_secs.map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cfg = Config::try_parse_from([
            "estacaod",
            "--seed",
            "7",
            "--today",
            "2025-03-31",
            "--assistant-endpoint",
            "http://127.0.0.1:9/v1/chat/completions",
            "--assistant-api-key",
            "sk-test",
            "--assistant-timeout-secs",
            "2",
            "--log-json",
        ])
        .expect("parse");
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.today(), NaiveDate::from_ymd_opt(2025, 3, 31).expect("date"));
        assert!(cfg.log_json);
        let a = cfg.assistant();
        assert_eq!(a.endpoint, "http://127.0.0.1:9/v1/chat/completions");
        assert_eq!(a.api_key.as_deref(), Some("sk-test"));
        assert_eq!(a.timeout, Some(Duration::from_secs(2)));
    }

    #[test]
    fn bad_date_is_rejected() {
        assert!(Config::try_parse_from(["estacaod", "--today", "31/03/2025"]).is_err());
    }

    #[test]
    fn blank_api_key_is_dropped() {
        let cfg = Config::try_parse_from(["estacaod", "--assistant-api-key", " "]).expect("parse");
        assert!(cfg.assistant().api_key.is_none());
    }
}
