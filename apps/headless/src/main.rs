//! Headless session runner.
//!
//! Usage: `keiko-headless <config.json> [url] [title]`
//!
//! Loads a tracker configuration, opens it on an in-memory page, records a
//! page view and prints every queued command as one JSON line, followed by
//! the injected loader tags.

use anyhow::{bail, Context};
use keiko_provider::{use_analytics, AnalyticsProvider};
use keiko_tracker::{InMemoryQueue, PageViewParams, StaticHost, TrackerConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "https://localhost/";
const DEFAULT_TITLE: &str = "Home";

struct Args {
    config: PathBuf,
    url: String,
    title: String,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let Some(config) = args.next() else {
            bail!("usage: keiko-headless <config.json> [url] [title]");
        };
        Ok(Self {
            config: PathBuf::from(config),
            url: args.next().unwrap_or_else(|| DEFAULT_URL.to_string()),
            title: args.next().unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        })
    }
}

fn run(args: Args) -> anyhow::Result<Vec<String>> {
    let config = TrackerConfig::from_path(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    let config = Arc::new(config);

    let queue = Arc::new(InMemoryQueue::new());
    let host = Arc::new(StaticHost::new(args.url, args.title));
    let mut provider = AnalyticsProvider::new(host.clone(), queue.clone());

    provider.provide(&config, || {
        if let Some(tracker) = use_analytics() {
            tracker.track_page_view(PageViewParams::new());
        }
    })?;

    let mut lines = Vec::new();
    for command in queue.commands() {
        lines.push(serde_json::to_string(&command)?);
    }
    for tag in host.injected_scripts() {
        lines.push(serde_json::to_string(&serde_json::json!({ "script": tag }))?);
    }
    Ok(lines)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,keiko=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse(std::env::args().skip(1))?;
    tracing::info!(config = %args.config.display(), "Starting headless session");

    for line in run(args)? {
        println!("{line}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> impl Iterator<Item = String> {
        items
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_parse_defaults() {
        let parsed = Args::parse(args(&["analytics.json"])).unwrap();
        assert_eq!(parsed.config, PathBuf::from("analytics.json"));
        assert_eq!(parsed.url, DEFAULT_URL);
        assert_eq!(parsed.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_parse_requires_config() {
        assert!(Args::parse(args(&[])).is_err());
    }

    #[test]
    fn test_run_prints_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analytics.json");
        std::fs::write(&path, r#"{"measurementId": "G-HEADLESS1"}"#).unwrap();

        let lines = run(Args {
            config: path,
            url: "https://x.test/".into(),
            title: "Docs".into(),
        })
        .unwrap();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with(r#"["js","#));
        assert!(lines[1].starts_with(r#"["config","G-HEADLESS1""#));
        assert!(lines[3].contains(r#""page_title":"Docs""#));
        assert!(lines[4].contains("gtag/js?id=G-HEADLESS1"));
    }

    #[test]
    fn test_run_rejects_config_without_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analytics.json");
        std::fs::write(&path, "{}").unwrap();

        let err = run(Args {
            config: path,
            url: DEFAULT_URL.into(),
            title: DEFAULT_TITLE.into(),
        })
        .unwrap_err();
        assert!(err.to_string().contains("measurement ID"));
    }
}
