//! Shared plumbing for the `autoseq` command-line tools.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use autoseq_automaton::numeration::{DEFAULT_LOOKAHEAD, TRIBONACCI_SEEDS};
use autoseq_automaton::{Basis, Dfao};
use autoseq_render::ValueStats;
use clap::Args;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the log subscriber: `info` by default, `debug` when `verbose`,
/// `RUST_LOG` wins when set. Logs go to stderr.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Numeration options shared by the picture tools.
#[derive(Debug, Clone, Args)]
pub struct BasisArgs {
    /// Number of Tribonacci weights to generate.
    #[arg(long, env = "AUTOSEQ_LOOKAHEAD", default_value_t = DEFAULT_LOOKAHEAD)]
    pub lookahead: usize,
}

impl BasisArgs {
    /// The Tribonacci basis with the requested table length.
    ///
    /// # Errors
    ///
    /// Fails when the lookahead is below 2.
    pub fn basis(&self) -> Result<Basis> {
        Basis::new(&TRIBONACCI_SEEDS, self.lookahead)
            .with_context(|| format!("Invalid lookahead {}", self.lookahead))
    }
}

/// Loads a Walnut DFAO file and logs its size.
///
/// # Errors
///
/// Fails when the file cannot be read or parsed.
pub fn load_dfao(path: &Path) -> Result<Dfao> {
    let dfao = Dfao::load(path).with_context(|| format!("Failed to load {}", path.display()))?;
    info!(
        path = %path.display(),
        states = dfao.len(),
        transitions = dfao.transition_count(),
        "automaton loaded"
    );
    Ok(dfao)
}

/// How a tool reports the value statistics of a picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsOutput {
    /// Pretty-printed JSON.
    Json,
    /// The three `min value` / `max value` / `values` lines.
    Lines,
    /// Nothing.
    Silent,
}

impl StatsOutput {
    /// The report for `stats`, if this mode prints one.
    ///
    /// # Errors
    ///
    /// Fails only if JSON serialization fails.
    pub fn render(self, stats: &ValueStats) -> Result<Option<String>> {
        Ok(match self {
            Self::Json => Some(serde_json::to_string_pretty(stats)?),
            Self::Lines => Some(stats.to_string()),
            Self::Silent => None,
        })
    }
}

/// Prints value statistics in the requested form.
///
/// # Errors
///
/// Fails only if JSON serialization fails.
pub fn print_stats(stats: &ValueStats, output: StatsOutput) -> Result<()> {
    if let Some(text) = output.render(stats)? {
        println!("{text}");
    }
    Ok(())
}

/// Lists the `(state, symbol)` pairs without a transition, over the symbols
/// the automaton uses anywhere. Each gap is also logged as a warning.
#[must_use]
pub fn missing_transition_report(dfao: &Dfao) -> Vec<String> {
    let alphabet: Vec<Vec<i32>> = dfao.alphabet().into_iter().collect();
    dfao.missing_transitions(&alphabet)
        .into_iter()
        .map(|(state, symbol)| {
            let symbol = symbol
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            warn!(state, %symbol, "missing transition");
            format!("state {state}: no transition on {symbol}")
        })
        .collect()
}

/// Writes `content` to `path`, creating parent directories first.
///
/// # Errors
///
/// Fails when a directory or the file cannot be written.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookahead_sets_table_length() {
        let basis = BasisArgs { lookahead: 6 }.basis().unwrap();
        assert_eq!(basis.limit(), 23);
        assert!(BasisArgs { lookahead: 1 }.basis().is_err());
    }

    #[test]
    fn silent_stats_print_nothing() {
        let mut stats = ValueStats::default();
        stats.record(3);
        stats.record(-1);
        assert_eq!(StatsOutput::Silent.render(&stats).unwrap(), None);
        let lines = StatsOutput::Lines.render(&stats).unwrap().unwrap();
        assert!(lines.starts_with("min value : -1\n"));
        let json = StatsOutput::Json.render(&stats).unwrap().unwrap();
        assert!(json.contains("\"max\": 3"));
    }

    #[test]
    fn reports_missing_transitions() {
        let dfao = Dfao::parse("msd_2 msd_2\n0 1\n0 0 -> 0\n1 1 -> 1\n1 0\n0 0 -> 1\n").unwrap();
        assert_eq!(
            missing_transition_report(&dfao),
            vec!["state 1: no transition on 1 1"]
        );
        let total = Dfao::parse("msd_2\n0 1\n0 -> 0\n1 -> 0\n").unwrap();
        assert!(missing_transition_report(&total).is_empty());
    }

    #[test]
    fn output_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("rep.txt");
        write_output(&path, "lambda = [1]\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "lambda = [1]\n");
    }

    #[test]
    fn missing_dfao_names_the_file() {
        let err = load_dfao(Path::new("/nonexistent/T.txt")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/T.txt"));
    }
}
