use std::fs;
use std::io::{self, Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Parser;
use log::{error, info};
use modscale::{Config, Engine};

/// Rewrite modular-scale typography (`ms` units, `t-ms()` steps) into breakpoint-aware CSS.
#[derive(Debug, Parser)]
#[command(name = "modscale", version, about)]
struct Cli {
    /// JSON configuration file; the built-in mobile/tablet/desktop table is used when omitted.
    #[arg(short, long, env = "MODSCALE_CONFIG")]
    config: Option<PathBuf>,

    /// Write the result here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit a JSON snapshot of the rewritten tree instead of CSS.
    #[arg(long)]
    json: bool,

    /// Exit with status 2 when any declaration had to be dropped.
    #[arg(long)]
    strict: bool,

    /// Stylesheet to rewrite; stdin when omitted.
    input: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(&Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `false` when `--strict` is set and the pass produced diagnostics.
fn run(cli: &Cli) -> Result<bool> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let engine = Engine::new(&config).context("invalid breakpoint configuration")?;

    let css = read_input(cli.input.as_deref())?;
    let mut doc = css_syntax::parse_stylesheet(&css);
    let report = engine.run(&mut doc);
    info!(
        "rewrote {} declarations with {} diagnostics",
        report.rewritten,
        report.diagnostics.len()
    );

    let rendered = if cli.json {
        let mut text = serde_json::to_string_pretty(&doc.to_json())?;
        text.push('\n');
        text
    } else {
        doc.to_string()
    };
    write_output(cli.output.as_deref(), &rendered)?;

    Ok(!cli.strict || report.is_clean())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
