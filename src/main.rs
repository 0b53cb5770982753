//! aerofuzz - fuzzy altitude/speed band classifier
//!
//! Command-line interface: classify one (altitude, speed) pair given on the
//! command line, or prompt for values interactively.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use aerofuzz::{
    format_table, plot_variable, AerofuzzConfig, AerofuzzError, ClassificationReport, Classifier,
    OutputFormat, TNorm,
};

#[derive(Parser)]
#[command(name = "aerofuzz")]
#[command(version = "0.1.0")]
#[command(about = "Classify aircraft altitude/speed into fuzzy linguistic bands", long_about = None)]
struct Cli {
    /// Flight altitude in meters (0-15000); prompts if omitted
    #[arg(long)]
    altitude: Option<f64>,

    /// Flight speed in km/h (0-1200); prompts if omitted
    #[arg(long)]
    speed: Option<f64>,

    /// Configuration file (defaults to the standard search path)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<CliFormat>,

    /// T-norm for the intersection
    #[arg(long, value_enum)]
    tnorm: Option<CliTNorm>,

    /// Render ASCII membership plots for the best combination
    #[arg(long)]
    plot: bool,

    /// Quiet mode (suppress prompts and banners)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CliFormat {
    /// Degree table and best-match list
    Text,
    /// JSON classification report
    Json,
}

impl From<CliFormat> for OutputFormat {
    fn from(f: CliFormat) -> Self {
        match f {
            CliFormat::Text => OutputFormat::Text,
            CliFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CliTNorm {
    Min,
    Product,
    Lukasiewicz,
}

impl From<CliTNorm> for TNorm {
    fn from(t: CliTNorm) -> Self {
        match t {
            CliTNorm::Min => TNorm::Min,
            CliTNorm::Product => TNorm::Product,
            CliTNorm::Lukasiewicz => TNorm::Lukasiewicz,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AerofuzzConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?;

    // CLI flags override file and environment settings
    if let Some(format) = cli.format {
        config.general.format = format.into();
    }
    if let Some(tnorm) = cli.tnorm {
        config.general.tnorm = tnorm.into();
    }
    if cli.plot {
        config.general.plot = true;
    }

    let classifier = config
        .build_classifier()
        .context("Failed to build classifier")?;

    let (altitude, speed) = match (cli.altitude, cli.speed) {
        (Some(h), Some(s)) => (h, s),
        (None, None) => match read_query_interactive(&classifier, cli.quiet)? {
            Some(pair) => pair,
            None => return Ok(()), // EOF before a complete query
        },
        _ => anyhow::bail!("--altitude and --speed must be given together"),
    };

    let grid = classifier
        .classify(altitude, speed)
        .context("Classification failed")?;

    match config.general.format {
        OutputFormat::Text => {
            print!("{}", format_table(&grid));
        }
        OutputFormat::Json => {
            let report = ClassificationReport::new(altitude, speed, &grid);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if config.general.plot {
        // Plot against the first best combination
        if let Some(&(alt_term, speed_term)) = grid.best_matches().first() {
            print!("\n{}", plot_variable(classifier.altitude(), altitude, alt_term));
            print!("\n{}", plot_variable(classifier.speed(), speed, speed_term));
        }
    }

    Ok(())
}

/// Prompt for altitude and speed on stdin.
///
/// Parse failures are recoverable: the error is reported and the prompt
/// repeats. Returns `None` on EOF.
fn read_query_interactive(classifier: &Classifier, quiet: bool) -> Result<Option<(f64, f64)>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let alt_universe = classifier.altitude().universe();
    let speed_universe = classifier.speed().universe();

    let altitude = match prompt_number(
        &mut lines,
        &format!(
            "Flight altitude (m, {}-{}): ",
            alt_universe.min(),
            alt_universe.max()
        ),
        quiet,
    )? {
        Some(v) => v,
        None => return Ok(None),
    };

    let speed = match prompt_number(
        &mut lines,
        &format!(
            "Flight speed (km/h, {}-{}): ",
            speed_universe.min(),
            speed_universe.max()
        ),
        quiet,
    )? {
        Some(v) => v,
        None => return Ok(None),
    };

    Ok(Some((altitude, speed)))
}

/// Prompt until a finite number is entered; `None` on EOF.
fn prompt_number(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    prompt: &str,
    quiet: bool,
) -> Result<Option<f64>> {
    loop {
        if !quiet {
            print!("{}", prompt);
            io::stdout().flush().context("Failed to flush stdout")?;
        }

        let line = match lines.next() {
            Some(line) => line.context("Failed to read from stdin")?,
            None => return Ok(None),
        };

        match parse_number(&line) {
            Ok(value) => return Ok(Some(value)),
            Err(err) => {
                eprintln!("Error: {}", err);
            }
        }
    }
}

/// Parse one input line as a finite f64.
fn parse_number(input: &str) -> Result<f64, AerofuzzError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AerofuzzError::empty_input("value"));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| AerofuzzError::non_numeric(trimmed))?;
    if !value.is_finite() {
        return Err(AerofuzzError::non_finite("value", value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("3000").unwrap(), 3000.0);
        assert_eq!(parse_number("  450.5 ").unwrap(), 450.5);
        assert_eq!(parse_number("-500").unwrap(), -500.0);
    }

    #[test]
    fn test_parse_number_rejects_garbage() {
        assert!(parse_number("abc").is_err());
        assert!(parse_number("").is_err());
        assert!(parse_number("   ").is_err());
        assert!(parse_number("inf").is_err());
        assert!(parse_number("NaN").is_err());
    }

    #[test]
    fn test_parse_errors_are_recoverable() {
        assert!(parse_number("abc").unwrap_err().is_recoverable());
        assert!(parse_number("").unwrap_err().is_recoverable());
    }

    #[test]
    fn test_prompt_retries_until_valid() {
        let inputs = ["not a number", "", "4000"];
        let mut lines = inputs.iter().map(|s| Ok(s.to_string()));
        let value = prompt_number(&mut lines, "altitude: ", true).unwrap();
        assert_eq!(value, Some(4000.0));
    }

    #[test]
    fn test_prompt_returns_none_on_eof() {
        let mut lines = std::iter::empty();
        let value = prompt_number(&mut lines, "altitude: ", true).unwrap();
        assert_eq!(value, None);
    }
}
