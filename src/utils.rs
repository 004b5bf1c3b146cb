use time::macros::format_description;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

use crate::args::Args;

/// `RUST_LOG` wins when set; otherwise `--verbose` selects `info`, default `warn`.
pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(LocalTime::new(format_description!(
            "[hour]:[minute]:[second].[subsecond digits:3]"
        )))
        .with_writer(std::io::stderr)
        .init();
}

pub fn format_number(num: u64) -> String {
    let digits = num.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn validate_args(args: &Args) -> anyhow::Result<()> {
    let limits = [
        ("--top", args.top),
        ("--bottom", args.bottom),
        ("--workers", args.workers),
    ];
    if let Some((flag, _)) = limits.iter().find(|(_, value)| *value == Some(0)) {
        anyhow::bail!("{flag} must be greater than 0");
    }

    if !args.delimiter.is_ascii() {
        anyhow::bail!("--delimiter must be a single ASCII character");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn formats_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn rejects_zero_limits() {
        let args = Args::try_parse_from(["domaincount", "c.csv", "--top", "0"]).unwrap();
        assert!(validate_args(&args).is_err());

        let args = Args::try_parse_from(["domaincount", "c.csv", "-w", "0"]).unwrap();
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn rejects_non_ascii_delimiter() {
        let args = Args::try_parse_from(["domaincount", "c.csv", "-d", "§"]).unwrap();
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn empty_field_is_left_to_the_importer() {
        let args = Args::try_parse_from(["domaincount", "c.csv", "--field", ""]).unwrap();
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn accepts_defaults() {
        let args = Args::try_parse_from(["domaincount", "c.csv"]).unwrap();
        assert!(validate_args(&args).is_ok());
    }
}
