use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "domaincount",
    about = "Count customer email domains in a CSV file, ranked by number of customers",
    version,
    long_about = None
)]
pub struct Args {
    /// CSV file with a header row
    pub path: PathBuf,

    /// Header name of the column holding email addresses
    #[arg(short, long, default_value = "email")]
    pub field: String,

    /// Number of top domains to display
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Number of bottom domains to display
    #[arg(long)]
    pub bottom: Option<usize>,

    /// Field delimiter
    #[arg(short, long, default_value_t = ',')]
    pub delimiter: char,

    /// Treat domains that differ only in ASCII case as the same domain
    #[arg(long)]
    pub ignore_case: bool,

    /// Validate and aggregate rows on a worker pool instead of a single thread
    #[arg(long)]
    pub parallel: bool,

    /// Number of worker threads (implies --parallel)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["domaincount", "customers.csv"]).unwrap();
        assert_eq!(args.path, PathBuf::from("customers.csv"));
        assert_eq!(args.field, "email");
        assert_eq!(args.delimiter, ',');
        assert!(!args.parallel);
        assert!(args.workers.is_none());
    }

    #[test]
    fn flags() {
        let args = Args::try_parse_from([
            "domaincount",
            "customers.csv",
            "--field",
            "mail",
            "-t",
            "10",
            "-w",
            "2",
            "--ignore-case",
            "--json",
        ])
        .unwrap();
        assert_eq!(args.field, "mail");
        assert_eq!(args.top, Some(10));
        assert_eq!(args.workers, Some(2));
        assert!(args.ignore_case);
        assert!(args.json);
    }

    #[test]
    fn path_is_required() {
        assert!(Args::try_parse_from(["domaincount"]).is_err());
    }
}
