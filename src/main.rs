use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use domaincount::report::print_report;
use domaincount::utils::{setup_logging, validate_args};
use domaincount::{Args, CustomerImporter, DomainCase, ImportReport};

fn run(args: &Args) -> Result<ImportReport> {
    let domain_case = if args.ignore_case {
        DomainCase::Lowercase
    } else {
        DomainCase::Preserve
    };

    let importer = CustomerImporter::new(&args.path, args.field.as_str())
        .with_context(|| format!("Cannot import {:?}", args.path))?
        .with_domain_case(domain_case)
        .with_delimiter(args.delimiter as u8);

    let report = if args.parallel || args.workers.is_some() {
        let workers = args.workers.unwrap_or_else(|| {
            let cpu_count = num_cpus::get();
            std::cmp::min(cpu_count, 8)
        });
        info!(action = "configure", component = "domain_count", worker_count = workers, "Using workers for processing");
        importer.analyze_parallel(workers)?
    } else {
        importer.analyze()?
    };

    Ok(report)
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);
    validate_args(&args)?;

    match run(&args) {
        Ok(report) => print_report(&report, &args),
        Err(e) => {
            error!(error = %format!("{e:#}"), "Domain count failed");
            std::process::exit(1);
        }
    }
}
