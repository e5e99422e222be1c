use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use mrf_index::{BarObserver, IndexExtractor, LinkVerifier, NameMatching, ResultSet, output};
use tracing_subscriber::EnvFilter;

const DEFAULT_BUFFER_SIZE: usize = 100 * 1024 * 1024;

#[derive(Parser, Debug)]
#[command(name = "mrf-index", version, about = "Extract in-network file URLs from a payer index file")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// Do not draw a progress bar
    #[arg(long, global = true)]
    no_progress: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the in-network file URLs of the selected plans
    Files {
        /// Local path or HTTP(S) URL of the gzip index
        location: String,
        /// URL list destination, `-` for stdout
        #[arg(short, long, default_value = "SOLUTION.txt")]
        out: PathBuf,
        /// Also write `description,location` rows to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Plan name to select; repeatable, replaces the built-in NY PPO list
        #[arg(long = "plan")]
        plans: Vec<String>,
        /// File of plan names, one per line
        #[arg(long)]
        plan_names_file: Option<PathBuf>,
        /// Compare plan names ignoring case and repeated whitespace
        #[arg(long)]
        normalize_names: bool,
        /// Write whatever was collected even if the run fails part-way
        #[arg(long)]
        keep_partial: bool,
        #[command(flatten)]
        transport: TransportArgs,
    },
    /// List every distinct plan in the index
    Plans {
        location: String,
        /// Destination, `-` for stdout
        #[arg(short, long, default_value = "-")]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = PlanFormat::Csv)]
        format: PlanFormat,
        #[command(flatten)]
        transport: TransportArgs,
    },
    /// Compare extracted URLs with the links of a published HTML page
    Verify {
        /// HTML page listing the in-network files
        html: PathBuf,
        /// URL list or files CSV produced by `files`
        extracted: PathBuf,
    },
}

#[derive(Args, Debug)]
struct TransportArgs {
    /// Transport read buffer in bytes
    #[arg(long, default_value_t = DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,
    /// Redirects followed for HTTP(S) sources
    #[arg(long, default_value_t = 10)]
    max_redirects: usize,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum PlanFormat {
    Csv,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(verbose > 1)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let progress = !cli.no_progress;
    let debug = cli.verbose > 0;
    match cli.command {
        Commands::Files {
            location,
            out,
            csv,
            plans,
            plan_names_file,
            normalize_names,
            keep_partial,
            transport,
        } => {
            let mut names = plans;
            if let Some(path) = plan_names_file {
                names.extend(read_plan_names(&path)?);
            }
            let files = FilesRun {
                location,
                out,
                csv,
                names,
                matching: if normalize_names { NameMatching::Normalized } else { NameMatching::Exact },
                keep_partial,
                progress,
                debug,
            };
            files.execute(&transport)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Plans {
            location,
            out,
            format,
            transport,
        } => {
            run_plans(&location, &out, format, &transport, progress, debug)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Verify { html, extracted } => run_verify(&html, &extracted),
    }
}

struct FilesRun {
    location: String,
    out: PathBuf,
    csv: Option<PathBuf>,
    names: Vec<String>,
    matching: NameMatching,
    keep_partial: bool,
    progress: bool,
    debug: bool,
}

impl FilesRun {
    fn execute(self, transport: &TransportArgs) -> Result<()> {
        let mut builder = extractor(&self.location, transport, self.progress, self.debug).name_matching(self.matching);
        if !self.names.is_empty() {
            builder = builder.plan_names(self.names);
        }

        let mut files = ResultSet::new();
        match builder.in_network_files_into(&mut files) {
            Ok(stats) => {
                tracing::info!(
                    structures = stats.structures_seen,
                    matched = stats.structures_matched,
                    files = files.len(),
                    "Extraction finished"
                );
            }
            Err(err) if self.keep_partial && !files.is_empty() => {
                tracing::warn!(collected = files.len(), error = %err, "Writing partial results");
                write_files(&files, &self.out, self.csv.as_deref())?;
                return Err(err).with_context(|| format!("extraction from {} failed", self.location));
            }
            Err(err) => {
                return Err(err).with_context(|| format!("extraction from {} failed", self.location));
            }
        }

        let written = write_files(&files, &self.out, self.csv.as_deref())?;
        eprintln!("Found {} in-network file entries ({written} distinct URLs)", files.len());
        Ok(())
    }
}

fn extractor(
    location: &str,
    transport: &TransportArgs,
    progress: bool,
    debug: bool,
) -> IndexExtractor<mrf_index::LocationSet> {
    let mut builder = IndexExtractor::from_location(location)
        .buffer_size(transport.buffer_size)
        .max_redirects(transport.max_redirects);
    if debug {
        builder = builder.debug();
    }
    if progress {
        builder = builder.observer(BarObserver::stderr("Processing"));
    }
    builder
}

fn write_files(files: &ResultSet, out: &Path, csv: Option<&Path>) -> Result<usize> {
    let written = with_destination(out, |writer| output::write_locations(files, writer))?;
    if let Some(csv) = csv {
        let file = File::create(csv).with_context(|| format!("cannot create {}", csv.display()))?;
        output::write_files_csv(files, BufWriter::new(file))
            .with_context(|| format!("cannot write {}", csv.display()))?;
    }
    Ok(written)
}

fn run_plans(
    location: &str,
    out: &Path,
    format: PlanFormat,
    transport: &TransportArgs,
    progress: bool,
    debug: bool,
) -> Result<()> {
    let catalog = extractor(location, transport, progress, debug)
        .reporting_plans()
        .with_context(|| format!("plan listing from {location} failed"))?;

    with_destination(out, |writer| match format {
        PlanFormat::Csv => output::write_plans_csv(&catalog, writer),
        PlanFormat::Json => output::write_plans_json(&catalog, writer),
    })?;
    eprintln!(
        "Found {} reporting plans ({} malformed, {} duplicate entries)",
        catalog.len(),
        catalog.malformed,
        catalog.duplicates
    );
    Ok(())
}

fn run_verify(html: &Path, extracted: &Path) -> Result<ExitCode> {
    let page = fs::read_to_string(html).with_context(|| format!("cannot read {}", html.display()))?;
    let file = File::open(extracted).with_context(|| format!("cannot open {}", extracted.display()))?;
    let is_csv = extracted
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let locations = if is_csv {
        output::read_locations_csv(file)
    } else {
        output::read_locations(BufReader::new(file))
    }
    .with_context(|| format!("cannot read {}", extracted.display()))?;

    let report = LinkVerifier::new()?.verify(&page, &locations);
    for link in &report.missing_from_extraction {
        println!("Could not find {link} in the extracted in-network files");
    }
    for location in &report.missing_from_html {
        println!("Could not find {location} in the HTML listing");
    }

    if report.is_clean() {
        eprintln!("{} links match {} extracted URLs", report.html_links, report.extracted);
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn read_plan_names(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let names: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();
    if names.is_empty() {
        bail!("{} lists no plan names", path.display());
    }
    Ok(names)
}

fn with_destination<F>(out: &Path, write: F) -> Result<usize>
where
    F: FnOnce(&mut dyn Write) -> mrf_index::Result<usize>,
{
    if out.as_os_str() == "-" {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        return write(&mut lock).context("cannot write to stdout");
    }

    let file = File::create(out).with_context(|| format!("cannot create {}", out.display()))?;
    let mut writer = BufWriter::new(file);
    write(&mut writer).with_context(|| format!("cannot write {}", out.display()))
}
