//! daily — one delivery day at the hub.
//!
//! Loads `distances.csv`, `packages.csv` and `fleet.json` from the data
//! directory, plans every batch, and prints the fleet and package status at
//! the requested clock time.  Without `--time` it prompts on stdin until
//! `q` or end of input.
//!
//! ```text
//! cargo run -p daily -- --time "10:30 AM"
//! cargo run -p daily -- --time "1:00 PM" --package 9 --report-dir ./report
//! RUST_LOG=debug cargo run -p daily
//! ```

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use hs_core::{DayClock, PackageId, SimTime};
use hs_data::Depot;
use hs_report::{CsvWriter, FleetSummary, ReportObserver, StatusLine};
use hs_sim::{DeliverySimulator, FleetConfig, NoopObserver, PlannedBatch, SimBuilder, SimObserver};

// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "daily", about = "Simulate one delivery day and report status")]
struct Args {
    /// Directory holding distances.csv, packages.csv and fleet.json.
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data"))]
    data_dir: PathBuf,

    /// Clock time to report at, e.g. "10:30 AM".  Prompts when absent.
    #[arg(long)]
    time: Option<String>,

    /// Show only this package.
    #[arg(long)]
    package: Option<u32>,

    /// Also write package_status.csv and route_summary.csv here.
    #[arg(long)]
    report_dir: Option<PathBuf>,
}

// ── Session ───────────────────────────────────────────────────────────────────

struct Session {
    depot: Depot,
    sim:   DeliverySimulator,
    plans: Vec<PlannedBatch>,
}

impl Session {
    fn load(args: &Args) -> Result<Self> {
        let clock = DayClock::default();
        let depot = Depot::load(
            &args.data_dir.join("distances.csv"),
            &args.data_dir.join("packages.csv"),
            clock,
        )
        .with_context(|| format!("loading hub data from {}", args.data_dir.display()))?;

        let fleet_path = args.data_dir.join("fleet.json");
        let file = File::open(&fleet_path)
            .with_context(|| format!("opening {}", fleet_path.display()))?;
        let config: FleetConfig = serde_json::from_reader(file)
            .with_context(|| format!("parsing {}", fleet_path.display()))?;

        let sim = SimBuilder::from_config(config).build(&depot.packages)?;
        let plans = sim.plan(&depot)?;
        for plan in &plans {
            info!(
                batch = %plan.name,
                stops = plan.route.len(),
                miles = plan.route.total_distance(),
                "route ready"
            );
        }
        Ok(Self { depot, sim, plans })
    }

    /// Simulate at `now` and print the summary plus one or all packages.
    fn show<O: SimObserver>(
        &mut self,
        now:      SimTime,
        package:  Option<PackageId>,
        observer: &mut O,
    ) -> Result<()> {
        let snapshot = self.sim.simulate(&self.plans, &mut self.depot.packages, now, observer)?;
        let clock = self.depot.clock;

        println!();
        print!("{}", FleetSummary::from_snapshot(&snapshot, &clock));
        println!();

        let ids = match package {
            Some(id) => vec![id],
            None => self.depot.packages.ids(),
        };
        for id in ids {
            println!("{}", StatusLine::for_package(self.depot.packages.get(id)?, &clock));
        }
        Ok(())
    }
}

// ── Interactive input ─────────────────────────────────────────────────────────

/// Print `prompt` and read one trimmed line; `None` at end of input.
fn ask(lines: &mut impl Iterator<Item = io::Result<String>>, prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_owned())),
        None => Ok(None),
    }
}

/// Parse a package filter: blank means all packages.
fn parse_package(input: &str, session: &Session) -> Option<Option<PackageId>> {
    if input.is_empty() {
        return Some(None);
    }
    let id: PackageId = input.parse().ok()?;
    session.depot.packages.contains(id).then_some(Some(id))
}

fn interactive<O: SimObserver>(session: &mut Session, observer: &mut O) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let clock = session.depot.clock;

    loop {
        let Some(input) = ask(&mut lines, "\nTime to check (e.g. 10:30 AM, q to quit): ")? else {
            return Ok(());
        };
        if input.eq_ignore_ascii_case("q") {
            return Ok(());
        }
        let now = match clock.parse(&input) {
            Ok(t) => t,
            Err(e) => {
                println!("{e}; try a time like 9:05 AM.");
                continue;
            }
        };

        let package = loop {
            let Some(input) = ask(&mut lines, "Package id (blank for all): ")? else {
                return Ok(());
            };
            match parse_package(&input, session) {
                Some(package) => break package,
                None => println!("No package {input:?}; enter a listed id or leave blank."),
            }
        };

        session.show(now, package, observer)?;
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let mut session = Session::load(&args)?;

    match &args.report_dir {
        Some(dir) => {
            let writer = CsvWriter::new(dir)
                .with_context(|| format!("creating report files in {}", dir.display()))?;
            let mut observer = ReportObserver::new(writer, session.depot.clock);
            run(&args, &mut session, &mut observer)?;
            if let Some(e) = observer.take_error() {
                bail!("writing report: {e}");
            }
            println!("\nReport written to {}", dir.display());
        }
        None => run(&args, &mut session, &mut NoopObserver)?,
    }
    Ok(())
}

fn run<O: SimObserver>(args: &Args, session: &mut Session, observer: &mut O) -> Result<()> {
    let Some(time) = &args.time else {
        return interactive(session, observer);
    };

    let now = session
        .depot
        .clock
        .parse(time)
        .with_context(|| format!("--time {time:?}"))?;
    let package = match args.package {
        Some(raw) => {
            let id = PackageId(raw);
            if !session.depot.packages.contains(id) {
                bail!("--package {raw}: no such package");
            }
            Some(id)
        }
        None => None,
    };
    session.show(now, package, observer)
}
