mod loader;
mod reports;
mod scenarios;
mod util;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use ikonmap_core::{Catalog, PassType, Planner};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use loader::FileCatalogLoader;
use reports::{AuditReport, PlanReport};
use scenarios::{ScenarioResult, expand_scenarios, get_scenario, list_scenarios};
use util::{parse_trip, split_csv};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Check the catalog for data bugs
    Audit,
    /// Evaluate a trip against a pass tier
    Plan,
    /// Run the built-in accounting scenarios against the catalog
    Scenarios,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PassArg {
    Full,
    Base,
}

impl From<PassArg> for PassType {
    fn from(pass: PassArg) -> Self {
        match pass {
            PassArg::Full => Self::Full,
            PassArg::Base => Self::Base,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "ikonmap-tester", version)]
#[command(about = "Audit the Ikon resort catalog and evaluate trips against pass allowances")]
struct Args {
    /// What to run: catalog audit, trip evaluation, or accounting scenarios
    #[arg(long, value_enum, default_value_t = Mode::Scenarios)]
    mode: Mode,

    /// Scenarios to run (comma-separated, `all` for every scenario)
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Catalog JSON to load instead of the embedded one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Trip to evaluate in plan mode, as `id=days,id=days`
    #[arg(long)]
    trip: Option<String>,

    /// Pass tier used in plan mode
    #[arg(long, value_enum, default_value_t = PassArg::Full)]
    pass: PassArg,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    if args.report == "console" || args.output.is_some() {
        announce_banner();
    }

    let start_time = Instant::now();
    let loader = FileCatalogLoader::new(args.catalog.clone());
    let planner = Planner::load(&loader)
        .with_context(|| format!("failed to load catalog from {}", loader.source_label()))?;
    log::info!(
        "loaded {} resorts from {}",
        planner.catalog().len(),
        loader.source_label()
    );

    let passed = match args.mode {
        Mode::Audit => run_audit(&args, &loader, planner.catalog())?,
        Mode::Plan => run_plan(&args, &planner)?,
        Mode::Scenarios => run_scenarios(&args, planner.catalog(), start_time)?,
    };

    if !passed {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:25} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "⛷️  Ikon Map Tester".bright_cyan().bold());
    println!("{}", "===================".cyan());
}

fn run_audit(args: &Args, loader: &FileCatalogLoader, catalog: &Catalog) -> Result<bool> {
    let report = AuditReport {
        source: loader.source_label(),
        resort_count: catalog.len(),
        bank_count: catalog.day_banks().groups().count(),
        issues: catalog.audit(),
    };

    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report.as_str() {
        "json" => reports::write_json(&mut output_target, &report)?,
        "markdown" => reports::audit_markdown(&mut output_target, &report)?,
        _ => reports::audit_console(&mut output_target, &report)?,
    }
    output_target.flush_inner()?;
    Ok(report.passed())
}

fn run_plan(args: &Args, planner: &Planner) -> Result<bool> {
    let Some(trip_arg) = args.trip.as_deref() else {
        bail!("plan mode needs --trip id=days[,id=days...]");
    };
    let trip = parse_trip(trip_arg)?;
    let pass = PassType::from(args.pass);
    if args.verbose {
        eprintln!(
            "🧮 Evaluating {} resort(s) on the {}",
            trip.len(),
            pass.label()
        );
    }

    let unknown_resorts: Vec<String> = trip
        .entries()
        .iter()
        .filter(|entry| planner.catalog().get(&entry.resort_id).is_none())
        .map(|entry| entry.resort_id.clone())
        .collect();
    for id in &unknown_resorts {
        log::warn!("resort `{id}` is not in the catalog");
    }

    let report = PlanReport {
        pass,
        unknown_resorts,
        summary: planner.summarize(&trip, pass),
    };

    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report.as_str() {
        "json" => reports::write_json(&mut output_target, &report)?,
        "markdown" => reports::plan_markdown(&mut output_target, &report)?,
        _ => reports::plan_console(&mut output_target, &report)?,
    }
    output_target.flush_inner()?;
    Ok(!report.summary.has_any_exceeded)
}

fn run_scenario_set(args: &Args, catalog: &Catalog) -> Vec<ScenarioResult> {
    let mut results = Vec::new();
    for key in expand_scenarios(&split_csv(&args.scenarios)) {
        if let Some(scenario) = get_scenario(&key) {
            results.push(scenario.run(catalog, args.verbose));
        } else {
            eprintln!("⚠️  Unknown scenario: {}", key.yellow());
        }
    }
    results
}

fn run_scenarios(args: &Args, catalog: &Catalog, start_time: Instant) -> Result<bool> {
    let results = run_scenario_set(args, catalog);
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => reports::write_json(&mut output_target, &results)?,
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Ikon Map Scenario Results\n\n_No scenarios executed._"
                )?;
            } else {
                reports::scenarios_markdown(&mut output_target, &results)?;
            }
        }
        _ => {
            if results.is_empty() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            } else {
                reports::scenarios_console(&mut output_target, &results, start_time.elapsed())?;
            }
            writeln!(&mut output_target)?;
            writeln!(
                &mut output_target,
                "🏁 Total time: {:?}",
                start_time.elapsed()
            )?;
        }
    }

    output_target.flush_inner()?;
    Ok(results.iter().all(|r| r.passed))
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ikonmap_core::CatalogLoader;

    fn base_args() -> Args {
        Args {
            mode: Mode::Scenarios,
            scenarios: "all".to_string(),
            list_scenarios: false,
            catalog: None,
            trip: None,
            pass: PassArg::Full,
            report: "json".to_string(),
            verbose: false,
            output: None,
        }
    }

    fn temp_output(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "ikonmap-main-{label}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    fn planner() -> Planner {
        Planner::load(&FileCatalogLoader::default()).unwrap()
    }

    #[test]
    fn args_parse_plan_flags() {
        let args = Args::try_parse_from([
            "ikonmap-tester",
            "--mode",
            "plan",
            "--trip",
            "alta=2",
            "--pass",
            "base",
            "--report",
            "markdown",
        ])
        .unwrap();
        assert_eq!(args.mode, Mode::Plan);
        assert_eq!(PassType::from(args.pass), PassType::Base);
        assert_eq!(args.trip.as_deref(), Some("alta=2"));
        assert!(Args::try_parse_from(["ikonmap-tester", "--report", "csv"]).is_err());
        assert!(Args::try_parse_from(["ikonmap-tester", "--pass", "gold"]).is_err());
    }

    #[test]
    fn plan_within_allowance_passes() {
        let output = temp_output("plan-ok");
        let args = Args {
            mode: Mode::Plan,
            trip: Some("taos=5,steamboat=30".to_string()),
            pass: PassArg::Base,
            output: Some(output.clone()),
            ..base_args()
        };
        assert!(run_plan(&args, &planner()).unwrap());
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(json["summary"]["total_days"], 35);
        assert_eq!(json["unknown_resorts"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn plan_over_allowance_fails_and_lists_unknown_ids() {
        let args = Args {
            mode: Mode::Plan,
            trip: Some("taos=6,atlantis=2".to_string()),
            pass: PassArg::Base,
            output: Some(temp_output("plan-over")),
            ..base_args()
        };
        assert!(!run_plan(&args, &planner()).unwrap());
    }

    #[test]
    fn plan_requires_a_trip() {
        let args = Args {
            mode: Mode::Plan,
            ..base_args()
        };
        let err = run_plan(&args, &planner()).unwrap_err();
        assert!(err.to_string().contains("--trip"));
    }

    #[test]
    fn audit_passes_on_embedded_catalog() {
        let output = temp_output("audit");
        let args = Args {
            mode: Mode::Audit,
            report: "markdown".to_string(),
            output: Some(output.clone()),
            ..base_args()
        };
        let loader = FileCatalogLoader::default();
        let catalog = loader.load_catalog().unwrap();
        assert!(run_audit(&args, &loader, &catalog).unwrap());
        let text = std::fs::read_to_string(output).unwrap();
        assert!(text.contains("# Ikon Map Catalog Audit"));
        assert!(text.contains("- **Source**: embedded"));
    }

    #[test]
    fn unknown_scenarios_are_skipped() {
        let args = Args {
            scenarios: "stale-entries,bogus".to_string(),
            ..base_args()
        };
        let results = run_scenario_set(&args, planner().catalog());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].scenario_name, "stale-entries");
    }

    #[test]
    fn scenarios_write_markdown_report() {
        let output = temp_output("scenarios");
        let args = Args {
            scenarios: "allowance-parsing,projection-centre".to_string(),
            report: "markdown".to_string(),
            output: Some(output.clone()),
            ..base_args()
        };
        assert!(run_scenarios(&args, planner().catalog(), Instant::now()).unwrap());
        let text = std::fs::read_to_string(output).unwrap();
        assert!(text.contains("### ✅ allowance-parsing"));
        assert!(text.contains("### ✅ projection-centre"));
    }

    #[test]
    fn list_scenarios_writes_to_output() {
        let output = temp_output("list");
        let args = Args {
            list_scenarios: true,
            output: Some(output.clone()),
            ..base_args()
        };
        assert!(maybe_list_scenarios(&args).unwrap());
        let text = std::fs::read_to_string(output).unwrap();
        assert!(text.starts_with("Available scenarios:"));
        assert!(text.contains("shared-bank-pooling"));
        assert!(!maybe_list_scenarios(&base_args()).unwrap());
    }
}
