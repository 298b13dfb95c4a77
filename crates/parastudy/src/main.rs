use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use parastudy::data::storage::StudyDirectory;
use parastudy::state::Selection;
use parastudy::steps::{self, ResultsOutcome, SubmitArgs};
use parastudy::{App, init_logging};
use parastudy_core::{MaterializeReport, OptionNo, Parameter, RangeSpec, ResultTable};

#[derive(Parser, Debug)]
#[command(name = "parastudy")]
#[command(about = "Parametric design studies for building energy models")]
struct Args {
    /// Path to the data directory (default: ~/.parastudy/)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the base model (HBJSON)
    Model { path: PathBuf },
    /// Select parameter ranges as min:max:step
    Params(ParamsArgs),
    /// Generate one model per design combination
    Options {
        /// Number of design options to list
        #[arg(long, default_value_t = 10)]
        show: usize,
    },
    /// Submit the design options as a simulation job
    Submit(SubmitCommand),
    /// Check the job and show results
    Results {
        /// Design option to look up
        #[arg(long)]
        option: Option<usize>,
    },
    /// Show which steps are done
    Status,
    /// Forget all steps
    Reset,
}

#[derive(ClapArgs, Debug)]
struct ParamsArgs {
    /// Window to wall ratio in percent, e.g. 40:80:10
    #[arg(long)]
    wwr: Option<RangeSpec>,
    /// Louver count, e.g. 0:4:1
    #[arg(long)]
    louver_count: Option<RangeSpec>,
    /// Louver depth in meters, e.g. 0.2:1:0.2
    #[arg(long)]
    louver_depth: Option<RangeSpec>,
    /// Wall R value (not supported yet)
    #[arg(long)]
    wall_r: Option<RangeSpec>,
    /// Roof R value (not supported yet)
    #[arg(long)]
    roof_r: Option<RangeSpec>,
}

impl ParamsArgs {
    fn selections(&self) -> Vec<Selection> {
        [
            (Parameter::WindowToWallRatio, self.wwr),
            (Parameter::LouverCount, self.louver_count),
            (Parameter::LouverDepth, self.louver_depth),
            (Parameter::WallRValue, self.wall_r),
            (Parameter::RoofRValue, self.roof_r),
        ]
        .into_iter()
        .filter_map(|(parameter, range)| range.map(|range| Selection { parameter, range }))
        .collect()
    }
}

#[derive(ClapArgs, Debug)]
struct SubmitCommand {
    /// Account that owns the project
    #[arg(long, required_unless_present = "job_url")]
    owner: Option<String>,
    #[arg(long, required_unless_present = "job_url")]
    project: Option<String>,
    /// Weather file
    #[arg(long, required_unless_present = "job_url")]
    epw: Option<PathBuf>,
    /// Design day file
    #[arg(long, required_unless_present = "job_url")]
    ddy: Option<PathBuf>,
    /// Follow an already submitted job instead of submitting a new one
    #[arg(long, conflicts_with_all = ["owner", "project", "epw", "ddy"])]
    job_url: Option<String>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(StudyDirectory::default_path);

    init_logging(&data_dir, &args.log_level)?;

    let mut app = App::with_data_dir(data_dir)?;
    run(&mut app, args.command)?;

    tracing::info!("Done");
    Ok(())
}

fn run(app: &mut App, command: Command) -> color_eyre::Result<()> {
    match command {
        Command::Model { path } => {
            let summary = steps::load_model(app, &path)?;
            println!(
                "Loaded {} ({} exterior faces with apertures, {} apertures)",
                summary.identifier.as_deref().unwrap_or("model"),
                summary.exterior_faces,
                summary.apertures
            );
        }
        Command::Params(params) => {
            let summary = steps::select_parameters(app, &params.selections())?;
            for (parameter, values) in &summary.values {
                let rendered: Vec<String> =
                    values.iter().map(|v| parameter.format_value(*v)).collect();
                println!("{}: {}", parameter, rendered.join(", "));
            }
            println!("Total runs: {}", summary.total_runs);
        }
        Command::Options { show } => {
            let report = steps::generate_options(app)?;
            print_options(&report, show);
            if !report.is_complete() {
                report.into_options()?;
            }
        }
        Command::Submit(cmd) => {
            let submission = match cmd.job_url {
                Some(url) => steps::attach_job(app, &url)?,
                None => {
                    let args = SubmitArgs {
                        owner: cmd.owner.unwrap_or_default(),
                        project: cmd.project.unwrap_or_default(),
                        epw: cmd.epw.unwrap_or_default(),
                        ddy: cmd.ddy.unwrap_or_default(),
                    };
                    let mut service = app.job_service();
                    steps::submit(app, &mut service, &args)?
                }
            };
            println!("Job: {}", submission.url);
            println!("Runs: {}", submission.option_count);
        }
        Command::Results { option } => {
            let service = app.job_service();
            let outcome = steps::fetch_results(app, &service, option.map(OptionNo))?;
            print_results(app, outcome);
        }
        Command::Status => {
            for (step, done) in app.context.progress() {
                let mark = if done { "x" } else { " " };
                println!("[{mark}] {step} (parastudy {})", step.command());
            }
        }
        Command::Reset => {
            app.reset()?;
            println!("Study reset");
        }
    }
    Ok(())
}

fn print_options(report: &MaterializeReport, show: usize) {
    println!(
        "Generated {} of {} design options in {}",
        report.options.len(),
        report.total(),
        report.output_dir.display()
    );
    for option in report.options.iter().take(show) {
        println!("  {:>4}  {}", option.option_no, option.label);
    }
    if report.options.len() > show {
        println!("  ... {} more", report.options.len() - show);
    }
    for failure in &report.failures {
        println!(
            "  {:>4}  FAILED {}: {}",
            failure.option_no, failure.label, failure.reason
        );
    }
}

fn print_results(app: &App, outcome: ResultsOutcome) {
    let url = app
        .context
        .submission
        .as_ref()
        .map(|s| s.url.as_str())
        .unwrap_or_default();
    match outcome {
        ResultsOutcome::Pending(status) => {
            println!("Job {url} is {status}; run `parastudy results` again later");
        }
        ResultsOutcome::Unavailable(message) => {
            println!("Could not get results for {url}: {message}");
        }
        ResultsOutcome::Ready { table, selected } => {
            print_table(&table);
            if let Some(row) = selected {
                println!(
                    "Option {}: EUI {:.2}, model {}",
                    row.option_no,
                    row.eui,
                    row.artifact.display()
                );
            }
        }
    }
}

fn print_table(table: &ResultTable) {
    let dims = table.dimensions();
    let header: Vec<String> = dims.iter().map(|d| format!("{:>14}", d.label)).collect();
    println!("{}", header.join(""));
    for i in 0..table.len() {
        let cells: Vec<String> = dims
            .iter()
            .map(|d| format!("{:>14}", trim_float(d.values[i])))
            .collect();
        println!("{}", cells.join(""));
    }
    if let Some(best) = table.best() {
        println!("Lowest EUI: option {} ({:.2})", best.option_no, best.eui);
    }
}

fn trim_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
