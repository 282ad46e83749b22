use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use pf_geometry::GeometryBuilder;
use pf_project::{CaseDef, ProjectError};
use pf_results::{ResultsError, RunStore, build_records, compute_run_id, surface_csv};
use pf_solver::{
    CylinderFlow, SolveProgressEvent, SolveTiming, SolverError, run_case_with_progress,
    solve_body,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SOLVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Project(#[from] ProjectError),
    #[error(transparent)]
    Solver(#[from] SolverError),
    #[error(transparent)]
    Results(#[from] ResultsError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Usage(String),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "panelflow")]
#[command(about = "PanelFlow CLI - source panel flow around a cylinder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a case file
    Validate {
        /// Path to the case file (.yaml or .json)
        case_path: PathBuf,
    },
    /// Write the reference case (R = 1, n = 100, U = 10) to a new file
    Init {
        /// Path of the case file to create
        case_path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Solve a case and store the run
    Run {
        /// Path to the case file
        case_path: PathBuf,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// List stored runs next to a case
    Runs {
        /// Path to the case file
        case_path: PathBuf,
    },
    /// Show details of a stored run
    ShowRun {
        /// Path to the case file
        case_path: PathBuf,
        /// Run ID to display
        run_id: String,
    },
    /// Export the surface table of a run as CSV
    ExportSurface {
        /// Path to the case file
        case_path: PathBuf,
        /// Run ID
        run_id: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compare surface results against the exact cylinder solution for several panel counts
    Convergence {
        /// Path to the case file
        case_path: PathBuf,
        /// Panel counts to solve
        #[arg(long, value_delimiter = ',', default_values_t = vec![16, 32, 64, 128, 256])]
        panels: Vec<usize>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Init { case_path, force } => cmd_init(&case_path, force),
        Commands::Run {
            case_path,
            no_cache,
        } => cmd_run(&case_path, !no_cache),
        Commands::Runs { case_path } => cmd_runs(&case_path),
        Commands::ShowRun { case_path, run_id } => cmd_show_run(&case_path, &run_id),
        Commands::ExportSurface {
            case_path,
            run_id,
            output,
        } => cmd_export_surface(&case_path, &run_id, output.as_deref()),
        Commands::Convergence { case_path, panels } => cmd_convergence(&case_path, &panels),
    };

    if let Err(err) = outcome {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn cmd_validate(case_path: &Path) -> CliResult<()> {
    println!("Validating case: {}", case_path.display());
    let case = pf_project::load_case(case_path)?;
    println!("✓ Case '{}' is valid", case.name);
    Ok(())
}

fn cmd_init(case_path: &Path, force: bool) -> CliResult<()> {
    if case_path.exists() && !force {
        return Err(CliError::Usage(format!(
            "{} already exists (use --force to overwrite)",
            case_path.display()
        )));
    }
    pf_project::save_case(case_path, &CaseDef::default())?;
    println!("✓ Wrote reference case to {}", case_path.display());
    Ok(())
}

fn cmd_run(case_path: &Path, use_cache: bool) -> CliResult<()> {
    let case = pf_project::load_case(case_path)?;
    let store = RunStore::for_case(case_path)?;
    let run_id = compute_run_id(&case, SOLVER_VERSION);

    if use_cache && store.has_run(&run_id) {
        println!("✓ Loaded from cache: {}", run_id);
        let summary = store.load_summary(&run_id)?;
        print_summary(&summary);
        return Ok(());
    }

    println!(
        "Solving '{}': {} panels, grid {}x{}",
        case.name, case.body.panels, case.grid.density, case.grid.density
    );

    let config = case.to_flow_config();
    let mut last_emit = Instant::now();
    let mut last_stage = None;
    let result = run_case_with_progress(
        &config,
        Some(&mut |event| {
            let emit_now =
                last_stage != Some(event.stage) || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                last_stage = Some(event.stage);
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    let save_start = Instant::now();
    let records = build_records(&case, &result, SOLVER_VERSION);
    store.save_run(&records)?;
    info!(run_id = %records.manifest.run_id, "run saved");

    println!("✓ Solve completed: {}", records.manifest.run_id);
    print_timing_summary(&result.timing, save_start.elapsed().as_secs_f64());
    print_summary(&records.summary);
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(80));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &SolveProgressEvent) {
    let spinner = ['|', '/', '-', '\\'];
    let spin_idx = ((event.elapsed_s * 10.0) as usize) % spinner.len();
    print!(
        "\r{} {}  elapsed={:.2}s",
        spinner[spin_idx],
        event.stage.label(),
        event.elapsed_s
    );
    let _ = io::stdout().flush();
}

fn print_timing_summary(timing: &SolveTiming, save_s: f64) {
    let total = timing.total_s.max(1.0e-12);
    let pct = |t: f64| 100.0 * t / total;

    println!("\nTiming summary:");
    println!(
        "  Geometry: {:.3}s ({:.1}%)",
        timing.geometry_s,
        pct(timing.geometry_s)
    );
    println!(
        "  Assembly: {:.3}s ({:.1}%)",
        timing.assembly_s,
        pct(timing.assembly_s)
    );
    println!("  Solve:    {:.3}s ({:.1}%)", timing.solve_s, pct(timing.solve_s));
    println!(
        "  Surface:  {:.3}s ({:.1}%)",
        timing.surface_s,
        pct(timing.surface_s)
    );
    println!("  Field:    {:.3}s ({:.1}%)", timing.field_s, pct(timing.field_s));
    println!("  Save:     {:.3}s", save_s);
    println!("  Total:    {:.3}s", timing.total_s);
}

fn print_summary(summary: &pf_results::RunSummary) {
    println!("\nRun Summary:");
    println!(
        "  Free stream: ({}, {})",
        summary.free_stream_u, summary.free_stream_w
    );
    println!("  Radius: {}", summary.radius);
    println!("  Panels: {}", summary.panel_count);
    println!("  Linear residual: {:.3e}", summary.relative_residual);
    println!("  Max |Qn|: {:.3e}", summary.max_normal_residual);
    println!("  Sum of sigma: {:.3e}", summary.sigma_sum);
    println!("  Net source output: {:.3e}", summary.net_source_output);
    println!("  Cp range: {:.4} .. {:.4}", summary.min_cp, summary.max_cp);
}

fn cmd_runs(case_path: &Path) -> CliResult<()> {
    let store = RunStore::for_case(case_path)?;
    let runs = store.list_runs()?;

    if runs.is_empty() {
        println!("No stored runs for {}", case_path.display());
    } else {
        println!("Stored runs for {}:", case_path.display());
        for manifest in runs {
            println!(
                "  {} '{}' n={} ({})",
                manifest.run_id, manifest.case_name, manifest.panel_count, manifest.timestamp
            );
        }
    }
    Ok(())
}

fn cmd_show_run(case_path: &Path, run_id: &str) -> CliResult<()> {
    println!("Loading run: {}", run_id);

    let store = RunStore::for_case(case_path)?;
    let records = store.load_run(run_id)?;

    println!("  Case: {}", records.manifest.case_name);
    println!("  Created: {}", records.manifest.timestamp);
    println!("  Solver version: {}", records.manifest.solver_version);
    println!("  Grid points: {}", records.manifest.grid_points);
    if records.field.sanitized_contributions > 0 {
        println!(
            "  Sanitized field contributions: {}",
            records.field.sanitized_contributions
        );
    }
    print_summary(&records.summary);

    let t = &records.summary.timing;
    println!("\nTiming: total {:.3}s (solve {:.3}s)", t.total_s, t.solve_s);
    Ok(())
}

fn cmd_export_surface(case_path: &Path, run_id: &str, output: Option<&Path>) -> CliResult<()> {
    let store = RunStore::for_case(case_path)?;
    let surface = store.load_surface(run_id)?;
    let csv = surface_csv(&surface);

    if let Some(output_path) = output {
        std::fs::write(output_path, csv)?;
        println!(
            "✓ Exported {} surface rows to {}",
            surface.len(),
            output_path.display()
        );
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn cmd_convergence(case_path: &Path, panel_counts: &[usize]) -> CliResult<()> {
    let case = pf_project::load_case(case_path)?;
    let config = case.to_flow_config();
    let exact = CylinderFlow::new(config.radius, config.free_stream);
    let builder = GeometryBuilder::new().with_offset(config.control_offset);

    println!("Convergence against the exact cylinder solution:");
    println!(
        "  {:>6}  {:>12}  {:>12}  {:>12}",
        "panels", "max |dCp|", "max |dQt|/V", "max |Qn|"
    );
    for &n in panel_counts {
        let geometry = builder
            .circle(config.radius, n)
            .map_err(SolverError::from)?;
        let solution = solve_body(geometry, config.free_stream)?;
        let cp_err = exact.max_pressure_error(&solution.geometry, &solution.surface);
        let qt_err = exact.max_tangential_error(&solution.geometry, &solution.surface);
        println!(
            "  {:>6}  {:>12.4e}  {:>12.4e}  {:>12.4e}",
            n,
            cp_err,
            qt_err,
            solution.surface.max_normal_residual()
        );
    }
    Ok(())
}
