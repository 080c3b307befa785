//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments (and prompts for missing bounds when asked)
//! - fetches or reads the series
//! - runs the window/shift/accumulate pass
//! - prints or shows the chart
//! - writes optional exports

use clap::Parser;
use tracing::debug;

use crate::cli::prompt::{self, Answers};
use crate::cli::{Command, PrintArgs, RunArgs, SourceKind};
use crate::domain::{DEFAULT_MAX, DEFAULT_MIN, DateWindow, Mode, PlotConfig, Source};
use crate::error::AppError;
use crate::logging::LogTarget;

pub mod pipeline;

/// Entry point for the `milk-stats` binary.
pub fn run() -> Result<(), AppError> {
    // A bare `milk-stats` (or one starting with flags) means `milk-stats show ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Show(args) => handle_show(args),
        Command::Print(args) => handle_print(args),
    }
}

fn handle_show(args: RunArgs) -> Result<(), AppError> {
    let target = LogTarget::for_chart_window(args.log_file.as_deref());
    crate::logging::init_logging(args.verbose, &target)?;
    let config = plot_config_from_args(&args)?;
    debug!(?config, "resolved config");

    let loader = pipeline::Loader::from_config(&config)?;
    let series = loader.load(&config)?;
    let run = pipeline::run_with_series(&config, series)?;
    pipeline::write_exports(&config, &run)?;

    crate::tui::run(config, loader, run)
}

fn handle_print(args: PrintArgs) -> Result<(), AppError> {
    let target = LogTarget::for_text_output(args.run.log_file.as_deref());
    crate::logging::init_logging(args.run.verbose, &target)?;
    let mut config = plot_config_from_args(&args.run)?;
    config.plot_width = args.width;
    config.plot_height = args.height;
    debug!(?config, "resolved config");

    let run = pipeline::run(&config)?;

    println!("{}", crate::report::format_points(&run.points));
    println!();
    print!(
        "{}",
        crate::report::format_run_summary(&config, &run.series, &run.points)
    );
    if !args.no_plot {
        println!();
        print!(
            "{}",
            crate::plot::render_ascii_plot(&run.points, config.plot_width, config.plot_height)
        );
    }

    pipeline::write_exports(&config, &run)
}

/// Resolve flags (and prompt answers, with `--interactive`) into a [`PlotConfig`].
pub fn plot_config_from_args(args: &RunArgs) -> Result<PlotConfig, AppError> {
    let (mode, window) = if args.interactive {
        prompt::stdio().complete(Answers {
            mode: args.mode,
            min: args.min,
            max: args.max,
        })?
    } else {
        (
            args.mode.unwrap_or(Mode::DailyIncrease),
            DateWindow::new(args.min.unwrap_or(DEFAULT_MIN), args.max.unwrap_or(DEFAULT_MAX)),
        )
    };

    if window.is_empty() {
        return Err(AppError::usage(format!(
            "Empty date window: nothing lies strictly between {} and {}.",
            window.min, window.max
        )));
    }

    let source = if args.urls.is_empty() {
        match args.source {
            SourceKind::User => Source::User,
            SourceKind::Tournament => Source::Tournament,
        }
    } else {
        Source::Urls(args.urls.clone())
    };

    Ok(PlotConfig {
        source,
        base_url: args.base_url.clone(),
        timeout_secs: args.timeout_secs,
        input: args.input.clone(),
        window,
        mode,
        save_raw: args.save_raw.clone(),
        export_csv: args.export.clone(),
        export_svg: args.svg.clone(),
        ..PlotConfig::default()
    })
}

/// Rewrite argv so `milk-stats` defaults to `milk-stats show`.
///
/// Rules:
/// - `milk-stats`                      -> `milk-stats show`
/// - `milk-stats -m 1 ...`             -> `milk-stats show -m 1 ...`
/// - `milk-stats --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("show".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "show" | "print");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "show".to_string());
        return argv;
    }

    argv
}
