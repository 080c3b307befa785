//! Shared "load → transform" logic used by both the printer and the TUI.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch (or read snapshot) -> optional raw save -> window/shift/accumulate
//!
//! The front-ends can then focus on presentation.

use tracing::info;

use crate::data::ApiClient;
use crate::domain::{ChartPoint, PlotConfig, chart_title};
use crate::error::AppError;
use crate::series::{Series, transform_non_empty};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub series: Series,
    pub points: Vec<ChartPoint>,
}

/// Where the series comes from for this run.
pub enum Loader {
    Remote(ApiClient),
    Snapshot(std::path::PathBuf),
}

impl Loader {
    pub fn from_config(config: &PlotConfig) -> Result<Self, AppError> {
        match &config.input {
            Some(path) => Ok(Loader::Snapshot(path.clone())),
            None => Ok(Loader::Remote(ApiClient::from_env(
                config.base_url.as_deref(),
                config.timeout_secs,
            )?)),
        }
    }

    pub fn load(&self, config: &PlotConfig) -> Result<Series, AppError> {
        let series = match self {
            Loader::Remote(client) => client.fetch(&config.source)?,
            Loader::Snapshot(path) => {
                let series = crate::io::read_snapshot(path)?;
                info!(path = %path.display(), dates = series.len(), "read snapshot");
                series
            }
        };

        if let Some(path) = &config.save_raw {
            crate::io::write_snapshot(path, &series)?;
            info!(path = %path.display(), "saved raw series");
        }
        Ok(series)
    }
}

/// Execute the full pipeline and return the computed outputs.
pub fn run(config: &PlotConfig) -> Result<RunOutput, AppError> {
    let loader = Loader::from_config(config)?;
    let series = loader.load(config)?;
    run_with_series(config, series)
}

/// Execute the pipeline with an already loaded series.
///
/// This is useful for the TUI where we want to switch modes without re-fetching.
pub fn run_with_series(config: &PlotConfig, series: Series) -> Result<RunOutput, AppError> {
    let points = transform_non_empty(&series, &config.window, config.mode)?;
    Ok(RunOutput { series, points })
}

/// Write the CSV/SVG exports requested in `config`.
pub fn write_exports(config: &PlotConfig, run: &RunOutput) -> Result<(), AppError> {
    if let Some(path) = &config.export_csv {
        crate::io::write_points_csv(path, &run.points)?;
        info!(path = %path.display(), "exported csv");
    }
    if let Some(path) = &config.export_svg {
        let title = chart_title(&config.window, config.mode);
        crate::plot::write_svg_chart(path, &run.points, &title)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DateWindow, Mode};

    fn snapshot_config(dir: &tempfile::TempDir) -> PlotConfig {
        let input = dir.path().join("in.json");
        std::fs::write(&input, r#"{"20210101": 5, "20210102": 3, "20210103": 7, "20201231": 2}"#).unwrap();
        PlotConfig {
            input: Some(input),
            window: DateWindow::new(20_210_100, 20_210_104),
            mode: Mode::Accumulation,
            ..PlotConfig::default()
        }
    }

    #[test]
    fn snapshot_run_applies_window_and_mode() {
        let dir = tempfile::tempdir().unwrap();
        let config = snapshot_config(&dir);

        let run = run(&config).unwrap();
        let got: Vec<(&str, i64)> = run.points.iter().map(|p| (p.label.as_str(), p.value)).collect();
        // 20201231 is outside the window but still counts towards the total.
        assert_eq!(got, [("210101", 7), ("210102", 10), ("210103", 17)]);
        assert_eq!(run.series.len(), 4);
    }

    #[test]
    fn exports_and_raw_save_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = snapshot_config(&dir);
        config.save_raw = Some(dir.path().join("raw.json"));
        config.export_csv = Some(dir.path().join("out.csv"));
        config.export_svg = Some(dir.path().join("out.svg"));

        let run = run(&config).unwrap();
        write_exports(&config, &run).unwrap();

        let raw = std::fs::read_to_string(dir.path().join("raw.json")).unwrap();
        assert!(raw.contains("\"20201231\": 2"));
        let csv = std::fs::read_to_string(dir.path().join("out.csv")).unwrap();
        assert_eq!(csv.lines().count(), 4);
        assert!(dir.path().join("out.svg").exists());
    }

    #[test]
    fn remote_run_uses_configured_base_url() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/api/user/download")
            .with_status(200)
            .with_body(r#"{"20210101": 5, "20210102": 3, "20210103": 7}"#)
            .create();

        let config = PlotConfig {
            base_url: Some(server.url()),
            window: DateWindow::new(20_210_100, 20_210_104),
            ..PlotConfig::default()
        };
        let run = run(&config).unwrap();
        let values: Vec<i64> = run.points.iter().map(|p| p.value).collect();
        assert_eq!(values, [5, 3, 7]);
    }

    #[test]
    fn empty_window_fails_with_exit_code_3() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = snapshot_config(&dir);
        config.window = DateWindow::new(20_300_000, 20_400_000);
        assert_eq!(run(&config).unwrap_err().exit_code(), 3);
    }
}
