//! Headless replay of editor sessions.
//!
//! Reads a chart and a script of [`ChartEvent`]s, one JSON object per line,
//! and runs them through a [`Dispatcher`]. Blank lines and lines starting
//! with `#` are skipped.

use flowchart_core::{Chart, ChartError, ChartEvent, ChartResult, Dispatcher, EditorConfig, SequentialGenerator};
use std::path::Path;

/// Environment variable naming an optional editor config file.
pub const CONFIG_ENV: &str = "FLOWCHART_CONFIG";

/// Parse a JSON-lines event script.
pub fn parse_script(script: &str) -> ChartResult<Vec<ChartEvent>> {
    script
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| serde_json::from_str::<ChartEvent>(line).map_err(ChartError::from))
        .collect()
}

/// Apply `events` to `chart`. Node ids are generated sequentially so a
/// replay is reproducible.
pub fn replay(chart: Chart, events: &[ChartEvent], config: EditorConfig) -> Chart {
    let ids = SequentialGenerator::new(config.node_id_prefix.clone());
    let mut dispatcher = Dispatcher::with_generator(chart, ids).with_config(config);
    dispatcher.dispatch_all(events);
    log::info!(
        "Replayed {} events, {} changed the chart",
        events.len(),
        dispatcher.store().revision()
    );
    dispatcher.into_chart()
}

/// Load the config named by [`CONFIG_ENV`], or the defaults.
pub fn load_config() -> ChartResult<EditorConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            log::debug!("Loading config from {:?}", path);
            EditorConfig::from_json(&std::fs::read_to_string(path)?)
        }
        None => Ok(EditorConfig::default()),
    }
}

/// Replay a script file against a chart file.
pub fn replay_files(chart_path: &Path, script_path: &Path, config: EditorConfig) -> ChartResult<Chart> {
    let chart = Chart::from_json(&std::fs::read_to_string(chart_path)?)?;
    let events = parse_script(&std::fs::read_to_string(script_path)?)?;
    Ok(replay(chart, &events, config))
}
