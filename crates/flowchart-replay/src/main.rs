//! Replay entry point: `flowchart-replay <chart.json> <events.jsonl>`.

use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [chart_path, script_path] = args.as_slice() else {
        eprintln!("usage: flowchart-replay <chart.json> <events.jsonl>");
        return ExitCode::from(2);
    };

    let result = flowchart_replay::load_config().and_then(|config| {
        flowchart_replay::replay_files(&PathBuf::from(chart_path), &PathBuf::from(script_path), config)
    });
    match result.and_then(|chart| chart.to_json()) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Replay failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
