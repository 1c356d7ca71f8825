use std::path::PathBuf;
use std::process;

use cellmarch_bench::report;
use cellmarch_bench::runner::BenchmarkRunner;
use cellmarch_bench::scenes;

fn usage() {
    eprintln!("Usage: bench-runner [OPTIONS]");
    eprintln!("  --baseline <path>              Load baseline JSON for comparison");
    eprintln!("  --output <path>                Save current results as JSON baseline");
    eprintln!("  --regression-threshold <pct>   Regression threshold percentage (default: 10)");
    eprintln!("  --ticks <n>                    Generations per scene (default: 60)");
    eprintln!("  --threads <n>                  Worker threads, 0 = single-threaded (default: 0)");
    eprintln!("  --scene <name>                 Run only the named scene");
}

/// Value following a flag, or exit with usage.
fn flag_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|s| s.parse::<T>()) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("Missing or invalid value for {flag}");
            usage();
            process::exit(1);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut baseline_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut regression_threshold = 10.0f64;
    let mut tick_count = 60u32;
    let mut threads = 0usize;
    let mut only_scene: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--baseline" => {
                i += 1;
                baseline_path = Some(flag_value(&args, i, "--baseline"));
            }
            "--output" => {
                i += 1;
                output_path = Some(flag_value(&args, i, "--output"));
            }
            "--regression-threshold" => {
                i += 1;
                regression_threshold = flag_value(&args, i, "--regression-threshold");
            }
            "--ticks" => {
                i += 1;
                tick_count = flag_value(&args, i, "--ticks");
            }
            "--threads" => {
                i += 1;
                threads = flag_value(&args, i, "--threads");
            }
            "--scene" => {
                i += 1;
                only_scene = Some(flag_value(&args, i, "--scene"));
            }
            "--help" | "-h" => {
                usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let runner = match BenchmarkRunner::new(tick_count, threads) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("ERROR: failed to build thread pool: {e}");
            process::exit(1);
        }
    };

    let scene_configs: Vec<_> = scenes::standard_scenes()
        .into_iter()
        .filter(|s| only_scene.as_deref().map_or(true, |name| s.name == name))
        .collect();
    if scene_configs.is_empty() {
        eprintln!("No scene matches {:?}", only_scene.unwrap_or_default());
        process::exit(1);
    }

    let mut results = Vec::new();
    for config in &scene_configs {
        match runner.run_scene(config) {
            Ok(result) => results.push(result),
            Err(e) => {
                eprintln!("ERROR: scene '{}' failed: {e}", config.name);
                process::exit(1);
            }
        }
    }

    println!("\n## Benchmark Results\n");
    println!("{}", report::format_markdown(&results));

    if let Some(ref path) = output_path {
        let baseline = report::Baseline {
            timestamp: run_timestamp(),
            results: results.clone(),
        };
        if let Err(e) = report::save_baseline(path, &baseline) {
            eprintln!("ERROR: failed to save baseline to {}: {e}", path.display());
            process::exit(1);
        }
        log::info!("Saved baseline to {}", path.display());
    }

    if let Some(ref path) = baseline_path {
        if let Some(baseline) = report::load_baseline(path) {
            let regressions = report::compare(&results, &baseline, regression_threshold);
            println!(
                "{}",
                report::format_comparison(&regressions, regression_threshold)
            );
            if !regressions.is_empty() {
                eprintln!(
                    "ERROR: {} regressions detected, exiting with code 1",
                    regressions.len()
                );
                process::exit(1);
            }
        } else {
            log::warn!("Baseline file not found: {}", path.display());
        }
    }

    log::info!("Benchmark complete.");
}

/// Seconds since the Unix epoch, as a plain label.
fn run_timestamp() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("bench-{secs}")
}
