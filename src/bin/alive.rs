use clap::Parser;
use alive::config::{CliConfig, Config};
use alive::core::constants::exit_codes;
use alive::core::types::Summary;
use alive::dispatch::Dispatcher;
use alive::input::UrlSources;
use alive::probe::{HttpProber, Probe};
use alive::reporting::logging;
use alive::suggest::{AlternativeFinder, DuckDuckGo};
use alive::ui::color;
use alive::ui::output;
use alive::ui::{Cli, ProgressReporter, cli_to_config};

use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let exit_code = tokio::select! {
        code = run(cli) => code,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nInterrupted");
            exit_codes::INTERRUPTED
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> i32 {
    match run_check_logic(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("\nFor more information, try '--help'.");
            exit_codes::FAILURE
        }
    }
}

/// Load configuration: explicit file, standard locations, or defaults, then CLI on top
fn load_config(cli_config: &CliConfig) -> Result<(Config, Option<PathBuf>), Box<dyn std::error::Error>> {
    let (mut config, source) = if cli_config.no_config {
        (Config::default(), None)
    } else if let Some(ref path) = cli_config.config_file {
        (Config::load_from_file(path)?, Some(PathBuf::from(path)))
    } else {
        (Config::load_from_standard_locations(), None)
    };

    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok((config, source))
}

async fn run_check_logic(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(&cli);
    let (config, config_source) = load_config(&cli_config)?;
    let json = config.is_json();
    let verbose = config.is_verbose();

    logging::init_logger(verbose, json);
    logging::log_config_source(config_source);
    logging::log_config_info(&config);

    if !json {
        output::print_banner();
    }

    // Collect URLs before any network work
    let sources = UrlSources {
        positional: cli.urls,
        file: cli.file.map(PathBuf::from),
        json,
    };
    let mut stdin = std::io::stdin();
    let stdin_reader: Option<&mut dyn Read> = if stdin.is_terminal() {
        None
    } else {
        Some(&mut stdin as &mut dyn Read)
    };
    let urls = sources.collect(stdin_reader)?;

    let workers = config.max_workers();
    let live = !json && color::stdout_is_terminal();
    let use_color = color::supports_formatting();

    if !json {
        output::print_header(urls.len(), workers, live);
    }

    let prober: Arc<dyn Probe> = Arc::new(HttpProber::new(config.probe_settings()));
    let mut dispatcher = Dispatcher::new(prober, workers);
    if config.suggests_alternatives() {
        match DuckDuckGo::new() {
            Ok(backend) => {
                let finder = AlternativeFinder::new(Arc::new(backend))
                    .notify_failures(!json && color::stderr_is_terminal());
                dispatcher = dispatcher.with_finder(finder);
            }
            Err(e) => logging::log_warning(&format!("Alternative search disabled: {e}")),
        }
    }

    let mut progress = ProgressReporter::new(json && color::stderr_is_terminal());
    progress.start(urls.len());

    let results = dispatcher
        .run(&urls, |result| {
            progress.advance();
            if live {
                println!("{}", output::format_result(result, verbose, use_color));
            }
        })
        .await;

    progress.finish();
    let summary = Summary::from_results(&results);

    if json {
        println!("{}", output::format_json(&results)?);
        return Ok(summary.exit_code());
    }

    if !live {
        for result in &results {
            println!("{}", output::format_result(result, verbose, use_color));
        }
    }
    output::print_summary(&summary);

    if let Some(ref path) = config.output_file {
        match output::write_report(path, &results, verbose) {
            Ok(()) => {
                if live {
                    println!("Results successfully written to: {path}");
                }
            }
            Err(e) => {
                logging::log_error("Report write failed", Some(&e));
                eprintln!("Error writing to output file {path}: {e}");
            }
        }
    }

    Ok(summary.exit_code())
}
