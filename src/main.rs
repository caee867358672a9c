//! Islander -- searches a seeded island-building game for its best play.
//!
//! Usage:
//!   islander [OPTIONS]
//!
//! Options:
//!   --config FILE     JSON session config; later flags override it
//!   --cols N          Board columns (default: 9)
//!   --rows N          Board rows (default: 9)
//!   --turns N         Number of turns (default: 10)
//!   --choices N       Options offered per turn (default: 2)
//!   --seed N          Schedule seed (default: 0)
//!   --island CELLS    Island cells as "c,r;c,r;..." (repeatable)
//!   --strict          Score with strict validity
//!   --variant NAME    exhaustive | pruned | depth (default: exhaustive)
//!   --depth N         Cull interval in turns for --variant depth (default: 2)
//!   --prune-pct F     Fraction culled for --variant depth (default: 0.5)
//!   --parallel        Expand frontier states in parallel
//!   --movetime MS     Wall-clock budget for the search
//!   --json            Print the report as JSON
//!   --log-level LVL   Log filter, e.g. debug (default: $RUST_LOG or warn)

use std::env;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;

use flexi_logger::{AdaptiveFormat, Logger, WriteMode};

use islander::board::Position;
use islander::eval::ScoringMode;
use islander::search::SearchVariant;
use islander::session::{run_session, write_json, SessionConfig, SessionReport};

/// Parsed command line.
struct Cli {
    config: SessionConfig,
    json: bool,
    log_level: Option<String>,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let cli = match parse_args(&args) {
        Ok(Some(cli)) => cli,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(msg) => {
            eprintln!("{}", msg);
            print_usage();
            process::exit(2);
        }
    };

    let logger = match cli.log_level.as_deref() {
        Some(level) => Logger::try_with_str(level),
        None => Logger::try_with_env_or_str("warn"),
    };
    let _logger = match logger.and_then(|l| {
        l.write_mode(WriteMode::BufferAndFlush)
            .log_to_stderr()
            .adaptive_format_for_stderr(AdaptiveFormat::Default)
            .start()
    }) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("logger unavailable: {}", e);
            None
        }
    };

    match run_session(&cli.config) {
        Ok(report) => {
            if cli.json {
                let mut out = BufWriter::new(io::stdout().lock());
                if let Err(e) = write_json(&report, &mut out) {
                    log::error!("failed to write report: {}", e);
                    process::exit(1);
                }
            } else {
                print_report(&report);
            }
        }
        Err(e) => {
            log::error!("session failed: {}", e);
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

/// Returns Ok(None) when help was requested.
fn parse_args(args: &[String]) -> Result<Option<Cli>, String> {
    // A config file is the base layer, so find it before the other flags.
    let mut config = match args.iter().position(|a| a == "--config") {
        Some(i) => {
            let path = args.get(i + 1).ok_or("--config needs a value")?;
            SessionConfig::load(&PathBuf::from(path)).map_err(|e| e.to_string())?
        }
        None => SessionConfig::default(),
    };
    let mut json = false;
    let mut log_level = None;
    let mut variant_name: Option<String> = None;
    let mut depth = 2usize;
    let mut pct = 0.5f64;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--config" => {
                next_value(args, &mut i, flag)?;
            }
            "--cols" => config.cols = parse_num(flag, next_value(args, &mut i, flag)?)?,
            "--rows" => config.rows = parse_num(flag, next_value(args, &mut i, flag)?)?,
            "--turns" => config.turn_limit = parse_num(flag, next_value(args, &mut i, flag)?)?,
            "--choices" => config.choice_count = parse_num(flag, next_value(args, &mut i, flag)?)?,
            "--seed" => config.seed = parse_num(flag, next_value(args, &mut i, flag)?)?,
            "--island" => config.islands.push(parse_island(next_value(args, &mut i, flag)?)?),
            "--strict" => config.scoring = ScoringMode::Strict,
            "--variant" => variant_name = Some(next_value(args, &mut i, flag)?.to_string()),
            "--depth" => depth = parse_num(flag, next_value(args, &mut i, flag)?)?,
            "--prune-pct" => pct = parse_num(flag, next_value(args, &mut i, flag)?)?,
            "--parallel" => config.search.parallel = true,
            "--movetime" => config.search.movetime_ms = Some(parse_num(flag, next_value(args, &mut i, flag)?)?),
            "--json" => json = true,
            "--log-level" => log_level = Some(next_value(args, &mut i, flag)?.to_string()),
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown argument: {}", other)),
        }
        i += 1;
    }

    if let Some(name) = variant_name {
        config.search.variant = match name.as_str() {
            "exhaustive" => SearchVariant::Exhaustive,
            "pruned" => SearchVariant::Pruned,
            "depth" | "depth-limited" => SearchVariant::DepthLimited {
                depth,
                pct_to_prune: pct,
            },
            other => return Err(format!("unknown variant: {}", other)),
        };
    }

    Ok(Some(Cli {
        config,
        json,
        log_level,
    }))
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(|s| s.as_str())
        .ok_or_else(|| format!("{} needs a value", flag))
}

fn parse_num<T: std::str::FromStr>(flag: &str, raw: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("invalid {} value: '{}'", flag, raw))
}

fn parse_island(raw: &str) -> Result<Vec<Position>, String> {
    raw.split(';')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<Position>().map_err(|e| e.to_string()))
        .collect()
}

fn print_report(report: &SessionReport) {
    for row in report.board.iter() {
        let spaced: Vec<String> = row.chars().map(|c| c.to_string()).collect();
        println!("{}", spaced.join(" "));
    }
    println!();
    println!("score {}", report.final_score);
    println!(
        "path {}",
        report
            .search
            .path
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(",")
    );
    println!(
        "nodes {} peak {} turns {} time {}{}",
        report.search.nodes,
        report.search.peak_frontier,
        report.search.turns_searched,
        report.elapsed_ms,
        if report.search.complete { "" } else { " (incomplete)" }
    );
}

fn print_usage() {
    eprintln!("Usage: islander [--config FILE] [--cols N] [--rows N] [--turns N] [--choices N]");
    eprintln!("                [--seed N] [--island \"c,r;c,r\"]... [--strict]");
    eprintln!("                [--variant exhaustive|pruned|depth] [--depth N] [--prune-pct F]");
    eprintln!("                [--parallel] [--movetime MS] [--json] [--log-level LVL]");
}
