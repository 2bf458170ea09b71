//! Reads zone files and reports how many records they contain.
//!
//! With `-c`, records with errors are skipped and reported at the end. With
//! `-p`, every record is printed in presentation format.

use std::env;
use std::process::exit;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use zonescan::zonefile::{ErrorPolicy, Flow, Options, Parser};

fn main() {
    // Initialize tracing based logging. Override with env var RUST_LOG, e.g.
    // RUST_LOG=debug.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .without_time()
        .try_init()
        .ok();

    let mut args = env::args();
    let prog_name = args.next().unwrap_or_else(|| "read-zone".into());
    let mut policy = ErrorPolicy::Stop;
    let mut print = false;
    let mut zone_files = Vec::new();
    for arg in args {
        match arg.as_str() {
            "-c" => policy = ErrorPolicy::Continue,
            "-p" => print = true,
            _ => zone_files.push(arg),
        }
    }

    if zone_files.is_empty() {
        eprintln!("Usage: {} [-c] [-p] <zonefile> [<zonefile> ...]", prog_name);
        exit(2);
    }

    let mut failed = false;
    for zone_file in zone_files {
        let start = Instant::now();
        let options = Options::default().with_error_policy(policy);
        let mut parser = match Parser::open(&zone_file, options) {
            Ok(parser) => parser,
            Err(err) => {
                eprintln!("{}", err);
                failed = true;
                continue;
            }
        };
        let res = parser.process(|record| {
            if print {
                println!("{}", record);
            }
            Flow::Continue
        });
        match res {
            Ok(summary) => {
                println!(
                    "{}: {} records, {} skipped ({:.03}s)",
                    zone_file,
                    summary.records,
                    summary.errors,
                    start.elapsed().as_secs_f32()
                );
                for err in parser.errors() {
                    eprintln!("  {}", err);
                }
            }
            Err(err) => {
                eprintln!("{}", err);
                failed = true;
            }
        }
    }
    if failed {
        exit(1);
    }
}
