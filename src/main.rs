// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use densewave::{parse_vcd_with_options, ParseOptions, VCD};

/// Reconstructs dense per-time-step traces from a VCD dump.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// The path to the file to read
    path: std::path::PathBuf,

    /// Reject redeclared identifiers and aliased signal names
    #[arg(long)]
    strict: bool,

    /// Print at most this many time steps of every trace
    #[arg(long, default_value_t = 32)]
    steps: usize,
}

fn print_vcd(vcd: &VCD, steps: usize) {
    let header = &vcd.header;
    println!("file      : {}", header.filename);
    println!("date      : {}", header.date.raw);
    if let Some(datetime) = header.date.to_datetime() {
        println!("            ({datetime})");
    }
    println!("version   : {}", header.version.raw);
    println!("timescale : {}{}", header.timescale, header.timeunit);
    println!("steps     : {}", header.signal_len);
    println!("signals   : {}", header.signal_num);
    println!();

    let name_width = vcd.signals.keys().map(String::len).max().unwrap_or(0);
    for (name, signal) in &vcd.signals {
        let shown: Vec<String> = signal
            .samples
            .iter()
            .take(steps)
            .map(|sample| sample.to_string())
            .collect();
        let ellipsis = if signal.samples.len() > steps { " ..." } else { "" };
        println!(
            "{name:<name_width$} {:>6}[{}] {}{ellipsis}",
            signal.var_type,
            signal.bit_width,
            shown.join(" ")
        );
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Cli::parse();

    let now = Instant::now();
    let options = ParseOptions {
        strict: args.strict,
    };
    let vcd = match parse_vcd_with_options(&args.path, options) {
        Ok(vcd) => vcd,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let elapsed = now.elapsed();
    log::info!("parsed {} in {:.2?}", args.path.display(), elapsed);

    print_vcd(&vcd, args.steps);
    ExitCode::SUCCESS
}
