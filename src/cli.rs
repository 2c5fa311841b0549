// Command line front end for oxicmp.
//
// Compares two files (either may be "-" for stdin) and reports through the
// exit status: 0 equal, 1 different, 2 trouble.

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, ValueHint};

use crate::compare::{CompareOptions, CompareReport, DEFAULT_BUFFER_SIZE, DEFAULT_MAX_ZERO_READS};
use crate::io::{FileCompareError, compare_files};

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

const EXIT_EQUAL: i32 = 0;
const EXIT_DIFFERENT: i32 = 1;
const EXIT_TROUBLE: i32 = 2;

// ---------------------------------------------------------------------------
// Byte size parsing (supports K, M, G suffixes)
// ---------------------------------------------------------------------------

fn parse_byte_size(s: &str) -> Result<usize, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty size string".into());
    }
    let (num_part, multiplier) = match s.as_bytes().last() {
        Some(b'k' | b'K') => (&s[..s.len() - 1], 1024usize),
        Some(b'm' | b'M') => (&s[..s.len() - 1], 1024 * 1024),
        Some(b'g' | b'G') => (&s[..s.len() - 1], 1024 * 1024 * 1024),
        _ => (s, 1usize),
    };
    let num: usize = num_part
        .trim()
        .parse()
        .map_err(|e| format!("invalid size '{s}': {e}"))?;
    let size = num
        .checked_mul(multiplier)
        .ok_or_else(|| format!("size overflow: '{s}'"))?;
    if size == 0 {
        return Err("buffer size must be greater than zero".into());
    }
    Ok(size)
}

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Compare two files byte by byte with a fixed memory budget.
#[derive(Parser, Debug)]
#[command(
    name = "oxicmp",
    version,
    about = "Streaming byte-for-byte file comparison",
    arg_required_else_help = true
)]
struct Cli {
    /// First file ("-" for stdin).
    #[arg(value_hint = ValueHint::FilePath)]
    first: PathBuf,

    /// Second file ("-" for stdin).
    #[arg(value_hint = ValueHint::FilePath)]
    second: PathBuf,

    /// Buffer size per input (supports K/M/G suffix).
    #[arg(short = 'b', long = "buffer-size", value_parser = parse_byte_size, default_value_t = DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,

    /// Buffer size for the second input, if different (supports K/M/G suffix).
    #[arg(long = "buffer-size-2", value_parser = parse_byte_size)]
    second_buffer_size: Option<usize>,

    /// Empty reads tolerated per input before it is treated as stuck.
    #[arg(short = 'z', long = "max-zero-reads", default_value_t = DEFAULT_MAX_ZERO_READS)]
    max_zero_reads: u32,

    /// Quiet mode (exit status only).
    #[arg(short = 'q', long, conflicts_with_all = ["verbose", "json_output"])]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Print the comparison report as JSON.
    #[arg(long = "json")]
    json_output: bool,
}

// ---------------------------------------------------------------------------
// Resolved options
// ---------------------------------------------------------------------------

struct Options {
    first: PathBuf,
    second: PathBuf,
    compare: CompareOptions,
    quiet: bool,
    verbose: u8,
    json_output: bool,
}

fn resolve_options(cli: Cli) -> Options {
    Options {
        compare: CompareOptions {
            first_capacity: cli.buffer_size,
            second_capacity: cli.second_buffer_size.unwrap_or(cli.buffer_size),
            max_zero_reads: cli.max_zero_reads,
        },
        first: cli.first,
        second: cli.second,
        quiet: cli.quiet,
        verbose: cli.verbose.min(2),
        json_output: cli.json_output,
    }
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("oxicmp".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn verdict_line(opts: &Options, report: &CompareReport) -> String {
    let (a, b) = (opts.first.display(), opts.second.display());
    if report.equal {
        format!("File {a} is equal to file {b}")
    } else {
        format!("File {a} is NOT equal to file {b}")
    }
}

fn report_json(opts: &Options, report: &CompareReport) -> serde_json::Value {
    use crate::compare::Mismatch;

    let mismatch = match report.mismatch {
        None => serde_json::Value::Null,
        Some(Mismatch::Content { offset }) => serde_json::json!({
            "kind": "content",
            "offset": offset,
        }),
        Some(Mismatch::Length { shorter, len }) => serde_json::json!({
            "kind": "length",
            "shorter": shorter.index(),
            "len": len,
        }),
    };
    serde_json::json!({
        "first": opts.first.display().to_string(),
        "second": opts.second.display().to_string(),
        "equal": report.equal,
        "mismatch": mismatch,
        "first_read": report.first_read,
        "second_read": report.second_read,
        "iterations": report.iterations,
        "first_buffer_size": opts.compare.first_capacity,
        "second_buffer_size": opts.compare.second_capacity,
        "max_zero_reads": opts.compare.max_zero_reads,
    })
}

// ---------------------------------------------------------------------------
// Compare command
// ---------------------------------------------------------------------------

fn cmd_compare(opts: &Options) -> i32 {
    let report = match compare_files(&opts.first, &opts.second, &opts.compare) {
        Ok(r) => r,
        Err(e) => {
            if !opts.quiet {
                eprintln!("oxicmp: {e}");
            }
            if let FileCompareError::Compare(inner) = &e {
                log::debug!("comparison aborted on {}", inner.side());
            }
            return EXIT_TROUBLE;
        }
    };

    if opts.json_output {
        match serde_json::to_string_pretty(&report_json(opts, &report)) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("oxicmp: json output: {e}");
                return EXIT_TROUBLE;
            }
        }
    } else if !opts.quiet {
        println!("{}", verdict_line(opts, &report));
        if opts.verbose > 0
            && let Some(m) = &report.mismatch
        {
            println!("oxicmp: {m}");
        }
        if opts.verbose > 1 {
            println!(
                "oxicmp: read {} bytes from {} and {} bytes from {} in {} iterations",
                report.first_read,
                opts.first.display(),
                report.second_read,
                opts.second.display(),
                report.iterations
            );
        }
    }

    if report.equal {
        EXIT_EQUAL
    } else {
        EXIT_DIFFERENT
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap and runs the comparison.
pub fn run() -> ! {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();
    let opts = resolve_options(cli);

    process::exit(cmd_compare(&opts));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
