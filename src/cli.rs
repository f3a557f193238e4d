//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Go `flag` spellings are accepted: `-verbose`, `-input=a.txt`, `-input a.txt`.
//!   They are rewritten to their `--long` form before clap sees them.
//! - `-verbose` only takes a value through `=` (`-verbose=false`), spelled as
//!   Go's `strconv.ParseBool` does: `1 t T TRUE true True`, `0 f F FALSE false False`.
//! - Unset flags leave config-file values alone; see `apply_overrides`.

use clap::{Parser, ValueHint};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::types::Config;

/// Long flags that may be spelled with a single dash.
const LONG_FLAGS: &[&str] = &[
    "verbose",
    "input",
    "output",
    "log-file",
    "json",
    "print-config",
    "help",
    "version",
];

/// Long flags whose value may follow as a separate argument.
const VALUE_FLAGS: &[&str] = &["input", "output", "log-file"];

/// Command-line launcher for the blockchain incubator application.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "blockchainincubator",
    version,
    about = "Run the blockchain incubator application over an input and output path"
)]
pub struct Args {
    /// Enable verbose logging.
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = parse_go_bool,
        help = "Enable verbose logging"
    )]
    pub verbose: Option<bool>,

    /// Input file path; empty or `-` reads stdin.
    #[arg(long, value_name = "PATH", allow_hyphen_values = true, value_hint = ValueHint::FilePath, help = "Input file path")]
    pub input: Option<String>,

    /// Output file path; empty or `-` writes stdout.
    #[arg(long, value_name = "PATH", allow_hyphen_values = true, value_hint = ValueHint::FilePath, help = "Output file path")]
    pub output: Option<String>,

    /// Also append log lines to this file.
    #[arg(long, value_name = "PATH", allow_hyphen_values = true, value_hint = ValueHint::FilePath, help = "Also write logs to this file")]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where the config file is looked up, then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,
}

impl Args {
    /// Parse from an argument list that may use Go-style single-dash long flags.
    pub fn try_parse_go_style<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_go_flags(args))
    }

    /// Effective verbosity from flags alone (default false).
    #[inline]
    pub fn verbose_flag(&self) -> bool {
        self.verbose.unwrap_or(false)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(v) = self.verbose {
            cfg.verbose = v;
        }
        if let Some(input) = &self.input {
            cfg.input = input.clone();
        }
        if let Some(output) = &self.output {
            cfg.output = output.clone();
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if self.json {
            cfg.json = true;
        }
    }

    /// Build the launcher config: file values (if any) overlaid with flags.
    pub fn to_config(&self, base: Option<Config>) -> Config {
        let mut cfg = base.unwrap_or_default();
        self.apply_overrides(&mut cfg);
        cfg
    }
}

/// Boolean spellings accepted by Go's `strconv.ParseBool`.
pub fn parse_go_bool(s: &str) -> Result<bool, String> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        other => Err(format!("invalid boolean value '{other}'")),
    }
}

/// Rewrite `-name[=value]` to `--name[=value]` for known long flags.
///
/// The program name is left alone, a separate value after `-input`/`-output`
/// is never rewritten, and everything after a bare `--` passes through.
pub fn normalize_go_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut iter = args.into_iter().map(Into::into);
    if let Some(prog) = iter.next() {
        out.push(prog);
    }

    let mut expect_value = false;
    let mut terminated = false;
    for arg in iter {
        if terminated || expect_value {
            expect_value = false;
            out.push(arg);
            continue;
        }
        let Some(s) = arg.to_str() else {
            out.push(arg);
            continue;
        };
        if s == "--" {
            terminated = true;
            out.push(arg);
            continue;
        }

        let body = if let Some(rest) = s.strip_prefix("--") {
            Some(rest)
        } else if let Some(rest) = s.strip_prefix('-') {
            Some(rest)
        } else {
            None
        };
        let Some(body) = body else {
            out.push(arg);
            continue;
        };
        let (name, has_value) = match body.split_once('=') {
            Some((n, _)) => (n, true),
            None => (body, false),
        };
        if !LONG_FLAGS.contains(&name) {
            out.push(arg);
            continue;
        }
        if VALUE_FLAGS.contains(&name) && !has_value {
            expect_value = true;
        }
        out.push(OsString::from(format!("--{body}")));
    }
    out
}

/// Parse the process arguments, exiting with clap's usage error on failure.
pub fn parse() -> Args {
    Args::try_parse_go_style(std::env::args_os()).unwrap_or_else(|e| e.exit())
}
