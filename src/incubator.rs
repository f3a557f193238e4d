//! The application driven by the launcher.
//!
//! `App::run(input, output)` streams the input to the output:
//! - empty or `-` input reads stdin, anything else must be a regular file
//! - empty or `-` output writes stdout, anything else is replaced atomically
//!   through a temp sibling, so a failed run never leaves a truncated file
//!
//! Verbose apps report their transfers at INFO instead of DEBUG.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::errors::IncubatorError;
use crate::fs_ops::{BUF_SIZE, copy_stream, write_via_temp};
use crate::launcher::Runner;
use crate::shutdown;

/// Where a run reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

/// Where a run writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    Stdout,
    File(PathBuf),
}

fn is_stdio(s: &str) -> bool {
    s.is_empty() || s == "-"
}

impl Source {
    pub fn from_arg(input: &str) -> Self {
        if is_stdio(input) {
            Source::Stdin
        } else {
            Source::File(PathBuf::from(input))
        }
    }

    /// Check that a file source exists and is a regular file.
    ///
    /// Only a missing path is `InputNotFound`; other stat failures (permissions,
    /// I/O) keep their own cause.
    pub fn validate(&self) -> Result<()> {
        let Source::File(path) = self else {
            return Ok(());
        };
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => Ok(()),
            Ok(_) => Err(IncubatorError::InputNotFile(path.clone()).into()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(IncubatorError::InputNotFound(path.clone()).into())
            }
            Err(e) => Err(e).with_context(|| format!("inspect input '{}'", path.display())),
        }
    }
}

impl Sink {
    pub fn from_arg(output: &str) -> Self {
        if is_stdio(output) {
            Sink::Stdout
        } else {
            Sink::File(PathBuf::from(output))
        }
    }

    /// Check that a file sink is not a directory and its parent exists.
    pub fn validate(&self) -> Result<(), IncubatorError> {
        let Sink::File(path) = self else {
            return Ok(());
        };
        if path.is_dir() {
            return Err(IncubatorError::OutputIsDirectory(path.clone()));
        }
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                Err(IncubatorError::OutputParentMissing(parent.to_path_buf()))
            }
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Stdin => f.write_str("<stdin>"),
            Source::File(p) => write!(f, "{}", p.display()),
        }
    }
}

impl std::fmt::Display for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sink::Stdout => f.write_str("<stdout>"),
            Sink::File(p) => write!(f, "{}", p.display()),
        }
    }
}

/// What a completed run moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferSummary {
    pub bytes: u64,
    pub elapsed: Duration,
}

/// The incubator application.
#[derive(Debug, Clone, Copy, Default)]
pub struct App {
    verbose: bool,
}

impl App {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Run over the given input and output path strings.
    pub fn run(&self, input: &str, output: &str) -> Result<()> {
        self.transfer(&Source::from_arg(input), &Sink::from_arg(output))
            .map(|_| ())
    }

    /// Stream `source` into `sink` and report what was moved.
    pub fn transfer(&self, source: &Source, sink: &Sink) -> Result<TransferSummary> {
        source.validate()?;
        sink.validate()?;
        debug!(source = %source, sink = %sink, "Starting transfer");

        let started = Instant::now();
        let mut reader: Box<dyn Read> = match source {
            Source::Stdin => Box::new(io::stdin().lock()),
            Source::File(path) => Box::new(
                File::open(path).with_context(|| format!("open input '{}'", path.display()))?,
            ),
        };

        let copied = match sink {
            Sink::Stdout => {
                let stdout = io::stdout();
                let mut writer = BufWriter::with_capacity(BUF_SIZE, stdout.lock());
                copy_stream(&mut reader, &mut writer, shutdown::is_requested)?
            }
            Sink::File(path) => write_to_file(path, &mut reader)?,
        };

        let summary = TransferSummary {
            bytes: copied.bytes,
            elapsed: started.elapsed(),
        };
        let elapsed_ms = u64::try_from(summary.elapsed.as_millis()).unwrap_or(u64::MAX);
        if self.verbose {
            info!(source = %source, sink = %sink, bytes = summary.bytes, elapsed_ms, "Transfer completed");
        } else {
            debug!(source = %source, sink = %sink, bytes = summary.bytes, elapsed_ms, "Transfer completed");
        }
        Ok(summary)
    }
}

fn write_to_file(path: &Path, reader: &mut dyn Read) -> Result<crate::fs_ops::CopyResult> {
    write_via_temp(path, |file| {
        // copy_stream flushes the buffer; write_via_temp fsyncs the file
        let mut writer = BufWriter::with_capacity(BUF_SIZE, file);
        copy_stream(reader, &mut writer, shutdown::is_requested)
    })
    .with_context(|| format!("write output '{}'", path.display()))
}

impl Runner for App {
    fn run(&self, input: &str, output: &str) -> Result<()> {
        App::run(self, input, output)
    }
}
