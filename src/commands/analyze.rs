//! Analyze command handler

use std::io::{self, ErrorKind, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use slotdelta::analysis::{AnalysisError, TrackingMode};
use slotdelta::cli::AnalyzeArgs;
use slotdelta::{Analyzer, Config, Recording};

/// Replay a recording and print per-slot deltas to stdout.
///
/// Ctrl-C at any point, including while the recording is still being
/// loaded, stops the command and exits successfully without further output.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &AnalyzeArgs) -> Result<()> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
        .context("Failed to install Ctrl-C handler")?;

    let config = Config::load()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(args, &config, &mut out, &interrupted)
}

fn run<W: Write>(
    args: &AnalyzeArgs,
    config: &Config,
    out: &mut W,
    interrupted: &AtomicBool,
) -> Result<()> {
    let options = args.to_options(config);

    let recording = Recording::parse(&args.recording)?;
    if interrupted.load(Ordering::SeqCst) {
        debug!("interrupted while loading recording");
        return Ok(());
    }

    let device = recording.device(args.device)?;
    debug!(
        device = device.label(),
        events = device.events.len(),
        "loaded recording"
    );

    let mut analyzer = Analyzer::new(&device.absinfo, &options)?;
    let caps = analyzer.capabilities();
    if caps.forced_single_touch {
        debug!(device = device.label(), "no ABS_MT_SLOT axis, tracking one contact");
    } else if caps.mode == TrackingMode::SingleTouch {
        debug!("single-touch axes requested");
    }

    match analyzer.run(&device.events, out, interrupted) {
        Ok(_) => Ok(()),
        // Output piped into `head` and friends
        Err(AnalysisError::Output(e)) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(e.into()),
    }
}
