//! Windowless run: step, paint, export, with a progress bar

use indicatif::{ProgressBar, ProgressStyle};

use crate::render::recorder::FrameRecorder;
use crate::simulation::scenario::{HaltReason, Scenario};

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64, // frames stepped during this run
    pub exported: usize, // images written during this run
    pub halted: Option<HaltReason>,
}

/// Step up to `frames` frames, recording each one
pub fn run_headless(scenario: &mut Scenario, recorder: &mut FrameRecorder, frames: u64) -> RunSummary {
    let start_frame = scenario.system.frame;
    let start_exports = recorder.exported.len();

    let bar = ProgressBar::new(frames);
    if let Ok(style) = ProgressStyle::default_bar().template("{bar:40} {pos}/{len} frames [{elapsed_precise}]") {
        bar.set_style(style);
    }

    for _ in 0..frames {
        if !scenario.advance() {
            break;
        }
        recorder.record(&scenario.snapshot());
        bar.inc(1);
    }
    bar.finish_and_clear();

    let summary = RunSummary {
        frames: scenario.system.frame - start_frame,
        exported: recorder.exported.len() - start_exports,
        halted: scenario.halted,
    };
    log::info!(
        "headless run finished: {} frames, {} images, designated distance {:.3}",
        summary.frames,
        summary.exported,
        scenario.system.designated_distance()
    );
    summary
}
