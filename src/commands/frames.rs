//! `showreel frames`: play the stage on a simulated clock and print each change.
//!
//! Useful for checking timings without a terminal: every caption frame and
//! carousel change is printed with its timestamp, either as aligned text or
//! as one JSON object per line.

use anyhow::Result;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

use crate::config::Config;
use crate::stage::Stage;
use crate::time::{SimulatedTimeSource, TimeSource};

/// Options parsed from the `frames` command line.
#[derive(Debug, Clone, PartialEq)]
pub struct FramesOptions {
    /// Stop after this many timer firings
    pub ticks: usize,
    pub json: bool,
    /// Playback speed; 0 plays as fast as possible
    pub speed: f64,
}

/// One observable change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum FrameEvent {
    Caption {
        text: String,
    },
    Carousel {
        active_index: usize,
        paused: bool,
        author: String,
    },
    Loading {
        loading: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: FrameEvent,
}

impl FrameRecord {
    /// Aligned single-line text form.
    pub fn to_line(&self) -> String {
        let (source, detail) = match &self.event {
            FrameEvent::Caption { text } => ("caption", format!("\"{text}\"")),
            FrameEvent::Carousel {
                active_index,
                paused,
                author,
            } => (
                "carousel",
                format!(
                    "#{} {author}{}",
                    active_index + 1,
                    if *paused { " (paused)" } else { "" }
                ),
            ),
            FrameEvent::Loading { loading } => (
                "loading",
                if *loading { "shown" } else { "done" }.to_string(),
            ),
        };
        format!("{:>8}ms  {source:<8}  {detail}", self.at_ms)
    }
}

/// Entry point for `showreel frames`.
pub fn run_frames_command(options: &FramesOptions, debug_enabled: bool) -> Result<()> {
    let config = Config::load()?;
    if debug_enabled {
        log_version!();
        config.log_config();
        log_end!();
    }

    let mut stage = Stage::from_config(&config)?;
    let clock = SimulatedTimeSource::new(options.speed);

    // Records print as they are produced so slow playback is watchable
    let mut emit = |record: &FrameRecord| -> Result<()> {
        if options.json {
            println!("{}", serde_json::to_string(record)?);
        } else {
            println!("{}", record.to_line());
        }
        Ok(())
    };

    play(&mut stage, &clock, options.ticks, &mut emit)?;
    stage.teardown();
    Ok(())
}

/// Collect every change over `ticks` timer firings, driving `clock` between deadlines.
pub fn record_frames(
    stage: &mut Stage,
    clock: &dyn TimeSource,
    ticks: usize,
) -> Result<Vec<FrameRecord>> {
    let mut records = Vec::new();
    play(stage, clock, ticks, &mut |record: &FrameRecord| -> Result<()> {
        records.push(record.clone());
        Ok(())
    })?;
    Ok(records)
}

fn play(
    stage: &mut Stage,
    clock: &dyn TimeSource,
    ticks: usize,
    emit: &mut dyn FnMut(&FrameRecord) -> Result<()>,
) -> Result<()> {
    let pending: Rc<RefCell<Vec<FrameEvent>>> = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&pending);
    let caption_id = stage.caption_mut().subscribe(move |text: &str| {
        sink.borrow_mut().push(FrameEvent::Caption {
            text: text.to_string(),
        });
    });

    // Authors are resolved when stamped, the callback only sees the state
    let sink = Rc::clone(&pending);
    let carousel_id = stage.reviews_mut().subscribe(move |state| {
        sink.borrow_mut().push(FrameEvent::Carousel {
            active_index: state.active_index,
            paused: state.paused,
            author: String::new(),
        });
    });

    let sink = Rc::clone(&pending);
    let intro_id = stage.intro_mut().subscribe(move |loading: &bool| {
        sink.borrow_mut().push(FrameEvent::Loading { loading: *loading });
    });

    let start = clock.now();
    stage.start(start);

    let mut initial = vec![
        FrameEvent::Caption {
            text: stage.caption().current_text().to_string(),
        },
        FrameEvent::Carousel {
            active_index: stage.reviews().active_index(),
            paused: stage.reviews().is_paused(),
            author: String::new(),
        },
    ];
    if stage.intro().is_loading() {
        initial.push(FrameEvent::Loading { loading: true });
    }
    let mut result = flush(stage, &mut initial, start, emit);

    let mut fired = 0;
    while result.is_ok() && fired < ticks {
        let Some(deadline) = stage.next_deadline() else {
            break;
        };
        clock.sleep(deadline.saturating_sub(clock.now()));
        let now = clock.now();
        fired += stage.advance_to(now);

        let mut events = std::mem::take(&mut *pending.borrow_mut());
        result = flush(stage, &mut events, now, emit);
    }

    stage.caption_mut().unsubscribe(caption_id);
    stage.reviews_mut().unsubscribe(carousel_id);
    stage.intro_mut().unsubscribe(intro_id);
    result
}

fn flush(
    stage: &Stage,
    events: &mut Vec<FrameEvent>,
    now: std::time::Duration,
    emit: &mut dyn FnMut(&FrameRecord) -> Result<()>,
) -> Result<()> {
    let at_ms = u64::try_from(now.as_millis()).unwrap_or(u64::MAX);
    for mut event in events.drain(..) {
        if let FrameEvent::Carousel {
            active_index,
            author,
            ..
        } = &mut event
            && let Some(review) = stage.reviews().reviews().get(*active_index)
        {
            *author = review.author.clone();
        }
        emit(&FrameRecord { at_ms, event })?;
    }
    Ok(())
}

/// Display help for the frames command.
pub fn display_help() {
    log_version!();
    log_block_start!("frames - Print animation frames on a simulated clock");
    log_block_start!("Usage: showreel frames [OPTIONS]");
    log_block_start!("Options:");
    log_indented!("-n, --ticks <N>        Stop after N timer firings (default 64)");
    log_indented!("-j, --json             One JSON object per line");
    log_indented!("-s, --speed <X>        Play at X times real speed (default 0 = instant)");
    log_block_start!("Examples:");
    log_indented!("# First caption cycle, instantly");
    log_indented!("showreel frames --ticks 120");
    log_pipe!();
    log_indented!("# Watch it at real speed");
    log_indented!("showreel frames --speed 1");
    log_end!();
}
