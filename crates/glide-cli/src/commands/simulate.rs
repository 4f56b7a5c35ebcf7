use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use glide_core::carousel::NullView;
use glide_core::{CarouselController, CarouselOptions, Clock, ManualClock};

/// Scripted input applied at a point of simulated time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptAction {
    Next,
    Prev,
    GoTo(usize),
    HoverEnter,
    HoverLeave,
    Stop,
    Start,
}

impl fmt::Display for ScriptAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptAction::Next => write!(f, "next"),
            ScriptAction::Prev => write!(f, "prev"),
            ScriptAction::GoTo(i) => write!(f, "goto={}", i),
            ScriptAction::HoverEnter => write!(f, "hover-enter"),
            ScriptAction::HoverLeave => write!(f, "hover-leave"),
            ScriptAction::Stop => write!(f, "stop"),
            ScriptAction::Start => write!(f, "start"),
        }
    }
}

impl FromStr for ScriptAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let action = match s.trim() {
            "next" => ScriptAction::Next,
            "prev" | "previous" => ScriptAction::Prev,
            "hover-enter" | "enter" => ScriptAction::HoverEnter,
            "hover-leave" | "leave" => ScriptAction::HoverLeave,
            "stop" => ScriptAction::Stop,
            "start" => ScriptAction::Start,
            other => {
                let index = other
                    .strip_prefix("goto=")
                    .ok_or_else(|| format!("unknown action '{}'", other))?;
                let index = index
                    .parse()
                    .map_err(|_| format!("invalid slide index '{}'", index))?;
                ScriptAction::GoTo(index)
            }
        };
        Ok(action)
    }
}

/// `MS:ACTION`, e.g. `6000:hover-enter` or `9000:goto=2`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptedEvent {
    pub at_ms: u64,
    pub action: ScriptAction,
}

impl FromStr for ScriptedEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (at, action) = s
            .split_once(':')
            .ok_or_else(|| format!("expected MS:ACTION, got '{}'", s))?;
        let at_ms = at
            .trim()
            .parse()
            .map_err(|_| format!("invalid time '{}'", at))?;
        Ok(Self {
            at_ms,
            action: action.parse()?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SimulateArgs {
    pub slides: usize,
    pub interval_ms: u64,
    pub elapsed_ms: u64,
    /// Host tick period; `None` ticks exactly on each deadline
    pub step_ms: Option<u64>,
    pub autoplay: bool,
    pub pause_on_hover: bool,
    pub events: Vec<ScriptedEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub at_ms: u64,
    pub cause: String,
    pub cursor: usize,
    /// Auto-advance fires handled by this tick
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fires: Option<u64>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub rejected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub slides: usize,
    pub interval_ms: u64,
    pub elapsed_ms: u64,
    pub final_cursor: usize,
    pub timeline: Vec<TimelineEntry>,
}

/// Drive a carousel on a manual clock and record what happened
pub fn simulate(args: &SimulateArgs) -> Result<SimulationReport> {
    let clock = ManualClock::new();
    let origin = clock.now();
    let interval = Duration::from_millis(args.interval_ms);
    let mut carousel = CarouselController::new(
        args.slides,
        NullView,
        Arc::new(clock.clone()),
        CarouselOptions {
            autoplay: args.autoplay,
            interval,
            pause_on_hover: args.pause_on_hover,
        },
    )
    .context("Cannot simulate this carousel")?;

    let mut events = args.events.clone();
    events.sort_by_key(|e| e.at_ms);
    let mut events = events.into_iter().peekable();

    let mut timeline = vec![TimelineEntry {
        at_ms: 0,
        cause: "start".to_string(),
        cursor: carousel.cursor(),
        fires: None,
        rejected: false,
    }];
    let step = args.step_ms.filter(|s| *s > 0);
    let mut now_ms = 0u64;

    loop {
        let next_tick = match step {
            Some(step) => (now_ms / step + 1).saturating_mul(step),
            None => carousel
                .next_deadline()
                .map(|d| millis_since(origin, d))
                .unwrap_or(u64::MAX),
        };
        let next_event = events.peek().map_or(u64::MAX, |e| e.at_ms);
        let at = next_tick.min(next_event);
        if at > args.elapsed_ms {
            break;
        }

        clock.advance(Duration::from_millis(at - now_ms));
        now_ms = at;
        tick(&mut carousel, now_ms, &mut timeline);

        while let Some(event) = events.next_if(|e| e.at_ms == now_ms) {
            apply(&mut carousel, event.action, interval, now_ms, &mut timeline);
        }
    }

    // Final tick so a coarse step still catches up to the end time
    clock.advance(Duration::from_millis(args.elapsed_ms - now_ms));
    tick(&mut carousel, args.elapsed_ms, &mut timeline);

    Ok(SimulationReport {
        slides: args.slides,
        interval_ms: args.interval_ms,
        elapsed_ms: args.elapsed_ms,
        final_cursor: carousel.cursor(),
        timeline,
    })
}

fn tick(carousel: &mut CarouselController<NullView>, at_ms: u64, timeline: &mut Vec<TimelineEntry>) {
    let fires = carousel.on_tick();
    if fires > 0 {
        timeline.push(TimelineEntry {
            at_ms,
            cause: "autoplay".to_string(),
            cursor: carousel.cursor(),
            fires: Some(fires),
            rejected: false,
        });
    }
}

fn apply(
    carousel: &mut CarouselController<NullView>,
    action: ScriptAction,
    interval: Duration,
    at_ms: u64,
    timeline: &mut Vec<TimelineEntry>,
) {
    debug!("Simulated {} at {}ms", action, at_ms);
    let mut rejected = false;
    match action {
        ScriptAction::Next => carousel.on_next_click(),
        ScriptAction::Prev => carousel.on_prev_click(),
        ScriptAction::GoTo(index) => rejected = carousel.on_indicator_click(index).is_err(),
        ScriptAction::HoverEnter => carousel.on_hover_enter(),
        ScriptAction::HoverLeave => carousel.on_hover_leave(),
        ScriptAction::Stop => carousel.stop_autoplay(),
        ScriptAction::Start => carousel.start_autoplay(interval),
    }
    timeline.push(TimelineEntry {
        at_ms,
        cause: action.to_string(),
        cursor: carousel.cursor(),
        fires: None,
        rejected,
    });
}

fn millis_since(origin: Instant, at: Instant) -> u64 {
    u64::try_from(at.saturating_duration_since(origin).as_millis()).unwrap_or(u64::MAX)
}

pub fn run(args: SimulateArgs, json: bool) -> Result<()> {
    let report = simulate(&args)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} slides, every {}ms, {}ms elapsed",
        report.slides, report.interval_ms, report.elapsed_ms
    );
    for entry in &report.timeline {
        let mut line = format!(
            "{:>8}ms  {:<12} slide {}/{}",
            entry.at_ms,
            entry.cause,
            entry.cursor + 1,
            report.slides
        );
        if let Some(fires) = entry.fires.filter(|f| *f > 1) {
            line.push_str(&format!("  ({} fires)", fires));
        }
        if entry.rejected {
            line.push_str("  (rejected)");
        }
        println!("{}", line);
    }
    println!("Final slide: {}/{}", report.final_cursor + 1, report.slides);

    Ok(())
}
