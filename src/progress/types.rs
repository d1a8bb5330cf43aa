//! Configuration and message types for the progress component.

use super::model::{Model, DEFAULT_COLOR, DEFAULT_DURATION};
use crate::easing::Easing;
use crate::error::Result;
use crate::scheduler::QueuePolicy;
use bubbletea_rs::Msg;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Message that advances the bar by one animation frame.
///
/// Frames are produced by the commands returned from
/// [`Model::set_progress`](super::Model::set_progress) and
/// [`Model::update`](super::Model::update). Each carries the id of the bar
/// that scheduled it and the tag of the frame loop it belongs to, so a bar
/// ignores frames meant for other bars and frames from superseded loops.
#[derive(Debug, Clone)]
pub struct FrameMsg {
    pub(crate) id: i64,
    pub(crate) tag: i64,
}

impl From<FrameMsg> for Msg {
    fn from(msg: FrameMsg) -> Self {
        Box::new(msg) as Msg
    }
}

/// Configuration options for [`new`](super::new).
///
/// ```rust
/// use animated_progress::progress::{new, with_bidirectional_animate, with_progress_color};
///
/// let bar = new(&[
///     with_progress_color("#2ecc71"),
///     with_bidirectional_animate(true),
/// ]);
/// assert!(bar.bidirectional_animate());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressOption {
    /// Colour of the filled portion (hex or named colour).
    WithProgressColor(String),
    /// Animate backwards on decrease instead of refilling from zero.
    WithBidirectionalAnimate(bool),
    /// Duration of each width animation.
    WithDuration(Duration),
    /// Number of terminal rows the bar occupies.
    WithHeight(i32),
    /// Glyph used for filled cells.
    WithFillCharacter(char),
    /// Colour that partial opacity blends towards.
    WithBackgroundColor(String),
    /// Curve used for width animations.
    WithEasing(Easing),
    /// What to do with queued jobs superseded by newer requests.
    WithQueuePolicy(QueuePolicy),
    /// Take the layout width from `WindowSizeMsg`.
    WithWindowWidth,
}

impl ProgressOption {
    pub(crate) fn apply(&self, m: &mut Model) {
        match self {
            ProgressOption::WithProgressColor(color) => m.progress_color = color.clone(),
            ProgressOption::WithBidirectionalAnimate(on) => m.bidirectional_animate = *on,
            ProgressOption::WithDuration(duration) => m.set_duration(*duration),
            ProgressOption::WithHeight(height) => m.height = (*height).max(1),
            ProgressOption::WithFillCharacter(ch) => m.fill_char = *ch,
            ProgressOption::WithBackgroundColor(color) => m.background_color = color.clone(),
            ProgressOption::WithEasing(easing) => m.scheduler.set_easing(*easing),
            ProgressOption::WithQueuePolicy(policy) => m.scheduler.set_policy(*policy),
            ProgressOption::WithWindowWidth => m.follow_window_width = true,
        }
    }
}

/// Sets the colour of the filled portion.
pub fn with_progress_color(color: impl Into<String>) -> ProgressOption {
    ProgressOption::WithProgressColor(color.into())
}

/// Chooses whether a decrease animates backwards (`true`) or refills from
/// zero (`false`, the default).
pub fn with_bidirectional_animate(on: bool) -> ProgressOption {
    ProgressOption::WithBidirectionalAnimate(on)
}

/// Sets the width animation duration. Zero is raised to one millisecond.
pub fn with_duration(duration: Duration) -> ProgressOption {
    ProgressOption::WithDuration(duration)
}

/// Sets the number of rows the bar fills. Values below 1 become 1.
pub fn with_height(rows: i32) -> ProgressOption {
    ProgressOption::WithHeight(rows)
}

/// Sets the glyph for filled cells (default `█`).
pub fn with_fill_character(ch: char) -> ProgressOption {
    ProgressOption::WithFillCharacter(ch)
}

/// Sets the colour partial opacity blends towards (default black).
pub fn with_background_color(color: impl Into<String>) -> ProgressOption {
    ProgressOption::WithBackgroundColor(color.into())
}

/// Replaces the width animation curve.
pub fn with_easing(easing: Easing) -> ProgressOption {
    ProgressOption::WithEasing(easing)
}

/// Sets the policy for queued jobs that newer requests supersede.
pub fn with_queue_policy(policy: QueuePolicy) -> ProgressOption {
    ProgressOption::WithQueuePolicy(policy)
}

/// Lets `WindowSizeMsg` drive the layout width.
pub fn with_window_width() -> ProgressOption {
    ProgressOption::WithWindowWidth
}

/// Styling attributes supplied by the host at construction.
///
/// Missing keys fall back to the defaults, so `{}` is a valid attribute set.
///
/// ```rust
/// use animated_progress::progress::Attributes;
///
/// let attrs = Attributes::from_json(r##"{ "progressColor": "#00ff00", "animationDuration": 250 }"##).unwrap();
/// assert_eq!(attrs.progress_color, "#00ff00");
/// assert!(!attrs.bidirectional_animate);
/// assert_eq!(attrs.animation_duration_ms, 250);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Attributes {
    /// Colour of the filled portion.
    pub progress_color: String,
    /// See [`with_bidirectional_animate`].
    pub bidirectional_animate: bool,
    /// Width animation duration in milliseconds.
    #[serde(rename = "animationDuration")]
    pub animation_duration_ms: u64,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            progress_color: DEFAULT_COLOR.to_string(),
            bidirectional_animate: false,
            animation_duration_ms: DEFAULT_DURATION.as_millis() as u64,
        }
    }
}

impl Attributes {
    /// Parses attributes from JSON.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// The equivalent option list.
    pub fn options(&self) -> Vec<ProgressOption> {
        vec![
            with_progress_color(self.progress_color.clone()),
            with_bidirectional_animate(self.bidirectional_animate),
            with_duration(Duration::from_millis(self.animation_duration_ms)),
        ]
    }
}
