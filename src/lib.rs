#![warn(missing_docs)]

//! # animated-progress
//!
//! An animated progress bar component for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications.
//!
//! ## Overview
//!
//! The bar keeps a logical progress value between 0 and 100 and animates
//! its painted width towards it instead of jumping. The interesting part is
//! the state machine behind that:
//!
//! - **Progress state**: values are clamped to `0..=100`; requests made
//!   before the bar knows its width are parked and replayed after layout.
//! - **Animation scheduling**: each change becomes a width animation job.
//!   One job runs at a time, the rest wait in FIFO order.
//! - **Fades**: the bar fades out after settling at 100% and fades back in
//!   when progress moves again.
//! - **Persistence**: the committed value survives a save/restore cycle of
//!   the host's view state.
//!
//! ## Quick Start
//!
//! ```rust
//! use animated_progress::prelude::*;
//! use std::time::Duration;
//!
//! let mut bar = progress_new(&[with_bidirectional_animate(true)]);
//! bar.set_layout_width(20);
//! let _cmd = bar.set_progress(75);
//!
//! bar.advance(bar.duration());
//! assert_eq!(bar.rendered_width(), 15);
//! println!("{}", bar.view());
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`progress`] | The bar component |
//! | [`scheduler`] | FIFO width animation queue |
//! | [`fade`] | Opacity transitions |
//! | [`easing`] | Animation curves |
//! | [`canvas`] | Drawing surface seam and terminal renderer |
//! | [`persist`] | Saved view-state format |

pub mod canvas;
pub mod easing;
pub mod error;
pub mod fade;
pub mod persist;
pub mod progress;
pub mod scheduler;

pub use canvas::{Canvas, FillStyle, Rect, TerminalCanvas};
pub use easing::Easing;
pub use error::{Error, Result};
pub use fade::{Fade, FadeDirection, FADE_DURATION};
pub use persist::{PersistedState, STATE_VERSION};
pub use progress::{
    from_attributes as progress_from_attributes, new as progress_new, Attributes,
    FrameMsg as ProgressFrameMsg, Model as Progress, ProgressOption,
};
pub use scheduler::{PendingAnimation, QueuePolicy, Scheduler};

/// Prelude module for convenient imports.
///
/// ```rust
/// use animated_progress::prelude::*;
///
/// let bar: Progress = progress_new(&[with_progress_color("#00ff00")]);
/// assert_eq!(bar.progress_color(), "#00ff00");
/// ```
pub mod prelude {
    pub use crate::canvas::{Canvas, FillStyle, Rect};
    pub use crate::easing::Easing;
    pub use crate::persist::PersistedState;
    pub use crate::progress::{
        from_attributes as progress_from_attributes, new as progress_new,
        with_background_color, with_bidirectional_animate, with_duration, with_easing,
        with_fill_character, with_height, with_progress_color, with_queue_policy,
        with_window_width, Attributes, Model as Progress, ProgressOption,
    };
    pub use crate::scheduler::QueuePolicy;
}
