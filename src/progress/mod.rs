//! Animated progress bar component for Bubble Tea applications.
//!
//! Instead of snapping to a new value, the bar animates its filled width
//! along an eased curve. Overlapping updates queue up and play one after
//! another. The bar fades out once it settles at 100% and fades back in as
//! soon as progress moves again.
//!
//! # Basic Usage
//!
//! ```rust
//! use animated_progress::progress::{new, with_duration, with_progress_color};
//! use std::time::Duration;
//!
//! let mut bar = new(&[
//!     with_progress_color("#7571F9"),
//!     with_duration(Duration::from_millis(300)),
//! ]);
//!
//! // Requests made before layout are replayed once the width is known.
//! assert!(bar.set_progress(50).is_none());
//! let cmd = bar.set_layout_width(80);
//! assert!(cmd.is_some());
//!
//! // Drive the animation with your own clock...
//! bar.advance(Duration::from_millis(300));
//! assert_eq!(bar.rendered_width(), 40);
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use animated_progress::progress;
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//!
//! struct App {
//!     bar: progress::Model,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let bar = progress::new(&[progress::with_window_width()]);
//!         (Self { bar }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         // Frame and resize messages go to the bar.
//!         self.bar.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.bar.view()
//!     }
//! }
//! ```

pub mod methods;
pub mod model;
pub mod types;
pub mod view;


pub use model::{from_attributes, new, Model, MAX_PROGRESS};
pub use types::{
    with_background_color, with_bidirectional_animate, with_duration, with_easing,
    with_fill_character, with_height, with_progress_color, with_queue_policy, with_window_width,
    Attributes, FrameMsg, ProgressOption,
};
