//! Model state and constructors for the progress component.

use super::types::{with_window_width, Attributes, ProgressOption};
use crate::easing::Easing;
use crate::fade::Fade;
use crate::scheduler::Scheduler;
use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

// Internal ID management for progress instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Upper bound of the progress scale.
pub const MAX_PROGRESS: i32 = 100;
pub(crate) const FPS: u32 = 60;
pub(crate) const FRAME_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / FPS as u64);
pub(crate) const DEFAULT_COLOR: &str = "#FF0000";
pub(crate) const DEFAULT_DURATION: Duration = Duration::from_millis(500);
pub(crate) const MIN_DURATION: Duration = Duration::from_millis(1);

/// An animated progress bar.
///
/// The bar holds a logical progress value in `0..=100` and a rendered width
/// in cells that chases `layout_width * progress / 100` through queued,
/// eased animations. It fades out once it settles at 100 and fades back in
/// when progress moves again.
///
/// ```rust
/// use animated_progress::progress::new;
///
/// let mut bar = new(&[]);
/// bar.set_layout_width(40);
/// let _cmd = bar.set_progress(150);
/// assert_eq!(bar.progress(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    /// Keeps us from handling frames meant for other bars.
    pub(crate) id: i64,
    /// Identifies the current frame loop; frames from older loops are dropped.
    pub(crate) tag: i64,

    pub(crate) progress: i32,
    pub(crate) rendered_width: i32,
    pub(crate) layout_width: i32,
    pub(crate) laid_out: bool,
    /// A request made before the first layout pass.
    pub(crate) pending: Option<i32>,
    /// Snap the rendered width on the next layout pass (after restore).
    pub(crate) resync_on_layout: bool,
    /// The layout changed under a running job; snap once the queue drains.
    pub(crate) resync_on_drain: bool,
    pub(crate) follow_window_width: bool,

    pub(crate) bidirectional_animate: bool,
    pub(crate) progress_color: String,
    pub(crate) background_color: String,
    pub(crate) fill_char: char,
    pub(crate) height: i32,

    pub(crate) scheduler: Scheduler,
    pub(crate) fade: Fade,
}

/// Creates a progress bar at 0% with the given options applied in order.
///
/// Defaults: red fill, 500 ms animations with the [`Easing::EASE`] curve,
/// forward-only animation, one row tall, fully opaque, not yet laid out.
///
/// The bar does nothing visible until it learns its width, either from
/// [`Model::set_layout_width`] or, with [`with_window_width`], from the
/// terminal's `WindowSizeMsg`.
///
/// # Arguments
///
/// * `opts` - Configuration options, applied in order; later options win.
///
/// # Examples
///
/// ```rust
/// use animated_progress::progress::{new, with_bidirectional_animate, with_height};
/// use std::time::Duration;
///
/// let bar = new(&[with_height(2), with_bidirectional_animate(true)]);
/// assert_eq!(bar.progress(), 0);
/// assert_eq!(bar.layout_width(), 0);
/// assert!(bar.bidirectional_animate());
/// assert_eq!(bar.duration(), Duration::from_millis(500));
/// ```
pub fn new(opts: &[ProgressOption]) -> Model {
    let mut m = Model {
        id: next_id(),
        tag: 0,
        progress: 0,
        rendered_width: 0,
        layout_width: 0,
        laid_out: false,
        pending: None,
        resync_on_layout: false,
        resync_on_drain: false,
        follow_window_width: false,
        bidirectional_animate: false,
        progress_color: DEFAULT_COLOR.to_string(),
        background_color: "#000000".to_string(),
        fill_char: '█',
        height: 1,
        scheduler: Scheduler::new(DEFAULT_DURATION, Easing::EASE),
        fade: Fade::default(),
    };

    for opt in opts {
        opt.apply(&mut m);
    }

    m
}

/// Creates a progress bar from host styling attributes, then applies `opts`.
///
/// Attribute values are applied first, so explicit options override them.
///
/// # Examples
///
/// ```rust
/// use animated_progress::progress::{from_attributes, with_progress_color, Attributes};
///
/// let attrs = Attributes::from_json(r##"{"progressColor": "#00FF00"}"##).unwrap();
/// let bar = from_attributes(&attrs, &[]);
/// assert_eq!(bar.progress_color(), "#00FF00");
///
/// let bar = from_attributes(&attrs, &[with_progress_color("#0000FF")]);
/// assert_eq!(bar.progress_color(), "#0000FF");
/// ```
pub fn from_attributes(attrs: &Attributes, opts: &[ProgressOption]) -> Model {
    let mut all = attrs.options();
    all.extend_from_slice(opts);
    new(&all)
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        // A standalone bar has no parent layout, so it sizes itself from the window.
        (new(&[with_window_width()]), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

