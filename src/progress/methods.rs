//! State transitions for the progress component.

use super::model::{Model, FRAME_INTERVAL, MAX_PROGRESS, MIN_DURATION};
use super::types::FrameMsg;
use crate::easing::Easing;
use crate::persist::PersistedState;
use crate::scheduler::{PendingAnimation, QueuePolicy, Submission};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, trace, warn};

impl Model {
    /// Committed progress in `0..=100`.
    pub fn progress(&self) -> i32 {
        self.progress
    }

    /// Cells currently painted.
    pub fn rendered_width(&self) -> i32 {
        self.rendered_width
    }

    /// Horizontal extent reported by the host layout.
    pub fn layout_width(&self) -> i32 {
        self.layout_width
    }

    /// Current opacity in `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        self.fade.opacity()
    }

    /// A request waiting for the first layout pass.
    pub fn pending_progress(&self) -> Option<i32> {
        self.pending
    }

    /// The width animation currently running.
    pub fn live_animation(&self) -> Option<PendingAnimation> {
        self.scheduler.live().copied()
    }

    /// Width animations waiting behind the live one, oldest first.
    pub fn queued_animations(&self) -> Vec<PendingAnimation> {
        self.scheduler.queued().copied().collect()
    }

    /// True while a width animation or a fade is in flight.
    pub fn is_animating(&self) -> bool {
        !self.scheduler.is_idle() || self.fade.is_fading()
    }

    /// Duration of width animations.
    pub fn duration(&self) -> Duration {
        self.scheduler.duration()
    }

    /// Sets the duration of width animations that have not started yet.
    ///
    /// The running job keeps the duration it started with. Zero is raised to
    /// one millisecond.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use animated_progress::progress::new;
    /// use std::time::Duration;
    ///
    /// let mut bar = new(&[]);
    /// bar.set_duration(Duration::from_millis(120));
    /// assert_eq!(bar.duration(), Duration::from_millis(120));
    ///
    /// bar.set_duration(Duration::ZERO);
    /// assert_eq!(bar.duration(), Duration::from_millis(1));
    /// ```
    pub fn set_duration(&mut self, duration: Duration) {
        self.scheduler.set_duration(duration.max(MIN_DURATION));
    }

    /// Whether decreases animate backwards.
    pub fn bidirectional_animate(&self) -> bool {
        self.bidirectional_animate
    }

    /// Chooses whether decreases animate backwards (`true`) or refill from
    /// zero (`false`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use animated_progress::progress::new;
    ///
    /// let mut bar = new(&[]);
    /// bar.set_layout_width(10);
    /// let _ = bar.set_progress(80);
    /// bar.advance(bar.duration());
    ///
    /// // Forward-only: a decrease empties the bar and fills up to the new value.
    /// let _ = bar.set_progress(30);
    /// assert_eq!(bar.rendered_width(), 0);
    ///
    /// bar.set_bidirectional_animate(true);
    /// bar.advance(bar.duration());
    /// let _ = bar.set_progress(10);
    /// assert_eq!(bar.rendered_width(), 3);
    /// ```
    pub fn set_bidirectional_animate(&mut self, on: bool) {
        self.bidirectional_animate = on;
    }

    /// Colour of the filled portion.
    pub fn progress_color(&self) -> &str {
        &self.progress_color
    }

    /// Changes the fill colour. Takes effect on the next `view()`; nothing
    /// is animated.
    ///
    /// ```rust
    /// use animated_progress::progress::new;
    ///
    /// let mut bar = new(&[]);
    /// bar.set_progress_color("#7571F9");
    /// assert_eq!(bar.progress_color(), "#7571F9");
    /// ```
    pub fn set_progress_color(&mut self, color: impl Into<String>) {
        self.progress_color = color.into();
    }

    /// Replaces the width animation curve.
    pub fn set_easing(&mut self, easing: Easing) {
        self.scheduler.set_easing(easing);
    }

    /// Sets the policy for queued jobs that newer requests supersede.
    pub fn set_queue_policy(&mut self, policy: QueuePolicy) {
        self.scheduler.set_policy(policy);
    }

    /// Requests a new progress value.
    ///
    /// Out-of-range values are clamped. Before the first layout pass the
    /// request is parked and replayed by [`set_layout_width`](Self::set_layout_width).
    /// Otherwise the bar fades in if it is not fully opaque, and a width
    /// animation towards `layout_width * progress / 100` is started or
    /// queued behind the running one.
    ///
    /// Reaching 100 fades the bar out once the width animation lands;
    /// requesting 100 again while already there fades out right away.
    ///
    /// Returns the command that drives the animation frames, or `None` when
    /// nothing needs animating.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use animated_progress::progress::new;
    ///
    /// let mut bar = new(&[]);
    /// bar.set_layout_width(50);
    ///
    /// assert!(bar.set_progress(120).is_some());
    /// assert_eq!(bar.progress(), 100);
    /// assert_eq!(bar.live_animation().map(|job| job.end_width()), Some(50));
    ///
    /// // A second request waits behind the running job.
    /// let _ = bar.set_progress(40);
    /// assert_eq!(bar.queued_animations().len(), 1);
    /// ```
    pub fn set_progress(&mut self, value: i32) -> Option<Cmd> {
        let progress = value.clamp(0, MAX_PROGRESS);

        if self.layout_width == 0 && !self.laid_out {
            debug!(id = self.id, progress, "not laid out yet, deferring progress");
            self.pending = Some(progress);
            return None;
        }

        let mut animate = false;
        if self.fade.opacity() < 1.0 {
            self.fade_in();
            animate = true;
        }

        let target = self.target_width(progress);
        if progress < self.progress && !self.bidirectional_animate {
            self.rendered_width = 0;
        } else if progress == self.progress && progress == MAX_PROGRESS {
            self.fade_out();
            animate = true;
        }

        self.progress = progress;

        let delta = target - self.rendered_width;
        if delta != 0 {
            let job = PendingAnimation::new(self.rendered_width, delta, target);
            match self.scheduler.submit(job) {
                Submission::Started => debug!(id = self.id, ?job, "width animation started"),
                Submission::Queued => debug!(
                    id = self.id,
                    ?job,
                    queued = self.scheduler.queued_len(),
                    "width animation queued"
                ),
            }
            animate = true;
        }

        animate.then(|| self.start_frames())
    }

    /// Reports the horizontal extent from the host layout.
    ///
    /// The first pass with a positive width replays any request made before
    /// layout. A later width change re-syncs the rendered width to the
    /// committed progress: at once when no width animation is pending,
    /// otherwise as soon as the queue drains.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use animated_progress::progress::new;
    ///
    /// let mut bar = new(&[]);
    /// assert!(bar.set_progress(50).is_none());
    /// assert_eq!(bar.pending_progress(), Some(50));
    ///
    /// assert!(bar.set_layout_width(30).is_some());
    /// assert_eq!(bar.pending_progress(), None);
    /// bar.advance(bar.duration());
    /// assert_eq!(bar.rendered_width(), 15);
    ///
    /// bar.set_layout_width(60);
    /// assert_eq!(bar.rendered_width(), 30);
    /// ```
    pub fn set_layout_width(&mut self, width: i32) -> Option<Cmd> {
        let width = width.max(0);
        let changed = width != self.layout_width;
        self.layout_width = width;
        if width == 0 {
            return None;
        }

        let first_pass = !self.laid_out;
        self.laid_out = true;

        let resized = changed && !first_pass;
        if self.resync_on_layout || (resized && self.scheduler.is_idle()) {
            self.resync_on_layout = false;
            self.resync_on_drain = false;
            self.resync_width();
        } else if resized {
            debug!(id = self.id, layout_width = width, "layout changed mid-animation");
            self.resync_on_drain = true;
        }

        if let Some(progress) = self.pending.take() {
            debug!(id = self.id, progress, layout_width = width, "replaying deferred progress");
            return self.set_progress(progress);
        }
        None
    }

    /// Advances every running animation by `dt`.
    ///
    /// This is the single tick entry point: the width animation and the
    /// fade both move here. Returns true when something visible changed.
    ///
    /// [`update`](Self::update) calls this with one 60 FPS frame interval per
    /// frame message. Hosts with their own clock can call it directly.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use animated_progress::easing::Easing;
    /// use animated_progress::progress::{new, with_duration, with_easing};
    /// use std::time::Duration;
    ///
    /// let mut bar = new(&[
    ///     with_easing(Easing::Linear),
    ///     with_duration(Duration::from_millis(100)),
    /// ]);
    /// bar.set_layout_width(100);
    /// let _ = bar.set_progress(60);
    ///
    /// assert!(bar.advance(Duration::from_millis(50)));
    /// assert_eq!(bar.rendered_width(), 30);
    /// bar.advance(Duration::from_millis(50));
    /// assert_eq!(bar.rendered_width(), 60);
    /// assert!(!bar.is_animating());
    /// ```
    pub fn advance(&mut self, dt: Duration) -> bool {
        let mut redraw = self.fade.advance(dt);

        let frame = self.scheduler.advance(dt);
        if let Some(width) = frame.width {
            if width != self.rendered_width {
                trace!(id = self.id, width, "rendered width");
                self.rendered_width = width;
                redraw = true;
            }
        }

        if let Some(done) = frame.completed {
            debug!(id = self.id, ?done, "width animation complete");
            if self.progress >= MAX_PROGRESS {
                self.fade_out();
            }
            if let Some(next) = frame.started {
                debug!(id = self.id, job = ?next, "starting queued width animation");
            } else if self.resync_on_drain && self.scheduler.is_idle() {
                self.resync_on_drain = false;
                let before = self.rendered_width;
                self.resync_width();
                redraw |= before != self.rendered_width;
            }
        }

        redraw
    }

    /// Handles frame messages and, with `with_window_width()`, window resizes.
    ///
    /// A [`FrameMsg`] is only accepted when both its id and its tag match
    /// this bar's current frame loop. Each accepted frame advances the
    /// animations by one frame interval and schedules the next frame; once
    /// nothing is animating the loop ends by returning `None`.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(frame) = msg.downcast_ref::<FrameMsg>() {
            if frame.id != self.id || frame.tag != self.tag {
                return None;
            }
            if !self.is_animating() {
                return None;
            }

            self.advance(FRAME_INTERVAL);
            return Some(self.next_frame());
        }

        if self.follow_window_width {
            if let Some(size) = msg.downcast_ref::<bubbletea_rs::WindowSizeMsg>() {
                return self.set_layout_width(size.width as i32);
            }
        }

        None
    }

    /// Captures the committed progress alongside the host's own state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use animated_progress::progress::new;
    /// use serde_json::json;
    ///
    /// let mut bar = new(&[]);
    /// bar.set_layout_width(10);
    /// let _ = bar.set_progress(70);
    ///
    /// let snapshot = bar.save(Some(json!({ "tab": 2 }))).to_value().unwrap();
    /// assert_eq!(snapshot["progressState"], json!(70));
    ///
    /// let mut restored = new(&[]);
    /// assert_eq!(restored.restore(snapshot), Some(json!({ "tab": 2 })));
    /// assert_eq!(restored.progress(), 70);
    /// ```
    pub fn save(&self, instance_state: Option<Value>) -> PersistedState {
        PersistedState::new(self.progress, instance_state)
    }

    /// Restores from a snapshot produced by [`save`](Self::save).
    ///
    /// A well-formed snapshot sets progress directly, without clamping or
    /// animation, and yields the host's state back. Anything else is handed
    /// back unmodified and progress is left alone. A snapshot is usable only
    /// when it is a JSON object with a known version and a `progressState`
    /// in `0..=100`.
    pub fn restore(&mut self, snapshot: Value) -> Option<Value> {
        match PersistedState::from_value(snapshot.clone()) {
            Ok(state) => self.restore_state(state),
            Err(err) => {
                warn!(id = self.id, error = %err, "ignoring unusable progress snapshot");
                Some(snapshot)
            }
        }
    }

    /// Restores from an already validated snapshot and returns the host's
    /// state.
    pub fn restore_state(&mut self, state: PersistedState) -> Option<Value> {
        let progress = state.progress().clamp(0, MAX_PROGRESS);
        debug!(id = self.id, progress, "progress restored");
        self.progress = progress;
        if self.laid_out && self.layout_width > 0 {
            self.rendered_width = self.target_width(self.progress);
        } else {
            self.resync_on_layout = true;
        }
        state.into_instance_state()
    }

    fn fade_in(&mut self) {
        debug!(id = self.id, opacity = self.fade.opacity(), "fade in");
        self.fade.fade_in();
    }

    fn fade_out(&mut self) {
        debug!(id = self.id, opacity = self.fade.opacity(), "fade out");
        self.fade.fade_out();
    }

    fn resync_width(&mut self) {
        self.rendered_width = self.target_width(self.progress);
        trace!(id = self.id, width = self.rendered_width, "rendered width re-synced");
    }

    pub(crate) fn target_width(&self, progress: i32) -> i32 {
        let width = i64::from(self.layout_width) * i64::from(progress) / i64::from(MAX_PROGRESS);
        width as i32
    }

    /// Starts a new frame loop, orphaning any loop already in flight.
    fn start_frames(&mut self) -> Cmd {
        self.tag += 1;
        self.next_frame()
    }

    fn next_frame(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(FRAME_INTERVAL, move |_| Box::new(FrameMsg { id, tag }) as Msg)
    }
}
