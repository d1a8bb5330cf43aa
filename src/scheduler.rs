//! FIFO scheduling of width animations.
//!
//! The scheduler owns at most one *live* animation plus an ordered queue of
//! [`PendingAnimation`] jobs. Submitting while an animation is live queues
//! the job; when the live animation completes the next job starts. Jobs run
//! in submission order and are never reordered.
//!
//! Time only moves when [`Scheduler::advance`] is called, so the scheduler
//! is equally happy being driven by Bubble Tea frame messages or by a test.
//!
//! ```rust
//! use animated_progress::easing::Easing;
//! use animated_progress::scheduler::{PendingAnimation, Scheduler, Submission};
//! use std::time::Duration;
//!
//! let mut scheduler = Scheduler::new(Duration::from_millis(100), Easing::Linear);
//! assert_eq!(scheduler.submit(PendingAnimation::new(0, 50, 50)), Submission::Started);
//! assert_eq!(scheduler.submit(PendingAnimation::new(50, 50, 100)), Submission::Queued);
//!
//! let frame = scheduler.advance(Duration::from_millis(100));
//! assert_eq!(frame.width, Some(50));
//! assert!(frame.completed.is_some());
//! assert_eq!(frame.started, Some(PendingAnimation::new(50, 50, 100)));
//! ```

use crate::easing::Easing;
use std::collections::VecDeque;
use std::time::Duration;

/// Tolerance used to decide that a live animation reached its end.
pub const COMPLETION_EPSILON: f64 = 1e-5;

/// An immutable description of one width animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAnimation {
    /// Rendered width when the job was created.
    pub start_width: i32,
    /// Signed distance to travel.
    pub delta_width: i32,
    /// Target width; committed widths never pass it.
    pub max_width: i32,
}

impl PendingAnimation {
    /// Creates a job travelling `delta_width` pixels from `start_width`.
    pub fn new(start_width: i32, delta_width: i32, max_width: i32) -> Self {
        Self {
            start_width,
            delta_width,
            max_width,
        }
    }

    /// Width reached when the job completes.
    pub fn end_width(&self) -> i32 {
        self.start_width + self.delta_width
    }

    /// Width at eased progress `eased_t`.
    pub fn width_at(&self, eased_t: f64) -> i32 {
        self.start_width + (f64::from(self.delta_width) * eased_t).round() as i32
    }

    /// Whether `width` lies between the start width and the target.
    ///
    /// Rounding at the tail of the curve must never push the bar past its
    /// target in either direction.
    pub fn accepts(&self, width: i32) -> bool {
        let lo = self.start_width.min(self.max_width);
        let hi = self.start_width.max(self.max_width);
        (lo..=hi).contains(&width)
    }
}

/// What happens to jobs that are still waiting when a newer job arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueuePolicy {
    /// Every queued job plays, even if a later request superseded it.
    #[default]
    Replay,
    /// A new job replaces everything that has not started yet.
    Coalesce,
}

/// Outcome of [`Scheduler::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The job became the live animation.
    Started,
    /// The job is waiting behind the live animation.
    Queued,
}

/// Changes produced by one call to [`Scheduler::advance`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Width to commit, if the live animation produced an acceptable one.
    pub width: Option<i32>,
    /// The job that finished during this frame.
    pub completed: Option<PendingAnimation>,
    /// The job dequeued to replace the completed one.
    pub started: Option<PendingAnimation>,
}

#[derive(Debug, Clone)]
struct LiveAnimation {
    job: PendingAnimation,
    duration: Duration,
    elapsed: Duration,
}

impl LiveAnimation {
    fn new(job: PendingAnimation, duration: Duration) -> Self {
        Self {
            job,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    fn fraction(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

/// Serializes width animations so that exactly one runs at a time.
#[derive(Debug, Clone)]
pub struct Scheduler {
    live: Option<LiveAnimation>,
    queue: VecDeque<PendingAnimation>,
    duration: Duration,
    easing: Easing,
    policy: QueuePolicy,
}

impl Scheduler {
    /// Creates an idle scheduler. Jobs started later run for `duration`.
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            live: None,
            queue: VecDeque::new(),
            duration,
            easing,
            policy: QueuePolicy::default(),
        }
    }

    /// Duration given to jobs when they start.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Changes the duration of jobs that have not started yet.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Curve applied to every job.
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Sets the curve applied to every job, including the live one.
    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Policy for superseded jobs.
    pub fn policy(&self) -> QueuePolicy {
        self.policy
    }

    /// Sets the policy for superseded jobs.
    pub fn set_policy(&mut self, policy: QueuePolicy) {
        self.policy = policy;
    }

    /// Starts `job` immediately when idle, otherwise queues it.
    pub fn submit(&mut self, job: PendingAnimation) -> Submission {
        if self.live.is_none() && self.queue.is_empty() {
            self.live = Some(LiveAnimation::new(job, self.duration));
            return Submission::Started;
        }

        if self.policy == QueuePolicy::Coalesce {
            self.queue.clear();
        }
        self.queue.push_back(job);
        Submission::Queued
    }

    /// Advances the live animation by `dt`.
    ///
    /// On completion the next queued job becomes live; it receives its first
    /// time slice on the following call.
    pub fn advance(&mut self, dt: Duration) -> Frame {
        let mut frame = Frame::default();
        let Some(live) = self.live.as_mut() else {
            return frame;
        };

        live.elapsed = live.elapsed.saturating_add(dt);
        let t = live.fraction();
        let width = live.job.width_at(self.easing.apply(t));
        if live.job.accepts(width) {
            frame.width = Some(width);
        }

        if (1.0 - t).abs() < COMPLETION_EPSILON {
            frame.completed = Some(live.job);
            self.live = None;
            if let Some(next) = self.queue.pop_front() {
                self.live = Some(LiveAnimation::new(next, self.duration));
                frame.started = Some(next);
            }
        }

        frame
    }

    /// The job currently animating.
    pub fn live(&self) -> Option<&PendingAnimation> {
        self.live.as_ref().map(|live| &live.job)
    }

    /// Jobs waiting behind the live one, oldest first.
    pub fn queued(&self) -> impl Iterator<Item = &PendingAnimation> {
        self.queue.iter()
    }

    /// Number of jobs waiting behind the live one.
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// True when nothing is live and nothing is queued.
    pub fn is_idle(&self) -> bool {
        self.live.is_none() && self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);

    fn linear() -> Scheduler {
        Scheduler::new(MS_100, Easing::Linear)
    }

    #[test]
    fn test_submit_starts_when_idle() {
        let mut scheduler = linear();
        assert!(scheduler.is_idle());

        let job = PendingAnimation::new(0, 40, 40);
        assert_eq!(scheduler.submit(job), Submission::Started);
        assert_eq!(scheduler.live(), Some(&job));
        assert_eq!(scheduler.queued_len(), 0);
    }

    #[test]
    fn test_submit_queues_behind_live() {
        let mut scheduler = linear();
        scheduler.submit(PendingAnimation::new(0, 40, 40));
        assert_eq!(
            scheduler.submit(PendingAnimation::new(0, 80, 80)),
            Submission::Queued
        );
        assert_eq!(
            scheduler.submit(PendingAnimation::new(0, 10, 10)),
            Submission::Queued
        );
        assert_eq!(scheduler.queued_len(), 2);
        assert_eq!(scheduler.live().map(|j| j.max_width), Some(40));
    }

    #[test]
    fn test_advance_interpolates_linearly() {
        let mut scheduler = linear();
        scheduler.submit(PendingAnimation::new(10, 100, 110));

        let frame = scheduler.advance(Duration::from_millis(25));
        assert_eq!(frame.width, Some(35));
        assert!(frame.completed.is_none());

        let frame = scheduler.advance(Duration::from_millis(25));
        assert_eq!(frame.width, Some(60));
    }

    #[test]
    fn test_completion_runs_queue_in_order() {
        let mut scheduler = linear();
        let first = PendingAnimation::new(0, 50, 50);
        let second = PendingAnimation::new(50, 100, 150);
        let third = PendingAnimation::new(0, 20, 20);
        scheduler.submit(first);
        scheduler.submit(second);
        scheduler.submit(third);

        let frame = scheduler.advance(MS_100);
        assert_eq!(frame.width, Some(50));
        assert_eq!(frame.completed, Some(first));
        assert_eq!(frame.started, Some(second));

        let frame = scheduler.advance(MS_100);
        assert_eq!(frame.width, Some(150));
        assert_eq!(frame.completed, Some(second));
        assert_eq!(frame.started, Some(third));

        let frame = scheduler.advance(MS_100);
        assert_eq!(frame.width, Some(20));
        assert_eq!(frame.completed, Some(third));
        assert_eq!(frame.started, None);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_overshooting_width_is_not_committed() {
        let job = PendingAnimation::new(0, 100, 100);
        assert!(job.accepts(100));
        assert!(!job.accepts(101));

        let backward = PendingAnimation::new(100, -60, 40);
        assert!(backward.accepts(40));
        assert!(backward.accepts(70));
        assert!(!backward.accepts(39));
    }

    #[test]
    fn test_backward_animation_commits_intermediate_widths() {
        let mut scheduler = linear();
        scheduler.submit(PendingAnimation::new(100, -60, 40));

        let frame = scheduler.advance(Duration::from_millis(50));
        assert_eq!(frame.width, Some(70));

        let frame = scheduler.advance(Duration::from_millis(50));
        assert_eq!(frame.width, Some(40));
        assert!(frame.completed.is_some());
    }

    #[test]
    fn test_coalesce_keeps_only_latest_queued_job() {
        let mut scheduler = linear();
        scheduler.set_policy(QueuePolicy::Coalesce);
        scheduler.submit(PendingAnimation::new(0, 10, 10));
        scheduler.submit(PendingAnimation::new(10, 20, 30));
        scheduler.submit(PendingAnimation::new(10, 70, 80));

        let queued: Vec<_> = scheduler.queued().copied().collect();
        assert_eq!(queued, vec![PendingAnimation::new(10, 70, 80)]);
    }

    #[test]
    fn test_replay_keeps_stale_jobs() {
        let mut scheduler = linear();
        scheduler.submit(PendingAnimation::new(0, 10, 10));
        scheduler.submit(PendingAnimation::new(10, 20, 30));
        scheduler.submit(PendingAnimation::new(10, 70, 80));
        assert_eq!(scheduler.queued_len(), 2);
    }

    #[test]
    fn test_duration_applies_to_jobs_started_later() {
        let mut scheduler = linear();
        scheduler.submit(PendingAnimation::new(0, 100, 100));
        scheduler.submit(PendingAnimation::new(100, -100, 0));
        scheduler.set_duration(Duration::from_millis(200));

        // live job keeps the 100ms it started with
        let frame = scheduler.advance(MS_100);
        assert!(frame.completed.is_some());

        let frame = scheduler.advance(MS_100);
        assert_eq!(frame.width, Some(50));
        assert!(frame.completed.is_none());
    }

    #[test]
    fn test_zero_duration_completes_on_first_frame() {
        let mut scheduler = Scheduler::new(Duration::ZERO, Easing::EASE);
        scheduler.submit(PendingAnimation::new(0, 30, 30));
        let frame = scheduler.advance(Duration::ZERO);
        assert_eq!(frame.width, Some(30));
        assert!(frame.completed.is_some());
    }

    #[test]
    fn test_advance_when_idle_is_noop() {
        let mut scheduler = linear();
        assert_eq!(scheduler.advance(MS_100), Frame::default());
    }
}
