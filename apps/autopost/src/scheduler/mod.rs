//! Daily post scheduler.
//!
//! `posts_per_day` slots are spread evenly over 24 hours; each slot gets a
//! minute drawn once from `[min_delay, max_delay] mod 60` when the scheduler
//! starts. Slot times are UTC. The background loop awaits each run before
//! computing the next fire time, and scheduled and manual runs share a lock, so
//! two runs never overlap. Run errors are logged, never propagated.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveTime, Timelike, Utc};
use serde::Serialize;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{error, info, warn};

use crate::generation::random::Dice;
use crate::pipeline::{Orchestrator, PipelineError, PublishedPost};

/// One pipeline run. Implemented by the orchestrator; faked in tests.
#[async_trait]
pub trait PostJob: Send + Sync {
    async fn run(&self) -> Result<PublishedPost, PipelineError>;
}

#[async_trait]
impl PostJob for Orchestrator {
    async fn run(&self) -> Result<PublishedPost, PipelineError> {
        self.create_and_publish().await
    }
}

#[derive(Debug, Clone)]
pub struct ScheduleSettings {
    pub posts_per_day: u32,
    pub min_delay_minutes: u32,
    pub max_delay_minutes: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleSlot {
    pub hour: u32,
    pub minute: u32,
}

impl ScheduleSlot {
    fn time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0)
    }
}

/// Slot `i` fires at hour `floor(i × 24 / posts_per_day) mod 24`.
pub fn daily_slots(settings: &ScheduleSettings, dice: &Dice) -> Vec<ScheduleSlot> {
    let per_day = settings.posts_per_day;
    (0..per_day)
        .map(|i| ScheduleSlot {
            hour: (i * 24 / per_day) % 24,
            minute: dice.range_inclusive(settings.min_delay_minutes, settings.max_delay_minutes) % 60,
        })
        .collect()
}

/// Earliest slot time strictly after `after`.
pub fn next_fire(slots: &[ScheduleSlot], after: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let today = after.date_naive();
    slots
        .iter()
        .filter_map(|slot| {
            let time = slot.time()?;
            let candidate = today.and_time(time).and_utc();
            if candidate > after {
                Some(candidate)
            } else {
                today
                    .checked_add_days(Days::new(1))
                    .map(|d| d.and_time(time).and_utc())
            }
        })
        .min()
}

/// Wall clock that advances with tokio's clock, so paused-time tests can drive it.
#[derive(Clone, Copy)]
struct Clock {
    origin_wall: DateTime<Utc>,
    origin: Instant,
}

impl Clock {
    fn starting_at(origin_wall: DateTime<Utc>) -> Self {
        Self {
            origin_wall,
            origin: Instant::now(),
        }
    }

    fn now(&self) -> DateTime<Utc> {
        let elapsed = chrono::Duration::from_std(self.origin.elapsed())
            .unwrap_or_else(|_| chrono::Duration::zero());
        self.origin_wall + elapsed
    }
}

pub struct Scheduler {
    job: Arc<dyn PostJob>,
    settings: ScheduleSettings,
    dice: Arc<Dice>,
    run_lock: Arc<Mutex<()>>,
    shutdown: watch::Sender<bool>,
    handle: StdMutex<Option<JoinHandle<()>>>,
}

impl Scheduler {
    pub fn new(job: Arc<dyn PostJob>, settings: ScheduleSettings, dice: Arc<Dice>) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            job,
            settings,
            dice,
            run_lock: Arc::new(Mutex::new(())),
            shutdown,
            handle: StdMutex::new(None),
        }
    }

    /// Starts the background loop. Returns the slots it will fire on.
    /// Calling `start` while already running is a no-op.
    pub fn start(&self) -> Vec<ScheduleSlot> {
        self.start_at(Utc::now())
    }

    fn start_at(&self, origin_wall: DateTime<Utc>) -> Vec<ScheduleSlot> {
        let mut handle = self.handle.lock().unwrap_or_else(|e| e.into_inner());
        if handle.as_ref().is_some_and(|h| !h.is_finished()) {
            warn!("Scheduler already running");
            return Vec::new();
        }

        let slots = daily_slots(&self.settings, &self.dice);
        if slots.is_empty() {
            warn!("POSTS_PER_DAY is 0, scheduler not started");
            return slots;
        }
        for slot in &slots {
            info!("Scheduled post at {:02}:{:02} UTC", slot.hour, slot.minute);
        }

        self.shutdown.send_replace(false);
        *handle = Some(tokio::spawn(run_loop(
            self.job.clone(),
            self.run_lock.clone(),
            slots.clone(),
            Clock::starting_at(origin_wall),
            self.shutdown.subscribe(),
        )));
        info!("Scheduler started with {} posts per day", slots.len());
        slots
    }

    /// Signals the loop to exit and waits for it. A run already in progress
    /// finishes first.
    pub async fn stop(&self) {
        self.shutdown.send_replace(true);
        let handle = self.handle.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                error!("Scheduler task ended abnormally: {e}");
            }
            info!("Scheduler stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }

    /// Runs the pipeline immediately, waiting for any in-flight run first.
    pub async fn run_now(&self) -> Result<PublishedPost, PipelineError> {
        let _guard = self.run_lock.lock().await;
        info!("Manual post trigger");
        self.job.run().await
    }
}

async fn run_loop(
    job: Arc<dyn PostJob>,
    run_lock: Arc<Mutex<()>>,
    slots: Vec<ScheduleSlot>,
    clock: Clock,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut last_fire = clock.now();

    loop {
        let after = clock.now().max(last_fire);
        let Some(fire_at) = next_fire(&slots, after) else {
            error!("No valid schedule slot, scheduler exiting");
            return;
        };
        let delay = (fire_at - clock.now()).to_std().unwrap_or(Duration::ZERO);
        info!("Next post scheduled at {}", fire_at.format("%Y-%m-%d %H:%M UTC"));

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = shutdown.wait_for(|stop| *stop) => return,
        }

        last_fire = fire_at;
        info!("Running scheduled post job ({:02}:{:02})", fire_at.hour(), fire_at.minute());
        let _guard = run_lock.lock().await;
        match job.run().await {
            Ok(published) => info!(
                post_id = %published.post.id,
                attempts = published.attempts,
                "Scheduled post published"
            ),
            Err(e) => error!("Scheduled post job failed: {e}"),
        }
    }
}
