//! Animation scheduler
//!
//! Runs cooperative frame tasks. The host calls [`AnimationScheduler::tick`]
//! once per display refresh; every live task is stepped with the frame timing.
//! A task ends when its step returns [`TaskStatus::Done`] or when its
//! [`TaskHandle`] was cancelled, in which case it gets one last step flagged
//! `cancelled` so it can clean up, and is then dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct TaskId;
}

/// Cancellation handle for a scheduled task
///
/// Cloning the handle shares the same "still active" flag.
#[derive(Clone, Debug)]
pub struct TaskHandle {
    id: TaskId,
    active: Arc<AtomicBool>,
}

impl TaskHandle {
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Flag the task off. It terminates on its next tick.
    pub fn cancel(&self) {
        self.active.store(false, Ordering::Release);
    }

    /// Whether the task is still scheduled to continue
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

/// Result of stepping a task for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Reschedule for the next frame
    Continue,
    /// Finished, drop the task
    Done,
}

/// Frame timing handed to each task step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Host clock time in seconds
    pub now: f64,
    /// Seconds since this task's previous step (0 on its first step)
    pub dt: f32,
    /// Seconds since this task's first step
    pub elapsed: f32,
    /// The task was cancelled; this is its final step
    pub cancelled: bool,
}

struct ScheduledTask<T> {
    active: Arc<AtomicBool>,
    started_at: Option<f64>,
    last_tick: Option<f64>,
    payload: T,
}

/// The scheduler that ticks all frame tasks
pub struct AnimationScheduler<T> {
    tasks: SlotMap<TaskId, ScheduledTask<T>>,
    last_frame: Option<f64>,
}

impl<T> AnimationScheduler<T> {
    pub fn new() -> Self {
        Self {
            tasks: SlotMap::with_key(),
            last_frame: None,
        }
    }

    /// Schedule a task; it is first stepped on the next tick
    pub fn spawn(&mut self, payload: T) -> TaskHandle {
        let active = Arc::new(AtomicBool::new(true));
        let id = self.tasks.insert(ScheduledTask {
            active: active.clone(),
            started_at: None,
            last_tick: None,
            payload,
        });
        tracing::trace!(?id, "task spawned");
        TaskHandle { id, active }
    }

    /// Step every task for the frame at `now` (seconds).
    ///
    /// Returns the number of tasks still scheduled afterwards.
    pub fn tick<F>(&mut self, now: f64, mut step: F) -> usize
    where
        F: FnMut(TaskId, &mut T, Frame) -> TaskStatus,
    {
        self.last_frame = Some(now);

        let ids: Vec<TaskId> = self.tasks.keys().collect();
        for id in ids {
            let Some(task) = self.tasks.get_mut(id) else {
                continue;
            };

            let started_at = *task.started_at.get_or_insert(now);
            let dt = task.last_tick.map_or(0.0, |last| (now - last).max(0.0) as f32);
            task.last_tick = Some(now);

            let cancelled = !task.active.load(Ordering::Acquire);
            let frame = Frame {
                now,
                dt,
                elapsed: (now - started_at).max(0.0) as f32,
                cancelled,
            };

            let status = step(id, &mut task.payload, frame);
            if cancelled || status == TaskStatus::Done {
                if let Some(task) = self.tasks.remove(id) {
                    task.active.store(false, Ordering::Release);
                }
                tracing::trace!(?id, cancelled, "task finished");
            }
        }

        self.tasks.len()
    }

    /// Flag a task off by id
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.tasks.get(id) {
            Some(task) => {
                task.active.store(false, Ordering::Release);
                true
            }
            None => false,
        }
    }

    /// Drop a task immediately, without a final step
    pub fn remove(&mut self, id: TaskId) -> Option<T> {
        self.tasks.remove(id).map(|task| {
            task.active.store(false, Ordering::Release);
            task.payload
        })
    }

    pub fn get(&self, id: TaskId) -> Option<&T> {
        self.tasks.get(id).map(|task| &task.payload)
    }

    pub fn get_mut(&mut self, id: TaskId) -> Option<&mut T> {
        self.tasks.get_mut(id).map(|task| &mut task.payload)
    }

    /// Check if any task is scheduled and not cancelled
    pub fn has_active_tasks(&self) -> bool {
        self.tasks
            .iter()
            .any(|(_, task)| task.active.load(Ordering::Acquire))
    }

    /// Time of the last tick, if any
    pub fn last_frame(&self) -> Option<f64> {
        self.last_frame
    }

    /// Get the number of scheduled tasks (cancelled ones included until their final step)
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<T> Default for AnimationScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
