//! Timed continuations on a logical millisecond clock.
//!
//! Battles move forward through delayed steps (the enemy's reply, the pause
//! before leaving a finished battle). They are queued here instead of being
//! run from wall-clock timers, so the controller decides when time passes and
//! can drop everything at once when a session ends.
//!
//! Each task carries the battle generation it belongs to. The controller
//! compares it with the live generation when the task fires.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use cyoa_battle::BattleOutcome;
use log::debug;

/// What a scheduled task does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// The enemy attacks.
    EnemyAttack {
        /// Whether the player defended on the previous turn.
        defending: bool,
    },
    /// Leave the finished battle.
    EndBattle {
        /// How the battle ended.
        outcome: BattleOutcome,
    },
}

/// A queued continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    /// Clock time at which the task is due.
    pub due_ms: u64,
    /// Battle generation the task was scheduled for.
    pub generation: u64,
    /// What to do.
    pub kind: TaskKind,
}

/// A priority queue of tasks ordered by due time, then scheduling order.
#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_seq: u64,
    heap: BinaryHeap<Reverse<(u64, u64)>>, // (due_ms, seq)
    tasks: HashMap<u64, ScheduledTask>,
}

impl Scheduler {
    /// An empty scheduler at time 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock time.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Queue `kind` to fire `delay_ms` from now.
    pub fn schedule_in(&mut self, delay_ms: u64, generation: u64, kind: TaskKind) {
        let due_ms = self.now_ms.saturating_add(delay_ms);
        let seq = self.next_seq;
        self.next_seq += 1;
        debug!("scheduling {kind:?} (now/due = {}/{due_ms} ms)", self.now_ms);
        self.heap.push(Reverse((due_ms, seq)));
        self.tasks.insert(
            seq,
            ScheduledTask {
                due_ms,
                generation,
                kind,
            },
        );
    }

    /// Due time of the earliest pending task.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse((due, _))| *due)
    }

    /// Pop the earliest task due at or before `deadline_ms`, moving the clock
    /// to its due time.
    pub fn pop_due_by(&mut self, deadline_ms: u64) -> Option<ScheduledTask> {
        let Reverse((due_ms, seq)) = *self.heap.peek()?;
        if due_ms > deadline_ms {
            return None;
        }
        self.heap.pop();
        self.now_ms = self.now_ms.max(due_ms);
        self.tasks.remove(&seq)
    }

    /// Move the clock forward to `now_ms`. Never moves backwards.
    pub fn advance_clock_to(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Drop every pending task.
    pub fn cancel_all(&mut self) {
        if !self.tasks.is_empty() {
            debug!("cancelling {} pending task(s)", self.tasks.len());
        }
        self.heap.clear();
        self.tasks.clear();
    }
}
