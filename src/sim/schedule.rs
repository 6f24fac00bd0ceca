//! Named one-shot tasks on a millisecond clock
//!
//! Each task has at most one pending deadline. A task that wants to run again
//! re-arms itself from its own deadline, so a tick that fires late does not
//! push later ticks back. The clock is whatever the caller passes in, which
//! keeps tests and replays deterministic.

/// The periodic drivers of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    PlayerMotion,
    ObstacleMotion,
    Collision,
    Timer,
}

impl Task {
    /// All tasks, in tie-break order
    pub const ALL: [Task; 4] = [
        Task::PlayerMotion,
        Task::ObstacleMotion,
        Task::Collision,
        Task::Timer,
    ];

    fn slot(self) -> usize {
        match self {
            Task::PlayerMotion => 0,
            Task::ObstacleMotion => 1,
            Task::Collision => 2,
            Task::Timer => 3,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    deadlines: [Option<u64>; 4],
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `task` to fire at `at_ms`, replacing any pending deadline
    pub fn schedule(&mut self, task: Task, at_ms: u64) {
        self.deadlines[task.slot()] = Some(at_ms);
    }

    pub fn cancel(&mut self, task: Task) {
        self.deadlines[task.slot()] = None;
    }

    pub fn cancel_all(&mut self) {
        self.deadlines = [None; 4];
    }

    pub fn deadline(&self, task: Task) -> Option<u64> {
        self.deadlines[task.slot()]
    }

    pub fn is_idle(&self) -> bool {
        self.deadlines.iter().all(Option::is_none)
    }

    /// Earliest pending deadline, if any
    pub fn next_deadline(&self) -> Option<u64> {
        self.deadlines.iter().flatten().copied().min()
    }

    /// Disarm and return the earliest task due at `now_ms`, with its deadline.
    /// Equal deadlines resolve in `Task::ALL` order.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(Task, u64)> {
        let (task, at) = Task::ALL
            .iter()
            .filter_map(|&t| self.deadline(t).map(|at| (t, at)))
            .filter(|&(_, at)| at <= now_ms)
            .min_by_key(|&(t, at)| (at, t.slot()))?;
        self.cancel(task);
        Some((task, at))
    }
}
