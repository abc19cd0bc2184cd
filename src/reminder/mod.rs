pub mod notify;
pub mod scheduler;
pub mod timer;

pub use notify::{LogNotifier, Notification, Notifier};
pub use scheduler::ReminderScheduler;
pub use timer::{TimerService, TokioTimerService};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReminderKind {
    Break,
    Checkout,
    Overtime,
}

impl ReminderKind {
    pub fn name(&self) -> &'static str {
        match self {
            ReminderKind::Break => "break_reminder",
            ReminderKind::Checkout => "checkout_reminder",
            ReminderKind::Overtime => "overtime_reminder",
        }
    }
}

/// One delivery from an armed timer. `generation` identifies the arming that
/// produced it, so deliveries from a cancelled or replaced timer can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Firing {
    pub kind: ReminderKind,
    pub generation: u64,
}
