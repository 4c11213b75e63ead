//! Guided routines driven by a one-second logical tick.
//!
//! Both machines are page-local: they never touch the health store and
//! nothing about them is persisted. The caller owns the clock and calls
//! `tick()` once per elapsed second; stopping is just not ticking any more
//! after `stop()`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathPhase {
    Idle,
    Inhale,
    Hold,
    Exhale,
}

pub const INHALE_SECS: u32 = 4;
pub const HOLD_SECS: u32 = 4;
pub const EXHALE_SECS: u32 = 6;
pub const DEFAULT_BREATH_CYCLES: u32 = 3;

impl BreathPhase {
    pub fn duration(self) -> u32 {
        match self {
            BreathPhase::Idle => 0,
            BreathPhase::Inhale => INHALE_SECS,
            BreathPhase::Hold => HOLD_SECS,
            BreathPhase::Exhale => EXHALE_SECS,
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            BreathPhase::Idle => "Ready?",
            BreathPhase::Inhale => "Inhale",
            BreathPhase::Hold => "Hold",
            BreathPhase::Exhale => "Exhale",
        }
    }
}

/// 4-4-6 breathing: `Idle → Inhale → Hold → Exhale → {Inhale | Idle}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreathingSession {
    phase: BreathPhase,
    elapsed: u32,
    cycles: u32,
    total_cycles: u32,
}

impl Default for BreathingSession {
    fn default() -> Self {
        Self::new(DEFAULT_BREATH_CYCLES)
    }
}

impl BreathingSession {
    pub fn new(total_cycles: u32) -> Self {
        Self {
            phase: BreathPhase::Idle,
            elapsed: 0,
            cycles: 0,
            total_cycles: total_cycles.max(1),
        }
    }

    pub fn phase(&self) -> BreathPhase {
        self.phase
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn total_cycles(&self) -> u32 {
        self.total_cycles
    }

    pub fn is_active(&self) -> bool {
        self.phase != BreathPhase::Idle
    }

    /// Only takes effect while idle.
    pub fn set_total_cycles(&mut self, total_cycles: u32) {
        if !self.is_active() {
            self.total_cycles = total_cycles.max(1);
        }
    }

    pub fn start(&mut self) {
        self.phase = BreathPhase::Inhale;
        self.elapsed = 0;
        self.cycles = 0;
    }

    /// Cancels without counting the cycle in progress.
    pub fn stop(&mut self) {
        self.phase = BreathPhase::Idle;
        self.elapsed = 0;
    }

    /// Advances one second. A phase hands over on the tick after its counter
    /// has reached the phase duration.
    pub fn tick(&mut self) -> BreathPhase {
        if !self.is_active() {
            return self.phase;
        }
        if self.elapsed < self.phase.duration() {
            self.elapsed += 1;
            return self.phase;
        }

        self.elapsed = 0;
        self.phase = match self.phase {
            BreathPhase::Inhale => BreathPhase::Hold,
            BreathPhase::Hold => BreathPhase::Exhale,
            BreathPhase::Exhale => {
                self.cycles += 1;
                if self.cycles >= self.total_cycles {
                    BreathPhase::Idle
                } else {
                    BreathPhase::Inhale
                }
            }
            BreathPhase::Idle => BreathPhase::Idle,
        };
        self.phase
    }

    /// 1-based number of the cycle being shown.
    pub fn current_cycle(&self) -> u32 {
        self.cycles + u32::from(self.is_active())
    }

    pub fn progress_percent(&self) -> f64 {
        match self.phase.duration() {
            0 => 0.0,
            duration => f64::from(self.elapsed) / f64::from(duration) * 100.0,
        }
    }

    pub fn timer_text(&self) -> String {
        if !self.is_active() {
            return String::new();
        }
        format!("{}s / {}s", self.elapsed, self.phase.duration())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stretch {
    pub id: String,
    pub name: String,
    /// Seconds.
    pub duration: u32,
    pub description: String,
    pub image: String,
}

impl Stretch {
    fn new(id: &str, name: &str, duration: u32, description: &str, image: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            duration,
            description: description.to_string(),
            image: image.to_string(),
        }
    }
}

pub fn default_stretches() -> Vec<Stretch> {
    vec![
        Stretch::new(
            "stretch-1",
            "Neck Stretch",
            30,
            "Gently tilt your head to each side, holding for a few seconds.",
            "🧘‍♀️",
        ),
        Stretch::new(
            "stretch-2",
            "Shoulder Rolls",
            30,
            "Roll your shoulders forwards and backwards in a circular motion.",
            "🙆‍♀️",
        ),
        Stretch::new(
            "stretch-3",
            "Forward Fold",
            45,
            "Bend forward from the hips, reaching toward your toes.",
            "🧎‍♀️",
        ),
        Stretch::new(
            "stretch-4",
            "Quad Stretch",
            30,
            "Stand on one leg, grab your ankle and pull gently towards your buttocks.",
            "🏃‍♀️",
        ),
        Stretch::new(
            "stretch-5",
            "Hamstring Stretch",
            45,
            "Sit with one leg extended, reach toward your toes.",
            "🤸‍♀️",
        ),
        Stretch::new(
            "stretch-6",
            "Child's Pose",
            60,
            "Kneel and sit back on heels, extending arms forward on the mat.",
            "🧘‍♂️",
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StretchEvent {
    Started(String),
    Next(String),
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    #[error("no stretches available")]
    Empty,
    #[error("cannot reorder while the sequence is running")]
    Running,
}

/// An ordered stretch routine counting down one stretch at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StretchSequence {
    stretches: Vec<Stretch>,
    active: Option<usize>,
    time_left: u32,
}

impl Default for StretchSequence {
    fn default() -> Self {
        Self::new(default_stretches())
    }
}

impl StretchSequence {
    pub fn new(stretches: Vec<Stretch>) -> Self {
        Self {
            stretches,
            active: None,
            time_left: 0,
        }
    }

    pub fn stretches(&self) -> &[Stretch] {
        &self.stretches
    }

    pub fn active(&self) -> Option<&Stretch> {
        self.active.and_then(|index| self.stretches.get(index))
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn start(&mut self) -> Result<StretchEvent, SequenceError> {
        let first = self.stretches.first().ok_or(SequenceError::Empty)?;
        self.active = Some(0);
        self.time_left = first.duration;
        Ok(StretchEvent::Started(first.name.clone()))
    }

    pub fn stop(&mut self) {
        self.active = None;
        self.time_left = 0;
    }

    /// Counts down one second; moves on when the current stretch has one
    /// second or less remaining.
    pub fn tick(&mut self) -> Option<StretchEvent> {
        let index = self.active?;
        if self.time_left > 1 {
            self.time_left -= 1;
            return None;
        }

        match self.stretches.get(index + 1) {
            Some(next) => {
                self.active = Some(index + 1);
                self.time_left = next.duration;
                Some(StretchEvent::Next(next.name.clone()))
            }
            None => {
                self.stop();
                Some(StretchEvent::Completed)
            }
        }
    }

    pub fn move_up(&mut self, index: usize) -> Result<(), SequenceError> {
        if index == 0 || index >= self.stretches.len() {
            return Ok(());
        }
        self.move_to(index, index - 1)
    }

    pub fn move_down(&mut self, index: usize) -> Result<(), SequenceError> {
        if index + 1 >= self.stretches.len() {
            return Ok(());
        }
        self.move_to(index, index + 1)
    }

    /// Drag-and-drop: takes the stretch at `from` and reinserts it at `to`.
    pub fn move_to(&mut self, from: usize, to: usize) -> Result<(), SequenceError> {
        if self.is_running() {
            return Err(SequenceError::Running);
        }
        if from >= self.stretches.len() || to >= self.stretches.len() || from == to {
            return Ok(());
        }
        let stretch = self.stretches.remove(from);
        self.stretches.insert(to, stretch);
        Ok(())
    }
}

/// `MM:SS`, minutes unbounded.
pub fn format_mm_ss(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
