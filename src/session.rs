//! The game's state core.
//!
//! Everything the player can observe (reference color, slot contents, score) lives in
//! [`GameSession`] and only changes through its named operations. The Bevy side in
//! [`crate::play`] is an adapter that feeds it clicks and frame time.

use std::time::Duration;

use bevy::prelude::*;

use crate::{dice::Dice, prelude::*};

/// One of the five colors the strip and the boxes are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Swatch {
    Red,
    Green,
    Yellow,
    Pink,
    Blue,
}

impl Swatch {
    pub const PALETTE: [Swatch; 5] = [
        Swatch::Red,
        Swatch::Green,
        Swatch::Yellow,
        Swatch::Pink,
        Swatch::Blue,
    ];

    pub fn roll(dice: &mut impl Dice) -> Self {
        Self::PALETTE[dice.below(Self::PALETTE.len())]
    }
}

/// Color tag carried by a slot. Gold is reserved for the bonus and matches any reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Swatch(Swatch),
    Gold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotId {
    Box(usize),
    Bonus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
    Bonus,
}

/// Result of a click that was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickOutcome {
    pub slot: SlotId,
    pub verdict: Verdict,
    pub delta: i32,
}

#[derive(Debug, Clone, Default)]
pub enum SlotState {
    #[default]
    Idle,
    /// shown and clickable until `hide` finishes
    Pending { hide: Timer },
    /// clicked, playing its feedback until `feedback` finishes
    Resolved { verdict: Verdict, feedback: Timer },
}

#[derive(Debug, Clone)]
pub struct Slot {
    tint: Tint,
    points: u8,
    state: SlotState,
}

impl Slot {
    fn new(tint: Tint, points: u8) -> Self {
        Self {
            tint,
            points,
            state: SlotState::Idle,
        }
    }

    pub fn tint(&self) -> Tint {
        self.tint
    }

    pub fn points(&self) -> u8 {
        self.points
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self.state, SlotState::Idle)
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, SlotState::Pending { .. })
    }

    /// Replaces whatever the slot was doing, including an older pending hide.
    fn show(&mut self, tint: Tint, points: u8, visible_for: Duration) {
        self.tint = tint;
        self.points = points;
        self.state = SlotState::Pending {
            hide: Timer::new(visible_for, TimerMode::Once),
        };
    }

    /// Runs the slot's one-shot timer; returns the state it left if it went idle.
    fn elapse(&mut self, delta: Duration) -> Option<SlotState> {
        let done = match &mut self.state {
            SlotState::Idle => false,
            SlotState::Pending { hide } => hide.tick(delta).finished(),
            SlotState::Resolved { feedback, .. } => feedback.tick(delta).finished(),
        };
        done.then(|| std::mem::take(&mut self.state))
    }

    fn view(&self) -> SlotView {
        let rest_fill = match self.tint {
            Tint::Swatch(swatch) => Fill::Swatch(swatch),
            Tint::Gold => Fill::Gold,
        };
        let rest_label = match self.tint {
            Tint::Swatch(_) => self.points.to_string(),
            Tint::Gold => "Bonus!".to_string(),
        };

        match &self.state {
            SlotState::Idle => SlotView {
                visible: false,
                fill: rest_fill,
                label: rest_label,
                scale: 1.0,
            },
            SlotState::Pending { .. } => SlotView {
                visible: true,
                fill: rest_fill,
                label: rest_label,
                scale: 1.0,
            },
            SlotState::Resolved { verdict, feedback } => {
                let (fill, label) = match verdict {
                    Verdict::Correct => (Fill::Affirm, "✓".to_string()),
                    Verdict::Incorrect => (Fill::Deny, "✗".to_string()),
                    Verdict::Bonus => (Fill::Gold, format!("+{}", self.points)),
                };
                SlotView {
                    visible: true,
                    fill,
                    label,
                    scale: 1.0 + (FEEDBACK_SCALE - 1.0) * feedback.fraction(),
                }
            }
        }
    }
}

/// Background a slot should be drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Swatch(Swatch),
    Gold,
    Affirm,
    Deny,
}

/// What the presentation layer should show for one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotView {
    pub visible: bool,
    pub fill: Fill,
    pub label: String,
    pub scale: f32,
}

/// How long a box stays up before hiding itself; the more it is worth, the shorter.
pub fn hide_after(points: u8) -> Duration {
    match points {
        1 => Duration::from_secs(3),
        2 => Duration::from_secs(2),
        _ => Duration::from_millis(1500),
    }
}

/// Periods and windows of the session's timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub color_every: Duration,
    pub spawn_every: Duration,
    pub bonus_every: Duration,
    pub bonus_visible: Duration,
    pub feedback: Duration,
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            color_every: COLOR_INTERVAL,
            spawn_every: SPAWN_INTERVAL,
            bonus_every: BONUS_INTERVAL,
            bonus_visible: BONUS_VISIBLE,
            feedback: FEEDBACK_DURATION,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct GameSession {
    cadence: Cadence,
    started: bool,
    reference: Option<Swatch>,
    score: i32,
    boxes: [Slot; BOX_COUNT],
    bonus: Slot,
    color_timer: Timer,
    spawn_timer: Timer,
    bonus_timer: Timer,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Cadence::default())
    }
}

impl GameSession {
    pub fn new(cadence: Cadence) -> Self {
        assert!(
            !(cadence.color_every.is_zero()
                || cadence.spawn_every.is_zero()
                || cadence.bonus_every.is_zero()),
            "session schedules need non-zero periods"
        );
        Self {
            cadence,
            started: false,
            reference: None,
            score: 0,
            boxes: std::array::from_fn(|_| Slot::new(Tint::Swatch(Swatch::Red), MIN_POINTS)),
            bonus: Slot::new(Tint::Gold, BONUS_POINTS),
            color_timer: Timer::new(cadence.color_every, TimerMode::Repeating),
            spawn_timer: Timer::new(cadence.spawn_every, TimerMode::Repeating),
            bonus_timer: Timer::new(cadence.bonus_every, TimerMode::Repeating),
        }
    }

    /// current strip color, `None` until the session starts
    pub fn reference(&self) -> Option<Swatch> {
        self.reference
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        match id {
            SlotId::Box(index) => self.boxes.get(index),
            SlotId::Bonus => Some(&self.bonus),
        }
    }

    fn slot_mut(&mut self, id: SlotId) -> Option<&mut Slot> {
        match id {
            SlotId::Box(index) => self.boxes.get_mut(index),
            SlotId::Bonus => Some(&mut self.bonus),
        }
    }

    pub fn view(&self, id: SlotId) -> Option<SlotView> {
        self.slot(id).map(Slot::view)
    }

    /// Starts the session with a fresh reference color. Returns `false` if it was already
    /// running.
    pub fn start(&mut self, dice: &mut impl Dice) -> bool {
        if self.started {
            debug!("session already started, ignoring start");
            return false;
        }
        self.started = true;
        self.tick_color(dice);
        info!("session started, reference is {:?}", self.reference);
        true
    }

    pub fn tick_color(&mut self, dice: &mut impl Dice) {
        assert!(self.started, "color tick on a session that was never started");
        let swatch = Swatch::roll(dice);
        debug!("reference color {:?} -> {:?}", self.reference, swatch);
        self.reference = Some(swatch);
    }

    /// Gives every idle box a coin flip to appear. Shown boxes are left alone.
    pub fn tick_spawn(&mut self, dice: &mut impl Dice) {
        assert!(self.started, "spawn tick on a session that was never started");
        for (index, slot) in self.boxes.iter_mut().enumerate() {
            if !slot.is_idle() || !dice.coin() {
                continue;
            }
            let points = MIN_POINTS + dice.below(usize::from(MAX_POINTS - MIN_POINTS + 1)) as u8;
            let swatch = Swatch::roll(dice);
            slot.show(Tint::Swatch(swatch), points, hide_after(points));
            debug!("box {index} spawned as {swatch:?} worth {points}");
        }
    }

    /// Shows the bonus for its window, restarting the window if it was already up.
    pub fn tick_bonus(&mut self) {
        assert!(self.started, "bonus tick on a session that was never started");
        self.bonus
            .show(Tint::Gold, BONUS_POINTS, self.cadence.bonus_visible);
        debug!("bonus spawned");
    }

    /// Scores a click on a shown slot. Clicks on hidden, resolved or unknown slots are
    /// ignored.
    pub fn resolve_click(&mut self, id: SlotId) -> Option<ClickOutcome> {
        let reference = self.reference;
        let feedback = self.cadence.feedback;
        let Some(slot) = self.slot_mut(id) else {
            warn!("click on unknown slot {id:?}");
            return None;
        };
        if !slot.is_pending() {
            debug!("click on {id:?} ignored, slot is not pending");
            return None;
        }

        let verdict = match slot.tint {
            Tint::Gold => Verdict::Bonus,
            Tint::Swatch(swatch) if Some(swatch) == reference => Verdict::Correct,
            Tint::Swatch(_) => Verdict::Incorrect,
        };
        let points = i32::from(slot.points);
        let delta = match verdict {
            Verdict::Correct | Verdict::Bonus => points,
            Verdict::Incorrect => -points,
        };
        slot.state = SlotState::Resolved {
            verdict,
            feedback: Timer::new(feedback, TimerMode::Once),
        };

        self.score += delta;
        debug!("{id:?} resolved {verdict:?} ({delta:+}), score {}", self.score);
        Some(ClickOutcome {
            slot: id,
            verdict,
            delta,
        })
    }

    /// Moves the session clock forward. The delta is walked in steps that end on each
    /// schedule's due time, so slots shown mid-call keep aging. Within a step slot timers
    /// run first, then the color, spawn and bonus schedules.
    pub fn advance(&mut self, delta: Duration, dice: &mut impl Dice) {
        assert!(self.started, "advanced a session that was never started");

        let mut left = delta;
        loop {
            let step = left
                .min(self.color_timer.remaining())
                .min(self.spawn_timer.remaining())
                .min(self.bonus_timer.remaining());
            self.elapse_slots(step);

            if self.color_timer.tick(step).just_finished() {
                self.tick_color(dice);
            }
            if self.spawn_timer.tick(step).just_finished() {
                self.tick_spawn(dice);
            }
            if self.bonus_timer.tick(step).just_finished() {
                self.tick_bonus();
            }

            left -= step;
            if left.is_zero() {
                break;
            }
        }
    }

    fn elapse_slots(&mut self, delta: Duration) {
        let slots = self
            .boxes
            .iter_mut()
            .enumerate()
            .map(|(index, slot)| (SlotId::Box(index), slot))
            .chain(std::iter::once((SlotId::Bonus, &mut self.bonus)));
        for (id, slot) in slots {
            match slot.elapse(delta) {
                Some(SlotState::Pending { .. }) => debug!("{id:?} expired unclicked"),
                Some(SlotState::Resolved { .. }) => debug!("{id:?} feedback done"),
                _ => (),
            }
        }
    }
}
