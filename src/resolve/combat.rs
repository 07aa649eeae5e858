//! Commit resolution.
//!
//! A commit throws one unit kind plus an amount of supply at a target square.
//! Depending on visibility, control of the square and the resulting power it
//! fails, destroys the defender outright, or starts a siege. Under fog of war
//! a bishop commit gathers intel and plants a decoy instead of attacking.
//!
//! A rejected commit leaves the state untouched. Every processed commit adds
//! one fatigue.

use crate::board::{Decoy, GameState, Siege, Side, Square, UnitKind};
use crate::control::{compute_influence, visible_under, ControlStatus};
use crate::event::Event;
use crate::rules::Rules;

/// Why a commit was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    GameOver,
    /// The committed kind has no base power (kings).
    NoPower,
    InsufficientSupply,
}

/// What a commit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Rejected(Rejection),
    /// The target was not visible; forced failure.
    Blind,
    Failed { power: i32 },
    Destroyed { kind: UnitKind, power: i32 },
    SiegeStarted { power: i32 },
    /// The square was already under siege; its progress is kept.
    SiegeContinues { power: i32 },
    DecoyPlaced,
    IntelGathered,
}

/// The outcome of a commit together with its log events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub outcome: CommitOutcome,
    pub events: Vec<Event>,
}

impl Commit {
    fn rejected(reason: Rejection) -> Self {
        Commit { outcome: CommitOutcome::Rejected(reason), events: Vec::new() }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self.outcome, CommitOutcome::Rejected(_))
    }
}

/// Power modifier and extra supply cost for attacking a square with the
/// given control status under fog of war.
pub const fn control_modifier(status: ControlStatus) -> (i32, i32) {
    match status {
        ControlStatus::Player => (1, 0),
        ControlStatus::Enemy | ControlStatus::Contested => (-1, 0),
        ControlStatus::Uncontrolled => (-1, 1),
    }
}

/// Resolves a commit of `kind` with `spend` supply against `target`.
pub fn commit(
    state: &mut GameState,
    rules: &Rules,
    target: Square,
    kind: UnitKind,
    spend: i32,
) -> Commit {
    if state.is_over() {
        return Commit::rejected(Rejection::GameOver);
    }
    if spend < 0 || spend > state.supply {
        return Commit::rejected(Rejection::InsufficientSupply);
    }
    if rules.fog_of_war && kind == UnitKind::Bishop {
        return gather_intel(state, rules, target, spend);
    }
    let base = match kind.base_power() {
        Some(p) => p,
        None => return Commit::rejected(Rejection::NoPower),
    };

    let tally = compute_influence(&state.player.units, &state.enemy.units);
    if !visible_under(rules, state, &tally, target) {
        state.morale -= 1;
        state.fatigue = state.fatigue.saturating_add(1);
        tracing::debug!(%target, "commit into fog");
        return Commit { outcome: CommitOutcome::Blind, events: vec![Event::AttackBlind(target)] };
    }

    let status = tally.status(target);
    let (modifier, surcharge) = if rules.fog_of_war { control_modifier(status) } else { (0, 0) };
    let fatigue = i32::try_from(state.fatigue).unwrap_or(i32::MAX);
    let power = (base + spend).saturating_sub(fatigue) + modifier;
    state.supply -= spend + surcharge;

    let mut events = Vec::new();
    let outcome = if state.enemy.occupies(target) && power >= rules.siege_threshold {
        if rules.fog_of_war && status == ControlStatus::Player {
            destroy(state, target, power, &mut events)
        } else if state.sieges.contains_key(&target) {
            events.push(Event::SiegeContinues(target));
            CommitOutcome::SiegeContinues { power }
        } else {
            state.sieges.insert(target, Siege::started_by(Side::Player));
            events.push(Event::SiegeInitiated(target));
            CommitOutcome::SiegeStarted { power }
        }
    } else {
        state.morale -= 1;
        events.push(Event::AttackFailed(target));
        CommitOutcome::Failed { power }
    };
    state.fatigue = state.fatigue.saturating_add(1);

    tracing::debug!(%target, kind = kind.name(), spend, power, status = status.name(), ?outcome, "commit resolved");
    Commit { outcome, events }
}

/// Removes the defender on `target` outright.
fn destroy(state: &mut GameState, target: Square, power: i32, events: &mut Vec<Event>) -> CommitOutcome {
    match state.enemy.remove_at(target) {
        Some(unit) => {
            state.morale += 1;
            if !state.enemy.occupies(target) {
                state.sieges.remove(&target);
            }
            events.push(Event::UnitDestroyed { square: target, kind: unit.kind });
            CommitOutcome::Destroyed { kind: unit.kind, power }
        }
        None => {
            state.morale -= 1;
            events.push(Event::AttackFailed(target));
            CommitOutcome::Failed { power }
        }
    }
}

/// Bishop commit under fog of war: raise intel, then spend it on a decoy.
///
/// The decoy costs the intel just gained, so intel ends where it started
/// unless it was already at the cap.
fn gather_intel(state: &mut GameState, rules: &Rules, target: Square, spend: i32) -> Commit {
    state.supply -= spend;
    state.intel = (state.intel + 1).min(rules.intel_cap);
    let mut events = vec![Event::IntelGathered];
    let outcome = if state.intel > 0 {
        state.decoys.push(Decoy { square: target });
        state.intel -= 1;
        events.push(Event::DecoyPlaced(target));
        CommitOutcome::DecoyPlaced
    } else {
        CommitOutcome::IntelGathered
    };
    state.fatigue = state.fatigue.saturating_add(1);
    Commit { outcome, events }
}
