//! The per-frame simulation step
//!
//! Variable timestep: the driver samples the frame clock and hands the
//! delta straight in. Within one tick the order is fixed and load-bearing:
//! countdown/lives terminal check, spawn, item physics + catches, sweep,
//! catcher movement, shake decay. A catch that empties lives therefore
//! ends the round on the *following* tick, never the one it happened on.

use super::collision::rect_circle_overlap;
use super::spawn;
use super::state::{GameEvent, ItemKind, KindClass, RoundPhase, RoundState};
use crate::consts::*;

/// Latched movement intent sampled once per tick (key held state, not
/// key-press events)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
}

/// Advance the round by one tick of `dt` seconds.
///
/// No-op unless the round is `Running`, and for degenerate clock samples
/// (`dt <= 0`) so a stalled or backwards clock never reverses gravity.
pub fn tick(state: &mut RoundState, input: &TickInput, dt: f32) {
    if state.phase != RoundPhase::Running {
        return;
    }
    if dt <= 0.0 {
        return;
    }

    state.time_remaining -= dt;
    if state.time_remaining <= 0.0 {
        state.time_remaining = 0.0;
        state.finish();
        return;
    }
    if state.lives <= 0 {
        state.finish();
        return;
    }

    if state.spawner.advance(dt) {
        let item = spawn::spawn_item(&mut state.rng, state.playfield.x);
        state.items.push(item);
    }

    // Items are taken out of the state for the duration of the physics
    // pass so catch resolution can mutate score/lives/tally mid-loop.
    let mut items = std::mem::take(&mut state.items);
    for item in &mut items {
        item.fall(dt);
        if !item.caught
            && rect_circle_overlap(state.catcher.pos, state.catcher.size, item.pos, item.radius)
        {
            item.caught = true;
            resolve_catch(state, item.kind);
        }
    }

    // End-of-tick sweep: caught items and items past the bottom edge
    let floor = state.playfield.y;
    items.retain(|item| !item.caught && !item.is_below(floor));
    state.items = items;

    state
        .catcher
        .apply_movement(input.move_left, input.move_right, state.playfield.x);

    if state.shake > 0.0 {
        state.shake = (state.shake - dt).max(0.0);
    }
}

/// Apply the one-shot consequences of catching an item.
///
/// Callers must guarantee the item's `caught` flag was clear: running this
/// twice for the same item double-counts.
fn resolve_catch(state: &mut RoundState, kind: ItemKind) {
    let profile = kind.profile();
    match profile.class {
        KindClass::Bonus => {
            state.score += profile.score;
            state.tally.bump(kind);
            state.events.push(GameEvent::BonusCaught);
        }
        KindClass::Penalty => {
            state.lives -= 1;
            state.shake = SHAKE_DURATION;
            state.events.push(GameEvent::PenaltyCaught);
        }
        KindClass::Common => {
            state.score += profile.score;
            state.tally.bump(kind);
            state.events.push(GameEvent::CommonCaught(kind));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::FallingItem;
    use glam::Vec2;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn running_state(seed: u64) -> RoundState {
        let mut state = RoundState::new(seed, Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT));
        state.start();
        state
    }

    /// An item parked dead center on the catcher
    fn item_on_catcher(state: &RoundState, kind: ItemKind) -> FallingItem {
        FallingItem {
            kind,
            pos: state.catcher.pos + state.catcher.size / 2.0,
            vel: Vec2::new(0.0, 150.0),
            radius: ITEM_RADIUS,
            rotation: 0.0,
            rotation_step: 0.01,
            caught: false,
        }
    }

    #[test]
    fn not_started_is_inert() {
        let mut state = RoundState::new(1, Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT));
        let before = state.clone();
        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(state, before);
    }

    #[test]
    fn zero_and_negative_dt_are_noops() {
        let mut state = running_state(2);
        let item = item_on_catcher(&state, ItemKind::Apple);
        state.items.push(item);
        let before = state.clone();

        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), 0.0);
            tick(&mut state, &TickInput::default(), -0.5);
        }
        assert_eq!(state, before);
    }

    #[test]
    fn gravity_applies_before_integration() {
        let mut item = FallingItem {
            kind: ItemKind::Pencil,
            pos: Vec2::new(100.0, 0.0),
            vel: Vec2::new(0.0, 100.0),
            radius: ITEM_RADIUS,
            rotation: 0.0,
            rotation_step: 0.02,
            caught: false,
        };
        item.fall(0.5);

        // Semi-implicit: vy becomes 300 first, then y += 300 * 0.5
        assert_eq!(item.vel.y, 100.0 + GRAVITY * 0.5);
        assert_eq!(item.pos.y, 150.0);
        // Rotation advances by the raw step, not step * dt
        assert_eq!(item.rotation, 0.02);
    }

    #[test]
    fn common_catch_scores_one() {
        let mut state = running_state(3);
        let item = item_on_catcher(&state, ItemKind::Apple);
        state.items.push(item);

        tick(&mut state, &TickInput::default(), 0.001);

        assert_eq!(state.score, 1);
        assert_eq!(state.tally.get(ItemKind::Apple), 1);
        assert!(state.items.is_empty(), "caught item swept at end of tick");
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::CommonCaught(ItemKind::Apple)]
        );
    }

    #[test]
    fn bonus_catch_scores_five() {
        let mut state = running_state(4);
        let item = item_on_catcher(&state, ItemKind::GoldenBell);
        state.items.push(item);

        tick(&mut state, &TickInput::default(), 0.001);

        assert_eq!(state.score, 5);
        assert_eq!(state.tally.get(ItemKind::GoldenBell), 1);
        assert_eq!(state.drain_events(), vec![GameEvent::BonusCaught]);
    }

    #[test]
    fn penalty_catch_costs_a_life_and_shakes() {
        let mut state = running_state(5);
        let item = item_on_catcher(&state, ItemKind::SmellySock);
        state.items.push(item);

        tick(&mut state, &TickInput::default(), 0.001);

        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.tally.total(), 0);
        assert!(state.shake > 0.0);
        assert_eq!(state.drain_events(), vec![GameEvent::PenaltyCaught]);
    }

    #[test]
    fn already_caught_item_is_inert() {
        let mut state = running_state(6);
        let mut item = item_on_catcher(&state, ItemKind::GoldenBell);
        item.caught = true;
        state.items.push(item);

        tick(&mut state, &TickInput::default(), 0.001);

        assert_eq!(state.score, 0);
        assert_eq!(state.tally.total(), 0);
        assert!(state.drain_events().is_empty());
        assert!(state.items.is_empty(), "swept without resolving again");
    }

    #[test]
    fn offscreen_items_are_pruned() {
        let mut state = running_state(7);
        state.items.push(FallingItem {
            kind: ItemKind::Ruler,
            pos: Vec2::new(100.0, state.playfield.y + ITEM_RADIUS + 1.0),
            vel: Vec2::new(0.0, 200.0),
            radius: ITEM_RADIUS,
            rotation: 0.0,
            rotation_step: 0.0,
            caught: false,
        });

        tick(&mut state, &TickInput::default(), 0.001);

        assert!(state.items.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn round_over_on_following_tick_after_last_life() {
        let mut state = running_state(8);
        state.lives = 1;
        let item = item_on_catcher(&state, ItemKind::SmellySock);
        state.items.push(item);

        // The catch tick itself stays Running
        tick(&mut state, &TickInput::default(), 0.001);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, RoundPhase::Running);

        // The next tick flips to Over
        tick(&mut state, &TickInput::default(), 0.001);
        assert_eq!(state.phase, RoundPhase::Over);
        assert!(state.drain_events().contains(&GameEvent::RoundOver));

        // Over is terminal: further ticks change nothing
        let frozen = state.clone();
        for _ in 0..50 {
            tick(&mut state, &TickInput { move_left: true, move_right: false }, DT);
        }
        assert_eq!(state, frozen);
    }

    #[test]
    fn countdown_expiry_clamps_and_ends() {
        let mut state = running_state(9);
        state.time_remaining = 0.01;

        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.time_remaining, 0.0);
        assert_eq!(state.phase, RoundPhase::Over);
        assert_eq!(state.drain_events(), vec![GameEvent::RoundOver]);
    }

    #[test]
    fn spec_scoring_sequence() {
        let mut state = running_state(10);
        state.time_remaining = 30.0;

        let bonus = item_on_catcher(&state, ItemKind::GoldenBell);
        state.items.push(bonus);
        tick(&mut state, &TickInput::default(), 0.001);
        assert_eq!(state.score, 5);
        assert_eq!(state.tally.get(ItemKind::GoldenBell), 1);

        for _ in 0..2 {
            let sock = item_on_catcher(&state, ItemKind::SmellySock);
            state.items.push(sock);
            tick(&mut state, &TickInput::default(), 0.001);
        }
        assert_eq!(state.lives, 1);

        let sock = item_on_catcher(&state, ItemKind::SmellySock);
        state.items.push(sock);
        tick(&mut state, &TickInput::default(), 0.001);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, RoundPhase::Running);

        tick(&mut state, &TickInput::default(), 0.001);
        assert!(state.is_over());
    }

    #[test]
    fn reset_restores_initial_values() {
        let mut state = running_state(11);
        let input = TickInput {
            move_left: false,
            move_right: true,
        };
        for _ in 0..600 {
            tick(&mut state, &input, DT);
        }
        assert!(state.score > 0 || !state.items.is_empty() || state.lives < STARTING_LIVES);

        state.reset(77);

        let mut fresh = RoundState::new(77, state.playfield);
        fresh.start();
        assert_eq!(state, fresh);
    }

    #[test]
    fn reset_is_available_in_every_phase() {
        // Mid-round reset abandons the round in progress
        let mut state = running_state(14);
        for _ in 0..300 {
            tick(&mut state, &TickInput::default(), DT);
        }
        state.reset(5);
        assert_eq!(state.phase, RoundPhase::Running);
        assert_eq!(state.score, 0);
        assert!(state.items.is_empty());

        // Reset out of the terminal phase starts a fresh round
        state.time_remaining = 0.01;
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.is_over());

        state.reset(6);
        assert_eq!(state.phase, RoundPhase::Running);
        assert_eq!(state.time_remaining, ROUND_SECONDS);
        assert_eq!(state.lives, STARTING_LIVES);
    }

    #[test]
    fn resize_reparks_catcher_and_rebounds_movement() {
        let mut state = running_state(15);
        state.items.push(item_on_catcher(&state, ItemKind::Notebook));
        let items_before = state.items.clone();

        let new_playfield = Vec2::new(400.0, 300.0);
        state.set_playfield(new_playfield);

        // Catcher re-parked at the bottom center of the new playfield
        assert_eq!(
            state.catcher.pos,
            Vec2::new(
                (new_playfield.x - CATCHER_WIDTH) / 2.0,
                new_playfield.y - CATCHER_HEIGHT - CATCHER_BOTTOM_MARGIN,
            )
        );
        // Items are untouched by a resize
        assert_eq!(state.items, items_before);

        // Movement clamps against the new right edge
        let input = TickInput {
            move_left: false,
            move_right: true,
        };
        for _ in 0..200 {
            tick(&mut state, &input, DT);
        }
        assert_eq!(state.catcher.pos.x, new_playfield.x - state.catcher.size.x);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut state = running_state(12);
        let x = state.catcher.pos.x;
        tick(
            &mut state,
            &TickInput {
                move_left: true,
                move_right: true,
            },
            DT,
        );
        assert_eq!(state.catcher.pos.x, x);
    }

    #[test]
    fn same_seed_replays_identically() {
        let mut a = running_state(99);
        let mut b = running_state(99);
        let inputs = [
            TickInput { move_left: true, move_right: false },
            TickInput::default(),
            TickInput { move_left: false, move_right: true },
        ];

        for i in 0..600 {
            let input = inputs[i % inputs.len()];
            tick(&mut a, &input, DT);
            tick(&mut b, &input, DT);
        }
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn catcher_never_leaves_playfield(
            moves in proptest::collection::vec((any::<bool>(), any::<bool>()), 0..600)
        ) {
            let mut state = running_state(13);
            for (move_left, move_right) in moves {
                tick(&mut state, &TickInput { move_left, move_right }, DT);
                prop_assert!(state.catcher.pos.x >= 0.0);
                prop_assert!(state.catcher.pos.x <= state.playfield.x - state.catcher.size.x);
            }
        }
    }
}
