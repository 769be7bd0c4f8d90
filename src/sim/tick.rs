//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically, one 50 ms
//! step at a time.

use glam::Vec2;

use super::ai::{autopilot_direction, update_ais};
use super::consume::{ais_eat_food, players_eat_food, players_vs_ais};
use super::movement::{eject_mass, merge_players, move_players, split_players};
use super::state::{GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Normalized movement direction (zero = stand still)
    pub direction: Vec2,
    /// Split every eligible circle
    pub split: bool,
    /// Eject mass from up to five circles
    pub eject: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - the autopilot steers
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    let direction = if input.idle_mode {
        autopilot_direction(state)
    } else {
        input.direction
    };

    // Discrete input latched since the last tick
    if input.split {
        split_players(state, direction);
    }
    if input.eject {
        eject_mass(state, direction);
    }
    if state.players.is_empty() {
        state.phase = GamePhase::GameOver;
        finish_tick(state);
        return;
    }

    // 1. Player movement and merging
    move_players(state, direction);
    merge_players(state);

    // 2. AI steering
    update_ais(state);

    // 3. Player vs food
    players_eat_food(state);

    // 4. Player vs AI; losing the last circle skips the remaining phases
    if players_vs_ais(state) {
        finish_tick(state);
        return;
    }

    // 5. AI vs food
    ais_eat_food(state);

    finish_tick(state);
}

/// Bookkeeping that runs after every tick, including the one that ends the game
fn finish_tick(state: &mut GameState) {
    state.enforce_bounds();
    state.age_particles();
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::consts::WORLD_SIZE;
    use crate::sim::state::{AiOpponent, FoodDot, PlayerCircle};
    use crate::tuning::Tuning;

    fn in_bounds(pos: Vec2, size: f32) -> bool {
        let half = size / 2.0;
        let lo = half - 1e-3;
        let hi = WORLD_SIZE - half + 1e-3;
        pos.x >= lo && pos.x <= hi && pos.y >= lo && pos.y <= hi
    }

    fn assert_world_invariants(state: &GameState) {
        for c in &state.players {
            assert!(in_bounds(c.pos, c.size), "player {:?} out of bounds", c);
            assert!(c.size > 0.0);
        }
        for ai in &state.ais {
            assert!(in_bounds(ai.pos, ai.size), "ai {:?} out of bounds", ai);
        }
        for dot in &state.food {
            assert!(in_bounds(dot.pos, dot.size), "food {:?} out of bounds", dot);
        }
        assert!(state.food.len() >= state.tuning.food_count);
        assert!(state.ais.len() >= state.tuning.ai_count);
    }

    #[test]
    fn test_tick_advances_time() {
        let mut state = GameState::new(12345, Tuning::default());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.time_ms(), 50);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = GameState::new(12345, Tuning::default());

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.time_ticks, 0);

        // Paused ticks do nothing
        let before = state.players.clone();
        tick(
            &mut state,
            &TickInput {
                direction: Vec2::X,
                ..Default::default()
            },
        );
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.players, before);

        // Unpause resumes on the same tick
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_split_input_applies_before_movement() {
        let mut state = GameState::empty(1, Tuning::default());
        state.players[0].size = 60.0;
        tick(
            &mut state,
            &TickInput {
                direction: Vec2::X,
                split: true,
                ..Default::default()
            },
        );
        assert_eq!(state.players.len(), 2);
        // Cooldown is relative to the tick's own timestamp
        assert_eq!(state.players[0].merge_at_ms, 50 + 5000);
    }

    #[test]
    fn test_game_over_skips_ai_food_phase() {
        let tuning = Tuning {
            food_count: 0,
            ai_count: 1,
            ..Tuning::default()
        };
        let mut state = GameState::empty(3, tuning);
        let center = state.players[0].pos;

        let id = state.next_entity_id();
        state.ais.push(AiOpponent {
            id,
            pos: center,
            size: 80.0,
            color: 0,
            vel: Vec2::ZERO,
            target: Some(center),
            last_target_change_ms: 0,
        });
        // Food under the AI but away from the player
        let dot = state.next_entity_id();
        state
            .food
            .push(FoodDot::regular(dot, center + Vec2::new(30.0, 0.0), 6.0, 0));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.players.is_empty());
        // The AI would have eaten the dot in phase 5
        assert_eq!(state.food.len(), 1);
        assert_eq!(state.ais.len(), 1);

        // Further ticks are ignored
        let t = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, t);
    }

    #[test]
    fn test_eating_ten_dots() {
        let tuning = Tuning {
            food_count: 0,
            ai_count: 0,
            ..Tuning::default()
        };
        let mut state = GameState::empty(9, tuning);
        let center = state.players[0].pos;
        let sizes = [4.0, 4.5, 5.0, 5.0, 5.5, 4.0, 6.0, 5.5, 4.5, 6.0];
        let total: f32 = sizes.iter().sum();
        assert_eq!(total, 50.0);
        let expected_score: u64 = sizes.iter().map(|s: &f32| s.floor() as u64).sum();

        for (i, size) in sizes.iter().enumerate() {
            let id = state.next_entity_id();
            let offset = Vec2::new((i as f32 - 4.5) * 2.0, 0.0);
            state
                .food
                .push(FoodDot::regular(id, center + offset, *size, 0));
        }

        tick(&mut state, &TickInput::default());

        assert!(state.food.is_empty());
        assert!((state.total_mass() - 35.0).abs() < 1e-4);
        assert_eq!(state.score, expected_score);
        assert_eq!(state.objects_consumed, 10);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999, Tuning::default());
        let mut state2 = GameState::new(99999, Tuning::default());

        let inputs = [
            TickInput {
                direction: Vec2::new(0.6, 0.8),
                ..Default::default()
            },
            TickInput {
                direction: Vec2::new(-1.0, 0.0),
                eject: true,
                ..Default::default()
            },
            TickInput {
                idle_mode: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.players, state2.players);
        assert_eq!(state1.ais, state2.ais);
        assert_eq!(state1.food, state2.food);
        assert_eq!(state1.score, state2.score);
    }

    #[test]
    fn test_split_then_merge_over_time() {
        let tuning = Tuning {
            food_count: 0,
            ai_count: 0,
            ..Tuning::default()
        };
        let mut state = GameState::empty(2, tuning);
        state.players[0].size = 60.0;
        tick(
            &mut state,
            &TickInput {
                direction: Vec2::X,
                split: true,
                ..Default::default()
            },
        );
        assert_eq!(state.players.len(), 2);

        // Bring the halves together; nothing merges before the cooldown
        let p = state.players[0].pos;
        state.players[1].pos = p;
        for _ in 0..99 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.players.len(), 2);

        for _ in 0..2 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.players.len(), 1);
        assert!((state.players[0].size - 60.0).abs() < 1e-4);
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (
            -1.0f32..1.0,
            -1.0f32..1.0,
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(|(x, y, split, eject, idle_mode)| TickInput {
                direction: Vec2::new(x, y).normalize_or_zero(),
                split,
                eject,
                pause: false,
                idle_mode,
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_world_invariants_hold(
            seed in any::<u64>(),
            inputs in proptest::collection::vec(arb_input(), 1..120),
        ) {
            let mut state = GameState::new(seed, Tuning::default());
            for input in &inputs {
                tick(&mut state, input);
                assert_world_invariants(&state);
                if state.phase == GamePhase::GameOver {
                    break;
                }
            }
            prop_assert!(state.players.len() <= state.tuning.max_player_circles);
        }

        #[test]
        fn prop_split_conserves_mass(size in 50.0f32..400.0, x in -1.0f32..1.0, y in -1.0f32..1.0) {
            let mut state = GameState::empty(1, Tuning::default());
            state.players[0].size = size;
            split_players(&mut state, Vec2::new(x, y));
            prop_assert_eq!(state.players.len(), 2);
            prop_assert!((state.total_mass() - size).abs() < 1e-3);
            prop_assert_eq!(state.players[0].size, state.players[1].size);
        }
    }

    #[test]
    fn test_circle_below_min_viable_is_removed_by_eject() {
        let tuning = Tuning {
            min_size_to_eject: 4.0,
            ..Tuning::default()
        };
        let mut state = GameState::empty(1, tuning);
        state.players[0].size = 9.0;
        let id = state.next_entity_id();
        state
            .players
            .push(PlayerCircle::new(id, Vec2::new(200.0, 200.0), 40.0));

        eject_mass(&mut state, Vec2::X);

        assert_eq!(state.players.len(), 1);
        assert_eq!(state.players[0].id, id);
        assert_eq!(state.players[0].size, 35.0);
    }
}
