//! Collision and consumption between the three populations
//!
//! Phases run in a fixed order each tick (player-food, player-AI, AI-food)
//! so a seeded run replays identically.

use super::collision::{EatResult, circles_overlap, size_contest};
use super::state::{FoodKind, GamePhase, GameState};

/// Player circles eat food dots.
///
/// Each dot goes to the first overlapping circle in population order. Growth
/// is applied after the scan so every overlap test in this phase sees the
/// sizes the phase started with.
pub fn players_eat_food(state: &mut GameState) {
    let ratio = state.tuning.food_growth_ratio;
    let mut growth = vec![0.0f32; state.players.len()];
    let mut bursts = Vec::new();
    let mut score = 0u64;
    let mut consumed = 0u32;

    let players = &state.players;
    state.food.retain(|dot| {
        let eater = players
            .iter()
            .position(|c| circles_overlap(c.pos, c.size, dot.pos, dot.size));
        match eater {
            Some(idx) => {
                if dot.kind == FoodKind::Regular {
                    score += dot.points as u64;
                    consumed += 1;
                }
                growth[idx] += dot.size * ratio;
                bursts.push((dot.pos, dot.color));
                false
            }
            None => true,
        }
    });

    for (c, g) in state.players.iter_mut().zip(&growth) {
        c.size += g;
    }
    state.score += score;
    state.objects_consumed += consumed;

    let count = state.tuning.food_particles;
    for (pos, color) in bursts {
        state.spawn_particles(pos, color, count);
    }

    state.refill_food();
}

/// Player circles and AI opponents eat each other.
///
/// Pairs are visited circle by circle, each against every AI in order. A
/// circle that gets eaten stops taking part; a circle that eats grows at
/// once, so later pairs see its new size. If the last circle is eaten the
/// phase transitions to `GameOver` and stops, after refilling the AI
/// population. Returns true on game over.
pub fn players_vs_ais(state: &mut GameState) -> bool {
    let ratio = state.tuning.eat_ratio;
    let growth_ratio = state.tuning.ai_growth_ratio;
    let mut game_over = false;

    let mut pi = 0;
    'players: while pi < state.players.len() {
        let mut ai_idx = 0;
        while ai_idx < state.ais.len() {
            let c = &state.players[pi];
            let ai = &state.ais[ai_idx];
            if !circles_overlap(c.pos, c.size, ai.pos, ai.size) {
                ai_idx += 1;
                continue;
            }

            match size_contest(c.size, ai.size, ratio) {
                EatResult::FirstEats => {
                    let ai = state.ais.remove(ai_idx);
                    state.players[pi].size += ai.size * growth_ratio;
                    state.score += ai.size.floor() as u64;
                    let count = state.tuning.ai_eaten_particles;
                    state.spawn_particles(ai.pos, ai.color, count);
                    log::debug!("Circle {} ate opponent {}", state.players[pi].id, ai.id);
                }
                EatResult::SecondEats => {
                    let eaten = state.players.remove(pi);
                    let count = state.tuning.player_eaten_particles;
                    state.spawn_particles(eaten.pos, eaten.color, count);
                    log::debug!("Opponent {} ate circle {}", state.ais[ai_idx].id, eaten.id);

                    if state.players.is_empty() {
                        state.eliminated_mass = eaten.size;
                        game_over = true;
                        break 'players;
                    }
                    // `pi` now indexes the next circle
                    continue 'players;
                }
                EatResult::Standoff => ai_idx += 1,
            }
        }
        pi += 1;
    }

    state.refill_ais();

    if game_over {
        state.phase = GamePhase::GameOver;
        log::info!("Game over: last circle eaten (score {})", state.score);
    }
    game_over
}

/// AI opponents eat food dots; each AI takes every dot it overlaps.
pub fn ais_eat_food(state: &mut GameState) {
    let ratio = state.tuning.food_growth_ratio;

    for ai in &mut state.ais {
        let mut growth = 0.0;
        state.food.retain(|dot| {
            if circles_overlap(ai.pos, ai.size, dot.pos, dot.size) {
                growth += dot.size * ratio;
                false
            } else {
                true
            }
        });
        ai.size += growth;
    }

    state.refill_food();
}
