//! AI opponent steering, plus the autopilot used for demo runs
//!
//! Each opponent re-evaluates every tick: flee the nearest larger player
//! circle, else chase the nearest smaller one, else wander between random
//! points.

use glam::Vec2;

use super::state::{AiOpponent, GameState, PlayerCircle};
use crate::{clamp_to_world, direction_or_x};

/// What an opponent decided to do this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Steering {
    /// Run directly away from a threat
    Flee { from: Vec2 },
    /// Chase a smaller player circle
    Pursue { prey: Vec2 },
    /// Keep heading for the current wander target (or pick a new one)
    Wander,
}

/// Nearest circle matching `pred`, with its distance
fn nearest<'a>(
    pos: Vec2,
    players: &'a [PlayerCircle],
    pred: impl Fn(&PlayerCircle) -> bool,
) -> Option<(&'a PlayerCircle, f32)> {
    players
        .iter()
        .filter(|p| pred(p))
        .map(|p| (p, p.pos.distance(pos)))
        .fold(None, |best, (p, d)| match best {
            Some((_, bd)) if d >= bd => best,
            _ => Some((p, d)),
        })
}

/// Decide how an opponent should steer given the player's circles
pub fn choose_steering(
    ai: &AiOpponent,
    players: &[PlayerCircle],
    threat_ratio: f32,
    flee_radius: f32,
    pursue_radius: f32,
) -> Steering {
    let threat = nearest(ai.pos, players, |p| p.size > ai.size * threat_ratio);
    if let Some((p, dist)) = threat {
        if dist < flee_radius {
            return Steering::Flee { from: p.pos };
        }
    }

    let prey = nearest(ai.pos, players, |p| ai.size > p.size * threat_ratio);
    if let Some((p, dist)) = prey {
        if dist < pursue_radius {
            return Steering::Pursue { prey: p.pos };
        }
    }

    Steering::Wander
}

/// Steer and move every AI opponent
pub fn update_ais(state: &mut GameState) {
    let now = state.time_ms();

    for idx in 0..state.ais.len() {
        let tuning = &state.tuning;
        let ai = &state.ais[idx];
        let steering = choose_steering(
            ai,
            &state.players,
            tuning.ai_threat_ratio,
            tuning.ai_flee_radius,
            tuning.ai_pursue_radius,
        );

        let target = match steering {
            Steering::Flee { from } => {
                let away = direction_or_x(ai.pos - from);
                Some(ai.pos + away * tuning.ai_flee_distance)
            }
            Steering::Pursue { prey } => Some(prey),
            Steering::Wander => {
                let expired = now.saturating_sub(ai.last_target_change_ms) > tuning.ai_wander_ms;
                if ai.target.is_none() || expired {
                    Some(state.random_world_point())
                } else {
                    None
                }
            }
        };

        let ai = &mut state.ais[idx];
        if let Some(t) = target {
            ai.target = Some(t);
            ai.last_target_change_ms = now;
        }

        let speed = state.tuning.ai_speed(ai.size);
        let bearing = ai
            .target
            .map(|t| (t - ai.pos).normalize_or_zero())
            .unwrap_or(Vec2::ZERO);
        ai.vel = bearing * speed;
        ai.pos = clamp_to_world(ai.pos + ai.vel, ai.size);
    }
}

/// Direction for demo mode: flee nearby bigger opponents, else go for food
pub fn autopilot_direction(state: &GameState) -> Vec2 {
    let Some(me) = state.largest_player() else {
        return Vec2::ZERO;
    };

    let tuning = &state.tuning;
    let threat = state
        .ais
        .iter()
        .filter(|ai| ai.size > me.size * tuning.eat_ratio)
        .map(|ai| (ai, ai.pos.distance(me.pos)))
        .filter(|(_, d)| *d < tuning.ai_flee_radius)
        .min_by(|a, b| a.1.total_cmp(&b.1));
    if let Some((ai, _)) = threat {
        return (me.pos - ai.pos).normalize_or_zero();
    }

    let prey = state
        .ais
        .iter()
        .filter(|ai| me.size > ai.size * tuning.eat_ratio)
        .map(|ai| (ai.pos, ai.pos.distance(me.pos)));
    let food = state
        .food
        .iter()
        .map(|dot| (dot.pos, dot.pos.distance(me.pos)));

    prey.chain(food)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(pos, _)| (pos - me.pos).normalize_or_zero())
        .unwrap_or(Vec2::ZERO)
}
