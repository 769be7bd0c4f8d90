//! Player circle movement, merging, splitting and mass ejection

use glam::Vec2;

use super::collision::{overlap_for_merge, weighted_centroid};
use super::state::{FoodDot, GameState, PlayerCircle};
use crate::{clamp_to_world, direction_or_x};

/// Move every player circle along `direction`, then clamp to the world.
///
/// Smaller circles move faster. `direction` is expected to be normalized or
/// zero; it is applied as-is.
pub fn move_players(state: &mut GameState, direction: Vec2) {
    let tuning = &state.tuning;
    for c in &mut state.players {
        let speed = tuning.player_speed(c.size);
        c.pos = clamp_to_world(c.pos + direction * speed, c.size);
    }
}

/// Merge overlapping circles whose cooldowns have elapsed.
///
/// Pairs are scanned in index order; a circle absorbed this tick is skipped
/// for the rest of the scan and the first matching pair wins. The surviving
/// circle gets a fresh cooldown, so it merges at most once per tick.
pub fn merge_players(state: &mut GameState) {
    if state.players.len() < 2 {
        return;
    }

    let now = state.time_ms();
    let overlap = state.tuning.merge_overlap;
    let delay = state.tuning.merge_delay_ms;

    let circles = std::mem::take(&mut state.players);
    let mut absorbed = vec![false; circles.len()];
    let mut merged = Vec::with_capacity(circles.len());

    for i in 0..circles.len() {
        if absorbed[i] {
            continue;
        }
        let mut current = circles[i].clone();
        for j in (i + 1)..circles.len() {
            if absorbed[j] {
                continue;
            }
            let other = &circles[j];
            if overlap_for_merge(current.pos, current.size, other.pos, other.size, overlap)
                && current.can_merge(now)
                && other.can_merge(now)
            {
                current.pos = weighted_centroid(current.pos, current.size, other.pos, other.size);
                current.size += other.size;
                current.merge_at_ms = now + delay;
                absorbed[j] = true;
                log::debug!("Merged circle {} into {}", other.id, current.id);
            }
        }
        merged.push(current);
    }

    state.players = merged;
}

/// Split every eligible circle in two along `direction`.
///
/// Returns true if anything split. Children are appended after all existing
/// circles; the count never exceeds the cap.
pub fn split_players(state: &mut GameState, direction: Vec2) -> bool {
    if !state.can_split() {
        return false;
    }

    let now = state.time_ms();
    let dir = direction_or_x(direction);
    let max = state.tuning.max_player_circles;
    let min_size = state.tuning.min_size_to_split;
    let distance_factor = state.tuning.split_distance_factor;
    let recoil = state.tuning.split_recoil_divisor;
    let cooldown = now + state.tuning.merge_delay_ms;

    let existing = state.players.len();
    let mut children: Vec<(usize, Vec2, f32)> = Vec::new();

    for (idx, c) in state.players.iter_mut().enumerate() {
        if c.size < min_size || existing + children.len() >= max {
            continue;
        }
        let offset = dir * c.size * distance_factor;
        let half = c.size / 2.0;

        children.push((idx, c.pos + offset, half));

        c.size = half;
        c.pos = clamp_to_world(c.pos - offset / recoil, half);
        c.merge_at_ms = cooldown;
    }

    for (parent, pos, size) in children.iter().copied() {
        let id = state.next_entity_id();
        let color = state.players[parent].color;
        state.players.push(PlayerCircle {
            id,
            pos: clamp_to_world(pos, size),
            size,
            color,
            merge_at_ms: cooldown,
        });
    }

    log::debug!("Split into {} circles", state.players.len());
    !children.is_empty()
}

/// Eject a small blob of mass from up to the tuned number of circles.
///
/// Ejected dots join the food population but never score. Returns how many
/// blobs were ejected.
pub fn eject_mass(state: &mut GameState, direction: Vec2) -> usize {
    let dir = direction_or_x(direction);
    let min_size = state.tuning.min_size_to_eject;
    let mass_size = state.tuning.ejected_mass_size;
    let cost = state.tuning.ejected_mass_cost;
    let limit = state.tuning.max_ejections_per_press;

    let mut blobs: Vec<(Vec2, u32)> = Vec::new();
    for c in &mut state.players {
        if blobs.len() >= limit || c.size <= min_size {
            continue;
        }
        let pos = c.pos + dir * (c.size / 2.0 + mass_size);
        blobs.push((clamp_to_world(pos, mass_size), c.color));
        c.size -= cost;
    }

    let min_viable = state.tuning.min_viable_size;
    state.players.retain(|c| c.size > min_viable);

    for (pos, color) in blobs.iter().copied() {
        let id = state.next_entity_id();
        state.food.push(FoodDot::ejected(id, pos, mass_size, color));
    }

    if !blobs.is_empty() {
        log::debug!("Ejected {} blobs of mass", blobs.len());
    }
    blobs.len()
}
