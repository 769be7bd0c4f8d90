//! Session driver
//!
//! Owns the player profile, the storage backend and at most one running
//! [`GameState`]. Frame time is accumulated and consumed in fixed 50 ms
//! ticks; ending a game (voluntarily or by elimination) records its summary
//! into the profile exactly once.

use glam::Vec2;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::persistence::{self, GameReward, Profile};
use crate::platform::{DragTracker, KeyValueStore};
use crate::settings::Settings;
use crate::sim::{Camera, GamePhase, GameState, Sprite, TickInput, tick};
use crate::stats::{GameSummary, format_clock};
use crate::tuning::Tuning;
use crate::upgrades::{PurchaseError, UpgradeKind};

/// Values shown in the in-game HUD
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub score: u64,
    /// `m:ss`
    pub clock: String,
    /// Floor of the total player size
    pub size: u32,
    pub can_split: bool,
    pub can_eject: bool,
    pub phase: GamePhase,
}

/// Summary of a game's current progress.
///
/// The reported size is the current total mass, or after an elimination the
/// size of the last circle when it was eaten.
pub fn summarize(state: &GameState) -> GameSummary {
    let final_size = if state.is_over() {
        state.eliminated_mass
    } else {
        state.total_mass()
    };
    GameSummary {
        score: state.score,
        objects_consumed: state.objects_consumed,
        final_size,
        minutes_played: state.minutes_played(),
    }
}

/// Game instance holding all state
pub struct Game<S: KeyValueStore> {
    store: S,
    profile: Profile,
    settings: Settings,
    tuning: Tuning,
    session: Option<GameState>,
    /// Set once the running session's summary is in the profile
    recorded: bool,
    accumulator: f32,
    input: TickInput,
    drag: DragTracker,
    camera: Camera,
}

impl<S: KeyValueStore> Game<S> {
    /// Load the profile and settings from `store`
    pub fn new(store: S, tuning: Tuning) -> Self {
        let profile = Profile::load(&store);
        let settings = persistence::load_settings(&store);
        let camera = Camera::new(settings.viewport());
        Self {
            store,
            profile,
            settings,
            tuning,
            session: None,
            recorded: false,
            accumulator: 0.0,
            input: TickInput::default(),
            drag: DragTracker::new(),
            camera,
        }
    }

    /// Start a new game, replacing (and recording) any running one
    pub fn start(&mut self, seed: u64) {
        self.reset();

        let mut state = GameState::new(seed, self.tuning.clone());
        state.max_particles = self.settings.max_particles();
        self.camera = Camera::new(self.settings.viewport());
        self.camera.follow(&state);

        self.session = Some(state);
        self.recorded = false;
        self.accumulator = 0.0;
        self.input = TickInput::default();
        self.drag = DragTracker::new();
        log::info!("Game started with seed: {}", seed);
    }

    /// End the running game voluntarily. Returns what recording it earned,
    /// or `None` if there was nothing left to record.
    pub fn reset(&mut self) -> Option<GameReward> {
        let reward = self.record_session();
        self.session = None;
        self.accumulator = 0.0;
        reward
    }

    /// Run simulation ticks for `dt` seconds of frame time
    pub fn update(&mut self, dt: f32) {
        let Some(phase) = self.session.as_ref().map(|s| s.phase) else {
            return;
        };
        // No catch-up while paused or after the end
        if phase != GamePhase::Playing && !self.input.pause {
            self.accumulator = 0.0;
            return;
        }

        self.accumulator += dt.max(0.0);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
            self.step();

            let phase = self.session.as_ref().map(|s| s.phase);
            if phase != Some(GamePhase::Playing) {
                self.accumulator = 0.0;
                break;
            }
        }

        // Spiral of death: drop time we couldn't simulate
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
    }

    /// Run exactly one tick with the latched input
    pub fn step(&mut self) {
        let Some(state) = self.session.as_mut() else {
            return;
        };

        let input = self.input.clone();
        tick(state, &input);

        // Clear one-shot inputs after processing
        self.input.split = false;
        self.input.eject = false;
        self.input.pause = false;

        self.camera.follow(state);

        if state.is_over() {
            log::info!(
                "Game over: score {}, {} objects",
                state.score,
                state.objects_consumed
            );
            self.record_session();
        }
    }

    fn record_session(&mut self) -> Option<GameReward> {
        if self.recorded {
            return None;
        }
        let state = self.session.as_ref()?;
        let summary = summarize(state);
        self.recorded = true;
        Some(self.profile.record_game(&summary, &mut self.store))
    }

    pub fn toggle_pause(&mut self) {
        self.input.pause = true;
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.input.idle_mode = idle;
        log::info!("Idle mode: {}", idle);
    }

    /// Set the movement direction directly (normalized here)
    pub fn set_direction(&mut self, dir: Vec2) {
        self.input.direction = dir.normalize_or_zero();
    }

    pub fn drag_start(&mut self, pos: Vec2) {
        self.drag.start(pos);
    }

    pub fn drag_to(&mut self, pos: Vec2) {
        if let Some(dir) = self.drag.drag_to(pos) {
            self.input.direction = dir;
        }
    }

    pub fn drag_end(&mut self) {
        self.drag.end();
    }

    /// Latch a split for the next tick
    pub fn request_split(&mut self) {
        self.input.split = true;
    }

    /// Latch an eject for the next tick
    pub fn request_eject(&mut self) {
        self.input.eject = true;
    }

    pub fn hud(&self) -> Option<Hud> {
        let state = self.session.as_ref()?;
        Some(Hud {
            score: state.score,
            clock: format_clock(state.time_ms() / 1000),
            size: state.total_mass().floor() as u32,
            can_split: state.can_split(),
            can_eject: state.can_eject(),
            phase: state.phase,
        })
    }

    /// Sprites to draw this frame, back to front
    pub fn frame(&self) -> Vec<Sprite> {
        self.session
            .as_ref()
            .map(|s| self.camera.frame(s))
            .unwrap_or_default()
    }

    pub fn purchase(&mut self, kind: UpgradeKind) -> Result<u32, PurchaseError> {
        self.profile.purchase(kind, &mut self.store)
    }

    pub fn set_settings(&mut self, settings: Settings) {
        persistence::save_settings(&settings, &mut self.store);
        self.camera.viewport = settings.viewport();
        if let Some(state) = self.session.as_mut() {
            state.max_particles = settings.max_particles();
            self.camera.follow(state);
        }
        self.settings = settings;
    }

    pub fn state(&self) -> Option<&GameState> {
        self.session.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut GameState> {
        self.session.as_mut()
    }

    pub fn is_running(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.phase != GamePhase::GameOver)
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{BrokenStore, MemoryStore};
    use crate::sim::AiOpponent;
    use crate::world_center;

    fn quiet_tuning() -> Tuning {
        Tuning {
            food_count: 0,
            ai_count: 0,
            ..Tuning::default()
        }
    }

    fn game() -> Game<MemoryStore> {
        let mut game = Game::new(MemoryStore::new(), quiet_tuning());
        game.start(7);
        game
    }

    #[test]
    fn test_update_runs_whole_ticks() {
        let mut game = game();
        game.update(0.12);
        assert_eq!(game.state().unwrap().time_ticks, 2);
        game.update(0.04);
        assert_eq!(game.state().unwrap().time_ticks, 3);
    }

    #[test]
    fn test_update_caps_substeps() {
        let mut game = game();
        game.update(10.0);
        assert_eq!(game.state().unwrap().time_ticks, MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_pause_stops_time() {
        let mut game = game();
        game.step();
        game.toggle_pause();
        game.update(1.0);
        assert_eq!(game.state().unwrap().phase, GamePhase::Paused);
        let t = game.state().unwrap().time_ticks;

        game.update(1.0);
        assert_eq!(game.state().unwrap().time_ticks, t);

        game.toggle_pause();
        game.step();
        assert_eq!(game.state().unwrap().phase, GamePhase::Playing);
        assert!(game.state().unwrap().time_ticks > t);
    }

    #[test]
    fn test_split_is_one_shot() {
        let mut game = game();
        game.state_mut().unwrap().players[0].size = 200.0;
        game.set_direction(Vec2::new(3.0, 0.0));
        game.request_split();
        game.step();
        assert_eq!(game.state().unwrap().players.len(), 2);
        game.step();
        assert_eq!(game.state().unwrap().players.len(), 2);
    }

    #[test]
    fn test_drag_sets_direction() {
        let mut game = game();
        game.drag_start(Vec2::new(100.0, 100.0));
        game.drag_to(Vec2::new(102.0, 100.0));
        game.step();
        assert_eq!(game.state().unwrap().players[0].pos, world_center());

        game.drag_to(Vec2::new(100.0, 50.0));
        game.step();
        let pos = game.state().unwrap().players[0].pos;
        assert!(pos.y < world_center().y);
        assert_eq!(pos.x, world_center().x);
    }

    #[test]
    fn test_hud_values() {
        let mut game = game();
        {
            let state = game.state_mut().unwrap();
            state.score = 42;
            state.players[0].size = 60.7;
            state.time_ticks = 20 * 125;
        }
        let hud = game.hud().unwrap();
        assert_eq!(hud.score, 42);
        assert_eq!(hud.clock, "2:05");
        assert_eq!(hud.size, 60);
        assert!(hud.can_split);
        assert!(hud.can_eject);
    }

    #[test]
    fn test_reset_records_summary_into_profile() {
        let mut game = game();
        {
            let state = game.state_mut().unwrap();
            state.score = 1000;
            state.objects_consumed = 50;
            state.players[0].size = 80.0;
            state.time_ticks = 2 * 60 * 20;
        }

        let reward = game.reset().unwrap();
        assert_eq!(reward.coins_earned, 100);

        let stats = &game.profile().stats;
        assert_eq!(stats.total_score, 1000);
        assert_eq!(stats.best_score, 1000);
        assert_eq!(stats.games_played, 1);
        assert_eq!(stats.total_objects_consumed, 50);
        assert_eq!(stats.total_time_played, 2);
        assert_eq!(stats.largest_size, 80.0);
        assert_eq!(stats.total_coins_earned, 100);
        assert!(game.state().is_none());

        // Nothing left to record
        assert!(game.reset().is_none());
        assert_eq!(game.profile().stats.games_played, 1);

        let reloaded = Profile::load(game.store());
        assert_eq!(reloaded.stats.total_score, 1000);
    }

    #[test]
    fn test_elimination_records_once() {
        let mut game = game();
        {
            let state = game.state_mut().unwrap();
            state.score = 30;
            let id = state.next_entity_id();
            state.ais.push(AiOpponent {
                id,
                pos: world_center(),
                size: 100.0,
                color: 0,
                vel: Vec2::ZERO,
                target: None,
                last_target_change_ms: 0,
            });
        }

        game.update(0.2);
        let state = game.state().unwrap();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.time_ticks, 1);
        assert!(!game.is_running());
        assert_eq!(game.profile().stats.games_played, 1);
        assert_eq!(game.profile().stats.largest_size, 30.0);

        game.update(1.0);
        assert!(game.reset().is_none());
        assert_eq!(game.profile().stats.games_played, 1);
    }

    #[test]
    fn test_reset_reports_size_after_ejecting() {
        let mut game = game();
        game.state_mut().unwrap().players[0].size = 80.0;
        game.set_direction(Vec2::X);
        for _ in 0..6 {
            game.request_eject();
            game.step();
        }
        let final_mass = game.state().unwrap().total_mass();
        assert_eq!(final_mass, 50.0);

        game.reset().unwrap();
        assert_eq!(game.profile().stats.largest_size, 50.0);
    }

    #[test]
    fn test_broken_storage_does_not_stop_play() {
        let mut game = Game::new(BrokenStore, quiet_tuning());
        assert_eq!(game.profile().stats.games_played, 0);

        game.start(3);
        game.state_mut().unwrap().score = 250;
        game.update(0.5);
        assert_eq!(game.state().unwrap().time_ticks, 8);

        let reward = game.reset().unwrap();
        assert_eq!(reward.coins_earned, 25);
        assert!(game.state().is_none());
        assert_eq!(game.profile().stats.games_played, 1);
        assert_eq!(game.profile().stats.best_score, 250);

        game.start(4);
        assert!(game.is_running());
    }

    #[test]
    fn test_start_records_previous_game() {
        let mut game = game();
        game.state_mut().unwrap().score = 500;
        game.start(8);
        assert_eq!(game.profile().stats.games_played, 1);
        assert_eq!(game.profile().stats.best_score, 500);
        assert_eq!(game.state().unwrap().score, 0);
    }

    #[test]
    fn test_settings_apply_to_session() {
        let mut game = game();
        let settings = Settings {
            reduced_motion: true,
            viewport_width: 800.0,
            viewport_height: 600.0,
            ..Settings::default()
        };
        game.set_settings(settings.clone());

        assert_eq!(game.state().unwrap().max_particles, 0);
        assert_eq!(game.camera().viewport, Vec2::new(800.0, 600.0));
        assert_eq!(persistence::load_settings(game.store()), settings);
    }

    #[test]
    fn test_frame_centers_player() {
        let game = game();
        let sprites = game.frame();
        let player = sprites.last().unwrap();
        let viewport = game.settings().viewport();
        assert_eq!(player.screen_pos, viewport / 2.0 - 15.0);
    }
}
