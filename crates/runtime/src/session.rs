//! One play session: the player, the encounter and the two clocks that drive
//! them.

use game_core::{Aim, Combatant, GameConfig, Level, PlayerState};
use glam::Vec2;
use tracing::info;

use crate::clock::FrameClock;
use crate::encounter::{EncounterEvent, EncounterManager};
use crate::enemy::EnemyHandle;
use crate::error::Result;

/// Player intent for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Per-axis movement; only the sign of each component matters.
    pub movement: Vec2,
    pub swing: bool,
    pub fire: Option<Aim>,
    /// Collectibles picked up since the previous frame.
    pub picked_up_items: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Playing,
    Won,
    Lost,
}

/// What happened during one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub fixed_steps: u32,
    pub enemies_ticked: usize,
    /// Sword and arrow hits the player landed.
    pub hits_landed: usize,
    pub damage_taken: i32,
    pub died: Vec<EnemyHandle>,
    pub player_respawned: bool,
    pub events: Vec<EncounterEvent>,
    pub state: SessionState,
}

pub struct Session {
    encounter: EncounterManager,
    player: PlayerState,
    clock: FrameClock,
    respawn_point: Vec2,
    collected_items: u32,
    state: SessionState,
}

impl Session {
    pub fn new(config: GameConfig, level: Level) -> Result<Self> {
        let clock = FrameClock::from_config(&config);
        let player = PlayerState::new(config.player.clone(), level.player_start);
        let respawn_point = level.player_start;
        let encounter = EncounterManager::new(config, level)?;
        Ok(Self {
            encounter,
            player,
            clock,
            respawn_point,
            collected_items: 0,
            state: SessionState::Playing,
        })
    }

    pub fn encounter(&self) -> &EncounterManager {
        &self.encounter
    }

    pub fn encounter_mut(&mut self) -> &mut EncounterManager {
        &mut self.encounter
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn collected_items(&self) -> u32 {
        self.collected_items
    }

    /// Moves the checkpoint the player returns to after dying.
    pub fn set_respawn_point(&mut self, point: Vec2) {
        self.respawn_point = point;
    }

    /// Runs one frame of `dt` seconds.
    ///
    /// Every enemy decision tick happens before this frame's fixed steps, so a
    /// route installed now is first followed on the next fixed step. Once the
    /// session is won or lost, frames do nothing.
    pub fn frame(&mut self, dt: f32, input: &FrameInput) -> FrameReport {
        let mut report = FrameReport {
            state: self.state,
            ..FrameReport::default()
        };
        if self.state != SessionState::Playing {
            return report;
        }

        self.collected_items += input.picked_up_items;
        report.hits_landed += self.player_phase(dt, input);

        if let Some(room) = self.encounter.room_at(self.player.midpoint()) {
            self.encounter.enter_room(room, self.collected_items);
        }

        let health_before = self.player.health();
        report.enemies_ticked = self.encounter.tick_decisions(dt, &mut self.player);
        self.encounter.resolve_enemy_projectiles(dt, &mut self.player);
        report.damage_taken = (health_before - self.player.health()).max(0);

        report.hits_landed += self.encounter.resolve_player_arrows(dt, &mut self.player);
        report.died = self.encounter.retire_dead();

        if self.player.is_dead() {
            self.encounter.retract_all();
            if self.player.respawn(self.respawn_point) {
                report.player_respawned = true;
                info!(lives = self.player.lives(), "player respawned");
            } else {
                self.state = SessionState::Lost;
                info!("player out of lives");
            }
        }

        report.fixed_steps = self.clock.advance(dt);
        let fixed_timestep = self.clock.fixed_timestep();
        for _ in 0..report.fixed_steps {
            self.encounter.fixed_step(fixed_timestep, self.player.midpoint());
        }

        if self.state == SessionState::Playing
            && self.encounter.is_cleared()
            && self.collected_items >= self.encounter.required_items()
        {
            self.state = SessionState::Won;
            info!(items = self.collected_items, "level cleared");
        }

        report.events = self.encounter.drain_events();
        report.state = self.state;
        report
    }

    fn player_phase(&mut self, dt: f32, input: &FrameInput) -> usize {
        self.player.advance_timers(dt, self.encounter.config());
        if self.player.is_dead() {
            return 0;
        }
        self.player
            .apply_movement(input.movement, dt, self.encounter.grid());

        let mut hits = 0;
        if input.swing
            && let Some(hitbox) = self.player.swing(self.encounter.config())
        {
            hits = self.encounter.resolve_player_swing(&self.player, hitbox);
        }
        if let Some(aim) = input.fire {
            self.player.fire_arrow(aim, self.encounter.config());
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{
        Archetype, CostGrid, DamageType, MapDimensions, RoomBounds, RoomGate, RoomId,
        SpawnRecord, TileCoord,
    };

    fn level(spawns: Vec<SpawnRecord>, gates: Vec<RoomGate>) -> Level {
        let mut grid = CostGrid::filled(MapDimensions::new(20, 12), 16.0, 10).unwrap();
        grid.fill_rect(TileCoord::new(1, 1), TileCoord::new(18, 10), 1);
        Level {
            grid,
            rooms: vec![RoomBounds::new(
                RoomId(1),
                TileCoord::new(1, 1),
                TileCoord::new(18, 10),
            )],
            spawns,
            gates,
            player_start: Vec2::new(32.0, 32.0),
        }
    }

    fn one_melee() -> Vec<SpawnRecord> {
        vec![SpawnRecord::new(RoomId(1), Archetype::Melee, 240.0, 96.0)]
    }

    #[test]
    fn empty_level_is_won_immediately() {
        let mut session = Session::new(GameConfig::default(), level(Vec::new(), Vec::new())).unwrap();
        let report = session.frame(0.016, &FrameInput::default());
        assert_eq!(report.state, SessionState::Won);
        assert_eq!(session.frame(0.016, &FrameInput::default()).fixed_steps, 0);
    }

    #[test]
    fn entering_the_room_spawns_and_ticks_enemies() {
        let mut session = Session::new(GameConfig::default(), level(one_melee(), Vec::new())).unwrap();
        let report = session.frame(0.016, &FrameInput::default());
        assert_eq!(report.enemies_ticked, 1);
        assert!(matches!(report.events[0], EncounterEvent::Spawned { .. }));
        assert_eq!(report.state, SessionState::Playing);
    }

    #[test]
    fn win_waits_for_collectibles() {
        let gates = vec![RoomGate {
            room: RoomId(2),
            required_items: 2,
        }];
        let mut session = Session::new(GameConfig::default(), level(Vec::new(), gates)).unwrap();
        assert_eq!(session.frame(0.016, &FrameInput::default()).state, SessionState::Playing);

        let input = FrameInput {
            picked_up_items: 2,
            ..FrameInput::default()
        };
        assert_eq!(session.frame(0.016, &input).state, SessionState::Won);
    }

    #[test]
    fn enemy_killed_by_a_swing_does_not_strike_back() {
        let mut session = Session::new(GameConfig::default(), level(Vec::new(), Vec::new())).unwrap();
        let config = session.encounter().config().clone();
        let anchor = session.player().midpoint();
        let handle = session
            .encounter_mut()
            .spawn(Archetype::Melee, RoomId(1), 16.0, 32.0);
        session
            .encounter_mut()
            .apply_damage(handle, 99, DamageType::Normal, anchor)
            .unwrap();
        let controller = session.encounter_mut().enemy_mut(handle).unwrap().controller_mut();
        controller.advance_timers(2.0, &config);
        controller.reset_reroute_timer();

        // Facing left puts the swing over the enemy, whose own attack is ready.
        let input = FrameInput {
            movement: Vec2::new(-1.0, 0.0),
            swing: true,
            ..FrameInput::default()
        };
        let report = session.frame(0.016, &input);

        assert_eq!(report.hits_landed, 1);
        assert_eq!(report.died, vec![handle]);
        assert_eq!(report.enemies_ticked, 0);
        assert_eq!(report.damage_taken, 0);
        assert_eq!(session.player().health(), 100);
    }

    #[test]
    fn player_death_retracts_and_respawns() {
        let mut session = Session::new(GameConfig::default(), level(one_melee(), Vec::new())).unwrap();
        session.frame(0.016, &FrameInput::default());
        session.set_respawn_point(Vec2::new(48.0, 48.0));
        session.player_mut().receive_damage(500, DamageType::Normal);

        let report = session.frame(0.016, &FrameInput::default());
        assert!(report.player_respawned);
        assert!(report.events.contains(&EncounterEvent::Retracted { count: 1 }));
        assert_eq!(session.player().position(), Vec2::new(48.0, 48.0));
        assert_eq!(session.player().lives(), 2);
        assert!(session.encounter().active().is_empty());

        let report = session.frame(0.016, &FrameInput::default());
        assert_eq!(report.enemies_ticked, 1);
    }

    #[test]
    fn running_out_of_lives_loses() {
        let mut session = Session::new(GameConfig::default(), level(one_melee(), Vec::new())).unwrap();
        for _ in 0..3 {
            session.player_mut().receive_damage(500, DamageType::Normal);
            assert!(session.frame(0.016, &FrameInput::default()).player_respawned);
        }
        session.player_mut().receive_damage(500, DamageType::Normal);
        assert_eq!(session.frame(0.016, &FrameInput::default()).state, SessionState::Lost);
        assert_eq!(session.state(), SessionState::Lost);
    }

    #[test]
    fn long_frames_are_capped_to_max_fixed_steps() {
        let mut session = Session::new(GameConfig::default(), level(one_melee(), Vec::new())).unwrap();
        assert_eq!(session.frame(1.0, &FrameInput::default()).fixed_steps, 5);
        assert_eq!(session.frame(0.04, &FrameInput::default()).fixed_steps, 2);
    }
}
