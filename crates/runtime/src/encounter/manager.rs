use game_core::{
    Archetype, Combatant, CostGrid, CostMap, DamageType, GameConfig, GameRng, Level, PlayerState,
    PlayerView, Rect, RoomBounds, RoomGate, RoomId, SpawnRecord,
};
use glam::Vec2;
use tracing::{debug, info};

use super::events::EncounterEvent;
use crate::enemy::{Enemy, EnemyHandle};
use crate::error::{Result, RuntimeError};

/// Owns the world an encounter runs in and the set of enemies alive in it.
///
/// Frame phases are exposed as separate calls so the session controls their
/// order. Every call that can add or remove enemies collects first and
/// mutates the active set afterwards.
pub struct EncounterManager {
    config: GameConfig,
    grid: CostGrid,
    rooms: Vec<RoomBounds>,
    gates: Vec<RoomGate>,
    pending: Vec<SpawnRecord>,
    active: Vec<Enemy>,
    current_room: Option<RoomId>,
    locked_room: Option<RoomId>,
    next_handle: u64,
    rng: GameRng,
    events: Vec<EncounterEvent>,
}

impl EncounterManager {
    /// Validates `config` and takes ownership of the level's world data.
    pub fn new(config: GameConfig, level: Level) -> Result<Self> {
        config.validate()?;
        check_tile_size(&config, &level.grid)?;
        let rng = GameRng::new(config.rng_seed);
        Ok(Self {
            config,
            grid: level.grid,
            rooms: level.rooms,
            gates: level.gates,
            pending: level.spawns,
            active: Vec::new(),
            current_room: None,
            locked_room: None,
            next_handle: 0,
            rng,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &CostGrid {
        &self.grid
    }

    pub fn current_room(&self) -> Option<RoomId> {
        self.current_room
    }

    pub fn pending(&self) -> &[SpawnRecord] {
        &self.pending
    }

    pub fn active(&self) -> &[Enemy] {
        &self.active
    }

    pub fn enemy(&self, handle: EnemyHandle) -> Option<&Enemy> {
        self.active.iter().find(|enemy| enemy.handle() == handle)
    }

    pub fn enemy_mut(&mut self, handle: EnemyHandle) -> Option<&mut Enemy> {
        self.active.iter_mut().find(|enemy| enemy.handle() == handle)
    }

    /// Room whose bounds contain `point`.
    pub fn room_at(&self, point: Vec2) -> Option<RoomId> {
        let tile = self.grid.world_to_tile(point);
        self.rooms
            .iter()
            .find(|bounds| bounds.contains(tile))
            .map(|bounds| bounds.room)
    }

    /// No pending records and no active enemies.
    pub fn is_cleared(&self) -> bool {
        self.pending.is_empty() && self.active.is_empty()
    }

    /// Highest item requirement among the level's gates.
    pub fn required_items(&self) -> u32 {
        self.gates
            .iter()
            .map(|gate| gate.required_items)
            .max()
            .unwrap_or(0)
    }

    /// Events buffered since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<EncounterEvent> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Activates an enemy directly, bypassing the pending pool.
    pub fn spawn(&mut self, archetype: Archetype, room: RoomId, x: f32, y: f32) -> EnemyHandle {
        self.activate(SpawnRecord::new(room, archetype, x, y))
    }

    fn activate(&mut self, record: SpawnRecord) -> EnemyHandle {
        let handle = EnemyHandle(self.next_handle);
        self.next_handle += 1;
        let profile = self.config.archetypes.get(record.archetype).clone();
        self.active.push(Enemy::spawn(handle, record, profile, &mut self.rng));
        info!(%handle, archetype = %record.archetype, room = %record.room, "enemy spawned");
        self.events.push(EncounterEvent::Spawned {
            handle,
            archetype: record.archetype,
            room: record.room,
        });
        handle
    }

    /// Player moved into `room`.
    ///
    /// Activates every pending record for the room unless it is gated and
    /// `collected_items` falls short, in which case nothing spawns and the
    /// room is re-checked on the next call. Re-entering the current room is
    /// a no-op. Returns the number of enemies spawned.
    pub fn enter_room(&mut self, room: RoomId, collected_items: u32) -> usize {
        if self.current_room == Some(room) {
            return 0;
        }

        if let Some(gate) = self.gates.iter().find(|gate| gate.room == room)
            && !gate.is_open(collected_items)
        {
            if self.locked_room != Some(room) {
                self.locked_room = Some(room);
                info!(%room, required = gate.required_items, collected = collected_items, "room locked");
                self.events.push(EncounterEvent::RoomLocked {
                    room,
                    required_items: gate.required_items,
                    collected: collected_items,
                });
            }
            return 0;
        }

        let (entering, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|record| record.room == room);
        self.pending = remaining;

        let spawned = entering.len();
        for record in entering {
            self.activate(record);
        }

        self.current_room = Some(room);
        self.locked_room = None;
        info!(%room, spawned, "room entered");
        self.events.push(EncounterEvent::RoomEntered { room, spawned });
        spawned
    }

    /// Removes every dead enemy. Their spawn records are consumed.
    pub fn retire_dead(&mut self) -> Vec<EnemyHandle> {
        let dead: Vec<(EnemyHandle, Archetype)> = self
            .active
            .iter()
            .filter(|enemy| enemy.is_dead())
            .map(|enemy| (enemy.handle(), enemy.archetype()))
            .collect();
        if dead.is_empty() {
            return Vec::new();
        }

        self.active.retain(|enemy| !enemy.is_dead());
        dead.into_iter()
            .map(|(handle, archetype)| {
                info!(%handle, %archetype, "enemy died");
                self.events.push(EncounterEvent::Died { handle, archetype });
                handle
            })
            .collect()
    }

    /// Sends every active enemy back to the pending pool and forgets the
    /// current room, so entering it again respawns them.
    pub fn retract_all(&mut self) -> usize {
        let count = self.active.len();
        self.pending
            .extend(self.active.drain(..).map(|enemy| enemy.spawn_record()));
        self.current_room = None;
        info!(count, "enemies retracted");
        self.events.push(EncounterEvent::Retracted { count });
        count
    }

    /// Swaps in a freshly loaded grid. The only way the grid changes.
    pub fn reload_map(&mut self, grid: CostGrid) -> Result<()> {
        check_tile_size(&self.config, &grid)?;
        self.grid = grid;
        info!(dimensions = ?self.grid.dimensions(), "cost grid reloaded");
        Ok(())
    }

    /// Damages one enemy and runs its hit reaction right away, evading
    /// around `anchor` (normally the player's midpoint).
    pub fn apply_damage(
        &mut self,
        handle: EnemyHandle,
        amount: i32,
        damage_type: DamageType,
        anchor: Vec2,
    ) -> Result<()> {
        let enemy = self
            .active
            .iter_mut()
            .find(|enemy| enemy.handle() == handle)
            .ok_or(RuntimeError::UnknownEnemy(handle))?;
        enemy.receive_damage(amount, damage_type);
        if !enemy.is_dead() {
            enemy.react_to_hit(&self.grid, anchor, &self.config, &mut self.rng);
        }
        Ok(())
    }

    // ========================================================================
    // Frame phases
    // ========================================================================

    /// Decision tick for every living enemy. Returns how many were ticked.
    ///
    /// Enemies killed earlier in the frame are skipped; they are retired
    /// later without acting again.
    pub fn tick_decisions(&mut self, dt: f32, player: &mut dyn PlayerView) -> usize {
        let mut ticked = 0;
        for enemy in self.active.iter_mut().filter(|enemy| !enemy.is_dead()) {
            enemy.tick(dt, &self.grid, player, &self.config, &mut self.rng);
            ticked += 1;
        }
        ticked
    }

    /// Advances the projectiles of living enemies and applies hits to the
    /// player.
    pub fn resolve_enemy_projectiles(&mut self, dt: f32, player: &mut dyn PlayerView) -> usize {
        self.active
            .iter_mut()
            .filter(|enemy| !enemy.is_dead())
            .map(|enemy| enemy.update_projectiles(dt, &self.grid, player))
            .sum()
    }

    /// Applies a player sword swing to every enemy its hitbox overlaps.
    pub fn resolve_player_swing(&mut self, player: &PlayerState, hitbox: Rect) -> usize {
        let mut hits = 0;
        for enemy in &mut self.active {
            if player.strike(hitbox, enemy) {
                hits += 1;
            }
        }
        self.react_to_hits(player.midpoint());
        hits
    }

    /// Advances the player's arrows against the active enemies.
    pub fn resolve_player_arrows(&mut self, dt: f32, player: &mut PlayerState) -> usize {
        let hits = player.update_arrows(dt, &self.grid, &mut self.active);
        self.react_to_hits(player.midpoint());
        hits
    }

    fn react_to_hits(&mut self, anchor: Vec2) {
        for enemy in &mut self.active {
            if !enemy.is_dead() {
                enemy.react_to_hit(&self.grid, anchor, &self.config, &mut self.rng);
            }
        }
    }

    /// One fixed step of route integration for every active enemy.
    pub fn fixed_step(&mut self, dt: f32, anchor: Vec2) {
        for enemy in &mut self.active {
            enemy.fixed_tick(dt, &self.grid, anchor, &self.config, &mut self.rng);
        }
    }
}

fn check_tile_size(config: &GameConfig, grid: &CostGrid) -> Result<()> {
    if (grid.tile_size() - config.tile_size).abs() > f32::EPSILON {
        debug!(expected = config.tile_size, actual = grid.tile_size(), "tile size mismatch");
        return Err(RuntimeError::TileSizeMismatch {
            expected: config.tile_size,
            actual: grid.tile_size(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{MapDimensions, PlayerProfile, TileCoord};

    fn level() -> Level {
        let mut grid = CostGrid::filled(MapDimensions::new(30, 12), 16.0, 10).unwrap();
        grid.fill_rect(TileCoord::new(1, 1), TileCoord::new(13, 10), 1);
        grid.fill_rect(TileCoord::new(15, 1), TileCoord::new(28, 10), 1);
        Level {
            grid,
            rooms: vec![
                RoomBounds::new(RoomId(1), TileCoord::new(1, 1), TileCoord::new(13, 10)),
                RoomBounds::new(RoomId(2), TileCoord::new(15, 1), TileCoord::new(28, 10)),
            ],
            spawns: vec![
                SpawnRecord::new(RoomId(1), Archetype::Melee, 160.0, 32.0),
                SpawnRecord::new(RoomId(1), Archetype::Mage, 160.0, 128.0),
                SpawnRecord::new(RoomId(2), Archetype::Boss, 400.0, 80.0),
            ],
            gates: vec![RoomGate {
                room: RoomId(2),
                required_items: 4,
            }],
            player_start: Vec2::new(32.0, 32.0),
        }
    }

    fn manager() -> EncounterManager {
        EncounterManager::new(GameConfig::default(), level()).unwrap()
    }

    #[test]
    fn entering_a_room_spawns_its_records_once() {
        let mut encounter = manager();
        assert_eq!(encounter.enter_room(RoomId(1), 0), 2);
        assert_eq!(encounter.enter_room(RoomId(1), 0), 0);
        assert_eq!(encounter.active().len(), 2);
        assert_eq!(encounter.pending().len(), 1);

        let events = encounter.drain_events();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[2], EncounterEvent::RoomEntered { spawned: 2, .. }));
        assert!(encounter.drain_events().is_empty());
    }

    #[test]
    fn gated_room_stays_locked_until_enough_items() {
        let mut encounter = manager();
        assert_eq!(encounter.enter_room(RoomId(2), 3), 0);
        assert_eq!(encounter.enter_room(RoomId(2), 3), 0);
        assert_eq!(
            encounter.drain_events(),
            vec![EncounterEvent::RoomLocked {
                room: RoomId(2),
                required_items: 4,
                collected: 3
            }]
        );

        assert_eq!(encounter.enter_room(RoomId(2), 4), 1);
        assert_eq!(encounter.active()[0].archetype(), Archetype::Boss);
    }

    #[test]
    fn dead_enemies_are_retired_and_consumed() {
        let mut encounter = manager();
        encounter.enter_room(RoomId(1), 0);
        let first = encounter.active()[0].handle();
        encounter.apply_damage(first, 500, DamageType::Normal, Vec2::ZERO).unwrap();

        assert_eq!(encounter.retire_dead(), vec![first]);
        assert_eq!(encounter.active().len(), 1);
        assert_eq!(encounter.pending().len(), 1);
        assert_eq!(
            encounter.apply_damage(first, 1, DamageType::Normal, Vec2::ZERO),
            Err(RuntimeError::UnknownEnemy(first))
        );
    }

    #[test]
    fn damage_triggers_the_boss_reaction_immediately() {
        let mut encounter = manager();
        encounter.enter_room(RoomId(2), 4);
        let boss = encounter.active()[0].handle();
        assert!(!encounter.active()[0].controller().is_rapid_fire());

        encounter
            .apply_damage(boss, 10, DamageType::Normal, Vec2::new(320.0, 80.0))
            .unwrap();
        let boss = encounter.enemy(boss).unwrap();
        assert!(boss.controller().is_rapid_fire());
        assert!(!boss.is_dead());
    }

    #[test]
    fn dead_enemies_are_not_ticked_before_retirement() {
        let mut encounter = manager();
        encounter.enter_room(RoomId(1), 0);
        let first = encounter.active()[0].handle();
        encounter.apply_damage(first, 500, DamageType::Normal, Vec2::ZERO).unwrap();

        let mut player = PlayerState::new(PlayerProfile::default(), Vec2::new(32.0, 32.0));
        assert_eq!(encounter.tick_decisions(0.016, &mut player), 1);
        assert_eq!(encounter.resolve_enemy_projectiles(0.016, &mut player), 0);
        assert_eq!(encounter.active().len(), 2);
    }

    #[test]
    fn retraction_returns_records_and_allows_respawn() {
        let mut encounter = manager();
        encounter.enter_room(RoomId(1), 0);
        assert_eq!(encounter.retract_all(), 2);
        assert!(encounter.active().is_empty());
        assert_eq!(encounter.pending().len(), 3);
        assert_eq!(encounter.current_room(), None);

        assert_eq!(encounter.enter_room(RoomId(1), 0), 2);
    }

    #[test]
    fn cleared_once_everything_is_dead() {
        let mut encounter = manager();
        encounter.enter_room(RoomId(1), 0);
        encounter.enter_room(RoomId(2), 4);
        let handles: Vec<_> = encounter.active().iter().map(Enemy::handle).collect();
        for handle in handles {
            encounter.apply_damage(handle, 1_000, DamageType::Magic, Vec2::ZERO).unwrap();
        }
        encounter.retire_dead();
        assert!(encounter.is_cleared());
    }

    #[test]
    fn handles_are_unique_across_respawns() {
        let mut encounter = manager();
        encounter.enter_room(RoomId(1), 0);
        let before: Vec<_> = encounter.active().iter().map(Enemy::handle).collect();
        encounter.retract_all();
        encounter.enter_room(RoomId(1), 0);
        for enemy in encounter.active() {
            assert!(!before.contains(&enemy.handle()));
        }
    }

    #[test]
    fn rejects_grid_with_other_tile_size() {
        let mut encounter = manager();
        let grid = CostGrid::filled(MapDimensions::new(4, 4), 32.0, 1).unwrap();
        assert!(matches!(
            encounter.reload_map(grid),
            Err(RuntimeError::TileSizeMismatch { .. })
        ));
    }

    #[test]
    fn room_lookup_and_swing_resolution() {
        let mut encounter = manager();
        assert_eq!(encounter.room_at(Vec2::new(40.0, 40.0)), Some(RoomId(1)));
        assert_eq!(encounter.room_at(Vec2::new(232.0, 40.0)), None);

        encounter.enter_room(RoomId(1), 0);
        let config = GameConfig::default();
        let mut player = PlayerState::new(PlayerProfile::default(), Vec2::new(144.0, 32.0));
        let hitbox = player.swing(&config).unwrap();
        assert_eq!(encounter.resolve_player_swing(&player, hitbox), 1);
        assert_eq!(encounter.active()[0].health(), 60);
    }
}
