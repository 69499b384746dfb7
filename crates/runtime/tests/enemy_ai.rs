//! Behavior trees driving real controllers through the encounter manager.

use game_core::{
    Archetype, Combatant, CostGrid, CostMap, GameConfig, Level, MapDimensions, PlayerProfile,
    PlayerState, RoomBounds, RoomId, TileCoord,
};
use glam::Vec2;
use runtime::{EncounterManager, EnemyHandle};

const TILE: f32 = 16.0;

/// Walled arena with a walkable interior.
fn arena(size: u32) -> CostGrid {
    let mut grid = CostGrid::filled(MapDimensions::new(size, size), TILE, 10).unwrap();
    let last = size as i32 - 2;
    grid.fill_rect(TileCoord::new(1, 1), TileCoord::new(last, last), 1);
    grid
}

fn manager(grid: CostGrid) -> EncounterManager {
    let last = grid.dimensions().width as i32 - 2;
    let level = Level {
        grid,
        rooms: vec![RoomBounds::new(RoomId(1), TileCoord::new(1, 1), TileCoord::new(last, last))],
        spawns: Vec::new(),
        gates: Vec::new(),
        player_start: Vec2::splat(TILE),
    };
    EncounterManager::new(GameConfig::default(), level).unwrap()
}

fn at_tile(x: i32, y: i32) -> Vec2 {
    Vec2::new(x as f32 * TILE, y as f32 * TILE)
}

fn player_at(x: i32, y: i32) -> PlayerState {
    PlayerState::new(PlayerProfile::default(), at_tile(x, y))
}

fn spawn(encounter: &mut EncounterManager, archetype: Archetype, x: i32, y: i32) -> EnemyHandle {
    let position = at_tile(x, y);
    encounter.spawn(archetype, RoomId(1), position.x, position.y)
}

#[test]
fn enemy_does_not_move_in_the_tick_it_repaths() {
    let mut encounter = manager(arena(24));
    let mut player = player_at(14, 3);
    let handle = spawn(&mut encounter, Archetype::Melee, 3, 3);
    let start = encounter.enemy(handle).unwrap().position();

    encounter.tick_decisions(0.016, &mut player);
    let enemy = encounter.enemy(handle).unwrap();
    assert!(!enemy.controller().route().is_empty());
    assert_eq!(enemy.position(), start);

    let step = encounter.config().fixed_timestep;
    for _ in 0..10 {
        encounter.fixed_step(step, player.midpoint());
    }
    assert!(encounter.enemy(handle).unwrap().position().x > start.x);
}

#[test]
fn melee_enemy_next_to_player_attacks_on_cooldown_without_repathing() {
    let mut encounter = manager(arena(24));
    let mut player = player_at(4, 3);
    let handle = spawn(&mut encounter, Archetype::Melee, 3, 3);

    let mut hit_ticks = Vec::new();
    let mut last_health = player.health();
    for tick in 0..20 {
        encounter.tick_decisions(0.25, &mut player);
        assert!(encounter.enemy(handle).unwrap().controller().route().is_empty());
        if player.health() < last_health {
            hit_ticks.push(tick);
            last_health = player.health();
        }
    }

    assert!((2..=5).contains(&hit_ticks.len()), "hits at {hit_ticks:?}");
    for pair in hit_ticks.windows(2) {
        // 0.25 s per tick; the cooldown is one second.
        assert!(pair[1] - pair[0] > 4, "hits at {hit_ticks:?}");
    }
    assert_eq!(player.health(), 100 - hit_ticks.len() as i32);
}

#[test]
fn mage_projectile_dies_on_a_wall() {
    let mut grid = arena(24);
    grid.fill_rect(TileCoord::new(10, 0), TileCoord::new(10, 23), 10);
    let mut encounter = manager(grid);
    let mut player = player_at(12, 5);
    let handle = spawn(&mut encounter, Archetype::Mage, 6, 5);

    // The first long tick only trips the path reset.
    encounter.tick_decisions(2.1, &mut player);
    encounter.tick_decisions(0.01, &mut player);
    assert_eq!(encounter.enemy(handle).unwrap().controller().projectiles().len(), 1);

    for _ in 0..40 {
        encounter.resolve_enemy_projectiles(0.05, &mut player);
    }
    assert!(encounter.enemy(handle).unwrap().controller().projectiles().is_empty());
    assert_eq!(player.health(), 100);
}

#[test]
fn boss_falls_back_to_ranged_branch_when_player_is_far() {
    let mut encounter = manager(arena(40));
    let mut player = player_at(30, 30);
    let handle = spawn(&mut encounter, Archetype::Boss, 5, 5);

    // Installing an offset route halts the branch for one frame; by the
    // second tick the boss has fired either way.
    encounter.tick_decisions(3.5, &mut player);
    encounter.tick_decisions(0.5, &mut player);
    let boss = encounter.enemy(handle).unwrap();
    assert!(!boss.controller().projectiles().is_empty());
    assert_eq!(player.health(), 100);
}

#[test]
fn boss_in_range_uses_melee_branch() {
    let mut encounter = manager(arena(24));
    let mut player = player_at(6, 5);
    let handle = spawn(&mut encounter, Archetype::Boss, 5, 5);

    // Path reset halts the melee branch for this frame; the selector does not
    // fall through to the ranged branch.
    encounter.tick_decisions(1.5, &mut player);
    assert!(encounter.enemy(handle).unwrap().controller().projectiles().is_empty());
    assert_eq!(player.health(), 100);

    encounter.tick_decisions(0.1, &mut player);
    assert_eq!(player.health(), 80);
    assert!(encounter.enemy(handle).unwrap().controller().projectiles().is_empty());
}

#[test]
fn teleporter_blinks_near_player_then_throws() {
    let mut encounter = manager(arena(40));
    let mut player = player_at(20, 20);
    let handle = spawn(&mut encounter, Archetype::Teleporter, 3, 3);

    encounter.tick_decisions(8.5, &mut player);
    let tile = encounter.grid().world_to_tile(encounter.enemy(handle).unwrap().controller().midpoint());
    let distance = tile.manhattan(TileCoord::new(20, 20));
    assert!((4..=16).contains(&distance), "landed on {tile}");
    assert!(encounter.enemy(handle).unwrap().controller().projectiles().is_empty());

    encounter.tick_decisions(0.1, &mut player);
    assert_eq!(encounter.enemy(handle).unwrap().controller().projectiles().len(), 1);
}

#[test]
fn boss_hit_triggers_evade_and_rapid_fire() {
    let mut encounter = manager(arena(40));
    let player = player_at(20, 20);
    spawn(&mut encounter, Archetype::Boss, 22, 20);
    let before = encounter.active()[0].position();

    let hitbox = game_core::Rect::new(at_tile(21, 19), Vec2::splat(TILE * 3.0));
    assert_eq!(encounter.resolve_player_swing(&player, hitbox), 1);

    let boss = &encounter.active()[0];
    assert_eq!(boss.health(), 210);
    assert!(boss.controller().is_rapid_fire());
    assert_ne!(boss.position(), before);
}
