//! Per-frame simulation tick
//!
//! Core game loop that advances a round by one frame. Order within a tick:
//! player input, shooting, player physics, bullets (and their hits), enemies
//! (and their hit on the player), then spawning.

use glam::Vec3;

use super::collision::overlaps;
use super::spawn::enemy_spawn_position;
use super::state::{InputState, Round, RoundPhase};

/// Receives round lifecycle notifications from `tick`
pub trait RoundListener {
    /// Called once for every kill, with the score after that kill
    fn on_score_changed(&mut self, _new_score: u32) {}
    /// Called exactly once, on the tick the player is hit
    fn on_game_over(&mut self, _final_score: u32) {}
}

impl RoundListener for () {}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub score_delta: u32,
    pub game_over: bool,
}

/// Horizontal player velocity for the held keys.
/// Left wins over right and forward (-z) wins over backward.
pub fn steer(input: &InputState, speed: f32) -> (f32, f32) {
    let x = if input.move_left {
        -speed
    } else if input.move_right {
        speed
    } else {
        0.0
    };
    let z = if input.move_forward {
        -speed
    } else if input.move_backward {
        speed
    } else {
        0.0
    };
    (x, z)
}

/// Advance the round by one frame
///
/// Does nothing once the round is over.
pub fn tick(round: &mut Round, listener: &mut impl RoundListener) -> TickReport {
    let mut report = TickReport::default();
    if round.state.phase == RoundPhase::Over {
        return report;
    }

    // Player input
    let (vx, vz) = steer(&round.state.input, round.tuning.player_speed);
    round.player.velocity.x = vx;
    round.player.velocity.z = vz;

    if round.state.input.jump {
        round.player.velocity.y = round.tuning.jump_velocity;
        round.state.input.jump = false;
    }

    if round.state.input.shoot {
        let offset = Vec3::new(0.0, 0.0, round.tuning.bullet_spawn_offset);
        let origin = round.player.position() - offset;
        let bullet = round.make_bullet(origin);
        round.registry.add_bullet(bullet);
        round.state.input.shoot = false;
    }

    round.player.integrate(&round.ground);

    // Bullets. A bullet kills at most one enemy (the first in registry order)
    // and is removed with it; removals happen before enemies move.
    let mut index = 0;
    while let Some(bullet) = round.registry.bullet_mut(index) {
        bullet.advance(&round.ground);

        match round.registry.first_enemy_hit_by(index) {
            Some(enemy) => {
                round.registry.remove_enemy_at(enemy);
                round.registry.remove_bullet_at(index);

                round.state.score += round.tuning.score_per_kill;
                report.score_delta += round.tuning.score_per_kill;
                log::debug!("Enemy destroyed, score {}", round.state.score);
                listener.on_score_changed(round.state.score);
            }
            None => index += 1,
        }
    }

    // Enemies
    let player = &round.player;
    let ground = &round.ground;
    let mut player_hit = false;
    for enemy in round.registry.enemies_mut() {
        enemy.advance(ground);
        if overlaps(player, enemy) {
            player_hit = true;
            break;
        }
    }

    if player_hit {
        round.state.phase = RoundPhase::Over;
        report.game_over = true;
        log::info!(
            "Game over at frame {} with score {}",
            round.state.frame_count,
            round.state.score
        );
        listener.on_game_over(round.state.score);
        return report;
    }

    if let Some(distance) = round.tuning.despawn_distance {
        let player_z = round.player.position().z;
        let removed = round
            .registry
            .retain(|body| (body.position().z - player_z).abs() <= distance);
        if removed > 0 {
            log::debug!("Despawned {} out-of-range entities", removed);
        }
    }

    // Spawning
    if round.state.spawner.poll(round.state.frame_count) {
        let position = enemy_spawn_position(&mut round.rng, &round.tuning);
        let enemy = round.make_enemy(position);
        round.registry.add_enemy(enemy);
        log::info!(
            "Enemy spawned at x={:.2} (frame {}, next interval {})",
            position.x,
            round.state.frame_count,
            round.state.spawn_interval()
        );
    }

    round.state.frame_count += 1;

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::BodyKind;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    #[derive(Default)]
    struct Recorder {
        scores: Vec<u32>,
        game_overs: Vec<u32>,
    }

    impl RoundListener for Recorder {
        fn on_score_changed(&mut self, new_score: u32) {
            self.scores.push(new_score);
        }

        fn on_game_over(&mut self, final_score: u32) {
            self.game_overs.push(final_score);
        }
    }

    fn round() -> Round {
        Round::new(12345, Tuning::default()).unwrap()
    }

    /// Round whose first enemy spawn is far in the future
    fn quiet_round() -> Round {
        let tuning = Tuning {
            spawn_interval_start: 1_000_000,
            ..Default::default()
        };
        let mut round = Round::new(12345, tuning).unwrap();
        // Frame 0 always spawns; start past it
        round.state.frame_count = 1;
        round
    }

    #[test]
    fn test_steer_priorities() {
        let both = InputState {
            move_left: true,
            move_right: true,
            move_forward: true,
            move_backward: true,
            ..Default::default()
        };
        assert_eq!(steer(&both, 0.05), (-0.05, -0.05));

        let right_back = InputState {
            move_right: true,
            move_backward: true,
            ..Default::default()
        };
        assert_eq!(steer(&right_back, 0.05), (0.05, 0.05));

        assert_eq!(steer(&InputState::default(), 0.05), (0.0, 0.0));
    }

    #[test]
    fn test_first_tick_spawns_enemy() {
        let mut round = round();
        let report = tick(&mut round, &mut ());
        assert_eq!(report, TickReport::default());
        assert_eq!(round.registry.enemies().len(), 1);
        assert_eq!(round.state.frame_count, 1);
        assert_eq!(round.state.spawn_interval(), 180);

        let enemy = &round.registry.enemies()[0];
        assert_eq!(enemy.kind, BodyKind::Enemy);
        assert_eq!(enemy.position().z, -20.0);
        assert!(enemy.position().x >= -5.0 && enemy.position().x < 5.0);
    }

    #[test]
    fn test_player_falls_then_bounces() {
        let mut round = quiet_round();
        let ground_top = round.ground.bounds().top;
        assert_eq!(ground_top, -1.75);

        // Free fall until the look-ahead reaches the ground top
        let mut ticks = 0;
        loop {
            let before = round.player.clone();
            let falling_vy = before.velocity.y + before.gravity;
            tick(&mut round, &mut ());
            ticks += 1;

            if before.bounds().bottom + falling_vy <= ground_top {
                // Bounce tick: no vertical move, velocity halved and inverted
                assert_eq!(round.player.position().y, before.position().y);
                assert_eq!(round.player.velocity.y, -(falling_vy * 0.5));
                assert!(round.player.velocity.y > 0.0);
                break;
            }

            assert_eq!(round.player.velocity.y, falling_vy);
            assert_eq!(round.player.position().y, before.position().y + falling_vy);
            assert!(ticks < 100, "player never reached the ground");
        }

        // From the origin with vy -0.05 the fall takes 14 ticks and the 15th
        // would carry the bottom face past -1.75: vy -0.125 becomes 0.0625
        assert_eq!(ticks, 15);
        assert!((round.player.velocity.y - 0.0625).abs() < 1e-6);
    }

    #[test]
    fn test_movement_keys() {
        let mut round = quiet_round();
        round.state.input.move_right = true;
        round.state.input.move_forward = true;
        tick(&mut round, &mut ());
        assert_eq!(round.player.position().x, 0.05);
        assert_eq!(round.player.position().z, -0.05);

        round.state.input = InputState::default();
        tick(&mut round, &mut ());
        assert_eq!(round.player.velocity.x, 0.0);
        assert_eq!(round.player.position().x, 0.05);
    }

    #[test]
    fn test_shoot_is_one_shot() {
        let mut round = quiet_round();
        round.state.input.shoot = true;
        tick(&mut round, &mut ());
        assert!(!round.state.input.shoot);
        assert_eq!(round.registry.bullets().len(), 1);

        // Spawned at player.z - 1, then advanced once in the same tick
        let bullet = &round.registry.bullets()[0];
        assert_eq!(bullet.position().z, -1.0f32 - 0.2);
        assert_eq!(bullet.position().y, 0.0);

        tick(&mut round, &mut ());
        assert_eq!(round.registry.bullets().len(), 1);
    }

    #[test]
    fn test_jump_sets_vertical_speed_once() {
        let mut round = quiet_round();
        round.state.input.jump = true;
        tick(&mut round, &mut ());
        assert!(!round.state.input.jump);
        assert_eq!(round.player.velocity.y, 0.1 + round.tuning.gravity);
        assert!(round.player.position().y > 0.0);
    }

    #[test]
    fn test_bullet_kills_enemy_and_scores() {
        let mut round = quiet_round();
        let enemy = round.make_enemy(Vec3::new(0.0, 0.0, -1.5));
        round.registry.add_enemy(enemy);
        round.state.input.shoot = true;

        let mut recorder = Recorder::default();
        let report = tick(&mut round, &mut recorder);

        assert_eq!(report.score_delta, 10);
        assert!(!report.game_over);
        assert_eq!(round.score(), 10);
        assert!(round.registry.is_empty());
        assert_eq!(recorder.scores, vec![10]);
        assert!(recorder.game_overs.is_empty());
    }

    #[test]
    fn test_bullet_kills_only_first_of_two_enemies() {
        let mut round = quiet_round();
        let first = round.make_enemy(Vec3::new(0.3, 0.0, -1.5));
        let second = round.make_enemy(Vec3::new(-0.3, 0.0, -1.5));
        round.registry.add_enemy(first);
        round.registry.add_enemy(second);
        round.state.input.shoot = true;

        let report = tick(&mut round, &mut ());

        assert_eq!(report.score_delta, 10);
        assert!(round.registry.bullets().is_empty());
        assert_eq!(round.registry.enemies().len(), 1);
        assert!(round.registry.enemies()[0].position().x < 0.0);
    }

    #[test]
    fn test_two_bullets_two_kills_in_one_tick() {
        let mut round = quiet_round();
        for x in [-3.0, 3.0] {
            let enemy = round.make_enemy(Vec3::new(x, 0.0, -8.0));
            round.registry.add_enemy(enemy);
            let bullet = round.make_bullet(Vec3::new(x, 0.0, -7.5));
            round.registry.add_bullet(bullet);
        }
        // A bullet that hits nothing stays in place in the order
        let stray = round.make_bullet(Vec3::new(0.0, 0.0, -3.0));
        round.registry.add_bullet(stray);

        let mut recorder = Recorder::default();
        let report = tick(&mut round, &mut recorder);

        assert_eq!(report.score_delta, 20);
        assert_eq!(recorder.scores, vec![10, 20]);
        assert!(round.registry.enemies().is_empty());
        assert_eq!(round.registry.bullets().len(), 1);
        assert_eq!(round.registry.bullets()[0].position().x, 0.0);
    }

    #[test]
    fn test_enemy_on_player_ends_round_once() {
        let mut round = quiet_round();
        let enemy = round.make_enemy(round.player.position());
        round.registry.add_enemy(enemy);

        let mut recorder = Recorder::default();
        let report = tick(&mut round, &mut recorder);
        assert!(report.game_over);
        assert!(round.is_over());
        assert_eq!(recorder.game_overs, vec![0]);

        let frame = round.state.frame_count;
        let report = tick(&mut round, &mut recorder);
        assert_eq!(report, TickReport::default());
        assert_eq!(recorder.game_overs.len(), 1);
        assert_eq!(round.state.frame_count, frame);
    }

    #[test]
    fn test_game_over_tick_stops_processing() {
        let mut round = quiet_round();
        // Due to spawn on this tick if it ran to completion
        round.state.frame_count = 1_000_000;
        let hitter = round.make_enemy(round.player.position());
        round.registry.add_enemy(hitter);
        let behind = round.make_enemy(Vec3::new(0.0, 0.0, -10.0));
        round.registry.add_enemy(behind);
        let interval = round.state.spawn_interval();

        let mut recorder = Recorder::default();
        let report = tick(&mut round, &mut recorder);
        assert!(report.game_over);

        let enemies = round.registry.enemies();
        assert_eq!(enemies.len(), 2);
        assert_eq!(enemies[1].position().z, -10.0);
        assert_eq!(round.state.frame_count, 1_000_000);
        assert_eq!(round.state.spawn_interval(), interval);
    }

    #[test]
    fn test_bullet_saves_player_from_same_tick_hit() {
        let mut round = quiet_round();
        // Enemy right on the player, bullet already inside it
        let enemy = round.make_enemy(Vec3::new(0.0, 0.0, -0.9));
        round.registry.add_enemy(enemy);
        let bullet = round.make_bullet(Vec3::new(0.0, 0.0, -0.7));
        round.registry.add_bullet(bullet);

        let report = tick(&mut round, &mut ());
        assert_eq!(report.score_delta, 10);
        assert!(!report.game_over);
        assert!(!round.is_over());
    }

    #[test]
    fn test_despawn_disabled_by_default() {
        let mut round = quiet_round();
        let far = round.make_bullet(Vec3::new(0.0, 0.0, -500.0));
        round.registry.add_bullet(far);
        tick(&mut round, &mut ());
        assert_eq!(round.registry.bullets().len(), 1);
    }

    #[test]
    fn test_despawn_distance_when_configured() {
        let tuning = Tuning {
            spawn_interval_start: 1_000_000,
            despawn_distance: Some(30.0),
            ..Default::default()
        };
        let mut round = Round::new(1, tuning).unwrap();
        round.state.frame_count = 1;
        let far = round.make_bullet(Vec3::new(0.0, 0.0, -500.0));
        let near = round.make_bullet(Vec3::new(0.0, 0.0, -5.0));
        round.registry.add_bullet(far);
        round.registry.add_bullet(near);

        tick(&mut round, &mut ());
        assert_eq!(round.registry.bullets().len(), 1);
        assert!(round.registry.bullets()[0].position().z > -6.0);
    }

    #[test]
    fn test_same_seed_same_round() {
        let mut a = round();
        let mut b = round();
        for i in 0..600 {
            a.state.input.shoot = i % 15 == 0;
            b.state.input.shoot = i % 15 == 0;
            tick(&mut a, &mut ());
            tick(&mut b, &mut ());
        }
        assert_eq!(a.score(), b.score());
        assert_eq!(a.is_over(), b.is_over());
        let xs = |r: &Round| {
            r.registry
                .enemies()
                .iter()
                .map(|e| e.position().x)
                .collect::<Vec<_>>()
        };
        assert_eq!(xs(&a), xs(&b));
    }

    proptest! {
        #[test]
        fn prop_score_is_ten_per_kill(seed in any::<u64>(), pattern in proptest::collection::vec(any::<u8>(), 50..400)) {
            let mut round = Round::new(seed, Tuning::default()).unwrap();
            let mut recorder = Recorder::default();
            let mut last_interval = round.state.spawn_interval();
            for keys in pattern {
                round.state.input.move_left = keys & 1 != 0;
                round.state.input.move_right = keys & 2 != 0;
                round.state.input.shoot = keys & 4 != 0;
                let before = round.score();
                tick(&mut round, &mut recorder);
                prop_assert!(round.score() >= before);
                prop_assert!(round.state.spawn_interval() <= last_interval);
                prop_assert!(round.state.spawn_interval() >= 20);
                last_interval = round.state.spawn_interval();
            }
            prop_assert_eq!(round.score() as usize, 10 * recorder.scores.len());
            prop_assert!(recorder.game_overs.len() <= 1);
        }
    }
}
