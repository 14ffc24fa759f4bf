//! Avoid and Shoot headless driver
//!
//! Plays one round with a simple autopilot as fast as ticks can run,
//! without drawing anything. Usage:
//!
//! ```text
//! avoid-and-shoot [tuning.json]
//! ```

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use avoid_and_shoot::renderer::collect_instances;
use avoid_and_shoot::sim::{Round, RoundListener};
use avoid_and_shoot::{Key, Screen, Session, Tuning, TuningError};

/// Give up on a round after this many frames (about 10 minutes at 60 fps)
const MAX_FRAMES: u64 = 36_000;
/// Autopilot fires on every Nth frame
const FIRE_EVERY: u64 = 12;

struct ScoreLog;

impl RoundListener for ScoreLog {
    fn on_score_changed(&mut self, new_score: u32) {
        log::debug!("Score: {}", new_score);
    }

    fn on_game_over(&mut self, final_score: u32) {
        log::info!("Game over! Final score: {}", final_score);
    }
}

/// Keys the autopilot wants held this frame: line up with the closest enemy
fn autopilot_keys(round: &Round) -> Vec<Key> {
    let player = round.player.position();
    let Some(target) = round
        .registry
        .enemies()
        .iter()
        .map(|e| e.position())
        .filter(|p| p.z < player.z)
        .max_by(|a, b| a.z.partial_cmp(&b.z).unwrap_or(std::cmp::Ordering::Equal))
    else {
        return Vec::new();
    };

    let dx = target.x - player.x;
    if dx < -0.1 {
        vec![Key::Left]
    } else if dx > 0.1 {
        vec![Key::Right]
    } else {
        Vec::new()
    }
}

/// Millisecond wall-clock seed; 0 if the clock is before the epoch
fn seed_from_clock(since_epoch: Option<Duration>) -> u64 {
    since_epoch
        .and_then(|d| u64::try_from(d.as_millis()).ok())
        .unwrap_or(0)
}

fn held_keys_label(keys: &[Key]) -> String {
    if keys.is_empty() {
        return "none".into();
    }
    keys.iter().map(Key::as_str).collect::<Vec<_>>().join("+")
}

fn load_tuning() -> Result<Tuning, TuningError> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .map_err(|e| TuningError::Invalid(format!("cannot read {path}: {e}")))?;
            log::info!("Loaded tuning from {}", path);
            Tuning::from_json(&json)
        }
        None => Ok(Tuning::default()),
    }
}

fn run() -> Result<(), TuningError> {
    let tuning = load_tuning()?;
    let mut session = Session::new(tuning)?;

    let seed = seed_from_clock(SystemTime::now().duration_since(UNIX_EPOCH).ok());
    log::info!("{}", avoid_and_shoot::session::CONTROLS_HINT);
    session.start_game(seed)?;

    let mut listener = ScoreLog;
    let mut held: Vec<Key> = Vec::new();
    let mut frame = 0u64;

    while session.screen() == Screen::Playing && frame < MAX_FRAMES {
        let Some(round) = session.round() else {
            break;
        };
        let wanted = autopilot_keys(round);
        if frame % 600 == 0 {
            log::debug!(
                "Frame {}: {} boxes on screen",
                frame,
                collect_instances(round).len()
            );
        }

        for key in held.iter().filter(|k| !wanted.contains(*k)) {
            session.key_up(*key);
        }
        for key in &wanted {
            session.key_down(*key);
        }
        if held != wanted {
            log::debug!("Frame {}: autopilot holds {}", frame, held_keys_label(&wanted));
        }
        held = wanted;

        if frame % FIRE_EVERY == 0 {
            session.key_down(Key::Shoot);
        } else {
            session.key_up(Key::Shoot);
        }

        session.step(&mut listener);
        frame += 1;
    }

    match session.last_score {
        Some(score) => println!("Final score: {} (best {})", score, session.best_score),
        None => {
            let score = session.round().map(|r| r.score()).unwrap_or(0);
            println!("Stopped after {} frames with score {}", frame, score);
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("{} (native) starting...", avoid_and_shoot::session::TITLE);

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_from_clock() {
        assert_eq!(seed_from_clock(Some(Duration::from_millis(1_234))), 1_234);
        assert_eq!(seed_from_clock(None), 0);
        // Too many milliseconds for a u64
        assert_eq!(seed_from_clock(Some(Duration::MAX)), 0);
    }

    #[test]
    fn test_held_keys_label() {
        assert_eq!(held_keys_label(&[]), "none");
        assert_eq!(held_keys_label(&[Key::Left, Key::Shoot]), "A+E");
    }
}
