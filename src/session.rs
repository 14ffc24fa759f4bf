//! Start screen / game screen lifecycle
//!
//! A session starts on the start screen. Starting a game creates a fresh
//! round; when the player is hit the session records the score and goes back
//! to the start screen. Nothing is persisted between runs of the program.

use crate::input::{Controls, Key};
use crate::sim::{Round, RoundListener, TickReport, tick};
use crate::tuning::{Tuning, TuningError};

pub const TITLE: &str = "Avoid and Shoot";
pub const CONTROLS_HINT: &str = "WASD to move - E to shoot - SPACE to jump";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Start,
    Playing,
}

#[derive(Debug)]
pub struct Session {
    tuning: Tuning,
    screen: Screen,
    round: Option<Round>,
    controls: Controls,
    /// Score of the most recently finished round
    pub last_score: Option<u32>,
    pub best_score: u32,
    pub rounds_played: u32,
}

impl Session {
    pub fn new(tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            tuning,
            screen: Screen::Start,
            round: None,
            controls: Controls::new(),
            last_score: None,
            best_score: 0,
            rounds_played: 0,
        })
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The round in progress, for drawing
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Leave the start screen with a fresh round. Ignored while already playing.
    pub fn start_game(&mut self, seed: u64) -> Result<bool, TuningError> {
        if self.screen == Screen::Playing {
            return Ok(false);
        }
        self.round = Some(Round::new(seed, self.tuning.clone())?);
        self.controls.release_all();
        self.screen = Screen::Playing;
        Ok(true)
    }

    pub fn key_down(&mut self, key: Key) {
        self.controls.key_down(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.controls.key_up(key);
    }

    /// Advance the active round by one frame
    ///
    /// Returns `None` on the start screen. On the frame the player is hit the
    /// round is dropped and the session returns to the start screen.
    pub fn step(&mut self, listener: &mut impl RoundListener) -> Option<TickReport> {
        let round = self.round.as_mut()?;
        self.controls.apply(&mut round.state.input);
        let report = tick(round, listener);

        if report.game_over {
            let score = round.score();
            self.finish_round(score);
        }
        Some(report)
    }

    fn finish_round(&mut self, score: u32) {
        self.rounds_played += 1;
        self.last_score = Some(score);
        if score > self.best_score {
            self.best_score = score;
            log::info!("New best score: {}", score);
        }
        self.round = None;
        self.screen = Screen::Start;
    }
}
