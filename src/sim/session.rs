/// Session: the complete state of one game, from language pick to quit.
///
/// Everything mutable lives here (aliens, input buffer, score, spawn clock
/// and RNG), so two sessions never share state.
///
/// ## Time
///
/// `now` is milliseconds since the session started, supplied by the
/// caller. Spawn cadence and flash expiry are compared against it once per
/// tick, so both are only as precise as the frame rate.
///
/// ## Viewport
///
/// Width and height are virtual pixels. The terminal renderer maps cells
/// to pixels; the simulation never sees cells.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::SessionConfig;
use crate::domain::alien::AlienArena;
use crate::domain::language::Language;
use crate::domain::pool::WordPool;
use crate::domain::words::WordList;
use crate::ui::surface::TextMeasure;
use super::event::GameEvent;
use super::matcher::{self, InputBuffer};
use super::spawn;
use super::step;

/// Aliens spawned and matched. Both only ever go up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub spawned: u64,
    pub matched: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

pub struct Session {
    pub language: Language,
    pub pool: WordPool,
    pub aliens: AlienArena,
    pub input: InputBuffer,
    pub score: Score,
    pub viewport: Viewport,
    pub cfg: SessionConfig,
    last_spawn: Option<f64>,
    rng: Pcg32,
}

impl Session {
    pub fn new(
        language: Language,
        words: &WordList,
        cfg: SessionConfig,
        viewport: Viewport,
        seed: u64,
    ) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let pool = WordPool::build(words, &cfg, &mut rng);
        if pool.is_empty() {
            log::warn!("{} catalog is empty; nothing will spawn", language.id());
        } else {
            log::info!(
                "{} catalog: {} words, {} in the fast lane",
                language.id(), pool.catalog().len(), pool.fast_lane().len(),
            );
        }
        Session {
            language,
            pool,
            aliens: AlienArena::new(),
            input: InputBuffer::new(),
            score: Score::default(),
            viewport,
            cfg,
            last_spawn: None,
            rng,
        }
    }

    /// One frame: spawn if the cadence allows, then advance every alien.
    /// A miss clears the input buffer once, however many aliens missed.
    pub fn tick<M: TextMeasure + ?Sized>(&mut self, now: f64, measure: &M) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if self.spawn_due(now) {
            self.last_spawn = Some(now);
            if let Some(alien) = spawn::spawn_alien(
                &self.pool, &self.cfg, self.viewport.width, measure, &mut self.rng,
            ) {
                let code = alien.code.clone();
                let id = self.aliens.insert(alien);
                self.score.spawned += 1;
                events.push(GameEvent::Spawned { id, code });
            }
        }

        let outcome = step::step(
            self.aliens.take(), now, self.viewport.height, self.cfg.miss_threshold_px,
        );
        if outcome.missed() {
            self.input.clear();
        }
        self.aliens.replace(outcome.aliens);
        events.extend(outcome.events);

        events
    }

    /// First tick spawns immediately; afterwards strictly more than one
    /// interval must have passed.
    fn spawn_due(&self, now: f64) -> bool {
        match self.last_spawn {
            None => true,
            Some(last) => now - last > self.cfg.spawn_interval_ms,
        }
    }

    /// Route one key event to the match engine.
    pub fn key(&mut self, key: &str, now: f64) -> Option<GameEvent> {
        matcher::on_key(
            key, now, &self.cfg,
            &mut self.input, &mut self.aliens, &mut self.score,
        )
    }

    /// Scale x positions by the width change, then pull each word back
    /// inside the margins. A word wider than the space between the margins
    /// sits at the left margin, same as at spawn.
    pub fn resize<M: TextMeasure + ?Sized>(&mut self, width: f32, height: f32, measure: &M) {
        let old_width = self.viewport.width;
        let scale = if old_width > 0.0 { width / old_width } else { 1.0 };
        let margin = self.cfg.margin_px;

        for a in self.aliens.iter_mut() {
            let text_width = measure.measure_text(&a.code);
            let max_x = width - text_width - margin;
            a.x = if max_x < margin {
                margin
            } else {
                (a.x * scale).clamp(margin, max_x)
            };
        }

        self.viewport = Viewport { width, height };
    }
}
