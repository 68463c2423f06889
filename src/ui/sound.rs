/// Sound engine: short procedural tones via rodio.
///
/// Playback is fire-and-forget (non-blocking) via rodio's Sink. Any
/// failure is swallowed: audio must never stop the game.
///
/// Compile with `--no-default-features` or without the "sound" feature
/// to disable audio entirely (the stub SoundEngine does nothing).

use rand::Rng;

use crate::sim::event::GameEvent;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Wave {
    Sine,
    Square,
}

pub trait AudioSink {
    fn play_tone(&self, freq_hz: f32, duration_ms: u32, wave: Wave);
}

/// Matched: a short square blip with a random pitch in [440, 640) Hz.
/// Missed: a low sine thud, once per missed alien.
pub fn play_event_cues<R: Rng + ?Sized>(sink: &dyn AudioSink, events: &[GameEvent], rng: &mut R) {
    for event in events {
        match event {
            GameEvent::Matched { .. } => {
                let freq = 440.0 + rng.random_range(0.0..200.0);
                sink.play_tone(freq, 200, Wave::Square);
            }
            GameEvent::Missed { .. } => sink.play_tone(120.0, 400, Wave::Sine),
            GameEvent::Spawned { .. } => {}
        }
    }
}

#[cfg(feature = "sound")]
mod inner {
    use rodio::buffer::SamplesBuffer;
    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::{AudioSink, Wave};

    const SAMPLE_RATE: u32 = 22050;
    const VOLUME: f32 = 0.25;
    /// Envelope floor reached at the end of a tone.
    const FADE_FLOOR: f32 = 0.0001;

    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            match OutputStream::try_default() {
                Ok((stream, handle)) => Some(SoundEngine { _stream: stream, handle }),
                Err(e) => {
                    log::warn!("audio unavailable: {e}");
                    None
                }
            }
        }
    }

    impl AudioSink for SoundEngine {
        fn play_tone(&self, freq_hz: f32, duration_ms: u32, wave: Wave) {
            match Sink::try_new(&self.handle) {
                Ok(sink) => {
                    let samples = gen_tone(freq_hz, duration_ms as f32 / 1000.0, wave);
                    sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
                    sink.detach(); // fire-and-forget
                }
                Err(e) => log::debug!("tone dropped: {e}"),
            }
        }
    }

    /// Tone with an exponential fade from full volume down to `FADE_FLOOR`.
    pub(super) fn gen_tone(freq: f32, duration: f32, wave: Wave) -> Vec<f32> {
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let phase = (t * freq * 2.0 * std::f32::consts::PI).sin();
                let sample = match wave {
                    Wave::Sine => phase,
                    Wave::Square => if phase >= 0.0 { 1.0 } else { -1.0 },
                };
                let env = FADE_FLOOR.powf(i as f32 / n as f32);
                sample * env * VOLUME
            })
            .collect()
    }
}

// ════════════════════════════════════════════════════════════
//  Public API: no-ops when the sound feature is off
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
}

#[cfg(not(feature = "sound"))]
impl AudioSink for SoundEngine {
    fn play_tone(&self, _freq_hz: f32, _duration_ms: u32, _wave: Wave) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::alien::AlienId;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        tones: RefCell<Vec<(f32, u32, Wave)>>,
    }

    impl AudioSink for Recorder {
        fn play_tone(&self, freq_hz: f32, duration_ms: u32, wave: Wave) {
            self.tones.borrow_mut().push((freq_hz, duration_ms, wave));
        }
    }

    fn missed(id: u64) -> GameEvent {
        GameEvent::Missed { id: AlienId(id), code: "for".into() }
    }

    #[test]
    fn one_thud_per_missed_alien() {
        let rec = Recorder::default();
        let mut rng = Pcg32::seed_from_u64(0);
        play_event_cues(&rec, &[missed(0), missed(1), missed(2)], &mut rng);
        let tones = rec.tones.borrow();
        assert_eq!(tones.len(), 3);
        assert!(tones.iter().all(|&t| t == (120.0, 400, Wave::Sine)));
    }

    #[test]
    fn match_blip_pitch_range() {
        let rec = Recorder::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let matched = GameEvent::Matched { id: AlienId(0), code: "if".into() };
        let spawned = GameEvent::Spawned { id: AlienId(1), code: "do".into() };
        play_event_cues(&rec, &[matched, spawned], &mut rng);
        let tones = rec.tones.borrow();
        assert_eq!(tones.len(), 1);
        let (freq, ms, wave) = tones[0];
        assert!((440.0..640.0).contains(&freq));
        assert_eq!((ms, wave), (200, Wave::Square));
    }

    #[cfg(feature = "sound")]
    #[test]
    fn tone_fades_out() {
        let samples = inner::gen_tone(120.0, 0.4, Wave::Sine);
        assert_eq!(samples.len(), (22050.0 * 0.4) as usize);
        let head = samples[..200].iter().fold(0.0f32, |m, s| m.max(s.abs()));
        let tail = samples[samples.len() - 200..].iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(head > 0.1);
        assert!(tail < 0.001);
    }
}
