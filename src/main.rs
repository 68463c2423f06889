/// Entry point and frame scheduler.

mod config;
mod domain;
mod error;
mod logging;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use rand::Rng;

use config::GameConfig;
use domain::language::Language;
use domain::words;
use error::GameError;
use sim::event::GameEvent;
use sim::session::{Score, Session, Viewport};
use ui::input::InputState;
use ui::menu::Menu;
use ui::renderer::Renderer;
use ui::scene;
use ui::sound::{play_event_cues, SoundEngine};
use ui::surface::Surface;

fn main() {
    let config = GameConfig::load();
    logging::init(&config.log_file);
    log::info!("starting, words from {}", config.words_dir.display());

    let mut renderer = Renderer::new();

    if let Err(e) = renderer.init() {
        log::error!("terminal init failed: {e}");
        // Raw mode may already be on if the screen switch failed.
        let _ = renderer.cleanup();
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = if config.sound_enabled { SoundEngine::new() } else { None };

    let result = run(&mut renderer, sound.as_ref(), &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    match result {
        Ok(Some(score)) => {
            log::info!("session over: {}/{}", score.matched, score.spawned);
            println!();
            println!("Thanks for playing Code Invaders!");
            println!("Final Score: {}/{}", score.matched, score.spawned);
        }
        Ok(None) => log::info!("quit from menu"),
        Err(e) => {
            log::error!("{e}");
            eprintln!("Game error: {e}");
        }
    }
}

/// Menu, then one session. `None` when the player quit before picking.
fn run(
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
    config: &GameConfig,
) -> Result<Option<Score>, GameError> {
    let mut input = InputState::new();
    let frame = Duration::from_millis(config.frame_ms);

    let Some(language) = select_language(renderer, &mut input, frame, config.language)? else {
        return Ok(None);
    };

    let words = words::load(language, &config.words_dir);
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    log::info!(
        "session start: {} ({} keywords, {} primitives, seed {seed})",
        language.id(), words.keywords.len(), words.primitives.len(),
    );

    renderer.set_title(&format!("Code Invaders {}", language.id()))?;
    let (width, height) = renderer.size();
    let mut session = Session::new(
        language, &words, config.session.clone(), Viewport { width, height }, seed,
    );

    game_loop(&mut session, renderer, &mut input, sound, frame)?;
    Ok(Some(session.score))
}

fn select_language(
    renderer: &mut Renderer,
    input: &mut InputState,
    frame: Duration,
    preselect: Option<Language>,
) -> Result<Option<Language>, GameError> {
    let mut menu = Menu::new(preselect);

    loop {
        let frame_start = Instant::now();
        input.drain_events();

        if input.quit_requested() {
            return Ok(None);
        }
        for key in input.keys() {
            if let Some(lang) = menu.handle_key(key) {
                return Ok(Some(lang));
            }
        }

        if input.resized() {
            renderer.sync_size()?;
        }
        menu.draw(renderer);
        renderer.present()?;

        sleep_rest_of_frame(frame_start, frame);
    }
}

/// One iteration per frame until Esc / Ctrl+C. Keys drained this frame are
/// matched before the tick so a word typed just before it lands still counts.
fn game_loop(
    session: &mut Session,
    renderer: &mut Renderer,
    input: &mut InputState,
    sound: Option<&SoundEngine>,
    frame: Duration,
) -> Result<(), GameError> {
    let start = Instant::now();
    let mut cue_rng = rand::rng();
    let mut events: Vec<GameEvent> = Vec::new();

    loop {
        let frame_start = Instant::now();
        input.drain_events();

        if input.quit_requested() {
            break;
        }

        if input.resized() {
            if let Some((width, height)) = renderer.sync_size()? {
                log::debug!("resized to {width}x{height} px");
                session.resize(width, height, &*renderer);
            }
        }

        let now = start.elapsed().as_secs_f64() * 1000.0;

        events.clear();
        for key in input.keys() {
            events.extend(session.key(key, now));
        }
        events.extend(session.tick(now, &*renderer));

        log_events(&events);
        if let Some(sfx) = sound {
            play_event_cues(sfx, &events, &mut cue_rng);
        }

        scene::draw(session, now, renderer);
        renderer.present()?;

        sleep_rest_of_frame(frame_start, frame);
    }

    Ok(())
}

fn log_events(events: &[GameEvent]) {
    for ev in events {
        match ev {
            GameEvent::Spawned { id, code } => log::debug!("spawn #{} {code}", id.0),
            GameEvent::Matched { id, code } => log::info!("hit #{} {code}", id.0),
            GameEvent::Missed { id, code } => log::info!("miss #{} {code}", id.0),
        }
    }
}

fn sleep_rest_of_frame(frame_start: Instant, frame: Duration) {
    if let Some(rest) = frame.checked_sub(frame_start.elapsed()) {
        std::thread::sleep(rest);
    }
}
