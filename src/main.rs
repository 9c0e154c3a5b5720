//! Drift Worm entry point
//!
//! Runs the simulation headless at a fixed 60 Hz with a scripted
//! attract-mode pilot, wiring tick events into the audio and quote
//! subsystems. A graphical front end would replace the pilot with real
//! input and feed `render::build_frame` to a backend.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use drift_worm::audio::{self, NullAudio};
use drift_worm::consts::*;
use drift_worm::quotes::{QuoteEvent, QuoteGenerator, Quotes};
use drift_worm::render::build_frame;
use drift_worm::sim::{tick, GameEvent, GameState, TickInput};

/// Scripted input: weave vertically, nudge forward now and then, and fire
/// once the arming delay has passed
fn attract_input(t: u64) -> TickInput {
    TickInput {
        dx: if t % 240 < 40 { 1 } else { 0 },
        dy: match (t / 90) % 4 {
            0 => -1,
            2 => 1,
            _ => 0,
        },
        fire: t % 300 == 150,
        restart: false,
        quit: false,
    }
}

/// Offline stand-in for a remote text service: one canned line per event
struct CannedQuotes;

impl QuoteGenerator for CannedQuotes {
    fn generate(
        &self,
        event: QuoteEvent,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let line = match event {
            QuoteEvent::Appeared => "Fresh worm on the menu!",
            QuoteEvent::Damaged => "You'll pay for that, invertebrate!",
            QuoteEvent::Dying => "This isn't over... squawk...",
            QuoteEvent::Nibble => "Mmm, tastes like dirt!",
        };
        Ok(line.to_string())
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    let max_ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(7200);

    log::info!("Drift Worm starting (seed {seed}, {max_ticks} ticks max)");

    let mut state = GameState::new(seed);
    let mut quotes = Quotes::open(
        PathBuf::from("quotes.json"),
        Some(std::sync::Arc::new(CannedQuotes)),
    );
    let mut audio_sink = NullAudio;

    let tick_duration = Duration::from_secs(1) / TICK_HZ;
    let mut next_tick = Instant::now();

    for t in 0..max_ticks {
        let input = attract_input(t);
        if input.quit {
            break;
        }
        tick(&mut state, &input);

        audio::dispatch(&state.events, &mut audio_sink);
        let quote_events: Vec<_> = state
            .events
            .iter()
            .filter_map(|event| match event {
                GameEvent::Quote(quote_event) => Some(*quote_event),
                _ => None,
            })
            .collect();
        for quote_event in quote_events {
            let line = quotes.take(quote_event);
            if let Some(bird) = &mut state.bird {
                bird.set_taunt(line);
            }
        }

        // A backend would consume this; building it keeps the demo honest
        let frame = build_frame(&state);
        if t % (10 * TICK_HZ as u64) == 0 {
            log::debug!(
                "tick {t}: {} draw cmds, {} segments, score {}",
                frame.len(),
                state.worm.len(),
                state.score()
            );
        }

        if state.game_over && state.worm.body_alpha() == 0 {
            log::info!("worm died at tick {t}");
            break;
        }

        next_tick += tick_duration;
        let now = Instant::now();
        if next_tick > now {
            std::thread::sleep(next_tick - now);
        } else {
            // Fell behind; resync instead of bursting catch-up ticks
            next_tick = now;
        }
    }

    quotes.save();
    log::info!(
        "run over: score {}, {} apples, {} bombs, {} birds downed, {:.0} px traveled",
        state.score(),
        state.stats.apples_collected,
        state.stats.bombs_fired,
        state.stats.birds_downed,
        state.distance_traveled
    );
}
