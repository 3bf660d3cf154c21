use std::env;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::{debug, info};

use pianoroll::midi_writer::demo_song;
use pianoroll::{Config, KeyMap, Session};

fn read_config(path: Option<&String>) -> Result<Config> {
    match path {
        Some(path) => {
            Config::load(Path::new(path)).with_context(|| format!("config file {}", path))
        }
        None => Ok(Config::default()),
    }
}

/// Plays the song headless, pressing every key as its note reaches the hit line.
fn simulate(session: &mut Session<KeyMap>, frame_rate: f64) {
    let time_base = session.song().time_base;
    let starts: Vec<(f64, u8)> = session
        .song()
        .timeline
        .iter()
        .map(|note| (time_base.tick_to_seconds(note.start_tick()), note.pitch()))
        .collect();

    let projector = *session.projector();
    let tail_seconds: f64 = f64::from(projector.viewport().bottom() - projector.hit_line_y())
        / f64::from(projector.scroll_speed());
    let end_seconds: f64 = session.song().duration_seconds() + tail_seconds;

    let dt: f64 = 1.0 / frame_rate;
    let mut next_start: usize = 0;
    let mut frames: usize = 0;
    let mut max_visible: usize = 0;
    let mut next_report: f64 = 0.0;

    session.set_playing(true);
    while session.playhead_seconds() <= end_seconds {
        while next_start < starts.len() && starts[next_start].0 <= session.playhead_seconds() {
            if !session.trigger(starts[next_start].1) {
                debug!("no key for pitch {}", starts[next_start].1);
            }
            next_start += 1;
        }

        let frame = session.frame();
        max_visible = max_visible.max(frame.notes.len());
        if frame.playhead_seconds >= next_report {
            println!(
                "{:>7.2}s  notes:{:>3}  effects:{:>3}",
                frame.playhead_seconds,
                frame.notes.len(),
                frame.effects.len()
            );
            next_report += 1.0;
        }

        session.advance(dt);
        frames += 1;
    }
    session.set_playing(false);

    println!(
        "{} notes, {:.1} BPM, {:.2}s, {} frames, at most {} notes on screen",
        session.song().timeline.len(),
        time_base.bpm(),
        session.song().duration_seconds(),
        frames,
        max_visible
    );
}

fn run(args: &[String]) -> Result<()> {
    if args.len() > 3 {
        bail!("Usage: {} [midi_filepath] [config.json]", args[0]);
    }

    let config: Config = read_config(args.get(2))?;
    let mut session: Session<KeyMap> =
        Session::new(config.key_map(), config.projector(), config.effects);

    match args.get(1) {
        Some(path) => session.load(Path::new(path))?,
        None => {
            info!("No MIDI file given, playing the demo scale");
            session.load_bytes(demo_song()?)?;
        }
    }

    simulate(&mut session, config.frame_rate);
    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if let Err(err) = run(&args) {
        eprintln!("{:#}", err);
        std::process::exit(termination::EXIT_FAILURE);
    }
}
