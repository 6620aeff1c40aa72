//! Interactive strumming practice through the default sound card.
//!
//! Run with: cargo run --example practice --features device
//!
//! Logs go to stderr; set RUST_LOG=strumbeat=debug to see transport events.

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use std::io::{Write, stdout};
use std::panic;
use std::time::Duration;
use strumbeat::{
    DeviceOutput, PlaybackOptions, PracticeSession, RandomMute, SUGGESTED_TEMPO_RANGE, presets,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const TEMPO_STEP: f64 = 5.0;
const VOLUME_STEP: f32 = 0.05;
const RANDOM_MUTE_PERCENT: f64 = 25.0;
const MAX_POLL: Duration = Duration::from_millis(20);

struct Ui {
    preset: usize,
    tempo: f64,
    options: PlaybackOptions,
}

impl Ui {
    fn draw(&self, session: &PracticeSession) -> Result<()> {
        let preset = &presets::all()[self.preset];
        let pattern = session.scheduler().pattern();
        let index = session.scheduler().current_beat_index();

        let mut out = stdout();
        out.execute(MoveTo(0, 0))?;
        out.execute(Clear(ClearType::All))?;

        let on_off = |flag: bool| if flag { "on" } else { "off" };
        let mute = match self.options.random_mute {
            Some(mute) => format!("{:.0}%", mute.percentage),
            None => "off".to_string(),
        };

        let lines = [
            "Strumbeat practice".to_string(),
            String::new(),
            format!("Pattern:  {} ({})", preset.name, preset.genre),
            format!("          {}", pattern),
            format!("Step:     {} ({})", index + 1, pattern.beat_label(index)),
            format!(
                "Tempo:    {:.0} BPM   Volume: {:.0}%",
                self.tempo,
                session.volume() * 100.0
            ),
            format!(
                "Accent: {}   Rest click: {}   Random mute: {}",
                on_off(self.options.accent_enabled),
                on_off(self.options.rest_sound_enabled),
                mute
            ),
            format!(
                "Status:   {}",
                if session.scheduler().is_playing() { "playing" } else { "stopped" }
            ),
            String::new(),
            "Space: play/stop  +/-: tempo  Up/Down: volume".to_string(),
            "a: accent  r: rest click  m: random mute  n: next pattern  q: quit".to_string(),
        ];
        for line in lines {
            write!(out, "{}\r\n", line)?;
        }
        out.flush()?;
        Ok(())
    }
}

fn cleanup_terminal() {
    let _ = stdout().execute(Show);
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("strumbeat=warn")))
        .init();

    let output = DeviceOutput::default_device()?;
    let config = output.preferred_config()?;
    let mut session = PracticeSession::new(config);

    // The first key press plays the part of the user gesture
    let mut output = Some(output);

    let mut ui = Ui {
        preset: 0,
        tempo: 100.0,
        options: PlaybackOptions::default(),
    };
    session
        .scheduler_mut()
        .set_pattern(presets::all()[ui.preset].pattern());

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(Hide)?;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        cleanup_terminal();
        original_hook(panic_info);
    }));

    ui.draw(&session)?;
    let mut last_index = session.scheduler().current_beat_index();

    loop {
        let wait = session.time_until_next_tick().map_or(MAX_POLL, |d| d.min(MAX_POLL));
        if event::poll(wait)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            if let Some(output) = output.take() {
                session.gesture(output)?;
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char(' ') => {
                    if session.scheduler().is_playing() {
                        session.stop();
                    } else {
                        let pattern = session.scheduler().pattern().clone();
                        session.start(pattern, ui.tempo, ui.options)?;
                    }
                }
                KeyCode::Char('+') | KeyCode::Char('=') => {
                    ui.tempo = (ui.tempo + TEMPO_STEP).min(*SUGGESTED_TEMPO_RANGE.end());
                    session.scheduler_mut().set_tempo(ui.tempo)?;
                }
                KeyCode::Char('-') => {
                    ui.tempo = (ui.tempo - TEMPO_STEP).max(*SUGGESTED_TEMPO_RANGE.start());
                    session.scheduler_mut().set_tempo(ui.tempo)?;
                }
                KeyCode::Up => {
                    session.set_volume(session.volume() + VOLUME_STEP);
                }
                KeyCode::Down => {
                    session.set_volume(session.volume() - VOLUME_STEP);
                }
                KeyCode::Char('a') => {
                    ui.options.accent_enabled = !ui.options.accent_enabled;
                    session.scheduler_mut().set_options(ui.options);
                }
                KeyCode::Char('r') => {
                    ui.options.rest_sound_enabled = !ui.options.rest_sound_enabled;
                    session.scheduler_mut().set_options(ui.options);
                }
                KeyCode::Char('m') => {
                    ui.options.random_mute = match ui.options.random_mute {
                        Some(_) => None,
                        None => Some(RandomMute::clamped(RANDOM_MUTE_PERCENT)),
                    };
                    session.scheduler_mut().set_options(ui.options);
                }
                KeyCode::Char('n') => {
                    ui.preset = (ui.preset + 1) % presets::all().len();
                    session.stop();
                    session
                        .scheduler_mut()
                        .set_pattern(presets::all()[ui.preset].pattern());
                }
                _ => {}
            }
            ui.draw(&session)?;
        }

        session.pump();

        let index = session.scheduler().current_beat_index();
        if index != last_index {
            last_index = index;
            ui.draw(&session)?;
        }
    }

    session.close();
    cleanup_terminal();
    Ok(())
}
