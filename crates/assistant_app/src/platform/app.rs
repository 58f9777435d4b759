use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use assistant_core::{update, Msg, PanelState};
use assistant_engine::ReqwestAnalyzer;
use assistant_logging::{assistant_info, assistant_warn};
use url::Url;

use super::config::{AppConfig, RuntimeConfig};
use super::effects::EffectRunner;
use super::input::{parse_command, to_msgs, Command};
use super::logging::{self, LogDestination};
use super::ui;

/// Everything the main loop reacts to.
pub enum AppEvent {
    Line(String),
    InputClosed,
    Msg(Msg),
    Navigate(Url),
}

pub fn run_app() -> anyhow::Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let file = AppConfig::load(config_path.as_deref())?;
    let config = RuntimeConfig::resolve(file, |key| std::env::var(key).ok());

    logging::initialize(if config.file.log_to_terminal {
        LogDestination::Both
    } else {
        LogDestination::File
    });
    assistant_info!("Starting assistant panel with {:?}", config);

    let ticket_base = config.file.ticket_base()?;
    let analyzer = ReqwestAnalyzer::new(config.analyze_settings())?;

    let (app_tx, app_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(Arc::new(analyzer), ticket_base, app_tx.clone())
        .context("starting analysis engine")?;
    spawn_stdin_reader(app_tx).context("starting input reader")?;

    let mut panel = Panel {
        state: PanelState::with_subject_id(config.file.default_subject_id.clone()),
        runner,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_lines(&mut out, ui::constants::HELP.iter().copied())?;
    panel.draw(&mut out)?;

    let mut input_closed = false;
    while let Ok(event) = app_rx.recv() {
        match event {
            AppEvent::Line(line) => match parse_command(&line) {
                Command::Quit => break,
                Command::Help => write_lines(&mut out, ui::constants::HELP.iter().copied())?,
                Command::Show => panel.draw(&mut out)?,
                Command::Submit if !panel.state.can_submit() => {
                    writeln!(out, "Submit is disabled right now.")?;
                }
                Command::Unknown(name) => {
                    writeln!(out, "Unknown command /{name}. Try /help.")?;
                }
                command => {
                    for msg in to_msgs(&command, &panel.state) {
                        panel.dispatch(msg);
                    }
                }
            },
            AppEvent::InputClosed => input_closed = true,
            AppEvent::Msg(msg) => panel.dispatch(msg),
            AppEvent::Navigate(target) => {
                writeln!(out, "Opening ticket page: {target}")?;
            }
        }
        panel.draw_if_dirty(&mut out)?;
        // Piped input: let an in-flight request settle before leaving.
        if input_closed && !panel.state.is_loading() {
            break;
        }
    }

    panel.dispatch(Msg::PanelClosed);
    assistant_info!("Assistant panel closed");
    Ok(())
}

struct Panel {
    state: PanelState,
    runner: EffectRunner,
}

impl Panel {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn draw(&mut self, out: &mut impl Write) -> io::Result<()> {
        self.state.consume_dirty();
        let lines = ui::render::render(&self.state.view());
        write_lines(out, lines.iter().map(String::as_str))
    }

    fn draw_if_dirty(&mut self, out: &mut impl Write) -> io::Result<()> {
        if self.state.consume_dirty() {
            self.draw(out)?;
        }
        Ok(())
    }
}

fn write_lines<'a>(out: &mut impl Write, lines: impl Iterator<Item = &'a str>) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

fn spawn_stdin_reader(app_tx: mpsc::Sender<AppEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("assistant-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if app_tx.send(AppEvent::Line(line)).is_err() {
                            return;
                        }
                    }
                    Err(err) => {
                        assistant_warn!("stdin read failed: {}", err);
                        break;
                    }
                }
            }
            let _ = app_tx.send(AppEvent::InputClosed);
        })?;
    Ok(())
}
