use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use studio_core::{update, AppState, Msg};
use studio_logging::{studio_debug, studio_error, studio_info};

use super::config::{api_key_from_env, AppConfig};
use super::effects::EffectRunner;
use super::logging;
use super::ui::commands::{self, Command};
use super::ui::render;

const TICK_INTERVAL: Duration = Duration::from_millis(75);

/// Everything the main loop reacts to.
enum Inbound {
    Msg(Msg),
    Input(Result<Command, clap::Error>),
    /// Stdin closed.
    Eof,
}

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    logging::initialize(config.log);
    studio_info!("NanoStudio starting with {:?}", config);

    let (inbound_tx, inbound_rx) = mpsc::channel::<Inbound>();
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let mut runner = EffectRunner::new(&config, api_key_from_env(), msg_tx.clone())?;

    // Core messages from the engine pump, the clipboard and the ticker share
    // one channel; forward them into the main loop.
    let forward_tx = inbound_tx.clone();
    thread::Builder::new()
        .name("studio-msgs".to_string())
        .spawn(move || {
            for msg in msg_rx {
                if forward_tx.send(Inbound::Msg(msg)).is_err() {
                    break;
                }
            }
        })
        .context("starting the message forwarder")?;

    // Background tick to coalesce rendering.
    thread::Builder::new()
        .name("studio-tick".to_string())
        .spawn(move || {
            while msg_tx.send(Msg::Tick).is_ok() {
                thread::sleep(TICK_INTERVAL);
            }
        })
        .context("starting the ticker")?;

    let input_tx = inbound_tx;
    thread::Builder::new()
        .name("studio-stdin".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                let Some(parsed) = commands::parse(&line).transpose() else {
                    continue;
                };
                if input_tx.send(Inbound::Input(parsed)).is_err() {
                    return;
                }
            }
            let _ = input_tx.send(Inbound::Eof);
        })
        .context("starting the input reader")?;

    let mut app = App {
        state: AppState::new(),
        out: io::stdout(),
    };
    let result = app.run(&inbound_rx, &mut runner);
    if let Err(err) = &result {
        studio_error!("Front-end stopped: {:#}", err);
    }
    runner.shutdown();
    studio_info!("NanoStudio exiting");
    result
}

struct App {
    state: AppState,
    out: io::Stdout,
}

impl App {
    fn run(
        &mut self,
        inbound_rx: &mpsc::Receiver<Inbound>,
        runner: &mut EffectRunner,
    ) -> anyhow::Result<()> {
        self.print(&render::render(&self.state.view()))?;

        for inbound in inbound_rx {
            match inbound {
                Inbound::Msg(msg) => self.dispatch(msg, runner)?,
                // Help pages arrive as errors too; clap formats both.
                Inbound::Input(Err(err)) => self.print(&err.to_string())?,
                Inbound::Input(Ok(Command::Quit)) | Inbound::Eof => break,
                Inbound::Input(Ok(Command::Tools)) => {
                    let view = self.state.view();
                    self.print(&render::render_tools(&view.nav))?;
                }
                Inbound::Input(Ok(command)) => {
                    studio_debug!("Command {:?}", command);
                    for msg in command.into_msgs() {
                        self.dispatch(msg, runner)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Runs one message through the core and hands its effects to the
    /// runner. Redraws only on `Tick`, and only when something changed.
    fn dispatch(&mut self, msg: Msg, runner: &mut EffectRunner) -> anyhow::Result<()> {
        let is_tick = matches!(msg, Msg::Tick);
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        runner.enqueue(effects);

        if is_tick && self.state.consume_dirty() {
            let view = self.state.view();
            self.print(&render::render(&view))?;
        }
        Ok(())
    }

    fn print(&mut self, text: &str) -> anyhow::Result<()> {
        let mut out = self.out.lock();
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
