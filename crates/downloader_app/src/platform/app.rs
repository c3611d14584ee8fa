use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use downloader_core::{update, AppState, AppViewModel, Msg};
use engine_logging::{engine_debug, engine_info};

use super::commands::{self, Command, CommandError, HELP};
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::render;

enum Input {
    Msg(Msg),
    Help,
    Invalid(CommandError),
    Quit,
    /// Stdin closed; pending engine work still runs to completion.
    EndOfInput,
}

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    engine_logging::initialize(config.log_destination.clone(), config.log_level);
    engine_info!("starting {}", render::TITLE);

    let (input_tx, input_rx) = mpsc::channel::<Input>();
    spawn_stdin_reader(input_tx);

    let stdout = io::stdout();
    let mut handler = AppHandler::new(EffectRunner::new(&config.engine), stdout.lock());
    handler.render_current()?;
    handler.write_lines(HELP.lines())?;

    loop {
        match input_rx.recv_timeout(config.poll_interval) {
            Ok(Input::Msg(msg)) => handler.dispatch_msg(msg)?,
            Ok(Input::Help) => handler.write_lines(HELP.lines())?,
            Ok(Input::Invalid(err)) => handler.write_lines([err.to_string()])?,
            Ok(Input::EndOfInput) | Err(mpsc::RecvTimeoutError::Disconnected) => {
                handler.finish_pending(config.poll_interval)?;
                break;
            }
            Ok(Input::Quit) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }
        handler.process_engine_events()?;
    }

    engine_info!("exiting");
    Ok(())
}

fn spawn_stdin_reader(input_tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let inputs = match commands::parse(&line) {
                Ok(Command::Send(msgs)) => msgs.into_iter().map(Input::Msg).collect(),
                Ok(Command::Help) => vec![Input::Help],
                Ok(Command::Quit) => vec![Input::Quit],
                Err(err) => vec![Input::Invalid(err)],
            };
            for input in inputs {
                if input_tx.send(input).is_err() {
                    return;
                }
            }
        }
        let _ = input_tx.send(Input::EndOfInput);
    });
}

struct AppHandler<W: Write> {
    state: AppState,
    runner: EffectRunner,
    out: W,
}

impl<W: Write> AppHandler<W> {
    fn new(runner: EffectRunner, out: W) -> Self {
        Self {
            state: AppState::new(),
            runner,
            out,
        }
    }

    fn process_engine_events(&mut self) -> anyhow::Result<()> {
        for msg in self.runner.poll() {
            self.dispatch_msg(msg)?;
        }
        Ok(())
    }

    /// Keeps applying engine events until no fetch or download is in flight.
    fn finish_pending(&mut self, poll: Duration) -> anyhow::Result<()> {
        loop {
            self.process_engine_events()?;
            if !self.state.is_processing() {
                return Ok(());
            }
            thread::sleep(poll);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) -> anyhow::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        engine_logging::set_session_generation(state.generation());
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);

        if was_dirty {
            self.render_current()?;
        }
        Ok(())
    }

    fn render_current(&mut self) -> anyhow::Result<()> {
        let view = self.state.view();
        self.write_frame(&view)?;
        if view.notification.is_some() {
            // The notification has been shown once; drop it without a redraw.
            let state = std::mem::take(&mut self.state);
            let (mut state, _) = update(state, Msg::NotificationDismissed);
            state.consume_dirty();
            self.state = state;
            engine_debug!("notification dismissed");
        }
        Ok(())
    }

    fn write_frame(&mut self, view: &AppViewModel) -> anyhow::Result<()> {
        writeln!(self.out).context("write frame")?;
        self.write_lines(render::render(view))
    }

    fn write_lines<I, S>(&mut self, lines: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            writeln!(self.out, "{}", line.as_ref()).context("write to stdout")?;
        }
        self.out.flush().context("flush stdout")
    }
}
