//! Interactive session loop
//!
//! The loop owns the [`SessionController`] and is the only place intents are
//! dispatched. Terminal input and ticks arrive as [`Event`]s on one channel
//! and are handled strictly in arrival order.

use anyhow::Result;
use colored::Colorize;
use ft_core::clock::{Clock, SystemClock};
use ft_core::config::Config;
use ft_core::session::{SessionController, SessionView, TickOutcome};
use ft_core::ticker::Ticker;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

/// Loop input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A line typed by the user
    Input(String),
    /// Standard input reached end of file
    InputClosed,
    /// Elapsed seconds from the ticker started for `generation`
    Tick { generation: u64, elapsed: u64 },
}

/// Parsed user command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start { minutes: u32, task: String },
    Status,
    Interrupt,
    Finish,
    History,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line; `Ok(None)` for a blank line
    pub fn parse(line: &str) -> std::result::Result<Option<Self>, String> {
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            return Ok(None);
        };

        let command = match word.to_lowercase().as_str() {
            "start" | "s" => {
                let minutes = parts
                    .next()
                    .ok_or("usage: start <minutes> <task>")?
                    .parse::<u32>()
                    .map_err(|_| "minutes must be a whole number".to_string())?;
                let task = parts.collect::<Vec<_>>().join(" ");
                Command::Start { minutes, task }
            }
            "status" | "st" => Command::Status,
            "interrupt" | "i" => Command::Interrupt,
            "finish" | "f" => Command::Finish,
            "history" | "h" => Command::History,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => return Err(format!("unknown command '{}' (try 'help')", other)),
        };
        Ok(Some(command))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Interactive loop around a session controller
pub struct SessionLoop<W: Write> {
    controller: SessionController,
    clock: Arc<dyn Clock>,
    config: Config,
    ticker: Option<Ticker>,
    /// Bumped per ticker so late ticks from a stopped one are dropped
    generation: u64,
    /// Last `elapsed / countdown_every_secs` the status line was printed for
    countdown_bucket: u64,
    events_tx: Sender<Event>,
    events_rx: Receiver<Event>,
    out: W,
}

impl<W: Write> SessionLoop<W> {
    pub fn new(config: Config, out: W) -> Self {
        Self::with_clock(config, Arc::new(SystemClock), out)
    }

    pub fn with_clock(config: Config, clock: Arc<dyn Clock>, out: W) -> Self {
        let controller = SessionController::with_clock(Arc::clone(&clock)).with_config(&config.timer);
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            controller,
            clock,
            config,
            ticker: None,
            generation: 0,
            countdown_bucket: 0,
            events_tx,
            events_rx,
            out,
        }
    }

    /// Read-only view of the controlled sessions
    pub fn view(&self) -> &dyn SessionView {
        &self.controller
    }

    fn write_status(&mut self) -> Result<()> {
        let line = crate::render::status_line(self.view());
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    /// Validate and start a session, then start its ticker
    pub fn start_session(&mut self, task: &str, minutes: u32) -> Result<()> {
        let session = self.controller.create_session(task, minutes)?;
        let line = format!(
            "{} Started '{}' for {} minutes",
            "▶".green(),
            session.task(),
            session.planned_minutes()
        );
        writeln!(self.out, "{}", line)?;
        self.start_ticker();
        self.write_status()
    }

    fn start_ticker(&mut self) {
        self.stop_ticker();
        self.generation += 1;
        self.countdown_bucket = 0;
        let generation = self.generation;
        let tx = self.events_tx.clone();
        self.ticker = Some(Ticker::start(
            self.config.timer.tick_interval(),
            move |elapsed| tx.send(Event::Tick { generation, elapsed }).is_ok(),
        ));
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
    }

    /// Block on events until the user quits or input closes
    pub fn run(mut self) -> Result<()> {
        spawn_input_reader(self.events_tx.clone());
        self.prompt()?;

        while let Ok(event) = self.events_rx.recv() {
            if self.handle_event(event)? == Flow::Quit {
                break;
            }
        }

        self.shutdown()
    }

    fn handle_event(&mut self, event: Event) -> Result<Flow> {
        match event {
            Event::Input(line) => {
                let flow = match Command::parse(&line) {
                    Ok(Some(command)) => self.handle_command(command)?,
                    Ok(None) => Flow::Continue,
                    Err(message) => {
                        writeln!(self.out, "{} {}", "✗".red(), message)?;
                        Flow::Continue
                    }
                };
                if flow == Flow::Continue {
                    self.prompt()?;
                }
                Ok(flow)
            }
            Event::InputClosed => Ok(Flow::Quit),
            Event::Tick {
                generation,
                elapsed,
            } => {
                if generation == self.generation {
                    self.handle_tick(elapsed)?;
                } else {
                    tracing::trace!(generation, "dropping tick from stopped ticker");
                }
                Ok(Flow::Continue)
            }
        }
    }

    fn handle_tick(&mut self, elapsed: u64) -> Result<()> {
        let task = self
            .controller
            .active_session()
            .map(|s| s.task().to_string());

        match self.controller.tick(elapsed) {
            TickOutcome::Idle => self.stop_ticker(),
            TickOutcome::Running { .. } => {
                let every = self.config.ui.countdown_every_secs;
                if every > 0 && elapsed / every > self.countdown_bucket {
                    self.countdown_bucket = elapsed / every;
                    writeln!(self.out)?;
                    self.write_status()?;
                    self.prompt()?;
                }
            }
            TickOutcome::Finished => {
                self.stop_ticker();
                writeln!(
                    self.out,
                    "\n{} Session '{}' completed",
                    "✓".green(),
                    task.unwrap_or_default()
                )?;
                self.prompt()?;
            }
        }
        Ok(())
    }

    fn handle_command(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Start { minutes, task } => {
                if let Err(err) = self.start_session(&task, minutes) {
                    writeln!(self.out, "{} {}", "✗".red(), err)?;
                }
            }
            Command::Status => self.write_status()?,
            Command::Interrupt => {
                self.stop_ticker();
                match self.controller.interrupt_active_session() {
                    Some(session) => {
                        let line = format!("{} Interrupted '{}'", "■".red(), session.task());
                        writeln!(self.out, "{}", line)?;
                    }
                    None => writeln!(self.out, "No active session")?,
                }
            }
            Command::Finish => {
                self.stop_ticker();
                match self.controller.mark_active_session_finished() {
                    Some(session) => {
                        let line = format!("{} Finished '{}'", "✓".green(), session.task());
                        writeln!(self.out, "{}", line)?;
                    }
                    None => writeln!(self.out, "No active session")?,
                }
            }
            Command::History => {
                let table = crate::render::history_table(self.view(), self.clock.now());
                write!(self.out, "{}", table)?;
                if !table.ends_with('\n') {
                    writeln!(self.out)?;
                }
            }
            Command::Help => self.print_help()?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Print available commands and task suggestions
    pub fn print_help(&mut self) -> Result<()> {
        let validator = self.controller.validator();
        writeln!(self.out, "{}", "Commands:".bold())?;
        writeln!(
            self.out,
            "  start <minutes> <task>  start a session ({}-{} minutes, usually in steps of {})",
            validator.min_minutes(),
            validator.max_minutes(),
            self.config.timer.minutes_step
        )?;
        writeln!(self.out, "  status                  show the countdown")?;
        writeln!(self.out, "  interrupt | i           stop the active session")?;
        writeln!(self.out, "  finish | f              mark the active session finished")?;
        writeln!(self.out, "  history | h             list sessions")?;
        writeln!(self.out, "  quit | q                leave")?;
        if !self.config.ui.task_suggestions.is_empty() {
            writeln!(
                self.out,
                "Suggestions: {}",
                self.config.ui.task_suggestions.join(", ").dimmed()
            )?;
        }
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        write!(self.out, "{} ", ">".dimmed())?;
        self.out.flush()?;
        Ok(())
    }

    /// Stop ticking and close out a session left running
    fn shutdown(&mut self) -> Result<()> {
        self.stop_ticker();
        if self.controller.active_session().is_none() {
            return Ok(self.out.flush()?);
        }
        if let Some(session) = self.controller.interrupt_active_session() {
            let line = format!("\n{} Interrupted '{}' on exit", "■".red(), session.task());
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Forward stdin lines into the event channel
fn spawn_input_reader(tx: Sender<Event>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(Event::Input(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(Event::InputClosed);
    });
}
