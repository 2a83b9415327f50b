use std::time::{Duration, Instant};

use common::high_scores::{ScoreKeeper, ScoreRecorder};
use common::log;
use common::sim::{EventSink, MatchController, MatchMode, MatchState, SimEvent, dispatch};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

use crate::console_log::{ConsoleEventLog, EVENT_LOG_CAPACITY};
use crate::input::{Command, HELP, parse_command};

pub struct HostOptions {
    pub frame: Duration,
    pub mode: MatchMode,
    /// Stop once this many seconds have been spent playing, across restarts.
    pub max_seconds: Option<f64>,
}

enum Flow {
    Continue,
    Quit,
}

/// Drives a controller from a frame timer and stdin, fanning events out to the sinks.
pub struct Host<R: ScoreRecorder> {
    controller: MatchController,
    console: ConsoleEventLog,
    scores: ScoreKeeper<R>,
    options: HostOptions,
    played: f64,
}

impl<R: ScoreRecorder> Host<R> {
    pub fn new(controller: MatchController, scores: ScoreKeeper<R>, options: HostOptions) -> Self {
        Self {
            controller,
            console: ConsoleEventLog::new(EVENT_LOG_CAPACITY, true),
            scores,
            options,
            played: 0.0,
        }
    }

    fn dispatch(&mut self, events: &[SimEvent]) {
        let mut sinks: [&mut dyn EventSink; 2] = [&mut self.console, &mut self.scores];
        dispatch(events, &mut sinks);
    }

    fn flush(&mut self) {
        let events = self.controller.take_events();
        self.dispatch(&events);
    }

    pub async fn run(mut self) -> std::io::Result<()> {
        println!("{}", HELP);
        self.controller.start(self.options.mode);
        self.flush();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdin_open = true;
        let mut frame_timer = tokio::time::interval(self.options.frame);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_frame = Instant::now();

        loop {
            tokio::select! {
                _ = frame_timer.tick() => {
                    let now = Instant::now();
                    let dt = now.duration_since(last_frame).as_secs_f64();
                    last_frame = now;

                    if self.controller.state() == MatchState::Playing {
                        self.played += dt;
                    }
                    let events = self.controller.update(dt);
                    self.dispatch(&events);

                    if let Some(max_seconds) = self.options.max_seconds
                        && self.played >= max_seconds
                    {
                        log!("Reached the {}s play limit", max_seconds);
                        break;
                    }
                    if !stdin_open && self.controller.state() != MatchState::Playing {
                        break;
                    }
                }
                line = lines.next_line(), if stdin_open => {
                    match line {
                        Ok(Some(line)) => {
                            if let Flow::Quit = self.handle_line(&line) {
                                break;
                            }
                        }
                        Ok(None) => stdin_open = false,
                        Err(e) => {
                            log!("Failed to read input: {}", e);
                            stdin_open = false;
                        }
                    }
                }
            }
        }

        self.print_summary();
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        if line.trim().is_empty() {
            return Flow::Continue;
        }
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}. {}", e, HELP);
                return Flow::Continue;
            }
        };

        let accepted = match command {
            Command::Quit => return Flow::Quit,
            Command::Steer(agent_id, direction) => self.controller.set_heading(agent_id, direction),
            Command::Start(mode) => self.controller.start(mode),
            Command::Pause => self.controller.pause(),
            Command::Resume => self.controller.resume(),
            Command::Restart => self.controller.restart(),
            Command::Menu => self.controller.back_to_menu(),
            Command::Scores => {
                let accepted = self.controller.open_high_scores();
                if accepted {
                    self.print_high_scores();
                }
                accepted
            }
            Command::Settings => {
                let accepted = self.controller.open_settings();
                if accepted {
                    println!("Difficulty: {}", self.controller.preset());
                }
                accepted
            }
            Command::Difficulty(preset) => self.controller.set_difficulty(preset),
        };

        if !accepted {
            println!("Ignored {:?} while in {}", command, self.controller.state());
        }
        self.flush();
        Flow::Continue
    }

    fn print_high_scores(&mut self) {
        match self.scores.recorder_mut().high_scores() {
            Ok(table) => {
                for mode in [MatchMode::Single, MatchMode::Multi] {
                    println!("{} high scores:", mode);
                    for (rank, entry) in table.entries(mode).iter().enumerate() {
                        println!(
                            "  {:>2}. {:<10} {:>6}  {}",
                            rank + 1,
                            entry.name,
                            entry.score,
                            entry.time.format("%Y-%m-%d %H:%M")
                        );
                    }
                }
            }
            Err(e) => log!("Failed to load high scores: {}", e),
        }
    }

    fn print_summary(&self) {
        println!("Recent events:");
        for line in self.console.recent() {
            println!("  {}", line);
        }
        match self.controller.last_round() {
            Some(round) => {
                for (agent_id, score) in &round.results {
                    println!("{}: {}", agent_id, score);
                }
                if let Some(winner) = round.winner {
                    println!("Winner: {}", winner);
                }
            }
            None => {
                for agent in self.controller.agents() {
                    println!("{}: {} (round unfinished)", agent.id(), agent.score());
                }
            }
        }
        log!(
            "Session over after {:.1}s of play, {} ticks in the last match",
            self.played,
            self.controller.tick_count()
        );
    }
}
