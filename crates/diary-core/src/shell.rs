//! Line-oriented interactive front end.
//!
//! Reads commands from a [`LineSource`] and writes to any [`Write`], so the
//! same loop serves a terminal and scripted tests.
//!
//! Commands: `add`, `table`, `graph`, `export`, `help`, `quit` / `exit`.
//! `add` prompts for every field, showing the configured default; a blank
//! answer keeps it and a lone `-` clears a text field.

use std::io::{self, Write};

use crate::config::DiaryConfig;
use crate::entry::{clamp_probability, EventEntry};
use crate::export::ExportWriter;
use crate::input::LineSource;
use crate::posterior::HYPOTHESES;
use crate::projection::render_table;
use crate::render::SvgRenderer;
use crate::session::{today, Session};
use crate::DiaryError;

const HELP: &str = "\
Commands:
  add     Record a new event (blank keeps the default, '-' clears a label)
  table   Show every event as one row per interpretation
  graph   List graph nodes, positions and edges
  export  Write the diary (JSON) and graph (SVG) to the output directory
  help    Show this message
  quit    End the session (also: exit)
";

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add,
    Table,
    Graph,
    Export,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    /// Parses one input line. Matching is case-insensitive.
    pub fn parse(line: &str) -> Self {
        let word = line.trim().to_lowercase();
        match word.as_str() {
            "" => Command::Empty,
            "add" | "a" => Command::Add,
            "table" | "t" => Command::Table,
            "graph" | "g" => Command::Graph,
            "export" | "e" => Command::Export,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => Command::Unknown(line.trim().to_string()),
        }
    }
}

/// Answer that clears a text field.
const CLEAR: &str = "-";

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Interactive session loop.
pub struct Shell<I, W> {
    input: I,
    output: W,
    session: Session,
    config: DiaryConfig,
    renderer: SvgRenderer,
    exporter: ExportWriter,
    /// Fixed date for new events and exports; today's date when unset
    date: Option<String>,
}

impl<I: LineSource, W: Write> Shell<I, W> {
    pub fn new(session: Session, config: DiaryConfig, input: I, output: W) -> Self {
        let renderer = SvgRenderer::new(config.render.clone());
        let exporter = ExportWriter::new(config.export.output_dir.clone());
        Self {
            input,
            output,
            session,
            config,
            renderer,
            exporter,
            date: None,
        }
    }

    /// Pins the date used for new events and export file names.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Ends the shell, handing back the session.
    pub fn into_session(self) -> Session {
        self.session
    }

    fn current_date(&self) -> String {
        self.date.clone().unwrap_or_else(today)
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self) -> Result<(), DiaryError> {
        writeln!(
            self.output,
            "Emotional diary for {}. Type 'help' for commands.",
            self.session.owner_name()
        )?;

        loop {
            let Some(line) = self.read_line("> ")? else {
                writeln!(self.output)?;
                break;
            };
            let command = Command::parse(&line);
            tracing::debug!(?command, "Shell command");

            if self.execute(command)? == Flow::Stop {
                break;
            }
        }

        tracing::info!(
            session = %self.session.id(),
            events = self.session.log().len(),
            "Session ended"
        );
        Ok(())
    }

    fn execute(&mut self, command: Command) -> Result<Flow, DiaryError> {
        match command {
            Command::Add => self.add()?,
            Command::Table => {
                let rows = self.session.table();
                if rows.is_empty() {
                    writeln!(self.output, "No events yet.")?;
                } else {
                    write!(self.output, "{}", render_table(&rows))?;
                }
            }
            Command::Graph => {
                let graph = self.session.graph(self.config.graph.keying);
                write!(self.output, "{}", graph.describe())?;
            }
            Command::Export => {
                let date = self.current_date();
                let graph = self.session.graph(self.config.graph.keying);
                let paths =
                    self.exporter
                        .write_all(self.session.log(), &graph, &self.renderer, &date)?;
                writeln!(self.output, "Wrote {}", paths.diary.display())?;
                writeln!(self.output, "Wrote {}", paths.graph.display())?;
            }
            Command::Help => write!(self.output, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Stop),
            Command::Empty => {}
            Command::Unknown(word) => {
                writeln!(self.output, "Unknown command '{}'. Type 'help'.", word)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn add(&mut self) -> Result<(), DiaryError> {
        let Some(entry) = self.read_entry()? else {
            writeln!(self.output)?;
            writeln!(self.output, "Entry discarded.")?;
            return Ok(());
        };

        let degenerate = entry.clamped().posterior_update().is_degenerate();
        let date = self.current_date();
        let record = self.session.add_event(&entry, &date);

        let summary: Vec<String> = record
            .interpretations
            .iter()
            .map(|i| format!("{} {}", i.label, i.formatted_posterior()))
            .collect();
        let line = format!(
            "Added '{}' ({}): {}",
            record.event_label,
            record.date,
            summary.join(", ")
        );

        writeln!(self.output, "{}", line)?;
        if degenerate {
            writeln!(
                self.output,
                "Evidence is zero; all posteriors default to 0."
            )?;
        }
        Ok(())
    }

    /// Prompts for every field. `None` means input ended mid-entry.
    fn read_entry(&mut self) -> io::Result<Option<EventEntry>> {
        let defaults = self.config.defaults.clone();
        let mut entry = defaults.clone();

        let Some(event_label) = self.prompt_text("Event", &defaults.event_label)? else {
            return Ok(None);
        };
        entry.event_label = event_label;

        for i in 0..HYPOTHESES {
            let label = format!("Interpretation {}", i + 1);
            let Some(value) = self.prompt_text(&label, &defaults.interpretations[i])? else {
                return Ok(None);
            };
            entry.interpretations[i] = value;
        }

        for i in 0..HYPOTHESES {
            let label = format!("Prior {} (belief before the event)", i + 1);
            let Some(value) = self.prompt_probability(&label, defaults.priors[i])? else {
                return Ok(None);
            };
            entry.priors[i] = value;
        }

        for i in 0..HYPOTHESES {
            let label = format!("Likelihood P(stimulus | interpretation {})", i + 1);
            let Some(value) = self.prompt_probability(&label, defaults.likelihoods[i])? else {
                return Ok(None);
            };
            entry.likelihoods[i] = value;
        }

        Ok(Some(entry))
    }

    fn prompt(&mut self, label: &str, default: &str) -> io::Result<Option<String>> {
        let prompt = format!("{} [{}]: ", label, default);

        Ok(self.read_line(&prompt)?.map(|answer| {
            if answer.trim().is_empty() {
                default.to_string()
            } else {
                answer.trim().to_string()
            }
        }))
    }

    /// Like [`prompt`](Self::prompt), but a lone `-` yields an empty label.
    fn prompt_text(&mut self, label: &str, default: &str) -> io::Result<Option<String>> {
        Ok(self
            .prompt(label, default)?
            .map(|answer| if answer == CLEAR { String::new() } else { answer }))
    }

    fn prompt_probability(&mut self, label: &str, default: f64) -> io::Result<Option<f64>> {
        let Some(answer) = self.prompt(label, &default.to_string())? else {
            return Ok(None);
        };

        let value = match answer.parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                writeln!(self.output, "  Not a number, keeping {}", default)?;
                return Ok(Some(default));
            }
        };

        let clamped = clamp_probability(value);
        if clamped != value {
            writeln!(self.output, "  Clamped to {}", clamped)?;
        }
        Ok(Some(clamped))
    }

    /// Reads one answer. `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.input.read_line(prompt, &mut self.output)
    }
}
