//! FILENAME: cli/src/main.rs
//! PURPOSE: Interactive command-line shell for the SciCal calculator engine.
//! CONTEXT: A thin presentation layer: reads lines, routes them through a
//! Session, formats results, and appends to history. Every engine error is
//! printed and the loop continues; nothing here is fatal except a broken
//! stdin.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use engine::{constants, convert, format_result, AngleMode, Session};

/// Number of history entries the shell keeps.
const SHELL_HISTORY_CAPACITY: usize = 50;

#[derive(Parser)]
#[command(name = "scical")]
#[command(about = "SciCal scientific calculator")]
#[command(version)]
struct Cli {
    /// Initial angle mode: degrees or radians
    #[arg(long, default_value = "degrees")]
    angle_mode: String,

    /// Display precision in decimal places (0-15)
    #[arg(long, default_value_t = engine::DEFAULT_PRECISION)]
    precision: u8,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let mode = AngleMode::from_name(&cli.angle_mode)?;
    let mut shell = Shell::new(mode, cli.precision.min(engine::MAX_PRECISION));
    shell.run()
}

struct Shell {
    session: Session,
    precision: u8,
}

impl Shell {
    fn new(mode: AngleMode, precision: u8) -> Self {
        let mut session = Session::with_history_capacity(SHELL_HISTORY_CAPACITY);
        session.set_angle_mode(mode);
        Shell { session, precision }
    }

    fn run(&mut self) -> Result<()> {
        println!("SciCal scientific calculator");
        println!("Type an expression to evaluate, 'help' for commands, 'quit' to exit.");

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            print!(
                "[{} p{}]> ",
                self.session.angle_mode(),
                self.precision
            );
            io::stdout().flush()?;

            let line = match lines.next() {
                Some(line) => line?,
                None => break, // EOF
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line == "quit" || line == "exit" {
                break;
            }

            self.handle_line(line);
        }

        println!("Goodbye.");
        Ok(())
    }

    /// Dispatches one input line: a shell command or a free-form expression.
    fn handle_line(&mut self, line: &str) {
        let mut words = line.split_whitespace();
        let result = match words.next() {
            Some("help") => {
                print_help();
                Ok(())
            }
            Some("mode") => self.cmd_mode(words.next()),
            Some("precision") => self.cmd_precision(words.next()),
            Some("history") => self.cmd_history(words.next()),
            Some("mem") => self.cmd_memory(words.next(), words.next()),
            Some("var") => self.cmd_variable(line),
            Some("vars") => self.cmd_vars(words.next()),
            Some("calc") => self.cmd_calc(line),
            Some("convert") => self.cmd_convert(line),
            Some("constants") => {
                for (name, value) in constants::all() {
                    println!("  {:<24} {}", name, format_result(value, self.precision));
                }
                Ok(())
            }
            Some("reset") => {
                self.session.reset();
                println!("Session reset.");
                Ok(())
            }
            _ => self.cmd_expression(line),
        };

        if let Err(err) = result {
            println!("Error: {}", err);
        }
    }

    /// Evaluates a free-form expression and records it in history.
    fn cmd_expression(&mut self, line: &str) -> engine::Result<()> {
        let value = self.session.evaluate_expression(line)?;
        let formatted = format_result(value, self.precision);
        debug!(expression = line, result = %formatted, "evaluated");
        println!("= {}", formatted);
        self.session.memory_mut().add_to_history(line, formatted.as_str());
        Ok(())
    }

    /// `mode` shows the angle mode; `mode <degrees|radians>` sets it.
    fn cmd_mode(&mut self, arg: Option<&str>) -> engine::Result<()> {
        match arg {
            Some(name) => {
                let mode = AngleMode::from_name(name)?;
                self.session.set_angle_mode(mode);
                println!("Angle mode: {}", mode);
            }
            None => println!("Angle mode: {}", self.session.angle_mode()),
        }
        Ok(())
    }

    fn cmd_precision(&mut self, arg: Option<&str>) -> engine::Result<()> {
        match arg {
            Some(text) => {
                let precision: u8 = text.parse().map_err(|_| {
                    engine::CalcError::domain(format!("Invalid precision '{}'", text))
                })?;
                if precision > engine::MAX_PRECISION {
                    return Err(engine::CalcError::domain(format!(
                        "Precision must be between 0 and {}",
                        engine::MAX_PRECISION
                    )));
                }
                self.precision = precision;
                println!("Precision: {}", precision);
            }
            None => println!("Precision: {}", self.precision),
        }
        Ok(())
    }

    /// `history [n]` lists entries; `history clear` empties the log.
    fn cmd_history(&mut self, arg: Option<&str>) -> engine::Result<()> {
        match arg {
            Some("clear") => {
                self.session.memory_mut().clear_history();
                println!("History cleared.");
            }
            arg => {
                let limit = match arg {
                    Some(text) => Some(text.parse::<usize>().map_err(|_| {
                        engine::CalcError::domain(format!("Invalid history limit '{}'", text))
                    })?),
                    None => Some(10),
                };
                let entries = self.session.memory().history(limit);
                if entries.is_empty() {
                    println!("No calculations in history.");
                } else {
                    for (i, entry) in entries.iter().enumerate() {
                        println!("{:3}. {}", i + 1, entry);
                    }
                }
            }
        }
        Ok(())
    }

    /// Memory accumulator commands:
    /// `mem` / `mem recall` show, `mem store|add|sub|mul|div <expr>` mutate,
    /// `mem clear` zeroes.
    fn cmd_memory(&mut self, action: Option<&str>, operand: Option<&str>) -> engine::Result<()> {
        let operand_value = |shell: &Self| -> engine::Result<f64> {
            let text = operand
                .ok_or_else(|| engine::CalcError::domain("mem: missing value argument"))?;
            shell.session.evaluate_expression(text)
        };

        match action {
            None | Some("recall") => {
                println!(
                    "Memory: {}",
                    format_result(self.session.memory().recall(), self.precision)
                );
                return Ok(());
            }
            Some("clear") => self.session.memory_mut().clear(),
            Some("store") => {
                let value = operand_value(self)?;
                self.session.memory_mut().store(value);
            }
            Some("add") => {
                let value = operand_value(self)?;
                self.session.memory_mut().add(value);
            }
            Some("sub") => {
                let value = operand_value(self)?;
                self.session.memory_mut().subtract(value);
            }
            Some("mul") => {
                let value = operand_value(self)?;
                self.session.memory_mut().multiply(value);
            }
            Some("div") => {
                let value = operand_value(self)?;
                self.session.memory_mut().divide(value)?;
            }
            Some(other) => {
                return Err(engine::CalcError::domain(format!(
                    "Unknown mem action '{}'",
                    other
                )));
            }
        }

        println!(
            "Memory: {}",
            format_result(self.session.memory().recall(), self.precision)
        );
        Ok(())
    }

    /// `var <name> = <expr>` stores; `var <name>` recalls.
    fn cmd_variable(&mut self, line: &str) -> engine::Result<()> {
        let rest = line.trim_start_matches("var").trim();

        if let Some((name, expr)) = rest.split_once('=') {
            let name = name.trim();
            if name.is_empty() || !is_valid_variable_name(name) {
                return Err(engine::CalcError::domain(format!(
                    "Invalid variable name '{}'",
                    name
                )));
            }
            let value = self.session.evaluate_expression(expr.trim())?;
            self.session.memory_mut().store_variable(name, value);
            println!("{} = {}", name, format_result(value, self.precision));
        } else if !rest.is_empty() {
            let value = self.session.memory().recall_variable(rest)?;
            println!("{} = {}", rest, format_result(value, self.precision));
        } else {
            return Err(engine::CalcError::domain(
                "Usage: var <name> = <expr> | var <name>",
            ));
        }
        Ok(())
    }

    /// `vars` lists variables; `vars clear` removes them.
    fn cmd_vars(&mut self, arg: Option<&str>) -> engine::Result<()> {
        match arg {
            Some("clear") => {
                self.session.memory_mut().clear_variables();
                println!("Variables cleared.");
            }
            _ => {
                let variables = self.session.memory().variables();
                if variables.is_empty() {
                    println!("No variables stored.");
                } else {
                    for (name, value) in variables {
                        println!("  {} = {}", name, format_result(value, self.precision));
                    }
                }
            }
        }
        Ok(())
    }

    /// `calc <category> <operation> <args...>` runs a registry operation.
    fn cmd_calc(&mut self, line: &str) -> engine::Result<()> {
        let mut words = line.split_whitespace().skip(1);
        let category = words
            .next()
            .ok_or_else(|| engine::CalcError::domain("Usage: calc <category> <op> <args...>"))?;
        let operation = words
            .next()
            .ok_or_else(|| engine::CalcError::domain("Usage: calc <category> <op> <args...>"))?;

        let args: Vec<f64> = words
            .map(|w| {
                w.parse::<f64>().map_err(|_| {
                    engine::CalcError::domain(format!("Invalid number '{}'", w))
                })
            })
            .collect::<engine::Result<_>>()?;

        let value = self.session.evaluate(category, operation, &args)?;
        let formatted = format_result(value, self.precision);
        println!("= {}", formatted);

        let arg_text = args
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        self.session
            .memory_mut()
            .add_to_history(format!("{}({})", operation, arg_text), formatted.as_str());
        Ok(())
    }

    /// `convert <category> <from> <to> <value>`.
    fn cmd_convert(&mut self, line: &str) -> engine::Result<()> {
        let words: Vec<&str> = line.split_whitespace().skip(1).collect();
        let &[category, from, to, value] = words.as_slice() else {
            return Err(engine::CalcError::domain(
                "Usage: convert <category> <from> <to> <value>",
            ));
        };

        let value: f64 = value
            .parse()
            .map_err(|_| engine::CalcError::domain(format!("Invalid number '{}'", value)))?;
        let converted = convert(category, from, to, value)?;
        let formatted = format_result(converted, self.precision);
        println!("= {}", formatted);
        self.session
            .memory_mut()
            .add_to_history(format!("{} {} -> {}", value, from, to), formatted.as_str());
        Ok(())
    }
}

fn is_valid_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn print_help() {
    println!("Enter any expression to evaluate it, e.g. sqrt(16) + log(100) * sin(30)");
    println!();
    println!("Commands:");
    println!("  mode [degrees|radians]             show or set the angle mode");
    println!("  precision [n]                      show or set display precision (0-15)");
    println!("  history [n|clear]                  show the last n entries (default 10)");
    println!("  mem [store|add|sub|mul|div <x>]    memory accumulator; mem clear resets");
    println!("  var <name> = <expr> | var <name>   store or recall a variable");
    println!("  vars [clear]                       list or clear variables");
    println!("  calc <category> <op> <args...>     run a registry operation by name,");
    println!("                                     e.g. calc trig sin 30");
    println!("  convert <category> <from> <to> <x> unit conversion,");
    println!("                                     e.g. convert length meters feet 10");
    println!("  constants                          list named constants");
    println!("  reset                              reset the whole session");
    println!("  quit                               exit");
}
