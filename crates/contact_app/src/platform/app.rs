use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::Duration;

use contact_core::{Field, FormData, SubmissionState};
use contact_logging::{contact_info, contact_warn, level_from_name};

use super::cli::{Cli, Command};
use super::config::AppConfig;
use super::controller::ContactFormController;
use super::logging;
use super::ui::constants::ALREADY_SENDING;
use super::ui::input::{parse_command, InputCommand, InputError};
use super::ui::render::{self, LineStyle, ScreenLine};
use super::ui::terminal::Terminal;
use super::ui::layout;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = AppConfig::load(cli.config.as_deref())?.with_overrides(&cli.overrides());
    config.validate()?;
    logging::initialize(config.log_destination, level_from_name(&config.log_level));
    contact_info!("Starting contact_app endpoint={}", config.endpoint);

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => {
            run_interactive(&config)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Send {
            name,
            email,
            message,
        } => run_send(&config, FormData::new(name, email, message)),
    }
}

fn run_send(config: &AppConfig, form: FormData) -> anyhow::Result<ExitCode> {
    let mut terminal = Terminal::stdout();

    let missing = form.missing_fields();
    if !missing.is_empty() {
        terminal.write_lines(&[render::render_missing(&missing)])?;
        return Ok(ExitCode::from(2));
    }

    let mut controller = ContactFormController::new(config)?;
    for field in Field::ALL {
        controller.edit_field(field, form.get(field));
    }
    controller.submit();
    terminal.write_lines(&render::render_feedback(&controller.view()))?;

    let view = controller.wait_until_settled(None);
    terminal.write_lines(&render::render_feedback(&view))?;

    if *controller.submission() == SubmissionState::Succeeded {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn run_interactive(config: &AppConfig) -> anyhow::Result<()> {
    let mut controller = ContactFormController::new(config)?;
    let mut terminal = Terminal::stdout();

    terminal.write_lines(&layout::initial_lines())?;
    terminal.write_lines(&render::render(&controller.view()))?;
    terminal.prompt()?;

    let lines = spawn_stdin_reader();
    loop {
        if let Some(view) = controller.pump(POLL_INTERVAL) {
            terminal.write_lines(&render::render_feedback(&view))?;
            terminal.prompt()?;
        }
        match lines.try_recv() {
            Ok(line) => {
                let flow = handle_line(&mut controller, &mut terminal, &line)?;
                if flow == Flow::Quit {
                    break;
                }
                terminal.prompt()?;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                // End of input (e.g. piped commands): let a pending send finish first.
                if controller.is_submitting() {
                    let view = controller.wait_until_settled(None);
                    terminal.write_lines(&render::render_feedback(&view))?;
                }
                break;
            }
        }
    }

    controller.close();
    Ok(())
}

fn handle_line<W: Write>(
    controller: &mut ContactFormController,
    terminal: &mut Terminal<W>,
    line: &str,
) -> io::Result<Flow> {
    let command = match parse_command(line) {
        Ok(command) => command,
        Err(InputError::Empty) => return Ok(Flow::Continue),
        Err(err) => {
            terminal.write_lines(&[ScreenLine::new(LineStyle::Notice, err.to_string())])?;
            return Ok(Flow::Continue);
        }
    };

    match command {
        InputCommand::Edit { field, value } => {
            controller.edit_field(field, value);
            terminal.write_lines(&[render::render_field(field, &controller.view().form)])?;
        }
        InputCommand::Send => {
            let view = controller.view();
            let missing = view.form.missing_fields();
            if !missing.is_empty() {
                terminal.write_lines(&[render::render_missing(&missing)])?;
            } else if controller.submit() {
                terminal.write_lines(&render::render_feedback(&controller.view()))?;
            } else {
                terminal.write_lines(&[ScreenLine::new(LineStyle::Notice, ALREADY_SENDING)])?;
            }
        }
        InputCommand::Show => terminal.write_lines(&render::render(&controller.view()))?,
        InputCommand::Help => terminal.write_lines(&layout::help_lines())?,
        InputCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    contact_warn!("Stopped reading stdin: {}", err);
                    break;
                }
            }
        }
    });
    rx
}
