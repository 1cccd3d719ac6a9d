// Interactive terminal front-end for the job board
//
// Stdin is owned by one blocking thread that parses commands (and runs the
// posting prompts) and forwards them over a channel. The async side applies
// them to the board and re-renders whenever the board publishes.

mod render;

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use job_board::{Config, JobBoard, JobDraft, JobType, Location};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "job-board", about = "Browse and post jobs from the terminal")]
struct Args {
    /// Backend address, overrides BACK_END_URL
    #[arg(long)]
    backend_url: Option<String>,

    /// Quiet period before a filter change is fetched, overrides JOB_BOARD_DEBOUNCE_MS
    #[arg(long)]
    debounce_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Search(String),
    Location(String),
    JobType(String),
    Experience(String),
    Salary(u32, u32),
    MinSalary(String),
    MaxSalary(String),
    Reset,
    /// Zero-based row position
    Apply(usize),
    Refresh,
    Show,
    OpenForm,
    CloseForm,
    Submit(JobDraft),
    Help,
    Quit,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "job_board=info,jobs_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(url) = &args.backend_url {
        config = config.with_backend_url(url);
    }
    if let Some(ms) = args.debounce_ms {
        config = config.with_debounce(Duration::from_millis(ms));
    }
    tracing::info!(backend = %config.backend_url, "Starting job board");

    let mut board = JobBoard::from_config(&config)?;
    let mut listing = board.subscribe();
    let mut form = board.subscribe_form();

    render::banner();
    render::help();
    board.mount();

    let (tx, mut commands) = mpsc::unbounded_channel();
    thread::spawn(move || read_commands(tx));

    loop {
        tokio::select! {
            Ok(()) = listing.changed() => {
                let state = listing.borrow_and_update().clone();
                render::listing(&state, board.tracker());
            }
            Ok(()) = form.changed() => {
                let status = form.borrow_and_update().clone();
                render::form(&status);
            }
            command = commands.recv() => match command {
                None | Some(Command::Quit) => break,
                Some(command) => handle(&mut board, command).await,
            },
        }
    }

    board.teardown();
    println!("{}", style("Goodbye!").blue());

    Ok(())
}

async fn handle(board: &mut JobBoard, command: Command) {
    match command {
        Command::Search(text) => board.set_search(text),
        Command::Location(text) => board.set_location_text(&text),
        Command::JobType(text) => board.set_job_type_text(&text),
        Command::Experience(text) => board.set_experience(text),
        Command::Salary(min, max) => board.set_salary_range(min, max),
        Command::MinSalary(text) => board.set_min_salary_text(&text),
        Command::MaxSalary(text) => board.set_max_salary_text(&text),
        Command::Reset => board.reset_filters(),
        Command::Apply(position) => {
            if board.apply(position) {
                render::listing(&board.fetch_state(), board.tracker());
            } else {
                println!("{} no row {}", style("Error:").red().bold(), position + 1);
            }
            return;
        }
        Command::Refresh => {
            board.refresh().await;
            return;
        }
        Command::Show => {
            render::listing(&board.fetch_state(), board.tracker());
            return;
        }
        Command::OpenForm => {
            board.open_form();
            return;
        }
        Command::CloseForm => {
            board.close_form();
            return;
        }
        Command::Submit(draft) => {
            if board.submit_job(&draft).await.is_ok() {
                println!("{}", style("Job posted").green().bold());
            }
            return;
        }
        Command::Help => {
            render::help();
            return;
        }
        Command::Quit => return,
    }

    render::filters(&board.query());
}

fn read_commands(tx: mpsc::UnboundedSender<Command>) {
    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stdin");
                break;
            }
        }

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(usage) => {
                println!("{} {}", style("Usage:").yellow().bold(), usage);
                continue;
            }
        };

        if command == Command::OpenForm {
            if tx.send(Command::OpenForm).is_err() {
                break;
            }
            let next = match prompt_draft() {
                Ok(draft) => Command::Submit(draft),
                Err(e) => {
                    tracing::debug!(error = %e, "Posting cancelled");
                    Command::CloseForm
                }
            };
            if tx.send(next).is_err() {
                break;
            }
            continue;
        }

        let quit = command == Command::Quit;
        if tx.send(command).is_err() || quit {
            break;
        }
    }
}

/// Parse one input line. Blank lines yield `None`; malformed ones yield the
/// usage to show.
fn parse_command(line: &str) -> Result<Option<Command>, &'static str> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "search" | "s" => Command::Search(rest.to_string()),
        "location" | "loc" => Command::Location(any_to_empty(rest)),
        "type" => Command::JobType(any_to_empty(rest)),
        "experience" | "exp" => Command::Experience(rest.to_string()),
        "salary" => {
            let mut bounds = rest.split_whitespace().map(str::parse::<u32>);
            match (bounds.next(), bounds.next(), bounds.next()) {
                (Some(Ok(min)), Some(Ok(max)), None) => Command::Salary(min, max),
                _ => return Err("salary <min> <max>"),
            }
        }
        "min" => Command::MinSalary(rest.to_string()),
        "max" => Command::MaxSalary(rest.to_string()),
        "reset" => Command::Reset,
        "apply" => match rest.parse::<usize>() {
            Ok(row) if row > 0 => Command::Apply(row - 1),
            _ => return Err("apply <row>, rows start at 1"),
        },
        "refresh" | "r" => Command::Refresh,
        "show" | "ls" => Command::Show,
        "post" => Command::OpenForm,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err("unknown command, type `help`"),
    };

    Ok(Some(command))
}

fn any_to_empty(value: &str) -> String {
    if value.eq_ignore_ascii_case("any") {
        String::new()
    } else {
        value.to_string()
    }
}

fn prompt_draft() -> Result<JobDraft> {
    let theme = ColorfulTheme::default();

    let text = |prompt: &str| -> Result<String> {
        Ok(Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?)
    };

    let title = text("Job title")?;
    let company_name = text("Company name")?;

    let locations = Location::variants();
    let location = Select::with_theme(&theme)
        .with_prompt("Location")
        .items(locations)
        .default(0)
        .interact()?;

    let job_types = JobType::variants();
    let job_type = Select::with_theme(&theme)
        .with_prompt("Job type")
        .items(job_types)
        .default(0)
        .interact()?;

    let experience = text("Experience (years)")?;
    let salary = text("Salary (LPA)")?;

    let deadline = text("Application deadline (YYYY-MM-DD, optional)")?;
    let application_deadline = match deadline.trim() {
        "" => None,
        raw => Some(
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .with_context(|| format!("Invalid deadline {:?}", raw))?,
        ),
    };

    let description = text("Job description")?;

    Ok(JobDraft {
        title,
        company_name,
        location: Some(locations[location]),
        job_type: Some(job_types[job_type]),
        experience,
        salary,
        application_deadline,
        description,
    })
}
