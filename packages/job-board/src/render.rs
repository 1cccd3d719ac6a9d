// Terminal rendering of board state

use console::style;
use job_board::{ApplicationTracker, FetchState, FormStatus, Job, QueryParams};

pub fn banner() {
    println!("{}", style("╔══════════════════════════════╗").cyan());
    println!("{}", style("║          Job Board           ║").cyan());
    println!("{}", style("╚══════════════════════════════╝").cyan());
    println!();
}

pub fn help() {
    let commands = [
        ("search <text>", "filter by title (empty clears)"),
        ("location <onsite|remote|hybrid|any>", "filter by location"),
        ("type <full-time|part-time|contract|internship|any>", "filter by job type"),
        ("experience <years>", "filter by experience (empty clears)"),
        ("salary <min> <max>", "salary range in LPA, 0-100"),
        ("min <n> / max <n>", "move one end of the salary range"),
        ("reset", "clear every filter"),
        ("apply <row>", "mark a listed job as applied"),
        ("refresh", "reload the listing now"),
        ("show", "print the listing again"),
        ("post", "post a new job"),
        ("help", "show this help"),
        ("quit", "exit"),
    ];

    println!("{}", style("Commands").bold());
    for (usage, about) in commands {
        println!("  {:<52} {}", style(usage).green(), style(about).dim());
    }
    println!();
}

pub fn filters(query: &QueryParams) {
    if query.is_empty() {
        println!("{} {}", style("Filters:").bold(), style("none").dim());
    } else {
        println!("{} {}", style("Filters:").bold(), query);
    }
}

pub fn listing(state: &FetchState, tracker: &ApplicationTracker) {
    match state {
        FetchState::Idle => {}
        FetchState::Loading => println!("{}", style("Loading jobs...").dim()),
        FetchState::Failure(message) => {
            println!("{} {}", style("Error:").red().bold(), message);
        }
        FetchState::Success(jobs) if jobs.is_empty() => {
            println!("{}", style("No jobs found.").yellow());
        }
        FetchState::Success(jobs) => {
            println!();
            for (position, job) in jobs.iter().enumerate() {
                row(position, job, tracker.is_applied(position));
            }
            println!();
        }
    }
}

fn row(position: usize, job: &Job, applied: bool) {
    let action = if applied {
        style("Applied").green().bold()
    } else {
        style("Apply").cyan()
    };

    let posted = job
        .posted_time
        .clone()
        .unwrap_or_else(|| job.created_at.format("%Y-%m-%d").to_string());

    println!("{:>3}. {}  [{}]", position + 1, style(&job.title).bold(), action);
    println!(
        "     {} | {} | {} yrs | {} LPA | posted {}",
        job.location, job.job_type, job.experience, job.salary, posted
    );
    println!("     {}", style(job.logo_url()).dim());
}

pub fn form(status: &FormStatus) {
    match status {
        FormStatus::Closed => {}
        FormStatus::Open => println!("{}", style("New job posting").bold()),
        FormStatus::Submitting => println!("{}", style("Submitting...").dim()),
        FormStatus::Failed(message) => {
            println!("{} {}", style("Could not post job:").red().bold(), message);
        }
    }
}
