//! Goal advisor CLI
//!
//! Usage:
//!   advisor init --demo             Create the database with sample data
//!   advisor goal add NAME ...       Record a savings goal
//!   advisor plan [--apply]          Allocate this month's savings

mod cli;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use goal_advisor::db::{activity_repository, connection};
use goal_advisor::operations::export::{export_to_file, plan_to_json, ExportKind};
use goal_advisor::operations::goal::{
    add_goal_db, complete_goal_db, create_goal, list_goals_db, remove_goal_db, update_goal_db,
    GoalChanges,
};
use goal_advisor::operations::profile::{get_profile_db, update_profile_db, ProfileChanges};
use goal_advisor::operations::{demo, import, plan, remind};
use goal_advisor::planning::round_cents;
use goal_advisor::Plan;
use rusqlite::Connection;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let conn = connection::establish_connection(&cli.db)
        .with_context(|| format!("Failed to open database at {}", cli.db.display()))?;
    // the only place the wall clock is read
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    match cli.command {
        Commands::Init { demo } => cmd_init(&conn, demo),
        Commands::Profile { action } => cmd_profile(&conn, action),
        Commands::Goal { action } => cmd_goal(&conn, action, today),
        Commands::Plan { apply, json } => cmd_plan(&conn, today, apply, json),
        Commands::Suggest => cmd_suggest(&conn, today),
        Commands::Remind => cmd_remind(&conn),
        Commands::Activity { goal, limit } => cmd_activity(&conn, goal.as_deref(), limit),
        Commands::Import { file } => {
            let count = import::import_goals_to_db(&conn, &file)
                .with_context(|| format!("Failed to import {}", file.display()))?;
            println!("Successfully imported {} goals.", count);
            Ok(())
        }
        Commands::Export { kind, file } => {
            let kind = match kind {
                ExportTarget::Goals => ExportKind::Goals,
                ExportTarget::Activity => ExportKind::Activity,
                ExportTarget::Plan => ExportKind::Plan,
            };
            let rows = export_to_file(&conn, kind, today, &file)
                .with_context(|| format!("Failed to export to {}", file.display()))?;
            println!("Wrote {} rows to {}.", rows, file.display());
            Ok(())
        }
    }
}

fn cmd_init(conn: &Connection, seed_demo: bool) -> Result<()> {
    if seed_demo {
        let count = demo::seed_demo_data(conn).context("Failed to seed demo data")?;
        println!("Database initialized with a demo profile and {} goals.", count);
    } else {
        println!("Database initialized.");
    }
    Ok(())
}

fn cmd_profile(conn: &Connection, action: ProfileAction) -> Result<()> {
    let profile = match action {
        ProfileAction::Show => get_profile_db(conn)?,
        ProfileAction::Set {
            income,
            expenses,
            risk,
            email,
        } => {
            let changes = ProfileChanges {
                income,
                expenses,
                risk_profile: risk,
                email,
            };
            update_profile_db(conn, &changes).context("Failed to update profile")?
        }
    };
    println!("Income:          {:.2}", round_cents(profile.income));
    println!("Expenses:        {:.2}", round_cents(profile.expenses));
    println!("Monthly savings: {:.2}", round_cents(profile.monthly_savings()));
    println!("Risk profile:    {}", profile.risk_profile);
    if let Some(email) = &profile.email {
        println!("Email:           {}", email);
    }
    Ok(())
}

fn cmd_goal(conn: &Connection, action: GoalAction, today: NaiveDate) -> Result<()> {
    match action {
        GoalAction::Add {
            name,
            target,
            current,
            deadline,
            priority,
        } => {
            let goal = create_goal(&name, &target, &current, &deadline, &priority)?;
            add_goal_db(conn, &goal).context("Failed to add goal")?;
            println!("Goal '{}' added.", goal.name);
        }
        GoalAction::Update {
            name,
            new_name,
            target,
            current,
            deadline,
            priority,
        } => {
            let changes = GoalChanges {
                name: new_name,
                target,
                current,
                deadline,
                priority,
            };
            let goal = update_goal_db(conn, &name, &changes).context("Failed to update goal")?;
            println!("Goal '{}' updated.", goal.name);
        }
        GoalAction::Remove { name } => {
            remove_goal_db(conn, &name).context("Failed to remove goal")?;
            println!("Goal '{}' removed.", name);
        }
        GoalAction::Complete { name } => {
            complete_goal_db(conn, &name).context("Failed to complete goal")?;
            println!("Goal '{}' marked as completed.", name);
        }
        GoalAction::List => {
            let goals = list_goals_db(conn, today)?;
            if goals.is_empty() {
                println!("No goals yet. Add one with: advisor goal add");
                return Ok(());
            }
            println!(
                "{:<24} {:>12} {:>12} {:>10} {:>3} {:>6} {:>12}",
                "Goal", "Target", "Current", "Deadline", "P", "Months", "Required"
            );
            for (record, normalized) in goals {
                let status = if record.completed { " (completed)" } else { "" };
                println!(
                    "{:<24} {:>12.2} {:>12.2} {:>10} {:>3} {:>6} {:>12.2}{}",
                    record.goal.name,
                    round_cents(record.goal.target_amount),
                    round_cents(record.goal.current_amount),
                    record.goal.deadline.to_string(),
                    record.goal.priority,
                    normalized.months_left,
                    round_cents(normalized.required_monthly),
                    status
                );
            }
        }
    }
    Ok(())
}

fn cmd_plan(conn: &Connection, today: NaiveDate, apply: bool, json: bool) -> Result<()> {
    let plan = if apply {
        plan::apply_plan_db(conn, today).context("Failed to apply plan")?
    } else {
        plan::build_plan_db(conn, today).context("Failed to build plan")?
    };

    if json {
        println!("{}", plan_to_json(&plan)?);
        return Ok(());
    }
    print_plan(&plan);
    if apply {
        println!();
        println!("Allocations added to your goals.");
    }
    Ok(())
}

fn print_plan(plan: &Plan) {
    println!(
        "Monthly allocation plan for {} (savings {:.2})",
        plan.today.format("%B %Y"),
        round_cents(plan.available_savings)
    );
    println!();
    println!(
        "{:<24} {:>12} {:>12} {:>6} {:>3}",
        "Goal", "Allocated", "Required", "Months", "P"
    );
    for reason in &plan.reasons {
        println!(
            "{:<24} {:>12.2} {:>12.2} {:>6} {:>3}",
            reason.goal_name,
            round_cents(reason.allocated_amount),
            round_cents(reason.required_monthly),
            reason.months_left,
            reason.priority
        );
    }
    println!();
    println!("Unallocated: {:.2}", round_cents(plan.unallocated));
    println!();
    println!("Explanations:");
    for reason in &plan.reasons {
        if let Some(text) = plan.explanations.get(&reason.goal_name) {
            println!("- {}: {}", reason.goal_name, text);
        }
    }
}

fn cmd_suggest(conn: &Connection, today: NaiveDate) -> Result<()> {
    let suggestions = plan::suggestions_db(conn, today)?;
    if suggestions.is_empty() {
        println!("No suggestions at this time. Keep up the good work!");
    }
    for suggestion in suggestions {
        println!("- {}", suggestion.message);
    }
    Ok(())
}

fn cmd_remind(conn: &Connection) -> Result<()> {
    match remind::send_home_loan_reminder(conn).context("Failed to send reminder")? {
        Some(reminder) => {
            println!("Simulated email sent to {}", reminder.to);
            println!("Subject: {}", reminder.subject);
            println!();
            println!("{}", reminder.body);
        }
        None => println!("No home loan goal; nothing to remind."),
    }
    Ok(())
}

fn cmd_activity(conn: &Connection, goal: Option<&str>, limit: usize) -> Result<()> {
    let entries = activity_repository::get_recent_activity(conn, goal, limit)?;
    if entries.is_empty() {
        println!("No recent activity.");
    }
    for entry in entries {
        println!("{}  {}: {}", entry.timestamp, entry.action, entry.details);
    }
    Ok(())
}
