use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

/// Goal advisor - split monthly savings across your financial goals
#[derive(Parser)]
#[command(name = "advisor")]
#[command(about = "Explainable monthly savings planner", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (one database per user)
    #[arg(long, env = "ADVISOR_DB", default_value = "advisor.db", global = true)]
    pub db: PathBuf,

    /// Date to plan for (YYYY-MM-DD); defaults to the local date
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database
    Init {
        /// Seed a demo profile and four sample goals
        #[arg(long)]
        demo: bool,
    },

    /// Show or change income, expenses and risk profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Manage savings goals
    Goal {
        #[command(subcommand)]
        action: GoalAction,
    },

    /// Allocate this month's savings across active goals
    Plan {
        /// Add the allocations to the stored goals
        #[arg(long)]
        apply: bool,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show personalized suggestions
    Suggest,

    /// Send the home loan reminder to the profile email (simulated)
    Remind,

    /// Show recent activity
    Activity {
        /// Only entries mentioning this goal
        #[arg(short, long)]
        goal: Option<String>,

        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Import goals from CSV (name,target,current,YYYY-MM-DD,priority)
    Import {
        file: PathBuf,
    },

    /// Export goals, activity or this month's plan to CSV
    Export {
        #[arg(value_enum)]
        kind: ExportTarget,

        file: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    Show,

    Set {
        #[arg(long)]
        income: Option<String>,

        #[arg(long)]
        expenses: Option<String>,

        /// low, medium or high
        #[arg(long)]
        risk: Option<String>,

        /// Pass an empty string to clear
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum GoalAction {
    Add {
        name: String,
        target: String,
        current: String,
        /// YYYY-MM-DD
        deadline: String,
        /// 1 (lowest) to 5 (highest)
        priority: String,
    },

    Update {
        name: String,

        /// Rename the goal
        #[arg(long = "name")]
        new_name: Option<String>,

        #[arg(long)]
        target: Option<String>,

        #[arg(long)]
        current: Option<String>,

        #[arg(long)]
        deadline: Option<String>,

        #[arg(long)]
        priority: Option<String>,
    },

    Remove {
        name: String,
    },

    /// Mark a goal complete; it stays stored but is no longer planned
    Complete {
        name: String,
    },

    List,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportTarget {
    Goals,
    Activity,
    Plan,
}
