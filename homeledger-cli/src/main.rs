//! Homeledger CLI - household finance with family-scoped permissions

use std::process::ExitCode;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod output;
mod store;

use commands::{
    account, authorize, credential, family, init, logs, record, register, review, roster,
};
use homeledger_core::{Action, Role};

/// Homeledger - household finance in your terminal
#[derive(Parser)]
#[command(name = "hl", version, about, long_about = None)]
struct Cli {
    /// Account to act as (its password is read from HOMELEDGER_SECRET or prompted)
    #[arg(long = "as", global = true, env = "HOMELEDGER_USER")]
    acting: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the first super admin of a new household
    Init {
        /// Username for the super admin
        username: String,
        /// Display name
        #[arg(long)]
        name: Option<String>,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Register a family account that waits for approval
    Register {
        username: String,
        /// Requested role (manager or member)
        #[arg(long, default_value = "member")]
        role: Role,
        /// Family to join
        #[arg(long)]
        family: String,
        /// Display name
        #[arg(long)]
        name: Option<String>,
        /// Let the family manager see your figures
        #[arg(long)]
        allow_parent_view: bool,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// List the accounts you may see
    Roster {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List registrations awaiting review
    Pending {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Approve a pending registration
    Approve { username: String },

    /// Reject a pending registration
    Reject { username: String },

    /// Create an approved account
    Create {
        username: String,
        /// Role of the new account
        #[arg(long)]
        role: Role,
        /// Family (required for managers and members created by administrators)
        #[arg(long)]
        family: Option<String>,
        /// Display name
        #[arg(long)]
        name: Option<String>,
        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        birth_date: Option<NaiveDate>,
        /// Initial password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Edit an account
    Update {
        username: String,
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New username
        #[arg(long)]
        new_username: Option<String>,
        /// New role
        #[arg(long)]
        role: Option<Role>,
        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        birth_date: Option<NaiveDate>,
    },

    /// Delete an account and its records
    Delete {
        username: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Force a new password onto another account
    ResetPassword {
        username: String,
        /// New password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Change your own password
    Passwd {
        /// Set a recovery question (its answer is prompted)
        #[arg(long)]
        question: Option<String>,
    },

    /// Replace a forgotten password using the recovery question
    Recover { username: String },

    /// Allow or refuse your family manager's view of your figures
    Consent {
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Check what you may do to another account
    Authorize {
        /// Target username
        target: String,
        /// Actions to check (all when omitted)
        #[arg(long = "action", value_delimiter = ',')]
        actions: Vec<Action>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show household records as you are allowed to see them
    Family {
        /// Limit to these usernames
        #[arg(long = "member", value_delimiter = ',')]
        members: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage your own records
    Record {
        #[command(subcommand)]
        command: record::RecordCommands,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let acting = cli.acting.as_deref();
    match cli.command {
        Commands::Init {
            username,
            name,
            password,
        } => init::run(&username, name, password),
        Commands::Register {
            username,
            role,
            family,
            name,
            allow_parent_view,
            password,
        } => register::run(register::RegisterArgs {
            username,
            role,
            family,
            name,
            allow_parent_view,
            password,
        }),
        Commands::Roster { json } => roster::run(acting, json),
        Commands::Pending { json } => roster::run_pending(acting, json),
        Commands::Approve { username } => review::run(acting, &username, true),
        Commands::Reject { username } => review::run(acting, &username, false),
        Commands::Create {
            username,
            role,
            family,
            name,
            birth_date,
            password,
        } => account::create(
            acting,
            account::CreateArgs {
                username,
                role,
                family,
                name,
                birth_date,
                password,
            },
        ),
        Commands::Update {
            username,
            name,
            new_username,
            role,
            birth_date,
        } => account::update(
            acting,
            &username,
            account::UpdateArgs {
                name,
                new_username,
                role,
                birth_date,
            },
        ),
        Commands::Delete { username, force } => account::delete(acting, &username, force),
        Commands::ResetPassword { username, password } => {
            credential::reset(acting, &username, password)
        }
        Commands::Passwd { question } => credential::change_own(acting, question),
        Commands::Recover { username } => credential::recover(&username),
        Commands::Consent { state } => account::consent(acting, matches!(state, Toggle::On)),
        Commands::Authorize {
            target,
            actions,
            json,
        } => authorize::run(acting, &target, actions, json),
        Commands::Family { members, json } => family::run(acting, members, json),
        Commands::Record { command } => record::run(acting, command),
        Commands::Logs { command } => logs::run(command),
    }
}
