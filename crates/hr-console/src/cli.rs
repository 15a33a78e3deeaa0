use clap::{Parser, Subcommand};
use secrecy::SecretString;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(
        short = 's',
        long = "stdout",
        action,
        help = "Controls if it logs to stdout/stderr instead of to a file"
    )]
    pub is_to_std_out: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and keep the session for later commands
    Login {
        username: String,
        #[arg(long, env = "HR_PASSWORD", hide_env_values = true)]
        password: SecretString,
    },
    /// End the session, also when the backend cannot be reached
    Logout,
    /// Show the signed in user and what they may do
    Whoami,
    /// Check the backend is up
    Health,
    Profile,
    Users {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long)]
        size: Option<u32>,
    },
    Roles,
    Employees {
        #[arg(long)]
        keyword: Option<String>,
        #[arg(long)]
        department: Option<u64>,
        #[arg(long)]
        position: Option<u64>,
    },
    Departments,
    Positions,
    /// Salaries for a month in `yyyy-mm` form
    Salaries {
        #[arg(long)]
        month: Option<String>,
    },
    Dashboard,
}
