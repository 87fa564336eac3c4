use clap::{Args, Parser, Subcommand};
use peopledesk_domain::ProfilePatch;

/// Terminal shell for the PeopleDesk HR workspace.
#[derive(Debug, Parser)]
#[command(name = "peopledesk", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in with an email and password.
    Login {
        email: String,
        #[arg(long, env = "PEOPLEDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the persisted session.
    Logout,
    /// Show the signed-in identity.
    Whoami,
    /// List the modules the signed-in identity may open.
    Nav,
    /// Check module access, or a capability inside a module.
    Can {
        module: String,
        capability: Option<String>,
    },
    /// Update profile fields of the signed-in identity.
    Profile(ProfileArgs),
    /// List seeded accounts (emails and roles only).
    Accounts,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub position: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

impl From<ProfileArgs> for ProfilePatch {
    fn from(value: ProfileArgs) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            department: value.department,
            position: value.position,
            phone: value.phone,
        }
    }
}
