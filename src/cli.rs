// Command line definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// add/get/edit your actions
#[derive(Parser, Debug)]
#[command(name = "actions")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the actions service
    #[arg(long, global = true, env = "ACTIONS_URL")]
    pub url: Option<String>,

    /// File holding the bearer token
    #[arg(long, global = true, env = "ACTIONS_TOKEN_FILE", value_hint = ValueHint::FilePath)]
    pub token_file: Option<PathBuf>,

    /// Config file (default: <config_dir>/actions/config.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Get all actions for current user
    #[command(visible_alias = "a")]
    All,

    /// Create new action
    #[command(visible_alias = "n")]
    New {
        /// What was done
        #[arg(short, long)]
        desc: String,
        /// How it turned out
        #[arg(short, long, default_value = "")]
        result: String,
    },

    /// Log in into app
    #[command(visible_alias = "l")]
    Login {
        /// Username (prompted if omitted)
        #[arg(short, long)]
        username: Option<String>,
        /// Password (prompted if omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Register new user
    Register {
        /// Username (prompted if omitted)
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Get actions by param. Just put your description/result as argument
    By {
        #[command(subcommand)]
        filter: ByCommands,
    },

    /// Update action by id
    #[command(visible_alias = "u")]
    Update {
        /// Id of the action to update
        #[arg(long)]
        id: String,
        /// New description
        #[arg(short, long)]
        desc: Option<String>,
        /// New result
        #[arg(short, long)]
        result: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ByCommands {
    /// Get actions by description
    #[command(visible_alias = "d")]
    Desc { value: String },

    /// Get actions by result
    #[command(visible_alias = "r")]
    Res { value: String },

    /// Get actions by date yyyy-MM-dd
    Date { value: String },
}
