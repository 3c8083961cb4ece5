// Command dispatch: one function per subcommand, each issuing a single
// request (two for a partial update) and printing the outcome.

use std::io::{self, Write};

use chrono::NaiveDate;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, info, instrument};

use crate::api::ApiClient;
use crate::cli::{ByCommands, Cli, Commands};
use crate::config::Settings;
use crate::error::{ApiError, CliError, CliResult};
use crate::model::{Action, AuthRequest, QueryParam};
use crate::output;
use crate::token::TokenStore;
use crate::ui;

/// Everything a command needs: the HTTP client and the token file.
pub struct Context {
    pub api: ApiClient,
    pub tokens: TokenStore,
}

impl Context {
    /// Build the client from settings, loading any saved token.
    pub fn from_settings(settings: &Settings) -> CliResult<Self> {
        let tokens = TokenStore::new(&settings.token_file);
        let api = ApiClient::new(&settings.base_url)?.with_token(tokens.load());
        Ok(Context { api, tokens })
    }

    fn require_auth(&self) -> CliResult<()> {
        if self.api.has_token() {
            Ok(())
        } else {
            Err(ApiError::Unauthenticated.into())
        }
    }
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Commands::Completions { shell } = &cli.command {
        print_completions(*shell, &mut io::stdout());
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?.with_overrides(cli.url.clone(), cli.token_file.clone())?;
    debug!(base_url = %settings.base_url, token_file = %settings.token_file.display(), "settings resolved");
    let mut ctx = Context::from_settings(&settings)?;

    match &cli.command {
        Commands::All => list_actions(&ctx, None),
        Commands::New { desc, result } => create_action(&ctx, desc, result),
        Commands::Login { username, password } => login(&mut ctx, username.clone(), password.clone()),
        Commands::Register { username } => register(&ctx, username.clone()),
        Commands::By { filter } => {
            let param = match filter {
                ByCommands::Desc { value } => QueryParam::Description(value.clone()),
                ByCommands::Res { value } => QueryParam::Result(value.clone()),
                ByCommands::Date { value } => QueryParam::Date(parse_date(value)?),
            };
            list_actions(&ctx, Some(&param))
        }
        Commands::Update { id, desc, result } => update_action(&ctx, id, desc.as_deref(), result.as_deref()),
        Commands::Completions { .. } => Ok(()),
    }
}

/// Write the completion script for `shell`.
pub fn print_completions(shell: Shell, out: &mut impl Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
}

/// Dates are sent as `yyyy-MM-dd`; reject anything else before a round trip.
pub fn parse_date(value: &str) -> CliResult<String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| CliError::Usage(format!("Invalid date '{}', expected yyyy-MM-dd.", value)))
}

#[instrument(skip(ctx))]
pub fn list_actions(ctx: &Context, filter: Option<&QueryParam>) -> CliResult<()> {
    ctx.require_auth()?;
    let actions = ui::with_spinner("Fetching actions...", || ctx.api.list_actions(filter))?;
    info!(count = actions.len(), "actions fetched");
    output::print_actions(&actions)?;
    Ok(())
}

#[instrument(skip(ctx))]
pub fn create_action(ctx: &Context, desc: &str, result: &str) -> CliResult<()> {
    ctx.require_auth()?;
    let action = Action::new(desc, result);
    let saved = ui::with_spinner("Saving action...", || ctx.api.save_action(&action))?;
    if !saved.is_empty() {
        output::print_actions(std::slice::from_ref(&saved))?;
    }
    Ok(())
}

/// Replace both fields at once, or fetch the action and patch one field.
#[instrument(skip(ctx))]
pub fn update_action(ctx: &Context, id: &str, desc: Option<&str>, result: Option<&str>) -> CliResult<()> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CliError::Usage("Provide correct id.".into()));
    }
    let desc = desc.filter(|d| !d.is_empty());
    let result = result.filter(|r| !r.is_empty());
    ctx.require_auth()?;

    let action = match (desc, result) {
        (Some(d), Some(r)) => Action::with_id(id, d, r),
        (None, None) => return Err(CliError::Usage("Provide description or result to update.".into())),
        (d, r) => {
            let found = ui::with_spinner("Fetching action...", || ctx.api.get_action(id))?;
            let mut action = found.ok_or_else(|| CliError::NotFound(format!("Action has not been found by id {}", id)))?;
            if let Some(d) = d {
                action.description = d.to_string();
            }
            if let Some(r) = r {
                action.result = r.to_string();
            }
            action.id.get_or_insert_with(|| id.to_string());
            action
        }
    };

    let saved = ui::with_spinner("Saving action...", || ctx.api.save_action(&action))?;
    output::print_action(&saved)?;
    Ok(())
}

#[instrument(skip(ctx, password))]
pub fn login(ctx: &mut Context, username: Option<String>, password: Option<String>) -> CliResult<()> {
    let req = ui::prompt_credentials(username, password)?;
    let token = ui::with_spinner("Logging in...", || ctx.api.login(&req))?;
    if token.is_empty() {
        output::warning("Incorrect username or/and password.");
        return Ok(());
    }
    ctx.tokens.save(&token)?;
    ctx.api.set_token(&token);
    info!(path = %ctx.tokens.path().display(), "token stored");
    output::success("Successfully logged in.");
    Ok(())
}

#[instrument(skip(ctx))]
pub fn register(ctx: &Context, username: Option<String>) -> CliResult<()> {
    let Some(req) = ui::prompt_registration(username)? else {
        output::warning("Passwords does not match.");
        return Ok(());
    };
    submit_registration(ctx, &req)
}

/// Failures are returned, not printed; `main` reports them once.
pub fn submit_registration(ctx: &Context, req: &AuthRequest) -> CliResult<()> {
    ui::with_spinner("Registering...", || ctx.api.register(req)).map_err(|e| {
        debug!(error = %e, "register failed");
        e
    })?;
    output::success("User has been saved successfully. Use login command to log in.");
    Ok(())
}
