// Library root
// -----------
// The binary (`main.rs`) parses the command line and hands it to
// `commands::execute_command`.
//
// Module responsibilities:
// - `api`: blocking HTTP client for the actions service.
// - `model`: wire records (actions, credentials, error bodies).
// - `token`: persisted bearer token.
// - `config`: layered client settings.
// - `cli` / `commands`: argument definitions and the dispatch table.
// - `output` / `ui`: console formatting, prompts and spinners.
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod token;
pub mod ui;
