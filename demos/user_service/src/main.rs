//! User Service Demo
//!
//! Two controllers whose routes are derived from their method names, mounted
//! on an in-memory router.
//!
//! ```text
//! get_user_action(id: u64)        ->  GET    /user-user/{id:[0-9]+}
//! post_action(name, age: u32)     ->  POST   /user/{name}/{age:[0-9]+}
//! delete_user_action(id: u64)     ->  DELETE /user-user/{id:[0-9]+}
//! get_health_action()             ->  GET    /status-health
//! ```
//!
//! # Usage
//!
//! ```bash
//! cargo run --package user-service -- routes
//! cargo run --package user-service -- call GET '/user-user/{id:[0-9]+}' id=1
//! cargo run --package user-service -- --config demos/user_service/autoroute.yaml stats
//! cargo run --package user-service -- --verbose --log-file target/routes.log routes
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use autoroute::prelude::*;
use autoroute::runtime::config::{LogLevel, LogOutput, LoggingConfig};
use autoroute::runtime::logging;
use clap::{Parser, Subcommand};
use tracing::info;

// ============================================================================
// Host Types
// ============================================================================

/// What the host hands to every route.
#[derive(Debug, Clone)]
pub struct Request {
    pub client: String,
}

#[derive(Debug, Clone, Default)]
pub struct Response {
    pub headers: Vec<(String, String)>,
}

type Router = MemoryRouter<Request, Response, String>;

// ============================================================================
// Controllers
// ============================================================================

pub struct UserController {
    users: BTreeMap<u64, (String, u32)>,
}

impl Default for UserController {
    fn default() -> Self {
        let users = BTreeMap::from([
            (1, ("ada".to_string(), 36)),
            (2, ("grace".to_string(), 45)),
        ]);
        Self { users }
    }
}

#[controller(output = String)]
impl UserController {
    /// Looks up one user.
    pub fn get_user_action(&self, req: Request, id: u64) -> String {
        match self.users.get(&id) {
            Some((name, age)) => format!("{name} ({age}), asked by {}", req.client),
            None => format!("no user #{id}"),
        }
    }

    pub fn post_action(&self, name: String, age: u32) -> String {
        let id = self.users.keys().last().map_or(1, |last| last + 1);
        format!("created user #{id}: {name} ({age})")
    }

    pub fn delete_user_action(&self, id: u64, res: Response) -> String {
        let known = self.users.contains_key(&id);
        format!("deleted #{id}: {known} ({} headers)", res.headers.len())
    }

    // Not routed: lacks the action suffix.
    pub fn count_users(&self) -> usize {
        self.users.len()
    }
}

pub struct StatusController;

#[controller(output = String)]
impl StatusController {
    pub fn get_health_action(&self) -> String {
        "ok".to_string()
    }
}

// ============================================================================
// Command Line
// ============================================================================

#[derive(Debug, Parser)]
#[command(name = "user-service", about = "Convention-routed user service demo")]
struct Cli {
    /// Configuration file to load instead of searching the working directory.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Configuration profile.
    #[arg(short, long)]
    profile: Option<String>,

    /// Log at debug level regardless of configuration.
    #[arg(short, long)]
    verbose: bool,

    /// Write logs to this file instead of the configured output.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the generated route records as JSON.
    Routes,
    /// Print route counts.
    Stats,
    /// Dispatch one request to a registered route template.
    Call {
        verb: HttpVerb,
        template: String,
        /// Path values, either `name=value` or positional.
        args: Vec<String>,
    },
}

fn parse_args(raw: &[String]) -> PathArgs {
    let mut args = PathArgs::new();
    for arg in raw {
        match arg.split_once('=') {
            Some((name, value)) => args.insert(name, value),
            None => args.push(arg.as_str()),
        }
    }
    args
}

/// Applies the logging flags on top of the loaded configuration.
fn apply_log_flags(logging: &mut LoggingConfig, verbose: bool, log_file: Option<PathBuf>) {
    if verbose {
        logging.level = LogLevel::Debug.to_string();
    }
    if let Some(path) = log_file {
        logging.output = LogOutput::File;
        logging.file_path = Some(path);
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new().search_path(".");
    if let Some(path) = &cli.config {
        loader = loader.file(path);
    }
    if let Some(profile) = &cli.profile {
        loader = loader.profile(profile.as_str());
    }
    let mut config = loader.load().context("failed to load configuration")?;
    apply_log_flags(&mut config.logging, cli.verbose, cli.log_file);
    logging::init_from_config(&config.logging).context("failed to initialise logging")?;

    let mut app = RouteApp::with_config(Router::new(), &config);
    let users = app.mount(UserController::default())?;
    app.mount(StatusController)?;
    info!(
        users = users.controller().count_users(),
        targets = users.targets().count(),
        "User service ready"
    );

    match cli.command {
        Command::Routes => println!("{}", app.registry().to_json()?),
        Command::Stats => println!("{}", app.stats()),
        Command::Call {
            verb,
            template,
            args,
        } => {
            let router = app.router();
            if router.find(verb, &template).is_none() {
                bail!("no {verb} route registered for {template}");
            }
            let request = Request {
                client: "cli".to_string(),
            };
            let output = router.dispatch(
                verb,
                &template,
                request,
                Response::default(),
                parse_args(&args),
            )?;
            println!("{output}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_flags_override_config() {
        let cli = Cli::parse_from(["user-service", "-v", "--log-file", "out/routes.log", "stats"]);
        let mut config = LoggingConfig::default();
        apply_log_flags(&mut config, cli.verbose, cli.log_file);

        assert_eq!(config.level, "debug");
        assert_eq!(config.output, LogOutput::File);
        assert_eq!(config.file_path, Some(PathBuf::from("out/routes.log")));
    }

    #[test]
    fn test_no_log_flags_keep_config() {
        let cli = Cli::parse_from(["user-service", "routes"]);
        let mut config = LoggingConfig::default();
        apply_log_flags(&mut config, cli.verbose, cli.log_file);

        assert_eq!(config.level, LoggingConfig::default().level);
        assert_eq!(config.output, LogOutput::Stdout);
        assert!(config.file_path.is_none());
    }

    #[test]
    fn test_parse_args() {
        let raw = ["id=7".to_string(), "ada".to_string()];
        let args = parse_args(&raw);
        assert_eq!(args.len(), 2);
    }
}
