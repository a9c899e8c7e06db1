mod solve_view;

use std::fmt;
use std::time::Duration;

use portal_core::model::{Access, Container, ContainerId, Role, Route, route_access};
use services::{AnswerPolicy, AppServices, Clock, SessionConfig, SessionError};
use storage::seed::{CAPITALS_PRACTICE, FRACTIONS_ASSIGNMENT};
use storage::{InMemoryRepository, Storage, seed_demo};
use tracing_subscriber::EnvFilter;

use crate::solve_view::{Terminal, ViewExit};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidContainerId { raw: String },
    InvalidLatency { raw: String },
    InvalidRole { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidContainerId { raw } => write!(f, "invalid --container value: {raw}"),
            ArgsError::InvalidLatency { raw } => write!(f, "invalid --latency-ms value: {raw}"),
            ArgsError::InvalidRole { raw } => write!(f, "invalid --role value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--practice] [--container <id>] [--role <role>]");
    eprintln!("                      [--latency-ms <ms>] [--strict]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  assignment {FRACTIONS_ASSIGNMENT}, practice {CAPITALS_PRACTICE}, role student");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PORTAL_LATENCY_MS, PORTAL_ROLE, PORTAL_ANSWER_POLICY, RUST_LOG");
}

#[derive(Debug)]
struct Args {
    container: Container,
    role: Role,
    latency: Duration,
    strict: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut latency = match std::env::var("PORTAL_LATENCY_MS") {
            Ok(raw) => parse_latency(raw)?,
            Err(_) => Duration::from_millis(300),
        };
        let mut role = match std::env::var("PORTAL_ROLE") {
            Ok(raw) => parse_role(raw)?,
            Err(_) => Role::Student,
        };
        let mut practice = false;
        let mut container_id = None;
        let mut strict = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--practice" => practice = true,
                "--strict" => strict = true,
                "--container" => {
                    let value = require_value(args, "--container")?;
                    let parsed: ContainerId = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidContainerId { raw: value.clone() })?;
                    container_id = Some(parsed);
                }
                "--latency-ms" => latency = parse_latency(require_value(args, "--latency-ms")?)?,
                "--role" => role = parse_role(require_value(args, "--role")?)?,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let container = if practice {
            Container::practice(container_id.unwrap_or(CAPITALS_PRACTICE))
        } else {
            Container::assignment(container_id.unwrap_or(FRACTIONS_ASSIGNMENT))
        };

        Ok(Self {
            container,
            role,
            latency,
            strict,
        })
    }
}

fn parse_latency(raw: String) -> Result<Duration, ArgsError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ArgsError::InvalidLatency { raw })
}

fn parse_role(raw: String) -> Result<Role, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidRole { raw })
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "services=info,storage=info,app=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let target = Route::solve_for(args.container);
    if let Access::Redirect(to) = route_access(Some(args.role), &target) {
        tracing::warn!(role = args.role.as_str(), %target, redirect = %to, "route denied");
        println!("{} cannot open {target}; redirected to {to}", args.role.as_str());
        return Ok(());
    }

    let mut config = SessionConfig::from_env()?;
    if args.strict {
        config = config.with_answer_policy(AnswerPolicy::Strict);
    }

    // Seed the mock backend here so services never touch ambient data.
    let clock = Clock::default();
    let repo = InMemoryRepository::new().with_latency(args.latency);
    seed_demo(&repo, clock.now())?;
    let services = AppServices::new(&Storage::from_repository(&repo), clock, config);
    let session_loop = services.session_loop();

    println!("loading {target} ...");
    let solving = match session_loop.start_session(args.container).await {
        Ok(solving) => solving,
        Err(SessionError::NotFound { container }) => {
            println!("nothing to solve: {container} does not exist");
            return Ok(());
        }
        Err(SessionError::InvalidState) => {
            println!("this set has no questions; go back to {}", Route::detail_for(args.container));
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let stdin = std::io::stdin();
    let mut terminal = Terminal::new(stdin.lock());
    match solve_view::run(&session_loop, solving, &mut terminal).await? {
        ViewExit::Redirect(location) => println!("submitted; redirecting to {location}"),
        ViewExit::Left(route) => println!("left for {route}"),
        ViewExit::EndOfInput => println!("bye"),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_logging();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
