use std::net::SocketAddr;

use clap::{Parser, Subcommand};

use fitness_planner::build_handler;
use fitness_planner::config::{API_KEY_VAR, PlannerConfig};
use fitness_planner::shell::{ProfileArgs, run_once, serve};

#[derive(Parser)]
#[command(author, version, about = "AI Health & Fitness Planner")]
struct Cli {
    /// Model id (overrides PLANNER_MODEL)
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the web form (default)
    Serve {
        /// Listen address (overrides PLANNER_BIND)
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Generate one plan and print it
    Plan(ProfileArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Nothing is built or bound until the key is known to be present.
    let mut config = PlannerConfig::from_env().unwrap_or_else(|e| {
        eprintln!("❌ {e}");
        eprintln!("  export {API_KEY_VAR}=gsk_...");
        std::process::exit(1);
    });
    if let Some(model) = cli.model {
        config.llm.model = model;
    }

    let handler = build_handler(&config)?;

    match cli.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => {
            let addr = bind.unwrap_or(config.bind);
            eprintln!("🏋️ AI Health & Fitness Planner v{}", env!("CARGO_PKG_VERSION"));
            eprintln!("   Model: {}", config.llm.model);
            eprintln!("   Form: http://{}/", addr);
            eprintln!("   API:  http://{}/api/plan\n", addr);
            serve(addr, handler).await?;
        }
        Command::Plan(args) => {
            let mut stdout = std::io::stdout();
            if !run_once(&handler, args.into(), &mut stdout).await {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
