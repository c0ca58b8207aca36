use campusdesk::cli::permissions::handle_permissions;
use campusdesk::cli::select::handle_select;
use campusdesk::cli::settings::handle_settings;
use campusdesk::cli::{Cli, Commands};
use campusdesk::state::init_app_state;
use campusdesk_core::AppError;
use campusdesk_observability::{LoggingConfig, init_tracing};
use clap::Parser;
use dotenvy::dotenv;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing(&LoggingConfig::from_env());

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!(kind = ?e.kind, error = %e.error, "Command failed");
        eprintln!("❌ error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let state = init_app_state()?;

    match cli.command {
        Commands::Select(args) => handle_select(&state, args).await,
        Commands::Permissions => handle_permissions(&state).await,
        Commands::Settings(command) => handle_settings(&state, command),
    }
}
