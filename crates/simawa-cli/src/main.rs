mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simawa")]
#[command(about = "Student-affairs administration portal")]
#[command(version)]
struct Cli {
    /// Path to the SIMAWA config directory (default: ~/.simawa)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize SIMAWA configuration
    Init,

    /// Create database tables and the default accounts
    Seed,

    /// Create an account
    CreateUser {
        username: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Role: superadmin | kemahasiswaan | adminbem | adminmpm | mahasiswa
        #[arg(long)]
        role: String,

        /// Password (or set SIMAWA_PASSWORD env var)
        #[arg(long, env = "SIMAWA_PASSWORD")]
        password: String,
    },

    /// Run the portal server
    Serve,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("simawa=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let base_dir = match cli.config_dir {
        Some(ref dir) => dir.clone(),
        None => simawa_core::config::PortalConfig::default_base_dir()?,
    };

    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Init => commands::init::run(&base_dir),
        Commands::Seed => rt.block_on(commands::seed::run(&base_dir)),
        Commands::CreateUser {
            ref username,
            ref name,
            ref role,
            ref password,
        } => rt.block_on(commands::create_user::run(
            &base_dir, username, name, role, password,
        )),
        Commands::Serve => rt.block_on(commands::serve::run(&base_dir)),
    }
}
