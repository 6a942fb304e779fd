mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "imagegen",
    about = "Compose Dockerfiles from base fragments and select CI build matrices"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate <variant>/Dockerfile for every variant in <RELEASE_DIR>/public.json
    Generate {
        /// Release directory containing public.json and base/
        release_dir: PathBuf,
        /// Verify generated Dockerfiles are up to date instead of writing them
        #[arg(long)]
        check: bool,
    },
    /// Print the build matrix as JSON (stdout) and pretty JSON (stderr)
    Matrix {
        /// Repository root to scan
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Directory layout of the repository
        #[arg(long, value_enum, default_value_t = LayoutArg::Versioned)]
        layout: LayoutArg,
        /// Pull request target branch; when set only changed Dockerfiles are built
        #[arg(long, env = "GITHUB_BASE_REF")]
        base_ref: Option<String>,
        /// Commit under test (required with --base-ref)
        #[arg(long, env = "GITHUB_SHA")]
        head_sha: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    /// <version>/<product>/Dockerfile
    Versioned,
    /// dockerfiles/<product>/Dockerfile
    Flat,
}

impl From<LayoutArg> for imagegen_matrix::Layout {
    fn from(layout: LayoutArg) -> Self {
        match layout {
            LayoutArg::Versioned => Self::Versioned,
            LayoutArg::Flat => Self::Flat,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the matrix JSON; diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { release_dir, check } => commands::generate(&release_dir, check)?,
        Commands::Matrix {
            root,
            layout,
            base_ref,
            head_sha,
        } => commands::matrix(&root, layout.into(), base_ref, head_sha).await?,
    }

    Ok(())
}
