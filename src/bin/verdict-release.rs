use {
    anyhow::Result,
    clap::{Args, Parser, Subcommand},
    log::error,
    std::path::PathBuf,
    verdict_release::{commands, types::config::DEFAULT_CONFIG_FILE, ReleaseConfig},
};

#[derive(Parser)]
#[command(name = "verdict-release", about = "Verdict release tasks", version)]
struct VerdictRelease {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Package, upload, update the docs and the website, then clean up")]
    Release(commands::release::CommandArgs),
    #[command(about = "Build the command line interface archive")]
    Package(commands::package::CommandArgs),
    #[command(about = "Print the files that would be uploaded")]
    Plan(commands::plan::CommandArgs),
    #[command(about = "Upload the release files")]
    Publish(commands::publish::CommandArgs),
    #[command(about = "Update the version in the documentation repository")]
    UpdateDoc(commands::update_doc::CommandArgs),
    #[command(about = "Update the version and download links in the website repository")]
    UpdateSite(commands::update_site::CommandArgs),
    #[command(about = "Remove local release archives")]
    Clean(commands::clean::CommandArgs),
}

#[derive(Args, Debug)]
pub struct GlobalOptions {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

fn main() {
    if let Err(err) = try_main() {
        error!("Error: {err}");
        for (i, cause) in err.chain().skip(1).enumerate() {
            error!("  {}: {}", i.saturating_add(1), cause);
        }
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let cli = VerdictRelease::parse();

    let level = if cli.global.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = ReleaseConfig::load(&cli.global.config)?;

    match cli.command {
        Commands::Release(args) => commands::release::run(args, &config)?,
        Commands::Package(args) => commands::package::run(args, &config)?,
        Commands::Plan(args) => commands::plan::run(args, &config)?,
        Commands::Publish(args) => commands::publish::run(args, &config)?,
        Commands::UpdateDoc(args) => commands::update_doc::run(args, &config)?,
        Commands::UpdateSite(args) => commands::update_site::run(args, &config)?,
        Commands::Clean(args) => commands::clean::run(args, &config)?,
    }

    Ok(())
}
