#[derive(clap::Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Region used when a step gives none; defaults to $AWS_REGION or $AWS_DEFAULT_REGION
    #[clap(long, global = true)]
    default_region: Option<String>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Render an aws-actions/configure-aws-credentials step as JSON
    Render(awscredstep::cmd::render::RenderArgs),
}

fn main() -> Result<(), anyhow::Error> {
    use clap::Parser;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = awscredstep::config::Config::from_env(awscredstep::config::ConfigData {
        default_region: cli.default_region.clone(),
    });

    match &cli.command {
        Commands::Render(args) => awscredstep::cmd::render::run(&config, args),
    }
}
