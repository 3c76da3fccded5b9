use clap::Parser;
use stock_app::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    stock_logging::initialize(cli.log_destination(), cli.verbose);
    stock_app::run(cli).await
}
