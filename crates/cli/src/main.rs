mod commands;
mod error;
mod util;

use commands::DashboardCli;
use ridership_core::Dataset;
use tracing::error;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let args = DashboardCli::parse_args();
    util::init_tracing(args.log_json);

    let config = args.resolve_config()?;

    let dataset = match Dataset::load(&config.data_file) {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("error loading ridership data: {e}");
            std::process::exit(1);
        }
    };

    let state = commands::serve(&config, dataset, args.open).await?;

    if !args.no_export {
        commands::export(state.layout(), &config.export_file);
    }

    Ok(())
}
