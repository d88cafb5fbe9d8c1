use brandgen::config::{build_generator, setup_logging};
use clap::Parser;
use tracing::error;

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let cli = brandgen::cli::CliOptions::parse();

    if setup_logging(cli.debug).is_err() {
        return;
    }

    let generator = match build_generator(&cli.generator) {
        Ok(generator) => generator,
        Err(err) => {
            error!("Configuration error: {:#}", err);
            return;
        }
    };

    if let Err(err) =
        brandgen::web::setup_server(&cli.listen_address, cli.port, generator).await
    {
        error!("Application error: {}", err);
    }
}
