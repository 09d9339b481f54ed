use std::net::TcpListener;

use env_logger::Env;
use prospect::{
    configuration::get_configuration,
    services::{LeadGenerator, OpenaiClient},
    startup::run,
};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(address)?;

    let openai_client = OpenaiClient::new();
    let generator = LeadGenerator::new(Box::new(openai_client), configuration.generation.model);

    log::info!(
        "Serving the lead generation app on {}:{}",
        configuration.application.host,
        configuration.application.port
    );

    run(listener, generator, configuration.api_keys)?.await
}
