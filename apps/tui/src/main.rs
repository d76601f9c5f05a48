use clap::Parser;
use color_eyre::Result;
use tracing::{error, info};

use host_city_explorer::api::HttpAthleteService;
use host_city_explorer::cli::CliArgs;
use host_city_explorer::config::init_app_config;
use host_city_explorer::logging::{init_logging, LogTarget};
use host_city_explorer::{event, terminal, App};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config()?;

    // Without a terminal there is nothing to draw on
    let headless = args.headless || !is_terminal();
    init_logging(
        &config,
        if headless {
            LogTarget::Stderr
        } else {
            LogTarget::File
        },
    )?;
    info!(api = %config.api_base_url, headless, "starting host_city_explorer");

    if headless {
        return event::run_headless(&config, &args).await;
    }

    let service = HttpAthleteService::new(&config.api_base_url, config.request_timeout)?;
    let mut app = App::new(service, config.flight);
    app.status_message = format!("Athlete service: {}", config.api_base_url);

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app).await;
    terminal::cleanup(true, true);

    if let Err(e) = &result {
        error!(error = %e, "interactive session failed");
    }
    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
