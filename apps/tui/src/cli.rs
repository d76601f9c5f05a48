use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "host_city_explorer",
    version,
    about = "Browse Olympic athletes by host city on a terminal globe"
)]
pub struct CliArgs {
    /// Run one query, print the results and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless results as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the athlete service base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Override the log file used in interactive mode
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,

    /// Headless: list athletes from this host city
    #[arg(long, value_name = "NAME", conflicts_with_all = ["search", "medal"])]
    pub city: Option<String>,

    /// Headless: search athletes by name
    #[arg(long, value_name = "TEXT", conflicts_with = "medal")]
    pub search: Option<String>,

    /// Headless: list athletes holding this medal (G, S or B)
    #[arg(long, value_name = "CODE")]
    pub medal: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var("ATHLETE_API_URL", url);
        }
        if let Some(timeout) = self.timeout {
            std::env::set_var("ATHLETE_API_TIMEOUT_SECS", timeout.to_string());
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("LOG_FILE", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}
