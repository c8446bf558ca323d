use tracing::info;
use txtdirect_domain::{CliOverrides, Config};

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;

    info!(
        config_file = config_path.unwrap_or("default"),
        port = config.server.port,
        bind = %config.server.bind_address,
        enabled = ?config.redirect.enable.iter().map(|t| t.as_str()).collect::<Vec<_>>(),
        "Configuration loaded"
    );

    Ok(config)
}
