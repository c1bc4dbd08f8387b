use serde::Deserialize;
use std::path::PathBuf;

const ENV_PREFIX: &str = "DASHBOARD";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub state_file: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    pub client: ClientSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub fetch_timeout_secs: u64,
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    server_config_from(environment())
}

pub fn load_client_config() -> anyhow::Result<ClientConfig> {
    client_config_from(environment())
}

fn server_config_from(env: config::Environment) -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 4004)?
        .set_default("server.state_file", "dashboard_state.json")?
        .add_source(config::File::with_name("config/server").required(false))
        .add_source(env)
        .build()?;

    Ok(settings.try_deserialize()?)
}

fn client_config_from(env: config::Environment) -> anyhow::Result<ClientConfig> {
    let settings = config::Config::builder()
        .set_default("client.base_url", "http://localhost:4004")?
        .set_default("client.fetch_timeout_secs", 30)?
        .add_source(config::File::with_name("config/client").required(false))
        .add_source(env)
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// `DASHBOARD_SERVER__PORT=8080` overrides `server.port`
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
