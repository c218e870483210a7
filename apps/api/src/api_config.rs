use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use campusline_core::{AppError, AppResult};
use tracing_subscriber::EnvFilter;

use crate::state::QuerySettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_host: String,
    pub api_port: u16,
    pub frontend_url: String,
    pub query_settings: QuerySettings,
    pub seed_demo_data: bool,
}

impl ApiConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let value = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let api_host = value("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = parsed_env(value("API_PORT"), "API_PORT", 3001_u16)?;
        let frontend_url =
            value("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());

        let max_page_size = parsed_env(value("MAX_PAGE_SIZE"), "MAX_PAGE_SIZE", 100_usize)?;
        if max_page_size == 0 {
            return Err(AppError::InvalidInput(
                "MAX_PAGE_SIZE must be at least 1".to_owned(),
            ));
        }

        let default_page_size =
            parsed_env(value("DEFAULT_PAGE_SIZE"), "DEFAULT_PAGE_SIZE", 10_usize)?;
        if default_page_size == 0 || default_page_size > max_page_size {
            return Err(AppError::InvalidInput(format!(
                "DEFAULT_PAGE_SIZE must be between 1 and MAX_PAGE_SIZE ({max_page_size})"
            )));
        }

        let seed_demo_data = match value("SEED_DEMO_DATA") {
            None => true,
            Some(flag) if flag.eq_ignore_ascii_case("true") || flag == "1" => true,
            Some(flag) if flag.eq_ignore_ascii_case("false") || flag == "0" => false,
            Some(flag) => {
                return Err(AppError::InvalidInput(format!(
                    "SEED_DEMO_DATA must be 'true' or 'false', got '{flag}'"
                )));
            }
        };

        Ok(Self {
            api_host,
            api_port,
            frontend_url,
            query_settings: QuerySettings {
                default_page_size,
                max_page_size,
            },
            seed_demo_data,
        })
    }

    pub fn socket_address(&self) -> AppResult<SocketAddr> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::InvalidInput(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parsed_env<T>(value: Option<String>, name: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|error| AppError::InvalidInput(format!("invalid {name}: {error}")))
        })
        .transpose()
        .map(|parsed| parsed.unwrap_or(default))
}
