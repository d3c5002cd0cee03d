use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use shared::protocol::{order_route, product_route};
use tracing::warn;
use url::Url;

pub const SETTINGS_FILE: &str = "storefront.toml";
pub const DEFAULT_CATALOG_URL: &str = "http://localhost:8080/api/product";
pub const DEFAULT_ORDER_URL: &str = "http://localhost:8080/api/order";

/// Where the storefront finds its two services. Both values are absolute
/// URLs; the setters refuse anything `Url` cannot parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub catalog_url: String,
    pub order_url: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            order_url: DEFAULT_ORDER_URL.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    catalog_url: Option<String>,
    order_url: Option<String>,
}

impl ClientSettings {
    /// Both endpoints on one server, at their standard routes.
    pub fn for_server(server_url: &str) -> Result<Self> {
        let mut settings = Self::default();
        settings.set_server_url(server_url)?;
        Ok(settings)
    }

    pub fn set_server_url(&mut self, raw: &str) -> Result<()> {
        let base = parse_url("server url", raw)?;
        self.catalog_url = base
            .join(product_route())
            .with_context(|| format!("cannot derive catalog url from '{raw}'"))?
            .to_string();
        self.order_url = base
            .join(order_route())
            .with_context(|| format!("cannot derive order url from '{raw}'"))?
            .to_string();
        Ok(())
    }

    pub fn set_catalog_url(&mut self, raw: &str) -> Result<()> {
        self.catalog_url = parse_url("catalog url", raw)?.to_string();
        Ok(())
    }

    pub fn set_order_url(&mut self, raw: &str) -> Result<()> {
        self.order_url = parse_url("order url", raw)?.to_string();
        Ok(())
    }
}

fn parse_url(label: &str, raw: &str) -> Result<Url> {
    Url::parse(raw.trim()).with_context(|| format!("invalid {label} '{raw}'"))
}

pub fn load_settings() -> Result<ClientSettings> {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

/// Defaults, then the TOML file at `path` if present, then environment.
///
/// Within each layer a server base URL is applied before the per-endpoint
/// URLs, so a specific endpoint always wins over a derived one.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.server_url {
                    settings.set_server_url(&v)?;
                }
                if let Some(v) = file_cfg.catalog_url {
                    settings.set_catalog_url(&v)?;
                }
                if let Some(v) = file_cfg.order_url {
                    settings.set_order_url(&v)?;
                }
            }
            Err(error) => warn!(path = %path.display(), %error, "ignoring malformed settings file"),
        }
    }

    if let Some(v) = env("STOREFRONT_SERVER_URL") {
        settings.set_server_url(&v)?;
    }
    if let Some(v) = env("STOREFRONT_CATALOG_URL") {
        settings.set_catalog_url(&v)?;
    }
    if let Some(v) = env("STOREFRONT_ORDER_URL") {
        settings.set_order_url(&v)?;
    }

    Ok(settings)
}
