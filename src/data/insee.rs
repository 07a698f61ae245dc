//! INSEE BDM API integration for the Maastricht debt series.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::data::DebtSource;
use crate::data::parse::parse_observations;
use crate::domain::{Observation, SeriesKind};
use crate::error::AppError;

pub const DEFAULT_BASE_URL: &str = "https://api.insee.fr/series/BDM/data/SERIES_BDM";
pub const SERIES_DEBT_TO_GDP: &str = "001694056";
pub const SERIES_DEBT_AMOUNT: &str = "010565708";
pub const DEFAULT_LAST_N: usize = 25;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const API_KEY_VAR: &str = "INSEE_API_KEY";

const SOURCE_LABEL: &str = "INSEE - Institut National de la Statistique";

/// Endpoint and query settings for the series requests.
#[derive(Debug, Clone)]
pub struct InseeSettings {
    pub base_url: String,
    pub debt_to_gdp_series: String,
    pub debt_amount_series: String,
    pub start_period: Option<String>,
    pub detail: Option<String>,
    /// `lastNObservations`; `None` asks for the full series.
    pub last_n: Option<usize>,
    pub timeout_secs: u64,
}

impl Default for InseeSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            debt_to_gdp_series: SERIES_DEBT_TO_GDP.to_string(),
            debt_amount_series: SERIES_DEBT_AMOUNT.to_string(),
            start_period: None,
            detail: None,
            last_n: Some(DEFAULT_LAST_N),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl InseeSettings {
    pub fn series_id(&self, kind: SeriesKind) -> &str {
        match kind {
            SeriesKind::DebtToGdp => &self.debt_to_gdp_series,
            SeriesKind::DebtAmount => &self.debt_amount_series,
        }
    }
}

pub struct InseeClient {
    client: Client,
    settings: InseeSettings,
    api_key: Option<String>,
}

impl InseeClient {
    /// Build a client, reading the optional API key from the environment (`.env` honoured).
    pub fn from_env(settings: InseeSettings) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        if api_key.is_none() {
            log::warn!("No {API_KEY_VAR} configured; using limited public access.");
        }
        Self::new(settings, api_key)
    }

    pub fn new(settings: InseeSettings, api_key: Option<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("dette-publique/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::io(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            settings,
            api_key,
        })
    }

    pub fn settings(&self) -> &InseeSettings {
        &self.settings
    }

    /// GET one series and return its JSON body. Anything but HTTP 200 is an error.
    pub fn fetch_series(&self, series_id: &str) -> Result<Value, AppError> {
        let url = format!("{}/{}", self.settings.base_url.trim_end_matches('/'), series_id);

        let mut req = self.client.get(&url).header(ACCEPT, "application/json");
        if let Some(start) = &self.settings.start_period {
            req = req.query(&[("startPeriod", start.as_str())]);
        }
        if let Some(detail) = &self.settings.detail {
            req = req.query(&[("detail", detail.as_str())]);
        }
        if let Some(n) = self.settings.last_n {
            req = req.query(&[("lastNObservations", n.to_string())]);
        }
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req
            .send()
            .map_err(|e| AppError::io(format!("INSEE request for {series_id} failed: {e}")))?;

        if resp.status() != StatusCode::OK {
            return Err(AppError::io(format!("INSEE request for {series_id} failed with status {}.", resp.status())));
        }

        resp.json()
            .map_err(|e| AppError::io(format!("Failed to read INSEE response for {series_id}: {e}")))
    }
}

/// Live INSEE data behind the `DebtSource` interface.
pub struct InseeSource {
    client: InseeClient,
}

impl InseeSource {
    pub fn new(client: InseeClient) -> Self {
        Self { client }
    }
}

impl DebtSource for InseeSource {
    fn label(&self) -> &str {
        SOURCE_LABEL
    }

    fn observations(&self, kind: SeriesKind) -> Vec<Observation> {
        let series_id = self.client.settings().series_id(kind);
        log::info!("Fetching {} ({series_id})...", kind.display_name());

        match self.client.fetch_series(series_id) {
            Ok(body) => {
                let obs = parse_observations(Some(&body));
                if obs.is_empty() {
                    log::warn!("No observations found in INSEE response for {series_id}.");
                }
                obs
            }
            Err(e) => {
                log::warn!("{e}");
                Vec::new()
            }
        }
    }
}

/// One-shot HTTP server used to exercise the client without the network.
#[cfg(test)]
pub(crate) mod test_server {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::JoinHandle;

    /// Serve `responses` in order, one per accepted connection, and return the base URL.
    pub fn serve(responses: Vec<(u16, String)>) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = std::thread::spawn(move || {
            let mut requests = Vec::new();
            for (status, body) in responses {
                let (mut stream, _) = listener.accept().unwrap();
                let mut buf = Vec::new();
                let mut chunk = [0_u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = stream.read(&mut chunk).unwrap();
                    if n == 0 {
                        break;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                }
                requests.push(String::from_utf8_lossy(&buf).to_string());

                let reason = if status == 200 { "OK" } else { "Internal Server Error" };
                let resp = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                stream.write_all(resp.as_bytes()).unwrap();
                stream.flush().unwrap();
            }
            requests
        });
        (format!("http://{addr}"), handle)
    }
}
