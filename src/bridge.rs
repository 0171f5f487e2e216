use crate::config::Config;
use crate::light::{Light, LightStateChange};
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Public endpoint listing the bridges registered from this network.
pub const DISCOVERY_URL: &str = "https://discovery.meethue.com/";

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("request to bridge failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("bridge error {kind} at {address:?}: {description}")]
    Api {
        kind: u16,
        address: String,
        description: String,
    },
    #[error("unexpected response from bridge: {0}")]
    Unexpected(String),
    #[error("no bridge found on the local network")]
    NotFound,
}

/// One entry of the array the bridge answers writes (and failed reads) with.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
enum ApiResponse<T> {
    Success(T),
    Error(ApiError),
}

#[derive(Deserialize, Debug)]
struct ApiError {
    #[serde(rename = "type")]
    kind: u16,
    #[serde(default)]
    address: String,
    description: String,
}

impl From<ApiError> for BridgeError {
    fn from(err: ApiError) -> Self {
        BridgeError::Api {
            kind: err.kind,
            address: err.address,
            description: err.description,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredBridge {
    pub id: String,
    #[serde(rename = "internalipaddress")]
    pub address: String,
}

#[derive(Deserialize, Debug)]
struct NewUser {
    username: String,
}

/// Fails with the first error entry if the bridge answered with an error array,
/// otherwise decodes the body as `T`.
fn decode<T: DeserializeOwned>(body: Value) -> Result<T, BridgeError> {
    if let Value::Array(entries) = &body {
        for entry in entries {
            if let Ok(ApiResponse::<Value>::Error(err)) = serde_json::from_value(entry.clone()) {
                return Err(err.into());
            }
        }
    }
    serde_json::from_value(body.clone())
        .map_err(|e| BridgeError::Unexpected(format!("{} in {}", e, body)))
}

fn http_client() -> Result<Client, BridgeError> {
    Ok(Client::builder()
        .user_agent(APP_USER_AGENT)
        .connect_timeout(Duration::from_secs(5))
        .build()?)
}

fn base_url(address: &str) -> String {
    let address = address.trim_end_matches('/');
    if address.contains("://") {
        address.to_string()
    } else {
        format!("http://{}", address)
    }
}

/// Asks the discovery endpoint at `url` for bridges on the local network and
/// returns the first one.
pub async fn discover(url: &str) -> Result<DiscoveredBridge, BridgeError> {
    let body: Value = http_client()?.get(url).send().await?.error_for_status()?.json().await?;
    let bridges: Vec<DiscoveredBridge> = decode(body)?;
    debug!("Discovered bridges: {:?}", bridges);
    bridges.into_iter().next().ok_or(BridgeError::NotFound)
}

/// Registers `device_type` with the bridge at `address` and returns the new
/// username. Fails with error 101 unless the link button was pressed shortly
/// before.
pub async fn create_user(address: &str, device_type: &str) -> Result<String, BridgeError> {
    let url = format!("{}/api", base_url(address));
    let body: Value = http_client()?
        .post(&url)
        .json(&json!({ "devicetype": device_type }))
        .send()
        .await?
        .json()
        .await?;
    let mut replies: Vec<ApiResponse<NewUser>> = decode(body)?;
    match replies.pop() {
        Some(ApiResponse::Success(user)) => Ok(user.username),
        Some(ApiResponse::Error(err)) => Err(err.into()),
        None => Err(BridgeError::Unexpected("empty reply to user creation".into())),
    }
}

/// An authenticated connection to one bridge.
pub struct Bridge {
    client: Client,
    api: String,
}

impl Bridge {
    pub fn new(address: &str, user: &str) -> Result<Self, BridgeError> {
        Ok(Bridge {
            client: http_client()?,
            api: format!("{}/api/{}", base_url(address), user),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, BridgeError> {
        Self::new(&config.bridge_address, &config.client_id)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, BridgeError> {
        let url = format!("{}{}", self.api, path);
        debug!("GET {}", url);
        let body: Value = self.client.get(&url).send().await?.json().await?;
        decode(body)
    }

    /// Fetches every light known to the bridge, ordered by id.
    pub async fn get_lights(&self) -> Result<Vec<Light>, BridgeError> {
        let by_id: HashMap<String, Light> = self.get("/lights").await?;
        let mut lights = by_id
            .into_iter()
            .map(|(id, mut light)| {
                light.id = id
                    .parse()
                    .map_err(|_| BridgeError::Unexpected(format!("light id {:?}", id)))?;
                Ok(light)
            })
            .collect::<Result<Vec<_>, BridgeError>>()?;
        lights.sort_by_key(|l| l.id);
        Ok(lights)
    }

    pub async fn get_light(&self, id: u32) -> Result<Light, BridgeError> {
        let mut light: Light = self.get(&format!("/lights/{}", id)).await?;
        light.id = id;
        Ok(light)
    }

    pub async fn set_state(&self, id: u32, change: &LightStateChange) -> Result<(), BridgeError> {
        let url = format!("{}/lights/{}/state", self.api, id);
        debug!("PUT {} {:?}", url, change);
        let body: Value = self.client.put(&url).json(change).send().await?.json().await?;
        let replies: Vec<ApiResponse<Value>> = decode(body)?;
        if replies.is_empty() {
            return Err(BridgeError::Unexpected("empty reply to state change".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_gets_scheme() {
        assert_eq!(base_url("10.0.0.2"), "http://10.0.0.2");
        assert_eq!(base_url("http://127.0.0.1:8080/"), "http://127.0.0.1:8080");
        assert_eq!(base_url("https://hue.lan"), "https://hue.lan");
    }

    #[test]
    fn error_entry_wins() {
        let body = json!([{"error": {
            "type": 1,
            "address": "/lights",
            "description": "unauthorized user"
        }}]);
        match decode::<HashMap<String, Light>>(body) {
            Err(BridgeError::Api { kind, description, .. }) => {
                assert_eq!(kind, 1);
                assert_eq!(description, "unauthorized user");
            }
            other => panic!("expected api error, got {:?}", other),
        }
    }

    #[test]
    fn success_entries_decode() {
        let body = json!([{"success": {"/lights/1/state/on": true}}]);
        let replies: Vec<ApiResponse<Value>> = decode(body).unwrap();
        assert!(matches!(replies[0], ApiResponse::Success(_)));
    }

    #[test]
    fn garbage_is_unexpected() {
        let res = decode::<Vec<DiscoveredBridge>>(json!({"nope": 1}));
        assert!(matches!(res, Err(BridgeError::Unexpected(_))));
    }
}
