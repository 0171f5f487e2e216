use crate::bridge::Bridge;
use crate::config::Config;
use crate::light::{Light, LightCommand};
use anyhow::{Context, Result};
use log::{debug, warn};

pub mod bridge;
pub mod brightness;
pub mod config;
pub mod light;
pub mod table;

/// Name the bridge stores alongside the username created by `connect`.
pub const DEVICE_TYPE: &str = "huectl";

/// Which lights went through and which the bridge refused.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: Vec<u32>,
    pub failed: Vec<u32>,
}

/// Finds a bridge via `discovery_url`, registers a new user on it and returns
/// the resulting config. The link button must be pressed beforehand.
pub async fn pair(discovery_url: &str) -> Result<Config> {
    let found = bridge::discover(discovery_url)
        .await
        .context("Could not find a bridge")?;
    debug!("Using bridge {} at {}", found.id, found.address);
    let client_id = bridge::create_user(&found.address, DEVICE_TYPE)
        .await
        .context("Could not create user")?;
    Ok(Config {
        bridge_address: found.address,
        client_id,
    })
}

/// Lights addressed by `ids`, or every light when `ids` is empty.
pub async fn target_lights(bridge: &Bridge, ids: &[u32]) -> Result<Vec<Light>> {
    if ids.is_empty() {
        return bridge.get_lights().await.context("Unable to list lights");
    }
    let mut lights = Vec::with_capacity(ids.len());
    for &id in ids {
        let light = bridge
            .get_light(id)
            .await
            .with_context(|| format!("Could not fetch light {}", id))?;
        lights.push(light);
    }
    Ok(lights)
}

/// Applies `cmd` to each targeted light in turn.
///
/// Resolving the targets is all-or-nothing, but once that is done a light the
/// bridge refuses is only logged and the remaining lights are still handled.
pub async fn run_light_command(bridge: &Bridge, ids: &[u32], cmd: LightCommand) -> Result<BatchReport> {
    let lights = target_lights(bridge, ids).await?;
    let mut report = BatchReport::default();
    for light in lights {
        let change = light.state.compute_change(&cmd);
        match bridge.set_state(light.id, &change).await {
            Ok(()) => {
                debug!("Executed {:?} on light {}", cmd, light.id);
                report.succeeded.push(light.id);
            }
            Err(err) => {
                warn!("Light {} ({}): {}", light.id, light.name, err);
                report.failed.push(light.id);
            }
        }
    }
    Ok(report)
}

/// All lights, ordered by id.
pub async fn list_lights(bridge: &Bridge) -> Result<Vec<Light>> {
    bridge.get_lights().await.context("Unable to list lights")
}
