use crate::brightness::Transform;
use serde::{Deserialize, Serialize};

/// Things that can be done to a single light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightCommand {
    On,
    Off,
    Toggle,
    Brightness(Transform),
    Color { hue: u16, sat: u8 },
}

/// A light as reported by the bridge.
///
/// The bridge keys lights by id instead of embedding it, so `id` is filled in
/// by the client after decoding.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Light {
    #[serde(skip)]
    pub id: u32,
    pub name: String,
    pub state: LightState,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LightState {
    pub on: bool,
    pub bri: u8,
    pub hue: u16,
    pub sat: u8,
    pub reachable: bool,
}

/// Body of a `PUT .../lights/<id>/state` request. Only set fields are sent.
#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct LightStateChange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bri: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hue: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sat: Option<u8>,
}

impl LightState {
    pub fn compute_change(&self, cmd: &LightCommand) -> LightStateChange {
        match cmd {
            LightCommand::On => LightStateChange {
                on: Some(true),
                ..Default::default()
            },
            LightCommand::Off => LightStateChange {
                on: Some(false),
                ..Default::default()
            },
            LightCommand::Toggle => LightStateChange {
                on: Some(!self.on),
                ..Default::default()
            },
            // the bridge refuses bri/hue/sat on a light that is off
            LightCommand::Brightness(transform) => LightStateChange {
                on: Some(true),
                bri: Some(transform.apply(self.bri)),
                ..Default::default()
            },
            LightCommand::Color { hue, sat } => LightStateChange {
                on: Some(true),
                hue: Some(*hue),
                sat: Some(*sat),
                ..Default::default()
            },
        }
    }
}
