//! Canvas and feature types as served by the NightDriver API

use serde::{Deserialize, Serialize};

pub type CanvasId = u32;
pub type FeatureId = u32;

/// Summary of a canvas' effects manager
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EffectsSummary {
    pub fps: u16,
    pub current_effect_index: i64,
    pub running: bool,
}

/// One LED strip or matrix mapped onto a region of its canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: FeatureId,
    #[serde(default)]
    pub host_name: String,
    #[serde(default)]
    pub friendly_name: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default)]
    pub offset_x: u32,
    #[serde(default)]
    pub offset_y: u32,
    #[serde(default)]
    pub reversed: bool,
    #[serde(default)]
    pub channel: u8,
    #[serde(default)]
    pub red_green_swap: bool,
    #[serde(default)]
    pub client_buffer_count: u32,

    // Socket statistics, present once the server has a channel for the feature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_connected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_per_second: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reconnect_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_depth: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_max_size: Option<u64>,
}

impl Default for Feature {
    fn default() -> Self {
        Self {
            id: 0,
            host_name: String::new(),
            friendly_name: String::new(),
            port: 0,
            width: 0,
            height: default_height(),
            offset_x: 0,
            offset_y: 0,
            reversed: false,
            channel: 0,
            red_green_swap: false,
            client_buffer_count: 0,
            is_connected: None,
            bytes_per_second: None,
            reconnect_count: None,
            queue_depth: None,
            queue_max_size: None,
        }
    }
}

/// A drawing surface made up of one or more features
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Canvas {
    pub id: CanvasId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub current_effect_name: String,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub effects_manager: EffectsSummary,
}

impl Canvas {
    /// A canvas is active while its effects manager is running
    pub fn is_active(&self) -> bool {
        self.effects_manager.running
    }

    pub fn feature(&self, id: FeatureId) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }
}

/// A feature together with the canvas that owns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasFeature {
    pub canvas: Canvas,
    pub feature: Feature,
}

fn default_height() -> u32 {
    1
}
