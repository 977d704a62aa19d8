//! Host readings fed by events
//!
//! The reference host has no screen reader to ask, so desktop size and speech
//! volume are whatever the configuration or the latest event said.

use sonar_core::{CanvasSize, GeometryProvider, VolumeProvider};
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Default)]
pub struct StaticGeometry {
    canvas: RwLock<Option<CanvasSize>>,
}

impl StaticGeometry {
    pub fn new(canvas: Option<CanvasSize>) -> Self {
        Self {
            canvas: RwLock::new(canvas),
        }
    }

    pub fn set(&self, canvas: Option<CanvasSize>) {
        *self.canvas.write().unwrap_or_else(PoisonError::into_inner) = canvas;
    }
}

impl GeometryProvider for StaticGeometry {
    fn canvas_size(&self) -> Option<CanvasSize> {
        *self.canvas.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, Default)]
pub struct ConfiguredVolume {
    volume: RwLock<Option<f32>>,
}

impl ConfiguredVolume {
    pub fn new(volume: Option<f32>) -> Self {
        Self {
            volume: RwLock::new(volume),
        }
    }

    pub fn set(&self, volume: Option<f32>) {
        *self.volume.write().unwrap_or_else(PoisonError::into_inner) = volume;
    }
}

impl VolumeProvider for ConfiguredVolume {
    fn speech_volume(&self) -> Option<f32> {
        *self.volume.read().unwrap_or_else(PoisonError::into_inner)
    }
}
