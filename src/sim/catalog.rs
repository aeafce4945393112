//! Predefined vehicles and track themes

use serde::Serialize;

/// 8-bit RGB display color
pub type Rgb = [u8; 3];

/// Handling characteristics of a selectable car
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VehicleProfile {
    pub name: &'static str,
    /// Lateral velocity gained per tick while steering
    pub acceleration: f32,
    /// Lateral speed cap (further limited by the global cap)
    pub max_speed: f32,
    /// Added to the lane snap factor
    pub handling: f32,
    pub color: Rgb,
}

pub const VEHICLES: [VehicleProfile; 3] = [
    VehicleProfile {
        name: "Sprinter",
        acceleration: 0.9,
        max_speed: 9.5,
        handling: 0.02,
        color: [30, 180, 255],
    },
    VehicleProfile {
        name: "Cruiser",
        acceleration: 0.7,
        max_speed: 8.0,
        handling: 0.06,
        color: [80, 200, 120],
    },
    VehicleProfile {
        name: "Muscle",
        acceleration: 1.2,
        max_speed: 10.5,
        handling: 0.0,
        color: [220, 60, 60],
    },
];

/// Vehicle at `index`, if it exists
pub fn vehicle(index: usize) -> Option<&'static VehicleProfile> {
    VEHICLES.get(index)
}

/// Road color scheme for one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrackTheme {
    pub name: &'static str,
    pub background: Rgb,
    pub road: Rgb,
    pub edge: Rgb,
    pub line: Rgb,
}

pub const THEMES: [TrackTheme; 4] = [
    TrackTheme {
        name: "City",
        background: [15, 15, 15],
        road: [60, 60, 60],
        edge: [40, 40, 40],
        line: [255, 230, 50],
    },
    TrackTheme {
        name: "Desert",
        background: [222, 184, 135],
        road: [120, 100, 80],
        edge: [160, 120, 70],
        line: [255, 255, 255],
    },
    TrackTheme {
        name: "Night",
        background: [5, 5, 30],
        road: [30, 30, 45],
        edge: [20, 20, 35],
        line: [120, 200, 255],
    },
    TrackTheme {
        name: "Snow",
        background: [235, 240, 250],
        road: [150, 155, 165],
        edge: [200, 205, 215],
        line: [255, 80, 80],
    },
];
