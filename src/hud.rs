//! HUD snapshot and distance formatting
//!
//! The HUD collaborator consumes one [`Snapshot`] per tick and renders text;
//! it never reaches back into the simulation. Formatted fields use short
//! metric-like suffixes at powers of 1000 so the readout stays legible from
//! kilometers all the way to the cosmic horizon.

use serde::{Deserialize, Serialize};

use crate::consts::AU_KM;
use crate::sim::atlas::{self, LAYERS, REGIONS};

/// Suffixes at successive powers of 1000
const SUFFIXES: &[&str] = &["", "K", "M", "B", "T", "Qa", "Qi", "Sx", "Sp", "Oc", "No"];

/// Read-only per-tick readout for the HUD collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Floor of true distance in km
    pub distance_km: u64,
    /// e.g. "1.5 K km"
    pub distance_km_text: String,
    /// e.g. "0.000013 AU"
    pub distance_au_text: String,
    pub layer_name: String,
    pub place: String,
    pub region: String,
}

impl Snapshot {
    /// Compute a fresh snapshot from the authoritative distance
    pub fn derive(distance_km: f64) -> Self {
        let layer = LAYERS
            .get(atlas::layer_index(LAYERS, distance_km))
            .or_else(|| LAYERS.first());
        let region = REGIONS
            .get(atlas::region_index(REGIONS, distance_km))
            .or_else(|| REGIONS.first());

        Self {
            distance_km: distance_km.max(0.0) as u64,
            distance_km_text: format_distance(distance_km),
            distance_au_text: format_au(distance_km / AU_KM),
            layer_name: layer.map(|l| l.name).unwrap_or("").to_string(),
            place: layer.map(|l| l.place).unwrap_or("").to_string(),
            region: region.map(|r| r.name).unwrap_or("").to_string(),
        }
    }
}

/// Format a km distance with K/M/B/T/... suffixes at powers of 1000.
/// Below 1000 the value is shown as a plain integer.
pub fn format_distance(km: f64) -> String {
    let km = km.max(0.0);
    if km < 1000.0 {
        return format!("{} km", km.floor() as u64);
    }
    let mut tier = 0usize;
    let mut value = km;
    while value >= 1000.0 && tier + 1 < SUFFIXES.len() {
        value /= 1000.0;
        tier += 1;
    }
    format!("{} {} km", trim_decimal(value), SUFFIXES[tier])
}

/// Format an AU value: six decimals while small (atmospheric distances are a
/// tiny fraction of an AU), suffixed like km once large.
pub fn format_au(au: f64) -> String {
    let au = au.max(0.0);
    if au < 1000.0 {
        return format!("{au:.6} AU");
    }
    let mut tier = 0usize;
    let mut value = au;
    while value >= 1000.0 && tier + 1 < SUFFIXES.len() {
        value /= 1000.0;
        tier += 1;
    }
    format!("{} {} AU", trim_decimal(value), SUFFIXES[tier])
}

/// One decimal place, dropping a trailing ".0" ("1.5" but "100", not "100.0")
fn trim_decimal(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if (rounded - rounded.floor()).abs() < 1e-9 {
        format!("{}", rounded as u64)
    } else {
        format!("{rounded:.1}")
    }
}
