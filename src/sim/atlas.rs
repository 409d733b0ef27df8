//! Static region and layer tables
//!
//! A `Region` is a macro phase of the journey with its own pacing; a `Layer`
//! is a named distance band used purely for the HUD readout and background
//! gradient. Both tables are ordered by start distance ascending; regions are
//! non-overlapping and cover [0, ∞). Lookup helpers are total: degenerate
//! input (empty table, any non-negative distance) resolves to a neutral
//! default rather than an error, since a missing band must never take down
//! the simulation loop.

/// A macro phase of the ascent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub name: &'static str,
    /// Inclusive start distance (km)
    pub start_km: f64,
    /// Exclusive end distance (km); `f64::INFINITY` for the final region
    pub end_km: f64,
    /// Nominal time to traverse the region with no player input (seconds)
    pub duration_secs: f64,
    /// Pacing multiplier applied on top of the nominal rate
    pub speed_factor: f64,
}

impl Region {
    /// Traversable width in km. The unbounded final region uses a synthetic
    /// width so its progress rate stays finite.
    pub fn width_km(&self) -> f64 {
        if self.end_km.is_infinite() {
            (self.start_km * 0.02).max(1.0e6)
        } else {
            (self.end_km - self.start_km).max(1.0)
        }
    }

    /// Fraction-of-region advanced per millisecond with no player multiplier
    pub fn rate_per_ms(&self) -> f64 {
        let duration_ms = (self.duration_secs * 1000.0).max(1000.0);
        self.speed_factor.max(0.0) / duration_ms
    }
}

/// A named distance band, display-only
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub name: &'static str,
    pub place: &'static str,
    /// Band start distance (km); band ends where the next layer begins
    pub start_km: f64,
    /// Background gradient stops, packed 0xRRGGBB (bottom, top)
    pub color_from: u32,
    pub color_to: u32,
}

pub const REGIONS: &[Region] = &[
    Region {
        name: "EARTH & ATMOSPHERE",
        start_km: 0.0,
        end_km: 1.0e4,
        duration_secs: 35.0,
        speed_factor: 1.0,
    },
    Region {
        name: "EARTH ORBIT & SOLAR SYSTEM",
        start_km: 1.0e4,
        end_km: 2.0e10,
        duration_secs: 50.0,
        speed_factor: 1.15,
    },
    Region {
        name: "INTERSTELLAR SPACE",
        start_km: 2.0e10,
        end_km: 9.0e17,
        duration_secs: 70.0,
        speed_factor: 1.35,
    },
    Region {
        name: "COSMIC SCALE",
        start_km: 9.0e17,
        end_km: f64::INFINITY,
        duration_secs: 80.0,
        speed_factor: 1.6,
    },
];

pub const LAYERS: &[Layer] = &[
    Layer { name: "Ground Level", place: "Earth Surface", start_km: 0.0, color_from: 0x166534, color_to: 0x60a5fa },
    Layer { name: "Troposphere", place: "Earth Atmosphere", start_km: 12.0, color_from: 0x60a5fa, color_to: 0x2563eb },
    Layer { name: "Stratosphere", place: "Earth Atmosphere", start_km: 50.0, color_from: 0x2563eb, color_to: 0x1e40af },
    Layer { name: "Mesosphere", place: "Earth Atmosphere", start_km: 85.0, color_from: 0x1e40af, color_to: 0x2b2350 },
    Layer { name: "Thermosphere", place: "Earth Atmosphere", start_km: 600.0, color_from: 0x2b2350, color_to: 0x3b0764 },
    Layer { name: "Low Earth Orbit", place: "Near Earth Space", start_km: 2000.0, color_from: 0x0b0b22, color_to: 0x000814 },
    Layer { name: "Exosphere", place: "Earth Atmosphere", start_km: 10000.0, color_from: 0x3b0764, color_to: 0x0b0b22 },
    Layer { name: "Geostationary Orbit", place: "Near Earth Space", start_km: 35786.0, color_from: 0x000814, color_to: 0x000000 },
    Layer { name: "Lunar Orbit", place: "Moon Region", start_km: 384_400.0, color_from: 0x000000, color_to: 0x111827 },
    Layer { name: "Inner Solar System", place: "Mercury, Venus, Earth, Mars", start_km: 2.5e8, color_from: 0x111827, color_to: 0x7c2d12 },
    Layer { name: "Asteroid Belt", place: "Between Mars and Jupiter", start_km: 4.0e8, color_from: 0x7c2d12, color_to: 0x3f3f46 },
    Layer { name: "Outer Solar System", place: "Jupiter to Neptune", start_km: 4.5e9, color_from: 0x3f3f46, color_to: 0x031026 },
    Layer { name: "Kuiper Belt", place: "Beyond Neptune", start_km: 7.5e9, color_from: 0x031026, color_to: 0x042438 },
    Layer { name: "Heliopause", place: "Boundary of the Solar Wind", start_km: 2.0e10, color_from: 0x042438, color_to: 0x000000 },
    Layer { name: "Local Interstellar Cloud", place: "Interstellar Medium", start_km: 9.5e12, color_from: 0x000000, color_to: 0x081026 },
    Layer { name: "Local Bubble", place: "Milky Way Region", start_km: 1.0e14, color_from: 0x081026, color_to: 0x1e293b },
    Layer { name: "Orion Arm", place: "Milky Way Galaxy", start_km: 1.0e16, color_from: 0x1e293b, color_to: 0x1e1b4b },
    Layer { name: "Milky Way Core", place: "Galactic Center", start_km: 2.6e17, color_from: 0x1e1b4b, color_to: 0xfde047 },
    Layer { name: "Galactic Halo", place: "Milky Way Outskirts", start_km: 9.0e17, color_from: 0xfde047, color_to: 0x000000 },
    Layer { name: "Local Group", place: "Galaxy Cluster", start_km: 2.5e19, color_from: 0x000000, color_to: 0x1e3a8a },
    Layer { name: "Virgo Supercluster", place: "Cluster of Galaxies", start_km: 1.1e21, color_from: 0x1e3a8a, color_to: 0x312e81 },
    Layer { name: "Laniakea Supercluster", place: "Supercluster Region", start_km: 5.0e21, color_from: 0x312e81, color_to: 0x6b2b6e },
    Layer { name: "Cosmic Web", place: "Large-Scale Universe", start_km: 3.0e23, color_from: 0x6b2b6e, color_to: 0x0b0010 },
    Layer { name: "Cosmic Microwave Background", place: "Observable Universe Edge", start_km: 4.3e26, color_from: 0x0b0010, color_to: 0x2f0710 },
    Layer { name: "Edge of Observable Universe", place: "Cosmic Horizon", start_km: 8.8e26, color_from: 0x2f0710, color_to: 0x000000 },
];

/// Index of the active region for `distance_km`: the first region whose
/// [start, end) contains it, or the last region once all bounds are passed.
/// Returns 0 for an empty table.
pub fn region_index(regions: &[Region], distance_km: f64) -> usize {
    for (i, r) in regions.iter().enumerate() {
        if distance_km >= r.start_km && distance_km < r.end_km {
            return i;
        }
    }
    regions.len().saturating_sub(1)
}

/// Index of the active layer: the last band whose start is at or below
/// `distance_km`. Returns 0 for an empty table or a sub-first-band distance.
pub fn layer_index(layers: &[Layer], distance_km: f64) -> usize {
    for i in 0..layers.len().saturating_sub(1) {
        if distance_km < layers[i + 1].start_km {
            return i;
        }
    }
    layers.len().saturating_sub(1)
}

/// Background gradient stops for `distance_km`: the active layer's colors
/// blended toward the next layer's by the fraction of the band traversed.
/// Returns (bottom, top) as RGB triples plus the blend factor.
pub fn gradient_at(layers: &[Layer], distance_km: f64) -> ([u8; 3], [u8; 3], f32) {
    let Some(first) = layers.first() else {
        return ([0, 0, 0], [0, 0, 0], 0.0);
    };
    let idx = layer_index(layers, distance_km);
    let current = layers.get(idx).unwrap_or(first);
    let next = layers.get(idx + 1).unwrap_or(current);

    let range = (next.start_km - current.start_km).max(1.0);
    let factor = (((distance_km - current.start_km) / range).clamp(0.0, 1.0)) as f32;

    let bottom = crate::blend_rgb(current.color_from, next.color_from, factor);
    let top = crate::blend_rgb(current.color_to, next.color_to, factor);
    (bottom, top, factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_regions_contiguous() {
        assert_eq!(REGIONS[0].start_km, 0.0);
        for pair in REGIONS.windows(2) {
            assert_eq!(pair[0].end_km, pair[1].start_km);
        }
        assert!(REGIONS.last().unwrap().end_km.is_infinite());
    }

    #[test]
    fn test_layers_sorted_ascending() {
        for pair in LAYERS.windows(2) {
            assert!(pair[0].start_km < pair[1].start_km);
        }
    }

    #[test]
    fn test_region_index_past_all_bounds() {
        // Beyond every bound the final region stays active
        assert_eq!(region_index(REGIONS, 1.0e30), REGIONS.len() - 1);
    }

    #[test]
    fn test_empty_tables_resolve_to_zero() {
        assert_eq!(region_index(&[], 123.0), 0);
        assert_eq!(layer_index(&[], 123.0), 0);
        let (bottom, top, f) = gradient_at(&[], 123.0);
        assert_eq!((bottom, top, f), ([0, 0, 0], [0, 0, 0], 0.0));
    }

    #[test]
    fn test_unbounded_region_synthetic_width() {
        let last = REGIONS.last().unwrap();
        assert_eq!(last.width_km(), (last.start_km * 0.02).max(1.0e6));
    }

    proptest! {
        /// Exactly one region is active for any non-negative distance
        #[test]
        fn prop_exactly_one_region(d in 0.0..1.0e28f64) {
            let active: Vec<usize> = REGIONS
                .iter()
                .enumerate()
                .filter(|(_, r)| d >= r.start_km && d < r.end_km)
                .map(|(i, _)| i)
                .collect();
            prop_assert_eq!(active.len(), 1);
            prop_assert_eq!(active[0], region_index(REGIONS, d));
        }

        /// Exactly one layer band contains any non-negative distance
        #[test]
        fn prop_exactly_one_layer(d in 0.0..1.0e28f64) {
            let idx = layer_index(LAYERS, d);
            prop_assert!(d >= LAYERS[idx].start_km || idx == 0);
            if idx + 1 < LAYERS.len() {
                prop_assert!(d < LAYERS[idx + 1].start_km);
            }
        }
    }
}
