use serde::{Deserialize, Serialize};
use std::fmt;

/// Resolved rendering and simulation parameters for one device class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Texel edge length for generated textures
    pub texture_resolution: u32,
    /// Simulation steps per second
    pub physics_steps: u32,
    /// Parallel worker budget, 0 disables the workers
    pub quantum_workers: u32,
    /// Geometry budget in triangles
    pub max_poly_count: u32,
    /// Shadow map edge length, 0 disables shadows
    pub shadow_resolution: u32,
    pub antialiasing: bool,
    pub post_processing: bool,
}

impl PerformanceConfig {
    /// Fixed physics time step in seconds
    pub fn time_step(&self) -> f64 {
        1.0 / self.physics_steps as f64
    }

    pub fn shadows_enabled(&self) -> bool {
        self.shadow_resolution > 0
    }

    /// Largest square grid edge whose triangle count `2 * (n - 1)^2` fits into
    /// `max_poly_count`, clamped to `[2, texture_resolution]`
    pub fn terrain_grid_size(&self) -> usize {
        let quads = self.max_poly_count as f64 / 2.0;
        let edge = quads.sqrt().floor() as usize + 1;
        edge.clamp(2, (self.texture_resolution as usize).max(2))
    }
}

/// Device classes with a catalog entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Desktop,
    #[default]
    Web,
    Mobile,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Desktop, Preset::Web, Preset::Mobile];

    /// Exact, case-sensitive match on the catalog key
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "desktop" => Some(Preset::Desktop),
            "web" => Some(Preset::Web),
            "mobile" => Some(Preset::Mobile),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Desktop => "desktop",
            Preset::Web => "web",
            Preset::Mobile => "mobile",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of a catalog lookup. A lookup always resolves; `fallback` records
/// whether the requested name was unknown and the default entry was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub preset: Preset,
    pub config: PerformanceConfig,
    pub fallback: bool,
}

/// Immutable mapping from preset name to [`PerformanceConfig`]
#[derive(Debug)]
pub struct PresetCatalog {
    desktop: PerformanceConfig,
    web: PerformanceConfig,
    mobile: PerformanceConfig,
}

/// Entry used for any name the catalog does not know
pub const DEFAULT_PRESET: Preset = Preset::Web;

static CATALOG: PresetCatalog = PresetCatalog {
    desktop: PerformanceConfig {
        texture_resolution: 4096,
        physics_steps: 60,
        quantum_workers: 4,
        max_poly_count: 500_000,
        shadow_resolution: 2048,
        antialiasing: true,
        post_processing: true,
    },
    web: PerformanceConfig {
        texture_resolution: 2048,
        physics_steps: 30,
        quantum_workers: 1,
        max_poly_count: 100_000,
        shadow_resolution: 1024,
        antialiasing: false,
        post_processing: false,
    },
    mobile: PerformanceConfig {
        texture_resolution: 1024,
        physics_steps: 15,
        quantum_workers: 0,
        max_poly_count: 50_000,
        shadow_resolution: 512,
        antialiasing: false,
        post_processing: false,
    },
};

impl PresetCatalog {
    /// The process-wide catalog
    pub fn global() -> &'static PresetCatalog {
        &CATALOG
    }

    /// Look up `name`, falling back to the "web" entry for unknown names
    pub fn get(name: &str) -> PerformanceConfig {
        Self::resolve(name).config
    }

    pub fn resolve(name: &str) -> Resolved {
        match Preset::from_name(name) {
            Some(preset) => Resolved {
                preset,
                config: Self::entry(preset),
                fallback: false,
            },
            None => Resolved {
                preset: DEFAULT_PRESET,
                config: Self::entry(DEFAULT_PRESET),
                fallback: true,
            },
        }
    }

    pub fn entry(preset: Preset) -> PerformanceConfig {
        let catalog = Self::global();
        match preset {
            Preset::Desktop => catalog.desktop,
            Preset::Web => catalog.web,
            Preset::Mobile => catalog.mobile,
        }
    }

    /// Known keys in declaration order
    pub fn names() -> impl Iterator<Item = &'static str> {
        Preset::ALL.into_iter().map(Preset::name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("desktop", 4096, 60, 4, 500_000, 2048, true, true)]
    #[case("web", 2048, 30, 1, 100_000, 1024, false, false)]
    #[case("mobile", 1024, 15, 0, 50_000, 512, false, false)]
    fn test_catalog_literal_values(
        #[case] name: &str,
        #[case] texture_resolution: u32,
        #[case] physics_steps: u32,
        #[case] quantum_workers: u32,
        #[case] max_poly_count: u32,
        #[case] shadow_resolution: u32,
        #[case] antialiasing: bool,
        #[case] post_processing: bool,
    ) {
        let config = PresetCatalog::get(name);

        assert_eq!(
            config,
            PerformanceConfig {
                texture_resolution,
                physics_steps,
                quantum_workers,
                max_poly_count,
                shadow_resolution,
                antialiasing,
                post_processing,
            }
        );
    }

    #[rstest]
    #[case("potato")]
    #[case("")]
    #[case("DESKTOP")]
    #[case("Mobile")]
    #[case(" web")]
    fn test_unknown_names_fall_back_to_web(#[case] name: &str) {
        let resolved = PresetCatalog::resolve(name);

        assert_eq!(resolved.config, PresetCatalog::entry(Preset::Web));
        assert_eq!(resolved.preset, Preset::Web);
        assert!(resolved.fallback);
        assert_eq!(PresetCatalog::get(name), PresetCatalog::get("web"));
    }

    #[test]
    fn test_known_name_is_not_a_fallback() {
        let resolved = PresetCatalog::resolve("web");
        assert!(!resolved.fallback);
        assert_eq!(resolved.preset, Preset::Web);
    }

    #[test]
    fn test_every_entry_within_domain() {
        for preset in Preset::ALL {
            let config = PresetCatalog::entry(preset);
            assert!(config.texture_resolution > 0, "{preset}");
            assert!(config.physics_steps > 0, "{preset}");
            assert!(config.max_poly_count > 0, "{preset}");
        }
    }

    #[test]
    fn test_names_roundtrip_through_from_name() {
        let names: Vec<_> = PresetCatalog::names().collect();
        assert_eq!(names, ["desktop", "web", "mobile"]);
        for name in names {
            assert_eq!(Preset::from_name(name).map(Preset::name), Some(name));
        }
    }

    #[rstest]
    #[case(Preset::Desktop, 1.0 / 60.0)]
    #[case(Preset::Web, 1.0 / 30.0)]
    #[case(Preset::Mobile, 1.0 / 15.0)]
    fn test_time_step(#[case] preset: Preset, #[case] expected: f64) {
        let step = PresetCatalog::entry(preset).time_step();
        assert!((step - expected).abs() < 1e-12);
    }

    #[rstest]
    #[case(Preset::Desktop, 501)]
    #[case(Preset::Web, 224)]
    #[case(Preset::Mobile, 159)]
    fn test_terrain_grid_size_fits_budget(#[case] preset: Preset, #[case] expected: usize) {
        let config = PresetCatalog::entry(preset);
        let edge = config.terrain_grid_size();

        assert_eq!(edge, expected);
        assert!(2 * (edge - 1) * (edge - 1) <= config.max_poly_count as usize);
    }

    #[test]
    fn test_terrain_grid_size_clamped_by_texture_resolution() {
        let config = PerformanceConfig {
            texture_resolution: 16,
            ..PresetCatalog::entry(Preset::Desktop)
        };
        assert_eq!(config.terrain_grid_size(), 16);
    }
}
