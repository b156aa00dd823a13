use std::time::Duration;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::profile::DeviceTier;
use crate::tables::TierTimelines;
use crate::timeline::{Keyframe, Pose, Timeline};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Optional TOML layer over the built-in defaults: virtual page layout,
/// intro/gate/debounce timings, damper tuning, and per-tier keyframe
/// overrides.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StageConfig {
    pub version: u32,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub damping: DampingConfig,
    #[serde(default)]
    pub timelines: TimelineOverrides,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            version: 1,
            scene: SceneConfig::default(),
            timing: TimingConfig::default(),
            damping: DampingConfig::default(),
            timelines: TimelineOverrides::default(),
        }
    }
}

/// Virtual page geometry standing in for the DOM document the original
/// design scrolled through.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SceneConfig {
    /// Total scrollable height of the virtual document, in pixels.
    #[serde(default = "default_document_height")]
    pub document_height: f64,
    /// Where the downstream content section begins, as a fraction of the
    /// document height. Drives the model-hidden gate geometry.
    #[serde(default = "default_exit_section")]
    pub exit_section: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            document_height: default_document_height(),
            exit_section: default_exit_section(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TimingConfig {
    /// Pause between asset-ready and the container fade-in.
    #[serde(
        default = "default_container_reveal",
        deserialize_with = "deserialize_duration"
    )]
    pub container_reveal: Duration,
    /// Nav glides in once the model is partly faded in.
    #[serde(
        default = "default_nav_reveal",
        deserialize_with = "deserialize_duration"
    )]
    pub nav_reveal: Duration,
    /// Hero content rises after the nav.
    #[serde(
        default = "default_hero_reveal",
        deserialize_with = "deserialize_duration"
    )]
    pub hero_reveal: Duration,
    /// Scroll indicator appears once everything else has settled.
    #[serde(
        default = "default_indicator_reveal",
        deserialize_with = "deserialize_duration"
    )]
    pub indicator_reveal: Duration,
    /// Window during which the scheduler pumps frames unconditionally so the
    /// intro transitions stay smooth regardless of scroll input.
    #[serde(
        default = "default_intro_pump",
        deserialize_with = "deserialize_duration"
    )]
    pub intro_pump: Duration,
    /// Delay before the model counts as hidden once the exit section
    /// approaches; the reverse transition is immediate.
    #[serde(
        default = "default_hide_delay",
        deserialize_with = "deserialize_duration"
    )]
    pub hide_delay: Duration,
    #[serde(
        default = "default_resize_debounce",
        deserialize_with = "deserialize_duration"
    )]
    pub resize_debounce: Duration,
    #[serde(
        default = "default_orientation_debounce",
        deserialize_with = "deserialize_duration"
    )]
    pub orientation_debounce: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            container_reveal: default_container_reveal(),
            nav_reveal: default_nav_reveal(),
            hero_reveal: default_hero_reveal(),
            indicator_reveal: default_indicator_reveal(),
            intro_pump: default_intro_pump(),
            hide_delay: default_hide_delay(),
            resize_debounce: default_resize_debounce(),
            orientation_debounce: default_orientation_debounce(),
        }
    }
}

/// Exponential-damping tuning for the pose lerp.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DampingConfig {
    /// Rate constant `k` in `1 - e^(-k*dt)`.
    #[serde(default = "default_damping_rate")]
    pub rate: f64,
    /// Per-field convergence tolerance.
    #[serde(default = "default_damping_epsilon")]
    pub epsilon: f64,
    /// Upper clamp on a single tick's delta time, so a stalled tab does not
    /// produce a visible jump on resume.
    #[serde(
        default = "default_damping_max_step",
        deserialize_with = "deserialize_duration"
    )]
    pub max_step: Duration,
}

impl Default for DampingConfig {
    fn default() -> Self {
        Self {
            rate: default_damping_rate(),
            epsilon: default_damping_epsilon(),
            max_step: default_damping_max_step(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TimelineOverrides {
    #[serde(default)]
    pub mobile: Option<Vec<KeyframeSpec>>,
    #[serde(default)]
    pub tablet: Option<Vec<KeyframeSpec>>,
    #[serde(default)]
    pub desktop: Option<Vec<KeyframeSpec>>,
}

/// One keyframe row in a tier override table.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeyframeSpec {
    pub anchor: f64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default)]
    pub rot_x: f64,
    #[serde(default)]
    pub rot_y: f64,
    #[serde(default)]
    pub rot_z: f64,
}

impl From<&KeyframeSpec> for Keyframe {
    fn from(spec: &KeyframeSpec) -> Self {
        Keyframe {
            anchor: spec.anchor,
            pose: Pose {
                x: spec.x,
                y: spec.y,
                zoom: spec.zoom,
                rot_x: spec.rot_x,
                rot_y: spec.rot_y,
                rot_z: spec.rot_z,
            },
        }
    }
}

fn default_document_height() -> f64 {
    6000.0
}

fn default_exit_section() -> f64 {
    0.78
}

fn default_container_reveal() -> Duration {
    Duration::from_millis(300)
}

fn default_nav_reveal() -> Duration {
    Duration::from_millis(1000)
}

fn default_hero_reveal() -> Duration {
    Duration::from_millis(1600)
}

fn default_indicator_reveal() -> Duration {
    Duration::from_millis(3500)
}

fn default_intro_pump() -> Duration {
    Duration::from_millis(3500)
}

fn default_hide_delay() -> Duration {
    Duration::from_millis(900)
}

fn default_resize_debounce() -> Duration {
    Duration::from_millis(100)
}

fn default_orientation_debounce() -> Duration {
    Duration::from_millis(200)
}

fn default_damping_rate() -> f64 {
    8.0
}

fn default_damping_epsilon() -> f64 {
    5e-4
}

fn default_damping_max_step() -> Duration {
    Duration::from_millis(50)
}

fn default_zoom() -> f64 {
    10.0
}

/// Accepts either a bare number of seconds or a humantime string such as
/// `"900ms"` or `"3.5s"`.
fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Seconds(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Seconds(value) if value.is_finite() && value >= 0.0 => {
            Ok(Duration::from_secs_f64(value))
        }
        Raw::Seconds(value) => Err(de::Error::custom(format!(
            "duration must be a non-negative number of seconds, got {value}"
        ))),
        Raw::Text(raw) => humantime::parse_duration(&raw)
            .map_err(|err| de::Error::custom(format!("invalid duration '{raw}': {err}"))),
    }
}

impl StageConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: StageConfig = toml::from_str(input)?;
        raw.validate()?;
        Ok(raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != 1 {
            return Err(ConfigError::Invalid(format!(
                "unsupported config version {}; expected 1",
                self.version
            )));
        }

        if !self.scene.document_height.is_finite() || self.scene.document_height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "scene.document_height must be positive, got {}",
                self.scene.document_height
            )));
        }

        if !(0.0..=1.0).contains(&self.scene.exit_section) {
            return Err(ConfigError::Invalid(format!(
                "scene.exit_section must lie in [0, 1], got {}",
                self.scene.exit_section
            )));
        }

        if !self.damping.rate.is_finite() || self.damping.rate <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "damping.rate must be positive, got {}",
                self.damping.rate
            )));
        }

        if !self.damping.epsilon.is_finite() || self.damping.epsilon <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "damping.epsilon must be positive, got {}",
                self.damping.epsilon
            )));
        }

        if self.damping.max_step.is_zero() {
            return Err(ConfigError::Invalid(
                "damping.max_step must be greater than zero".into(),
            ));
        }

        // Timeline overrides must pass the same invariants as the built-ins.
        for (tier, table) in self.override_tables() {
            if let Some(specs) = table {
                build_timeline(tier, specs)?;
            }
        }

        Ok(())
    }

    /// Materializes the per-tier timelines, replacing built-ins where an
    /// override table is present.
    pub fn timelines(&self) -> Result<TierTimelines, ConfigError> {
        let mut tables = TierTimelines::built_in();
        if let Some(specs) = &self.timelines.mobile {
            tables.mobile = build_timeline(DeviceTier::Mobile, specs)?;
        }
        if let Some(specs) = &self.timelines.tablet {
            tables.tablet = build_timeline(DeviceTier::Tablet, specs)?;
        }
        if let Some(specs) = &self.timelines.desktop {
            tables.desktop = build_timeline(DeviceTier::Desktop, specs)?;
        }
        Ok(tables)
    }

    fn override_tables(&self) -> [(DeviceTier, Option<&Vec<KeyframeSpec>>); 3] {
        [
            (DeviceTier::Mobile, self.timelines.mobile.as_ref()),
            (DeviceTier::Tablet, self.timelines.tablet.as_ref()),
            (DeviceTier::Desktop, self.timelines.desktop.as_ref()),
        ]
    }
}

fn build_timeline(tier: DeviceTier, specs: &[KeyframeSpec]) -> Result<Timeline, ConfigError> {
    let frames = specs.iter().map(Keyframe::from).collect();
    Timeline::new(frames)
        .map_err(|err| ConfigError::Invalid(format!("timelines.{tier}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
version = 1

[scene]
document_height = 7200
exit_section = 0.8

[timing]
hide_delay = "750ms"
intro_pump = 3.5

[damping]
rate = 6.5

[[timelines.desktop]]
anchor = 0.0
x = 0.5
zoom = 10.0
rot_y = 3.14159

[[timelines.desktop]]
anchor = 0.5
x = -0.5
zoom = 9.0
rot_y = 6.28318

[[timelines.desktop]]
anchor = 1.0
zoom = 13.0
rot_y = 12.56636
"#;

    #[test]
    fn parses_sample_config() {
        let config = StageConfig::from_toml_str(SAMPLE).expect("parse config");
        assert_eq!(config.version, 1);
        assert_eq!(config.scene.document_height, 7200.0);
        assert_eq!(config.timing.hide_delay, Duration::from_millis(750));
        assert_eq!(config.timing.intro_pump, Duration::from_secs_f64(3.5));
        // Untouched knobs fall back to defaults.
        assert_eq!(config.timing.nav_reveal, Duration::from_millis(1000));
        assert_eq!(config.damping.rate, 6.5);
        assert_eq!(config.damping.epsilon, 5e-4);
    }

    #[test]
    fn override_replaces_only_its_tier() {
        let config = StageConfig::from_toml_str(SAMPLE).expect("parse config");
        let tables = config.timelines().expect("timelines");
        assert_eq!(tables.desktop.frames().len(), 3);
        assert_eq!(tables.desktop.frames()[1].pose.x, -0.5);
        // Mobile and tablet keep the built-in tables.
        let built_in = TierTimelines::built_in();
        assert_eq!(tables.mobile, built_in.mobile);
        assert_eq!(tables.tablet, built_in.tablet);
    }

    #[test]
    fn rejects_unsupported_version() {
        let err = StageConfig::from_toml_str("version = 2").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_unordered_override_anchors() {
        let config = r#"
version = 1

[[timelines.mobile]]
anchor = 0.0

[[timelines.mobile]]
anchor = 0.6

[[timelines.mobile]]
anchor = 0.4

[[timelines.mobile]]
anchor = 1.0
"#;
        let err = StageConfig::from_toml_str(config).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_negative_damping_rate() {
        let err = StageConfig::from_toml_str("version = 1\n[damping]\nrate = -2.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_negative_duration() {
        let result = StageConfig::from_toml_str("version = 1\n[timing]\nhide_delay = -1.0");
        assert!(result.is_err());
    }

    #[test]
    fn default_config_is_valid() {
        StageConfig::default().validate().expect("defaults validate");
    }
}
