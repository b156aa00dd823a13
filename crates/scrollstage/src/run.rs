use std::fs;

use anyhow::{anyhow, Context, Result};
use keyframes::{DeviceProfile, StageConfig};
use motion::{DamperTuning, IntroTuning, SchedulerTuning};
use tracing_subscriber::EnvFilter;
use viewer::ViewerConfig;

use crate::cli::Args;

pub fn run(args: Args) -> Result<()> {
    initialise_tracing();

    let config = load_config(&args)?;
    let (width, height) = parse_surface_size(&args.size)?;

    let tier = args
        .tier
        .unwrap_or_else(|| DeviceProfile::detect(width, false).tier);
    let profile = DeviceProfile {
        tier,
        reduced_motion: args.reduced_motion,
    };

    let document_height = args.doc_height.unwrap_or(config.scene.document_height);
    if !document_height.is_finite() || document_height <= 0.0 {
        return Err(anyhow!(
            "document height must be positive, got {document_height}"
        ));
    }

    let timelines = config
        .timelines()
        .context("invalid timeline overrides in configuration")?;

    tracing::info!(
        %tier,
        reduced_motion = profile.reduced_motion,
        document_height,
        "bootstrapping scroll stage"
    );

    viewer::run(ViewerConfig {
        surface_size: (width, height),
        profile,
        timelines,
        damper: DamperTuning {
            rate: config.damping.rate,
            epsilon: config.damping.epsilon,
            max_step: config.damping.max_step,
        },
        scheduler: SchedulerTuning {
            intro: IntroTuning {
                container_delay: config.timing.container_reveal,
                nav_delay: config.timing.nav_reveal,
                hero_delay: config.timing.hero_reveal,
                indicator_delay: config.timing.indicator_reveal,
                pump_window: config.timing.intro_pump,
            },
            ..SchedulerTuning::default()
        },
        document_height,
        exit_section: config.scene.exit_section,
        hide_delay: config.timing.hide_delay,
        resize_debounce: config.timing.resize_debounce,
        orientation_debounce: config.timing.orientation_debounce,
    })
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_config(args: &Args) -> Result<StageConfig> {
    let Some(path) = args.config.as_ref() else {
        return Ok(StageConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration at {}", path.display()))?;
    StageConfig::from_toml_str(&raw)
        .with_context(|| format!("failed to parse configuration at {}", path.display()))
}

fn parse_surface_size(value: &str) -> Result<(u32, u32)> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow!("size must look like 1440x900, got '{value}'"))?;
    let width: u32 = width
        .trim()
        .parse()
        .with_context(|| format!("invalid width in '{value}'"))?;
    let height: u32 = height
        .trim()
        .parse()
        .with_context(|| format!("invalid height in '{value}'"))?;
    if width == 0 || height == 0 {
        return Err(anyhow!("size dimensions must be non-zero, got '{value}'"));
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use keyframes::DeviceTier;

    use super::*;

    #[test]
    fn surface_size_parses_common_forms() {
        assert_eq!(parse_surface_size("1440x900").unwrap(), (1440, 900));
        assert_eq!(parse_surface_size("375X812").unwrap(), (375, 812));
        assert_eq!(parse_surface_size(" 800 x 600 ").unwrap(), (800, 600));
    }

    #[test]
    fn surface_size_rejects_garbage() {
        assert!(parse_surface_size("1440").is_err());
        assert!(parse_surface_size("x900").is_err());
        assert!(parse_surface_size("0x900").is_err());
        assert!(parse_surface_size("wide x tall").is_err());
    }

    #[test]
    fn width_selects_tier_when_not_forced() {
        assert_eq!(DeviceProfile::detect(375, false).tier, DeviceTier::Mobile);
        assert_eq!(DeviceProfile::detect(1024, false).tier, DeviceTier::Tablet);
        assert_eq!(DeviceProfile::detect(1440, false).tier, DeviceTier::Desktop);
    }
}
