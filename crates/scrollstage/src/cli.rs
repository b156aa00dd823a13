use std::path::PathBuf;

use clap::Parser;
use keyframes::DeviceTier;

#[derive(Parser, Debug)]
#[command(
    name = "scrollstage",
    author,
    version,
    about = "Scroll-driven 3D showcase with demand-driven rendering"
)]
pub struct Args {
    /// Optional stage configuration TOML file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Window size (e.g. `1440x900`). Also selects the device tier unless
    /// `--tier` overrides it.
    #[arg(long, value_name = "WIDTHxHEIGHT", default_value = "1440x900")]
    pub size: String,

    /// Force a device tier: `mobile`, `tablet`, or `desktop`.
    #[arg(long, value_name = "TIER", value_parser = parse_tier)]
    pub tier: Option<DeviceTier>,

    /// Collapse the pose easing and intro into instant transitions.
    #[arg(long)]
    pub reduced_motion: bool,

    /// Override the virtual document height in pixels.
    #[arg(long, value_name = "PIXELS")]
    pub doc_height: Option<f64>,
}

fn parse_tier(value: &str) -> Result<DeviceTier, String> {
    match value.to_ascii_lowercase().as_str() {
        "mobile" => Ok(DeviceTier::Mobile),
        "tablet" => Ok(DeviceTier::Tablet),
        "desktop" => Ok(DeviceTier::Desktop),
        other => Err(format!(
            "unknown tier '{other}'; expected mobile, tablet, or desktop"
        )),
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_parses_case_insensitively() {
        assert_eq!(parse_tier("Desktop"), Ok(DeviceTier::Desktop));
        assert_eq!(parse_tier("MOBILE"), Ok(DeviceTier::Mobile));
        assert!(parse_tier("phablet").is_err());
    }

    #[test]
    fn defaults_resolve() {
        let args = Args::parse_from(["scrollstage"]);
        assert_eq!(args.size, "1440x900");
        assert!(args.config.is_none());
        assert!(!args.reduced_motion);
    }
}
