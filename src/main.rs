use anyhow::Context;
use argh::FromArgs;
use boxnms_core::DetectionSet;
use boxnms_suppress::{SuppressionConfig, SuppressionEngine, SuppressionMode};
use log::debug;
use std::path::PathBuf;

mod render;
mod report;

#[derive(FromArgs)]
/// Filter raw detector output with greedy non-maximum suppression
struct Args {
    /// path to a JSON file of raw detections (built-in sample if omitted)
    #[argh(option, short = 'i')]
    input: Option<PathBuf>,

    /// iou above which a lower-confidence detection is dropped
    #[argh(option, short = 't')]
    iou_threshold: Option<f32>,

    /// path to a JSON suppression config
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// suppress across labels instead of within each label
    #[argh(switch)]
    class_agnostic: bool,

    /// reject thresholds outside [0, 1]
    #[argh(switch)]
    strict: bool,

    /// write the kept detections to this JSON file
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,

    /// draw the kept detections into this PNG file
    #[argh(option)]
    render: Option<PathBuf>,
}

impl Args {
    /// File config first, then command line overrides
    fn suppression_config(&self) -> anyhow::Result<SuppressionConfig> {
        let mut config = match &self.config {
            Some(path) => SuppressionConfig::load_json(path)?,
            None => SuppressionConfig::default(),
        };

        if let Some(threshold) = self.iou_threshold {
            config.iou_threshold = threshold;
        }
        if self.class_agnostic {
            config.mode = SuppressionMode::ClassAgnostic;
        }
        if self.strict {
            config.strict_threshold = true;
        }

        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Args = argh::from_env();

    let config = args.suppression_config()?;
    let engine = SuppressionEngine::new(config).context("Invalid suppression settings")?;

    let raw = match &args.input {
        Some(path) => DetectionSet::load_json(path)?,
        None => report::sample_detections(),
    };
    debug!("Loaded {} raw detections", raw.len());

    let outcome = engine.run(raw.as_slice());
    print!("{}", report::format_report(&outcome));

    if let Some(path) = &args.output {
        outcome.kept.save_json(path)?;
        println!("Kept detections saved: {:?}", path);
    }

    if let Some(path) = &args.render {
        render::save_png(&outcome.kept, path)?;
        println!("Visualization saved: {:?}", path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::from_args(&["boxnms"], args).unwrap()
    }

    #[test]
    fn test_defaults_without_config() -> anyhow::Result<()> {
        let config = parse(&[]).suppression_config()?;
        assert_eq!(config, SuppressionConfig::default());
        Ok(())
    }

    #[test]
    fn test_flags_override_config_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nms.json");
        std::fs::write(
            &path,
            r#"{"iou_threshold":0.3,"mode":"class_aware","strict_threshold":false,"min_confidence":0.2}"#,
        )?;
        let path = path.to_string_lossy().into_owned();

        let from_file = parse(&["--config", &path]).suppression_config()?;
        assert_eq!(from_file.iou_threshold, 0.3);
        assert_eq!(from_file.mode, SuppressionMode::ClassAware);

        let config = parse(&["--config", &path, "-t", "0.6", "--class-agnostic", "--strict"])
            .suppression_config()?;
        assert_eq!(config.iou_threshold, 0.6);
        assert_eq!(config.mode, SuppressionMode::ClassAgnostic);
        assert!(config.strict_threshold);
        assert_eq!(config.min_confidence, Some(0.2));
        Ok(())
    }

    #[test]
    fn test_strict_flag_rejects_out_of_range_threshold() -> anyhow::Result<()> {
        let lenient = parse(&["--iou-threshold", "1.5"]).suppression_config()?;
        assert!(SuppressionEngine::new(lenient).is_ok());

        let strict = parse(&["--iou-threshold", "1.5", "--strict"]).suppression_config()?;
        assert!(SuppressionEngine::new(strict).is_err());
        Ok(())
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let args = parse(&["--config", &path.to_string_lossy()]);
        assert!(args.suppression_config().is_err());
    }
}
