/// Native scenario replay entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(e) = run() {
        eprintln!("thumbnav-replay: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use clap::Parser;

    #[derive(Debug, Parser)]
    #[command(
        name = "thumbnav-replay",
        version,
        about = "Replay a gallery navigation scenario and print every transition"
    )]
    pub struct Cli {
        /// Configuration file (defaults to the user config directory).
        #[arg(long, value_name = "PATH")]
        pub config: Option<PathBuf>,

        /// Scenario document describing images, variants and input steps.
        #[arg(value_name = "SCENARIO")]
        pub scenario: PathBuf,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    use clap::Parser;

    use thumbnav::GalleryConfig;
    use thumbnav::replay::{Scenario, replay};

    let cli = cli::Cli::parse();
    let scenario_path = cli.scenario;

    let config = match cli.config {
        Some(path) => GalleryConfig::load_from_path(&path)?,
        None => GalleryConfig::load_from_default_path().unwrap_or_default(),
    };

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    let scenario = Scenario::from_json(&std::fs::read_to_string(&scenario_path)?)?;
    log::info!(
        "Replaying {:?}: {} images, {} steps",
        scenario_path,
        scenario.images.len(),
        scenario.steps.len()
    );

    let summary = replay(&scenario, &config)?;
    for event in &summary.transitions {
        println!(
            "{} -> {} (media {})",
            event.previous_index, event.current_index, event.current_image
        );
    }
    println!(
        "final index {}, active {:?}, {} scroll requests, {} unmatched variant events",
        summary.final_index,
        summary.final_active,
        summary.scroll_requests.len(),
        summary.unmatched_variants
    );
    Ok(())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::cli::Cli;

    #[test]
    fn test_scenario_with_config() {
        let cli = Cli::try_parse_from([
            "thumbnav-replay",
            "--config",
            "gallery.json",
            "steps.json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("gallery.json")));
        assert_eq!(cli.scenario, PathBuf::from("steps.json"));
    }

    #[test]
    fn test_scenario_is_required() {
        assert!(Cli::try_parse_from(["thumbnav-replay"]).is_err());
        assert!(Cli::try_parse_from(["thumbnav-replay", "--config"]).is_err());
    }

    #[test]
    fn test_rejects_extra_positionals() {
        assert!(Cli::try_parse_from(["thumbnav-replay", "a.json", "b.json"]).is_err());
    }
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
