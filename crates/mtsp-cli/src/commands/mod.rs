pub mod completions;
pub mod decode;
pub mod man_pages;
pub mod parse;
pub mod resolve;

use indicatif::{ProgressBar, ProgressStyle};
use mtsp_remote::FetchConfig;
use mtsp_schema::Container;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_MANIFEST_ERROR: u8 = 2;
pub const EXIT_FETCH_ERROR: u8 = 3;

/// JSON shape of a decoded container, with the manifest it came from.
#[derive(Debug, Serialize)]
pub struct ContainerReport<'a> {
    pub manifest: &'a str,
    pub name: &'a str,
    pub preview_image: &'a str,
    pub scene: &'a str,
    pub navigation: BTreeMap<&'a str, &'a str>,
}

impl<'a> ContainerReport<'a> {
    pub fn new(manifest: &'a Url, container: &'a Container) -> Self {
        Self {
            manifest: manifest.as_str(),
            name: container.name(),
            preview_image: container.preview_image().as_str(),
            scene: container.scene().as_str(),
            navigation: container
                .navigation()
                .iter()
                .map(|(label, target)| (label.as_str(), target.as_str()))
                .collect(),
        }
    }
}

pub fn json_pretty(value: &impl Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}

pub fn parse_locator(input: &str) -> Result<Url, String> {
    Url::parse(input).map_err(|e| format!("invalid locator '{input}': {e}"))
}

/// Explicit `--config` must exist; otherwise fall back to defaults when
/// `~/.config/mtsp/fetch.json` is absent.
pub fn load_fetch_config(path: Option<&Path>) -> Result<FetchConfig, String> {
    match path {
        Some(p) => FetchConfig::load(p)
            .map_err(|e| format!("failed to load config {}: {e}", p.display())),
        None => FetchConfig::load_default_or_builtin()
            .map_err(|e| format!("failed to load default config: {e}")),
    }
}

pub fn print_container(report: &ContainerReport<'_>) {
    use console::Style;
    let label = Style::new().cyan();
    println!("name:        {}", Style::new().bold().apply_to(report.name));
    println!("manifest:    {}", report.manifest);
    println!("preview:     {}", report.preview_image);
    println!("scene:       {}", report.scene);
    if report.navigation.is_empty() {
        println!("navigation:  (none)");
    } else {
        println!("navigation:");
        for (name, target) in &report.navigation {
            println!("  {} -> {target}", label.apply_to(name));
        }
    }
}

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .expect("valid template")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(msg.to_owned());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn spin_ok(pb: &ProgressBar, msg: &str) {
    pb.set_style(ProgressStyle::with_template("{msg}").expect("valid template"));
    pb.finish_with_message(format!("✓ {msg}"));
}

pub fn spin_fail(pb: &ProgressBar, msg: &str) {
    pb.set_style(ProgressStyle::with_template("{msg}").expect("valid template"));
    pb.finish_with_message(format!("✗ {msg}"));
}
