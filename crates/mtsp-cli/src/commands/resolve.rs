use super::{json_pretty, parse_locator, EXIT_SUCCESS};
use mtsp_schema::derive_manifest_locator;

pub fn run(input: &str, json: bool) -> Result<u8, String> {
    let locator = parse_locator(input)?;
    let manifest = derive_manifest_locator(&locator)
        .ok_or_else(|| format!("no manifest locator can be derived from {locator}"))?;
    if json {
        println!(
            "{}",
            json_pretty(&serde_json::json!({
                "requested": locator.as_str(),
                "manifest": manifest.as_str(),
            }))?
        );
    } else {
        println!("{manifest}");
    }
    Ok(EXIT_SUCCESS)
}
