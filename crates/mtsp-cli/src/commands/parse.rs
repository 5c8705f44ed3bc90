use super::{json_pretty, parse_locator, print_container, ContainerReport, EXIT_SUCCESS};
use mtsp_schema::{derive_manifest_locator, parse_manifest};
use std::path::Path;
use url::Url;

/// Parse a manifest file on disk. Relative paths resolve against `base`
/// when given, otherwise against the file's own location.
pub fn run(file: &Path, base: Option<&str>, json: bool) -> Result<u8, String> {
    let manifest = match base {
        Some(b) => {
            let locator = parse_locator(b)?;
            derive_manifest_locator(&locator)
                .ok_or_else(|| format!("no manifest locator can be derived from {locator}"))?
        }
        None => {
            let absolute = std::fs::canonicalize(file)
                .map_err(|e| format!("failed to read manifest {}: {e}", file.display()))?;
            Url::from_file_path(&absolute)
                .map_err(|()| format!("cannot express {} as a locator", absolute.display()))?
        }
    };

    let bytes = std::fs::read(file)
        .map_err(|e| format!("failed to read manifest {}: {e}", file.display()))?;
    tracing::debug!("parsing {} as {manifest}", file.display());
    let container = parse_manifest(&bytes, &manifest).map_err(|e| format!("manifest error: {e}"))?;

    let report = ContainerReport::new(&manifest, &container);
    if json {
        println!("{}", json_pretty(&report)?);
    } else {
        print_container(&report);
    }
    Ok(EXIT_SUCCESS)
}
