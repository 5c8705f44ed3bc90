use super::{
    json_pretty, load_fetch_config, parse_locator, print_container, spin_fail, spin_ok, spinner,
    ContainerReport, EXIT_SUCCESS,
};
use mtsp_core::Decoder;
use mtsp_remote::SchemeFetcher;
use mtsp_schema::derive_manifest_locator;
use std::path::Path;

pub fn run(input: &str, config: Option<&Path>, json: bool) -> Result<u8, String> {
    let locator = parse_locator(input)?;
    let fetch_config = load_fetch_config(config)?;
    let decoder = Decoder::new(SchemeFetcher::new(fetch_config));

    let pb = (!json).then(|| spinner(&format!("decoding {locator}")));
    let result = decoder.decode(&locator);
    let container = match result {
        Ok(c) => {
            if let Some(ref pb) = pb {
                spin_ok(pb, &format!("decoded {}", c.name()));
            }
            c
        }
        Err(e) => {
            if let Some(ref pb) = pb {
                spin_fail(pb, "decode failed");
            }
            return Err(e.to_string());
        }
    };

    // decode() succeeded, so the manifest locator is derivable.
    let manifest = derive_manifest_locator(&locator).unwrap_or_else(|| locator.clone());
    let report = ContainerReport::new(&manifest, &container);
    if json {
        println!("{}", json_pretty(&report)?);
    } else {
        print_container(&report);
    }
    Ok(EXIT_SUCCESS)
}
