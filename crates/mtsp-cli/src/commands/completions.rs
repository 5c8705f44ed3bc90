use super::EXIT_SUCCESS;
use clap::CommandFactory;
use clap_complete::Shell;
use std::path::Path;

/// Print completions to stdout, or write them into `dir` when given.
pub fn run<C: CommandFactory>(shell: Shell, dir: Option<&Path>) -> Result<u8, String> {
    let mut cmd = C::command();
    match dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|e| format!("failed to create dir: {e}"))?;
            let path = clap_complete::generate_to(shell, &mut cmd, crate::BIN_NAME, dir)
                .map_err(|e| format!("failed to write completions: {e}"))?;
            println!("{shell} completions written to {}", path.display());
        }
        None => {
            clap_complete::generate(shell, &mut cmd, crate::BIN_NAME, &mut std::io::stdout());
        }
    }
    Ok(EXIT_SUCCESS)
}
