use super::EXIT_SUCCESS;
use clap::CommandFactory;
use std::path::Path;

fn write_page(cmd: clap::Command, dir: &Path, name: &str) -> Result<(), String> {
    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd)
        .render(&mut buf)
        .map_err(|e| format!("man page render failed for {name}: {e}"))?;
    let path = dir.join(format!("{name}.1"));
    std::fs::write(&path, &buf).map_err(|e| format!("failed to write {}: {e}", path.display()))
}

/// One page for `mtsp` plus one per subcommand (`mtsp-decode.1`, ...).
pub fn run<C: CommandFactory>(dir: &Path) -> Result<u8, String> {
    std::fs::create_dir_all(dir).map_err(|e| format!("failed to create dir: {e}"))?;
    let cmd = C::command();
    write_page(cmd.clone(), dir, crate::BIN_NAME)?;
    let mut pages = 1;
    for sub in cmd.get_subcommands() {
        let name = format!("{}-{}", crate::BIN_NAME, sub.get_name());
        write_page(sub.clone(), dir, &name)?;
        pages += 1;
    }
    println!("{pages} man pages written to {}", dir.display());
    Ok(EXIT_SUCCESS)
}
