use std::fs;
use std::path::PathBuf;

use clap::Parser;
use dockgrid_panel_gen::{debug_write_requested, generate_module, write_debug_copy};
use dockgrid_panel_scanner::{packages_dir, scan_packages};

#[derive(Parser, Debug)]
#[command(name = "dockgrid-panel-gen")]
struct Args {
    /// Application root holding the `packages` installation directory
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Write the generated module here instead of stdout
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let packages = scan_packages(&packages_dir(&args.root));
    let code = generate_module(&packages);
    if debug_write_requested() {
        write_debug_copy(&args.root, &code)?;
    }
    match args.out {
        Some(path) => fs::write(path, code)?,
        None => print!("{code}"),
    }
    Ok(())
}
