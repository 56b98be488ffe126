//! Build-time discovery of installed packages that declare Dockgrid panels.

mod manifest;
mod scan;

pub use manifest::*;
pub use scan::*;
