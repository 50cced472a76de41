//! Print the static routes of the site

use anyhow::Result;

use crate::content::Kind;
use crate::routes::static_routes;
use crate::Site;

/// Print one route per line
pub fn run(site: &Site, kind: Option<Kind>) -> Result<()> {
    let library = site.load()?;
    for route in static_routes(&library, kind) {
        println!("{}", route);
    }
    Ok(())
}
