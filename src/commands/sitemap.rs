//! Print the sitemap

use anyhow::Result;

use crate::generator::{sitemap, Generator};
use crate::helpers::{date_xml, now_in};
use crate::Site;

/// Print sitemap entries, or the XML document with `xml`
pub fn run(site: &Site, xml: bool) -> Result<()> {
    let library = site.load()?;
    let entries = Generator::new(site).sitemap_entries(&library, now_in(&site.config.timezone));

    if xml {
        print!("{}", sitemap::to_xml(&entries));
    } else {
        for entry in &entries {
            println!("{}\t{}", entry.url, date_xml(&entry.last_modified));
        }
    }
    Ok(())
}
