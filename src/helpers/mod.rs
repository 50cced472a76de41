//! Helper functions shared by the loader, generator and commands

pub mod date;
pub mod url;

pub use self::date::{date_xml, format_date, now_in, parse_date_string};
pub use self::url::{encode_path, encode_url, full_url, url_host};
