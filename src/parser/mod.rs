//! Page text parsing: PDF link extraction and order-preserving dedup.
//!
//! # Example
//!
//! ```
//! use pdf_scraper::parser::{LinkSet, extract_pdf_links};
//!
//! let links: LinkSet = extract_pdf_links(r#"
//! <li><a href="https://ex.com/sds/Omo.pdf">Omo</a></li>
//! <li><a href="https://ex.com/sds/Handy%20Andy.pdf?dl=1">Handy Andy</a></li>
//! <li><a href="https://ex.com/sds/Omo.pdf">Omo (again)</a></li>
//! "#);
//! assert_eq!(links.len(), 2);
//! ```

mod link_set;
mod pdf_links;

pub use link_set::{LinkSet, dedupe_preserving_order};
pub use pdf_links::extract_pdf_links;
