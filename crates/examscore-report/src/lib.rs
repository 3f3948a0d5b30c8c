//! examscore-report — HTML rendering of exam attempts and result listings.

pub mod html;

pub use html::{write_attempt_html, write_results_html};
