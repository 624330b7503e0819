//! Report rendering for analysis results.
//!
//! Pure formatting over the structured [`Analysis`](crate::Analysis)
//! bundle: a colored terminal summary, a self-contained HTML report and
//! JSON export. No computation happens here.

mod html;
mod json;
mod terminal;

pub use html::render_html;
pub use json::{to_json, to_json_pretty};
pub use terminal::format_analysis;
