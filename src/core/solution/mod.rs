//! Model answer post-processing.
//!
//! - [`split`] pulls a title and a solution out of a free-text image answer using the
//!   `Title:` / `Solution:` markers the image prompt asks for.
//! - [`flatten`] turns light markdown (emphasis, bullets, blank lines) into plain
//!   paragraphs for the terminal and for speech.
//!
//! Both are total: malformed input never errors, missing markers fall back to fixed text.

mod flatten;
mod split;

pub use flatten::{flatten, paragraphs};
pub use split::{FALLBACK_SOLUTION, FALLBACK_TITLE, ParsedSolution, split};
