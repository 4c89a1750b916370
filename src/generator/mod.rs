//! HTML to raw Markdown. Rendering of individual tags is delegated to
//! `html2md`; [`rules`] overrides the tags whose output is configurable.

pub mod html2md;
pub mod rules;
