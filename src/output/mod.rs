//! Output encoders.

mod html;

pub use html::{Fill, HtmlDocument, Section, SectionKind, Stroke};
