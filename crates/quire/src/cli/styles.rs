//! Terminal styles.
//!
//! Code refers to styles by what they mark (an index, a timestamp, a missing
//! attachment), never by color. `console` drops the escapes on its own when
//! stdout is not a terminal or `NO_COLOR` is set.

use console::Style;
use once_cell::sync::Lazy;

pub static INDEX: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static TITLE: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static TIME: Lazy<Style> = Lazy::new(|| Style::new().dim().italic());
pub static MUTED: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static ATTACHMENT: Lazy<Style> = Lazy::new(|| Style::new().cyan());
pub static MISSING: Lazy<Style> = Lazy::new(|| Style::new().red());

pub static SUCCESS: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static WARNING: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static ERROR: Lazy<Style> = Lazy::new(|| Style::new().red());
