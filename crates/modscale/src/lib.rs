//! Responsive modular-scale typography for stylesheets.
//!
//! Authors write font sizes as scale steps, either as a unit (`font-size: 2ms`) or as a
//! function (`font-size: t-ms(2)`), optionally inside `@t-above`, `@t-below` or
//! `@t-only` blocks that name a breakpoint. [`Engine::run`] rewrites a parsed
//! [`css_tree::Document`] into plain CSS: `rem` values, `@media (min-width: ...)` blocks
//! per configured breakpoint, and for `:root` a percentage base size plus one custom
//! property per breakpoint.
//!
//! ```
//! use css_tree::{Document, NodeKind};
//! use modscale::{Config, Engine};
//!
//! let mut doc = Document::new();
//! let rule = doc.append_new(doc.root(), NodeKind::rule("h1")).unwrap();
//! doc.append_new(rule, NodeKind::declaration("font-size", "1ms")).unwrap();
//!
//! let report = Engine::new(&Config::default()).unwrap().run(&mut doc);
//! assert!(report.is_clean());
//! assert_eq!(doc.to_string(), "h1 {\n  font-size: 1.2rem;\n}\n");
//! ```

#![forbid(unsafe_code)]

pub mod breakpoints;
pub mod config;
pub mod context;
pub mod error;
pub mod factory;
pub mod pipeline;
pub mod scale;
pub mod transform;

pub use breakpoints::{Breakpoint, Breakpoints};
pub use config::{BreakpointConfig, Config};
pub use context::{Context, ResponsiveKind};
pub use error::{ConfigError, ConversionError, Rejection, TransformError};
pub use pipeline::{Diagnostic, Engine, Report, transform};
pub use scale::{REM_PRECISION, ScaleLaw, ms_to_rem, step_to_rem};
