//! One pass over a document: every declaration is offered to every rewrite.

use core::fmt;

use css_tree::Document;
use log::{debug, error, warn};

use crate::breakpoints::Breakpoints;
use crate::config::Config;
use crate::error::{ConfigError, Rejection};
use crate::transform::{Outcome, Transform};

/// A recoverable problem found during a pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    /// 1-based source line of the offending declaration, when it came from parsed text.
    pub line: Option<u32>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(out, "line {line}: {}", self.message),
            None => out.write_str(&self.message),
        }
    }
}

/// What a pass did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// Declarations rewritten successfully.
    pub rewritten: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// The typography rewriter, bound to a validated breakpoint table.
#[derive(Clone, Debug)]
pub struct Engine {
    breakpoints: Breakpoints,
}

impl Engine {
    /// Validate `config` up front so a bad table never touches a document.
    ///
    /// # Errors
    /// Returns the `ConfigError` raised by [`Breakpoints::build`].
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::from_breakpoints(Breakpoints::build(config)?))
    }

    pub const fn from_breakpoints(breakpoints: Breakpoints) -> Self {
        Self { breakpoints }
    }

    pub const fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    /// Rewrite `doc` in place, visiting declarations in document order.
    ///
    /// Never fails: a declaration that cannot be rewritten takes its enclosing subtree
    /// with it and leaves a [`Diagnostic`] in the report.
    pub fn run(&self, doc: &mut Document) -> Report {
        let mut report = Report::default();
        for declaration in doc.declarations() {
            // Earlier rejections may have removed this declaration's ancestors.
            if !doc.is_attached(declaration) {
                continue;
            }
            let line = doc.line(declaration);
            for transform in Transform::ALL {
                match transform.run(doc, declaration, &self.breakpoints) {
                    Outcome::NotApplicable => {}
                    Outcome::Applied => {
                        report.rewritten += 1;
                        break;
                    }
                    Outcome::Rejected(rejection) => {
                        debug!("{} rewrite rejected a declaration", transform.name());
                        report.diagnostics.push(recover(doc, rejection, line));
                        break;
                    }
                }
            }
        }
        report
    }
}

/// Excise the rejected subtree and turn the error into a diagnostic.
fn recover(doc: &mut Document, rejection: Rejection, line: Option<u32>) -> Diagnostic {
    let Rejection { excise, error: cause } = rejection;
    let line = line.or_else(|| excise.and_then(|node| doc.line(node)));
    if let Some(node) = excise {
        if let Err(err) = doc.remove(node) {
            error!("could not remove rejected subtree: {err}");
        }
    }
    let diagnostic = Diagnostic {
        message: cause.to_string(),
        line,
    };
    warn!("{diagnostic}");
    diagnostic
}

/// Build an [`Engine`] from `config` and run it once over `doc`.
///
/// # Errors
/// Returns a `ConfigError` before `doc` is touched when the configuration is invalid.
pub fn transform(doc: &mut Document, config: &Config) -> Result<Report, ConfigError> {
    Ok(Engine::new(config)?.run(doc))
}
