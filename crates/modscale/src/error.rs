//! Error kinds of the typography pass.
//!
//! `ConfigError` is fatal and surfaces before the document is touched. Everything a
//! single declaration can get wrong is a [`TransformError`] wrapped in a [`Rejection`],
//! which tells the pipeline which subtree to excise before it moves on.

use std::io;
use std::path::PathBuf;

use css_tree::{NodeId, TreeError};
use thiserror::Error;

/// Malformed breakpoint configuration. Aborts the pass before any mutation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no base breakpoint configured; one breakpoint needs a zero width such as \"0px\"")]
    MissingBaseBreakpoint,

    #[error("breakpoints `{first}` and `{second}` both claim the zero width")]
    MultipleBaseBreakpoints { first: String, second: String },

    #[error("breakpoint name `{0}` is configured more than once")]
    DuplicateName(String),

    #[error("`{0}` is not a valid breakpoint name; use letters, digits, `-` or `_`")]
    InvalidName(String),

    #[error("breakpoint `{name}` has an invalid width `{value}`")]
    InvalidWidth { name: String, value: String },

    #[error("breakpoint `{name}` needs a positive root font size, got {root}")]
    InvalidRoot { name: String, root: f64 },

    #[error("the modular scale ratio must be greater than 1, got {0}")]
    InvalidRatio(f64),

    #[error("the document font size must be positive, got {0}")]
    InvalidDocumentFontSize(f64),

    #[error("failed to read configuration from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to turn a scale exponent into a length.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("`{0}` is not a number")]
    NotNumeric(String),

    #[error("`{0}` is not a configured breakpoint")]
    UnknownBreakpoint(String),

    #[error("scale step `{0}` is too large to express as a rem length")]
    OutOfRange(String),
}

/// Recoverable problem with one authored declaration.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("`{param}` is not a configured breakpoint; use one of {valid} to convert ms to rem")]
    InvalidBreakpointReference { param: String, valid: String },

    #[error("ms values inside @{at_rule} cannot be resolved; wrap them in @t-above, @t-below or @t-only")]
    UnsupportedContext { at_rule: String },

    #[error("`{argument}` is not a valid t-ms() argument; use a number, for example t-ms(3)")]
    InvalidScaleArgument { argument: String },

    #[error("t-ms() must sit directly inside a style rule, found it inside {context}")]
    StepOutsideRule { context: String },

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// A declaration that could not be rewritten, plus the subtree to drop because of it.
#[derive(Debug)]
pub struct Rejection {
    /// Node removed (with its subtree) by the pipeline; `None` leaves the tree alone.
    pub excise: Option<NodeId>,
    pub error: TransformError,
}

impl Rejection {
    pub fn excise(node: NodeId, error: impl Into<TransformError>) -> Self {
        Self {
            excise: Some(node),
            error: error.into(),
        }
    }
}

impl From<TreeError> for Rejection {
    fn from(err: TreeError) -> Self {
        Self {
            excise: None,
            error: err.into(),
        }
    }
}

impl From<ConversionError> for Rejection {
    fn from(err: ConversionError) -> Self {
        Self {
            excise: None,
            error: err.into(),
        }
    }
}
