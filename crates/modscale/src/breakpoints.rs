//! Ordered breakpoint table built from [`Config`].

use css_values_units::{camelize, kebab_case, parse_length_str};

use crate::config::{BreakpointConfig, Config};
use crate::error::ConfigError;
use crate::scale::ScaleLaw;

/// A named viewport threshold and the root font size that applies from it upwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Breakpoint {
    pub name: String,
    /// Width exactly as configured, used verbatim in generated media queries.
    pub value: String,
    /// Root font size in pixels.
    pub root: f64,
    /// `value` resolved to pixels, used for ordering.
    pub width_px: f64,
}

impl Breakpoint {
    /// Whether this is the base (mobile-first) breakpoint.
    pub fn is_base(&self) -> bool {
        is_base_value(&self.value)
    }

    /// Name of the custom property generated for this breakpoint, e.g. `--large-tablet`.
    pub fn custom_property(&self) -> String {
        format!("--{}", kebab_case(&self.name))
    }
}

fn is_base_value(value: &str) -> bool {
    value.trim_start().starts_with('0')
}

/// Key used to compare breakpoint names: `large-tablet`, `largeTablet` and
/// `LargeTablet` all collapse to `largetablet`.
fn lookup_key(name: &str) -> String {
    camelize(name).to_ascii_lowercase()
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|letter| letter.is_ascii_alphanumeric() || letter == '-' || letter == '_')
}

/// Strip the wrapping parentheses of an at-rule parameter: `( tablet )` becomes `tablet`.
pub fn strip_parens(params: &str) -> &str {
    let trimmed = params.trim();
    trimmed
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .map_or(trimmed, str::trim)
}

/// The breakpoint table, ascending by width, with the base breakpoint first.
#[derive(Clone, Debug, PartialEq)]
pub struct Breakpoints {
    items: Vec<Breakpoint>,
    scale: ScaleLaw,
}

impl Breakpoints {
    /// Validate `config` and order its breakpoints.
    ///
    /// # Errors
    /// Returns a `ConfigError` when there is no base breakpoint (or more than one),
    /// when names repeat, or when a width, root size or scale parameter is invalid.
    pub fn build(config: &Config) -> Result<Self, ConfigError> {
        let scale = ScaleLaw::new(config.ratio, config.document_font_size)?;
        let mut items: Vec<Breakpoint> = Vec::with_capacity(config.breakpoints.len());
        let mut base_name: Option<&str> = None;

        for entry in &config.breakpoints {
            let breakpoint = resolve_entry(config, entry)?;
            let key = lookup_key(&breakpoint.name);
            if items.iter().any(|seen| lookup_key(&seen.name) == key) {
                return Err(ConfigError::DuplicateName(breakpoint.name));
            }
            if breakpoint.is_base() {
                if let Some(first) = base_name {
                    return Err(ConfigError::MultipleBaseBreakpoints {
                        first: first.to_owned(),
                        second: breakpoint.name,
                    });
                }
                base_name = Some(entry.name.as_str());
            }
            items.push(breakpoint);
        }

        if base_name.is_none() {
            return Err(ConfigError::MissingBaseBreakpoint);
        }
        items.sort_by(|left, right| left.width_px.total_cmp(&right.width_px));
        Ok(Self { items, scale })
    }

    pub const fn scale(&self) -> ScaleLaw {
        self.scale
    }

    /// All breakpoints, ascending by width.
    pub fn as_slice(&self) -> &[Breakpoint] {
        &self.items
    }

    /// The zero-width breakpoint.
    pub fn base(&self) -> &Breakpoint {
        // `build` guarantees a base entry with width zero; every other width is positive.
        &self.items[0]
    }

    /// Every breakpoint except the base one, ascending by width.
    pub fn responsive(&self) -> impl DoubleEndedIterator<Item = &Breakpoint> {
        self.items.iter().filter(|breakpoint| !breakpoint.is_base())
    }

    /// Find a breakpoint by name, ignoring case and dash/camel spelling.
    pub fn find(&self, name: &str) -> Option<&Breakpoint> {
        let key = lookup_key(name);
        self.items
            .iter()
            .find(|breakpoint| lookup_key(&breakpoint.name) == key)
    }

    /// Find the breakpoint an at-rule parameter such as `(large-tablet)` refers to.
    pub fn find_param(&self, params: &str) -> Option<&Breakpoint> {
        self.find(strip_parens(params))
    }

    /// Names in their authored (dashed) form, for diagnostics.
    pub fn display_names(&self) -> String {
        self.items
            .iter()
            .map(|breakpoint| kebab_case(&breakpoint.name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn resolve_entry(config: &Config, entry: &BreakpointConfig) -> Result<Breakpoint, ConfigError> {
    let name = entry.name.trim();
    if !is_valid_name(name) {
        return Err(ConfigError::InvalidName(entry.name.clone()));
    }
    let invalid_width = || ConfigError::InvalidWidth {
        name: name.to_owned(),
        value: entry.value.clone(),
    };
    let value = entry.value.trim();
    let width_px = parse_length_str(value)
        .map(|length| f64::from(length.to_px(config.document_font_size as f32)))
        .map_err(|_| invalid_width())?;
    // The base breakpoint is exactly zero wide; all others must be strictly wider.
    let width_ok = if is_base_value(value) {
        width_px == 0.0
    } else {
        width_px > 0.0
    };
    if !width_ok {
        return Err(invalid_width());
    }
    let root = config.root_of(entry);
    if !(root.is_finite() && root > 0.0) {
        return Err(ConfigError::InvalidRoot {
            name: name.to_owned(),
            root,
        });
    }
    Ok(Breakpoint {
        name: name.to_owned(),
        value: value.to_owned(),
        root,
        width_px,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(entries: &[(&str, &str, f64)]) -> Config {
        Config::with_breakpoints(
            entries
                .iter()
                .map(|(name, value, root)| BreakpointConfig::new(*name, *value, *root))
                .collect(),
        )
    }

    #[test]
    fn sorts_ascending_with_single_base() {
        let breakpoints = Breakpoints::build(&config(&[
            ("desktop", "1280px", 20.0),
            ("mobile", "0px", 16.0),
            ("tablet", "48em", 18.0),
        ]))
        .unwrap();
        let names: Vec<&str> = breakpoints
            .as_slice()
            .iter()
            .map(|breakpoint| breakpoint.name.as_str())
            .collect();
        assert_eq!(names, ["mobile", "tablet", "desktop"]);
        assert_eq!(
            breakpoints
                .as_slice()
                .iter()
                .filter(|breakpoint| breakpoint.is_base())
                .count(),
            1
        );
        assert_eq!(breakpoints.base().name, "mobile");
        assert!(breakpoints
            .as_slice()
            .windows(2)
            .all(|pair| pair[0].width_px <= pair[1].width_px));
    }

    #[test]
    fn responsive_skips_base_and_reverses() {
        let breakpoints = Breakpoints::build(&config(&[
            ("mobile", "0px", 16.0),
            ("small", "480px", 17.0),
            ("tablet", "768px", 18.0),
        ]))
        .unwrap();
        let descending: Vec<&str> = breakpoints
            .responsive()
            .rev()
            .map(|breakpoint| breakpoint.value.as_str())
            .collect();
        assert_eq!(descending, ["768px", "480px"]);
    }

    #[test]
    fn missing_base_is_rejected() {
        let err = Breakpoints::build(&config(&[("tablet", "768px", 18.0)])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingBaseBreakpoint));
        let err = Breakpoints::build(&config(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingBaseBreakpoint));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = Breakpoints::build(&config(&[
            ("mobile", "0px", 16.0),
            ("tablet", "768px", 18.0),
            ("Tablet", "900px", 19.0),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateName(name) if name == "Tablet"));
    }

    #[test]
    fn second_base_is_rejected() {
        let err = Breakpoints::build(&config(&[("mobile", "0px", 16.0), ("tiny", "0", 14.0)]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MultipleBaseBreakpoints { .. }));
    }

    #[test]
    fn invalid_entries_are_rejected() {
        let err = Breakpoints::build(&config(&[("mobile", "0px", 16.0), ("bad", "wide", 16.0)]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWidth { .. }));
        let err = Breakpoints::build(&config(&[("mobile", "0.5px", 16.0)])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWidth { .. }));
        let err = Breakpoints::build(&config(&[("mobile", "0px", 0.0)])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRoot { .. }));
        let err = Breakpoints::build(&config(&[("mo bile", "0px", 16.0)])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidName(_)));
    }

    #[test]
    fn params_resolve_case_insensitively() {
        let breakpoints = Breakpoints::build(&config(&[
            ("mobile", "0px", 16.0),
            ("largeTablet", "1024px", 18.0),
        ]))
        .unwrap();
        assert_eq!(
            breakpoints.find_param("(large-tablet)").map(|bp| bp.name.as_str()),
            Some("largeTablet")
        );
        assert!(breakpoints.find_param("( LARGETABLET )").is_some());
        assert!(breakpoints.find_param("(desktop)").is_none());
        assert_eq!(breakpoints.display_names(), "mobile, large-tablet");
        assert_eq!(
            breakpoints.find("largeTablet").map(Breakpoint::custom_property),
            Some("--large-tablet".to_owned())
        );
    }

    #[test]
    fn strip_parens_tolerates_bare_params() {
        assert_eq!(strip_parens("(tablet)"), "tablet");
        assert_eq!(strip_parens(" tablet "), "tablet");
        assert_eq!(strip_parens("( tablet )"), "tablet");
    }
}
