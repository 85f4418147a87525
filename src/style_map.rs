//! Word paragraph style → HTML mapping.
//!
//! Each recognised style either becomes a marker placeholder for the rebuild
//! passes, or a plain element with GCWeb classes that needs no further work.
//!
//! Extra entries can be given as strings:
//!
//! ```text
//! "WET Note"         = "marker:alert-info"
//! "WET Lead"         = "p.lead"
//! "WET Well"         = "div.well > p"
//! "WET Button Link"  = "a.btn.btn-link"
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::config::ConfigError;
use crate::marker::MarkerKind;

/// A tag with classes, optionally wrapped in another one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSpec {
    pub tag: String,
    pub classes: Vec<String>,
    pub wrapper: Option<Box<ElementSpec>>,
}

impl ElementSpec {
    pub fn new(tag: &str, classes: &[&str]) -> Self {
        Self {
            tag: tag.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            wrapper: None,
        }
    }

    pub fn wrapped_in(mut self, wrapper: ElementSpec) -> Self {
        self.wrapper = Some(Box::new(wrapper));
        self
    }

    /// Parse `tag.class.class` or `wrap.class > tag.class`.
    pub fn parse(expr: &str) -> Option<Self> {
        let mut parts = expr.split('>').map(str::trim);
        let first = parts.next()?;
        match (parts.next(), parts.next()) {
            (None, _) => Self::parse_simple(first),
            (Some(inner), None) => {
                let wrapper = Self::parse_simple(first)?;
                Some(Self::parse_simple(inner)?.wrapped_in(wrapper))
            }
            (Some(_), Some(_)) => None,
        }
    }

    fn parse_simple(expr: &str) -> Option<Self> {
        let mut pieces = expr.split('.');
        let tag = pieces.next()?.trim();
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        let classes: Vec<String> = pieces.map(|c| c.trim().to_string()).collect();
        if classes.iter().any(|c| c.is_empty()) {
            return None;
        }
        Some(Self {
            tag: tag.to_ascii_lowercase(),
            classes,
            wrapper: None,
        })
    }

    pub fn class_attr(&self) -> Option<String> {
        (!self.classes.is_empty()).then(|| self.classes.join(" "))
    }
}

impl fmt::Display for ElementSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(wrapper) = &self.wrapper {
            write!(f, "{wrapper} > ")?;
        }
        f.write_str(&self.tag)?;
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        Ok(())
    }
}

/// What a paragraph style turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleTarget {
    Marker(MarkerKind),
    Element(ElementSpec),
}

impl StyleTarget {
    /// Parse `marker:<kind>` or an element expression.
    pub fn parse(expr: &str) -> Option<Self> {
        let expr = expr.trim();
        match expr.strip_prefix("marker:") {
            Some(kind) => MarkerKind::parse(kind).map(StyleTarget::Marker),
            None => ElementSpec::parse(expr).map(StyleTarget::Element),
        }
    }
}

const MARKER_STYLES: &[(&str, MarkerKind)] = &[
    ("WET Alert Success", MarkerKind::AlertSuccess),
    ("WET Alert Info", MarkerKind::AlertInfo),
    ("WET Alert Warning", MarkerKind::AlertWarning),
    ("WET Alert Danger", MarkerKind::AlertDanger),
    ("WET Table Basic", MarkerKind::TableBasic),
    ("WET Table Striped", MarkerKind::TableStriped),
    ("WET Table Bordered", MarkerKind::TableBordered),
    ("WET Table Hover", MarkerKind::TableHover),
    ("WET Table Condensed", MarkerKind::TableCondensed),
    ("WET Table Responsive", MarkerKind::TableResponsive),
    ("WET List Inline", MarkerKind::ListInline),
    ("WET List Unstyled", MarkerKind::ListUnstyled),
    ("WET Details Summary", MarkerKind::DetailsSummary),
    ("WET Details Content", MarkerKind::DetailsContent),
    ("WET Accordion Start", MarkerKind::AccordionStart),
    ("WET Accordion Heading", MarkerKind::AccordionHeading),
    ("WET Accordion Panel", MarkerKind::AccordionPanel),
    ("WET Accordion End", MarkerKind::AccordionEnd),
    ("WET Pagination Start", MarkerKind::PaginationStart),
    ("WET Pagination Item", MarkerKind::PaginationItem),
    ("WET Pagination Active", MarkerKind::PaginationActive),
    ("WET Pagination Disabled", MarkerKind::PaginationDisabled),
    ("WET Pagination End", MarkerKind::PaginationEnd),
];

const ELEMENT_STYLES: &[(&str, &str)] = &[
    ("WET Lead", "p.lead"),
    ("WET Small", "p.small"),
    ("WET Muted", "p.text-muted"),
    ("WET Blockquote", "blockquote"),
    ("WET Well", "div.well > p"),
    ("WET Button Primary", "a.btn.btn-primary"),
    ("WET Button Default", "a.btn.btn-default"),
    ("WET Button Danger", "a.btn.btn-danger"),
    ("WET Button Link", "a.btn.btn-link"),
];

/// Style name lookup table handed to the converter.
#[derive(Debug, Clone)]
pub struct StyleMap {
    entries: HashMap<String, StyleTarget>,
}

#[derive(Debug, Deserialize)]
struct StyleMapFile {
    #[serde(default)]
    styles: HashMap<String, String>,
}

impl StyleMap {
    /// A map with no entries.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The GCWeb styles every template document defines.
    pub fn builtin() -> Self {
        let mut map = Self::empty();
        for &(name, kind) in MARKER_STYLES {
            map.insert(name, StyleTarget::Marker(kind));
        }
        for &(name, expr) in ELEMENT_STYLES {
            if let Some(spec) = ElementSpec::parse(expr) {
                map.insert(name, StyleTarget::Element(spec));
            }
        }
        map
    }

    pub fn insert(&mut self, style_name: &str, target: StyleTarget) {
        self.entries.insert(style_name.to_string(), target);
    }

    pub fn get(&self, style_name: &str) -> Option<&StyleTarget> {
        self.entries.get(style_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add or override entries from `(style name, expression)` pairs.
    pub fn extend_from_exprs<'a, I>(&mut self, pairs: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (name, expr) in pairs {
            let target = StyleTarget::parse(expr).ok_or_else(|| ConfigError::InvalidStyleTarget {
                style: name.clone(),
                target: expr.clone(),
            })?;
            self.insert(name, target);
        }
        Ok(())
    }

    /// Add or override entries from a TOML document with a `[styles]` table.
    pub fn extend_from_toml(&mut self, content: &str, origin: &Path) -> Result<(), ConfigError> {
        let file: StyleMapFile =
            toml::from_str(content).map_err(|source| ConfigError::ConfigParseError {
                config_path: origin.to_path_buf(),
                source,
            })?;
        self.extend_from_exprs(&file.styles)
    }

    /// The built-in map extended by a TOML style map file.
    pub fn load_with_overrides<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::ConfigReadError {
                config_path: path.to_path_buf(),
                source,
            })?;
        let mut map = Self::builtin();
        map.extend_from_toml(&content, path)?;
        Ok(map)
    }
}

impl Default for StyleMap {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_every_marker_kind_has_a_style() {
        let map = StyleMap::builtin();
        for kind in MarkerKind::ALL {
            assert!(
                MARKER_STYLES.iter().any(|&(_, k)| k == kind),
                "no style for {kind}"
            );
        }
        assert_eq!(map.len(), MARKER_STYLES.len() + ELEMENT_STYLES.len());
    }

    #[test]
    fn test_builtin_lookups() {
        let map = StyleMap::builtin();
        assert_eq!(
            map.get("WET Accordion Heading"),
            Some(&StyleTarget::Marker(MarkerKind::AccordionHeading))
        );
        assert_eq!(
            map.get("WET Well"),
            Some(&StyleTarget::Element(
                ElementSpec::new("p", &[]).wrapped_in(ElementSpec::new("div", &["well"]))
            ))
        );
        assert_eq!(map.get("Normal"), None);
    }

    #[test]
    fn test_element_expressions() {
        assert_eq!(
            ElementSpec::parse("a.btn.btn-primary"),
            Some(ElementSpec::new("a", &["btn", "btn-primary"]))
        );
        assert_eq!(ElementSpec::parse("Blockquote"), Some(ElementSpec::new("blockquote", &[])));
        assert_eq!(ElementSpec::parse("div.well > p").unwrap().to_string(), "div.well > p");
        assert_eq!(ElementSpec::parse("p..x"), None);
        assert_eq!(ElementSpec::parse("a > b > c"), None);
        assert_eq!(ElementSpec::parse(".lead"), None);
    }

    #[test]
    fn test_marker_expressions() {
        assert_eq!(
            StyleTarget::parse("marker:pagination-active"),
            Some(StyleTarget::Marker(MarkerKind::PaginationActive))
        );
        assert_eq!(StyleTarget::parse("marker:nope"), None);
    }

    #[test]
    fn test_toml_overrides() {
        let mut map = StyleMap::builtin();
        let toml = r#"
            [styles]
            "Custom Note" = "marker:alert-info"
            "WET Lead" = "p.lead.big"
        "#;
        map.extend_from_toml(toml, &PathBuf::from("styles.toml")).unwrap();

        assert_eq!(
            map.get("Custom Note"),
            Some(&StyleTarget::Marker(MarkerKind::AlertInfo))
        );
        assert_eq!(
            map.get("WET Lead"),
            Some(&StyleTarget::Element(ElementSpec::new("p", &["lead", "big"])))
        );
    }

    #[test]
    fn test_toml_bad_target_is_error() {
        let mut map = StyleMap::builtin();
        let err = map
            .extend_from_toml("[styles]\n\"X\" = \"marker:bogus\"\n", &PathBuf::from("s.toml"))
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidStyleTarget { ref style, .. } if style == "X"));
    }
}
