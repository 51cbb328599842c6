//! Data types describing charts and export runs.

use std::collections::BTreeSet;
use std::path::PathBuf;

/// Information about a chart layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerInfo {
    /// S-57 object class acronym (e.g. `SOUNDG`)
    pub name: String,
    /// Number of features reported by the driver
    pub feature_count: u64,
    /// EPSG code of the layer's reference system, if known
    pub epsg: Option<i32>,
}

/// Selects which layers are exported.
///
/// Exclusion wins over inclusion. Without an include list every layer is a candidate.
///
/// ```
/// use s57tiler_core::types::LayerFilter;
///
/// let filter = LayerFilter::new(Some(vec!["SOUNDG", "DEPARE"]), Some(vec!["DEPARE"]));
/// assert!(filter.accepts("SOUNDG"));
/// assert!(!filter.accepts("DEPARE"));
/// assert!(!filter.accepts("LIGHTS"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerFilter {
    include: Option<BTreeSet<String>>,
    exclude: Option<BTreeSet<String>>,
}

impl LayerFilter {
    /// Builds a filter from optional include and exclude lists.
    pub fn new<S: Into<String>>(include: Option<Vec<S>>, exclude: Option<Vec<S>>) -> Self {
        let to_set = |names: Vec<S>| names.into_iter().map(Into::into).collect::<BTreeSet<_>>();
        Self {
            include: include.map(to_set),
            exclude: exclude.map(to_set),
        }
    }

    /// Returns the reason a layer is rejected, or `None` when it is accepted.
    #[must_use]
    pub fn rejection(&self, name: &str) -> Option<SkipReason> {
        if self.exclude.as_ref().is_some_and(|ex| ex.contains(name)) {
            return Some(SkipReason::Excluded);
        }
        if self.include.as_ref().is_some_and(|inc| !inc.contains(name)) {
            return Some(SkipReason::NotIncluded);
        }
        None
    }

    /// Returns `true` if the layer should be exported.
    #[must_use]
    pub fn accepts(&self, name: &str) -> bool {
        self.rejection(name).is_none()
    }
}

/// Options controlling a GeoJSON export.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Pretty print the written GeoJSON
    pub pretty: bool,
    /// Layer selection
    pub filter: LayerFilter,
}

/// Why a layer produced no output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Named in the exclude list
    Excluded,
    /// Missing from the include list
    NotIncluded,
    /// No feature with a geometry
    Empty,
    /// Conversion failed
    Failed(String),
}

impl SkipReason {
    /// Short description for display.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            SkipReason::Excluded => "excluded",
            SkipReason::NotIncluded => "not included",
            SkipReason::Empty => "no features",
            SkipReason::Failed(message) => message,
        }
    }
}

/// A layer written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLayer {
    /// Layer name
    pub name: String,
    /// Path of the written GeoJSON file
    pub path: PathBuf,
    /// Number of features written
    pub feature_count: usize,
}

/// Result of an export run.
#[derive(Debug, Clone, Default)]
pub struct RenderSummary {
    /// Absolute output directory
    pub out_dir: PathBuf,
    /// Written layers in chart order
    pub rendered: Vec<RenderedLayer>,
    /// Layers without output, with the reason
    pub skipped: Vec<(String, SkipReason)>,
}

impl RenderSummary {
    /// Paths of all written GeoJSON files.
    #[must_use]
    pub fn files(&self) -> Vec<PathBuf> {
        self.rendered.iter().map(|layer| layer.path.clone()).collect()
    }
}
