use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;

type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Decides which unknown tags are native custom elements rather than
/// components. JSON configs supply regex patterns; Rust callers may inject a
/// predicate as well.
#[derive(Clone, Default)]
pub struct CustomElementFilter {
    patterns: Vec<Regex>,
    predicate: Option<Predicate>,
}

impl CustomElementFilter {
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                Regex::new(p.as_ref()).map_err(|source| ConfigError::Pattern {
                    pattern: p.as_ref().to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            patterns,
            predicate: None,
        })
    }

    pub fn matches(&self, tag: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(tag))
            || self.predicate.as_ref().is_some_and(|f| f(tag))
    }
}

impl fmt::Debug for CustomElementFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomElementFilter")
            .field(
                "patterns",
                &self.patterns.iter().map(Regex::as_str).collect::<Vec<_>>(),
            )
            .field("predicate", &self.predicate.is_some())
            .finish()
    }
}

impl<'de> Deserialize<'de> for CustomElementFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let patterns = Vec::<String>::deserialize(deserializer)?;
        Self::from_patterns(patterns).map_err(serde::de::Error::custom)
    }
}

/// Plugin options, read from the camelCase JSON the host passes in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Expand `on={{...}}` / `nativeOn={{...}}` maps through the runtime
    /// `transformOn` helper.
    pub transform_on: bool,
    /// Combine prop fragments with the runtime `mergeProps` helper. When off,
    /// fragments are spread into a single object literal.
    pub merge_props: bool,
    /// Let a single object-literal or identifier child act as a slots object.
    pub enable_object_slots: bool,
    /// Name called instead of the imported `createVNode`.
    pub pragma: Option<String>,
    #[serde(rename = "customElementPatterns")]
    pub is_custom_element: CustomElementFilter,
    /// Module the runtime helpers are imported from.
    pub runtime_module: String,
    /// Module providing the default-exported `transformOn` helper.
    pub transform_on_module: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            transform_on: false,
            merge_props: true,
            enable_object_slots: true,
            pragma: None,
            is_custom_element: CustomElementFilter::default(),
            runtime_module: "vue".to_string(),
            transform_on_module: "@vue/babel-helper-vue-transform-on".to_string(),
        }
    }
}

impl Options {
    pub fn from_json(config: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(config)?)
    }

    /// Adds a predicate consulted alongside any configured patterns.
    pub fn with_custom_element<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.is_custom_element.predicate = Some(Arc::new(predicate));
        self
    }
}
