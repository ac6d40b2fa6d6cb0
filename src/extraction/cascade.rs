// src/extraction/cascade.rs
//! Ordered lookup strategies with first-match-wins evaluation.
//!
//! Tables are plain data (`StrategySpec`), compiled once into a [`Cascade`].
//! Adding a site-specific rule means adding a row, not a branch.

use regex::Regex;
use scraper::Selector;
use tracing::{debug, warn};

use super::document::ParsedDocument;

/// One row of a lookup table.
#[derive(Debug, Clone, Copy)]
pub enum StrategySpec {
    /// CSS query; the first matching node's text is the candidate.
    Selector(&'static str),
    /// Regex over the visible text; `group` selects the capture (0 = whole match).
    Pattern { regex: &'static str, group: usize },
}

#[derive(Debug)]
pub enum Strategy {
    Selector(Selector),
    Pattern(Regex, usize),
}

/// A compiled, ordered list of strategies.
#[derive(Debug)]
pub struct Cascade {
    name: &'static str,
    strategies: Vec<Strategy>,
}

impl Cascade {
    /// Compile a table. Rows that fail to compile are logged and dropped.
    pub fn compile(name: &'static str, specs: &[StrategySpec]) -> Self {
        let strategies = specs
            .iter()
            .filter_map(|spec| match spec {
                StrategySpec::Selector(css) => match Selector::parse(css) {
                    Ok(selector) => Some(Strategy::Selector(selector)),
                    Err(e) => {
                        warn!("Dropping invalid selector {:?} from {}: {}", css, name, e);
                        None
                    }
                },
                StrategySpec::Pattern { regex, group } => match Regex::new(regex) {
                    Ok(re) => Some(Strategy::Pattern(re, *group)),
                    Err(e) => {
                        warn!("Dropping invalid pattern {:?} from {}: {}", regex, name, e);
                        None
                    }
                },
            })
            .collect();

        Self { name, strategies }
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// First candidate accepted by `accept`.
    ///
    /// Selector rows look only at the first node each query matches, like a
    /// `querySelector` call. Pattern rows look at the first regex match in
    /// the document's visible text.
    pub fn first_match<F>(&self, document: &ParsedDocument, accept: F) -> Option<String>
    where
        F: Fn(&str) -> bool,
    {
        for strategy in &self.strategies {
            let candidate = match strategy {
                Strategy::Selector(selector) => document
                    .select_first(selector)
                    .map(|element| ParsedDocument::element_text(element, " ")),
                Strategy::Pattern(re, group) => re
                    .captures(document.visible_text())
                    .and_then(|caps| caps.get(*group))
                    .map(|m| m.as_str().trim().to_string()),
            };

            match candidate {
                Some(candidate) if accept(&candidate) => {
                    debug!("{} matched via {}", self.name, strategy.describe());
                    return Some(candidate);
                }
                _ => {}
            }
        }

        None
    }

    /// First non-empty candidate.
    pub fn first_text(&self, document: &ParsedDocument) -> Option<String> {
        self.first_match(document, |text| !text.is_empty())
    }
}

impl Strategy {
    fn describe(&self) -> String {
        match self {
            Strategy::Selector(selector) => format!("selector {:?}", selector),
            Strategy::Pattern(re, _) => format!("pattern /{}/", re.as_str()),
        }
    }
}
