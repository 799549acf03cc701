//! Color resolution collaborator interface

use crate::{colors, ScaleType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Caller-supplied color override for one domain entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomColor {
    pub name: String,
    pub value: String,
}

impl CustomColor {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Resolved label -> color lookup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorMap {
    colors: HashMap<String, String>,
    fallback: String,
}

impl ColorMap {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            colors: HashMap::new(),
            fallback: fallback.into(),
        }
    }

    pub fn insert(&mut self, label: impl Into<String>, color: impl Into<String>) {
        self.colors.insert(label.into(), color.into());
    }

    pub fn get(&self, label: &str) -> &str {
        self.colors.get(label).map_or(self.fallback.as_str(), String::as_str)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Strategy trait for color assignment: `(domain, scale type, overrides) -> (label -> color)`
pub trait ColorResolver: Send + Sync {
    fn resolve(&self, domain: &[String], scale_type: ScaleType, custom: &[CustomColor]) -> ColorMap;
}

/// Cycles through a categorical scheme in domain order
#[derive(Debug, Clone)]
pub struct OrdinalPalette {
    pub scheme: &'static [&'static str],
}

impl OrdinalPalette {
    pub fn new(scheme: &'static [&'static str]) -> Self {
        Self { scheme }
    }

    pub fn named(name: &str) -> Self {
        Self::new(colors::scheme(name))
    }
}

impl Default for OrdinalPalette {
    fn default() -> Self {
        Self::new(colors::VIVID)
    }
}

impl ColorResolver for OrdinalPalette {
    fn resolve(
        &self,
        domain: &[String],
        scale_type: ScaleType,
        custom: &[CustomColor],
    ) -> ColorMap {
        let fallback = self.scheme.first().copied().unwrap_or(colors::NEUTRAL);
        let mut map = ColorMap::new(fallback);

        if self.scheme.is_empty() {
            return map;
        }

        for (i, label) in domain.iter().enumerate() {
            let color = match scale_type {
                // Continuous domains spread the scheme across the whole domain
                ScaleType::Linear | ScaleType::Time if domain.len() > 1 => {
                    let t = i as f64 / (domain.len() - 1) as f64;
                    self.scheme[(t * (self.scheme.len() - 1) as f64).round() as usize]
                }
                _ => self.scheme[i % self.scheme.len()],
            };
            map.insert(label.clone(), color);
        }

        for c in custom {
            map.insert(c.name.clone(), c.value.clone());
        }

        map
    }
}
