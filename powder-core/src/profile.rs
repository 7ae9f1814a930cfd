//! Priority profiles: per-attribute visitor weights in `[0.0, 1.0]`.
//!
//! Unlike a map, the profile remembers the order in which attributes were
//! first weighted; scoring walks the weights in that order.

use crate::ResortAttribute;

/// Visitor priorities across resort attributes.
///
/// # Examples
/// ```
/// use powder_core::{PriorityProfile, ResortAttribute};
///
/// let profile = PriorityProfile::new()
///     .with_weight(ResortAttribute::SnowReliability, 0.8)
///     .with_weight(ResortAttribute::ApresSki, 0.2);
/// assert_eq!(profile.weight(ResortAttribute::ApresSki), Some(0.2));
/// assert_eq!(profile.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriorityProfile {
    weights: Vec<(ResortAttribute, f64)>,
}

impl PriorityProfile {
    /// Construct an empty profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the weight for an attribute, if present.
    #[must_use]
    pub fn weight(&self, attribute: ResortAttribute) -> Option<f64> {
        self.weights
            .iter()
            .find(|(candidate, _)| *candidate == attribute)
            .map(|&(_, weight)| weight)
    }

    /// Insert or update an attribute weight.
    ///
    /// Values are clamped into `0.0..=1.0`; non-finite values become `0.0`.
    /// Updating an existing attribute keeps its position.
    ///
    /// # Examples
    /// ```
    /// use powder_core::{PriorityProfile, ResortAttribute};
    ///
    /// let mut profile = PriorityProfile::new();
    /// profile.set_weight(ResortAttribute::Cleanliness, 1.7);
    /// assert_eq!(profile.weight(ResortAttribute::Cleanliness), Some(1.0));
    /// ```
    pub fn set_weight(&mut self, attribute: ResortAttribute, weight: f64) {
        let clamped = if weight.is_finite() {
            weight.clamp(0.0, 1.0)
        } else {
            0.0
        };
        match self
            .weights
            .iter_mut()
            .find(|(candidate, _)| *candidate == attribute)
        {
            Some(entry) => entry.1 = clamped,
            None => self.weights.push((attribute, clamped)),
        }
    }

    /// Add an attribute weight while returning `self` for chaining.
    #[must_use]
    pub fn with_weight(mut self, attribute: ResortAttribute, weight: f64) -> Self {
        self.set_weight(attribute, weight);
        self
    }

    /// Iterate over `(attribute, weight)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ResortAttribute, f64)> + '_ {
        self.weights.iter().copied()
    }

    /// Return the number of weighted attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Report whether no attribute has been weighted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl FromIterator<(ResortAttribute, f64)> for PriorityProfile {
    fn from_iter<I: IntoIterator<Item = (ResortAttribute, f64)>>(iter: I) -> Self {
        let mut profile = Self::new();
        for (attribute, weight) in iter {
            profile.set_weight(attribute, weight);
        }
        profile
    }
}
