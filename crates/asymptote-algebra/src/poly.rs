//! Sparse single-variable polynomials, used by [`crate::ComplexityKind::Poly`].

use std::cmp::Ordering;

/// A sparse polynomial `Σ coef · x^degree` in a single implicit variable.
///
/// Terms are kept sorted by descending degree with no zero coefficients and
/// no duplicate degrees — callers go through [`Polynomial::from_terms`] to
/// get that canonical form rather than constructing the inner `Vec` by hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    terms: Vec<(i32, f64)>,
}

impl Polynomial {
    /// Build a canonical polynomial from `(degree, coefficient)` pairs,
    /// combining duplicate degrees and dropping zero coefficients.
    #[must_use]
    pub fn from_terms(mut terms: Vec<(i32, f64)>) -> Self {
        terms.sort_by(|a, b| b.0.cmp(&a.0));
        let mut combined: Vec<(i32, f64)> = Vec::with_capacity(terms.len());
        for (degree, coef) in terms {
            if let Some(last) = combined.last_mut() {
                if last.0 == degree {
                    last.1 += coef;
                    continue;
                }
            }
            combined.push((degree, coef));
        }
        combined.retain(|&(_, coef)| coef.abs() > f64::EPSILON);
        Self { terms: combined }
    }

    /// A single monomial `coef · x^degree`.
    #[must_use]
    pub fn monomial(degree: i32, coef: f64) -> Self {
        Self::from_terms(vec![(degree, coef)])
    }

    /// The `(degree, coefficient)` pairs in descending-degree order.
    #[must_use]
    pub fn terms(&self) -> &[(i32, f64)] {
        &self.terms
    }

    /// The highest degree with a non-zero coefficient, or `None` for the
    /// zero polynomial.
    #[must_use]
    pub fn degree(&self) -> Option<i32> {
        self.terms.first().map(|&(d, _)| d)
    }

    /// `true` if this polynomial has no terms (is identically zero).
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluate at `x`.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.terms.iter().map(|&(d, c)| c * x.powi(d)).sum()
    }

    /// Sum of two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let mut terms = self.terms.clone();
        terms.extend_from_slice(&other.terms);
        Self::from_terms(terms)
    }

    /// Compare the dominant (highest) degree of two polynomials, the
    /// ordering big-O dominance actually cares about.
    #[must_use]
    pub fn cmp_dominant_degree(&self, other: &Self) -> Ordering {
        self.degree().unwrap_or(i32::MIN).cmp(&other.degree().unwrap_or(i32::MIN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combines_duplicate_degrees() {
        let p = Polynomial::from_terms(vec![(2, 1.0), (2, 2.0), (1, 5.0)]);
        assert_eq!(p.terms(), &[(2, 3.0), (1, 5.0)]);
    }

    #[test]
    fn drops_zero_coefficients() {
        let p = Polynomial::from_terms(vec![(3, 0.0), (1, 2.0)]);
        assert_eq!(p.terms(), &[(1, 2.0)]);
    }

    #[test]
    fn evaluates_correctly() {
        let p = Polynomial::from_terms(vec![(2, 1.0), (0, -4.0)]);
        assert!((p.evaluate(3.0) - 5.0).abs() < 1e-9);
    }
}
