//! Randomized-algorithm detection (§4.3.4): recognizing hash access, RNG
//! calls, shuffles, randomized pivots, and Monte-Carlo-named patterns, and
//! deriving an expected/worst-case [`ProbabilisticData`] bound for each.

use std::sync::Arc;

use asymptote_algebra::{ComplexityExpression, Distribution, ProbabilisticData, ProbabilisticSource, Variable};

use crate::adapter::{ExprKind, HostExpr};

/// Recognize one of the known randomized-algorithm shapes from a call or
/// index expression, if `expr` is one.
#[must_use]
pub fn classify_source<E: HostExpr>(expr: &E) -> Option<ProbabilisticSource> {
    let type_name = expr.resolved_type_name().unwrap_or_default().to_ascii_lowercase();
    if matches!(expr.kind(), ExprKind::Index) && (type_name.contains("dictionary") || type_name.contains("hashmap") || type_name.contains("hashset") || type_name.contains("hash")) {
        return Some(ProbabilisticSource::HashAccess);
    }

    let method = expr.call_method_name()?.to_ascii_lowercase();
    if method.contains("hash") {
        Some(ProbabilisticSource::HashAccess)
    } else if method.contains("shuffle") {
        Some(ProbabilisticSource::FisherYatesShuffle)
    } else if method.contains("montecarlo") || method.contains("monte_carlo") {
        Some(ProbabilisticSource::MonteCarlo)
    } else if method.contains("pivot") && (method.contains("random") || method.contains("rand")) {
        Some(ProbabilisticSource::RandomPivot)
    } else if method.contains("random") || method.contains("rand") || method.contains("nextint") || method.contains("next_int") {
        Some(ProbabilisticSource::RandomNumberGeneration)
    } else {
        None
    }
}

/// Build the expected/worst-case bound pair for a detected probabilistic
/// pattern.
///
/// These bounds are textbook results for each pattern, not derived from the
/// procedure's own body: a hash-table access is `O(1)` expected assuming
/// uniform hashing but `O(n)` worst case on adversarial collisions; a
/// Fisher–Yates shuffle and a single RNG draw are both `O(1)`/`O(n)`
/// respectively regardless of randomness since they do a fixed amount of
/// work; a randomized pivot choice is `O(n log n)` expected but `O(n^2)`
/// worst case (the classic quicksort gap); a Monte-Carlo-named routine is
/// reported as a high-probability bound with no tighter worst case claimed.
#[must_use]
pub fn analyze_probabilistic(source: ProbabilisticSource, variable: &Variable) -> ProbabilisticData {
    let (expected, worst, distribution, assumptions): (ComplexityExpression, ComplexityExpression, Distribution, Vec<String>) = match source {
        ProbabilisticSource::HashAccess => (
            ComplexityExpression::constant(1.0),
            ComplexityExpression::var(variable.clone()),
            Distribution::Geometric,
            vec!["keys are hashed uniformly at random".to_owned()],
        ),
        ProbabilisticSource::RandomNumberGeneration => (
            ComplexityExpression::constant(1.0),
            ComplexityExpression::constant(1.0),
            Distribution::Uniform,
            vec!["a single RNG draw is O(1)".to_owned()],
        ),
        ProbabilisticSource::FisherYatesShuffle => (
            ComplexityExpression::var(variable.clone()),
            ComplexityExpression::var(variable.clone()),
            Distribution::Uniform,
            vec!["a Fisher-Yates shuffle does a fixed O(n) amount of work regardless of the draws made".to_owned()],
        ),
        ProbabilisticSource::RandomPivot => (
            ComplexityExpression::poly_log(1.0, 1, variable.clone()),
            ComplexityExpression::power(Arc::new(ComplexityExpression::var(variable.clone())), 2.0),
            Distribution::Uniform,
            vec!["pivot choice is uniform over the current partition".to_owned()],
        ),
        ProbabilisticSource::MonteCarlo => (
            ComplexityExpression::poly_log(0.0, 1, variable.clone()),
            ComplexityExpression::var(variable.clone()),
            Distribution::HighProbabilityBound,
            vec!["bound holds with high probability, not deterministically".to_owned()],
        ),
    };
    ProbabilisticData::new(Arc::new(expected), Arc::new(worst), source, distribution, assumptions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::test_support::MockExpr;
    use asymptote_algebra::VariableRole;

    fn n() -> Variable {
        Variable::new("n", VariableRole::InputSize)
    }

    #[test]
    fn hash_get_call_is_recognized() {
        let expr = MockExpr::call("TryGetValue", Some("Dictionary<K,V>"), vec![]);
        assert_eq!(classify_source(&expr), Some(ProbabilisticSource::HashAccess));
    }

    #[test]
    fn shuffle_call_is_recognized() {
        let expr = MockExpr::call("Shuffle", None, vec![]);
        assert_eq!(classify_source(&expr), Some(ProbabilisticSource::FisherYatesShuffle));
    }

    #[test]
    fn plain_call_is_not_probabilistic() {
        let expr = MockExpr::call("Compute", None, vec![]);
        assert_eq!(classify_source(&expr), None);
    }

    #[test]
    fn random_pivot_has_a_quadratic_worst_case_gap() {
        let data = analyze_probabilistic(ProbabilisticSource::RandomPivot, &n());
        assert_eq!(asymptote_algebra::to_big_o(&data.expected), "O(n log n)");
        assert_eq!(asymptote_algebra::to_big_o(&data.worst), "O(n^2)");
    }
}
