//! Parsing a `Complexity("O(...)")` annotation or XML-doc complexity note
//! (§6 "Optional attribute/doc input") into a [`ComplexityExpression`],
//! trusted over the inferred value when present.

use asymptote_algebra::{ComplexityExpression, Variable};

use crate::diagnostics::Diagnostic;

/// Parse one of the literal annotation forms `spec.md` §6 commits to
/// accepting: `O(1)`, `O(log n)`, `O(n)`, `O(n log n)`, `O(n^k)`, `O(k^n)`,
/// `O(n!)`. Returns `None` with a diagnostic if `annotation` is not one of
/// these forms; this crate does not attempt a general expression parser
/// for annotation text since the accepted grammar is explicitly this
/// closed list.
#[must_use]
pub fn parse_annotation(annotation: &str, variable: &Variable) -> (Option<ComplexityExpression>, Vec<Diagnostic>) {
    let body = annotation.trim();
    let Some(body) = body.strip_prefix("O(").and_then(|rest| rest.strip_suffix(')')) else {
        return (None, vec![unparseable(annotation)]);
    };
    let body = body.trim();

    let parsed = match body {
        "1" => Some(ComplexityExpression::constant(1.0)),
        "log n" => Some(ComplexityExpression::poly_log(0.0, 1, variable.clone())),
        "n" => Some(ComplexityExpression::var(variable.clone())),
        "n log n" => Some(ComplexityExpression::poly_log(1.0, 1, variable.clone())),
        "n!" => Some(ComplexityExpression::factorial(variable.clone(), 1.0)),
        _ => body
            .strip_prefix("n^")
            .and_then(|degree| degree.parse::<f64>().ok())
            .map(|degree| ComplexityExpression::power(std::sync::Arc::new(ComplexityExpression::var(variable.clone())), degree))
            .or_else(|| {
                body.strip_suffix("^n")
                    .and_then(|base| base.parse::<f64>().ok())
                    .map(|base| ComplexityExpression::exp(base, variable.clone(), 1.0))
            }),
    };

    match parsed {
        Some(expr) => (Some(expr), Vec::new()),
        None => (None, vec![unparseable(annotation)]),
    }
}

fn unparseable(annotation: &str) -> Diagnostic {
    Diagnostic::structural(format!("`{annotation}` is not one of the recognized annotation forms; ignoring it"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use asymptote_algebra::VariableRole;

    fn n() -> Variable {
        Variable::new("n", VariableRole::InputSize)
    }

    #[test]
    fn constant_annotation_parses() {
        let (expr, diagnostics) = parse_annotation("O(1)", &n());
        assert_eq!(asymptote_algebra::to_big_o(&expr.unwrap()), "O(1)");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn n_log_n_annotation_parses() {
        let (expr, _) = parse_annotation("O(n log n)", &n());
        assert_eq!(asymptote_algebra::to_big_o(&expr.unwrap()), "O(n log n)");
    }

    #[test]
    fn polynomial_degree_annotation_parses() {
        let (expr, _) = parse_annotation("O(n^3)", &n());
        assert_eq!(asymptote_algebra::to_big_o(&expr.unwrap()), "O(n^3)");
    }

    #[test]
    fn exponential_annotation_parses() {
        let (expr, _) = parse_annotation("O(2^n)", &n());
        assert_eq!(asymptote_algebra::to_big_o(&expr.unwrap()), "O(2^n)");
    }

    #[test]
    fn factorial_annotation_parses() {
        let (expr, _) = parse_annotation("O(n!)", &n());
        assert_eq!(asymptote_algebra::to_big_o(&expr.unwrap()), "O(n!)");
    }

    #[test]
    fn unrecognized_form_yields_diagnostic_and_none() {
        let (expr, diagnostics) = parse_annotation("O(n^n)", &n());
        assert!(expr.is_none());
        assert_eq!(diagnostics.len(), 1);
    }
}
