use crate::error::EngineError;
use crate::matcher::Match;
use remedy_catalog::CatalogId;

const NO_RECOMMENDATION_PLACEHOLDER: &str = "(No recommendation text found in file.)";

pub(crate) fn no_input() -> String {
    "[HR] No error message provided.".to_string()
}

pub(crate) fn catalogs_unavailable(err: &EngineError) -> String {
    format!("[HR] Error reading HR recommendation files: {err}")
}

pub(crate) fn no_match() -> String {
    "[HR] I couldn't find any similar error in the HR recommendations files \
     for this error. Please double-check the exact error text or update the CSV."
        .to_string()
}

/// Renders a matched row: source attribution, the matched pattern with its
/// score to two decimal places, and the remediation text.
pub(crate) fn render_match(best: &Match) -> String {
    let source_line = match best.row.catalog {
        CatalogId::Cvr => "Source: CVR rules from Oracle EBS.",
        CatalogId::Common => "Source: common employee load error recommendations.",
    };
    let recommendation = if best.row.recommendation.is_empty() {
        NO_RECOMMENDATION_PLACEHOLDER
    } else {
        best.row.recommendation.as_str()
    };
    format!(
        "[HR] {source_line}\n\nMatched pattern (score {score:.2}):\n{pattern}\n\nRecommended fix:\n{recommendation}",
        score = best.score,
        pattern = best.row.pattern,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use remedy_catalog::CatalogRow;

    fn cvr_match(recommendation: &str, score: f64) -> Match {
        Match {
            row: CatalogRow {
                catalog: CatalogId::Cvr,
                pattern: "Employee number does not match".to_string(),
                recommendation: recommendation.to_string(),
            },
            score,
        }
    }

    #[test]
    fn renders_cvr_attribution() {
        let text = render_match(&cvr_match("Check HR_ID mapping", 1.0));
        assert_eq!(
            text,
            "[HR] Source: CVR rules from Oracle EBS.\n\n\
             Matched pattern (score 1.00):\nEmployee number does not match\n\n\
             Recommended fix:\nCheck HR_ID mapping"
        );
    }

    #[test]
    fn renders_common_attribution() {
        let mut best = cvr_match("Re-run the load", 0.82);
        best.row.catalog = CatalogId::Common;
        let text = render_match(&best);
        assert!(text.contains("Source: common employee load error recommendations."));
        assert!(text.contains("(score 0.82)"));
    }

    #[test]
    fn substitutes_placeholder_for_empty_recommendation() {
        let text = render_match(&cvr_match("", 0.9));
        assert!(text.contains("(No recommendation text found in file.)"));
    }

    #[test]
    fn score_rounds_to_two_decimals() {
        let text = render_match(&cvr_match("x", 2.0 / 3.0));
        assert!(text.contains("(score 0.67)"), "text: {text}");
    }

    #[test]
    fn notices_are_nonempty_and_tagged() {
        let failure = catalogs_unavailable(&EngineError::Catalog(
            remedy_catalog::CatalogError::Config("boom".to_string()),
        ));
        for notice in [no_input(), no_match(), failure] {
            assert!(notice.starts_with("[HR] "));
            assert!(!notice.is_empty());
        }
    }

    #[test]
    fn failure_notice_embeds_error_description() {
        let err = EngineError::Catalog(remedy_catalog::CatalogError::Config(
            "cannot read remedy.toml".to_string(),
        ));
        assert_eq!(
            catalogs_unavailable(&err),
            "[HR] Error reading HR recommendation files: \
             invalid catalog configuration: cannot read remedy.toml"
        );
    }
}
