//! Business rules applied to deals before creation
//!
//! Only consulted when `enforce_deal_rules` is enabled in the configuration.

use std::collections::BTreeMap;

use super::constants::properties;

/// Stage a deal must be in when rules are enforced
pub const REQUIRED_DEAL_STAGE: &str = "qualifiedtobuy";

#[derive(Debug, Clone, PartialEq)]
pub enum DealRule {
    /// `amount` parses as a finite number greater than zero
    PositiveAmount,
    /// `dealstage` equals the given stage
    Stage(String),
}

impl DealRule {
    /// Returns the violation message, or `None` when the deal passes
    pub fn check(&self, deal: &BTreeMap<String, String>) -> Option<String> {
        match self {
            Self::PositiveAmount => {
                let amount = deal
                    .get(properties::DEAL_AMOUNT)
                    .and_then(|a| a.trim().parse::<f64>().ok())
                    .unwrap_or(0.0);
                let positive = amount.is_finite() && amount > 0.0;
                (!positive).then(|| "Deal amount must be greater than 0".to_string())
            }
            Self::Stage(stage) => {
                let actual = deal.get(properties::DEAL_STAGE).map(String::as_str);
                (actual != Some(stage.as_str()))
                    .then(|| format!("Deal must be in {} stage", stage))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DealRules {
    rules: Vec<DealRule>,
}

impl Default for DealRules {
    fn default() -> Self {
        Self {
            rules: vec![
                DealRule::PositiveAmount,
                DealRule::Stage(REQUIRED_DEAL_STAGE.to_string()),
            ],
        }
    }
}

impl DealRules {
    /// Checks every rule and collects all violations
    pub fn validate(&self, deal: &BTreeMap<String, String>) -> Result<(), Vec<String>> {
        let violations: Vec<String> = self.rules.iter().filter_map(|r| r.check(deal)).collect();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_valid_deal_passes() {
        let rules = DealRules::default();
        assert!(
            rules
                .validate(&deal(&[("amount", "1500.50"), ("dealstage", "qualifiedtobuy")]))
                .is_ok()
        );
    }

    #[test]
    fn test_all_violations_reported() {
        let violations = DealRules::default()
            .validate(&deal(&[("dealname", "Big one")]))
            .unwrap_err();
        assert_eq!(
            violations,
            vec![
                "Deal amount must be greater than 0".to_string(),
                "Deal must be in qualifiedtobuy stage".to_string(),
            ]
        );
    }

    #[test]
    fn test_non_numeric_amount_is_rejected() {
        let rule = DealRule::PositiveAmount;
        assert!(rule.check(&deal(&[("amount", "lots")])).is_some());
        assert!(rule.check(&deal(&[("amount", "-5")])).is_some());
        assert!(rule.check(&deal(&[("amount", " 10 ")])).is_none());
    }

    #[test]
    fn test_nan_and_infinite_amounts_are_rejected() {
        let rule = DealRule::PositiveAmount;
        for amount in ["NaN", "nan", "inf", "-inf", "infinity"] {
            assert_eq!(
                rule.check(&deal(&[("amount", amount)])),
                Some("Deal amount must be greater than 0".to_string()),
                "amount {amount:?} should fail"
            );
        }
    }

    #[test]
    fn test_stage_rule_uses_configured_stage() {
        let rule = DealRule::Stage("closedwon".to_string());
        assert!(rule.check(&deal(&[("dealstage", "closedwon")])).is_none());
        assert_eq!(
            rule.check(&deal(&[("dealstage", "qualifiedtobuy")])),
            Some("Deal must be in closedwon stage".to_string())
        );
    }
}
