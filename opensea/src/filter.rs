use crate::schema::Trait;

/// Selects the notable subset of a collection's sales.
///
/// Exactly one strategy is active per deployment: either two trait rules
/// that must both hold, or two substrings the display name must contain.
#[derive(Debug, Clone)]
pub enum SaleFilter {
    Traits(TraitRule, TraitRule),
    Name(NameRule),
}

#[derive(Debug, Clone)]
pub struct TraitRule {
    trait_type: String,
    value: String,
}

impl TraitRule {
    pub fn new(trait_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: value.into(),
        }
    }

    pub fn matched_by(&self, traits: &[Trait]) -> bool {
        traits
            .iter()
            .any(|t| t.trait_type == self.trait_type && t.value_eq(&self.value))
    }
}

#[derive(Debug, Clone)]
pub struct NameRule {
    first: String,
    second: String,
}

impl NameRule {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        name.contains(&self.first) && name.contains(&self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn traits(pairs: &[(&str, &str)]) -> Vec<Trait> {
        pairs
            .iter()
            .map(|(trait_type, value)| {
                serde_json::from_value(json!({"trait_type": trait_type, "value": value})).unwrap()
            })
            .collect()
    }

    fn namecoin_rules() -> (TraitRule, TraitRule) {
        (TraitRule::new("Year", "2011"), TraitRule::new("NMC", "Namecoin"))
    }

    #[test]
    fn both_trait_rules_must_hold() {
        let (year, nmc) = namecoin_rules();

        let matching = traits(&[("Year", "2011"), ("NMC", "Namecoin")]);
        assert!(year.matched_by(&matching) && nmc.matched_by(&matching));

        let missing_nmc = traits(&[("Year", "2011")]);
        assert!(year.matched_by(&missing_nmc));
        assert!(!nmc.matched_by(&missing_nmc));

        let wrong_value = traits(&[("Year", "2012"), ("NMC", "Namecoin")]);
        assert!(!year.matched_by(&wrong_value));
    }

    #[test]
    fn empty_trait_list_fails_closed() {
        let (year, nmc) = namecoin_rules();
        assert!(!year.matched_by(&[]));
        assert!(!nmc.matched_by(&[]));
    }

    #[test]
    fn name_rule_requires_both_substrings() {
        let rule = NameRule::new("Namecoin", "2011");
        assert!(rule.matches("Namecoin 2011 Genesis"));
        assert!(rule.matches("2011 Namecoin"));
        assert!(!rule.matches("Namecoin 2012"));
        assert!(!rule.matches("2011 Punk"));
    }
}
