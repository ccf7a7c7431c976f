use anyhow::{bail, Context, Result};
use opensea::{NameRule, SaleFilter, TraitRule};
use std::env;
use std::path::PathBuf;

/// One poll every five minutes, paired with a five-minute lookback for the
/// very first run so the startup gap matches the poll period.
pub(crate) const POLL_SCHEDULE: &str = "every 5 minutes";
const LOOKBACK_SECS: i64 = 300;

const DEFAULT_WATERMARK_PATH: &str = "watermark.db";
const DEFAULT_HASHTAGS: &str = "#2011 #Namecoin";
const DEFAULT_TRAIT_RULES: &str = "Year=2011,NMC=Namecoin";
const DEFAULT_NAME_RULE: &str = "Namecoin,2011";

pub(crate) struct Config {
    pub collection_slug: String,
    pub filter: SaleFilter,
    pub hashtags: String,
    pub lookback_secs: i64,
    pub watermark_path: PathBuf,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        let collection_slug =
            env::var("OPENSEA_COLLECTION_SLUG").context("OPENSEA_COLLECTION_SLUG is not set")?;

        let filter = match env::var("SALE_FILTER_MODE").as_deref().unwrap_or("traits") {
            "traits" => parse_trait_filter(&env_or("SALE_FILTER_TRAITS", DEFAULT_TRAIT_RULES))?,
            "name" => parse_name_filter(&env_or("SALE_FILTER_NAME", DEFAULT_NAME_RULE))?,
            other => bail!("unknown SALE_FILTER_MODE: {other} (expected `traits` or `name`)"),
        };

        Ok(Self {
            collection_slug,
            filter,
            hashtags: env_or("HASHTAGS", DEFAULT_HASHTAGS),
            lookback_secs: LOOKBACK_SECS,
            watermark_path: env_or("WATERMARK_PATH", DEFAULT_WATERMARK_PATH).into(),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_trait_filter(raw: &str) -> Result<SaleFilter> {
    let rules: Vec<TraitRule> = raw
        .split(',')
        .map(|pair| {
            let (trait_type, value) = pair
                .split_once('=')
                .with_context(|| format!("trait rule `{pair}` is not of the form Key=Value"))?;
            Ok(TraitRule::new(trait_type.trim(), value.trim()))
        })
        .collect::<Result<_>>()?;

    match <[TraitRule; 2]>::try_from(rules) {
        Ok([first, second]) => Ok(SaleFilter::Traits(first, second)),
        Err(_) => bail!("expected exactly two trait rules, got `{raw}`"),
    }
}

fn parse_name_filter(raw: &str) -> Result<SaleFilter> {
    match raw.split(',').map(str::trim).collect::<Vec<_>>()[..] {
        [first, second] => Ok(SaleFilter::Name(NameRule::new(first, second))),
        _ => bail!("expected exactly two name substrings, got `{raw}`"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_default_trait_rules() {
        let filter = parse_trait_filter(DEFAULT_TRAIT_RULES).unwrap();
        assert!(matches!(filter, SaleFilter::Traits(_, _)));
    }

    #[test]
    fn rejects_malformed_trait_rules() {
        assert!(parse_trait_filter("Year=2011").is_err());
        assert!(parse_trait_filter("Year=2011,NMC=Namecoin,Extra=1").is_err());
        assert!(parse_trait_filter("Year2011,NMC=Namecoin").is_err());
    }

    #[test]
    fn parses_name_rule_with_whitespace() {
        let filter = parse_name_filter("Namecoin, 2011").unwrap();
        let SaleFilter::Name(rule) = filter else {
            panic!("expected name filter");
        };
        assert!(rule.matches("Namecoin 2011 Genesis"));
    }

    #[test]
    fn rejects_malformed_name_rule() {
        assert!(parse_name_filter("Namecoin").is_err());
        assert!(parse_name_filter("a,b,c").is_err());
    }
}
