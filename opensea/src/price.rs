use crate::schema::SaleEvent;
use crate::{Error, Result};

/// Sale amount converted out of raw token base units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalePrice {
    pub eth: f64,
    pub usd: f64,
}

impl SaleEvent {
    pub fn sale_price(&self) -> Result<SalePrice> {
        let raw = self
            .total_price
            .as_deref()
            .ok_or(Error::MissingField("total_price"))?;
        let token = self
            .payment_token
            .as_ref()
            .ok_or(Error::MissingField("payment_token"))?;

        let units = format_units(raw, token.decimals)?;
        Ok(SalePrice {
            eth: units * parse_rate(&token.eth_price)?,
            usd: units * parse_rate(&token.usd_price)?,
        })
    }
}

/// Scales a raw integer amount down by `10^decimals`.
///
/// The raw value is split into whole and fractional parts while still an
/// integer; converting `1500000000000000000` straight to `f64` would round
/// past its 53-bit mantissa before the division ever happened.
fn format_units(raw: &str, decimals: u32) -> Result<f64> {
    let amount: u128 = raw
        .parse()
        .map_err(|_| Error::InvalidPrice(raw.to_string()))?;
    let scale = 10u128
        .checked_pow(decimals)
        .ok_or_else(|| Error::InvalidPrice(format!("unsupported decimals: {decimals}")))?;

    Ok((amount / scale) as f64 + (amount % scale) as f64 / scale as f64)
}

fn parse_rate(raw: &str) -> Result<f64> {
    raw.parse()
        .map_err(|_| Error::InvalidPrice(raw.to_string()))
}
