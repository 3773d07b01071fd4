//! Shipping quote command.

use sportsgear_core::shipping::cost_for_weight;
use sportsgear_core::{Price, ShippingMethod, TotalWeight, Weight};

use super::CommandError;

/// Result of quoting a set of weights.
#[derive(Debug, PartialEq, Eq)]
pub struct Quote {
    pub total_weight: TotalWeight,
    pub method: ShippingMethod,
    pub cost: Price,
    /// Inputs that were not numbers.
    pub unparseable: Vec<String>,
}

/// Compute the quote for raw weight strings.
///
/// # Errors
///
/// Returns `CommandError::NoWeights` if `weights` is empty.
pub fn quote(weights: &[String], method: ShippingMethod) -> Result<Quote, CommandError> {
    if weights.is_empty() {
        return Err(CommandError::NoWeights);
    }

    let parsed: Vec<Weight> = weights.iter().map(|raw| Weight::parse(raw)).collect();
    let total_weight: TotalWeight = parsed.iter().sum();

    Ok(Quote {
        total_weight,
        method,
        cost: cost_for_weight(total_weight, method),
        unparseable: parsed
            .into_iter()
            .filter_map(|weight| match weight {
                Weight::Unparseable(raw) => Some(raw),
                Weight::Kilograms(_) => None,
            })
            .collect(),
    })
}

/// Print a shipping quote.
///
/// # Errors
///
/// Returns an error if no weights were given.
#[allow(clippy::print_stdout)]
pub fn run(weights: &[String], method: ShippingMethod) -> Result<(), CommandError> {
    let quote = quote(weights, method)?;

    for raw in &quote.unparseable {
        tracing::warn!("Weight '{raw}' is not a number; weight tiers will not apply");
    }

    println!("Items:        {}", weights.len());
    println!("Total weight: {}", quote.total_weight);
    println!("Method:       {}", quote.method.label());
    println!("Shipping:     {}", quote.cost.display());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn weights(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_quote_standard_tiers() {
        let q = quote(&weights(&["40", "2.5"]), ShippingMethod::Standard).unwrap();
        assert_eq!(q.cost, Price::dollars(30));
        assert!(q.unparseable.is_empty());

        let q = quote(&weights(&["70"]), ShippingMethod::Standard).unwrap();
        assert_eq!(q.cost, Price::dollars(30));
    }

    #[test]
    fn test_quote_express_ignores_weight() {
        let q = quote(&weights(&["300"]), ShippingMethod::Express).unwrap();
        assert_eq!(q.cost, Price::dollars(25));
    }

    #[test]
    fn test_quote_unparseable_weight_falls_to_base_tier() {
        let q = quote(&weights(&["80", "heavy"]), ShippingMethod::Standard).unwrap();
        assert_eq!(q.cost, Price::dollars(15));
        assert_eq!(q.unparseable, vec!["heavy".to_string()]);
        assert_eq!(q.total_weight.as_kilograms(), None);
    }

    #[test]
    fn test_quote_requires_weights() {
        assert!(matches!(
            quote(&[], ShippingMethod::Standard),
            Err(CommandError::NoWeights)
        ));
    }
}
