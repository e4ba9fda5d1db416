use serde::{Deserialize, Serialize};

use crate::models::Plan;

/// One plan choice as supplied by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanOption {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Size")]
    pub size: u32,

    /// Raw price text, e.g. "£42.50" or "1.299,50". Parsed tolerantly.
    #[serde(rename = "Price", default)]
    pub price: Option<String>,
}

impl PlanOption {
    pub fn parsed_price(&self) -> Option<f64> {
        self.price.as_deref().and_then(parse_price)
    }

    pub fn to_plan(&self) -> Plan {
        Plan {
            name: self.name.clone(),
            size: self.size,
            price: self.parsed_price(),
        }
    }
}

/// The set of plan tiers available to every person.
#[derive(Debug, Clone, Default)]
pub struct PlanCatalog {
    options: Vec<PlanOption>,
}

impl PlanCatalog {
    pub fn new(options: Vec<PlanOption>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &[PlanOption] {
        &self.options
    }

    /// All distinct plan sizes, sorted ascending.
    pub fn all_sizes(&self) -> Vec<u32> {
        let mut sizes: Vec<u32> = self.options.iter().map(|o| o.size).collect();
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }

    /// Metadata for the first plan option of the given size.
    pub fn metadata_for_size(&self, size: u32) -> Option<&PlanOption> {
        self.options.iter().find(|o| o.size == size)
    }

    /// A concrete `Plan` for the given size, if the catalog offers one.
    pub fn plan_for_size(&self, size: u32) -> Option<Plan> {
        self.metadata_for_size(size).map(|o| o.to_plan())
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Parse a price out of loosely-formatted text.
///
/// Accepts currency symbols and both separator conventions:
/// "£1,299.50", "1.299,50", "1299,50", "£12/wk".
pub fn parse_price(raw: &str) -> Option<f64> {
    let mut s: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',' || *c == '-')
        .collect();

    if s.contains('.') && s.contains(',') {
        // Whichever separator occurs last is the decimal point, the other
        // marks thousands: "£1,299.50" and "1.299,50" both mean 1299.50.
        if s.rfind('.') > s.rfind(',') {
            s = s.replace(',', "");
        } else {
            s = s.replace('.', "").replace(',', ".");
        }
    } else if s.contains(',') {
        s = s.replace(',', ".");
    }

    if s.matches('.').count() > 1 {
        // Keep only the last dot as the decimal point.
        if let Some(last) = s.rfind('.') {
            let head: String = s[..last].chars().filter(|c| *c != '.').collect();
            s = format!("{}{}", head, &s[last..]);
        }
    }

    let n: f64 = s.parse().ok()?;
    n.is_finite().then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_float_absolute_eq;

    fn sample_options() -> Vec<PlanOption> {
        vec![
            PlanOption {
                name: "Solo".to_string(),
                size: 4,
                price: Some("£32.00".to_string()),
            },
            PlanOption {
                name: "Duo".to_string(),
                size: 6,
                price: Some("£45.00".to_string()),
            },
            PlanOption {
                name: "Family".to_string(),
                size: 8,
                price: Some("£56.00".to_string()),
            },
            PlanOption {
                name: "Family XL".to_string(),
                size: 8,
                price: Some("£56.00".to_string()),
            },
        ]
    }

    #[test]
    fn test_all_sizes_sorted_unique() {
        let catalog = PlanCatalog::new(sample_options());
        assert_eq!(catalog.all_sizes(), vec![4, 6, 8]);
    }

    #[test]
    fn test_metadata_for_size() {
        let catalog = PlanCatalog::new(sample_options());
        let meta = catalog.metadata_for_size(6).unwrap();
        assert_eq!(meta.name, "Duo");
        assert_float_absolute_eq!(meta.parsed_price().unwrap(), 45.0, 0.001);

        assert!(catalog.metadata_for_size(10).is_none());
    }

    #[test]
    fn test_parse_price_formats() {
        assert_float_absolute_eq!(parse_price("£1,299.50").unwrap(), 1299.50, 0.001);
        assert_float_absolute_eq!(parse_price("1.299,50").unwrap(), 1299.50, 0.001);
        assert_float_absolute_eq!(parse_price("1299,50").unwrap(), 1299.50, 0.001);
        assert_float_absolute_eq!(parse_price("£12/wk").unwrap(), 12.0, 0.001);
        assert_float_absolute_eq!(parse_price("1.299.500.25").unwrap(), 1299500.25, 0.001);
        assert!(parse_price("free").is_none());
        assert!(parse_price("").is_none());
    }

    #[test]
    fn test_parse_price_roundtrips_formatted_gbp() {
        // Whatever the cart formatter prints must parse back unchanged.
        use crate::cart::format_gbp;

        for amount in [0.0, 45.0, 999.99, 1299.50, 12345678.90] {
            assert_float_absolute_eq!(parse_price(&format_gbp(amount)).unwrap(), amount, 0.001);
        }

        // Thousands groups on the decimal-comma convention too.
        assert_float_absolute_eq!(parse_price("1.234.567,89").unwrap(), 1234567.89, 0.001);
    }
}
