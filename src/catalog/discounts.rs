use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A percentage discount code, optionally capped and gated on a minimum
/// subtotal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountCode {
    #[serde(rename = "Code")]
    pub code: String,

    #[serde(rename = "PercentOff")]
    pub percent_off: f64,

    #[serde(rename = "Cap", default)]
    pub cap: Option<f64>,

    #[serde(rename = "MinSubtotal", default)]
    pub min_subtotal: f64,
}

/// The discount codes the checkout accepts, keyed by normalized code.
#[derive(Debug, Clone, Default)]
pub struct DiscountCatalog {
    codes: HashMap<String, DiscountCode>,
}

impl DiscountCatalog {
    pub fn new(codes: Vec<DiscountCode>) -> Self {
        let mut map = HashMap::new();
        for code in codes {
            map.insert(normalize_code(&code.code), code);
        }
        Self { codes: map }
    }

    /// Derive "SAVE{N}" percent codes from plain amounts, e.g. 10 -> SAVE10.
    /// Amounts outside 1..=100 are skipped.
    pub fn from_amounts(amounts: &[u32]) -> Self {
        let codes = amounts
            .iter()
            .filter(|a| (1..=100).contains(*a))
            .map(|a| DiscountCode {
                code: format!("SAVE{}", a),
                percent_off: *a as f64,
                cap: None,
                min_subtotal: 0.0,
            })
            .collect();
        Self::new(codes)
    }

    pub fn lookup(&self, code: &str) -> Option<&DiscountCode> {
        self.codes.get(&normalize_code(code))
    }

    /// Discount value for a code against a subtotal.
    ///
    /// Unknown codes and subtotals at or below the code's minimum yield 0.
    /// The result never exceeds the cap or the subtotal itself.
    pub fn compute_discount(&self, subtotal: f64, code: &str) -> f64 {
        let Some(def) = self.lookup(code) else {
            return 0.0;
        };
        if subtotal <= def.min_subtotal {
            return 0.0;
        }

        let pct = def.percent_off.clamp(0.0, 100.0);
        let mut value = subtotal * (pct / 100.0);
        if let Some(cap) = def.cap {
            value = value.min(cap);
        }
        value.clamp(0.0, subtotal)
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Canonical form for a code: trimmed and uppercased.
pub fn normalize_code(s: &str) -> String {
    s.trim().to_uppercase()
}
