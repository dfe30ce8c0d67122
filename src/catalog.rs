//! Reference catalog of currencies, denominations, and security features
//!
//! The catalog is the static lookup table behind every verification: for a
//! given (currency code, denomination) pair it answers "which security
//! features should this note have?". It is built once at startup and never
//! mutated, so it can be shared freely across worker threads.
//!
//! Two ways to construct one:
//!
//! - [`Catalog::builtin`]: the compiled-in reference table (INR, USD, EUR)
//! - [`Catalog::from_path`]: the same shape loaded from a JSON file, for
//!   deployments that want to extend the table without recompiling

use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// A denomination of a currency and the security features expected on it.
///
/// Feature order is preserved from the source table; it only affects
/// display order, not semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Denomination {
    pub label: String,
    pub features: Vec<String>,
}

/// One currency: its short code ("INR"), display name, and denominations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    pub name: String,
    pub denominations: Vec<Denomination>,
}

/// Immutable currency reference table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub currencies: Vec<Currency>,
}

/// A flattened catalog entry, used for table views and CSV-ish listings.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogRow<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub denomination: &'a str,
    pub features: &'a [String],
}

impl Catalog {
    /// The compiled-in reference table.
    ///
    /// Contents mirror the educational demo this tool is modeled on: three
    /// currencies, three denominations each. Not an authoritative source.
    pub fn builtin() -> Self {
        fn denom(label: &str, features: &[&str]) -> Denomination {
            Denomination {
                label: label.to_string(),
                features: features.iter().map(|f| f.to_string()).collect(),
            }
        }

        Catalog {
            currencies: vec![
                Currency {
                    code: "INR".to_string(),
                    name: "Indian Rupee (INR)".to_string(),
                    denominations: vec![
                        denom("10", &["Watermark", "Security thread", "Intaglio print", "Latent image"]),
                        denom("50", &["Watermark", "Security thread", "Optically variable ink", "Microprint"]),
                        denom("2000", &["Watermark", "Security thread", "See-through register", "Hologram"]),
                    ],
                },
                Currency {
                    code: "USD".to_string(),
                    name: "US Dollar (USD)".to_string(),
                    denominations: vec![
                        denom("1", &["Portrait watermark", "Raised printing", "Microprinting"]),
                        denom("20", &["Security thread", "Color-shifting ink", "Portrait watermark"]),
                        denom("100", &["3D Security ribbon", "Color-shifting bell", "Large portrait watermark"]),
                    ],
                },
                Currency {
                    code: "EUR".to_string(),
                    name: "Euro (EUR)".to_string(),
                    denominations: vec![
                        denom("5", &["Hologram", "Watermark", "Raised print"]),
                        denom("50", &["Security thread", "Hologram", "See-through number"]),
                        denom("200", &["Watermark", "Security thread", "EUR hologram"]),
                    ],
                },
            ],
        }
    }

    /// Load a catalog from a JSON file.
    ///
    /// The file uses the same shape this type serializes to, so
    /// `verinote catalog export` output round-trips as input.
    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Look up a currency by its code.
    pub fn get(&self, code: &str) -> Option<&Currency> {
        self.currencies.iter().find(|c| c.code == code)
    }

    /// Display name for a currency code, falling back to the code itself
    /// when the catalog has no entry.
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.get(code).map(|c| c.name.as_str()).unwrap_or(code)
    }

    /// Expected security features for a (currency, denomination) pair.
    ///
    /// Unknown pairs return an empty slice, never an error. Downstream code
    /// treats "no catalog entry" as "nothing to check", not a failure.
    pub fn features(&self, code: &str, denomination: &str) -> &[String] {
        self.get(code)
            .and_then(|c| c.denominations.iter().find(|d| d.label == denomination))
            .map(|d| d.features.as_slice())
            .unwrap_or(&[])
    }

    /// Enumerate the full table as flat rows, in declaration order.
    pub fn rows(&self) -> Vec<CatalogRow<'_>> {
        let mut rows = Vec::new();
        for currency in &self.currencies {
            for denomination in &currency.denominations {
                rows.push(CatalogRow {
                    code: &currency.code,
                    name: &currency.name,
                    denomination: &denomination.label,
                    features: &denomination.features,
                });
            }
        }
        rows
    }

    /// Serialize the whole table as pretty-printed JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
