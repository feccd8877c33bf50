//! Currency symbol lookup ("$" -> USD, CAD, AUD, ...).

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use super::fx_errors::FxError;

/// Symbol table compiled into the binary, used when no file is configured.
pub const BUNDLED_SYMBOL_TABLE: &str = include_str!("../../resources/currency_symbols.json");

/// Read-only mapping from a currency symbol to the codes that use it.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, BTreeSet<String>>,
}

impl SymbolTable {
    /// Parses a JSON object of `symbol -> [codes]`.
    ///
    /// Codes are uppercased. A symbol without codes is an error.
    pub fn from_json(raw: &str) -> Result<Self, FxError> {
        let parsed: HashMap<String, Vec<String>> = serde_json::from_str(raw)
            .map_err(|e| FxError::SymbolTable(format!("Invalid symbol table: {}", e)))?;

        let mut symbols = HashMap::with_capacity(parsed.len());
        for (symbol, codes) in parsed {
            let codes: BTreeSet<String> = codes
                .iter()
                .map(|code| code.trim().to_ascii_uppercase())
                .filter(|code| !code.is_empty())
                .collect();
            if codes.is_empty() {
                return Err(FxError::SymbolTable(format!(
                    "Symbol '{}' has no currency codes",
                    symbol
                )));
            }
            symbols.insert(symbol, codes);
        }

        Ok(Self { symbols })
    }

    /// Loads a symbol table file.
    pub fn load(path: &Path) -> Result<Self, FxError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            FxError::SymbolTable(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    /// The table shipped with the crate.
    pub fn bundled() -> Result<Self, FxError> {
        Self::from_json(BUNDLED_SYMBOL_TABLE)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains_key(symbol)
    }

    /// Codes of every currency written with `symbol`.
    pub fn codes_for_symbol(&self, symbol: &str) -> Result<&BTreeSet<String>, FxError> {
        self.symbols
            .get(symbol)
            .ok_or_else(|| FxError::UnknownSymbol(symbol.to_string()))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
