//! Sysctl entry parsing for create requests.

use std::collections::BTreeMap;

use gantry_common::error::{GantryError, Result};

/// Parses `key=value` sysctl entries into a map.
///
/// A later entry for the same key overwrites the earlier one. The value
/// may itself contain `=`; only the first delimiter splits.
///
/// # Errors
///
/// Returns [`GantryError::SysctlFormat`] for an entry without a `=`.
pub fn parse_sysctls(entries: &[String]) -> Result<BTreeMap<String, String>> {
    let mut sysctls = BTreeMap::new();
    for entry in entries {
        let Some((key, value)) = entry.split_once('=') else {
            return Err(GantryError::SysctlFormat {
                entry: entry.clone(),
            });
        };
        let _ = sysctls.insert(key.to_owned(), value.to_owned());
    }
    Ok(sysctls)
}
