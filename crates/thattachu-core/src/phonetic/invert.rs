use std::collections::BTreeMap;

use super::config::TableError;

/// Build the reverse lookup: Tamil cluster -> canonical romanized keys.
///
/// The forward table is required to be injective on values (enforced at
/// parse time), so inversion cannot drop entries. A collision slipping
/// through a hand-built map is still reported rather than resolved by
/// insertion order.
pub fn invert_phonetic_map(
    forward: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>, TableError> {
    let mut inverted = BTreeMap::new();
    for (keys, cluster) in forward {
        if let Some(first_key) = inverted.insert(cluster.clone(), keys.clone()) {
            return Err(TableError::DuplicateCluster {
                cluster: cluster.clone(),
                first_key,
                second_key: keys.clone(),
            });
        }
    }
    Ok(inverted)
}
