use std::collections::HashMap;

use crate::models::PromoRecord;

/// Merge records that share a code. The first record seen represents its
/// group until a later one carries a strictly longer discount string.
/// Groups keep the order in which their code first appeared.
pub fn deduplicate(records: Vec<PromoRecord>) -> Vec<PromoRecord> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<PromoRecord> = Vec::new();

    for record in records {
        match index.get(&record.code) {
            Some(&i) => {
                if record.discount.chars().count() > unique[i].discount.chars().count() {
                    unique[i] = record;
                }
            }
            None => {
                index.insert(record.code.clone(), unique.len());
                unique.push(record);
            }
        }
    }
    unique
}
