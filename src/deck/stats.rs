//! Deck statistics.

use std::collections::BTreeMap;
use super::types::models::{DeckStatistics, EnrichedCard, MANA_CURVE_BUCKETS};

/// Fold the enriched card list into totals, a mana curve and label tallies.
///
/// Missing cost counts as 0. Costs above 10 still count toward
/// `total_cards` but fall outside the curve. Missing labels are skipped in
/// that tally only.
pub fn compute_statistics(cards: &[EnrichedCard]) -> DeckStatistics {
    let mut stats = DeckStatistics {
        total_cards: 0,
        total_unique: cards.len(),
        mana_curve: [0; MANA_CURVE_BUCKETS],
        rarities: BTreeMap::new(),
        card_types: BTreeMap::new(),
        classes: BTreeMap::new(),
    };

    for card in cards {
        let count = u64::from(card.count);
        stats.total_cards += count;

        let cost = card.record.cost.unwrap_or(0) as usize;
        if let Some(bucket) = stats.mana_curve.get_mut(cost) {
            *bucket += count;
        }

        tally(&mut stats.rarities, card.record.rarity.as_deref(), count);
        tally(&mut stats.card_types, card.record.card_type.as_deref(), count);
        tally(&mut stats.classes, card.record.card_class.as_deref(), count);
    }

    stats
}

fn tally(map: &mut BTreeMap<String, u64>, label: Option<&str>, count: u64) {
    if let Some(label) = label {
        *map.entry(label.to_owned()).or_insert(0) += count;
    }
}
