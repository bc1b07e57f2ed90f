use crate::model::{Emote, EmoteGroup, Partition};
use tracing::debug;

/// `width >= height * ratio`; equality counts as wide.
pub fn is_wide(emote: &Emote, ratio: f64) -> bool {
    f64::from(emote.width) >= f64::from(emote.height) * ratio
}

/// Where a single emote ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Wide,
    Group(usize),
    Ungrouped,
}

/// Index of the first prefix `name` starts with.
fn first_prefix(name: &str, prefixes: &[String]) -> Option<usize> {
    prefixes.iter().position(|p| name.starts_with(p.as_str()))
}

/// Splits `catalog` into wide, prefix-grouped and ungrouped emotes.
///
/// Membership is decided first (wide beats any prefix, earlier prefixes beat later
/// ones), then the three collections are built in catalog order. Prefixes without
/// members produce no group.
pub fn classify(catalog: &[Emote], prefixes: &[String], wide_ratio: f64) -> Partition {
    let slots: Vec<Slot> = catalog
        .iter()
        .map(|e| {
            if is_wide(e, wide_ratio) {
                Slot::Wide
            } else {
                first_prefix(&e.name, prefixes).map_or(Slot::Ungrouped, Slot::Group)
            }
        })
        .collect();

    let mut wide = Vec::new();
    let mut ungrouped = Vec::new();
    let mut buckets: Vec<Vec<Emote>> = vec![Vec::new(); prefixes.len()];
    for (emote, slot) in catalog.iter().zip(slots) {
        match slot {
            Slot::Wide => wide.push(emote.clone()),
            Slot::Group(i) => buckets[i].push(emote.clone()),
            Slot::Ungrouped => ungrouped.push(emote.clone()),
        }
    }

    let grouped: Vec<EmoteGroup> = prefixes
        .iter()
        .zip(buckets)
        .filter(|(_, emotes)| !emotes.is_empty())
        .map(|(prefix, emotes)| EmoteGroup {
            prefix: prefix.clone(),
            emotes,
        })
        .collect();

    debug!(
        wide = wide.len(),
        groups = grouped.len(),
        ungrouped = ungrouped.len(),
        "catalog classified"
    );
    Partition {
        wide,
        grouped,
        ungrouped,
    }
}
