//! Uri-deduplicating merge of discovered features.

use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::trace;

use crate::model::Feature;

/// Merge `features`, keeping the first feature seen for each uri.
///
/// The result preserves first-seen order. Later features with an already
/// seen uri are dropped whole, even if their pickles differ.
pub fn aggregate<I>(features: I) -> Vec<Feature>
where
    I: IntoIterator<Item = Feature>,
{
    let mut unique: IndexMap<String, Feature> = IndexMap::new();
    for feature in features {
        match unique.entry(feature.uri.clone()) {
            Entry::Occupied(_) => trace!(uri = %feature.uri, "dropping duplicate feature"),
            Entry::Vacant(slot) => {
                slot.insert(feature);
            }
        }
    }
    unique.into_values().collect()
}
