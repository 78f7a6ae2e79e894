/*!
 * Unit partitioning: enumerating the translatable text leaves of a content
 * region in document order.
 *
 * The order produced here is load-bearing. Batch slicing and response-part
 * distribution both assume the sequence matches the pre-order, depth-first
 * order of the rendered tree, and re-partitioning an unmodified region must
 * yield the same sequence.
 */

use markup5ever_rcdom::{Handle, NodeData};

use crate::extractor::ContentRegion;

/// Minimum trimmed length for a unit. Guards against lone punctuation marks
/// becoming their own translation unit.
pub const MIN_UNIT_LEN: usize = 2;

/// One text-bearing leaf of the content region.
///
/// The record is index-addressable: the orchestrator writes translations
/// back by index, and the node handle is how the write lands in the tree.
#[derive(Clone)]
pub struct TranslatableUnit {
    /// Position in document order, stable for the run
    pub index: usize,
    /// The live text node this unit addresses
    pub node: Handle,
    /// Trimmed original text, captured at partition time
    pub original: String,
    /// Text currently carried by the unit (original until translated)
    pub current: String,
}

impl TranslatableUnit {
    fn new(index: usize, node: Handle, text: String) -> Self {
        Self {
            index,
            node,
            current: text.clone(),
            original: text,
        }
    }

    /// Whether the unit's text differs from its original
    pub fn is_translated(&self) -> bool {
        self.current != self.original
    }
}

/// Enumerate the translatable units of a region in document order
pub fn partition(region: &ContentRegion) -> Vec<TranslatableUnit> {
    let mut units = Vec::new();
    collect_units(region.root(), &mut units);
    units
}

fn collect_units(node: &Handle, units: &mut Vec<TranslatableUnit>) {
    match node.data {
        NodeData::Text { ref contents } => {
            let text = contents.borrow().trim().to_string();
            if text.chars().count() >= MIN_UNIT_LEN {
                units.push(TranslatableUnit::new(units.len(), node.clone(), text));
            }
        }
        _ => {
            for child in node.children.borrow().iter() {
                collect_units(child, units);
            }
        }
    }
}
