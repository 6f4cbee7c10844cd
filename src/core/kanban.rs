//! Kanban replenishment rules: the push transfer between adjacent
//! stations and the threshold that raises a station's card.

use super::station::StationState;
use super::types::Stock;

/// Result of a push transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    /// Units moved from the sender's produced stock to the receiver's resource stock
    pub units: u32,
    /// The receiver's request was fully satisfied and its card cleared
    pub request_cleared: bool,
}

/// Push finished units from `sender` to its successor `receiver`.
///
/// Only runs while the receiver's card is raised. Ships
/// `min(needed, produced)` where `needed` is the receiver's headroom up to
/// `full_threshold`, so the receiver never ends above the threshold. The
/// card is cleared only when the whole need could be covered; a partial
/// shipment leaves it raised for the next tick.
pub fn push_transfer(
    sender: &mut StationState,
    receiver: &mut StationState,
    full_threshold: u32,
) -> Option<Transfer> {
    if !receiver.kanban_card {
        return None;
    }

    let needed = receiver.resource_stock.headroom(full_threshold);
    let units = needed.min(sender.produced_stock);
    let request_cleared = needed <= sender.produced_stock;
    if request_cleared {
        receiver.kanban_card = false;
    }

    sender.produced_stock -= units;
    receiver.resource_stock.receive(units);

    Some(Transfer { units, request_cleared })
}

/// Card trigger: stock at or below `ratio × optimal`
pub fn should_raise_card(stock: Stock, optimal_stock: u32, ratio: f64) -> bool {
    stock.at_or_below(ratio * f64::from(optimal_stock))
}
