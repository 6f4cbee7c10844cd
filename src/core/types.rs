use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulation time in time units (seconds in the reference plant)
pub type SimTime = f64;

/// Station identifier. Declaration order is the line order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationId {
    Cutting,
    Folding,
    Bonding,
    Labeling,
}

impl StationId {
    /// All stations in line order
    pub const ALL: [StationId; 4] = [
        StationId::Cutting,
        StationId::Folding,
        StationId::Bonding,
        StationId::Labeling,
    ];

    /// Number of stations on the line
    pub const COUNT: usize = 4;

    /// Position of the station on the line, starting at 0
    pub fn index(self) -> usize {
        match self {
            StationId::Cutting => 0,
            StationId::Folding => 1,
            StationId::Bonding => 2,
            StationId::Labeling => 3,
        }
    }

    /// The next station downstream, `None` for the terminal station
    pub fn successor(self) -> Option<StationId> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// Whether this station is fed by the raw-material supply
    pub fn is_first(self) -> bool {
        self.index() == 0
    }

    pub fn name(self) -> &'static str {
        match self {
            StationId::Cutting => "cutting",
            StationId::Folding => "folding",
            StationId::Bonding => "bonding",
            StationId::Labeling => "labeling",
        }
    }

    /// Capitalized name used in export headers
    pub fn label(self) -> &'static str {
        match self {
            StationId::Cutting => "Cutting",
            StationId::Folding => "Folding",
            StationId::Bonding => "Bonding",
            StationId::Labeling => "Labeling",
        }
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A count of units held by a station.
///
/// The raw-material feed of the first station may be `Unbounded`; every
/// other buffer is finite. Counts are unsigned, so a buffer can never be
/// driven negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stock {
    Finite(u32),
    Unbounded,
}

impl Stock {
    /// True when no unit is left to consume
    pub fn is_exhausted(self) -> bool {
        matches!(self, Stock::Finite(0))
    }

    /// Consume one unit. Returns false if the stock was already exhausted.
    pub fn take_one(&mut self) -> bool {
        match self {
            Stock::Finite(0) => false,
            Stock::Finite(n) => {
                *n -= 1;
                true
            }
            Stock::Unbounded => true,
        }
    }

    pub fn receive(&mut self, units: u32) {
        if let Stock::Finite(n) = self {
            *n = n.saturating_add(units);
        }
    }

    /// Units missing to reach `full`. An unbounded or overfull stock needs nothing.
    pub fn headroom(self, full: u32) -> u32 {
        match self {
            Stock::Finite(n) => full.saturating_sub(n),
            Stock::Unbounded => 0,
        }
    }

    /// Unbounded stock is never at or below any threshold
    pub fn at_or_below(self, threshold: f64) -> bool {
        match self {
            Stock::Finite(n) => f64::from(n) <= threshold,
            Stock::Unbounded => false,
        }
    }

    pub fn units(self) -> Option<u32> {
        match self {
            Stock::Finite(n) => Some(n),
            Stock::Unbounded => None,
        }
    }
}

impl Default for Stock {
    fn default() -> Self {
        Stock::Finite(0)
    }
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stock::Finite(n) => write!(f, "{}", n),
            Stock::Unbounded => f.write_str("inf"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_order_and_successors() {
        assert_eq!(StationId::Cutting.successor(), Some(StationId::Folding));
        assert_eq!(StationId::Folding.successor(), Some(StationId::Bonding));
        assert_eq!(StationId::Bonding.successor(), Some(StationId::Labeling));
        assert_eq!(StationId::Labeling.successor(), None);
        assert!(StationId::Cutting.is_first());
        assert!(!StationId::Labeling.is_first());
        for (i, id) in StationId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn test_finite_stock_never_goes_negative() {
        let mut stock = Stock::Finite(1);
        assert!(stock.take_one());
        assert!(stock.is_exhausted());
        assert!(!stock.take_one());
        assert_eq!(stock, Stock::Finite(0));
    }

    #[test]
    fn test_unbounded_stock() {
        let mut stock = Stock::Unbounded;
        assert!(stock.take_one());
        stock.receive(10);
        assert_eq!(stock, Stock::Unbounded);
        assert_eq!(stock.headroom(100), 0);
        assert!(!stock.at_or_below(f64::MAX));
        assert!(!stock.is_exhausted());
        assert_eq!(stock.to_string(), "inf");
    }

    #[test]
    fn test_headroom_saturates_when_overfull() {
        assert_eq!(Stock::Finite(30).headroom(100), 70);
        assert_eq!(Stock::Finite(100).headroom(100), 0);
        assert_eq!(Stock::Finite(150).headroom(100), 0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(Stock::Finite(30).at_or_below(30.0));
        assert!(!Stock::Finite(31).at_or_below(30.0));
    }
}
