//! Network identifier.

use serde::{Deserialize, Serialize};

/// Identifies which Catamount network a node is connected to.
///
/// The five public test networks each pin a different retargeting algorithm
/// after the last scheduled era, which is how candidate algorithms are
/// soaked before a main-network switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkId {
    /// The production network.
    Main,
    Testnet1,
    Testnet2,
    Testnet3,
    Testnet4,
    Testnet5,
    /// Local development network.
    Regtest,
}

impl NetworkId {
    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Testnet1 => "testnet1",
            Self::Testnet2 => "testnet2",
            Self::Testnet3 => "testnet3",
            Self::Testnet4 => "testnet4",
            Self::Testnet5 => "testnet5",
            Self::Regtest => "regtest",
        }
    }
}
