//! # Core Domain Entities
//!
//! Defines the wallet-domain entities observed from the blockchain engine.
//!
//! ## Clusters
//!
//! - **Identity**: `CurrencyId`, `NetworkId`, `ManagerId`
//! - **Networks & Managers**: `Network`, `WalletManagerState`, `WalletManagerMode`
//! - **Intent**: `DesiredSet`
//! - **Snapshots**: `WalletManagerSnapshot`, `SystemSnapshot`

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::UnknownModeError;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Identifier of a tradable asset (e.g. `bitcoin-mainnet:__native__`).
///
/// Equality, ordering and hashing are case-insensitive. The original spelling
/// is kept for display and for requests sent to the engine.
#[derive(Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CurrencyId {
    raw: String,
    key: String,
}

impl CurrencyId {
    /// Create a currency identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let key = raw.to_lowercase();
        Self { raw, key }
    }

    /// The identifier as originally spelled.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The case-folded comparison key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for CurrencyId {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for CurrencyId {}

impl PartialEq<str> for CurrencyId {
    fn eq(&self, other: &str) -> bool {
        self.key == other.to_lowercase()
    }
}

impl PartialEq<&str> for CurrencyId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Hash for CurrencyId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for CurrencyId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CurrencyId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Debug for CurrencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurrencyId({})", self.raw)
    }
}

impl fmt::Display for CurrencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<String> for CurrencyId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for CurrencyId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<CurrencyId> for String {
    fn from(id: CurrencyId) -> Self {
        id.raw
    }
}

/// Identifier of a blockchain network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NetworkId(pub String);

impl NetworkId {
    /// Create a network identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a wallet manager.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ManagerId(pub String);

impl ManagerId {
    /// Create a manager identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ManagerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// CLUSTER B: NETWORKS & MANAGERS
// =============================================================================

/// A blockchain network as discovered by the engine.
///
/// Immutable once discovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    /// Network identifier.
    pub id: NetworkId,
    /// Human readable name.
    pub name: String,
    /// Mainnet (`true`) or testnet (`false`).
    pub is_mainnet: bool,
    /// Currencies supported by this network.
    pub currencies: Vec<CurrencyId>,
}

impl Network {
    /// Create a network.
    pub fn new<I, C>(
        id: impl Into<String>,
        name: impl Into<String>,
        is_mainnet: bool,
        currencies: I,
    ) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CurrencyId>,
    {
        Self {
            id: NetworkId::new(id),
            name: name.into(),
            is_mainnet,
            currencies: currencies.into_iter().map(Into::into).collect(),
        }
    }

    /// Does this network support `currency`?
    #[must_use]
    pub fn contains_currency(&self, currency: &CurrencyId) -> bool {
        self.currencies.iter().any(|c| c == currency)
    }

    /// The network's own spelling of `currency`, if supported.
    #[must_use]
    pub fn find_currency(&self, currency: &CurrencyId) -> Option<&CurrencyId> {
        self.currencies.iter().find(|c| *c == currency)
    }
}

/// Connection state of a wallet manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WalletManagerState {
    /// Created by the engine, not yet connected.
    Created,
    /// Connected to its network.
    Connected,
    /// Disconnected from its network.
    Disconnected,
    /// Deleted by the engine. Terminal.
    Deleted,
}

impl WalletManagerState {
    /// A manager is tracked when it is `Created` or `Connected`.
    #[must_use]
    pub fn is_tracked(self) -> bool {
        matches!(self, Self::Created | Self::Connected)
    }
}

impl fmt::Display for WalletManagerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Created => "Created",
            Self::Connected => "Connected",
            Self::Disconnected => "Disconnected",
            Self::Deleted => "Deleted",
        };
        f.write_str(s)
    }
}

/// How a wallet manager talks to its network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WalletManagerMode {
    /// Query and submit through the API only.
    #[default]
    ApiOnly,
    /// Query through the API, submit over P2P.
    ApiWithP2pSubmit,
    /// Sync over P2P, query through the API.
    P2pWithApiSync,
    /// P2P only.
    P2pOnly,
}

impl FromStr for WalletManagerMode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "apionly" => Ok(Self::ApiOnly),
            "apiwithp2psubmit" => Ok(Self::ApiWithP2pSubmit),
            "p2pwithapisync" => Ok(Self::P2pWithApiSync),
            "p2ponly" => Ok(Self::P2pOnly),
            _ => Err(UnknownModeError(s.to_string())),
        }
    }
}

/// How far back a resync starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyncDepth {
    /// From the block of the last confirmed outgoing transfer.
    FromLastConfirmedSend,
    /// From the last trusted checkpoint.
    FromLastTrustedBlock,
    /// From wallet creation.
    FromCreation,
}

// =============================================================================
// CLUSTER C: INTENT
// =============================================================================

/// The full list of currencies the user wants active.
///
/// Ordered, duplicate-free (case-insensitively; the first spelling wins).
/// Always supplied as a complete replacement, never as a diff.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DesiredSet {
    currencies: Vec<CurrencyId>,
}

impl DesiredSet {
    /// Build a desired set, dropping duplicates.
    pub fn new<I, C>(currencies: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CurrencyId>,
    {
        let mut set = Self::default();
        for currency in currencies {
            let currency = currency.into();
            if !set.currencies.contains(&currency) {
                set.currencies.push(currency);
            }
        }
        set
    }

    /// Currencies in user order.
    pub fn iter(&self) -> impl Iterator<Item = &CurrencyId> {
        self.currencies.iter()
    }

    /// Number of currencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    /// Is the set empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }

    /// Is `currency` desired?
    #[must_use]
    pub fn contains(&self, currency: &CurrencyId) -> bool {
        self.currencies.contains(currency)
    }

    /// Does any desired currency belong to `network`?
    #[must_use]
    pub fn intersects(&self, network: &Network) -> bool {
        self.currencies.iter().any(|c| network.contains_currency(c))
    }

    /// Desired currencies that belong to `network`, in user order.
    #[must_use]
    pub fn matching(&self, network: &Network) -> Vec<CurrencyId> {
        self.currencies
            .iter()
            .filter(|c| network.contains_currency(c))
            .cloned()
            .collect()
    }
}

impl<C: Into<CurrencyId>> FromIterator<C> for DesiredSet {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self::new(iter)
    }
}

// =============================================================================
// CLUSTER D: SNAPSHOTS
// =============================================================================

/// Point-in-time view of a wallet manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletManagerSnapshot {
    /// Manager identifier.
    pub id: ManagerId,
    /// Human readable name.
    pub name: String,
    /// The one network this manager is bound to.
    pub network: NetworkId,
    /// Connection state at snapshot time.
    pub state: WalletManagerState,
    /// Currencies with a registered wallet.
    pub wallets: Vec<CurrencyId>,
}

impl WalletManagerSnapshot {
    /// Is the manager tracked (`Created` or `Connected`)?
    #[must_use]
    pub fn is_tracked(&self) -> bool {
        self.state.is_tracked()
    }

    /// Does the manager own a wallet for `currency`?
    #[must_use]
    pub fn has_wallet(&self, currency: &CurrencyId) -> bool {
        self.wallets.contains(currency)
    }
}

/// Point-in-time view of the whole engine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SystemSnapshot {
    /// Networks in discovery order.
    pub networks: Vec<Network>,
    /// Wallet managers in creation order.
    pub managers: Vec<WalletManagerSnapshot>,
}

impl SystemSnapshot {
    /// Look up a network.
    #[must_use]
    pub fn network(&self, id: &NetworkId) -> Option<&Network> {
        self.networks.iter().find(|n| &n.id == id)
    }

    /// Look up a manager, including deleted ones.
    #[must_use]
    pub fn manager(&self, id: &ManagerId) -> Option<&WalletManagerSnapshot> {
        self.managers.iter().find(|m| &m.id == id)
    }

    /// Managers that have not been deleted.
    pub fn live_managers(&self) -> impl Iterator<Item = &WalletManagerSnapshot> {
        self.managers
            .iter()
            .filter(|m| m.state != WalletManagerState::Deleted)
    }

    /// The network a manager is bound to.
    #[must_use]
    pub fn network_of(&self, manager: &WalletManagerSnapshot) -> Option<&Network> {
        self.network(&manager.network)
    }

    /// First network (in discovery order) supporting `currency`.
    #[must_use]
    pub fn network_for_currency(&self, currency: &CurrencyId) -> Option<&Network> {
        self.networks.iter().find(|n| n.contains_currency(currency))
    }

    /// Live manager owning a wallet for `currency`. Managers bound to a
    /// network the snapshot does not know are never owners.
    #[must_use]
    pub fn wallet_owner(&self, currency: &CurrencyId) -> Option<&WalletManagerSnapshot> {
        self.live_managers()
            .filter(|m| self.network_of(m).is_some())
            .find(|m| m.has_wallet(currency))
    }

    /// Live manager whose network supports `currency`.
    #[must_use]
    pub fn manager_for_currency(&self, currency: &CurrencyId) -> Option<&WalletManagerSnapshot> {
        self.live_managers().find(|m| {
            self.network_of(m)
                .is_some_and(|n| n.contains_currency(currency))
        })
    }

    /// Live manager bound to `network`.
    #[must_use]
    pub fn manager_for_network(&self, network: &NetworkId) -> Option<&WalletManagerSnapshot> {
        self.live_managers().find(|m| &m.network == network)
    }

    /// The manager responsible for `currency`: the owner of its wallet if one
    /// exists, otherwise any live manager whose network supports it.
    #[must_use]
    pub fn locate_manager(&self, currency: &CurrencyId) -> Option<&WalletManagerSnapshot> {
        self.wallet_owner(currency)
            .or_else(|| self.manager_for_currency(currency))
    }
}
