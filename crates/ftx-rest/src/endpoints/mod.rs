//! REST API endpoint implementations

pub mod account;
pub mod catalog;
pub mod market;
pub mod orders;
pub mod staking;
pub mod subaccounts;
pub mod wallet;

pub use account::AccountEndpoints;
pub use catalog::EndpointDef;
pub use market::MarketEndpoints;
pub use orders::OrderEndpoints;
pub use staking::StakingEndpoints;
pub use subaccounts::SubaccountEndpoints;
pub use wallet::WalletEndpoints;
