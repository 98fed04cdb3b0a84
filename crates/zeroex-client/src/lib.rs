//! Client handle for the exchange protocol: token transfers and proxy
//! allowances, order signing, order filling and waiting for transactions to
//! be mined.

mod alloy_client;

pub use alloy_client::{AlloyClient, Config};
use {
    alloy::primitives::{Address, B256, TxHash, U256},
    anyhow::Result,
    model::{order::SignedOrder, signature::EcdsaSignature},
};

/// A transaction that was included in a block without reverting.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MinedTransaction {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no signer available for account {0}")]
    UnknownSigner(Address),
}

#[async_trait::async_trait]
pub trait ExchangeClient: Send + Sync {
    /// Transfers `amount` of `token` from `from` to `to`.
    async fn transfer(&self, token: Address, from: Address, to: Address, amount: U256)
    -> Result<TxHash>;

    async fn balance(&self, token: Address, owner: Address) -> Result<U256>;

    /// Returns the amount of `token` the exchange's token transfer proxy may
    /// move on behalf of `owner`.
    async fn proxy_allowance(&self, token: Address, owner: Address) -> Result<U256>;

    /// Sets (not increases) the proxy allowance of `owner` for `token`.
    async fn set_proxy_allowance(&self, token: Address, owner: Address, amount: U256)
    -> Result<TxHash>;

    /// Signs an order hash with the key of `signer`.
    async fn sign_order_hash(&self, order_hash: B256, signer: Address) -> Result<EcdsaSignature>;

    /// Fills up to `fill_taker_token_amount` of the order as `taker`.
    ///
    /// With `should_throw_on_insufficient_balance_or_allowance` unset, a fill
    /// that cannot be settled does not revert but fills nothing.
    async fn fill_order(
        &self,
        order: &SignedOrder,
        fill_taker_token_amount: U256,
        should_throw_on_insufficient_balance_or_allowance: bool,
        taker: Address,
    ) -> Result<TxHash>;

    /// Taker token amount of the order that was already filled or cancelled.
    async fn unavailable_taker_amount(&self, order_hash: B256) -> Result<U256>;

    /// Waits until the transaction is mined. A reverted transaction is an
    /// error.
    async fn await_transaction_mined(&self, tx_hash: TxHash) -> Result<MinedTransaction>;
}

/// Capabilities only available on test networks, exposed explicitly so that
/// test helpers do not need to reach into client internals.
#[async_trait::async_trait]
pub trait TestingClient: ExchangeClient {
    /// Sets the balance of `target` on a dummy token contract, sending the
    /// transaction from `from`.
    async fn set_balance(&self, token: Address, target: Address, amount: U256, from: Address)
    -> Result<TxHash>;
}

#[cfg(any(test, feature = "test-util"))]
mockall::mock! {
    pub Client {}

    #[async_trait::async_trait]
    impl ExchangeClient for Client {
        async fn transfer(&self, token: Address, from: Address, to: Address, amount: U256) -> Result<TxHash>;
        async fn balance(&self, token: Address, owner: Address) -> Result<U256>;
        async fn proxy_allowance(&self, token: Address, owner: Address) -> Result<U256>;
        async fn set_proxy_allowance(&self, token: Address, owner: Address, amount: U256) -> Result<TxHash>;
        async fn sign_order_hash(&self, order_hash: B256, signer: Address) -> Result<EcdsaSignature>;
        async fn fill_order(
            &self,
            order: &SignedOrder,
            fill_taker_token_amount: U256,
            should_throw_on_insufficient_balance_or_allowance: bool,
            taker: Address,
        ) -> Result<TxHash>;
        async fn unavailable_taker_amount(&self, order_hash: B256) -> Result<U256>;
        async fn await_transaction_mined(&self, tx_hash: TxHash) -> Result<MinedTransaction>;
    }

    #[async_trait::async_trait]
    impl TestingClient for Client {
        async fn set_balance(&self, token: Address, target: Address, amount: U256, from: Address) -> Result<TxHash>;
    }
}
