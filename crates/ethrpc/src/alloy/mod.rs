pub mod wallet;

use {
    crate::AlloyProvider,
    alloy::{
        network::EthereumWallet,
        primitives::TxHash,
        providers::{PendingTransactionBuilder, Provider, ProviderBuilder},
        rpc::types::TransactionReceipt,
    },
    anyhow::{Context, Result},
    std::time::Duration,
};

/// Provider without any signers. Transactions sent through it are signed by
/// the node, which only works for accounts the node has unlocked.
pub fn provider(url: &str) -> Result<AlloyProvider> {
    let url = url.parse().with_context(|| format!("invalid node url {url:?}"))?;
    Ok(ProviderBuilder::new().connect_http(url).erased())
}

/// Provider that signs transactions locally with the signers registered in
/// `wallet`. The `from` field of a transaction selects the signer.
pub fn provider_with_wallet(url: &str, wallet: EthereumWallet) -> Result<AlloyProvider> {
    let url = url.parse().with_context(|| format!("invalid node url {url:?}"))?;
    Ok(ProviderBuilder::new()
        .wallet(wallet)
        .connect_http(url)
        .erased())
}

/// Settings for waiting on submitted transactions.
#[derive(Clone, Copy, Debug)]
pub struct Confirmation {
    /// Number of blocks that need to be mined on top of (and including) the
    /// block containing the transaction.
    pub confirmations: u64,
    /// Maximum time to wait for the transaction to be confirmed.
    pub timeout: Duration,
}

impl Default for Confirmation {
    fn default() -> Self {
        Self {
            confirmations: 1,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("transaction {tx_hash} reverted")]
pub struct Reverted {
    pub tx_hash: TxHash,
}

/// Waits for an already submitted transaction to be confirmed and returns
/// its receipt. A reverted transaction results in a [`Reverted`] error.
pub async fn wait_for_receipt(
    provider: &AlloyProvider,
    tx_hash: TxHash,
    confirmation: Confirmation,
) -> Result<TransactionReceipt> {
    let receipt = PendingTransactionBuilder::new(provider.root().clone(), tx_hash)
        .with_required_confirmations(confirmation.confirmations)
        .with_timeout(Some(confirmation.timeout))
        .get_receipt()
        .await
        .with_context(|| format!("waiting for transaction {tx_hash}"))?;

    if !receipt.status() {
        return Err(Reverted { tx_hash }.into());
    }
    tracing::debug!(
        ?tx_hash,
        block = ?receipt.block_number,
        gas_used = receipt.gas_used,
        "transaction confirmed"
    );
    Ok(receipt)
}
