use {
    crate::AlloyProvider,
    alloy::{primitives::U256, providers::Provider},
    anyhow::{Context, Result, ensure},
};

/// Functions that are only available on a testing node (ganache, hardhat,
/// anvil).
#[derive(Clone, Debug)]
pub struct TestNodeApi {
    provider: AlloyProvider,
}

impl TestNodeApi {
    pub fn new(provider: AlloyProvider) -> Self {
        Self { provider }
    }

    pub async fn snapshot(&self) -> Result<U256> {
        self.provider
            .raw_request("evm_snapshot".into(), ())
            .await
            .context("test network must support evm_snapshot")
    }

    pub async fn revert(&self, snapshot_id: U256) -> Result<bool> {
        self.provider
            .raw_request("evm_revert".into(), (snapshot_id,))
            .await
            .context("test network must support evm_revert")
    }
}

/// Restores the chain to the state it had when the resetter was created.
pub struct Resetter {
    api: TestNodeApi,
    snapshot_id: U256,
}

impl Resetter {
    pub async fn new(provider: AlloyProvider) -> Result<Self> {
        let api = TestNodeApi::new(provider);
        let snapshot_id = api.snapshot().await?;
        tracing::debug!(%snapshot_id, "took chain snapshot");
        Ok(Self { api, snapshot_id })
    }

    pub async fn reset(&self) -> Result<()> {
        let reverted = self.api.revert(self.snapshot_id).await?;
        ensure!(reverted, "failed to revert to snapshot {}", self.snapshot_id);
        tracing::debug!(snapshot_id = %self.snapshot_id, "reverted chain snapshot");
        Ok(())
    }
}
