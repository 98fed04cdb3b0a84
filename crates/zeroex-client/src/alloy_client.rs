use {
    crate::{Error, ExchangeClient, MinedTransaction, TestingClient},
    alloy::{
        primitives::{Address, B256, TxHash, U256},
        signers::local::PrivateKeySigner,
    },
    anyhow::{Context, Result},
    contracts::alloy::{DummyToken, Exchange, TokenRegistry},
    ethrpc::{
        AlloyProvider,
        alloy::{Confirmation, wait_for_receipt, wallet::TestAccounts},
    },
    model::{order::SignedOrder, signature::EcdsaSignature, token::Token},
    std::collections::HashMap,
};

#[derive(Clone, Debug)]
pub struct Config {
    pub node_url: String,
    pub mnemonic: String,
    /// Number of accounts derived from the mnemonic.
    pub accounts: u32,
    pub exchange: Address,
    pub confirmation: Confirmation,
}

/// [`ExchangeClient`] talking to a node over JSON-RPC. Transactions and order
/// hashes are signed locally with the test accounts' keys.
pub struct AlloyClient {
    provider: AlloyProvider,
    exchange: Exchange::Instance,
    token_transfer_proxy: Address,
    zrx_token: Address,
    accounts: TestAccounts,
    signers: HashMap<Address, PrivateKeySigner>,
    confirmation: Confirmation,
}

impl AlloyClient {
    pub async fn connect(config: &Config) -> Result<Self> {
        let accounts = TestAccounts::from_mnemonic(&config.mnemonic, config.accounts)?;
        let provider = ethrpc::alloy::provider_with_wallet(&config.node_url, accounts.wallet()?)?;
        let exchange = Exchange::Instance::new(config.exchange, provider.clone());

        let token_transfer_proxy = exchange
            .TOKEN_TRANSFER_PROXY_CONTRACT()
            .call()
            .await
            .context("failed to read token transfer proxy address")?;
        let zrx_token = exchange
            .ZRX_TOKEN_CONTRACT()
            .call()
            .await
            .context("failed to read ZRX token address")?;
        tracing::info!(
            exchange = %config.exchange,
            %token_transfer_proxy,
            %zrx_token,
            "connected to exchange"
        );

        Ok(Self {
            signers: accounts.by_address(),
            provider,
            exchange,
            token_transfer_proxy,
            zrx_token,
            accounts,
            confirmation: config.confirmation,
        })
    }

    pub fn provider(&self) -> &AlloyProvider {
        &self.provider
    }

    pub fn exchange_address(&self) -> Address {
        *self.exchange.address()
    }

    pub fn zrx_token_address(&self) -> Address {
        self.zrx_token
    }

    /// Addresses of the test accounts, the first one being the coinbase.
    pub fn user_addresses(&self) -> Vec<Address> {
        self.accounts.addresses()
    }

    /// Lists all tokens known to the token registry at `registry`.
    pub async fn tokens(&self, registry: Address) -> Result<Vec<Token>> {
        let registry = TokenRegistry::Instance::new(registry, self.provider.clone());
        let addresses = registry
            .getTokenAddresses()
            .call()
            .await
            .context("failed to list registered tokens")?;

        let registry = &registry;
        futures::future::try_join_all(addresses.into_iter().map(|address| async move {
            let metadata = registry
                .getTokenMetaData(address)
                .call()
                .await
                .with_context(|| format!("failed to read metadata of token {address}"))?;
            Ok::<_, anyhow::Error>(Token {
                name: metadata.name,
                symbol: metadata.symbol,
                address: metadata.tokenAddress,
                decimals: metadata.decimals,
            })
        }))
        .await
    }

    fn token(&self, address: Address) -> DummyToken::Instance {
        DummyToken::Instance::new(address, self.provider.clone())
    }
}

#[async_trait::async_trait]
impl ExchangeClient for AlloyClient {
    async fn transfer(
        &self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<TxHash> {
        let pending = self
            .token(token)
            .transfer(to, amount)
            .from(from)
            .send()
            .await
            .with_context(|| format!("failed to transfer {amount} of {token} to {to}"))?;
        tracing::debug!(%token, %from, %to, %amount, tx = ?pending.tx_hash(), "sent transfer");
        Ok(*pending.tx_hash())
    }

    async fn balance(&self, token: Address, owner: Address) -> Result<U256> {
        self.token(token)
            .balanceOf(owner)
            .call()
            .await
            .with_context(|| format!("failed to read {token} balance of {owner}"))
    }

    async fn proxy_allowance(&self, token: Address, owner: Address) -> Result<U256> {
        self.token(token)
            .allowance(owner, self.token_transfer_proxy)
            .call()
            .await
            .with_context(|| format!("failed to read {token} proxy allowance of {owner}"))
    }

    async fn set_proxy_allowance(
        &self,
        token: Address,
        owner: Address,
        amount: U256,
    ) -> Result<TxHash> {
        let pending = self
            .token(token)
            .approve(self.token_transfer_proxy, amount)
            .from(owner)
            .send()
            .await
            .with_context(|| format!("failed to set {token} proxy allowance of {owner}"))?;
        tracing::debug!(%token, %owner, %amount, tx = ?pending.tx_hash(), "sent approval");
        Ok(*pending.tx_hash())
    }

    async fn sign_order_hash(&self, order_hash: B256, signer: Address) -> Result<EcdsaSignature> {
        let key = self
            .signers
            .get(&signer)
            .ok_or(Error::UnknownSigner(signer))?;
        EcdsaSignature::sign(&order_hash, key)
    }

    async fn fill_order(
        &self,
        signed_order: &SignedOrder,
        fill_taker_token_amount: U256,
        should_throw_on_insufficient_balance_or_allowance: bool,
        taker: Address,
    ) -> Result<TxHash> {
        let order = &signed_order.order;
        let signature = &signed_order.ec_signature;
        let pending = self
            .exchange
            .fillOrder(
                [
                    order.maker,
                    order.taker,
                    order.maker_token_address,
                    order.taker_token_address,
                    order.fee_recipient,
                ],
                [
                    order.maker_token_amount,
                    order.taker_token_amount,
                    order.maker_fee,
                    order.taker_fee,
                    order.expiration_unix_timestamp_sec,
                    order.salt,
                ],
                fill_taker_token_amount,
                should_throw_on_insufficient_balance_or_allowance,
                signature.v,
                signature.r,
                signature.s,
            )
            .from(taker)
            .send()
            .await
            .with_context(|| format!("failed to fill order {}", order.hash()))?;
        tracing::debug!(
            order = ?order.hash(),
            %fill_taker_token_amount,
            %taker,
            tx = ?pending.tx_hash(),
            "sent fill"
        );
        Ok(*pending.tx_hash())
    }

    async fn unavailable_taker_amount(&self, order_hash: B256) -> Result<U256> {
        self.exchange
            .getUnavailableTakerTokenAmount(order_hash)
            .call()
            .await
            .with_context(|| format!("failed to read unavailable amount of order {order_hash}"))
    }

    async fn await_transaction_mined(&self, tx_hash: TxHash) -> Result<MinedTransaction> {
        let receipt = wait_for_receipt(&self.provider, tx_hash, self.confirmation).await?;
        Ok(MinedTransaction {
            tx_hash,
            block_number: receipt.block_number,
        })
    }
}

#[async_trait::async_trait]
impl TestingClient for AlloyClient {
    async fn set_balance(
        &self,
        token: Address,
        target: Address,
        amount: U256,
        from: Address,
    ) -> Result<TxHash> {
        let pending = self
            .token(token)
            .setBalance(target, amount)
            .from(from)
            .send()
            .await
            .with_context(|| format!("failed to set {token} balance of {target}"))?;
        tracing::debug!(%token, %target, %amount, tx = ?pending.tx_hash(), "sent balance update");
        Ok(*pending.tx_hash())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::primitives::address,
        ethrpc::alloy::wallet::TEST_MNEMONIC,
    };

    fn config() -> Config {
        Config {
            node_url: "http://localhost:8545".to_string(),
            mnemonic: TEST_MNEMONIC.to_string(),
            accounts: 10,
            exchange: address!("48bacb9266a570d521063ef5dd96e61686dbe788"),
            confirmation: Confirmation::default(),
        }
    }

    #[tokio::test]
    #[ignore]
    async fn local_node_signs_order_hashes() {
        let client = AlloyClient::connect(&config()).await.unwrap();
        let coinbase = client.user_addresses()[0];
        let order_hash = B256::repeat_byte(0x42);

        let signature = client.sign_order_hash(order_hash, coinbase).await.unwrap();
        assert_eq!(signature.recover(&order_hash).unwrap(), coinbase);

        let err = client
            .sign_order_hash(order_hash, Address::repeat_byte(1))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::UnknownSigner(_))
        ));
    }

    #[tokio::test]
    #[ignore]
    async fn local_node_lists_registered_tokens() {
        let client = AlloyClient::connect(&config()).await.unwrap();
        let tokens = client
            .tokens(address!("0b1ba0af832d7c05fd64161e0db78e85978e8082"))
            .await
            .unwrap();

        assert!(
            tokens
                .iter()
                .any(|token| token.address == client.zrx_token_address())
        );
        assert!(tokens.iter().any(|token| !token.is_reserved()));
    }
}
