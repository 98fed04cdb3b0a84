use {
    crate::{
        constants::{INITIAL_COINBASE_TOKEN_SUPPLY_IN_UNITS, NULL_ADDRESS},
        order_factory::{self, OrderTerms},
    },
    alloy::primitives::{Address, U256},
    anyhow::{Context, Result},
    dashmap::DashMap,
    model::{order::SignedOrder, token::Token},
    std::sync::Arc,
    zeroex_client::TestingClient,
};

/// The tokens and accounts taking part in an order.
#[derive(Clone, Copy, Debug)]
pub struct OrderParties {
    pub maker_token: Address,
    pub taker_token: Address,
    pub maker: Address,
    pub taker: Address,
}

/// Fees of an order, paid in the fee token. The default is an order without
/// fees and without fee recipient.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Fees {
    pub maker_fee: U256,
    pub taker_fee: U256,
    pub fee_recipient: Address,
}

impl Default for Fees {
    fn default() -> Self {
        Self {
            maker_fee: U256::ZERO,
            taker_fee: U256::ZERO,
            fee_recipient: NULL_ADDRESS,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OrderOptions {
    /// When unset the order factory's default expiration is used.
    pub expiration_unix_timestamp_sec: Option<U256>,
}

/// Creates signed orders whose maker and taker hold enough balance and proxy
/// allowance to fill them.
///
/// The first user address is the coinbase: it funds every balance increase.
pub struct FillScenarios {
    client: Arc<dyn TestingClient>,
    user_addresses: Vec<Address>,
    tokens: Vec<Token>,
    coinbase: Address,
    zrx_token_address: Address,
    exchange_contract_address: Address,
    // Serializes the read-modify-write of each (token, owner) allowance.
    allowance_locks: DashMap<(Address, Address), Arc<tokio::sync::Mutex<()>>>,
}

impl FillScenarios {
    pub fn new(
        client: Arc<dyn TestingClient>,
        user_addresses: Vec<Address>,
        tokens: Vec<Token>,
        zrx_token_address: Address,
        exchange_contract_address: Address,
    ) -> Result<Self> {
        let coinbase = *user_addresses
            .first()
            .context("at least one user address is required as coinbase")?;
        Ok(Self {
            client,
            user_addresses,
            tokens,
            coinbase,
            zrx_token_address,
            exchange_contract_address,
            allowance_locks: Default::default(),
        })
    }

    pub fn coinbase(&self) -> Address {
        self.coinbase
    }

    pub fn user_addresses(&self) -> &[Address] {
        &self.user_addresses
    }

    /// Sets the coinbase balance of every dummy token to
    /// [`INITIAL_COINBASE_TOKEN_SUPPLY_IN_UNITS`] whole units. The fee token
    /// and the wrapped native token are skipped.
    pub async fn init_token_balances(&self) -> Result<()> {
        for token in self.tokens.iter().filter(|token| !token.is_reserved()) {
            let supply = number::units::to_base_units(
                U256::from(INITIAL_COINBASE_TOKEN_SUPPLY_IN_UNITS),
                token.decimals,
            )?;
            let tx_hash = self
                .client
                .set_balance(token.address, self.coinbase, supply, self.coinbase)
                .await?;
            self.client.await_transaction_mined(tx_hash).await?;
            tracing::info!(symbol = %token.symbol, token = %token.address, %supply, "seeded coinbase balance");
        }
        Ok(())
    }

    /// Order without fees where maker and taker amounts are both
    /// `fillable_amount`.
    pub async fn create_fillable_signed_order(
        &self,
        parties: OrderParties,
        fillable_amount: U256,
        options: OrderOptions,
    ) -> Result<SignedOrder> {
        self.create_asymmetric_fillable_signed_order(
            parties,
            fillable_amount,
            fillable_amount,
            options,
        )
        .await
    }

    pub async fn create_fillable_signed_order_with_fees(
        &self,
        parties: OrderParties,
        fees: Fees,
        fillable_amount: U256,
        options: OrderOptions,
    ) -> Result<SignedOrder> {
        self.create_asymmetric_fillable_signed_order_with_fees(
            parties,
            fees,
            fillable_amount,
            fillable_amount,
            options,
        )
        .await
    }

    pub async fn create_asymmetric_fillable_signed_order(
        &self,
        parties: OrderParties,
        maker_fillable_amount: U256,
        taker_fillable_amount: U256,
        options: OrderOptions,
    ) -> Result<SignedOrder> {
        self.create_asymmetric_fillable_signed_order_with_fees(
            parties,
            Fees::default(),
            maker_fillable_amount,
            taker_fillable_amount,
            options,
        )
        .await
    }

    /// Creates an order made by the coinbase and fills `partial_fill_amount`
    /// of it as `taker`. Returns the order as it was signed.
    pub async fn create_partially_filled_signed_order(
        &self,
        maker_token: Address,
        taker_token: Address,
        taker: Address,
        fillable_amount: U256,
        partial_fill_amount: U256,
    ) -> Result<SignedOrder> {
        let maker = self.coinbase;
        let signed_order = self
            .create_asymmetric_fillable_signed_order(
                OrderParties {
                    maker_token,
                    taker_token,
                    maker,
                    taker,
                },
                fillable_amount,
                fillable_amount,
                OrderOptions::default(),
            )
            .await?;

        let should_throw_on_insufficient_balance_or_allowance = false;
        let tx_hash = self
            .client
            .fill_order(
                &signed_order,
                partial_fill_amount,
                should_throw_on_insufficient_balance_or_allowance,
                taker,
            )
            .await?;
        self.client.await_transaction_mined(tx_hash).await?;
        tracing::info!(
            order = ?signed_order.hash(),
            %partial_fill_amount,
            "partially filled order"
        );

        Ok(signed_order)
    }

    async fn create_asymmetric_fillable_signed_order_with_fees(
        &self,
        parties: OrderParties,
        fees: Fees,
        maker_fillable_amount: U256,
        taker_fillable_amount: U256,
        options: OrderOptions,
    ) -> Result<SignedOrder> {
        futures::try_join!(
            self.increase_balance_and_allowance(
                parties.maker_token,
                parties.maker,
                maker_fillable_amount
            ),
            self.increase_balance_and_allowance(
                parties.taker_token,
                parties.taker,
                taker_fillable_amount
            ),
        )?;
        futures::try_join!(
            self.increase_balance_and_allowance(
                self.zrx_token_address,
                parties.maker,
                fees.maker_fee
            ),
            self.increase_balance_and_allowance(
                self.zrx_token_address,
                parties.taker,
                fees.taker_fee
            ),
        )?;

        let signed_order = order_factory::create_signed_order(
            self.client.as_ref(),
            OrderTerms {
                maker: parties.maker,
                taker: parties.taker,
                maker_fee: fees.maker_fee,
                taker_fee: fees.taker_fee,
                maker_token_amount: maker_fillable_amount,
                maker_token_address: parties.maker_token,
                taker_token_amount: taker_fillable_amount,
                taker_token_address: parties.taker_token,
                exchange_contract_address: self.exchange_contract_address,
                fee_recipient: fees.fee_recipient,
                expiration_unix_timestamp_sec: options.expiration_unix_timestamp_sec,
            },
        )
        .await?;
        tracing::info!(order = ?signed_order.hash(), ?parties, "created fillable order");

        Ok(signed_order)
    }

    async fn increase_balance_and_allowance(
        &self,
        token: Address,
        address: Address,
        amount: U256,
    ) -> Result<()> {
        if amount.is_zero() || address == NULL_ADDRESS {
            return Ok(());
        }
        futures::try_join!(
            self.increase_balance(token, address, amount),
            self.increase_allowance(token, address, amount),
        )?;
        Ok(())
    }

    async fn increase_balance(&self, token: Address, address: Address, amount: U256) -> Result<()> {
        let tx_hash = self
            .client
            .transfer(token, self.coinbase, address, amount)
            .await?;
        self.client.await_transaction_mined(tx_hash).await?;
        tracing::debug!(%token, %address, %amount, "increased balance");
        Ok(())
    }

    async fn increase_allowance(
        &self,
        token: Address,
        address: Address,
        amount: U256,
    ) -> Result<()> {
        let lock = self
            .allowance_locks
            .entry((token, address))
            .or_default()
            .clone();
        let _guard = lock.lock().await;

        let old_allowance = self.client.proxy_allowance(token, address).await?;
        let new_allowance = old_allowance
            .checked_add(amount)
            .with_context(|| format!("{token} allowance of {address} overflows"))?;
        let tx_hash = self
            .client
            .set_proxy_allowance(token, address, new_allowance)
            .await?;
        self.client.await_transaction_mined(tx_hash).await?;
        tracing::debug!(%token, %address, %new_allowance, "increased proxy allowance");
        Ok(())
    }
}
