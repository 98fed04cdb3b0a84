use {
    crate::constants::DEFAULT_EXPIRATION_UNIX_TIMESTAMP_SEC,
    alloy::primitives::{Address, U256},
    anyhow::{Context, Result},
    model::order::{Order, SignedOrder},
    zeroex_client::ExchangeClient,
};

/// Everything about an order except its salt and signature.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderTerms {
    pub maker: Address,
    pub taker: Address,
    pub maker_fee: U256,
    pub taker_fee: U256,
    pub maker_token_amount: U256,
    pub maker_token_address: Address,
    pub taker_token_amount: U256,
    pub taker_token_address: Address,
    pub exchange_contract_address: Address,
    pub fee_recipient: Address,
    /// Defaults to [`DEFAULT_EXPIRATION_UNIX_TIMESTAMP_SEC`].
    pub expiration_unix_timestamp_sec: Option<U256>,
}

/// Builds an order from `terms` with a random salt and has the maker sign
/// its hash.
pub async fn create_signed_order<C>(client: &C, terms: OrderTerms) -> Result<SignedOrder>
where
    C: ExchangeClient + ?Sized,
{
    let order = Order {
        maker: terms.maker,
        taker: terms.taker,
        maker_fee: terms.maker_fee,
        taker_fee: terms.taker_fee,
        maker_token_amount: terms.maker_token_amount,
        taker_token_amount: terms.taker_token_amount,
        maker_token_address: terms.maker_token_address,
        taker_token_address: terms.taker_token_address,
        salt: generate_pseudo_random_salt(),
        exchange_contract_address: terms.exchange_contract_address,
        fee_recipient: terms.fee_recipient,
        expiration_unix_timestamp_sec: terms
            .expiration_unix_timestamp_sec
            .unwrap_or(U256::from(DEFAULT_EXPIRATION_UNIX_TIMESTAMP_SEC)),
    };
    let order_hash = order.hash();
    let ec_signature = client
        .sign_order_hash(order_hash, order.maker)
        .await
        .with_context(|| format!("maker {} failed to sign order {order_hash}", order.maker))?;

    Ok(SignedOrder {
        order,
        ec_signature,
    })
}

pub fn generate_pseudo_random_salt() -> U256 {
    U256::from_be_bytes(rand::random::<[u8; 32]>())
}
