use {
    crate::signature::EcdsaSignature,
    alloy::primitives::{Address, B256, U256, keccak256},
    anyhow::Result,
    number::serialization::HexOrDecimalU256,
    serde::{Deserialize, Serialize},
    serde_with::serde_as,
};

/// An order of the exchange protocol, before it is signed by the maker.
///
/// These are the exact fields that get hashed and whose signature is verified
/// by the exchange contract.
#[serde_as]
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub maker: Address,
    pub taker: Address,
    #[serde_as(as = "HexOrDecimalU256")]
    pub maker_fee: U256,
    #[serde_as(as = "HexOrDecimalU256")]
    pub taker_fee: U256,
    #[serde_as(as = "HexOrDecimalU256")]
    pub maker_token_amount: U256,
    #[serde_as(as = "HexOrDecimalU256")]
    pub taker_token_amount: U256,
    pub maker_token_address: Address,
    pub taker_token_address: Address,
    #[serde_as(as = "HexOrDecimalU256")]
    pub salt: U256,
    pub exchange_contract_address: Address,
    pub fee_recipient: Address,
    #[serde_as(as = "HexOrDecimalU256")]
    pub expiration_unix_timestamp_sec: U256,
}

impl Order {
    const HASH_DATA_LEN: usize = 6 * 20 + 6 * 32;

    /// Returns the order hash: keccak256 over the tightly packed order
    /// addresses followed by the order values.
    pub fn hash(&self) -> B256 {
        let mut hash_data = [0u8; Self::HASH_DATA_LEN];
        let addresses = [
            self.exchange_contract_address,
            self.maker,
            self.taker,
            self.maker_token_address,
            self.taker_token_address,
            self.fee_recipient,
        ];
        for (chunk, address) in hash_data[..120].chunks_exact_mut(20).zip(addresses) {
            chunk.copy_from_slice(address.as_slice());
        }
        let values = [
            self.maker_token_amount,
            self.taker_token_amount,
            self.maker_fee,
            self.taker_fee,
            self.expiration_unix_timestamp_sec,
            self.salt,
        ];
        for (chunk, value) in hash_data[120..].chunks_exact_mut(32).zip(values) {
            chunk.copy_from_slice(&value.to_be_bytes::<32>());
        }
        keccak256(hash_data)
    }
}

/// An [`Order`] together with the maker's signature of its hash.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedOrder {
    #[serde(flatten)]
    pub order: Order,
    pub ec_signature: EcdsaSignature,
}

impl SignedOrder {
    pub fn hash(&self) -> B256 {
        self.order.hash()
    }

    /// Checks that the signature was produced by the order's maker.
    pub fn has_valid_signature(&self) -> Result<bool> {
        Ok(self.ec_signature.recover(&self.hash())? == self.order.maker)
    }
}
