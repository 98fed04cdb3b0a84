use {
    alloy::{
        primitives::{Address, B256, U256},
        signers::{SignerSync, local::PrivateKeySigner},
    },
    anyhow::{Context, Result, bail},
    serde::{Deserialize, Serialize},
};

/// ECDSA signature of an order hash in the "eth_sign" scheme: the signed
/// message is the order hash prefixed with
/// `"\x19Ethereum Signed Message:\n32"`.
///
/// https://eips.ethereum.org/EIPS/eip-191
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct EcdsaSignature {
    /// 27 or 28
    pub v: u8,
    pub r: B256,
    pub s: B256,
}

impl EcdsaSignature {
    pub fn sign(hash: &B256, signer: &PrivateKeySigner) -> Result<Self> {
        let signature = signer
            .sign_message_sync(hash.as_slice())
            .context("failed to sign order hash")?;
        Ok(Self {
            v: 27 + u8::from(signature.v()),
            r: B256::from(signature.r().to_be_bytes::<32>()),
            s: B256::from(signature.s().to_be_bytes::<32>()),
        })
    }

    /// Recovers the address that signed the given hash.
    pub fn recover(&self, hash: &B256) -> Result<Address> {
        let parity = match self.v {
            27 => false,
            28 => true,
            v => bail!("invalid signature recovery id {v}"),
        };
        let signature = alloy::primitives::Signature::new(
            U256::from_be_bytes(self.r.0),
            U256::from_be_bytes(self.s.0),
            parity,
        );
        signature
            .recover_address_from_msg(hash.as_slice())
            .context("unexpectedly invalid signature")
    }
}
