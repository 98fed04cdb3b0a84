use {
    alloy::{
        network::EthereumWallet,
        primitives::Address,
        signers::local::{MnemonicBuilder, PrivateKeySigner, coins_bip39::English},
    },
    anyhow::{Context, Result},
    std::collections::HashMap,
};

/// Mnemonic of the accounts funded by the protocol's development network
/// snapshot.
pub const TEST_MNEMONIC: &str =
    "concert load couple harbor equip island argue ramp clarify fence smart topic";

/// The local signers of a set of test accounts, in derivation order.
#[derive(Clone, Debug)]
pub struct TestAccounts {
    signers: Vec<PrivateKeySigner>,
}

impl TestAccounts {
    /// Derives the first `count` accounts of `phrase` using the default
    /// Ethereum derivation path.
    pub fn from_mnemonic(phrase: &str, count: u32) -> Result<Self> {
        let signers = (0..count)
            .map(|index| {
                MnemonicBuilder::<English>::default()
                    .phrase(phrase)
                    .index(index)
                    .with_context(|| format!("invalid derivation index {index}"))?
                    .build()
                    .context("failed to derive test account")
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { signers })
    }

    pub fn addresses(&self) -> Vec<Address> {
        self.signers.iter().map(PrivateKeySigner::address).collect()
    }

    /// Signers keyed by their address.
    pub fn by_address(&self) -> HashMap<Address, PrivateKeySigner> {
        self.signers
            .iter()
            .map(|signer| (signer.address(), signer.clone()))
            .collect()
    }

    /// Wallet containing all accounts, with the first one as default signer.
    pub fn wallet(&self) -> Result<EthereumWallet> {
        let (first, rest) = self
            .signers
            .split_first()
            .context("no test accounts to build a wallet from")?;
        let mut wallet = EthereumWallet::new(first.clone());
        for signer in rest {
            wallet.register_signer(signer.clone());
        }
        Ok(wallet)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::{network::NetworkWallet, primitives::address}};

    #[test]
    fn derives_development_accounts() {
        let accounts = TestAccounts::from_mnemonic(TEST_MNEMONIC, 3).unwrap();
        let addresses = accounts.addresses();
        assert_eq!(addresses.len(), 3);
        assert_eq!(
            addresses[0],
            address!("5409ed021d9299bf6814279a6a1411a7e866a631")
        );
        assert_eq!(accounts.by_address().len(), 3);
    }

    #[test]
    fn wallet_contains_all_accounts() {
        let accounts = TestAccounts::from_mnemonic(TEST_MNEMONIC, 2).unwrap();
        let wallet = accounts.wallet().unwrap();
        for address in accounts.addresses() {
            assert!(NetworkWallet::<alloy::network::Ethereum>::has_signer_for(
                &wallet, &address
            ));
        }
    }

    #[test]
    fn empty_wallet_is_an_error() {
        let accounts = TestAccounts::from_mnemonic(TEST_MNEMONIC, 0).unwrap();
        assert!(accounts.wallet().is_err());
    }
}
