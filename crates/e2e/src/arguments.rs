use {
    alloy::primitives::Address,
    clap::Parser,
    ethrpc::alloy::{Confirmation, wallet::TEST_MNEMONIC},
    std::{
        fmt::{self, Display, Formatter},
        time::Duration,
    },
};

/// Where to find the test network and the deployed 0x contracts.
///
/// The defaults match the 0x development snapshot of a local test node.
#[derive(Clone, Debug, Parser)]
pub struct Arguments {
    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: String,

    /// Address of the 0x exchange contract.
    #[clap(
        long,
        env = "EXCHANGE_ADDRESS",
        default_value = "0x48bacb9266a570d521063ef5dd96e61686dbe788"
    )]
    pub exchange: Address,

    /// Address of the token registry listing the test tokens.
    #[clap(
        long,
        env = "TOKEN_REGISTRY_ADDRESS",
        default_value = "0x0b1ba0af832d7c05fd64161e0db78e85978e8082"
    )]
    pub token_registry: Address,

    /// Mnemonic of the funded test accounts.
    #[clap(long, env, default_value = TEST_MNEMONIC)]
    pub mnemonic: String,

    /// Number of accounts derived from the mnemonic. The first one is the
    /// coinbase.
    #[clap(long, env, default_value = "10")]
    pub accounts: u32,

    /// How long to wait for a submitted transaction to be mined.
    #[clap(long, env, default_value = "30s", value_parser = humantime::parse_duration)]
    pub confirmation_timeout: Duration,

    #[clap(
        long,
        env,
        default_value = "warn,e2e=debug,testlib=debug,zeroex_client=debug,ethrpc=debug"
    )]
    pub log_filter: String,
}

impl Arguments {
    /// Arguments taken from the environment only, so that test runner flags
    /// are not mistaken for ours.
    pub fn from_env() -> Self {
        Self::parse_from(["e2e"])
    }

    pub fn client_config(&self) -> zeroex_client::Config {
        zeroex_client::Config {
            node_url: self.node_url.clone(),
            mnemonic: self.mnemonic.clone(),
            accounts: self.accounts,
            exchange: self.exchange,
            confirmation: Confirmation {
                timeout: self.confirmation_timeout,
                ..Default::default()
            },
        }
    }
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "node_url: {}", self.node_url)?;
        writeln!(f, "exchange: {}", self.exchange)?;
        writeln!(f, "token_registry: {}", self.token_registry)?;
        writeln!(f, "mnemonic: SECRET")?;
        writeln!(f, "accounts: {}", self.accounts)?;
        writeln!(f, "confirmation_timeout: {:?}", self.confirmation_timeout)?;
        writeln!(f, "log_filter: {}", self.log_filter)?;
        Ok(())
    }
}
