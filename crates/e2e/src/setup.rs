use {
    crate::Arguments,
    alloy::primitives::Address,
    anyhow::{Context, Result},
    ethrpc::test_node::Resetter,
    futures::FutureExt,
    model::token::Token,
    std::{
        future::Future,
        panic::{self, AssertUnwindSafe},
        sync::{Arc, Mutex},
    },
    testlib::FillScenarios,
    zeroex_client::AlloyClient,
};

/// Everything a test needs to create orders on the test node.
pub struct Harness {
    pub client: Arc<AlloyClient>,
    pub scenarios: FillScenarios,
    pub tokens: Vec<Token>,
}

impl Harness {
    /// Connects to the exchange, loads the registered tokens and seeds the
    /// coinbase with every dummy token.
    pub async fn connect(args: &Arguments) -> Result<Self> {
        let client = Arc::new(AlloyClient::connect(&args.client_config()).await?);
        let tokens = client.tokens(args.token_registry).await?;
        let scenarios = FillScenarios::new(
            client.clone(),
            client.user_addresses(),
            tokens.clone(),
            client.zrx_token_address(),
            client.exchange_address(),
        )?;
        scenarios
            .init_token_balances()
            .await
            .context("failed to seed coinbase balances")?;
        Ok(Self {
            client,
            scenarios,
            tokens,
        })
    }

    /// The first `N` registered tokens that are neither ZRX nor WETH.
    pub fn dummy_tokens<const N: usize>(&self) -> [&Token; N] {
        let tokens = self
            .tokens
            .iter()
            .filter(|token| !token.is_reserved())
            .collect::<Vec<_>>();
        match tokens.get(..N).and_then(|tokens| tokens.try_into().ok()) {
            Some(tokens) => tokens,
            None => panic!("registry lists {} dummy tokens, {N} needed", tokens.len()),
        }
    }

    /// The test accounts after the coinbase.
    pub fn accounts<const N: usize>(&self) -> [Address; N] {
        let addresses = self.scenarios.user_addresses();
        match addresses.get(1..=N).and_then(|addresses| addresses.try_into().ok()) {
            Some(addresses) => addresses,
            None => panic!("{} test accounts, {N} needed", addresses.len() - 1),
        }
    }
}

static NODE_MUTEX: Mutex<()> = Mutex::new(());

/// *Testing* function that takes a closure and runs it against the local
/// test node. Before each test it takes a snapshot of the chain, which is
/// restored at the end of the test, so that balances and allowances created by
/// one test never leak into the next.
///
/// This function also initializes tracing.
///
/// Note that tests calling this function will not be run simultaneously.
pub async fn run_test<F, Fut>(f: F)
where
    F: FnOnce(Harness) -> Fut,
    Fut: Future<Output = ()>,
{
    let args = Arguments::from_env();
    observe::tracing::initialize_reentrant(&args.log_filter);
    tracing::info!("running with arguments:\n{args}");

    // The mutex is expected to become poisoned if a test panics. We only care
    // about the locked state, not the data.
    let _lock = NODE_MUTEX.lock();

    let provider = ethrpc::alloy::provider(&args.node_url).unwrap();
    let resetter = Resetter::new(provider).await.unwrap();
    let harness = Harness::connect(&args).await.unwrap();

    // `catch_unwind` does not catch every panic. In that case the node is not
    // reset, which is acceptable for a test environment.
    let result = AssertUnwindSafe(f(harness)).catch_unwind().await;

    resetter.reset().await.unwrap();

    if let Err(err) = result {
        panic::resume_unwind(err);
    }
}
