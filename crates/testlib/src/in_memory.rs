use {
    alloy::{
        primitives::{Address, B256, TxHash, U256, keccak256},
        signers::local::PrivateKeySigner,
    },
    anyhow::{Context, Result},
    model::{order::SignedOrder, signature::EcdsaSignature},
    std::{
        collections::HashMap,
        sync::Mutex,
        time::{SystemTime, UNIX_EPOCH},
    },
    zeroex_client::{ExchangeClient, MinedTransaction, TestingClient},
};

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("{owner} holds {balance} of {token} but {required} are required")]
    InsufficientBalance {
        token: Address,
        owner: Address,
        balance: U256,
        required: U256,
    },
    #[error("{owner} allows the proxy {allowance} of {token} but {required} are required")]
    InsufficientAllowance {
        token: Address,
        owner: Address,
        allowance: U256,
        required: U256,
    },
    #[error("order {0} is not signed by its maker")]
    InvalidSignature(B256),
    #[error("order {0} can only be filled by {1}")]
    InvalidTaker(B256, Address),
    #[error("order {0} cannot be filled with zero order or fill amounts")]
    InvalidFillAmount(B256),
    #[error("unknown transaction {0}")]
    UnknownTransaction(TxHash),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TransactionKind {
    SetBalance {
        token: Address,
        target: Address,
        amount: U256,
    },
    Transfer {
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    },
    Approve {
        token: Address,
        owner: Address,
        amount: U256,
    },
    Fill {
        order_hash: B256,
        filled_taker_token_amount: U256,
    },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transaction {
    pub hash: TxHash,
    pub block_number: u64,
    pub kind: TransactionKind,
}

#[derive(Default)]
struct State {
    balances: HashMap<(Address, Address), U256>,
    allowances: HashMap<(Address, Address), U256>,
    filled: HashMap<B256, U256>,
    transactions: Vec<Transaction>,
}

impl State {
    fn balance(&self, token: Address, owner: Address) -> U256 {
        self.balances
            .get(&(token, owner))
            .copied()
            .unwrap_or_default()
    }

    fn allowance(&self, token: Address, owner: Address) -> U256 {
        self.allowances
            .get(&(token, owner))
            .copied()
            .unwrap_or_default()
    }

    fn check_balance(
        &self,
        token: Address,
        owner: Address,
        required: U256,
    ) -> Result<(), LedgerError> {
        let balance = self.balance(token, owner);
        if balance < required {
            return Err(LedgerError::InsufficientBalance {
                token,
                owner,
                balance,
                required,
            });
        }
        Ok(())
    }

    fn check_allowance(
        &self,
        token: Address,
        owner: Address,
        required: U256,
    ) -> Result<(), LedgerError> {
        let allowance = self.allowance(token, owner);
        if allowance < required {
            return Err(LedgerError::InsufficientAllowance {
                token,
                owner,
                allowance,
                required,
            });
        }
        Ok(())
    }

    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        self.check_balance(token, from, amount)?;
        *self.balances.entry((token, from)).or_default() -= amount;
        *self.balances.entry((token, to)).or_default() += amount;
        Ok(())
    }

    /// Transfer performed by the token transfer proxy, consuming allowance.
    fn proxy_transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        self.check_allowance(token, from, amount)?;
        self.transfer(token, from, to, amount)?;
        *self.allowances.entry((token, from)).or_default() -= amount;
        Ok(())
    }

    fn record(&mut self, kind: TransactionKind) -> TxHash {
        let block_number = self.transactions.len() as u64 + 1;
        let hash = keccak256(block_number.to_be_bytes());
        self.transactions.push(Transaction {
            hash,
            block_number,
            kind,
        });
        hash
    }
}

/// Exchange ledger kept in memory, behaving like a test node that mines
/// every transaction as soon as it is submitted.
///
/// Transactions that would revert are rejected on submission, the way a node
/// rejects them during gas estimation.
pub struct InMemoryExchange {
    zrx_token: Address,
    accounts: Vec<Address>,
    signers: HashMap<Address, PrivateKeySigner>,
    state: Mutex<State>,
}

impl InMemoryExchange {
    /// Creates an exchange with `accounts` deterministically generated
    /// accounts whose keys it can sign with.
    pub fn new(zrx_token: Address, accounts: usize) -> Self {
        let signers = (0..accounts)
            .filter_map(|index| {
                // Start from a high id so the keys differ from well known
                // development keys.
                let id = 100_500 + index as u64;
                let mut key = [0u8; 32];
                key[24..].copy_from_slice(&id.to_be_bytes());
                PrivateKeySigner::from_bytes(&B256::from(key)).ok()
            })
            .collect::<Vec<_>>();

        Self {
            zrx_token,
            accounts: signers.iter().map(PrivateKeySigner::address).collect(),
            signers: signers
                .into_iter()
                .map(|signer| (signer.address(), signer))
                .collect(),
            state: Default::default(),
        }
    }

    pub fn accounts(&self) -> &[Address] {
        &self.accounts
    }

    /// Credits `amount` of `token` to `owner` without recording a
    /// transaction, e.g. for tokens whose supply already exists on a real
    /// test network.
    pub fn mint(&self, token: Address, owner: Address, amount: U256) {
        *self
            .state
            .lock()
            .unwrap()
            .balances
            .entry((token, owner))
            .or_default() += amount;
    }

    pub fn balance_of(&self, token: Address, owner: Address) -> U256 {
        self.state.lock().unwrap().balance(token, owner)
    }

    pub fn allowance_of(&self, token: Address, owner: Address) -> U256 {
        self.state.lock().unwrap().allowance(token, owner)
    }

    /// All mined transactions in submission order.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.state.lock().unwrap().transactions.clone()
    }

    fn fill(
        &self,
        signed_order: &SignedOrder,
        fill_taker_token_amount: U256,
        should_throw: bool,
        taker: Address,
    ) -> Result<TxHash> {
        let order = &signed_order.order;
        let order_hash = order.hash();
        if order.taker != Address::ZERO && order.taker != taker {
            return Err(LedgerError::InvalidTaker(order_hash, order.taker).into());
        }
        if !signed_order.has_valid_signature()? {
            return Err(LedgerError::InvalidSignature(order_hash).into());
        }
        if [
            order.maker_token_amount,
            order.taker_token_amount,
            fill_taker_token_amount,
        ]
        .iter()
        .any(U256::is_zero)
        {
            return Err(LedgerError::InvalidFillAmount(order_hash).into());
        }

        let mut state = self.state.lock().unwrap();
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system clock before unix epoch")?
            .as_secs();
        let filled = state.filled.get(&order_hash).copied().unwrap_or_default();
        let remaining = order.taker_token_amount.saturating_sub(filled);
        let expired = U256::from(now) >= order.expiration_unix_timestamp_sec;

        let mut filled_taker_token_amount = if expired {
            U256::ZERO
        } else {
            fill_taker_token_amount.min(remaining)
        };
        let proportional = |amount: U256| -> Result<U256> {
            Ok(amount
                .checked_mul(filled_taker_token_amount)
                .context("fill amount overflows")?
                / order.taker_token_amount)
        };
        let filled_maker_token_amount = proportional(order.maker_token_amount)?;
        let (paid_maker_fee, paid_taker_fee) = if order.fee_recipient == Address::ZERO {
            (U256::ZERO, U256::ZERO)
        } else {
            (proportional(order.maker_fee)?, proportional(order.taker_fee)?)
        };

        let settlement = [
            (order.maker_token_address, order.maker, taker, filled_maker_token_amount),
            (order.taker_token_address, taker, order.maker, filled_taker_token_amount),
            (self.zrx_token, order.maker, order.fee_recipient, paid_maker_fee),
            (self.zrx_token, taker, order.fee_recipient, paid_taker_fee),
        ];
        let mut required = HashMap::<(Address, Address), U256>::new();
        for (token, from, _, amount) in settlement {
            *required.entry((token, from)).or_default() += amount;
        }
        let funded = required.iter().try_for_each(|(&(token, owner), &amount)| {
            state.check_balance(token, owner, amount)?;
            state.check_allowance(token, owner, amount)
        });
        if let Err(err) = funded {
            if should_throw {
                return Err(err.into());
            }
            tracing::debug!(?order_hash, ?err, "order not fillable, filling nothing");
            filled_taker_token_amount = U256::ZERO;
        }

        if !filled_taker_token_amount.is_zero() {
            for (token, from, to, amount) in settlement {
                if !amount.is_zero() {
                    state.proxy_transfer(token, from, to, amount)?;
                }
            }
            *state.filled.entry(order_hash).or_default() += filled_taker_token_amount;
        }

        Ok(state.record(TransactionKind::Fill {
            order_hash,
            filled_taker_token_amount,
        }))
    }
}

#[async_trait::async_trait]
impl ExchangeClient for InMemoryExchange {
    async fn transfer(
        &self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<TxHash> {
        let mut state = self.state.lock().unwrap();
        state.transfer(token, from, to, amount)?;
        Ok(state.record(TransactionKind::Transfer {
            token,
            from,
            to,
            amount,
        }))
    }

    async fn balance(&self, token: Address, owner: Address) -> Result<U256> {
        Ok(self.balance_of(token, owner))
    }

    async fn proxy_allowance(&self, token: Address, owner: Address) -> Result<U256> {
        Ok(self.allowance_of(token, owner))
    }

    async fn set_proxy_allowance(
        &self,
        token: Address,
        owner: Address,
        amount: U256,
    ) -> Result<TxHash> {
        let mut state = self.state.lock().unwrap();
        state.allowances.insert((token, owner), amount);
        Ok(state.record(TransactionKind::Approve {
            token,
            owner,
            amount,
        }))
    }

    async fn sign_order_hash(&self, order_hash: B256, signer: Address) -> Result<EcdsaSignature> {
        let key = self
            .signers
            .get(&signer)
            .ok_or(zeroex_client::Error::UnknownSigner(signer))?;
        EcdsaSignature::sign(&order_hash, key)
    }

    async fn fill_order(
        &self,
        order: &SignedOrder,
        fill_taker_token_amount: U256,
        should_throw_on_insufficient_balance_or_allowance: bool,
        taker: Address,
    ) -> Result<TxHash> {
        self.fill(
            order,
            fill_taker_token_amount,
            should_throw_on_insufficient_balance_or_allowance,
            taker,
        )
    }

    async fn unavailable_taker_amount(&self, order_hash: B256) -> Result<U256> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .filled
            .get(&order_hash)
            .copied()
            .unwrap_or_default())
    }

    async fn await_transaction_mined(&self, tx_hash: TxHash) -> Result<MinedTransaction> {
        let state = self.state.lock().unwrap();
        let transaction = state
            .transactions
            .iter()
            .find(|transaction| transaction.hash == tx_hash)
            .ok_or(LedgerError::UnknownTransaction(tx_hash))?;
        Ok(MinedTransaction {
            tx_hash,
            block_number: Some(transaction.block_number),
        })
    }
}

#[async_trait::async_trait]
impl TestingClient for InMemoryExchange {
    async fn set_balance(
        &self,
        token: Address,
        target: Address,
        amount: U256,
        _from: Address,
    ) -> Result<TxHash> {
        let mut state = self.state.lock().unwrap();
        state.balances.insert((token, target), amount);
        Ok(state.record(TransactionKind::SetBalance {
            token,
            target,
            amount,
        }))
    }
}
