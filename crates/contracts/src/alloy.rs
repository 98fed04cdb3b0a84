#[macro_export]
macro_rules! bindings {
    ($contract:ident { $($interface:tt)* }) => {
        paste::paste! {
            // Generate the main bindings in a private module. That allows
            // us to re-export all items in our own module while also adding
            // some items ourselves.
            #[allow(non_snake_case)]
            mod [<$contract Private>] {
                alloy::sol! {
                    #[allow(missing_docs)]
                    #[sol(rpc)]
                    interface $contract {
                        $($interface)*
                    }
                }
            }

            #[allow(non_snake_case)]
            pub mod $contract {
                use alloy::providers::DynProvider;

                pub use super::[<$contract Private>]::$contract::*;
                pub type Instance = [<$contract Instance>]<DynProvider>;
            }
        }
    };
}

// ERC20 token whose balances can be set by anyone. Deployed for every token
// of the test network except the fee token and the wrapped native token.
bindings!(DummyToken {
    event Transfer(address indexed from, address indexed to, uint256 value);
    event Approval(address indexed owner, address indexed spender, uint256 value);

    function name() external view returns (string);
    function symbol() external view returns (string);
    function decimals() external view returns (uint8);
    function totalSupply() external view returns (uint256);
    function balanceOf(address owner) external view returns (uint256);
    function allowance(address owner, address spender) external view returns (uint256);
    function transfer(address to, uint256 value) external returns (bool);
    function transferFrom(address from, address to, uint256 value) external returns (bool);
    function approve(address spender, uint256 value) external returns (bool);
    function setBalance(address target, uint256 value) external;
});

bindings!(Exchange {
    event LogFill(
        address indexed maker,
        address taker,
        address indexed feeRecipient,
        address makerToken,
        address takerToken,
        uint256 filledMakerTokenAmount,
        uint256 filledTakerTokenAmount,
        uint256 paidMakerFee,
        uint256 paidTakerFee,
        bytes32 indexed tokens,
        bytes32 orderHash
    );
    event LogError(uint8 indexed errorId, bytes32 indexed orderHash);

    function ZRX_TOKEN_CONTRACT() external view returns (address);
    function TOKEN_TRANSFER_PROXY_CONTRACT() external view returns (address);
    function filled(bytes32 orderHash) external view returns (uint256);
    function cancelled(bytes32 orderHash) external view returns (uint256);
    function getUnavailableTakerTokenAmount(bytes32 orderHash) external view returns (uint256);
    function fillOrder(
        address[5] orderAddresses,
        uint256[6] orderValues,
        uint256 fillTakerTokenAmount,
        bool shouldThrowOnInsufficientBalanceOrAllowance,
        uint8 v,
        bytes32 r,
        bytes32 s
    ) external returns (uint256 filledTakerTokenAmount);
});

bindings!(TokenRegistry {
    function getTokenAddresses() external view returns (address[]);
    function getTokenMetaData(address token)
        external
        view
        returns (
            address tokenAddress,
            string name,
            string symbol,
            uint8 decimals,
            bytes ipfsHash,
            bytes swarmHash
        );
});

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::{
            primitives::{Address, B256, U256},
            sol_types::SolCall,
        },
    };

    #[test]
    fn fill_order_selector() {
        assert_eq!(Exchange::fillOrderCall::SELECTOR, [0xbc, 0x61, 0x39, 0x4a]);
    }

    #[test]
    fn set_balance_calldata() {
        let call = DummyToken::setBalanceCall {
            target: Address::repeat_byte(1),
            value: U256::from(100),
        };
        let calldata = call.abi_encode();
        assert_eq!(&calldata[..4], &[0xe3, 0x04, 0x43, 0xbc]);
        assert_eq!(calldata.len(), 4 + 2 * 32);
        assert_eq!(&calldata[16..36], Address::repeat_byte(1).as_slice());
        assert_eq!(U256::from_be_slice(&calldata[36..68]), U256::from(100));
    }

    #[test]
    fn unavailable_amount_takes_order_hash() {
        let call = Exchange::getUnavailableTakerTokenAmountCall {
            orderHash: B256::repeat_byte(3),
        };
        assert_eq!(&call.abi_encode()[4..], B256::repeat_byte(3).as_slice());
    }
}
