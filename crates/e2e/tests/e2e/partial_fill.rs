use {
    alloy::primitives::U256,
    e2e::setup::{Harness, run_test},
    zeroex_client::ExchangeClient,
};

#[tokio::test]
#[ignore]
async fn local_node_partially_filled_order() {
    run_test(partially_filled_order).await;
}

async fn partially_filled_order(harness: Harness) {
    let [maker_token, taker_token] = harness.dummy_tokens();
    let [taker] = harness.accounts();

    let signed_order = harness
        .scenarios
        .create_partially_filled_signed_order(
            maker_token.address,
            taker_token.address,
            taker,
            U256::from(100),
            U256::from(40),
        )
        .await
        .unwrap();
    assert_eq!(signed_order.order.maker, harness.scenarios.coinbase());

    let unavailable = harness
        .client
        .unavailable_taker_amount(signed_order.hash())
        .await
        .unwrap();
    assert_eq!(
        signed_order.order.taker_token_amount - unavailable,
        U256::from(60)
    );
    assert_eq!(
        harness
            .client
            .balance(maker_token.address, taker)
            .await
            .unwrap(),
        U256::from(40)
    );
}

#[tokio::test]
#[ignore]
async fn local_node_completely_filled_order() {
    run_test(completely_filled_order).await;
}

async fn completely_filled_order(harness: Harness) {
    let [maker_token, taker_token] = harness.dummy_tokens();
    let [taker] = harness.accounts();

    let signed_order = harness
        .scenarios
        .create_partially_filled_signed_order(
            maker_token.address,
            taker_token.address,
            taker,
            U256::from(100),
            U256::from(100),
        )
        .await
        .unwrap();

    let unavailable = harness
        .client
        .unavailable_taker_amount(signed_order.hash())
        .await
        .unwrap();
    assert_eq!(unavailable, U256::from(100));
}
