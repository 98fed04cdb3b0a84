use {
    alloy::primitives::U256,
    e2e::setup::{Harness, run_test},
    number::units::to_base_units,
    testlib::{Fees, OrderOptions, OrderParties},
    zeroex_client::ExchangeClient,
};

#[tokio::test]
#[ignore]
async fn local_node_fillable_order() {
    run_test(fillable_order).await;
}

async fn fillable_order(harness: Harness) {
    let [maker_token, taker_token] = harness.dummy_tokens();
    let [maker, taker] = harness.accounts();
    let amount = to_base_units(U256::from(5), maker_token.decimals).unwrap();

    tracing::info!("Creating fillable order.");
    let signed_order = harness
        .scenarios
        .create_fillable_signed_order(
            OrderParties {
                maker_token: maker_token.address,
                taker_token: taker_token.address,
                maker,
                taker,
            },
            amount,
            OrderOptions::default(),
        )
        .await
        .unwrap();

    assert!(signed_order.has_valid_signature().unwrap());
    assert_eq!(signed_order.order.maker_fee, U256::ZERO);
    assert_eq!(signed_order.order.taker_fee, U256::ZERO);
    assert_eq!(
        signed_order.order.exchange_contract_address,
        harness.client.exchange_address()
    );

    let client = &harness.client;
    assert_eq!(
        client.balance(maker_token.address, maker).await.unwrap(),
        amount
    );
    assert_eq!(
        client.proxy_allowance(maker_token.address, maker).await.unwrap(),
        amount
    );
    assert_eq!(
        client.balance(taker_token.address, taker).await.unwrap(),
        amount
    );
    assert_eq!(
        client.proxy_allowance(taker_token.address, taker).await.unwrap(),
        amount
    );

    tracing::info!("Filling order completely.");
    let tx_hash = client
        .fill_order(&signed_order, amount, true, taker)
        .await
        .unwrap();
    client.await_transaction_mined(tx_hash).await.unwrap();

    assert_eq!(
        client
            .unavailable_taker_amount(signed_order.hash())
            .await
            .unwrap(),
        amount
    );
    assert_eq!(
        client.balance(maker_token.address, taker).await.unwrap(),
        amount
    );
    assert_eq!(
        client.balance(taker_token.address, maker).await.unwrap(),
        amount
    );
}

#[tokio::test]
#[ignore]
async fn local_node_fillable_order_with_fees() {
    run_test(fillable_order_with_fees).await;
}

async fn fillable_order_with_fees(harness: Harness) {
    let [maker_token, taker_token] = harness.dummy_tokens();
    let [maker, taker, fee_recipient] = harness.accounts();
    let zrx = harness.client.zrx_token_address();
    let fees = Fees {
        maker_fee: U256::from(20),
        taker_fee: U256::from(10),
        fee_recipient,
    };

    let signed_order = harness
        .scenarios
        .create_fillable_signed_order_with_fees(
            OrderParties {
                maker_token: maker_token.address,
                taker_token: taker_token.address,
                maker,
                taker,
            },
            fees,
            U256::from(100),
            OrderOptions::default(),
        )
        .await
        .unwrap();
    assert_eq!(signed_order.order.fee_recipient, fee_recipient);

    let client = &harness.client;
    assert_eq!(client.balance(zrx, maker).await.unwrap(), fees.maker_fee);
    assert_eq!(
        client.proxy_allowance(zrx, maker).await.unwrap(),
        fees.maker_fee
    );
    assert_eq!(client.balance(zrx, taker).await.unwrap(), fees.taker_fee);
    assert_eq!(
        client.proxy_allowance(zrx, taker).await.unwrap(),
        fees.taker_fee
    );

    let tx_hash = client
        .fill_order(&signed_order, U256::from(100), true, taker)
        .await
        .unwrap();
    client.await_transaction_mined(tx_hash).await.unwrap();
    assert_eq!(
        client.balance(zrx, fee_recipient).await.unwrap(),
        U256::from(30)
    );
}

#[tokio::test]
#[ignore]
async fn local_node_asymmetric_order() {
    run_test(asymmetric_order).await;
}

async fn asymmetric_order(harness: Harness) {
    let [maker_token, taker_token] = harness.dummy_tokens();
    let [maker] = harness.accounts();

    // Anyone may fill an order without taker, so the taker side is not funded.
    let signed_order = harness
        .scenarios
        .create_asymmetric_fillable_signed_order(
            OrderParties {
                maker_token: maker_token.address,
                taker_token: taker_token.address,
                maker,
                taker: testlib::constants::NULL_ADDRESS,
            },
            U256::from(300),
            U256::from(7),
            OrderOptions {
                expiration_unix_timestamp_sec: Some(U256::from(4_000_000_000u64)),
            },
        )
        .await
        .unwrap();

    let order = signed_order.order;
    assert_eq!(order.maker_token_amount, U256::from(300));
    assert_eq!(order.taker_token_amount, U256::from(7));
    assert_eq!(order.expiration_unix_timestamp_sec, U256::from(4_000_000_000u64));
    assert_eq!(
        harness
            .client
            .balance(maker_token.address, maker)
            .await
            .unwrap(),
        U256::from(300)
    );
}
