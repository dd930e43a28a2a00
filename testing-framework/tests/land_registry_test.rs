#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
//! Land registry integration tests
//!
//! Each test runs on a fresh default devnet: genesis at height 1, the
//! registry deployed by `deployer`, wallets `wallet_1`..`wallet_9`.

use landreg_testing_framework::prelude::*;

#[test]
fn ensure_that_a_property_can_be_registered_and_read() -> Result<()> {
    LedgerTest::new("Ensure that a property can be registered and read").run(|chain, accounts| {
        let user1 = accounts.get("wallet_1")?;

        let block = chain.mine_block(vec![Tx::contract_call(
            "land-registry",
            "register-property",
            vec![types::uint(1), types::ascii("Property 1 details")],
            &user1.address,
        )])?;
        assert_eq!(block.receipts.len(), 1);
        assert_eq!(block.height, 2);
        assert_eq!(block.receipts[0].result, "(ok true)");

        let block = chain.mine_block(vec![Tx::contract_call(
            "land-registry",
            "get-property-details",
            vec![types::uint(1)],
            &user1.address,
        )])?;
        assert_eq!(block.receipts.len(), 1);
        assert_eq!(block.height, 3);
        assert_eq!(
            block.receipts[0].result,
            format!(
                "(some {{owner: {}, details: \"Property 1 details\"}})",
                user1.address
            )
        );
        Ok(())
    })
}

#[test]
fn registered_record_fields_through_assertions() -> Result<()> {
    LedgerTest::new("record fields").run(|chain, accounts| {
        let user1 = accounts.get("wallet_1")?;

        let block = chain.mine_block(vec![Tx::contract_call(
            "land-registry",
            "register-property",
            vec![types::uint(1), types::ascii("Property 1 details")],
            &user1.address,
        )])?;
        block
            .expect_height(2)?
            .expect_receipt_count(1)?
            .receipt(0)?
            .result
            .expect_ok()?
            .expect_bool(true)?;

        let details = chain.call_read_only(
            "land-registry",
            "get-property-details",
            vec![types::uint(1)],
            &user1.address,
        )?;
        let record = details.expect_some()?.expect_tuple()?;
        record["owner"].expect_principal(&user1.address)?;
        record["details"].expect_ascii("Property 1 details")?;

        // read-only calls do not mine
        assert_eq!(chain.block_height(), 2);
        Ok(())
    })
}

#[test]
fn unregistered_property_reads_none() -> Result<()> {
    LedgerTest::new("unregistered id").run(|chain, accounts| {
        let user2 = accounts.get("wallet_2")?;
        let block = chain.mine_block(vec![Tx::contract_call(
            "land-registry",
            "get-property-details",
            vec![types::uint(7)],
            &user2.address,
        )])?;
        block.receipt(0)?.result.expect_none()
    })
}

#[test]
fn duplicate_registration_keeps_first_owner() -> Result<()> {
    LedgerTest::new("duplicate id").run(|chain, accounts| {
        let user1 = accounts.get("wallet_1")?;
        let user2 = accounts.get("wallet_2")?;

        chain.mine_block(vec![Tx::contract_call(
            "land-registry",
            "register-property",
            vec![types::uint(1), types::ascii("first")],
            &user1.address,
        )])?;
        let block = chain.mine_block(vec![Tx::contract_call(
            "land-registry",
            "register-property",
            vec![types::uint(1), types::ascii("second")],
            &user2.address,
        )])?;
        block.receipt(0)?.result.expect_err()?.expect_uint(100)?;
        assert!(block.receipts[0].events.is_empty());

        let details = chain.call_read_only(
            "land-registry",
            "get-property-details",
            vec![types::uint(1)],
            &user2.address,
        )?;
        details
            .expect_some()?
            .expect_literal(&format!("{{owner: {}, details: \"first\"}}", user1.address))
    })
}

#[test]
fn several_transactions_in_one_block_keep_submission_order() -> Result<()> {
    LedgerTest::new("submission order").run(|chain, accounts| {
        let user1 = accounts.get("wallet_1")?;
        let user3 = accounts.get("wallet_3")?;

        let block = chain.mine_block(vec![
            Tx::contract_call(
                "land-registry",
                "register-property",
                vec![types::uint(5), types::ascii("Plot 5")],
                &user3.address,
            ),
            Tx::contract_call(
                "land-registry",
                "get-property-details",
                vec![types::uint(5)],
                &user1.address,
            ),
        ])?;

        block.expect_height(2)?.expect_receipt_count(2)?;
        assert_eq!(block.receipts[0].result, "(ok true)");
        let record = block.receipts[1].result.expect_some()?.expect_tuple()?;
        record["owner"].expect_principal(&user3.address)?;
        Ok(())
    })
}

#[test]
fn bad_arguments_leave_the_chain_untouched() -> Result<()> {
    LedgerTest::new("argument checks").run(|chain, accounts| {
        let user1 = accounts.get("wallet_1")?;

        let too_long = "x".repeat(257);
        let err = chain
            .mine_block(vec![
                Tx::contract_call(
                    "land-registry",
                    "register-property",
                    vec![types::uint(1), types::ascii("ok")],
                    &user1.address,
                ),
                Tx::contract_call(
                    "land-registry",
                    "register-property",
                    vec![types::uint(2), types::ascii(too_long)],
                    &user1.address,
                ),
            ])
            .unwrap_err();
        assert!(matches!(err, ChainError::TxFailed { index: 1, .. }));

        assert_eq!(chain.block_height(), 1);
        assert_eq!(chain.nonce(&user1.address), 0);
        let details = chain.call_read_only(
            "land-registry",
            "get-property-details",
            vec![types::uint(1)],
            &user1.address,
        )?;
        details.expect_none()
    })
}

#[test]
fn empty_blocks_advance_height() -> Result<()> {
    LedgerTest::new("empty blocks").run(|chain, accounts| {
        let user1 = accounts.get("wallet_1")?;

        assert!(chain.mine_empty_block().is_empty());
        chain.mine_empty_block_until(10)?;
        assert_eq!(chain.block_height(), 10);
        assert!(chain.mine_empty_block_until(5).is_err());

        let block = chain.mine_block(vec![Tx::contract_call(
            "land-registry",
            "register-property",
            vec![types::uint(1), types::ascii("late")],
            &user1.address,
        )])?;
        block.expect_height(11)?;
        Ok(())
    })
}

#[test]
fn block_exports_as_json() -> Result<()> {
    LedgerTest::new("json export").run(|chain, accounts| {
        let user1 = accounts.get("wallet_1")?;
        let block = chain.mine_block(vec![Tx::contract_call(
            "land-registry",
            "register-property",
            vec![types::uint(1), types::ascii("Property 1 details")],
            &user1.address,
        )])?;

        let json: serde_json::Value = serde_json::from_str(&block.to_json()?)?;
        assert_eq!(json["height"], 2);
        assert_eq!(json["receipts"][0]["result"], "(ok true)");
        assert_eq!(json["receipts"][0]["sender"], user1.address.to_string());
        Ok(())
    })
}
