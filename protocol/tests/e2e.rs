//! End-to-end tests for the envelope lifecycle.
//!
//! Each test goes through the public API only: build or parse an envelope,
//! sign it, move it between base64 XDR and TxRep, and check that nothing
//! is lost on the way.

use lumen_protocol::config::{Network, MAX_TXREP_DEPTH};
use lumen_protocol::crypto::KeyPair;
use lumen_protocol::transaction::{
    sign, transaction_hash, verify_envelope, FeeBumpBuilder, TransactionBuilder,
};
use lumen_protocol::txrep::{from_txrep, to_txrep, TxRepError};
use lumen_protocol::types::operation::{
    AllowTrustOp, BeginSponsoringFutureReservesOp, ClaimClaimableBalanceOp, ClawbackOp,
    InvokeHostFunctionOp, LiquidityPoolDepositOp, ManageBuyOfferOp, ManageSellOfferOp,
    PathPaymentStrictSendOp, RevokeSponsorshipOp, SetOptionsOp, SetTrustLineFlagsOp,
};
use lumen_protocol::types::soroban::{HostFunction, InvokeContractArgs, ScAddress, ScVal};
use lumen_protocol::types::{
    AccountId, Asset, AssetCode, ChangeTrustAsset, ClaimPredicate, ClaimableBalanceId, Claimant,
    LedgerKey, LiquidityPoolParameters, Memo, MuxedAccount, Operation, OperationBody, Price,
    SignerKey, TransactionEnvelope,
};
use lumen_protocol::xdr::{ReadXdr, WriteXdr};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

const SCENARIO_ONE_XDR: &str = "AAAAAgAAAAArFkuQQ4QuQY6SkLc5xxSdwpFOvl7VqKVvrfkPSqB+0AAAAGQApSmNAAAAAQAAAAEAAAAAW4nJgAAAAABdav0AAAAAAQAAABZFbmpveSB0aGlzIHRyYW5zYWN0aW9uAAAAAAABAAAAAAAAAAEAAAAAQF827djPIu+/gHK5hbakwBVRw03TjBN6yNQNQCzR97QAAAABVVNEAAAAAAAyUlQyIZKfbs+tUWuvK7N0nGSCII0/Go1/CpHXNW3tCwAAAAAX15OgAAAAAAAAAAFKoH7QAAAAQN77Tx+tHCeTJ7Va8YT9zd9z9Peoy0Dn5TSnHXOgUSS6Np23ptMbR8r9EYWSJGqFdebABa+OXrxvSum41KWuig4=";

const SCENARIO_ONE_TXREP: &str = "\
type: ENVELOPE_TYPE_TX
tx.sourceAccount: GAVRMS4QIOCC4QMOSKILOOOHCSO4FEKOXZPNLKFFN6W7SD2KUB7NBPLN
tx.fee: 100
tx.seqNum: 46489056724385793
tx.cond.type: PRECOND_TIME
tx.cond.timeBounds.minTime: 1535756672 (2018-08-31T23:04:32Z)
tx.cond.timeBounds.maxTime: 1567292672 (2019-08-31T23:04:32Z)
tx.memo.type: MEMO_TEXT
tx.memo.text: \"Enjoy this transaction\"
tx.operations.len: 1
tx.operations[0].sourceAccount._present: false
tx.operations[0].body.type: PAYMENT
tx.operations[0].body.paymentOp.destination: GBAF6NXN3DHSF357QBZLTBNWUTABKUODJXJYYE32ZDKA2QBM2H33IK6O
tx.operations[0].body.paymentOp.asset: USD:GAZFEVBSEGJJ63WPVVIWXLZLWN2JYZECECGT6GUNP4FJDVZVNXWQWMYI
tx.operations[0].body.paymentOp.amount: 400004000 (40.0004e7)
tx.ext.v: 0
signatures.len: 1
signatures[0].hint: 4aa07ed0
signatures[0].signature: defb4f1fad1c279327b55af184fdcddf73f4f7a8cb40e7e534a71d73a05124ba369db7a6d31b47cafd118592246a8575e6c005af8e5ebc6f4ae9b8d4a5ae8a0e
";

fn account(byte: u8) -> AccountId {
    AccountId([byte; 32])
}

fn usd() -> Asset {
    Asset::credit("USD", account(0xAA)).unwrap()
}

fn keypair(byte: u8) -> KeyPair {
    KeyPair::from_seed_bytes(&[byte; 32])
}

/// Binary and text round trips, plus text re-rendering.
fn assert_lossless(envelope: &TransactionEnvelope) {
    let b64 = envelope.to_xdr_base64().unwrap();
    let decoded = TransactionEnvelope::from_xdr_base64(&b64).unwrap();
    assert_eq!(&decoded, envelope);

    let text = to_txrep(envelope);
    let parsed = from_txrep(&text).unwrap();
    assert_eq!(&parsed, envelope);
    assert_eq!(to_txrep(&parsed), text);
    assert_eq!(parsed.to_xdr_base64().unwrap(), b64);
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn payment_txrep_matches_known_xdr() {
    let from_text = from_txrep(SCENARIO_ONE_TXREP).unwrap();
    assert_eq!(from_text.to_xdr_base64().unwrap(), SCENARIO_ONE_XDR);

    let from_xdr = TransactionEnvelope::from_xdr_base64(SCENARIO_ONE_XDR).unwrap();
    assert_eq!(from_xdr, from_text);
    assert_eq!(to_txrep(&from_xdr), SCENARIO_ONE_TXREP);
}

#[test]
fn payment_txrep_ignores_order_and_blank_lines() {
    let mut lines: Vec<&str> = SCENARIO_ONE_TXREP.lines().collect();
    lines.reverse();
    let shuffled = lines.join("\n\n");
    let envelope = from_txrep(&shuffled).unwrap();
    assert_eq!(envelope.to_xdr_base64().unwrap(), SCENARIO_ONE_XDR);
}

#[test]
fn claimable_balance_with_six_claimants() {
    let now = ClaimPredicate::BeforeAbsoluteTime(1_700_000_000);
    let week = ClaimPredicate::BeforeRelativeTime(604_800);
    let claimants = vec![
        Claimant::new(account(1), ClaimPredicate::Unconditional).unwrap(),
        Claimant::new(account(2), ClaimPredicate::and(now.clone(), week.clone())).unwrap(),
        Claimant::new(account(3), ClaimPredicate::or(now.clone(), week.clone())).unwrap(),
        Claimant::new(account(4), ClaimPredicate::not(now.clone())).unwrap(),
        Claimant::new(
            account(5),
            ClaimPredicate::and(
                ClaimPredicate::or(now.clone(), ClaimPredicate::not(week.clone())),
                ClaimPredicate::not(ClaimPredicate::and(week.clone(), now.clone())),
            ),
        )
        .unwrap(),
        Claimant::new(
            account(6),
            ClaimPredicate::or(
                ClaimPredicate::not(ClaimPredicate::or(
                    ClaimPredicate::Unconditional,
                    ClaimPredicate::not(now.clone()),
                )),
                week,
            ),
        )
        .unwrap(),
    ];
    let operation =
        Operation::create_claimable_balance(usd(), 10_000_000, claimants.clone()).unwrap();
    let envelope = TransactionBuilder::new(account(7).into(), 1)
        .add_operation(operation)
        .build_envelope()
        .unwrap();
    assert_lossless(&envelope);

    let text = to_txrep(&envelope);
    let op = "tx.operations[0].body.createClaimableBalanceOp";
    assert!(text.contains(&format!("{op}.claimants.len: 6\n")));
    assert!(text.contains(&format!(
        "{op}.claimants[4].v0.predicate.andPredicates[0].orPredicates[1].notPredicate.type: \
         CLAIM_PREDICATE_BEFORE_RELATIVE_TIME\n"
    )));
    assert!(text.contains(&format!(
        "{op}.claimants[1].v0.predicate.andPredicates[0].absBefore: 1700000000 (2023-11-14T22:13:20Z)\n"
    )));

    let parsed = from_txrep(&text).unwrap();
    let TransactionEnvelope::Tx(env) = parsed else {
        panic!("expected a v1 envelope");
    };
    let OperationBody::CreateClaimableBalance(op) = &env.tx.operations[0].body else {
        panic!("expected CREATE_CLAIMABLE_BALANCE");
    };
    assert_eq!(op.claimants, claimants);
    assert_eq!(op.claimants[5].predicate.depth(), 5);
}

fn thirteen_operations() -> Vec<Operation> {
    let issuer = account(0xAA);
    let eur = Asset::credit("EURO12345", issuer).unwrap();
    vec![
        Operation::create_account(account(1), 20_000_000),
        Operation::payment(account(2).into(), usd(), 1),
        Operation::new(OperationBody::PathPaymentStrictSend(PathPaymentStrictSendOp {
            send_asset: Asset::Native,
            send_amount: 50_000_000,
            destination: MuxedAccount::Muxed {
                id: 42,
                ed25519: [3; 32],
            },
            dest_asset: eur,
            dest_min: 1,
            path: vec![usd()],
        })),
        Operation::new(OperationBody::ManageSellOffer(ManageSellOfferOp {
            selling: usd(),
            buying: Asset::Native,
            amount: 1234567,
            price: Price { n: 3, d: 7 },
            offer_id: 0,
        })),
        Operation::new(OperationBody::ManageBuyOffer(ManageBuyOfferOp {
            selling: Asset::Native,
            buying: usd(),
            buy_amount: 7654321,
            price: Price { n: 1, d: 2 },
            offer_id: 99,
        }))
        .with_source(account(4).into()),
        Operation::new(OperationBody::SetOptions(
            SetOptionsOp {
                set_flags: Some(3),
                ..Default::default()
            }
            .with_home_domain("lumen.example")
            .unwrap()
            .with_signer(SignerKey::HashX([5; 32]), 1),
        )),
        Operation::change_trust(
            ChangeTrustAsset::PoolShare(LiquidityPoolParameters::ConstantProduct {
                asset_a: Asset::Native,
                asset_b: usd(),
                fee: 30,
            }),
            i64::MAX,
        ),
        Operation::new(OperationBody::AllowTrust(AllowTrustOp {
            trustor: account(6),
            asset: AssetCode::new("USD").unwrap(),
            authorize: 1,
        })),
        Operation::manage_data("config", Some(b"v=1".to_vec())).unwrap(),
        Operation::new(OperationBody::ClaimClaimableBalance(ClaimClaimableBalanceOp {
            balance_id: ClaimableBalanceId([7; 32]),
        })),
        Operation::new(OperationBody::BeginSponsoringFutureReserves(
            BeginSponsoringFutureReservesOp {
                sponsored_id: account(8),
            },
        )),
        Operation::new(OperationBody::RevokeSponsorship(RevokeSponsorshipOp::LedgerEntry(
            LedgerKey::Offer {
                seller_id: account(9),
                offer_id: 12,
            },
        ))),
        Operation::new(OperationBody::SetTrustLineFlags(SetTrustLineFlagsOp {
            trustor: account(10),
            asset: usd(),
            clear_flags: 1,
            set_flags: 2,
        })),
    ]
}

#[test]
fn fee_bump_with_thirteen_operation_types() {
    let operations = thirteen_operations();
    let names: std::collections::HashSet<_> =
        operations.iter().map(|op| op.body.name()).collect();
    assert_eq!(names.len(), 13);

    let mut builder = TransactionBuilder::new(account(11).into(), 100)
        .memo(Memo::id(7))
        .time_bounds(0, 1_900_000_000)
        .ledger_bounds(10, 0)
        .extra_signer(SignerKey::Ed25519SignedPayload {
            ed25519: [12; 32],
            payload: vec![1, 2, 3],
        });
    for op in operations {
        builder = builder.add_operation(op);
    }
    let mut inner = builder.build_envelope().unwrap();
    sign(&mut inner, &keypair(1), &Network::testnet()).unwrap();

    let mut envelope: TransactionEnvelope = FeeBumpBuilder::new(account(13).into(), inner)
        .base_fee(200)
        .build()
        .unwrap()
        .into();
    sign(&mut envelope, &keypair(2), &Network::testnet()).unwrap();

    let text = to_txrep(&envelope);
    assert!(text.starts_with("type: ENVELOPE_TYPE_TX_FEE_BUMP\nfeeBump.tx.feeSource: G"));
    assert!(text.contains("feeBump.tx.fee: 2800\n"));
    assert!(text.contains("feeBump.tx.innerTx.tx.cond.type: PRECOND_V2\n"));
    assert!(text.contains("feeBump.tx.innerTx.tx.operations.len: 13\n"));
    assert!(text.contains("feeBump.tx.innerTx.signatures.len: 1\n"));
    assert!(text.contains("feeBump.signatures.len: 1\n"));

    let b64 = envelope.to_xdr_base64().unwrap();
    let from_text = from_txrep(&text).unwrap();
    assert_eq!(from_text.to_xdr_base64().unwrap(), b64);
    let decoded = TransactionEnvelope::from_xdr_base64(&b64).unwrap();
    assert_eq!(to_txrep(&decoded), text);
}

#[test]
fn two_signers_keep_signing_order() {
    let first = keypair(1);
    let second = keypair(2);
    let network = Network::testnet();
    let mut envelope = TransactionBuilder::new(first.muxed_account(), 5)
        .add_operation(Operation::payment(second.muxed_account(), Asset::Native, 1))
        .build_envelope()
        .unwrap();

    sign(&mut envelope, &first, &network).unwrap();
    sign(&mut envelope, &second, &network).unwrap();

    let signatures = envelope.signatures();
    assert_eq!(signatures.len(), 2);
    assert_eq!(signatures[0].hint, first.signature_hint());
    assert_eq!(signatures[1].hint, second.signature_hint());

    let hash = transaction_hash(&envelope, &network).unwrap();
    assert!(first.verify(&hash, &signatures[0].signature));
    assert!(second.verify(&hash, &signatures[1].signature));

    let signers = verify_envelope(
        &envelope,
        &network,
        &[second.signer_key(), first.signer_key()],
    )
    .unwrap();
    assert_eq!(signers, vec![first.signer_key(), second.signer_key()]);
    assert_lossless(&envelope);
}

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

#[test]
fn fee_bump_signing_leaves_inner_bytes_untouched() {
    let mut inner = TransactionBuilder::new(keypair(1).muxed_account(), 1)
        .add_operation(Operation::bump_sequence(9))
        .build_envelope()
        .unwrap();
    sign(&mut inner, &keypair(1), &Network::public()).unwrap();
    let TransactionEnvelope::Tx(inner_v1) = inner.clone() else {
        panic!("expected a v1 envelope");
    };
    let inner_bytes = inner_v1.to_xdr().unwrap();

    let mut envelope: TransactionEnvelope = FeeBumpBuilder::new(keypair(2).muxed_account(), inner)
        .base_fee(500)
        .build()
        .unwrap()
        .into();
    sign(&mut envelope, &keypair(2), &Network::public()).unwrap();

    let TransactionEnvelope::TxFeeBump(bump) = &envelope else {
        panic!("expected a fee-bump envelope");
    };
    assert_eq!(bump.tx.inner_tx.to_xdr().unwrap(), inner_bytes);
    assert_eq!(bump.signatures.len(), 1);
    assert_eq!(bump.tx.inner_tx.signatures.len(), 1);
}

#[test]
fn hash_depends_on_network() {
    let envelope = TransactionEnvelope::from_xdr_base64(SCENARIO_ONE_XDR).unwrap();
    let testnet = transaction_hash(&envelope, &Network::testnet()).unwrap();
    let public = transaction_hash(&envelope, &Network::public()).unwrap();
    assert_eq!(
        hex::encode(testnet),
        "471b1df6936dbe62d8a92fa6a507da94dd5ef85a0e68b0328185090cacc11b51"
    );
    assert_eq!(
        hex::encode(public),
        "7f5fe6469643011ccb6fe1d6982e585a81283d64b0557fbe489b1ffc473d2999"
    );
}

#[test]
fn legacy_envelope_survives_both_formats() {
    let v1 = TransactionEnvelope::from_xdr_base64(SCENARIO_ONE_XDR).unwrap();
    let TransactionEnvelope::Tx(env) = &v1 else {
        panic!("expected a v1 envelope");
    };
    let MuxedAccount::Ed25519(source) = env.tx.source_account else {
        panic!("expected a plain source account");
    };
    let v0 = TransactionEnvelope::TxV0(lumen_protocol::types::TransactionV0Envelope {
        tx: lumen_protocol::types::TransactionV0 {
            source_account_ed25519: source,
            fee: env.tx.fee,
            seq_num: env.tx.seq_num,
            time_bounds: env.tx.cond.time_bounds(),
            memo: env.tx.memo.clone(),
            operations: env.tx.operations.clone(),
        },
        signatures: env.signatures.clone(),
    });
    assert_lossless(&v0);
    assert_eq!(
        transaction_hash(&v0, &Network::testnet()).unwrap(),
        transaction_hash(&v1, &Network::testnet()).unwrap()
    );
    assert_eq!(v0.into_v1(), v1);
}

#[test]
fn liquidity_pool_deposit_amounts_render_with_decimals() {
    let envelope = TransactionBuilder::new(account(1).into(), 1)
        .add_operation(Operation::new(OperationBody::LiquidityPoolDeposit(
            LiquidityPoolDepositOp {
                liquidity_pool_id: [0xcd; 32],
                max_amount_a: 1,
                max_amount_b: 123_456_789,
                min_price: Price { n: 1, d: 10 },
                max_price: Price { n: 10, d: 1 },
            },
        )))
        .add_operation(Operation::new(OperationBody::Clawback(ClawbackOp {
            asset: usd(),
            from: account(2).into(),
            amount: 5,
        })))
        .build_envelope()
        .unwrap();
    let text = to_txrep(&envelope);
    assert!(text.contains("liquidityPoolDepositOp.maxAmountA: 1 (0.0000001e7)\n"));
    assert!(text.contains("liquidityPoolDepositOp.maxAmountB: 123456789 (12.3456789e7)\n"));
    assert!(text.contains("clawbackOp.amount: 5 (0.0000005e7)\n"));
    assert_lossless(&envelope);
}

fn invoke_with_nested_arg(levels: u32) -> TransactionEnvelope {
    let arg = (0..levels).fold(ScVal::Symbol("leaf".into()), |inner, _| {
        ScVal::Vec(Some(vec![inner]))
    });
    TransactionBuilder::new(account(1).into(), 1)
        .add_operation(Operation::new(OperationBody::InvokeHostFunction(
            InvokeHostFunctionOp {
                host_function: HostFunction::InvokeContract(InvokeContractArgs {
                    contract_address: ScAddress::Contract([3; 32]),
                    function_name: "deep".into(),
                    args: vec![arg],
                }),
                auth: vec![],
            },
        )))
        .build_envelope()
        .unwrap()
}

#[test]
fn nested_contract_args_past_the_txrep_ceiling_fail_cleanly() {
    let outcome = std::thread::spawn(|| {
        assert_lossless(&invoke_with_nested_arg(MAX_TXREP_DEPTH));

        let too_deep = invoke_with_nested_arg(MAX_TXREP_DEPTH + 1);
        let b64 = too_deep.to_xdr_base64().unwrap();
        assert_eq!(TransactionEnvelope::from_xdr_base64(&b64).unwrap(), too_deep);
        assert!(matches!(
            from_txrep(&to_txrep(&too_deep)),
            Err(TxRepError::DepthLimitExceeded { .. })
        ));
    })
    .join();
    assert!(outcome.is_ok());
}
