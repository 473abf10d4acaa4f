use commons::*;
use concordium_cis2::*;
use concordium_std::*;

use crate::events::CollectionEvent;
use crate::external::*;
use crate::state::State;

/// Initialize a new collection.
///
/// Every configuration field is validated on its own, so a bad value is
/// reported with its own error instead of the catch-all `InvalidInput`.
/// Minting starts paused; the owner must call `updatePause` before inbound
/// payments are accepted.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The owner account is the all-zero address.
/// - The image base URI is empty.
/// - The supply cap is zero.
/// - The mint price is zero.
/// - The payment asset address is the all-zero contract address.
#[init(contract = "CollectionNFT", parameter = "InitParams")]
fn init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    let params = InitParams::deserial(&mut ctx.parameter_cursor())?;

    ensure!(
        params.owner != AccountAddress([0u8; 32]),
        CustomContractError::InvalidOwner.into()
    );
    ensure!(
        !params.image_base_uri.is_empty(),
        CustomContractError::InvalidImageBaseUri.into()
    );
    ensure!(
        params.total_supply >= 1,
        CustomContractError::InvalidTotalSupply.into()
    );
    ensure!(
        params.mint_price > TokenAmountU64(0),
        CustomContractError::InvalidMintPrice.into()
    );
    ensure!(
        params.mint_asset != ContractAddress { index: 0, subindex: 0 },
        CustomContractError::InvalidMintAsset.into()
    );

    Ok(State::new(state_builder, params))
}

/// Inbound payment hook and mint trigger.
///
/// The configured payment token contract invokes this entrypoint after
/// crediting this contract, following the CIS-2 receive hook convention.
/// The auxiliary data routes the payment: empty data requests a mint subject
/// to the supply cap, a lone directive tag requests a mint ignoring the cap,
/// and any other payload marks a donation that is kept without minting.
///
/// A `Payment` event is logged for every accepted payment; a `Mint` event
/// only when a token was created.
///
/// It rejects if:
/// - The sender is not the configured payment token contract.
/// - It fails to parse the parameter.
/// - Minting is paused.
/// - The amount is zero.
/// - The supply cap is reached and the data carries no mint directive.
/// - It fails to log an event.
#[receive(
    mutable,
    contract = "CollectionNFT",
    name = "onReceivingCIS2",
    parameter = "OnReceivingCis2Params<TokenIdUnit, ContractTokenAmount>",
    enable_logger
)]
fn on_receiving_cis2<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: OnReceivingCis2Params<TokenIdUnit, ContractTokenAmount> =
        ctx.parameter_cursor().get()?;

    ensure!(
        ctx.sender() == Address::Contract(host.state().mint_asset),
        ContractError::Unauthorized
    );

    let payment = PaymentData::resolve(&params.data);

    {
        let state = host.state();
        ensure!(!state.paused, CustomContractError::Paused.into());
        ensure!(
            params.amount > TokenAmountU64(0),
            CustomContractError::InvalidAmount.into()
        );
        if payment.respects_supply_cap() {
            ensure!(
                state.current_supply < state.total_supply,
                CustomContractError::SoldOut.into()
            );
        }
    }

    logger.log(&CollectionEvent::Payment {
        payer: params.from,
        amount: params.amount,
        data: &params.data,
    })?;

    if payment.requests_mint() {
        let (state, state_builder) = host.state_and_builder();
        let token_id = state.mint(params.from, state_builder)?;

        // Issuance takes the CIS-2 shape of a transfer with an absent `from`.
        logger.log(&Cis2Event::Mint(MintEvent {
            token_id,
            amount: TokenAmountU64(1),
            owner: params.from,
        }))?;
    }

    Ok(())
}

/// Reassign ownership of a token.
///
/// Logs a `Transfer` event. If the receiver is a contract, its receive hook
/// is invoked after the ledger changes are recorded; a rejecting hook is the
/// receiver's concern and does not undo the transfer.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The receiver account is the all-zero address.
/// - The token was never minted.
/// - It fails to log the event.
#[receive(
    mutable,
    contract = "CollectionNFT",
    name = "transfer",
    parameter = "TransferParameter",
    enable_logger
)]
fn transfer<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params = TransferParameter::deserial(&mut ctx.parameter_cursor())?;

    if let Receiver::Account(account) = &params.to {
        ensure!(
            account != &AccountAddress([0u8; 32]),
            CustomContractError::InvalidInput.into()
        );
    }

    let to_address = params.to.address();
    let (state, state_builder) = host.state_and_builder();
    let from = state.transfer(&params.token_id, to_address, state_builder)?;

    logger.log(&Cis2Event::Transfer(TransferEvent {
        token_id: params.token_id.clone(),
        amount: TokenAmountU64(1),
        from,
        to: to_address,
    }))?;

    // The hook observes an already committed reassignment. Its outcome is
    // not compensated here.
    if let Receiver::Contract(address, entrypoint) = params.to {
        let parameter = OnReceivingCis2Params {
            token_id: params.token_id,
            amount: TokenAmountU64(1),
            from,
            data: params.data,
        };
        let _ = host.invoke_contract(
            &address,
            &parameter,
            entrypoint.as_entrypoint_name(),
            Amount::zero(),
        );
    }

    Ok(())
}

/// Number of tokens currently held by an address.
#[receive(
    contract = "CollectionNFT",
    name = "balanceOf",
    parameter = "Address",
    return_value = "u64"
)]
fn balance_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<u64> {
    let address = Address::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().balance_of(&address))
}

/// Current owner of a token, or `None` if it was never minted.
#[receive(
    contract = "CollectionNFT",
    name = "ownerOf",
    parameter = "ContractTokenId",
    return_value = "Option<Address>"
)]
fn owner_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Option<Address>> {
    let token_id = ContractTokenId::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().owner_of(&token_id))
}

/// Page through the tokens held by an address.
#[receive(
    contract = "CollectionNFT",
    name = "tokensOf",
    parameter = "TokensOfParams",
    return_value = "Vec<ContractTokenId>"
)]
fn tokens_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<ContractTokenId>> {
    let params = TokensOfParams::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().tokens_of(&params.owner, params.skip, params.show))
}

/// Properties of a token as recorded at mint.
///
/// It rejects if the token was never minted.
#[receive(
    contract = "CollectionNFT",
    name = "properties",
    parameter = "ContractTokenId",
    return_value = "TokenProperties"
)]
fn properties<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<TokenProperties> {
    let token_id = ContractTokenId::deserial(&mut ctx.parameter_cursor())?;
    host.state().properties(&token_id)
}

/// The supply cap.
#[receive(contract = "CollectionNFT", name = "totalSupply", return_value = "u64")]
fn total_supply<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<u64> {
    Ok(host.state().total_supply)
}

/// The number of tokens minted so far.
#[receive(contract = "CollectionNFT", name = "currentSupply", return_value = "u64")]
fn current_supply<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<u64> {
    Ok(host.state().current_supply)
}

/// Whether payment triggered minting is disabled.
#[receive(contract = "CollectionNFT", name = "isPaused", return_value = "bool")]
fn is_paused<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<bool> {
    Ok(host.state().paused)
}

/// The price of a single mint in units of the payment token.
#[receive(
    contract = "CollectionNFT",
    name = "mintPrice",
    return_value = "ContractTokenAmount"
)]
fn mint_price<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ContractTokenAmount> {
    Ok(host.state().mint_price)
}

/// The payment token contract accepted for mints.
#[receive(
    contract = "CollectionNFT",
    name = "mintAsset",
    return_value = "ContractAddress"
)]
fn mint_asset<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ContractAddress> {
    Ok(host.state().mint_asset)
}

/// The account with administrative authority.
#[receive(
    contract = "CollectionNFT",
    name = "contractOwner",
    return_value = "AccountAddress"
)]
fn contract_owner<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<AccountAddress> {
    Ok(host.state().contract_owner)
}

/// Reject unless the sender controls the contract owner account.
fn assert_owner<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    state: &State<S>,
) -> ContractResult<()> {
    ensure!(
        ctx.sender().matches_account(&state.contract_owner),
        ContractError::Unauthorized
    );
    Ok(())
}

/// Replace the image URL prefix used for newly minted tokens. Properties of
/// already minted tokens keep the URL they were minted with.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The sender is not the contract owner.
#[receive(
    mutable,
    contract = "CollectionNFT",
    name = "updateImageBaseUri",
    parameter = "String"
)]
fn update_image_base_uri<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    let uri = String::deserial(&mut ctx.parameter_cursor())?;
    let state = host.state_mut();
    assert_owner(ctx, state)?;
    state.image_base_uri = uri;
    Ok(())
}

/// Adjust the supply cap.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The sender is not the contract owner.
/// - The new cap is zero.
/// - The new cap is below the number of already minted tokens.
#[receive(
    mutable,
    contract = "CollectionNFT",
    name = "updateTotalSupply",
    parameter = "u64"
)]
fn update_total_supply<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    let amount = u64::deserial(&mut ctx.parameter_cursor())?;
    let state = host.state_mut();
    assert_owner(ctx, state)?;
    ensure!(amount > 0, CustomContractError::InvalidAmount.into());
    ensure!(
        amount >= state.current_supply,
        CustomContractError::StateConflict.into()
    );
    state.total_supply = amount;
    Ok(())
}

/// Enable or disable payment triggered minting.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The sender is not the contract owner.
#[receive(
    mutable,
    contract = "CollectionNFT",
    name = "updatePause",
    parameter = "bool"
)]
fn update_pause<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    let paused = bool::deserial(&mut ctx.parameter_cursor())?;
    let state = host.state_mut();
    assert_owner(ctx, state)?;
    state.paused = paused;
    Ok(())
}

/// Upgrade the contract to a new module, optionally invoking a migration
/// entrypoint of the new code afterwards.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The sender is not the contract owner.
/// - The module reference is the all-zero sentinel.
/// - The upgrade itself fails.
/// - The migration call fails.
#[receive(
    mutable,
    contract = "CollectionNFT",
    name = "upgrade",
    parameter = "UpgradeParams"
)]
fn upgrade<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    let params = UpgradeParams::deserial(&mut ctx.parameter_cursor())?;
    assert_owner(ctx, host.state())?;
    ensure!(
        params.module != ModuleReference::from([0u8; 32]),
        CustomContractError::EmptyUpgrade.into()
    );

    host.upgrade(params.module).map_err(CustomContractError::from)?;

    if let Some((entrypoint, parameter)) = params.migrate {
        host.invoke_contract_raw(
            &ctx.self_address(),
            Parameter::new_unchecked(parameter.as_slice()),
            entrypoint.as_entrypoint_name(),
            Amount::zero(),
        )
        .map_err(CustomContractError::from)?;
    }

    Ok(())
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_std::test_infrastructure::*;

    const OWNER: AccountAddress = AccountAddress([1u8; 32]);
    const PAYER: AccountAddress = AccountAddress([2u8; 32]);
    const RECEIVER: AccountAddress = AccountAddress([3u8; 32]);
    const INTRUDER: AccountAddress = AccountAddress([4u8; 32]);
    const MINT_ASSET: ContractAddress = ContractAddress {
        index: 7,
        subindex: 0,
    };
    const MARKET: ContractAddress = ContractAddress {
        index: 21,
        subindex: 0,
    };
    const SELF_ADDRESS: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };

    const BASE_URI: &str = "https://img.example/collection/";

    fn default_params() -> InitParams {
        InitParams {
            owner: OWNER,
            image_base_uri: String::from(BASE_URI),
            total_supply: 2,
            mint_price: TokenAmountU64(25),
            mint_asset: MINT_ASSET,
        }
    }

    fn token(text: &str) -> ContractTokenId {
        TokenIdVec(text.as_bytes().to_vec())
    }

    fn fresh_host(params: InitParams) -> TestHost<State<TestStateApi>> {
        let bytes = to_bytes(&params);
        let mut ctx = TestInitContext::empty();
        ctx.set_init_origin(OWNER).set_parameter(&bytes);
        let mut state_builder = TestStateBuilder::new();
        let state = init(&ctx, &mut state_builder).expect_report("Init failed");
        TestHost::new(state, state_builder)
    }

    /// An initialized host with minting already unpaused by the owner.
    fn default_host() -> TestHost<State<TestStateApi>> {
        let mut host = fresh_host(default_params());
        set_pause(&mut host, Address::Account(OWNER), false).expect_report("Unpause failed");
        host
    }

    fn set_pause(
        host: &mut TestHost<State<TestStateApi>>,
        sender: Address,
        paused: bool,
    ) -> ContractResult<()> {
        let bytes = to_bytes(&paused);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(sender).set_parameter(&bytes);
        update_pause(&ctx, host)
    }

    fn pay_from(
        host: &mut TestHost<State<TestStateApi>>,
        logger: &mut TestLogger,
        sender: Address,
        payer: AccountAddress,
        amount: u64,
        data: Vec<u8>,
    ) -> ContractResult<()> {
        let params = OnReceivingCis2Params {
            token_id: TokenIdUnit(),
            amount: TokenAmountU64(amount),
            from: Address::Account(payer),
            data: AdditionalData::from(data),
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(sender).set_parameter(&bytes);
        on_receiving_cis2(&ctx, host, logger)
    }

    fn pay(
        host: &mut TestHost<State<TestStateApi>>,
        logger: &mut TestLogger,
        payer: AccountAddress,
        amount: u64,
        data: Vec<u8>,
    ) -> ContractResult<()> {
        pay_from(host, logger, Address::Contract(MINT_ASSET), payer, amount, data)
    }

    fn send(
        host: &mut TestHost<State<TestStateApi>>,
        logger: &mut TestLogger,
        to: Receiver,
        token_id: ContractTokenId,
        data: Vec<u8>,
    ) -> ContractResult<()> {
        let params = TransferParameter {
            to,
            token_id,
            data: AdditionalData::from(data),
        };
        let bytes = to_bytes(&params);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(PAYER)).set_parameter(&bytes);
        transfer(&ctx, host, logger)
    }

    fn init_error(params: InitParams) -> Reject {
        let bytes = to_bytes(&params);
        let mut ctx = TestInitContext::empty();
        ctx.set_init_origin(OWNER).set_parameter(&bytes);
        let mut state_builder = TestStateBuilder::new();
        let result: InitResult<State<TestStateApi>> = init(&ctx, &mut state_builder);
        result.expect_err_report("Init should fail")
    }

    /// Mock for a receive hook that checks the forwarded parameter.
    fn parse_and_check_mock<D: Deserial, S>(
        check: impl Fn(&D) -> bool + 'static,
    ) -> MockFn<S> {
        MockFn::new(move |parameter, _amount, _balance, _state| {
            let value =
                D::deserial(&mut Cursor::new(parameter)).map_err(|_| CallContractError::Trap)?;
            if !check(&value) {
                return Err(CallContractError::Trap);
            }
            Ok((false, Some(())))
        })
    }

    /// Mock for a receive hook that always rejects.
    fn reject_mock<S>() -> MockFn<S> {
        MockFn::new(|_parameter, _amount, _balance, _state| {
            Err::<(bool, Option<()>), _>(CallContractError::Trap)
        })
    }

    #[concordium_test]
    fn test_init_configuration() {
        let host = fresh_host(default_params());
        let state = host.state();
        claim_eq!(state.contract_owner, OWNER);
        claim_eq!(state.total_supply, 2);
        claim_eq!(state.current_supply, 0);
        claim!(state.paused, "A fresh collection must start paused");
        claim_eq!(state.mint_price, TokenAmountU64(25));
        claim_eq!(state.mint_asset, MINT_ASSET);
        claim_eq!(state.image_base_uri, BASE_URI);
    }

    #[concordium_test]
    fn test_init_validation() {
        claim_eq!(
            init_error(InitParams {
                owner: AccountAddress([0u8; 32]),
                ..default_params()
            }),
            CustomContractError::InvalidOwner.into()
        );
        claim_eq!(
            init_error(InitParams {
                image_base_uri: String::new(),
                ..default_params()
            }),
            CustomContractError::InvalidImageBaseUri.into()
        );
        claim_eq!(
            init_error(InitParams {
                total_supply: 0,
                ..default_params()
            }),
            CustomContractError::InvalidTotalSupply.into()
        );
        claim_eq!(
            init_error(InitParams {
                mint_price: TokenAmountU64(0),
                ..default_params()
            }),
            CustomContractError::InvalidMintPrice.into()
        );
        claim_eq!(
            init_error(InitParams {
                mint_asset: ContractAddress {
                    index: 0,
                    subindex: 0
                },
                ..default_params()
            }),
            CustomContractError::InvalidMintAsset.into()
        );
    }

    #[concordium_test]
    fn test_pause_control() {
        let mut host = fresh_host(default_params());
        claim_eq!(
            set_pause(&mut host, Address::Account(INTRUDER), false),
            Err(ContractError::Unauthorized)
        );
        claim!(host.state().paused);

        set_pause(&mut host, Address::Account(OWNER), false).expect_report("Unpause failed");
        claim!(!host.state().paused);

        set_pause(&mut host, Address::Account(OWNER), true).expect_report("Pause failed");
        claim!(host.state().paused);
    }

    #[concordium_test]
    fn test_mint_on_payment() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        pay(&mut host, &mut logger, PAYER, 25, vec![]).expect_report("Payment failed");

        let state = host.state();
        let payer = Address::Account(PAYER);
        claim_eq!(state.current_supply, 1);
        claim_eq!(state.owner_of(&token("1")), Some(payer));
        claim_eq!(state.balance_of(&payer), 1);
        claim_eq!(state.tokens_of(&payer, 0, 10), vec![token("1")]);

        let record = state.properties(&token("1")).expect_report("Missing properties");
        claim_eq!(record.token_id, token("1"));
        claim_eq!(record.name, "");
        claim_eq!(record.image, "https://img.example/collection/1.png");
        claim_eq!(record.description, "Description Placeholder");
        claim_eq!(record.token_uri, "");

        let data = AdditionalData::from(vec![]);
        claim!(logger.logs.contains(&to_bytes(&CollectionEvent::Payment {
            payer,
            amount: TokenAmountU64(25),
            data: &data,
        })));
        claim!(logger.logs.contains(&to_bytes(&Cis2Event::Mint(MintEvent {
            token_id: token("1"),
            amount: TokenAmountU64(1),
            owner: payer,
        }))));
    }

    #[concordium_test]
    fn test_sequential_token_ids() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        pay(&mut host, &mut logger, PAYER, 25, vec![]).expect_report("First payment failed");
        pay(&mut host, &mut logger, RECEIVER, 25, vec![]).expect_report("Second payment failed");

        let state = host.state();
        claim_eq!(state.current_supply, 2);
        claim_eq!(state.owner_of(&token("1")), Some(Address::Account(PAYER)));
        claim_eq!(state.owner_of(&token("2")), Some(Address::Account(RECEIVER)));
        claim_eq!(state.owner_of(&token("3")), None);
    }

    #[concordium_test]
    fn test_sold_out() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        pay(&mut host, &mut logger, PAYER, 25, vec![]).expect_report("First payment failed");
        pay(&mut host, &mut logger, PAYER, 25, vec![]).expect_report("Second payment failed");

        let result = pay(&mut host, &mut logger, PAYER, 25, vec![]);
        claim_eq!(result, Err(CustomContractError::SoldOut.into()));
        claim_eq!(host.state().current_supply, 2);
        claim_eq!(host.state().balance_of(&Address::Account(PAYER)), 2);
    }

    #[concordium_test]
    fn test_payment_gate_rejections() {
        let mut logger = TestLogger::init();

        let mut host = fresh_host(default_params());
        claim_eq!(
            pay(&mut host, &mut logger, PAYER, 25, vec![]),
            Err(CustomContractError::Paused.into())
        );

        let mut host = default_host();
        claim_eq!(
            pay(&mut host, &mut logger, PAYER, 0, vec![]),
            Err(CustomContractError::InvalidAmount.into())
        );
        claim_eq!(
            pay_from(
                &mut host,
                &mut logger,
                Address::Contract(MARKET),
                PAYER,
                25,
                vec![]
            ),
            Err(ContractError::Unauthorized)
        );
        claim_eq!(
            pay_from(
                &mut host,
                &mut logger,
                Address::Account(PAYER),
                PAYER,
                25,
                vec![]
            ),
            Err(ContractError::Unauthorized)
        );
        claim_eq!(host.state().current_supply, 0);
    }

    #[concordium_test]
    fn test_donation_payment() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        pay(&mut host, &mut logger, PAYER, 25, vec![0xBE, 0xEF]).expect_report("Donation failed");

        let state = host.state();
        claim_eq!(state.current_supply, 0);
        claim_eq!(state.balance_of(&Address::Account(PAYER)), 0);

        let data = AdditionalData::from(vec![0xBE, 0xEF]);
        claim!(logger.logs.contains(&to_bytes(&CollectionEvent::Payment {
            payer: Address::Account(PAYER),
            amount: TokenAmountU64(25),
            data: &data,
        })));
        claim_eq!(logger.logs.len(), 1, "A donation must not log a mint");
    }

    #[concordium_test]
    fn test_mint_directive_bypasses_cap() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        pay(&mut host, &mut logger, PAYER, 25, vec![]).expect_report("First payment failed");
        pay(&mut host, &mut logger, PAYER, 25, vec![]).expect_report("Second payment failed");

        pay(&mut host, &mut logger, RECEIVER, 25, vec![MINT_DIRECTIVE_TAG])
            .expect_report("Directed payment failed");

        let state = host.state();
        claim_eq!(state.current_supply, 3);
        claim_eq!(state.owner_of(&token("3")), Some(Address::Account(RECEIVER)));
    }

    #[concordium_test]
    fn test_transfer_to_account() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        pay(&mut host, &mut logger, PAYER, 25, vec![]).expect_report("Payment failed");

        send(
            &mut host,
            &mut logger,
            Receiver::Account(RECEIVER),
            token("1"),
            vec![],
        )
        .expect_report("Transfer failed");

        let state = host.state();
        let payer = Address::Account(PAYER);
        let receiver = Address::Account(RECEIVER);
        claim_eq!(state.owner_of(&token("1")), Some(receiver));
        claim_eq!(state.balance_of(&payer), 0);
        claim_eq!(state.balance_of(&receiver), 1);
        claim!(state.tokens_of(&payer, 0, 10).is_empty());
        claim_eq!(state.tokens_of(&receiver, 0, 10), vec![token("1")]);

        claim!(logger.logs.contains(&to_bytes(&Cis2Event::Transfer(TransferEvent {
            token_id: token("1"),
            amount: TokenAmountU64(1),
            from: payer,
            to: receiver,
        }))));
    }

    #[concordium_test]
    fn test_transfer_missing_token() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let result = send(
            &mut host,
            &mut logger,
            Receiver::Account(RECEIVER),
            token("1"),
            vec![],
        );
        claim_eq!(result, Err(ContractError::InvalidTokenId));
        claim_eq!(host.state().balance_of(&Address::Account(RECEIVER)), 0);
        claim!(logger.logs.is_empty());
    }

    #[concordium_test]
    fn test_transfer_zero_receiver() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        pay(&mut host, &mut logger, PAYER, 25, vec![]).expect_report("Payment failed");

        let result = send(
            &mut host,
            &mut logger,
            Receiver::Account(AccountAddress([0u8; 32])),
            token("1"),
            vec![],
        );
        claim_eq!(result, Err(CustomContractError::InvalidInput.into()));
        claim_eq!(
            host.state().owner_of(&token("1")),
            Some(Address::Account(PAYER))
        );
    }

    #[concordium_test]
    fn test_transfer_to_contract_invokes_hook() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        pay(&mut host, &mut logger, PAYER, 25, vec![]).expect_report("Payment failed");

        host.setup_mock_entrypoint(
            MARKET,
            OwnedEntrypointName::new_unchecked("onReceivingCIS2".into()),
            parse_and_check_mock::<OnReceivingCis2Params<ContractTokenId, ContractTokenAmount>, _>(
                |hook| {
                    hook.token_id == token("1")
                        && hook.amount == TokenAmountU64(1)
                        && hook.from == Address::Account(PAYER)
                        && hook.data.as_ref() == [0x01u8, 0x02].as_ref()
                },
            ),
        );

        send(
            &mut host,
            &mut logger,
            Receiver::Contract(
                MARKET,
                OwnedEntrypointName::new_unchecked("onReceivingCIS2".into()),
            ),
            token("1"),
            vec![0x01, 0x02],
        )
        .expect_report("Transfer failed");

        claim_eq!(
            host.state().owner_of(&token("1")),
            Some(Address::Contract(MARKET))
        );
        claim_eq!(host.state().balance_of(&Address::Contract(MARKET)), 1);
    }

    #[concordium_test]
    fn test_transfer_hook_failure_keeps_state() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        pay(&mut host, &mut logger, PAYER, 25, vec![]).expect_report("Payment failed");

        host.setup_mock_entrypoint(
            MARKET,
            OwnedEntrypointName::new_unchecked("onReceivingCIS2".into()),
            reject_mock(),
        );

        send(
            &mut host,
            &mut logger,
            Receiver::Contract(
                MARKET,
                OwnedEntrypointName::new_unchecked("onReceivingCIS2".into()),
            ),
            token("1"),
            vec![],
        )
        .expect_report("Transfer failed");

        // The reassignment stays committed even though the hook rejected.
        claim_eq!(
            host.state().owner_of(&token("1")),
            Some(Address::Contract(MARKET))
        );
        claim_eq!(host.state().balance_of(&Address::Account(PAYER)), 0);
    }

    #[concordium_test]
    fn test_properties_survive_transfer_and_reconfiguration() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        pay(&mut host, &mut logger, PAYER, 25, vec![]).expect_report("Payment failed");

        let before = host
            .state()
            .properties(&token("1"))
            .expect_report("Missing properties");

        send(
            &mut host,
            &mut logger,
            Receiver::Account(RECEIVER),
            token("1"),
            vec![],
        )
        .expect_report("Transfer failed");

        let uri = String::from("https://moved.example/");
        let bytes = to_bytes(&uri);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(OWNER)).set_parameter(&bytes);
        update_image_base_uri(&ctx, &mut host).expect_report("Reconfiguration failed");

        let after = host
            .state()
            .properties(&token("1"))
            .expect_report("Missing properties");
        claim_eq!(to_bytes(&before), to_bytes(&after));

        // Tokens minted after the change pick up the new prefix.
        pay(&mut host, &mut logger, PAYER, 25, vec![]).expect_report("Payment failed");
        let fresh = host
            .state()
            .properties(&token("2"))
            .expect_report("Missing properties");
        claim_eq!(fresh.image, "https://moved.example/2.png");
    }

    #[concordium_test]
    fn test_balance_matches_enumeration() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        pay(&mut host, &mut logger, PAYER, 25, vec![]).expect_report("Payment failed");
        pay(&mut host, &mut logger, PAYER, 25, vec![]).expect_report("Payment failed");
        pay(&mut host, &mut logger, RECEIVER, 25, vec![MINT_DIRECTIVE_TAG])
            .expect_report("Payment failed");
        send(
            &mut host,
            &mut logger,
            Receiver::Account(RECEIVER),
            token("1"),
            vec![],
        )
        .expect_report("Transfer failed");

        let state = host.state();
        for address in [
            Address::Account(PAYER),
            Address::Account(RECEIVER),
            Address::Account(INTRUDER),
        ] {
            claim_eq!(
                state.balance_of(&address),
                state.tokens_of(&address, 0, 100).len() as u64
            );
        }
        claim_eq!(state.balance_of(&Address::Account(PAYER)), 1);
        claim_eq!(state.balance_of(&Address::Account(RECEIVER)), 2);
    }

    #[concordium_test]
    fn test_tokens_of_paging() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        pay(&mut host, &mut logger, PAYER, 25, vec![]).expect_report("Payment failed");
        pay(&mut host, &mut logger, PAYER, 25, vec![]).expect_report("Payment failed");

        let owner = Address::Account(PAYER);
        let state = host.state();
        claim_eq!(state.tokens_of(&owner, 0, 10).len(), 2);
        claim_eq!(state.tokens_of(&owner, 1, 10).len(), 1);
        claim_eq!(state.tokens_of(&owner, 2, 10).len(), 0);
        claim_eq!(state.tokens_of(&owner, 0, 1).len(), 1);

        let mut paged = state.tokens_of(&owner, 0, 1);
        paged.extend(state.tokens_of(&owner, 1, 1));
        claim_eq!(paged, state.tokens_of(&owner, 0, 10));
    }

    #[concordium_test]
    fn test_view_endpoints() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        pay(&mut host, &mut logger, PAYER, 25, vec![]).expect_report("Payment failed");

        let owner = Address::Account(PAYER);
        let bytes = to_bytes(&owner);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);
        claim_eq!(balance_of(&ctx, &host), Ok(1));

        let bytes = to_bytes(&token("1"));
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);
        claim_eq!(owner_of(&ctx, &host), Ok(Some(owner)));
        let record = properties(&ctx, &host).expect_report("Missing properties");
        claim_eq!(record.image, "https://img.example/collection/1.png");

        let bytes = to_bytes(&token("9"));
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);
        claim_eq!(owner_of(&ctx, &host), Ok(None));
        claim_eq!(properties(&ctx, &host), Err(ContractError::InvalidTokenId));

        let ctx = TestReceiveContext::empty();
        claim_eq!(total_supply(&ctx, &host), Ok(2));
        claim_eq!(current_supply(&ctx, &host), Ok(1));
        claim_eq!(is_paused(&ctx, &host), Ok(false));
        claim_eq!(mint_price(&ctx, &host), Ok(TokenAmountU64(25)));
        claim_eq!(mint_asset(&ctx, &host), Ok(MINT_ASSET));
        claim_eq!(contract_owner(&ctx, &host), Ok(OWNER));
    }

    #[concordium_test]
    fn test_update_total_supply() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        pay(&mut host, &mut logger, PAYER, 25, vec![]).expect_report("Payment failed");
        pay(&mut host, &mut logger, PAYER, 25, vec![]).expect_report("Payment failed");

        let update = |host: &mut TestHost<State<TestStateApi>>,
                      sender: AccountAddress,
                      amount: u64| {
            let bytes = to_bytes(&amount);
            let mut ctx = TestReceiveContext::empty();
            ctx.set_sender(Address::Account(sender)).set_parameter(&bytes);
            update_total_supply(&ctx, host)
        };

        claim_eq!(
            update(&mut host, INTRUDER, 5),
            Err(ContractError::Unauthorized)
        );
        claim_eq!(
            update(&mut host, OWNER, 0),
            Err(CustomContractError::InvalidAmount.into())
        );
        claim_eq!(
            update(&mut host, OWNER, 1),
            Err(CustomContractError::StateConflict.into())
        );
        claim_eq!(host.state().total_supply, 2);

        update(&mut host, OWNER, 5).expect_report("Raising the cap failed");
        claim_eq!(host.state().total_supply, 5);

        // The raised cap admits further mints.
        pay(&mut host, &mut logger, PAYER, 25, vec![]).expect_report("Payment failed");
        claim_eq!(host.state().current_supply, 3);
    }

    #[concordium_test]
    fn test_update_image_base_uri_authorization() {
        let mut host = default_host();

        let uri = String::from("https://other.example/");
        let bytes = to_bytes(&uri);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(INTRUDER)).set_parameter(&bytes);
        claim_eq!(
            update_image_base_uri(&ctx, &mut host),
            Err(ContractError::Unauthorized)
        );
        claim_eq!(host.state().image_base_uri, BASE_URI);

        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(OWNER)).set_parameter(&bytes);
        update_image_base_uri(&ctx, &mut host).expect_report("Update failed");
        claim_eq!(host.state().image_base_uri, "https://other.example/");
    }

    #[concordium_test]
    fn test_upgrade() {
        let module = ModuleReference::from([9u8; 32]);

        let run = |host: &mut TestHost<State<TestStateApi>>,
                   sender: AccountAddress,
                   params: &UpgradeParams| {
            let bytes = to_bytes(params);
            let mut ctx = TestReceiveContext::empty();
            ctx.set_sender(Address::Account(sender))
                .set_self_address(SELF_ADDRESS)
                .set_parameter(&bytes);
            upgrade(&ctx, host)
        };

        let plain = UpgradeParams {
            module,
            migrate: None,
        };

        let mut host = default_host();
        claim_eq!(
            run(&mut host, INTRUDER, &plain),
            Err(ContractError::Unauthorized)
        );
        claim_eq!(
            run(
                &mut host,
                OWNER,
                &UpgradeParams {
                    module: ModuleReference::from([0u8; 32]),
                    migrate: None,
                }
            ),
            Err(CustomContractError::EmptyUpgrade.into())
        );

        host.setup_mock_upgrade(module, Err(UpgradeError::MissingModule));
        claim_eq!(
            run(&mut host, OWNER, &plain),
            Err(CustomContractError::FailedUpgradeMissingModule.into())
        );

        let mut host = default_host();
        host.setup_mock_upgrade(module, Ok(()));
        run(&mut host, OWNER, &plain).expect_report("Upgrade failed");

        let mut host = default_host();
        host.setup_mock_upgrade(module, Ok(()));
        host.setup_mock_entrypoint(
            SELF_ADDRESS,
            OwnedEntrypointName::new_unchecked("migrate".into()),
            MockFn::returning_ok(()),
        );
        run(
            &mut host,
            OWNER,
            &UpgradeParams {
                module,
                migrate: Some((
                    OwnedEntrypointName::new_unchecked("migrate".into()),
                    vec![],
                )),
            },
        )
        .expect_report("Upgrade with migration failed");
    }
}
