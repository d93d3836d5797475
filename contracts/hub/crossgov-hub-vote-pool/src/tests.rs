use cosmwasm_std::testing::{mock_dependencies, mock_env};
use cosmwasm_std::{Addr, CosmosMsg, Empty, HexBinary, Uint128};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};
use cw_ownable::OwnershipError;
use k256::ecdsa::{SigningKey, VerifyingKey};

use crossgov_attestation::eth::{EthCallData, EthCallQueryRequest, EthCallQueryResponse};
use crossgov_attestation::guardians::{GuardianSet, GuardianSignature};
use crossgov_attestation::response::{
    PerChainQueryRequest, PerChainQueryResponse, QueryRequest, QueryResponse,
    OFF_CHAIN_REQUEST_ID_LEN, OFF_CHAIN_SENDER, RESPONSE_VERSION,
};
use crossgov_attestation::solana::{
    SolanaAccountQueryRequest, SolanaAccountQueryResponse, SolanaAccountResult,
};
use crossgov_attestation::verify::{eth_address, response_digest};
use crossgov_attestation::AttestationError;
use crossgov_hub_governor::proposal::Proposal;
use crossgov_hub_governor::ContractError as GovernorError;
use crossgov_interface::governor::{InfoResponse, ProposeMsg};
use crossgov_voting::proposal::proposal_id;
use crossgov_voting::voting::Votes;

use crate::contract::{migrate, CONTRACT_NAME, CONTRACT_VERSION};
use crate::msg::{
    ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, SpokeAtResponse, SpokeVotesResponse,
};
use crate::state::Config;
use crate::tally::TALLY_SELECTOR;
use crate::ContractError;

const OWNER: &str = "owner";
const RELAYER: &str = "relayer";
const PROPOSER: &str = "proposer";
const DENOM: &str = "ugov";

const VOTING_DELAY: u64 = 90;
const VOTING_PERIOD: u64 = 1800;
const TIMELOCK_DELAY: u64 = 300;
const GRACE_PERIOD: u64 = 600;

/// Default block time of the test framework, in unix seconds.
const T0: u64 = 1_571_797_419;

const EVM_CHAIN: u16 = 23;
const SOLANA_CHAIN: u16 = 1;
const EVM_SPOKE: [u8; 20] = [0x11; 20];
const SOLANA_SPOKE: [u8; 32] = [0x22; 32];

fn pool_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        crate::contract::execute,
        crate::contract::instantiate,
        crate::contract::query,
    )
    .with_migrate(crate::contract::migrate);
    Box::new(contract)
}

fn governor_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        crossgov_hub_governor::contract::execute,
        crossgov_hub_governor::contract::instantiate,
        crossgov_hub_governor::contract::query,
    );
    Box::new(contract)
}

fn staking_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        crossgov_stake::contract::execute,
        crossgov_stake::contract::instantiate,
        crossgov_stake::contract::query,
    );
    Box::new(contract)
}

fn guardian_key(index: u8) -> SigningKey {
    SigningKey::from_bytes(&[index + 1; 32].into()).unwrap()
}

fn guardian_set_of(indices: &[u8]) -> GuardianSet {
    GuardianSet {
        addresses: indices
            .iter()
            .map(|index| {
                eth_address(&VerifyingKey::from(&guardian_key(*index)))
                    .to_vec()
                    .into()
            })
            .collect(),
        expiration_time: 0,
    }
}

/// Signs `bytes` with the listed guardian keys. Each key's position in
/// the list is reported as its index within the set.
fn sign_response(indices: &[u8], bytes: &[u8]) -> Vec<GuardianSignature> {
    let digest = response_digest(bytes);
    indices
        .iter()
        .enumerate()
        .map(|(position, index)| {
            let (signature, recovery_id) = guardian_key(*index)
                .sign_prehash_recoverable(&digest)
                .unwrap();
            let bytes = signature.to_bytes();
            GuardianSignature {
                r: bytes[..32].to_vec().into(),
                s: bytes[32..].to_vec().into(),
                recovery_id: recovery_id.to_byte(),
                guardian_index: position as u8,
            }
        })
        .collect()
}

/// Wraps per-chain reads in a signed off-chain query response envelope.
fn attested(
    indices: &[u8],
    reads: Vec<(PerChainQueryRequest, PerChainQueryResponse)>,
) -> (HexBinary, Vec<GuardianSignature>) {
    let (requests, responses): (Vec<_>, Vec<_>) = reads.into_iter().unzip();
    let envelope = QueryResponse {
        version: RESPONSE_VERSION,
        request_chain_id: OFF_CHAIN_SENDER,
        request_id: vec![0xAB; OFF_CHAIN_REQUEST_ID_LEN],
        request: QueryRequest {
            version: RESPONSE_VERSION,
            nonce: 1,
            requests,
        },
        responses,
    }
    .encode();
    let signatures = sign_response(indices, &envelope);
    (envelope.into(), signatures)
}

fn votes(against: u128, for_votes: u128, abstain: u128) -> Votes {
    Votes {
        against_votes: Uint128::new(against),
        for_votes: Uint128::new(for_votes),
        abstain_votes: Uint128::new(abstain),
    }
}

fn tally_calldata(id: &HexBinary) -> Vec<u8> {
    let mut data = TALLY_SELECTOR.to_vec();
    data.extend_from_slice(id.as_slice());
    data
}

fn eth_read(
    id: &HexBinary,
    tally: &Votes,
    time: u64,
) -> (PerChainQueryRequest, PerChainQueryResponse) {
    let mut record = id.as_slice().to_vec();
    for count in [tally.against_votes, tally.for_votes, tally.abstain_votes] {
        record.extend_from_slice(&[0u8; 16]);
        record.extend_from_slice(&count.u128().to_be_bytes());
    }
    let request = EthCallQueryRequest {
        block_id: "0x28d9630".to_string(),
        calls: vec![EthCallData {
            to: EVM_SPOKE,
            data: tally_calldata(id),
        }],
    };
    let response = EthCallQueryResponse {
        block_number: 42_870_320,
        block_hash: [0x5C; 32],
        block_time_us: time * 1_000_000,
        results: vec![record],
    };
    (request.per_chain(EVM_CHAIN), response.per_chain(EVM_CHAIN))
}

fn solana_read(
    id: &HexBinary,
    tally: &Votes,
    time: u64,
) -> (PerChainQueryRequest, PerChainQueryResponse) {
    let mut data = id.as_slice().to_vec();
    for count in [tally.against_votes, tally.for_votes, tally.abstain_votes] {
        data.extend_from_slice(&(count.u128() as u64).to_le_bytes());
    }
    let request = SolanaAccountQueryRequest {
        commitment: "finalized".to_string(),
        min_context_slot: 0,
        data_slice_offset: 0,
        data_slice_length: 56,
        accounts: vec![[0xAB; 32]],
    };
    let response = SolanaAccountQueryResponse {
        slot_number: 240_866_260,
        block_time_us: time * 1_000_000,
        block_hash: [0x11; 32],
        results: vec![SolanaAccountResult {
            lamports: 1_141_440,
            rent_epoch: 361,
            executable: false,
            owner: SOLANA_SPOKE,
            data,
        }],
    };
    (
        request.per_chain(SOLANA_CHAIN),
        response.per_chain(SOLANA_CHAIN),
    )
}

fn setup_pool(app: &mut App, governor: &Addr, query_types: Vec<u8>) -> Addr {
    let pool_id = app.store_code(pool_contract());
    app.instantiate_contract(
        pool_id,
        Addr::unchecked(OWNER),
        &InstantiateMsg {
            owner: OWNER.to_string(),
            governor: governor.to_string(),
            guardian_set: guardian_set_of(&[0, 1, 2]),
            query_types,
        },
        &[],
        "spoke vote pool",
        None,
    )
    .unwrap()
}

/// Instantiates staking, governor, and pool, then points the governor
/// at the pool so merged deltas are accepted.
fn setup_test_case(app: &mut App) -> (Addr, Addr) {
    let staking_id = app.store_code(staking_contract());
    let staking = app
        .instantiate_contract(
            staking_id,
            Addr::unchecked(OWNER),
            &crossgov_stake::msg::InstantiateMsg {
                owner: OWNER.to_string(),
                denom: DENOM.to_string(),
                vesting_admin: None,
            },
            &[],
            "staking ledger",
            None,
        )
        .unwrap();

    let governor_id = app.store_code(governor_contract());
    let governor = app
        .instantiate_contract(
            governor_id,
            Addr::unchecked(OWNER),
            &crossgov_hub_governor::msg::InstantiateMsg {
                owner: Some(OWNER.to_string()),
                staking: staking.to_string(),
                vote_pool: None,
                voting_delay: VOTING_DELAY,
                voting_period: VOTING_PERIOD,
                timelock_delay: TIMELOCK_DELAY,
                grace_period: GRACE_PERIOD,
                proposal_threshold: Uint128::zero(),
                quorum: Uint128::new(100),
                executor: None,
                extension: None,
                pre_propose_module: None,
            },
            &[],
            "hub governor",
            None,
        )
        .unwrap();

    let pool = setup_pool(app, &governor, vec![1, 2, 3, 4, 5]);

    app.execute_contract(
        Addr::unchecked(OWNER),
        governor.clone(),
        &crossgov_hub_governor::msg::ExecuteMsg::UpdateConfig {
            staking: staking.to_string(),
            vote_pool: Some(pool.to_string()),
            voting_delay: VOTING_DELAY,
            voting_period: VOTING_PERIOD,
            timelock_delay: TIMELOCK_DELAY,
            grace_period: GRACE_PERIOD,
            proposal_threshold: Uint128::zero(),
            executor: None,
            extension: None,
        },
        &[],
    )
    .unwrap();

    (governor, pool)
}

fn advance_time(app: &mut App, seconds: u64) {
    app.update_block(|block| {
        block.time = block.time.plus_seconds(seconds);
        block.height += 1;
    });
}

fn register_spoke(app: &mut App, pool: &Addr, chain_id: u16, identity: Vec<u8>) {
    app.execute_contract(
        Addr::unchecked(OWNER),
        pool.clone(),
        &ExecuteMsg::RegisterSpoke {
            chain_id,
            identity: identity.into(),
        },
        &[],
    )
    .unwrap();
}

fn universal(address: &[u8; 20]) -> Vec<u8> {
    let mut out = vec![0u8; 12];
    out.extend_from_slice(address);
    out
}

/// Creates a proposal and advances the clock into its voting window.
fn active_proposal(app: &mut App, governor: &Addr) -> HexBinary {
    let msgs: Vec<CosmosMsg> = vec![];
    let description = "count the spoke tallies";
    app.execute_contract(
        Addr::unchecked(PROPOSER),
        governor.clone(),
        &crossgov_hub_governor::msg::ExecuteMsg::Propose(ProposeMsg {
            title: "a proposal".to_string(),
            description: description.to_string(),
            msgs: msgs.clone(),
            proposer: None,
        }),
        &[],
    )
    .unwrap();
    advance_time(app, VOTING_DELAY + 1);
    proposal_id(&msgs, description).unwrap()
}

fn cross_chain_vote(
    app: &mut App,
    pool: &Addr,
    response: HexBinary,
    signatures: Vec<GuardianSignature>,
) -> anyhow::Result<AppResponse> {
    app.execute_contract(
        Addr::unchecked(RELAYER),
        pool.clone(),
        &ExecuteMsg::CrossChainVote {
            response,
            signatures,
        },
        &[],
    )
}

fn proposal_votes(app: &App, governor: &Addr, id: &HexBinary) -> Votes {
    let proposal: Proposal = app
        .wrap()
        .query_wasm_smart(
            governor,
            &crossgov_hub_governor::msg::QueryMsg::Proposal {
                proposal_id: id.clone(),
            },
        )
        .unwrap();
    proposal.votes
}

fn pool_votes(app: &App, pool: &Addr, chain_id: u16, id: &HexBinary) -> Votes {
    let response: SpokeVotesResponse = app
        .wrap()
        .query_wasm_smart(
            pool,
            &QueryMsg::SpokeVotes {
                chain_id,
                proposal_id: id.clone(),
            },
        )
        .unwrap();
    response.votes
}

fn spoke_at(app: &App, pool: &Addr, chain_id: u16, time: u64) -> Option<HexBinary> {
    let response: SpokeAtResponse = app
        .wrap()
        .query_wasm_smart(pool, &QueryMsg::SpokeAt { chain_id, time })
        .unwrap();
    response.identity
}

#[test]
fn test_instantiate_configures_pool() {
    let mut app = App::default();
    let (governor, pool) = setup_test_case(&mut app);

    let config: Config = app
        .wrap()
        .query_wasm_smart(&pool, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(config.governor, governor);
    assert_eq!(config.guardian_set, guardian_set_of(&[0, 1, 2]));

    let ownership: cw_ownable::Ownership<Addr> = app
        .wrap()
        .query_wasm_smart(&pool, &QueryMsg::Ownership {})
        .unwrap();
    assert_eq!(ownership.owner, Some(Addr::unchecked(OWNER)));

    for query_type in 1..=5u8 {
        let enabled: bool = app
            .wrap()
            .query_wasm_smart(&pool, &QueryMsg::QueryTypeEnabled { query_type })
            .unwrap();
        assert!(enabled);
    }
    let enabled: bool = app
        .wrap()
        .query_wasm_smart(&pool, &QueryMsg::QueryTypeEnabled { query_type: 0 })
        .unwrap();
    assert!(!enabled);

    let info: InfoResponse = app
        .wrap()
        .query_wasm_smart(&pool, &QueryMsg::Info {})
        .unwrap();
    assert_eq!(info.info.contract, CONTRACT_NAME);
    assert_eq!(info.info.version, CONTRACT_VERSION);
}

#[test]
fn test_instantiate_validates_inputs() {
    let mut app = App::default();
    let pool_id = app.store_code(pool_contract());

    let err: ContractError = app
        .instantiate_contract(
            pool_id,
            Addr::unchecked(OWNER),
            &InstantiateMsg {
                owner: OWNER.to_string(),
                governor: "governor".to_string(),
                guardian_set: GuardianSet {
                    addresses: vec![],
                    expiration_time: 0,
                },
                query_types: vec![],
            },
            &[],
            "spoke vote pool",
            None,
        )
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(
        err,
        ContractError::Attestation(AttestationError::EmptyGuardianSet)
    );

    let err: ContractError = app
        .instantiate_contract(
            pool_id,
            Addr::unchecked(OWNER),
            &InstantiateMsg {
                owner: OWNER.to_string(),
                governor: "governor".to_string(),
                guardian_set: guardian_set_of(&[0, 1, 2]),
                query_types: vec![1, 9],
            },
            &[],
            "spoke vote pool",
            None,
        )
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(
        err,
        ContractError::Attestation(AttestationError::UnsupportedQueryType(9))
    );
}

#[test]
fn test_register_spoke_tracks_history() {
    let mut app = App::default();
    let (_governor, pool) = setup_test_case(&mut app);

    register_spoke(&mut app, &pool, EVM_CHAIN, universal(&EVM_SPOKE));
    advance_time(&mut app, 100);
    register_spoke(&mut app, &pool, EVM_CHAIN, vec![0u8; 32]);

    assert_eq!(spoke_at(&app, &pool, EVM_CHAIN, T0 - 1), None);
    assert_eq!(
        spoke_at(&app, &pool, EVM_CHAIN, T0),
        Some(universal(&EVM_SPOKE).into())
    );
    assert_eq!(
        spoke_at(&app, &pool, EVM_CHAIN, T0 + 99),
        Some(universal(&EVM_SPOKE).into())
    );
    assert_eq!(
        spoke_at(&app, &pool, EVM_CHAIN, T0 + 100),
        Some(vec![0u8; 32].into())
    );
    assert_eq!(spoke_at(&app, &pool, SOLANA_CHAIN, T0 + 100), None);
}

#[test]
fn test_register_spoke_requires_owner_and_shape() {
    let mut app = App::default();
    let (_governor, pool) = setup_test_case(&mut app);

    let err: ContractError = app
        .execute_contract(
            Addr::unchecked(RELAYER),
            pool.clone(),
            &ExecuteMsg::RegisterSpoke {
                chain_id: EVM_CHAIN,
                identity: universal(&EVM_SPOKE).into(),
            },
            &[],
        )
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(err, ContractError::Ownership(OwnershipError::NotOwner));

    let err: ContractError = app
        .execute_contract(
            Addr::unchecked(OWNER),
            pool.clone(),
            &ExecuteMsg::RegisterSpoke {
                chain_id: EVM_CHAIN,
                identity: EVM_SPOKE.to_vec().into(),
            },
            &[],
        )
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(err, ContractError::InvalidSpokeIdentity {});
}

#[test]
fn test_register_query_type_toggles_intake() {
    let mut app = App::default();
    let (_governor, pool) = setup_test_case(&mut app);

    app.execute_contract(
        Addr::unchecked(OWNER),
        pool.clone(),
        &ExecuteMsg::RegisterQueryType {
            query_type: 4,
            enabled: false,
        },
        &[],
    )
    .unwrap();
    let enabled: bool = app
        .wrap()
        .query_wasm_smart(&pool, &QueryMsg::QueryTypeEnabled { query_type: 4 })
        .unwrap();
    assert!(!enabled);

    app.execute_contract(
        Addr::unchecked(OWNER),
        pool.clone(),
        &ExecuteMsg::RegisterQueryType {
            query_type: 4,
            enabled: true,
        },
        &[],
    )
    .unwrap();
    let enabled: bool = app
        .wrap()
        .query_wasm_smart(&pool, &QueryMsg::QueryTypeEnabled { query_type: 4 })
        .unwrap();
    assert!(enabled);

    let err: ContractError = app
        .execute_contract(
            Addr::unchecked(OWNER),
            pool.clone(),
            &ExecuteMsg::RegisterQueryType {
                query_type: 9,
                enabled: true,
            },
            &[],
        )
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(
        err,
        ContractError::Attestation(AttestationError::UnsupportedQueryType(9))
    );

    let err: ContractError = app
        .execute_contract(
            Addr::unchecked(RELAYER),
            pool.clone(),
            &ExecuteMsg::RegisterQueryType {
                query_type: 4,
                enabled: false,
            },
            &[],
        )
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(err, ContractError::Ownership(OwnershipError::NotOwner));
}

#[test]
fn test_cross_chain_vote_merges_into_governor() {
    let mut app = App::default();
    let (governor, pool) = setup_test_case(&mut app);
    register_spoke(&mut app, &pool, EVM_CHAIN, universal(&EVM_SPOKE));
    let id = active_proposal(&mut app, &governor);

    let tally = votes(10, 700, 25);
    let (response, signatures) = attested(&[0, 1, 2], vec![eth_read(&id, &tally, T0 + 50)]);
    cross_chain_vote(&mut app, &pool, response.clone(), signatures.clone()).unwrap();

    assert_eq!(pool_votes(&app, &pool, EVM_CHAIN, &id), tally);
    assert_eq!(proposal_votes(&app, &governor, &id), tally);

    // replaying the same observation merges nothing
    cross_chain_vote(&mut app, &pool, response, signatures).unwrap();
    assert_eq!(pool_votes(&app, &pool, EVM_CHAIN, &id), tally);
    assert_eq!(proposal_votes(&app, &governor, &id), tally);
}

#[test]
fn test_growing_tally_merges_only_the_delta() {
    let mut app = App::default();
    let (governor, pool) = setup_test_case(&mut app);
    register_spoke(&mut app, &pool, EVM_CHAIN, universal(&EVM_SPOKE));
    let id = active_proposal(&mut app, &governor);

    let (response, signatures) =
        attested(&[0, 1, 2], vec![eth_read(&id, &votes(0, 100, 0), T0 + 50)]);
    cross_chain_vote(&mut app, &pool, response, signatures).unwrap();

    let grown = votes(5, 150, 0);
    let (response, signatures) = attested(&[0, 1, 2], vec![eth_read(&id, &grown, T0 + 60)]);
    cross_chain_vote(&mut app, &pool, response, signatures).unwrap();

    // the governor holds the spoke's running tally, not a double count
    assert_eq!(pool_votes(&app, &pool, EVM_CHAIN, &id), grown);
    assert_eq!(proposal_votes(&app, &governor, &id), grown);
}

#[test]
fn test_shrinking_tally_is_rejected() {
    let mut app = App::default();
    let (governor, pool) = setup_test_case(&mut app);
    register_spoke(&mut app, &pool, EVM_CHAIN, universal(&EVM_SPOKE));
    let id = active_proposal(&mut app, &governor);

    let (response, signatures) =
        attested(&[0, 1, 2], vec![eth_read(&id, &votes(0, 100, 0), T0 + 50)]);
    cross_chain_vote(&mut app, &pool, response, signatures).unwrap();

    let (response, signatures) =
        attested(&[0, 1, 2], vec![eth_read(&id, &votes(0, 90, 0), T0 + 60)]);
    let err: ContractError = cross_chain_vote(&mut app, &pool, response, signatures)
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(err, ContractError::InvalidProposalVote {});
}

#[test]
fn test_multi_chain_envelope_merges_each_read() {
    let mut app = App::default();
    let (governor, pool) = setup_test_case(&mut app);
    register_spoke(&mut app, &pool, EVM_CHAIN, universal(&EVM_SPOKE));
    register_spoke(&mut app, &pool, SOLANA_CHAIN, SOLANA_SPOKE.to_vec());
    let id = active_proposal(&mut app, &governor);

    let evm_tally = votes(10, 700, 25);
    let solana_tally = votes(3, 900, 42);
    let (response, signatures) = attested(
        &[0, 1, 2],
        vec![
            eth_read(&id, &evm_tally, T0 + 50),
            solana_read(&id, &solana_tally, T0 + 50),
        ],
    );
    cross_chain_vote(&mut app, &pool, response, signatures).unwrap();

    assert_eq!(pool_votes(&app, &pool, EVM_CHAIN, &id), evm_tally);
    assert_eq!(pool_votes(&app, &pool, SOLANA_CHAIN, &id), solana_tally);
    assert_eq!(
        proposal_votes(&app, &governor, &id),
        votes(13, 1600, 67)
    );
}

#[test]
fn test_unsupported_query_type_is_rejected() {
    let mut app = App::default();
    let (governor, _pool) = setup_test_case(&mut app);
    let restricted = setup_pool(&mut app, &governor, vec![3]);

    let id: HexBinary = vec![0xCD; 32].into();
    let (response, signatures) =
        attested(&[0, 1, 2], vec![eth_read(&id, &votes(0, 1, 0), T0 + 50)]);
    let err: ContractError = cross_chain_vote(&mut app, &restricted, response, signatures)
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(err, ContractError::UnsupportedQueryType { query_type: 1 });
}

#[test]
fn test_unregistered_chain_is_rejected() {
    let mut app = App::default();
    let (governor, pool) = setup_test_case(&mut app);
    let id = active_proposal(&mut app, &governor);

    let (response, signatures) =
        attested(&[0, 1, 2], vec![eth_read(&id, &votes(0, 1, 0), T0 + 50)]);
    let err: ContractError = cross_chain_vote(&mut app, &pool, response, signatures)
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(
        err,
        ContractError::UnknownSpoke {
            chain_id: EVM_CHAIN
        }
    );
}

#[test]
fn test_sub_quorum_signatures_are_rejected() {
    let mut app = App::default();
    let (governor, pool) = setup_test_case(&mut app);
    register_spoke(&mut app, &pool, EVM_CHAIN, universal(&EVM_SPOKE));
    let id = active_proposal(&mut app, &governor);

    let (response, signatures) =
        attested(&[0, 1], vec![eth_read(&id, &votes(0, 1, 0), T0 + 50)]);
    let err: ContractError = cross_chain_vote(&mut app, &pool, response, signatures)
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(
        err,
        ContractError::Attestation(AttestationError::NoQuorum { got: 2, quorum: 3 })
    );
}

#[test]
fn test_guardian_rotation_invalidates_old_signatures() {
    let mut app = App::default();
    let (governor, pool) = setup_test_case(&mut app);
    register_spoke(&mut app, &pool, EVM_CHAIN, universal(&EVM_SPOKE));
    let id = active_proposal(&mut app, &governor);

    app.execute_contract(
        Addr::unchecked(OWNER),
        pool.clone(),
        &ExecuteMsg::UpdateGuardianSet {
            guardian_set: guardian_set_of(&[10, 11, 12]),
        },
        &[],
    )
    .unwrap();

    let tally = votes(0, 500, 0);
    let (response, signatures) = attested(&[0, 1, 2], vec![eth_read(&id, &tally, T0 + 50)]);
    let err: ContractError = cross_chain_vote(&mut app, &pool, response, signatures)
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(
        err,
        ContractError::Attestation(AttestationError::GuardianSignatureMismatch(0))
    );

    let (response, signatures) = attested(&[10, 11, 12], vec![eth_read(&id, &tally, T0 + 50)]);
    cross_chain_vote(&mut app, &pool, response, signatures).unwrap();
    assert_eq!(proposal_votes(&app, &governor, &id), tally);
}

#[test]
fn test_failed_merge_rolls_back_the_observation() {
    let mut app = App::default();
    let (governor, pool) = setup_test_case(&mut app);
    register_spoke(&mut app, &pool, EVM_CHAIN, universal(&EVM_SPOKE));
    let id = active_proposal(&mut app, &governor);
    advance_time(&mut app, VOTING_PERIOD);

    let (response, signatures) =
        attested(&[0, 1, 2], vec![eth_read(&id, &votes(0, 500, 0), T0 + 50)]);
    let err: GovernorError = cross_chain_vote(&mut app, &pool, response, signatures)
        .unwrap_err()
        .downcast()
        .unwrap();
    assert!(matches!(err, GovernorError::ProposalNotActive { .. }));

    // the whole submission reverted, so the observation can be
    // replayed against a later proposal state
    assert_eq!(pool_votes(&app, &pool, EVM_CHAIN, &id), Votes::zero());
}

#[test]
fn test_update_config_points_at_new_governor() {
    let mut app = App::default();
    let (_governor, pool) = setup_test_case(&mut app);

    let err: ContractError = app
        .execute_contract(
            Addr::unchecked(RELAYER),
            pool.clone(),
            &ExecuteMsg::UpdateConfig {
                governor: "newgovernor".to_string(),
            },
            &[],
        )
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(err, ContractError::Ownership(OwnershipError::NotOwner));

    app.execute_contract(
        Addr::unchecked(OWNER),
        pool.clone(),
        &ExecuteMsg::UpdateConfig {
            governor: "newgovernor".to_string(),
        },
        &[],
    )
    .unwrap();
    let config: Config = app
        .wrap()
        .query_wasm_smart(&pool, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(config.governor, Addr::unchecked("newgovernor"));
}

#[test]
fn test_update_guardian_set_requires_valid_set() {
    let mut app = App::default();
    let (_governor, pool) = setup_test_case(&mut app);

    let err: ContractError = app
        .execute_contract(
            Addr::unchecked(OWNER),
            pool.clone(),
            &ExecuteMsg::UpdateGuardianSet {
                guardian_set: GuardianSet {
                    addresses: vec![],
                    expiration_time: 0,
                },
            },
            &[],
        )
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(
        err,
        ContractError::Attestation(AttestationError::EmptyGuardianSet)
    );

    let err: ContractError = app
        .execute_contract(
            Addr::unchecked(OWNER),
            pool.clone(),
            &ExecuteMsg::UpdateGuardianSet {
                guardian_set: GuardianSet {
                    addresses: vec![vec![0x11; 19].into()],
                    expiration_time: 0,
                },
            },
            &[],
        )
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(
        err,
        ContractError::Attestation(AttestationError::InvalidGuardianAddress(19))
    );

    let err: ContractError = app
        .execute_contract(
            Addr::unchecked(RELAYER),
            pool.clone(),
            &ExecuteMsg::UpdateGuardianSet {
                guardian_set: guardian_set_of(&[10, 11, 12]),
            },
            &[],
        )
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(err, ContractError::Ownership(OwnershipError::NotOwner));
}

#[test]
fn test_migrate_updates_contract_version() {
    let mut deps = mock_dependencies();
    cw2::set_contract_version(&mut deps.storage, CONTRACT_NAME, "0.0.1").unwrap();
    migrate(deps.as_mut(), mock_env(), MigrateMsg {}).unwrap();
    let version = cw2::get_contract_version(&deps.storage).unwrap();
    assert_eq!(version.contract, CONTRACT_NAME);
    assert_eq!(version.version, CONTRACT_VERSION);
}
