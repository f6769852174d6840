use std::collections::BTreeSet;

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use sn_governance::{
    Address, Deposit, Proposal, ProposalId, ProposalStatus, QueryProposalsParams, Result,
    Timestamp, Vote, VoteOption, DEFAULT_QUERY_LIMIT,
};

use gov_app::{addr, text_proposal, App};

static INIT: std::sync::Once = std::sync::Once::new();

fn init() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

fn stored_proposal(id: ProposalId, status: ProposalStatus) -> Proposal {
    let now = Timestamp::from_secs(id);
    let mut p = Proposal::new(id, text_proposal(), vec![], now, now);
    p.status = status;
    if status != ProposalStatus::DepositPeriod {
        p.voting_start_time = Some(now);
        p.voting_end_time = Some(now);
    }
    p
}

/// 100 proposals, ids 1..=100, alternating two deposit-period and two voting-period
/// proposals. `participant` deposits and votes on every even-indexed one.
fn populate(app: &mut App, participant: Address) -> Result<()> {
    for i in 0..100u64 {
        let id = i + 1;
        let status = if (i / 2) % 2 == 0 {
            ProposalStatus::DepositPeriod
        } else {
            ProposalStatus::VotingPeriod
        };

        if i % 2 == 0 {
            app.keeper.set_deposit(&Deposit::new(id, participant, 10))?;
            app.keeper
                .set_vote(&Vote::non_split(id, participant, VoteOption::Yes))?;
        }
        app.keeper.set_proposal(&stored_proposal(id, status))?;
    }
    Ok(())
}

fn ids(proposals: &[Proposal]) -> Vec<ProposalId> {
    proposals.iter().map(|p| p.id).collect()
}

#[test]
fn test_get_proposals_filtered() -> Result<()> {
    init();
    let mut app = App::new()?;
    let a = addr(1);
    populate(&mut app, a)?;

    use ProposalStatus::*;
    let test_cases = [
        (QueryProposalsParams::new(1, 50, None, None, None), 50),
        (QueryProposalsParams::new(1, 50, Some(DepositPeriod), None, None), 50),
        (QueryProposalsParams::new(1, 50, Some(VotingPeriod), None, None), 50),
        (QueryProposalsParams::new(1, 25, None, None, None), 25),
        (QueryProposalsParams::new(2, 25, None, None, None), 25),
        (QueryProposalsParams::new(1, 50, Some(Rejected), None, None), 0),
        (QueryProposalsParams::new(1, 50, None, Some(a), None), 50),
        (QueryProposalsParams::new(1, 50, None, None, Some(a)), 50),
        (QueryProposalsParams::new(1, 50, None, Some(a), Some(a)), 50),
        (QueryProposalsParams::new(1, 50, Some(DepositPeriod), Some(a), Some(a)), 25),
        (QueryProposalsParams::new(1, 50, Some(VotingPeriod), Some(a), None), 25),
        (QueryProposalsParams::new(1, 50, None, Some(addr(2)), None), 0),
        (QueryProposalsParams::new(3, 50, None, None, None), 0),
        (QueryProposalsParams::new(0, 50, None, None, None), 0),
        (QueryProposalsParams::new(1, 0, None, None, None), DEFAULT_QUERY_LIMIT),
    ];

    for (i, (params, expected_len)) in test_cases.iter().enumerate() {
        let proposals = app.keeper.get_proposals_filtered(params)?;
        assert_eq!(proposals.len(), *expected_len, "tc #{i}: {params:?}");

        let got = ids(&proposals);
        let mut sorted = got.clone();
        sorted.sort_unstable();
        assert_eq!(got, sorted, "tc #{i}: results must be in id order");

        for p in proposals.iter() {
            if let Some(status) = params.status {
                assert_eq!(p.status, status, "tc #{i}");
            }
            if let Some(depositor) = params.depositor.as_ref() {
                assert!(app.keeper.get_deposit(p.id, depositor)?.is_some());
            }
            if let Some(voter) = params.voter.as_ref() {
                assert!(app.keeper.get_vote(p.id, voter)?.is_some());
            }
        }
    }
    Ok(())
}

#[test]
fn test_adjacent_pages_are_disjoint_and_contiguous() -> Result<()> {
    init();
    let mut app = App::new()?;
    populate(&mut app, addr(1))?;

    let page_1 = app
        .keeper
        .get_proposals_filtered(&QueryProposalsParams::new(1, 25, None, None, None))?;
    let page_2 = app
        .keeper
        .get_proposals_filtered(&QueryProposalsParams::new(2, 25, None, None, None))?;

    assert_eq!(ids(&page_1), (1..=25).collect::<Vec<_>>());
    assert_eq!(ids(&page_2), (26..=50).collect::<Vec<_>>());
    Ok(())
}

#[test]
fn test_filters_follow_deposit_and_vote_records() -> Result<()> {
    init();
    let mut app = App::new()?;
    let a = addr(1);
    let b = addr(2);
    for id in 1..=3 {
        app.keeper
            .set_proposal(&stored_proposal(id, ProposalStatus::VotingPeriod))?;
    }
    app.keeper.set_deposit(&Deposit::new(2, a, 5))?;
    app.keeper
        .set_vote(&Vote::non_split(3, b, VoteOption::NoWithVeto))?;

    let by_a = app
        .keeper
        .get_proposals_filtered(&QueryProposalsParams::new(1, 10, None, Some(a), None))?;
    assert_eq!(ids(&by_a), vec![2]);

    let voted_by_b = app
        .keeper
        .get_proposals_filtered(&QueryProposalsParams::new(1, 10, None, None, Some(b)))?;
    assert_eq!(ids(&voted_by_b), vec![3]);

    let both = app
        .keeper
        .get_proposals_filtered(&QueryProposalsParams::new(1, 10, None, Some(a), Some(b)))?;
    assert!(both.is_empty());

    app.keeper.delete_deposits(2);
    let by_a = app
        .keeper
        .get_proposals_filtered(&QueryProposalsParams::new(1, 10, None, Some(a), None))?;
    assert!(by_a.is_empty());
    Ok(())
}

#[quickcheck]
fn prop_pages_partition_the_filtered_set(
    statuses: Vec<bool>,
    limit: u8,
    voting_only: bool,
) -> Result<TestResult> {
    init();
    let limit = limit as usize % 10 + 1;
    if statuses.len() > 60 {
        return Ok(TestResult::discard());
    }

    let mut app = App::new()?;
    for (i, voting) in statuses.iter().enumerate() {
        let status = if *voting {
            ProposalStatus::VotingPeriod
        } else {
            ProposalStatus::DepositPeriod
        };
        app.keeper
            .set_proposal(&stored_proposal(i as u64 + 1, status))?;
    }

    let status = voting_only.then(|| ProposalStatus::VotingPeriod);
    let everything = app
        .keeper
        .get_proposals_filtered(&QueryProposalsParams::new(1, usize::MAX, status, None, None))?;

    let mut paged = Vec::new();
    let mut seen = BTreeSet::new();
    for page in 1.. {
        let proposals = app
            .keeper
            .get_proposals_filtered(&QueryProposalsParams::new(page, limit, status, None, None))?;
        if proposals.is_empty() {
            break;
        }
        assert!(proposals.len() <= limit);
        for p in proposals {
            assert!(seen.insert(p.id), "proposal {} appeared on two pages", p.id);
            paged.push(p);
        }
    }

    assert_eq!(ids(&paged), ids(&everything));
    Ok(TestResult::passed())
}
