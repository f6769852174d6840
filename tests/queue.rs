use std::collections::BTreeMap;
use std::time::Duration;

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use rand::prelude::{SliceRandom, StdRng};
use rand::SeedableRng;
use sn_governance::{MemStore, ProposalId, Result, TimeQueue, Timestamp};

use gov_app::{text_proposal, App, VOTING_PERIOD};

static INIT: std::sync::Once = std::sync::Once::new();

fn init() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

#[quickcheck]
fn prop_queue_iterates_in_time_order_up_to_bound(
    end_times: Vec<u8>,
    upto: u8,
    seed: u128,
) -> Result<TestResult> {
    init();
    let mut seed_buf = [0u8; 32];
    seed_buf[0..16].copy_from_slice(&seed.to_le_bytes());
    let mut rng = StdRng::from_seed(seed_buf);

    // proposal ids are unique, end times are not
    let mut entries: Vec<(ProposalId, Timestamp)> = end_times
        .iter()
        .enumerate()
        .map(|(id, t)| (id as ProposalId, Timestamp::from_secs(u64::from(*t))))
        .collect();
    entries.shuffle(&mut rng);

    let mut store = MemStore::new();
    for (id, end_time) in entries.iter() {
        TimeQueue::ACTIVE.insert(&mut store, *end_time, *id)?;
    }

    let upto = Timestamp::from_secs(u64::from(upto));
    let end_time_of: BTreeMap<ProposalId, Timestamp> = entries.iter().copied().collect();

    let mut iter = TimeQueue::ACTIVE.iter(&store, upto);
    let mut last = None;
    let mut yielded = 0;
    while let Some(entry) = iter.next_entry() {
        let (end_time, id) = entry?;
        assert_eq!(end_time_of.get(&id), Some(&end_time));
        assert!(end_time <= upto, "{id} ends at {end_time:?}, after {upto:?}");
        if let Some(prev) = last {
            assert!(prev <= (end_time, id), "{prev:?} came before {:?}", (end_time, id));
        }
        last = Some((end_time, id));
        yielded += 1;
    }
    drop(iter);

    let expected = entries.iter().filter(|(_, t)| *t <= upto).count();
    assert_eq!(yielded, expected);
    Ok(TestResult::passed())
}

#[test]
fn test_active_queue_follows_voting_end_times() -> Result<()> {
    init();
    let mut app = App::new()?;

    // activate proposals in reverse id order, each a block later than the last
    let mut proposals = Vec::new();
    for _ in 0..4 {
        proposals.push(
            app.keeper
                .submit_proposal(&app.header, text_proposal(), vec![])?,
        );
    }
    let start = app.header.time;
    for proposal in proposals.iter_mut().rev() {
        app.next_block(Duration::from_secs(1));
        app.keeper.activate_voting_period(&app.header, proposal)?;
    }

    let ids = app
        .keeper
        .active_queue_iterator(Timestamp::MAX)
        .collect::<Result<Vec<_>>>()?;
    assert_eq!(ids, vec![4, 3, 2, 1]);

    // only the first two voting periods have ended two seconds after the first closed
    let upto = start
        .saturating_add(VOTING_PERIOD)
        .saturating_add(Duration::from_secs(2));
    let ids = app
        .keeper
        .active_queue_iterator(upto)
        .collect::<Result<Vec<_>>>()?;
    assert_eq!(ids, vec![4, 3]);

    assert_eq!(app.keeper.inactive_queue_iterator(Timestamp::MAX).count(), 0);
    Ok(())
}

#[test]
fn test_inactive_queue_orders_by_deposit_end_then_id() -> Result<()> {
    init();
    let mut app = App::new()?;
    let first = app
        .keeper
        .submit_proposal(&app.header, text_proposal(), vec![])?;
    let second = app
        .keeper
        .submit_proposal(&app.header, text_proposal(), vec![])?;
    app.next_block(Duration::from_secs(5));
    let third = app
        .keeper
        .submit_proposal(&app.header, text_proposal(), vec![])?;

    let ids = app
        .keeper
        .inactive_queue_iterator(first.deposit_end_time)
        .collect::<Result<Vec<_>>>()?;
    assert_eq!(ids, vec![first.id, second.id]);

    let ids = app
        .keeper
        .inactive_queue_iterator(third.deposit_end_time)
        .collect::<Result<Vec<_>>>()?;
    assert_eq!(ids, vec![first.id, second.id, third.id]);
    Ok(())
}
