mod support;

use betslip::domain::{PlayerId, SelectionId};
use betslip::port::outbound::store::{LedgerStore, PlayerLookup};
use rust_decimal_macros::dec;
use support::slip::slip;
use support::temp_db::TempDb;

#[test]
fn new_player_is_created_and_debited() {
    let db = TempDb::create();
    let service = db.service();

    let settlement = service
        .submit_bet(&slip(1, dec!(500), &[(10, dec!(1.5)), (11, dec!(2))]))
        .unwrap();

    assert_eq!(settlement.balance_before, dec!(1000));
    assert_eq!(settlement.balance_after, dec!(500));

    let player = service.balance(PlayerId::new(1)).unwrap().unwrap();
    assert_eq!(player.balance(), dec!(500));

    let history = service.history(PlayerId::new(1)).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].amount, dec!(500));
    assert_eq!(history[0].amount_before, dec!(1000));
    assert_eq!(history[0].bet_id, settlement.bet_id);
}

#[test]
fn bet_and_selections_are_persisted_in_order() {
    let db = TempDb::create();
    let service = db.service();

    let settlement = service
        .submit_bet(&slip(2, dec!(12.5), &[(30, dec!(1.8)), (4, dec!(2.25)), (17, dec!(1.1))]))
        .unwrap();

    let bet = service.bet(settlement.bet_id).unwrap().unwrap();
    assert_eq!(bet.player_id, PlayerId::new(2));
    assert_eq!(bet.stake_amount, dec!(12.5));
    let ids: Vec<SelectionId> = bet.selections.iter().map(|s| s.selection_id).collect();
    assert_eq!(
        ids,
        vec![SelectionId::new(30), SelectionId::new(4), SelectionId::new(17)]
    );
    assert_eq!(bet.selections[1].odds, dec!(2.25));
}

#[test]
fn balance_decreases_by_exactly_the_stake_each_time() {
    let db = TempDb::create();
    let service = db.service();

    for stake in [dec!(0.3), dec!(99.7), dec!(400)] {
        service
            .submit_bet(&slip(3, stake, &[(1, dec!(2))]))
            .unwrap();
    }

    let player = service.balance(PlayerId::new(3)).unwrap().unwrap();
    assert_eq!(player.balance(), dec!(500));
    assert_eq!(player.version(), 3);

    let history = service.history(PlayerId::new(3)).unwrap();
    let before: Vec<_> = history.iter().map(|t| t.amount_before).collect();
    assert_eq!(before, vec![dec!(1000), dec!(999.7), dec!(900)]);
}

#[test]
fn rejected_slip_leaves_database_untouched() {
    let db = TempDb::create();
    let service = db.service();
    service
        .submit_bet(&slip(4, dec!(900), &[(1, dec!(2))]))
        .unwrap();

    let errors = service
        .submit_bet(&slip(4, dec!(200), &[(1, dec!(2))]))
        .unwrap_err();

    assert_eq!(errors.codes(), vec![11]);
    assert_eq!(
        service.balance(PlayerId::new(4)).unwrap().unwrap().balance(),
        dec!(100)
    );
    assert_eq!(service.history(PlayerId::new(4)).unwrap().len(), 1);
}

#[test]
fn ledger_state_survives_reopening() {
    let db = TempDb::create();
    let bet_id = {
        let service = db.service();
        service
            .submit_bet(&slip(5, dec!(250), &[(1, dec!(3))]))
            .unwrap()
            .bet_id
    };

    let store = db.store();
    assert_eq!(
        store.find_player(PlayerId::new(5)).unwrap().unwrap().balance(),
        dec!(750)
    );
    assert!(store.find_bet(bet_id).unwrap().is_some());
}
