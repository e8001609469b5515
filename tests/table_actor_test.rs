use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use resource_store::ActorClient;
use std::collections::HashSet;
use tableside::model::{GuestDetails, TableCreate, TableStatus, TableUpdate};
use tableside::session::SessionId;
use tableside::table_actor::TableError;

/// Random occupy / release / admin sequences against a real Table actor.
/// After every step: a table has a session iff it is occupied, and no session id is
/// ever handed out twice.
#[tokio::test]
async fn test_session_iff_occupied_under_random_sequences() {
    let (actor, tables) = tableside::table_actor::new(16);
    let handle = tokio::spawn(actor.run(()));

    for number in 1..=4 {
        tables
            .create_table(TableCreate {
                number,
                capacity: 2,
                status: TableStatus::Available,
            })
            .await
            .unwrap();
    }

    let mut rng = StdRng::seed_from_u64(0x7AB1E);
    let mut minted: HashSet<SessionId> = HashSet::new();

    for step in 0..400 {
        let floor = tables.list().await.unwrap();
        let table = &floor[rng.gen_range(0..floor.len())];

        match rng.gen_range(0..5) {
            0 | 1 => {
                let guest = GuestDetails::new(&format!("Guest {step}"), "555-0000").unwrap();
                match tables.occupy(table, guest, "waiter_1").await {
                    Ok(seated) => {
                        assert_eq!(table.status, TableStatus::Available);
                        let session = seated.session_id.expect("occupied without session");
                        assert!(minted.insert(session), "session id reused");
                    }
                    Err(TableError::NotAvailable { status, .. }) => {
                        assert_ne!(status, TableStatus::Available);
                    }
                    Err(e) => panic!("step {step}: unexpected occupy error {e}"),
                }
            }
            2 => match table.session_id {
                Some(session) => {
                    tables.release_session(table.id, session).await.unwrap();
                }
                None => {
                    let err = tables.release(table.id).await.unwrap_err();
                    assert_eq!(err, TableError::NotOccupied(table.number));
                }
            },
            3 => {
                let result = tables.release_session(table.id, SessionId::begin()).await;
                if table.is_occupied() {
                    assert_eq!(result.unwrap_err(), TableError::SessionMismatch(table.number));
                } else {
                    assert_eq!(result.unwrap_err(), TableError::NotOccupied(table.number));
                }
            }
            _ => {
                let status = if rng.gen_bool(0.5) {
                    TableStatus::Reserved
                } else {
                    TableStatus::Available
                };
                let result = tables
                    .update_table(
                        table.id,
                        TableUpdate {
                            status: Some(status),
                            ..Default::default()
                        },
                    )
                    .await;
                if table.is_occupied() {
                    assert_eq!(result.unwrap_err(), TableError::Occupied(table.number));
                } else {
                    assert_eq!(result.unwrap().status, status);
                }
            }
        }

        for t in tables.list().await.unwrap() {
            assert_eq!(
                t.session_id.is_some(),
                t.status == TableStatus::Occupied,
                "step {step}: table {} broke the session invariant",
                t.number
            );
            assert_eq!(t.guest_name.is_some(), t.is_occupied());
        }
    }

    drop(tables);
    handle.await.unwrap();
}
