use resource_store::ActorClient;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tableside::billing::BillingError;
use tableside::config::EngineConfig;
use tableside::lifecycle::RestaurantSystem;
use tableside::model::{
    BillStatus, GuestDetails, OrderItem, OrderStatus, PaymentMethod, StaffIdentity, StaffRole,
    Table, TableCreate, TableStatus, TableUpdate,
};
use tableside::order_actor::{queries, OrderError};
use tableside::projections::DashboardView;
use tableside::settings::FixedTaxRate;
use tableside::table_actor::TableError;

async fn start(gst: i64) -> (RestaurantSystem, Table) {
    let system = RestaurantSystem::new(
        &EngineConfig::default(),
        Arc::new(FixedTaxRate(Decimal::new(gst, 0))),
    );
    for number in 1..=6 {
        system
            .tables
            .create_table(TableCreate {
                number,
                capacity: 4,
                status: TableStatus::Available,
            })
            .await
            .expect("Failed to create table");
    }
    let table_5 = system
        .tables
        .floor()
        .into_iter()
        .find(|t| t.number == 5)
        .expect("Table 5 not on the floor");
    (system, table_5)
}

fn line(id: &str, price: i64, quantity: u32) -> OrderItem {
    OrderItem {
        id: id.to_string(),
        name: id.to_string(),
        price: Decimal::new(price, 0),
        quantity,
        notes: None,
        category: "Mains".to_string(),
    }
}

fn guest_a() -> GuestDetails {
    GuestDetails::new("A", "555-1111").expect("valid guest")
}

/// Scenarios 1 to 4 in sequence: seat, order, cook, settle, re-seat.
#[tokio::test]
async fn test_full_seating_lifecycle() {
    let (system, table_5) = start(18).await;

    // 1. Occupy and submit.
    let seated = system
        .tables
        .occupy(&table_5, guest_a(), "waiter_1")
        .await
        .expect("Failed to occupy");
    assert_eq!(seated.status, TableStatus::Occupied);
    assert_eq!(seated.guest_name.as_deref(), Some("A"));
    assert_eq!(seated.waiter_id.as_deref(), Some("waiter_1"));
    let first_session = seated.session_id.expect("Occupied table has a session");

    let order_id = system
        .orders
        .submit(
            &seated,
            vec![line("tikka", 120, 2), line("lassi", 80, 1)],
            None,
            Some("waiter_1".into()),
        )
        .await
        .expect("Failed to submit");
    let order = system.orders.get(order_id).await.unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_amount, Decimal::new(320, 0));
    assert_eq!(order.session_id, first_session);
    assert_eq!(
        system.tables.get(seated.id).await.unwrap().unwrap().status,
        TableStatus::Occupied
    );

    // 2. Kitchen flow, then pickup view for table 5's current session.
    system
        .orders
        .advance(order_id, OrderStatus::Preparing)
        .await
        .expect("Failed to start preparing");
    let ready = system
        .orders
        .advance(order_id, OrderStatus::Ready)
        .await
        .expect("Failed to mark ready");
    assert_eq!(ready.status, OrderStatus::Ready);
    let again = system.orders.advance(order_id, OrderStatus::Ready).await.unwrap();
    assert_eq!(again.status, OrderStatus::Ready);

    let tables = system.tables.list().await.unwrap();
    let orders = system.orders.list().await.unwrap();
    let pickup = queries::ready_for_pickup(&orders, &tables);
    assert_eq!(pickup.len(), 1);
    assert_eq!(pickup[0].id, order_id);
    assert!(pickup[0].belongs_to(seated.id, &first_session));

    // 3. Settle at 18% GST.
    let session_orders = system
        .orders
        .session_orders(seated.id, first_session)
        .await
        .unwrap();
    let bill = system
        .billing
        .settle(&seated, &session_orders, PaymentMethod::Card)
        .await
        .expect("Failed to settle");
    assert_eq!(bill.subtotal, Decimal::new(320, 0));
    assert_eq!(bill.tax, Decimal::new(576, 1));
    assert_eq!(bill.total, Decimal::new(3776, 1));
    assert_eq!(bill.status, BillStatus::Paid);
    assert_eq!(bill.payment_method, Some(PaymentMethod::Card));
    assert_eq!(bill.paid_at, Some(bill.generated_at));
    assert_eq!(bill.orders, vec![order_id]);
    assert_eq!(bill.session_id, first_session);

    let released = system.tables.get(seated.id).await.unwrap().unwrap();
    assert_eq!(released.status, TableStatus::Available);
    assert_eq!(released.session_id, None);
    assert_eq!(released.guest_name, None);
    assert_eq!(released.waiter_id, None);

    let served = system.orders.get(order_id).await.unwrap().unwrap();
    assert_eq!(served.status, OrderStatus::Served);
    assert!(served.served_at.is_some());

    // 4. A new party gets a new session and none of the old orders.
    let reseated = system
        .tables
        .occupy(&released, GuestDetails::new("B", "555-2222").unwrap(), "waiter_2")
        .await
        .expect("Failed to re-occupy");
    let second_session = reseated.session_id.unwrap();
    assert_ne!(second_session, first_session);
    let current = system
        .orders
        .session_orders(reseated.id, second_session)
        .await
        .unwrap();
    assert!(current.is_empty());

    // History stays queryable by its own session.
    let history = system
        .orders
        .session_orders(reseated.id, first_session)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert!(system.bills.for_session(first_session).await.unwrap().is_some());

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_racing_occupies_seat_one_party() {
    let (system, table_5) = start(5).await;

    let (first, second) = tokio::join!(
        system.tables.occupy(&table_5, guest_a(), "waiter_1"),
        system
            .tables
            .occupy(&table_5, GuestDetails::new("C", "555-3333").unwrap(), "waiter_2"),
    );

    let (winner, loser) = match (first, second) {
        (Ok(t), Err(e)) | (Err(e), Ok(t)) => (t, e),
        other => panic!("Expected exactly one occupy to succeed, got {other:?}"),
    };
    assert!(matches!(
        loser,
        TableError::NotAvailable { .. } | TableError::Conflict(_)
    ));

    let stored = system.tables.get(table_5.id).await.unwrap().unwrap();
    assert_eq!(stored.session_id, winner.session_id);
    assert_eq!(stored.guest_name, winner.guest_name);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_settle_guards() {
    let (system, table_5) = start(5).await;
    let seated = system
        .tables
        .occupy(&table_5, guest_a(), "waiter_1")
        .await
        .unwrap();

    // Nothing ordered yet: no bill, table stays occupied.
    let err = system
        .billing
        .settle(&seated, &[], PaymentMethod::Cash)
        .await
        .unwrap_err();
    assert_eq!(err, BillingError::NothingToBill(5));
    assert!(system.bills.list().await.unwrap().is_empty());
    assert!(system.tables.get(seated.id).await.unwrap().unwrap().is_occupied());

    let session = seated.session_id.unwrap();
    system
        .orders
        .submit(&seated, vec![line("dosa", 90, 1)], None, None)
        .await
        .unwrap();
    let first_round = system.orders.session_orders(seated.id, session).await.unwrap();
    system
        .orders
        .submit(&seated, vec![line("vada", 60, 2)], None, None)
        .await
        .unwrap();

    // Billing a stale order list is refused before anything is written.
    let err = system
        .billing
        .settle(&seated, &first_round, PaymentMethod::Cash)
        .await
        .unwrap_err();
    assert!(matches!(err, BillingError::Conflict(_)));
    assert!(system.bills.list().await.unwrap().is_empty());

    // Two settlements at once: exactly one bill.
    let (a, b) = tokio::join!(
        system.billing.settle_table(seated.id, PaymentMethod::Cash),
        system.billing.settle_table(seated.id, PaymentMethod::Card),
    );
    assert!(a.is_ok() != b.is_ok(), "Exactly one settlement must succeed");
    let failure = a.err().or(b.err()).unwrap();
    assert!(matches!(
        failure,
        BillingError::SettleInProgress(5)
            | BillingError::Conflict(_)
            | BillingError::AlreadySettled(_)
            | BillingError::InconsistentState(_)
    ));
    assert_eq!(system.bills.list().await.unwrap().len(), 1);

    // Settling again with the old view of the table.
    let session_orders = system.orders.list().await.unwrap();
    let err = system
        .billing
        .settle(&seated, &session_orders, PaymentMethod::Cash)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BillingError::Conflict(_) | BillingError::AlreadySettled(_)
    ));
    assert_eq!(system.bills.list().await.unwrap().len(), 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_orders_need_the_live_session() {
    let (system, table_5) = start(5).await;
    let seated = system
        .tables
        .occupy(&table_5, guest_a(), "waiter_1")
        .await
        .unwrap();

    // Not occupied at all.
    let err = system
        .orders
        .submit(&table_5, vec![line("dosa", 90, 1)], None, None)
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::InvalidSession(5));

    // Released behind the caller's back: the actor rejects the stale session.
    let session = seated.session_id.unwrap();
    system.tables.release_session(seated.id, session).await.unwrap();
    let err = system
        .orders
        .submit(&seated, vec![line("dosa", 90, 1)], None, None)
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::InvalidSession(5));
    assert!(system.orders.list().await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_kitchen_cannot_skip_steps() {
    let (system, table_5) = start(5).await;
    let seated = system
        .tables
        .occupy(&table_5, guest_a(), "waiter_1")
        .await
        .unwrap();
    let order_id = system
        .orders
        .submit(&seated, vec![line("dosa", 90, 1)], None, None)
        .await
        .unwrap();

    let err = system
        .orders
        .advance(order_id, OrderStatus::Ready)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderError::InvalidTransition {
            from: OrderStatus::Pending,
            to: OrderStatus::Ready,
        }
    );
    let stored = system.orders.get(order_id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Pending);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_free_table_only_without_balance() {
    let (system, table_5) = start(5).await;
    let seated = system
        .tables
        .occupy(&table_5, guest_a(), "waiter_1")
        .await
        .unwrap();

    let freed = system.billing.free_table(seated.id).await.unwrap();
    assert_eq!(freed.status, TableStatus::Available);
    assert!(system.bills.list().await.unwrap().is_empty());

    let seated = system
        .tables
        .occupy(&freed, guest_a(), "waiter_1")
        .await
        .unwrap();
    system
        .orders
        .submit_served(&seated, vec![line("water", 20, 1)], None)
        .await
        .unwrap();
    let err = system.billing.free_table(seated.id).await.unwrap_err();
    assert_eq!(
        err,
        BillingError::OutstandingBalance {
            number: 5,
            total: Decimal::new(20, 0),
        }
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_table_administration() {
    let (system, table_5) = start(5).await;

    let err = system
        .tables
        .create_table(TableCreate {
            number: 5,
            capacity: 2,
            status: TableStatus::Available,
        })
        .await
        .unwrap_err();
    assert_eq!(err, TableError::DuplicateNumber("5".into()));

    let err = system
        .tables
        .update_table(
            table_5.id,
            TableUpdate {
                status: Some(TableStatus::Occupied),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TableError::Validation(_)));

    let seated = system
        .tables
        .occupy(&table_5, guest_a(), "waiter_1")
        .await
        .unwrap();
    assert_eq!(
        system.tables.delete_table(seated.id).await.unwrap_err(),
        TableError::Occupied(5)
    );

    let updated = system
        .tables
        .update_table(
            seated.id,
            TableUpdate {
                capacity: Some(6),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.capacity, 6);
    assert_eq!(updated.session_id, seated.session_id);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cleanup_after_settlement() {
    let (system, table_5) = start(5).await;
    let seated = system
        .tables
        .occupy(&table_5, guest_a(), "waiter_1")
        .await
        .unwrap();
    system
        .orders
        .submit(&seated, vec![line("dosa", 90, 1)], None, None)
        .await
        .unwrap();
    system
        .billing
        .settle_table(seated.id, PaymentMethod::Cash)
        .await
        .unwrap();

    assert_eq!(system.orders.purge_served_orders().await.unwrap(), 1);
    assert_eq!(system.bills.purge_paid_bills().await.unwrap(), 1);
    assert!(system.orders.list().await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reception_dashboard_follows_the_floor() {
    let (system, table_5) = start(5).await;
    let identity = StaffIdentity {
        uid: "rec_1".into(),
        role: StaffRole::Reception,
        email: "front@example.com".into(),
    };
    let mut dashboard = system.dashboard(&identity);
    assert!(matches!(
        dashboard.current(),
        DashboardView::Reception(ref view) if view.active.is_empty()
    ));

    system
        .tables
        .occupy(&table_5, guest_a(), "waiter_1")
        .await
        .unwrap();

    let seen = tokio::time::timeout(Duration::from_secs(2), async {
        while let Some(view) = dashboard.changed().await {
            if let DashboardView::Reception(view) = view {
                if view.active.len() == 1 {
                    return Some(view);
                }
            }
        }
        None
    })
    .await
    .expect("Dashboard did not refresh")
    .expect("Dashboard stopped");
    assert_eq!(seen.active[0].table_number, 5);
    assert_eq!(seen.active[0].guest_name, "A");
    assert_eq!(seen.active[0].running_total, Decimal::ZERO);

    drop(dashboard);
    system.shutdown().await.unwrap();
}
