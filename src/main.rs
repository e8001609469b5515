//! Demo: one table through a full seating, then a second party at the same table.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

use anyhow::Context;
use resource_store::tracing::setup_tracing;
use resource_store::ActorClient;
use rust_decimal::Decimal;
use std::sync::Arc;
use tableside::config::EngineConfig;
use tableside::lifecycle::RestaurantSystem;
use tableside::model::{
    Cart, Category, GuestDetails, MenuBoard, MenuItem, OrderStatus, PaymentMethod, TableCreate,
    TableStatus,
};
use tableside::settings::FixedTaxRate;
use tracing::{info, Instrument};

fn menu() -> (Vec<Category>, Vec<MenuItem>) {
    let categories = vec![
        Category {
            id: "starters".into(),
            category: "Starters".into(),
        },
        Category {
            id: "drinks".into(),
            category: "Drinks".into(),
        },
    ];
    let items = vec![
        MenuItem {
            id: "paneer_tikka".into(),
            name: "Paneer Tikka".into(),
            price: Decimal::new(120, 0),
            category: "Starters".into(),
            description: Some("Char-grilled cottage cheese".into()),
            available: true,
        },
        MenuItem {
            id: "mango_lassi".into(),
            name: "Mango Lassi".into(),
            price: Decimal::new(80, 0),
            category: "Drinks".into(),
            description: None,
            available: true,
        },
    ];
    (categories, items)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_tracing();
    let config = EngineConfig::from_env()?;

    info!("Starting restaurant system");
    let system = RestaurantSystem::new(&config, Arc::new(FixedTaxRate(Decimal::new(18, 0))));

    for number in 1..=6 {
        system
            .tables
            .create_table(TableCreate {
                number,
                capacity: 4,
                status: TableStatus::Available,
            })
            .await?;
    }
    let table_5 = system
        .tables
        .floor()
        .into_iter()
        .find(|t| t.number == 5)
        .context("table 5 was not created")?;

    // Scenario 1: seat guest A and send an order to the kitchen.
    let (categories, items) = menu();
    let board = MenuBoard::new(&categories, &items);
    let (seated, order_id) = async {
        let guest = GuestDetails::new("A", "555-1111")?;
        let seated = system.tables.occupy(&table_5, guest, "waiter_1").await?;

        let mut cart = Cart::new();
        let tikka = board.find("paneer_tikka").context("missing menu item")?;
        let lassi = board.find("mango_lassi").context("missing menu item")?;
        cart.add(tikka)?;
        cart.add(tikka)?;
        cart.add(lassi)?;
        info!(total = %cart.total(), "Cart ready");

        let order_id = system
            .orders
            .submit(&seated, cart.into_items(), None, Some("waiter_1".into()))
            .await?;
        anyhow::Ok((seated, order_id))
    }
    .instrument(tracing::info_span!("scenario_1"))
    .await?;

    let order = system.orders.get(order_id).await?.context("order vanished")?;
    info!(status = %order.status, total = %order.total_amount, "Order placed");

    // Scenario 2: the kitchen works the order until it is ready for pickup.
    async {
        system.orders.advance(order_id, OrderStatus::Preparing).await?;
        system.orders.advance(order_id, OrderStatus::Ready).await?;
        let tables = system.tables.list().await?;
        let orders = system.orders.list().await?;
        let ready = tableside::order_actor::queries::ready_for_pickup(&orders, &tables);
        info!(ready = ready.len(), "Ready for pickup");
        anyhow::Ok(())
    }
    .instrument(tracing::info_span!("scenario_2"))
    .await?;

    // Scenario 3: settle the table.
    let bill = system
        .billing
        .settle_table(seated.id, PaymentMethod::Cash)
        .instrument(tracing::info_span!("scenario_3"))
        .await?;
    info!(
        subtotal = %bill.subtotal,
        tax = %bill.tax,
        total = %bill.total,
        status = ?bill.status,
        "Bill settled"
    );

    // Scenario 4: a new party at the same table sees none of the old orders.
    async {
        let released = system.tables.get(seated.id).await?.context("table vanished")?;
        let guest = GuestDetails::new("B", "555-2222")?;
        let reseated = system.tables.occupy(&released, guest, "waiter_2").await?;
        let session = reseated.session_id.context("occupied table has no session")?;
        let orders = system.orders.session_orders(reseated.id, session).await?;
        info!(
            new_session = %session,
            previous_session = ?seated.session_id,
            orders = orders.len(),
            "Table re-seated"
        );
        anyhow::Ok(())
    }
    .instrument(tracing::info_span!("scenario_4"))
    .await?;

    system
        .shutdown()
        .await
        .map_err(anyhow::Error::msg)?;
    Ok(())
}
