//! # FoodHub Cart demo
//!
//! Restores the cart from disk, adds a few meals, prints the order summary and,
//! when `FOODHUB_DEMO_CHECKOUT=1`, places the order against the configured backend.

use foodhub_cart::checkout::DeliveryDetails;
use foodhub_cart::config::AppConfig;
use foodhub_cart::lifecycle::{setup_tracing, CartSystem};
use foodhub_cart::model::Meal;
use tracing::{error, info, Instrument};

fn sample_meals() -> Vec<Meal> {
    vec![
        Meal::new("4", "Kacchi Biriyani", 480.0)
            .with_description("Traditional Bangladeshi aromatic rice dish with tender mutton pieces and potatoes.")
            .with_provider("sultans-dine", "Sultan's Dine"),
        Meal::new("9", "Beef Sheek Kabab", 220.0).with_provider("star-kabab", "Star Kabab"),
        Meal::new("10", "Butter Naan", 60.0).with_provider("star-kabab", "Star Kabab"),
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = AppConfig::from_env()?;
    let system = CartSystem::new(&config)?;

    let restored = system.cart_client.snapshot().await?;
    info!(lines = restored.items.len(), total_items = restored.total_items, "Cart restored");

    let span = tracing::info_span!("browsing");
    async {
        let meals = sample_meals();
        system.cart_client.add_item(meals[0].clone(), 1).await?;
        system.cart_client.add_item(meals[1].clone(), 2).await?;
        system.cart_client.add_item(meals[2].clone(), 4).await?;
        system.cart_client.update_quantity(meals[2].id.clone(), 3).await?;
        Ok::<_, foodhub_cart::cart_actor::CartError>(())
    }
    .instrument(span)
    .await?;

    for line in system.cart_client.items().await? {
        info!(
            meal = %line.meal.name,
            provider = line.meal.provider_name().unwrap_or("-"),
            quantity = line.quantity,
            line_total = line.line_total(),
            "Line"
        );
    }

    let summary = system.summary().await?;
    info!(
        subtotal = summary.subtotal,
        delivery_fee = summary.delivery_fee,
        total = summary.total,
        "Order summary"
    );

    if std::env::var("FOODHUB_DEMO_CHECKOUT").as_deref() == Ok("1") {
        let details = DeliveryDetails::new("House 12, Road 5, Dhanmondi", "01712345678")
            .with_notes("Call on arrival");
        let span = tracing::info_span!("checkout");
        match system.place_order(&details).instrument(span).await {
            Ok(order_id) => info!(%order_id, "Order placed"),
            Err(e) => error!(error = %e, "Checkout failed, cart kept for retry"),
        }
    }

    system.shutdown().await?;
    info!("Done");
    Ok(())
}
