//! Seeding commands for local development.

use sqlx::PgPool;

use fernway_admin::services::popup::PopupService;
use fernway_core::popup::{
    Campaign, PopupBehavior, PopupConfig, PopupContent, PopupStyle, SpinnerSegment,
};

/// Errors from seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Publish error: {0}")]
    Publish(#[from] fernway_admin::services::popup::PopupPublishError),
}

fn database_url() -> Result<String, SeedError> {
    std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| SeedError::MissingEnvVar("ADMIN_DATABASE_URL"))
}

/// Publish a starter spinner campaign through the same validate-and-commit
/// path the admin uses.
///
/// # Errors
///
/// Returns an error if the database is unreachable or the publish fails.
pub async fn popup_config() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();
    let pool = PgPool::connect(&database_url()?).await?;

    let config = starter_popup_config();
    PopupService::new(&pool).publish(&config).await?;

    tracing::info!("Starter popup campaign published");
    Ok(())
}

/// Insert a few sample catalog products.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn products() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();
    let pool = PgPool::connect(&database_url()?).await?;

    let samples: &[(&str, &str, &str)] = &[
        (
            "Juniper Mug",
            "Hand-thrown stoneware mug with a juniper-ash glaze.",
            "28.00",
        ),
        (
            "Fernway Tote",
            "Waxed canvas tote, stitched in the studio.",
            "64.00",
        ),
        (
            "Beeswax Candle Pair",
            "Two hand-dipped beeswax tapers.",
            "18.00",
        ),
    ];

    for (title, description, price) in samples {
        sqlx::query(
            r"
            INSERT INTO storefront.products (title, description, price)
            SELECT $1, $2, $3::numeric
            WHERE NOT EXISTS (SELECT 1 FROM storefront.products WHERE title = $1)
            ",
        )
        .bind(title)
        .bind(description)
        .bind(price)
        .execute(&pool)
        .await?;
    }

    tracing::info!("Sample products seeded");
    Ok(())
}

fn starter_popup_config() -> PopupConfig {
    let palette = ["#b45309", "#0f766e", "#7c3aed", "#be123c", "#166534", "#92400e"];
    let segments = [
        ("5% off", "SPIN5"),
        ("10% off", "SPIN10"),
        ("Free shipping", "SHIPFREE"),
        ("15% off", "SPIN15"),
        ("Free sticker", "STICKER"),
        ("20% off", "SPIN20"),
    ]
    .iter()
    .enumerate()
    .map(|(i, (label, code))| SpinnerSegment {
        id: format!("seg-{i}"),
        label: (*label).to_owned(),
        value: (*code).to_owned(),
        color: (*palette.get(i % palette.len()).unwrap_or(&"#b45309")).to_owned(),
        text_color: "#ffffff".to_owned(),
        probability: 1.0 / 6.0,
    })
    .collect();

    PopupConfig {
        enabled: true,
        campaign: Campaign::Spinner { segments },
        content: PopupContent {
            title: "Spin for a welcome treat".to_owned(),
            description: "Join the studio list and spin the wheel.".to_owned(),
            image_url: None,
            button_text: "Spin to win".to_owned(),
            email_placeholder: "you@example.com".to_owned(),
            disclaimer: Some("One spin per visitor. Codes expire in 30 days.".to_owned()),
            success_title: "You won!".to_owned(),
            success_message: "Use this code at checkout:".to_owned(),
            discount_code: String::new(),
        },
        style: PopupStyle::default(),
        behavior: PopupBehavior {
            delay_seconds: 8,
            show_on_exit: true,
            show_on_scroll: false,
            scroll_percentage: 50,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_config_is_valid() {
        assert!(starter_popup_config().validate().is_ok());
    }
}
