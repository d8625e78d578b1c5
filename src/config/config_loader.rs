use anyhow::{Ok, Result};

use super::config_model::{Database, DotEnvyConfig, JwtSecret, Server, Stripe};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let stripe = std::env::var("STRIPE_SECRET_KEY")
        .ok()
        .filter(|secret_key| !secret_key.trim().is_empty())
        .map(|secret_key| Stripe {
            secret_key,
            webhook_secret: std::env::var("STRIPE_WEBHOOK_SECRET")
                .expect("STRIPE_WEBHOOK_SECRET is invalid"),
            currency: std::env::var("STRIPE_CURRENCY").unwrap_or_else(|_| "eur".to_string()),
        });

    Ok(DotEnvyConfig {
        server,
        database,
        stripe,
    })
}

pub fn get_jwt_secret() -> Result<JwtSecret> {
    dotenvy::dotenv().ok();

    Ok(JwtSecret {
        secret: std::env::var("JWT_SECRET").expect("JWT_SECRET is invalid"),
    })
}
