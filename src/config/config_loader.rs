use std::{env, str::FromStr};

use anyhow::{Context, Result};

use crate::config::{
    config_model::{Database, DotEnvyConfig, Server, Supabase},
    stage::Stage,
};

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{key} is missing"))
}

fn parsed<T>(key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    required(key)?
        .trim()
        .parse::<T>()
        .with_context(|| format!("{key} is invalid"))
}

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: parsed("SERVER_PORT")?,
        body_limit: parsed("SERVER_BODY_LIMIT")?,
        timeout: parsed("SERVER_TIMEOUT")?,
    };

    let database = Database {
        url: required("DATABASE_URL")?,
    };

    let supabase = Supabase {
        jwt_secret: required("SUPABASE_JWT_SECRET")?,
    };

    Ok(DotEnvyConfig {
        server,
        database,
        supabase,
    })
}

pub fn get_stage() -> Stage {
    dotenvy::dotenv().ok();

    let stage_str = env::var("STAGE").unwrap_or_default();
    Stage::try_from(&stage_str).unwrap_or_default()
}
