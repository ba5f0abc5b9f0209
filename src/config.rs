use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub sweep_interval_secs: u64,
    pub calendar_max_days: i64, // Widest window a calendar or bulk inventory edit may span
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            sweep_interval_secs: env::var("SWEEP_INTERVAL_SECS").unwrap_or_else(|_| "300".to_string()).parse().expect("SWEEP_INTERVAL_SECS must be a number"),
            calendar_max_days: env::var("CALENDAR_MAX_DAYS").unwrap_or_else(|_| "366".to_string()).parse().expect("CALENDAR_MAX_DAYS must be a number"),
        }
    }
}
