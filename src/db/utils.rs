use rust_decimal::{Decimal, prelude::FromPrimitive, prelude::ToPrimitive};
use sqlx::{Row, sqlite::SqliteRow};

use crate::models::Holding;

fn decode_error(column: &str, message: String) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: message.into(),
    }
}

pub fn parse_i64_from_row(row: &SqliteRow, column: &str) -> Result<i64, sqlx::Error> {
    row.try_get::<i64, _>(column)
}

pub fn parse_string_from_row(row: &SqliteRow, column: &str) -> Result<String, sqlx::Error> {
    row.try_get::<String, _>(column)
}

pub fn parse_decimal_from_row(row: &SqliteRow, column: &str) -> Result<Decimal, sqlx::Error> {
    let value: f64 = row.try_get(column)?;
    Decimal::from_f64(value)
        .map(|d| d.round_dp(4).normalize())
        .ok_or_else(|| decode_error(column, format!("Failed to convert {} to Decimal", value)))
}

/// Decimals are stored as REAL rounded to four places.
pub fn decimal_to_f64(value: &Decimal) -> f64 {
    value.round_dp(4).to_f64().unwrap_or_default()
}

pub fn parse_holding(row: SqliteRow) -> Result<Holding, sqlx::Error> {
    let id = parse_i64_from_row(&row, "id")?;
    let ticker = parse_string_from_row(&row, "ticker")?;
    let avg_cost_price = parse_decimal_from_row(&row, "avg_cost_price")?;
    let num_shares_owned = parse_decimal_from_row(&row, "num_shares_owned")?;
    let day_open_price = parse_decimal_from_row(&row, "day_open_price")?;
    let current_price = parse_decimal_from_row(&row, "current_price")?;

    Ok(Holding::new(
        ticker,
        avg_cost_price,
        num_shares_owned,
        day_open_price,
        current_price,
    )
    .with_id(id))
}
