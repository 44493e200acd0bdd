//! Conversions between driver values and PostgreSQL wire types.

use std::error::Error;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tokio_postgres::types::{FromSql, Kind, ToSql, Type};

use crate::error::{DriverError, Result};
use crate::types::{Row, SqlValue, Value};

pub(crate) type BoxedParam = Box<dyn ToSql + Sync + Send>;

type FromSqlResult<T> = std::result::Result<T, Box<dyn Error + Sync + Send>>;

// Largest magnitudes that survive a round trip through f32 / f64 exactly.
const F32_EXACT_INT: u64 = 1 << 24;
const F64_EXACT_INT: u64 = 1 << 53;

fn is_text_type(ty: &Type) -> bool {
    [Type::TEXT, Type::VARCHAR, Type::BPCHAR, Type::NAME, Type::UNKNOWN].contains(ty)
}

/// Convert a SqlValue to a boxed ToSql matching the declared parameter type.
/// `index` is 1-based, as in `$1`.
pub(crate) fn bind_param(index: usize, value: &SqlValue, ty: &Type) -> Result<BoxedParam> {
    let bound = match value {
        SqlValue::Int(i) => bind_int(*i, ty),
        SqlValue::Float(f) => bind_float(*f, ty),
        SqlValue::Text(s) if is_text_type(ty) => Ok(Box::new(s.clone()) as BoxedParam),
        SqlValue::Text(_) => Err(format!("text cannot be bound to {}", ty)),
    };
    bound.map_err(|reason| DriverError::InvalidParameter { index, reason })
}

fn bind_int(value: i64, ty: &Type) -> std::result::Result<BoxedParam, String> {
    let out_of_range = || format!("{} is out of range for {}", value, ty);
    if *ty == Type::BOOL {
        match value {
            0 => Ok(Box::new(false)),
            1 => Ok(Box::new(true)),
            _ => Err(out_of_range()),
        }
    } else if *ty == Type::INT2 {
        i16::try_from(value)
            .map(|v| Box::new(v) as BoxedParam)
            .map_err(|_| out_of_range())
    } else if *ty == Type::INT4 {
        i32::try_from(value)
            .map(|v| Box::new(v) as BoxedParam)
            .map_err(|_| out_of_range())
    } else if *ty == Type::INT8 {
        Ok(Box::new(value))
    } else if *ty == Type::OID {
        u32::try_from(value)
            .map(|v| Box::new(v) as BoxedParam)
            .map_err(|_| out_of_range())
    } else if *ty == Type::FLOAT4 {
        if value.unsigned_abs() > F32_EXACT_INT {
            return Err(out_of_range());
        }
        Ok(Box::new(value as f32))
    } else if *ty == Type::FLOAT8 {
        if value.unsigned_abs() > F64_EXACT_INT {
            return Err(out_of_range());
        }
        Ok(Box::new(value as f64))
    } else if is_text_type(ty) {
        Ok(Box::new(value.to_string()))
    } else {
        Err(format!("integer cannot be bound to {}", ty))
    }
}

fn bind_float(value: f64, ty: &Type) -> std::result::Result<BoxedParam, String> {
    if *ty == Type::FLOAT4 {
        Ok(Box::new(value as f32))
    } else if *ty == Type::FLOAT8 {
        Ok(Box::new(value))
    } else if is_text_type(ty) {
        Ok(Box::new(value.to_string()))
    } else {
        Err(format!("float cannot be bound to {}", ty))
    }
}

/// A cell of any column type. SQL NULL becomes `Value::Null` whatever the
/// column type; types without a numeric mapping are rendered as text.
pub(crate) struct AnyCell(pub(crate) Value);

impl<'a> FromSql<'a> for AnyCell {
    fn from_sql(ty: &Type, raw: &'a [u8]) -> FromSqlResult<Self> {
        decode_raw(ty, raw).map(AnyCell)
    }

    fn from_sql_null(_ty: &Type) -> FromSqlResult<Self> {
        Ok(AnyCell(Value::Null))
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }
}

fn decode_raw(ty: &Type, raw: &[u8]) -> FromSqlResult<Value> {
    let value = if *ty == Type::BOOL {
        Value::Int(bool::from_sql(ty, raw)? as i64)
    } else if *ty == Type::INT2 {
        Value::Int(i16::from_sql(ty, raw)? as i64)
    } else if *ty == Type::INT4 {
        Value::Int(i32::from_sql(ty, raw)? as i64)
    } else if *ty == Type::INT8 {
        Value::Int(i64::from_sql(ty, raw)?)
    } else if *ty == Type::OID {
        Value::Int(u32::from_sql(ty, raw)? as i64)
    } else if *ty == Type::FLOAT4 {
        Value::Float(f32::from_sql(ty, raw)? as f64)
    } else if *ty == Type::FLOAT8 {
        Value::Float(f64::from_sql(ty, raw)?)
    } else if *ty == Type::NUMERIC {
        Value::Text(numeric_to_string(raw)?)
    } else if *ty == Type::TIMESTAMPTZ {
        Value::Text(DateTime::<Utc>::from_sql(ty, raw)?.to_rfc3339())
    } else if *ty == Type::TIMESTAMP {
        Value::Text(NaiveDateTime::from_sql(ty, raw)?.to_string())
    } else if *ty == Type::DATE {
        Value::Text(NaiveDate::from_sql(ty, raw)?.to_string())
    } else if *ty == Type::TIME {
        Value::Text(NaiveTime::from_sql(ty, raw)?.to_string())
    } else if *ty == Type::UUID {
        Value::Text(uuid::Uuid::from_sql(ty, raw)?.to_string())
    } else if *ty == Type::JSON || *ty == Type::JSONB {
        Value::Text(serde_json::Value::from_sql(ty, raw)?.to_string())
    } else if <String as FromSql<'_>>::accepts(ty) || matches!(ty.kind(), Kind::Enum(_)) {
        // Enum labels travel as their text in binary format
        Value::Text(std::str::from_utf8(raw)?.to_string())
    } else {
        return Err(format!("unsupported column type {}", ty).into());
    };
    Ok(value)
}

/// Renders the binary NUMERIC format (base-10000 digit groups) as decimal text.
fn numeric_to_string(raw: &[u8]) -> FromSqlResult<String> {
    let word = |i: usize| -> FromSqlResult<i16> {
        raw.get(i..i + 2)
            .map(|b| i16::from_be_bytes([b[0], b[1]]))
            .ok_or_else(|| "truncated numeric value".into())
    };

    let ndigits = usize::try_from(word(0)?)?;
    let weight = word(2)? as i32;
    let sign = word(4)? as u16;
    let dscale = usize::try_from(word(6)?)?;
    match sign {
        0xC000 => return Ok("NaN".to_string()),
        0xD000 => return Ok("Infinity".to_string()),
        0xF000 => return Ok("-Infinity".to_string()),
        _ => {}
    }
    let digits = (0..ndigits)
        .map(|i| word(8 + 2 * i))
        .collect::<FromSqlResult<Vec<i16>>>()?;
    let group = |idx: i32| -> i16 {
        usize::try_from(idx)
            .ok()
            .and_then(|i| digits.get(i).copied())
            .unwrap_or(0)
    };

    let mut text = String::new();
    if sign == 0x4000 {
        text.push('-');
    }
    if weight < 0 {
        text.push('0');
    } else {
        text.push_str(&group(0).to_string());
        for idx in 1..=weight {
            text.push_str(&format!("{:04}", group(idx)));
        }
    }
    if dscale > 0 {
        let mut fraction = String::new();
        let mut idx = weight + 1;
        while fraction.len() < dscale {
            fraction.push_str(&format!("{:04}", group(idx)));
            idx += 1;
        }
        fraction.truncate(dscale);
        text.push('.');
        text.push_str(&fraction);
    }
    Ok(text)
}

pub(crate) fn decode_row(row: &tokio_postgres::Row) -> Result<Row> {
    let mut decoded = Row::new();
    for (index, column) in row.columns().iter().enumerate() {
        let AnyCell(value) = row.try_get::<_, AnyCell>(index).map_err(|e| {
            DriverError::QueryFailed(format!(
                "cannot decode column {} of type {}: {}",
                column.name(),
                column.type_(),
                e
            ))
        })?;
        decoded.insert(column.name(), value);
    }
    Ok(decoded)
}
