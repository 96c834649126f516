//! SQL shared by the profile, link and image repositories
//!
//! Links and images keep independent dense `position` sequences per owner;
//! the helpers here keep those sequences dense inside one transaction.

use linkpage_domain::{Assignments, ColumnValue, LinkpageError, Result};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use super::manager::map_sql_error;

/// Build `UPDATE {table} SET .., updated_at = ? WHERE {scope}` and run it.
///
/// Every assigned column must appear in `allowed`. `scope` holds the
/// `WHERE` column/value pairs, joined with `AND`.
pub(crate) fn update_columns(
    conn: &Connection,
    table: &str,
    allowed: &[&str],
    assignments: Assignments,
    updated_at: i64,
    scope: &[(&str, &str)],
) -> Result<usize> {
    if let Some((column, _)) = assignments.iter().find(|(c, _)| !allowed.contains(c)) {
        return Err(LinkpageError::Internal(format!("column {column} is not writable on {table}")));
    }

    let mut sets: Vec<String> = assignments.iter().map(|(column, _)| format!("{column} = ?")).collect();
    sets.push("updated_at = ?".to_string());
    let filter: Vec<String> = scope.iter().map(|(column, _)| format!("{column} = ?")).collect();
    let sql = format!("UPDATE {table} SET {} WHERE {}", sets.join(", "), filter.join(" AND "));

    let mut values: Vec<Value> = assignments.into_iter().map(|(_, value)| to_sql_value(value)).collect();
    values.push(Value::Integer(updated_at));
    values.extend(scope.iter().map(|(_, value)| Value::Text((*value).to_string())));

    conn.execute(&sql, params_from_iter(values)).map_err(map_sql_error)
}

fn to_sql_value(value: ColumnValue) -> Value {
    match value {
        ColumnValue::Text(Some(text)) => Value::Text(text),
        ColumnValue::Bool(flag) => Value::Integer(i64::from(flag)),
        ColumnValue::Integer(Some(number)) => Value::Integer(number),
        ColumnValue::Text(None) | ColumnValue::Integer(None) => Value::Null,
    }
}

/// Insert one row of `user_id` after its last position, in one statement.
///
/// `columns` and `values` describe the row without `position`; the first
/// column must be `user_id`. With `limit` set, nothing is inserted once the
/// owner already holds that many rows and `Ok(None)` is returned.
pub(crate) fn append(
    conn: &Connection,
    table: &str,
    columns: &[&str],
    values: Vec<Value>,
    limit: Option<usize>,
) -> Result<Option<i64>> {
    let user_id = match values.first() {
        Some(Value::Text(user_id)) if columns.first() == Some(&"user_id") => user_id.clone(),
        _ => return Err(LinkpageError::Internal(format!("append on {table} needs user_id first"))),
    };

    let owner = values.len() + 1;
    let placeholders: Vec<String> = (1..=values.len()).map(|i| format!("?{i}")).collect();
    let mut sql = format!(
        "INSERT INTO {table} ({}, position) SELECT {}, \
         COALESCE((SELECT MAX(position) + 1 FROM {table} WHERE user_id = ?{owner}), 0)",
        columns.join(", "),
        placeholders.join(", "),
    );
    let mut params = values;
    params.push(Value::Text(user_id));
    if let Some(limit) = limit {
        sql.push_str(&format!(
            " WHERE (SELECT COUNT(*) FROM {table} WHERE user_id = ?{owner}) < ?{}",
            owner + 1
        ));
        params.push(Value::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));
    }
    sql.push_str(" RETURNING position");

    conn.query_row(&sql, params_from_iter(params), |row| row.get(0))
        .optional()
        .map_err(map_sql_error)
}

/// Delete one owned row and close the gap it leaves. Atomic.
pub(crate) fn delete_and_compact(
    conn: &mut Connection,
    table: &str,
    user_id: &str,
    id: &str,
) -> Result<Option<i64>> {
    let tx = conn.transaction().map_err(map_sql_error)?;

    let removed: Option<i64> = tx
        .query_row(
            &format!("SELECT position FROM {table} WHERE id = ?1 AND user_id = ?2"),
            params![id, user_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(map_sql_error)?;

    let Some(position) = removed else {
        return Ok(None);
    };

    tx.execute(&format!("DELETE FROM {table} WHERE id = ?1 AND user_id = ?2"), params![id, user_id])
        .map_err(map_sql_error)?;
    // (user_id, position) is unique and checked per row, so later rows move
    // through negative slots before landing one below their old position
    tx.execute(
        &format!("UPDATE {table} SET position = -position - 1 WHERE user_id = ?1 AND position > ?2"),
        params![user_id, position],
    )
    .map_err(map_sql_error)?;
    tx.execute(
        &format!("UPDATE {table} SET position = -position - 2 WHERE user_id = ?1 AND position < 0"),
        params![user_id],
    )
    .map_err(map_sql_error)?;

    tx.commit().map_err(map_sql_error)?;
    Ok(Some(position))
}

/// Write every `(id, position)` pair or none of them.
///
/// Returns the number of owned rows matched. When that falls short of
/// `positions.len()` the transaction is rolled back and nothing changes.
/// Rows are parked at `-position - 1` first so no intermediate state
/// collides on the unique `(user_id, position)` index.
pub(crate) fn apply_positions(
    conn: &mut Connection,
    table: &str,
    user_id: &str,
    positions: &[(String, i64)],
) -> Result<usize> {
    let tx = conn.transaction().map_err(map_sql_error)?;
    let mut affected = 0;
    {
        let mut stmt = tx
            .prepare(&format!("UPDATE {table} SET position = ?1 WHERE id = ?2 AND user_id = ?3"))
            .map_err(map_sql_error)?;
        for (id, position) in positions {
            affected += stmt.execute(params![-position - 1, id, user_id]).map_err(map_sql_error)?;
        }
    }

    if affected == positions.len() {
        tx.execute(
            &format!("UPDATE {table} SET position = -position - 1 WHERE user_id = ?1 AND position < 0"),
            params![user_id],
        )
        .map_err(map_sql_error)?;
        tx.commit().map_err(map_sql_error)?;
    } else {
        tx.rollback().map_err(map_sql_error)?;
    }
    Ok(affected)
}
