use anyhow::{Context, Result};
use opc_publisher_models::PublishedItemApiModel;
use rusqlite::{Connection, Row};
use time::OffsetDateTime;

/// Publish a node on an endpoint, or update its intervals if it is already published.
/// Items keep the position they got when first published.
pub fn publish(conn: &Connection, endpoint_id: &str, item: &PublishedItemApiModel) -> Result<()> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let browse_path = item
        .browse_path
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .context("Failed to encode browse path")?;

    conn.execute(
        "INSERT INTO published_items
             (endpoint_id, node_id, browse_path,
              publishing_interval, sampling_interval, published_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(endpoint_id, node_id) DO UPDATE SET
             browse_path = excluded.browse_path,
             publishing_interval = excluded.publishing_interval,
             sampling_interval = excluded.sampling_interval",
        rusqlite::params![
            endpoint_id,
            item.node_id,
            browse_path,
            item.publishing_interval,
            item.sampling_interval,
            now
        ],
    )
    .context("Failed to upsert published item")?;

    Ok(())
}

/// Stop publishing a node. Returns false if the node was not published.
pub fn unpublish(conn: &Connection, endpoint_id: &str, node_id: &str) -> Result<bool> {
    let rows_deleted = conn
        .execute(
            "DELETE FROM published_items WHERE endpoint_id = ?1 AND node_id = ?2",
            rusqlite::params![endpoint_id, node_id],
        )
        .context("Failed to delete published item")?;

    Ok(rows_deleted > 0)
}

/// Read up to `limit` items starting at `offset`. The flag tells whether more items follow.
pub fn list_page(
    conn: &Connection,
    endpoint_id: &str,
    offset: usize,
    limit: usize,
) -> Result<(Vec<PublishedItemApiModel>, bool)> {
    let mut stmt = conn
        .prepare(
            "SELECT node_id, browse_path, publishing_interval, sampling_interval
             FROM published_items WHERE endpoint_id = ?1
             ORDER BY rowid LIMIT ?2 OFFSET ?3",
        )
        .context("Failed to prepare statement")?;

    let fetch = i64::try_from(limit.saturating_add(1))
        .context("Page size out of range")?;
    let offset = i64::try_from(offset).context("Offset out of range")?;
    let mut items = stmt
        .query_map(rusqlite::params![endpoint_id, fetch, offset], read_item)
        .context("Failed to query published items")?
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to collect published items")?;

    let has_more = items.len() > limit;
    items.truncate(limit);
    Ok((items, has_more))
}

fn read_item(row: &Row<'_>) -> rusqlite::Result<PublishedItemApiModel> {
    let browse_path: Option<String> = row.get(1)?;
    let browse_path = browse_path
        .map(|s| serde_json::from_str(&s))
        .transpose()
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(PublishedItemApiModel {
        node_id: row.get(0)?,
        browse_path,
        publishing_interval: row.get(2)?,
        sampling_interval: row.get(3)?,
    })
}
