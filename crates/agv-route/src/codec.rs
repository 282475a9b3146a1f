//! On-disk routing-table format.
//!
//! Little-endian throughout: a `u32` record count, then that many 6-byte
//! records of `from:u16 | dest:u16 | next:u16`.  File size is exactly
//! `4 + 6·N` bytes — no magic, no checksum.
//!
//! Tables run to 10^6–10^7 records, so both directions stream through
//! buffered handles in fixed-size chunks rather than materializing the byte
//! image.  Records are written sorted by `(from, dest)`, which makes equal
//! mappings serialize to identical bytes regardless of hash-map iteration
//! order.

use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use agv_core::PointId;

use crate::table::RoutingTable;
use crate::{RouteError, RouteResult};

const RECORD_LEN: usize = 6;

// ── Writing ───────────────────────────────────────────────────────────────────

/// Serialize `table` to `writer`.
pub fn write_table<W: Write>(table: &RoutingTable, writer: W) -> RouteResult<()> {
    let mut records: Vec<(u16, u16, u16)> = table
        .iter()
        .map(|((from, dest), next)| (from.0, dest.0, next.0))
        .collect();
    records.sort_unstable();

    let mut out = BufWriter::new(writer);
    out.write_all(&(records.len() as u32).to_le_bytes())?;
    for (from, dest, next) in records {
        let mut rec = [0u8; RECORD_LEN];
        rec[0..2].copy_from_slice(&from.to_le_bytes());
        rec[2..4].copy_from_slice(&dest.to_le_bytes());
        rec[4..6].copy_from_slice(&next.to_le_bytes());
        out.write_all(&rec)?;
    }
    out.flush()?;
    Ok(())
}

/// Serialize `table` to a file at `path`, creating or truncating it.
pub fn write_table_path(table: &RoutingTable, path: &Path) -> RouteResult<()> {
    write_table(table, std::fs::File::create(path)?)
}

// ── Reading ───────────────────────────────────────────────────────────────────

/// Deserialize a table from `reader`.
///
/// Rejects short files (`Truncated`) and files with bytes after the last
/// record (`TrailingBytes`).
pub fn read_table<R: Read>(reader: R) -> RouteResult<RoutingTable> {
    let mut input = BufReader::new(reader);

    let mut count_buf = [0u8; 4];
    input
        .read_exact(&mut count_buf)
        .map_err(|e| truncated(e, 0, 0))?;
    let count = u32::from_le_bytes(count_buf) as usize;

    let mut table = RoutingTable::with_capacity(count);
    let mut rec = [0u8; RECORD_LEN];
    for i in 0..count {
        input.read_exact(&mut rec).map_err(|e| truncated(e, count, i))?;
        let from = u16::from_le_bytes([rec[0], rec[1]]);
        let dest = u16::from_le_bytes([rec[2], rec[3]]);
        let next = u16::from_le_bytes([rec[4], rec[5]]);
        table.insert(PointId(from), PointId(dest), PointId(next));
    }

    let mut extra = [0u8; 1];
    match input.read(&mut extra) {
        Ok(0) => Ok(table),
        Ok(_) => Err(RouteError::TrailingBytes),
        Err(e) => Err(e.into()),
    }
}

/// Deserialize a table from the file at `path`.
pub fn read_table_path(path: &Path) -> RouteResult<RoutingTable> {
    read_table(std::fs::File::open(path)?)
}

fn truncated(e: std::io::Error, expected: usize, found: usize) -> RouteError {
    if e.kind() == ErrorKind::UnexpectedEof {
        RouteError::Truncated { expected, found }
    } else {
        RouteError::Io(e)
    }
}
