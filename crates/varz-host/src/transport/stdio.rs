//! Line-oriented session over any async reader/writer pair (stdin/stdout in
//! the binary, in-memory buffers in tests).
//!
//! Responsibilities:
//! - Decode each line once into an operation descriptor
//! - Forward it to the engine task and await the result
//! - Write read results one per line; mutations write nothing
//! - Rejected records produce an error line and the session continues

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use varz_core::error::{Result, VarzError};

use crate::app_state::AppState;
use crate::transport::codec::{decode_line, error_json};

/// Per-session tallies, logged when the input ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub records: u64,
    pub outputs: u64,
    pub rejected: u64,
}

pub async fn run_session<R, W>(app: &AppState, reader: R, mut writer: W) -> Result<SessionStats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let engine = app.engine();
    let mut lines = reader.lines();
    let mut stats = SessionStats::default();
    let mut line_no = 0u64;

    while let Some(line) = lines.next_line().await.map_err(io_err)? {
        line_no += 1;

        let res = match decode_line(&line) {
            Ok(None) => continue,
            Ok(Some(desc)) => {
                stats.records += 1;
                engine.execute(desc).await
            }
            Err(e) => {
                stats.records += 1;
                Err(e)
            }
        };

        match res {
            Ok(Some(text)) => {
                write_line(&mut writer, &text).await?;
                stats.outputs += 1;
            }
            Ok(None) => {}
            // Engine task is gone; nothing further can succeed.
            Err(e @ VarzError::Internal(_)) => return Err(e),
            Err(e) => {
                tracing::warn!(line_no, code = e.code().as_str(), error = %e, "record rejected");
                write_line(&mut writer, &error_json(&e)).await?;
                stats.rejected += 1;
            }
        }
    }

    writer.flush().await.map_err(io_err)?;
    tracing::info!(
        records = stats.records,
        outputs = stats.outputs,
        rejected = stats.rejected,
        "input closed"
    );
    Ok(stats)
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, text: &str) -> Result<()> {
    writer.write_all(text.as_bytes()).await.map_err(io_err)?;
    writer.write_all(b"\n").await.map_err(io_err)
}

fn io_err(e: std::io::Error) -> VarzError {
    VarzError::Internal(format!("io: {e}"))
}
