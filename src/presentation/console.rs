// Console output - writes the dashboard views as JSON
use crate::presentation::app_state::AppState;
use std::io::Write;

pub fn write_snapshot<W: Write>(snapshot: &serde_json::Value, out: &mut W) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, snapshot)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

pub async fn render(state: &AppState) -> anyhow::Result<()> {
    let snapshot = state.snapshot().await;
    write_snapshot(&snapshot, &mut std::io::stdout().lock())
}
