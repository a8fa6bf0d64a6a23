//! Prints the bar item to stdout, one line per render.

use std::io::Write;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::bar::BarFrame;

/// Writes the current frame, then every new frame, until `cancel` fires or
/// the bar item is dropped. Returns the writer.
pub async fn print_bar_updates<W: Write>(
    mut frames: watch::Receiver<BarFrame>,
    mut out: W,
    cancel: CancellationToken,
) -> W {
    loop {
        let line = frames.borrow_and_update().line.clone();
        if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
            log::warn!("Failed to write bar line: {}", e);
            return out;
        }

        tokio::select! {
            _ = cancel.cancelled() => return out,
            changed = frames.changed() => {
                if changed.is_err() {
                    return out;
                }
            }
        }
    }
}

/// Spawns [`print_bar_updates`] on stdout.
pub fn spawn_bar_printer(
    frames: watch::Receiver<BarFrame>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        print_bar_updates(frames, std::io::stdout(), cancel).await;
    })
}
