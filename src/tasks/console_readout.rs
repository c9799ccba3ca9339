//! Console readout background task

use std::io::{self, Write};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::state::TimerSnapshot;

/// Render the `M:SS` readout on stdout whenever it visibly changes
pub async fn console_readout_task(mut snapshots: watch::Receiver<TimerSnapshot>) {
    debug!("Starting console readout task");

    let mut last_line = String::new();

    loop {
        let line = render_line(&snapshots.borrow_and_update());
        if line != last_line {
            let mut stdout = io::stdout().lock();
            if let Err(e) = write!(stdout, "\r{}", line).and_then(|_| stdout.flush()) {
                warn!("Failed to write console readout: {}", e);
            }
            last_line = line;
        }

        if snapshots.changed().await.is_err() {
            debug!("Snapshot channel closed, stopping console readout");
            break;
        }
    }
}

/// One readout line: display followed by the play/stop affordance
pub fn render_line(snapshot: &TimerSnapshot) -> String {
    let icon = if snapshot.running { "[stop]" } else { "[play]" };
    format!("{:>7} {}", snapshot.display, icon)
}
