//! Driving the display from `tracing` spans with [`ProgressLayer`].

use std::sync::Arc;
use std::time::Duration;

use nested_progress::*;
use tracing::{info, info_span};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    let display = Arc::new(ProgressDisplay::stdout());
    tracing_subscriber::registry()
        .with(ProgressLayer::new(display.clone()))
        .init();

    let deploy = info_span!("deploy", message = "Deploying to staging", persistent = true);
    deploy.in_scope(|| {
        for env in ["staging", "canary"] {
            let rollout = info_span!("rollout", message = %format!("Rolling out {env}"));
            rollout.in_scope(|| sleep(600));
            drop(rollout);
            info!(accomplishment = %format!("{env} is live"));
        }

        let check = info_span!("health", error = tracing::field::Empty);
        check.in_scope(|| sleep(400));
        check.record("error", "timed out after 400ms");
    });
    drop(deploy);

    let _ = display.close();
}

fn sleep(ms: u64) {
    std::thread::sleep(Duration::from_millis(ms));
}
