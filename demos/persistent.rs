//! A persistent header spinner with accomplishments logged beneath it.

use std::time::Duration;

use nested_progress::*;

fn main() -> std::io::Result<()> {
    let display = reporter_for_stdout();

    display.start_persistent("Deploying application")?;
    for step in ["Built container", "Pushed to registry", "Updated manifests"] {
        std::thread::sleep(Duration::from_millis(500));
        display.log_accomplishment(step)?;
    }

    display.start("Waiting for rollout")?;
    std::thread::sleep(Duration::from_millis(800));
    display.finish("Waiting for rollout")?;

    display.finish_persistent("Deployment complete")?;
    display.close()
}
