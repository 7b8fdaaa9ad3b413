//! Nested operations finishing in and out of order from several threads.

use std::sync::Arc;
use std::thread;

use nested_progress::*;

fn main() -> std::io::Result<()> {
    let display = Arc::new(ProgressDisplay::builder().colors(true).build(std::io::stdout()));

    display.start("Setting up environment")?;

    display.start("Downloading dependencies")?;
    sleep(600);
    display.update("Downloading dependencies (14/14)")?;
    sleep(300);
    display.finish("Downloading dependencies")?;

    // Two workers report concurrently; each completes its own label.
    let workers: Vec<_> = ["compile", "docker build"]
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let display = display.clone();
            thread::spawn(move || -> std::io::Result<()> {
                display.start(name)?;
                sleep(400 * (i as u64 + 1));
                display.finish(name)
            })
        })
        .collect();
    for worker in workers {
        worker.join().expect("worker panicked")?;
    }

    display.start("Running tests")?;
    sleep(700);
    display.fail("Running tests", &std::io::Error::other("2 tests failed"))?;

    display.finish("Setting up environment")?;
    display.close()
}

fn sleep(ms: u64) {
    thread::sleep(std::time::Duration::from_millis(ms));
}
