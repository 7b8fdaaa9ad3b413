//! Pausing the display around an interactive prompt.

use std::io::{BufRead, Write};
use std::time::Duration;

use nested_progress::*;

fn main() -> std::io::Result<()> {
    let display = ProgressDisplay::stdout();

    display.start("Scanning configuration")?;
    std::thread::sleep(Duration::from_millis(800));

    display.pause()?;
    print!("Overwrite existing config? [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    display.resume()?;

    std::thread::sleep(Duration::from_millis(500));
    match answer.trim().eq_ignore_ascii_case("y") {
        true => display.finish("Scanning configuration")?,
        false => display.fail(
            "Scanning configuration",
            &std::io::Error::other("cancelled by user"),
        )?,
    }
    display.close()
}
