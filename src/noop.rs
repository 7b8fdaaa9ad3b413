use crate::ProgressReporter;

/// A [`ProgressReporter`] that draws nothing.
///
/// Use it when output is not a terminal or progress display is disabled.
/// It never reports an active or paused state.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgressDisplay;

impl NoopProgressDisplay {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressReporter for NoopProgressDisplay {
    fn start(&self, _label: &str) -> Result<(), std::io::Error> {
        Ok(())
    }

    fn update(&self, _label: &str) -> Result<(), std::io::Error> {
        Ok(())
    }

    fn finish(&self, _label: &str) -> Result<(), std::io::Error> {
        Ok(())
    }

    fn fail(&self, _label: &str, _error: &dyn std::error::Error) -> Result<(), std::io::Error> {
        Ok(())
    }

    fn is_active(&self) -> bool {
        false
    }

    fn clear(&self) -> Result<(), std::io::Error> {
        Ok(())
    }

    fn pause(&self) -> Result<(), std::io::Error> {
        Ok(())
    }

    fn resume(&self) -> Result<(), std::io::Error> {
        Ok(())
    }

    fn is_paused(&self) -> bool {
        false
    }

    fn start_persistent(&self, _label: &str) -> Result<(), std::io::Error> {
        Ok(())
    }

    fn log_accomplishment(&self, _text: &str) -> Result<(), std::io::Error> {
        Ok(())
    }

    fn finish_persistent(&self, _label: &str) -> Result<(), std::io::Error> {
        Ok(())
    }

    fn fail_persistent(
        &self, _label: &str, _error: &dyn std::error::Error,
    ) -> Result<(), std::io::Error> {
        Ok(())
    }

    fn close(&self) -> Result<(), std::io::Error> {
        Ok(())
    }
}
