use log::{Level, LevelFilter};

/// Browser console logging.
///
/// The `log` facade (including everything in `shared`) goes to the console
/// through `console_log` once [`Logger::init`] has run; components tag
/// their own lines with the `*_with_component` helpers.
pub struct Logger;

impl Logger {
    pub fn init(level: LevelFilter) -> anyhow::Result<()> {
        match level.to_level() {
            Some(level) => console_log::init_with_level(level)
                .map_err(|e| anyhow::anyhow!("logger already installed: {}", e))?,
            None => log::set_max_level(LevelFilter::Off),
        }
        Ok(())
    }

    pub fn debug_with_component(component: &str, message: &str) {
        Self::emit(Level::Debug, component, message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::emit(Level::Info, component, message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::emit(Level::Warn, component, message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::emit(Level::Error, component, message);
    }

    fn emit(level: Level, component: &str, message: &str) {
        log::log!(level, "{}", format_line(component, message));
    }
}

fn format_line(component: &str, message: &str) -> String {
    format!("[{}] {}", component, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_format() {
        assert_eq!(
            format_line("availability-grid", "loaded 12 cells"),
            "[availability-grid] loaded 12 cells"
        );
    }
}
