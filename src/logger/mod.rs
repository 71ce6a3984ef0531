use fern::colors::{Color, ColoredLevelConfig};

const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

const COLOR_DEBUG: Color = Color::Magenta;
const COLOR_INFO: Color = Color::BrightGreen;
const COLOR_WARN: Color = Color::BrightYellow;
const COLOR_ERROR: Color = Color::Red;
const COLOR_TRACE: Color = Color::Blue;

/// Initializes the process-wide colored console logger. Non-fatal engine
/// conditions are emitted at `warn!`; fatal ones are logged at `error!`
/// by the CLI driver immediately before translating them to an exit code.
pub fn init(level: Option<log::LevelFilter>) -> Result<(), fern::InitError> {
    let colors = ColoredLevelConfig::new()
        .debug(COLOR_DEBUG)
        .info(COLOR_INFO)
        .warn(COLOR_WARN)
        .error(COLOR_ERROR)
        .trace(COLOR_TRACE);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(level.unwrap_or(DEFAULT_LOG_LEVEL))
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}
