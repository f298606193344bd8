use std::io::Write;

/// Initialize the console logger.
///
/// Lines look like `[2024-05-01 12:00:00] INFO: message`. `RUST_LOG` overrides
/// the default `info` filter.
pub fn init() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .try_init();
}
