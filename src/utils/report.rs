// src/utils/report.rs

//! Console report formatting on top of the `log` facade.

/// Log a boxed section header.
pub fn header(title: &str) {
    let border = "═".repeat(60);
    log::info!("{border}");
    log::info!("  {title}");
    log::info!("{border}");
}

/// Log a step in a multi-step process.
pub fn step(step_num: usize, total: usize, message: &str) {
    log::info!("[STEP {step_num}/{total}] {message}");
}

/// Log an indented sub-item.
pub fn sub_item(message: &str) {
    log::info!("    {message}");
}

/// Log a summary section of key/value pairs.
pub fn summary(title: &str, items: &[(&str, String)]) {
    log::info!("[SUMMARY] {title}");
    for (key, value) in items {
        log::info!("    {key}: {value}");
    }
}
