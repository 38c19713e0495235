use std::fs;
use std::path::Path;

use crate::commands::{CmdMessage, CmdResult};
use crate::config::DocrefConfig;
use crate::error::Result;

pub fn run(store_dir: &Path) -> Result<CmdResult> {
    fs::create_dir_all(store_dir)?;
    if !store_dir.join("config.json").exists() {
        DocrefConfig::default().save(store_dir)?;
    }
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Initialized record store at {}",
        store_dir.display()
    )));
    Ok(result)
}
