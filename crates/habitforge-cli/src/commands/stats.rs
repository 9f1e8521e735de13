use std::path::PathBuf;

use super::{open_tracker, CmdResult};

pub fn run(json: bool, data: Option<PathBuf>) -> CmdResult {
    let tracker = open_tracker(data)?;
    let stats = tracker.view_statistics();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{stats}");
    }
    Ok(())
}

pub fn level(data: Option<PathBuf>) -> CmdResult {
    let tracker = open_tracker(data)?;
    println!("{}", level_line(tracker.level_and_exp()));
    Ok(())
}

pub fn level_line((level, xp, needed): (u32, u32, u32)) -> String {
    format!("Level: {level} | XP: {xp}/{needed}")
}
