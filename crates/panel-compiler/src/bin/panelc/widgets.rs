//! `panelc widgets`.

use panel_compiler::widgets::{aliases_of, registered};

use crate::style;

pub fn run_widgets() -> anyhow::Result<()> {
    for handler in registered() {
        let tag = handler.type_tag();
        let (width, height) = handler.default_size();
        let aliases = aliases_of(tag);
        let mut line = format!(
            "{}  {:<4}  {width}x{height}",
            style::accent(format!("{tag:<16}")),
            handler.supported_modes().letters()
        );
        if !aliases.is_empty() {
            line.push_str(&format!("  aliases: {}", aliases.join(", ")));
        }
        println!("{line}");
    }
    Ok(())
}
