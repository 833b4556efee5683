//! `parrot followups` — suggested next prompts.

use parrot_config::AppConfig;
use parrot_participant::generate_followups;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    if !print(&config) {
        println!("Follow-ups are disabled.");
    }
    Ok(())
}

/// Print suggestions if enabled. Returns whether anything was printed.
pub fn print(config: &AppConfig) -> bool {
    let Some(followups) = generate_followups(&config.followups, &mut rand::rng()) else {
        return false;
    };

    println!();
    println!("Try next:");
    for followup in &followups {
        if followup.command.is_empty() {
            println!("  {}  →  parrot chat \"{}\"", followup.label, followup.prompt);
        } else {
            println!(
                "  {}  →  parrot chat \"{}\" --command {}",
                followup.label, followup.prompt, followup.command
            );
        }
    }
    true
}
