mod console;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use console::ConsolePresenter;
use patrol_game::{
    CampaignConfig, CampaignOutcome, CampaignSummary, Character, ExtractionOutcome, Presenter,
    Role, SeededDice, SessionError, campaign_summary, parse_mission_count, run_campaign,
};
use std::io::BufRead;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const NARRATION_DELAY_MS: u64 = 10;
const DEFAULT_NAME: &str = "Recruit";

#[derive(Debug, Parser)]
#[command(name = "patrol", version)]
#[command(about = "Patrol - a turn-based war campaign adventure")]
struct Args {
    /// Seed for the run's random source (derived from the clock when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the name prompt
    #[arg(long)]
    name: Option<String>,

    /// Skip the role menu (soldier, sniper, medic, engineer, intel_officer)
    #[arg(long)]
    role: Option<String>,

    /// Skip the mission-count prompt (clamped to 1-10)
    #[arg(long)]
    missions: Option<u32>,

    /// Print narration instantly instead of the paced crawl
    #[arg(long)]
    fast: bool,

    /// Post-run summary format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json"])]
    report: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(entropy_seed);
    log::info!("starting run with seed {seed}");

    let delay = if args.fast || args.report == "json" {
        Duration::ZERO
    } else {
        Duration::from_millis(NARRATION_DELAY_MS)
    };
    let mut dice = SeededDice::new(seed);
    let mut presenter = ConsolePresenter::stdin(delay);

    match play(&args, &mut dice, &mut presenter) {
        Ok(summary) => emit_report(&args.report, &summary),
        Err(SessionError::Interrupted) => {
            println!();
            println!("{}", "Session interrupted. Goodbye, soldier.".bright_red());
            Ok(())
        }
    }
}

/// Clock-derived fallback seed for casual runs.
fn entropy_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0x5EED, |d| d.as_nanos() as u64)
}

fn play<R: BufRead>(
    args: &Args,
    dice: &mut SeededDice,
    presenter: &mut ConsolePresenter<R>,
) -> Result<CampaignSummary, SessionError> {
    intro(presenter);

    let name = resolve_name(args.name.as_deref(), presenter)?;
    let role = resolve_role(args.role.as_deref(), presenter)?;
    let mut character = Character::new(name, role);
    briefing(&character, presenter);

    let missions = resolve_missions(args.missions, presenter)?;
    let cfg = CampaignConfig::new(missions);
    presenter.narrate(&format!(
        "Deploying on {} missions. Good luck, {}.",
        cfg.missions, character.name
    ));

    let outcome = run_campaign(&mut character, &cfg, dice, presenter)?;
    announce_outcome(outcome);
    Ok(campaign_summary(&character))
}

fn intro<P: Presenter>(out: &mut P) {
    println!("{}", "PATROL".bright_cyan().bold());
    println!("{}", "=".repeat(40).cyan());
    out.narrate("You will make choices, fight, loot, and try to make it home.");
    out.narrate("Rules snapshot:");
    out.narrate(" - You start with 3 HP. Each hit costs 1. At 0 you are gone.");
    out.narrate(" - Every firefight opens with a 10% chance of an instant fatal shot.");
    out.narrate(" - Surviving the missions does not mean surviving the ride home.");
    println!("{}", "=".repeat(40).cyan());
}

fn resolve_name<R: BufRead>(
    preset: Option<&str>,
    presenter: &mut ConsolePresenter<R>,
) -> Result<String, SessionError> {
    if let Some(name) = preset {
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }
    let entry = presenter.prompt_line("Enter your name, soldier:")?;
    Ok(if entry.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        entry
    })
}

fn resolve_role<R: BufRead>(
    preset: Option<&str>,
    presenter: &mut ConsolePresenter<R>,
) -> Result<Role, SessionError> {
    if let Some(key) = preset {
        if let Some(role) = Role::from_key(key) {
            return Ok(role);
        }
        log::warn!("unknown role key {key:?}, falling back to the menu");
    }
    let labels: Vec<String> = Role::ALL
        .iter()
        .map(|role| format!("{} - {}", role.title(), role.desc()))
        .collect();
    let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
    let picked = presenter.choose("Choose your role:", &refs)?;
    Ok(Role::ALL[picked])
}

fn resolve_missions<R: BufRead>(
    preset: Option<u32>,
    presenter: &mut ConsolePresenter<R>,
) -> Result<u32, SessionError> {
    if let Some(missions) = preset {
        return Ok(missions);
    }
    loop {
        let entry =
            presenter.prompt_line("How many missions will you attempt? (1-10, blank for 3)")?;
        if let Some(count) = parse_mission_count(&entry) {
            return Ok(count);
        }
        presenter.narrate("Enter a number between 1 and 10.");
    }
}

fn briefing<P: Presenter>(character: &Character, out: &mut P) {
    out.narrate(&format!(
        "You are {}, a {}. {}",
        character.name,
        character.role.title(),
        character.role.desc()
    ));
    out.narrate(&format!(
        "Starting loadout: {}",
        character.inventory.display_list()
    ));
    out.narrate(&format!("Special: {}", character.role.ability_desc()));
}

fn announce_outcome(outcome: CampaignOutcome) {
    match outcome {
        CampaignOutcome::Fell { .. } => {
            println!(
                "{}",
                "GAME OVER. You did not survive the campaign.".bright_red().bold()
            );
        }
        CampaignOutcome::Extracted {
            extraction: ExtractionOutcome::SafeReturn,
        } => {
            println!(
                "{}",
                "CONGRATULATIONS. You made it home alive!".bright_green().bold()
            );
        }
        CampaignOutcome::Extracted { .. } => {
            println!(
                "{}",
                "You did not survive the extraction. Your service is remembered."
                    .bright_red()
                    .bold()
            );
        }
    }
}

fn emit_report(format: &str, summary: &CampaignSummary) -> Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }
    println!("{}", "=== CAMPAIGN SUMMARY ===".bright_cyan().bold());
    println!("Name: {}", summary.name);
    println!("Role: {}", summary.role.title());
    println!("Missions completed: {}", summary.missions_completed);
    println!("Final HP: {}", summary.final_hp);
    println!("Inventory: {}", summary.inventory.join(", "));
    let status = if summary.survived {
        "SURVIVED".bright_green().bold()
    } else {
        "DECEASED".bright_red().bold()
    };
    println!("Status: {status}");
    Ok(())
}
