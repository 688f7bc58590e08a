//! desk-runner: headless session runner for the Ops Commander desk.
//!
//! Usage:
//!   desk-runner --seed 12345 --count 5 --group Network --delay-secs 2 [--events-json]

use anyhow::{bail, Result};
use chrono::{Datelike, Local};
use opsdesk_core::{
    advisor::Failover,
    incident::TriggerSource,
    session::{DeskSession, PollOutcome},
};
use std::env;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let count = parse_arg(&args, "--count", 5usize);
    let delay_secs = parse_arg(&args, "--delay-secs", 2i64);
    let group = args
        .windows(2)
        .find(|w| w[0] == "--group")
        .map(|w| w[1].as_str())
        .unwrap_or("Random");
    let events_json = args.iter().any(|a| a == "--events-json");

    println!("Ops Commander — desk-runner");
    println!("  seed:       {seed}");
    println!("  incidents:  {count}");
    println!("  group:      {group}");
    println!("  delay:      {delay_secs}s");
    println!();

    let mut session = DeskSession::new(seed);
    let now = Local::now();
    if !session.login("admin", "admin", now) {
        bail!("demo login rejected");
    }

    session.generate_roster(now.month(), now.year(), now)?;

    let target = (group != "Random").then_some(group);
    opsdesk_core::incident::trigger_incidents(
        &mut session,
        count,
        TriggerSource::Event,
        target,
        now,
    );
    session.arm_auto_assign(now, delay_secs);

    let advisor = Failover::offline();
    loop {
        match session.poll(&advisor, Local::now()) {
            PollOutcome::Waiting { remaining_secs } => {
                println!("  auto-assignment in {remaining_secs}s...");
                thread::sleep(Duration::from_secs(1));
            }
            PollOutcome::Processed(feedback) => {
                println!("  {}", feedback.toast);
                if let Some(voice) = feedback.voice {
                    println!("    voice: {voice}");
                }
            }
            PollOutcome::Drained | PollOutcome::Idle => break,
        }
    }

    print_summary(&session);
    if events_json {
        println!();
        println!("{}", serde_json::to_string_pretty(&session.events)?);
    }
    Ok(())
}

fn print_summary(session: &DeskSession) {
    println!();
    println!("=== SESSION SUMMARY ===");
    println!("  session:    {}", session.session_id);
    println!("  incidents:  {}", session.incidents.len());
    println!("  backlog:    {}", session.assigned_backlog());
    println!("  events:     {}", session.events.len());
    println!();
    println!(
        "  {:<10} {:<22} {:<10} {:<12} {:<10}",
        "Ticket", "Status", "Group", "Assignee", "Priority"
    );
    for t in &session.incidents {
        println!(
            "  {:<10} {:<22} {:<10} {:<12} {:<10}",
            t.ticket_id,
            t.status.to_string(),
            t.assignment_group,
            t.assigned_to,
            t.priority.to_string()
        );
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
