//! Incident table — ticket data model, mock scenario generation, and
//! the one-ticket-per-call processing step.
//!
//! Processing is deliberately throttled to a single ticket per
//! invocation so the caller can interleave per-ticket feedback
//! (toasts, voice lines) between steps; repeated invocation drains the
//! Assigned queue in FIFO order.

use crate::{
    advisor::{Failover, ASSIGNMENT_GROUPS},
    event::DeskEvent,
    export,
    resolver::ShiftResolver,
    session::DeskSession,
    shift::Shift,
    types::TicketId,
};
use chrono::{DateTime, Local, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Critical,
        Priority::High,
        Priority::Medium,
        Priority::Low,
    ];
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Critical => "Critical",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        };
        f.write_str(s)
    }
}

/// Ticket lifecycle. Assigned is the only state processing consumes;
/// one pass moves a ticket to exactly one of InProgress or
/// AssignedNoRoster. Resolved is declared but no transition produces
/// it yet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Assigned,
    InProgress,
    AssignedNoRoster,
    Resolved,
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TicketStatus::Assigned => "Assigned",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::AssignedNoRoster => "Assigned (No Roster)",
            TicketStatus::Resolved => "Resolved",
        };
        f.write_str(s)
    }
}

/// Where a simulated ticket claims to come from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TriggerSource {
    Event,
    User,
}

impl fmt::Display for TriggerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TriggerSource::Event => "Event",
            TriggerSource::User => "User",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    pub ticket_id: TicketId,
    pub description: String,
    pub ci_type: String,
    pub ci_name: String,
    pub manufacturer: String,
    pub priority: Priority,
    pub status: TicketStatus,
    pub assignment_group: String,
    pub assigned_to: String,
    /// Append-only timestamped log.
    pub notes: String,
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_bytes: Option<Vec<u8>>,
    pub created_at: DateTime<Local>,
}

/// Per-ticket outcome of one processing step, for the caller's
/// notification simulation. No delivery actually happens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessFeedback {
    pub ticket_id: TicketId,
    pub assignee: String,
    pub assigned: bool,
    pub toast: String,
    pub voice: Option<String>,
    pub email_sent: bool,
    pub teams_sent: bool,
}

// ── Scenario catalog ─────────────────────────────────────────────────────────

const DEFAULT_SCENARIOS: &[(&str, &str)] = &[
    ("General System Error", "Server"),
    ("Performance Degradation", "Application"),
];

fn scenarios_for(group: &str) -> &'static [(&'static str, &'static str)] {
    match group {
        "Windows" => &[
            ("Blue Screen of Death (BSOD) reported", "Server"),
            ("Active Directory Login Failure", "Service"),
            ("Print Spooler Service Stuck", "Service"),
            ("C: Drive Disk Space Low", "Server"),
        ],
        "Unix" => &[
            ("Kernel Panic on Production Node", "Server"),
            ("SSH Daemon failed to start", "Service"),
            ("Inode usage 100% on /var", "Server"),
            ("Zombie processes count high", "Server"),
        ],
        "Storage" => &[
            ("SAN Multipath Flapping", "Hardware"),
            ("NAS Volume Read-Only", "Hardware"),
            ("LUN Latency High > 20ms", "Hardware"),
            ("RAID Battery Failure Warning", "Hardware"),
        ],
        "Backup" => &[
            ("NetBackup Job Failed: Error 96", "Service"),
            ("Tape Library Robot Arm Stuck", "Hardware"),
            ("Snapshot Deletion Failed", "Service"),
            ("Retention Policy not Applied", "Service"),
        ],
        "Network" => &[
            ("Switch Port Flapping", "Network Device"),
            ("Packet Loss on Uplink", "Network Device"),
            ("VPN Tunnel Down", "Service"),
            ("BGP Neighborship Down", "Network Device"),
        ],
        "Firewall" => &[
            ("Palo Alto HA Sync Down", "Network Device"),
            ("Rule 45 blocking valid traffic", "Configuration"),
            ("VPN User Unable to Connect", "Service"),
            ("Firewall Throughput Spiking", "Network Device"),
        ],
        "Tools" => &[
            ("JIRA Slow Response Time", "Application"),
            ("GitLab Runner Offline", "Application"),
            ("Jenkins Build Queue Stuck", "Application"),
            ("ServiceNow API Timeout", "Application"),
        ],
        "Database" => &[
            ("Oracle Tablespace Full", "Database"),
            ("SQL Server Deadlock Detected", "Database"),
            ("MySQL Replication Lag High", "Database"),
            ("Postgres Connection Pool Exhausted", "Database"),
        ],
        "Cloud" => &[
            ("AWS EC2 Instance Status Check Failed", "Cloud Resource"),
            ("Azure VM Allocation Failed", "Cloud Resource"),
            ("S3 Bucket Access Denied", "Cloud Resource"),
            ("Kubernetes Pod Loop Crash", "Cloud Resource"),
        ],
        _ => DEFAULT_SCENARIOS,
    }
}

/// Manufacturer pool for a (group, CI type) pair. Unknown CI types fall
/// back to the group's Server pool, then Hardware pool, then generic.
fn manufacturer_pool(group: &str, ci_type: &str) -> &'static [&'static str] {
    const GENERIC: &[&str] = &["Generic", "Unknown"];
    match group {
        "Windows" => match ci_type {
            "Virtualization" => &["VMware", "Microsoft", "Citrix", "Red Hat", "Nutanix"],
            "Service" => &["Microsoft"],
            _ => &["Dell", "HPE", "Lenovo", "Fujitsu", "Cisco"],
        },
        "Unix" => match ci_type {
            "UNIX Platforms" => &["Oracle", "IBM", "HPE", "Hitachi", "Bull"],
            _ => &["IBM", "Oracle", "HPE", "Dell", "Fujitsu"],
        },
        "Storage" => match ci_type {
            "Object Storage" => &["Pure Storage", "Scality", "MinIO", "Cloudian", "Huawei"],
            _ => &["NetApp", "Dell EMC", "HPE", "IBM", "Hitachi Vantara"],
        },
        "Backup" => match ci_type {
            "Service" => &["Veritas", "Veeam", "Commvault", "Rubrik", "Cohesity"],
            _ => &["Dell EMC", "HPE", "IBM", "Quantum", "ExaGrid"],
        },
        "Network" => match ci_type {
            "Routing" => &["Cisco", "Juniper", "Nokia", "Huawei", "MikroTik"],
            "Network Device" => &["Cisco", "Juniper", "Arista", "HPE Aruba", "Extreme Networks"],
            _ => GENERIC,
        },
        "Firewall" => match ci_type {
            "Configuration" => &["Palo Alto Networks", "Fortinet"],
            "Service" => &["Zscaler", "Akamai", "Cloudflare", "Forcepoint", "McAfee"],
            "Network Device" => &["Palo Alto Networks", "Fortinet", "Check Point", "Cisco", "Sophos"],
            _ => GENERIC,
        },
        "Database" => match ci_type {
            "Database" => &["Oracle", "Microsoft", "IBM", "SAP", "MongoDB"],
            _ => &["Oracle", "Dell", "HPE", "IBM", "Fujitsu"],
        },
        "Tools" => match ci_type {
            "Automation" => &["ServiceNow", "BMC", "Ansible", "Terraform", "Puppet"],
            "Application" => &["SolarWinds", "Dynatrace", "Datadog", "Nagios", "Zabbix"],
            _ => GENERIC,
        },
        "Cloud" => match ci_type {
            "Cloud Resource" => &["AWS", "Microsoft Azure", "Google Cloud", "Oracle Cloud", "IBM Cloud"],
            _ => &["Dell", "HPE", "Cisco", "Supermicro", "Lenovo"],
        },
        _ => GENERIC,
    }
}

// ── Operations ───────────────────────────────────────────────────────────────

/// Append `count` mock incidents to the session's table, all in status
/// Assigned. `target_group` of None means a random group per ticket.
pub fn trigger_incidents(
    session: &mut DeskSession,
    count: usize,
    source: TriggerSource,
    target_group: Option<&str>,
    now: DateTime<Local>,
) -> usize {
    for _ in 0..count {
        let group = match target_group {
            Some(g) => g.to_string(),
            None => session.incident_rng.pick(ASSIGNMENT_GROUPS).to_string(),
        };

        let &(scenario, ci_type) = session.incident_rng.pick(scenarios_for(&group));
        let priority = *session.incident_rng.pick(&Priority::ALL);
        let description = match source {
            TriggerSource::Event => format!("[Alert] {scenario}"),
            TriggerSource::User => format!("User Reported: {scenario}"),
        };

        let manufacturer = session
            .incident_rng
            .pick(manufacturer_pool(&group, ci_type))
            .to_string();
        let serial = session.incident_rng.next_u64_below(1000);
        let ci_prefix: String = ci_type.chars().take(3).collect();
        let mfg_prefix: String = manufacturer.chars().take(3).collect();
        let ci_name = format!("{ci_prefix}-{mfg_prefix}-{serial:03}").to_uppercase();

        let ticket_id = format!("INC{}", 10_000 + session.incident_rng.next_u64_below(90_000));

        session.incidents.push(Incident {
            ticket_id,
            description,
            ci_type: ci_type.to_string(),
            ci_name,
            manufacturer,
            priority,
            status: TicketStatus::Assigned,
            assignment_group: group,
            assigned_to: UNASSIGNED.to_string(),
            notes: String::new(),
            recommendation: "Pending Analysis...".to_string(),
            pdf_bytes: None,
            created_at: now,
        });
    }

    log::info!(
        "triggered {count} incidents (source {source}, target {})",
        target_group.unwrap_or("Random")
    );
    session.record(
        DeskEvent::IncidentsTriggered {
            count,
            source: source.to_string(),
            target_group: target_group.unwrap_or("Random").to_string(),
        },
        now,
    );
    count
}

/// Process exactly ONE Assigned ticket (FIFO) and return its feedback.
/// Returns None when there is nothing to do — the caller stops the
/// drain loop on that signal.
pub fn process_next(
    session: &mut DeskSession,
    advisor: &Failover<'_>,
    now: DateTime<Local>,
) -> Option<ProcessFeedback> {
    let index = session
        .incidents
        .iter()
        .position(|t| t.status == TicketStatus::Assigned)?;

    let shift = Shift::at_hour(now.hour());
    let today = now.date_naive();
    let group = session.incidents[index].assignment_group.clone();

    let candidates = match &session.roster {
        Some(roster) => ShiftResolver::candidates(roster, &group, today, shift),
        None => Vec::new(),
    };

    let ticket_id = session.incidents[index].ticket_id.clone();
    let timestamp = now.format("%H:%M");

    let feedback = if let Some(assignee) = session.resolver.next_assignee(&group, &candidates) {
        let (description, manufacturer, ci_type) = {
            let t = &session.incidents[index];
            (t.description.clone(), t.manufacturer.clone(), t.ci_type.clone())
        };
        let recommendation =
            advisor.resolution_steps(&description, &group, &manufacturer, &ci_type);
        let ack = advisor.acknowledgment(&description, &group);

        let note = format!(
            "[{timestamp}] Agent: {ack}\n\
             [{timestamp}] SYSTEM: Ticket assigned to {assignee} [Email & Teams Sent]."
        );
        let pdf = export::resolution_document(&ticket_id, &description, &recommendation, &manufacturer);

        let ticket = &mut session.incidents[index];
        ticket.status = TicketStatus::InProgress;
        ticket.assigned_to = assignee.clone();
        ticket.recommendation = recommendation;
        ticket.pdf_bytes = Some(pdf);
        append_note(&mut ticket.notes, &note);

        log::info!("{ticket_id} assigned to {assignee} ({group}, {shift} shift)");
        session.record(
            DeskEvent::TicketAssigned {
                ticket_id: ticket_id.clone(),
                group: group.clone(),
                assignee: assignee.clone(),
                shift: shift.to_string(),
            },
            now,
        );

        let toast = format!("{ticket_id} assigned to {assignee}");
        ProcessFeedback {
            ticket_id,
            assignee: assignee.clone(),
            assigned: true,
            toast,
            voice: Some(format!(
                "Hi {assignee}, a new incident has been assigned to your name. \
                 Kindly check and take action. Thank you!"
            )),
            email_sent: true,
            teams_sent: true,
        }
    } else {
        let note = format!(
            "[{timestamp}] Agent: System could not auto-assign. Verified no '{shift}' shift members.\n\
             [{timestamp}] SYSTEM: Assignment failed (No '{shift}' shift staff)."
        );

        let ticket = &mut session.incidents[index];
        ticket.status = TicketStatus::AssignedNoRoster;
        ticket.assigned_to = UNASSIGNED.to_string();
        ticket.recommendation = format!(
            "ACTION REQUIRED: No personnel found for group '{group}' during '{shift}' shift.\n\n\
             Please update the Shift Roster for today's date."
        );
        append_note(&mut ticket.notes, &note);

        log::warn!("{ticket_id}: no personnel found for '{group}' on '{shift}' shift");
        session.record(
            DeskEvent::TicketAssignmentFailed {
                ticket_id: ticket_id.clone(),
                group: group.clone(),
                shift: shift.to_string(),
            },
            now,
        );

        ProcessFeedback {
            ticket_id: ticket_id.clone(),
            assignee: UNASSIGNED.to_string(),
            assigned: false,
            toast: format!("{ticket_id} assignment failed"),
            voice: None,
            email_sent: false,
            teams_sent: false,
        }
    };

    Some(feedback)
}

fn append_note(notes: &mut String, entry: &str) {
    if !notes.is_empty() {
        notes.push('\n');
    }
    notes.push_str(entry);
}
