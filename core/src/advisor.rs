//! Advisory text generation — resolution steps and acknowledgment notes.
//!
//! The `Advisor` trait is the seam for an external language-model
//! client. `Failover` is the only thing the ticket processor talks to:
//! it tries the primary advisor and, on ANY failure, substitutes the
//! deterministic offline template. Errors never cross this boundary and
//! the output is never empty.

use anyhow::Result;

/// Canonical assignment groups used by scenario generation, roster
/// generation, and the per-group offline templates.
pub const ASSIGNMENT_GROUPS: &[&str] = &[
    "Monitoring", "Windows", "Unix", "Storage", "Backup",
    "Network", "Firewall", "Tools", "Database", "Cloud",
];

/// External advisory service contract. Implementations may perform
/// network calls and may fail; callers go through [`Failover`].
pub trait Advisor {
    /// Free-text resolution procedure for one ticket.
    fn resolution_steps(
        &self,
        description: &str,
        group: &str,
        manufacturer: &str,
        ci_type: &str,
    ) -> Result<String>;

    /// One-sentence acknowledgment note for the ticket log.
    fn acknowledgment(&self, description: &str, group: &str) -> Result<String>;
}

/// Deterministic offline advisor. Always succeeds.
pub struct TemplateAdvisor;

impl TemplateAdvisor {
    pub fn steps_template(group: &str, manufacturer: &str, ci_type: &str) -> String {
        match group {
            "Network" => format!(
                "{manufacturer} Network Diagnostic Procedure\n\
                 1. Interface Check: SSH into the {manufacturer} device and run `show interface status` / `show ip int brief`.\n\
                 2. Error Counters: Check for CRC errors or input drops: `show int | include error`.\n\
                 3. Logs: Analyze buffer logs: `show logging | include {ci_type}`.\n\
                 4. Cabling: Request onsite check of fiber/copper cables for physical damage."
            ),
            "Firewall" => format!(
                "{manufacturer} Security Appliance Troubleshooting\n\
                 1. Session Table: Check current session count vs limit on the {manufacturer} dashboard.\n\
                 2. Rule Trace: Run packet tracer to verify traffic flow against policies.\n\
                 3. VPN Status: Check IKE/IPSec phase status: `show vpn ipsec-sa`.\n\
                 4. Failover: Verify High Availability (HA) status and sync."
            ),
            "Windows" => format!(
                "{manufacturer} Windows Server Resolution\n\
                 1. Event Viewer: Open `eventvwr.msc` and filter System/Application logs for 'Error' level.\n\
                 2. Services: Check `services.msc` for any Stopped or Starting services (e.g., Spooler).\n\
                 3. Resources: Check Task Manager for high CPU/Memory processes.\n\
                 4. Updates: Verify if recent Windows Updates were applied pending reboot."
            ),
            "Unix" => format!(
                "{manufacturer} Linux/Unix Resolution\n\
                 1. System Load: Run `top` or `htop` to check load averages and zombie processes.\n\
                 2. Disk Space: Run `df -h` to verify mount point usage (check /var and /tmp).\n\
                 3. Logs: Tail the system log: `tail -f /var/log/messages` or `journalctl -xe`.\n\
                 4. Service: Status check: `systemctl status {}`.",
                ci_type.to_lowercase()
            ),
            "Database" => format!(
                "{manufacturer} Database Optimization\n\
                 1. Connection: Verify connectivity using `tnsping` or connection string tests.\n\
                 2. Locks: Query active sessions to identify blocking locks or deadlocks.\n\
                 3. Logs: Check the {manufacturer} alert log for corruption or space errors.\n\
                 4. Resources: Ensure sufficient memory/SGA is allocated to the instance."
            ),
            "Storage" => format!(
                "{manufacturer} Storage Array Diagnostics\n\
                 1. Alerts: Login to the {manufacturer} Management Console and acknowledge active alerts.\n\
                 2. LUN Status: Verify the target LUN is Online and pathing is Active/Optimized.\n\
                 3. Hardware: Check physical disk indicators for amber lights (Predictive Failure).\n\
                 4. Logs: Generate a support bundle for {manufacturer} analysis."
            ),
            "Backup" => format!(
                "{manufacturer} Backup Failure Analysis\n\
                 1. Job Details: Review the specific error code (e.g., Status 96, Error 12) in the job log.\n\
                 2. Media: Confirm tape library/disk pool has available scratch media/capacity.\n\
                 3. Connectivity: Verify the client agent on the target server is reachable on port 10000+.\n\
                 4. Retry: Rerun the job manually after clearing the obstruction."
            ),
            // New or unknown groups still get a usable generic procedure.
            _ => format!(
                "{manufacturer} General Troubleshooting\n\
                 1. Log Analysis: Check {manufacturer} system logs for critical errors around the timestamp.\n\
                 2. Service Health: Verify the status of the {ci_type} service/daemon.\n\
                 3. Restart: Attempt a graceful restart if the service is hung.\n\
                 4. Support: Open a priority case at the {manufacturer} Support Portal."
            ),
        }
    }

    pub fn ack_template(group: &str) -> String {
        format!("Ticket assigned to {group}. Initial investigation started. (System Auto-Ack)")
    }
}

impl Advisor for TemplateAdvisor {
    fn resolution_steps(
        &self,
        _description: &str,
        group: &str,
        manufacturer: &str,
        ci_type: &str,
    ) -> Result<String> {
        Ok(Self::steps_template(group, manufacturer, ci_type))
    }

    fn acknowledgment(&self, _description: &str, group: &str) -> Result<String> {
        Ok(Self::ack_template(group))
    }
}

/// Infallible front door over any advisor. On primary failure (missing
/// credential, network error, malformed response) the offline template
/// is substituted and the failure is only logged.
pub struct Failover<'a> {
    primary: Option<&'a dyn Advisor>,
}

impl<'a> Failover<'a> {
    /// No external service configured: templates only.
    pub fn offline() -> Self {
        Self { primary: None }
    }

    pub fn over(primary: &'a dyn Advisor) -> Self {
        Self { primary: Some(primary) }
    }

    pub fn resolution_steps(
        &self,
        description: &str,
        group: &str,
        manufacturer: &str,
        ci_type: &str,
    ) -> String {
        match self.primary {
            Some(advisor) => advisor
                .resolution_steps(description, group, manufacturer, ci_type)
                .unwrap_or_else(|e| {
                    log::warn!("advisor failed ({e}); using offline template for '{group}'");
                    TemplateAdvisor::steps_template(group, manufacturer, ci_type)
                }),
            None => TemplateAdvisor::steps_template(group, manufacturer, ci_type),
        }
    }

    pub fn acknowledgment(&self, description: &str, group: &str) -> String {
        match self.primary {
            Some(advisor) => advisor.acknowledgment(description, group).unwrap_or_else(|e| {
                log::warn!("advisor ack failed ({e}); using offline template");
                TemplateAdvisor::ack_template(group)
            }),
            None => TemplateAdvisor::ack_template(group),
        }
    }
}
