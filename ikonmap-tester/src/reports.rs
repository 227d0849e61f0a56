use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use ikonmap_core::{CatalogIssue, PassType, ResortStatus, SharedBankStatus, TripSummary};
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use crate::scenarios::ScenarioResult;

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub source: String,
    pub resort_count: usize,
    pub bank_count: usize,
    pub issues: Vec<CatalogIssue>,
}

impl AuditReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub pass: PassType,
    /// Requested ids that are not in the catalog and were left out of the summary.
    pub unknown_resorts: Vec<String>,
    pub summary: TripSummary,
}

fn generated_at() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

#[allow(clippy::cast_precision_loss)]
fn success_rate(passed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    passed as f64 / total as f64 * 100.0
}

pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub fn audit_console<W: Write>(out: &mut W, report: &AuditReport) -> Result<()> {
    writeln!(out, "{}", "🔎 Catalog Audit".bright_cyan().bold())?;
    writeln!(out, "{}", "================".cyan())?;
    writeln!(out, "Source: {}", report.source)?;
    writeln!(out, "Resorts: {}", report.resort_count)?;
    writeln!(out, "Day banks: {}", report.bank_count)?;
    if report.passed() {
        writeln!(out, "{}", "✅ No issues found".green())?;
        return Ok(());
    }
    writeln!(
        out,
        "{}",
        format!("❌ {} issue(s) found", report.issues.len()).red()
    )?;
    for issue in &report.issues {
        writeln!(out, "  • {}", issue.to_string().red())?;
    }
    Ok(())
}

pub fn audit_markdown<W: Write>(out: &mut W, report: &AuditReport) -> Result<()> {
    writeln!(out, "# Ikon Map Catalog Audit\n")?;
    writeln!(out, "_Generated {}_\n", generated_at())?;
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Source**: {}", report.source)?;
    writeln!(out, "- **Resorts**: {}", report.resort_count)?;
    writeln!(out, "- **Day banks**: {}", report.bank_count)?;
    let status = if report.passed() { "✅" } else { "❌" };
    writeln!(out, "- **Issues**: {} {status}\n", report.issues.len())?;
    if !report.passed() {
        writeln!(out, "## Issues\n")?;
        for issue in &report.issues {
            writeln!(out, "- {issue}")?;
        }
    }
    Ok(())
}

fn limit_label(status: &ResortStatus) -> String {
    if status.not_on_pass {
        "N/A".to_string()
    } else {
        status.allowance.to_string()
    }
}

fn resort_flag(status: &ResortStatus) -> &'static str {
    if status.not_on_pass {
        "Not on pass"
    } else if status.exceeded {
        "Over limit"
    } else {
        "OK"
    }
}

fn bank_flag(bank: &SharedBankStatus) -> &'static str {
    if bank.exceeded {
        "Shared bank exceeded"
    } else {
        "OK"
    }
}

pub fn plan_console<W: Write>(out: &mut W, report: &PlanReport) -> Result<()> {
    let summary = &report.summary;
    writeln!(
        out,
        "{}",
        format!("🎿 Trip Summary ({})", report.pass.label())
            .bright_cyan()
            .bold()
    )?;
    writeln!(out, "{}", "==============================".cyan())?;
    for id in &report.unknown_resorts {
        writeln!(out, "⚠️  Unknown resort: {}", id.yellow())?;
    }
    if summary.is_empty() {
        writeln!(out, "No resorts in trip.")?;
    }
    for status in &summary.individual_resorts {
        let flag = match resort_flag(status) {
            "OK" => "OK".green(),
            other => other.red(),
        };
        writeln!(
            out,
            "  {:30} {:>3} / {:>3} days  {flag}",
            status.resort.name,
            status.days,
            limit_label(status)
        )?;
    }
    for bank in &summary.shared_banks {
        let flag = match bank_flag(bank) {
            "OK" => "OK".green(),
            other => other.red(),
        };
        writeln!(
            out,
            "  {:30} {:>3} / {:>3} shared days  {flag}",
            bank.group.bold(),
            bank.used_days,
            bank.allowance
        )?;
        if bank.not_on_pass {
            writeln!(out, "    {}", "Not on pass".yellow())?;
        }
        for member in &bank.resorts {
            writeln!(out, "    - {} ({}d)", member.resort.name, member.days)?;
        }
    }
    writeln!(out)?;
    writeln!(out, "Total days: {}", summary.total_days)?;
    if summary.has_any_exceeded {
        writeln!(out, "{}", "❌ Trip exceeds the selected pass".red().bold())?;
    } else {
        writeln!(out, "{}", "✅ Trip fits the selected pass".green())?;
    }
    Ok(())
}

pub fn plan_markdown<W: Write>(out: &mut W, report: &PlanReport) -> Result<()> {
    let summary = &report.summary;
    writeln!(out, "# Ikon Map Trip Summary\n")?;
    writeln!(out, "_Generated {}_\n", generated_at())?;
    writeln!(out, "- **Pass**: {}", report.pass.label())?;
    writeln!(out, "- **Total days**: {}", summary.total_days)?;
    let status = if summary.has_any_exceeded { "❌" } else { "✅" };
    writeln!(out, "- **Within allowance**: {status}\n")?;
    if !report.unknown_resorts.is_empty() {
        writeln!(
            out,
            "- **Unknown resorts**: {}\n",
            report.unknown_resorts.join(", ")
        )?;
    }

    if !summary.individual_resorts.is_empty() {
        writeln!(out, "## Resorts\n")?;
        writeln!(out, "| Resort | Days | Allowance | Status |")?;
        writeln!(out, "|---|---|---|---|")?;
        for status in &summary.individual_resorts {
            writeln!(
                out,
                "| {} | {} | {} | {} |",
                status.resort.name,
                status.days,
                limit_label(status),
                resort_flag(status)
            )?;
        }
        writeln!(out)?;
    }

    if !summary.shared_banks.is_empty() {
        writeln!(out, "## Shared Day Banks\n")?;
        for bank in &summary.shared_banks {
            writeln!(
                out,
                "### {} ({} / {} days) {}\n",
                bank.group,
                bank.used_days,
                bank.allowance,
                bank_flag(bank)
            )?;
            for member in &bank.resorts {
                writeln!(out, "- {}: {}d", member.resort.name, member.days)?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

pub fn scenarios_console<W: Write>(
    out: &mut W,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Scenario Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "===========================".cyan())?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();

    writeln!(out, "Total scenarios: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", (total - passed).to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", success_rate(passed, total))?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(out, "{} {}", status, result.scenario_name.bold())?;
        writeln!(
            out,
            "   Checks: {} run, {} failed",
            result.checks_run,
            result.failures.len()
        )?;
        writeln!(out, "   Time: {:?}", result.duration)?;
        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn scenarios_markdown<W: Write>(out: &mut W, results: &[ScenarioResult]) -> Result<()> {
    writeln!(out, "# Ikon Map Scenario Results\n")?;
    writeln!(out, "_Generated {}_\n", generated_at())?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total scenarios**: {total}")?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {}", total - passed)?;
    writeln!(
        out,
        "- **Success rate**: {:.1}%\n",
        success_rate(passed, total)
    )?;

    writeln!(out, "## Detailed Results\n")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(out, "### {} {}\n", status, result.scenario_name)?;
        writeln!(out, "- **Checks**: {}", result.checks_run)?;
        writeln!(out, "- **Time**: {:?}", result.duration)?;
        if !result.failures.is_empty() {
            writeln!(out, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}
