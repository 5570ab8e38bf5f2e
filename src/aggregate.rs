//! Status rollup over a list of checks.

use crate::models::{Check, CheckStatus, Summary};

/// Overall status by strict precedence: fail, then warning, then pass.
pub fn overall_status<'a>(statuses: impl IntoIterator<Item = &'a CheckStatus>) -> CheckStatus {
    let mut overall = CheckStatus::Pass;
    for status in statuses {
        match status {
            CheckStatus::Fail => return CheckStatus::Fail,
            CheckStatus::Warning => overall = CheckStatus::Warning,
            CheckStatus::Pass => {}
        }
    }
    overall
}

impl Summary {
    /// Count statuses and derive the overall status.
    pub fn from_checks(checks: &[Check]) -> Self {
        let mut summary = Summary {
            total_checks: checks.len(),
            pass_count: 0,
            warning_count: 0,
            fail_count: 0,
            overall_status: CheckStatus::Pass,
        };

        for check in checks {
            match check.status {
                CheckStatus::Pass => summary.pass_count += 1,
                CheckStatus::Warning => summary.warning_count += 1,
                CheckStatus::Fail => summary.fail_count += 1,
            }
        }

        summary.overall_status = overall_status(checks.iter().map(|c| &c.status));
        summary
    }

    /// True when no check failed or warned
    pub fn is_conformant(&self) -> bool {
        self.overall_status == CheckStatus::Pass
    }
}
