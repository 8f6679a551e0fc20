//! Arm and battery choices for the filter selects.
//!
//! Built from `GET /api/active-arms`, which reports how many batteries each
//! arm currently has.

use serde::Deserialize;

use batlog_domain::error::QueryFailure;
use batlog_domain::locale::Locale;
use batlog_domain::messages::{Message, arm_label};

use crate::ports::LogTransport;

pub const ACTIVE_ARMS_ENDPOINT: &str = "/api/active-arms";

/// Arms a dashboard can have.
pub const ARMS: std::ops::RangeInclusive<u8> = 1..=4;

/// One arm and its battery count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ActiveArm {
    pub arm: u8,
    pub slave_count: u8,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActiveArmsResponse {
    success: bool,
    #[serde(default)]
    active_arms: Vec<ActiveArm>,
    message: Option<String>,
}

/// How arms without batteries are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmPolicy {
    /// List every arm, disabling empty ones.
    DisableEmpty,
    /// List only arms that have batteries.
    HideEmpty,
}

/// A select option. An empty `value` means "all".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

impl SelectOption {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }
}

fn slave_count(active: &[ActiveArm], arm: u8) -> u8 {
    active
        .iter()
        .find(|entry| entry.arm == arm)
        .map_or(0, |entry| entry.slave_count)
}

/// Arm options, headed by "all arms".
#[must_use]
pub fn arm_options(active: &[ActiveArm], locale: Locale, policy: ArmPolicy) -> Vec<SelectOption> {
    let mut options = vec![SelectOption::new("", Message::AllArms.text(locale))];
    for arm in ARMS {
        let populated = slave_count(active, arm) > 0;
        match policy {
            ArmPolicy::HideEmpty if !populated => {}
            _ => options.push(SelectOption {
                disabled: !populated,
                ..SelectOption::new(arm.to_string(), arm_label(arm, locale))
            }),
        }
    }
    options
}

/// What the battery select should offer for the chosen arm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatteryChoices {
    SelectArmFirst,
    NoBatteries,
    Batteries(Vec<SelectOption>),
}

impl BatteryChoices {
    /// Prompt text shown when no battery can be picked.
    #[must_use]
    pub fn prompt(&self, locale: Locale) -> &'static str {
        match self {
            Self::SelectArmFirst => Message::SelectArmFirst.text(locale),
            Self::NoBatteries => Message::NoBatteriesInArm.text(locale),
            Self::Batteries(_) => Message::SelectBattery.text(locale),
        }
    }
}

/// Battery options for `arm`, numbered from 1.
#[must_use]
pub fn battery_options(active: &[ActiveArm], arm: Option<u8>, locale: Locale) -> BatteryChoices {
    let Some(arm) = arm else {
        return BatteryChoices::SelectArmFirst;
    };
    let count = slave_count(active, arm);
    if count == 0 {
        return BatteryChoices::NoBatteries;
    }
    let battery = Message::Battery.text(locale);
    let mut options = vec![SelectOption::new("", Message::AllBatteries.text(locale))];
    options.extend((1..=count).map(|n| SelectOption::new(n.to_string(), format!("{battery} {n}"))));
    BatteryChoices::Batteries(options)
}

/// Load the current arm population.
///
/// # Errors
///
/// Returns a [`QueryFailure`] if the request fails, the status is not 2xx,
/// or the server reports `success: false`.
#[tracing::instrument(skip_all)]
pub async fn fetch_active_arms<T: LogTransport>(
    transport: &T,
    locale: Locale,
) -> Result<Vec<ActiveArm>, QueryFailure> {
    let reply = transport
        .get(ACTIVE_ARMS_ENDPOINT, locale)
        .await?
        .into_success()?;
    let response: ActiveArmsResponse = serde_json::from_slice(&reply.body)
        .map_err(|err| QueryFailure::Malformed(err.to_string()))?;
    if !response.success {
        return Err(QueryFailure::Malformed(
            response
                .message
                .unwrap_or_else(|| "active arms request unsuccessful".to_string()),
        ));
    }
    Ok(response.active_arms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::HttpReply;
    use crate::testing::StubTransport;

    fn active() -> Vec<ActiveArm> {
        vec![
            ActiveArm { arm: 1, slave_count: 7 },
            ActiveArm { arm: 2, slave_count: 0 },
            ActiveArm { arm: 3, slave_count: 2 },
        ]
    }

    #[test]
    fn should_disable_empty_arms() {
        let options = arm_options(&active(), Locale::En, ArmPolicy::DisableEmpty);

        assert_eq!(options.len(), 5);
        assert_eq!(options[0].label, "All Arms");
        assert_eq!(options[1].label, "Arm 1");
        assert!(!options[1].disabled);
        assert!(options[2].disabled);
        assert!(options[4].disabled);
    }

    #[test]
    fn should_hide_empty_arms() {
        let options = arm_options(&active(), Locale::Tr, ArmPolicy::HideEmpty);
        let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["", "1", "3"]);
        assert_eq!(options[2].label, "Kol 3");
    }

    #[test]
    fn should_ask_for_arm_before_batteries() {
        let choices = battery_options(&active(), None, Locale::En);
        assert_eq!(choices, BatteryChoices::SelectArmFirst);
        assert_eq!(choices.prompt(Locale::En), "Select an arm first");
    }

    #[test]
    fn should_report_arm_without_batteries() {
        assert_eq!(battery_options(&active(), Some(2), Locale::En), BatteryChoices::NoBatteries);
        assert_eq!(battery_options(&active(), Some(4), Locale::En), BatteryChoices::NoBatteries);
    }

    #[test]
    fn should_number_batteries_from_one() {
        let BatteryChoices::Batteries(options) = battery_options(&active(), Some(3), Locale::En)
        else {
            panic!("expected batteries");
        };
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["All Batteries", "Battery 1", "Battery 2"]);
    }

    #[tokio::test]
    async fn should_fetch_active_arms() {
        let transport = StubTransport::default();
        transport.push(HttpReply::json(
            200,
            &serde_json::json!({"success": true, "activeArms": [{"arm": 1, "slave_count": 3}]}),
        ));

        let arms = fetch_active_arms(&transport, Locale::Tr).await.unwrap();

        assert_eq!(arms, vec![ActiveArm { arm: 1, slave_count: 3 }]);
        assert_eq!(transport.requests()[0].method, "GET");
        assert_eq!(transport.requests()[0].path, ACTIVE_ARMS_ENDPOINT);
    }

    #[tokio::test]
    async fn should_fail_when_server_reports_unsuccessful() {
        let transport = StubTransport::default();
        transport.push(HttpReply::json(
            200,
            &serde_json::json!({"success": false, "message": "bus offline"}),
        ));

        let result = fetch_active_arms(&transport, Locale::Tr).await;

        assert_eq!(result, Err(QueryFailure::Malformed("bus offline".to_string())));
    }
}
