use exam_notifier_domain::{Channel, ChannelCounts, DeliveryError, ReminderPassReport, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelCountsDTO {
    pub email: usize,
    pub sms: usize,
    pub push: usize,
}

impl ChannelCountsDTO {
    pub fn new(counts: &ChannelCounts) -> Self {
        Self {
            email: counts.email,
            sms: counts.sms,
            push: counts.push,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryErrorDTO {
    pub student_id: ID,
    pub channel: Channel,
    pub error: String,
}

impl DeliveryErrorDTO {
    pub fn new(error: DeliveryError) -> Self {
        Self {
            student_id: error.student_id,
            channel: error.channel,
            error: error.error,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPassReportDTO {
    pub active_tests: usize,
    pub students_evaluated: usize,
    pub students_with_pending: usize,
    pub sent: ChannelCountsDTO,
    pub failed: ChannelCountsDTO,
    pub errors: Vec<DeliveryErrorDTO>,
}

impl ReminderPassReportDTO {
    pub fn new(report: ReminderPassReport) -> Self {
        Self {
            active_tests: report.active_tests,
            students_evaluated: report.students_evaluated,
            students_with_pending: report.students_with_pending,
            sent: ChannelCountsDTO::new(&report.sent),
            failed: ChannelCountsDTO::new(&report.failed),
            errors: report
                .errors
                .into_iter()
                .map(DeliveryErrorDTO::new)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_serializes_report_in_camel_case() {
        let mut report = ReminderPassReport::default();
        report.active_tests = 2;
        report.record_sent(Channel::Email);
        report.record_failure(&ID::default(), Channel::Sms, "timeout".into());

        let json = serde_json::to_value(ReminderPassReportDTO::new(report)).unwrap();
        assert_eq!(json["activeTests"], 2);
        assert_eq!(json["sent"]["email"], 1);
        assert_eq!(json["failed"]["sms"], 1);
        assert_eq!(json["errors"][0]["channel"], "sms");
        assert_eq!(json["errors"][0]["error"], "timeout");
    }
}
