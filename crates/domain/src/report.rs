use crate::{settings::Channel, shared::entity::ID};

/// Per `Channel` counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelCounts {
    pub email: usize,
    pub sms: usize,
    pub push: usize,
}

impl ChannelCounts {
    pub fn get(&self, channel: Channel) -> usize {
        match channel {
            Channel::Email => self.email,
            Channel::Sms => self.sms,
            Channel::Push => self.push,
        }
    }

    fn increment(&mut self, channel: Channel) {
        match channel {
            Channel::Email => self.email += 1,
            Channel::Sms => self.sms += 1,
            Channel::Push => self.push += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.email + self.sms + self.push
    }
}

/// A delivery that failed for one student on one `Channel`
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryError {
    pub student_id: ID,
    pub channel: Channel,
    pub error: String,
}

/// Outcome of a notification run. Partial failures are collected here
/// instead of failing the run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReminderPassReport {
    pub active_tests: usize,
    pub students_evaluated: usize,
    pub students_with_pending: usize,
    pub sent: ChannelCounts,
    pub failed: ChannelCounts,
    pub errors: Vec<DeliveryError>,
}

impl ReminderPassReport {
    pub fn record_sent(&mut self, channel: Channel) {
        self.sent.increment(channel);
    }

    pub fn record_failure(&mut self, student_id: &ID, channel: Channel, error: String) {
        self.failed.increment(channel);
        self.errors.push(DeliveryError {
            student_id: student_id.clone(),
            channel,
            error,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_counts_per_channel() {
        let mut report = ReminderPassReport::default();
        let student_id = ID::new();
        report.record_sent(Channel::Email);
        report.record_sent(Channel::Email);
        report.record_sent(Channel::Push);
        report.record_failure(&student_id, Channel::Sms, "timeout".into());

        assert_eq!(report.sent.get(Channel::Email), 2);
        assert_eq!(report.sent.total(), 3);
        assert_eq!(report.failed.sms, 1);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].student_id, student_id);
        assert_eq!(report.errors[0].channel, Channel::Sms);
    }
}
